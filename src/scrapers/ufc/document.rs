use scraper::html::Select;
use scraper::{ElementRef, Html, Selector};

/// Parsed rendered page.
///
/// Text lookups follow the `::text` convention: only the direct text children
/// of a matched element count, trimmed, with whitespace-only nodes ignored.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.html.select(selector)
    }

    /// Text nodes of every matched element, in document order
    pub fn texts(&self, selector: &Selector) -> Vec<String> {
        self.select(selector).flat_map(own_texts).collect()
    }

    pub fn first_text(&self, selector: &Selector) -> Option<String> {
        self.select(selector).find_map(first_own_text)
    }

    /// Attribute of the first matched element
    pub fn attr(&self, selector: &Selector, name: &str) -> Option<String> {
        self.select(selector)
            .next()
            .and_then(|el| el.value().attr(name))
            .map(str::to_string)
    }
}

pub fn own_texts(element: ElementRef<'_>) -> impl Iterator<Item = String> + '_ {
    element.children().filter_map(|child| {
        let text = child.value().as_text()?.trim();
        (!text.is_empty()).then(|| text.to_string())
    })
}

pub fn first_own_text(element: ElementRef<'_>) -> Option<String> {
    own_texts(element).next()
}

/// First non-blank text node anywhere below `element`, in document order
pub fn first_descendant_text(element: ElementRef<'_>) -> Option<String> {
    element
        .text()
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

/// Text nodes of every descendant of `element` matching `selector`
pub fn texts_within(element: ElementRef<'_>, selector: &Selector) -> Vec<String> {
    element.select(selector).flat_map(own_texts).collect()
}

/// Compile a selector from a constant pattern.
pub(crate) fn css(pattern: &str) -> Selector {
    Selector::parse(pattern).unwrap_or_else(|e| panic!("invalid selector {pattern:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="bio">
            <div class="c-bio__text">
              Active
              <span>ignored</span>
              trailing
            </div>
            <div class="c-bio__text"><div><div>34</div></div></div>
          </div>
          <a class="button" href="?page=1">Load more</a>
          <a class="button" href="?page=9">Other</a>
        </body></html>
    "#;

    #[test]
    fn texts_only_take_direct_children() {
        let doc = Document::parse(PAGE);
        let sel = css("div.c-bio__text");
        assert_eq!(doc.texts(&sel), vec!["Active", "trailing"]);
    }

    #[test]
    fn first_text_skips_elements_without_direct_text() {
        let doc = Document::parse(PAGE);
        assert_eq!(doc.first_text(&css("div.c-bio__text")).as_deref(), Some("Active"));
        assert_eq!(doc.first_text(&css("div.missing")), None);
    }

    #[test]
    fn attr_reads_first_match() {
        let doc = Document::parse(PAGE);
        assert_eq!(doc.attr(&css("a.button"), "href").as_deref(), Some("?page=1"));
        assert_eq!(doc.attr(&css("a.nope"), "href"), None);
    }

    #[test]
    fn nested_lookup() {
        let doc = Document::parse(PAGE);
        let sel = css("div.c-bio__text");
        let second = doc.select(&sel).nth(1).unwrap();
        assert_eq!(texts_within(second, &css("div div")), vec!["34"]);
    }
}
