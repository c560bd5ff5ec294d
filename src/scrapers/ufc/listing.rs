use crate::models::PartialAthlete;
use crate::scrapers::ufc::document::{css, first_own_text, Document};
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use url::Url;

static CARD: LazyLock<Selector> = LazyLock::new(|| css("div.c-listing-athlete-flipcard__inner"));
static NAME: LazyLock<Selector> = LazyLock::new(|| css("span.c-listing-athlete__name"));
static WEIGHT_CLASS: LazyLock<Selector> =
    LazyLock::new(|| css("div.field--name-stats-weight-class div.field__item"));
static RECORD: LazyLock<Selector> = LazyLock::new(|| css("span.c-listing-athlete__record"));
static DETAIL_LINK: LazyLock<Selector> =
    LazyLock::new(|| css("div.c-listing-athlete-flipcard__back a"));
static NEXT_PAGE: LazyLock<Selector> = LazyLock::new(|| css("a.button"));

static NAME_TOKENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+|-) (\w+|-)").expect("name pattern"));

/// An eligible card and the profile page to visit for it
#[derive(Debug, Clone, PartialEq)]
pub struct ListingEntry {
    pub athlete: PartialAthlete,
    pub detail_url: Url,
}

/// Everything the walker needs from one listing page
#[derive(Debug, Default)]
pub struct ListingPage {
    pub entries: Vec<ListingEntry>,
    /// Cards dropped by the eligibility filter
    pub excluded: usize,
    pub next_page: Option<Url>,
}

/// Parse a listing page.
///
/// `listing_root` resolves the next-page link, `site_root` resolves the
/// athlete profile links.
pub fn parse_listing(html: &str, listing_root: &Url, site_root: &Url) -> ListingPage {
    let document = Document::parse(html);
    let mut page = ListingPage::default();

    let cards: Vec<_> = document.select(&CARD).collect();
    info!("Found {} athlete cards", cards.len());

    for (idx, card) in cards.into_iter().enumerate() {
        let athlete = read_card(card);

        if !athlete.is_eligible() {
            debug!(name = ?athlete.name, "Skipping athlete without official bouts");
            page.excluded += 1;
            continue;
        }

        let Some(href) = card.select(&DETAIL_LINK).next().and_then(|a| a.value().attr("href")) else {
            warn!(card = idx, name = ?athlete.name, "Card has no profile link, skipping");
            continue;
        };

        match site_root.join(href) {
            Ok(detail_url) if on_site(&detail_url, site_root) => {
                page.entries.push(ListingEntry { athlete, detail_url })
            }
            Ok(detail_url) => warn!(card = idx, url = %detail_url, "Profile link leaves the site, skipping"),
            Err(e) => warn!(card = idx, href, "Unresolvable profile link: {}", e),
        }
    }

    page.next_page = next_page(&document, listing_root, site_root);
    page
}

/// Only pages on the site root's host are followed
fn on_site(url: &Url, site_root: &Url) -> bool {
    url.host_str() == site_root.host_str()
}

fn read_card(card: ElementRef<'_>) -> PartialAthlete {
    let first = |sel: &Selector| card.select(sel).find_map(first_own_text);

    PartialAthlete {
        name: first(&*NAME).and_then(|raw| athlete_name(&raw)),
        weight_class: first(&*WEIGHT_CLASS),
        record: first(&*RECORD),
    }
}

/// First and last name tokens, e.g. `"Jon Jones"`.
fn athlete_name(raw: &str) -> Option<String> {
    let caps = NAME_TOKENS.captures(raw)?;
    Some(format!("{} {}", &caps[1], &caps[2]))
}

fn next_page(document: &Document, listing_root: &Url, site_root: &Url) -> Option<Url> {
    let href = document.attr(&NEXT_PAGE, "href")?;
    match listing_root.join(&href) {
        Ok(url) if on_site(&url, site_root) => Some(url),
        Ok(url) => {
            warn!(url = %url, "Next-page link leaves the site, stopping pagination");
            None
        }
        Err(e) => {
            warn!(href = %href, "Unresolvable next-page link: {}", e);
            None
        }
    }
}
