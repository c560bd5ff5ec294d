use crate::error::ExtractError;
use crate::models::{AthleteRecord, PartialAthlete, StatValue};
use crate::scrapers::ufc::document::{css, first_descendant_text, first_own_text, texts_within, Document};
use crate::scrapers::ufc::normalize;
use scraper::Selector;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

/// Biography status shown for retired or inactive athletes
pub const NOT_FIGHTING: &str = "Not Fighting";

static CIRCLE_LABEL: LazyLock<Selector> = LazyLock::new(|| css("h2.e-t3"));
static CIRCLE_VALUE: LazyLock<Selector> = LazyLock::new(|| css("text.e-chart-circle__percent"));
static OVERLAP_LABEL: LazyLock<Selector> = LazyLock::new(|| css("dt.c-overlap__stats-text"));
static OVERLAP_VALUE: LazyLock<Selector> = LazyLock::new(|| css("dd.c-overlap__stats-value"));
static COMPARE_LABEL: LazyLock<Selector> = LazyLock::new(|| css("div.c-stat-compare__label"));
static COMPARE_VALUE: LazyLock<Selector> = LazyLock::new(|| css("div.c-stat-compare__number"));
static BAR_LABEL: LazyLock<Selector> = LazyLock::new(|| css("div.c-stat-3bar__label"));
static BAR_VALUE: LazyLock<Selector> = LazyLock::new(|| css("div.c-stat-3bar__value"));
static DIAGRAM_GROUP: LazyLock<Selector> = LazyLock::new(|| css("div.c-stat-body__diagram g"));
static SVG_TEXT: LazyLock<Selector> = LazyLock::new(|| css("text"));
static BIO_LABEL: LazyLock<Selector> = LazyLock::new(|| css("div.c-bio__label"));
static BIO_VALUE: LazyLock<Selector> = LazyLock::new(|| css("div.c-bio__text"));
static NESTED_DIV: LazyLock<Selector> = LazyLock::new(|| css("div"));

/// Extract the full record for one athlete profile page.
///
/// Returns `Ok(None)` for athletes who are no longer fighting.
pub fn extract_athlete(
    html: &str,
    athlete: PartialAthlete,
    profile_url: Url,
) -> Result<Option<AthleteRecord>, ExtractError> {
    let document = Document::parse(html);

    if document.first_text(&BIO_VALUE).as_deref() == Some(NOT_FIGHTING) {
        debug!(url = %profile_url, name = ?athlete.name, "Athlete is not fighting, skipping");
        return Ok(None);
    }

    let mut record = AthleteRecord::new(athlete, profile_url);

    circle_stats(&document, &mut record)?;
    overlap_stats(&document, &mut record)?;
    compare_stats(&document, &mut record)?;
    three_bar_stats(&document, &mut record)?;
    body_diagram_stats(&document, &mut record)?;
    biography(&document, &mut record)?;

    debug!(url = %record.profile_url, stats = record.stats().len(), "Extracted athlete");
    Ok(Some(record))
}

/// Zip labels with values, refusing to guess when the counts differ.
fn paired<L, V>(
    section: &'static str,
    labels: Vec<L>,
    values: Vec<V>,
) -> Result<impl Iterator<Item = (L, V)>, ExtractError> {
    if labels.len() != values.len() {
        return Err(ExtractError::StructuralMismatch {
            section,
            labels: labels.len(),
            values: values.len(),
        });
    }
    Ok(labels.into_iter().zip(values))
}

fn circle_stats(doc: &Document, record: &mut AthleteRecord) -> Result<(), ExtractError> {
    for (label, value) in paired("circle chart", doc.texts(&CIRCLE_LABEL), doc.texts(&CIRCLE_VALUE))? {
        let pct = normalize::percentage(&label, &value)?;
        record.insert_stat(label, StatValue::Number(pct));
    }
    Ok(())
}

fn overlap_stats(doc: &Document, record: &mut AthleteRecord) -> Result<(), ExtractError> {
    for (label, value) in paired("overlap", doc.texts(&OVERLAP_LABEL), doc.texts(&OVERLAP_VALUE))? {
        let n = normalize::real(&label, &value)?;
        record.insert_stat(label, StatValue::Number(n));
    }
    Ok(())
}

fn compare_stats(doc: &Document, record: &mut AthleteRecord) -> Result<(), ExtractError> {
    for (label, value) in paired("compare", doc.texts(&COMPARE_LABEL), doc.texts(&COMPARE_VALUE))? {
        let value = normalize::compare_value(&label, &value)?;
        record.insert_stat(label, value);
    }
    Ok(())
}

fn three_bar_stats(doc: &Document, record: &mut AthleteRecord) -> Result<(), ExtractError> {
    for (label, value) in paired("three bar", doc.texts(&BAR_LABEL), doc.texts(&BAR_VALUE))? {
        let digits = normalize::leading_digits(&value).ok_or_else(|| ExtractError::MalformedNumber {
            field: label.clone(),
            value: value.clone(),
        })?;
        let n = normalize::real(&label, digits)?;
        record.insert_stat(label, StatValue::Number(n));
    }
    Ok(())
}

// Diagram values stay raw text, unlike every other section.
fn body_diagram_stats(doc: &Document, record: &mut AthleteRecord) -> Result<(), ExtractError> {
    for group in doc.select(&DIAGRAM_GROUP).skip(1).take(3) {
        let texts = texts_within(group, &SVG_TEXT);
        let [_, value, label, ..] = texts.as_slice() else {
            return Err(ExtractError::MissingText {
                section: "body diagram",
                expected: 3,
                found: texts.len(),
            });
        };
        record.insert_stat(label.clone(), StatValue::Text(value.clone()));
    }
    Ok(())
}

fn biography(doc: &Document, record: &mut AthleteRecord) -> Result<(), ExtractError> {
    let values: Vec<_> = doc.select(&BIO_VALUE).collect();
    for (label, element) in paired("biography", doc.texts(&BIO_LABEL), values)? {
        // The outer node of the age field holds decoration, the number sits in a nested div
        let text = if label == "Age" {
            element.select(&NESTED_DIV).find_map(first_own_text)
        } else {
            first_descendant_text(element)
        };

        let value = match text {
            Some(text) => normalize::bio_value(&label, &text)?,
            None => StatValue::Null,
        };
        record.insert_stat(label, value);
    }
    Ok(())
}
