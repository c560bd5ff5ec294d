use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;
use url::Url;

/// Placeholder record shown for athletes without an official bout
pub const ZERO_RECORD: &str = "0-0-0 (W-L-D)";

/// Keys owned by the record itself; stat labels may not replace them
pub const RESERVED_KEYS: [&str; 5] = ["name", "weight_class", "record", "profile_url", "scraped_at"];

/// Summary fields read from a listing card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialAthlete {
    pub name: Option<String>,
    pub weight_class: Option<String>,
    pub record: Option<String>,
}

impl PartialAthlete {
    /// Athletes with the placeholder record have no official bouts and are skipped
    pub fn is_eligible(&self) -> bool {
        self.record.as_deref() != Some(ZERO_RECORD)
    }
}

/// A single extracted statistic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
    Null,
}

impl StatValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StatValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StatValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Complete athlete record: listing fields plus whatever the profile page exposes.
///
/// Serializes as one flat mapping. The seeded fields are always present,
/// every other key depends on which sections the profile page had.
#[derive(Debug, Clone, Serialize)]
pub struct AthleteRecord {
    #[serde(flatten)]
    pub athlete: PartialAthlete,
    pub profile_url: Url,
    pub scraped_at: DateTime<Utc>,
    #[serde(flatten)]
    stats: BTreeMap<String, StatValue>,
}

impl AthleteRecord {
    pub fn new(athlete: PartialAthlete, profile_url: Url) -> Self {
        Self {
            athlete,
            profile_url,
            scraped_at: Utc::now(),
            stats: BTreeMap::new(),
        }
    }

    /// Store a stat under `label`. Later writes to the same label win.
    pub fn insert_stat(&mut self, label: impl Into<String>, value: StatValue) {
        let label = label.into();
        if RESERVED_KEYS.contains(&label.as_str()) {
            warn!(label = %label, url = %self.profile_url, "Stat label collides with a record field, dropping");
            return;
        }
        self.stats.insert(label, value);
    }

    pub fn stat(&self, label: &str) -> Option<&StatValue> {
        self.stats.get(label)
    }

    pub fn stats(&self) -> &BTreeMap<String, StatValue> {
        &self.stats
    }

    /// File-system friendly identifier.
    ///
    /// Taken from the last segment of the profile path, which the site keeps
    /// unique per athlete (`bruno-silva`, `bruno-silva-0`). Falls back to the
    /// name when the path has no segment.
    pub fn slug(&self) -> String {
        let source = self
            .profile_url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .or(self.athlete.name.as_deref())
            .unwrap_or("athlete");

        let mut slug = String::with_capacity(source.len());
        for c in source.chars() {
            if c.is_alphanumeric() {
                slug.extend(c.to_lowercase());
            } else if !slug.ends_with('-') {
                slug.push('-');
            }
        }
        slug.trim_matches('-').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AthleteRecord {
        let athlete = PartialAthlete {
            name: Some("Jon Jones".to_string()),
            weight_class: Some("Heavyweight".to_string()),
            record: Some("27-1-0 (W-L-D)".to_string()),
        };
        AthleteRecord::new(athlete, Url::parse("https://www.ufc.com/athlete/jon-jones").unwrap())
    }

    #[test]
    fn zero_record_is_not_eligible() {
        let mut athlete = PartialAthlete {
            record: Some(ZERO_RECORD.to_string()),
            ..Default::default()
        };
        assert!(!athlete.is_eligible());

        athlete.record = Some("5-1-0 (W-L-D)".to_string());
        assert!(athlete.is_eligible());

        athlete.record = None;
        assert!(athlete.is_eligible());
    }

    #[test]
    fn serializes_flat() {
        let mut rec = record();
        rec.insert_stat("Striking accuracy", StatValue::Number(57.0));
        rec.insert_stat("Stance", StatValue::Text("Orthodox".to_string()));
        rec.insert_stat("Hometown", StatValue::Null);

        let value = serde_json::to_value(&rec).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["name"], "Jon Jones");
        assert_eq!(obj["weight_class"], "Heavyweight");
        assert_eq!(obj["record"], "27-1-0 (W-L-D)");
        assert_eq!(obj["profile_url"], "https://www.ufc.com/athlete/jon-jones");
        assert_eq!(obj["Striking accuracy"], 57.0);
        assert_eq!(obj["Stance"], "Orthodox");
        assert!(obj["Hometown"].is_null());
        assert!(obj.contains_key("scraped_at"));
    }

    #[test]
    fn missing_seed_fields_serialize_as_null() {
        let rec = AthleteRecord::new(
            PartialAthlete::default(),
            Url::parse("https://www.ufc.com/athlete/x").unwrap(),
        );
        let value = serde_json::to_value(&rec).unwrap();
        assert!(value["name"].is_null());
        assert!(value["weight_class"].is_null());
        assert!(value["record"].is_null());
    }

    #[test]
    fn later_stat_overwrites_earlier() {
        let mut rec = record();
        rec.insert_stat("Reach", StatValue::Text("84.5".to_string()));
        rec.insert_stat("Reach", StatValue::Number(84.5));
        assert_eq!(rec.stat("Reach"), Some(&StatValue::Number(84.5)));
        assert_eq!(rec.stats().len(), 1);
    }

    #[test]
    fn reserved_labels_are_dropped() {
        let mut rec = record();
        rec.insert_stat("name", StatValue::Text("Someone Else".to_string()));
        assert!(rec.stat("name").is_none());
        assert_eq!(rec.athlete.name.as_deref(), Some("Jon Jones"));
    }

    #[test]
    fn slug_from_profile_path() {
        assert_eq!(record().slug(), "jon-jones");

        let rec = AthleteRecord::new(
            PartialAthlete::default(),
            Url::parse("https://www.ufc.com/athlete/israel-adesanya/").unwrap(),
        );
        assert_eq!(rec.slug(), "israel-adesanya");
    }

    #[test]
    fn namesakes_get_distinct_slugs() {
        let bruno = || PartialAthlete {
            name: Some("Bruno Silva".to_string()),
            ..Default::default()
        };
        let first = AthleteRecord::new(bruno(), Url::parse("https://www.ufc.com/athlete/bruno-silva").unwrap());
        let second = AthleteRecord::new(bruno(), Url::parse("https://www.ufc.com/athlete/bruno-silva-0").unwrap());

        assert_eq!(first.slug(), "bruno-silva");
        assert_eq!(second.slug(), "bruno-silva-0");
    }

    #[test]
    fn slug_falls_back_to_name() {
        let rec = AthleteRecord::new(
            PartialAthlete {
                name: Some("Jon Jones".to_string()),
                ..Default::default()
            },
            Url::parse("https://www.ufc.com/").unwrap(),
        );
        assert_eq!(rec.slug(), "jon-jones");
    }
}
