//! Station model — normalized representation of one directory entry.

use serde::{Deserialize, Serialize};

/// One entry as the directory service returns it. Everything is optional
/// on the wire; `RawStation` absorbs whatever shape arrives and
/// [`StationRecord::from_raw`] decides what survives.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub url_resolved: String,
    #[serde(default)]
    pub favicon: String,
}

/// A station that passed validation and may enter result or favorite sets.
///
/// Identity for all set operations is `url_resolved`: two records with the
/// same resolved URL are the same station regardless of other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub url_resolved: String,
    #[serde(default)]
    pub favicon: Option<String>,
}

impl StationRecord {
    /// Validate and normalize a raw directory entry.
    ///
    /// A record survives only when `url_resolved` starts with `https://`
    /// (plain-http streams are unplayable on secure clients) and `name`
    /// is non-empty. Anything else is rejected, never an error.
    pub fn from_raw(raw: RawStation) -> Option<Self> {
        if !raw.url_resolved.starts_with("https://") {
            return None;
        }
        let name = raw.name.trim();
        if name.is_empty() {
            return None;
        }
        let favicon = if raw.favicon.trim().is_empty() {
            None
        } else {
            Some(raw.favicon)
        };
        Some(Self {
            name: name.to_string(),
            country: raw.country,
            url_resolved: raw.url_resolved,
            favicon,
        })
    }

    /// Identity check used by favorite membership and dedup.
    pub fn same_station(&self, other: &StationRecord) -> bool {
        self.url_resolved == other.url_resolved
    }
}

/// Run a sequence of raw entries through validation, dropping rejects and
/// preserving upstream order.
pub fn normalize(raw: Vec<RawStation>) -> Vec<StationRecord> {
    raw.into_iter().filter_map(StationRecord::from_raw).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, url: &str) -> RawStation {
        RawStation {
            name: name.to_string(),
            url_resolved: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_secure_named_station() {
        let st = StationRecord::from_raw(RawStation {
            name: "Radio Pichincha".into(),
            country: "Ecuador".into(),
            url_resolved: "https://stream.example.ec/live".into(),
            favicon: String::new(),
        })
        .expect("valid station");
        assert_eq!(st.country, "Ecuador");
        assert_eq!(st.favicon, None);
    }

    #[test]
    fn rejects_insecure_or_missing_url() {
        assert!(StationRecord::from_raw(raw("AM 1040", "http://stream.example/live")).is_none());
        assert!(StationRecord::from_raw(raw("AM 1040", "")).is_none());
    }

    #[test]
    fn rejects_empty_or_blank_name() {
        assert!(StationRecord::from_raw(raw("", "https://stream.example/live")).is_none());
        assert!(StationRecord::from_raw(raw("   ", "https://stream.example/live")).is_none());
    }

    #[test]
    fn favicon_kept_when_present() {
        let mut r = raw("FM Mundo", "https://stream.example/fm");
        r.favicon = "https://example.com/icon.png".into();
        let st = StationRecord::from_raw(r).unwrap();
        assert_eq!(st.favicon.as_deref(), Some("https://example.com/icon.png"));
    }

    #[test]
    fn normalize_preserves_order_and_drops_rejects() {
        let out = normalize(vec![
            raw("A", "https://a.example/s"),
            raw("", "https://b.example/s"),
            raw("C", "http://c.example/s"),
            raw("D", "https://d.example/s"),
        ]);
        let names: Vec<_> = out.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["A", "D"]);
    }
}
