use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder substituted with the release tag in a commit URL template.
pub const TAG_PLACEHOLDER: &str = "{tag}";

pub const DEFAULT_COMMIT_URL_TEMPLATE: &str =
    "https://github.com/xenia-canary/xenia-canary/commit/{tag}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::Linux => "Linux",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub url: String,
}

impl Asset {
    /// Windows is the fallback, it is never detected explicitly.
    pub fn platform(&self) -> Platform {
        if self.name.to_lowercase().contains("linux") {
            Platform::Linux
        } else {
            Platform::Windows
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub changelog: Changelog,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Release {
    /// Parse `published_at` into a UTC timestamp.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.published_at)
    }

    pub fn display_title(&self) -> &str {
        if self.changelog.title.is_empty() {
            &self.tag_name
        } else {
            &self.changelog.title
        }
    }

    /// Release notes body, `None` when missing or blank.
    pub fn changes(&self) -> Option<&str> {
        self.changelog
            .changes
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }

    pub fn commit_url(&self, template: &str) -> String {
        if template.contains(TAG_PLACEHOLDER) {
            template.replace(TAG_PLACEHOLDER, &self.tag_name)
        } else {
            format!("{}{}", template, self.tag_name)
        }
    }

    /// Date in `Jan 2, 2024` form, or the raw string if it doesn't parse.
    pub fn formatted_date(&self) -> String {
        self.published()
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| self.published_at.clone())
    }

    /// First asset for the given platform.
    pub fn asset_for(&self, platform: Platform) -> Option<&Asset> {
        self.assets.iter().find(|a| a.platform() == platform)
    }
}

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` (read as UTC) or a plain
/// `YYYY-MM-DD` (UTC midnight).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    fn release(tag: &str, title: &str, published: &str) -> Release {
        Release {
            tag_name: tag.to_string(),
            published_at: published.to_string(),
            url: format!("https://example.com/releases/{}", tag),
            changelog: Changelog {
                title: title.to_string(),
                changes: None,
            },
            assets: Vec::new(),
        }
    }

    #[test]
    fn test_asset_platform_linux_case_insensitive() {
        let asset = Asset {
            name: "xenia_canary_LINUX.tar.gz".into(),
            url: "https://example.com/a".into(),
        };
        assert_eq!(asset.platform(), Platform::Linux);
    }

    #[test]
    fn test_asset_platform_defaults_to_windows() {
        let asset = Asset {
            name: "xenia_canary.zip".into(),
            url: "https://example.com/a".into(),
        };
        assert_eq!(asset.platform(), Platform::Windows);

        let asset = Asset {
            name: "something-macos.dmg".into(),
            url: "https://example.com/b".into(),
        };
        assert_eq!(asset.platform(), Platform::Windows);
    }

    #[test]
    fn test_display_title_falls_back_to_tag() {
        assert_eq!(release("abc123", "", "2024-01-01").display_title(), "abc123");
        assert_eq!(
            release("abc123", "Fix audio", "2024-01-01").display_title(),
            "Fix audio"
        );
    }

    #[test]
    fn test_changes_blank_is_none() {
        let mut rel = release("v1", "t", "2024-01-01");
        assert_eq!(rel.changes(), None);
        rel.changelog.changes = Some("   ".into());
        assert_eq!(rel.changes(), None);
        rel.changelog.changes = Some("- fixed things".into());
        assert_eq!(rel.changes(), Some("- fixed things"));
    }

    #[test]
    fn test_commit_url_substitutes_placeholder() {
        let rel = release("d3adb33f", "", "2024-01-01");
        assert_eq!(
            rel.commit_url(DEFAULT_COMMIT_URL_TEMPLATE),
            "https://github.com/xenia-canary/xenia-canary/commit/d3adb33f"
        );
        assert_eq!(
            rel.commit_url("https://example.com/c/"),
            "https://example.com/c/d3adb33f"
        );
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let dt = parse_timestamp("2024-06-01T12:30:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap());

        let dt = parse_timestamp("2024-06-01T12:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_parse_timestamp_plain_date_is_utc_midnight() {
        let dt = parse_timestamp("2024-01-01").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_naive_datetime() {
        let dt = parse_timestamp("2024-03-05T07:08:09").unwrap();
        assert_eq!(dt.day(), 5);
        assert_eq!(dt.second(), 9);
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("2024-13-45").is_none());
    }

    #[test]
    fn test_formatted_date() {
        assert_eq!(
            release("v1", "", "2024-01-02T10:00:00Z").formatted_date(),
            "Jan 2, 2024"
        );
        assert_eq!(release("v1", "", "garbage").formatted_date(), "garbage");
    }

    #[test]
    fn test_deserialize_feed_entry() {
        let json = r#"{
            "tag_name": "a1b2c3",
            "published_at": "2024-06-01T00:00:00Z",
            "url": "https://github.com/xenia-canary/xenia-canary-releases/releases/tag/a1b2c3",
            "changelog": { "title": "Fix GPU hang", "changes": "" },
            "assets": [
                { "name": "xenia_canary_windows.zip", "url": "https://example.com/w.zip" },
                { "name": "xenia_canary_linux.tar.gz", "url": "https://example.com/l.tar.gz" }
            ]
        }"#;

        let rel: Release = serde_json::from_str(json).unwrap();
        assert_eq!(rel.tag_name, "a1b2c3");
        assert_eq!(rel.display_title(), "Fix GPU hang");
        assert_eq!(rel.changes(), None);
        assert_eq!(
            rel.asset_for(Platform::Linux).map(|a| a.url.as_str()),
            Some("https://example.com/l.tar.gz")
        );
        assert_eq!(
            rel.asset_for(Platform::Windows).map(|a| a.url.as_str()),
            Some("https://example.com/w.zip")
        );
    }

    #[test]
    fn test_deserialize_missing_optional_fields() {
        let json = r#"{ "tag_name": "v9", "published_at": "2024-01-01", "url": "u",
                        "changelog": { "title": "" } }"#;
        let rel: Release = serde_json::from_str(json).unwrap();
        assert!(rel.assets.is_empty());
        assert_eq!(rel.changelog.changes, None);
    }
}
