//! Text and date-range filtering plus date ordering over the release list.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use crate::domain::Release;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Newest => SortOrder::Oldest,
            SortOrder::Oldest => SortOrder::Newest,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest first",
            SortOrder::Oldest => "Oldest first",
        }
    }
}

/// User-entered filter inputs, kept as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub from: String,
    pub to: String,
    pub sort: SortOrder,
}

impl FilterCriteria {
    /// Reset the text and date inputs. Sort order is left alone.
    pub fn clear(&mut self) {
        self.search.clear();
        self.from.clear();
        self.to.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.from.is_empty() && self.to.is_empty()
    }
}

/// A date bound field after parsing.
///
/// An invalid bound rejects every release rather than being ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    None,
    At(DateTime<Utc>),
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Lower,
    Upper,
}

impl DateBound {
    /// Lower bounds snap to 00:00:00.000 and upper bounds to 23:59:59.999 of
    /// their UTC calendar day.
    pub fn parse(input: &str, kind: BoundKind) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return DateBound::None;
        }

        let Some(day) = parse_day(input) else {
            return DateBound::Invalid;
        };

        let time = match kind {
            BoundKind::Lower => Some(NaiveTime::MIN),
            BoundKind::Upper => NaiveTime::from_hms_milli_opt(23, 59, 59, 999),
        };
        match time {
            Some(time) => DateBound::At(day.and_time(time).and_utc()),
            None => DateBound::Invalid,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, DateBound::Invalid)
    }

    fn admits(&self, published: DateTime<Utc>, kind: BoundKind) -> bool {
        match (self, kind) {
            (DateBound::None, _) => true,
            (DateBound::Invalid, _) => false,
            (DateBound::At(bound), BoundKind::Lower) => published >= *bound,
            (DateBound::At(bound), BoundKind::Upper) => published <= *bound,
        }
    }
}

fn parse_day(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(input)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

/// Apply `criteria` to `releases`, returning the visible releases in sort
/// order. Releases whose publish date doesn't parse are always dropped.
pub fn apply(releases: &[Arc<Release>], criteria: &FilterCriteria) -> Vec<Arc<Release>> {
    let query = criteria.search.to_lowercase();
    let from = DateBound::parse(&criteria.from, BoundKind::Lower);
    let to = DateBound::parse(&criteria.to, BoundKind::Upper);

    let mut visible: Vec<(DateTime<Utc>, Arc<Release>)> = releases
        .iter()
        .filter_map(|release| {
            let Some(published) = release.published() else {
                tracing::warn!(
                    "Skipping release {} with unparseable publish date {:?}",
                    release.tag_name,
                    release.published_at
                );
                return None;
            };

            let matches = matches_query(release, &query)
                && from.admits(published, BoundKind::Lower)
                && to.admits(published, BoundKind::Upper);

            matches.then(|| (published, Arc::clone(release)))
        })
        .collect();

    match criteria.sort {
        SortOrder::Newest => visible.sort_by(|a, b| b.0.cmp(&a.0)),
        SortOrder::Oldest => visible.sort_by(|a, b| a.0.cmp(&b.0)),
    }

    visible.into_iter().map(|(_, release)| release).collect()
}

/// `query` must already be lowercase.
fn matches_query(release: &Release, query: &str) -> bool {
    query.is_empty()
        || release.changelog.title.to_lowercase().contains(query)
        || release.tag_name.to_lowercase().contains(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Changelog;
    use chrono::{TimeDelta, TimeZone};

    fn release(tag: &str, title: &str, published: &str) -> Arc<Release> {
        Arc::new(Release {
            tag_name: tag.to_string(),
            published_at: published.to_string(),
            url: String::new(),
            changelog: Changelog {
                title: title.to_string(),
                changes: None,
            },
            assets: Vec::new(),
        })
    }

    fn two_release_feed() -> Vec<Arc<Release>> {
        vec![
            release("v1", "", "2024-01-01"),
            release("v2", "", "2024-06-01"),
        ]
    }

    fn tags(releases: &[Arc<Release>]) -> Vec<&str> {
        releases.iter().map(|r| r.tag_name.as_str()).collect()
    }

    fn criteria(search: &str, from: &str, to: &str) -> FilterCriteria {
        FilterCriteria {
            search: search.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            sort: SortOrder::Newest,
        }
    }

    #[test]
    fn test_search_by_tag() {
        let out = apply(&two_release_feed(), &criteria("v2", "", ""));
        assert_eq!(tags(&out), vec!["v2"]);
    }

    #[test]
    fn test_date_range_scenario() {
        let out = apply(&two_release_feed(), &criteria("", "2024-02-01", "2024-12-31"));
        assert_eq!(tags(&out), vec!["v2"]);
    }

    #[test]
    fn test_from_after_all_releases_is_empty() {
        let out = apply(&two_release_feed(), &criteria("", "2025-01-01", ""));
        assert!(out.is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_on_title_or_tag() {
        let feed = vec![
            release("abc123", "Fix Vulkan crash", "2024-01-01T00:00:00Z"),
            release("VULKAN-9", "Other", "2024-01-02T00:00:00Z"),
            release("def456", "Audio fix", "2024-01-03T00:00:00Z"),
        ];

        let out = apply(&feed, &criteria("vulkan", "", ""));
        assert_eq!(tags(&out), vec!["VULKAN-9", "abc123"]);
        for r in &out {
            let q = "vulkan";
            assert!(
                r.changelog.title.to_lowercase().contains(q)
                    || r.tag_name.to_lowercase().contains(q)
            );
        }
    }

    #[test]
    fn test_unparseable_dates_always_excluded() {
        let feed = vec![
            release("good", "title", "2024-01-01T00:00:00Z"),
            release("bad", "title", "yesterday"),
            release("empty", "title", ""),
        ];

        for c in [
            criteria("", "", ""),
            criteria("bad", "", ""),
            criteria("", "2000-01-01", "2100-01-01"),
        ] {
            let out = apply(&feed, &c);
            assert!(out.iter().all(|r| r.tag_name == "good"));
        }
    }

    #[test]
    fn test_bounds_are_inclusive_of_whole_days() {
        let feed = vec![
            release("before", "", "2024-02-29T23:59:59.999Z"),
            release("start", "", "2024-03-01T00:00:00.000Z"),
            release("end", "", "2024-03-31T23:59:59.999Z"),
            release("after", "", "2024-04-01T00:00:00.000Z"),
        ];

        let out = apply(&feed, &criteria("", "2024-03-01", "2024-03-31"));
        assert_eq!(tags(&out), vec!["end", "start"]);
    }

    #[test]
    fn test_same_day_range() {
        let feed = vec![
            release("morning", "", "2024-05-05T01:00:00Z"),
            release("night", "", "2024-05-05T23:30:00Z"),
            release("next", "", "2024-05-06T00:30:00Z"),
        ];

        let out = apply(&feed, &criteria("", "2024-05-05", "2024-05-05"));
        assert_eq!(tags(&out), vec!["night", "morning"]);
    }

    #[test]
    fn test_invalid_bound_fails_closed() {
        let feed = two_release_feed();
        assert!(apply(&feed, &criteria("", "not-a-date", "")).is_empty());
        assert!(apply(&feed, &criteria("", "", "2024-99-99")).is_empty());
    }

    #[test]
    fn test_sort_orders() {
        let feed = vec![
            release("mid", "", "2024-03-01"),
            release("old", "", "2023-01-01"),
            release("new", "", "2025-01-01"),
        ];

        let mut c = criteria("", "", "");
        let newest = apply(&feed, &c);
        assert_eq!(tags(&newest), vec!["new", "mid", "old"]);
        for pair in newest.windows(2) {
            assert!(pair[0].published() >= pair[1].published());
        }

        c.sort = SortOrder::Oldest;
        assert_eq!(tags(&apply(&feed, &c)), vec!["old", "mid", "new"]);
    }

    #[test]
    fn test_apply_is_deterministic() {
        let feed = vec![
            release("a", "same", "2024-01-01"),
            release("b", "same", "2024-01-01"),
            release("c", "same", "2024-02-01"),
        ];
        let c = criteria("same", "", "");
        assert_eq!(tags(&apply(&feed, &c)), tags(&apply(&feed, &c)));
        assert_eq!(tags(&apply(&feed, &c)), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_cleared_filters_restore_full_list() {
        let feed = vec![
            release("v1", "", "2024-01-01"),
            release("broken", "", "??"),
            release("v2", "", "2024-06-01"),
        ];

        let mut c = criteria("v1", "2024-01-01", "2024-01-31");
        assert_eq!(apply(&feed, &c).len(), 1);

        c.clear();
        assert!(c.is_empty());
        assert_eq!(tags(&apply(&feed, &c)), vec!["v2", "v1"]);
    }

    #[test]
    fn test_date_bound_parse() {
        assert_eq!(DateBound::parse("", BoundKind::Lower), DateBound::None);
        assert_eq!(DateBound::parse("  ", BoundKind::Upper), DateBound::None);
        assert!(DateBound::parse("31/12/2024", BoundKind::Lower).is_invalid());

        assert_eq!(
            DateBound::parse("2024-02-01", BoundKind::Lower),
            DateBound::At(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap())
        );

        let upper = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap()
            + TimeDelta::milliseconds(999);
        assert_eq!(
            DateBound::parse("2024-12-31", BoundKind::Upper),
            DateBound::At(upper)
        );

        assert_eq!(
            DateBound::parse("2024-02-01T15:00:00Z", BoundKind::Lower),
            DateBound::At(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_upper_bound_on_last_representable_day() {
        let last_day = NaiveDate::MAX.format("%Y-%m-%d").to_string();
        let expected = NaiveDate::MAX
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap()
            .and_utc();

        assert_eq!(
            DateBound::parse(&last_day, BoundKind::Upper),
            DateBound::At(expected)
        );

        let feed = vec![release("v1", "Initial", "2024-01-01T00:00:00Z")];
        let c = FilterCriteria {
            to: last_day,
            ..FilterCriteria::default()
        };
        assert_eq!(tags(&apply(&feed, &c)), vec!["v1"]);
    }

    #[test]
    fn test_sort_order_toggle() {
        assert_eq!(SortOrder::Newest.toggle(), SortOrder::Oldest);
        assert_eq!(SortOrder::Oldest.toggle(), SortOrder::Newest);
    }
}
