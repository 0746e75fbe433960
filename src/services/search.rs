//! Fuzzy tab search.
//!
//! A query is matched against each tab's title and url with a subsequence
//! matcher, so partial terms like `gthb` still find GitHub. The threshold
//! is relative to how well the query matches itself: 0.0 keeps only matches
//! as strong as that, 1.0 keeps every fuzzy hit.

use nucleo::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo::{Config, Matcher, Utf32Str};

use crate::types::settings::SearchSettings;
use crate::types::window::Tab;

/// Owns the matcher state used to filter one popup's tab lists.
///
/// Nothing about the tab list is kept between calls; each `filter` works on
/// whatever list it is handed.
pub struct TabSearch {
    matcher: Matcher,
    settings: SearchSettings,
}

impl TabSearch {
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            settings,
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Returns the tabs matching `query`, best match first.
    ///
    /// An empty (or all-whitespace) query returns `tabs` unchanged. Ties keep
    /// their input order.
    pub fn filter(&mut self, tabs: &[Tab], query: &str) -> Vec<Tab> {
        if query.trim().is_empty() {
            return tabs.to_vec();
        }

        let pattern = Pattern::new(query, CaseMatching::Ignore, Normalization::Smart, AtomKind::Fuzzy);
        let mut buf = Vec::new();
        let min_score = self.min_score(&pattern, query, &mut buf);

        let mut hits: Vec<(u32, &Tab)> = tabs
            .iter()
            .filter_map(|tab| {
                let score = self.best_score(&pattern, tab, &mut buf)?;
                (score >= min_score).then_some((score, tab))
            })
            .collect();
        hits.sort_by(|a, b| b.0.cmp(&a.0));
        hits.into_iter().map(|(_, tab)| tab.clone()).collect()
    }

    fn min_score(&mut self, pattern: &Pattern, query: &str, buf: &mut Vec<char>) -> u32 {
        let threshold = self.settings.threshold.clamp(0.0, 1.0);
        let reference = pattern
            .score(Utf32Str::new(query, buf), &mut self.matcher)
            .unwrap_or(0);
        (f64::from(reference) * (1.0 - threshold)).floor() as u32
    }

    fn best_score(&mut self, pattern: &Pattern, tab: &Tab, buf: &mut Vec<char>) -> Option<u32> {
        let mut best = None;
        if self.settings.match_title {
            best = pattern.score(Utf32Str::new(&tab.title, buf), &mut self.matcher);
        }
        if self.settings.match_url {
            let url = pattern.score(Utf32Str::new(&tab.url, buf), &mut self.matcher);
            best = best.max(url);
        }
        best
    }
}

impl Default for TabSearch {
    fn default() -> Self {
        Self::new(SearchSettings::default())
    }
}

/// One-shot form of [`TabSearch::filter`] with default settings.
pub fn filter_tabs(tabs: &[Tab], query: &str) -> Vec<Tab> {
    TabSearch::default().filter(tabs, query)
}
