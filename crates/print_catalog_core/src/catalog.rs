//! crates/print_catalog_core/src/catalog.rs
//!
//! Pure view logic over an in-memory print list: the label vocabulary ranked
//! by usage, and free-text / label filtering. Everything here is recomputed
//! from the full list on each call.

use std::collections::HashMap;

use crate::domain::Print;

/// A distinct label and the number of times it is used across the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Counts every label occurrence, most used first. Ties keep first-seen order.
pub fn label_counts(prints: &[Print]) -> Vec<LabelCount> {
    let mut counts: Vec<LabelCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for label in prints.iter().flat_map(|p| p.labels.iter()) {
        match index.get(label.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(label, counts.len());
                counts.push(LabelCount {
                    label: label.clone(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The distinct labels of the catalog, most used first.
pub fn rank_labels(prints: &[Print]) -> Vec<String> {
    label_counts(prints).into_iter().map(|c| c.label).collect()
}

/// The active search: a case-insensitive query and an optional exact label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintFilter {
    query: String,
    label: Option<String>,
}

impl PrintFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Selects a label (or `None` for all prints) and clears the query.
    pub fn select_label(&mut self, label: Option<String>) {
        self.label = label;
        self.query.clear();
    }

    /// True when either a query or a label narrows the listing.
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || self.label.is_some()
    }

    pub fn matches(&self, print: &Print) -> bool {
        self.matches_query(print) && self.matches_label(print)
    }

    fn matches_query(&self, print: &Print) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        print.title.to_lowercase().contains(&needle)
            || print.labels.iter().any(|l| l.to_lowercase().contains(&needle))
    }

    fn matches_label(&self, print: &Print) -> bool {
        match &self.label {
            Some(label) => print.labels.iter().any(|l| l == label),
            None => true,
        }
    }

    /// The matching prints, in catalog order.
    pub fn apply<'a>(&self, prints: &'a [Print]) -> Vec<&'a Print> {
        prints.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    fn print(title: &str, labels: &[&str]) -> Print {
        Print {
            id: title.to_string(),
            image_url: "data:,".to_string(),
            title: title.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            created_at: Utc::now(),
        }
    }

    fn sample() -> Vec<Print> {
        vec![
            print("Math HW", &["school", "april"]),
            print("Recipe", &["food"]),
        ]
    }

    fn titles(prints: Vec<&Print>) -> Vec<&str> {
        prints.into_iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn ranks_by_usage() {
        let prints = vec![print("1", &["a"]), print("2", &["b", "a"]), print("3", &["a"])];
        assert_eq!(rank_labels(&prints), vec!["a", "b"]);
    }

    #[test]
    fn counts_duplicates_within_one_print() {
        let prints = vec![print("1", &["x", "x"]), print("2", &["y"])];
        assert_eq!(
            label_counts(&prints),
            vec![
                LabelCount { label: "x".to_string(), count: 2 },
                LabelCount { label: "y".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let prints = vec![print("1", &["late", "early"]), print("2", &["other"])];
        assert_eq!(rank_labels(&prints), vec!["late", "early", "other"]);
    }

    #[test]
    fn labels_are_case_sensitive() {
        let prints = vec![print("1", &["Food"]), print("2", &["food"])];
        assert_eq!(rank_labels(&prints).len(), 2);
    }

    #[test]
    fn no_labels_means_empty_vocabulary() {
        assert!(rank_labels(&[print("1", &[])]).is_empty());
    }

    #[test]
    fn query_matches_title_or_label_substring() {
        let prints = sample();
        let filter = PrintFilter::new().with_query("ap");
        assert_eq!(titles(filter.apply(&prints)), vec!["Math HW"]);
    }

    #[test]
    fn query_is_case_insensitive() {
        let prints = sample();
        assert_eq!(titles(PrintFilter::new().with_query("RECI").apply(&prints)), vec!["Recipe"]);
        assert_eq!(titles(PrintFilter::new().with_query("School").apply(&prints)), vec!["Math HW"]);
    }

    #[test]
    fn label_filter_is_exact() {
        let prints = sample();
        assert_eq!(titles(PrintFilter::new().with_label("food").apply(&prints)), vec!["Recipe"]);
        assert!(PrintFilter::new().with_label("Food").apply(&prints).is_empty());
        assert!(PrintFilter::new().with_label("foo").apply(&prints).is_empty());
    }

    #[test]
    fn empty_filter_returns_everything_in_order() {
        let prints = sample();
        let filter = PrintFilter::new();
        assert!(!filter.is_active());
        assert_eq!(titles(filter.apply(&prints)), vec!["Math HW", "Recipe"]);
    }

    #[test]
    fn query_and_label_combine() {
        let prints = sample();
        let filter = PrintFilter::new().with_query("math").with_label("food");
        assert!(filter.apply(&prints).is_empty());

        let filter = PrintFilter::new().with_query("math").with_label("school");
        assert_eq!(titles(filter.apply(&prints)), vec!["Math HW"]);
    }

    #[test]
    fn selecting_a_label_clears_the_query() {
        let mut filter = PrintFilter::new().with_query("math");
        filter.select_label(Some("food".to_string()));
        assert_eq!(filter.query(), "");
        assert_eq!(filter.label(), Some("food"));

        filter.set_query("rec");
        filter.select_label(None);
        assert_eq!(filter, PrintFilter::new());
    }

    fn unique_count_catalog() -> Vec<Print> {
        // Label `i` appears on `i + 1` prints, so every count is distinct.
        let mut prints = Vec::new();
        for i in 0..5 {
            for n in 0..=i {
                let label = format!("l{i}");
                prints.push(print(&format!("{i}-{n}"), &[label.as_str()]));
            }
        }
        prints
    }

    proptest! {
        #[test]
        fn ranking_ignores_record_order_when_counts_are_unique(
            shuffled in Just(unique_count_catalog()).prop_shuffle()
        ) {
            prop_assert_eq!(rank_labels(&shuffled), vec!["l4", "l3", "l2", "l1", "l0"]);
        }
    }
}
