use crate::domain::{DeploymentRecord, FilterState};
use serde::Serialize;
use std::collections::HashMap;

pub const TOP_CATEGORIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarSpec<'a> {
    pub title: String,
    /// Largest count first.
    pub bars: Vec<CategoryCount<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCount<'a> {
    pub category: &'a str,
    pub count: usize,
}

pub fn build_bar_spec<'a>(
    records: &[&'a DeploymentRecord],
    filter: &FilterState,
) -> BarSpec<'a> {
    let scope = match filter {
        FilterState::All => "All countries",
        FilterState::Country(country) => country.as_str(),
    };

    BarSpec {
        title: format!("Top {TOP_CATEGORIES} technologies ({scope})"),
        bars: top_categories(records.iter().copied(), TOP_CATEGORIES),
    }
}

/// Counts records per technology category and keeps the `limit` largest.
///
/// Equal counts keep the order in which their category first appeared.
/// Categories are grouped by their exact value; records with an empty
/// category cell are not counted.
pub fn top_categories<'a>(
    records: impl IntoIterator<Item = &'a DeploymentRecord>,
    limit: usize,
) -> Vec<CategoryCount<'a>> {
    let mut counts: Vec<CategoryCount<'a>> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for record in records {
        let category = record.technology_category.as_str();
        if category.is_empty() {
            continue;
        }
        match index.get(category) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(category, counts.len());
                counts.push(CategoryCount { category, count: 1 });
            }
        }
    }

    // sort_by is stable, which preserves first-seen order among ties
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str) -> DeploymentRecord {
        DeploymentRecord {
            country: "Mexico".to_string(),
            technology_category: category.to_string(),
            period_of_use: String::new(),
            year_of_disclosure: String::new(),
            commercial_entity: String::new(),
            country_of_origin: String::new(),
            description: String::new(),
        }
    }

    fn records(categories: &[&str]) -> Vec<DeploymentRecord> {
        categories.iter().map(|c| record(c)).collect()
    }

    #[test]
    fn ties_keep_first_occurrence_order() {
        let data = records(&["C", "B", "A", "B", "A", "B", "A", "B", "A", "B", "A"]);
        let bars = top_categories(&data, 10);

        let ranked: Vec<_> = bars.iter().map(|b| (b.category, b.count)).collect();
        assert_eq!(ranked, [("B", 5), ("A", 5), ("C", 1)]);
    }

    #[test]
    fn a_before_b_when_a_appears_first() {
        let data = records(&["A", "B", "C", "A", "B", "A", "B", "A", "B", "A", "B"]);
        let ranked: Vec<_> = top_categories(&data, 10)
            .iter()
            .map(|b| b.category)
            .collect();
        assert_eq!(ranked, ["A", "B", "C"]);
    }

    #[test]
    fn keeps_at_most_ten_sorted_descending() {
        let mut categories = Vec::new();
        for (n, name) in ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l"]
            .iter()
            .enumerate()
        {
            for _ in 0..=n {
                categories.push(*name);
            }
        }
        let data = records(&categories);
        let bars = top_categories(&data, TOP_CATEGORIES);

        assert_eq!(bars.len(), 10);
        assert_eq!(bars[0], CategoryCount { category: "l", count: 12 });
        assert!(bars.windows(2).all(|pair| pair[0].count >= pair[1].count));
        assert!(bars.iter().all(|b| b.category != "a" && b.category != "b"));
    }

    #[test]
    fn empty_categories_are_skipped() {
        let data = records(&["", "Spyware", ""]);
        let bars = top_categories(&data, 10);
        assert_eq!(bars, [CategoryCount { category: "Spyware", count: 1 }]);
    }

    #[test]
    fn categories_differing_in_whitespace_stay_separate() {
        let data = records(&["Spyware ", "Spyware", "Spyware", "  "]);
        let ranked: Vec<_> = top_categories(&data, 10)
            .iter()
            .map(|b| (b.category, b.count))
            .collect();
        assert_eq!(ranked, [("Spyware", 2), ("Spyware ", 1), ("  ", 1)]);
    }

    #[test]
    fn title_names_the_filter() {
        let data = records(&["Spyware"]);
        let refs: Vec<_> = data.iter().collect();
        assert_eq!(
            build_bar_spec(&refs, &FilterState::All).title,
            "Top 10 technologies (All countries)"
        );
        assert_eq!(
            build_bar_spec(&refs, &FilterState::Country("Mexico".to_string())).title,
            "Top 10 technologies (Mexico)"
        );
    }
}
