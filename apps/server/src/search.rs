use crate::domain::ALL_COUNTRIES;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Narrows dropdown options to those fuzzily matching `query`, best match
/// first. The "All" sentinel is always offered first; a blank query returns
/// every option unchanged.
pub fn search_options<'a>(options: &[&'a str], query: &str) -> Vec<&'a str> {
    let query = query.trim();
    if query.is_empty() {
        return options.to_vec();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(i64, &'a str)> = options
        .iter()
        .filter(|option| **option != ALL_COUNTRIES)
        .filter_map(|option| {
            matcher
                .fuzzy_match(option, query)
                .map(|score| (score, *option))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));

    std::iter::once(ALL_COUNTRIES)
        .chain(scored.into_iter().map(|(_, option)| option))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: [&str; 5] = ["All", "Mexico", "Spain", "Saudi Arabia", "United Arab Emirates"];

    #[test]
    fn blank_query_returns_everything() {
        assert_eq!(search_options(&OPTIONS, "  "), OPTIONS);
    }

    #[test]
    fn all_is_always_first() {
        let results = search_options(&OPTIONS, "mex");
        assert_eq!(results, ["All", "Mexico"]);
    }

    #[test]
    fn matches_are_case_insensitive_and_ranked() {
        let results = search_options(&OPTIONS, "arab");
        assert_eq!(results[0], "All");
        assert_eq!(results.len(), 3);
        assert!(results.contains(&"Saudi Arabia"));
        assert!(results.contains(&"United Arab Emirates"));
    }

    #[test]
    fn no_match_leaves_only_the_sentinel() {
        assert_eq!(search_options(&OPTIONS, "zzz"), ["All"]);
    }
}
