pub const ALL_COUNTRIES: &str = "All";

/// The dropdown: available options, the selected one, and the search buffer.
/// This is the only interactive state of a browser session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    options: Vec<String>,
    index: usize,
    query: String,
    matches: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::with_options(vec![ALL_COUNTRIES.to_string()])
    }

    pub fn with_options(options: Vec<String>) -> Self {
        Self {
            options,
            index: 0,
            query: String::new(),
            matches: Vec::new(),
        }
    }

    pub fn current(&self) -> &str {
        self.options
            .get(self.index)
            .map_or(ALL_COUNTRIES, String::as_str)
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[String] {
        &self.matches
    }

    pub fn next(&mut self) {
        if !self.options.is_empty() {
            self.index = (self.index + 1) % self.options.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.options.is_empty() {
            self.index = (self.index + self.options.len() - 1) % self.options.len();
        }
    }

    /// Back to the "All" sentinel with an empty search.
    pub fn reset(&mut self) {
        self.index = 0;
        self.clear_search();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        if self.query.is_empty() {
            self.matches.clear();
        }
    }

    /// Stores search results, ignoring answers to an outdated query.
    pub fn set_matches(&mut self, query: &str, matches: Vec<String>) {
        if query == self.query {
            self.matches = matches;
        }
    }

    /// Selects the best country match (or "All" if only the sentinel matched)
    /// and clears the search. Returns whether the selection changed.
    pub fn accept_best_match(&mut self) -> bool {
        let best = self
            .matches
            .iter()
            .find(|option| option.as_str() != ALL_COUNTRIES)
            .or_else(|| self.matches.first())
            .cloned();
        self.clear_search();

        let Some(best) = best else {
            return false;
        };
        let Some(index) = self.options.iter().position(|option| *option == best) else {
            return false;
        };

        let changed = index != self.index;
        self.index = index;
        changed
    }

    fn clear_search(&mut self) {
        self.query.clear();
        self.matches.clear();
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}
