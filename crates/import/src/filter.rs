/// Drops statement metadata lines (balances, limits, due dates, reward
/// summaries) before any other component sees them.
#[derive(Debug, Clone)]
pub struct LineFilter {
    keywords: Vec<String>,
}

impl LineFilter {
    pub fn new(keywords: &[String]) -> Self {
        let keywords = keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// `line_lower` is the lowercased line.
    pub fn is_boilerplate(&self, line_lower: &str) -> bool {
        self.keywords.iter().any(|k| line_lower.contains(k.as_str()))
    }
}
