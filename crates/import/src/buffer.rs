/// Free-text lines waiting to be attached to the next transaction.
#[derive(Debug, Clone, Default)]
pub struct DescriptionBuffer {
    fragments: Vec<String>,
}

impl DescriptionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: &str) {
        self.fragments.push(line.trim().to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn clear(&mut self) {
        self.fragments.clear();
    }

    /// Empty the buffer, returning its fragments joined by spaces, unless
    /// the joined text contains one of `drop_hints` (lowercase), in which
    /// case it was header/footer noise and `None` is returned.
    pub fn take(&mut self, drop_hints: &[String]) -> Option<String> {
        if self.fragments.is_empty() {
            return None;
        }
        let joined = std::mem::take(&mut self.fragments).join(" ");
        let lower = joined.to_lowercase();
        if let Some(hint) = drop_hints.iter().find(|h| lower.contains(h.as_str())) {
            tracing::debug!("Discarding buffered description (matched '{hint}'): {joined}");
            return None;
        }
        Some(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints() -> Vec<String> {
        vec!["statement period".to_string(), "page[".to_string()]
    }

    #[test]
    fn joins_in_order() {
        let mut b = DescriptionBuffer::new();
        b.push("PURCHASE AT");
        b.push("  SOME STORE DUBAI ARE ");
        assert_eq!(b.len(), 2);
        assert_eq!(b.take(&hints()).as_deref(), Some("PURCHASE AT SOME STORE DUBAI ARE"));
        assert!(b.is_empty());
    }

    #[test]
    fn drop_hint_discards_everything() {
        let mut b = DescriptionBuffer::new();
        b.push("Page[2 of 4]");
        b.push("NOON.COM");
        assert_eq!(b.take(&hints()), None);
        assert!(b.is_empty());
    }

    #[test]
    fn drop_hint_is_case_insensitive() {
        let mut b = DescriptionBuffer::new();
        b.push("STATEMENT PERIOD");
        assert_eq!(b.take(&hints()), None);
    }

    #[test]
    fn empty_take_is_none() {
        let mut b = DescriptionBuffer::new();
        assert_eq!(b.take(&hints()), None);
    }

    #[test]
    fn clear_discards() {
        let mut b = DescriptionBuffer::new();
        b.push("leftover");
        b.clear();
        assert_eq!(b.take(&[]), None);
    }
}
