//! Image search query value object.

use std::fmt;

use tracing::warn;

/// Trimmed, non-empty search query.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    value: String,
}

impl SearchQuery {
    const MAX_QUERY_LENGTH: usize = 100;

    /// Creates query from raw user input.
    ///
    /// Returns `None` for blank input. Input longer than the remote limit is
    /// truncated on a character boundary and a warning is logged.
    #[must_use]
    pub fn new(value: impl AsRef<str>) -> Option<Self> {
        let trimmed = value.as_ref().trim();

        if trimmed.is_empty() {
            return None;
        }

        let value: String = trimmed.chars().take(Self::MAX_QUERY_LENGTH).collect();
        if value.len() < trimmed.len() {
            warn!(
                original_chars = trimmed.chars().count(),
                kept_chars = Self::MAX_QUERY_LENGTH,
                query = %value,
                "Search query truncated"
            );
        }

        Some(Self {
            value: value.trim_end().to_string(),
        })
    }

    /// Returns query as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SearchQuery").field(&self.value).finish()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for SearchQuery {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use test_case::test_case;

    #[test_case("" ; "empty")]
    #[test_case("   " ; "spaces")]
    #[test_case("\t\n" ; "whitespace")]
    fn test_blank_query_rejected(input: &str) {
        assert!(SearchQuery::new(input).is_none());
    }

    #[test]
    fn test_query_is_trimmed() {
        let query = SearchQuery::new("  yellow flowers ").unwrap();
        assert_eq!(query.as_str(), "yellow flowers");
    }

    #[test]
    fn test_long_query_truncated() {
        let query = SearchQuery::new("a".repeat(150)).unwrap();
        assert_eq!(query.as_str().len(), 100);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let query = SearchQuery::new("ü".repeat(120)).unwrap();
        assert_eq!(query.as_str().chars().count(), 100);
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture<T>(f: impl FnOnce() -> T) -> (T, String) {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let value = tracing::subscriber::with_default(subscriber, f);
        (value, log.contents())
    }

    #[test]
    fn test_truncation_is_logged() {
        let (query, log) = capture(|| SearchQuery::new("b".repeat(130)));

        assert_eq!(query.unwrap().as_str().len(), 100);
        assert!(log.contains("Search query truncated"));
        assert!(log.contains("original_chars=130"));
    }

    #[test]
    fn test_short_query_logs_nothing() {
        let (query, log) = capture(|| SearchQuery::new("kittens"));

        assert!(query.is_some());
        assert!(log.is_empty());
    }
}
