use crate::ConfigError;
use regex::Regex;

/// Pattern recognizing the supported news service
pub const DEFAULT_SERVICE_PATTERN: &str = r"^https?://news\.yandex\.ru(/|$)";

/// Allow-list of services the harvester knows how to extract
///
/// A target URL is supported if any pattern matches it. Patterns are
/// unanchored regular expressions, so they should carry their own `^`.
#[derive(Debug, Clone)]
pub struct ServiceMatcher {
    patterns: Vec<Regex>,
}

impl ServiceMatcher {
    /// Compiles a matcher from a list of regular expressions
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` for the first pattern that does
    /// not compile.
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(pattern)
                    .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", pattern, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if `url` belongs to a supported service
    pub fn is_supported(&self, url: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(url))
    }
}

impl Default for ServiceMatcher {
    fn default() -> Self {
        Self {
            patterns: vec![Regex::new(DEFAULT_SERVICE_PATTERN).expect("static pattern compiles")],
        }
    }
}
