use crate::error::{
    Error,
    Result,
};
use regex::Regex;
use std::fmt;

/// Selects pods and services by name. An empty pattern selects everything.
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    pattern: Option<Regex>,
}

impl NameFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Ok(Self::match_all());
        }
        let regex = Regex::new(pattern).map_err(|source| Error::Filter {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern: Some(regex) })
    }

    pub fn match_all() -> Self {
        Self { pattern: None }
    }

    /// Unanchored search, so `web` matches `frontend-web-0`.
    pub fn matches(&self, name: &str) -> bool {
        self.pattern.as_ref().map_or(true, |regex| regex.is_match(name))
    }
}

impl fmt::Display for NameFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pattern {
            Some(regex) => f.write_str(regex.as_str()),
            None => f.write_str(".*"),
        }
    }
}
