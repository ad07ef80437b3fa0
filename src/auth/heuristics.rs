//! Header heuristics for recognising Google service callers

use super::types::HeaderSource;
use crate::config::ServiceHeuristicsConfig;

/// Case-insensitive allow-list matcher over `User-Agent`, `Referer`, `Origin`
/// and the Apps Script project header.
#[derive(Debug, Clone)]
pub struct ServiceHeuristics {
    user_agent_substrings: Vec<String>,
    domain_substrings: Vec<String>,
    project_header: String,
}

impl ServiceHeuristics {
    pub fn new(config: &ServiceHeuristicsConfig) -> Self {
        Self {
            user_agent_substrings: normalize(&config.user_agent_substrings),
            domain_substrings: normalize(&config.domain_substrings),
            project_header: config.project_header.trim().to_ascii_lowercase(),
        }
    }

    /// Whether any heuristic recognises the caller as a Google service
    pub fn matches<H: HeaderSource + ?Sized>(&self, headers: &H) -> bool {
        self.matching_rule(headers).is_some()
    }

    /// Name of the first heuristic that recognised the caller
    pub fn matching_rule<H: HeaderSource + ?Sized>(&self, headers: &H) -> Option<&'static str> {
        if contains_any(headers.header("user-agent"), &self.user_agent_substrings) {
            return Some("user_agent");
        }
        if contains_any(headers.header("referer"), &self.domain_substrings) {
            return Some("referer");
        }
        if contains_any(headers.header("origin"), &self.domain_substrings) {
            return Some("origin");
        }
        if headers.header(&self.project_header).is_some() {
            return Some("project_header");
        }
        None
    }
}

impl Default for ServiceHeuristics {
    fn default() -> Self {
        Self::new(&ServiceHeuristicsConfig::default())
    }
}

fn normalize(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

fn contains_any(value: Option<&str>, needles: &[String]) -> bool {
    match value {
        Some(value) => {
            let haystack = value.to_ascii_lowercase();
            needles.iter().any(|n| haystack.contains(n.as_str()))
        }
        None => false,
    }
}
