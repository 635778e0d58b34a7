//! Wire-ready request description.

use serde_json::Value;

/// Everything needed to issue one provider POST.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    /// Fully resolved endpoint URL
    pub url: String,
    /// Authentication and provider-specific headers
    pub headers: Vec<(&'static str, String)>,
    /// JSON request body
    pub body: Value,
}

impl PreparedRequest {
    /// Value of the first header named `name`, if any.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
