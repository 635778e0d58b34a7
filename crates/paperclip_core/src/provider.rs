//! Provider configuration records.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Priority assigned to providers that do not declare one.
pub const DEFAULT_PRIORITY: f64 = 100.0;

const GEMINI_HOST: &str = "generativelanguage.googleapis.com";

/// Declared backend family of a provider.
///
/// Unknown values are kept verbatim (lowercased) so they can still be
/// matched against a preferred type.
///
/// # Examples
///
/// ```
/// use paperclip_core::ProviderType;
///
/// assert_eq!(ProviderType::from("Gemini".to_string()), ProviderType::Gemini);
/// assert_eq!(ProviderType::from("openrouter".to_string()).as_str(), "openrouter");
/// assert_eq!(ProviderType::from("groq".to_string()).as_str(), "groq");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderType {
    /// Google Generative Language API
    Gemini,
    /// OpenRouter or any other OpenAI-compatible chat-completions API
    #[default]
    OpenRouter,
    /// Anything else, lowercased
    Other(String),
}

impl ProviderType {
    /// Lowercase type tag.
    pub fn as_str(&self) -> &str {
        match self {
            ProviderType::Gemini => "gemini",
            ProviderType::OpenRouter => "openrouter",
            ProviderType::Other(s) => s,
        }
    }
}

impl From<String> for ProviderType {
    fn from(value: String) -> Self {
        let lowered = value.trim().to_lowercase();
        match lowered.as_str() {
            "gemini" => ProviderType::Gemini,
            "openrouter" => ProviderType::OpenRouter,
            _ => ProviderType::Other(lowered),
        }
    }
}

impl From<ProviderType> for String {
    fn from(value: ProviderType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configured backend, immutable after load.
///
/// # Examples
///
/// ```
/// use paperclip_core::{Provider, ProviderType};
///
/// let provider = Provider::builder()
///     .id("gem")
///     .kind(ProviderType::Gemini)
///     .model("gemini-2.0-flash")
///     .api_key("secret")
///     .priority(10)
///     .build()
///     .unwrap();
///
/// assert!(provider.is_gemini());
/// assert!(*provider.enabled());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct Provider {
    /// Unique, stable identifier
    id: String,
    /// Display name
    #[builder(setter(into, strip_option))]
    name: Option<String>,
    /// Declared backend family
    #[serde(rename = "type")]
    kind: ProviderType,
    /// API base URL; endpoint rules are applied by the adapter
    base_url: String,
    /// Model identifier
    #[builder(setter(into, strip_option))]
    model: Option<String>,
    /// API key sent with every request
    api_key: String,
    /// Output token cap; adapters apply their own default when absent
    #[builder(setter(into, strip_option))]
    max_tokens: Option<u32>,
    /// Lower sorts first
    priority: f64,
    /// Disabled providers are never selected
    enabled: bool,
}

impl Default for Provider {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: None,
            kind: ProviderType::default(),
            base_url: String::new(),
            model: None,
            api_key: String::new(),
            max_tokens: None,
            priority: DEFAULT_PRIORITY,
            enabled: true,
        }
    }
}

impl Provider {
    /// Creates a new provider builder.
    pub fn builder() -> ProviderBuilder {
        ProviderBuilder::default()
    }

    /// Name for listings: the display name if set, else the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(&self.id)
    }

    /// Model identifier, treating an empty string as unset.
    pub fn model_name(&self) -> Option<&str> {
        self.model.as_deref().filter(|m| !m.trim().is_empty())
    }

    /// Gemini-shaped when declared as such or when pointed at the Gemini host.
    pub fn is_gemini(&self) -> bool {
        self.kind == ProviderType::Gemini || self.base_url.contains(GEMINI_HOST)
    }

    /// Whether this provider answers to a preferred-type token.
    ///
    /// With `match_id` set, an id containing the token (case-insensitive)
    /// also counts.
    pub fn matches_preference(&self, preferred: &str, match_id: bool) -> bool {
        let preferred = preferred.trim().to_lowercase();
        if preferred.is_empty() {
            return false;
        }
        self.kind.as_str() == preferred
            || (match_id && self.id.to_lowercase().contains(&preferred))
    }
}

/// Provider entry as written in `providers.json`, before defaults apply.
///
/// `priority` accepts any JSON number (or a numeric string) and `enabled`
/// is only false when it is literally `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecord {
    /// Identifier, falls back to `name`
    #[serde(default)]
    pub id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Backend family
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// API base URL
    #[serde(default)]
    pub base_url: Option<String>,
    /// Model identifier
    #[serde(default)]
    pub model: Option<String>,
    /// API key
    #[serde(default)]
    pub api_key: Option<String>,
    /// Output token cap
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Ordering weight
    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: Option<f64>,
    /// Defaults to true
    #[serde(default, deserialize_with = "lenient_enabled")]
    pub enabled: Option<bool>,
}

fn lenient_priority<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|p| p.is_finite()))
}

fn lenient_enabled<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::Bool(b) => Some(b),
        _ => Some(true),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<ProviderRecord> for Provider {
    fn from(record: ProviderRecord) -> Self {
        let name = non_empty(record.name);
        let id = non_empty(record.id)
            .or_else(|| name.clone())
            .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string()[..8].to_string());
        Self {
            id,
            name,
            kind: ProviderType::from(record.kind.unwrap_or_default()),
            base_url: record.base_url.unwrap_or_default(),
            model: non_empty(record.model),
            api_key: record.api_key.unwrap_or_default(),
            max_tokens: record.max_tokens.filter(|t| *t > 0),
            priority: record.priority.unwrap_or(DEFAULT_PRIORITY),
            enabled: record.enabled.unwrap_or(true),
        }
    }
}

/// Apply defaults, make ids unique and order by ascending priority, ties
/// keeping file order.
///
/// Returned ids are unique: a repeated id gets a numeric suffix (`free`,
/// `free-2`, ...) in file order.
///
/// # Examples
///
/// ```
/// use paperclip_core::{ProviderRecord, normalize_providers};
///
/// let records = vec![
///     ProviderRecord { name: Some("slow".into()), priority: Some(50.0), ..Default::default() },
///     ProviderRecord { id: Some("fast".into()), priority: Some(5.0), ..Default::default() },
/// ];
/// let providers = normalize_providers(records);
/// assert_eq!(providers[0].id(), "fast");
/// assert_eq!(providers[1].id(), "slow");
/// ```
pub fn normalize_providers(records: Vec<ProviderRecord>) -> Vec<Provider> {
    let mut seen = HashSet::new();
    let mut providers: Vec<Provider> = records
        .into_iter()
        .map(Provider::from)
        .map(|mut provider| {
            provider.id = unique_id(&provider.id, &seen);
            seen.insert(provider.id.clone());
            provider
        })
        .collect();
    providers.sort_by(|a, b| a.priority.total_cmp(&b.priority));
    providers
}

fn unique_id(id: &str, seen: &HashSet<String>) -> String {
    if !seen.contains(id) {
        return id.to_string();
    }
    (2..)
        .map(|n| format!("{}-{}", id, n))
        .find(|candidate| !seen.contains(candidate))
        .unwrap_or_else(|| id.to_string())
}
