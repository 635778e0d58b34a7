//! Provider list loading.

use paperclip_core::{Provider, ProviderRecord, normalize_providers};
use paperclip_error::{ConfigError, PaperclipResult};
use std::path::Path;
use tracing::{info, instrument, warn};

/// Read `providers.json`, apply defaults and sort by ascending priority.
///
/// A missing file yields an empty list. Disabled providers are kept so they
/// can be listed; the dispatcher never selects them.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or is not a JSON
/// array of provider objects.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub async fn load_providers(path: impl AsRef<Path>) -> PaperclipResult<Vec<Provider>> {
    let path = path.as_ref();
    let data = match tokio::fs::read_to_string(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Provider file missing, no providers loaded");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(ConfigError::new(format!(
                "Failed to read provider file {}: {}",
                path.display(),
                e
            ))
            .into());
        }
    };

    let records: Vec<ProviderRecord> = serde_json::from_str(&data).map_err(|e| {
        ConfigError::new(format!(
            "Failed to parse provider file {}: {}",
            path.display(),
            e
        ))
    })?;

    let providers = normalize_providers(records);
    let enabled = providers.iter().filter(|p| *p.enabled()).count();
    info!(total = providers.len(), enabled, "Loaded providers");
    Ok(providers)
}
