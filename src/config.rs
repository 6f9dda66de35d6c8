use std::env;

/// Application-level constants
pub const APP_NAME: &str = "Prodscan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the reasoning-service credential.
pub const REASONING_KEY_VAR: &str = "GEMINI_API_KEY";

/// Default log filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    "info,prodscan=debug".to_string()
}

/// Credential values that count as "not configured". Deployment templates ship
/// these literals, so treating them as present would send garbage keys upstream.
const PLACEHOLDER_KEYS: &[&str] = &["your_api_key_here", "changeme", "none"];

/// Process-wide scan configuration, constructed once at startup and passed
/// explicitly into each stage constructor.
///
/// Credential absence is a checked precondition, not an error path: a stage
/// consults `has_reasoning_credential()` before attempting any outbound call
/// and silently selects its fallback branch when it returns false.
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    reasoning_api_key: Option<String>,
}

impl ScanConfig {
    /// Build a config from an explicit key value (test injection point).
    pub fn new(reasoning_api_key: Option<String>) -> Self {
        Self {
            reasoning_api_key: reasoning_api_key.and_then(normalize_key),
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::new(env::var(REASONING_KEY_VAR).ok())
    }

    /// A config with no credentials — forces every stage onto its fallback path.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn has_reasoning_credential(&self) -> bool {
        self.reasoning_api_key.is_some()
    }

    pub fn reasoning_api_key(&self) -> Option<&str> {
        self.reasoning_api_key.as_deref()
    }
}

/// Trim the key and reject blank or placeholder values.
fn normalize_key(key: String) -> Option<String> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return None;
    }
    if PLACEHOLDER_KEYS
        .iter()
        .any(|p| trimmed.eq_ignore_ascii_case(p))
    {
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_unconfigured() {
        let config = ScanConfig::new(None);
        assert!(!config.has_reasoning_credential());
        assert!(config.reasoning_api_key().is_none());
    }

    #[test]
    fn blank_key_is_unconfigured() {
        let config = ScanConfig::new(Some("   ".into()));
        assert!(!config.has_reasoning_credential());
    }

    #[test]
    fn placeholder_key_is_unconfigured() {
        for placeholder in ["your_api_key_here", "CHANGEME", "none"] {
            let config = ScanConfig::new(Some(placeholder.into()));
            assert!(
                !config.has_reasoning_credential(),
                "placeholder {placeholder} should not count as a credential"
            );
        }
    }

    #[test]
    fn real_key_is_configured() {
        let config = ScanConfig::new(Some("  AIzaSyTest123  ".into()));
        assert!(config.has_reasoning_credential());
        assert_eq!(config.reasoning_api_key(), Some("AIzaSyTest123"));
    }

    #[test]
    fn unconfigured_constructor_has_no_key() {
        assert!(!ScanConfig::unconfigured().has_reasoning_credential());
    }
}
