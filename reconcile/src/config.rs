//! Reconciler configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use kyc_provider::DEFAULT_API_BASE;
use kyc_transport::DEFAULT_CACHED_METHODS;
use kyc_types::Address;
use kyc_utils::LogFormat;

use crate::ReconcileError;

/// Configuration for a reconciliation run.
///
/// Can be loaded from a TOML file via [`ReconcilerConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// JSON-RPC endpoint of the chain node.
    #[serde(default = "default_node_url")]
    pub node_url: String,

    /// Root URL of the KYC provider API.
    #[serde(default = "default_kyc_api_base")]
    pub kyc_api_base: String,

    /// Provider API token, sent as `Authorization: Token token=...`.
    #[serde(default)]
    pub kyc_api_token: Option<String>,

    /// Directory holding the identity store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// RPC methods whose results are memoized for the life of the process.
    #[serde(default = "default_cached_methods")]
    pub cached_methods: Vec<String>,

    /// Per-request timeout for both the node and the provider.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Minimum seconds between progress lines during evaluation.
    #[serde(default = "default_progress_interval_secs")]
    pub progress_interval_secs: u64,

    /// Address of the certifier registry contract.
    #[serde(default)]
    pub certifier_contract: Option<Address>,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_node_url() -> String {
    "http://127.0.0.1:8545".to_string()
}

fn default_kyc_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./kyc_data")
}

fn default_cached_methods() -> Vec<String> {
    DEFAULT_CACHED_METHODS.iter().map(|m| m.to_string()).collect()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_progress_interval_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ReconcilerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ReconcileError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ReconcileError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ReconcileError> {
        toml::from_str(s).map_err(|e| ReconcileError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ReconcileError> {
        toml::to_string_pretty(self).map_err(|e| ReconcileError::Config(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_secs(self.progress_interval_secs)
    }
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            node_url: default_node_url(),
            kyc_api_base: default_kyc_api_base(),
            kyc_api_token: None,
            data_dir: default_data_dir(),
            cached_methods: default_cached_methods(),
            request_timeout_secs: default_request_timeout_secs(),
            progress_interval_secs: default_progress_interval_secs(),
            certifier_contract: None,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = ReconcilerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ReconcilerConfig::default());
        assert_eq!(config.cached_methods.len(), DEFAULT_CACHED_METHODS.len());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_toml_overrides() {
        let toml = r#"
            node_url = "http://node:8545"
            kyc_api_token = "secret"
            cached_methods = ["eth_getCode"]
            log_format = "json"
            certifier_contract = "0x00000000000000000000000000000000000000aa"
        "#;
        let config = ReconcilerConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.node_url, "http://node:8545");
        assert_eq!(config.kyc_api_token.as_deref(), Some("secret"));
        assert_eq!(config.cached_methods, vec!["eth_getCode"]);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.certifier_contract.unwrap().as_bytes()[19], 0xaa);
        assert_eq!(config.kyc_api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = ReconcilerConfig::from_toml_str("request_timeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ReconcileError::Config(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ReconcilerConfig {
            kyc_api_token: Some("t".into()),
            ..Default::default()
        };
        let s = config.to_toml_string().unwrap();
        assert_eq!(ReconcilerConfig::from_toml_str(&s).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = ReconcilerConfig::from_toml_file(Path::new("/nonexistent/kyc.toml")).unwrap_err();
        assert!(matches!(err, ReconcileError::Config(_)));
    }
}
