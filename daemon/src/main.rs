//! KYC reconciler daemon: entry point for reconciliation runs.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use kyc_chain::ChainConnector;
use kyc_provider::HttpKycClient;
use kyc_reconcile::{ReconcilerConfig, ReconciliationEngine};
use kyc_store_lmdb::LmdbIdentityStore;
use kyc_transport::{CachingTransport, HttpTransport, Transport};
use kyc_types::Address;
use kyc_utils::{init_logging, LogFormat};

#[derive(Parser)]
#[command(name = "kyc-daemon", about = "KYC certification reconciler")]
struct Cli {
    /// JSON-RPC endpoint of the chain node.
    #[arg(long, env = "KYC_NODE_URL")]
    node_url: Option<String>,

    /// Root URL of the KYC provider API.
    #[arg(long, env = "KYC_API_BASE")]
    kyc_api_base: Option<String>,

    /// KYC provider API token.
    #[arg(long, env = "KYC_API_TOKEN", hide_env_values = true)]
    kyc_api_token: Option<String>,

    /// Directory holding the identity store.
    #[arg(long, env = "KYC_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// RPC methods to memoize (comma-separated).
    #[arg(long, env = "KYC_CACHED_METHODS", value_delimiter = ',')]
    cached_methods: Vec<String>,

    /// Per-request timeout in seconds for the node and the provider.
    #[arg(long, env = "KYC_REQUEST_TIMEOUT")]
    request_timeout_secs: Option<u64>,

    /// Address of the certifier registry contract.
    #[arg(long, env = "KYC_CERTIFIER_CONTRACT")]
    certifier_contract: Option<Address>,

    /// Log output: "human" or "json".
    #[arg(long, env = "KYC_LOG_FORMAT")]
    log_format: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "KYC_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run one full reconciliation pass over the identity store.
    #[command(name = "check-identities")]
    CheckIdentities,
    /// Check that the chain node answers, then print its gas price and chain id.
    Probe,
}

impl Cli {
    /// Apply flags and env vars on top of `base`.
    fn merge_into(&self, base: ReconcilerConfig) -> ReconcilerConfig {
        ReconcilerConfig {
            node_url: self.node_url.clone().unwrap_or(base.node_url),
            kyc_api_base: self.kyc_api_base.clone().unwrap_or(base.kyc_api_base),
            kyc_api_token: self.kyc_api_token.clone().or(base.kyc_api_token),
            data_dir: self.data_dir.clone().unwrap_or(base.data_dir),
            cached_methods: if self.cached_methods.is_empty() {
                base.cached_methods
            } else {
                self.cached_methods.clone()
            },
            request_timeout_secs: self.request_timeout_secs.unwrap_or(base.request_timeout_secs),
            certifier_contract: self.certifier_contract.or(base.certifier_contract),
            log_format: self
                .log_format
                .as_deref()
                .map(LogFormat::parse)
                .unwrap_or(base.log_format),
            log_level: self.log_level.clone().unwrap_or(base.log_level),
            ..base
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging is not up yet, so a bad config file is reported by the error itself.
    let base = match cli.config {
        Some(ref path) => ReconcilerConfig::from_toml_file(path)?,
        None => ReconcilerConfig::default(),
    };
    let config = cli.merge_into(base);

    init_logging(config.log_format, &config.log_level);
    if let Some(ref path) = cli.config {
        tracing::info!("loaded config from {}", path.display());
    }

    let result = match cli.command {
        Command::CheckIdentities => check_identities(&config).await,
        Command::Probe => probe(&config).await,
    };

    if let Err(ref e) = result {
        tracing::error!("{e:#}");
    }
    result
}

/// Connect to the node and make sure it answers before doing anything else.
async fn connect(config: &ReconcilerConfig) -> anyhow::Result<ChainConnector> {
    let http = HttpTransport::with_timeout(&config.node_url, config.request_timeout())
        .with_context(|| format!("building transport for {}", config.node_url))?;
    let transport: Arc<dyn Transport> = Arc::new(CachingTransport::with_methods(
        http,
        config.cached_methods.iter().cloned(),
    ));
    let chain = ChainConnector::new(transport);

    chain
        .warm_up()
        .await
        .with_context(|| format!("node at {} did not answer", config.node_url))?;
    Ok(chain)
}

async fn check_identities(config: &ReconcilerConfig) -> anyhow::Result<()> {
    let chain = connect(config).await?;

    let store = LmdbIdentityStore::open(&config.data_dir)
        .with_context(|| format!("opening store at {}", config.data_dir.display()))?;

    let mut kyc = HttpKycClient::with_timeout(config.request_timeout());
    if let Some(ref token) = config.kyc_api_token {
        kyc = kyc.with_api_token(token.clone());
    }

    tracing::info!(
        node = %config.node_url,
        provider = %config.kyc_api_base,
        data_dir = %config.data_dir.display(),
        "starting identity reconciliation"
    );

    let engine = ReconciliationEngine::new(
        Arc::new(store.clone()),
        Arc::new(kyc),
        chain,
        config.kyc_api_base.clone(),
    )
    .with_progress_interval(config.progress_interval());

    let report = engine.run().await.context("reconciliation failed")?;
    store.sync().context("flushing store")?;

    tracing::info!(
        pushed = report.pushed,
        dropped_transactions = report.dropped_transactions,
        "done"
    );
    Ok(())
}

async fn probe(config: &ReconcilerConfig) -> anyhow::Result<()> {
    let chain = connect(config).await?;

    let gas_price = chain.get_gas_price().await?;
    let chain_id = chain.chain_id().await?;
    let block = chain.block_number().await?;
    println!("node:      {}", config.node_url);
    println!("chain id:  {chain_id}");
    println!("block:     {block}");
    println!("gas price: {gas_price} wei");

    if let Some(ref contract) = config.certifier_contract {
        let code = chain.get_code(contract).await?;
        if code.is_empty() {
            anyhow::bail!("no contract deployed at certifier address {contract}");
        }
        println!("certifier: {contract} ({} bytes of code)", code.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file_values() {
        let cli = Cli::parse_from([
            "kyc-daemon",
            "--node-url",
            "http://other:8545",
            "--cached-methods",
            "eth_chainId,eth_gasPrice",
            "--log-format",
            "json",
            "check-identities",
        ]);
        let base = ReconcilerConfig {
            kyc_api_token: Some("from-file".into()),
            request_timeout_secs: 7,
            ..Default::default()
        };

        let config = cli.merge_into(base);

        assert_eq!(config.node_url, "http://other:8545");
        assert_eq!(config.cached_methods, vec!["eth_chainId", "eth_gasPrice"]);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.kyc_api_token.as_deref(), Some("from-file"));
        assert_eq!(config.request_timeout_secs, 7);
    }

    #[test]
    fn test_probe_subcommand_parses() {
        let cli = Cli::parse_from(["kyc-daemon", "probe"]);
        assert!(matches!(cli.command, Command::Probe));
    }
}
