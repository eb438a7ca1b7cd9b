//! Chain operations used by the reconciler and the certifier.

use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use kyc_transport::Transport;
use kyc_types::quantity::{parse_quantity, parse_quantity_u64};
use kyc_types::{decode_hex, encode_hex, Address, TxHash, TxReceipt};

use crate::ChainError;

/// Receipt as returned by `eth_getTransactionReceipt`; quantities are hex strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    transaction_hash: TxHash,
    #[serde(default)]
    block_number: Option<String>,
    #[serde(default)]
    gas_used: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl TryFrom<RawReceipt> for TxReceipt {
    type Error = ChainError;

    fn try_from(raw: RawReceipt) -> Result<Self, Self::Error> {
        const METHOD: &str = "eth_getTransactionReceipt";
        let block_number = raw
            .block_number
            .as_deref()
            .map(parse_quantity_u64)
            .transpose()
            .map_err(|e| ChainError::invalid(METHOD, e))?;
        let gas_used = raw
            .gas_used
            .as_deref()
            .map(parse_quantity)
            .transpose()
            .map_err(|e| ChainError::invalid(METHOD, e))?
            .unwrap_or_default();
        let success = raw
            .status
            .as_deref()
            .map(parse_quantity)
            .transpose()
            .map_err(|e| ChainError::invalid(METHOD, e))?
            .map(|status| status == 1);
        Ok(TxReceipt {
            transaction_hash: raw.transaction_hash,
            block_number,
            gas_used,
            success,
        })
    }
}

/// Typed access to the chain node.
#[derive(Clone)]
pub struct ChainConnector {
    transport: Arc<dyn Transport>,
}

impl ChainConnector {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Current gas price in wei.
    pub async fn get_gas_price(&self) -> Result<u128, ChainError> {
        let value = self.transport.call("eth_gasPrice", json!([])).await?;
        parse_quantity(as_str("eth_gasPrice", &value)?)
            .map_err(|e| ChainError::invalid("eth_gasPrice", e))
    }

    /// Fetch the gas price once to prove the node is reachable.
    ///
    /// Callers treat a failure here as fatal at startup.
    pub async fn warm_up(&self) -> Result<u128, ChainError> {
        let gas_price = self.get_gas_price().await?;
        tracing::info!(gas_price, "chain node reachable");
        Ok(gas_price)
    }

    /// Look up the receipt of a transaction.
    ///
    /// `Ok(None)` means the node knows no receipt: the transaction is not
    /// mined yet, was dropped, or was replaced. That is not an error.
    pub async fn get_tx_receipt(&self, hash: &TxHash) -> Result<Option<TxReceipt>, ChainError> {
        let value = self
            .transport
            .call("eth_getTransactionReceipt", json!([hash.to_string()]))
            .await?;
        if value.is_null() {
            return Ok(None);
        }
        let raw: RawReceipt = serde_json::from_value(value)
            .map_err(|e| ChainError::invalid("eth_getTransactionReceipt", e))?;
        TxReceipt::try_from(raw).map(Some)
    }

    pub async fn block_number(&self) -> Result<u64, ChainError> {
        let value = self.transport.call("eth_blockNumber", json!([])).await?;
        parse_quantity_u64(as_str("eth_blockNumber", &value)?)
            .map_err(|e| ChainError::invalid("eth_blockNumber", e))
    }

    pub async fn chain_id(&self) -> Result<u64, ChainError> {
        let value = self.transport.call("eth_chainId", json!([])).await?;
        parse_quantity_u64(as_str("eth_chainId", &value)?)
            .map_err(|e| ChainError::invalid("eth_chainId", e))
    }

    /// Deployed bytecode at `address`; empty for externally owned accounts.
    pub async fn get_code(&self, address: &Address) -> Result<Vec<u8>, ChainError> {
        let value = self
            .transport
            .call("eth_getCode", json!([address.to_string(), "latest"]))
            .await?;
        decode_hex(as_str("eth_getCode", &value)?).map_err(|e| ChainError::invalid("eth_getCode", e))
    }

    /// Execute a read-only contract call against the latest block.
    ///
    /// `data` is the ABI-encoded call; the raw return data is handed back
    /// undecoded. Any failure, including a revert, is a
    /// [`ChainError::ContractCall`].
    pub async fn call(&self, to: &Address, data: &[u8]) -> Result<Vec<u8>, ChainError> {
        let request = json!([{ "to": to.to_string(), "data": encode_hex(data) }, "latest"]);
        let value = self
            .transport
            .call("eth_call", request)
            .await
            .map_err(|e| ChainError::ContractCall {
                to: *to,
                reason: e.to_string(),
            })?;
        let hex = value.as_str().ok_or_else(|| ChainError::ContractCall {
            to: *to,
            reason: format!("expected hex string, got {value}"),
        })?;
        decode_hex(hex).map_err(|e| ChainError::ContractCall {
            to: *to,
            reason: e.to_string(),
        })
    }

    /// Broadcast a signed transaction and return its hash.
    pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash, ChainError> {
        let value = self
            .transport
            .call("eth_sendRawTransaction", json!([encode_hex(raw)]))
            .await?;
        as_str("eth_sendRawTransaction", &value)?
            .parse()
            .map_err(|e| ChainError::invalid("eth_sendRawTransaction", e))
    }
}

fn as_str<'a>(method: &'static str, value: &'a Value) -> Result<&'a str, ChainError> {
    value
        .as_str()
        .ok_or_else(|| ChainError::invalid(method, format!("expected string, got {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kyc_nullables::NullTransport;

    fn connector(transport: &Arc<NullTransport>) -> ChainConnector {
        ChainConnector::new(transport.clone())
    }

    fn tx_hash(byte: u8) -> TxHash {
        TxHash::new([byte; 32])
    }

    #[tokio::test]
    async fn test_gas_price() {
        let transport = Arc::new(NullTransport::new());
        transport.on("eth_gasPrice", json!("0x4a817c800"));
        assert_eq!(connector(&transport).get_gas_price().await.unwrap(), 20_000_000_000);
    }

    #[tokio::test]
    async fn test_warm_up_fails_when_node_is_down() {
        let transport = Arc::new(NullTransport::new());
        transport.fail("eth_gasPrice", "connection refused");
        let err = connector(&transport).warm_up().await.unwrap_err();
        assert!(matches!(err, ChainError::Transport(_)));
    }

    #[tokio::test]
    async fn test_gas_price_rejects_non_string() {
        let transport = Arc::new(NullTransport::new());
        transport.on("eth_gasPrice", json!(12));
        assert!(matches!(
            connector(&transport).get_gas_price().await,
            Err(ChainError::InvalidResponse { method: "eth_gasPrice", .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_receipt_is_none() {
        let transport = Arc::new(NullTransport::new());
        transport.on("eth_getTransactionReceipt", Value::Null);
        let receipt = connector(&transport).get_tx_receipt(&tx_hash(1)).await.unwrap();
        assert!(receipt.is_none());
        assert_eq!(
            transport.calls_to("eth_getTransactionReceipt"),
            vec![json!([tx_hash(1).to_string()])]
        );
    }

    #[tokio::test]
    async fn test_mined_receipt() {
        let transport = Arc::new(NullTransport::new());
        transport.on_params(
            "eth_getTransactionReceipt",
            json!([tx_hash(2).to_string()]),
            json!({
                "transactionHash": tx_hash(2).to_string(),
                "blockNumber": "0x10",
                "gasUsed": "0x5208",
                "status": "0x1"
            }),
        );
        let receipt = connector(&transport)
            .get_tx_receipt(&tx_hash(2))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(receipt.transaction_hash, tx_hash(2));
        assert_eq!(receipt.block_number, Some(16));
        assert_eq!(receipt.gas_used, 21_000);
        assert_eq!(receipt.success, Some(true));
        assert!(receipt.is_mined());
    }

    #[tokio::test]
    async fn test_receipt_with_garbage_quantity() {
        let transport = Arc::new(NullTransport::new());
        transport.on(
            "eth_getTransactionReceipt",
            json!({"transactionHash": tx_hash(3).to_string(), "blockNumber": "0xzz"}),
        );
        assert!(connector(&transport).get_tx_receipt(&tx_hash(3)).await.is_err());
    }

    #[tokio::test]
    async fn test_contract_call_round_trip() {
        let transport = Arc::new(NullTransport::new());
        let to = Address::new([9; 20]);
        transport.on("eth_call", json!("0x0000000000000000000000000000000000000000000000000000000000000001"));
        let out = connector(&transport).call(&to, &[0xde, 0xad]).await.unwrap();
        assert_eq!(out.len(), 32);
        assert_eq!(out[31], 1);
        assert_eq!(
            transport.calls_to("eth_call"),
            vec![json!([{ "to": to.to_string(), "data": "0xdead" }, "latest"])]
        );
    }

    #[tokio::test]
    async fn test_contract_call_failure_is_contract_call_error() {
        let transport = Arc::new(NullTransport::new());
        transport.fail("eth_call", "execution reverted");
        let to = Address::new([9; 20]);
        match connector(&transport).call(&to, &[]).await {
            Err(ChainError::ContractCall { to: failed, .. }) => assert_eq!(failed, to),
            other => panic!("expected contract call error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_raw_transaction() {
        let transport = Arc::new(NullTransport::new());
        transport.on("eth_sendRawTransaction", json!(tx_hash(4).to_string()));
        let hash = connector(&transport)
            .send_raw_transaction(&[0xf8, 0x6b])
            .await
            .unwrap();
        assert_eq!(hash, tx_hash(4));
    }

    #[tokio::test]
    async fn test_block_number_and_chain_id() {
        let transport = Arc::new(NullTransport::new());
        transport.on("eth_blockNumber", json!("0x1b4"));
        transport.on("eth_chainId", json!("0x2a"));
        let chain = connector(&transport);
        assert_eq!(chain.block_number().await.unwrap(), 436);
        assert_eq!(chain.chain_id().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_get_code() {
        let transport = Arc::new(NullTransport::new());
        transport.on("eth_getCode", json!("0x6080"));
        let code = connector(&transport)
            .get_code(&Address::new([1; 20]))
            .await
            .unwrap();
        assert_eq!(code, vec![0x60, 0x80]);
    }
}
