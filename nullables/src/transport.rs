//! Nullable transport: scripted JSON-RPC answers, no network.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use kyc_transport::{Transport, TransportError};

enum Scripted {
    Reply(Value),
    Fail(String),
}

/// A transport that answers from a script and records every call.
///
/// Lookup order for a call: an answer registered for the exact
/// `(method, params)` pair, then one registered for the method alone.
/// Unscripted methods fail with JSON-RPC "method not found".
pub struct NullTransport {
    by_params: Mutex<HashMap<(String, String), Scripted>>,
    by_method: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl NullTransport {
    pub fn new() -> Self {
        Self {
            by_params: Mutex::new(HashMap::new()),
            by_method: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer every call to `method` with `result`.
    pub fn on(&self, method: &str, result: Value) {
        self.by_method
            .lock()
            .unwrap()
            .insert(method.to_string(), Scripted::Reply(result));
    }

    /// Answer calls to `method` with exactly `params` with `result`.
    pub fn on_params(&self, method: &str, params: Value, result: Value) {
        self.by_params
            .lock()
            .unwrap()
            .insert((method.to_string(), params.to_string()), Scripted::Reply(result));
    }

    /// Fail every call to `method` as if the node were unreachable.
    pub fn fail(&self, method: &str, message: &str) {
        self.by_method
            .lock()
            .unwrap()
            .insert(method.to_string(), Scripted::Fail(message.to_string()));
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    /// Params of every call to `method`, in order.
    pub fn calls_to(&self, method: &str) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params.clone())
            .collect()
    }

    fn answer(scripted: &Scripted) -> Result<Value, TransportError> {
        match scripted {
            Scripted::Reply(value) => Ok(value.clone()),
            Scripted::Fail(message) => Err(TransportError::Unreachable(message.clone())),
        }
    }
}

impl Default for NullTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for NullTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        let key = (method.to_string(), params.to_string());
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params));

        if let Some(scripted) = self.by_params.lock().unwrap().get(&key) {
            return Self::answer(scripted);
        }
        if let Some(scripted) = self.by_method.lock().unwrap().get(method) {
            return Self::answer(scripted);
        }
        Err(TransportError::Rpc {
            code: -32601,
            message: format!("method {method} not scripted"),
        })
    }
}
