//! Shared utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use tokensmith_runner::blockchain::types::BlockchainResult;
use tokensmith_runner::blockchain::{
    Action, Balance, BlockchainError, GasBudget, LedgerClient, Receipt, SignedTransaction,
    SuiAddress, TransactionBytes, Wallet,
};

/// Well-known test key. Never funded anywhere.
pub const TEST_SECRET: [u8; 32] = [42u8; 32];

pub fn test_wallet() -> Wallet {
    Wallet::from_secret_bytes(TEST_SECRET)
}

pub fn test_private_key() -> String {
    hex::encode(TEST_SECRET)
}

pub fn sample_receipt() -> Value {
    json!({
        "digest": "3xkTzqgYdXhEAkDgZCW4Y3LMPzRcVwN9oEmfCcnwNhBd",
        "effects": {
            "status": { "status": "success" },
            "gasUsed": { "computationCost": "1000000", "storageCost": "2000000" }
        },
        "events": [],
        "objectChanges": []
    })
}

/// Receipt of a transaction that was included but aborted on-chain.
pub fn aborted_receipt() -> Value {
    json!({
        "digest": "9WzSXdwbky8tNbH7juvyaui4QzMUYEjdCEKMrMgLhXHT",
        "effects": {
            "status": {
                "status": "failure",
                "error": "MoveAbort(MoveLocation { module: tokensmith }, 3) in command 0"
            },
            "gasUsed": { "computationCost": "1000000", "storageCost": "0" }
        },
        "events": [],
        "objectChanges": []
    })
}

fn rpc_failure(message: &str) -> BlockchainError {
    BlockchainError::Rpc {
        code: -32002,
        message: message.to_string(),
    }
}

/// In-memory ledger with scripted answers and call counters.
pub struct ScriptedLedger {
    balance: Result<u128, String>,
    prepare: Result<Vec<u8>, String>,
    execute: Result<Value, String>,
    pub balance_calls: AtomicU32,
    pub prepare_calls: AtomicU32,
    pub execute_calls: AtomicU32,
    pub prepared: Mutex<Vec<Action>>,
    pub executed: Mutex<Vec<SignedTransaction>>,
}

impl ScriptedLedger {
    pub fn with_balance(balance: u128) -> Self {
        Self {
            balance: Ok(balance),
            prepare: Ok(vec![0, 1, 2, 3, 4, 5, 6, 7]),
            execute: Ok(sample_receipt()),
            balance_calls: AtomicU32::new(0),
            prepare_calls: AtomicU32::new(0),
            execute_calls: AtomicU32::new(0),
            prepared: Mutex::new(Vec::new()),
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_balance(mut self, message: &str) -> Self {
        self.balance = Err(message.to_string());
        self
    }

    pub fn failing_prepare(mut self, message: &str) -> Self {
        self.prepare = Err(message.to_string());
        self
    }

    pub fn failing_execute(mut self, message: &str) -> Self {
        self.execute = Err(message.to_string());
        self
    }

    pub fn returning_receipt(mut self, raw: Value) -> Self {
        self.execute = Ok(raw);
        self
    }

    pub fn calls(&self) -> (u32, u32, u32) {
        (
            self.balance_calls.load(Ordering::SeqCst),
            self.prepare_calls.load(Ordering::SeqCst),
            self.execute_calls.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl LedgerClient for ScriptedLedger {
    async fn get_balance(&self, _owner: &SuiAddress, coin_type: &str) -> BlockchainResult<Balance> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        match &self.balance {
            Ok(total) => Ok(Balance {
                coin_type: coin_type.to_string(),
                total: *total,
            }),
            Err(message) => Err(rpc_failure(message)),
        }
    }

    async fn prepare(
        &self,
        action: &Action,
        _sender: &SuiAddress,
        _gas_budget: GasBudget,
    ) -> BlockchainResult<TransactionBytes> {
        self.prepare_calls.fetch_add(1, Ordering::SeqCst);
        self.prepared.lock().unwrap().push(action.clone());
        match &self.prepare {
            Ok(bytes) => Ok(TransactionBytes::new(bytes.clone())),
            Err(message) => Err(rpc_failure(message)),
        }
    }

    async fn execute(&self, signed: SignedTransaction) -> BlockchainResult<Receipt> {
        self.execute_calls.fetch_add(1, Ordering::SeqCst);
        self.executed.lock().unwrap().push(signed);
        match &self.execute {
            Ok(raw) => Ok(Receipt::new(raw.clone())),
            Err(message) => Err(rpc_failure(message)),
        }
    }
}

/// JSON-RPC request as seen by the mock node.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub params: Value,
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

async fn read_request(socket: &mut TcpStream) -> Option<Value> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    serde_json::from_slice(&buf[body_start..body_start + content_length]).ok()
}

/// Start a programmable mock Sui node on an ephemeral port.
///
/// The handler receives the method name and params and returns either
/// `Ok(result)` or `Err((code, message))`.
pub async fn start_mock_node<F, Fut>(handler: F) -> (SocketAddr, Arc<Mutex<Vec<RecordedCall>>>)
where
    F: Fn(String, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, (i64, String)>> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let handler = Arc::new(handler);
    let recorded = calls.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let handler = handler.clone();
                    let recorded = recorded.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        let id = request.get("id").cloned().unwrap_or(Value::Null);
                        let method = request
                            .get("method")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string();
                        let params = request.get("params").cloned().unwrap_or(Value::Null);
                        recorded.lock().unwrap().push(RecordedCall {
                            method: method.clone(),
                            params: params.clone(),
                        });

                        let body = match handler(method, params).await {
                            Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
                            Err((code, message)) => json!({
                                "jsonrpc": "2.0",
                                "id": id,
                                "error": { "code": code, "message": message }
                            }),
                        }
                        .to_string();

                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, calls)
}

/// Node answering the three calls the runner makes.
pub async fn start_sui_node(
    total_balance: &'static str,
    execute_error: Option<&'static str>,
) -> (SocketAddr, Arc<Mutex<Vec<RecordedCall>>>) {
    start_mock_node(move |method, _params| async move {
        match method.as_str() {
            "suix_getBalance" => Ok(json!({
                "coinType": "0x2::sui::SUI",
                "coinObjectCount": 1,
                "totalBalance": total_balance,
                "lockedBalance": {}
            })),
            "unsafe_moveCall" => Ok(json!({
                "txBytes": "AAECAwQFBgc=",
                "gas": [],
                "inputObjects": []
            })),
            "sui_executeTransactionBlock" => match execute_error {
                Some(message) => Err((-32002, message.to_string())),
                None => Ok(sample_receipt()),
            },
            other => Err((-32601, format!("Method not found: {other}"))),
        }
    })
    .await
}
