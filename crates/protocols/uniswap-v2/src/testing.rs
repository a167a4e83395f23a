//! Scripted chain for tests
//!
//! Builds a [`MockProvider`] that answers the router and token calls the
//! swap flow makes, decoding calldata with the same bindings the crate
//! encodes with.

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use alloy_primitives::{address, Address, TxHash, U256};
use alloy_sol_types::SolCall;
use evm_wallet_client::mock::MockProvider;
use evm_wallet_client::{decode_hex, encode_hex, WalletClient};
use serde_json::{json, Value};
use swapdesk_core::{Network, WalletConfig, WalletError};

use crate::abi::{IUniswapV2Router02, IERC20};

/// Account the scripted wallet exposes
pub const ACCOUNT: Address = address!("1111111111111111111111111111111111111111");

/// `n` whole tokens in 18-decimal base units
pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
}

/// A transaction the scripted wallet was asked to send, decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentCall {
    Approve {
        token: Address,
        spender: Address,
        amount: U256,
    },
    Swap {
        router: Address,
        amount_in: U256,
        amount_out_min: U256,
        path: Vec<Address>,
        to: Address,
        deadline: U256,
    },
    Unknown(Vec<u8>),
}

/// Builder for a scripted wallet and chain
#[derive(Debug, Clone)]
pub struct ScriptedChain {
    accounts: Vec<Address>,
    reject_connect: bool,
    unreachable: bool,
    chain_id: u64,
    amounts_out: Option<Vec<U256>>,
    allowance: Option<U256>,
    reject_transactions: bool,
    revert_swaps: bool,
}

impl Default for ScriptedChain {
    fn default() -> Self {
        Self {
            accounts: vec![ACCOUNT],
            reject_connect: false,
            unreachable: false,
            chain_id: Network::Sepolia.chain_id(),
            amounts_out: Some(vec![ether(1), ether(2500)]),
            allowance: Some(U256::ZERO),
            reject_transactions: false,
            revert_swaps: false,
        }
    }
}

impl ScriptedChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accounts(mut self, accounts: Vec<Address>) -> Self {
        self.accounts = accounts;
        self
    }

    /// `eth_requestAccounts` fails with EIP-1193 code 4001
    pub fn rejecting_connect(mut self) -> Self {
        self.reject_connect = true;
        self
    }

    /// Every request fails as if nothing is listening
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Router `getAmountsOut` result
    pub fn amounts_out(mut self, amounts: Vec<U256>) -> Self {
        self.amounts_out = Some(amounts);
        self
    }

    /// Router `getAmountsOut` reverts
    pub fn failing_quotes(mut self) -> Self {
        self.amounts_out = None;
        self
    }

    /// Token `allowance` result
    pub fn allowance(mut self, allowance: U256) -> Self {
        self.allowance = Some(allowance);
        self
    }

    /// Token `allowance` reverts
    pub fn failing_allowance(mut self) -> Self {
        self.allowance = None;
        self
    }

    /// `eth_sendTransaction` fails with EIP-1193 code 4001
    pub fn rejecting_transactions(mut self) -> Self {
        self.reject_transactions = true;
        self
    }

    /// Swap receipts come back with status 0
    pub fn reverting_swaps(mut self) -> Self {
        self.revert_swaps = true;
        self
    }

    pub fn build(self) -> ScriptedWallet {
        let ledger: Arc<Mutex<Vec<(TxHash, bool)>>> = Arc::new(Mutex::new(Vec::new()));
        let script = self;

        let provider = Arc::new(MockProvider::new(move |method, params| {
            if script.unreachable {
                return Err(WalletError::Unreachable {
                    url: "http://127.0.0.1:1248".into(),
                });
            }
            match method {
                "eth_requestAccounts" if script.reject_connect => {
                    Err(WalletError::from_rpc(4001, "User rejected the request."))
                }
                "eth_requestAccounts" => Ok(json!(script
                    .accounts
                    .iter()
                    .map(|a| a.to_checksum(None))
                    .collect::<Vec<_>>())),
                "eth_chainId" => Ok(json!(format!("0x{:x}", script.chain_id))),
                "eth_call" => script.answer_call(&calldata(params)),
                "eth_sendTransaction" if script.reject_transactions => {
                    Err(WalletError::from_rpc(4001, "User denied transaction signature."))
                }
                "eth_sendTransaction" => {
                    let is_swap = calldata(params)
                        .starts_with(&IUniswapV2Router02::swapExactTokensForTokensCall::SELECTOR);
                    let mut sent = ledger.lock().unwrap_or_else(|e| e.into_inner());
                    let hash = TxHash::with_last_byte(sent.len() as u8 + 1);
                    sent.push((hash, is_swap));
                    Ok(json!(hash.to_string()))
                }
                "eth_getTransactionReceipt" => {
                    let hash = params[0]
                        .as_str()
                        .and_then(|s| TxHash::from_str(s).ok())
                        .unwrap_or_default();
                    let sent = ledger.lock().unwrap_or_else(|e| e.into_inner());
                    match sent.iter().find(|(h, _)| *h == hash) {
                        Some((_, is_swap)) => {
                            let status = if *is_swap && script.revert_swaps { "0x0" } else { "0x1" };
                            Ok(json!({
                                "transactionHash": hash.to_string(),
                                "blockNumber": "0x1",
                                "status": status
                            }))
                        }
                        None => Ok(Value::Null),
                    }
                }
                other => Err(WalletError::Rpc {
                    code: -32601,
                    message: format!("method {} not supported", other),
                }),
            }
        }));

        let client = WalletClient::new(provider.clone(), &WalletConfig::default());
        ScriptedWallet { client, provider }
    }

    fn answer_call(&self, data: &[u8]) -> Result<Value, WalletError> {
        let encoded = if data.starts_with(&IUniswapV2Router02::getAmountsOutCall::SELECTOR) {
            self.amounts_out
                .as_ref()
                .map(|amounts| IUniswapV2Router02::getAmountsOutCall::abi_encode_returns(&(amounts.clone(),)))
        } else if data.starts_with(&IERC20::allowanceCall::SELECTOR) {
            self.allowance
                .map(|allowance| IERC20::allowanceCall::abi_encode_returns(&(allowance,)))
        } else {
            None
        };

        encoded
            .map(|bytes| json!(encode_hex(&bytes)))
            .ok_or_else(|| WalletError::Rpc {
                code: 3,
                message: "execution reverted".into(),
            })
    }
}

/// Client over a scripted provider, plus the provider for assertions
pub struct ScriptedWallet {
    pub client: WalletClient,
    pub provider: Arc<MockProvider>,
}

impl ScriptedWallet {
    /// `amountIn` of every `getAmountsOut` call, in order
    pub fn quoted_amounts(&self) -> Vec<U256> {
        self.provider
            .requests()
            .iter()
            .filter(|r| r.method == "eth_call")
            .filter_map(|r| {
                IUniswapV2Router02::getAmountsOutCall::abi_decode(&calldata(&r.params), true).ok()
            })
            .map(|call| call.amountIn)
            .collect()
    }

    /// Every transaction the wallet was asked to send, decoded
    pub fn sent_calls(&self) -> Vec<SentCall> {
        self.provider
            .requests()
            .iter()
            .filter(|r| r.method == "eth_sendTransaction")
            .map(|r| decode_sent(&r.params))
            .collect()
    }
}

fn calldata(params: &Value) -> Vec<u8> {
    params[0]["data"]
        .as_str()
        .and_then(|s| decode_hex(s).ok())
        .unwrap_or_default()
}

fn decode_sent(params: &Value) -> SentCall {
    let data = calldata(params);
    let to = params[0]["to"]
        .as_str()
        .and_then(|s| Address::from_str(s).ok())
        .unwrap_or_default();

    if let Ok(call) = IERC20::approveCall::abi_decode(&data, true) {
        return SentCall::Approve {
            token: to,
            spender: call.spender,
            amount: call.amount,
        };
    }
    if let Ok(call) = IUniswapV2Router02::swapExactTokensForTokensCall::abi_decode(&data, true) {
        return SentCall::Swap {
            router: to,
            amount_in: call.amountIn,
            amount_out_min: call.amountOutMin,
            path: call.path,
            to: call.to,
            deadline: call.deadline,
        };
    }
    SentCall::Unknown(data)
}
