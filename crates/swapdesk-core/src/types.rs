//! Core type definitions for Swapdesk

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

pub use alloy_primitives::{Address, TxHash, U256};

/// Network type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Sepolia,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Sepolia => "sepolia",
        }
    }

    /// EIP-155 chain ID
    pub fn chain_id(&self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Sepolia => 11_155_111,
        }
    }

    /// Default block explorer for this network
    pub fn explorer_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://etherscan.io",
            Self::Sepolia => "https://sepolia.etherscan.io",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shorten an address for display: `0xAbCd...1234`.
///
/// Uses the EIP-55 checksummed form, keeping the first 6 and last 4 characters.
pub fn shorten_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[38..])
}

/// A connected wallet session.
///
/// Exists only while a wallet is connected; the signing identity is the
/// provider account captured at connect time.
#[derive(Debug, Clone)]
pub struct Session {
    /// Active account address
    pub address: Address,
    /// When the wallet was connected
    pub connected_at: Instant,
}

impl Session {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            connected_at: Instant::now(),
        }
    }

    pub fn short_address(&self) -> String {
        shorten_address(&self.address)
    }
}

/// Kind of on-chain transaction submitted by the swap flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Approval,
    Swap,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approval => "approval",
            Self::Swap => "swap",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of a submitted transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxState {
    Pending,
    Confirmed,
    Failed,
}

/// Ephemeral handle to a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxRecord {
    pub kind: TxKind,
    pub hash: TxHash,
    pub state: TxState,
}

impl TxRecord {
    pub fn pending(kind: TxKind, hash: TxHash) -> Self {
        Self {
            kind,
            hash,
            state: TxState::Pending,
        }
    }
}

/// Constants
pub mod constants {
    use alloy_primitives::{address, Address};

    /// Decimal scale used for both tokens of the fixed pair
    pub const TOKEN_DECIMALS: u8 = 18;

    /// Sepolia deployment of the router and the swapped token pair
    pub mod sepolia {
        use super::*;

        /// Uniswap V2 router
        pub const ROUTER: Address = address!("C532a74256D3Db42D0Bf7a0400fEFDbad7694008");

        /// WETH (input token)
        pub const WETH: Address = address!("7b79995e5f793A07Bc00c21412e50Ea00A785cfD");

        /// DAI (output token)
        pub const DAI: Address = address!("68194a729C2450ad26072b3D33ADaCbcef39D574");
    }
}
