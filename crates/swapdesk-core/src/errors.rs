//! Error types for Swapdesk

use alloy_primitives::TxHash;
use thiserror::Error;

/// Core errors that can occur in Swapdesk
#[derive(Debug, Error)]
pub enum Error {
    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Contract error: {0}")]
    Contract(#[from] ContractError),

    #[error("Swap error: {0}")]
    Swap(#[from] SwapError),

    #[error("Amount error: {0}")]
    Units(#[from] UnitsError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Decimal amount parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    #[error("Amount is empty")]
    Empty,

    #[error("Invalid amount: '{0}'")]
    InvalidDigits(String),

    #[error("Amount has more than {max} decimal places")]
    TooManyDecimals { max: u8 },

    #[error("Amount is too large")]
    Overflow,

    #[error("Amount must be greater than zero")]
    NotPositive,
}

/// Wallet provider errors
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("No wallet provider available")]
    ProviderMissing,

    #[error("Wallet provider unreachable at {url}")]
    Unreachable { url: String },

    #[error("User rejected the request")]
    UserRejected,

    #[error("Wallet returned no accounts")]
    NoAccounts,

    #[error("Provider error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Wallet request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Transaction {hash} reverted")]
    Reverted { hash: TxHash },
}

/// EIP-1193 error code for a user-rejected request
pub const USER_REJECTED_CODE: i64 = 4001;

impl WalletError {
    /// Whether this error means there is no usable provider at all
    /// (as opposed to a provider that answered with a failure).
    pub fn is_provider_missing(&self) -> bool {
        matches!(self, Self::ProviderMissing | Self::Unreachable { .. })
    }

    /// Map a JSON-RPC error object to a wallet error
    pub fn from_rpc(code: i64, message: impl Into<String>) -> Self {
        if code == USER_REJECTED_CODE {
            Self::UserRejected
        } else {
            Self::Rpc {
                code,
                message: message.into(),
            }
        }
    }

    /// Get a machine-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ProviderMissing => "provider_missing",
            Self::Unreachable { .. } => "provider_unreachable",
            Self::UserRejected => "user_rejected",
            Self::NoAccounts => "no_accounts",
            Self::Rpc { .. } => "rpc_error",
            Self::Timeout { .. } => "timeout",
            Self::Transport(_) => "transport_error",
            Self::ParseError(_) => "parse_error",
            Self::Reverted { .. } => "reverted",
        }
    }
}

/// Contract call errors
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("{0}")]
    Wallet(#[from] WalletError),

    #[error("Failed to decode {function} result: {message}")]
    Decode {
        function: &'static str,
        message: String,
    },

    #[error("Router returned {len} amounts, expected index {index}")]
    MissingAmount { index: usize, len: usize },
}

/// Swap execution errors, one variant per failing step
#[derive(Debug, Error)]
pub enum SwapError {
    #[error("Please connect your wallet first.")]
    NotConnected,

    #[error("{0}")]
    InvalidAmount(#[from] UnitsError),

    #[error("{0}")]
    Wallet(WalletError),

    #[error("Allowance check failed: {0}")]
    Allowance(#[source] ContractError),

    #[error("Approval failed: {0}")]
    Approval(#[source] ContractError),

    #[error("Swap submission failed: {0}")]
    Submit(#[source] ContractError),

    #[error("Swap confirmation failed: {0}")]
    Confirm(#[source] ContractError),
}

impl SwapError {
    /// Get a machine-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotConnected => "not_connected",
            Self::InvalidAmount(_) => "invalid_amount",
            Self::Wallet(_) => "wallet_unavailable",
            Self::Allowance(_) => "allowance_failed",
            Self::Approval(_) => "approval_failed",
            Self::Submit(_) => "swap_submit_failed",
            Self::Confirm(_) => "swap_confirm_failed",
        }
    }
}

/// Result type alias for Swapdesk operations
pub type Result<T> = std::result::Result<T, Error>;
