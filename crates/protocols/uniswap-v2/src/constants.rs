//! Router Constants
//!
//! Fixed swap parameters for the single WETH -> DAI route.

use alloy_primitives::U256;

/// Decimal scale used to encode input and decode output amounts
pub const TOKEN_DECIMALS: u8 = swapdesk_core::constants::TOKEN_DECIMALS;

/// Minimum output passed to the router.
///
/// Zero means no slippage protection: the swap executes at whatever price
/// the pool gives at inclusion time.
pub const AMOUNT_OUT_MIN: U256 = U256::ZERO;

/// Seconds from submission until the router rejects the swap (20 minutes)
pub const DEADLINE_WINDOW_SECS: u64 = 20 * 60;

/// Shown in the output field when a quote cannot be fetched
pub const QUOTE_ERROR_MARKER: &str = "Error";

/// Status messages shown by the swap wizard
pub mod messages {
    pub const PROVIDER_MISSING: &str = "Please install a wallet provider (e.g. MetaMask or Frame).";
    pub const CONNECTED: &str = "Wallet connected. Ready to swap.";
    pub const CONNECT_FAILED: &str = "Failed to connect wallet.";
    pub const DISCONNECTED: &str = "Wallet disconnected.";
    pub const NOT_CONNECTED: &str = "Please connect your wallet first.";
    pub const PREPARING: &str = "Preparing swap...";
    pub const CHECKING_ALLOWANCE: &str = "Checking allowance...";
    pub const APPROVAL_REQUIRED: &str = "Approval required. Please approve in your wallet...";
    pub const APPROVAL_CONFIRMED: &str = "Approval successful! Proceeding to swap...";
    pub const SWAPPING: &str = "Executing swap. Please confirm in your wallet...";
    pub const SWAP_SUCCESS: &str = "Swap successful! ✅";
    pub const SWAP_IN_PROGRESS: &str = "A swap is already in progress.";
    pub const EXPLORER_LINK_LABEL: &str = "View on Etherscan";
}
