//! Uniswap V2 Router Protocol Implementation
//!
//! This crate quotes and executes ERC-20 -> ERC-20 swaps through a
//! Uniswap V2 style router over a fixed two-token path. The router does
//! the pricing and settlement; this crate encodes calls, checks the
//! router's allowance, and tracks the resulting transactions.

pub mod abi;
pub mod constants;
pub mod quote;
pub mod state;
pub mod swap;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-exports
pub use constants::{messages, AMOUNT_OUT_MIN, DEADLINE_WINDOW_SECS, QUOTE_ERROR_MARKER};
pub use quote::{fetch_amount_out, fetch_quote, quote, QuoteOutcome, QuoteRequest};
pub use state::{
    AllowanceCheck, ApprovalOutcome, ConfirmedSwap, Deployment, SubmittedSwap, SwapPlan,
    SwapStage,
};
pub use swap::{deadline_from, unix_now, NoProgress, SwapExecutor, SwapProgress};
