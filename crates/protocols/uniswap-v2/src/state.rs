//! Router State Types
//!
//! Deployment addresses and the typed intermediate results of each swap step.

use alloy_primitives::{Address, TxHash, U256};
use serde::{Deserialize, Serialize};
use swapdesk_core::ChainConfig;

use crate::constants::messages;

/// Router and token pair the wizard trades on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub router: Address,
    pub input_token: Address,
    pub output_token: Address,
}

impl Deployment {
    pub fn from_config(chain: &ChainConfig) -> Self {
        Self {
            router: chain.router,
            input_token: chain.input_token,
            output_token: chain.output_token,
        }
    }

    /// Two-hop path: input token -> output token
    pub fn path(&self) -> Vec<Address> {
        vec![self.input_token, self.output_token]
    }
}

impl Default for Deployment {
    fn default() -> Self {
        Self::from_config(&ChainConfig::default())
    }
}

/// Parameters of a swap, fixed before anything is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPlan {
    /// Active account; pays the input and receives the output
    pub owner: Address,
    pub amount_in: U256,
    pub amount_out_min: U256,
    pub path: Vec<Address>,
    pub recipient: Address,
    /// Unix timestamp after which the router rejects the swap
    pub deadline: U256,
}

/// Result of reading the router's allowance on the input token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowanceCheck {
    pub current: U256,
    pub required: U256,
}

impl AllowanceCheck {
    pub fn needs_approval(&self) -> bool {
        self.current < self.required
    }
}

/// What the approval step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// Allowance already covered the amount
    Skipped,
    /// Approval for exactly the amount was mined
    Confirmed { hash: TxHash },
}

/// Swap transaction accepted by the wallet, not yet mined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmittedSwap {
    pub hash: TxHash,
}

/// Swap transaction with one confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedSwap {
    pub hash: TxHash,
    pub block_number: Option<u64>,
    pub approval: ApprovalOutcome,
}

/// Swap step transitions reported to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapStage {
    CheckingAllowance,
    Approving,
    Approved,
    Swapping,
}

impl SwapStage {
    pub fn message(&self) -> &'static str {
        match self {
            Self::CheckingAllowance => messages::CHECKING_ALLOWANCE,
            Self::Approving => messages::APPROVAL_REQUIRED,
            Self::Approved => messages::APPROVAL_CONFIRMED,
            Self::Swapping => messages::SWAPPING,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swapdesk_core::constants::sepolia;

    #[test]
    fn test_default_deployment_path() {
        let deployment = Deployment::default();
        assert_eq!(deployment.router, sepolia::ROUTER);
        assert_eq!(deployment.path(), vec![sepolia::WETH, sepolia::DAI]);
    }

    #[test]
    fn test_needs_approval() {
        let check = AllowanceCheck {
            current: U256::ZERO,
            required: U256::from(1u64),
        };
        assert!(check.needs_approval());

        let exact = AllowanceCheck {
            current: U256::from(1u64),
            required: U256::from(1u64),
        };
        assert!(!exact.needs_approval());
    }
}
