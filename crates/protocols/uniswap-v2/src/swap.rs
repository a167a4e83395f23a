//! Swap Executor
//!
//! Runs a swap as a fixed sequence of steps: plan, check allowance,
//! approve if needed, submit, confirm. Each step returns a typed result
//! the next one consumes. Progress is reported through [`SwapProgress`]
//! so the caller can update its view between steps.

use std::time::{SystemTime, UNIX_EPOCH};

use alloy_primitives::{Address, TxHash, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use evm_wallet_client::{TransactionRequest, WalletClient};
use swapdesk_core::{ContractError, SwapError, TxKind, TxState};

use crate::abi::{IUniswapV2Router02, IERC20};
use crate::constants::{AMOUNT_OUT_MIN, DEADLINE_WINDOW_SECS};
use crate::quote::QuoteRequest;
use crate::state::{
    AllowanceCheck, ApprovalOutcome, ConfirmedSwap, Deployment, SubmittedSwap, SwapPlan,
    SwapStage,
};

/// Observer for swap progress. All methods default to no-ops.
#[async_trait]
pub trait SwapProgress: Send + Sync {
    /// A step started
    async fn stage(&self, _stage: SwapStage) {}

    /// The wallet accepted a transaction
    async fn tx_submitted(&self, _kind: TxKind, _hash: TxHash) {}

    /// A submitted transaction was mined or failed
    async fn tx_settled(&self, _hash: TxHash, _state: TxState) {}
}

/// Progress observer that ignores everything
pub struct NoProgress;

impl SwapProgress for NoProgress {}

/// Deadline as a Unix timestamp, `DEADLINE_WINDOW_SECS` after `now_secs`
pub fn deadline_from(now_secs: u64) -> U256 {
    U256::from(now_secs.saturating_add(DEADLINE_WINDOW_SECS))
}

/// Current Unix time in seconds
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Executes swaps against one router deployment
pub struct SwapExecutor<'a> {
    client: &'a WalletClient,
    deployment: &'a Deployment,
    progress: &'a dyn SwapProgress,
}

impl<'a> SwapExecutor<'a> {
    pub fn new(
        client: &'a WalletClient,
        deployment: &'a Deployment,
        progress: &'a dyn SwapProgress,
    ) -> Self {
        Self {
            client,
            deployment,
            progress,
        }
    }

    /// Step 1: validate the amount and fix the swap parameters
    pub fn plan(&self, owner: Address, amount_text: &str, now_secs: u64) -> Result<SwapPlan, SwapError> {
        let request = QuoteRequest::parse(amount_text)?;

        Ok(SwapPlan {
            owner,
            amount_in: request.amount_in,
            amount_out_min: AMOUNT_OUT_MIN,
            path: self.deployment.path(),
            recipient: owner,
            deadline: deadline_from(now_secs),
        })
    }

    /// Step 2: read the router's allowance on the input token
    pub async fn check_allowance(&self, plan: &SwapPlan) -> Result<AllowanceCheck, SwapError> {
        self.progress.stage(SwapStage::CheckingAllowance).await;

        let current = self
            .read_allowance(plan.owner)
            .await
            .map_err(SwapError::Allowance)?;

        tracing::debug!(%current, required = %plan.amount_in, "Allowance read");
        Ok(AllowanceCheck {
            current,
            required: plan.amount_in,
        })
    }

    /// Step 3: approve exactly `amount_in` if the allowance is short
    pub async fn approve_if_needed(
        &self,
        plan: &SwapPlan,
        check: AllowanceCheck,
    ) -> Result<ApprovalOutcome, SwapError> {
        if !check.needs_approval() {
            return Ok(ApprovalOutcome::Skipped);
        }

        self.progress.stage(SwapStage::Approving).await;

        let call = IERC20::approveCall {
            spender: self.deployment.router,
            amount: plan.amount_in,
        };
        let tx = TransactionRequest {
            from: plan.owner,
            to: self.deployment.input_token,
            data: call.abi_encode(),
        };

        let hash = self
            .client
            .send_transaction(&tx)
            .await
            .map_err(|e| SwapError::Approval(e.into()))?;
        self.progress.tx_submitted(TxKind::Approval, hash).await;

        if let Err(e) = self.client.wait_for_confirmation(hash).await {
            self.progress.tx_settled(hash, TxState::Failed).await;
            return Err(SwapError::Approval(e.into()));
        }
        self.progress.tx_settled(hash, TxState::Confirmed).await;

        tracing::info!(%hash, amount = %plan.amount_in, "Approval confirmed");
        self.progress.stage(SwapStage::Approved).await;
        Ok(ApprovalOutcome::Confirmed { hash })
    }

    /// Step 4: send the swap to the wallet
    pub async fn submit_swap(&self, plan: &SwapPlan) -> Result<SubmittedSwap, SwapError> {
        self.progress.stage(SwapStage::Swapping).await;

        let call = IUniswapV2Router02::swapExactTokensForTokensCall {
            amountIn: plan.amount_in,
            amountOutMin: plan.amount_out_min,
            path: plan.path.clone(),
            to: plan.recipient,
            deadline: plan.deadline,
        };
        let tx = TransactionRequest {
            from: plan.owner,
            to: self.deployment.router,
            data: call.abi_encode(),
        };

        let hash = self
            .client
            .send_transaction(&tx)
            .await
            .map_err(|e| SwapError::Submit(e.into()))?;
        self.progress.tx_submitted(TxKind::Swap, hash).await;

        Ok(SubmittedSwap { hash })
    }

    /// Step 5: wait for one confirmation of the swap
    pub async fn confirm_swap(
        &self,
        submitted: SubmittedSwap,
        approval: ApprovalOutcome,
    ) -> Result<ConfirmedSwap, SwapError> {
        let hash = submitted.hash;
        match self.client.wait_for_confirmation(hash).await {
            Ok(receipt) => {
                self.progress.tx_settled(hash, TxState::Confirmed).await;
                tracing::info!(%hash, block = ?receipt.block_number, "Swap confirmed");
                Ok(ConfirmedSwap {
                    hash,
                    block_number: receipt.block_number,
                    approval,
                })
            }
            Err(e) => {
                self.progress.tx_settled(hash, TxState::Failed).await;
                Err(SwapError::Confirm(e.into()))
            }
        }
    }

    /// Run every step in order, stopping at the first failure
    pub async fn run(&self, owner: Address, amount_text: &str) -> Result<ConfirmedSwap, SwapError> {
        let plan = self.plan(owner, amount_text, unix_now())?;
        let check = self.check_allowance(&plan).await?;
        let approval = self.approve_if_needed(&plan, check).await?;
        let submitted = self.submit_swap(&plan).await?;
        self.confirm_swap(submitted, approval).await
    }

    async fn read_allowance(&self, owner: Address) -> Result<U256, ContractError> {
        let call = IERC20::allowanceCall {
            owner,
            spender: self.deployment.router,
        };
        let raw = self
            .client
            .call(self.deployment.input_token, call.abi_encode())
            .await?;

        IERC20::allowanceCall::abi_decode_returns(&raw, true)
            .map(|ret| ret._0)
            .map_err(|e| ContractError::Decode {
                function: "allowance",
                message: e.to_string(),
            })
    }
}
