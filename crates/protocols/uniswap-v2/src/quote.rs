//! Quote Fetcher
//!
//! Reads the expected output for a typed input amount from the router's
//! `getAmountsOut` view.

use alloy_primitives::U256;
use alloy_sol_types::SolCall;
use evm_wallet_client::WalletClient;
use swapdesk_core::{format_units, parse_positive_units, ContractError, UnitsError};

use crate::abi::IUniswapV2Router02;
use crate::constants::{QUOTE_ERROR_MARKER, TOKEN_DECIMALS};
use crate::state::Deployment;

/// A validated, strictly positive input amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteRequest {
    pub amount_in: U256,
}

impl QuoteRequest {
    /// Validate free-text input before any network call
    pub fn parse(amount_text: &str) -> Result<Self, UnitsError> {
        parse_positive_units(amount_text, TOKEN_DECIMALS).map(|amount_in| Self { amount_in })
    }
}

/// What the output field should show after a quote attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteOutcome {
    /// Input was empty, invalid, or not positive; nothing was fetched
    Cleared,
    /// Router output, formatted as a decimal string
    Amount(String),
    /// The call failed
    Failed,
}

impl QuoteOutcome {
    /// Text for the output field
    pub fn display(&self) -> &str {
        match self {
            Self::Cleared => "",
            Self::Amount(amount) => amount,
            Self::Failed => QUOTE_ERROR_MARKER,
        }
    }
}

/// Ask the router for the output amount along the deployment path.
///
/// Returns the last element of `getAmountsOut`, i.e. the output token amount.
pub async fn fetch_amount_out(
    client: &WalletClient,
    deployment: &Deployment,
    amount_in: U256,
) -> Result<U256, ContractError> {
    let path = deployment.path();
    let output_index = path.len() - 1;

    let call = IUniswapV2Router02::getAmountsOutCall {
        amountIn: amount_in,
        path,
    };
    let raw = client.call(deployment.router, call.abi_encode()).await?;

    let decoded = IUniswapV2Router02::getAmountsOutCall::abi_decode_returns(&raw, true)
        .map_err(|e| ContractError::Decode {
            function: "getAmountsOut",
            message: e.to_string(),
        })?;

    decoded
        .amounts
        .get(output_index)
        .copied()
        .ok_or(ContractError::MissingAmount {
            index: output_index,
            len: decoded.amounts.len(),
        })
}

/// Fetch and format a quote. Never fails: errors become `QuoteOutcome::Failed`.
pub async fn fetch_quote(
    client: &WalletClient,
    deployment: &Deployment,
    request: &QuoteRequest,
) -> QuoteOutcome {
    match fetch_amount_out(client, deployment, request.amount_in).await {
        Ok(amount_out) => {
            let formatted = format_units(amount_out, TOKEN_DECIMALS);
            tracing::debug!(amount_in = %request.amount_in, amount_out = %formatted, "Quote fetched");
            QuoteOutcome::Amount(formatted)
        }
        Err(e) => {
            tracing::warn!("Failed to get price: {}", e);
            QuoteOutcome::Failed
        }
    }
}

/// Validate the text and fetch a quote for it.
///
/// Invalid or non-positive input clears the output without touching the
/// network.
pub async fn quote(client: &WalletClient, deployment: &Deployment, amount_text: &str) -> QuoteOutcome {
    match QuoteRequest::parse(amount_text) {
        Ok(request) => fetch_quote(client, deployment, &request).await,
        Err(e) => {
            tracing::debug!("Quote input rejected: {}", e);
            QuoteOutcome::Cleared
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ether, ScriptedChain};

    #[tokio::test]
    async fn test_zero_input_clears_without_calls() {
        let chain = ScriptedChain::new().build();
        let outcome = quote(&chain.client, &Deployment::default(), "0").await;
        assert_eq!(outcome, QuoteOutcome::Cleared);
        assert_eq!(outcome.display(), "");
        assert!(chain.provider.requests().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_inputs_make_no_calls() {
        let chain = ScriptedChain::new().build();
        for text in ["", "abc", "-1", "1e18", "0.0"] {
            let outcome = quote(&chain.client, &Deployment::default(), text).await;
            assert_eq!(outcome, QuoteOutcome::Cleared, "input {:?}", text);
        }
        assert!(chain.provider.requests().is_empty());
    }

    #[tokio::test]
    async fn test_quote_formats_second_path_element() {
        let chain = ScriptedChain::new()
            .amounts_out(vec![ether(1), ether(2500)])
            .build();

        let outcome = quote(&chain.client, &Deployment::default(), "1").await;
        assert_eq!(outcome, QuoteOutcome::Amount("2500.0".to_string()));
        assert_eq!(chain.provider.count("eth_call"), 1);
        assert_eq!(chain.quoted_amounts(), vec![ether(1)]);
    }

    #[tokio::test]
    async fn test_quote_failure_shows_marker() {
        let chain = ScriptedChain::new().failing_quotes().build();
        let outcome = quote(&chain.client, &Deployment::default(), "1").await;
        assert_eq!(outcome, QuoteOutcome::Failed);
        assert_eq!(outcome.display(), "Error");
    }

    #[tokio::test]
    async fn test_short_amounts_array_is_an_error() {
        let chain = ScriptedChain::new().amounts_out(vec![ether(1)]).build();
        let err = fetch_amount_out(&chain.client, &Deployment::default(), ether(1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ContractError::MissingAmount { index: 1, len: 1 }
        ));
    }
}
