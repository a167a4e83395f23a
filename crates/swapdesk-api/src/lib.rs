//! Swapdesk-api: HTTP API layer for Swapdesk
//!
//! Holds the application state and the swap controller, and exposes them
//! to the page over a small JSON API.

pub mod controller;
pub mod dto;
pub mod ledger;
pub mod page;
pub mod routes;
pub mod server;
pub mod state;
pub mod view;

pub use controller::{dispatch, UiEvent};
pub use server::*;
pub use state::AppState;
pub use view::{Severity, StatusLine, StatusLink, SwapView};
