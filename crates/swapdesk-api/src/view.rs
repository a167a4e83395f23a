//! View model
//!
//! Everything the page renders: the connect label, whether the swap control
//! is enabled, the two amount fields, and one status line.

use serde::{Deserialize, Serialize};

/// Connect button label while no wallet is connected
pub const CONNECT_LABEL: &str = "Connect Wallet";

/// How the status line should be styled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Hyperlink appended to the status text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLink {
    pub href: String,
    pub label: String,
}

/// The status display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    pub text: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<StatusLink>,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Info,
            link: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
            link: None,
        }
    }

    pub fn success(text: impl Into<String>, link: Option<StatusLink>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Success,
            link,
        }
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::info("")
    }
}

/// Snapshot of the bound page elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapView {
    pub connect_label: String,
    pub swap_enabled: bool,
    pub from_amount: String,
    pub to_amount: String,
    pub status: StatusLine,
}

impl Default for SwapView {
    fn default() -> Self {
        Self {
            connect_label: CONNECT_LABEL.to_string(),
            swap_enabled: false,
            from_amount: String::new(),
            to_amount: String::new(),
            status: StatusLine::default(),
        }
    }
}
