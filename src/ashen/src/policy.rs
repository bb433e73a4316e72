//! Policies for inputs that do not line up with the expected layout

use serde::{Deserialize, Serialize};

/// What to do when data does not divide evenly into entries or rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Remainder {
    /// Ignore trailing partial entries and pad the last row with the fill color
    #[default]
    Pad,
    /// Fail unless the data divides exactly
    Reject,
}

/// What to do with a texture byte that is not a valid palette index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexPolicy {
    #[default]
    Fail,
    /// Use the last palette entry instead
    Clamp,
}

/// How a batch reacts to one of its entries failing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureMode {
    /// Stop at the first failure
    #[default]
    Halt,
    /// Report the failure and continue with the next entry
    Skip,
}
