// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod adspend;
pub mod finance;

use thiserror::Error;

/// A rejected ledger operation. Every variant means the operation was
/// refused before any mutation; entity collections are left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("amount must be positive: {0}")]
    InvalidAmount(String),
    #[error("{entity} '{id}' does not resolve to a known record")]
    InvalidReference { entity: &'static str, id: String },
    #[error("{entity} '{id}' not found")]
    MissingReference { entity: &'static str, id: String },
    #[error("insufficient balance in '{name}': have {have}, need {need}")]
    InsufficientBalance {
        name: String,
        have: rust_decimal::Decimal,
        need: rust_decimal::Decimal,
    },
    #[error("source and destination fund are the same: '{0}'")]
    SameFund(String),
    #[error("campaign '{id}' is {status}, expected pending or running")]
    InvalidState { id: String, status: String },
}

impl LedgerError {
    pub(crate) fn invalid_amount(what: &str, value: rust_decimal::Decimal) -> Self {
        LedgerError::InvalidAmount(format!("{} = {}", what, value))
    }
}
