// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::ledger::LedgerError;
use crate::models::{Fund, Transaction, TxType};

pub const TRANSFER_CATEGORY: &str = "Transfers";

/// In-memory snapshot of the general finance ledger: funds plus the
/// append-only transaction log. All balance mutation goes through the
/// methods here; validation happens before any write, so a rejected
/// operation leaves the book untouched.
#[derive(Debug, Clone, Default)]
pub struct FinanceBook {
    pub funds: Vec<Fund>,
    pub transactions: Vec<Transaction>,
    /// When true, transfers may drive the source fund negative instead of
    /// failing with `InsufficientBalance`. Income/expense application never
    /// enforces a floor.
    pub fund_overdraft: bool,
}

impl FinanceBook {
    pub fn new(funds: Vec<Fund>, transactions: Vec<Transaction>) -> Self {
        FinanceBook {
            funds,
            transactions,
            fund_overdraft: false,
        }
    }

    fn fund_index(&self, id: &str) -> Option<usize> {
        self.funds.iter().position(|f| f.id == id)
    }

    /// Apply a new income/expense transaction: adjust the owning fund's
    /// balance by ±amount and append the record to the log.
    pub fn apply_transaction(&mut self, tx: Transaction) -> Result<(), LedgerError> {
        if tx.amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount("amount", tx.amount));
        }
        let idx = self
            .fund_index(&tx.fund_id)
            .ok_or_else(|| LedgerError::InvalidReference {
                entity: "fund",
                id: tx.fund_id.clone(),
            })?;
        let delta = match tx.r#type {
            TxType::Income => tx.amount,
            TxType::Expense => -tx.amount,
        };
        self.funds[idx].balance += delta;
        self.transactions.push(tx);
        Ok(())
    }

    /// Replace an existing transaction, reversing its prior balance effect
    /// first. Modeled as delete(old) + create(new) so balance conservation
    /// holds under edits.
    pub fn edit_transaction(&mut self, updated: Transaction) -> Result<(), LedgerError> {
        if updated.amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount("amount", updated.amount));
        }
        if !self.transactions.iter().any(|t| t.id == updated.id) {
            return Err(LedgerError::InvalidReference {
                entity: "transaction",
                id: updated.id.clone(),
            });
        }
        if self.fund_index(&updated.fund_id).is_none() {
            return Err(LedgerError::InvalidReference {
                entity: "fund",
                id: updated.fund_id.clone(),
            });
        }
        self.delete_transactions(std::slice::from_ref(&updated.id));
        self.apply_transaction(updated)
    }

    /// Remove transactions by id, rolling their balance effects back.
    /// Per-fund adjustments are accumulated first and applied in one pass,
    /// so several deletions against the same fund cannot drift through
    /// intermediate states. Unknown ids are ignored; returns the number of
    /// records removed.
    pub fn delete_transactions(&mut self, ids: &[String]) -> usize {
        let mut adjustments: HashMap<String, Decimal> = HashMap::new();
        let mut removed = 0usize;
        for tx in self.transactions.iter().filter(|t| ids.contains(&t.id)) {
            let change = match tx.r#type {
                TxType::Income => -tx.amount,
                TxType::Expense => tx.amount,
            };
            *adjustments.entry(tx.fund_id.clone()).or_insert(Decimal::ZERO) += change;
            removed += 1;
        }
        for fund in &mut self.funds {
            if let Some(delta) = adjustments.get(&fund.id) {
                fund.balance += *delta;
            }
        }
        self.transactions.retain(|t| !ids.contains(&t.id));
        removed
    }

    /// Move money between two funds and record the movement as a linked
    /// expense/income pair under the `Transfers` category, so the transfer
    /// shows up in the log and in reporting. Returns (expense, income).
    pub fn transfer_funds(
        &mut self,
        from_id: &str,
        to_id: &str,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(Transaction, Transaction), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount("amount", amount));
        }
        if from_id == to_id {
            return Err(LedgerError::SameFund(from_id.to_string()));
        }
        let from_idx = self
            .fund_index(from_id)
            .ok_or_else(|| LedgerError::InvalidReference {
                entity: "fund",
                id: from_id.to_string(),
            })?;
        let to_idx = self
            .fund_index(to_id)
            .ok_or_else(|| LedgerError::InvalidReference {
                entity: "fund",
                id: to_id.to_string(),
            })?;
        if !self.fund_overdraft && self.funds[from_idx].balance < amount {
            return Err(LedgerError::InsufficientBalance {
                name: self.funds[from_idx].name.clone(),
                have: self.funds[from_idx].balance,
                need: amount,
            });
        }

        let from_name = self.funds[from_idx].name.clone();
        let to_name = self.funds[to_idx].name.clone();
        self.funds[from_idx].balance -= amount;
        self.funds[to_idx].balance += amount;

        let out = Transaction {
            id: crate::utils::new_id(),
            r#type: TxType::Expense,
            description: format!("Transfer to {}", to_name),
            amount,
            category: TRANSFER_CATEGORY.to_string(),
            date: now,
            fund_id: from_id.to_string(),
        };
        let inn = Transaction {
            id: crate::utils::new_id(),
            r#type: TxType::Income,
            description: format!("Transfer from {}", from_name),
            amount,
            category: TRANSFER_CATEGORY.to_string(),
            date: now,
            fund_id: to_id.to_string(),
        };
        self.transactions.push(out.clone());
        self.transactions.push(inn.clone());
        Ok((out, inn))
    }
}
