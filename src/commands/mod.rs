// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod ad;
pub mod doctor;
pub mod exporter;
pub mod funds;
pub mod reports;
pub mod transactions;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::ledger::adspend::AdBook;
use crate::ledger::finance::FinanceBook;
use crate::models::{AdAccount, Client, Fund};
use crate::store::{self, keys};

/// Load the finance collections into one in-memory book.
pub fn load_finance(conn: &Connection) -> Result<FinanceBook> {
    let funds = store::load_or_seed(conn, keys::FUNDS, crate::seed::default_funds)?;
    let transactions =
        store::load_or_seed(conn, keys::TRANSACTIONS, crate::seed::default_transactions)?;
    Ok(FinanceBook::new(funds, transactions))
}

/// Write the finance collections back after a ledger state transition.
pub fn save_finance(conn: &Connection, book: &FinanceBook) -> Result<()> {
    store::save(conn, keys::FUNDS, &book.funds)?;
    store::save(conn, keys::TRANSACTIONS, &book.transactions)?;
    Ok(())
}

/// Load the ad-spend collections into one in-memory book.
pub fn load_ad(conn: &Connection) -> Result<AdBook> {
    let clients = store::load_or_seed(conn, keys::AD_CLIENTS, crate::seed::default_clients)?;
    let accounts = store::load_or_seed(conn, keys::AD_ACCOUNTS, crate::seed::default_accounts)?;
    let campaigns = store::load_or_seed(conn, keys::AD_CAMPAIGNS, crate::seed::default_campaigns)?;
    let transactions = store::load_or_seed(
        conn,
        keys::AD_TRANSACTIONS,
        crate::seed::default_ad_transactions,
    )?;
    Ok(AdBook::new(clients, accounts, campaigns, transactions))
}

/// Write the ad-spend collections back after a ledger state transition.
pub fn save_ad(conn: &Connection, book: &AdBook) -> Result<()> {
    store::save(conn, keys::AD_CLIENTS, &book.clients)?;
    store::save(conn, keys::AD_ACCOUNTS, &book.accounts)?;
    store::save(conn, keys::AD_CAMPAIGNS, &book.campaigns)?;
    store::save(conn, keys::AD_TRANSACTIONS, &book.transactions)?;
    Ok(())
}

pub fn fund_named<'a>(funds: &'a [Fund], name: &str) -> Result<&'a Fund> {
    funds
        .iter()
        .find(|f| f.name == name)
        .with_context(|| format!("Fund '{}' not found", name))
}

pub fn client_named<'a>(clients: &'a [Client], name: &str) -> Result<&'a Client> {
    clients
        .iter()
        .find(|c| c.name == name)
        .with_context(|| format!("Client '{}' not found", name))
}

pub fn account_named<'a>(accounts: &'a [AdAccount], name: &str) -> Result<&'a AdAccount> {
    accounts
        .iter()
        .find(|a| a.name == name)
        .with_context(|| format!("Ad account '{}' not found", name))
}
