use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::BankService;
use crate::domain::Account;

/// Full in-memory state dump for inspection or hand-off to a host's
/// persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub accounts: Vec<Account>,
}

/// Exporter for converting bank state to external formats.
pub struct Exporter<'a> {
    service: &'a BankService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a BankService) -> Self {
        Self { service }
    }

    /// Export all account balances to CSV format.
    pub fn export_balances_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["account_id", "owner", "balance_cents", "minimum_cents"])?;

        let mut count = 0;
        for account in self.service.bank().accounts() {
            let account = account.borrow();
            csv_writer.write_record([
                account.id(),
                account.owner(),
                &account.current().cents().to_string(),
                &account.minimum().cents().to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the most recent `limit` transactions of one account to CSV.
    pub fn export_statement_csv<W: Write>(
        &self,
        account_id: &str,
        limit: usize,
        writer: W,
    ) -> Result<usize> {
        let records = self.service.recent_activity(account_id, limit)?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "id",
            "timestamp",
            "kind",
            "source",
            "destination",
            "amount_cents",
            "memo",
        ])?;

        let mut count = 0;
        for record in &records {
            csv_writer.write_record([
                record.id.to_string(),
                record.timestamp.to_rfc3339(),
                record.kind.as_str().to_string(),
                record.source.clone().unwrap_or_default(),
                record.destination.clone().unwrap_or_default(),
                record.amount.cents().to_string(),
                record.memo.clone().unwrap_or_default(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the full bank state as a JSON snapshot.
    pub fn export_snapshot_json<W: Write>(&self, mut writer: W) -> Result<BankSnapshot> {
        let accounts = self
            .service
            .bank()
            .accounts()
            .map(|account| account.borrow().clone())
            .collect();

        let snapshot = BankSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            accounts,
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}
