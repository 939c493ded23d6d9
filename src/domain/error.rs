use thiserror::Error;

use super::Money;

/// Errors raised by the ledger core. Nothing here is retried internally: every
/// failure propagates synchronously to the immediate caller, except the
/// destination-credit failure inside a transfer, which is compensated and then
/// re-raised (see `Transaction::perform`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A construction-time contract violation: empty owner, short account id,
    /// non-positive transaction amount, identical endpoints, and friends.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Money arithmetic or conversion left the representable cent range.
    #[error("Money overflow: {0}")]
    Overflow(&'static str),

    /// A non-forced debit would have taken the account below its minimum
    /// balance. `shortfall` is how far below the floor the debit would land.
    #[error("Overdraft of {account_id} by {shortfall}")]
    Overdraft {
        account_id: String,
        owner: String,
        shortfall: Money,
    },
}

impl LedgerError {
    /// Build an overdraft error. A non-positive shortfall means the caller's
    /// floor arithmetic is broken, so that degrades to `InvalidArgument`
    /// instead of producing a nonsense overdraft report.
    pub fn overdraft(account_id: &str, owner: &str, shortfall: Money) -> Self {
        if shortfall <= Money::ZERO {
            return LedgerError::InvalidArgument(
                "overdraft shortfall must be positive".to_string(),
            );
        }
        LedgerError::Overdraft {
            account_id: account_id.to_string(),
            owner: owner.to_string(),
            shortfall,
        }
    }
}
