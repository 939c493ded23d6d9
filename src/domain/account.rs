use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::{LedgerError, Money, TransactionRecord};

/// Shared read-write handle to an account. The bank and every transaction that
/// touches an account hold one of these; nobody but the bank owns the account
/// outright. The engine is single-threaded, so interior mutability is a plain
/// `RefCell`. A concurrent host must wrap accounts in a mutex instead and
/// acquire locks in a fixed order (by account id) when two are involved.
pub type AccountRef = Rc<RefCell<Account>>;

/// Account ids must be at least this long.
pub const MIN_ACCOUNT_ID_LEN: usize = 4;

/// A named balance holder with a minimum-balance floor and an append-only
/// history of the transactions applied to it.
///
/// The balance invariant: a non-forced debit never takes `current` below
/// `minimum`. Forced adjustments exist solely so a failed transfer can be
/// rolled back, and bypass the floor check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    owner: String,
    id: String,
    minimum: Money,
    current: Money,
    history: Vec<TransactionRecord>,
}

impl Account {
    pub fn new(
        owner: impl Into<String>,
        id: impl Into<String>,
        minimum: Money,
        initial: Money,
    ) -> Result<Self, LedgerError> {
        let owner = owner.into();
        let id = id.into();

        if owner.is_empty() {
            return Err(LedgerError::InvalidArgument(
                "account owner must not be empty".to_string(),
            ));
        }
        if id.is_empty() || id.len() < MIN_ACCOUNT_ID_LEN {
            return Err(LedgerError::InvalidArgument(format!(
                "account id must be at least {MIN_ACCOUNT_ID_LEN} characters"
            )));
        }
        if initial < minimum {
            return Err(LedgerError::InvalidArgument(format!(
                "initial balance {initial} is below the minimum {minimum}"
            )));
        }

        Ok(Account {
            owner,
            id,
            minimum,
            current: initial,
            history: Vec::new(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn current(&self) -> Money {
        self.current
    }

    pub fn minimum(&self) -> Money {
        self.minimum
    }

    /// Apply a signed balance change.
    ///
    /// A debit that would land below the floor fails with
    /// [`LedgerError::Overdraft`] and leaves the balance untouched, unless
    /// `force` is set. Credits never trigger the floor check, even when the
    /// resulting balance stays under the minimum.
    pub fn adjust(&mut self, amount: Money, force: bool) -> Result<(), LedgerError> {
        let new_balance = self.current.add(amount)?;
        if !force && new_balance < self.minimum && amount < Money::ZERO {
            return Err(LedgerError::overdraft(
                &self.id,
                &self.owner,
                self.minimum.sub(new_balance)?,
            ));
        }
        self.current = new_balance;
        Ok(())
    }

    /// Append an applied transaction to the history. Insertion order is the
    /// only ordering guarantee.
    pub fn record_transaction(&mut self, record: TransactionRecord) {
        self.history.push(record);
    }

    /// The most recent `n` transactions, in original chronological order
    /// (not reversed), clipped to what the history actually holds.
    pub fn last_transactions(&self, n: usize) -> &[TransactionRecord] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    pub fn history(&self) -> &[TransactionRecord] {
        &self.history
    }

    /// Wrap into the shared handle form used by the bank and transactions.
    pub fn into_ref(self) -> AccountRef {
        Rc::new(RefCell::new(self))
    }
}
