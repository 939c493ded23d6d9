use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AccountRef, LedgerError, Money};

pub type TransactionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Transfer,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdrawal => "WITHDRAWAL",
            TransactionKind::Transfer => "TRANSFER",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The accounts a transaction touches. Which endpoints are present decides the
/// kind, and the endpoint-less case is unrepresentable once construction has
/// succeeded.
#[derive(Debug)]
enum Endpoints {
    Deposit { destination: AccountRef },
    Withdrawal { source: AccountRef },
    Transfer { source: AccountRef, destination: AccountRef },
}

/// One directed money movement between zero, one, or two accounts.
///
/// A transaction holds non-owning handles to its endpoints; it never controls
/// their lifetime. It is immutable after construction, and [`perform`]
/// consumes it, so a transaction can be applied at most once.
///
/// [`perform`]: Transaction::perform
#[derive(Debug)]
pub struct Transaction {
    id: TransactionId,
    memo: Option<String>,
    endpoints: Endpoints,
    amount: Money,
    timestamp: DateTime<Utc>,
}

/// Immutable snapshot of an applied transaction, kept in each participant's
/// history. Holds account ids rather than handles so histories stay cycle-free
/// and serializable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub amount: Money,
    pub memo: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Create a transaction without a memo. See [`Transaction::with_memo`].
    pub fn new(
        source: Option<AccountRef>,
        destination: Option<AccountRef>,
        amount: Money,
    ) -> Result<Self, LedgerError> {
        Self::with_memo(None, source, destination, amount)
    }

    /// Create a transaction. The endpoints decide the kind:
    /// no source makes a DEPOSIT, no destination a WITHDRAWAL, both a
    /// TRANSFER. The amount must be strictly positive, at least one endpoint
    /// must be present, and a transfer's endpoints must be distinct accounts.
    pub fn with_memo(
        memo: Option<String>,
        source: Option<AccountRef>,
        destination: Option<AccountRef>,
        amount: Money,
    ) -> Result<Self, LedgerError> {
        if amount <= Money::ZERO {
            return Err(LedgerError::InvalidArgument(
                "transaction amount must be positive".to_string(),
            ));
        }

        let endpoints = match (source, destination) {
            (None, None) => {
                return Err(LedgerError::InvalidArgument(
                    "transaction needs a source or a destination".to_string(),
                ));
            }
            (None, Some(destination)) => Endpoints::Deposit { destination },
            (Some(source), None) => Endpoints::Withdrawal { source },
            (Some(source), Some(destination)) => {
                if Rc::ptr_eq(&source, &destination) {
                    return Err(LedgerError::InvalidArgument(
                        "source and destination accounts cannot be the same".to_string(),
                    ));
                }
                Endpoints::Transfer {
                    source,
                    destination,
                }
            }
        };

        Ok(Transaction {
            id: Uuid::new_v4(),
            memo,
            endpoints,
            amount,
            timestamp: Utc::now(),
        })
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn kind(&self) -> TransactionKind {
        match &self.endpoints {
            Endpoints::Deposit { .. } => TransactionKind::Deposit,
            Endpoints::Withdrawal { .. } => TransactionKind::Withdrawal,
            Endpoints::Transfer { .. } => TransactionKind::Transfer,
        }
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn source(&self) -> Option<&AccountRef> {
        match &self.endpoints {
            Endpoints::Withdrawal { source } | Endpoints::Transfer { source, .. } => Some(source),
            Endpoints::Deposit { .. } => None,
        }
    }

    fn destination(&self) -> Option<&AccountRef> {
        match &self.endpoints {
            Endpoints::Deposit { destination } | Endpoints::Transfer { destination, .. } => {
                Some(destination)
            }
            Endpoints::Withdrawal { .. } => None,
        }
    }

    /// Snapshot this transaction into the form stored in account histories.
    pub fn record(&self) -> TransactionRecord {
        TransactionRecord {
            id: self.id,
            kind: self.kind(),
            source: self.source().map(|a| a.borrow().id().to_string()),
            destination: self.destination().map(|a| a.borrow().id().to_string()),
            amount: self.amount,
            memo: self.memo.clone(),
            timestamp: self.timestamp,
        }
    }

    /// Apply the transaction to its endpoint account(s).
    ///
    /// Consumes the transaction: applying the same movement twice is a type
    /// error, not a runtime hazard. Returns the signed effect from the
    /// mover's perspective: `-amount` for a deposit, `+amount` for a
    /// withdrawal, zero for a transfer (the ledger as a whole nets out).
    ///
    /// A transfer debits the source first, floor-checked, then credits the
    /// destination. If the credit fails, the debit is rolled back with a
    /// forced re-credit before the destination's error is re-raised, so a
    /// partial transfer is never observable.
    pub fn perform(self, force: bool) -> Result<Money, LedgerError> {
        let record = self.record();
        match self.endpoints {
            Endpoints::Deposit { destination } => {
                destination.borrow_mut().adjust(self.amount, force)?;
                destination.borrow_mut().record_transaction(record);
                self.amount.negate()
            }
            Endpoints::Withdrawal { source } => {
                source.borrow_mut().adjust(self.amount.negate()?, force)?;
                source.borrow_mut().record_transaction(record);
                Ok(self.amount)
            }
            Endpoints::Transfer {
                source,
                destination,
            } => {
                source.borrow_mut().adjust(self.amount.negate()?, force)?;
                if let Err(err) = destination.borrow_mut().adjust(self.amount, force) {
                    // Roll back the debit before re-raising. Forced, so the
                    // floor cannot reject it; re-adding what was just
                    // subtracted cannot overflow either.
                    source.borrow_mut().adjust(self.amount, true)?;
                    return Err(err);
                }
                source.borrow_mut().record_transaction(record.clone());
                destination.borrow_mut().record_transaction(record);
                Ok(Money::ZERO)
            }
        }
    }
}

impl fmt::Display for Transaction {
    /// Example: "TRANSFER from A001 to B002: $50.00 rent".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        if let Some(source) = self.source() {
            write!(f, " from {}", source.borrow().id())?;
        }
        if let Some(destination) = self.destination() {
            write!(f, " to {}", destination.borrow().id())?;
        }
        write!(f, ": {}", self.amount)?;
        if let Some(memo) = &self.memo {
            write!(f, " {memo}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(source) = &self.source {
            write!(f, " from {source}")?;
        }
        if let Some(destination) = &self.destination {
            write!(f, " to {destination}")?;
        }
        write!(f, ": {}", self.amount)?;
        if let Some(memo) = &self.memo {
            write!(f, " {memo}")?;
        }
        Ok(())
    }
}
