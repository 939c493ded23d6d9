use std::rc::Rc;

use super::{Account, AccountRef, LedgerError, Money};

/// The registry owning every account, each uniquely keyed by account id.
///
/// The bank is plain owned state passed by reference to whoever needs it;
/// there is no ambient global. It hands out shared handles and preserves
/// registration order for iteration. Transfer atomicity is not its job
/// (that lives in [`Transaction::perform`]); ownership and lookup are.
///
/// [`Transaction::perform`]: super::Transaction::perform
#[derive(Debug, Default)]
pub struct Bank {
    accounts: Vec<AccountRef>,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct and register a new account. Duplicate ids are rejected:
    /// silently shadowing an existing account would make `find` ambiguous.
    pub fn open(
        &mut self,
        owner: impl Into<String>,
        id: impl Into<String>,
        minimum: Money,
        initial: Money,
    ) -> Result<AccountRef, LedgerError> {
        let id = id.into();
        if self.find(&id).is_some() {
            return Err(LedgerError::InvalidArgument(format!(
                "account id {id} is already taken"
            )));
        }

        let account = Account::new(owner, id, minimum, initial)?.into_ref();
        self.accounts.push(Rc::clone(&account));
        Ok(account)
    }

    /// Look up an account by id. A miss is an expected outcome, not an error.
    pub fn find(&self, id: &str) -> Option<AccountRef> {
        self.accounts
            .iter()
            .find(|account| account.borrow().id() == id)
            .cloned()
    }

    /// All accounts in registration order.
    pub fn accounts(&self) -> impl Iterator<Item = &AccountRef> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
