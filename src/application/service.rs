use crate::domain::{AccountRef, Bank, Money, Transaction, TransactionRecord};

use super::AppError;

/// External collaborator that provisions credentials for freshly opened
/// accounts. The engine never generates or stores passwords itself; a host
/// plugs in whatever scheme it uses.
pub trait PasswordGenerator {
    fn generate_password(&self, owner: &str, account_id: &str) -> String;
}

/// Result of opening an account through the service.
#[derive(Debug)]
pub struct OpenedAccount {
    pub account: AccountRef,
    /// Present only when a password generator is configured.
    pub password: Option<String>,
}

/// One row of the account listing.
#[derive(Debug)]
pub struct AccountSummary {
    pub id: String,
    pub owner: String,
    pub balance: Money,
}

/// Application service providing high-level operations over the bank.
/// This is the primary interface for any client (CLI, GUI, API, ...): it
/// resolves account ids to handles and drives transactions, but contains no
/// balance logic of its own.
pub struct BankService {
    bank: Bank,
    passwords: Option<Box<dyn PasswordGenerator>>,
}

impl BankService {
    pub fn new() -> Self {
        Self {
            bank: Bank::new(),
            passwords: None,
        }
    }

    pub fn with_password_generator(mut self, generator: Box<dyn PasswordGenerator>) -> Self {
        self.passwords = Some(generator);
        self
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    // ========================
    // Account operations
    // ========================

    /// Open a new account, provisioning a password when a generator is
    /// configured.
    pub fn open_account(
        &mut self,
        owner: &str,
        id: &str,
        minimum: Money,
        initial: Money,
    ) -> Result<OpenedAccount, AppError> {
        let account = self.bank.open(owner, id, minimum, initial)?;
        let password = self
            .passwords
            .as_ref()
            .map(|g| g.generate_password(owner, id));
        Ok(OpenedAccount { account, password })
    }

    pub fn balance(&self, id: &str) -> Result<Money, AppError> {
        Ok(self.lookup(id)?.borrow().current())
    }

    /// The most recent `limit` transactions of an account, oldest first.
    pub fn recent_activity(
        &self,
        id: &str,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, AppError> {
        Ok(self.lookup(id)?.borrow().last_transactions(limit).to_vec())
    }

    pub fn list_accounts(&self) -> Vec<AccountSummary> {
        self.bank
            .accounts()
            .map(|account| {
                let account = account.borrow();
                AccountSummary {
                    id: account.id().to_string(),
                    owner: account.owner().to_string(),
                    balance: account.current(),
                }
            })
            .collect()
    }

    // ========================
    // Money movement
    // ========================

    /// Deposit into an account. Returns the signed effect from the mover's
    /// perspective (negative: money entered the ledger).
    pub fn deposit(
        &self,
        id: &str,
        amount: Money,
        memo: Option<String>,
    ) -> Result<Money, AppError> {
        let destination = self.lookup(id)?;
        let tx = Transaction::with_memo(memo, None, Some(destination), amount)?;
        Ok(tx.perform(false)?)
    }

    /// Withdraw from an account, respecting its minimum-balance floor.
    pub fn withdraw(
        &self,
        id: &str,
        amount: Money,
        memo: Option<String>,
    ) -> Result<Money, AppError> {
        let source = self.lookup(id)?;
        let tx = Transaction::with_memo(memo, Some(source), None, amount)?;
        Ok(tx.perform(false)?)
    }

    /// Move funds between two accounts atomically: either both balances
    /// change or neither does.
    pub fn transfer(
        &self,
        from: &str,
        to: &str,
        amount: Money,
        memo: Option<String>,
    ) -> Result<Money, AppError> {
        let source = self.lookup(from)?;
        let destination = self.lookup(to)?;
        let tx = Transaction::with_memo(memo, Some(source), Some(destination), amount)?;
        Ok(tx.perform(false)?)
    }

    fn lookup(&self, id: &str) -> Result<AccountRef, AppError> {
        self.bank
            .find(id)
            .ok_or_else(|| AppError::AccountNotFound(id.to_string()))
    }
}

impl Default for BankService {
    fn default() -> Self {
        Self::new()
    }
}
