// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use familybank::application::BankService;
use familybank::domain::Money;

/// Whole currency units as Money.
pub fn dollars(units: i64) -> Money {
    Money::from_cents(units * 100).unwrap()
}

/// Test fixture: standard family account setup
pub struct StandardAccounts;

impl StandardAccounts {
    /// Create the basic account pair: Alice with $100 and a zero floor,
    /// Bob empty with a zero floor.
    pub fn create_basic(service: &mut BankService) -> Result<()> {
        service.open_account("Alice", "A001", Money::ZERO, dollars(100))?;
        service.open_account("Bob", "B002", Money::ZERO, Money::ZERO)?;
        Ok(())
    }

    /// Basic pair plus a savings account with a $50 floor.
    pub fn create_with_savings(service: &mut BankService) -> Result<()> {
        Self::create_basic(service)?;
        service.open_account("Alice", "S003", dollars(50), dollars(200))?;
        Ok(())
    }
}

/// Helper to create a service pre-populated with the basic accounts.
pub fn test_service() -> Result<BankService> {
    let mut service = BankService::new();
    StandardAccounts::create_basic(&mut service)?;
    Ok(service)
}
