mod common;

use anyhow::Result;
use common::{dollars, test_service};
use familybank::domain::{LedgerError, Money, Transaction, TransactionKind};

#[test]
fn test_deposit_effect_and_record() -> Result<()> {
    let service = test_service()?;

    let effect = service.deposit("B002", dollars(50), None)?;
    assert_eq!(effect, dollars(-50));
    assert_eq!(service.balance("B002")?, dollars(50));

    let activity = service.recent_activity("B002", 10)?;
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0].kind, TransactionKind::Deposit);
    assert_eq!(activity[0].destination.as_deref(), Some("B002"));
    Ok(())
}

#[test]
fn test_withdrawal_effect() -> Result<()> {
    let service = test_service()?;

    let effect = service.withdraw("A001", dollars(30), Some("groceries".to_string()))?;
    assert_eq!(effect, dollars(30));
    assert_eq!(service.balance("A001")?, dollars(70));

    let activity = service.recent_activity("A001", 10)?;
    assert_eq!(activity[0].kind, TransactionKind::Withdrawal);
    assert_eq!(activity[0].memo.as_deref(), Some("groceries"));
    Ok(())
}

#[test]
fn test_transfer_nets_to_zero() -> Result<()> {
    let service = test_service()?;

    let effect = service.transfer("A001", "B002", dollars(60), None)?;
    assert_eq!(effect, Money::ZERO);
    assert_eq!(service.balance("A001")?, dollars(40));
    assert_eq!(service.balance("B002")?, dollars(60));

    // The same movement shows up in both histories under one id.
    let from_a = service.recent_activity("A001", 10)?;
    let from_b = service.recent_activity("B002", 10)?;
    assert_eq!(from_a[0].id, from_b[0].id);
    assert_eq!(from_a[0].kind, TransactionKind::Transfer);
    Ok(())
}

#[test]
fn test_failed_transfer_leaves_no_trace() -> Result<()> {
    let service = test_service()?;

    // A only has $100: the debit breaches the floor, so nothing moves.
    let err = service.transfer("A001", "B002", dollars(150), None).unwrap_err();
    assert!(err.to_string().contains("Overdraft"));

    assert_eq!(service.balance("A001")?, dollars(100));
    assert_eq!(service.balance("B002")?, Money::ZERO);
    assert!(service.recent_activity("A001", 10)?.is_empty());
    assert!(service.recent_activity("B002", 10)?.is_empty());
    Ok(())
}

#[test]
fn test_compensation_restores_source_exactly() -> Result<()> {
    // Inject a failure at the credit step: the destination balance sits close
    // enough to i64::MAX that crediting it overflows after the source debit
    // already committed. Compensation must restore the source to the cent.
    let mut service = test_service()?;
    service.open_account(
        "Eve",
        "F004",
        Money::ZERO,
        Money::from_cents(i64::MAX - 100)?,
    )?;

    let err = service.transfer("A001", "F004", dollars(50), None).unwrap_err();
    assert!(matches!(
        err,
        familybank::application::AppError::Ledger(LedgerError::Overflow(_))
    ));

    assert_eq!(service.balance("A001")?, dollars(100));
    assert_eq!(service.balance("F004")?, Money::from_cents(i64::MAX - 100)?);
    assert!(service.recent_activity("A001", 10)?.is_empty());
    assert!(service.recent_activity("F004", 10)?.is_empty());
    Ok(())
}

#[test]
fn test_total_balance_conserved_across_transfers() -> Result<()> {
    let service = test_service()?;

    service.transfer("A001", "B002", dollars(10), None)?;
    service.transfer("B002", "A001", dollars(3), None)?;
    service.transfer("A001", "B002", dollars(25), None)?;
    // This one fails; the total must not drift.
    assert!(service.transfer("B002", "A001", dollars(1000), None).is_err());

    let total: i64 = service
        .list_accounts()
        .iter()
        .map(|s| s.balance.cents())
        .sum();
    assert_eq!(total, dollars(100).cents());
    Ok(())
}

#[test]
fn test_transaction_construction_contracts() -> Result<()> {
    let service = test_service()?;
    let a = service.bank().find("A001").unwrap();
    let b = service.bank().find("B002").unwrap();

    assert!(Transaction::new(None, None, dollars(5)).is_err());
    assert!(Transaction::new(Some(a.clone()), Some(b), Money::ZERO).is_err());
    assert!(Transaction::new(Some(a.clone()), Some(a), dollars(5)).is_err());
    Ok(())
}

#[test]
fn test_forced_perform_overrides_floor() -> Result<()> {
    let service = test_service()?;
    let a = service.bank().find("A001").unwrap();
    let b = service.bank().find("B002").unwrap();

    let tx = Transaction::with_memo(
        Some("emergency".to_string()),
        Some(a.clone()),
        Some(b.clone()),
        dollars(150),
    )?;
    tx.perform(true)?;

    assert_eq!(a.borrow().current(), dollars(-50));
    assert_eq!(b.borrow().current(), dollars(150));
    Ok(())
}
