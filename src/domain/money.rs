use std::fmt;

use serde::{Deserialize, Serialize};

use super::LedgerError;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// For EUR/USD, 1 unit = 100 cents, so $50.00 = 5000 cents.
pub type Cents = i64;

/// An exact, immutable currency amount.
///
/// One value is reserved: `i64::MIN` is never representable, so `negate` can
/// always produce a valid result. All arithmetic is checked and fails with
/// [`LedgerError::Overflow`] rather than wrapping. Comparison is the derived
/// signed order on cents; no floating point is ever involved past construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Money {
    cents: Cents,
}

/// Largest decimal magnitude `from_decimal` accepts: the cent range over 100.
const MAX_DECIMAL: f64 = 92_233_720_368_547_758.07;

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    /// Build from a cent count. Fails only for the reserved minimum.
    pub fn from_cents(cents: Cents) -> Result<Self, LedgerError> {
        if cents == Cents::MIN {
            return Err(LedgerError::Overflow("amount too small"));
        }
        Ok(Money { cents })
    }

    /// Build from a decimal amount of whole currency units, rounding to the
    /// nearest cent with ties away from zero (`f64::round` semantics).
    pub fn from_decimal(amount: f64) -> Result<Self, LedgerError> {
        if !amount.is_finite() || !(-MAX_DECIMAL..=MAX_DECIMAL).contains(&amount) {
            return Err(LedgerError::Overflow("amount is not in range"));
        }
        Self::from_cents((amount * 100.0).round() as Cents)
    }

    /// Parse a decimal string into Money.
    /// Example: "50.00" -> $50.00, "12.5" -> $12.50, "100" -> $100.00.
    /// More than two decimal places are truncated.
    pub fn parse(input: &str) -> Result<Self, LedgerError> {
        let invalid = || LedgerError::InvalidArgument("invalid money format".to_string());

        // A single leading minus; signs anywhere else are malformed.
        let input = input.trim();
        let (negative, input) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let digits_only = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

        let parts: Vec<&str> = input.split('.').collect();
        let (units, decimal_cents): (Cents, Cents) = match parts.len() {
            1 => {
                if !digits_only(parts[0]) {
                    return Err(invalid());
                }
                (parts[0].parse().map_err(|_| invalid())?, 0)
            }
            2 => {
                let units: Cents = if parts[0].is_empty() {
                    0
                } else if digits_only(parts[0]) {
                    parts[0].parse().map_err(|_| invalid())?
                } else {
                    return Err(invalid());
                };

                // Pad or truncate the decimal part to 2 digits.
                let decimal_str = parts[1];
                if !decimal_str.is_empty() && !digits_only(decimal_str) {
                    return Err(invalid());
                }
                let decimal_cents: Cents = match decimal_str.len() {
                    0 => 0,
                    1 => decimal_str.parse::<Cents>().map_err(|_| invalid())? * 10,
                    2 => decimal_str.parse().map_err(|_| invalid())?,
                    _ => decimal_str[..2].parse().map_err(|_| invalid())?,
                };
                (units, decimal_cents)
            }
            _ => return Err(invalid()),
        };

        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(decimal_cents))
            .ok_or(LedgerError::Overflow("amount is not in range"))?;
        Self::from_cents(if negative { -cents } else { cents })
    }

    pub fn cents(&self) -> Cents {
        self.cents
    }

    /// The arithmetic negation. Cannot fail for any constructible value since
    /// the reserved minimum is unrepresentable, but stays checked anyway.
    pub fn negate(&self) -> Result<Self, LedgerError> {
        let cents = self
            .cents
            .checked_neg()
            .ok_or(LedgerError::Overflow("negation out of range"))?;
        Self::from_cents(cents)
    }

    pub fn add(&self, other: Money) -> Result<Self, LedgerError> {
        let cents = self
            .cents
            .checked_add(other.cents)
            .ok_or(LedgerError::Overflow("overflow or underflow"))?;
        Self::from_cents(cents)
    }

    pub fn sub(&self, other: Money) -> Result<Self, LedgerError> {
        let cents = self
            .cents
            .checked_sub(other.cents)
            .ok_or(LedgerError::Overflow("overflow or underflow"))?;
        Self::from_cents(cents)
    }

    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }
}

impl TryFrom<i64> for Money {
    type Error = LedgerError;

    fn try_from(cents: i64) -> Result<Self, Self::Error> {
        Money::from_cents(cents)
    }
}

impl From<Money> for i64 {
    fn from(money: Money) -> i64 {
        money.cents
    }
}

impl fmt::Display for Money {
    /// Currency-style rendering with parenthesized negatives:
    /// 5000 -> "$50.00", -1234 -> "($12.34)".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = (self.cents / 100).abs();
        let remainder = (self.cents % 100).abs();
        if self.cents < 0 {
            write!(f, "(${}.{:02})", units, remainder)
        } else {
            write!(f, "${}.{:02}", units, remainder)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::*;

    fn money(cents: Cents) -> Money {
        Money::from_cents(cents).unwrap()
    }

    #[test]
    fn test_from_cents_rejects_reserved_minimum() {
        assert!(matches!(
            Money::from_cents(Cents::MIN),
            Err(LedgerError::Overflow(_))
        ));
        assert_eq!(money(Cents::MIN + 1).cents(), Cents::MIN + 1);
    }

    #[test]
    fn test_from_decimal_rounds_half_away_from_zero() {
        assert_eq!(Money::from_decimal(19.999).unwrap().cents(), 2000);
        assert_eq!(Money::from_decimal(0.005).unwrap().cents(), 1);
        assert_eq!(Money::from_decimal(-0.015).unwrap().cents(), -2);
        // -19.995 scales to exactly -1999.5 once the multiply rounds its
        // result, and f64::round ties away from zero.
        assert_eq!(Money::from_decimal(-19.995).unwrap().cents(), -2000);
    }

    #[test]
    fn test_from_decimal_range() {
        // The bound itself is not exactly representable as an f64, so probe
        // with a value comfortably past it.
        assert!(Money::from_decimal(1e17).is_err());
        assert!(Money::from_decimal(-1e17).is_err());
        assert!(Money::from_decimal(f64::NAN).is_err());
        assert!(Money::from_decimal(f64::INFINITY).is_err());
        assert!(Money::from_decimal(1_000_000.0).is_ok());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("50.00").unwrap().cents(), 5000);
        assert_eq!(Money::parse("50").unwrap().cents(), 5000);
        assert_eq!(Money::parse("12.34").unwrap().cents(), 1234);
        assert_eq!(Money::parse("12.5").unwrap().cents(), 1250);
        assert_eq!(Money::parse("0.01").unwrap().cents(), 1);
        assert_eq!(Money::parse(".50").unwrap().cents(), 50);
        assert_eq!(Money::parse("-50.00").unwrap().cents(), -5000);
        assert_eq!(Money::parse("100.999").unwrap().cents(), 10099); // Truncates
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("12.34.56").is_err());
        assert!(Money::parse("").is_err());
        assert!(Money::parse("-").is_err());
    }

    #[test]
    fn test_parse_rejects_stray_signs() {
        // Only one leading minus is a sign; anything beyond that is malformed,
        // not silently folded into the value.
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse("12.-3").is_err());
        assert!(Money::parse("-12.-3").is_err());
        assert!(Money::parse("+5").is_err());
        assert!(Money::parse("1-2").is_err());
    }

    #[test]
    fn test_add_sub_round_trip() {
        let a = money(123_456);
        let b = money(-789);
        assert_eq!(a.add(b).unwrap().sub(b).unwrap(), a);
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = money(Cents::MAX);
        assert!(matches!(max.add(money(1)), Err(LedgerError::Overflow(_))));

        let low = money(Cents::MIN + 1);
        assert!(matches!(low.sub(money(1)), Err(LedgerError::Overflow(_))));

        // Subtraction landing exactly on the reserved minimum is an overflow
        // too, even though i64 could hold it.
        assert!(matches!(
            money(-1).sub(money(Cents::MAX)),
            Err(LedgerError::Overflow(_))
        ));
    }

    #[test]
    fn test_negate() {
        assert_eq!(money(5000).negate().unwrap().cents(), -5000);
        assert_eq!(money(-1).negate().unwrap().cents(), 1);
        assert_eq!(Money::ZERO.negate().unwrap(), Money::ZERO);
        assert_eq!(money(Cents::MIN + 1).negate().unwrap().cents(), Cents::MAX);
    }

    #[test]
    fn test_ordering_matches_signed_cents() {
        assert_eq!(money(-1).cmp(&Money::ZERO), Ordering::Less);
        assert_eq!(money(100).cmp(&money(100)), Ordering::Equal);
        assert_eq!(money(100).cmp(&money(-200)), Ordering::Greater);
        assert!(money(-5000) < money(-1));
    }

    #[test]
    fn test_display() {
        assert_eq!(money(5000).to_string(), "$50.00");
        assert_eq!(money(1).to_string(), "$0.01");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
        assert_eq!(money(-1234).to_string(), "($12.34)");
        assert_eq!(money(-1).to_string(), "($0.01)");
    }

    #[test]
    fn test_serde_preserves_invariant() {
        let json = serde_json::to_string(&money(1234)).unwrap();
        assert_eq!(json, "1234");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cents(), 1234);

        let reserved = serde_json::from_str::<Money>(&Cents::MIN.to_string());
        assert!(reserved.is_err());
    }
}
