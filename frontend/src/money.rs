use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A currency amount in Brazilian reais, kept as an exact decimal.
///
/// Deserializes from either a JSON number or a numeric string, which is how
/// `numeric` columns come back from the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    #[cfg(test)]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn times(self, quantity: u32) -> Money {
        Money(self.0 * Decimal::from(quantity))
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Parses what a user types in a price field: `1299.99`, `1299,99` or
    /// `1.299,99`.
    pub fn parse(input: &str) -> Option<Money> {
        let trimmed = input.trim().trim_start_matches("R$").trim();
        if trimmed.is_empty() {
            return None;
        }
        let normalized = if trimmed.contains(',') {
            trimmed.replace('.', "").replace(',', ".")
        } else {
            trimmed.to_string()
        };
        Decimal::from_str(&normalized).ok().map(Money)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_brl(self.0))
    }
}

fn format_with_dots(value: u128) -> String {
    let s = value.to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in s.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('.');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// `R$ 1.234,56`, rounding half away from zero to whole centavos.
pub fn format_brl(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let cents = rounded.mantissa().unsigned_abs();
    let sign = if rounded.is_sign_negative() && cents != 0 { "-" } else { "" };
    format!(
        "{}R$ {},{:02}",
        sign,
        format_with_dots(cents / 100),
        cents % 100
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_thousands_and_cents() {
        assert_eq!(Money::from_cents(123_456).to_string(), "R$ 1.234,56");
        assert_eq!(Money::from_cents(229_999).to_string(), "R$ 2.299,99");
        assert_eq!(Money::from_cents(5).to_string(), "R$ 0,05");
        assert_eq!(Money::ZERO.to_string(), "R$ 0,00");
        assert_eq!(Money::from_cents(100_000_000).to_string(), "R$ 1.000.000,00");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(Money::from_cents(-100).to_string(), "-R$ 1,00");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_brl(Decimal::new(10_005, 3)), "R$ 10,01");
        assert_eq!(format_brl(Decimal::new(10_004, 3)), "R$ 10,00");
    }

    #[test]
    fn multiplies_and_sums_exactly() {
        let price = Money::from_cents(10);
        let total: Money = std::iter::repeat(price).take(3).sum();
        assert_eq!(total, Money::from_cents(30));
        assert_eq!(price.times(3), Money::from_cents(30));
    }

    #[test]
    fn parses_user_input() {
        assert_eq!(Money::parse("1299.99"), Some(Money::from_cents(129_999)));
        assert_eq!(Money::parse("1299,99"), Some(Money::from_cents(129_999)));
        assert_eq!(Money::parse(" R$ 1.299,99 "), Some(Money::from_cents(129_999)));
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse("abc"), None);
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let from_number: Money = serde_json::from_str("2299.99").unwrap();
        let from_string: Money = serde_json::from_str("\"2299.99\"").unwrap();
        assert_eq!(from_number, Money::from_cents(229_999));
        assert_eq!(from_string, Money::from_cents(229_999));
    }
}
