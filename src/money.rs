//! Currency helpers. Amounts are integer cents everywhere inside the crate;
//! decimal dollars only exist at the revenue-feed boundary.

pub const CENTS_PER_UNIT: i64 = 100;

pub fn cents_from_decimal(amount: f64) -> i64 {
  (amount * CENTS_PER_UNIT as f64).round() as i64
}

pub fn format_cents(cents: i64) -> String {
  let sign = if cents < 0 { "-" } else { "" };
  let abs = cents.unsigned_abs();
  format!("{sign}${}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_decimal_boundary() {
    assert_eq!(cents_from_decimal(50.0), 5000);
    assert_eq!(cents_from_decimal(79.98), 7998);
    assert_eq!(cents_from_decimal(0.1 + 0.2), 30);
  }

  #[test]
  fn test_format_cents() {
    assert_eq!(format_cents(150), "$1.50");
    assert_eq!(format_cents(5), "$0.05");
    assert_eq!(format_cents(-1234), "-$12.34");
  }
}
