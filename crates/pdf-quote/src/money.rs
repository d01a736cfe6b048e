/// Currency prefix for Peruvian soles
const CURRENCY_PREFIX: &str = "S/";

/// Format an amount as soles with two decimals and comma grouping,
/// e.g. `S/ 1,234.56`. Non-finite amounts print as zero.
pub fn format_money(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round() as u64;
    let negative = amount < 0.0 && cents > 0;

    let whole = group_thousands(cents / 100);
    let sign = if negative { "-" } else { "" };
    format!("{}{} {}.{:02}", sign, CURRENCY_PREFIX, whole, cents % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "S/ 0.00");
        assert_eq!(format_money(212.4), "S/ 212.40");
        assert_eq!(format_money(1234.567), "S/ 1,234.57");
        assert_eq!(format_money(1_000_000.0), "S/ 1,000,000.00");
        assert_eq!(format_money(-45.5), "-S/ 45.50");
        assert_eq!(format_money(f64::NAN), "S/ 0.00");
        assert_eq!(format_money(-0.001), "S/ 0.00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(123456789), "123,456,789");
    }
}
