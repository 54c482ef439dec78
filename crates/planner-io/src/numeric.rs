//! 數值欄位正規化

use std::str::FromStr;

use rust_decimal::Decimal;

/// 解析數值儲存格
///
/// 接受逗號小數（`2,5`）與歐式千分位（`1.234,5`），以及科學記號。
/// 無法解析時回傳 `None`。
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim().trim_end_matches('€').trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = if trimmed.contains(',') {
        if trimmed.contains('.') {
            trimmed.replace('.', "").replace(',', ".")
        } else {
            trimmed.replace(',', ".")
        }
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

/// 庫存數量：無法解析或為負時視為 0
pub fn parse_quantity(raw: &str) -> Decimal {
    parse_decimal(raw)
        .filter(|q| *q > Decimal::ZERO)
        .unwrap_or(Decimal::ZERO)
}

/// 單位成本：無法解析時視為 0
pub fn parse_cost(raw: &str) -> Decimal {
    parse_decimal(raw).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("2.5", Some(dec!(2.5)))]
    #[case(" 2,5 ", Some(dec!(2.5)))]
    #[case("1.234,5", Some(dec!(1234.5)))]
    #[case("1e-3", Some(dec!(0.001)))]
    #[case("3,20 €", Some(dec!(3.20)))]
    #[case("", None)]
    #[case("n/d", None)]
    fn test_parse_decimal(#[case] raw: &str, #[case] expected: Option<Decimal>) {
        assert_eq!(parse_decimal(raw), expected);
    }

    #[rstest]
    #[case("4,5", dec!(4.5))]
    #[case("-2", Decimal::ZERO)]
    #[case("abc", Decimal::ZERO)]
    #[case("", Decimal::ZERO)]
    fn test_parse_quantity(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_quantity(raw), expected);
    }

    #[test]
    fn test_parse_cost_defaults_to_zero() {
        assert_eq!(parse_cost("1,20"), dec!(1.20));
        assert_eq!(parse_cost("?"), Decimal::ZERO);
    }
}
