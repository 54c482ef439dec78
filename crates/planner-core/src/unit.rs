//! 計量單位

use serde::{Deserialize, Serialize};

/// 計量單位分類
///
/// 目錄中的單位代碼（`pz`、`kg`、`conf` ...）解析後的類別。
/// 原始代碼字串保留在 [`crate::ProductEntry::unit_of_measure`] 中供顯示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitOfMeasure {
    /// 件
    Piece,
    /// 公斤
    Kilogram,
    /// 公克
    Gram,
    /// 包裝
    Package,
    /// 公升
    Liter,
    /// 其他連續單位
    Other,
}

impl UnitOfMeasure {
    /// 從單位代碼解析（不分大小寫，前後空白忽略）
    pub fn parse(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "pz" | "pezzi" | "pezzo" | "pc" | "pcs" | "piece" | "pieces" => Self::Piece,
            "kg" | "kilogram" | "kilograms" => Self::Kilogram,
            "g" | "gr" | "gram" | "grams" => Self::Gram,
            "conf" | "confezione" | "pkg" | "package" | "packages" => Self::Package,
            "l" | "lt" | "liter" | "litre" | "liters" => Self::Liter,
            _ => Self::Other,
        }
    }

    /// 是否為離散/散裝單位（件、公斤、包裝）
    ///
    /// 緩衝階段對這些單位一律無條件進位，並套用最小加量規則。
    pub fn is_discrete(self) -> bool {
        matches!(self, Self::Piece | Self::Kilogram | Self::Package)
    }

    /// 淨額計算後是否四捨五入為整數（件、公斤、公克、包裝）
    pub fn orders_whole_units(self) -> bool {
        matches!(
            self,
            Self::Piece | Self::Kilogram | Self::Gram | Self::Package
        )
    }
}

impl From<&str> for UnitOfMeasure {
    fn from(code: &str) -> Self {
        Self::parse(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pz", UnitOfMeasure::Piece)]
    #[case(" KG ", UnitOfMeasure::Kilogram)]
    #[case("g", UnitOfMeasure::Gram)]
    #[case("Conf", UnitOfMeasure::Package)]
    #[case("lt", UnitOfMeasure::Liter)]
    #[case("vaschetta", UnitOfMeasure::Other)]
    #[case("", UnitOfMeasure::Other)]
    fn test_parse_unit(#[case] code: &str, #[case] expected: UnitOfMeasure) {
        assert_eq!(UnitOfMeasure::parse(code), expected);
    }

    #[test]
    fn test_unit_classes() {
        assert!(UnitOfMeasure::Piece.is_discrete());
        assert!(UnitOfMeasure::Kilogram.is_discrete());
        assert!(UnitOfMeasure::Package.is_discrete());
        assert!(!UnitOfMeasure::Gram.is_discrete());
        assert!(!UnitOfMeasure::Liter.is_discrete());

        // 公克在淨額階段取整，但緩衝階段不進位
        assert!(UnitOfMeasure::Gram.orders_whole_units());
        assert!(!UnitOfMeasure::Liter.orders_whole_units());
        assert!(!UnitOfMeasure::Other.orders_whole_units());
    }
}
