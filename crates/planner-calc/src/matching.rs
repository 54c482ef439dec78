//! 產品名稱模糊比對

use planner_core::{CostCatalog, CostCatalogEntry};

/// 比對方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// 正規化後完全相同
    Exact,
    /// 產品名稱包含於目錄描述中
    NameInDescription,
    /// 目錄描述包含於產品名稱中
    DescriptionInName,
}

/// 比對結果
#[derive(Debug, Clone, Copy)]
pub struct CostMatch<'a> {
    pub entry: &'a CostCatalogEntry,
    pub kind: MatchKind,
}

/// 成本目錄索引（描述預先正規化，保留檔案順序）
pub struct CostIndex<'a> {
    entries: Vec<(String, &'a CostCatalogEntry)>,
}

impl<'a> CostIndex<'a> {
    /// 建立索引，空描述的條目不參與比對
    pub fn new(catalog: &'a CostCatalog) -> Self {
        let entries = catalog
            .entries()
            .iter()
            .map(|entry| (normalize(&entry.description), entry))
            .filter(|(key, _)| !key.is_empty())
            .collect();
        Self { entries }
    }

    /// 比對產品名稱
    ///
    /// 先找完全相同的描述；找不到時依檔案順序掃描，
    /// 接受第一個雙向子字串包含的條目（先到先得，不是最佳比對）。
    pub fn find(&self, product_name: &str) -> Option<CostMatch<'a>> {
        let name = normalize(product_name);
        if name.is_empty() {
            return None;
        }

        if let Some(&(_, entry)) = self.entries.iter().find(|(key, _)| *key == name) {
            return Some(CostMatch {
                entry,
                kind: MatchKind::Exact,
            });
        }

        self.entries.iter().find_map(|&(ref key, entry)| {
            if key.contains(name.as_str()) {
                Some(CostMatch {
                    entry,
                    kind: MatchKind::NameInDescription,
                })
            } else if name.contains(key.as_str()) {
                Some(CostMatch {
                    entry,
                    kind: MatchKind::DescriptionInName,
                })
            } else {
                None
            }
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 產品比對器
pub struct ProductMatcher;

impl ProductMatcher {
    /// 單次比對（多次比對請改用 [`CostIndex`]）
    pub fn find<'a>(product_name: &str, catalog: &'a CostCatalog) -> Option<&'a CostCatalogEntry> {
        CostIndex::new(catalog).find(product_name).map(|m| m.entry)
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn catalog(descriptions: &[&str]) -> CostCatalog {
        descriptions
            .iter()
            .enumerate()
            .map(|(i, d)| CostCatalogEntry::new(d.to_string(), Decimal::from(i as u32 + 1)))
            .collect()
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let costs = catalog(&["  latte intero "]);
        let found = ProductMatcher::find("LATTE INTERO", &costs).unwrap();
        assert_eq!(found.unit_cost, dec!(1));
    }

    #[test]
    fn test_exact_match_beats_earlier_substring() {
        // "PANE INTEGRALE" 先出現且包含 "PANE"，但完全相同的條目優先
        let costs = catalog(&["PANE INTEGRALE", "PANE"]);
        let index = CostIndex::new(&costs);

        let found = index.find("pane").unwrap();
        assert_eq!(found.kind, MatchKind::Exact);
        assert_eq!(found.entry.description, "PANE");
    }

    #[test]
    fn test_substring_both_directions() {
        let costs = catalog(&["PANE INTEGRALE"]);
        let index = CostIndex::new(&costs);

        let shorter = index.find("PANE").unwrap();
        assert_eq!(shorter.kind, MatchKind::NameInDescription);
        assert_eq!(shorter.entry.description, "PANE INTEGRALE");

        let longer = index.find("PANE INTEGRALE A FETTE").unwrap();
        assert_eq!(longer.kind, MatchKind::DescriptionInName);
        assert_eq!(longer.entry.description, "PANE INTEGRALE");
    }

    #[test]
    fn test_first_match_wins() {
        let costs = catalog(&["MARMELLATA ALBICOCCA", "MARMELLATA FRAGOLA"]);
        let found = ProductMatcher::find("Marmellata", &costs).unwrap();
        assert_eq!(found.description, "MARMELLATA ALBICOCCA");
    }

    #[test]
    fn test_unresolved_product() {
        let costs = catalog(&["CAFFE", "ZUCCHERO"]);
        assert!(ProductMatcher::find("Succo d'arancia", &costs).is_none());
    }

    #[test]
    fn test_blank_names_never_match() {
        // 空字串是任何字串的子字串，必須排除
        let costs = catalog(&["", "BURRO"]);
        let index = CostIndex::new(&costs);

        assert_eq!(index.len(), 1);
        assert!(index.find("   ").is_none());
        assert_eq!(index.find("burro").map(|m| m.kind), Some(MatchKind::Exact));
    }
}
