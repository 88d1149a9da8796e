// ==========================================
// 工单汇总工具 - 表头映射器实现
// ==========================================
// 职责: 表头行识别 + 源列 → 标准字段映射
// 规则: 字段按声明顺序依次认领列（字段优先于列顺序），每列至多认领一次
// ==========================================

use crate::domain::{Grid, HeaderMap, StandardField};
use tracing::trace;

/// 表头识别: 品名类关键词
pub const NAME_KEYWORDS: [&str; 3] = ["品名", "物料名称", "规格"];

/// 表头识别: 数量/价格类关键词
pub const QUANTITY_KEYWORDS: [&str; 2] = ["数量", "单价"];

/// 字段别名表（有序，别名均为小写）
pub const FIELD_ALIASES: [(StandardField, &[&str]); StandardField::COUNT] = [
    (
        StandardField::ItemName,
        &["品名", "物料名称", "product name", "material name"],
    ),
    (
        StandardField::Spec,
        &["规格", "图号", "物料规格", "spec", "specification", "型号"],
    ),
    (StandardField::Unit, &["单位", "unit", "uom", "采购单位"]),
    (
        StandardField::Quantity,
        &["数量", "qty", "quantity", "采购数量", "报价数量"],
    ),
    (
        StandardField::UnitPrice,
        &["单价", "price", "unit price", "报价单价"],
    ),
    (StandardField::Amount, &["金额", "total", "amount"]),
    (
        StandardField::Remarks,
        &["备注", "remarks", "本体单重", "item no. remarks", "询价说明"],
    ),
    (StandardField::Inquirer, &["询价人", "inquirer"]),
    (
        StandardField::PurchasingAgent,
        &["代购厂商", "purchasing agent", "代购"],
    ),
];

pub struct HeaderMapper;

impl HeaderMapper {
    /// 判断行文本是否为表头: 同时包含品名类与数量/价格类关键词
    pub fn detect(&self, row_text: &str) -> bool {
        NAME_KEYWORDS.iter().any(|k| row_text.contains(k))
            && QUANTITY_KEYWORDS.iter().any(|k| row_text.contains(k))
    }

    /// 判断网格中指定行是否为表头
    pub fn detect_at(&self, grid: &Grid, row_index: usize) -> bool {
        grid.row(row_index)
            .map(|row| {
                let text = row
                    .iter()
                    .map(|v| v.trim())
                    .collect::<Vec<_>>()
                    .join(" ");
                self.detect(&text)
            })
            .unwrap_or(false)
    }

    /// 由表头行构建映射
    pub fn build(&self, row_values: &[String]) -> HeaderMap {
        let lowered: Vec<String> = row_values.iter().map(|v| v.to_lowercase()).collect();
        let mut map = HeaderMap::new();

        for (field, aliases) in FIELD_ALIASES.iter() {
            let hit = lowered.iter().enumerate().find(|(col, value)| {
                !map.is_claimed(*col) && aliases.iter().any(|alias| value.contains(alias))
            });
            if let Some((col, _)) = hit {
                map.assign(*field, col);
                trace!(field = %field, column = col, "表头字段认领");
            }
        }

        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_detect_requires_both_keyword_groups() {
        let mapper = HeaderMapper;
        assert!(mapper.detect("品名 规格 数量 单价"));
        assert!(mapper.detect("物料名称 单价"));
        assert!(!mapper.detect("品名 规格 备注"));
        assert!(!mapper.detect("数量 单价 金额"));
        assert!(!mapper.detect("XIDP-A1234567890 2024-03-15"));
    }

    #[test]
    fn test_detect_at_grid_row() {
        let grid = Grid::from_rows(vec![row(&["标题"]), row(&[" 品名 ", "数量"])]);
        let mapper = HeaderMapper;
        assert!(!mapper.detect_at(&grid, 0));
        assert!(mapper.detect_at(&grid, 1));
        assert!(!mapper.detect_at(&grid, 5));
    }

    #[test]
    fn test_build_basic_chinese_header() {
        let map = HeaderMapper.build(&row(&["品名", "规格", "数量", "单价"]));
        assert_eq!(map.get(StandardField::ItemName), Some(0));
        assert_eq!(map.get(StandardField::Spec), Some(1));
        assert_eq!(map.get(StandardField::Quantity), Some(2));
        assert_eq!(map.get(StandardField::UnitPrice), Some(3));
        assert_eq!(map.get(StandardField::Unit), None);
        assert_eq!(map.get(StandardField::Amount), None);
    }

    #[test]
    fn test_build_english_case_insensitive() {
        let map = HeaderMapper.build(&row(&[
            "Material Name",
            "Specification",
            "UOM",
            "Qty",
            "Price",
            "Amount",
            "Remarks",
        ]));
        assert_eq!(map.get(StandardField::ItemName), Some(0));
        assert_eq!(map.get(StandardField::Spec), Some(1));
        assert_eq!(map.get(StandardField::Unit), Some(2));
        assert_eq!(map.get(StandardField::Quantity), Some(3));
        assert_eq!(map.get(StandardField::UnitPrice), Some(4));
        assert_eq!(map.get(StandardField::Amount), Some(5));
        assert_eq!(map.get(StandardField::Remarks), Some(6));
    }

    #[test]
    fn test_build_field_order_claims_first() {
        // "物料规格" 同时含 "规格"; 品名先认领第 0 列（物料名称），规格认领第 1 列
        let map = HeaderMapper.build(&row(&["物料名称", "物料规格", "采购数量", "报价单价"]));
        assert_eq!(map.get(StandardField::ItemName), Some(0));
        assert_eq!(map.get(StandardField::Spec), Some(1));
        assert_eq!(map.get(StandardField::Quantity), Some(2));
        assert_eq!(map.get(StandardField::UnitPrice), Some(3));
    }

    #[test]
    fn test_build_column_claimed_at_most_once() {
        // "Unit Price" 含 "unit"，被先声明的 单位 字段认领，单价 不再认领该列
        let map = HeaderMapper.build(&row(&["品名", "Unit Price", "数量"]));
        assert_eq!(map.get(StandardField::Unit), Some(1));
        assert_eq!(map.get(StandardField::UnitPrice), None);
        assert_eq!(map.get(StandardField::Quantity), Some(2));
    }

    #[test]
    fn test_build_inquirer_and_agent() {
        let map = HeaderMapper.build(&row(&["品名", "数量", "询价人", "代购厂商"]));
        assert_eq!(map.get(StandardField::Inquirer), Some(2));
        assert_eq!(map.get(StandardField::PurchasingAgent), Some(3));
    }
}
