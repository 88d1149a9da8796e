// ==========================================
// 工单汇总工具 - 数据行投影
// ==========================================
// 职责: 数据行 + 表头映射 → 标准记录
// 规则: 数量/单价宽松转换; 金额 = 数量 × 单价，保留 2 位; 单位规范化
// ==========================================

use crate::domain::{round_to, HeaderMap, StandardField, StandardRecord, MONEY_PRECISION, QUANTITY_PRECISION};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::unit_normalizer::normalize_unit;

/// 投影结果: 标准记录 + 仅用于分段描述的询价字段
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedRow {
    pub record: StandardRecord,
    pub inquirer: String,
    pub purchasing_agent: String,
}

pub struct RowProjector {
    cleaner: DataCleaner,
}

impl RowProjector {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 读取映射列的单元格; 未映射或越界时为空串
    fn cell<'a>(&self, row: &'a [String], map: &HeaderMap, field: StandardField) -> &'a str {
        map.get(field)
            .and_then(|idx| row.get(idx))
            .map(|v| v.as_str())
            .unwrap_or("")
    }

    pub fn project(&self, row_values: &[String], header_map: &HeaderMap) -> ProjectedRow {
        let quantity = self
            .cleaner
            .parse_lenient_f64(self.cell(row_values, header_map, StandardField::Quantity));
        let unit_price = self
            .cleaner
            .parse_lenient_f64(self.cell(row_values, header_map, StandardField::UnitPrice));

        let record = StandardRecord {
            item_name: self.cell(row_values, header_map, StandardField::ItemName).to_string(),
            spec: self.cell(row_values, header_map, StandardField::Spec).to_string(),
            unit: normalize_unit(self.cell(row_values, header_map, StandardField::Unit)),
            quantity: round_to(quantity, QUANTITY_PRECISION),
            unit_price: round_to(unit_price, MONEY_PRECISION),
            amount: finite_or_zero(round_to(quantity * unit_price, MONEY_PRECISION)),
            remarks: self.cell(row_values, header_map, StandardField::Remarks).to_string(),
        };

        ProjectedRow {
            record,
            inquirer: self.cell(row_values, header_map, StandardField::Inquirer).to_string(),
            purchasing_agent: self
                .cell(row_values, header_map, StandardField::PurchasingAgent)
                .to_string(),
        }
    }
}

/// 乘积溢出时金额按 0 处理
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

impl Default for RowProjector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::header_mapper::HeaderMapper;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn seven_column_map() -> HeaderMap {
        HeaderMapper.build(&row(&["品名", "规格", "单位", "数量", "单价", "金额", "备注"]))
    }

    #[test]
    fn test_project_basic_row() {
        let projected = RowProjector::new().project(
            &row(&["螺栓", "M6x20", "个", "10", "2.50", "", "无"]),
            &seven_column_map(),
        );
        let record = projected.record;

        assert_eq!(record.item_name, "螺栓");
        assert_eq!(record.spec, "M6x20");
        assert_eq!(record.unit, "个");
        assert_eq!(record.quantity, 10.0);
        assert_eq!(record.quantity_text(), "10");
        assert_eq!(record.unit_price, 2.5);
        assert_eq!(record.amount, 25.0);
        assert_eq!(record.remarks, "无");
    }

    #[test]
    fn test_project_recomputes_amount() {
        let projected = RowProjector::new().project(
            &row(&["垫片", "", "個", "3", "1.375", "999", ""]),
            &seven_column_map(),
        );
        assert_eq!(projected.record.unit, "个");
        assert_eq!(projected.record.unit_price, 1.38);
        // 金额以未取整的单价计算: 3 × 1.375 = 4.125 → 4.12（取偶）
        assert_eq!(projected.record.amount, 4.12);
    }

    #[test]
    fn test_project_malformed_numbers_degrade_to_zero() {
        let projected = RowProjector::new().project(
            &row(&["螺母", "M8", "个", "十个", "abc", "", ""]),
            &seven_column_map(),
        );
        assert_eq!(projected.record.quantity, 0.0);
        assert_eq!(projected.record.unit_price, 0.0);
        assert_eq!(projected.record.amount, 0.0);
    }

    #[test]
    fn test_project_huge_values_stay_finite() {
        let projected = RowProjector::new().project(
            &row(&["钢锭", "", "", "1e305", "1e10", "", ""]),
            &seven_column_map(),
        );
        let record = projected.record;
        assert_eq!(record.quantity, 1e305);
        assert!(!record.quantity_text().contains("inf"));
        assert_eq!(record.unit_price, 1e10);
        // 乘积溢出
        assert_eq!(record.amount, 0.0);
    }

    #[test]
    fn test_project_short_row_skips_missing_columns() {
        let projected = RowProjector::new().project(&row(&["螺栓", "M6"]), &seven_column_map());
        assert_eq!(projected.record.item_name, "螺栓");
        assert_eq!(projected.record.quantity, 0.0);
        assert_eq!(projected.record.remarks, "");
    }

    #[test]
    fn test_project_fractional_quantity() {
        let projected = RowProjector::new().project(
            &row(&["钢板", "Q235", "公斤", "2.5", "4", "", ""]),
            &seven_column_map(),
        );
        assert_eq!(projected.record.unit, "kg");
        assert_eq!(projected.record.quantity_text(), "2.5");
        assert_eq!(projected.record.amount, 10.0);
    }

    #[test]
    fn test_project_inquiry_fields() {
        let map = HeaderMapper.build(&row(&["品名", "数量", "单价", "询价人", "代购厂商"]));
        let projected =
            RowProjector::new().project(&row(&["螺栓", "1", "1", "张三", "none"]), &map);
        assert_eq!(projected.inquirer, "张三");
        assert_eq!(projected.purchasing_agent, "none");
    }
}
