// ==========================================
// 工单汇总工具 - 工单领域模型
// ==========================================
// 职责: 表格网格、表头映射、标准记录、工单分段、去重键
// 用途: 导入层写入，导出层只读
// ==========================================

use crate::domain::types::StandardField;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 数量保留的小数位数
pub const QUANTITY_PRECISION: i32 = 6;

/// 单价/金额保留的小数位数
pub const MONEY_PRECISION: i32 = 2;

// ==========================================
// Grid - 文本网格
// ==========================================
// 红线: 加载后不可变; 所有单元格均为文本，缺失值为空串
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
    width: usize,
}

impl Grid {
    /// 由不规则行构建网格，短行以空串补齐到最宽行
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in rows.iter_mut() {
            row.resize(width, String::new());
        }
        Self { rows, width }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.width == 0
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn row(&self, idx: usize) -> Option<&[String]> {
        self.rows.get(idx).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

// ==========================================
// HeaderMap - 表头映射
// ==========================================
// 标准字段 → 源列下标; 每个字段至多一列，每列至多被一个字段认领
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    columns: [Option<usize>; StandardField::COUNT],
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: StandardField) -> Option<usize> {
        self.columns[field.index()]
    }

    /// 认领列; 字段已映射或列已被占用时返回 false
    pub fn assign(&mut self, field: StandardField, column: usize) -> bool {
        if self.columns[field.index()].is_some() || self.is_claimed(column) {
            return false;
        }
        self.columns[field.index()] = Some(column);
        true
    }

    pub fn is_claimed(&self, column: usize) -> bool {
        self.columns.contains(&Some(column))
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Option::is_none)
    }

    /// 按字段声明顺序遍历已映射的 (字段，列)
    pub fn iter(&self) -> impl Iterator<Item = (StandardField, usize)> + '_ {
        StandardField::ALL
            .iter()
            .filter_map(move |&field| self.get(field).map(|col| (field, col)))
    }
}

// ==========================================
// StandardRecord - 标准明细行
// ==========================================
// 金额始终由 数量 × 单价 重新计算，不采信源表金额列
// 序号在导出阶段按分段分配
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardRecord {
    pub item_name: String,  // 品名
    pub spec: String,       // 规格/图号
    pub unit: String,       // 单位（已规范化）
    pub quantity: f64,      // 数量
    pub unit_price: f64,    // 单价（2 位小数）
    pub amount: f64,        // 金额（2 位小数）
    pub remarks: String,    // 备注/本体单重
}

impl StandardRecord {
    /// 数量的文本形式: 整数值不带小数点，否则为十进制小数
    pub fn quantity_text(&self) -> String {
        format_quantity(self.quantity)
    }
}

/// 数量文本化（同时用于去重键）
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{}", quantity as i64)
    } else {
        format!("{}", quantity)
    }
}

/// 按指定小数位取整（银行家舍入，恰好一半时取偶）
///
/// 放大后溢出的极大值原样返回。
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / factor
}

// ==========================================
// Section - 工单分段
// ==========================================
// 红线: 单号在创建时确定，之后不可修改; 无明细的分段不输出
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    order_no: String,
    pub date: String,
    pub info: String,
    #[serde(skip)]
    pub header_map: Option<Arc<HeaderMap>>,
    pub records: Vec<StandardRecord>,
}

impl Section {
    pub fn new(
        order_no: impl Into<String>,
        date: impl Into<String>,
        header_map: Option<Arc<HeaderMap>>,
    ) -> Self {
        Self {
            order_no: order_no.into(),
            date: date.into(),
            info: String::new(),
            header_map,
            records: Vec::new(),
        }
    }

    pub fn order_no(&self) -> &str {
        &self.order_no
    }

    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }
}

// ==========================================
// DedupKey - 跨文件去重键
// ==========================================
// (单号，品名，规格/图号，数量文本)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub order_no: String,
    pub item_name: String,
    pub spec: String,
    pub quantity_text: String,
}

impl DedupKey {
    pub fn for_record(order_no: &str, record: &StandardRecord) -> Self {
        Self {
            order_no: order_no.to_string(),
            item_name: record.item_name.clone(),
            spec: record.spec.clone(),
            quantity_text: record.quantity_text(),
        }
    }
}
