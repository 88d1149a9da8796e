// ==========================================
// 工单汇总工具 - 领域类型定义
// ==========================================
// 职责: 标准字段枚举、兜底单号策略
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 标准字段 (Standard Field)
// ==========================================
// 声明顺序即表头映射时的认领顺序，不可随意调整
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StandardField {
    ItemName,        // 品名
    Spec,            // 规格/图号
    Unit,            // 单位
    Quantity,        // 数量
    UnitPrice,       // 单价
    Amount,          // 金额
    Remarks,         // 备注/本体单重
    Inquirer,        // 询价人
    PurchasingAgent, // 代购厂商
}

impl StandardField {
    /// 字段总数（用于定长映射表）
    pub const COUNT: usize = 9;

    /// 按认领顺序排列的全部字段
    pub const ALL: [StandardField; StandardField::COUNT] = [
        StandardField::ItemName,
        StandardField::Spec,
        StandardField::Unit,
        StandardField::Quantity,
        StandardField::UnitPrice,
        StandardField::Amount,
        StandardField::Remarks,
        StandardField::Inquirer,
        StandardField::PurchasingAgent,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// 中文字段名（即导出表头）
    pub fn label(self) -> &'static str {
        match self {
            StandardField::ItemName => "品名",
            StandardField::Spec => "规格/图号",
            StandardField::Unit => "单位",
            StandardField::Quantity => "数量",
            StandardField::UnitPrice => "单价",
            StandardField::Amount => "金额",
            StandardField::Remarks => "备注/本体单重",
            StandardField::Inquirer => "询价人",
            StandardField::PurchasingAgent => "代购厂商",
        }
    }
}

impl fmt::Display for StandardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ==========================================
// 兜底单号策略 (Fallback Order Policy)
// ==========================================
// 数据行出现在任何单号行之前时，隐式分段使用的单号来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackOrderPolicy {
    /// 当前行之前最近一次识别到的单号
    #[default]
    MostRecent,
    /// 整个文件中第一个出现的单号（预扫描）
    FirstInFile,
}

impl fmt::Display for FallbackOrderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackOrderPolicy::MostRecent => write!(f, "most_recent"),
            FallbackOrderPolicy::FirstInFile => write!(f, "first_in_file"),
        }
    }
}
