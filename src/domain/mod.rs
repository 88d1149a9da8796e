// ==========================================
// 工单汇总工具 - 领域模型层
// ==========================================
// 职责: 定义网格、表头映射、标准记录、工单分段
// 红线: 不含文件读写逻辑，不含导出样式逻辑
// ==========================================

pub mod order;
pub mod types;

// 重导出核心类型
pub use order::{
    format_quantity, round_to, DedupKey, Grid, HeaderMap, Section, StandardRecord,
    MONEY_PRECISION, QUANTITY_PRECISION,
};
pub use types::{FallbackOrderPolicy, StandardField};
