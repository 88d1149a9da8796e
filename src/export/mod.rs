// ==========================================
// 工单汇总工具 - 导出层
// ==========================================
// 职责: 工单分段 → 去重编排 → 带样式的汇总工作簿
// ==========================================

pub mod error;
pub mod plan;
pub mod xlsx_exporter;

pub use error::{ExportError, ExportResult};
pub use plan::{plan_blocks, plan_section, ExportBlock, ExportRow};
pub use xlsx_exporter::{output_file_name, XlsxExporter, EXPORT_COLUMNS, SHEET_NAME};
