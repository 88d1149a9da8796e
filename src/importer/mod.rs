// ==========================================
// 工单汇总工具 - 导入层
// ==========================================
// 职责: 外部表格 → 文本网格 → 工单分段
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod dedup;
pub mod error;
pub mod header_mapper;
pub mod importer_trait;
pub mod order_importer;
pub mod row_projector;
pub mod section_scanner;
pub mod sheet_loader;
pub mod unit_normalizer;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use dedup::DedupSet;
pub use error::{ImportError, ImportResult};
pub use header_mapper::HeaderMapper;
pub use order_importer::OrderImporter;
pub use row_projector::{ProjectedRow, RowProjector};
pub use section_scanner::{
    find_date, find_order_no, ScanOptions, SectionScanner, DEFAULT_SECTION_INFO,
    UNKNOWN_ORDER_NO,
};
pub use sheet_loader::{CsvLoader, ExcelLoader, UniversalSheetLoader, DEFAULT_CSV_ENCODINGS};
pub use unit_normalizer::normalize_unit;

// 重导出 Trait 接口
pub use importer_trait::SheetLoader;
