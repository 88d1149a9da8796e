// ==========================================
// 工单汇总工具 - 核心库
// ==========================================
// 职责: 读取询价/采购工单（Excel/CSV），识别单号分段与表头，
//       投影为标准明细，跨文件去重后汇总为一个工作簿
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 网格/表头映射/标准记录/分段
pub mod domain;

// 导入层 - 文件读取与分段识别
pub mod importer;

// 导出层 - 去重编排与工作簿写出
pub mod export;

// 配置层 - 运行配置
pub mod config;

// 应用层 - 批次编排与后台执行
pub mod app;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    FallbackOrderPolicy, Grid, HeaderMap, Section, StandardField, StandardRecord,
};

// 导入
pub use importer::{ImportError, OrderImporter, ScanOptions, SectionScanner};

// 导出
pub use export::{ExportError, XlsxExporter};

// 配置
pub use config::MergeConfig;

// 应用
pub use app::{spawn_batch, BatchEvent, BatchOutcome, BatchRunner};

// ==========================================
// 常量定义
// ==========================================

// 版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 名称
pub const APP_NAME: &str = "工单汇总工具";
