// ==========================================
// 工单汇总工具 - 配置层
// ==========================================
// 职责: 合并任务配置加载与校验
// 存储: JSON 文件
// ==========================================

pub mod merge_config;

// 重导出核心配置
pub use merge_config::{ConfigError, MergeConfig, OUTPUT_FILENAME_PREFIX};
