// ==========================================
// 工单汇总工具 - 应用层
// ==========================================
// 职责: 批次编排（解析 → 去重 → 导出）与后台执行
// ==========================================

pub mod batch_runner;
pub mod batch_worker;
pub mod events;

// 重导出
pub use batch_runner::{progress_percent, BatchRunner};
pub use batch_worker::{spawn_batch, BatchHandle};
pub use events::{BatchEvent, BatchOutcome, EventSender, StopReason};
