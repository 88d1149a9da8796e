// ==========================================
// 工单汇总工具 - 批次事件与结果
// ==========================================

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;

/// 批次事件发送端
pub type EventSender = UnboundedSender<BatchEvent>;

/// 批次运行中的事件
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BatchEvent {
    /// 一个文件处理完成
    Progress {
        percent: u8,
        file_name: String,
        index: usize,
    },
    /// 人可读的运行日志
    Log { message: String },
}

/// 未生成输出的原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Aborted,
    NoOutput,
    Failed(String),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Aborted => write!(f, "已终止"),
            StopReason::NoOutput => write!(f, "无可输出的工单"),
            StopReason::Failed(msg) => write!(f, "执行失败: {}", msg),
        }
    }
}

/// 批次最终结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    /// 已保存汇总工作簿; aborted 表示中途终止后保存的部分结果
    Finished {
        output: PathBuf,
        files: Vec<PathBuf>,
        aborted: bool,
    },
    Stopped { reason: StopReason },
}

impl BatchOutcome {
    pub fn output(&self) -> Option<&PathBuf> {
        match self {
            BatchOutcome::Finished { output, .. } => Some(output),
            BatchOutcome::Stopped { .. } => None,
        }
    }
}
