// ==========================================
// 工单汇总工具 - 后台批次任务
// ==========================================
// 职责: 在阻塞线程池中执行批次，通过通道上报事件
// 终止: stop() 置位共享标志，执行器在下一个文件开始前响应
// ==========================================

use crate::app::batch_runner::BatchRunner;
use crate::app::events::{BatchEvent, BatchOutcome, StopReason};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// 运行中批次的句柄
pub struct BatchHandle {
    abort: Arc<AtomicBool>,
    events: UnboundedReceiver<BatchEvent>,
    task: JoinHandle<BatchOutcome>,
}

impl BatchHandle {
    /// 请求终止
    pub fn stop(&self) {
        info!("请求终止批次");
        self.abort.store(true, Ordering::SeqCst);
    }

    pub fn is_stopping(&self) -> bool {
        self.abort.load(Ordering::SeqCst)
    }

    /// 共享终止标志，供其它任务（如 Ctrl-C 监听）置位
    pub fn abort_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort)
    }

    /// 下一个事件; 任务结束后返回 None
    pub async fn next_event(&mut self) -> Option<BatchEvent> {
        self.events.recv().await
    }

    /// 等待任务结束
    pub async fn join(self) -> BatchOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "批次任务异常结束");
                BatchOutcome::Stopped {
                    reason: StopReason::Failed(e.to_string()),
                }
            }
        }
    }
}

/// 在 tokio 阻塞线程池中启动批次（需在 tokio 运行时内调用）
pub fn spawn_batch(runner: Arc<BatchRunner>, files: Vec<PathBuf>) -> BatchHandle {
    let abort = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::unbounded_channel();
    let flag = Arc::clone(&abort);

    let task = tokio::task::spawn_blocking(move || {
        match runner.run(&files, &flag, Some(&tx)) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %format!("{:#}", e), "批次执行失败");
                let _ = tx.send(BatchEvent::Log {
                    message: format!("错误: {:#}", e),
                });
                BatchOutcome::Stopped {
                    reason: StopReason::Failed(e.to_string()),
                }
            }
        }
    });

    BatchHandle {
        abort,
        events: rx,
        task,
    }
}
