// ==========================================
// 工单汇总工具 - 批次执行器
// ==========================================
// 职责: 逐个文件解析 → 跨文件去重 → 写入汇总工作簿 → 保存
// 取消: 每个文件开始前检查终止标志; 已处理部分照常保存
// ==========================================

use crate::app::events::{BatchEvent, BatchOutcome, EventSender, StopReason};
use crate::config::MergeConfig;
use crate::export::{plan_section, XlsxExporter};
use crate::importer::{DedupSet, OrderImporter};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, info_span, warn};
use uuid::Uuid;

pub struct BatchRunner {
    importer: OrderImporter,
    output_dir: PathBuf,
    output_prefix: String,
}

impl BatchRunner {
    pub fn new(importer: OrderImporter, output_dir: PathBuf, output_prefix: String) -> Self {
        Self {
            importer,
            output_dir,
            output_prefix,
        }
    }

    /// 按配置创建执行器
    pub fn from_config(config: &MergeConfig) -> Self {
        Self::new(
            OrderImporter::with_options(config.csv_encodings.clone(), config.scan_options()),
            config.output_dir.clone(),
            config.output_prefix.clone(),
        )
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 执行一个批次
    ///
    /// # 返回
    /// - Ok(Finished): 至少写入一个分段并已保存
    /// - Ok(Stopped): 未写入任何分段（含开始即被终止）
    /// - Err: 工作簿创建或保存失败
    pub fn run(
        &self,
        files: &[PathBuf],
        abort: &AtomicBool,
        events: Option<&EventSender>,
    ) -> anyhow::Result<BatchOutcome> {
        let batch_id = Uuid::new_v4();
        let span = info_span!("batch", batch_id = %batch_id, files = files.len());
        let _enter = span.enter();
        info!("开始合并批次");

        let mut dedup = DedupSet::new();
        let mut exporter = XlsxExporter::new()?;
        let mut processed = Vec::new();
        let mut aborted = false;

        for (idx, path) in files.iter().enumerate() {
            if abort.load(Ordering::SeqCst) {
                aborted = true;
                warn!(processed = processed.len(), "收到终止请求，停止处理后续文件");
                send(events, BatchEvent::Log {
                    message: format!("已终止，已处理 {} 个文件", processed.len()),
                });
                break;
            }

            let file_name = display_name(path);
            let sections = self.importer.parse_file_to_sections(path);
            let mut written = 0usize;
            for section in &sections {
                if let Some(block) = plan_section(section, &mut dedup) {
                    exporter.write_block(&block)?;
                    written += 1;
                }
            }
            processed.push(path.clone());

            send(events, BatchEvent::Log {
                message: format!(
                    "{}: 识别 {} 个分段，写入 {} 个",
                    file_name,
                    sections.len(),
                    written
                ),
            });
            send(events, BatchEvent::Progress {
                percent: progress_percent(idx + 1, files.len()),
                file_name,
                index: idx,
            });
        }

        if exporter.is_empty() {
            let reason = if aborted {
                StopReason::Aborted
            } else {
                StopReason::NoOutput
            };
            warn!(reason = %reason, "批次未生成输出");
            return Ok(BatchOutcome::Stopped { reason });
        }

        let output =
            exporter.save_to_dir(&self.output_dir, &self.output_prefix, Local::now().naive_local())?;
        info!(
            output = %output.display(),
            blocks = exporter.blocks_written(),
            unique_records = dedup.len(),
            "合并批次完成"
        );

        Ok(BatchOutcome::Finished {
            output,
            files: processed,
            aborted,
        })
    }
}

fn send(events: Option<&EventSender>, event: BatchEvent) {
    if let Some(tx) = events {
        // 接收端已关闭时忽略
        let _ = tx.send(event);
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// 已完成文件数 → 百分比（0~100）
pub fn progress_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done.min(total) * 100) / total) as u8
}
