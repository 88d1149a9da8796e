// ==========================================
// 工单汇总工具 - 命令行入口
// ==========================================
// 子命令:
// - merge: 合并多个文件 → 汇总工作簿
// - inspect: 打印单个文件识别出的分段（JSON）
// ==========================================

mod args;

use anyhow::Context;
use args::{Cli, Command};
use clap::Parser;
use order_merge::app::{spawn_batch, BatchEvent, BatchOutcome, BatchRunner};
use order_merge::{logging, MergeConfig, OrderImporter};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = MergeConfig::load_or_default(cli.config.as_deref())
        .context("加载配置失败")?;
    logging::init(&config.log_level);

    tracing::info!("{} v{}", order_merge::APP_NAME, order_merge::VERSION);

    match cli.command {
        Command::Merge {
            files,
            output_dir,
            fallback,
        } => {
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            if let Some(policy) = fallback {
                config.fallback_order_policy = policy.into();
            }
            run_merge(&config, files).await
        }
        Command::Inspect { file, fallback } => {
            if let Some(policy) = fallback {
                config.fallback_order_policy = policy.into();
            }
            run_inspect(&config, file)
        }
    }
}

async fn run_merge(config: &MergeConfig, files: Vec<PathBuf>) -> anyhow::Result<()> {
    let runner = Arc::new(BatchRunner::from_config(config));
    let mut handle = spawn_batch(runner, files);
    let abort = handle.abort_flag();

    loop {
        tokio::select! {
            event = handle.next_event() => match event {
                Some(BatchEvent::Progress { percent, file_name, .. }) => {
                    println!("[{:>3}%] {}", percent, file_name);
                }
                Some(BatchEvent::Log { message }) => println!("{}", message),
                None => break,
            },
            _ = tokio::signal::ctrl_c(), if !abort.load(Ordering::SeqCst) => {
                println!("正在终止，当前文件处理完后停止...");
                abort.store(true, Ordering::SeqCst);
            }
        }
    }

    match handle.join().await {
        BatchOutcome::Finished { output, files, aborted } => {
            if aborted {
                println!("已终止，已保存 {} 个文件的部分结果", files.len());
            }
            println!("输出文件: {}", output.display());
            Ok(())
        }
        BatchOutcome::Stopped { reason } => {
            println!("本批次未生成输出: {}", reason);
            Ok(())
        }
    }
}

fn run_inspect(config: &MergeConfig, file: PathBuf) -> anyhow::Result<()> {
    let importer =
        OrderImporter::with_options(config.csv_encodings.clone(), config.scan_options());
    let sections = importer.parse_file_to_sections(&file);
    let json = serde_json::to_string_pretty(&sections).context("序列化分段失败")?;
    println!("{}", json);
    Ok(())
}
