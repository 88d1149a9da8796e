use clap::{Parser, Subcommand, ValueEnum};
use order_merge::FallbackOrderPolicy;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    bin_name = "order-merge",
    about = "合并多个询价/采购工单文件为一个汇总工作簿"
)]
pub struct Cli {
    /// 配置文件（JSON）。缺省使用内置默认值
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 解析并合并文件，输出汇总工作簿
    Merge {
        /// 待合并的 Excel/CSV 文件
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// 输出目录。缺省取配置中的 output_dir
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// 未找到单号时的兜底策略
        #[arg(long, value_enum)]
        fallback: Option<FallbackArg>,
    },

    /// 解析单个文件并以 JSON 打印识别出的分段
    Inspect {
        file: PathBuf,

        /// 未找到单号时的兜底策略
        #[arg(long, value_enum)]
        fallback: Option<FallbackArg>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FallbackArg {
    MostRecent,
    FirstInFile,
}

impl From<FallbackArg> for FallbackOrderPolicy {
    fn from(value: FallbackArg) -> Self {
        match value {
            FallbackArg::MostRecent => FallbackOrderPolicy::MostRecent,
            FallbackArg::FirstInFile => FallbackOrderPolicy::FirstInFile,
        }
    }
}
