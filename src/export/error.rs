// ==========================================
// 工单汇总工具 - 导出模块错误类型
// ==========================================

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("工作簿写入失败: {0}")]
    XlsxError(#[from] XlsxError),

    #[error("输出目录不可用 ({path}): {message}")]
    OutputDirError { path: String, message: String },

    #[error("行号超出工作表上限: {0}")]
    RowOverflow(usize),
}

pub type ExportResult<T> = Result<T, ExportError>;
