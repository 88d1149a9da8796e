// ==========================================
// 工单汇总工具 - 导入 Trait
// ==========================================
// 职责: 定义表格加载接口（不包含实现）
// ==========================================

use crate::domain::Grid;
use crate::importer::error::ImportResult;
use std::path::Path;
use tracing::warn;

// ==========================================
// SheetLoader Trait
// ==========================================
// 用途: 文件 → 文本网格
// 实现者: CsvLoader, ExcelLoader, UniversalSheetLoader
pub trait SheetLoader: Send + Sync {
    /// 加载文件为文本网格，失败时返回具体原因
    ///
    /// # 参数
    /// - path: 文件路径
    ///
    /// # 返回
    /// - Ok(Grid): 矩形文本网格
    /// - Err: 文件不存在、格式不支持、解析失败、编码探测失败
    fn try_load(&self, path: &Path) -> ImportResult<Grid>;

    /// 加载文件为文本网格，任何失败均降级为空网格
    ///
    /// 单个坏文件不应中断整批处理; 调用方将空网格视为"无分段"。
    fn load(&self, path: &Path) -> Grid {
        match self.try_load(path) {
            Ok(grid) => grid,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "文件加载失败，按空表处理");
                Grid::empty()
            }
        }
    }
}
