// ==========================================
// 工单汇总工具 - 工单文件导入器
// ==========================================
// 职责: 整合导入流程，从文件到工单分段
// 流程: 加载(文本网格) → 扫描(表头/单号/数据行) → 分段
// 红线: 对输入数据问题不报错，坏文件降级为零分段
// ==========================================

use crate::domain::Section;
use crate::importer::importer_trait::SheetLoader;
use crate::importer::section_scanner::{ScanOptions, SectionScanner};
use crate::importer::sheet_loader::UniversalSheetLoader;
use std::path::Path;
use tracing::{info, instrument};

pub struct OrderImporter {
    loader: Box<dyn SheetLoader>,
    scanner: SectionScanner,
}

impl OrderImporter {
    /// 创建新的 OrderImporter 实例
    ///
    /// # 参数
    /// - loader: 表格加载器
    /// - scanner: 分段扫描器
    pub fn new(loader: Box<dyn SheetLoader>, scanner: SectionScanner) -> Self {
        Self { loader, scanner }
    }

    /// 按编码列表与扫描选项创建默认导入器
    pub fn with_options(csv_encodings: Vec<String>, options: ScanOptions) -> Self {
        Self::new(
            Box::new(UniversalSheetLoader::new(csv_encodings)),
            SectionScanner::new(options),
        )
    }

    /// 解析单个文件为工单分段
    ///
    /// # 返回
    /// - 按扫描顺序排列的非空分段; 文件无法读取时为空
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn parse_file_to_sections<P: AsRef<Path>>(&self, path: P) -> Vec<Section> {
        let grid = self.loader.load(path.as_ref());
        if grid.is_empty() {
            info!("文件为空或无法读取，跳过");
            return Vec::new();
        }

        let sections = self.scanner.scan(&grid);
        let records: usize = sections.iter().map(|s| s.records.len()).sum();
        info!(
            rows = grid.row_count(),
            sections = sections.len(),
            records = records,
            "文件解析完成"
        );
        sections
    }
}

impl Default for OrderImporter {
    fn default() -> Self {
        Self::new(
            Box::new(UniversalSheetLoader::default()),
            SectionScanner::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Grid;
    use crate::importer::error::{ImportError, ImportResult};

    struct FixedLoader(Grid);

    impl SheetLoader for FixedLoader {
        fn try_load(&self, _path: &Path) -> ImportResult<Grid> {
            Ok(self.0.clone())
        }
    }

    struct FailingLoader;

    impl SheetLoader for FailingLoader {
        fn try_load(&self, path: &Path) -> ImportResult<Grid> {
            Err(ImportError::FileReadError(path.display().to_string()))
        }
    }

    #[test]
    fn test_parse_file_with_injected_loader() {
        let grid = Grid::from_rows(vec![
            vec!["XIDP-1234567890".to_string(), String::new()],
            vec!["品名".to_string(), "数量".to_string()],
            vec!["螺栓".to_string(), "3".to_string()],
        ]);
        let importer = OrderImporter::new(Box::new(FixedLoader(grid)), SectionScanner::default());

        let sections = importer.parse_file_to_sections("any.csv");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].records[0].quantity, 3.0);
    }

    #[test]
    fn test_parse_file_load_failure_yields_no_sections() {
        let importer = OrderImporter::new(Box::new(FailingLoader), SectionScanner::default());
        assert!(importer.parse_file_to_sections("broken.xlsx").is_empty());
        assert!(OrderImporter::default()
            .parse_file_to_sections("does_not_exist.csv")
            .is_empty());
    }
}
