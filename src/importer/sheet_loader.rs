// ==========================================
// 工单汇总工具 - 表格加载器实现
// ==========================================
// 支持: Excel (.xlsx/.xls/.xlsm/.xlsb/.ods) / CSV (.csv)
// 规则: 全部单元格按文本读取，不做类型推断; 仅读取第一个工作表
// ==========================================

use crate::domain::Grid;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::SheetLoader;
use calamine::{open_workbook_auto, Data, DataType, Reader};
use csv::ReaderBuilder;
use encoding_rs::{Encoding, UTF_8};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// CSV 默认候选编码（按顺序尝试）
pub const DEFAULT_CSV_ENCODINGS: [&str; 4] = ["utf-8", "gbk", "gb18030", "utf-8-sig"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ==========================================
// CSV Loader 实现
// ==========================================
pub struct CsvLoader {
    encodings: Vec<String>,
}

impl CsvLoader {
    pub fn new(encodings: Vec<String>) -> Self {
        Self { encodings }
    }

    pub fn encodings(&self) -> &[String] {
        &self.encodings
    }

    /// 按指定编码严格解码后解析为网格
    fn parse_with_encoding(&self, label: &str, bytes: &[u8]) -> ImportResult<Grid> {
        let text = decode_strict(label, bytes)?.ok_or_else(|| {
            ImportError::CsvParseError(format!("内容不是合法的 {} 编码", label))
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Grid::from_rows(rows))
    }
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new(DEFAULT_CSV_ENCODINGS.iter().map(|e| e.to_string()).collect())
    }
}

impl SheetLoader for CsvLoader {
    fn try_load(&self, path: &Path) -> ImportResult<Grid> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let bytes = fs::read(path)?;

        for label in &self.encodings {
            match self.parse_with_encoding(label, &bytes) {
                Ok(grid) => {
                    info!(
                        path = %path.display(),
                        encoding = %label,
                        rows = grid.row_count(),
                        "CSV 加载完成"
                    );
                    return Ok(grid);
                }
                Err(ImportError::UnknownEncoding(name)) => {
                    warn!(encoding = %name, "无法识别的编码，跳过");
                }
                Err(e) => {
                    debug!(encoding = %label, error = %e, "编码尝试失败，继续下一个");
                }
            }
        }

        Err(ImportError::EncodingExhausted {
            tried: self.encodings.join(", "),
        })
    }
}

/// 严格解码: 出现非法字节序列时返回 None
///
/// `utf-8-sig` 不是 WHATWG 标签，单独处理; UTF-8 候选一律剥离 BOM。
pub fn decode_strict<'a>(label: &str, bytes: &'a [u8]) -> ImportResult<Option<Cow<'a, str>>> {
    let normalized = label.trim().to_ascii_lowercase();
    let encoding = match normalized.as_str() {
        "utf-8-sig" | "utf_8_sig" => UTF_8,
        other => Encoding::for_label(other.as_bytes())
            .ok_or_else(|| ImportError::UnknownEncoding(label.to_string()))?,
    };

    let body = if encoding == UTF_8 {
        bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
    } else {
        bytes
    };

    Ok(encoding.decode_without_bom_handling_and_without_replacement(body))
}

/// 校验编码标签是否可识别（供配置校验使用）
pub fn is_known_encoding(label: &str) -> bool {
    let normalized = label.trim().to_ascii_lowercase();
    matches!(normalized.as_str(), "utf-8-sig" | "utf_8_sig")
        || Encoding::for_label(normalized.as_bytes()).is_some()
}

// ==========================================
// Excel Loader 实现
// ==========================================
pub struct ExcelLoader;

impl SheetLoader for ExcelLoader {
    fn try_load(&self, path: &Path) -> ImportResult<Grid> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ImportError::NoWorksheet(path.display().to_string()))??;

        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_to_text).collect())
            .collect();

        let grid = Grid::from_rows(rows);
        info!(path = %path.display(), rows = grid.row_count(), "Excel 加载完成");
        Ok(grid)
    }
}

/// 单元格转文本: 整数值浮点不带小数点，日期按 `YYYY-MM-DD HH:MM:SS`
fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| cell.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

// ==========================================
// 通用加载器（根据扩展名自动选择）
// ==========================================
pub struct UniversalSheetLoader {
    csv: CsvLoader,
    excel: ExcelLoader,
}

impl UniversalSheetLoader {
    pub fn new(csv_encodings: Vec<String>) -> Self {
        Self {
            csv: CsvLoader::new(csv_encodings),
            excel: ExcelLoader,
        }
    }
}

impl Default for UniversalSheetLoader {
    fn default() -> Self {
        Self {
            csv: CsvLoader::default(),
            excel: ExcelLoader,
        }
    }
}

impl SheetLoader for UniversalSheetLoader {
    fn try_load(&self, path: &Path) -> ImportResult<Grid> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => self.csv.try_load(path),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => self.excel.try_load(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
