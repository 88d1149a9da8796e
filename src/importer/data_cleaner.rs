// ==========================================
// 工单汇总工具 - 数据清洗器实现
// ==========================================
// 职责: TRIM / 占位空值识别 / 宽松数值转换
// 红线: 清洗函数均为全函数，不返回错误
// ==========================================

/// 视为"空"的占位文本（大小写不敏感全等）
pub const EMPTY_PLACEHOLDERS: [&str; 6] = ["无", "無", "none", "null", "-", "nan"];

pub struct DataCleaner;

impl DataCleaner {
    /// 清洗文本字段（TRIM）
    pub fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    /// 清洗整行（逐格 TRIM）
    pub fn clean_row(&self, row: &[String]) -> Vec<String> {
        row.iter().map(|v| self.clean_text(v)).collect()
    }

    /// 行文本: 单元格以空格拼接，用于关键词与单号检索
    pub fn row_text(&self, row: &[String]) -> String {
        row.join(" ")
    }

    /// 占位空值归一为空串
    pub fn normalize_placeholder(&self, value: &str) -> String {
        let trimmed = value.trim();
        let lower = trimmed.to_lowercase();
        if EMPTY_PLACEHOLDERS.iter().any(|p| *p == lower) {
            String::new()
        } else {
            trimmed.to_string()
        }
    }

    /// 宽松数值转换: 去空白与千分位逗号; 空串、无法解析、非有限值一律为 0
    pub fn parse_lenient_f64(&self, value: &str) -> f64 {
        let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
        if cleaned.is_empty() {
            return 0.0;
        }
        cleaned
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}
