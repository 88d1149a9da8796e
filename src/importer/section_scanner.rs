// ==========================================
// 工单汇总工具 - 工单分段扫描器
// ==========================================
// 职责: 单遍扫描网格，识别表头行与单号行，将数据行归入工单分段
// 状态: 无活动分段 / 有活动分段
// ==========================================
// 每行处理顺序:
// 1. 表头行 → 替换当前表头映射（并挂到活动分段），本行不作数据
// 2. 单号行 → 单号与活动分段不同则结束旧分段、开启新分段
// 3. 有表头映射 → 投影数据行; 无活动分段时以兜底单号开启隐式分段
// 4. 分段首条数据 → 一次性生成分段描述（代购厂商/询价人）
// ==========================================

use crate::domain::{FallbackOrderPolicy, Grid, HeaderMap, Section};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::header_mapper::HeaderMapper;
use crate::importer::row_projector::{ProjectedRow, RowProjector};
use regex::Regex;
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};

/// 未识别到任何单号时的占位单号
pub const UNKNOWN_ORDER_NO: &str = "未知单号";

/// 询价字段均为空时的分段描述
pub const DEFAULT_SECTION_INFO: &str = "工单详情";

/// 分段描述中多个值的分隔符（全角逗号）
pub const INFO_SEPARATOR: &str = "，";

/// 品名列取到这些值时视为表头残留，不作数据
pub const HEADER_LABEL_PLACEHOLDERS: [&str; 4] =
    ["品名", "物料名称", "Material Name", "物料名称(品名)"];

fn order_no_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)XIDP-[A-Z]?\d{10,12}").expect("invalid order no regex"))
}

fn date_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\d{4}[-/]\d{1,2}[-/]\d{1,2}").expect("invalid date regex"))
}

/// 在行文本中查找单号（保留原文大小写）
pub fn find_order_no(text: &str) -> Option<String> {
    order_no_regex().find(text).map(|m| m.as_str().to_string())
}

/// 在行文本中查找首个日期，未找到时为空串
pub fn find_date(text: &str) -> String {
    date_regex()
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// 扫描选项
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub fallback_policy: FallbackOrderPolicy,
    pub unknown_order_no: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            fallback_policy: FallbackOrderPolicy::default(),
            unknown_order_no: UNKNOWN_ORDER_NO.to_string(),
        }
    }
}

pub struct SectionScanner {
    options: ScanOptions,
    cleaner: DataCleaner,
    header_mapper: HeaderMapper,
    projector: RowProjector,
}

impl SectionScanner {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            cleaner: DataCleaner,
            header_mapper: HeaderMapper,
            projector: RowProjector::new(),
        }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// 扫描网格，按出现顺序返回非空分段
    ///
    /// 纯函数: 同一网格重复扫描结果一致。
    pub fn scan(&self, grid: &Grid) -> Vec<Section> {
        let mut sections = Vec::new();
        if grid.is_empty() {
            return sections;
        }

        let first_in_file = match self.options.fallback_policy {
            FallbackOrderPolicy::FirstInFile => grid
                .rows()
                .find_map(|row| find_order_no(&self.cleaner.row_text(&self.cleaner.clean_row(row)))),
            FallbackOrderPolicy::MostRecent => None,
        };

        let mut current: Option<Section> = None;
        let mut header_map: Option<Arc<HeaderMap>> = None;
        let mut last_seen_order: Option<String> = None;

        for (row_idx, raw_row) in grid.rows().enumerate() {
            let row_values = self.cleaner.clean_row(raw_row);
            let row_text = self.cleaner.row_text(&row_values);
            let found_order = find_order_no(&row_text);

            // === 1. 表头行 ===
            if self.header_mapper.detect(&row_text) {
                let map = Arc::new(self.header_mapper.build(&row_values));
                debug!(row = row_idx, "识别到表头行");
                if let Some(section) = current.as_mut() {
                    section.header_map = Some(Arc::clone(&map));
                }
                header_map = Some(map);
                if found_order.is_some() {
                    last_seen_order = found_order;
                }
                continue;
            }

            // === 2. 单号行 ===
            if let Some(order_no) = found_order {
                let is_new = current
                    .as_ref()
                    .map_or(true, |section| section.order_no() != order_no);
                if is_new {
                    if let Some(done) = current.take() {
                        Self::emit(&mut sections, done);
                    }
                    let date = find_date(&row_text);
                    debug!(row = row_idx, order_no = %order_no, date = %date, "开启新分段");
                    current = Some(Section::new(order_no.as_str(), date, header_map.clone()));
                }
                last_seen_order = Some(order_no);
            }

            // === 3. 数据行 ===
            let Some(map) = header_map.as_ref() else {
                continue;
            };
            let projected = self.projector.project(&row_values, map);
            let item_name = projected.record.item_name.as_str();
            if item_name.is_empty() || HEADER_LABEL_PLACEHOLDERS.contains(&item_name) {
                continue;
            }

            let section = current.get_or_insert_with(|| {
                let order_no = self.fallback_order_no(&first_in_file, &last_seen_order);
                debug!(row = row_idx, order_no = %order_no, "数据行先于单号出现，开启隐式分段");
                Section::new(order_no, "", Some(Arc::clone(map)))
            });

            // === 4. 分段描述（仅一次） ===
            if section.info.is_empty() {
                section.info = self.derive_info(&projected);
            }

            trace!(row = row_idx, item = %projected.record.item_name, "数据行入段");
            section.records.push(projected.record);
        }

        if let Some(done) = current {
            Self::emit(&mut sections, done);
        }

        sections
    }

    /// 结束分段: 无明细的分段直接丢弃
    fn emit(sections: &mut Vec<Section>, section: Section) {
        if section.has_records() {
            debug!(
                order_no = %section.order_no(),
                records = section.records.len(),
                "分段结束"
            );
            sections.push(section);
        } else {
            debug!(order_no = %section.order_no(), "分段无明细，丢弃");
        }
    }

    fn fallback_order_no(
        &self,
        first_in_file: &Option<String>,
        last_seen_order: &Option<String>,
    ) -> String {
        let candidate = match self.options.fallback_policy {
            FallbackOrderPolicy::MostRecent => last_seen_order,
            FallbackOrderPolicy::FirstInFile => first_in_file,
        };
        candidate
            .clone()
            .unwrap_or_else(|| self.options.unknown_order_no.clone())
    }

    /// 分段描述: 代购厂商、询价人去占位后以全角逗号拼接
    fn derive_info(&self, projected: &ProjectedRow) -> String {
        let parts: Vec<String> = [&projected.purchasing_agent, &projected.inquirer]
            .into_iter()
            .map(|v| self.cleaner.normalize_placeholder(v))
            .filter(|v| !v.is_empty())
            .collect();

        if parts.is_empty() {
            DEFAULT_SECTION_INFO.to_string()
        } else {
            parts.join(INFO_SEPARATOR)
        }
    }
}

impl Default for SectionScanner {
    fn default() -> Self {
        Self::new(ScanOptions::default())
    }
}
