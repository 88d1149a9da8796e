// ==========================================
// 工单汇总工具 - 导出编排
// ==========================================
// 职责: 分段 → 导出块; 跨文件去重; 按分段分配 1 起序号
// 规则: 去重后无明细的分段不输出
// ==========================================

use crate::domain::{Section, StandardRecord};
use crate::importer::dedup::DedupSet;
use tracing::debug;

/// 导出行: 序号 + 标准记录
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub seq: usize,
    pub record: StandardRecord,
}

/// 导出块: 一个分段的信息行与明细行
#[derive(Debug, Clone, PartialEq)]
pub struct ExportBlock {
    pub order_no: String,
    pub date: String,
    pub info: String,
    pub rows: Vec<ExportRow>,
}

/// 单个分段去重编排; 无幸存明细时返回 None
pub fn plan_section(section: &Section, dedup: &mut DedupSet) -> Option<ExportBlock> {
    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for record in &section.records {
        if !dedup.admit(section.order_no(), record) {
            skipped += 1;
            continue;
        }
        rows.push(ExportRow {
            seq: rows.len() + 1,
            record: record.clone(),
        });
    }

    if skipped > 0 {
        debug!(order_no = %section.order_no(), skipped, "跳过重复明细");
    }

    if rows.is_empty() {
        return None;
    }

    Some(ExportBlock {
        order_no: section.order_no().to_string(),
        date: section.date.clone(),
        info: section.info.clone(),
        rows,
    })
}

/// 多个分段按顺序编排
pub fn plan_blocks(sections: &[Section], dedup: &mut DedupSet) -> Vec<ExportBlock> {
    sections
        .iter()
        .filter_map(|section| plan_section(section, dedup))
        .collect()
}
