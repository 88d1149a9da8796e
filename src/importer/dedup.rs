// ==========================================
// 工单汇总工具 - 跨文件去重集合
// ==========================================
// 职责: 以 (单号，品名，规格/图号，数量文本) 识别重复明细
// 生命周期: 整个批次; 由导出阶段查询并更新
// ==========================================

use crate::domain::{DedupKey, StandardRecord};
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct DedupSet {
    seen: HashSet<DedupKey>,
}

impl DedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录键; 首次出现返回 true，重复返回 false
    pub fn insert_if_new(&mut self, key: DedupKey) -> bool {
        self.seen.insert(key)
    }

    /// 按记录检查并登记
    pub fn admit(&mut self, order_no: &str, record: &StandardRecord) -> bool {
        self.insert_if_new(DedupKey::for_record(order_no, record))
    }

    pub fn contains(&self, key: &DedupKey) -> bool {
        self.seen.contains(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
