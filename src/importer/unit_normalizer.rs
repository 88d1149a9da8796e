// ==========================================
// 工单汇总工具 - 单位规范化
// ==========================================
// 规则: 子串匹配（非全等），按表顺序首个命中者生效，未命中原样返回
// ==========================================

/// 单位别名表: (别名，规范写法)
pub const UNIT_ALIASES: [(&str, &str); 8] = [
    ("個", "个"),
    ("個/pcs", "个"),
    ("臺", "台"),
    ("臺/台", "台"),
    ("公斤", "kg"),
    ("千克", "kg"),
    ("g", "g"),
    ("公斤/公斤", "kg"),
];

pub fn normalize_unit(raw: &str) -> String {
    UNIT_ALIASES
        .iter()
        .find(|(alias, _)| raw.contains(alias))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| raw.to_string())
}
