// ==========================================
// 工单汇总工具 - 合并配置
// ==========================================
// 存储: JSON 文件（可选），缺省字段取默认值
// 覆写: 命令行参数 > 配置文件 > 默认值
// ==========================================

use crate::domain::FallbackOrderPolicy;
use crate::importer::section_scanner::{ScanOptions, UNKNOWN_ORDER_NO};
use crate::importer::sheet_loader::{is_known_encoding, DEFAULT_CSV_ENCODINGS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 输出文件名前缀
pub const OUTPUT_FILENAME_PREFIX: &str = "合并工单_";

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件解析失败 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值无效 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

/// 合并任务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeConfig {
    /// 输出目录（默认桌面）
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// 输出文件名前缀
    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,

    /// CSV 候选编码（按顺序尝试）
    #[serde(default = "default_csv_encodings")]
    pub csv_encodings: Vec<String>,

    /// 隐式分段的兜底单号策略
    #[serde(default)]
    pub fallback_order_policy: FallbackOrderPolicy,

    /// 占位单号
    #[serde(default = "default_unknown_order_no")]
    pub unknown_order_no: String,

    /// 日志级别（RUST_LOG 未设置时生效）
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_output_dir() -> PathBuf {
    dirs::desktop_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_output_prefix() -> String {
    OUTPUT_FILENAME_PREFIX.to_string()
}

fn default_csv_encodings() -> Vec<String> {
    DEFAULT_CSV_ENCODINGS.iter().map(|e| e.to_string()).collect()
}

fn default_unknown_order_no() -> String {
    UNKNOWN_ORDER_NO.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            output_prefix: default_output_prefix(),
            csv_encodings: default_csv_encodings(),
            fallback_order_policy: FallbackOrderPolicy::default(),
            unknown_order_no: default_unknown_order_no(),
            log_level: default_log_level(),
        }
    }
}

impl MergeConfig {
    /// 从 JSON 文件加载配置并校验
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: MergeConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// 有路径则加载，否则使用默认配置
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// 校验配置值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "output_prefix".to_string(),
                value: self.output_prefix.clone(),
                message: "输出文件名前缀不能为空".to_string(),
            });
        }

        if self.csv_encodings.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "csv_encodings".to_string(),
                value: "[]".to_string(),
                message: "至少需要一个候选编码".to_string(),
            });
        }

        if let Some(bad) = self.csv_encodings.iter().find(|e| !is_known_encoding(e)) {
            return Err(ConfigError::InvalidValue {
                key: "csv_encodings".to_string(),
                value: bad.clone(),
                message: "无法识别的编码".to_string(),
            });
        }

        if self.unknown_order_no.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "unknown_order_no".to_string(),
                value: self.unknown_order_no.clone(),
                message: "占位单号不能为空".to_string(),
            });
        }

        Ok(())
    }

    /// 转换为扫描选项
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            fallback_policy: self.fallback_order_policy,
            unknown_order_no: self.unknown_order_no.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = MergeConfig::default();
        assert_eq!(config.output_prefix, "合并工单_");
        assert_eq!(config.csv_encodings, vec!["utf-8", "gbk", "gb18030", "utf-8-sig"]);
        assert_eq!(config.fallback_order_policy, FallbackOrderPolicy::MostRecent);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_json_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"{{"output_dir": "/tmp/out", "fallback_order_policy": "first_in_file"}}"#
        )
        .unwrap();

        let config = MergeConfig::load(temp_file.path()).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.fallback_order_policy, FallbackOrderPolicy::FirstInFile);
        assert_eq!(config.output_prefix, OUTPUT_FILENAME_PREFIX);
        assert_eq!(config.scan_options().fallback_policy, FallbackOrderPolicy::FirstInFile);
    }

    #[test]
    fn test_load_rejects_unknown_encoding() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{"csv_encodings": ["utf-8", "klingon"]}}"#).unwrap();

        let result = MergeConfig::load(temp_file.path());

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_load_malformed_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "not json").unwrap();

        assert!(matches!(
            MergeConfig::load(temp_file.path()),
            Err(ConfigError::ParseError { .. })
        ));
        assert!(matches!(
            MergeConfig::load("no_such_config.json"),
            Err(ConfigError::ReadError { .. })
        ));
    }

    #[test]
    fn test_validate_empty_prefix() {
        let config = MergeConfig {
            output_prefix: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
