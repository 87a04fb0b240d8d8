use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult, ConfigError};
use crate::models::QuestionStatus;

/// 存储方式
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// 只在内存中，进程退出即丢失
    Memory,
    /// 每次修改后整体写入 JSON 文件
    File,
}

impl StorageMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Some(StorageMode::Memory),
            "file" => Some(StorageMode::File),
            _ => None,
        }
    }

    pub fn is_file(self) -> bool {
        self == StorageMode::File
    }
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageMode::Memory => write!(f, "内存"),
            StorageMode::File => write!(f, "文件"),
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// 存储方式
    pub storage: StorageMode,
    /// 数据文件路径（仅文件存储时使用）
    pub data_file: String,
    /// 新题目的默认状态：pending 表示先审后发，approved 表示直接公开
    pub default_status: QuestionStatus,
    /// 进入管理模式的口令
    pub admin_passphrase: String,
    /// 日志过滤规则（RUST_LOG 优先）
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageMode::Memory,
            data_file: "marshmallow_data.json".to_string(),
            default_status: QuestionStatus::Approved,
            admin_passphrase: "instructor".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// 完整加载流程：
    /// 1. `BOARD_CONFIG` 指向的 TOML 文件（可选）
    /// 2. 环境变量覆盖，值非法时报错
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var("BOARD_CONFIG") {
            Ok(path) => Self::from_toml_file(&path)?,
            Err(_) => Self::default(),
        };
        base.with_overrides(|name| std::env::var(name).ok())
    }

    /// 从 TOML 文件加载配置，缺省字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            AppError::Config(ConfigError::TomlParseFailed { source, .. }) => {
                AppError::Config(ConfigError::TomlParseFailed {
                    path: path.display().to_string(),
                    source,
                })
            }
            other => other,
        })
    }

    /// 从 TOML 文本解析配置
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| {
            AppError::Config(ConfigError::TomlParseFailed {
                path: String::new(),
                source,
            })
        })
    }

    /// 用外部变量覆盖配置
    ///
    /// # 参数
    /// - `lookup`: 按变量名取值，通常是 `std::env::var`
    pub fn with_overrides<F>(mut self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("BOARD_STORAGE") {
            self.storage = StorageMode::parse(&v)
                .ok_or_else(|| AppError::env_var_parse_failed("BOARD_STORAGE", v.clone(), "memory|file"))?;
        }
        if let Some(v) = lookup("BOARD_DATA_FILE") {
            self.data_file = v;
        }
        if let Some(v) = lookup("BOARD_DEFAULT_STATUS") {
            self.default_status = QuestionStatus::parse(&v).ok_or_else(|| {
                AppError::env_var_parse_failed("BOARD_DEFAULT_STATUS", v.clone(), "pending|approved")
            })?;
        }
        if let Some(v) = lookup("BOARD_ADMIN_PASSPHRASE") {
            self.admin_passphrase = v;
        }
        if let Some(v) = lookup("BOARD_LOG_FILTER") {
            self.log_filter = v;
        }
        Ok(self)
    }
}
