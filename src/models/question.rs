use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::status::QuestionStatus;

/// 题目ID，从 0 开始递增，删除后不复用
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u64);

impl QuestionId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 匿名提问
///
/// 字段名与存储文件保持一致：`created_at` 落盘为 `timestamp`，
/// `author_label` 落盘为 `user_id`。未知字段或缺失字段在反序列化时直接报错。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(rename = "timestamp", with = "timestamp_format")]
    pub created_at: NaiveDateTime,
    pub status: QuestionStatus,
    #[serde(rename = "user_id")]
    pub author_label: String,
    pub highlighted: bool,
    pub votes: u64,
}

impl Question {
    /// 创建新题目（未高亮、零票）
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        author_label: impl Into<String>,
        status: QuestionStatus,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            created_at,
            status,
            author_label: author_label.into(),
            highlighted: false,
            votes: 0,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status.is_approved()
    }

    pub fn is_pending(&self) -> bool {
        self.status == QuestionStatus::Pending
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 截断题目内容以便显示（最多80个字符）
        let preview = crate::utils::logging::truncate_text(&self.text, 80);
        write!(
            f,
            "{} {} [{}] 票数: {}",
            self.id, preview, self.status, self.votes
        )
    }
}

/// 时间戳的存储格式：不带时区的 ISO-8601，小数秒按需输出（无损）
pub(crate) mod timestamp_format {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn encode(value: &NaiveDateTime) -> String {
        value.format(FORMAT).to_string()
    }

    /// 解析时间戳，兼容带时区偏移的 RFC 3339 写法（转换为其本地时间部分）
    pub fn decode(value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        NaiveDateTime::parse_from_str(value, FORMAT)
            .ok()
            .or_else(|| value.parse::<NaiveDateTime>().ok())
            .or_else(|| {
                DateTime::parse_from_rfc3339(value)
                    .ok()
                    .map(|dt| dt.naive_local())
            })
    }

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&encode(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        decode(&raw).ok_or_else(|| {
            serde::de::Error::custom(crate::error::StorageError::InvalidTimestamp { value: raw })
        })
    }
}
