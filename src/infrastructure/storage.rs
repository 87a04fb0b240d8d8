//! 题目存储 - 基础设施层
//!
//! 持有唯一的数据文件资源，只暴露"整体读 / 整体写"的能力
//!
//! 文件格式：
//!
//! ```text
//! { "next_id": 3, "questions": [ {...}, {...} ] }   // 当前格式
//! [ {...}, {...} ]                                   // 旧格式，next_id 按条数推断
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult, StorageError};
use crate::models::Question;

/// 从存储中读出的完整题板
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredBoard {
    pub next_id: u64,
    pub questions: Vec<Question>,
}

/// 题目存储后端
///
/// 职责：
/// - 持有底层资源（文件路径 / 无）
/// - 只做整体读写，不认识 vote / delete 等业务操作
/// - 不做加锁，单写者，后写覆盖先写
pub trait QuestionStorage: Send {
    /// 读取题板；没有任何已保存数据时返回 `Ok(None)`
    fn load(&self) -> AppResult<Option<StoredBoard>>;

    /// 整体覆盖写入
    fn save(&self, next_id: u64, questions: &[Question]) -> AppResult<()>;

    /// 是否会落盘
    fn is_persistent(&self) -> bool;

    /// 用于日志的描述
    fn describe(&self) -> String;
}

/// 内存存储：不读不写
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStorage;

impl QuestionStorage for MemoryStorage {
    fn load(&self) -> AppResult<Option<StoredBoard>> {
        Ok(None)
    }

    fn save(&self, _next_id: u64, _questions: &[Question]) -> AppResult<()> {
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        "内存存储".to_string()
    }
}

/// JSON 文件存储
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn path_str(&self) -> String {
        self.path.display().to_string()
    }
}

/// 写入时使用的文档结构
#[derive(Serialize)]
struct BoardDocument<'a> {
    next_id: u64,
    questions: &'a [Question],
}

/// 当前格式的读取结构
#[derive(Deserialize)]
struct StoredDocument {
    next_id: Option<u64>,
    #[serde(default)]
    questions: Vec<Question>,
}

impl QuestionStorage for JsonFileStorage {
    fn load(&self) -> AppResult<Option<StoredBoard>> {
        if !self.path.exists() {
            debug!("数据文件不存在，从空题板开始: {}", self.path_str());
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| AppError::file_read_failed(self.path_str(), e))?;

        let board = parse_board(&content).map_err(|e| match e {
            ParseFailure::Json(source) => AppError::json_parse_failed(self.path_str(), source),
            ParseFailure::Invalid(err) => AppError::Storage(err),
        })?;

        Ok(Some(board))
    }

    fn save(&self, next_id: u64, questions: &[Question]) -> AppResult<()> {
        let document = BoardDocument { next_id, questions };
        let bytes = serde_json::to_vec_pretty(&document)?;

        fs::write(&self.path, bytes).map_err(|e| AppError::file_write_failed(self.path_str(), e))?;

        debug!(
            "已写入 {} 个题目 (next_id={}) 到 {}",
            questions.len(),
            next_id,
            self.path_str()
        );
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!("文件存储 ({})", self.path_str())
    }
}

#[derive(Debug)]
enum ParseFailure {
    Json(serde_json::Error),
    Invalid(StorageError),
}

impl From<serde_json::Error> for ParseFailure {
    fn from(err: serde_json::Error) -> Self {
        ParseFailure::Json(err)
    }
}

/// 解析文件内容，兼容新旧两种格式
fn parse_board(content: &str) -> Result<StoredBoard, ParseFailure> {
    let value: JsonValue = serde_json::from_str(content)?;

    let (stored_next_id, questions) = match value {
        // 旧格式：只有题目数组
        JsonValue::Array(_) => {
            let questions: Vec<Question> = serde_json::from_value(value)?;
            debug!("检测到旧格式数据文件，共 {} 个题目", questions.len());
            (None, questions)
        }
        JsonValue::Object(_) => {
            let document: StoredDocument = serde_json::from_value(value)?;
            (document.next_id, document.questions)
        }
        other => {
            return Err(ParseFailure::Json(<serde_json::Error as serde::de::Error>::custom(
                format!("顶层必须是数组或对象，实际为: {}", json_kind(&other)),
            )));
        }
    };

    let mut seen = HashSet::with_capacity(questions.len());
    for question in &questions {
        if !seen.insert(question.id) {
            return Err(ParseFailure::Invalid(StorageError::DuplicateId {
                id: question.id.value(),
            }));
        }
    }

    let inferred = questions.len() as u64;
    let mut next_id = stored_next_id.unwrap_or(inferred);

    // next_id 必须大于所有已存在的ID，否则新题目会与旧题目撞号
    if let Some(max_id) = questions.iter().map(|q| q.id.value()).max() {
        if next_id <= max_id {
            let repaired = max_id
                .checked_add(1)
                .ok_or(ParseFailure::Invalid(StorageError::IdSpaceExhausted { max_id }))?;
            warn!(
                "数据文件中的 next_id={} 不大于最大题目ID {}，已调整为 {}",
                next_id, max_id, repaired
            );
            next_id = repaired;
        }
    }

    Ok(StoredBoard { next_id, questions })
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuestionId, QuestionStatus};
    use chrono::NaiveDate;

    fn record(id: u64) -> String {
        format!(
            r#"{{"id":{id},"text":"q{id}","timestamp":"2024-05-01T09:00:0{id}","status":"approved",
               "user_id":"Blue Panda","highlighted":false,"votes":{id}}}"#
        )
    }

    #[test]
    fn test_parse_legacy_array_infers_next_id() {
        let content = format!("[{},{}]", record(0), record(1));
        let board = parse_board(&content).unwrap();
        assert_eq!(board.next_id, 2);
        assert_eq!(board.questions.len(), 2);
        assert_eq!(board.questions[1].votes, 1);
    }

    #[test]
    fn test_parse_current_format_trusts_next_id() {
        let content = format!(r#"{{"next_id":9,"questions":[{}]}}"#, record(4));
        let board = parse_board(&content).unwrap();
        assert_eq!(board.next_id, 9);
        assert_eq!(board.questions[0].id, QuestionId(4));
    }

    #[test]
    fn test_parse_current_format_without_next_id() {
        let content = format!(r#"{{"questions":[{},{}]}}"#, record(0), record(1));
        let board = parse_board(&content).unwrap();
        assert_eq!(board.next_id, 2);
    }

    #[test]
    fn test_next_id_never_collides_with_existing_id() {
        // 旧格式删除过题目：两条记录但最大ID是 5
        let content = format!("[{},{}]", record(0), record(5));
        let board = parse_board(&content).unwrap();
        assert_eq!(board.next_id, 6);
    }

    #[test]
    fn test_max_id_at_limit_rejected() {
        let content = format!("[{}]", record(0)).replacen(r#""id":0"#, r#""id":18446744073709551615"#, 1);
        assert!(matches!(
            parse_board(&content),
            Err(ParseFailure::Invalid(StorageError::IdSpaceExhausted { max_id: u64::MAX }))
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let content = format!("[{},{}]", record(1), record(1));
        assert!(matches!(
            parse_board(&content),
            Err(ParseFailure::Invalid(StorageError::DuplicateId { id: 1 }))
        ));
    }

    #[test]
    fn test_scalar_top_level_rejected() {
        assert!(matches!(parse_board("42"), Err(ParseFailure::Json(_))));
        assert!(matches!(parse_board("{not json"), Err(ParseFailure::Json(_))));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("board.json"));
        assert!(storage.load().unwrap().is_none());

        let created_at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_micro_opt(9, 15, 0, 250)
            .unwrap();
        let mut q = Question::new(QuestionId(2), "hello", "Red Fox", QuestionStatus::Pending, created_at);
        q.votes = 4;
        storage.save(7, std::slice::from_ref(&q)).unwrap();

        let board = storage.load().unwrap().unwrap();
        assert_eq!(board.next_id, 7);
        assert_eq!(board.questions, vec![q]);
    }

    #[test]
    fn test_memory_storage_never_persists() {
        let storage = MemoryStorage;
        storage.save(3, &[]).unwrap();
        assert!(storage.load().unwrap().is_none());
        assert!(!storage.is_persistent());
    }
}
