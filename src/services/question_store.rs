//! 题目仓库 - 业务能力层
//!
//! 唯一持有全部题目的地方。所有修改都必须经过这里的方法，
//! 保证有序列表、ID 索引和"最近展示"集合始终一致。
//!
//! 失败约定：未知ID、空文本一律返回 `false` / `None`，不返回错误；
//! 持久化失败只记录日志，内存中的数据仍然是准确的。

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use chrono::{Duration, Local, NaiveDateTime};
use tracing::{debug, error, info, warn};

use crate::config::{Config, StorageMode};
use crate::infrastructure::{JsonFileStorage, MemoryStorage, QuestionStorage, StoredBoard};
use crate::models::{Question, QuestionId, QuestionStatus};
use crate::utils::logging::truncate_text;

/// 题目仓库
pub struct QuestionStore {
    /// 按提交顺序排列的题目
    questions: Vec<Question>,
    /// ID -> 在 `questions` 中的位置
    index: HashMap<QuestionId, usize>,
    /// 本轮已经抽到过的题目
    recently_shown: HashSet<QuestionId>,
    next_id: u64,
    default_status: QuestionStatus,
    storage: Box<dyn QuestionStorage>,
}

impl QuestionStore {
    /// 使用指定存储后端创建仓库，并立即尝试加载已有数据
    pub fn with_storage(storage: Box<dyn QuestionStorage>, default_status: QuestionStatus) -> Self {
        let mut store = Self {
            questions: Vec::new(),
            index: HashMap::new(),
            recently_shown: HashSet::new(),
            next_id: 0,
            default_status,
            storage,
        };
        store.load_from_storage();
        store
    }

    /// 纯内存仓库，不读写任何文件
    pub fn in_memory(default_status: QuestionStatus) -> Self {
        Self::with_storage(Box::new(MemoryStorage), default_status)
    }

    /// 文件仓库，每次修改后整体写回
    pub fn file_backed(path: impl Into<PathBuf>, default_status: QuestionStatus) -> Self {
        Self::with_storage(Box::new(JsonFileStorage::new(path)), default_status)
    }

    /// 按配置创建仓库
    pub fn from_config(config: &Config) -> Self {
        match config.storage {
            StorageMode::Memory => Self::in_memory(config.default_status),
            StorageMode::File => Self::file_backed(&config.data_file, config.default_status),
        }
    }

    // ========== 查询 ==========

    /// 按ID查找题目
    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.index.get(&id).map(|&pos| &self.questions[pos])
    }

    /// 全部题目（提交顺序）
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.index.contains_key(&id)
    }

    /// 下一个将被分配的ID
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn recently_shown(&self) -> &HashSet<QuestionId> {
        &self.recently_shown
    }

    pub fn default_status(&self) -> QuestionStatus {
        self.default_status
    }

    pub fn is_persistent(&self) -> bool {
        self.storage.is_persistent()
    }

    // ========== 修改 ==========

    /// 提交新题目
    ///
    /// 去掉首尾空白后为空的文本会被拒绝（返回 `false`，不做任何修改）。
    pub fn add(&mut self, text: &str, author: &str) -> bool {
        self.add_at(text, author, Local::now().naive_local())
    }

    pub(crate) fn add_at(&mut self, text: &str, author: &str, created_at: NaiveDateTime) -> bool {
        let text = text.trim();
        if text.is_empty() {
            debug!("拒绝空白题目 (来自 {})", author);
            return false;
        }

        let Some(next_id) = self.next_id.checked_add(1) else {
            error!("❌ 题目ID已到上限 ({})，无法再提交新题目", self.next_id);
            return false;
        };
        let id = QuestionId(self.next_id);
        self.next_id = next_id;

        let question = Question::new(id, text, author, self.default_status, created_at);
        self.index.insert(id, self.questions.len());
        self.questions.push(question);

        info!(
            "✓ 新题目 {} 来自 {}: {}",
            id,
            author,
            truncate_text(text, 40)
        );
        self.persist();
        true
    }

    /// 删除题目
    pub fn delete(&mut self, id: QuestionId) -> bool {
        let Some(pos) = self.index.remove(&id) else {
            debug!("删除失败，题目 {} 不存在", id);
            return false;
        };

        self.questions.remove(pos);
        // 后面的题目整体前移一位
        for (offset, question) in self.questions[pos..].iter().enumerate() {
            self.index.insert(question.id, pos + offset);
        }
        self.recently_shown.remove(&id);

        info!("🗑️ 已删除题目 {}", id);
        self.persist();
        true
    }

    /// 清空全部题目，并把ID计数器归零
    pub fn clear_all(&mut self) {
        let removed = self.questions.len();
        self.questions.clear();
        self.index.clear();
        self.recently_shown.clear();
        self.next_id = 0;

        warn!("⚠️ 已清空全部题目 (共 {} 个)，ID 从 0 重新开始", removed);
        self.persist();
    }

    /// 投票 +1
    pub fn vote(&mut self, id: QuestionId) -> bool {
        self.update(id, "投票", |q| q.votes = q.votes.saturating_add(1))
    }

    /// 设置 / 取消高亮
    pub fn set_highlighted(&mut self, id: QuestionId, highlighted: bool) -> bool {
        self.update(id, "高亮", |q| q.highlighted = highlighted)
    }

    /// 修改审核状态
    pub fn set_status(&mut self, id: QuestionId, status: QuestionStatus) -> bool {
        self.update(id, "修改状态", |q| q.status = status)
    }

    /// 置顶
    ///
    /// 注意：这是唯一会改写 `created_at` 的操作。它把时间改成"现在 + 1 天"，
    /// 让题目在按最新排序时排到最前面，因此置顶后的时间戳不再是真实的提交时间。
    pub fn force_to_top(&mut self, id: QuestionId) -> bool {
        let pinned_at = Local::now().naive_local() + Duration::days(1);
        self.update(id, "置顶", |q| q.created_at = pinned_at)
    }

    /// 重新从存储读取（丢弃内存中的状态和本轮抽取记录）
    pub fn reload(&mut self) {
        self.load_from_storage();
    }

    // ========== 抽题记录（供抽题服务使用） ==========

    pub(crate) fn mark_shown(&mut self, id: QuestionId) {
        self.recently_shown.insert(id);
    }

    pub(crate) fn reset_shown(&mut self) {
        self.recently_shown.clear();
    }

    // ========== 内部辅助 ==========

    /// 通过索引修改单个题目
    fn update<F>(&mut self, id: QuestionId, action: &str, f: F) -> bool
    where
        F: FnOnce(&mut Question),
    {
        let Some(&pos) = self.index.get(&id) else {
            debug!("{}失败，题目 {} 不存在", action, id);
            return false;
        };

        f(&mut self.questions[pos]);
        debug!("{} 题目 {}", action, id);
        self.persist();
        true
    }

    /// 写回存储；失败只记录日志
    fn persist(&self) {
        if let Err(e) = self.storage.save(self.next_id, &self.questions) {
            error!("❌ 保存题目失败，本次会话内数据仍然有效: {}", e);
        }
    }

    fn load_from_storage(&mut self) {
        let board = match self.storage.load() {
            Ok(Some(board)) => board,
            Ok(None) => StoredBoard::default(),
            Err(e) => {
                error!(
                    "❌ 加载题目失败 ({})，从空题板开始: {}",
                    self.storage.describe(),
                    e
                );
                StoredBoard::default()
            }
        };

        self.index = board
            .questions
            .iter()
            .enumerate()
            .map(|(pos, q)| (q.id, pos))
            .collect();
        self.questions = board.questions;
        self.next_id = board.next_id;
        self.recently_shown.clear();

        debug!(
            "{}: 载入 {} 个题目，next_id={}",
            self.storage.describe(),
            self.questions.len(),
            self.next_id
        );
    }
}

impl std::fmt::Debug for QuestionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionStore")
            .field("storage", &self.storage.describe())
            .field("next_id", &self.next_id)
            .field("default_status", &self.default_status)
            .field("questions", &self.questions)
            .field("recently_shown", &self.recently_shown)
            .finish()
    }
}
