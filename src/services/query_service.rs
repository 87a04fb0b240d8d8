//! 查询排序服务 - 业务能力层
//!
//! 只生成排好序的视图（引用列表），从不修改仓库中的题目。

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Question, QuestionFilter, SortMode};
use crate::services::question_store::QuestionStore;

/// 按指定方式排序全部题目
pub fn sorted_view(store: &QuestionStore, mode: SortMode) -> Vec<&Question> {
    sorted_view_with(store, mode, &mut rand::thread_rng())
}

/// 按名称排序，无法识别的名称返回提交顺序
pub fn sorted_view_by_name<'a>(store: &'a QuestionStore, mode: &str) -> Vec<&'a Question> {
    sorted_view(store, SortMode::parse(mode))
}

/// 按指定方式排序全部题目
///
/// # 参数
/// - `store`: 题目仓库
/// - `mode`: 排序方式
/// - `rng`: 仅 `SortMode::Random` 使用
pub fn sorted_view_with<'a, R: Rng + ?Sized>(
    store: &'a QuestionStore,
    mode: SortMode,
    rng: &mut R,
) -> Vec<&'a Question> {
    let mut view: Vec<&Question> = store.questions().iter().collect();
    order(&mut view, mode, rng);
    view
}

/// 先筛选再排序
pub fn filtered_view(store: &QuestionStore, mode: SortMode, filter: QuestionFilter) -> Vec<&Question> {
    let mut view: Vec<&Question> = store
        .questions()
        .iter()
        .filter(|q| filter.matches(q))
        .collect();
    order(&mut view, mode, &mut rand::thread_rng());
    view
}

/// 当前观看者能看到的题目：普通用户看不到待审核的题目
pub fn visible_view(store: &QuestionStore, mode: SortMode, is_moderator: bool) -> Vec<&Question> {
    let filter = if is_moderator {
        QuestionFilter::All
    } else {
        QuestionFilter::Approved
    };
    filtered_view(store, mode, filter)
}

/// 稳定排序：相同键保持提交顺序
fn order<R: Rng + ?Sized>(view: &mut [&Question], mode: SortMode, rng: &mut R) {
    match mode {
        SortMode::Newest => view.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::Votes => view.sort_by(|a, b| b.votes.cmp(&a.votes)),
        SortMode::Random => view.shuffle(rng),
        SortMode::Natural => {}
    }
}
