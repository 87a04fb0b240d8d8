//! 抽题服务 - 业务能力层
//!
//! 从已通过的题目中随机抽一道，一轮之内不重复；
//! 全部抽过一遍后清空记录，开始新一轮（新一轮的第一题可能与上一题相同）。

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::models::{Question, QuestionId};
use crate::services::question_store::QuestionStore;

/// 随机抽一道题（使用线程本地随机数）
///
/// 没有任何已通过的题目时返回 `None`。
pub fn draw_one(store: &mut QuestionStore) -> Option<&Question> {
    draw_one_with(store, &mut rand::thread_rng())
}

/// 随机抽一道题
///
/// # 参数
/// - `store`: 题目仓库（会更新其中的"最近展示"集合）
/// - `rng`: 随机数来源
pub fn draw_one_with<'a, R: Rng + ?Sized>(
    store: &'a mut QuestionStore,
    rng: &mut R,
) -> Option<&'a Question> {
    let eligible: Vec<QuestionId> = store
        .questions()
        .iter()
        .filter(|q| q.is_approved())
        .map(|q| q.id)
        .collect();

    if eligible.is_empty() {
        debug!("没有已通过的题目可抽");
        return None;
    }

    let mut unseen: Vec<QuestionId> = eligible
        .iter()
        .copied()
        .filter(|id| !store.recently_shown().contains(id))
        .collect();

    if unseen.is_empty() {
        debug!("{} 道题目已全部抽过，开始新一轮", eligible.len());
        store.reset_shown();
        unseen = eligible;
    }

    let picked = *unseen.choose(rng)?;
    store.mark_shown(picked);
    debug!("抽到题目 {} (本轮剩余 {} 道)", picked, unseen.len() - 1);

    store.get(picked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionStatus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn approved_store(n: usize) -> QuestionStore {
        let mut store = QuestionStore::in_memory(QuestionStatus::Approved);
        for i in 0..n {
            store.add(&format!("Q{}", i), "Golden Tiger");
        }
        store
    }

    #[test]
    fn test_empty_store_draws_nothing() {
        let mut store = approved_store(0);
        assert!(draw_one(&mut store).is_none());
    }

    #[test]
    fn test_only_pending_draws_nothing() {
        let mut store = QuestionStore::in_memory(QuestionStatus::Pending);
        store.add("Q0", "Golden Tiger");
        store.add("Q1", "Golden Tiger");
        assert!(draw_one(&mut store).is_none());
        assert!(store.recently_shown().is_empty());
    }

    #[test]
    fn test_single_question_repeats_after_reset() {
        let mut store = approved_store(1);
        assert_eq!(draw_one(&mut store).unwrap().text, "Q0");
        assert_eq!(store.recently_shown().len(), 1);
        assert_eq!(draw_one(&mut store).unwrap().text, "Q0");
        assert_eq!(store.recently_shown().len(), 1);
    }

    #[test]
    fn test_full_cycle_without_repeats() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut store = approved_store(3);

            let mut seen = HashSet::new();
            for _ in 0..3 {
                let id = draw_one_with(&mut store, &mut rng).unwrap().id;
                assert!(seen.insert(id), "seed {} 一轮内重复抽到 {}", seed, id);
            }
            assert_eq!(seen.len(), 3);

            // 第四次：开始新一轮，任何一道都可以
            let fourth = draw_one_with(&mut store, &mut rng).unwrap().id;
            assert!(seen.contains(&fourth));
            assert_eq!(store.recently_shown().len(), 1);
        }
    }

    #[test]
    fn test_pending_questions_are_skipped() {
        let mut store = approved_store(3);
        store.set_status(QuestionId(1), QuestionStatus::Pending);

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            let id = draw_one_with(&mut store, &mut rng).unwrap().id;
            assert_ne!(id, QuestionId(1));
        }
    }

    #[test]
    fn test_deleted_question_leaves_cycle() {
        let mut store = approved_store(2);
        let first = draw_one(&mut store).unwrap().id;
        store.delete(first);
        assert!(store.recently_shown().is_empty());

        let other = draw_one(&mut store).unwrap().id;
        assert_ne!(other, first);
    }
}
