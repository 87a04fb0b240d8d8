//! 控制台渲染
//!
//! 只负责把题目和菜单拼成字符串，不读输入、不改数据

use crate::models::{Question, QuestionStatus, SortMode};

const RULE: &str = "=====================================";

/// 页头：标题 + 当前身份
pub fn header(author_label: &str, is_moderator: bool) -> String {
    let mut out = format!(
        "\n{}\n 🍡 棉花糖 - 匿名提问板\n{}\n你的身份: {}\n",
        RULE, RULE, author_label
    );
    if is_moderator {
        out.push_str("[管理模式]\n");
    }
    out
}

pub fn main_menu(is_moderator: bool) -> String {
    let mut out = String::from("菜单:\n1. 提一个问题\n2. 随机抽一个问题\n3. 查看全部问题\n");
    if is_moderator {
        out.push_str("4. 管理操作\n5. 退出管理模式\n");
    } else {
        out.push_str("4. 进入管理模式\n");
    }
    out.push_str("0. 退出\n");
    out
}

pub fn sort_menu() -> String {
    format!(
        "排序方式:\n1. {}\n2. {}\n3. {}\n0. 返回主菜单\n",
        SortMode::Newest.label(),
        SortMode::Votes.label(),
        SortMode::Random.label()
    )
}

/// 浏览列表下方的操作提示
pub fn browse_actions(is_moderator: bool) -> String {
    let mut out = String::from("操作:\nv: 给问题投票\n");
    if is_moderator {
        out.push_str("h: 隐藏 / 公开\ns: 高亮 / 取消高亮\np: 置顶\nd: 删除\n");
    }
    out.push_str("b: 返回排序选择\n");
    out
}

/// 渲染单个题目
///
/// # 参数
/// - `question`: 题目
/// - `number`: 列表中的序号（从 1 开始），抽题时不显示
/// - `show_details`: 是否显示审核状态和ID（管理模式）
pub fn question(question: &Question, number: Option<usize>, show_details: bool) -> String {
    let mut out = String::new();
    if let Some(n) = number {
        out.push_str(&format!("#{}\n", n));
    }

    let prefix = if question.highlighted { "★ " } else { "  " };
    let status = if show_details {
        match question.status {
            QuestionStatus::Pending => "[待审核] ",
            QuestionStatus::Approved => "[已通过] ",
        }
    } else {
        ""
    };

    out.push_str(&format!("{}{}\"{}\"\n", prefix, status, question.text));
    out.push_str(&format!(
        "   {} · {} · 票数: {}",
        question.author_label,
        question.created_at.format("%H:%M"),
        question.votes
    ));
    if show_details {
        out.push_str(&format!(" · ID {}", question.id));
    }
    out.push_str("\n\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionId;
    use chrono::NaiveDate;

    fn sample() -> Question {
        let created_at = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        Question::new(QuestionId(4), "能讲讲所有权吗？", "Azure Zebra", QuestionStatus::Pending, created_at)
    }

    #[test]
    fn test_question_plain() {
        let out = question(&sample(), Some(2), false);
        assert!(out.starts_with("#2\n"));
        assert!(out.contains("\"能讲讲所有权吗？\""));
        assert!(out.contains("Azure Zebra · 14:05 · 票数: 0"));
        assert!(!out.contains("待审核"));
    }

    #[test]
    fn test_question_details_and_highlight() {
        let mut q = sample();
        q.highlighted = true;
        let out = question(&q, None, true);
        assert!(out.starts_with("★ [待审核] "));
        assert!(out.contains("ID #4"));
    }

    #[test]
    fn test_menu_depends_on_mode() {
        assert!(main_menu(false).contains("进入管理模式"));
        assert!(main_menu(true).contains("退出管理模式"));
        assert!(!browse_actions(false).contains("删除"));
        assert!(browse_actions(true).contains("删除"));
    }
}
