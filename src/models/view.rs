/// 排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    /// 最新优先
    #[default]
    Newest,
    /// 票数最多优先
    Votes,
    /// 每次随机打乱
    Random,
    /// 保持插入顺序
    Natural,
}

impl SortMode {
    /// 从字符串解析排序方式
    ///
    /// 无法识别的名称一律按插入顺序处理，从不报错。
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "newest" => SortMode::Newest,
            "votes" => SortMode::Votes,
            "random" => SortMode::Random,
            _ => SortMode::Natural,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Newest => "最新优先",
            SortMode::Votes => "票数优先",
            SortMode::Random => "随机顺序",
            SortMode::Natural => "提交顺序",
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 筛选条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuestionFilter {
    /// 全部题目
    #[default]
    All,
    /// 仅待审核
    Pending,
    /// 仅已通过
    Approved,
    /// 仅高亮
    Highlighted,
}

impl QuestionFilter {
    pub fn matches(self, question: &crate::models::Question) -> bool {
        match self {
            QuestionFilter::All => true,
            QuestionFilter::Pending => question.is_pending(),
            QuestionFilter::Approved => question.is_approved(),
            QuestionFilter::Highlighted => question.highlighted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_sort_mode_falls_back_to_natural() {
        assert_eq!(SortMode::parse("newest"), SortMode::Newest);
        assert_eq!(SortMode::parse("VOTES"), SortMode::Votes);
        assert_eq!(SortMode::parse("random"), SortMode::Random);
        assert_eq!(SortMode::parse("bogus"), SortMode::Natural);
        assert_eq!(SortMode::parse(""), SortMode::Natural);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(SortMode::default(), SortMode::Newest);
        assert_eq!(QuestionFilter::default(), QuestionFilter::All);
    }
}
