use serde::{Deserialize, Serialize};

/// 题目审核状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    /// 待审核（普通用户不可见）
    Pending,
    /// 已通过（所有人可见）
    #[default]
    Approved,
}

impl QuestionStatus {
    /// 获取存储格式中使用的名称
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionStatus::Pending => "pending",
            QuestionStatus::Approved => "approved",
        }
    }

    /// 获取显示用名称
    pub fn label(self) -> &'static str {
        match self {
            QuestionStatus::Pending => "待审核",
            QuestionStatus::Approved => "已通过",
        }
    }

    /// 从字符串解析状态（忽略大小写与首尾空白）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "待审核" => Some(QuestionStatus::Pending),
            "approved" | "已通过" => Some(QuestionStatus::Approved),
            _ => None,
        }
    }

    /// 隐藏 / 显示 切换
    pub fn toggled(self) -> Self {
        match self {
            QuestionStatus::Pending => QuestionStatus::Approved,
            QuestionStatus::Approved => QuestionStatus::Pending,
        }
    }

    pub fn is_approved(self) -> bool {
        self == QuestionStatus::Approved
    }
}

impl std::fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
