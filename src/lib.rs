//! # Marshmallow Board
//!
//! 匿名提问板：提交问题、随机抽题（一轮内不重复）、排序浏览、投票，
//! 以及管理员的审核 / 高亮 / 置顶 / 删除 / 清空。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有数据文件，只暴露整体读写能力
//! - `JsonFileStorage` / `MemoryStorage` - 文件存储与内存存储
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 以显式传入的 `QuestionStore` 为中心
//! - `QuestionStore` - 题目、ID 索引、ID 计数器、全部修改操作
//! - `draw_service` - 随机抽题，一轮内不重复
//! - `query_service` - 排序 / 筛选视图
//! - `identity_service` - 匿名身份
//!
//! ### ③ 前端（Console）
//! - `console/` - 控制台菜单，负责管理口令和可见性过滤
//!
//! ## 模块结构

pub mod config;
pub mod console;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::{Config, StorageMode};
pub use console::{ConsoleApp, ModeratorGate};
pub use error::{AppError, AppResult};
pub use infrastructure::{JsonFileStorage, MemoryStorage, QuestionStorage, StoredBoard};
pub use models::{Question, QuestionFilter, QuestionId, QuestionStatus, SortMode};
pub use services::{draw_one, filtered_view, sorted_view, sorted_view_by_name, visible_view, QuestionStore};
