//! 控制台前端
//!
//! 引擎之外的调用方：负责会话身份、管理模式口令、可见性过滤和渲染。
//! 引擎本身不做任何可见性限制。

pub mod app;
pub mod gate;
pub mod render;

pub use app::ConsoleApp;
pub use gate::ModeratorGate;
