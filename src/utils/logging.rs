/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

use crate::config::Config;

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 当前生效的配置
/// - `author_label`: 本次会话分配到的匿名身份
pub fn log_startup(config: &Config, author_label: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 匿名提问板");
    info!("💾 存储方式: {}", config.storage);
    if config.storage.is_file() {
        info!("📁 数据文件: {}", config.data_file);
    }
    info!("📋 新题目默认状态: {}", config.default_status.label());
    info!("🙈 本次会话身份: {}", author_label);
    info!("{}", "=".repeat(60));
}

/// 记录题板加载信息
///
/// # 参数
/// - `total`: 题目总数
/// - `next_id`: 下一个可用ID
pub fn log_board_loaded(total: usize, next_id: u64) {
    info!("✓ 已加载 {} 个题目，下一个ID: {}", total, next_id);
}

/// 记录程序退出信息
pub fn log_shutdown(total: usize) {
    info!("\n{}", "=".repeat(60));
    info!(
        "👋 会话结束: {} (剩余题目 {} 个)",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        total
    );
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
