//! 日志初始化
//!
//! `RUST_LOG` 优先于配置中的 `log_filter`

use tracing_subscriber::EnvFilter;

/// 按默认过滤级别初始化日志
pub fn init() {
    init_with_filter("info");
}

/// 按指定过滤规则初始化日志，可重复调用（只有第一次生效）
pub fn init_with_filter(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // 日志写到 stderr，避免和控制台界面的输出混在一起
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
