use anyhow::Result;
use tokio::io::BufReader;
use tracing::info;

use marshmallow_board::services::generate_author_label;
use marshmallow_board::utils::logging::{log_board_loaded, log_shutdown, log_startup};
use marshmallow_board::{logger, Config, ConsoleApp, ModeratorGate, QuestionStore};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logger::init_with_filter(&config.log_filter);

    // 本次会话的匿名身份
    let author_label = generate_author_label();
    log_startup(&config, &author_label);

    let store = QuestionStore::from_config(&config);
    log_board_loaded(store.len(), store.next_id());

    let mut app = ConsoleApp::new(
        store,
        author_label,
        ModeratorGate::new(config.admin_passphrase.clone()),
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
    );

    tokio::select! {
        result = app.run() => result?,
        _ = tokio::signal::ctrl_c() => info!("\n收到中断信号，退出"),
    }

    log_shutdown(app.store().len());
    Ok(())
}
