use std::sync::Arc;

use jrrp_core::{
    config::Config, ports::RemoteQuoteSource, quotes::QuoteBoard, service::JrrpService,
};
use jrrp_hitokoto::HitokotoClient;
use jrrp_sqlite::SqliteQuoteStore;

#[tokio::main]
async fn main() -> Result<(), jrrp_core::Error> {
    jrrp_core::logging::init("jrrp")?;

    let cfg = Arc::new(Config::load()?);

    let store = Arc::new(SqliteQuoteStore::open(&cfg.db_path)?);
    tracing::info!(path = %cfg.db_path.display(), "quote store opened");

    let mut board = QuoteBoard::new(store);
    if cfg.hitokoto_enabled {
        let remote: Arc<dyn RemoteQuoteSource> =
            Arc::new(HitokotoClient::new(cfg.hitokoto_url.clone(), cfg.remote_timeout)?);
        board = board.with_remote(remote, cfg.remote_timeout);
    }

    let service = Arc::new(JrrpService::new(board, cfg.command_name.clone()));

    jrrp_telegram::router::run_polling(cfg, service)
        .await
        .map_err(|e| jrrp_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
