//! The `fracquiz serve` command.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use fracquiz_server::AppState;

pub async fn execute(
    addr: SocketAddr,
    seed: Option<u64>,
    session_ttl_secs: u64,
    max_sessions: usize,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let engine = super::build_engine(config_path.as_deref())?;
    let state = Arc::new(
        AppState::new(engine, seed)
            .with_session_limits(Duration::from_secs(session_ttl_secs), max_sessions),
    );
    fracquiz_server::serve(addr, state).await
}
