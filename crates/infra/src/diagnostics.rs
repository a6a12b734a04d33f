//! Persistence of response bodies that could not be parsed

use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;

/// Write `body` under `dir` as `response-<uuid>.txt` and return the file path.
pub async fn persist_unparsable_body(
    dir: &Path,
    route: &str,
    status: u16,
    body: &str,
) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(format!("response-{}.txt", Uuid::now_v7()));
    let contents = format!("route: {route}\nstatus: {status}\n\n{body}");
    tokio::fs::write(&path, contents).await?;
    Ok(path)
}

/// Best-effort variant used by the transport; failures are only logged.
pub(crate) async fn record(dir: Option<&Path>, route: &str, status: u16, body: &str) {
    let Some(dir) = dir else {
        return;
    };
    match persist_unparsable_body(dir, route, status, body).await {
        Ok(path) => warn!(route, status, path = %path.display(), "saved unparsable response body"),
        Err(err) => warn!(route, status, error = %err, "could not save unparsable response body"),
    }
}
