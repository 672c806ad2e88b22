//! HTTP handlers

pub mod health;
pub mod sensor;
pub mod dashboard;
pub mod profile;

use crate::AppResult;

/// Run file-backed work off the async runtime
pub(crate) async fn blocking<T, F>(work: F) -> AppResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(work).await?)
}
