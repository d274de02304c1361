// Repository trait for remote dashboard access
use crate::domain::dashboard::Dashboard;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The dashboard does not exist on the remote side. Callers translate
    /// this into "resource absent" instead of failing.
    #[error("dashboard not found")]
    NotFound,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound)
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn get_dashboard(&self, id: i64) -> RepositoryResult<Dashboard>;

    /// Creates the dashboard and returns it as stored, including its new id.
    async fn create_dashboard(&self, dashboard: &Dashboard) -> RepositoryResult<Dashboard>;

    /// Replaces the dashboard identified by `dashboard.id`.
    async fn update_dashboard(&self, dashboard: &Dashboard) -> RepositoryResult<Dashboard>;

    async fn delete_dashboard(&self, id: i64) -> RepositoryResult<()>;
}
