// Dashboard resource - create/read/update/delete/import handlers
use crate::application::dashboard_repository::{DashboardRepository, RepositoryError};
use crate::application::expand::expand_dashboard;
use crate::application::flatten::flatten_dashboard;
use crate::application::plan::{plan, PlanResult};
use crate::application::validation::{validate_dashboard, ValidationErrors};
use crate::domain::attributes::DashboardAttributes;
use crate::domain::dashboard::Dashboard;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("invalid dashboard id {0:?}: expected an integer")]
    InvalidId(String),

    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("cannot import non-existent dashboard {0}")]
    ImportNotFound(String),
}

pub type ResourceResult<T> = Result<T, ResourceError>;

/// Identity and attributes of the managed dashboard as the host records them.
/// An absent resource has neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    pub id: Option<String>,
    pub state: Option<DashboardAttributes>,
}

impl ResourceState {
    pub fn absent() -> Self {
        Self {
            id: None,
            state: None,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Clone)]
pub struct DashboardResource {
    repository: Arc<dyn DashboardRepository>,
}

impl DashboardResource {
    pub fn new(repository: Arc<dyn DashboardRepository>) -> Self {
        Self { repository }
    }

    pub fn validate(&self, config: &DashboardAttributes) -> Result<(), ValidationErrors> {
        validate_dashboard(config)
    }

    pub fn plan(
        &self,
        prior: Option<&DashboardAttributes>,
        config: &DashboardAttributes,
    ) -> ResourceResult<PlanResult> {
        validate_dashboard(config)?;
        Ok(plan(prior, config))
    }

    pub async fn create(&self, config: &DashboardAttributes) -> ResourceResult<ResourceState> {
        validate_dashboard(config)?;
        let dashboard = expand_config(config)?;

        let created = self.repository.create_dashboard(&dashboard).await?;
        tracing::info!(id = created.id, title = %created.title, "created dashboard");

        self.read(&created.id.to_string()).await
    }

    pub async fn read(&self, id: &str) -> ResourceResult<ResourceState> {
        let dashboard_id = parse_id(id)?;

        let dashboard = match self.repository.get_dashboard(dashboard_id).await {
            Ok(dashboard) => dashboard,
            Err(RepositoryError::NotFound) => {
                tracing::warn!(id = dashboard_id, "dashboard not found, removing from state");
                return Ok(ResourceState::absent());
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(
            id = dashboard.id,
            widgets = dashboard.widgets.len(),
            updated_at = ?dashboard.updated_at,
            "read dashboard"
        );

        let id = if dashboard.id > 0 {
            dashboard.id
        } else {
            dashboard_id
        };

        Ok(ResourceState {
            id: Some(id.to_string()),
            state: Some(flatten_dashboard(&dashboard)),
        })
    }

    pub async fn update(
        &self,
        id: &str,
        config: &DashboardAttributes,
    ) -> ResourceResult<ResourceState> {
        validate_dashboard(config)?;
        let mut dashboard = expand_config(config)?;
        dashboard.id = parse_id(id)?;

        self.repository.update_dashboard(&dashboard).await?;
        tracing::info!(id = dashboard.id, "updated dashboard");

        self.read(id).await
    }

    pub async fn delete(&self, id: &str) -> ResourceResult<()> {
        let dashboard_id = parse_id(id)?;
        self.repository.delete_dashboard(dashboard_id).await?;
        tracing::info!(id = dashboard_id, "deleted dashboard");
        Ok(())
    }

    /// Adopts an existing dashboard: the id is taken as given and the state
    /// is filled by a read.
    pub async fn import(&self, id: &str) -> ResourceResult<ResourceState> {
        let state = self.read(id).await?;
        if state.is_absent() {
            return Err(ResourceError::ImportNotFound(id.to_string()));
        }
        Ok(state)
    }
}

/// Duplicate widgets in the config are one set element and are sent once.
fn expand_config(config: &DashboardAttributes) -> ResourceResult<Dashboard> {
    let normalized = config.clone().normalized();
    expand_dashboard(&normalized).map_err(|e| ResourceError::Validation(e.into()))
}

fn parse_id(id: &str) -> ResourceResult<i64> {
    id.trim()
        .parse::<i64>()
        .map_err(|_| ResourceError::InvalidId(id.to_string()))
}
