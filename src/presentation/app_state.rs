// Application state for plugin handlers
use crate::application::dashboard_resource::DashboardResource;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_resource: DashboardResource,
}
