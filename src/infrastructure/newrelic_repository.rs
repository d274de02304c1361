// New Relic REST v2 repository implementation
use crate::application::dashboard_repository::{
    DashboardRepository, RepositoryError, RepositoryResult,
};
use crate::domain::dashboard::{Dashboard, DashboardEnvelope};
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_KEY_HEADER: &str = "X-Api-Key";

#[derive(Debug, Clone)]
pub struct NewRelicRepository {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct DashboardRequest<'a> {
    dashboard: &'a Dashboard,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    title: String,
}

impl NewRelicRepository {
    pub fn new(api_url: String, api_key: String, timeout: Duration) -> RepositoryResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn dashboard_url(&self, id: Option<i64>) -> String {
        match id {
            Some(id) => format!("{}/dashboards/{}.json", self.api_url, id),
            None => format!("{}/dashboards.json", self.api_url),
        }
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&Dashboard>,
    ) -> RepositoryResult<reqwest::Response> {
        tracing::debug!(%method, %url, "calling dashboard API");

        let mut request = self
            .client
            .request(method, url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("Accept", "application/json");

        if let Some(dashboard) = body {
            request = request.json(&DashboardRequest { dashboard });
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(RepositoryError::NotFound);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), %body, "dashboard API returned an error");
            return Err(RepositoryError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(response)
    }

    async fn execute_dashboard(
        &self,
        method: Method,
        url: &str,
        body: Option<&Dashboard>,
    ) -> RepositoryResult<Dashboard> {
        let response = self.execute(method, url, body).await?;
        let bytes = response.bytes().await?;
        let envelope: DashboardEnvelope = serde_json::from_slice(&bytes)?;
        Ok(envelope.dashboard)
    }
}

/// Prefers the API's `{"error": {"title": ...}}` message over the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.title)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl DashboardRepository for NewRelicRepository {
    async fn get_dashboard(&self, id: i64) -> RepositoryResult<Dashboard> {
        let url = self.dashboard_url(Some(id));
        self.execute_dashboard(Method::GET, &url, None).await
    }

    async fn create_dashboard(&self, dashboard: &Dashboard) -> RepositoryResult<Dashboard> {
        let url = self.dashboard_url(None);
        self.execute_dashboard(Method::POST, &url, Some(dashboard))
            .await
    }

    async fn update_dashboard(&self, dashboard: &Dashboard) -> RepositoryResult<Dashboard> {
        let url = self.dashboard_url(Some(dashboard.id));
        self.execute_dashboard(Method::PUT, &url, Some(dashboard))
            .await
    }

    async fn delete_dashboard(&self, id: i64) -> RepositoryResult<()> {
        let url = self.dashboard_url(Some(id));
        self.execute(Method::DELETE, &url, None).await?;
        Ok(())
    }
}
