// Dashboard domain model - remote API object graph
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// The API answers `null` for an unset filter or an empty widget list.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn is_zero_f64(value: &f64) -> bool {
    *value == 0.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub visibility: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub editable: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ui_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner_email: String,
    #[serde(default)]
    pub metadata: DashboardMetadata,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "DashboardFilter::is_empty"
    )]
    pub filter: DashboardFilter,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub widgets: Vec<DashboardWidget>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMetadata {
    #[serde(default)]
    pub version: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
}

impl DashboardFilter {
    pub fn is_empty(&self) -> bool {
        self.event_types.is_empty() && self.attributes.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardWidget {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub visualization: String,
    #[serde(rename = "widget_id", default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub account_id: i64,
    /// Always a single element; the API keeps it a list for legacy reasons.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<WidgetData>,
    #[serde(default)]
    pub presentation: WidgetPresentation,
    #[serde(default)]
    pub layout: WidgetLayout,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetData {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nrql: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub duration: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub end_time: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compare_with: Vec<CompareWith>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<WidgetMetric>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub raw_metric_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub facet: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub order_by: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub limit: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareWith {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub offset_duration: String,
    #[serde(default)]
    pub presentation: CompareWithPresentation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareWithPresentation {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetMetric {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub units: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetPresentation {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub drilldown_dashboard_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<WidgetThreshold>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetThreshold {
    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub red: f64,
    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub yellow: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetLayout {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub width: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub height: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub row: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub column: i64,
}

/// Request and response body wrapper used by every single-dashboard call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardEnvelope {
    pub dashboard: Dashboard,
}
