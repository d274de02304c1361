// Host-side attribute model - the flat, set-based representation the host keeps in state
//
// Nested blocks are lists of at most one element. Sets are kept either as
// ordered collections (BTreeSet) or, for sets of objects, as Vecs that are
// put in canonical order by `normalized`.
use super::visualization::{DEFAULT_EDITABLE, DEFAULT_ICON, DEFAULT_VISIBILITY};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

fn default_visibility() -> String {
    DEFAULT_VISIBILITY.to_string()
}

fn default_editable() -> String {
    DEFAULT_EDITABLE.to_string()
}

fn default_span() -> i64 {
    1
}

/// Keys of a `compare_with` presentation map the remote series carries.
pub const COMPARE_WITH_KEYS: [&str; 2] = ["name", "color"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardAttributes {
    pub title: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_visibility")]
    pub visibility: String,
    #[serde(default = "default_editable")]
    pub editable: String,
    #[serde(default)]
    pub ui_url: String,
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub owner_email: String,
    #[serde(default)]
    pub filter: Vec<FilterBlock>,
    #[serde(default)]
    pub widget: Vec<WidgetBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterBlock {
    #[serde(default)]
    pub event_types: BTreeSet<String>,
    #[serde(default)]
    pub attributes: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetBlock {
    pub visualization: String,
    #[serde(default)]
    pub widget_id: i64,
    pub account_id: i64,
    #[serde(default)]
    pub data: Vec<DataBlock>,
    #[serde(default)]
    pub presentation: Vec<PresentationBlock>,
    #[serde(default)]
    pub layout: Vec<LayoutBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nrql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_metric_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub entity_ids: BTreeSet<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<MetricBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compare_with: Vec<CompareWithBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MetricBlock {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub values: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompareWithBlock {
    pub offset_duration: String,
    /// Carries the `name` and `color` keys of the comparison series.
    pub presentation: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresentationBlock {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub threshold: Vec<ThresholdBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drilldown_dashboard_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBlock {
    pub red: f64,
    #[serde(default)]
    pub yellow: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutBlock {
    pub row: i64,
    pub column: i64,
    #[serde(default = "default_span")]
    pub width: i64,
    #[serde(default = "default_span")]
    pub height: i64,
}

impl Default for LayoutBlock {
    fn default() -> Self {
        Self {
            row: 1,
            column: 1,
            width: default_span(),
            height: default_span(),
        }
    }
}

impl DashboardAttributes {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: default_icon(),
            visibility: default_visibility(),
            editable: default_editable(),
            ui_url: String::new(),
            api_url: String::new(),
            owner_email: String::new(),
            filter: Vec::new(),
            widget: Vec::new(),
        }
    }

    /// Puts every set into canonical order so two states holding the same
    /// elements compare equal. Widgets that are the same set element collapse
    /// into one.
    pub fn normalized(mut self) -> Self {
        let mut keyed: Vec<(String, WidgetBlock)> = self
            .widget
            .into_iter()
            .map(|widget| {
                let widget = widget.normalized();
                (widget.set_key(), widget)
            })
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        keyed.dedup_by(|a, b| a.0 == b.0);

        self.widget = keyed.into_iter().map(|(_, widget)| widget).collect();
        self
    }

    /// Drops attributes the remote service computes.
    pub fn without_computed(mut self) -> Self {
        self.ui_url.clear();
        self.api_url.clear();
        self.owner_email.clear();
        for widget in &mut self.widget {
            widget.widget_id = 0;
        }
        self
    }
}

impl WidgetBlock {
    /// Canonical form of the widget: empty strings read as unset, object sets
    /// are ordered and deduplicated, and values the remote side cannot keep
    /// are reduced to what it returns.
    pub fn normalized(mut self) -> Self {
        for data in &mut self.data {
            for value in [
                &mut data.nrql,
                &mut data.source,
                &mut data.raw_metric_name,
                &mut data.facet,
                &mut data.order_by,
            ] {
                clear_empty(value);
            }

            for metric in &mut data.metrics {
                clear_empty(&mut metric.units);
                clear_empty(&mut metric.scope);
            }
            data.metrics.sort();
            data.metrics.dedup();

            for window in &mut data.compare_with {
                window.presentation = COMPARE_WITH_KEYS
                    .iter()
                    .map(|key| {
                        let value = window.presentation.get(*key).cloned().unwrap_or_default();
                        (key.to_string(), value)
                    })
                    .collect();
            }
            data.compare_with.sort();
            data.compare_with.dedup();
        }

        for presentation in &mut self.presentation {
            clear_empty(&mut presentation.notes);
            for threshold in &mut presentation.threshold {
                if threshold.yellow < 0.0 {
                    threshold.yellow = 0.0;
                }
            }
        }
        self
    }

    /// Identity of the widget inside the widget set: its canonical JSON with
    /// the computed `widget_id` cleared.
    pub fn set_key(&self) -> String {
        let mut keyed = self.clone().normalized();
        keyed.widget_id = 0;
        serde_json::to_string(&keyed).unwrap_or_default()
    }
}

fn clear_empty(value: &mut Option<String>) {
    if value.as_deref().is_some_and(str::is_empty) {
        *value = None;
    }
}
