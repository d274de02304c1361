// Drift detection - compares prior state with the desired config
use crate::domain::attributes::{DashboardAttributes, WidgetBlock};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanAction {
    Create,
    Update,
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeChange {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanResult {
    pub action: PlanAction,
    pub changes: Vec<AttributeChange>,
    /// Desired state with computed values carried over from the prior state.
    pub planned_state: DashboardAttributes,
}

impl PlanResult {
    pub fn requires_update(&self) -> bool {
        self.action != PlanAction::NoOp
    }
}

pub fn plan(prior: Option<&DashboardAttributes>, config: &DashboardAttributes) -> PlanResult {
    let desired = config.clone().without_computed().normalized();

    let Some(prior) = prior else {
        return PlanResult {
            action: PlanAction::Create,
            changes: vec![AttributeChange {
                path: String::new(),
                before: None,
                after: serde_json::to_value(&desired).ok(),
            }],
            planned_state: desired,
        };
    };

    let current = prior.clone().without_computed().normalized();
    let mut changes = Vec::new();

    let before = to_object(&current);
    let after = to_object(&desired);
    for key in union_keys(&before, &after) {
        if key == "widget" {
            continue;
        }
        diff_value(&key, before.get(&key), after.get(&key), &mut changes);
    }
    diff_widget_set(&current.widget, &desired.widget, &mut changes);

    let action = if changes.is_empty() {
        PlanAction::NoOp
    } else {
        PlanAction::Update
    };

    tracing::debug!(?action, changes = changes.len(), "planned dashboard");

    PlanResult {
        action,
        changes,
        planned_state: carry_computed(prior, desired),
    }
}

/// Widgets are a set: an element either exists in both states or it is
/// removed and another one added.
fn diff_widget_set(
    before: &[WidgetBlock],
    after: &[WidgetBlock],
    out: &mut Vec<AttributeChange>,
) {
    let before_keys: Vec<String> = before.iter().map(WidgetBlock::set_key).collect();
    let after_keys: Vec<String> = after.iter().map(WidgetBlock::set_key).collect();

    for (i, widget) in before.iter().enumerate() {
        if !after_keys.contains(&before_keys[i]) {
            out.push(AttributeChange {
                path: format!("widget.#{}", i),
                before: serde_json::to_value(widget).ok(),
                after: None,
            });
        }
    }
    for (i, widget) in after.iter().enumerate() {
        if !before_keys.contains(&after_keys[i]) {
            out.push(AttributeChange {
                path: format!("widget.#{}", i),
                before: None,
                after: serde_json::to_value(widget).ok(),
            });
        }
    }
}

fn diff_value(
    path: &str,
    before: Option<&Value>,
    after: Option<&Value>,
    out: &mut Vec<AttributeChange>,
) {
    match (before, after) {
        (Some(Value::Object(b)), Some(Value::Object(a))) => {
            for key in union_keys(b, a) {
                diff_value(&format!("{}.{}", path, key), b.get(&key), a.get(&key), out);
            }
        }
        (Some(Value::Array(b)), Some(Value::Array(a))) if b.len() == a.len() => {
            for (i, (b, a)) in b.iter().zip(a).enumerate() {
                diff_value(&format!("{}.{}", path, i), Some(b), Some(a), out);
            }
        }
        (b, a) if b != a => out.push(AttributeChange {
            path: path.to_string(),
            before: b.cloned(),
            after: a.cloned(),
        }),
        _ => {}
    }
}

fn carry_computed(
    prior: &DashboardAttributes,
    mut desired: DashboardAttributes,
) -> DashboardAttributes {
    desired.ui_url = prior.ui_url.clone();
    desired.api_url = prior.api_url.clone();
    desired.owner_email = prior.owner_email.clone();

    let ids: HashMap<String, i64> = prior
        .widget
        .iter()
        .map(|w| (w.set_key(), w.widget_id))
        .collect();
    for widget in &mut desired.widget {
        widget.widget_id = ids.get(&widget.set_key()).copied().unwrap_or_default();
    }

    desired
}

fn to_object(attrs: &DashboardAttributes) -> Map<String, Value> {
    match serde_json::to_value(attrs) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn union_keys(a: &Map<String, Value>, b: &Map<String, Value>) -> Vec<String> {
    let mut keys: Vec<String> = a.keys().chain(b.keys()).cloned().collect();
    keys.sort();
    keys.dedup();
    keys
}
