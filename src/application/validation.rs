// Config validation - closed sets, integer minimums, block cardinality and
// the visualization-dependent required fields
use crate::domain::attributes::{DashboardAttributes, DataBlock, WidgetBlock};
use crate::domain::visualization::{
    RequiredField, Visualization, EDITABLE_MODES, ICONS, VISIBILITIES,
};
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

pub const MAX_WIDGETS: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{path}: {message}")]
pub struct ValidationError {
    /// Attribute path, e.g. `widget.2.layout.0.row`.
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

fn join_messages(errors: &[ValidationError]) -> String {
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    messages.join("; ")
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

/// Validates the whole dashboard config and reports every problem found.
pub fn validate_dashboard(attrs: &DashboardAttributes) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    check_one_of(&mut errors, "icon", &attrs.icon, ICONS);
    check_one_of(&mut errors, "visibility", &attrs.visibility, VISIBILITIES);
    check_one_of(&mut errors, "editable", &attrs.editable, EDITABLE_MODES);

    check_max_items(&mut errors, "filter", attrs.filter.len(), 1);
    for (i, filter) in attrs.filter.iter().enumerate() {
        if filter.event_types.is_empty() {
            errors.push(ValidationError::new(
                format!("filter.{}.event_types", i),
                "event_types is required",
            ));
        }
    }

    let distinct: BTreeSet<String> = attrs.widget.iter().map(WidgetBlock::set_key).collect();
    check_max_items(&mut errors, "widget", distinct.len(), MAX_WIDGETS);
    for (i, widget) in attrs.widget.iter().enumerate() {
        validate_widget(&mut errors, &format!("widget.{}", i), widget);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

fn validate_widget(errors: &mut Vec<ValidationError>, path: &str, widget: &WidgetBlock) {
    if widget.visualization.parse::<Visualization>().is_err() {
        errors.push(ValidationError::new(
            format!("{}.visualization", path),
            format!(
                "expected visualization to be one of {:?}, got {}",
                Visualization::names(),
                widget.visualization
            ),
        ));
    }
    check_at_least(errors, &format!("{}.account_id", path), Some(widget.account_id), 1);

    check_exactly_one(errors, &format!("{}.data", path), widget.data.len());
    for (i, data) in widget.data.iter().enumerate() {
        validate_data(errors, &format!("{}.data.{}", path, i), data);
    }

    check_exactly_one(errors, &format!("{}.presentation", path), widget.presentation.len());
    for (i, presentation) in widget.presentation.iter().enumerate() {
        let path = format!("{}.presentation.{}", path, i);
        check_max_items(errors, &format!("{}.threshold", path), presentation.threshold.len(), 1);
        check_at_least(
            errors,
            &format!("{}.drilldown_dashboard_id", path),
            presentation.drilldown_dashboard_id,
            1,
        );
    }

    check_exactly_one(errors, &format!("{}.layout", path), widget.layout.len());
    for (i, layout) in widget.layout.iter().enumerate() {
        let path = format!("{}.layout.{}", path, i);
        check_at_least(errors, &format!("{}.row", path), Some(layout.row), 1);
        check_at_least(errors, &format!("{}.column", path), Some(layout.column), 1);
        check_at_least(errors, &format!("{}.width", path), Some(layout.width), 1);
        check_at_least(errors, &format!("{}.height", path), Some(layout.height), 1);
    }

    if let Err(error) = validate_widget_data(widget) {
        errors.push(ValidationError::new(path, error.message));
    }
}

fn validate_data(errors: &mut Vec<ValidationError>, path: &str, data: &DataBlock) {
    check_at_least(errors, &format!("{}.duration", path), data.duration, 1);
    check_at_least(errors, &format!("{}.end_time", path), data.end_time, 1);
    check_at_least(errors, &format!("{}.limit", path), data.limit, 1);

    for (i, metric) in data.metrics.iter().enumerate() {
        if metric.name.is_empty() {
            errors.push(ValidationError::new(
                format!("{}.metrics.{}.name", path, i),
                "name is required",
            ));
        }
    }
    for (i, window) in data.compare_with.iter().enumerate() {
        if window.offset_duration.is_empty() {
            errors.push(ValidationError::new(
                format!("{}.compare_with.{}.offset_duration", path, i),
                "offset_duration is required",
            ));
        }
    }
}

/// Checks the fields a widget's visualization requires. Widgets with an
/// unknown visualization or a missing data block are left to the schema checks.
pub fn validate_widget_data(widget: &WidgetBlock) -> Result<(), ValidationError> {
    let Ok(visualization) = widget.visualization.parse::<Visualization>() else {
        return Ok(());
    };
    let Some(data) = widget.data.first() else {
        return Ok(());
    };

    for field in visualization.required_fields() {
        let present = match field {
            RequiredField::Nrql => is_set(&data.nrql),
            RequiredField::Source => is_set(&data.source),
            RequiredField::Metrics => !data.metrics.is_empty(),
            RequiredField::EntityIds => !data.entity_ids.is_empty(),
            RequiredField::Threshold => widget
                .presentation
                .first()
                .is_some_and(|p| !p.threshold.is_empty()),
        };

        if !present {
            return Err(ValidationError::new(
                "visualization",
                format!("{} is required for {} visualization", field.name(), visualization),
            ));
        }
    }

    Ok(())
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn check_one_of(errors: &mut Vec<ValidationError>, path: &str, value: &str, allowed: &[&str]) {
    if !allowed.contains(&value) {
        errors.push(ValidationError::new(
            path,
            format!("expected {} to be one of {:?}, got {}", path, allowed, value),
        ));
    }
}

fn check_at_least(errors: &mut Vec<ValidationError>, path: &str, value: Option<i64>, min: i64) {
    if let Some(value) = value {
        if value < min {
            let name = path.rsplit('.').next().unwrap_or(path);
            errors.push(ValidationError::new(
                path,
                format!("expected {} to be at least ({}), got {}", name, min, value),
            ));
        }
    }
}

fn check_max_items(errors: &mut Vec<ValidationError>, path: &str, len: usize, max: usize) {
    if len > max {
        errors.push(ValidationError::new(
            path,
            format!("attribute supports {} item maximum, config has {} declared", max, len),
        ));
    }
}

fn check_exactly_one(errors: &mut Vec<ValidationError>, path: &str, len: usize) {
    if len != 1 {
        let name = path.rsplit('.').next().unwrap_or(path);
        errors.push(ValidationError::new(
            path,
            format!("exactly one {} block is required, config has {}", name, len),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::attributes::{
        FilterBlock, LayoutBlock, MetricBlock, PresentationBlock, ThresholdBlock,
    };

    fn widget(visualization: &str, data: DataBlock) -> WidgetBlock {
        WidgetBlock {
            visualization: visualization.to_string(),
            widget_id: 0,
            account_id: 1,
            data: vec![data],
            presentation: vec![PresentationBlock {
                title: "Widget".to_string(),
                ..Default::default()
            }],
            layout: vec![LayoutBlock::default()],
        }
    }

    fn nrql(query: &str) -> DataBlock {
        DataBlock {
            nrql: Some(query.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_dashboard() {
        let mut attrs = DashboardAttributes::new("Ops");
        attrs.widget.push(widget(
            "faceted_line_chart",
            nrql("SELECT average(duration) FROM Transaction FACET appName TIMESERIES auto"),
        ));
        attrs.filter.push(FilterBlock {
            event_types: BTreeSet::from(["Transaction".to_string()]),
            attributes: BTreeSet::new(),
        });

        assert_eq!(validate_dashboard(&attrs), Ok(()));
    }

    #[test]
    fn test_nrql_required_for_query_visualizations() {
        for v in Visualization::ALL {
            if !v.required_fields().contains(&RequiredField::Nrql) {
                continue;
            }
            let err = validate_widget_data(&widget(v.as_str(), DataBlock::default())).unwrap_err();
            assert_eq!(err.message, format!("nrql is required for {} visualization", v));
        }
    }

    #[test]
    fn test_billboard_requires_threshold() {
        let mut w = widget("billboard", nrql("SELECT count(*) FROM Transaction"));
        let err = validate_widget_data(&w).unwrap_err();
        assert_eq!(err.message, "threshold is required for billboard visualization");

        w.presentation[0].threshold.push(ThresholdBlock {
            red: 10.0,
            yellow: 5.0,
        });
        assert_eq!(validate_widget_data(&w), Ok(()));
    }

    #[test]
    fn test_markdown_requires_source() {
        let err = validate_widget_data(&widget("markdown", nrql("ignored"))).unwrap_err();
        assert_eq!(err.message, "source is required for markdown visualization");

        let empty = DataBlock {
            source: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_widget_data(&widget("markdown", empty)).is_err());
    }

    #[test]
    fn test_metric_line_chart_requires_metrics_then_entity_ids() {
        let err =
            validate_widget_data(&widget("metric_line_chart", DataBlock::default())).unwrap_err();
        assert_eq!(err.message, "metrics is required for metric_line_chart visualization");

        let data = DataBlock {
            metrics: vec![MetricBlock {
                name: "Apdex".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let err = validate_widget_data(&widget("metric_line_chart", data.clone())).unwrap_err();
        assert_eq!(err.message, "entity_ids is required for metric_line_chart visualization");

        let data = DataBlock {
            entity_ids: BTreeSet::from([1234]),
            ..data
        };
        assert_eq!(validate_widget_data(&widget("metric_line_chart", data)), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut attrs = DashboardAttributes::new("Ops");
        attrs.icon = "smiley".to_string();
        attrs.visibility = "nobody".to_string();
        let mut w = widget("markdown", DataBlock::default());
        w.account_id = 0;
        w.layout[0].row = 0;
        w.data[0].limit = Some(0);
        attrs.widget.push(w);

        let errors = validate_dashboard(&attrs).unwrap_err().0;
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "icon",
                "visibility",
                "widget.0.account_id",
                "widget.0.data.0.limit",
                "widget.0.layout.0.row",
                "widget.0",
            ]
        );
        assert!(errors[0].message.ends_with("got smiley"));
        assert_eq!(errors[2].message, "expected account_id to be at least (1), got 0");
        assert_eq!(errors[5].message, "source is required for markdown visualization");
    }

    #[test]
    fn test_block_cardinality() {
        let mut attrs = DashboardAttributes::new("Ops");
        let mut w = widget("heatmap", nrql("SELECT histogram(duration) FROM Transaction"));
        w.layout.clear();
        w.presentation.push(w.presentation[0].clone());
        attrs.widget.push(w);
        attrs.filter = vec![FilterBlock::default(), FilterBlock::default()];

        let errors = validate_dashboard(&attrs).unwrap_err().0;
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert!(paths.contains(&"filter"));
        assert!(paths.contains(&"filter.0.event_types"));
        assert!(paths.contains(&"widget.0.presentation"));
        assert!(paths.contains(&"widget.0.layout"));
    }

    #[test]
    fn test_widget_limit() {
        let mut attrs = DashboardAttributes::new("Ops");
        attrs.widget = (0..=MAX_WIDGETS)
            .map(|i| {
                let mut w = widget("markdown", DataBlock {
                    source: Some(format!("# {}", i)),
                    ..Default::default()
                });
                w.layout[0].row = i as i64 + 1;
                w
            })
            .collect();

        let errors = validate_dashboard(&attrs).unwrap_err().0;
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "widget");
    }

    #[test]
    fn test_widget_limit_counts_distinct_widgets() {
        let mut attrs = DashboardAttributes::new("Ops");
        let markdown = widget("markdown", DataBlock {
            source: Some("# same".to_string()),
            ..Default::default()
        });
        attrs.widget = vec![markdown; MAX_WIDGETS + 1];

        assert_eq!(validate_dashboard(&attrs), Ok(()));
    }

    #[test]
    fn test_errors_join_into_one_message() {
        let errors = ValidationErrors(vec![
            ValidationError::new("icon", "bad icon"),
            ValidationError::new("widget.0", "source is required for markdown visualization"),
        ]);

        assert_eq!(
            errors.to_string(),
            "icon: bad icon; widget.0: source is required for markdown visualization"
        );
    }
}
