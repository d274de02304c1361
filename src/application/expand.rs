// Expand - host attribute state into the remote dashboard object graph
use crate::application::validation::{validate_widget_data, ValidationError};
use crate::domain::attributes::{
    CompareWithBlock, DashboardAttributes, DataBlock, FilterBlock, LayoutBlock, MetricBlock,
    PresentationBlock, ThresholdBlock, WidgetBlock,
};
use crate::domain::dashboard::{
    CompareWith, CompareWithPresentation, Dashboard, DashboardFilter, DashboardMetadata,
    DashboardWidget, WidgetData, WidgetLayout, WidgetMetric, WidgetPresentation, WidgetThreshold,
};

const METADATA_VERSION: i64 = 1;

pub fn expand_dashboard(attrs: &DashboardAttributes) -> Result<Dashboard, ValidationError> {
    tracing::debug!(title = %attrs.title, widgets = attrs.widget.len(), "expanding dashboard");

    let mut dashboard = Dashboard {
        title: attrs.title.clone(),
        metadata: DashboardMetadata {
            version: METADATA_VERSION,
        },
        icon: attrs.icon.clone(),
        visibility: attrs.visibility.clone(),
        editable: attrs.editable.clone(),
        ..Default::default()
    };

    if let Some(filter) = attrs.filter.first() {
        dashboard.filter = expand_filter(filter);
    }

    if !attrs.widget.is_empty() {
        dashboard.widgets = expand_widgets(&attrs.widget)?;
    }

    Ok(dashboard)
}

fn expand_filter(filter: &FilterBlock) -> DashboardFilter {
    DashboardFilter {
        event_types: filter.event_types.iter().cloned().collect(),
        attributes: filter.attributes.iter().cloned().collect(),
    }
}

pub fn expand_widgets(widgets: &[WidgetBlock]) -> Result<Vec<DashboardWidget>, ValidationError> {
    widgets.iter().map(expand_widget).collect()
}

pub fn expand_widget(widget: &WidgetBlock) -> Result<DashboardWidget, ValidationError> {
    let mut expanded = DashboardWidget {
        visualization: widget.visualization.clone(),
        account_id: widget.account_id,
        ..Default::default()
    };

    if let Some(data) = widget.data.first() {
        validate_widget_data(widget)?;
        expanded.data = vec![expand_widget_data(data)];
    }

    if let Some(presentation) = widget.presentation.first() {
        expanded.presentation = expand_widget_presentation(presentation);
    }

    if let Some(layout) = widget.layout.first() {
        expanded.layout = expand_widget_layout(layout);
    }

    Ok(expanded)
}

fn expand_widget_data(data: &DataBlock) -> WidgetData {
    WidgetData {
        nrql: data.nrql.clone().unwrap_or_default(),
        source: data.source.clone().unwrap_or_default(),
        duration: data.duration.unwrap_or_default(),
        end_time: data.end_time.unwrap_or_default(),
        entity_ids: data.entity_ids.iter().copied().collect(),
        compare_with: data.compare_with.iter().map(expand_compare_with).collect(),
        metrics: data.metrics.iter().map(expand_metric).collect(),
        raw_metric_name: data.raw_metric_name.clone().unwrap_or_default(),
        facet: data.facet.clone().unwrap_or_default(),
        order_by: data.order_by.clone().unwrap_or_default(),
        limit: data.limit.unwrap_or_default(),
    }
}

fn expand_compare_with(window: &CompareWithBlock) -> CompareWith {
    let key = |name: &str| window.presentation.get(name).cloned().unwrap_or_default();

    CompareWith {
        offset_duration: window.offset_duration.clone(),
        presentation: CompareWithPresentation {
            name: key("name"),
            color: key("color"),
        },
    }
}

fn expand_metric(metric: &MetricBlock) -> WidgetMetric {
    WidgetMetric {
        name: metric.name.clone(),
        units: metric.units.clone().unwrap_or_default(),
        scope: metric.scope.clone().unwrap_or_default(),
        values: metric.values.iter().cloned().collect(),
    }
}

fn expand_widget_presentation(presentation: &PresentationBlock) -> WidgetPresentation {
    WidgetPresentation {
        title: presentation.title.clone(),
        notes: presentation.notes.clone().unwrap_or_default(),
        drilldown_dashboard_id: presentation.drilldown_dashboard_id.unwrap_or_default(),
        threshold: presentation.threshold.first().map(expand_widget_threshold),
    }
}

fn expand_widget_threshold(threshold: &ThresholdBlock) -> WidgetThreshold {
    WidgetThreshold {
        red: threshold.red,
        yellow: threshold.yellow,
    }
}

fn expand_widget_layout(layout: &LayoutBlock) -> WidgetLayout {
    WidgetLayout {
        width: layout.width,
        height: layout.height,
        row: layout.row,
        column: layout.column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    fn line_chart() -> WidgetBlock {
        WidgetBlock {
            visualization: "metric_line_chart".to_string(),
            widget_id: 0,
            account_id: 1,
            data: vec![DataBlock {
                duration: Some(1_800_000),
                entity_ids: BTreeSet::from([1234, 42]),
                metrics: vec![MetricBlock {
                    name: "Apdex".to_string(),
                    units: None,
                    scope: Some("".to_string()),
                    values: BTreeSet::from(["score".to_string()]),
                }],
                compare_with: vec![CompareWithBlock {
                    offset_duration: "P7D".to_string(),
                    presentation: BTreeMap::from([
                        ("name".to_string(), "Last week".to_string()),
                        ("color".to_string(), "#b1b6ba".to_string()),
                    ]),
                }],
                ..Default::default()
            }],
            presentation: vec![PresentationBlock {
                title: "Apdex".to_string(),
                notes: Some("weekly".to_string()),
                threshold: vec![],
                drilldown_dashboard_id: Some(77),
            }],
            layout: vec![LayoutBlock {
                row: 2,
                column: 3,
                width: 2,
                height: 1,
            }],
        }
    }

    #[test]
    fn test_expand_dashboard() {
        let mut attrs = DashboardAttributes::new("Ops");
        attrs.icon = "rocket".to_string();
        attrs.filter.push(FilterBlock {
            event_types: BTreeSet::from(["Transaction".to_string()]),
            attributes: BTreeSet::from(["appName".to_string(), "envName".to_string()]),
        });
        attrs.widget.push(line_chart());

        let dashboard = expand_dashboard(&attrs).unwrap();
        assert_eq!(dashboard.id, 0);
        assert_eq!(dashboard.title, "Ops");
        assert_eq!(dashboard.icon, "rocket");
        assert_eq!(dashboard.visibility, "all");
        assert_eq!(dashboard.editable, "editable_by_all");
        assert_eq!(dashboard.metadata.version, 1);
        assert_eq!(dashboard.filter.event_types, vec!["Transaction"]);
        assert_eq!(dashboard.filter.attributes, vec!["appName", "envName"]);

        let widget = &dashboard.widgets[0];
        assert_eq!(widget.visualization, "metric_line_chart");
        assert_eq!(widget.account_id, 1);
        assert_eq!(widget.data.len(), 1);
        assert_eq!(widget.data[0].entity_ids, vec![42, 1234]);
        assert_eq!(widget.data[0].duration, 1_800_000);
        assert_eq!(widget.data[0].metrics[0].name, "Apdex");
        assert_eq!(widget.data[0].metrics[0].values, vec!["score"]);
        assert_eq!(widget.data[0].compare_with[0].presentation.name, "Last week");
        assert_eq!(widget.data[0].compare_with[0].presentation.color, "#b1b6ba");
        assert_eq!(widget.presentation.drilldown_dashboard_id, 77);
        assert_eq!(widget.presentation.threshold, None);
        assert_eq!(
            widget.layout,
            WidgetLayout {
                width: 2,
                height: 1,
                row: 2,
                column: 3
            }
        );
    }

    #[test]
    fn test_expand_rejects_missing_required_field() {
        let mut widget = line_chart();
        widget.data[0].entity_ids.clear();
        let mut attrs = DashboardAttributes::new("Ops");
        attrs.widget.push(widget);

        let err = expand_dashboard(&attrs).unwrap_err();
        assert_eq!(err.message, "entity_ids is required for metric_line_chart visualization");
    }

    #[test]
    fn test_expand_empty_dashboard() {
        let dashboard = expand_dashboard(&DashboardAttributes::new("Empty")).unwrap();
        assert!(dashboard.widgets.is_empty());
        assert!(dashboard.filter.is_empty());
    }
}
