// Flatten - remote dashboard object graph back into host attribute state
use crate::domain::attributes::{
    CompareWithBlock, DashboardAttributes, DataBlock, FilterBlock, LayoutBlock, MetricBlock,
    PresentationBlock, ThresholdBlock, WidgetBlock,
};
use crate::domain::dashboard::{
    CompareWith, Dashboard, DashboardFilter, DashboardWidget, WidgetData, WidgetLayout,
    WidgetMetric, WidgetPresentation, WidgetThreshold,
};
use std::collections::BTreeMap;

pub fn flatten_dashboard(dashboard: &Dashboard) -> DashboardAttributes {
    DashboardAttributes {
        title: dashboard.title.clone(),
        icon: dashboard.icon.clone(),
        visibility: dashboard.visibility.clone(),
        editable: dashboard.editable.clone(),
        ui_url: dashboard.ui_url.clone(),
        api_url: dashboard.api_url.clone(),
        owner_email: dashboard.owner_email.clone(),
        filter: flatten_filter(&dashboard.filter),
        widget: flatten_widgets(&dashboard.widgets),
    }
}

pub fn flatten_filter(filter: &DashboardFilter) -> Vec<FilterBlock> {
    if filter.is_empty() {
        return Vec::new();
    }

    vec![FilterBlock {
        event_types: filter.event_types.iter().cloned().collect(),
        attributes: filter.attributes.iter().cloned().collect(),
    }]
}

pub fn flatten_widgets(widgets: &[DashboardWidget]) -> Vec<WidgetBlock> {
    widgets.iter().map(flatten_widget).collect()
}

fn flatten_widget(widget: &DashboardWidget) -> WidgetBlock {
    WidgetBlock {
        visualization: widget.visualization.clone(),
        widget_id: widget.id,
        account_id: widget.account_id,
        data: widget.data.first().map(flatten_widget_data).into_iter().collect(),
        presentation: vec![flatten_widget_presentation(&widget.presentation)],
        layout: vec![flatten_widget_layout(&widget.layout)],
    }
}

fn flatten_widget_presentation(presentation: &WidgetPresentation) -> PresentationBlock {
    PresentationBlock {
        title: presentation.title.clone(),
        notes: non_empty(&presentation.notes),
        threshold: presentation
            .threshold
            .as_ref()
            .map(flatten_widget_threshold)
            .into_iter()
            .collect(),
        drilldown_dashboard_id: positive(presentation.drilldown_dashboard_id),
    }
}

fn flatten_widget_threshold(threshold: &WidgetThreshold) -> ThresholdBlock {
    ThresholdBlock {
        red: threshold.red,
        yellow: if threshold.yellow > 0.0 {
            threshold.yellow
        } else {
            0.0
        },
    }
}

fn flatten_widget_layout(layout: &WidgetLayout) -> LayoutBlock {
    LayoutBlock {
        row: layout.row,
        column: layout.column,
        width: layout.width,
        height: layout.height,
    }
}

fn flatten_widget_data(data: &WidgetData) -> DataBlock {
    DataBlock {
        nrql: non_empty(&data.nrql),
        source: non_empty(&data.source),
        duration: positive(data.duration),
        end_time: positive(data.end_time),
        raw_metric_name: non_empty(&data.raw_metric_name),
        facet: non_empty(&data.facet),
        order_by: non_empty(&data.order_by),
        limit: positive(data.limit),
        entity_ids: data.entity_ids.iter().copied().collect(),
        metrics: data.metrics.iter().map(flatten_metric).collect(),
        compare_with: data.compare_with.iter().map(flatten_compare_with).collect(),
    }
}

fn flatten_compare_with(window: &CompareWith) -> CompareWithBlock {
    CompareWithBlock {
        offset_duration: window.offset_duration.clone(),
        presentation: BTreeMap::from([
            ("name".to_string(), window.presentation.name.clone()),
            ("color".to_string(), window.presentation.color.clone()),
        ]),
    }
}

fn flatten_metric(metric: &WidgetMetric) -> MetricBlock {
    MetricBlock {
        name: metric.name.clone(),
        units: non_empty(&metric.units),
        scope: non_empty(&metric.scope),
        values: metric.values.iter().cloned().collect(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn positive(value: i64) -> Option<i64> {
    (value > 0).then_some(value)
}
