// Closed attribute value sets: icons, visibility, editability and widget visualizations
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_ICON: &str = "bar-chart";
pub const DEFAULT_VISIBILITY: &str = "all";
pub const DEFAULT_EDITABLE: &str = "editable_by_all";

pub const ICONS: &[&str] = &[
    "none",
    "archive",
    "bar-chart",
    "line-chart",
    "bullseye",
    "user",
    "usd",
    "money",
    "thumbs-up",
    "thumbs-down",
    "cloud",
    "bell",
    "bullhorn",
    "comments-o",
    "envelope",
    "globe",
    "shopping-cart",
    "sitemap",
    "clock-o",
    "crosshairs",
    "rocket",
    "users",
    "mobile",
    "tablet",
    "adjust",
    "dashboard",
    "flag",
    "flask",
    "road",
    "bolt",
    "cog",
    "leaf",
    "magic",
    "puzzle-piece",
    "bug",
    "fire",
    "legal",
    "trophy",
    "pie-chart",
    "sliders",
    "paper-plane",
    "life-ring",
    "heart",
];

pub const VISIBILITIES: &[&str] = &["owner", "all"];

pub const EDITABLE_MODES: &[&str] = &["read_only", "editable_by_owner", "editable_by_all", "all"];

/// Visualization kind of a widget. Determines which data fields are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visualization {
    Billboard,
    Gauge,
    BillboardComparison,
    FacetBarChart,
    FacetedLineChart,
    FacetPieChart,
    FacetTable,
    FacetedAreaChart,
    Heatmap,
    AttributeSheet,
    SingleEvent,
    Histogram,
    Funnel,
    RawJson,
    EventFeed,
    EventTable,
    UniquesList,
    LineChart,
    ComparisonLineChart,
    Markdown,
    MetricLineChart,
}

/// A data or presentation field some visualizations cannot do without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Nrql,
    Threshold,
    Source,
    Metrics,
    EntityIds,
}

impl RequiredField {
    pub fn name(&self) -> &'static str {
        match self {
            RequiredField::Nrql => "nrql",
            RequiredField::Threshold => "threshold",
            RequiredField::Source => "source",
            RequiredField::Metrics => "metrics",
            RequiredField::EntityIds => "entity_ids",
        }
    }
}

impl Visualization {
    pub const ALL: [Visualization; 21] = [
        Visualization::Billboard,
        Visualization::Gauge,
        Visualization::BillboardComparison,
        Visualization::FacetBarChart,
        Visualization::FacetedLineChart,
        Visualization::FacetPieChart,
        Visualization::FacetTable,
        Visualization::FacetedAreaChart,
        Visualization::Heatmap,
        Visualization::AttributeSheet,
        Visualization::SingleEvent,
        Visualization::Histogram,
        Visualization::Funnel,
        Visualization::RawJson,
        Visualization::EventFeed,
        Visualization::EventTable,
        Visualization::UniquesList,
        Visualization::LineChart,
        Visualization::ComparisonLineChart,
        Visualization::Markdown,
        Visualization::MetricLineChart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Visualization::Billboard => "billboard",
            Visualization::Gauge => "gauge",
            Visualization::BillboardComparison => "billboard_comparison",
            Visualization::FacetBarChart => "facet_bar_chart",
            Visualization::FacetedLineChart => "faceted_line_chart",
            Visualization::FacetPieChart => "facet_pie_chart",
            Visualization::FacetTable => "facet_table",
            Visualization::FacetedAreaChart => "faceted_area_chart",
            Visualization::Heatmap => "heatmap",
            Visualization::AttributeSheet => "attribute_sheet",
            Visualization::SingleEvent => "single_event",
            Visualization::Histogram => "histogram",
            Visualization::Funnel => "funnel",
            Visualization::RawJson => "raw_json",
            Visualization::EventFeed => "event_feed",
            Visualization::EventTable => "event_table",
            Visualization::UniquesList => "uniques_list",
            Visualization::LineChart => "line_chart",
            Visualization::ComparisonLineChart => "comparison_line_chart",
            Visualization::Markdown => "markdown",
            Visualization::MetricLineChart => "metric_line_chart",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Visualization::as_str).collect()
    }

    /// Fields that must be set for this visualization, in the order they are checked.
    pub fn required_fields(&self) -> &'static [RequiredField] {
        use Visualization::*;

        match self {
            Billboard | Gauge | BillboardComparison => {
                &[RequiredField::Nrql, RequiredField::Threshold]
            }
            FacetBarChart | FacetedLineChart | FacetPieChart | FacetTable | FacetedAreaChart
            | Heatmap => &[RequiredField::Nrql],
            AttributeSheet | SingleEvent | Histogram | Funnel | RawJson | EventFeed
            | EventTable | UniquesList | LineChart | ComparisonLineChart => &[RequiredField::Nrql],
            Markdown => &[RequiredField::Source],
            MetricLineChart => &[RequiredField::Metrics, RequiredField::EntityIds],
        }
    }
}

impl fmt::Display for Visualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVisualization(pub String);

impl FromStr for Visualization {
    type Err = UnknownVisualization;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVisualization(s.to_string()))
    }
}
