// Schema declaration for the dashboard resource, served to the host
use crate::application::validation::MAX_WIDGETS;
use crate::domain::visualization::{
    Visualization, DEFAULT_EDITABLE, DEFAULT_ICON, DEFAULT_VISIBILITY, EDITABLE_MODES, ICONS,
    VISIBILITIES,
};
use serde::Serialize;
use serde_json::{json, Value};

pub const RESOURCE_TYPE: &str = "newrelic_dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Int,
    Float,
    List,
    Set,
    Map,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Scalar(AttributeType),
    Block(Vec<Attribute>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at_least: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elem: Option<Element>,
}

impl Attribute {
    fn new(name: &'static str, kind: AttributeType) -> Self {
        Self {
            name,
            kind,
            required: false,
            optional: true,
            computed: false,
            default: None,
            max_items: None,
            one_of: None,
            at_least: None,
            elem: None,
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, AttributeType::String)
    }

    pub fn int(name: &'static str) -> Self {
        Self::new(name, AttributeType::Int)
    }

    pub fn float(name: &'static str) -> Self {
        Self::new(name, AttributeType::Float)
    }

    pub fn set_of(name: &'static str, elem: AttributeType) -> Self {
        Self {
            elem: Some(Element::Scalar(elem)),
            ..Self::new(name, AttributeType::Set)
        }
    }

    pub fn map_of(name: &'static str, elem: AttributeType) -> Self {
        Self {
            elem: Some(Element::Scalar(elem)),
            ..Self::new(name, AttributeType::Map)
        }
    }

    pub fn block_list(name: &'static str, attributes: Vec<Attribute>) -> Self {
        Self {
            elem: Some(Element::Block(attributes)),
            ..Self::new(name, AttributeType::List)
        }
    }

    pub fn block_set(name: &'static str, attributes: Vec<Attribute>) -> Self {
        Self {
            elem: Some(Element::Block(attributes)),
            ..Self::new(name, AttributeType::Set)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self.optional = false;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self.optional = false;
        self
    }

    pub fn default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    pub fn one_of(mut self, values: &[&'static str]) -> Self {
        self.one_of = Some(values.to_vec());
        self
    }

    pub fn at_least(mut self, min: i64) -> Self {
        self.at_least = Some(min);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceSchema {
    pub type_name: &'static str,
    pub version: u32,
    pub importable: bool,
    pub attributes: Vec<Attribute>,
}

impl ResourceSchema {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

pub fn dashboard_schema() -> ResourceSchema {
    let filter = Attribute::block_list(
        "filter",
        vec![
            Attribute::set_of("event_types", AttributeType::String).required(),
            Attribute::set_of("attributes", AttributeType::String),
        ],
    )
    .max_items(1);

    let data = Attribute::block_list(
        "data",
        vec![
            Attribute::string("nrql"),
            Attribute::string("source"),
            Attribute::int("duration").default(json!(0)).at_least(1),
            Attribute::int("end_time").default(json!(0)).at_least(1),
            Attribute::string("raw_metric_name"),
            Attribute::string("facet"),
            Attribute::string("order_by"),
            Attribute::int("limit").default(json!(0)).at_least(1),
            Attribute::set_of("entity_ids", AttributeType::Int),
            Attribute::block_set(
                "metrics",
                vec![
                    Attribute::string("name").required(),
                    Attribute::string("units"),
                    Attribute::string("scope"),
                    Attribute::set_of("values", AttributeType::String),
                ],
            ),
            Attribute::block_set(
                "compare_with",
                vec![
                    Attribute::string("offset_duration").required(),
                    Attribute::map_of("presentation", AttributeType::String).required(),
                ],
            ),
        ],
    )
    .required()
    .max_items(1);

    let presentation = Attribute::block_list(
        "presentation",
        vec![
            Attribute::string("title").required(),
            Attribute::string("notes"),
            Attribute::block_list(
                "threshold",
                vec![
                    Attribute::float("red").required(),
                    Attribute::float("yellow").default(json!(0)),
                ],
            )
            .max_items(1),
            Attribute::int("drilldown_dashboard_id").at_least(1),
        ],
    )
    .required()
    .max_items(1);

    let layout = Attribute::block_list(
        "layout",
        vec![
            Attribute::int("width").default(json!(1)).at_least(1),
            Attribute::int("height").default(json!(1)).at_least(1),
            Attribute::int("row").required().at_least(1),
            Attribute::int("column").required().at_least(1),
        ],
    )
    .required()
    .max_items(1);

    let widget = Attribute::block_set(
        "widget",
        vec![
            Attribute::string("visualization")
                .required()
                .one_of(&Visualization::names()),
            Attribute::int("widget_id").computed(),
            Attribute::int("account_id").required().at_least(1),
            data,
            presentation,
            layout,
        ],
    )
    .max_items(MAX_WIDGETS);

    ResourceSchema {
        type_name: RESOURCE_TYPE,
        version: 0,
        importable: true,
        attributes: vec![
            Attribute::string("title").required(),
            Attribute::string("icon")
                .default(json!(DEFAULT_ICON))
                .one_of(ICONS),
            Attribute::string("visibility")
                .default(json!(DEFAULT_VISIBILITY))
                .one_of(VISIBILITIES),
            Attribute::string("editable")
                .default(json!(DEFAULT_EDITABLE))
                .one_of(EDITABLE_MODES),
            Attribute::string("ui_url").computed(),
            Attribute::string("api_url").computed(),
            Attribute::string("owner_email").computed(),
            filter,
            widget,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_attributes() {
        let schema = dashboard_schema();
        assert_eq!(schema.type_name, "newrelic_dashboard");

        let title = schema.attribute("title").unwrap();
        assert!(title.required && !title.optional);

        let icon = schema.attribute("icon").unwrap();
        assert_eq!(icon.default, Some(json!("bar-chart")));
        assert_eq!(icon.one_of.as_ref().map(Vec::len), Some(43));

        for computed in ["ui_url", "api_url", "owner_email"] {
            assert!(schema.attribute(computed).unwrap().computed);
        }

        let widget = schema.attribute("widget").unwrap();
        assert_eq!(widget.kind, AttributeType::Set);
        assert_eq!(widget.max_items, Some(300));
    }

    #[test]
    fn test_schema_serializes() {
        let value = serde_json::to_value(dashboard_schema()).unwrap();
        let widget = &value["attributes"][8];
        assert_eq!(widget["name"], "widget");
        assert_eq!(widget["type"], "set");

        let nested = widget["elem"]["block"].as_array().unwrap();
        let layout = nested.iter().find(|a| a["name"] == "layout").unwrap();
        assert_eq!(layout["required"], true);
        assert_eq!(layout["max_items"], 1);
        assert_eq!(layout["elem"]["block"][0]["default"], 1);
    }
}
