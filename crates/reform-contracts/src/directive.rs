//! Display directives: the contract between page composers and renderers.
//!
//! A page render produces an ordered `Vec<Directive>`. Renderers (the TUI, the
//! demo CLI, or anything consuming the JSON form) walk the sequence top to
//! bottom and draw each directive; they never call back into the composers.

use serde::{Deserialize, Serialize};

use crate::status::{AlertPriority, Status};

/// Colour tier of a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressTier {
    Green,
    Yellow,
    Red,
}

impl ProgressTier {
    /// 90 and above is green, 70 and above yellow, anything lower red.
    pub fn from_percent(percent: u32) -> Self {
        if percent >= 90 {
            ProgressTier::Green
        } else if percent >= 70 {
            ProgressTier::Yellow
        } else {
            ProgressTier::Red
        }
    }
}

/// Visual tone of a callout box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Info,
    Warning,
    Error,
    /// Plain text without a coloured box.
    Plain,
}

/// One marker on the geographic scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
    pub status: Status,
    /// Multi-line hover text.
    pub hover: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: String,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub style: LineStyle,
    pub points: Vec<ChartPoint>,
}

/// A horizontal reference line on a line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub value: f64,
    pub label: String,
}

/// A single typed display instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Directive {
    Header {
        text: String,
    },
    Subheader {
        text: String,
    },
    Text {
        text: String,
    },
    Caption {
        text: String,
    },
    Metric {
        label: String,
        value: String,
        #[serde(default)]
        delta: Option<String>,
    },
    Progress {
        label: String,
        current: u32,
        total: u32,
        percent: u32,
        tier: ProgressTier,
    },
    Callout {
        tone: Tone,
        text: String,
    },
    AlertBox {
        priority: AlertPriority,
        region: String,
        issue: String,
        #[serde(default)]
        hospital: Option<String>,
        deadline: String,
    },
    GeoScatter {
        points: Vec<GeoPoint>,
    },
    LineChart {
        title: String,
        x_label: String,
        y_label: String,
        series: Vec<ChartSeries>,
        #[serde(default)]
        threshold: Option<Threshold>,
    },
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Divider,
}

impl Directive {
    pub fn header(text: impl Into<String>) -> Self {
        Directive::Header { text: text.into() }
    }

    pub fn subheader(text: impl Into<String>) -> Self {
        Directive::Subheader { text: text.into() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Directive::Text { text: text.into() }
    }

    pub fn caption(text: impl Into<String>) -> Self {
        Directive::Caption { text: text.into() }
    }

    pub fn metric(label: impl Into<String>, value: impl Into<String>, delta: Option<String>) -> Self {
        Directive::Metric {
            label: label.into(),
            value: value.into(),
            delta,
        }
    }

    pub fn callout(tone: Tone, text: impl Into<String>) -> Self {
        Directive::Callout {
            tone,
            text: text.into(),
        }
    }

    /// Short kind name, matching the JSON `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Directive::Header { .. } => "header",
            Directive::Subheader { .. } => "subheader",
            Directive::Text { .. } => "text",
            Directive::Caption { .. } => "caption",
            Directive::Metric { .. } => "metric",
            Directive::Progress { .. } => "progress",
            Directive::Callout { .. } => "callout",
            Directive::AlertBox { .. } => "alert_box",
            Directive::GeoScatter { .. } => "geo_scatter",
            Directive::LineChart { .. } => "line_chart",
            Directive::Table { .. } => "table",
            Directive::Divider => "divider",
        }
    }
}
