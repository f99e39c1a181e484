//! JSON Schema documents for generated records.
//!
//! Each schema pins the numeric bounds the data provider samples from, so a
//! serialized record that drifts out of range fails structural validation
//! before any semantic rule runs. Float bounds carry a small slack to absorb
//! rounding of sums like `2.4 + (-0.1)`.

use serde_json::{json, Value};

pub const HOSPITAL_SUMMARY: &str = "hospital-summary-v1";
pub const HOSPITAL_DETAIL: &str = "hospital-detail-v1";
pub const REGIONAL_STATUS: &str = "regional-status-v1";
pub const QUALITY_METRICS: &str = "quality-metrics-v1";
pub const QUALITY_TREND: &str = "quality-trend-v1";
pub const COVERAGE: &str = "coverage-analysis-v1";

fn int_range(min: i64, max: i64) -> Value {
    json!({ "type": "integer", "minimum": min, "maximum": max })
}

fn float_range(min: f64, max: f64) -> Value {
    json!({ "type": "number", "minimum": min, "maximum": max })
}

fn indicator(min: f64, max: f64) -> Value {
    json!({
        "type": "object",
        "required": ["current", "target"],
        "properties": { "current": float_range(min, max) }
    })
}

pub fn hospital_summary() -> Value {
    json!({
        "type": "object",
        "required": ["name", "region", "staff", "lg_total", "lg_approved", "status", "warnings"],
        "properties": {
            "staff": int_range(200, 3500),
            "lg_total": int_range(8, 15),
            "lg_approved": int_range(5, 15),
            "status": { "enum": ["success", "warning", "critical"] },
            "warnings": { "type": "array", "maxItems": 2 }
        }
    })
}

pub fn hospital_detail() -> Value {
    json!({
        "type": "object",
        "required": ["name", "region", "staff", "approved", "in_progress", "rejected", "criteria", "indicators"],
        "properties": {
            "staff": int_range(200, 3500),
            "approved": { "type": "array", "minItems": 6, "maxItems": 13 },
            "in_progress": { "type": "array", "minItems": 1, "maxItems": 3 },
            "rejected": { "type": "array", "maxItems": 8 },
            "indicators": {
                "type": "object",
                "required": ["complication_rate", "mortality_rate", "satisfaction"],
                "properties": {
                    "complication_rate": float_range(1.5, 3.5),
                    "mortality_rate": float_range(0.8, 1.8),
                    "satisfaction": float_range(3.2, 4.5)
                }
            }
        }
    })
}

pub fn regional_status() -> Value {
    json!({
        "type": "object",
        "required": ["region", "status", "hospitals", "lg_approved_pct", "quality_fulfilled_pct", "population"],
        "properties": {
            "status": { "enum": ["success", "warning", "critical"] },
            "lg_approved_pct": int_range(70, 100),
            "quality_fulfilled_pct": int_range(85, 100),
            "population": int_range(100_000, 500_000)
        }
    })
}

pub fn quality_metrics() -> Value {
    json!({
        "type": "object",
        "required": ["service_group", "complication_rate", "mortality_rate", "avg_stay"],
        "properties": {
            "complication_rate": indicator(1.8, 2.8),
            "mortality_rate": indicator(0.8, 1.4),
            "avg_stay": indicator(4.5, 6.0)
        }
    })
}

pub fn quality_trend() -> Value {
    json!({
        "type": "object",
        "required": ["service_group", "points"],
        "properties": {
            "points": {
                "type": "array",
                "minItems": 12,
                "maxItems": 12,
                "items": {
                    "type": "object",
                    "required": ["month", "regional", "national"],
                    "properties": {
                        "regional": float_range(1.5, 3.01),
                        "national": float_range(2.29, 2.51)
                    }
                }
            }
        }
    })
}

pub fn coverage() -> Value {
    json!({
        "type": "object",
        "required": ["region", "demographics", "accessibility", "gaps", "outbound", "inbound"],
        "properties": {
            "demographics": {
                "type": "object",
                "properties": {
                    "population": int_range(150_000, 450_000),
                    "avg_age": int_range(42, 48),
                    "forecast_2030_pct": int_range(-8, 2)
                }
            },
            "accessibility": {
                "type": "object",
                "properties": {
                    "emergency_30min_pct": int_range(0, 100),
                    "specialized_60min_pct": int_range(0, 100)
                }
            }
        }
    })
}

/// Every schema with its identifier, in registration order.
pub fn all() -> Vec<(&'static str, Value)> {
    vec![
        (HOSPITAL_SUMMARY, hospital_summary()),
        (HOSPITAL_DETAIL, hospital_detail()),
        (REGIONAL_STATUS, regional_status()),
        (QUALITY_METRICS, quality_metrics()),
        (QUALITY_TREND, quality_trend()),
        (COVERAGE, coverage()),
    ]
}
