//! GA4 Data API `runReport` request and response bodies.
//!
//! Only the fields the dashboard sends or reads are modelled. Metric values
//! arrive as strings and are converted at the edge by [`Row`] helpers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDateRange {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedField {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricOrderBy {
    pub metric_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionOrderBy {
    pub dimension_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<MetricOrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<DimensionOrderBy>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub desc: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportRequest {
    pub date_ranges: Vec<WireDateRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<NamedField>,
    pub metrics: Vec<NamedField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_bys: Vec<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl RunReportRequest {
    pub fn new(start_date: &str, end_date: &str) -> Self {
        Self {
            date_ranges: vec![WireDateRange {
                start_date: start_date.to_string(),
                end_date: end_date.to_string(),
            }],
            dimensions: Vec::new(),
            metrics: Vec::new(),
            order_bys: Vec::new(),
            limit: None,
        }
    }

    pub fn dimension(mut self, name: &str) -> Self {
        self.dimensions.push(NamedField { name: name.to_string() });
        self
    }

    pub fn metrics(mut self, names: &[&str]) -> Self {
        self.metrics
            .extend(names.iter().map(|n| NamedField { name: n.to_string() }));
        self
    }

    pub fn order_by_metric_desc(mut self, metric_name: &str) -> Self {
        self.order_bys.push(OrderBy {
            metric: Some(MetricOrderBy { metric_name: metric_name.to_string() }),
            dimension: None,
            desc: true,
        });
        self
    }

    pub fn order_by_dimension(mut self, dimension_name: &str) -> Self {
        self.order_bys.push(OrderBy {
            metric: None,
            dimension: Some(DimensionOrderBy { dimension_name: dimension_name.to_string() }),
            desc: false,
        });
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Value {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub dimension_values: Vec<Value>,
    #[serde(default)]
    pub metric_values: Vec<Value>,
}

impl Row {
    pub fn dimension(&self, idx: usize) -> &str {
        self.dimension_values.get(idx).map(|v| v.value.as_str()).unwrap_or("")
    }

    /// Integer metric; fractional values are truncated, garbage reads as 0.
    pub fn metric_i64(&self, idx: usize) -> i64 {
        let raw = self.metric_values.get(idx).map(|v| v.value.trim()).unwrap_or("");
        raw.parse::<i64>()
            .ok()
            .or_else(|| raw.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0)
    }

    pub fn metric_f64(&self, idx: usize) -> f64 {
        self.metric_values
            .get(idx)
            .and_then(|v| v.value.trim().parse::<f64>().ok())
            .filter(|f| f.is_finite())
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportResponse {
    // GA omits `rows` entirely when nothing matched
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<i64>,
}

impl RunReportResponse {
    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }
}
