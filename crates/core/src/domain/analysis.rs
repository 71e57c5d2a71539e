use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form chart payload keyed by series name.
pub type ChartData = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub report: String,
    pub data: ChartData,
}
