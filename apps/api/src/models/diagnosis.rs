use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub disease_name: String,
    /// Always within [0, 1] once it has passed through `assistant::diagnosis`.
    pub confidence: f64,
    pub description: String,
    pub symptoms: Vec<String>,
    pub preventions: Vec<String>,
    pub treatments: Vec<String>,
}
