use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Seed,
    Fertilizer,
    Pesticide,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationItem {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub name: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub benefit: &'static str,
}
