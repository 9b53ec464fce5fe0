pub mod memory;
pub mod timing;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredItem {
    pub product_id: String,
    pub product_name: String,
    pub company_name: String,
    pub primary_function: String,
    pub raw_materials: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_date: Option<String>,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedProduct {
    pub product_name: String,
    pub company_name: String,
    pub primary_function: String,
    pub key_ingredients: Vec<String>,
    pub relevance_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomRecommendation {
    pub symptom: String,
    pub recommendations: Vec<RecommendedProduct>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedTime {
    pub time: String,
    pub description: String,
    pub priority: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingRecommendation {
    pub ingredient: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub avoid_with: Vec<String>,
    pub recommended_times: Vec<RecommendedTime>,
    pub has_timing_info: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchResult {
    pub position: usize,
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub source: String,
}

/// Result shapes the router can produce. Each backend declares its variant,
/// so fallback sufficiency and re-ranking dispatch on the tag instead of
/// probing for collection keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RetrievalResult {
    List(Vec<ScoredItem>),
    Recommendation(SymptomRecommendation),
    Timing(TimingRecommendation),
}

impl RetrievalResult {
    /// Length of the named collection, if the variant carries one.
    pub fn collection_len(&self) -> Option<usize> {
        match self {
            Self::List(items) => Some(items.len()),
            Self::Recommendation(rec) => Some(rec.recommendations.len()),
            Self::Timing(_) => None,
        }
    }
}

#[async_trait]
pub trait RetrievalBackend: Send + Sync {
    /// Combined vector-similarity and keyword search, scores in [0, 2].
    async fn hybrid_search(&self, query: &str, top_k: usize) -> BackendResult<Vec<ScoredItem>>;

    async fn search_by_ingredient(
        &self,
        ingredient: &str,
        top_k: usize,
    ) -> BackendResult<Vec<ScoredItem>>;
}

#[async_trait]
pub trait RecommendationBackend: Send + Sync {
    async fn recommend_by_symptom(
        &self,
        symptom: &str,
        top_k: usize,
    ) -> BackendResult<SymptomRecommendation>;
}

#[async_trait]
pub trait TimingBackend: Send + Sync {
    async fn recommend_timing(&self, ingredient: &str) -> BackendResult<TimingRecommendation>;
}

#[async_trait]
pub trait WebSearchBackend: Send + Sync {
    async fn search(&self, query: &str, max_results: usize)
        -> BackendResult<Vec<WebSearchResult>>;
}
