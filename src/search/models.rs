use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

use crate::backends::{
    RetrievalResult, ScoredItem, SymptomRecommendation, TimingRecommendation, WebSearchResult,
};
use crate::knowledge::{FaqPair, InteractionInfo, NutrientGuidance, TimingGuide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentTag {
    SymptomSearch,
    IngredientSearch,
    TimingQuery,
    EffectQuery,
    ProductSearch,
    Mixed,
    GeneralSearch,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitySet {
    pub symptoms: Vec<String>,
    pub ingredients: Vec<String>,
    pub body_parts: Vec<String>,
    pub effects: Vec<String>,
}

impl EntitySet {
    pub fn total(&self) -> usize {
        self.symptoms.len() + self.ingredients.len() + self.body_parts.len() + self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Immutable per-request analysis record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub original_query: String,
    pub entities: EntitySet,
    pub intent: IntentTag,
    pub expanded_query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_match: Option<NutrientGuidance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFlags {
    pub enable_fallback: bool,
    pub enable_reranking: bool,
    pub enable_diversity: bool,
    pub enable_web_search: bool,
    pub web_search_max_results: usize,
}

impl Default for SearchFlags {
    fn default() -> Self {
        Self {
            enable_fallback: true,
            enable_reranking: true,
            enable_diversity: false,
            enable_web_search: false,
            web_search_max_results: 5,
        }
    }
}

impl SearchFlags {
    /// Compact tag for cache keys; every flag participates.
    pub fn cache_tag(&self) -> String {
        format!(
            "f{}r{}d{}w{}m{}",
            u8::from(self.enable_fallback),
            u8::from(self.enable_reranking),
            u8::from(self.enable_diversity),
            u8::from(self.enable_web_search),
            self.web_search_max_results
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoutedOperation {
    TimingRecommend,
    IngredientSearch,
    SymptomRecommend,
    HybridSearch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingRationale {
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded_query: Option<String>,
}

/// Why an operation was selected; kept in the response for observability and
/// asserted on directly in tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub selected_operation: RoutedOperation,
    pub rationale: RoutingRationale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FallbackPayload {
    Category {
        category: String,
        message: String,
        suggested_products: Vec<String>,
        health_tips: Vec<String>,
        related_faqs: Vec<FaqPair>,
        note: String,
    },
    SymptomGuidance {
        detected_symptom: String,
        message: String,
        recommended_nutrients: Vec<String>,
        note: String,
    },
    IngredientGuidance {
        detected_ingredient: String,
        message: String,
        timing: String,
        synergy_with: Vec<String>,
        avoid_with: Vec<String>,
        note: String,
    },
    Generic {
        message: String,
        suggestions: Vec<String>,
        examples: Vec<String>,
        note: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomGuide {
    pub symptom: String,
    pub recommended_nutrients: Vec<String>,
    pub description: String,
}

/// Supplementary guidance attached next to results, never replacing them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdditionalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptom_guide: Option<SymptomGuide>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction_guide: Option<InteractionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing_guide: Option<TimingGuide>,
}

impl AdditionalInfo {
    pub fn is_empty(&self) -> bool {
        self.symptom_guide.is_none()
            && self.interaction_guide.is_none()
            && self.timing_guide.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub popularity: f64,
    pub trust: f64,
    pub recency: f64,
}

/// A scored item augmented during re-ranking; exists only between the rerank
/// stage and response composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedItem {
    #[serde(flatten)]
    pub item: ScoredItem,
    pub rerank_score: f64,
    pub score_breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResultSet {
    Ranked(Vec<RankedItem>),
    List(Vec<ScoredItem>),
    Recommendation(SymptomRecommendation),
    Timing(TimingRecommendation),
}

impl ResultSet {
    pub fn as_ranked(&self) -> Option<&[RankedItem]> {
        match self {
            Self::Ranked(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ScoredItem]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<RetrievalResult> for ResultSet {
    fn from(result: RetrievalResult) -> Self {
        match result {
            RetrievalResult::List(items) => Self::List(items),
            RetrievalResult::Recommendation(rec) => Self::Recommendation(rec),
            RetrievalResult::Timing(timing) => Self::Timing(timing),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub request_id: String,
    pub query_analysis: QueryAnalysis,
    pub routing: RoutingDecision,
    pub results: ResultSet,
    pub fallback_used: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackPayload>,
    pub web_search_enabled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub web_results: Vec<WebSearchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<AdditionalInfo>,
}
