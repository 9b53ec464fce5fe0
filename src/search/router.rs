use std::sync::Arc;
use tracing::info;

use super::models::{IntentTag, QueryAnalysis, RoutedOperation, RoutingDecision, RoutingRationale};
use crate::backends::{
    RecommendationBackend, RetrievalBackend, RetrievalResult, TimingBackend,
};
use crate::core::Result;

/// Deterministic priority chain over the retrieval operations. The first
/// matching rule wins and its rationale is recorded in the decision.
pub struct SmartRouter {
    retrieval: Arc<dyn RetrievalBackend>,
    recommendation: Arc<dyn RecommendationBackend>,
    timing: Arc<dyn TimingBackend>,
}

impl SmartRouter {
    pub fn new(
        retrieval: Arc<dyn RetrievalBackend>,
        recommendation: Arc<dyn RecommendationBackend>,
        timing: Arc<dyn TimingBackend>,
    ) -> Self {
        info!("Smart router initialized");
        Self { retrieval, recommendation, timing }
    }

    pub async fn route(
        &self,
        analysis: &QueryAnalysis,
        top_k: usize,
    ) -> Result<(RoutingDecision, RetrievalResult)> {
        let entities = &analysis.entities;

        // 1. Timing question about a known ingredient.
        if analysis.intent == IntentTag::TimingQuery && !entities.ingredients.is_empty() {
            let ingredient = entities.ingredients[0].clone();
            info!("routing to timing recommendation: {}", ingredient);

            let result = self.timing.recommend_timing(&ingredient).await?;
            return Ok((
                decision(
                    RoutedOperation::TimingRecommend,
                    RoutingRationale {
                        reason: "복용 시간 질문 감지".to_string(),
                        ingredient: Some(ingredient),
                        symptom: None,
                        expanded_query: None,
                    },
                ),
                RetrievalResult::Timing(result),
            ));
        }

        // 2. Explicit ingredient search.
        if analysis.intent == IntentTag::IngredientSearch && !entities.ingredients.is_empty() {
            let ingredient = entities.ingredients[0].clone();
            info!("routing to ingredient search: {}", ingredient);

            let results = self.retrieval.search_by_ingredient(&ingredient, top_k).await?;
            return Ok((
                decision(
                    RoutedOperation::IngredientSearch,
                    RoutingRationale {
                        reason: "성분 키워드 감지".to_string(),
                        ingredient: Some(ingredient),
                        symptom: None,
                        expanded_query: None,
                    },
                ),
                RetrievalResult::List(results),
            ));
        }

        // 3. Symptom-driven recommendation; falls back to the raw query when
        // no symptom token survived extraction.
        if analysis.intent == IntentTag::SymptomSearch
            || (!entities.symptoms.is_empty() && entities.ingredients.is_empty())
        {
            let symptom = entities
                .symptoms
                .first()
                .cloned()
                .unwrap_or_else(|| analysis.original_query.clone());
            info!("routing to symptom recommendation: {}", symptom);

            let result = self.recommendation.recommend_by_symptom(&symptom, top_k).await?;
            return Ok((
                decision(
                    RoutedOperation::SymptomRecommend,
                    RoutingRationale {
                        reason: "증상 감지".to_string(),
                        ingredient: None,
                        symptom: Some(symptom),
                        expanded_query: None,
                    },
                ),
                RetrievalResult::Recommendation(result),
            ));
        }

        // 4. Everything else goes through hybrid retrieval on the expanded
        // query (MIXED, GENERAL_SEARCH, EFFECT_QUERY, PRODUCT_SEARCH).
        info!("routing to hybrid search: {}", analysis.expanded_query);

        let results = self.retrieval.hybrid_search(&analysis.expanded_query, top_k).await?;
        Ok((
            decision(
                RoutedOperation::HybridSearch,
                RoutingRationale {
                    reason: "복합 쿼리 또는 일반 검색".to_string(),
                    ingredient: None,
                    symptom: None,
                    expanded_query: Some(analysis.expanded_query.clone()),
                },
            ),
            RetrievalResult::List(results),
        ))
    }
}

fn decision(operation: RoutedOperation, rationale: RoutingRationale) -> RoutingDecision {
    RoutingDecision { selected_operation: operation, rationale }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::memory::{StaticRecommendationBackend, StaticRetrievalBackend};
    use crate::backends::timing::RuleTimingAdvisor;
    use crate::search::models::EntitySet;

    fn router() -> SmartRouter {
        SmartRouter::new(
            Arc::new(StaticRetrievalBackend::new()),
            Arc::new(StaticRecommendationBackend::new()),
            Arc::new(RuleTimingAdvisor::new()),
        )
    }

    fn analysis(intent: IntentTag, entities: EntitySet, query: &str) -> QueryAnalysis {
        QueryAnalysis {
            original_query: query.to_string(),
            entities,
            intent,
            expanded_query: query.to_string(),
            knowledge_match: None,
        }
    }

    #[tokio::test]
    async fn test_timing_takes_priority() {
        // Even with symptoms and body parts present, a timing intent plus an
        // ingredient always selects the timing operation.
        let entities = EntitySet {
            symptoms: vec!["피로".to_string()],
            ingredients: vec!["마그네슘".to_string()],
            body_parts: vec!["눈".to_string()],
            effects: vec![],
        };
        let analysis = analysis(IntentTag::TimingQuery, entities, "마그네슘은 언제 먹어야 하나요?");

        let (decision, result) = router().route(&analysis, 5).await.unwrap();

        assert_eq!(decision.selected_operation, RoutedOperation::TimingRecommend);
        assert_eq!(decision.rationale.ingredient.as_deref(), Some("마그네슘"));
        assert!(matches!(result, RetrievalResult::Timing(ref t) if t.has_timing_info));
    }

    #[tokio::test]
    async fn test_ingredient_search_route() {
        let entities = EntitySet {
            ingredients: vec!["비타민C".to_string()],
            ..EntitySet::default()
        };
        let analysis = analysis(IntentTag::IngredientSearch, entities, "비타민C 함유 제품");

        let (decision, result) = router().route(&analysis, 5).await.unwrap();

        assert_eq!(decision.selected_operation, RoutedOperation::IngredientSearch);
        assert!(matches!(result, RetrievalResult::List(_)));
    }

    #[tokio::test]
    async fn test_symptom_route_without_symptom_token() {
        // SYMPTOM_SEARCH intent with an empty symptom set falls back to the
        // raw query as the symptom argument.
        let analysis = analysis(IntentTag::SymptomSearch, EntitySet::default(), "몸이 안 좋아요");

        let (decision, _) = router().route(&analysis, 5).await.unwrap();

        assert_eq!(decision.selected_operation, RoutedOperation::SymptomRecommend);
        assert_eq!(decision.rationale.symptom.as_deref(), Some("몸이 안 좋아요"));
    }

    #[tokio::test]
    async fn test_symptoms_without_intent_still_route_to_recommendation() {
        let entities = EntitySet {
            symptoms: vec!["피로".to_string()],
            ..EntitySet::default()
        };
        let analysis = analysis(IntentTag::Mixed, entities, "피로");

        let (decision, result) = router().route(&analysis, 5).await.unwrap();

        assert_eq!(decision.selected_operation, RoutedOperation::SymptomRecommend);
        assert!(matches!(result, RetrievalResult::Recommendation(_)));
    }

    #[tokio::test]
    async fn test_default_hybrid_route_uses_expanded_query() {
        let mut analysis =
            analysis(IntentTag::GeneralSearch, EntitySet::default(), "건강에 좋은 것");
        analysis.expanded_query = "건강에 좋은 것 면역력".to_string();

        let (decision, _) = router().route(&analysis, 5).await.unwrap();

        assert_eq!(decision.selected_operation, RoutedOperation::HybridSearch);
        assert_eq!(
            decision.rationale.expanded_query.as_deref(),
            Some("건강에 좋은 것 면역력")
        );
    }
}
