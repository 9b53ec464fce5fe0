use std::sync::Arc;
use tracing::{debug, info};

use super::models::{AdditionalInfo, FallbackPayload, QueryAnalysis, SymptomGuide};
use crate::backends::RetrievalResult;
use crate::knowledge::HealthKnowledgeBase;

const FALLBACK_NOTE_CATEGORY: &str = "정확한 제품 검색 결과가 부족하여 일반적인 추천을 제공합니다.";
const FALLBACK_NOTE_SYMPTOM: &str = "증상에 도움이 될 수 있는 영양소를 추천합니다.";
const FALLBACK_NOTE_INGREDIENT: &str = "성분 정보를 제공합니다.";
const FALLBACK_NOTE_GENERIC: &str = "위와 같은 형태로 질문해주세요.";

const MAX_RELATED_FAQS: usize = 3;

/// Judges result sufficiency and synthesizes knowledge-base-backed substitute
/// responses; also produces the non-replacing enhancement block.
pub struct FallbackSystem {
    kb: Arc<HealthKnowledgeBase>,
    threshold: usize,
}

impl FallbackSystem {
    pub fn new(kb: Arc<HealthKnowledgeBase>, threshold: usize) -> Self {
        info!("Fallback system initialized: threshold={}", threshold);
        Self { kb, threshold }
    }

    /// A result is insufficient when its named collection holds fewer than
    /// `threshold` entries. Timing results carry no collection and never
    /// trigger fallback.
    pub fn should_use_fallback(&self, result: &RetrievalResult) -> bool {
        match result.collection_len() {
            Some(len) => len < self.threshold,
            None => false,
        }
    }

    /// Exactly one of the four branches fires: category match on the raw
    /// query, symptom guidance, ingredient guidance, or the generic prompt.
    pub fn generate(&self, query: &str, analysis: &QueryAnalysis) -> FallbackPayload {
        info!("generating fallback response");

        if let Some(rec) = self.kb.default_recommendation(query) {
            debug!("fallback category match: {}", rec.category);
            return FallbackPayload::Category {
                category: rec.category,
                message: rec.message,
                suggested_products: rec.products,
                health_tips: rec.tips,
                related_faqs: rec.faqs.into_iter().take(MAX_RELATED_FAQS).collect(),
                note: FALLBACK_NOTE_CATEGORY.to_string(),
            };
        }

        if let Some(symptom) = analysis.entities.symptoms.first() {
            if let Some(guidance) = self.kb.nutrients_for_symptom(symptom) {
                debug!("fallback symptom guidance: {}", symptom);
                return FallbackPayload::SymptomGuidance {
                    detected_symptom: symptom.clone(),
                    message: guidance.description,
                    recommended_nutrients: guidance.nutrients,
                    note: FALLBACK_NOTE_SYMPTOM.to_string(),
                };
            }
        }

        if let Some(ingredient) = analysis.entities.ingredients.first() {
            if let Some(info) = self.kb.interaction_info(ingredient) {
                debug!("fallback ingredient guidance: {}", ingredient);
                return FallbackPayload::IngredientGuidance {
                    detected_ingredient: ingredient.clone(),
                    message: format!("{ingredient}에 대한 정보입니다."),
                    timing: info.timing,
                    synergy_with: info.synergy_with,
                    avoid_with: info.avoid_with,
                    note: FALLBACK_NOTE_INGREDIENT.to_string(),
                };
            }
        }

        FallbackPayload::Generic {
            message: "구체적인 증상이나 필요한 성분을 말씀해주시면 더 정확한 추천이 가능합니다.".to_string(),
            suggestions: vec![
                "피로 회복".to_string(),
                "면역력 강화".to_string(),
                "눈 건강".to_string(),
                "관절 건강".to_string(),
                "소화 개선".to_string(),
            ],
            examples: vec![
                "눈이 피로해요".to_string(),
                "비타민C 성분이 포함된 제품".to_string(),
                "관절 통증에 좋은 영양제".to_string(),
                "칼슘은 언제 먹어야 하나요?".to_string(),
            ],
            note: FALLBACK_NOTE_GENERIC.to_string(),
        }
    }

    /// Strictly additive side information; never touches the results and is
    /// only invoked when fallback did not replace them.
    pub fn enhance(&self, analysis: &QueryAnalysis) -> Option<AdditionalInfo> {
        let mut info = AdditionalInfo::default();

        if let Some(symptom) = analysis.entities.symptoms.first() {
            if let Some(guidance) = self.kb.nutrients_for_symptom(symptom) {
                info.symptom_guide = Some(SymptomGuide {
                    symptom: symptom.clone(),
                    recommended_nutrients: guidance.nutrients,
                    description: guidance.description,
                });
            }
        }

        if let Some(ingredient) = analysis.entities.ingredients.first() {
            info.interaction_guide = self.kb.interaction_info(ingredient);
            info.timing_guide = self.kb.timing_recommendation(ingredient);
        }

        if info.is_empty() { None } else { Some(info) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{
        RecommendedProduct, ScoredItem, SymptomRecommendation, TimingRecommendation,
    };
    use crate::search::models::{EntitySet, IntentTag};

    fn system() -> FallbackSystem {
        FallbackSystem::new(Arc::new(HealthKnowledgeBase::new()), 2)
    }

    fn item(name: &str) -> ScoredItem {
        ScoredItem {
            product_id: "HF-9999".to_string(),
            product_name: name.to_string(),
            company_name: "테스트제약".to_string(),
            primary_function: "건강 유지".to_string(),
            raw_materials: "원료".to_string(),
            report_date: None,
            score: 1.0,
        }
    }

    fn analysis_with(entities: EntitySet) -> QueryAnalysis {
        QueryAnalysis {
            original_query: "질문".to_string(),
            entities,
            intent: IntentTag::GeneralSearch,
            expanded_query: "질문".to_string(),
            knowledge_match: None,
        }
    }

    #[test]
    fn test_threshold_on_lists() {
        let system = system();

        assert!(system.should_use_fallback(&RetrievalResult::List(vec![])));
        assert!(system.should_use_fallback(&RetrievalResult::List(vec![item("a")])));
        assert!(!system.should_use_fallback(&RetrievalResult::List(vec![
            item("a"),
            item("b"),
            item("c"),
        ])));
    }

    #[test]
    fn test_threshold_on_recommendations() {
        let system = system();
        let thin = RetrievalResult::Recommendation(SymptomRecommendation {
            symptom: "피로".to_string(),
            recommendations: vec![],
            message: "없음".to_string(),
        });
        assert!(system.should_use_fallback(&thin));

        let full = RetrievalResult::Recommendation(SymptomRecommendation {
            symptom: "피로".to_string(),
            recommendations: vec![
                RecommendedProduct {
                    product_name: "a".to_string(),
                    company_name: "b".to_string(),
                    primary_function: "c".to_string(),
                    key_ingredients: vec![],
                    relevance_score: 1.0,
                },
                RecommendedProduct {
                    product_name: "d".to_string(),
                    company_name: "e".to_string(),
                    primary_function: "f".to_string(),
                    key_ingredients: vec![],
                    relevance_score: 0.9,
                },
            ],
            message: "2개".to_string(),
        });
        assert!(!system.should_use_fallback(&full));
    }

    #[test]
    fn test_timing_results_never_trigger() {
        let system = system();
        let timing = RetrievalResult::Timing(TimingRecommendation {
            ingredient: "가르시니아".to_string(),
            timing_type: None,
            reason: None,
            avoid_with: vec![],
            recommended_times: vec![],
            has_timing_info: false,
        });
        assert!(!system.should_use_fallback(&timing));
    }

    #[test]
    fn test_category_branch() {
        let system = system();
        let analysis = analysis_with(EntitySet::default());
        let payload = system.generate("요즘 피로가 심해요", &analysis);

        match payload {
            FallbackPayload::Category { category, related_faqs, .. } => {
                assert_eq!(category, "피로/활력/무기력");
                assert!(related_faqs.len() <= 3);
                assert!(!related_faqs.is_empty());
            }
            other => panic!("expected category fallback, got {other:?}"),
        }
    }

    #[test]
    fn test_symptom_branch() {
        let system = system();
        let analysis = analysis_with(EntitySet {
            symptoms: vec!["수면".to_string()],
            ..EntitySet::default()
        });
        // The raw query matches no category, so the symptom entity decides.
        let payload = system.generate("밤에 뒤척여요", &analysis);

        match payload {
            FallbackPayload::SymptomGuidance { detected_symptom, recommended_nutrients, .. } => {
                assert_eq!(detected_symptom, "수면");
                assert!(recommended_nutrients.iter().any(|n| n == "마그네슘"));
            }
            other => panic!("expected symptom guidance, got {other:?}"),
        }
    }

    #[test]
    fn test_ingredient_branch() {
        let system = system();
        let analysis = analysis_with(EntitySet {
            ingredients: vec!["칼슘".to_string()],
            ..EntitySet::default()
        });
        let payload = system.generate("이것 좀 알려줘", &analysis);

        match payload {
            FallbackPayload::IngredientGuidance { detected_ingredient, avoid_with, .. } => {
                assert_eq!(detected_ingredient, "칼슘");
                assert!(avoid_with.iter().any(|i| i == "철분"));
            }
            other => panic!("expected ingredient guidance, got {other:?}"),
        }
    }

    #[test]
    fn test_generic_branch() {
        let system = system();
        let analysis = analysis_with(EntitySet::default());
        let payload = system.generate("음", &analysis);

        match payload {
            FallbackPayload::Generic { suggestions, examples, .. } => {
                assert_eq!(suggestions.len(), 5);
                assert_eq!(examples.len(), 4);
            }
            other => panic!("expected generic fallback, got {other:?}"),
        }
    }

    #[test]
    fn test_enhancement_blocks() {
        let system = system();
        let analysis = analysis_with(EntitySet {
            symptoms: vec!["피로".to_string()],
            ingredients: vec!["칼슘".to_string()],
            ..EntitySet::default()
        });

        let info = system.enhance(&analysis).unwrap();
        let symptom_guide = info.symptom_guide.unwrap();
        assert_eq!(symptom_guide.symptom, "피로");

        let interaction = info.interaction_guide.unwrap();
        assert!(interaction.synergy_with.iter().any(|i| i == "비타민D"));

        let timing = info.timing_guide.unwrap();
        assert!(timing.timing.contains("저녁"));
    }

    #[test]
    fn test_enhancement_empty_when_no_entities() {
        let system = system();
        let analysis = analysis_with(EntitySet::default());
        assert!(system.enhance(&analysis).is_none());
    }
}
