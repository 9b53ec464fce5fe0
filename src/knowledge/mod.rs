pub mod defaults;
pub mod interactions;
pub mod nutrients;

use serde::{Deserialize, Serialize};
use tracing::info;

use defaults::{CategoryGuide, DEFAULT_RECOMMENDATIONS};
use interactions::INGREDIENT_INTERACTIONS;
use nutrients::SYMPTOM_NUTRIENTS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FaqPair {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecommendation {
    pub category: String,
    pub message: String,
    pub products: Vec<String>,
    pub tips: Vec<String>,
    pub faqs: Vec<FaqPair>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutrientGuidance {
    pub nutrients: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionInfo {
    pub ingredient: String,
    pub timing: String,
    pub synergy_with: Vec<String>,
    pub avoid_with: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingGuide {
    pub ingredient: String,
    pub timing: String,
}

/// Read-only lookup tables for the supplement domain, built once at startup.
pub struct HealthKnowledgeBase;

impl HealthKnowledgeBase {
    pub fn new() -> Self {
        info!(
            "Knowledge base loaded: {} categories, {} symptom mappings, {} interactions",
            DEFAULT_RECOMMENDATIONS.len(),
            SYMPTOM_NUTRIENTS.len(),
            INGREDIENT_INTERACTIONS.len()
        );
        Self
    }

    pub fn default_recommendation(&self, query: &str) -> Option<CategoryRecommendation> {
        DEFAULT_RECOMMENDATIONS
            .iter()
            .find(|guide| guide.category.split('/').any(|keyword| query.contains(keyword)))
            .map(to_recommendation)
    }

    pub fn nutrients_for_symptom(&self, text: &str) -> Option<NutrientGuidance> {
        SYMPTOM_NUTRIENTS
            .iter()
            .find(|entry| text.contains(entry.keyword))
            .map(|entry| NutrientGuidance {
                nutrients: to_strings(entry.nutrients),
                description: entry.description.to_string(),
            })
    }

    pub fn interaction_info(&self, ingredient: &str) -> Option<InteractionInfo> {
        INGREDIENT_INTERACTIONS
            .iter()
            .find(|entry| entry.ingredient == ingredient)
            .map(|entry| InteractionInfo {
                ingredient: entry.ingredient.to_string(),
                timing: entry.timing.to_string(),
                synergy_with: to_strings(entry.synergy_with),
                avoid_with: to_strings(entry.avoid_with),
            })
    }

    pub fn timing_recommendation(&self, ingredient: &str) -> Option<TimingGuide> {
        INGREDIENT_INTERACTIONS
            .iter()
            .find(|entry| entry.ingredient == ingredient)
            .map(|entry| TimingGuide {
                ingredient: entry.ingredient.to_string(),
                timing: entry.timing.to_string(),
            })
    }

    pub fn all_symptom_keywords(&self) -> Vec<String> {
        let mut keywords = Vec::new();
        for guide in DEFAULT_RECOMMENDATIONS {
            for keyword in guide.category.split('/') {
                if !keywords.iter().any(|k| k == keyword) {
                    keywords.push(keyword.to_string());
                }
            }
        }
        keywords
    }

    pub fn all_ingredients(&self) -> Vec<String> {
        let mut ingredients = Vec::new();
        for guide in DEFAULT_RECOMMENDATIONS {
            for product in guide.products {
                if !ingredients.iter().any(|i| i == product) {
                    ingredients.push((*product).to_string());
                }
            }
        }
        ingredients
    }
}

impl Default for HealthKnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

fn to_recommendation(guide: &CategoryGuide) -> CategoryRecommendation {
    CategoryRecommendation {
        category: guide.category.to_string(),
        message: guide.message.to_string(),
        products: to_strings(guide.products),
        tips: to_strings(guide.tips),
        faqs: guide
            .faqs
            .iter()
            .map(|(question, answer)| FaqPair {
                question: (*question).to_string(),
                answer: (*answer).to_string(),
            })
            .collect(),
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symptom_nutrient_mapping() {
        let kb = HealthKnowledgeBase::new();
        let guidance = kb.nutrients_for_symptom("눈이 피로해요").unwrap();
        assert!(guidance.nutrients.iter().any(|n| n == "루테인"));
    }

    #[test]
    fn test_generic_fatigue_mapping() {
        let kb = HealthKnowledgeBase::new();
        let guidance = kb.nutrients_for_symptom("피로").unwrap();
        assert!(guidance.nutrients.iter().any(|n| n == "비타민B"));
    }

    #[test]
    fn test_interaction_info() {
        let kb = HealthKnowledgeBase::new();
        let info = kb.interaction_info("칼슘").unwrap();
        assert!(info.avoid_with.iter().any(|i| i == "철분"));
        assert!(info.synergy_with.iter().any(|i| i == "비타민D"));
    }

    #[test]
    fn test_timing_recommendation() {
        let kb = HealthKnowledgeBase::new();
        let guide = kb.timing_recommendation("칼슘").unwrap();
        assert!(guide.timing.contains("저녁"));
    }

    #[test]
    fn test_category_match() {
        let kb = HealthKnowledgeBase::new();
        let rec = kb.default_recommendation("요즘 너무 피로해요").unwrap();
        assert_eq!(rec.category, "피로/활력/무기력");
        assert!(!rec.faqs.is_empty());
    }

    #[test]
    fn test_no_category_match() {
        let kb = HealthKnowledgeBase::new();
        assert!(kb.default_recommendation("안녕하세요").is_none());
    }

    #[test]
    fn test_vocabularies_disjoint_from_body_parts() {
        let kb = HealthKnowledgeBase::new();
        // Bare body-part words must stay out of the symptom vocabulary so the
        // extractor can attribute them to body_parts.
        let keywords = kb.all_symptom_keywords();
        assert!(!keywords.iter().any(|k| k == "눈"));
        assert!(keywords.iter().any(|k| k == "피로"));
    }

    #[test]
    fn test_all_ingredients_contains_longest_variants() {
        let kb = HealthKnowledgeBase::new();
        let ingredients = kb.all_ingredients();
        assert!(ingredients.iter().any(|i| i == "비타민B"));
        assert!(ingredients.iter().any(|i| i == "비타민B12"));
        assert!(ingredients.iter().any(|i| i == "마그네슘"));
    }
}
