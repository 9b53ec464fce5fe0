use tracing::{debug, info};

use super::models::{EntitySet, IntentTag};

const INTENT_TRIGGERS: &[(IntentTag, &[&str])] = &[
    (IntentTag::SymptomSearch, &["아프", "통증", "불편", "힘들", "괴롭", "고통"]),
    (IntentTag::IngredientSearch, &["성분", "함유", "포함", "들어있", "함량", "원료"]),
    (IntentTag::TimingQuery, &["언제", "언제 먹", "시간", "타이밍", "먹", "먹어야", "복용", "섭취"]),
    (IntentTag::EffectQuery, &["효과", "효능", "도움", "좋", "개선"]),
    (IntentTag::ProductSearch, &["제품", "상품", "브랜드", "회사"]),
];

const ENTITY_BONUS: i32 = 2;

// Intents within this distance of the top score count as co-winners; more
// than one co-winner is reported as MIXED instead of picking arbitrarily.
const TIE_TOLERANCE: i32 = 1;

pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        info!("Intent classifier initialized: {} intents", INTENT_TRIGGERS.len());
        Self
    }

    pub fn classify(&self, text: &str, entities: &EntitySet) -> IntentTag {
        let mut scores: Vec<(IntentTag, i32)> = INTENT_TRIGGERS
            .iter()
            .map(|(intent, triggers)| {
                let score = triggers.iter().filter(|t| text.contains(*t)).count() as i32;
                (*intent, score)
            })
            .collect();

        for (intent, score) in &mut scores {
            match intent {
                IntentTag::IngredientSearch if !entities.ingredients.is_empty() => {
                    *score += ENTITY_BONUS;
                }
                IntentTag::SymptomSearch
                    if !entities.symptoms.is_empty() || !entities.body_parts.is_empty() =>
                {
                    *score += ENTITY_BONUS;
                }
                _ => {}
            }
        }

        let max_score = scores.iter().map(|(_, s)| *s).max().unwrap_or(0);
        if max_score == 0 {
            return IntentTag::GeneralSearch;
        }

        let top: Vec<IntentTag> = scores
            .iter()
            .filter(|(_, score)| *score >= max_score - TIE_TOLERANCE)
            .map(|(intent, _)| *intent)
            .collect();

        let intent = if top.len() > 1 { IntentTag::Mixed } else { top[0] };

        debug!("classified intent: {:?} (scores: {:?})", intent, scores);

        intent
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}
