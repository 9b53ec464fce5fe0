use tracing::{debug, info};

use super::models::EntitySet;
use crate::knowledge::HealthKnowledgeBase;

const BODY_PARTS: &[&str] = &[
    "눈", "귀", "코", "입", "목", "어깨", "팔", "손", "손목", "손가락",
    "가슴", "배", "허리", "등", "엉덩이", "다리", "무릎", "발", "발목",
    "머리", "뇌", "심장", "간", "위", "장", "신장", "폐", "피부", "뼈", "관절",
];

const EFFECT_KEYWORDS: &[&str] = &["개선", "완화", "예방", "강화", "증진", "회복", "보호", "유지"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Symptom,
    Ingredient,
    BodyPart,
    Effect,
}

/// Rule-based entity extraction with overlap protection: keywords are scanned
/// longest-first over a claimed-offset mask, so a span of text is attributed
/// to exactly one keyword and longer terms always beat their substrings.
pub struct EntityExtractor {
    keywords: Vec<(String, Category)>,
}

impl EntityExtractor {
    pub fn new(kb: &HealthKnowledgeBase) -> Self {
        let mut keywords: Vec<(String, Category)> = Vec::new();

        for keyword in kb.all_symptom_keywords() {
            keywords.push((keyword, Category::Symptom));
        }
        for keyword in kb.all_ingredients() {
            keywords.push((keyword, Category::Ingredient));
        }
        for keyword in BODY_PARTS {
            keywords.push(((*keyword).to_string(), Category::BodyPart));
        }
        for keyword in EFFECT_KEYWORDS {
            keywords.push(((*keyword).to_string(), Category::Effect));
        }

        // Stable sort: equal-length keywords keep the symptom → ingredient →
        // body-part → effect insertion order.
        keywords.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));

        info!("Entity extractor initialized: {} keywords", keywords.len());

        Self { keywords }
    }

    pub fn extract(&self, text: &str) -> EntitySet {
        let mut entities = EntitySet::default();
        let mut claimed = vec![false; text.len()];

        for (keyword, category) in &self.keywords {
            for (start, matched) in text.match_indices(keyword.as_str()) {
                let end = start + matched.len();
                if claimed[start..end].iter().any(|&taken| taken) {
                    continue;
                }
                claimed[start..end].iter_mut().for_each(|slot| *slot = true);
                push_unique(category_set(&mut entities, *category), keyword);
            }
        }

        debug!(
            "extracted entities: {} symptoms, {} ingredients, {} body parts, {} effects",
            entities.symptoms.len(),
            entities.ingredients.len(),
            entities.body_parts.len(),
            entities.effects.len()
        );

        entities
    }
}

fn category_set(entities: &mut EntitySet, category: Category) -> &mut Vec<String> {
    match category {
        Category::Symptom => &mut entities.symptoms,
        Category::Ingredient => &mut entities.ingredients,
        Category::BodyPart => &mut entities.body_parts,
        Category::Effect => &mut entities.effects,
    }
}

fn push_unique(set: &mut Vec<String>, keyword: &str) {
    if !set.iter().any(|existing| existing == keyword) {
        set.push(keyword.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> EntityExtractor {
        EntityExtractor::new(&HealthKnowledgeBase::new())
    }

    #[test]
    fn test_body_part_and_symptom() {
        let entities = extractor().extract("눈이 피로해요");
        assert!(entities.body_parts.iter().any(|e| e == "눈"));
        assert!(entities.symptoms.iter().any(|e| e == "피로"));
    }

    #[test]
    fn test_ingredient_extraction() {
        let entities = extractor().extract("비타민C가 필요해요");
        assert!(entities.ingredients.iter().any(|e| e == "비타민C"));
    }

    #[test]
    fn test_longest_match_wins() {
        // 비타민B12 and 비타민B are both in the vocabulary; only the longer
        // keyword may claim the span.
        let entities = extractor().extract("비타민B12 효능");
        assert!(entities.ingredients.iter().any(|e| e == "비타민B12"));
        assert!(!entities.ingredients.iter().any(|e| e == "비타민B"));
    }

    #[test]
    fn test_no_match_yields_empty_sets() {
        let entities = extractor().extract("안녕하세요");
        assert!(entities.is_empty());
    }

    #[test]
    fn test_repeated_keyword_deduplicated() {
        let entities = extractor().extract("피로 피로 피로");
        assert_eq!(
            entities.symptoms.iter().filter(|e| e.as_str() == "피로").count(),
            1
        );
    }

    #[test]
    fn test_spans_never_overlap() {
        // Reconstruct claimed spans and verify pairwise disjointness for a
        // text dense with overlapping vocabulary.
        let extractor = extractor();
        let text = "눈 피로에 좋은 비타민B12와 칼슘 마그네슘";
        let entities = extractor.extract(text);

        let mut spans: Vec<(usize, usize)> = Vec::new();
        for keyword in entities
            .symptoms
            .iter()
            .chain(&entities.ingredients)
            .chain(&entities.body_parts)
            .chain(&entities.effects)
        {
            for (start, matched) in text.match_indices(keyword.as_str()) {
                spans.push((start, start + matched.len()));
            }
        }
        for (i, a) in spans.iter().enumerate() {
            for b in &spans[i + 1..] {
                assert!(a.1 <= b.0 || b.1 <= a.0 || (a.0 == b.0 && a.1 == b.1));
            }
        }
    }
}
