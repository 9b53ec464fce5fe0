use lazy_static::lazy_static;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

use super::models::EntitySet;

lazy_static! {
    pub static ref SYNONYM_MAP: HashMap<&'static str, Vec<&'static str>> = {
        let mut m = HashMap::new();

        // Symptoms and conditions
        m.insert("피로", vec!["피곤", "지침", "무기력", "기력저하", "활력저하", "에너지부족"]);
        m.insert("관절", vec!["무릎", "팔꿈치", "손목", "발목", "뼈마디", "관절통"]);
        m.insert("면역", vec!["면역력", "저항력", "방어력", "면역체계"]);
        m.insert("눈", vec!["시력", "안구", "눈건강", "시야", "안구건조", "눈피로"]);
        m.insert("소화", vec!["장", "위", "배", "소화기", "소화불량", "위장"]);
        m.insert("피부", vec!["피부건강", "미용", "탄력", "피부미용", "주름"]);
        m.insert("기억력", vec!["집중력", "두뇌", "인지기능", "기억", "치매예방"]);
        m.insert("혈액순환", vec!["혈행", "순환", "혈류", "혈액순환개선"]);
        m.insert("뼈", vec!["골밀도", "골다공증", "뼈건강", "골격"]);
        m.insert("간", vec!["간기능", "간건강", "해독", "간보호"]);
        m.insert("혈당", vec!["당뇨", "혈당조절", "인슐린", "당수치"]);
        m.insert("콜레스테롤", vec!["고지혈증", "혈중지질", "중성지방"]);
        m.insert("스트레스", vec!["긴장", "불안", "우울", "심리"]);
        m.insert("수면", vec!["불면증", "잠", "숙면", "수면장애"]);
        m.insert("변비", vec!["배변", "장운동", "변통"]);

        // Ingredients
        m.insert("비타민C", vec!["아스코르브산", "비타민씨", "비타민c", "Vitamin C"]);
        m.insert("비타민D", vec!["비타민디", "비타민d", "Vitamin D", "칼시페롤"]);
        m.insert("비타민B", vec!["비타민비", "비타민b", "Vitamin B", "비타민B군"]);
        m.insert("비타민B12", vec!["코발라민", "Cobalamin"]);
        m.insert("비타민E", vec!["토코페롤", "Vitamin E"]);
        m.insert("비타민A", vec!["레티놀", "Vitamin A"]);
        m.insert("오메가3", vec!["EPA", "DHA", "불포화지방산", "오메가-3", "omega3"]);
        m.insert("프로바이오틱스", vec!["유산균", "락토바실러스", "비피더스균", "probiotics"]);
        m.insert("루테인", vec!["지아잔틴", "Lutein", "제아잔틴"]);
        m.insert("칼슘", vec!["Ca", "칼슘제", "Calcium"]);
        m.insert("마그네슘", vec!["Mg", "마그네슘제", "Magnesium"]);
        m.insert("철분", vec!["Fe", "철", "Iron", "헤모글로빈"]);
        m.insert("아연", vec!["Zn", "Zinc"]);
        m.insert("코엔자임Q10", vec!["CoQ10", "유비퀴논", "코큐텐"]);
        m.insert("글루코사민", vec!["Glucosamine", "글루코사민황산염"]);
        m.insert("콘드로이틴", vec!["Chondroitin", "콘드로이친"]);
        m.insert("콜라겐", vec!["Collagen", "교원단백질"]);
        m.insert("히알루론산", vec!["Hyaluronic Acid", "히알루론"]);
        m.insert("레시틴", vec!["Lecithin", "포스파티딜콜린"]);
        m.insert("밀크씨슬", vec!["실리마린", "엉겅퀴"]);
        m.insert("홍삼", vec!["인삼", "고려인삼", "사포닌"]);
        m.insert("프로폴리스", vec!["벌집추출물", "Propolis"]);

        // Effects
        m.insert("항산화", vec!["산화방지", "노화방지", "활성산소제거"]);
        m.insert("항염", vec!["염증완화", "항염증", "소염"]);
        m.insert("해독", vec!["디톡스", "독소제거", "정화"]);

        m
    };
}

lazy_static! {
    pub static ref CONTEXT_KEYWORDS: HashMap<&'static str, Vec<&'static str>> = {
        let mut m = HashMap::new();
        m.insert("눈", vec!["시력보호", "안구건조", "눈피로", "황반변성"]);
        m.insert("관절", vec!["연골", "관절염", "류마티스"]);
        m.insert("피부", vec!["콜라겐", "탄력", "주름개선", "보습"]);
        m.insert("간", vec!["간기능개선", "숙취해소", "해독"]);
        m.insert("면역", vec!["감기예방", "바이러스", "항균"]);
        m.insert("뼈", vec!["골다공증예방", "칼슘흡수"]);
        m.insert("혈액순환", vec!["혈전예방", "혈관건강"]);
        m
    };
}

const CONTEXT_TERMS_PER_KEY: usize = 2;
const BOOSTED_SYNONYMS_PER_KEY: usize = 2;

/// Bounded synonym/context expansion. The expanded string always starts with
/// the original tokens in their original order; everything added afterwards
/// is sorted so the output is deterministic.
pub struct QueryExpander {
    max_synonyms: usize,
    include_context: bool,
}

impl QueryExpander {
    pub fn new(max_synonyms: usize, include_context: bool) -> Self {
        info!(
            "Query expander initialized: {} synonym families, {} context keys",
            SYNONYM_MAP.len(),
            CONTEXT_KEYWORDS.len()
        );
        Self { max_synonyms, include_context }
    }

    pub fn expand(&self, query: &str, entities: &EntitySet) -> String {
        let original_words: Vec<&str> = query.split_whitespace().collect();

        let mut terms: BTreeSet<String> =
            original_words.iter().map(|w| (*w).to_string()).collect();

        // Keys found verbatim in the query.
        for (key, synonyms) in SYNONYM_MAP.iter() {
            if query.contains(key) {
                terms.insert((*key).to_string());
                for synonym in synonyms.iter().take(self.max_synonyms) {
                    terms.insert((*synonym).to_string());
                }
            }
        }

        // Extracted entities get the same treatment, even when they were not
        // present as a standalone token.
        let entity_values = entities
            .symptoms
            .iter()
            .chain(&entities.ingredients)
            .chain(&entities.body_parts);
        for value in entity_values {
            if let Some(synonyms) = SYNONYM_MAP.get(value.as_str()) {
                terms.insert(value.clone());
                for synonym in synonyms.iter().take(self.max_synonyms) {
                    terms.insert((*synonym).to_string());
                }
            }
        }

        if self.include_context {
            for (key, context_terms) in CONTEXT_KEYWORDS.iter() {
                let in_query = query.contains(key);
                let in_body_parts = entities.body_parts.iter().any(|p| p == key);
                if in_query || in_body_parts {
                    for term in context_terms.iter().take(CONTEXT_TERMS_PER_KEY) {
                        terms.insert((*term).to_string());
                    }
                }
            }
        }

        // Original tokens first, each consumed once; the remainder drains in
        // lexicographic order.
        let mut ordered: Vec<String> = Vec::with_capacity(terms.len());
        for word in &original_words {
            if terms.remove(*word) {
                ordered.push((*word).to_string());
            }
        }
        ordered.extend(terms);

        let expanded = ordered.join(" ");
        debug!(
            "expanded query: {} -> {} terms",
            original_words.len(),
            ordered.len()
        );

        expanded
    }

    /// Weighted terms for consumers that prefer boosting over a flat string:
    /// literal tokens at 2.0, direct synonyms of matched keys at 1.5.
    pub fn boosted_terms(&self, query: &str) -> HashMap<String, f64> {
        let mut boosted: HashMap<String, f64> = HashMap::new();

        for word in query.split_whitespace() {
            boosted.insert(word.to_string(), 2.0);
        }

        for (key, synonyms) in SYNONYM_MAP.iter() {
            if query.contains(key) {
                boosted.insert((*key).to_string(), 2.0);
                for synonym in synonyms.iter().take(BOOSTED_SYNONYMS_PER_KEY) {
                    boosted.entry((*synonym).to_string()).or_insert(1.5);
                }
            }
        }

        boosted
    }
}

impl Default for QueryExpander {
    fn default() -> Self {
        Self::new(3, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_tokens_come_first() {
        let expander = QueryExpander::default();
        let expanded = expander.expand("피로 회복에 좋은 영양제", &EntitySet::default());

        let tokens: Vec<&str> = expanded.split_whitespace().collect();
        assert_eq!(&tokens[..4], &["피로", "회복에", "좋은", "영양제"]);
        assert!(tokens.len() > 4);
    }

    #[test]
    fn test_synonyms_bounded() {
        let expander = QueryExpander::new(2, false);
        let expanded = expander.expand("피로", &EntitySet::default());

        let tokens: Vec<&str> = expanded.split_whitespace().collect();
        // 피로 plus at most two synonyms.
        assert!(tokens.len() <= 3);
        assert_eq!(tokens[0], "피로");
    }

    #[test]
    fn test_entity_synonyms_added() {
        let expander = QueryExpander::new(3, false);
        let entities = EntitySet {
            ingredients: vec!["마그네슘".to_string()],
            ..EntitySet::default()
        };
        // The entity value re-enters expansion even though the query spells
        // it inside a particle-joined token.
        let expanded = expander.expand("마그네슘은 언제 먹나요", &entities);
        assert!(expanded.contains("Mg"));
    }

    #[test]
    fn test_context_terms() {
        let expander = QueryExpander::new(3, true);
        let entities = EntitySet {
            body_parts: vec!["눈".to_string()],
            ..EntitySet::default()
        };
        let expanded = expander.expand("눈이 침침해요", &entities);
        assert!(expanded.contains("시력보호"));
        assert!(expanded.contains("안구건조"));
    }

    #[test]
    fn test_expansion_deterministic() {
        let expander = QueryExpander::default();
        let entities = EntitySet {
            symptoms: vec!["피로".to_string()],
            body_parts: vec!["눈".to_string()],
            ..EntitySet::default()
        };
        let first = expander.expand("눈이 피로해요", &entities);
        for _ in 0..5 {
            assert_eq!(expander.expand("눈이 피로해요", &entities), first);
        }
    }

    #[test]
    fn test_boosted_terms_weights() {
        let expander = QueryExpander::default();
        let boosted = expander.boosted_terms("피로 회복");

        assert_eq!(boosted.get("피로"), Some(&2.0));
        assert_eq!(boosted.get("회복"), Some(&2.0));
        // Direct synonyms of the matched key carry the lower weight.
        assert_eq!(boosted.get("피곤"), Some(&1.5));
    }
}
