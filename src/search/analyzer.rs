use std::sync::Arc;
use tracing::{debug, info};

use super::entities::EntityExtractor;
use super::expansion::QueryExpander;
use super::intent::IntentClassifier;
use super::models::QueryAnalysis;
use crate::knowledge::HealthKnowledgeBase;
use crate::utils::clip_for_log;

/// Composes entity extraction, intent classification, query expansion and the
/// knowledge-base symptom lookup into one analysis record. Never fails:
/// absence of matches yields empty fields.
pub struct QueryAnalyzer {
    kb: Arc<HealthKnowledgeBase>,
    entity_extractor: EntityExtractor,
    intent_classifier: IntentClassifier,
    query_expander: QueryExpander,
}

impl QueryAnalyzer {
    pub fn new(kb: Arc<HealthKnowledgeBase>, query_expander: QueryExpander) -> Self {
        let entity_extractor = EntityExtractor::new(&kb);
        info!("Query analyzer initialized");
        Self {
            kb,
            entity_extractor,
            intent_classifier: IntentClassifier::new(),
            query_expander,
        }
    }

    pub fn analyze(&self, query: &str) -> QueryAnalysis {
        debug!("analyzing query: '{}'", clip_for_log(query, 60));

        let entities = self.entity_extractor.extract(query);
        let intent = self.intent_classifier.classify(query, &entities);
        let expanded_query = self.query_expander.expand(query, &entities);

        // The lookup is keyed by the raw query so compound phrasings like
        // "눈이 피로해요" can resolve to the more specific guidance.
        let knowledge_match = if entities.symptoms.is_empty() {
            None
        } else {
            self.kb.nutrients_for_symptom(query)
        };

        debug!(
            "analysis complete: intent={:?}, {} entities, knowledge_match={}",
            intent,
            entities.total(),
            knowledge_match.is_some()
        );

        QueryAnalysis {
            original_query: query.to_string(),
            entities,
            intent,
            expanded_query,
            knowledge_match,
        }
    }
}
