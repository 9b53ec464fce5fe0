pub mod analyzer;
pub mod cache;
pub mod engine;
pub mod entities;
pub mod expansion;
pub mod fallback;
pub mod intent;
pub mod models;
pub mod rerank;
pub mod router;

pub use analyzer::QueryAnalyzer;
pub use cache::{CacheStats, SearchCache};
pub use engine::IntelligentSearchEngine;
pub use entities::EntityExtractor;
pub use expansion::QueryExpander;
pub use fallback::FallbackSystem;
pub use intent::IntentClassifier;
pub use models::{
    AdditionalInfo, EntitySet, FallbackPayload, IntentTag, QueryAnalysis, RankedItem,
    ResultSet, RoutedOperation, RoutingDecision, RoutingRationale, ScoreBreakdown,
    SearchFlags, SearchResponse, SymptomGuide,
};
pub use rerank::{RerankWeights, ResultReRanker};
pub use router::SmartRouter;
