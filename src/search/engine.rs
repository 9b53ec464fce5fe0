use futures::future::OptionFuture;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::analyzer::QueryAnalyzer;
use super::cache::{CacheStats, SearchCache};
use super::expansion::QueryExpander;
use super::fallback::FallbackSystem;
use super::models::{ResultSet, SearchFlags, SearchResponse};
use super::rerank::ResultReRanker;
use super::router::SmartRouter;
use crate::backends::{
    RecommendationBackend, RetrievalBackend, RetrievalResult, TimingBackend, WebSearchBackend,
    WebSearchResult,
};
use crate::core::{NutriqConfig, NutriqError, Result};
use crate::knowledge::HealthKnowledgeBase;
use crate::utils::clip_for_log;

/// Sequences analysis, optional web search, routing, fallback evaluation,
/// conditional re-ranking and response composition. Web search and routing
/// are data-independent after analysis, so they run joined; only the web
/// stage has localized failure containment.
pub struct IntelligentSearchEngine {
    config: NutriqConfig,
    analyzer: QueryAnalyzer,
    router: SmartRouter,
    fallback: FallbackSystem,
    reranker: ResultReRanker,
    web_search: Option<Arc<dyn WebSearchBackend>>,
    cache: SearchCache<SearchResponse>,
}

impl IntelligentSearchEngine {
    pub fn new(
        config: NutriqConfig,
        retrieval: Arc<dyn RetrievalBackend>,
        recommendation: Arc<dyn RecommendationBackend>,
        timing: Arc<dyn TimingBackend>,
        web_search: Option<Arc<dyn WebSearchBackend>>,
    ) -> Self {
        let kb = Arc::new(HealthKnowledgeBase::new());
        let expander = QueryExpander::new(config.max_synonyms, config.include_context);
        let analyzer = QueryAnalyzer::new(Arc::clone(&kb), expander);
        let router = SmartRouter::new(retrieval, recommendation, timing);
        let fallback = FallbackSystem::new(Arc::clone(&kb), config.fallback_threshold);
        let cache = SearchCache::new(config.cache_size, config.cache_ttl);

        info!("Intelligent search engine initialized");

        Self {
            config,
            analyzer,
            router,
            fallback,
            reranker: ResultReRanker::default(),
            web_search,
            cache,
        }
    }

    pub async fn intelligent_search(
        &self,
        query: &str,
        top_k: usize,
        flags: &SearchFlags,
    ) -> Result<SearchResponse> {
        let query = query.trim();
        if query.is_empty() {
            return Err(NutriqError::Validation("query must not be empty".to_string()));
        }
        if top_k == 0 || top_k > self.config.max_top_k {
            return Err(NutriqError::Validation(format!(
                "top_k must be between 1 and {}",
                self.config.max_top_k
            )));
        }

        let cache_key = SearchCache::<SearchResponse>::response_key(query, top_k, flags);
        if let Some(cached) = self.cache.get(&cache_key) {
            debug!("cache hit for '{}'", clip_for_log(query, 40));
            return Ok(cached);
        }

        info!("intelligent search: '{}'", clip_for_log(query, 60));

        // 1. Analyze; never fails.
        let analysis = self.analyzer.analyze(query);

        // 2 + 3. Web search (original query) and routed retrieval are issued
        // together; both depend only on the analysis.
        let web_future: OptionFuture<_> = flags
            .enable_web_search
            .then(|| self.run_web_search(query, flags.web_search_max_results))
            .into();
        let (web_outcome, routed) =
            futures::join!(web_future, self.router.route(&analysis, top_k));

        let (routing, result) = routed?;
        let web_results = match web_outcome {
            Some(Ok(results)) => results,
            Some(Err(e)) => {
                warn!("web search failed (continuing): {}", e);
                Vec::new()
            }
            None => Vec::new(),
        };
        let web_search_enabled = !web_results.is_empty();

        // 4. Fallback never overwrites the routed result; the payload rides
        // along as a distinguished field.
        let mut fallback_used = false;
        let mut fallback_payload = None;
        if flags.enable_fallback && self.fallback.should_use_fallback(&result) {
            fallback_payload = Some(self.fallback.generate(query, &analysis));
            fallback_used = true;
        }

        // 5. Re-rank only list-shaped, non-empty results.
        let results = match result {
            RetrievalResult::List(items) if flags.enable_reranking && !items.is_empty() => {
                let ranked = if flags.enable_diversity {
                    self.reranker.rerank_with_diversity(
                        &items,
                        |item| item.company_name.as_str(),
                        self.config.max_per_company,
                    )
                } else {
                    self.reranker.rerank(&items)
                };
                ResultSet::Ranked(ranked)
            }
            other => ResultSet::from(other),
        };

        // 6. Enhancement only when fallback did not already carry guidance.
        let additional_info = if fallback_used {
            None
        } else {
            self.fallback.enhance(&analysis)
        };

        let response = SearchResponse {
            request_id: Uuid::new_v4().to_string(),
            query_analysis: analysis,
            routing,
            results,
            fallback_used,
            fallback: fallback_payload,
            web_search_enabled,
            web_results,
            additional_info,
        };

        self.cache.set(&cache_key, response.clone());

        info!(
            "search complete: fallback={}, web={}",
            fallback_used, web_search_enabled
        );

        Ok(response)
    }

    async fn run_web_search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<WebSearchResult>> {
        let Some(backend) = self.web_search.as_ref() else {
            return Ok(Vec::new());
        };

        let timeout = Duration::from_secs(self.config.web_search_timeout);
        match tokio::time::timeout(timeout, backend.search(query, max_results)).await {
            Ok(Ok(results)) => Ok(results),
            Ok(Err(e)) => Err(NutriqError::WebSearch(e.to_string())),
            Err(_) => Err(NutriqError::WebSearch(format!(
                "timed out after {}s",
                self.config.web_search_timeout
            ))),
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
