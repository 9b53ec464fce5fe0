use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_CACHE_SIZE, DEFAULT_CACHE_TTL, DEFAULT_FALLBACK_THRESHOLD, DEFAULT_TOP_K, MAX_TOP_K,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutriqConfig {
    pub default_top_k: usize,
    pub max_top_k: usize,

    pub fallback_threshold: usize,

    pub max_synonyms: usize,
    pub include_context: bool,

    pub web_search_enabled: bool,
    pub web_search_max_results: usize,
    pub web_search_timeout: u64,

    pub max_per_company: usize,

    pub cache_size: usize,
    pub cache_ttl: u64,
}

impl NutriqConfig {
    pub fn new() -> Self {
        Self {
            default_top_k: DEFAULT_TOP_K,
            max_top_k: MAX_TOP_K,

            fallback_threshold: DEFAULT_FALLBACK_THRESHOLD,

            max_synonyms: 3,
            include_context: true,

            web_search_enabled: false,
            web_search_max_results: 5,
            web_search_timeout: 5,

            max_per_company: 2,

            cache_size: DEFAULT_CACHE_SIZE,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Some(top_k) = read_env("NUTRIQ_TOP_K") {
            config.default_top_k = top_k;
        }
        if let Some(max_top_k) = read_env("NUTRIQ_MAX_TOP_K") {
            config.max_top_k = max_top_k;
        }
        if let Some(threshold) = read_env("NUTRIQ_FALLBACK_THRESHOLD") {
            config.fallback_threshold = threshold;
        }
        if let Some(max_synonyms) = read_env("NUTRIQ_MAX_SYNONYMS") {
            config.max_synonyms = max_synonyms;
        }
        if let Ok(enabled) = std::env::var("NUTRIQ_WEB_SEARCH_ENABLED") {
            config.web_search_enabled = enabled.eq_ignore_ascii_case("true");
        }
        if let Some(max_results) = read_env("NUTRIQ_WEB_SEARCH_MAX_RESULTS") {
            config.web_search_max_results = max_results;
        }
        if let Some(timeout) = read_env("NUTRIQ_WEB_SEARCH_TIMEOUT") {
            config.web_search_timeout = timeout;
        }
        if let Some(size) = read_env("NUTRIQ_CACHE_SIZE") {
            config.cache_size = size;
        }
        if let Some(ttl) = read_env("NUTRIQ_CACHE_TTL") {
            config.cache_ttl = ttl;
        }

        config
    }
}

impl Default for NutriqConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
