pub mod backends;
pub mod core;
pub mod knowledge;
pub mod search;
pub mod utils;

pub use utils::{clip_chars, clip_for_log};

pub use core::config::NutriqConfig;
pub use core::error::{NutriqError, Result};
pub use knowledge::HealthKnowledgeBase;
pub use search::{
    IntelligentSearchEngine, IntentTag, QueryAnalysis, SearchFlags, SearchResponse,
};

pub const DEFAULT_TOP_K: usize = 5;

pub const MAX_TOP_K: usize = 50;

pub const DEFAULT_FALLBACK_THRESHOLD: usize = 2;

pub const DEFAULT_CACHE_SIZE: usize = 1000;

pub const DEFAULT_CACHE_TTL: u64 = 300;
