use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nutriq::backends::memory::{
    StaticRecommendationBackend, StaticRetrievalBackend, StaticWebSearch,
};
use nutriq::backends::timing::RuleTimingAdvisor;
use nutriq::backends::WebSearchBackend;
use nutriq::{IntelligentSearchEngine, NutriqConfig, SearchFlags};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env().add_directive("nutriq=info".parse()?),
        )
        .init();

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if query.is_empty() {
        eprintln!("usage: nutriq-search <query>");
        eprintln!("example: nutriq-search 눈이 피로해요");
        std::process::exit(2);
    }

    let config = NutriqConfig::from_env();
    let top_k = config.default_top_k;

    let web_search: Option<Arc<dyn WebSearchBackend>> = config
        .web_search_enabled
        .then(|| Arc::new(StaticWebSearch::sample()) as Arc<dyn WebSearchBackend>);

    let flags = SearchFlags {
        enable_web_search: config.web_search_enabled,
        web_search_max_results: config.web_search_max_results,
        ..SearchFlags::default()
    };

    let engine = IntelligentSearchEngine::new(
        config,
        Arc::new(StaticRetrievalBackend::new()),
        Arc::new(StaticRecommendationBackend::new()),
        Arc::new(RuleTimingAdvisor::new()),
        web_search,
    );

    let response = engine.intelligent_search(&query, top_k, &flags).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
