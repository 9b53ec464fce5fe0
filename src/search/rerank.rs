use chrono::{Datelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, info};

use super::models::{RankedItem, ScoreBreakdown};
use crate::backends::ScoredItem;

lazy_static! {
    static ref REPORT_DATE_RE: Regex = Regex::new(r"^\d{8}$").expect("valid report date pattern");
}

// Name keywords treated as a popularity proxy, 0.2 each, capped at 1.0.
const POPULAR_KEYWORDS: &[&str] = &[
    "비타민", "오메가", "프로바이오틱스", "유산균", "칼슘",
    "마그네슘", "루테인", "홍삼", "프로폴리스", "콜라겐",
];

const TRUSTED_COMPANIES: &[&str] = &[
    "종근당", "유한양행", "대웅제약", "동아제약", "한미약품",
    "GC녹십자", "일양약품", "광동제약", "한국야쿠르트", "CJ제일제당",
];

#[derive(Debug, Clone, Copy)]
pub struct RerankWeights {
    pub base: f64,
    pub popularity: f64,
    pub trust: f64,
    pub recency: f64,
}

impl Default for RerankWeights {
    fn default() -> Self {
        Self { base: 0.6, popularity: 0.2, trust: 0.1, recency: 0.1 }
    }
}

/// Recomputes a composite relevance score from the retrieval score plus
/// popularity, manufacturer trust and report recency. Sorting is stable, so
/// equal composites keep their incoming order.
pub struct ResultReRanker {
    weights: RerankWeights,
}

impl ResultReRanker {
    pub fn new(weights: RerankWeights) -> Self {
        info!("Re-ranker initialized: {} trusted companies", TRUSTED_COMPANIES.len());
        Self { weights }
    }

    pub fn rerank(&self, results: &[ScoredItem]) -> Vec<RankedItem> {
        if results.is_empty() {
            return Vec::new();
        }

        debug!("re-ranking {} results", results.len());

        let current_year = Utc::now().year();
        let mut ranked: Vec<RankedItem> = results
            .iter()
            .map(|item| {
                let breakdown = ScoreBreakdown {
                    base: item.score,
                    popularity: popularity_score(&item.product_name),
                    trust: trust_score(&item.company_name),
                    recency: recency_score(item.report_date.as_deref(), current_year),
                };
                let rerank_score = self.weights.base * breakdown.base
                    + self.weights.popularity * breakdown.popularity
                    + self.weights.trust * breakdown.trust
                    + self.weights.recency * breakdown.recency;
                RankedItem { item: item.clone(), rerank_score, score_breakdown: breakdown }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.rerank_score
                .partial_cmp(&a.rerank_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        ranked
    }

    /// Standard rerank followed by a greedy per-group cap; items over the cap
    /// are appended afterwards in reranked order, so the output is always a
    /// permutation of the input.
    pub fn rerank_with_diversity<F>(
        &self,
        results: &[ScoredItem],
        group_key: F,
        max_per_group: usize,
    ) -> Vec<RankedItem>
    where
        F: Fn(&ScoredItem) -> &str,
    {
        let ranked = self.rerank(results);

        let mut selected: Vec<RankedItem> = Vec::with_capacity(ranked.len());
        let mut deferred: Vec<RankedItem> = Vec::new();
        let mut group_counts: HashMap<String, usize> = HashMap::new();

        for item in ranked {
            let group = group_key(&item.item).to_string();
            let count = group_counts.entry(group).or_insert(0);
            if *count < max_per_group {
                *count += 1;
                selected.push(item);
            } else {
                deferred.push(item);
            }
        }

        debug!(
            "diversity re-ranking: {} selected, {} deferred",
            selected.len(),
            deferred.len()
        );

        selected.extend(deferred);
        selected
    }
}

impl Default for ResultReRanker {
    fn default() -> Self {
        Self::new(RerankWeights::default())
    }
}

fn popularity_score(product_name: &str) -> f64 {
    let mut score: f64 = 0.0;
    for keyword in POPULAR_KEYWORDS {
        if product_name.contains(keyword) {
            score += 0.2;
        }
    }
    score.min(1.0)
}

fn trust_score(company_name: &str) -> f64 {
    if TRUSTED_COMPANIES.iter().any(|trusted| company_name.contains(trusted)) {
        1.0
    } else {
        0.5
    }
}

fn recency_score(report_date: Option<&str>, current_year: i32) -> f64 {
    let Some(date) = report_date else { return 0.5 };
    if !REPORT_DATE_RE.is_match(date) {
        return 0.5;
    }
    let Ok(year) = date[..4].parse::<i32>() else { return 0.5 };

    let age = current_year - year;
    if age <= 5 {
        1.0
    } else if age <= 10 {
        0.7
    } else {
        0.3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, company: &str, score: f64, date: Option<&str>) -> ScoredItem {
        ScoredItem {
            product_id: format!("ID-{name}"),
            product_name: name.to_string(),
            company_name: company.to_string(),
            primary_function: "건강 유지".to_string(),
            raw_materials: "원료".to_string(),
            report_date: date.map(str::to_string),
            score,
        }
    }

    #[test]
    fn test_composite_score_weighting() {
        let reranker = ResultReRanker::default();
        let ranked = reranker.rerank(&[item("루테인 플러스", "종근당", 1.0, None)]);

        let breakdown = &ranked[0].score_breakdown;
        assert_eq!(breakdown.base, 1.0);
        assert_eq!(breakdown.popularity, 0.2);
        assert_eq!(breakdown.trust, 1.0);
        assert_eq!(breakdown.recency, 0.5);

        let expected = 0.6 * 1.0 + 0.2 * 0.2 + 0.1 * 1.0 + 0.1 * 0.5;
        assert!((ranked[0].rerank_score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_popularity_capped() {
        // Six popular keywords at 0.2 each would exceed 1.0 without the cap.
        let name = "비타민 오메가 유산균 칼슘 마그네슘 루테인";
        assert_eq!(popularity_score(name), 1.0);
    }

    #[test]
    fn test_trust_defaults_to_half() {
        assert_eq!(trust_score("무명건강"), 0.5);
        assert_eq!(trust_score("(주)종근당건강"), 1.0);
    }

    #[test]
    fn test_recency_bands() {
        assert_eq!(recency_score(Some("20240101"), 2026), 1.0);
        assert_eq!(recency_score(Some("20180101"), 2026), 0.7);
        assert_eq!(recency_score(Some("20100101"), 2026), 0.3);
        assert_eq!(recency_score(Some("not-a-date"), 2026), 0.5);
        assert_eq!(recency_score(None, 2026), 0.5);
    }

    #[test]
    fn test_stable_order_on_ties() {
        let reranker = ResultReRanker::default();
        let results = vec![
            item("제품가", "무명가", 1.0, None),
            item("제품나", "무명나", 1.0, None),
            item("제품다", "무명다", 1.0, None),
        ];
        let ranked = reranker.rerank(&results);
        let names: Vec<&str> = ranked.iter().map(|r| r.item.product_name.as_str()).collect();
        assert_eq!(names, vec!["제품가", "제품나", "제품다"]);
    }

    #[test]
    fn test_diversity_cap_preserves_length() {
        let reranker = ResultReRanker::default();
        let results = vec![
            item("비타민1", "종근당", 2.0, Some("20240101")),
            item("비타민2", "종근당", 1.9, Some("20240101")),
            item("비타민3", "종근당", 1.8, Some("20240101")),
            item("비타민4", "종근당", 1.7, Some("20240101")),
            item("오메가1", "유한양행", 1.6, Some("20240101")),
            item("오메가2", "유한양행", 1.5, Some("20240101")),
        ];

        let ranked = reranker.rerank_with_diversity(&results, |i| i.company_name.as_str(), 2);

        assert_eq!(ranked.len(), results.len());

        // No prefix of the capped region holds more than two of a company.
        let head: Vec<&str> = ranked[..4].iter().map(|r| r.item.company_name.as_str()).collect();
        assert_eq!(head.iter().filter(|c| **c == "종근당").count(), 2);
        assert_eq!(head.iter().filter(|c| **c == "유한양행").count(), 2);

        // The deferred overflow items arrive at the tail in reranked order.
        assert_eq!(ranked[4].item.product_name, "비타민3");
        assert_eq!(ranked[5].item.product_name, "비타민4");
    }
}
