use async_trait::async_trait;
use tracing::debug;

use super::{
    BackendResult, RecommendationBackend, RecommendedProduct, RetrievalBackend, ScoredItem,
    SymptomRecommendation, WebSearchBackend, WebSearchResult,
};

pub struct ProductRecord {
    pub product_id: &'static str,
    pub product_name: &'static str,
    pub company_name: &'static str,
    pub primary_function: &'static str,
    pub raw_materials: &'static str,
    pub report_date: &'static str,
}

pub const DEMO_PRODUCTS: &[ProductRecord] = &[
    ProductRecord {
        product_id: "HF-0001",
        product_name: "루테인 지아잔틴 164",
        company_name: "종근당",
        primary_function: "눈 건강에 도움(황반 색소 밀도 유지)",
        raw_materials: "마리골드꽃추출물(루테인), 지아잔틴, 해바라기유",
        report_date: "20230415",
    },
    ProductRecord {
        product_id: "HF-0002",
        product_name: "오메가3 1100",
        company_name: "유한양행",
        primary_function: "혈중 중성지질 개선, 혈행 개선, 눈 건강에 도움",
        raw_materials: "정제어유(EPA), 정제어유(DHA), 비타민E",
        report_date: "20220911",
    },
    ProductRecord {
        product_id: "HF-0003",
        product_name: "비타민C 1000",
        company_name: "고려은단",
        primary_function: "항산화, 면역력 증진에 도움",
        raw_materials: "비타민C, 스테아린산마그네슘",
        report_date: "20240102",
    },
    ProductRecord {
        product_id: "HF-0004",
        product_name: "마그네슘 375",
        company_name: "대웅제약",
        primary_function: "수면의 질 개선, 근육 기능 유지에 도움",
        raw_materials: "산화마그네슘, 비타민B6",
        report_date: "20230720",
    },
    ProductRecord {
        product_id: "HF-0005",
        product_name: "칼슘 마그네슘 비타민D",
        company_name: "일양약품",
        primary_function: "뼈 건강 유지에 도움",
        raw_materials: "탄산칼슘, 산화마그네슘, 비타민D3",
        report_date: "20190305",
    },
    ProductRecord {
        product_id: "HF-0006",
        product_name: "프로바이오틱스 생유산균",
        company_name: "한국야쿠르트",
        primary_function: "장 건강, 배변 활동에 도움",
        raw_materials: "락토바실러스 복합 유산균, 프락토올리고당",
        report_date: "20230228",
    },
    ProductRecord {
        product_id: "HF-0007",
        product_name: "밀크씨슬 실리마린",
        company_name: "내츄럴스토리",
        primary_function: "간 건강에 도움",
        raw_materials: "밀크씨슬추출물(실리마린), 비타민B1",
        report_date: "20110614",
    },
    ProductRecord {
        product_id: "HF-0008",
        product_name: "비타민B 컴플렉스",
        company_name: "종근당",
        primary_function: "에너지 대사, 피로 개선에 도움",
        raw_materials: "비타민B1, 비타민B2, 비타민B6, 비타민B12",
        report_date: "20240530",
    },
    ProductRecord {
        product_id: "HF-0009",
        product_name: "글루코사민 콘드로이틴 1500",
        company_name: "광동제약",
        primary_function: "관절 및 연골 건강에 도움",
        raw_materials: "글루코사민황산염, 콘드로이틴황산",
        report_date: "20150822",
    },
    ProductRecord {
        product_id: "HF-0010",
        product_name: "홍삼정 스틱",
        company_name: "한국인삼공사",
        primary_function: "면역력 증진, 피로 개선에 도움",
        raw_materials: "홍삼농축액(진세노사이드)",
        report_date: "20221110",
    },
];

/// In-memory retrieval backend over a fixed product table. Stands in for the
/// real index in tests and the demo binary; scoring is a keyword heuristic
/// normalized into the same [0, 2] range the live backend reports.
pub struct StaticRetrievalBackend {
    products: &'static [ProductRecord],
}

impl StaticRetrievalBackend {
    pub fn new() -> Self {
        Self { products: DEMO_PRODUCTS }
    }

    pub fn with_products(products: &'static [ProductRecord]) -> Self {
        Self { products }
    }

    fn keyword_score(record: &ProductRecord, query: &str) -> f64 {
        let mut score: f64 = 0.0;
        for token in query.split_whitespace() {
            if record.primary_function.contains(token) {
                score += 0.5;
            }
            if record.product_name.contains(token) {
                score += 0.4;
            }
            if record.raw_materials.contains(token) {
                score += 0.3;
            }
        }
        score.min(2.0)
    }

    fn to_item(record: &ProductRecord, score: f64) -> ScoredItem {
        ScoredItem {
            product_id: record.product_id.to_string(),
            product_name: record.product_name.to_string(),
            company_name: record.company_name.to_string(),
            primary_function: record.primary_function.to_string(),
            raw_materials: record.raw_materials.to_string(),
            report_date: Some(record.report_date.to_string()),
            score,
        }
    }
}

impl Default for StaticRetrievalBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RetrievalBackend for StaticRetrievalBackend {
    async fn hybrid_search(&self, query: &str, top_k: usize) -> BackendResult<Vec<ScoredItem>> {
        let mut results: Vec<ScoredItem> = self
            .products
            .iter()
            .map(|record| Self::to_item(record, Self::keyword_score(record, query)))
            .filter(|item| item.score > 0.0)
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(top_k);

        debug!("static hybrid search '{}' -> {} items", query, results.len());
        Ok(results)
    }

    async fn search_by_ingredient(
        &self,
        ingredient: &str,
        top_k: usize,
    ) -> BackendResult<Vec<ScoredItem>> {
        let mut results: Vec<ScoredItem> = self
            .products
            .iter()
            .filter_map(|record| {
                if record.raw_materials.contains(ingredient) {
                    Some(Self::to_item(record, 2.0))
                } else if record.product_name.contains(ingredient) {
                    Some(Self::to_item(record, 1.5))
                } else {
                    None
                }
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(top_k);
        Ok(results)
    }
}

/// Formats symptom matches from the product table into the recommendation
/// shape (named collection: `recommendations`).
pub struct StaticRecommendationBackend {
    retrieval: StaticRetrievalBackend,
}

impl StaticRecommendationBackend {
    pub fn new() -> Self {
        Self { retrieval: StaticRetrievalBackend::new() }
    }
}

impl Default for StaticRecommendationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecommendationBackend for StaticRecommendationBackend {
    async fn recommend_by_symptom(
        &self,
        symptom: &str,
        top_k: usize,
    ) -> BackendResult<SymptomRecommendation> {
        let matches = self.retrieval.hybrid_search(symptom, top_k).await?;

        if matches.is_empty() {
            return Ok(SymptomRecommendation {
                symptom: symptom.to_string(),
                recommendations: Vec::new(),
                message: "관련 영양제를 찾을 수 없습니다.".to_string(),
            });
        }

        let recommendations: Vec<RecommendedProduct> = matches
            .iter()
            .map(|item| RecommendedProduct {
                product_name: item.product_name.clone(),
                company_name: item.company_name.clone(),
                primary_function: item.primary_function.clone(),
                key_ingredients: key_ingredients(&item.raw_materials, 3),
                relevance_score: (item.score * 100.0).round() / 100.0,
            })
            .collect();

        Ok(SymptomRecommendation {
            symptom: symptom.to_string(),
            message: format!("{}개의 추천 제품을 찾았습니다.", recommendations.len()),
            recommendations,
        })
    }
}

/// Canned web results for tests and the demo binary.
pub struct StaticWebSearch {
    results: Vec<WebSearchResult>,
}

impl StaticWebSearch {
    pub fn new(results: Vec<WebSearchResult>) -> Self {
        Self { results }
    }

    pub fn sample() -> Self {
        let results = (1..=5)
            .map(|position| WebSearchResult {
                position,
                title: format!("영양제 가이드 {position}"),
                link: format!("https://example.com/guide/{position}"),
                snippet: "증상별 영양제 선택 기준을 정리한 글입니다.".to_string(),
                source: "web".to_string(),
            })
            .collect();
        Self { results }
    }
}

#[async_trait]
impl WebSearchBackend for StaticWebSearch {
    async fn search(
        &self,
        _query: &str,
        max_results: usize,
    ) -> BackendResult<Vec<WebSearchResult>> {
        Ok(self.results.iter().take(max_results).cloned().collect())
    }
}

fn key_ingredients(raw_materials: &str, limit: usize) -> Vec<String> {
    raw_materials
        .split(',')
        .map(|part| {
            let part = part.trim();
            let part = part.split('(').next().unwrap_or(part);
            part.trim_end_matches(')').trim()
        })
        .filter(|part| !part.is_empty())
        .take(limit)
        .map(str::to_string)
        .collect()
}
