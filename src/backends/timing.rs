use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::IntoStaticStr;
use tracing::{info, warn};

use super::{BackendResult, RecommendedTime, TimingBackend, TimingRecommendation};

struct TimingRule {
    ingredient: &'static str,
    timing_type: &'static str,
    reason: &'static str,
    avoid_with: &'static [&'static str],
    // (time, description, priority)
    recommended_times: &'static [(&'static str, &'static str, u8)],
}

const TIMING_RULES: &[TimingRule] = &[
    TimingRule {
        ingredient: "철분",
        timing_type: "공복",
        reason: "철분은 공복에 흡수율이 가장 높습니다.",
        avoid_with: &["칼슘", "커피", "차", "우유"],
        recommended_times: &[
            ("기상 직후", "아침 공복", 1),
            ("식사 30분 전", "점심 식사 전", 2),
        ],
    },
    TimingRule {
        ingredient: "비타민D",
        timing_type: "식후",
        reason: "비타민D는 지용성 비타민으로 지방과 함께 섭취 시 흡수율이 높습니다.",
        avoid_with: &[],
        recommended_times: &[
            ("아침 식사 후", "아침 식사 직후", 1),
            ("점심 식사 후", "점심 식사 직후", 2),
        ],
    },
    TimingRule {
        ingredient: "비타민C",
        timing_type: "식후",
        reason: "비타민C는 식후에 섭취하면 위장 자극을 줄일 수 있습니다.",
        avoid_with: &[],
        recommended_times: &[
            ("아침 식사 후", "아침 식사 직후", 1),
            ("저녁 식사 후", "저녁 식사 직후", 2),
        ],
    },
    TimingRule {
        ingredient: "칼슘",
        timing_type: "식후 또는 취침 전",
        reason: "칼슘은 식후나 취침 전에 섭취하면 흡수율이 좋습니다.",
        avoid_with: &["철분", "아연"],
        recommended_times: &[
            ("저녁 식사 후", "저녁 식사 직후", 1),
            ("취침 30분 전", "잠들기 전", 2),
        ],
    },
    TimingRule {
        ingredient: "마그네슘",
        timing_type: "취침 전",
        reason: "마그네슘은 근육 이완 효과가 있어 취침 전 복용이 좋습니다.",
        avoid_with: &[],
        recommended_times: &[
            ("취침 30분 전", "잠들기 30분 전", 1),
            ("저녁 식사 후", "저녁 식사 직후", 2),
        ],
    },
    TimingRule {
        ingredient: "오메가3",
        timing_type: "식후",
        reason: "오메가3는 지용성이므로 식사와 함께 섭취하면 흡수율이 높아집니다.",
        avoid_with: &[],
        recommended_times: &[
            ("아침 식사 후", "아침 식사 직후", 1),
            ("저녁 식사 후", "저녁 식사 직후", 2),
        ],
    },
    TimingRule {
        ingredient: "비타민B",
        timing_type: "아침 식후",
        reason: "비타민B는 에너지 대사에 관여하므로 아침에 섭취하는 것이 좋습니다.",
        avoid_with: &[],
        recommended_times: &[
            ("아침 식사 후", "아침 식사 직후", 1),
            ("점심 식사 후", "점심 식사 직후", 2),
        ],
    },
    TimingRule {
        ingredient: "아연",
        timing_type: "공복 또는 식후",
        reason: "아연은 공복에 흡수율이 높지만, 위장 자극이 있을 수 있어 식후도 가능합니다.",
        avoid_with: &["칼슘", "철분", "구리"],
        recommended_times: &[
            ("기상 직후", "아침 공복", 1),
            ("저녁 식사 후", "저녁 식사 2시간 후", 2),
        ],
    },
    TimingRule {
        ingredient: "프로바이오틱스",
        timing_type: "공복",
        reason: "프로바이오틱스는 공복에 섭취하면 위산의 영향을 덜 받아 장까지 잘 도달합니다.",
        avoid_with: &[],
        recommended_times: &[
            ("기상 직후", "아침 공복", 1),
            ("취침 전", "잠들기 전", 2),
        ],
    },
];

const INGREDIENT_ALIASES: &[(&str, &str)] = &[
    ("비타민디", "비타민D"),
    ("vitamin d", "비타민D"),
    ("비타민씨", "비타민C"),
    ("vitamin c", "비타민C"),
    ("비타민비", "비타민B"),
    ("vitamin b", "비타민B"),
    ("omega3", "오메가3"),
    ("omega-3", "오메가3"),
    ("유산균", "프로바이오틱스"),
    ("probiotics", "프로바이오틱스"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr)]
pub enum TimingSlot {
    #[serde(rename = "아침 공복")]
    #[strum(serialize = "아침 공복")]
    MorningFasted,
    #[serde(rename = "아침 식후")]
    #[strum(serialize = "아침 식후")]
    MorningAfterMeal,
    #[serde(rename = "점심 식후")]
    #[strum(serialize = "점심 식후")]
    LunchAfterMeal,
    #[serde(rename = "저녁 식후")]
    #[strum(serialize = "저녁 식후")]
    DinnerAfterMeal,
    #[serde(rename = "취침 전")]
    #[strum(serialize = "취침 전")]
    BeforeBed,
}

impl TimingSlot {
    const ALL: [TimingSlot; 5] = [
        Self::MorningFasted,
        Self::MorningAfterMeal,
        Self::LunchAfterMeal,
        Self::DinnerAfterMeal,
        Self::BeforeBed,
    ];

    fn from_timing_type(timing_type: &str) -> Self {
        if timing_type.contains("공복") {
            Self::MorningFasted
        } else if timing_type.contains("취침") {
            Self::BeforeBed
        } else if timing_type.contains("아침") {
            Self::MorningAfterMeal
        } else if timing_type.contains("저녁") {
            Self::DinnerAfterMeal
        } else {
            Self::LunchAfterMeal
        }
    }

    fn clock(self) -> &'static str {
        match self {
            Self::MorningFasted => "07:00",
            Self::MorningAfterMeal => "08:00",
            Self::LunchAfterMeal => "12:30",
            Self::DinnerAfterMeal => "18:30",
            Self::BeforeBed => "22:00",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::MorningFasted => "기상 직후",
            Self::MorningAfterMeal => "아침 식사 직후",
            Self::LunchAfterMeal => "점심 식사 직후",
            Self::DinnerAfterMeal => "저녁 식사 직후",
            Self::BeforeBed => "잠들기 30분 전",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConflict {
    pub ingredient1: String,
    pub ingredient2: String,
    pub warning: String,
    pub solution: String,
    pub time_gap: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingGroup {
    pub slot: TimingSlot,
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub time: String,
    pub timing: TimingSlot,
    pub description: String,
    pub ingredients: Vec<String>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingSummary {
    pub total_ingredients: usize,
    pub conflict_count: usize,
    pub timing_slots: usize,
    pub ingredients_with_info: usize,
    pub ingredients_without_info: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultTimingAdvice {
    pub message: String,
    pub general_advice: String,
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiTimingRecommendation {
    pub recommendations: Vec<TimingRecommendation>,
    pub conflicts: Vec<TimingConflict>,
    pub timing_groups: Vec<TimingGroup>,
    pub optimal_schedule: Vec<ScheduleSlot>,
    pub summary: TimingSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_advice: Option<DefaultTimingAdvice>,
}

/// Rule-table timing advisor. Rules and aliases are fixed at compile time;
/// lookups never fail, unknown ingredients yield `has_timing_info = false`.
pub struct RuleTimingAdvisor;

impl RuleTimingAdvisor {
    pub fn new() -> Self {
        info!("Timing advisor initialized: {} rules", TIMING_RULES.len());
        Self
    }

    fn normalize(&self, ingredient: &str) -> String {
        let trimmed = ingredient.trim();
        let lowered = trimmed.to_lowercase();
        INGREDIENT_ALIASES
            .iter()
            .find(|(alias, _)| *alias == trimmed || *alias == lowered)
            .map(|(_, canonical)| (*canonical).to_string())
            .unwrap_or_else(|| trimmed.to_string())
    }

    fn rule_for(&self, ingredient: &str) -> Option<&'static TimingRule> {
        let normalized = self.normalize(ingredient);
        TIMING_RULES.iter().find(|rule| rule.ingredient == normalized)
    }

    pub fn recommend(&self, ingredient: &str) -> TimingRecommendation {
        match self.rule_for(ingredient) {
            Some(rule) => TimingRecommendation {
                ingredient: ingredient.to_string(),
                timing_type: Some(rule.timing_type.to_string()),
                reason: Some(rule.reason.to_string()),
                avoid_with: rule.avoid_with.iter().map(|s| (*s).to_string()).collect(),
                recommended_times: rule
                    .recommended_times
                    .iter()
                    .map(|(time, description, priority)| RecommendedTime {
                        time: (*time).to_string(),
                        description: (*description).to_string(),
                        priority: *priority,
                    })
                    .collect(),
                has_timing_info: true,
            },
            None => {
                warn!("no timing rule for ingredient '{}'", ingredient);
                TimingRecommendation {
                    ingredient: ingredient.to_string(),
                    timing_type: None,
                    reason: None,
                    avoid_with: Vec::new(),
                    recommended_times: Vec::new(),
                    has_timing_info: false,
                }
            }
        }
    }

    pub fn recommend_multiple(&self, ingredients: &[String]) -> MultiTimingRecommendation {
        let mut recommendations = Vec::new();
        let mut groups: HashMap<TimingSlot, Vec<String>> = HashMap::new();
        let mut with_info = Vec::new();
        let mut without_info = Vec::new();

        for ingredient in ingredients {
            let rec = self.recommend(ingredient);
            if rec.has_timing_info {
                with_info.push(ingredient.clone());
                let slot = TimingSlot::from_timing_type(rec.timing_type.as_deref().unwrap_or(""));
                groups.entry(slot).or_default().push(ingredient.clone());
            } else {
                without_info.push(ingredient.clone());
            }
            recommendations.push(rec);
        }

        if with_info.is_empty() {
            info!("no timing rules matched any of {} ingredients", ingredients.len());
            return MultiTimingRecommendation {
                recommendations,
                conflicts: Vec::new(),
                timing_groups: Vec::new(),
                optimal_schedule: Vec::new(),
                summary: TimingSummary {
                    total_ingredients: ingredients.len(),
                    conflict_count: 0,
                    timing_slots: 0,
                    ingredients_with_info: 0,
                    ingredients_without_info: without_info.len(),
                },
                default_advice: Some(DefaultTimingAdvice {
                    message: "입력하신 성분들에 대한 구체적인 복용 시간 정보가 없습니다.".to_string(),
                    general_advice: "일반적으로 식후 섭취를 권장합니다. 제품 라벨을 참고하거나 전문가와 상담하세요."
                        .to_string(),
                    ingredients: without_info,
                }),
            };
        }

        let conflicts = self.find_conflicts(&with_info);
        let optimal_schedule = self.build_schedule(&groups, &conflicts);

        let timing_groups: Vec<TimingGroup> = TimingSlot::ALL
            .iter()
            .filter_map(|slot| {
                groups.get(slot).map(|ingredients| TimingGroup {
                    slot: *slot,
                    ingredients: ingredients.clone(),
                })
            })
            .collect();

        MultiTimingRecommendation {
            summary: TimingSummary {
                total_ingredients: ingredients.len(),
                conflict_count: conflicts.len(),
                timing_slots: timing_groups.len(),
                ingredients_with_info: with_info.len(),
                ingredients_without_info: without_info.len(),
            },
            recommendations,
            conflicts,
            timing_groups,
            optimal_schedule,
            default_advice: None,
        }
    }

    fn find_conflicts(&self, ingredients: &[String]) -> Vec<TimingConflict> {
        let mut conflicts = Vec::new();

        for (i, first) in ingredients.iter().enumerate() {
            for second in &ingredients[i + 1..] {
                let Some(rule1) = self.rule_for(first) else { continue };
                let Some(rule2) = self.rule_for(second) else { continue };

                let clash = rule1.avoid_with.contains(&rule2.ingredient)
                    || rule2.avoid_with.contains(&rule1.ingredient);
                if clash {
                    conflicts.push(TimingConflict {
                        ingredient1: first.clone(),
                        ingredient2: second.clone(),
                        warning: format!("{first}과(와) {second}은(는) 함께 복용하지 않는 것이 좋습니다."),
                        solution: format!(
                            "{first}은(는) {}에, {second}은(는) {}에 각각 복용하세요.",
                            rule1.timing_type, rule2.timing_type
                        ),
                        time_gap: "최소 2시간 간격을 두고 복용하세요.".to_string(),
                    });
                }
            }
        }

        conflicts
    }

    fn build_schedule(
        &self,
        groups: &HashMap<TimingSlot, Vec<String>>,
        conflicts: &[TimingConflict],
    ) -> Vec<ScheduleSlot> {
        let conflict_pairs: Vec<(&str, &str)> = conflicts
            .iter()
            .map(|c| (c.ingredient1.as_str(), c.ingredient2.as_str()))
            .collect();

        TimingSlot::ALL
            .iter()
            .filter_map(|slot| {
                let ingredients = groups.get(slot)?;
                if ingredients.is_empty() {
                    return None;
                }
                Some(ScheduleSlot {
                    time: slot.clock().to_string(),
                    timing: *slot,
                    description: slot.description().to_string(),
                    ingredients: ingredients.clone(),
                    notes: slot_notes(ingredients, &conflict_pairs),
                })
            })
            .collect()
    }
}

impl Default for RuleTimingAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

fn slot_notes(ingredients: &[String], conflict_pairs: &[(&str, &str)]) -> Vec<String> {
    let mut notes = Vec::new();

    for (i, first) in ingredients.iter().enumerate() {
        for second in &ingredients[i + 1..] {
            let conflicting = conflict_pairs.iter().any(|(a, b)| {
                (*a == first.as_str() && *b == second.as_str())
                    || (*a == second.as_str() && *b == first.as_str())
            });
            if conflicting {
                notes.push(format!("{first}과(와) {second}은(는) 2시간 간격을 두고 복용하세요."));
            }
        }
    }

    if ingredients.len() > 3 {
        notes.push("한 번에 너무 많은 영양제를 복용하지 마세요.".to_string());
    }

    notes
}

#[async_trait]
impl TimingBackend for RuleTimingAdvisor {
    async fn recommend_timing(&self, ingredient: &str) -> BackendResult<TimingRecommendation> {
        Ok(self.recommend(ingredient))
    }
}
