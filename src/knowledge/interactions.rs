pub struct IngredientInteraction {
    pub ingredient: &'static str,
    pub timing: &'static str,
    pub synergy_with: &'static [&'static str],
    pub avoid_with: &'static [&'static str],
}

pub const INGREDIENT_INTERACTIONS: &[IngredientInteraction] = &[
    IngredientInteraction {
        ingredient: "칼슘",
        timing: "저녁 식후 또는 취침 전",
        synergy_with: &["비타민D", "마그네슘", "비타민K"],
        avoid_with: &["철분", "아연"],
    },
    IngredientInteraction {
        ingredient: "철분",
        timing: "아침 공복",
        synergy_with: &["비타민C"],
        avoid_with: &["칼슘", "커피", "차", "우유"],
    },
    IngredientInteraction {
        ingredient: "마그네슘",
        timing: "취침 전",
        synergy_with: &["칼슘", "비타민D"],
        avoid_with: &[],
    },
    IngredientInteraction {
        ingredient: "아연",
        timing: "공복 또는 식후",
        synergy_with: &["비타민C"],
        avoid_with: &["칼슘", "철분", "구리"],
    },
    IngredientInteraction {
        ingredient: "오메가3",
        timing: "식후",
        synergy_with: &["비타민E", "루테인"],
        avoid_with: &[],
    },
    IngredientInteraction {
        ingredient: "비타민C",
        timing: "식후",
        synergy_with: &["철분", "콜라겐"],
        avoid_with: &[],
    },
    IngredientInteraction {
        ingredient: "비타민D",
        timing: "아침 식후",
        synergy_with: &["칼슘", "마그네슘"],
        avoid_with: &[],
    },
    IngredientInteraction {
        ingredient: "루테인",
        timing: "식후",
        synergy_with: &["지아잔틴", "오메가3"],
        avoid_with: &[],
    },
    IngredientInteraction {
        ingredient: "프로바이오틱스",
        timing: "아침 공복",
        synergy_with: &["식이섬유"],
        avoid_with: &[],
    },
    IngredientInteraction {
        ingredient: "밀크씨슬",
        timing: "식후",
        synergy_with: &["비타민B"],
        avoid_with: &[],
    },
];
