pub struct SymptomNutrients {
    pub keyword: &'static str,
    pub nutrients: &'static [&'static str],
    pub description: &'static str,
}

// Ordered, first match wins: body-part-specific entries precede the generic
// ones so "눈이 피로해요" resolves to eye guidance rather than fatigue.
pub const SYMPTOM_NUTRIENTS: &[SymptomNutrients] = &[
    SymptomNutrients {
        keyword: "눈",
        nutrients: &["루테인", "지아잔틴", "오메가3", "비타민A"],
        description: "눈의 피로와 황반 건강에는 루테인과 지아잔틴이 도움이 될 수 있습니다.",
    },
    SymptomNutrients {
        keyword: "관절",
        nutrients: &["글루코사민", "콘드로이틴", "MSM"],
        description: "관절 연골 건강에는 글루코사민과 콘드로이틴이 도움이 될 수 있습니다.",
    },
    SymptomNutrients {
        keyword: "피부",
        nutrients: &["콜라겐", "히알루론산", "비타민C"],
        description: "피부 보습과 탄력에는 콜라겐과 히알루론산이 도움이 될 수 있습니다.",
    },
    SymptomNutrients {
        keyword: "뼈",
        nutrients: &["칼슘", "비타민D", "마그네슘"],
        description: "뼈 건강에는 칼슘과 흡수를 돕는 비타민D가 도움이 될 수 있습니다.",
    },
    SymptomNutrients {
        keyword: "간",
        nutrients: &["밀크씨슬", "비타민B"],
        description: "간 기능 유지에는 밀크씨슬의 실리마린 성분이 도움이 될 수 있습니다.",
    },
    SymptomNutrients {
        keyword: "수면",
        nutrients: &["마그네슘", "테아닌"],
        description: "수면의 질 개선에는 마그네슘과 테아닌이 도움이 될 수 있습니다.",
    },
    SymptomNutrients {
        keyword: "불면",
        nutrients: &["마그네슘", "테아닌"],
        description: "수면의 질 개선에는 마그네슘과 테아닌이 도움이 될 수 있습니다.",
    },
    SymptomNutrients {
        keyword: "소화",
        nutrients: &["프로바이오틱스", "식이섬유"],
        description: "소화와 장 건강에는 프로바이오틱스가 도움이 될 수 있습니다.",
    },
    SymptomNutrients {
        keyword: "변비",
        nutrients: &["식이섬유", "프로바이오틱스", "마그네슘"],
        description: "배변 활동에는 식이섬유와 프로바이오틱스가 도움이 될 수 있습니다.",
    },
    SymptomNutrients {
        keyword: "면역",
        nutrients: &["비타민C", "아연", "비타민D"],
        description: "면역력 유지에는 비타민C와 아연이 도움이 될 수 있습니다.",
    },
    SymptomNutrients {
        keyword: "혈액순환",
        nutrients: &["오메가3", "은행잎추출물"],
        description: "혈행 개선에는 오메가3와 은행잎추출물이 도움이 될 수 있습니다.",
    },
    SymptomNutrients {
        keyword: "기억력",
        nutrients: &["오메가3", "레시틴"],
        description: "기억력 유지에는 DHA가 풍부한 오메가3가 도움이 될 수 있습니다.",
    },
    SymptomNutrients {
        keyword: "집중",
        nutrients: &["오메가3", "비타민B", "테아닌"],
        description: "집중력에는 오메가3와 비타민B군이 도움이 될 수 있습니다.",
    },
    SymptomNutrients {
        keyword: "스트레스",
        nutrients: &["테아닌", "마그네슘", "비타민B"],
        description: "긴장 완화에는 테아닌과 마그네슘이 도움이 될 수 있습니다.",
    },
    SymptomNutrients {
        keyword: "피로",
        nutrients: &["비타민B", "비타민B12", "코엔자임Q10", "철분"],
        description: "피로 개선에는 에너지 대사에 관여하는 비타민B군이 도움이 될 수 있습니다.",
    },
];
