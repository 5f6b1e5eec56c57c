//! Static content tables shared by generation, normalization, and scoring.

/// Character traits; generated profiles take the first four.
pub const CHARACTERISTICS: [&str; 6] = [
    "분석적 사고",
    "창의적 문제해결",
    "논리적 판단",
    "직관적 통찰",
    "체계적 계획",
    "유연한 적응",
];

/// Strengths; generated profiles take the first three.
pub const STRENGTHS: [&str; 6] = [
    "논리적 사고",
    "창의성",
    "리더십",
    "공감능력",
    "실용성",
    "혁신성",
];

/// Weaknesses; generated profiles take the first two.
pub const WEAKNESSES: [&str; 6] = [
    "완벽주의",
    "감정적 민감성",
    "인내심 부족",
    "과도한 분석",
    "갈등 회피",
    "변화 저항",
];

/// Career suggestions; generated profiles take the first four.
pub const CAREERS: [&str; 8] = [
    "엔지니어",
    "디자이너",
    "교사",
    "의사",
    "변호사",
    "예술가",
    "경영자",
    "연구원",
];

pub const CHARACTERISTIC_COUNT: usize = 4;
pub const STRENGTH_COUNT: usize = 3;
pub const WEAKNESS_COUNT: usize = 2;
pub const CAREER_COUNT: usize = 4;

/// Five-step agreement ladder, strongest agreement first.
pub const OPTION_LADDER: [&str; 5] = ["매우 그렇다", "그렇다", "보통이다", "아니다", "매우 아니다"];

/// Labels assigned to generated questions.
pub const QUESTION_CATEGORIES: [&str; 6] = [
    "성격",
    "관계",
    "직업",
    "취미",
    "라이프스타일",
    "가치관",
];

pub const QUESTION_TEMPLATE_COUNT: usize = 5;

/// Render one of the question phrasings for a topic.
pub fn question_text(template: usize, topic: &str) -> String {
    match template % QUESTION_TEMPLATE_COUNT {
        0 => format!("{topic} 상황에서 당신은 어떻게 행동하시나요?"),
        1 => format!("{topic}에 대해 어떻게 생각하시나요?"),
        2 => format!("{topic}와 관련된 상황에서 당신의 선택은?"),
        3 => format!("{topic}에 직면했을 때 당신은?"),
        _ => format!("{topic}에 대한 당신의 관점은?"),
    }
}

/// Topics the generator job writes by default.
pub const DEFAULT_TOPICS: [&str; 10] = [
    "연애",
    "직장생활",
    "친구관계",
    "취미활동",
    "여행",
    "음식",
    "패션",
    "운동",
    "독서",
    "음악",
];

/// Tag → corpus category, consulted in tag order when a document has no category.
pub const TAG_CATEGORIES: [(&str, &str); 10] = [
    ("연애", "relationship"),
    ("직장생활", "career"),
    ("친구관계", "social"),
    ("취미활동", "hobby"),
    ("여행", "lifestyle"),
    ("음식", "lifestyle"),
    ("패션", "lifestyle"),
    ("운동", "health"),
    ("독서", "hobby"),
    ("음악", "hobby"),
];

pub const GENERAL_CATEGORY: &str = "general";

pub fn category_for_tag(tag: &str) -> Option<&'static str> {
    TAG_CATEGORIES
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, category)| *category)
}

/// Content of the profile returned when a computed code has no match.
pub mod fallback {
    pub const TITLE: &str = "MBTI 결과";
    pub const DESCRIPTION: &str = "당신의 MBTI 유형 결과입니다.";
    pub const CHARACTERISTICS: [&str; 2] = ["분석적 사고", "독립적 성격"];
    pub const STRENGTHS: [&str; 2] = ["논리적 사고", "독립성"];
    pub const WEAKNESSES: [&str; 2] = ["감정 표현 부족", "소통 어려움"];
}
