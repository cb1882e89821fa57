//! 프롬프트와 출력 스키마
//!
//! 난이도별 차이는 모두 [`DifficultyProfile`] 표에서 가져온다.

use serde_json::{json, Value as JsonValue};

use crate::models::{Difficulty, W1hKey, UNKNOWN_ANSWER};

/// 분석에 보내는 본문 최대 길이 (문자)
pub const ANALYSIS_INPUT_LIMIT: usize = 5000;
/// 쉬운 글 변환에 보내는 본문 최대 길이 (문자)
pub const SIMPLIFY_INPUT_LIMIT: usize = 3000;
/// 추천 키워드 개수
pub const KEYWORD_COUNT: usize = 6;
/// 쉬운 글 변환 목표 독자
pub const SIMPLIFY_TARGET_READER: &str = "초등학교 2학년(8~9세)";

/// 앞에서부터 최대 `max_chars` 문자만 잘라낸다
pub fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

// ========== 육하원칙 분석 ==========

pub fn analysis_prompt(text: &str, difficulty: Difficulty) -> String {
    let answer_level = difficulty.profile().answer_level;
    format!(
        r#"다음 텍스트를 분석하여 육하원칙(누가, 언제, 어디서, 무엇을, 어떻게, 왜)에 해당하는 내용을 추출하세요.

[요구사항]
1. 'answers': 각 항목의 가장 핵심적인 내용을 명사구나 핵심 동사구 형태로 간결하게 요약하여 한국어로 작성하세요. {answer_level}을 지키며, 가능하면 1문장, 최대 2문장을 넘지 않도록 하세요.
2. 'quotes': 본문에서 근거가 되는 부분을 정확히 발췌하세요.
3. 명시되지 않은 정보는 '{unknown}'으로 표시하세요. 항목을 비우거나 생략하지 마세요.

분석할 텍스트:
{text}"#,
        answer_level = answer_level,
        unknown = UNKNOWN_ANSWER,
        text = take_chars(text, ANALYSIS_INPUT_LIMIT),
    )
}

pub fn analysis_schema() -> JsonValue {
    let keys: Vec<&str> = W1hKey::ALL.iter().map(|k| k.as_str()).collect();
    let mut answer_props = serde_json::Map::new();
    let mut quote_props = serde_json::Map::new();
    for key in &keys {
        answer_props.insert(key.to_string(), json!({ "type": "string" }));
        quote_props.insert(
            key.to_string(),
            json!({ "type": "array", "items": { "type": "string" } }),
        );
    }

    json!({
        "type": "object",
        "properties": {
            "answers": { "type": "object", "properties": answer_props, "required": keys },
            "quotes": { "type": "object", "properties": quote_props, "required": keys },
        },
        "required": ["answers", "quotes"],
    })
}

// ========== 쉬운 글 변환 ==========

pub fn simplify_prompt(text: &str) -> String {
    format!(
        r#"다음 글을 {reader} 어린이도 이해할 수 있도록 쉬운 말로 다시 써 주세요.

[요구사항]
1. 사실관계(인물, 시간, 장소, 사건, 방법, 이유)는 하나도 빠뜨리거나 바꾸지 마세요.
2. 어려운 한자어와 전문 용어는 쉬운 말로 풀어 쓰세요.
3. 문장은 짧게 끊고, 문단 구분은 줄바꿈으로 유지하세요.
4. 정중한 '해요체'를 사용하세요.
5. 'content' 항목에 다시 쓴 글만 담으세요.

원문:
{text}"#,
        reader = SIMPLIFY_TARGET_READER,
        text = take_chars(text, SIMPLIFY_INPUT_LIMIT),
    )
}

pub fn simplify_schema() -> JsonValue {
    json!({
        "type": "object",
        "properties": { "content": { "type": "string" } },
        "required": ["content"],
    })
}

// ========== 교육용 글 생성 ==========

/// 생활연령은 난이도와 무관하게 항상 청소년 기준
const AUDIENCE_TONE: &str = "생활연령이 청소년(중고등학생)임을 명심하세요. 절대 '우리 친구들~' 같은 유치한 말투나 반말을 쓰지 말고, 성인을 대하듯 존중하는 정중한 '해요체'를 사용하세요.";

pub fn generation_prompt(topic: &str, difficulty: Difficulty) -> String {
    let profile = difficulty.profile();
    format!(
        r#"주제 '{topic}'에 대해 교육용 읽기 자료를 작성해 주세요.

[핵심 독자 설정]
1. 문해력 수준: {literacy}
2. 생활연령: 중·고등학생 (청소년)

[작성 가이드]
1. 어조: {tone}
2. 문체 스타일: {style}
3. 목표 분량: {length}
4. 구성 방식:
   - 시간의 흐름에 따라 진행된 단일 사건 또는 구체적인 일화를 다루세요. 허구의 이야기나 동화 형식도 좋습니다.
   - 육하원칙(누가, 언제, 어디서, 무엇을, 어떻게, 왜) 요소가 모두 글 속에 담겨야 합니다.
   - 절대로 '언제: O월 O일', '장소: OO' 처럼 정보를 요약하거나 나열하지 마세요.
   - 사건의 순서나 인과 관계에 따라 자연스러운 줄글로 서술하고, 학생이 꼼꼼히 읽어야 육하원칙 요소를 발견할 수 있게 하세요.
   - 내용의 흐름에 맞게 문단을 나누고 줄바꿈하세요.
5. 주의사항:
   - 실제 인물이나 사건을 다룰 때는 없는 사실을 지어내거나 추측을 사실처럼 쓰지 마세요. 확실하지 않다면 사실 주장 대신 허구의 일화로 구성하세요.
   - 한국어 맞춤법, 띄어쓰기, 문장 부호를 정확히 지키세요.

'title', 'category', 'content' 항목을 가진 JSON 으로만 응답하세요."#,
        topic = topic,
        literacy = profile.literacy_label,
        tone = AUDIENCE_TONE,
        style = profile.style_guideline,
        length = profile.length_target,
    )
}

pub fn generation_schema() -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "category": { "type": "string" },
            "content": { "type": "string" },
        },
        "required": ["title", "category", "content"],
    })
}

// ========== 키워드 추천 ==========

pub fn keyword_prompt() -> String {
    format!(
        r#"육하원칙(누가, 언제, 어디서, 무엇을, 어떻게, 왜) 분석에 가장 적합한 구체적인 검색 키워드 {count}가지를 추천해 주세요.
- 다양성: 생활 일화, 판타지 동화, 역사적 상상, 환경 이야기, 과학 탐구 등 최소 5개 이상의 서로 다른 분야에서 골라 매번 새로운 느낌을 주세요.
- 적합성: 키워드는 특정 시점과 장소에서 일어난 단일 사건이나 일화를 가리켜야 합니다. 허구의 이야기여도 괜찮습니다. (예: '준우의 토요일', '하늘을 나는 강아지 몽실이의 하루')
- 구체성: 넓거나 추상적인 단어는 피하고 주체, 시간, 장소, 사건, 과정이 드러나는 소재를 제시하세요.
- 탐구 가능성: 사건의 전개('어떻게')와 동기('왜')를 탐구할 여지가 있어야 합니다.

문자열 {count}개의 JSON 배열로만 응답하세요."#,
        count = KEYWORD_COUNT,
    )
}

pub fn keyword_schema() -> JsonValue {
    json!({
        "type": "array",
        "items": { "type": "string" },
        "minItems": KEYWORD_COUNT,
        "maxItems": KEYWORD_COUNT,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_chars_respects_char_boundaries() {
        assert_eq!(take_chars("가나다라", 2), "가나");
        assert_eq!(take_chars("가나", 5), "가나");
        assert_eq!(take_chars("", 3), "");
    }

    #[test]
    fn test_analysis_prompt_truncates_input() {
        let text = format!("{}{}", "★".repeat(ANALYSIS_INPUT_LIMIT), "☆".repeat(10));
        let prompt = analysis_prompt(&text, Difficulty::Medium);
        assert!(prompt.contains(&"★".repeat(ANALYSIS_INPUT_LIMIT)));
        assert!(!prompt.contains('☆'));
    }

    #[test]
    fn test_generation_prompt_follows_profile() {
        for difficulty in Difficulty::ALL {
            let profile = difficulty.profile();
            let prompt = generation_prompt("우주 여행", difficulty);
            assert!(prompt.contains("우주 여행"));
            assert!(prompt.contains(profile.literacy_label));
            assert!(prompt.contains(profile.style_guideline));
            assert!(prompt.contains(profile.length_target));
            assert!(prompt.contains("청소년"));
        }
    }

    #[test]
    fn test_analysis_schema_requires_all_keys() {
        let schema = analysis_schema();
        let required = schema["properties"]["answers"]["required"]
            .as_array()
            .unwrap();
        assert_eq!(required.len(), 6);
    }
}
