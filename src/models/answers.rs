use serde::{Deserialize, Deserializer, Serialize};

/// 알 수 없는 항목 표시
pub const UNKNOWN_ANSWER: &str = "알 수 없음";

/// 육하원칙 항목
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum W1hKey {
    /// 누가
    Who,
    /// 언제
    When,
    /// 어디서
    Where,
    /// 무엇을
    What,
    /// 어떻게
    How,
    /// 왜
    Why,
}

impl W1hKey {
    /// 고정된 여섯 항목 (표시 순서)
    pub const ALL: [W1hKey; 6] = [
        W1hKey::Who,
        W1hKey::When,
        W1hKey::Where,
        W1hKey::What,
        W1hKey::How,
        W1hKey::Why,
    ];

    /// JSON 키 이름
    pub fn as_str(self) -> &'static str {
        match self {
            W1hKey::Who => "who",
            W1hKey::When => "when",
            W1hKey::Where => "where",
            W1hKey::What => "what",
            W1hKey::How => "how",
            W1hKey::Why => "why",
        }
    }

    /// 한국어 표시 이름
    pub fn label(self) -> &'static str {
        match self {
            W1hKey::Who => "누가",
            W1hKey::When => "언제",
            W1hKey::Where => "어디서",
            W1hKey::What => "무엇을",
            W1hKey::How => "어떻게",
            W1hKey::Why => "왜",
        }
    }
}

impl std::str::FromStr for W1hKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "who" | "누가" => Ok(W1hKey::Who),
            "when" | "언제" => Ok(W1hKey::When),
            "where" | "어디서" => Ok(W1hKey::Where),
            "what" | "무엇을" => Ok(W1hKey::What),
            "how" | "어떻게" => Ok(W1hKey::How),
            "why" | "왜" => Ok(W1hKey::Why),
            other => Err(format!("알 수 없는 육하원칙 항목: {}", other)),
        }
    }
}

/// 육하원칙 답안
///
/// 여섯 항목이 타입으로 고정되어 있다. 모든 필드가 필수이므로
/// 항목이 빠진 JSON 은 역직렬화에 실패한다. `null` 은 빈 값으로 받는다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct W1hAnswers {
    #[serde(deserialize_with = "null_as_empty")]
    pub who: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub when: String,
    #[serde(rename = "where", deserialize_with = "null_as_empty")]
    pub where_: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub what: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub how: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub why: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl W1hAnswers {
    /// 항목 값 읽기
    pub fn get(&self, key: W1hKey) -> &str {
        match key {
            W1hKey::Who => &self.who,
            W1hKey::When => &self.when,
            W1hKey::Where => &self.where_,
            W1hKey::What => &self.what,
            W1hKey::How => &self.how,
            W1hKey::Why => &self.why,
        }
    }

    /// 항목 값 쓰기
    pub fn set(&mut self, key: W1hKey, value: impl Into<String>) {
        let slot = match key {
            W1hKey::Who => &mut self.who,
            W1hKey::When => &mut self.when,
            W1hKey::Where => &mut self.where_,
            W1hKey::What => &mut self.what,
            W1hKey::How => &mut self.how,
            W1hKey::Why => &mut self.why,
        };
        *slot = value.into();
    }

    /// 모든 항목이 비어 있는지 여부
    pub fn is_empty(&self) -> bool {
        W1hKey::ALL.iter().all(|k| self.get(*k).is_empty())
    }

    /// 빈 항목을 "알 수 없음" 으로 채운다
    pub fn fill_unknown(&mut self) {
        for key in W1hKey::ALL {
            if self.get(key).trim().is_empty() {
                self.set(key, UNKNOWN_ANSWER);
            }
        }
    }

    /// (항목, 값) 순회
    pub fn iter(&self) -> impl Iterator<Item = (W1hKey, &str)> {
        W1hKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

/// 항목별 근거 문장
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct W1hQuotes {
    pub who: Vec<String>,
    pub when: Vec<String>,
    #[serde(rename = "where")]
    pub where_: Vec<String>,
    pub what: Vec<String>,
    pub how: Vec<String>,
    pub why: Vec<String>,
}

impl W1hQuotes {
    pub fn get(&self, key: W1hKey) -> &[String] {
        match key {
            W1hKey::Who => &self.who,
            W1hKey::When => &self.when,
            W1hKey::Where => &self.where_,
            W1hKey::What => &self.what,
            W1hKey::How => &self.how,
            W1hKey::Why => &self.why,
        }
    }
}

/// AI 분석 결과
///
/// `quotes` 는 계산되지만 답안 칸에는 반영하지 않는다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub answers: W1hAnswers,
    #[serde(default)]
    pub quotes: W1hQuotes,
}
