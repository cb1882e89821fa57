use serde::{Deserialize, Serialize};

/// 백과사전에서 가져온 글의 분류
pub const WIKI_CATEGORY: &str = "지식 백과";
/// 백과사전에서 가져온 글의 출처
pub const WIKI_SOURCE: &str = "위키백과";
/// AI 가 생성한 글의 출처
pub const GENERATED_SOURCE: &str = "AI 생성 활동지";
/// 생성된 글 id 접두사
pub const GENERATED_ID_PREFIX: &str = "gen_";

/// 학습용 글
///
/// 가져오거나 생성한 뒤에는 수정하지 않는다. 새 글을 선택하면 통째로 교체된다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub category: String,
    pub title: String,
    /// 줄바꿈으로 문단을 구분한 평문
    pub content: String,
    /// 출처 표시
    pub source: String,
    /// 읽기 안내 문구
    pub read_time: String,
    pub keywords: Vec<String>,
}

impl Article {
    /// AI 가 생성한 글인지 여부
    pub fn is_generated(&self) -> bool {
        self.id.starts_with(GENERATED_ID_PREFIX)
    }

    /// 본문 길이 (문자 수)
    pub fn content_chars(&self) -> usize {
        self.content.chars().count()
    }
}

impl std::fmt::Display for Article {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} ({}, {}자)",
            self.category,
            self.title,
            self.source,
            self.content_chars()
        )
    }
}
