//! AI 주석 서비스 - 업무 능력 계층
//!
//! 생성형 모델을 이용한 네 가지 능력만 제공한다:
//! 육하원칙 추출, 쉬운 글 변환, 교육용 글 생성, 키워드 추천.
//! 작업마다 모델 호출은 정확히 한 번이다.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::clients::{LlmBackend, LlmRequest};
use crate::error::{AppError, AppResult};
use crate::models::article::{GENERATED_ID_PREFIX, GENERATED_SOURCE};
use crate::models::{AnalysisResult, Article, Difficulty};
use crate::services::prompts::{self, KEYWORD_COUNT};
use crate::services::response_decoder::{decode_as, decode_json};
use crate::utils::logging::truncate_text;

/// 생성된 글의 키워드 표시
const GENERATED_KEYWORD: &str = "AI작문";

static GENERATED_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Deserialize)]
struct GeneratedArticle {
    title: String,
    #[serde(default)]
    category: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct SimplifiedText {
    content: String,
}

/// AI 주석 서비스
///
/// - 백엔드는 생성자에서 주입받는다
/// - 글 선택 상태나 답안 칸은 알지 못한다
pub struct AnnotationService {
    backend: Arc<dyn LlmBackend>,
}

impl AnnotationService {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    /// 본문에서 육하원칙 답안과 근거 문장 추출
    ///
    /// 본문은 앞 5000자만 보낸다. JSON 이 아니면 `ResponseFormat`,
    /// 내용이 비었거나 필수 항목이 빠지면 `Analysis` 오류.
    pub async fn extract_answers(
        &self,
        text: &str,
        difficulty: Difficulty,
    ) -> AppResult<AnalysisResult> {
        info!("🔍 육하원칙 분석 요청 (난이도: {})", difficulty);

        let request = LlmRequest::new(
            "extract_answers",
            prompts::analysis_prompt(text, difficulty),
            prompts::analysis_schema(),
        );

        let raw = self.backend.complete(&request).await?;
        if raw.trim().is_empty() {
            return Err(AppError::Analysis("AI 응답이 비어 있습니다".to_string()));
        }

        let mut result: AnalysisResult = decode_as(&raw, AppError::Analysis)?;
        result.answers.fill_unknown();

        debug!("분석 결과: {:?}", result.answers);
        info!("✓ 육하원칙 분석 완료");
        Ok(result)
    }

    /// 쉬운 글로 다시 쓰기 (실패 시 오류 반환)
    pub async fn try_simplify(&self, text: &str) -> AppResult<String> {
        let request = LlmRequest::new(
            "simplify",
            prompts::simplify_prompt(text),
            prompts::simplify_schema(),
        )
        .with_max_tokens(4096);

        let raw = self.backend.complete(&request).await?;
        let simplified: SimplifiedText = decode_as(&raw, AppError::Simplify)?;

        let content = simplified.content.trim();
        if content.is_empty() {
            return Err(AppError::Simplify("결과가 비어 있습니다".to_string()));
        }
        Ok(content.to_string())
    }

    /// 쉬운 글로 다시 쓰기
    ///
    /// 어떤 실패든 원문을 그대로 돌려준다.
    pub async fn simplify(&self, text: &str) -> String {
        match self.try_simplify(text).await {
            Ok(simplified) => simplified,
            Err(e) => {
                warn!("⚠️ 쉬운 글 변환 실패, 원문 유지: {}", e);
                text.to_string()
            }
        }
    }

    /// 주제와 난이도로 새 교육용 글 생성
    pub async fn generate_article(&self, topic: &str, difficulty: Difficulty) -> AppResult<Article> {
        info!("✍️ 교육용 글 생성 요청: '{}' (난이도: {})", topic, difficulty);

        let request = LlmRequest::new(
            "generate_article",
            prompts::generation_prompt(topic, difficulty),
            prompts::generation_schema(),
        )
        .with_temperature(0.8)
        .with_max_tokens(4096);

        let raw = self.backend.complete(&request).await?;
        if raw.trim().is_empty() {
            return Err(AppError::Generation("AI 응답이 비어 있습니다".to_string()));
        }

        let generated: GeneratedArticle = decode_as(&raw, AppError::Generation)?;
        if generated.title.trim().is_empty() || generated.content.trim().is_empty() {
            return Err(AppError::Generation("제목 또는 본문이 비어 있습니다".to_string()));
        }

        let article = Article {
            id: next_generated_id(),
            category: generated.category.trim().to_string(),
            title: generated.title.trim().to_string(),
            content: generated.content.trim().to_string(),
            source: GENERATED_SOURCE.to_string(),
            read_time: difficulty.profile().read_time_label.to_string(),
            keywords: vec![topic.to_string(), GENERATED_KEYWORD.to_string()],
        };

        info!("✓ 글 생성 완료: {}", truncate_text(&article.title, 40));
        Ok(article)
    }

    /// 추천 검색 키워드 6개
    ///
    /// 실패하면 빈 목록.
    pub async fn recommend_keywords(&self) -> Vec<String> {
        match self.try_recommend_keywords().await {
            Ok(keywords) => keywords,
            Err(e) => {
                warn!("⚠️ 키워드 추천 실패: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_recommend_keywords(&self) -> AppResult<Vec<String>> {
        let request = LlmRequest::new(
            "recommend_keywords",
            prompts::keyword_prompt(),
            prompts::keyword_schema(),
        )
        .with_temperature(1.0)
        .with_max_tokens(512);

        let raw = self.backend.complete(&request).await?;
        let value = decode_json(&raw)?;

        let Some(items) = value.as_array() else {
            warn!("키워드 응답이 배열이 아닙니다: {}", truncate_text(&raw, 80));
            return Ok(Vec::new());
        };

        Ok(items
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .take(KEYWORD_COUNT)
            .collect())
    }
}

fn next_generated_id() -> String {
    let seq = GENERATED_SEQ.fetch_add(1, Ordering::Relaxed);
    format!(
        "{}{}_{}",
        GENERATED_ID_PREFIX,
        chrono::Utc::now().timestamp_millis(),
        seq
    )
}
