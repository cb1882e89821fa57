//! 기사 검색 서비스 - 업무 능력 계층
//!
//! 백과사전 검색 결과를 학습용 [`Article`] 로 바꾼다.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::clients::{EncyclopediaApi, WikiPage};
use crate::error::{AppError, AppResult};
use crate::models::article::{WIKI_CATEGORY, WIKI_SOURCE};
use crate::models::Article;

/// 이보다 짧은 본문은 토막글/동음이의 문서로 보고 버린다 (문자 수)
pub const MIN_CONTENT_CHARS: usize = 50;
/// 요약이 없을 때 넣는 본문
pub const MISSING_EXTRACT: &str = "내용을 불러올 수 없습니다.";

const WIKI_READ_TIME: &str = "읽기";
const WIKI_KEYWORD: &str = "백과사전";

/// 기사 검색 서비스
///
/// - 제목 검색 → 요약 일괄 조회, 두 번의 호출
/// - 캐시와 재시도 없음
/// - 어느 호출이 실패해도 하나의 `Fetch` 오류로 돌려준다
pub struct ArticleSource {
    api: Arc<dyn EncyclopediaApi>,
    search_limit: usize,
}

impl ArticleSource {
    pub fn new(api: Arc<dyn EncyclopediaApi>, search_limit: usize) -> Self {
        Self { api, search_limit }
    }

    /// 검색어로 기사 목록 조회
    ///
    /// 검색 결과가 없으면 빈 목록을 돌려준다.
    pub async fn search(&self, query: &str) -> AppResult<Vec<Article>> {
        let query = query.trim();
        if query.is_empty() {
            debug!("빈 검색어, 검색 생략");
            return Ok(Vec::new());
        }

        info!("🔍 백과사전 검색: '{}'", query);

        let titles = self
            .api
            .search_titles(query, self.search_limit)
            .await
            .map_err(log_fetch_failure)?;

        if titles.is_empty() {
            info!("검색 결과 없음: '{}'", query);
            return Ok(Vec::new());
        }

        let mut pages = self
            .api
            .fetch_extracts(&titles)
            .await
            .map_err(log_fetch_failure)?;

        // 검색 순위대로 정렬, 순위에 없는 문서는 뒤로
        pages.sort_by_key(|page| {
            titles
                .iter()
                .position(|t| *t == page.title)
                .unwrap_or(usize::MAX)
        });

        let total = pages.len();
        let articles: Vec<Article> = pages
            .into_iter()
            .enumerate()
            .map(|(index, page)| to_article(index, page, query))
            .filter(|article| article.content_chars() >= MIN_CONTENT_CHARS)
            .collect();

        info!(
            "✓ 검색 완료: {} 건 중 {} 건 사용",
            total,
            articles.len()
        );
        Ok(articles)
    }
}

fn log_fetch_failure(err: AppError) -> AppError {
    warn!("❌ 백과사전 검색 실패: {}", err);
    err
}

fn to_article(index: usize, page: WikiPage, query: &str) -> Article {
    let id = match page.pageid {
        Some(id) => id.to_string(),
        None => format!("wiki_{}", index),
    };
    let content = page
        .extract
        .filter(|extract| !extract.is_empty())
        .unwrap_or_else(|| MISSING_EXTRACT.to_string());

    Article {
        id,
        category: WIKI_CATEGORY.to_string(),
        title: page.title,
        content,
        source: WIKI_SOURCE.to_string(),
        read_time: WIKI_READ_TIME.to_string(),
        keywords: vec![query.to_string(), WIKI_KEYWORD.to_string()],
    }
}
