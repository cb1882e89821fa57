/// 백과사전 API 클라이언트
///
/// MediaWiki `action=query` 호출 두 가지(제목 검색, 요약 일괄 조회)만 감싼다.
use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult, FetchError};

/// 요약 조회 결과의 문서 한 건
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WikiPage {
    #[serde(default)]
    pub pageid: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub extract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
    error: Option<JsonValue>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    query: Option<ExtractQuery>,
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: HashMap<String, WikiPage>,
}

/// 백과사전 검색 API
#[async_trait]
pub trait EncyclopediaApi: Send + Sync {
    /// 제목 검색 (최대 `limit` 건)
    async fn search_titles(&self, query: &str, limit: usize) -> AppResult<Vec<String>>;

    /// 여러 제목의 도입부 요약을 한 번에 조회
    async fn fetch_extracts(&self, titles: &[String]) -> AppResult<Vec<WikiPage>>;
}

/// 위키백과 클라이언트
pub struct WikiClient {
    http: reqwest::Client,
    base_url: String,
}

impl WikiClient {
    /// 새 클라이언트 생성
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION"),
                " (reading comprehension worksheet)"
            ))
            .build()
            .map_err(|e| AppError::request_failed("client", e))?;

        Ok(Self {
            http,
            base_url: config.wiki_api_base_url.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let response = self
            .http
            .get(&self.base_url)
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::request_failed(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::request_failed(endpoint, e))?;

        parse_body(endpoint, &body)
    }
}

#[async_trait]
impl EncyclopediaApi for WikiClient {
    async fn search_titles(&self, query: &str, limit: usize) -> AppResult<Vec<String>> {
        let limit = limit.to_string();
        let params = [
            ("action", "query"),
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", limit.as_str()),
            ("format", "json"),
        ];

        let data: SearchResponse = self.get_json("search", &params).await?;
        let titles = titles_from_search(data)?;
        debug!("제목 검색 '{}': {} 건", query, titles.len());
        Ok(titles)
    }

    async fn fetch_extracts(&self, titles: &[String]) -> AppResult<Vec<WikiPage>> {
        if titles.is_empty() {
            return Ok(Vec::new());
        }

        let joined = titles.join("|");
        let params = [
            ("action", "query"),
            ("prop", "extracts"),
            ("exintro", "1"),
            ("explaintext", "1"),
            ("titles", joined.as_str()),
            ("format", "json"),
        ];

        let data: ExtractResponse = self.get_json("extracts", &params).await?;
        let pages = pages_from_extracts(data)?;
        debug!("요약 조회: {} 건 요청, {} 건 수신", titles.len(), pages.len());
        Ok(pages)
    }
}

// ========== 응답 해석 ==========

fn parse_body<T: DeserializeOwned>(endpoint: &str, body: &str) -> AppResult<T> {
    serde_json::from_str(body).map_err(|e| {
        FetchError::BadShape {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// 검색 결과가 없으면 빈 목록. API 가 오류 객체를 돌려준 경우만 실패로 본다.
fn titles_from_search(data: SearchResponse) -> AppResult<Vec<String>> {
    if let Some(error) = data.error {
        return Err(FetchError::BadShape {
            endpoint: "search".to_string(),
            message: error.to_string(),
        }
        .into());
    }

    Ok(data
        .query
        .map(|q| q.search.into_iter().map(|hit| hit.title).collect())
        .unwrap_or_default())
}

fn pages_from_extracts(data: ExtractResponse) -> AppResult<Vec<WikiPage>> {
    let query = data.query.ok_or_else(|| FetchError::BadShape {
        endpoint: "extracts".to_string(),
        message: "query.pages 가 없습니다".to_string(),
    })?;
    Ok(query.pages.into_values().collect())
}
