//! 테스트용 가짜 백엔드
//!
//! 실제 네트워크 없이 서비스와 워크스페이스를 돌리기 위한 구현.
//! 보낸 요청을 기록해 두었다가 테스트에서 검사한다.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::clients::{EncyclopediaApi, LlmBackend, LlmRequest, WikiPage};
use crate::error::{AppError, AppResult, FetchError, LlmError};

/// 정해진 응답을 순서대로 돌려주는 LLM
pub struct FakeLlm {
    replies: Mutex<VecDeque<AppResult<String>>>,
    requests: Mutex<Vec<LlmRequest>>,
    always_fail: bool,
    hang: bool,
}

impl FakeLlm {
    /// 응답 목록을 순서대로 돌려준다. 다 쓰면 빈 응답 오류.
    pub fn replying(replies: Vec<AppResult<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            always_fail: false,
            hang: false,
        }
    }

    /// 모든 호출이 전송 오류로 실패
    pub fn failing() -> Self {
        Self {
            always_fail: true,
            ..Self::replying(Vec::new())
        }
    }

    /// 응답하지 않는 백엔드 (취소 테스트용)
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::replying(Vec::new())
        }
    }

    /// 지금까지 받은 요청
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    /// 분석 응답 JSON
    pub fn answers_json(who: &str, when: &str, where_: &str, what: &str, how: &str, why: &str) -> String {
        serde_json::json!({
            "answers": {
                "who": who, "when": when, "where": where_,
                "what": what, "how": how, "why": why,
            },
            "quotes": {
                "who": [], "when": [], "where": [], "what": [], "how": [], "why": [],
            },
        })
        .to_string()
    }
}

#[async_trait]
impl LlmBackend for FakeLlm {
    fn model_name(&self) -> &str {
        "fake-model"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        if self.hang {
            std::future::pending::<()>().await;
        }
        if self.always_fail {
            return Err(AppError::llm_api_failed("fake-model", "connection refused"));
        }

        self.replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .unwrap_or_else(|| {
                Err(AppError::Llm(LlmError::EmptyResponse {
                    model: "fake-model".to_string(),
                }))
            })
    }
}

/// 정해진 검색 결과를 돌려주는 백과사전
pub struct FakeWiki {
    titles: Vec<String>,
    pages: Vec<WikiPage>,
    fail_search: bool,
    fail_extracts: bool,
    search_calls: Mutex<Vec<(String, usize)>>,
    extract_calls: Mutex<Vec<Vec<String>>>,
}

impl FakeWiki {
    pub fn new(titles: Vec<&str>, pages: Vec<WikiPage>) -> Self {
        Self {
            titles: titles.into_iter().map(String::from).collect(),
            pages,
            fail_search: false,
            fail_extracts: false,
            search_calls: Mutex::new(Vec::new()),
            extract_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    pub fn failing_extracts(mut self) -> Self {
        self.fail_extracts = true;
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    pub fn extract_calls(&self) -> usize {
        self.extract_calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    /// 마지막 검색어
    pub fn last_query(&self) -> Option<String> {
        self.search_calls
            .lock()
            .ok()
            .and_then(|c| c.last().map(|(query, _)| query.clone()))
    }

    /// 마지막 검색의 결과 수 제한
    pub fn last_limit(&self) -> Option<usize> {
        self.search_calls
            .lock()
            .ok()
            .and_then(|c| c.last().map(|(_, limit)| *limit))
    }
}

#[async_trait]
impl EncyclopediaApi for FakeWiki {
    async fn search_titles(&self, query: &str, limit: usize) -> AppResult<Vec<String>> {
        if let Ok(mut calls) = self.search_calls.lock() {
            calls.push((query.to_string(), limit));
        }
        if self.fail_search {
            return Err(FetchError::BadStatus {
                endpoint: "search".to_string(),
                status: 503,
            }
            .into());
        }
        Ok(self.titles.iter().take(limit).cloned().collect())
    }

    async fn fetch_extracts(&self, titles: &[String]) -> AppResult<Vec<WikiPage>> {
        if let Ok(mut calls) = self.extract_calls.lock() {
            calls.push(titles.to_vec());
        }
        if self.fail_extracts {
            return Err(FetchError::BadShape {
                endpoint: "extracts".to_string(),
                message: "query.pages 가 없습니다".to_string(),
            }
            .into());
        }
        Ok(self.pages.clone())
    }
}
