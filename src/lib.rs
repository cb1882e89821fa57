//! # W1H Reader
//!
//! 글을 읽고 육하원칙(누가, 언제, 어디서, 무엇을, 어떻게, 왜) 답안을 채우는
//! 읽기 활동 도구의 핵심부. 화면 구성은 다루지 않는다.
//!
//! ## 구조
//!
//! ### ① 외부 API 계층 (Clients)
//! - `clients/` - 외부 호출 한 번씩만 감싼다
//! - `WikiClient` - 위키백과 제목 검색 / 요약 조회
//! - `LlmClient` - OpenAI 호환 생성형 모델 호출 (핸들은 첫 사용 시 생성)
//!
//! ### ② 능력 계층 (Services)
//! - `services/` - "무엇을 할 수 있는가" 만 기술한다
//! - `ArticleSource` - 검색 결과를 학습용 글로 변환
//! - `AnnotationService` - 육하원칙 추출 / 쉬운 글 / 글 생성 / 키워드 추천
//! - `WorksheetWriter` - 활동지 TOML 저장
//!
//! ### ③ 흐름 계층 (Workflow)
//! - `workflow/` - 글 한 칸과 답안 한 칸의 상태 전이
//! - `Workspace` - 선택, 분석, 쉬운 글, 원문 보기, 답안 수정, 저장, 인쇄
//! - `RequestTicket` - 오래된 비동기 결과를 버리기 위한 요청 표
//!
//! ### ④ 편성 계층 (Orchestration)
//! - `orchestrator/` - 세션 한 번을 처음부터 끝까지 진행

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod test_support;
pub mod utils;
pub mod workflow;

// 자주 쓰는 타입 재수출
pub use clients::{EncyclopediaApi, LlmBackend, LlmClient, LlmRequest, WikiClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnalysisResult, Article, Difficulty, W1hAnswers, W1hKey, Worksheet};
pub use orchestrator::{App, SessionReport};
pub use services::{AnnotationService, ArticleSource, WorksheetWriter};
pub use workflow::{ActionOutcome, Workspace, WorkspaceState};
