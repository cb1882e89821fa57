//! 세션 실행기 - 편성 계층
//!
//! ## 역할
//!
//! 설정으로 클라이언트와 서비스를 만들고 워크스페이스 하나로 읽기 활동을
//! 처음부터 끝까지 한 번 진행한다.
//!
//! 1. **키워드 추천**: 검색어가 없을 때 쓸 주제를 받는다
//! 2. **글 확보**: 백과사전 검색, 결과가 없으면 AI 로 글 생성
//! 3. **분석**: 글을 선택하고 AI 분석으로 답안을 채운다
//! 4. **저장/인쇄**: 활동지를 TOML 로 저장하고 인쇄용 평문을 로그로 남긴다

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::clients::{LlmClient, WikiClient};
use crate::config::Config;
use crate::models::Article;
use crate::services::{AnnotationService, ArticleSource, WorksheetWriter};
use crate::utils::logging::{log_session_summary, log_startup};
use crate::workflow::{ActionOutcome, Workspace};

/// 세션 결과
#[derive(Debug, Default)]
pub struct SessionReport {
    /// 추천받은 키워드
    pub keywords: Vec<String>,
    /// 작업한 글 (확보하지 못했으면 없음)
    pub article: Option<Article>,
    /// 분석 결과
    pub analysis: Option<ActionOutcome>,
    /// 채워진 답안 수
    pub filled_answers: usize,
    /// 저장한 활동지 경로
    pub saved_to: Option<PathBuf>,
    /// 인쇄용 평문
    pub printed: Option<String>,
}

/// 애플리케이션 주 구조
pub struct App {
    config: Config,
    source: ArticleSource,
    annotator: AnnotationService,
    writer: WorksheetWriter,
}

impl App {
    /// 설정으로 애플리케이션 초기화
    ///
    /// LLM 키가 없어도 실패하지 않는다. AI 기능은 처음 쓸 때 설정 오류가 난다.
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let wiki = Arc::new(WikiClient::new(&config)?);
        let llm = Arc::new(LlmClient::new(&config));

        let source = ArticleSource::new(wiki, config.wiki_search_limit);
        let annotator = AnnotationService::new(llm);
        let writer = WorksheetWriter::new(&config.output_dir);

        Ok(Self::with_services(config, source, annotator, writer))
    }

    /// 서비스를 직접 주입해서 생성
    pub fn with_services(
        config: Config,
        source: ArticleSource,
        annotator: AnnotationService,
        writer: WorksheetWriter,
    ) -> Self {
        Self {
            config,
            source,
            annotator,
            writer,
        }
    }

    /// 세션 한 번 실행
    ///
    /// # 인자
    /// - `query`: 검색어 (없으면 추천 키워드 첫 번째)
    pub async fn run(&self, query: Option<&str>) -> Result<SessionReport> {
        let mut report = SessionReport::default();

        // ========== 1. 키워드 추천 ==========
        info!("💡 추천 키워드 요청...");
        report.keywords = self.annotator.recommend_keywords().await;
        if !report.keywords.is_empty() {
            info!("✓ 추천 키워드: {}", report.keywords.join(", "));
        }

        let topic = match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => q.to_string(),
            None => match report.keywords.first() {
                Some(k) => k.clone(),
                None => {
                    warn!("⚠️ 검색어도 추천 키워드도 없어 세션을 종료합니다");
                    return Ok(report);
                }
            },
        };

        // ========== 2. 글 확보 ==========
        let Some(article) = self.acquire_article(&topic).await else {
            warn!("⚠️ '{}' 에 대한 글을 확보하지 못했습니다", topic);
            return Ok(report);
        };

        // ========== 3. 선택 + 분석 ==========
        let mut workspace = Workspace::new(self.config.default_difficulty);
        workspace.select(article.clone());
        report.article = Some(article);

        let outcome = workspace.request_analysis(&self.annotator).await;
        if let Some(alert) = workspace.take_alert() {
            warn!("📢 {}", alert);
        }
        report.analysis = Some(outcome);
        report.filled_answers = workspace
            .answers()
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .count();

        // ========== 4. 저장 + 인쇄 ==========
        if let Some(sheet) = workspace.save() {
            match self.writer.write(&sheet).await {
                Ok(path) => report.saved_to = Some(path),
                Err(e) => error!("❌ 활동지 저장 실패: {}", e),
            }
        }

        if let Some(text) = workspace.print() {
            info!("\n{}", text);
            report.printed = Some(text);
        }

        let title = report
            .article
            .as_ref()
            .map(|a| a.title.as_str())
            .unwrap_or_default();
        let saved = report.saved_to.as_ref().map(|p| p.display().to_string());
        log_session_summary(title, report.filled_answers, saved.as_deref());

        Ok(report)
    }

    /// 백과사전 검색, 결과가 없으면 AI 생성
    async fn acquire_article(&self, topic: &str) -> Option<Article> {
        match self.source.search(topic).await {
            Ok(articles) => {
                if let Some(first) = articles.into_iter().next() {
                    return Some(first);
                }
                info!("검색 결과가 없어 AI 로 글을 생성합니다: '{}'", topic);
            }
            Err(e) => {
                warn!("⚠️ 검색 실패, AI 생성으로 대체: {}", e);
            }
        }

        match self
            .annotator
            .generate_article(topic, self.config.default_difficulty)
            .await
        {
            Ok(article) => Some(article),
            Err(e) => {
                error!("❌ 글 생성 실패: {}", e);
                None
            }
        }
    }
}
