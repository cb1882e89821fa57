//! 워크스페이스 - 흐름 계층
//!
//! 선택된 글 한 칸과 육하원칙 답안 한 칸을 들고, 사용자가 누른 동작을
//! 서비스에 넘긴 뒤 비동기 결과를 상태에 반영한다.
//!
//! 상태 전이:
//! 1. select → Loaded (답안 초기화, 쉬운 글 해제)
//! 2. 분석 요청 → busy → 답안 여섯 칸 덮어쓰기 / 실패 시 알림
//! 3. 쉬운 글 요청 (Loaded 에서만) → busy → Simplified / 실패 시 로그만
//! 4. 원문 보기 → Loaded
//!
//! AI 요청은 `begin_*` 로 표를 받고 `complete_*` 로 결과를 넘긴다.
//! 그 사이에 다른 글을 선택했다면 결과는 버린다. 진행 중 표시는 표 단위로
//! 들고 있으므로, 선택을 바꾸거나 요청이 취소되면 함께 풀린다.

use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::models::{AnalysisResult, Article, Difficulty, W1hAnswers, W1hKey, W1hQuotes, Worksheet};
use crate::services::AnnotationService;
use crate::utils::logging::truncate_text;
use crate::workflow::request_ticket::{AiAction, PendingRequest, RequestTicket};

/// 분석 실패 시 사용자 알림
pub const ANALYSIS_FAILED_ALERT: &str = "AI 분석에 실패했습니다. 잠시 후 다시 시도해주세요.";

/// 워크스페이스 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceState {
    /// 선택된 글 없음
    Empty,
    /// 원문 표시 중
    Loaded,
    /// 쉬운 글 표시 중
    Simplified,
}

/// 동작 처리 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// 결과를 상태에 반영함
    Applied,
    /// 할 일이 없었음 (글 없음, busy, 이미 쉬운 글 등)
    Unchanged,
    /// 이미 다른 글이 선택되어 결과를 버림
    Discarded,
    /// 외부 호출 실패, 이전 상태 유지
    Failed,
}

/// 워크스페이스
///
/// - 오류를 밖으로 던지지 않는다. 실패는 알림 또는 조용한 대체로 바뀐다
/// - busy 는 협조적인 표시일 뿐 잠금이 아니다
#[derive(Debug, Default)]
pub struct Workspace {
    article: Option<Article>,
    answers: W1hAnswers,
    displayed_content: String,
    simplified: bool,
    /// 진행 중인 요청 (있으면 busy)
    in_flight: Option<RequestTicket>,
    difficulty: Difficulty,
    generation: u64,
    last_quotes: Option<W1hQuotes>,
    pending_alert: Option<String>,
}

impl Workspace {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    // ========== 조회 ==========

    pub fn state(&self) -> WorkspaceState {
        match (&self.article, self.simplified) {
            (None, _) => WorkspaceState::Empty,
            (Some(_), false) => WorkspaceState::Loaded,
            (Some(_), true) => WorkspaceState::Simplified,
        }
    }

    pub fn article(&self) -> Option<&Article> {
        self.article.as_ref()
    }

    pub fn answers(&self) -> &W1hAnswers {
        &self.answers
    }

    /// 화면에 보이는 본문 (원문 또는 쉬운 글)
    pub fn displayed_content(&self) -> &str {
        &self.displayed_content
    }

    pub fn is_simplified(&self) -> bool {
        self.simplified
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// 마지막 분석의 근거 문장 (답안 칸에는 반영하지 않음)
    pub fn last_quotes(&self) -> Option<&W1hQuotes> {
        self.last_quotes.as_ref()
    }

    /// 사용자에게 보여줄 알림을 꺼낸다
    pub fn take_alert(&mut self) -> Option<String> {
        self.pending_alert.take()
    }

    // ========== 사용자 동작 ==========

    /// 글 선택
    ///
    /// 이전 상태와 관계없이 답안을 비우고 원문 보기로 돌아간다.
    /// 진행 중이던 요청의 결과는 이후 도착해도 버려진다.
    pub fn select(&mut self, article: Article) {
        info!("📄 글 선택: {}", article);
        self.generation += 1;
        self.in_flight = None;
        self.displayed_content = article.content.clone();
        self.article = Some(article);
        self.answers = W1hAnswers::default();
        self.simplified = false;
        self.last_quotes = None;
    }

    /// 원문 보기
    pub fn restore_original(&mut self) -> bool {
        let Some(article) = &self.article else {
            return false;
        };
        if !self.simplified {
            return false;
        }
        self.displayed_content = article.content.clone();
        self.simplified = false;
        debug!("원문 복원");
        true
    }

    /// 답안 한 칸 수정
    ///
    /// 글이 선택되어 있으면 busy 여부와 관계없이 허용한다.
    pub fn edit_answer(&mut self, key: W1hKey, value: impl Into<String>) -> bool {
        if self.article.is_none() {
            return false;
        }
        self.answers.set(key, value);
        true
    }

    /// 활동지 저장용 스냅샷
    pub fn save(&self) -> Option<Worksheet> {
        let article = self.article.clone()?;
        Some(Worksheet {
            saved_at: chrono::Local::now(),
            difficulty: self.difficulty,
            simplified: self.simplified,
            displayed_content: self.displayed_content.clone(),
            article,
            answers: self.answers.clone(),
        })
    }

    /// 인쇄용 평문
    pub fn print(&self) -> Option<String> {
        self.save().map(|sheet| sheet.render_text())
    }

    // ========== AI 요청 (표 발급 / 결과 반영) ==========

    /// 분석 요청 시작
    ///
    /// 글이 없거나 다른 AI 작업 중이면 `None`.
    pub fn begin_analysis(&mut self) -> Option<PendingRequest> {
        self.begin(AiAction::Analyze)
    }

    /// 분석 결과 반영
    pub fn complete_analysis(
        &mut self,
        ticket: &RequestTicket,
        result: AppResult<AnalysisResult>,
    ) -> ActionOutcome {
        if ticket.action != AiAction::Analyze {
            warn!("⚠️ 분석 결과 자리에 다른 작업의 표: {}", ticket);
            return ActionOutcome::Discarded;
        }
        self.release(ticket);

        if !self.is_current(ticket) {
            debug!("{} 오래된 분석 결과 폐기", ticket);
            return ActionOutcome::Discarded;
        }

        match result {
            Ok(analysis) => {
                self.answers = analysis.answers;
                self.last_quotes = Some(analysis.quotes);
                info!("✓ 분석 결과 반영 {}", ticket);
                ActionOutcome::Applied
            }
            Err(e) => {
                warn!("⚠️ AI 분석 실패 {}: {}", ticket, e);
                self.pending_alert = Some(ANALYSIS_FAILED_ALERT.to_string());
                ActionOutcome::Failed
            }
        }
    }

    /// 쉬운 글 요청 시작
    ///
    /// 이미 쉬운 글이면 호출 없이 `None`.
    pub fn begin_simplify(&mut self) -> Option<PendingRequest> {
        if self.simplified {
            debug!("이미 쉬운 글 상태, 요청 생략");
            return None;
        }
        self.begin(AiAction::Simplify)
    }

    /// 쉬운 글 결과 반영
    pub fn complete_simplify(
        &mut self,
        ticket: &RequestTicket,
        result: AppResult<String>,
    ) -> ActionOutcome {
        if ticket.action != AiAction::Simplify {
            warn!("⚠️ 쉬운 글 결과 자리에 다른 작업의 표: {}", ticket);
            return ActionOutcome::Discarded;
        }
        self.release(ticket);

        if !self.is_current(ticket) {
            debug!("{} 오래된 쉬운 글 결과 폐기", ticket);
            return ActionOutcome::Discarded;
        }
        if self.simplified {
            return ActionOutcome::Unchanged;
        }

        match result {
            Ok(text) => {
                debug!("쉬운 글: {}", truncate_text(&text, 80));
                self.displayed_content = text;
                self.simplified = true;
                info!("✓ 쉬운 글 반영 {}", ticket);
                ActionOutcome::Applied
            }
            Err(e) => {
                warn!("⚠️ 쉬운 글 변환 실패 {}: {}", ticket, e);
                ActionOutcome::Failed
            }
        }
    }

    // ========== 서비스 호출까지 한 번에 ==========

    /// 분석 요청 → 서비스 호출 → 결과 반영
    ///
    /// 이 future 가 도중에 버려져도 진행 중 표시는 풀린다.
    pub async fn request_analysis(&mut self, service: &AnnotationService) -> ActionOutcome {
        let Some(pending) = self.begin_analysis() else {
            return ActionOutcome::Unchanged;
        };
        let result = {
            let _release = InFlightRelease::new(self, &pending.ticket);
            service
                .extract_answers(&pending.input, pending.difficulty)
                .await
        };
        self.complete_analysis(&pending.ticket, result)
    }

    /// 쉬운 글 요청 → 서비스 호출 → 결과 반영
    ///
    /// 이 future 가 도중에 버려져도 진행 중 표시는 풀린다.
    pub async fn request_simplify(&mut self, service: &AnnotationService) -> ActionOutcome {
        let Some(pending) = self.begin_simplify() else {
            return ActionOutcome::Unchanged;
        };
        let result = {
            let _release = InFlightRelease::new(self, &pending.ticket);
            service.try_simplify(&pending.input).await
        };
        self.complete_simplify(&pending.ticket, result)
    }

    // ========== 내부 ==========

    fn begin(&mut self, action: AiAction) -> Option<PendingRequest> {
        let article = self.article.as_ref()?;
        if let Some(running) = &self.in_flight {
            debug!("{} 진행 중, {} 요청 무시", running, action);
            return None;
        }

        let ticket = RequestTicket {
            action,
            article_id: article.id.clone(),
            generation: self.generation,
        };
        debug!("{} 시작", ticket);
        self.in_flight = Some(ticket.clone());

        Some(PendingRequest {
            ticket,
            input: article.content.clone(),
            difficulty: self.difficulty,
        })
    }

    /// 이 표가 진행 중 표시의 주인일 때만 푼다
    fn release(&mut self, ticket: &RequestTicket) {
        if self.in_flight.as_ref() == Some(ticket) {
            self.in_flight = None;
        }
    }

    fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.generation == ticket.generation
            && self
                .article
                .as_ref()
                .is_some_and(|a| a.id == ticket.article_id)
    }
}

/// 서비스 호출 동안 살아 있다가 버려질 때 진행 중 표시를 푼다
struct InFlightRelease<'a> {
    workspace: &'a mut Workspace,
    ticket: &'a RequestTicket,
}

impl<'a> InFlightRelease<'a> {
    fn new(workspace: &'a mut Workspace, ticket: &'a RequestTicket) -> Self {
        Self { workspace, ticket }
    }
}

impl Drop for InFlightRelease<'_> {
    fn drop(&mut self) {
        self.workspace.release(self.ticket);
    }
}
