//! AI 요청 표
//!
//! "어느 글을 선택했을 때 보낸 요청인가" 를 담는다.

use std::fmt::Display;

use crate::models::Difficulty;

/// AI 작업 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    /// 육하원칙 분석
    Analyze,
    /// 쉬운 글 변환
    Simplify,
}

impl Display for AiAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiAction::Analyze => f.write_str("분석"),
            AiAction::Simplify => f.write_str("쉬운 글"),
        }
    }
}

/// 요청을 보낼 때의 선택 정보
///
/// 완료 시점에 현재 선택과 비교해 오래된 결과를 버리는 데 쓴다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub action: AiAction,
    /// 요청 당시 글 id
    pub article_id: String,
    /// 요청 당시 선택 세대 (선택할 때마다 1 증가)
    pub generation: u64,
}

impl Display for RequestTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} 요청 글#{} 세대#{}]",
            self.action, self.article_id, self.generation
        )
    }
}

/// 보낼 요청 한 건
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub ticket: RequestTicket,
    /// 모델에 보낼 본문 (항상 원문)
    pub input: String,
    pub difficulty: Difficulty,
}
