//! 편성 계층 (Orchestration Layer)
//!
//! ## 계층 관계
//!
//! ```text
//! orchestrator::App (세션 한 번)
//!     ↓
//! workflow::Workspace (글 한 칸 + 답안 한 칸)
//!     ↓
//! services (능력 계층: 기사 검색 / AI 주석 / 활동지 저장)
//!     ↓
//! clients (외부 API: 위키백과 / LLM)
//! ```

pub mod session;

pub use session::{App, SessionReport};
