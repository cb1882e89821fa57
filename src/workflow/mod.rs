pub mod request_ticket;
pub mod workspace;

pub use request_ticket::{AiAction, PendingRequest, RequestTicket};
pub use workspace::{ActionOutcome, Workspace, WorkspaceState, ANALYSIS_FAILED_ALERT};
