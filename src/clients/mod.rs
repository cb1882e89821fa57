pub mod llm_client;
pub mod wiki_client;

pub use llm_client::{LlmBackend, LlmClient, LlmRequest};
pub use wiki_client::{EncyclopediaApi, WikiClient, WikiPage};
