//! LLM API 클라이언트
//!
//! OpenAI 호환 엔드포인트에 요청 한 번을 보내고 응답 원문을 돌려준다.
//! 응답 해석은 서비스 계층이 맡는다.

use std::sync::OnceLock;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};

/// LLM 요청 한 건
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// 로그용 작업 이름
    pub task: &'static str,
    /// 자연어 지시문 (분석할 본문 포함)
    pub prompt: String,
    /// 기대하는 출력 스키마
    pub schema: JsonValue,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl LlmRequest {
    pub fn new(task: &'static str, prompt: impl Into<String>, schema: JsonValue) -> Self {
        Self {
            task,
            prompt: prompt.into(),
            schema,
            temperature: 0.3,
            max_tokens: 2048,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// 스키마를 명시한 시스템 메시지
    pub fn system_message(&self) -> String {
        let schema = serde_json::to_string_pretty(&self.schema).unwrap_or_default();
        format!(
            "당신은 청소년 읽기 교육 자료를 만드는 전문가입니다.\n\
             응답은 아래 JSON 스키마를 따르는 JSON 만 반환하세요. 다른 설명은 붙이지 마세요.\n{}",
            schema
        )
    }
}

/// 생성형 모델 백엔드
///
/// 요청 하나에 응답 원문 하나. 테스트에서는 가짜 구현으로 교체한다.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    fn model_name(&self) -> &str;

    async fn complete(&self, request: &LlmRequest) -> AppResult<String>;
}

/// LLM 클라이언트
///
/// 실제 API 핸들은 첫 호출 때 한 번만 만든다. 키가 없으면 그 시점에 설정 오류를 낸다.
pub struct LlmClient {
    api_key: Option<String>,
    api_base_url: String,
    model_name: String,
    handle: OnceLock<Client<OpenAIConfig>>,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl LlmClient {
    /// 설정으로 클라이언트 생성
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.llm_api_key.clone(),
            api_base_url: config.llm_api_base_url.clone(),
            model_name: config.llm_model_name.clone(),
            handle: OnceLock::new(),
        }
    }

    fn handle(&self) -> AppResult<&Client<OpenAIConfig>> {
        if let Some(client) = self.handle.get() {
            return Ok(client);
        }

        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::missing_credential("LLM_API_KEY"))?;

        debug!("LLM 클라이언트 초기화: {}", self.api_base_url);
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&self.api_base_url);

        Ok(self.handle.get_or_init(|| Client::with_config(openai_config)))
    }
}

#[async_trait]
impl LlmBackend for LlmClient {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<String> {
        let client = self.handle()?;

        debug!("LLM 호출 [{}], 모델: {}", request.task, self.model_name);
        debug!("프롬프트 길이: {} 자", request.prompt.chars().count());

        let build_err = |e: async_openai::error::OpenAIError| {
            AppError::Llm(LlmError::RequestBuildFailed(e.to_string()))
        };

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(request.system_message())
            .build()
            .map_err(build_err)?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(request.prompt.as_str())
            .build()
            .map_err(build_err)?;

        let messages = vec![
            ChatCompletionRequestMessage::System(system_msg),
            ChatCompletionRequestMessage::User(user_msg),
        ];

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(request.temperature)
            .max_tokens(request.max_tokens)
            .build()
            .map_err(build_err)?;

        let response = client.chat().create(chat_request).await.map_err(|e| {
            warn!("LLM API 호출 실패 [{}]: {}", request.task, e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 호출 성공 [{}]", request.task);

        let choice = response.choices.first().ok_or_else(|| {
            AppError::Llm(LlmError::EmptyResponse {
                model: self.model_name.clone(),
            })
        })?;

        let content = choice.message.content.clone().ok_or_else(|| {
            AppError::Llm(LlmError::EmptyContent {
                model: self.model_name.clone(),
            })
        })?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_key_fails_on_first_use() {
        let client = LlmClient::new(&Config::default());

        let request = LlmRequest::new("test", "안녕하세요", json!({"type": "string"}));
        let err = client.complete(&request).await.unwrap_err();

        assert!(err.is_configuration());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config {
            llm_api_key: Some("secret-key".to_string()),
            ..Config::default()
        };
        let client = LlmClient::new(&config);
        let printed = format!("{:?}", client);
        assert!(!printed.contains("secret-key"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_handle_is_created_once() {
        let config = Config {
            llm_api_key: Some("test-key".to_string()),
            llm_model_name: "test-model".to_string(),
            ..Config::default()
        };
        let client = LlmClient::new(&config);
        let first = client.handle().unwrap() as *const _;
        let second = client.handle().unwrap() as *const _;
        assert_eq!(first, second);
        assert_eq!(client.model_name(), "test-model");
    }

    #[test]
    fn test_system_message_carries_schema() {
        let request = LlmRequest::new("test", "본문", json!({"type": "array"}));
        assert!(request.system_message().contains("\"array\""));
    }

    /// 실제 API 연결 확인
    ///
    /// 실행: `LLM_API_KEY=... cargo test test_live_completion -- --ignored --nocapture`
    #[tokio::test]
    #[ignore]
    async fn test_live_completion() {
        let _ = tracing_subscriber::fmt::try_init();

        let client = LlmClient::new(&Config::from_env().expect("설정 로드 실패"));
        let request = LlmRequest::new(
            "live",
            "육하원칙 여섯 항목의 이름을 배열로 알려주세요.",
            json!({"type": "array", "items": {"type": "string"}}),
        );

        let response = client.complete(&request).await.expect("LLM 호출 실패");
        println!("LLM 응답: {}", response);
        assert!(!response.is_empty());
    }
}
