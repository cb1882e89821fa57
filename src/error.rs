use thiserror::Error;

/// 애플리케이션 오류 타입
#[derive(Debug, Error)]
pub enum AppError {
    /// 설정 오류 (자격 증명 누락 등)
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),

    /// 백과사전 검색/조회 오류
    #[error("기사 조회 오류: {0}")]
    Fetch(#[from] FetchError),

    /// LLM 전송 오류
    #[error("LLM 오류: {0}")]
    Llm(#[from] LlmError),

    /// 모델 응답이 JSON 으로 해석되지 않음
    #[error("AI 응답 형식 오류 (응답: {preview}): {source}")]
    ResponseFormat {
        preview: String,
        #[source]
        source: serde_json::Error,
    },

    /// 육하원칙 분석 결과가 불완전함
    #[error("AI 분석 실패: {0}")]
    Analysis(String),

    /// 쉬운 글 변환 결과가 불완전함
    #[error("쉬운 글 변환 실패: {0}")]
    Simplify(String),

    /// 교육용 글 생성 결과가 불완전함
    #[error("AI 글 생성 실패: {0}")]
    Generation(String),

    /// 파일 작업 오류
    #[error("파일 오류: {0}")]
    File(#[from] FileError),
}

/// 설정 오류
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 환경 변수 없음
    #[error("환경 변수 {var_name} 이(가) 설정되지 않았습니다")]
    EnvVarNotFound { var_name: String },

    /// 환경 변수 해석 실패
    #[error("환경 변수 {var_name} 해석 실패: 값 '{value}' 을(를) {expected_type} 로 변환할 수 없습니다")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

/// 백과사전 API 오류
#[derive(Debug, Error)]
pub enum FetchError {
    /// 네트워크 요청 실패
    #[error("요청 실패 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// 비정상 HTTP 상태
    #[error("비정상 응답 ({endpoint}): HTTP {status}")]
    BadStatus { endpoint: String, status: u16 },

    /// 응답 구조 해석 실패
    #[error("응답 해석 실패 ({endpoint}): {message}")]
    BadShape { endpoint: String, message: String },
}

/// LLM 전송 오류
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 호출 실패
    #[error("LLM API 호출 실패 (모델: {model}): {message}")]
    ApiCallFailed { model: String, message: String },

    /// 요청 구성 실패
    #[error("LLM 요청 구성 실패: {0}")]
    RequestBuildFailed(String),

    /// 반환된 choice 없음
    #[error("LLM 반환 결과가 비어 있습니다 (모델: {model})")]
    EmptyResponse { model: String },

    /// 반환된 내용 없음
    #[error("LLM 반환 내용이 비어 있습니다 (모델: {model})")]
    EmptyContent { model: String },
}

/// 파일 작업 오류
#[derive(Debug, Error)]
pub enum FileError {
    /// 쓰기 실패
    #[error("파일 쓰기 실패 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML 직렬화 실패
    #[error("TOML 직렬화 실패: {0}")]
    TomlSerializeFailed(#[from] toml::ser::Error),
}

// ========== 편의 생성자 ==========

impl AppError {
    /// 자격 증명 누락 오류
    pub fn missing_credential(var_name: impl Into<String>) -> Self {
        AppError::Config(ConfigError::EnvVarNotFound {
            var_name: var_name.into(),
        })
    }

    /// 요청 실패 오류
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Fetch(FetchError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// LLM 호출 실패 오류
    pub fn llm_api_failed(model: impl Into<String>, message: impl ToString) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            message: message.to_string(),
        })
    }

    /// 설정 오류 여부
    pub fn is_configuration(&self) -> bool {
        matches!(self, AppError::Config(_))
    }

    /// 응답 형식 오류 여부
    pub fn is_response_format(&self) -> bool {
        matches!(self, AppError::ResponseFormat { .. })
    }
}

// ========== Result 타입 별칭 ==========

/// 애플리케이션 결과 타입
pub type AppResult<T> = Result<T, AppError>;
