use std::str::FromStr;

use crate::error::ConfigError;
use crate::models::Difficulty;

/// 프로그램 설정
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 설정 ---
    /// API 키 (없으면 첫 AI 호출 시점에 설정 오류)
    pub llm_api_key: Option<String>,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    // --- 백과사전 API 설정 ---
    pub wiki_api_base_url: String,
    /// 제목 검색 최대 결과 수
    pub wiki_search_limit: usize,
    // --- 세션 설정 ---
    /// 활동지 저장 디렉터리
    pub output_dir: String,
    /// 기본 난이도
    pub default_difficulty: Difficulty,
    /// 상세 로그 출력 여부
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: None,
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.5-flash".to_string(),
            wiki_api_base_url: "https://ko.wikipedia.org/w/api.php".to_string(),
            wiki_search_limit: 10,
            output_dir: "worksheets".to_string(),
            default_difficulty: Difficulty::Medium,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 환경 변수에서 설정 로드
    ///
    /// 없는 변수는 기본값을 쓰고, 값이 있는데 해석되지 않으면 오류.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 변수 조회 함수로 설정 로드
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default = Self::default();
        Ok(Self {
            llm_api_key: lookup("LLM_API_KEY").filter(|v| !v.trim().is_empty()),
            llm_api_base_url: lookup("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: lookup("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            wiki_api_base_url: lookup("WIKI_API_BASE_URL").unwrap_or(default.wiki_api_base_url),
            wiki_search_limit: parse_var(&lookup, "WIKI_SEARCH_LIMIT", "usize", default.wiki_search_limit)?,
            output_dir: lookup("OUTPUT_DIR").unwrap_or(default.output_dir),
            default_difficulty: parse_var(&lookup, "DEFAULT_DIFFICULTY", "easy|medium|hard", default.default_difficulty)?,
            verbose_logging: parse_var(&lookup, "VERBOSE_LOGGING", "bool", default.verbose_logging)?,
        })
    }

    /// LLM 자격 증명 확인
    ///
    /// 키가 없으면 `ConfigError::EnvVarNotFound` 를 반환한다.
    pub fn validate_llm(&self) -> Result<&str, ConfigError> {
        self.llm_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::EnvVarNotFound {
                var_name: "LLM_API_KEY".to_string(),
            })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var_name: &str,
    expected_type: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var_name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
    }
}
