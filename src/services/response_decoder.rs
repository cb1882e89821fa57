//! 모델 응답 해석
//!
//! 모델은 JSON 을 평문으로 돌려주며 가끔 마크다운 코드 블록으로 감싼다.
//! 감싼 부분을 걷어낸 뒤 JSON 으로 해석하고, 해석 실패는 전송 실패와 구분되는
//! `AppError::ResponseFormat` 으로 보고한다.

use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::{debug, error};

use crate::error::{AppError, AppResult};
use crate::utils::logging::truncate_text;

fn fence_pattern() -> Option<&'static Regex> {
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    FENCE
        .get_or_init(|| Regex::new(r"(?s)^\s*```[A-Za-z]*\s*\n?(.*?)\n?\s*```\s*$").ok())
        .as_ref()
}

/// 코드 블록 표시 제거
///
/// 전체가 코드 블록이면 그 안쪽만, 아니면 앞뒤 공백만 걷어낸 원문을 돌려준다.
pub fn strip_code_fence(text: &str) -> &str {
    let inner = fence_pattern()
        .and_then(|re| re.captures(text))
        .and_then(|c| c.get(1));
    match inner {
        Some(inner) => inner.as_str().trim(),
        None => text.trim(),
    }
}

/// 응답 원문을 JSON 값으로 해석
pub fn decode_json(text: &str) -> AppResult<JsonValue> {
    let clean = strip_code_fence(text);
    serde_json::from_str(clean).map_err(|source| {
        error!("JSON 해석 실패: {}", source);
        debug!("응답 원문: {}", text);
        AppError::ResponseFormat {
            preview: truncate_text(text, 120),
            source,
        }
    })
}

/// JSON 값을 기대하는 타입으로 변환
///
/// 문법은 맞지만 필수 항목이 빠진 경우 `on_shape_error` 로 만든 오류를 돌려준다.
pub fn decode_as<T: DeserializeOwned>(
    text: &str,
    on_shape_error: impl FnOnce(String) -> AppError,
) -> AppResult<T> {
    let value = decode_json(text)?;
    serde_json::from_value(value).map_err(|e| on_shape_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json() {
        assert_eq!(strip_code_fence(r#" {"a":1} "#), r#"{"a":1}"#);
        assert_eq!(decode_json(r#"{"a":1}"#).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_json_fence() {
        let text = "```json\n{\"a\": [1, 2]}\n```";
        assert_eq!(decode_json(text).unwrap(), json!({"a": [1, 2]}));
    }

    #[test]
    fn test_bare_fence() {
        let text = "```\n[\"x\", \"y\"]\n```";
        assert_eq!(decode_json(text).unwrap(), json!(["x", "y"]));
    }

    #[test]
    fn test_fence_without_newlines() {
        assert_eq!(strip_code_fence("```json{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_non_json_is_response_format() {
        let err = decode_json("죄송하지만 분석할 수 없습니다.").unwrap_err();
        assert!(err.is_response_format());
    }

    #[test]
    fn test_fenced_invalid_json_is_response_format() {
        let err = decode_json("```json\n{not json}\n```").unwrap_err();
        assert!(err.is_response_format());
    }

    #[test]
    fn test_shape_error_uses_callback() {
        #[derive(Debug, serde::Deserialize)]
        struct Needs {
            #[allow(dead_code)]
            title: String,
        }

        let err = decode_as::<Needs>(r#"{"other":1}"#, AppError::Generation).unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
    }
}
