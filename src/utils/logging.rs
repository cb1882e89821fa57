/// 로그 도구 모듈
///
/// 로그 초기화와 출력 형식 보조 함수
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// tracing 구독자 초기화
///
/// `RUST_LOG` 가 있으면 그대로 쓰고, 없으면 `info` (상세 모드면 `debug`).
/// 이미 초기화된 경우 조용히 넘어간다.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 프로그램 시작 정보
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 육하원칙 읽기 활동 세션 시작");
    info!("🤖 모델: {} ({})", config.llm_model_name, config.llm_api_base_url);
    info!("📚 백과사전: {}", config.wiki_api_base_url);
    info!("📊 기본 난이도: {}", config.default_difficulty);
    if let Err(e) = config.validate_llm() {
        warn!("⚠️ {}: AI 기능은 첫 사용 시 실패합니다", e);
    }
    info!("{}", "=".repeat(60));
}

/// 세션 종료 요약
///
/// # 인자
/// - `title`: 작업한 글 제목
/// - `filled`: 채워진 답안 수
/// - `saved_to`: 저장 경로 (없으면 저장 안 함)
pub fn log_session_summary(title: &str, filled: usize, saved_to: Option<&str>) {
    info!("\n{}", "=".repeat(60));
    info!("📊 세션 요약");
    info!(
        "완료 시각: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 글: {}", title);
    info!("✅ 채운 답안: {}/6", filled);
    match saved_to {
        Some(path) => info!("💾 저장 위치: {}", path),
        None => info!("💾 저장하지 않음"),
    }
    info!("{}", "=".repeat(60));
}

/// 긴 문자열을 로그용으로 자른다
///
/// # 인자
/// - `text`: 원문
/// - `max_len`: 최대 문자 수
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
