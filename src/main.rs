use anyhow::Result;
use w1h_reader::utils::logging;
use w1h_reader::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 설정 로드
    let config = Config::from_env()?;

    // 로그 초기화
    logging::init(config.verbose_logging);

    // 인자 전체를 검색어로 사용 (없으면 추천 키워드)
    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    // 초기화 후 세션 실행
    App::initialize(config)?.run(Some(&query)).await?;

    Ok(())
}
