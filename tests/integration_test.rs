use std::sync::Arc;

use w1h_reader::clients::WikiPage;
use w1h_reader::models::article::{WIKI_CATEGORY, WIKI_SOURCE};
use w1h_reader::models::UNKNOWN_ANSWER;
use w1h_reader::services::prompts::ANALYSIS_INPUT_LIMIT;
use w1h_reader::test_support::{FakeLlm, FakeWiki};
use w1h_reader::{
    ActionOutcome, AnnotationService, App, ArticleSource, Config, Difficulty, W1hKey, Workspace,
    WorkspaceState, WorksheetWriter,
};

fn wiki_page(id: u64, title: &str, extract: &str) -> WikiPage {
    WikiPage {
        pageid: Some(id),
        title: title.to_string(),
        extract: Some(extract.to_string()),
    }
}

fn chulsoo_reply() -> String {
    FakeLlm::answers_json("철수", "어제", "학교", "축구", UNKNOWN_ANSWER, UNKNOWN_ANSWER)
}

fn temp_dir(tag: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "w1h_reader_{}_{}",
        tag,
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ))
}

#[tokio::test]
async fn test_yi_sun_sin_search_maps_encyclopedia_labels() {
    let extract = "가".repeat(200);
    let wiki = Arc::new(FakeWiki::new(
        vec!["이순신"],
        vec![wiki_page(1234, "이순신", &extract)],
    ));
    let source = ArticleSource::new(wiki, 10);

    let articles = source.search("이순신").await.unwrap();

    assert_eq!(articles.len(), 1);
    let article = &articles[0];
    assert_eq!(article.id, "1234");
    assert_eq!(article.category, WIKI_CATEGORY);
    assert_eq!(article.source, WIKI_SOURCE);
    assert_eq!(article.content, extract);
    assert!(!article.is_generated());
}

#[tokio::test]
async fn test_search_failure_is_single_fetch_error() {
    let wiki = Arc::new(FakeWiki::new(vec!["A"], vec![]).failing_search());
    let source = ArticleSource::new(wiki, 10);

    let err = source.search("A").await.unwrap_err();

    assert!(matches!(err, w1h_reader::AppError::Fetch(_)));
}

#[tokio::test]
async fn test_chulsoo_analysis_fills_six_answers() {
    let fake = Arc::new(FakeLlm::replying(vec![Ok(chulsoo_reply())]));
    let annotator = AnnotationService::new(fake.clone());

    let mut ws = Workspace::new(Difficulty::Medium);
    ws.select(w1h_reader::Article {
        id: "1".to_string(),
        category: "생활".to_string(),
        title: "철수의 하루".to_string(),
        content: "철수는 어제 학교에서 축구를 했다.".to_string(),
        source: "예시".to_string(),
        read_time: "읽기".to_string(),
        keywords: vec![],
    });

    let outcome = ws.request_analysis(&annotator).await;

    assert_eq!(outcome, ActionOutcome::Applied);
    let expected = [
        (W1hKey::Who, "철수"),
        (W1hKey::When, "어제"),
        (W1hKey::Where, "학교"),
        (W1hKey::What, "축구"),
        (W1hKey::How, UNKNOWN_ANSWER),
        (W1hKey::Why, UNKNOWN_ANSWER),
    ];
    for (key, value) in expected {
        assert_eq!(ws.answers().get(key), value);
    }
    assert!(!ws.is_busy());

    // 사용자가 한 칸을 고쳐도 나머지는 그대로
    assert!(ws.edit_answer(W1hKey::How, "공을 차서"));
    assert_eq!(ws.answers().get(W1hKey::How), "공을 차서");
    assert_eq!(ws.answers().get(W1hKey::Who), "철수");
}

#[tokio::test]
async fn test_malformed_analysis_keeps_answers() {
    let fake = Arc::new(FakeLlm::replying(vec![Ok("이건 JSON 이 아닙니다".to_string())]));
    let annotator = AnnotationService::new(fake.clone());

    let err = annotator
        .extract_answers("본문", Difficulty::Medium)
        .await
        .unwrap_err();
    assert!(err.is_response_format());

    let fake = Arc::new(FakeLlm::replying(vec![Ok("```json\n{broken\n```".to_string())]));
    let annotator = AnnotationService::new(fake.clone());
    let mut ws = Workspace::default();
    ws.select(w1h_reader::Article {
        id: "1".to_string(),
        category: String::new(),
        title: String::new(),
        content: "본문".to_string(),
        source: String::new(),
        read_time: String::new(),
        keywords: vec![],
    });
    ws.edit_answer(W1hKey::Who, "내 답");

    let outcome = ws.request_analysis(&annotator).await;

    assert_eq!(outcome, ActionOutcome::Failed);
    assert_eq!(ws.answers().get(W1hKey::Who), "내 답");
    assert!(ws.take_alert().is_some());
}

#[tokio::test]
async fn test_analysis_transmits_only_prefix() {
    let fake = Arc::new(FakeLlm::replying(vec![Ok(chulsoo_reply())]));
    let annotator = AnnotationService::new(fake.clone());
    let long_text = format!("{}{}", "◆".repeat(ANALYSIS_INPUT_LIMIT), "◇".repeat(500));

    annotator
        .extract_answers(&long_text, Difficulty::Easy)
        .await
        .unwrap();

    let sent = &fake.requests()[0].prompt;
    assert!(sent.contains(&"◆".repeat(ANALYSIS_INPUT_LIMIT)));
    assert!(!sent.contains('◇'));
}

#[tokio::test]
async fn test_simplify_is_idempotent_and_restorable() {
    let fake = Arc::new(FakeLlm::replying(vec![Ok(
        r#"{"content":"쉬운 글이에요."}"#.to_string(),
    )]));
    let annotator = AnnotationService::new(fake.clone());
    let original = "복잡한 원문입니다.\n두 번째 문단입니다.";

    let mut ws = Workspace::default();
    ws.select(w1h_reader::Article {
        id: "7".to_string(),
        category: String::new(),
        title: "원문".to_string(),
        content: original.to_string(),
        source: String::new(),
        read_time: String::new(),
        keywords: vec![],
    });

    assert_eq!(ws.request_simplify(&annotator).await, ActionOutcome::Applied);
    assert_eq!(ws.state(), WorkspaceState::Simplified);
    assert_eq!(ws.displayed_content(), "쉬운 글이에요.");

    // 이미 쉬운 글이면 호출하지 않는다
    assert_eq!(ws.request_simplify(&annotator).await, ActionOutcome::Unchanged);
    assert_eq!(fake.call_count(), 1);
    assert_eq!(ws.displayed_content(), "쉬운 글이에요.");

    assert!(ws.restore_original());
    assert_eq!(ws.displayed_content(), original);
    assert_eq!(ws.state(), WorkspaceState::Loaded);
}

#[tokio::test]
async fn test_simplify_backend_failure_keeps_content() {
    let fake = Arc::new(FakeLlm::failing());
    let annotator = AnnotationService::new(fake.clone());

    let mut ws = Workspace::default();
    ws.select(w1h_reader::Article {
        id: "7".to_string(),
        category: String::new(),
        title: String::new(),
        content: "원문".to_string(),
        source: String::new(),
        read_time: String::new(),
        keywords: vec![],
    });

    let outcome = ws.request_simplify(&annotator).await;

    assert_eq!(outcome, ActionOutcome::Failed);
    assert_eq!(ws.displayed_content(), "원문");
    assert!(!ws.is_simplified());
    assert!(!ws.is_busy());
    assert!(ws.take_alert().is_none());
}

#[tokio::test]
async fn test_missing_credential_surfaces_on_first_use() {
    let llm = Arc::new(w1h_reader::LlmClient::new(&Config::default()));
    let annotator = AnnotationService::new(llm);

    let err = annotator
        .generate_article("주제", Difficulty::Medium)
        .await
        .unwrap_err();
    assert!(err.is_configuration());

    // 보조 기능은 조용히 대체
    assert!(annotator.recommend_keywords().await.is_empty());
    assert_eq!(annotator.simplify("원문").await, "원문");
}

#[tokio::test]
async fn test_session_falls_back_to_generated_article() {
    let fake = Arc::new(FakeLlm::replying(vec![
        Ok(r#"["준우의 토요일","몽실이의 하루","a","b","c","d"]"#.to_string()),
        Ok(r#"{"title":"준우의 토요일","category":"생활","content":"토요일 아침, 준우는 공원에 갔어요."}"#.to_string()),
        Ok(chulsoo_reply()),
    ]));
    let wiki = Arc::new(FakeWiki::new(vec![], vec![]));
    let output_dir = temp_dir("session");

    let config = Config {
        output_dir: output_dir.display().to_string(),
        ..Config::default()
    };
    let app = App::with_services(
        config,
        ArticleSource::new(wiki, 10),
        AnnotationService::new(fake.clone()),
        WorksheetWriter::new(output_dir.clone()),
    );

    let report = app.run(None).await.unwrap();

    assert_eq!(report.keywords.len(), 6);
    let article = report.article.expect("article");
    assert!(article.is_generated());
    assert_eq!(article.title, "준우의 토요일");
    assert_eq!(report.analysis, Some(ActionOutcome::Applied));
    assert_eq!(report.filled_answers, 6);
    assert!(report.saved_to.as_ref().is_some_and(|p| p.exists()));
    assert!(report.printed.unwrap_or_default().contains("누가: 철수"));

    let _ = tokio::fs::remove_dir_all(&output_dir).await;
}

#[tokio::test]
async fn test_session_without_topic_ends_quietly() {
    let fake = Arc::new(FakeLlm::failing());
    let wiki = Arc::new(FakeWiki::new(vec![], vec![]));
    let app = App::with_services(
        Config::default(),
        ArticleSource::new(wiki.clone(), 10),
        AnnotationService::new(fake),
        WorksheetWriter::new(temp_dir("unused")),
    );

    let report = tokio_test::assert_ok!(app.run(Some("  ")).await);

    assert!(report.article.is_none());
    assert_eq!(wiki.search_calls(), 0);
}

#[tokio::test]
async fn test_zero_matches_and_short_extracts() {
    let wiki = Arc::new(FakeWiki::new(vec![], vec![]));
    let source = ArticleSource::new(wiki.clone(), 10);
    assert!(source.search("없는 주제").await.unwrap().is_empty());
    assert_eq!(wiki.extract_calls(), 0);

    let kept = "나".repeat(50);
    let wiki = Arc::new(FakeWiki::new(
        vec!["짧은 글", "긴 글"],
        vec![
            wiki_page(1, "짧은 글", &"다".repeat(49)),
            wiki_page(2, "긴 글", &kept),
        ],
    ));
    let source = ArticleSource::new(wiki, 10);

    let articles = source.search("글").await.unwrap();

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].content, kept);
}

#[tokio::test]
async fn test_reselect_resets_answers_and_discards_stale_result() {
    let fake = Arc::new(FakeLlm::replying(vec![
        Ok(r#"{"content":"쉬운 글"}"#.to_string()),
        Ok(chulsoo_reply()),
    ]));
    let annotator = AnnotationService::new(fake);
    let article = w1h_reader::Article {
        id: "9".to_string(),
        category: String::new(),
        title: "글".to_string(),
        content: "원문".to_string(),
        source: String::new(),
        read_time: String::new(),
        keywords: vec![],
    };

    let mut ws = Workspace::default();
    ws.select(article.clone());
    ws.request_simplify(&annotator).await;
    ws.edit_answer(W1hKey::What, "숙제");

    ws.select(article.clone());
    assert!(!ws.is_simplified());
    assert!(ws.answers().is_empty());
    assert_eq!(ws.displayed_content(), "원문");

    // 요청 후 결과가 오기 전에 다시 선택하면 결과는 버린다
    let pending = ws.begin_analysis().expect("pending");
    let result = annotator
        .extract_answers(&pending.input, pending.difficulty)
        .await;
    ws.select(article);
    assert_eq!(
        ws.complete_analysis(&pending.ticket, result),
        ActionOutcome::Discarded
    );
    assert!(ws.answers().is_empty());
    assert!(!ws.is_busy());
}

#[tokio::test]
async fn test_timed_out_analysis_leaves_next_article_usable() {
    let hanging = AnnotationService::new(Arc::new(FakeLlm::hanging()));
    let fake = Arc::new(FakeLlm::replying(vec![Ok(chulsoo_reply())]));
    let annotator = AnnotationService::new(fake);
    let article = |id: &str| w1h_reader::Article {
        id: id.to_string(),
        category: String::new(),
        title: String::new(),
        content: "철수는 어제 학교에서 축구를 했다.".to_string(),
        source: String::new(),
        read_time: String::new(),
        keywords: vec![],
    };

    let mut ws = Workspace::default();
    ws.select(article("1"));
    let timed_out = tokio::time::timeout(
        std::time::Duration::from_millis(20),
        ws.request_analysis(&hanging),
    )
    .await;
    assert!(timed_out.is_err());

    ws.select(article("2"));

    assert!(!ws.is_busy());
    assert_eq!(ws.request_analysis(&annotator).await, ActionOutcome::Applied);
    assert_eq!(ws.answers().get(W1hKey::Who), "철수");
}
