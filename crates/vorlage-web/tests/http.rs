use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use vorlage_gloss::{Glosser, Lexicon, Normalizer, PrefixTable};
use vorlage_sources::Library;
use vorlage_web::handlers::{AppState, router};

fn make_state() -> AppState {
    AppState {
        glosser: Arc::new(Glosser::seed()),
        library: Arc::new(Library::seeded()),
        disable_cache: false,
    }
}

async fn get_json(state: AppState, uri: &str) -> (StatusCode, serde_json::Value) {
    let app = router(state);
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body_bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let body = serde_json::from_slice(&body_bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn healthz_ok() {
    let app = router(make_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn verse_endpoint_returns_four_columns_and_gloss() {
    let (status, body) = get_json(make_state(), "/v1/verse?ref=Genesis+1:1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reference"], "Genesis 1:1");

    let traditions = body["traditions"].as_array().unwrap();
    assert_eq!(traditions.len(), 4);
    assert_eq!(traditions[0]["tradition"], "masoretic");
    assert!(
        !traditions[0]["original"]
            .as_str()
            .unwrap()
            .starts_with('[')
    );
    // No DSS seed for Genesis; the column still renders as a placeholder.
    assert_eq!(traditions[1]["tradition"], "dss");
    assert_eq!(traditions[1]["original"], "[Verse not available]");

    let gloss = body["gloss"].as_array().unwrap();
    assert_eq!(gloss.len(), 7);
    assert_eq!(gloss[0]["gloss"], "beginning");
    assert_eq!(gloss[5]["gloss"], "and-[obj]");
    assert_eq!(gloss[5]["origin"], "prefix");
}

#[tokio::test]
async fn verse_endpoint_unknown_verse_degrades_to_placeholders() {
    let (status, body) = get_json(make_state(), "/v1/verse?ref=Malachi+4:6").await;
    assert_eq!(status, StatusCode::OK);
    for column in body["traditions"].as_array().unwrap() {
        assert_eq!(column["original"], "[Verse not available]");
    }
    assert!(body["gloss"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn verse_endpoint_rejects_missing_ref() {
    let (status, body) = get_json(make_state(), "/v1/verse?ref=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap_or_default()
            .contains("required")
    );
}

#[tokio::test]
async fn verse_endpoint_rejects_malformed_reference() {
    let (status, body) = get_json(make_state(), "/v1/verse?ref=Genesis").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap_or_default()
            .contains("unrecognized")
    );
}

#[tokio::test]
async fn gloss_endpoint_composes_prefix_gloss() {
    // text = ואת
    let (status, body) = get_json(make_state(), "/v1/gloss?text=%D7%95%D7%90%D7%AA").await;
    assert_eq!(status, StatusCode::OK);
    let words = body["words"].as_array().unwrap();
    assert_eq!(words.len(), 1);
    assert_eq!(words[0]["gloss"], "and-[obj]");
    assert_eq!(words[0]["origin"], "prefix");
}

#[tokio::test]
async fn gloss_endpoint_rejects_empty_text() {
    let (status, body) = get_json(make_state(), "/v1/gloss?text=+++").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap_or_default()
            .contains("required")
    );
}

#[tokio::test]
async fn gloss_endpoint_punctuation_only_yields_empty_list() {
    // text = ׃ (sof pasuq)
    let (status, body) = get_json(make_state(), "/v1/gloss?text=%D7%83").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["words"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn custom_lexicon_file_drives_glossing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lexicon.tsv");
    std::fs::write(&path, "שלום\tpeace\n").unwrap();

    let normalizer = Normalizer::standard();
    let lexicon = Lexicon::load(&path, &normalizer).unwrap();
    let state = AppState {
        glosser: Arc::new(Glosser::new(normalizer, lexicon, PrefixTable::seed())),
        library: Arc::new(Library::seeded()),
        disable_cache: false,
    };

    // text = שלום
    let (status, body) = get_json(state, "/v1/gloss?text=%D7%A9%D7%9C%D7%95%D7%9D").await;
    assert_eq!(status, StatusCode::OK);
    let words = body["words"].as_array().unwrap();
    assert_eq!(words[0]["gloss"], "peace");
    assert_eq!(words[0]["origin"], "lexicon");
}
