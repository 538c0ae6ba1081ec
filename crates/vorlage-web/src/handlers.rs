use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use vorlage_gloss::Glosser;
use vorlage_sources::Library;
use vorlage_types::{GlossOrigin, GlossedWord, Tradition, VerseRef};

#[derive(Clone)]
pub struct AppState {
    pub glosser: Arc<Glosser>,
    pub library: Arc<Library>,
    pub disable_cache: bool,
}

#[derive(Deserialize)]
pub struct VerseQuery {
    #[serde(rename = "ref")]
    pub reference: String,
}

#[derive(Deserialize)]
pub struct GlossQuery {
    pub text: String,
}

#[derive(Serialize)]
struct ColumnDto {
    tradition: &'static str,
    title: &'static str,
    language: &'static str,
    original: String,
    english: String,
    notes: String,
}

#[derive(Serialize)]
struct WordDto {
    word: String,
    gloss: String,
    origin: &'static str,
}

#[derive(Serialize)]
struct VerseResponse {
    reference: String,
    traditions: Vec<ColumnDto>,
    gloss: Vec<WordDto>,
}

#[derive(Serialize)]
struct GlossResponse {
    text: String,
    words: Vec<WordDto>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(frontend))
        .route("/robots.txt", get(robots))
        .route("/healthz", get(healthz))
        .route("/v1/verse", get(verse))
        .route("/v1/gloss", get(gloss))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn robots(State(state): State<AppState>) -> Response {
    let headers = axum::http::HeaderMap::from_iter([
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        ),
        (
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=86400, immutable"),
        ),
    ]);
    if state.disable_cache {
        return "User-agent: *\nDisallow: /".into_response();
    }
    (headers, "User-agent: *\nDisallow: /").into_response()
}

async fn frontend(State(state): State<AppState>) -> Response {
    let html = Html(FRONTEND_HTML);
    if state.disable_cache {
        return html.into_response();
    }
    (
        [(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=3600, immutable"),
        )],
        html,
    )
        .into_response()
}

async fn verse(
    State(state): State<AppState>,
    Query(params): Query<VerseQuery>,
) -> Result<Response, ApiError> {
    let reference = params.reference.trim();
    if reference.is_empty() {
        return Err(ApiError::bad_request("ref is required"));
    }
    let parsed = VerseRef::parse(reference).ok_or_else(|| {
        ApiError::bad_request("unrecognized verse reference, expected e.g. \"Genesis 1:1\"")
    })?;

    let mut traditions = Vec::with_capacity(Tradition::ALL.len());
    let mut gloss = Vec::new();
    for tradition in Tradition::ALL {
        let passage = state.library.passage(tradition, &parsed).await;
        if tradition == Tradition::Masoretic && !passage.is_placeholder() {
            gloss = word_dtos(state.glosser.gloss_verse(&passage.original));
        }
        traditions.push(ColumnDto {
            tradition: tradition.slug(),
            title: tradition.title(),
            language: tradition.language(),
            original: passage.original,
            english: passage.english,
            notes: passage.notes,
        });
    }

    let response = VerseResponse {
        reference: parsed.to_string(),
        traditions,
        gloss,
    };
    Ok(cached_json(&state, response))
}

async fn gloss(
    State(state): State<AppState>,
    Query(params): Query<GlossQuery>,
) -> Result<Response, ApiError> {
    let text = params.text.trim();
    if text.is_empty() {
        return Err(ApiError::bad_request("text is required"));
    }

    let response = GlossResponse {
        text: text.to_string(),
        words: word_dtos(state.glosser.gloss_verse(text)),
    };
    Ok(cached_json(&state, response))
}

fn word_dtos(words: Vec<GlossedWord>) -> Vec<WordDto> {
    words
        .into_iter()
        .map(|word| WordDto {
            origin: origin_slug(word.origin),
            word: word.surface,
            gloss: word.gloss,
        })
        .collect()
}

fn origin_slug(origin: GlossOrigin) -> &'static str {
    match origin {
        GlossOrigin::Lexicon => "lexicon",
        GlossOrigin::Prefix { .. } => "prefix",
        GlossOrigin::Unmapped => "unmapped",
    }
}

fn cached_json<T: Serialize>(state: &AppState, payload: T) -> Response {
    if state.disable_cache {
        Json(payload).into_response()
    } else {
        (
            [(
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=300"),
            )],
            Json(payload),
        )
            .into_response()
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal => {
                let body = Json(json!({ "error": "internal server error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

const FRONTEND_HTML: &str = r#"
<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Proto-Vorlage</title>
  <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" rel="stylesheet">
  <style>
    body { background: #f8f9fa; }
    .original { font-size: 1.35rem; }
    .original.hebrew, .original.greek { line-height: 2; }
    .original.hebrew { direction: rtl; text-align: right; }
    .interlinear { direction: rtl; display: flex; flex-wrap: wrap; gap: 0.75rem; }
    .interlinear .pair { text-align: center; }
    .interlinear .word { font-size: 1.25rem; }
    .interlinear .gloss { font-size: 0.8rem; color: #6c757d; }
    .interlinear .gloss.unmapped { color: #adb5bd; font-style: italic; }
    .notes { font-size: 0.8rem; }
  </style>
</head>
<body class="py-4">
  <div class="container">
    <div class="mb-3">
      <h1 class="h4 mb-0">Proto-Vorlage</h1>
      <div class="small text-muted">
        Enter any verse from Genesis 1:1 to Malachi 4:6. Masoretic Hebrew,
        Dead Sea Scrolls, Septuagint and Vulgate side by side, with a
        word-by-word gloss of the Hebrew.
      </div>
    </div>

    <div class="card shadow-sm mb-4">
      <div class="card-body">
        <form id="lookupForm" class="row g-2">
          <div class="col">
            <input id="refInput" type="text" class="form-control form-control-lg"
                   placeholder="e.g. Genesis 1:1" autocomplete="off">
          </div>
          <div class="col-auto">
            <button type="submit" class="btn btn-primary btn-lg">Look up</button>
          </div>
        </form>
        <div id="status" class="form-text">Try Genesis 1:1, Isaiah 7:14 or Psalm 22:16.</div>
      </div>
    </div>

    <div id="columns" class="row g-3 mb-4"></div>

    <div id="glossCard" class="card shadow-sm d-none">
      <div class="card-body">
        <h2 class="h6 text-muted">Interlinear gloss (Masoretic)</h2>
        <div id="interlinear" class="interlinear"></div>
      </div>
    </div>
  </div>

  <script>
    const form = document.getElementById('lookupForm');
    const refInput = document.getElementById('refInput');
    const statusEl = document.getElementById('status');
    const columnsEl = document.getElementById('columns');
    const glossCard = document.getElementById('glossCard');
    const interlinearEl = document.getElementById('interlinear');

    function columnCard(column) {
      const col = document.createElement('div');
      col.className = 'col-12 col-md-6 col-xl-3';
      const langClass = column.language.toLowerCase();
      const card = document.createElement('div');
      card.className = 'card h-100 shadow-sm';
      const body = document.createElement('div');
      body.className = 'card-body';

      const title = document.createElement('h2');
      title.className = 'h6';
      title.textContent = column.title;

      const original = document.createElement('div');
      original.className = 'original mb-2 ' + langClass;
      original.textContent = column.original;

      const english = document.createElement('div');
      english.className = 'mb-2';
      english.textContent = column.english;

      const notes = document.createElement('div');
      notes.className = 'notes text-muted';
      notes.textContent = column.notes;

      body.append(title, original, english, notes);
      card.appendChild(body);
      col.appendChild(card);
      return col;
    }

    function renderGloss(words) {
      interlinearEl.innerHTML = '';
      if (!words.length) {
        glossCard.classList.add('d-none');
        return;
      }
      for (const entry of words) {
        const pair = document.createElement('div');
        pair.className = 'pair';
        const word = document.createElement('div');
        word.className = 'word';
        word.textContent = entry.word;
        const gloss = document.createElement('div');
        gloss.className = 'gloss' + (entry.origin === 'unmapped' ? ' unmapped' : '');
        gloss.textContent = entry.gloss;
        pair.append(word, gloss);
        interlinearEl.appendChild(pair);
      }
      glossCard.classList.remove('d-none');
    }

    async function lookup(reference) {
      statusEl.textContent = 'Loading ' + reference + '…';
      columnsEl.innerHTML = '';
      renderGloss([]);
      try {
        const resp = await fetch('/v1/verse?ref=' + encodeURIComponent(reference));
        const data = await resp.json();
        if (!resp.ok) {
          statusEl.textContent = data.error || 'Lookup failed.';
          return;
        }
        statusEl.textContent = data.reference;
        for (const column of data.traditions) {
          columnsEl.appendChild(columnCard(column));
        }
        renderGloss(data.gloss);
      } catch (err) {
        statusEl.textContent = err.message;
      }
    }

    form.addEventListener('submit', (e) => {
      e.preventDefault();
      const reference = refInput.value.trim();
      if (reference) lookup(reference);
    });
  </script>
</body>
</html>
"#;
