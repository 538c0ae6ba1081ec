use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use vorlage_gloss::{Glosser, Lexicon, Normalizer, PrefixTable};
use vorlage_sources::{DEFAULT_ENGLISH_URL, DEFAULT_GREEK_URL, Library, RemoteLxx};
use vorlage_web::rate_limit::ThrottleLayer;
use vorlage_web::{AppState, router};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_RATE_LIMIT_RPS: u32 = 5;
const DEFAULT_RATE_LIMIT_BURST: u32 = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config();
    info!("binding to {}:{}", config.host, config.port);
    if config.disable_cache {
        info!("cache headers disabled");
    }
    info!(
        "rate limit: {} req/s (burst {})",
        config.rate_limit_rps, config.rate_limit_burst
    );

    let start = Instant::now();
    let normalizer = Normalizer::standard();
    let lexicon = match &config.lexicon_path {
        Some(path) => {
            info!("using lexicon at {}", path.display());
            Lexicon::load(path, &normalizer)?
        }
        None => Lexicon::seed(&normalizer),
    };
    info!(
        "glosser ready with {} entries in {} ms",
        lexicon.len(),
        start.elapsed().as_millis()
    );
    let glosser = Arc::new(Glosser::new(normalizer, lexicon, PrefixTable::seed()));

    let mut library = Library::seeded();
    if config.remote_lxx {
        info!("remote LXX lookups enabled ({})", config.lxx_greek_url);
        library = library.with_remote_lxx(RemoteLxx::new(
            config.lxx_greek_url.clone(),
            config.lxx_english_url.clone(),
        ));
    }

    let state = AppState {
        glosser,
        library: Arc::new(library),
        disable_cache: config.disable_cache,
    };

    let throttle = ThrottleLayer::new(config.rate_limit_rps, config.rate_limit_burst);
    let app = router(state).layer(throttle).layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("invalid listen address");
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    host: String,
    port: u16,
    lexicon_path: Option<PathBuf>,
    remote_lxx: bool,
    lxx_greek_url: String,
    lxx_english_url: String,
    disable_cache: bool,
    rate_limit_rps: u32,
    rate_limit_burst: u32,
}

fn load_config() -> Config {
    let mut disable_cache = false;
    let mut remote_lxx = false;
    let mut cli_lexicon: Option<PathBuf> = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-cache" => disable_cache = true,
            "--remote-lxx" => remote_lxx = true,
            "--lexicon" => {
                if let Some(path) = args.next() {
                    cli_lexicon = Some(PathBuf::from(path));
                }
            }
            _ => {
                if let Some(path) = arg.strip_prefix("--lexicon=") {
                    cli_lexicon = Some(PathBuf::from(path));
                }
            }
        }
    }

    let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let lexicon_path = cli_lexicon.or_else(|| env::var("LEXICON_PATH").ok().map(PathBuf::from));
    let remote_lxx = remote_lxx || env_flag("LXX_REMOTE");
    let lxx_greek_url =
        env::var("LXX_GREEK_URL").unwrap_or_else(|_| DEFAULT_GREEK_URL.to_string());
    let lxx_english_url =
        env::var("LXX_ENGLISH_URL").unwrap_or_else(|_| DEFAULT_ENGLISH_URL.to_string());
    let rate_limit_rps = env::var("RATE_LIMIT_RPS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RATE_LIMIT_RPS);
    let rate_limit_burst = env::var("RATE_LIMIT_BURST")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RATE_LIMIT_BURST);

    Config {
        host,
        port,
        lexicon_path,
        remote_lxx,
        lxx_greek_url,
        lxx_english_url,
        disable_cache,
        rate_limit_rps,
        rate_limit_burst,
    }
}

fn env_flag(name: &str) -> bool {
    matches!(
        env::var(name).ok().as_deref(),
        Some("1") | Some("true") | Some("yes")
    )
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
