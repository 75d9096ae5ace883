mod labels;

use labels::{labels_for, Labels};
use sakura_core::{
    AudioRule, Command, Event, GameConfig, RngState, Session, SessionSnapshot, SilentMedium,
};
use sakura_data::{list_tracks_or_empty, load_game_config, normalize_locale, track_references};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tiny_http::{Header, Method, Response, Server, StatusCode};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const LANG_ENV: &str = "SAKURA_LANG";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), BoxError> {
    let mut options = parse_options(&std::env::args().skip(1).collect::<Vec<_>>());
    if options.locale.is_none() {
        options.locale = std::env::var(LANG_ENV).ok();
    }
    let config = load_game_config(&options.assets)?;
    let address = config.bind_address();
    let server = Server::http(&address)?;
    log::info!("Sakura Memory on http://localhost:{}", config.server.port);
    let state = Arc::new(Mutex::new(AppState::new(config, options)));
    for request in server.incoming_requests() {
        let state = state.clone();
        if let Err(err) = handle_request(request, state) {
            log::warn!("request error: {err}");
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
struct WebOptions {
    assets: PathBuf,
    root: PathBuf,
    seed: Option<u64>,
    locale: Option<String>,
}

fn parse_options(args: &[String]) -> WebOptions {
    let mut options = WebOptions {
        assets: PathBuf::from("assets"),
        root: PathBuf::from("."),
        seed: None,
        locale: None,
    };
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--assets" => {
                if let Some(value) = args.get(idx + 1) {
                    options.assets = PathBuf::from(value);
                    idx += 1;
                }
            }
            "--root" => {
                if let Some(value) = args.get(idx + 1) {
                    options.root = PathBuf::from(value);
                    idx += 1;
                }
            }
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    options.seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--lang" | "-l" => {
                if let Some(value) = args.get(idx + 1) {
                    options.locale = Some(value.clone());
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    options
}

struct AppState {
    root: PathBuf,
    locale: String,
    session: Session<SilentMedium>,
}

impl AppState {
    fn new(config: GameConfig, options: WebOptions) -> Self {
        let seed = options
            .seed
            .unwrap_or_else(|| RngState::from_entropy().seed());
        let tracks = track_references(&config, &options.root);
        log::info!("{} music tracks found", tracks.len());
        let mut session = Session::new(config, seed, SilentMedium::default(), Instant::now());
        session.load_tracks(tracks);
        let locale = normalize_locale(options.locale.as_deref());
        log::info!("page locale {locale}");
        Self {
            root: options.root,
            locale,
            session,
        }
    }
}

#[derive(Serialize)]
struct ApiResponse {
    ok: bool,
    error: Option<String>,
    state: SessionSnapshot,
    events: Vec<Event>,
    audio: AudioRule,
    locale: String,
    labels: &'static Labels,
}

#[derive(Deserialize)]
struct ActionRequest {
    action: String,
    #[serde(default)]
    slot: Option<usize>,
    #[serde(default)]
    value: Option<String>,
}

fn handle_request(
    mut request: tiny_http::Request,
    state: Arc<Mutex<AppState>>,
) -> Result<(), BoxError> {
    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or("").to_string();
    let method = request.method().clone();
    let mut guard = state.lock().map_err(|_| "state lock poisoned")?;
    let app = &mut *guard;
    match (&method, path.as_str()) {
        (&Method::Get, "/") => {
            respond_with_file(request, web_path("index.html"), "text/html; charset=utf-8")?;
        }
        (&Method::Get, "/app.js") => {
            respond_with_file(request, web_path("app.js"), "application/javascript")?;
        }
        (&Method::Get, "/api/state") => {
            let response = build_response(app, None);
            respond_json(request, &response)?;
        }
        (&Method::Get, "/api/music") => {
            let config = app.session.config();
            let dir = app.root.join(&config.assets.music_dir);
            let names = list_tracks_or_empty(&dir, &config.assets.music_extension);
            respond_json(request, &names)?;
        }
        (&Method::Post, "/api/action") => {
            let mut body = String::new();
            request.as_reader().read_to_string(&mut body)?;
            let action: ActionRequest = serde_json::from_str(&body)?;
            let err = apply_action(app, action);
            let response = build_response(app, err);
            respond_json(request, &response)?;
        }
        (&Method::Get, other) => match asset_path(app, other) {
            Some((file, content_type)) if file.is_file() => {
                respond_with_file(request, file, content_type)?;
            }
            _ => request.respond(Response::empty(StatusCode(404)))?,
        },
        _ => {
            request.respond(Response::empty(StatusCode(404)))?;
        }
    }
    Ok(())
}

fn web_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("web")
        .join(file)
}

/// Maps `/cards/AS.png`, `/music/x.mp3` and `/sfx/flip.mp3` onto the asset tree.
fn asset_path(app: &AppState, url_path: &str) -> Option<(PathBuf, &'static str)> {
    let config = app.session.config();
    let trimmed = url_path.trim_start_matches('/');
    let (prefix, name) = trimmed.split_once('/')?;
    let dir = match prefix {
        "cards" => PathBuf::from(&config.assets.cards_dir),
        "music" => PathBuf::from(&config.assets.music_dir),
        "sfx" => PathBuf::from(&config.assets.sfx_dir),
        _ => return None,
    };
    let name = safe_file_name(name)?;
    Some((app.root.join(dir).join(name), content_type_for(name)))
}

fn safe_file_name(name: &str) -> Option<&str> {
    let invalid = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.contains("..");
    if invalid {
        None
    } else {
        Some(name)
    }
}

fn content_type_for(name: &str) -> &'static str {
    let ext = name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}

fn respond_with_file(
    request: tiny_http::Request,
    path: PathBuf,
    content_type: &str,
) -> Result<(), BoxError> {
    let mut file = std::fs::File::open(path)?;
    let mut content = Vec::new();
    file.read_to_end(&mut content)?;
    let header = Header::from_bytes(&b"Content-Type"[..], content_type)
        .map_err(|_| "invalid content type header")?;
    let response = Response::from_data(content).with_header(header);
    request.respond(response)?;
    Ok(())
}

fn respond_json<T: Serialize>(request: tiny_http::Request, body: &T) -> Result<(), BoxError> {
    let body = serde_json::to_vec_pretty(body)?;
    let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .map_err(|_| "invalid content type header")?;
    request.respond(Response::from_data(body).with_header(header))?;
    Ok(())
}

fn build_response(app: &mut AppState, err: Option<String>) -> ApiResponse {
    app.session.poll(Instant::now());
    let events = app.session.drain_events();
    ApiResponse {
        ok: err.is_none(),
        error: err,
        state: app.session.snapshot(),
        events,
        audio: app.session.config().audio.clone(),
        locale: app.locale.clone(),
        labels: labels_for(&app.locale),
    }
}

fn apply_action(app: &mut AppState, req: ActionRequest) -> Option<String> {
    match Command::parse(&req.action, req.slot, req.value) {
        Ok(command) => {
            app.session.apply(command, Instant::now());
            None
        }
        Err(err) => Some(err.to_string()),
    }
}
