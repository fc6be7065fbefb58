//! End-to-end tests against a local mock qBittorrent WebUI.
//!
//! Each test starts its own recording server on a random port inside a
//! background tokio runtime, then drives the blocking client against it over
//! real HTTP. The server stores every request (endpoint, multipart fields,
//! cookie header, file parts) so tests can assert exactly what went over the
//! wire.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde_json::{Value, json};

use qbit_api::types::{AddTorrentOptions, TorrentFileData, TorrentListParams};
use qbit_api::{AddTorrent, QbitClient, QbitError};

#[derive(Clone)]
struct Recorded {
    endpoint: String,
    cookie: Option<String>,
    fields: HashMap<String, String>,
    files: Vec<RecordedFile>,
}

#[derive(Clone)]
struct RecordedFile {
    field: String,
    file_name: String,
    content_type: String,
}

struct ServerState {
    /// Whether `auth/login` issues a `SID` cookie.
    grant_sid: bool,
    requests: Mutex<Vec<Recorded>>,
}

impl ServerState {
    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn login_count(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.endpoint == "auth/login")
            .count()
    }
}

/// Pull a quoted attribute value (`name="..."`, `filename="..."`) out of a
/// part's header block.
fn quoted_attr(head: &str, key: &str) -> Option<String> {
    let start = head.find(key)? + key.len();
    let rest = &head[start..];
    let end = rest.find('"')?;
    Some(rest[..end].to_owned())
}

/// Minimal multipart/form-data parser, good enough for the bodies reqwest
/// produces: text parts become fields, parts with a filename are recorded as
/// files with their content type.
fn parse_form(headers: &HeaderMap, body: &[u8]) -> (HashMap<String, String>, Vec<RecordedFile>) {
    let mut fields = HashMap::new();
    let mut files = Vec::new();
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return (fields, files);
    };
    let Some(boundary) = content_type.split("boundary=").nth(1) else {
        return (fields, files);
    };

    let text = String::from_utf8_lossy(body);
    for part in text.split(&format!("--{boundary}")) {
        let part = part.strip_prefix("\r\n").unwrap_or(part);
        let Some((head, value)) = part.split_once("\r\n\r\n") else {
            continue;
        };
        let value = value.strip_suffix("\r\n").unwrap_or(value);
        let Some(name) = quoted_attr(head, "name=\"") else {
            continue;
        };
        if let Some(file_name) = quoted_attr(head, "filename=\"") {
            let content_type = head
                .lines()
                .find_map(|line| {
                    let lower = line.to_ascii_lowercase();
                    lower
                        .strip_prefix("content-type:")
                        .map(|ct| ct.trim().to_owned())
                })
                .unwrap_or_default();
            files.push(RecordedFile {
                field: name,
                file_name,
                content_type,
            });
        } else {
            fields.insert(name, value.to_owned());
        }
    }
    (fields, files)
}

async fn api(
    State(state): State<Arc<ServerState>>,
    Path(endpoint): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let (fields, files) = parse_form(&headers, &body);
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bad_pattern = fields.get("pattern").is_some_and(|p| p == "bad");
    state.requests.lock().unwrap().push(Recorded {
        endpoint: endpoint.clone(),
        cookie,
        fields,
        files,
    });

    match endpoint.as_str() {
        "auth/login" => {
            if state.grant_sid {
                (
                    [(header::SET_COOKIE, "SID=abc123; path=/; HttpOnly")],
                    "Ok.",
                )
                    .into_response()
            } else {
                "Fails.".into_response()
            }
        }
        "auth/logout" => String::new().into_response(),
        "app/version" => "v4.6.1".into_response(),
        "app/webapiVersion" => "2.9.3".into_response(),
        "app/buildInfo" => (
            // Token rotation happens on whatever response carries a new SID.
            [(header::SET_COOKIE, "SID=rotated; path=/")],
            json!({
                "qt": "6.4.2",
                "libtorrent": "2.0.9",
                "boost": "1.82.0",
                "openssl": "3.1.0",
                "zlib": "1.2.13",
                "bitness": 64
            })
            .to_string(),
        )
            .into_response(),
        "app/defaultSavePath" => "/downloads".into_response(),
        "app/preferences" => json!({"dht": true, "save_path": "/downloads"})
            .to_string()
            .into_response(),
        "transfer/info" => json!({
            "connection_status": "connected",
            "dht_nodes": 321,
            "dl_info_data": 1024,
            "dl_info_speed": 42,
            "dl_rate_limit": 0,
            "up_info_data": 2048,
            "up_info_speed": 7,
            "up_rate_limit": 0
        })
        .to_string()
        .into_response(),
        "torrents/info" => "[]".into_response(),
        "torrents/tags" => json!(["linux", "iso"]).to_string().into_response(),
        "transfer/speedLimitsMode" => "1".into_response(),
        "transfer/downloadLimit" => "2048".into_response(),
        // Deliberately not a number: exercises the decode-error path.
        "transfer/uploadLimit" => "Ok.".into_response(),
        "search/start" => {
            if bad_pattern {
                // Some misconfigured proxies answer 200 with a text body.
                "Ok.".into_response()
            } else {
                json!({"id": 17}).to_string().into_response()
            }
        }
        // The wire payload is a list with or without an id; the client
        // unwraps it only when it asked for a single job.
        "search/status" => json!([{"id": 5, "status": "Running", "total": 10}])
            .to_string()
            .into_response(),
        "test/json" => json!({"hashes": "abc|def"}).to_string().into_response(),
        "torrents/pause"
        | "torrents/add"
        | "torrents/addTags"
        | "torrents/removeCategories"
        | "torrents/createTags" => String::new().into_response(),
        _ => (StatusCode::NOT_FOUND, String::new()).into_response(),
    }
}

/// Start the mock server on a random port; returns its base URL and the
/// shared recording state.
fn spawn_server(grant_sid: bool) -> (String, Arc<ServerState>) {
    let state = Arc::new(ServerState {
        grant_sid,
        requests: Mutex::new(Vec::new()),
    });

    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    let router_state = Arc::clone(&state);
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            let app = Router::new()
                .route("/api/v2/{*endpoint}", post(api))
                .with_state(router_state);
            axum::serve(listener, app).await.unwrap();
        });
    });

    (format!("http://{addr}"), state)
}

fn client_for(base: &str) -> QbitClient {
    QbitClient::new(base, "admin", "adminadmin").unwrap()
}

#[test]
fn implicit_login_precedes_first_call() {
    let (base, state) = spawn_server(true);
    let client = client_for(&base);

    assert_eq!(client.app().version().unwrap(), "v4.6.1");

    let requests = state.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].endpoint, "auth/login");
    assert_eq!(requests[0].fields["username"], "admin");
    assert_eq!(requests[0].fields["password"], "adminadmin");
    // The login request itself carries the (still empty) session cookie.
    assert_eq!(requests[0].cookie.as_deref(), Some("SID="));
    // The original call follows with the freshly issued token.
    assert_eq!(requests[1].endpoint, "app/version");
    assert_eq!(requests[1].cookie.as_deref(), Some("SID=abc123"));

    // A second call reuses the session.
    assert_eq!(client.app().webapi_version().unwrap(), "2.9.3");
    assert_eq!(state.login_count(), 1);
}

#[test]
fn concurrent_first_calls_login_once() {
    let (base, state) = spawn_server(true);
    let client = Arc::new(client_for(&base));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = Arc::clone(&client);
            std::thread::spawn(move || client.app().version().unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "v4.6.1");
    }

    // All racing first calls share one login round-trip.
    assert_eq!(state.login_count(), 1);
    let requests = state.requests();
    let versions: Vec<_> = requests
        .iter()
        .filter(|r| r.endpoint == "app/version")
        .collect();
    assert_eq!(versions.len(), 8);
    for request in versions {
        assert_eq!(request.cookie.as_deref(), Some("SID=abc123"));
    }
}

#[test]
fn login_without_token_fails_before_forwarding() {
    let (base, state) = spawn_server(false);
    let client = client_for(&base);

    let err = client.torrents().tags().unwrap_err();
    assert!(matches!(err, QbitError::Auth));

    // The original call never reached the server.
    let requests = state.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].endpoint, "auth/login");
}

#[test]
fn session_token_rotation_is_picked_up() {
    let (base, state) = spawn_server(true);
    let client = client_for(&base);

    let build = client.app().build_info().unwrap();
    assert_eq!(build.libtorrent, "2.0.9");
    assert_eq!(build.bitness, 64);

    client.app().version().unwrap();
    let requests = state.requests();
    let last = requests.last().unwrap();
    assert_eq!(last.cookie.as_deref(), Some("SID=rotated"));
}

#[test]
fn non_200_reports_status_and_url() {
    let (base, state) = spawn_server(true);
    let client = client_for(&base);

    let err = client.request("/does/notExist", &[]).unwrap_err();
    match err {
        QbitError::Api { status, url } => {
            assert_eq!(status, 404);
            assert_eq!(url, format!("{base}/api/v2/does/notExist"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(state.login_count(), 1);
}

#[test]
fn plain_text_body_returned_verbatim() {
    let (base, _state) = spawn_server(true);
    let client = client_for(&base);

    assert_eq!(client.auth().login().unwrap(), "Ok.");
    assert_eq!(
        client.request("/app/defaultSavePath", &[]).unwrap(),
        Value::String("/downloads".into())
    );
}

#[test]
fn json_body_decoded() {
    let (base, _state) = spawn_server(true);
    let client = client_for(&base);

    let value = client.request("/test/json", &[]).unwrap();
    assert_eq!(value, json!({"hashes": "abc|def"}));

    let prefs = client.app().preferences().unwrap();
    assert_eq!(prefs["dht"], json!(true));

    let info = client.transfer().info().unwrap();
    assert_eq!(info.connection_status, "connected");
    assert_eq!(info.dht_nodes, 321);
}

#[test]
fn hashes_joined_with_pipe() {
    let (base, state) = spawn_server(true);
    let client = client_for(&base);

    client.torrents().pause(&["abc", "def"]).unwrap();

    let last = state.requests().last().unwrap().clone();
    assert_eq!(last.endpoint, "torrents/pause");
    assert_eq!(last.fields["hashes"], "abc|def");
}

#[test]
fn tag_and_category_delimiters() {
    let (base, state) = spawn_server(true);
    let client = client_for(&base);

    client.torrents().add_tags(&["h1", "h2"], &["x", "y"]).unwrap();
    client.torrents().create_tags(&["x", "y"]).unwrap();
    client.torrents().remove_categories(&["a", "b"]).unwrap();

    let requests = state.requests();
    let add_tags = requests.iter().find(|r| r.endpoint == "torrents/addTags").unwrap();
    assert_eq!(add_tags.fields["hashes"], "h1|h2");
    assert_eq!(add_tags.fields["tags"], "x,y");

    let create = requests
        .iter()
        .find(|r| r.endpoint == "torrents/createTags")
        .unwrap();
    assert_eq!(create.fields["tags"], "x,y");

    let remove = requests
        .iter()
        .find(|r| r.endpoint == "torrents/removeCategories")
        .unwrap();
    assert_eq!(remove.fields["categories"], "a%0Ab");
}

#[test]
fn torrent_list_filter_encoding() {
    let (base, state) = spawn_server(true);
    let client = client_for(&base);

    let params = TorrentListParams {
        category: Some("my cat".into()),
        tag: None,
        hashes: Some(vec!["abc".into(), "def".into()]),
    };
    let torrents = client.torrents().info(&params).unwrap();
    assert!(torrents.is_empty());

    let last = state.requests().last().unwrap().clone();
    assert_eq!(last.endpoint, "torrents/info");
    assert_eq!(last.fields["category"], "my%20cat");
    assert_eq!(last.fields["hashes"], "abc|def");
    assert!(!last.fields.contains_key("tag"));
}

#[test]
fn add_torrent_options_form() {
    let (base, state) = spawn_server(true);
    let client = client_for(&base);

    let options = AddTorrentOptions {
        urls: vec![
            "http://tracker/a.torrent".into(),
            "http://tracker/b.torrent".into(),
        ],
        torrents: vec![TorrentFileData {
            file_name: "z.torrent".into(),
            data: b"d8:announce0:e".to_vec(),
        }],
        tags: vec!["tv".into(), "hd".into()],
        savepath: Some("/dl".into()),
        paused: Some(true),
        ..AddTorrentOptions::default()
    };
    client.torrents().add(AddTorrent::Options(options)).unwrap();

    let last = state.requests().last().unwrap().clone();
    assert_eq!(last.endpoint, "torrents/add");
    assert_eq!(
        last.fields["urls"],
        "http://tracker/a.torrent\nhttp://tracker/b.torrent"
    );
    assert_eq!(last.fields["tags"], "tv,hd");
    assert_eq!(last.fields["savepath"], "/dl");
    assert_eq!(last.fields["paused"], "true");
    assert_eq!(last.fields["dummy"], "true");
    assert!(!last.fields.contains_key("upLimit"));

    assert_eq!(last.files.len(), 1);
    assert_eq!(last.files[0].field, "torrents");
    assert_eq!(last.files[0].file_name, "z.torrent");
    assert_eq!(last.files[0].content_type, "application/x-bittorrent");
}

#[test]
fn add_torrent_single_url_skips_marker() {
    let (base, state) = spawn_server(true);
    let client = client_for(&base);

    client
        .torrents()
        .add(AddTorrent::Url("magnet:?xt=urn:btih:abc".into()))
        .unwrap();

    let last = state.requests().last().unwrap().clone();
    assert_eq!(last.fields["urls"], "magnet:?xt=urn:btih:abc");
    assert!(!last.fields.contains_key("dummy"));
}

#[test]
fn search_status_unwraps_single_job() {
    let (base, state) = spawn_server(true);
    let client = client_for(&base);

    let one = client.search().status(Some(5)).unwrap();
    assert_eq!(one["id"], json!(5));
    assert_eq!(one["status"], json!("Running"));
    let last = state.requests().last().unwrap().clone();
    assert_eq!(last.fields["id"], "5");

    let all = client.search().status(None).unwrap();
    assert_eq!(all.as_array().map(Vec::len), Some(1));
    let last = state.requests().last().unwrap().clone();
    assert!(!last.fields.contains_key("id"));
}

#[test]
fn search_start_returns_job_id() {
    let (base, state) = spawn_server(true);
    let client = client_for(&base);

    let id = client.search().start("ubuntu", &["all"], &["all"]).unwrap();
    assert_eq!(id, 17);

    let last = state.requests().last().unwrap().clone();
    assert_eq!(last.fields["pattern"], "ubuntu");
    assert_eq!(last.fields["plugins"], "all");
    assert_eq!(last.fields["category"], "all");
}

#[test]
fn search_start_without_job_id_is_an_error() {
    let (base, _state) = spawn_server(true);
    let client = client_for(&base);

    let err = client.search().start("bad", &["all"], &["all"]).unwrap_err();
    assert!(matches!(err, QbitError::Json(_)));
}

#[test]
fn transfer_limits_decoded_strictly() {
    let (base, _state) = spawn_server(true);
    let client = client_for(&base);

    assert!(client.transfer().speed_limits_mode().unwrap());
    assert_eq!(client.transfer().download_limit().unwrap(), 2048);

    // A non-numeric 200 body surfaces as a decode error, not a silent 0.
    let err = client.transfer().upload_limit().unwrap_err();
    assert!(matches!(err, QbitError::Json(_)));
}

#[test]
fn logout_clears_session() {
    let (base, state) = spawn_server(true);
    let client = client_for(&base);

    client.app().version().unwrap();
    assert_eq!(state.login_count(), 1);

    client.auth().logout().unwrap();

    // The cached token is gone; the next call logs in again.
    client.app().version().unwrap();
    assert_eq!(state.login_count(), 2);
}
