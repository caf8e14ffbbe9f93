// Integration tests for userdeck

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use userdeck::FetchError;
use userdeck::api::{DirectorySource, HttpDirectory};
use userdeck::loader::{Posts, fetch_detail, fetch_directory};

/// Unique temp path for config roundtrips.
fn temp_path(tag: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nonce = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    path.push(format!("userdeck_{tag}_{}_{}.conf", std::process::id(), nonce));
    path
}

const USER_1: &str = r#"{
  "id": 1, "name": "Leanne Graham", "username": "Bret", "email": "Sincere@april.biz",
  "address": {"street": "Kulas Light", "suite": "Apt. 556", "city": "Gwenborough",
              "zipcode": "92998-3874", "geo": {"lat": "-37.3159", "lng": "81.1496"}},
  "phone": "1-770-736-8031 x56442", "website": "hildegard.org",
  "company": {"name": "Romaguera-Crona", "catchPhrase": "Multi-layered client-server neural-net",
              "bs": "harness real-time e-markets"}
}"#;

#[derive(Clone)]
struct Route {
    status: u16,
    body: String,
    delay: Duration,
}

fn ok(body: impl Into<String>) -> Route {
    Route {
        status: 200,
        body: body.into(),
        delay: Duration::ZERO,
    }
}

fn status(code: u16) -> Route {
    Route {
        status: code,
        body: "{}".into(),
        delay: Duration::ZERO,
    }
}

fn posts_json(user: u64, n: u64) -> String {
    let items: Vec<String> = (1..=n)
        .map(|id| {
            format!(r#"{{"userId": {user}, "id": {id}, "title": "post {id}", "body": "body {id}"}}"#)
        })
        .collect();
    format!("[{}]", items.join(","))
}

/// Minimal HTTP/1.1 server answering canned JSON per path. Unknown paths 404.
async fn serve(routes: Vec<(&str, Route)>) -> String {
    let routes: Arc<HashMap<String, Route>> =
        Arc::new(routes.into_iter().map(|(p, r)| (p.to_string(), r)).collect());
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&head);
                let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                let route = routes.get(&path).cloned().unwrap_or_else(|| status(404));
                tokio::time::sleep(route.delay).await;
                let response = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    route.status,
                    route.body.len(),
                    route.body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    format!("http://{addr}")
}

fn client(base: &str) -> HttpDirectory {
    HttpDirectory::new(base, Duration::from_secs(5)).expect("client")
}

// 1) Collection endpoint decodes the upstream shape
#[tokio::test]
async fn list_users_over_http() {
    let base = serve(vec![("/users", ok(format!("[{USER_1}]")))]).await;
    let users = fetch_directory(&client(&base)).await.expect("users");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Leanne Graham");
    assert_eq!(users[0].company.catch_phrase, "Multi-layered client-server neural-net");
    assert_eq!(users[0].address.geo.lat, "-37.3159");
}

// 2) Status codes map onto typed errors
#[tokio::test]
async fn status_codes_are_typed() {
    let base = serve(vec![("/users", status(503))]).await;
    let dir = client(&base);
    assert_eq!(dir.list_users().await, Err(FetchError::Status(503)));
    assert_eq!(dir.user(42).await, Err(FetchError::NotFound));
}

// 3) Malformed payloads become decode errors, not panics
#[tokio::test]
async fn malformed_body_is_decode_error() {
    let base = serve(vec![("/users", ok("{\"not\": \"a list\"}"))]).await;
    let err = client(&base).list_users().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
}

// 4) Timeout and refused connections
#[tokio::test]
async fn slow_upstream_times_out() {
    let slow = Route {
        delay: Duration::from_secs(3),
        ..ok("[]")
    };
    let base = serve(vec![("/users", slow)]).await;
    let dir = HttpDirectory::new(&base, Duration::from_millis(200)).expect("client");
    assert_eq!(dir.list_users().await, Err(FetchError::Timeout));
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = client(&format!("http://{addr}")).list_users().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
}

// 5) Detail merges user and posts, keeping the first three in order
#[tokio::test]
async fn detail_over_http_truncates_posts() {
    let base = serve(vec![
        ("/users/1", ok(USER_1)),
        ("/users/1/posts", ok(posts_json(1, 5))),
    ])
    .await;
    let detail = fetch_detail(&client(&base), "1", 3).await.expect("detail");
    assert_eq!(detail.user.username, "Bret");
    let Posts::Ready(posts) = detail.posts else {
        panic!("posts should be ready");
    };
    let ids: Vec<u64> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(posts[0].user_id, Some(1));
}

#[tokio::test]
async fn detail_for_missing_user_fails_whole_view() {
    let base = serve(vec![("/users/99/posts", ok("[]"))]).await;
    let err = fetch_detail(&client(&base), "99", 3).await.unwrap_err();
    assert_eq!(err, FetchError::NotFound);
}

#[tokio::test]
async fn detail_survives_posts_failure() {
    let base = serve(vec![("/users/1", ok(USER_1)), ("/users/1/posts", status(500))]).await;
    let detail = fetch_detail(&client(&base), "1", 3).await.expect("detail");
    assert_eq!(detail.posts, Posts::Unavailable(FetchError::Status(500)));
}

// 6) Headless commands print through the same pipeline
#[tokio::test]
async fn headless_list_and_show() {
    let users: Vec<String> = (1..=11)
        .map(|id| {
            USER_1
                .replacen("\"id\": 1", &format!("\"id\": {id}"), 1)
                .replace("Leanne Graham", &format!("Person {id}"))
        })
        .collect();
    let base = serve(vec![
        ("/users", ok(format!("[{}]", users.join(",")))),
        ("/users/1", ok(USER_1)),
        ("/users/1/posts", ok("[]")),
    ])
    .await;
    let dir = client(&base);

    let mut out = Vec::new();
    userdeck::cli::run_list(&dir, "", 2, 6, &mut out).await.expect("list");
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Person 7"));
    assert!(text.contains("Showing 7 to 11 of 11 users"));

    let mut out = Vec::new();
    userdeck::cli::run_show(&dir, "1", 3, &mut out).await.expect("show");
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Leanne Graham (@Bret)"));
    assert!(text.contains("Kulas Light, Apt. 556, Gwenborough 92998-3874"));
    assert!(text.contains("No posts found"));

    let mut out = Vec::new();
    let err = userdeck::cli::run_show(&dir, "abc", 3, &mut out).await.unwrap_err();
    assert!(err.to_string().contains("User not found"));
}

// 7) Config files roundtrip and init
#[test]
fn theme_roundtrip_and_init() {
    use userdeck::app::Theme;
    use userdeck::app::theme::parse_color;

    let path = temp_path("theme");
    let path_str = path.to_string_lossy().to_string();
    let mut t = Theme::mocha();
    t.accent = parse_color("#112233").unwrap();
    t.write_file(&path_str).expect("write theme");
    let t2 = Theme::from_file(&path_str).expect("read theme");
    assert_eq!(t, t2);

    let init = temp_path("theme_init");
    let init_str = init.to_string_lossy().to_string();
    let _ = std::fs::remove_file(&init);
    let created = Theme::load_or_init(&init_str);
    assert!(init.exists());
    assert_eq!(created, Theme::mocha());

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(&init);
}

#[test]
fn keymap_roundtrip_keeps_bindings() {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use userdeck::app::{KeyAction, Keymap};

    let path = temp_path("keys");
    let path_str = path.to_string_lossy().to_string();
    std::fs::write(&path, "# custom\nReload = F\nx = Quit\n").unwrap();
    let km = Keymap::from_file(&path_str).expect("read keymap");
    let press = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
    assert_eq!(km.resolve(&press('F')), Some(KeyAction::Reload));
    assert_eq!(km.resolve(&press('x')), Some(KeyAction::Quit));
    assert_eq!(km.resolve(&press('q')), Some(KeyAction::Quit));

    km.write_file(&path_str).expect("write keymap");
    let again = Keymap::from_file(&path_str).expect("reread keymap");
    for c in ['F', 'x', 'q', '/', 'j', 'k', 'h', 'l', 'r', '?'] {
        assert_eq!(again.resolve(&press(c)), km.resolve(&press(c)), "key {c}");
    }
    let _ = std::fs::remove_file(&path);
}

#[test]
fn settings_file_then_overrides() {
    use userdeck::app::Settings;
    use userdeck::app::config::Overrides;

    let path = temp_path("settings");
    std::fs::write(
        &path,
        "# local\nbase_url = http://localhost:3000\npage_size = 4\npost_limit = 5\nbogus = 1\n",
    )
    .unwrap();
    let from_file = Settings::load(Some(&path)).expect("read settings");
    assert_eq!(from_file.base_url, "http://localhost:3000");
    assert_eq!(from_file.page_size, 4);
    assert_eq!(from_file.post_limit, 5);
    assert_eq!(from_file.page_window, 5);

    let merged = from_file.clone().apply(&Overrides {
        page_size: Some(8),
        timeout_secs: Some(2),
        ..Overrides::default()
    });
    assert_eq!(merged.page_size, 8);
    assert_eq!(merged.timeout, Duration::from_secs(2));
    assert_eq!(merged.base_url, "http://localhost:3000");

    merged.write_file(&path).expect("write settings");
    assert_eq!(Settings::load(Some(&path)).expect("reread settings"), merged);
    let _ = std::fs::remove_file(&path);
}
