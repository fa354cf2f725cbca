//! End-to-end tests for the CLI session against a mock marketplace.

use beat_cli::{session, App, CliConfig};
use beat_core::TrackId;
use beat_playback::RepeatMode;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn marketplace(ids: &[&str]) -> MockServer {
    let data: Vec<_> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Beat {}", id),
                "previewUrl": format!("https://cdn.example.com/{}.mp3", id),
            })
        })
        .collect();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tracks/trending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/tracks/[^/]+/play$"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    server
}

fn config_for(server: &MockServer, dir: &TempDir) -> CliConfig {
    let mut config = CliConfig::default();
    config.api.url = server.uri();
    config.state.path = dir.path().join("state").join("beat-player.json");
    config
}

async fn run_session(app: &mut App, script: &str) -> String {
    let mut out = Vec::new();
    session::run(app, script.as_bytes(), &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn play_then_step_through_queue() {
    let server = marketplace(&["A", "B", "C"]).await;
    let dir = TempDir::new().unwrap();
    let mut app = App::open(&config_for(&server, &dir)).unwrap();

    let output = run_session(&mut app, "play B\nnext\nnext\nprev\nquit\nnext\n").await;

    let current = app.state().current_track.as_ref().unwrap();
    assert_eq!(current.id, TrackId::from("C"));
    assert_eq!(output.matches("playing").count(), 4);
    assert!(output.contains("Beat B"));

    app.shutdown().await;
    let plays = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.to_string() == "POST")
        .count();
    assert_eq!(plays, 1);
}

#[tokio::test]
async fn end_loops_under_repeat_one() {
    let server = marketplace(&["A", "B"]).await;
    let dir = TempDir::new().unwrap();
    let mut app = App::open(&config_for(&server, &dir)).unwrap();

    run_session(&mut app, "play A\nrepeat\nseek 40\nend\n").await;

    assert_eq!(app.state().repeat, RepeatMode::One);
    assert_eq!(
        app.state().current_track.as_ref().unwrap().id,
        TrackId::from("A")
    );
    assert_eq!(app.player().sink().current_time(), 0.0);
    assert!(app.player().sink().is_playing());
}

#[tokio::test]
async fn end_advances_without_repeat() {
    let server = marketplace(&["A", "B"]).await;
    let dir = TempDir::new().unwrap();
    let mut app = App::open(&config_for(&server, &dir)).unwrap();

    let output = run_session(&mut app, "play A\nend\n").await;

    assert_eq!(
        app.state().current_track.as_ref().unwrap().id,
        TrackId::from("B")
    );
    assert!(output.contains("queue 2"));
}

#[tokio::test]
async fn bad_input_does_not_end_session() {
    let server = marketplace(&["A"]).await;
    let dir = TempDir::new().unwrap();
    let mut app = App::open(&config_for(&server, &dir)).unwrap();

    let output = run_session(&mut app, "dance\nplay ZZZ\nvolume 2\npause\nstatus\n").await;

    assert!(output.contains("Invalid command: dance"));
    assert!(output.contains("error: Track not found in trending: ZZZ"));
    assert!(output.contains("volume 1.00"));
    assert!(output.contains("paused"));
    assert!(output.contains("idle"));
    assert!(!app.state().is_playing);
}

#[tokio::test]
async fn preferences_persist_between_runs() {
    let server = marketplace(&["A", "B", "C"]).await;
    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir);

    {
        let mut app = App::open(&config).unwrap();
        run_session(&mut app, "play A\nnext\nvolume 0.3\nshuffle\nrepeat\nrepeat\n").await;
        app.shutdown().await;
    }

    let app = App::open(&config).unwrap();
    let prefs = app.preferences();
    assert_eq!(prefs.volume, 0.3);
    assert!(prefs.shuffle);
    assert_eq!(prefs.repeat, RepeatMode::All);

    let recent: Vec<_> = app.recent().into_iter().map(|t| t.id).collect();
    assert_eq!(recent, [TrackId::from("B"), TrackId::from("A")]);
    assert!(app.state().current_track.is_none());
    assert!(app.state().queue.is_empty());
    assert_eq!(app.player().sink().volume(), 0.3);
}

#[tokio::test]
async fn unreachable_marketplace_is_reported() {
    let dir = TempDir::new().unwrap();
    let mut config = CliConfig::default();
    config.api.url = "http://127.0.0.1:9".to_string();
    config.state.path = dir.path().join("beat-player.json");
    let mut app = App::open(&config).unwrap();

    let output = run_session(&mut app, "play A\nnext\n").await;

    assert!(output.contains("error: Marketplace error"));
    assert!(output.contains("nothing to play"));
}
