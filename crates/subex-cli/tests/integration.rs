use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use serde_json::json;

fn subex() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("subex");
    cmd.env_remove("SUBEX_LOG");
    cmd
}

fn line(index: u64, text: &str) -> serde_json::Value {
    json!({
        "index": index,
        "start": index * 2000,
        "end": index * 2000 + 1500,
        "character": "",
        "text": text,
        "style": "Default"
    })
}

#[test]
fn help_lists_commands() {
    subex()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("extract"))
        .stdout(contains("filter"));
}

#[test]
fn filter_prints_matching_stdin_lines() {
    subex()
        .args(["filter", "frieren"])
        .write_stdin("Anime/Frieren - 01.mkv\nMovies/Perfect Blue.mp4\nanime/frieren - 02.mkv\n")
        .assert()
        .success()
        .stdout("Anime/Frieren - 01.mkv\nanime/frieren - 02.mkv\n");
}

#[test]
fn filter_blank_query_prints_everything() {
    subex()
        .args(["filter", ""])
        .write_stdin("a\nb\n")
        .assert()
        .success()
        .stdout("a\nb\n");
}

#[test]
fn extract_prints_preview_lines() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/api/extract_subtitle")
        .match_body(mockito::Matcher::Json(json!({
            "video_path": "anime/ep01.mkv",
            "track_index": 2
        })))
        .with_status(200)
        .with_body(
            json!({
                "success": true,
                "content": "[Script Info]",
                "lines_count": 2,
                "preview": [line(0, "Hello there"), line(1, "General Kenobi")]
            })
            .to_string(),
        )
        .create();

    subex()
        .args(["--server", &server.url(), "extract", "anime/ep01.mkv", "2"])
        .assert()
        .success()
        .stdout(contains("Hello there"))
        .stdout(contains("0:00:02.00 --> 0:00:03.50"))
        .stdout(contains("General Kenobi"));
}

#[test]
fn extract_downloads_to_output_file() {
    let mut server = mockito::Server::new();
    let _extract = server
        .mock("POST", "/api/extract_subtitle")
        .with_status(200)
        .with_header("set-cookie", "session=s1; Path=/")
        .with_body(json!({"success": true, "content": "", "lines_count": 0, "preview": []}).to_string())
        .create();
    let _download = server
        .mock("GET", "/api/download_subtitle")
        .match_header("cookie", "session=s1")
        .with_status(200)
        .with_header("content-type", "text/plain; charset=utf-8")
        .with_body("[Script Info]\nTitle: ep01\n")
        .create();

    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("ep01.ass");
    subex()
        .args(["--server", &server.url(), "extract", "ep01.mkv", "0", "-o"])
        .arg(&out)
        .assert()
        .success();

    let saved = std::fs::read_to_string(&out).unwrap();
    assert_eq!(saved, "[Script Info]\nTitle: ep01\n");
}

#[test]
fn extract_server_error_exits_3_with_message() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/api/extract_subtitle")
        .with_status(400)
        .with_body(r#"{"error":"Invalid video path"}"#)
        .create();

    subex()
        .args(["--server", &server.url(), "extract", "../secret.mkv", "0"])
        .assert()
        .code(3)
        .stderr(contains("Invalid video path"));
}

#[test]
fn invalid_config_exits_2() {
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("subex.toml");
    std::fs::write(&config, "[server]\ntimeout_secs = 0\n").unwrap();

    subex()
        .args(["--config"])
        .arg(&config)
        .args(["extract", "a.mkv", "0"])
        .assert()
        .code(2)
        .stderr(contains("timeout_secs"));
}

#[test]
fn empty_server_flag_exits_2() {
    subex()
        .args(["--server", "", "extract", "a.mkv", "0"])
        .assert()
        .code(2)
        .stderr(contains("base_url must not be empty"));
}

#[test]
fn config_in_working_directory_is_used() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/api/extract_subtitle")
        .with_status(200)
        .with_body(
            json!({"success": true, "content": "", "lines_count": 1, "preview": [line(0, "from config")]})
                .to_string(),
        )
        .create();

    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join("subex.toml"),
        format!("[server]\nbase_url = \"{}\"\n", server.url()),
    )
    .unwrap();

    subex()
        .current_dir(tmp.path())
        .args(["extract", "a.mkv", "0"])
        .assert()
        .success()
        .stdout(contains("from config"));
}
