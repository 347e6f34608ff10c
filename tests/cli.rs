use assert_cmd::Command;
use predicates::prelude::*;

mod common;

#[test]
fn runs() {
    let mut cmd = Command::cargo_bin("quickdigit").unwrap();
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("quickdigit --help"));
}

#[test]
fn outputs_tool_name() {
    let mut cmd = Command::cargo_bin("quickdigit").unwrap();
    cmd.arg("-V");
    cmd.assert().success().stdout("quickdigit 0.1.0\n");
}

// Draw subcommand tests

#[test]
fn draw_writes_logical_sketch() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let output = temp.path().join("sketch.png");

    let mut cmd = Command::cargo_bin("quickdigit").unwrap();
    cmd.args(["draw", "tests/fixtures/diagonal.session.json", "-o"])
        .arg(&output);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Wrote 28x28 sketch"));

    let image = image::open(&output).expect("readable PNG").to_luma8();
    assert_eq!(image.dimensions(), (28, 28));
    assert_eq!(image.get_pixel(12, 12).0[0], 0);
    assert_eq!(image.get_pixel(25, 2).0[0], 255);
}

#[test]
fn draw_scale_writes_pixelated_display() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let output = temp.path().join("display.png");

    let mut cmd = Command::cargo_bin("quickdigit").unwrap();
    cmd.args([
        "draw",
        "tests/fixtures/seven.session.json",
        "--scale",
        "10",
        "--output",
    ])
    .arg(&output);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Wrote 280x280 sketch"));

    let image = image::open(&output).expect("readable PNG").to_luma8();
    assert_eq!(image.dimensions(), (280, 280));
    // Every 10×10 block is a single logical cell.
    for block_y in 0..28 {
        for block_x in 0..28 {
            let value = image.get_pixel(block_x * 10, block_y * 10).0[0];
            assert_eq!(image.get_pixel(block_x * 10 + 9, block_y * 10 + 9).0[0], value);
        }
    }
}

#[test]
fn draw_honours_size() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let output = temp.path().join("small.png");

    let mut cmd = Command::cargo_bin("quickdigit").unwrap();
    cmd.args(["draw", "tests/fixtures/diagonal.session.json", "--size", "14", "-o"])
        .arg(&output);
    cmd.assert().success();

    let image = image::open(&output).expect("readable PNG");
    assert_eq!((image.width(), image.height()), (14, 14));
}

#[test]
fn zero_size_is_rejected() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let mut cmd = Command::cargo_bin("quickdigit").unwrap();
    cmd.args(["draw", "tests/fixtures/diagonal.session.json", "--size", "0", "-o"])
        .arg(temp.path().join("never.png"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid drawing surface"));
}

#[test]
fn oversized_size_is_rejected() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let mut cmd = Command::cargo_bin("quickdigit").unwrap();
    cmd.args(["draw", "tests/fixtures/diagonal.session.json", "--size", "70000", "-o"])
        .arg(temp.path().join("never.png"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid drawing surface"))
        .stderr(predicate::str::contains("4096"));
}

#[test]
fn oversized_scale_is_rejected() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let output = temp.path().join("never.png");
    for scale in ["100000", "153391690"] {
        let mut cmd = Command::cargo_bin("quickdigit").unwrap();
        cmd.args(["draw", "tests/fixtures/diagonal.session.json", "--scale", scale, "-o"])
            .arg(&output);
        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("Invalid drawing surface"));
    }
    assert!(!output.exists());
}

// Encode subcommand tests

#[test]
fn encode_prints_png_data_uri() {
    let mut cmd = Command::cargo_bin("quickdigit").unwrap();
    cmd.args(["encode", "tests/fixtures/diagonal.session.json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("data:image/png;base64,iVBORw0KGgo"));
}

#[test]
fn broken_session_fails_with_path() {
    let mut cmd = Command::cargo_bin("quickdigit").unwrap();
    cmd.args(["encode", "tests/fixtures/broken.session.json"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse pointer session"))
        .stderr(predicate::str::contains("broken.session.json"));
}

#[test]
fn nonexistent_session_fails() {
    let mut cmd = Command::cargo_bin("quickdigit").unwrap();
    cmd.args(["encode", "nonexistent_session.json"]);
    cmd.assert().failure();
}

// Predict subcommand tests

#[test]
fn predict_prints_digit_and_confidence() {
    let (url, server) = common::serve_once(200, r#"{"prediction": 7, "confidence": 92.5}"#);

    let mut cmd = Command::cargo_bin("quickdigit").unwrap();
    cmd.args(["predict", "tests/fixtures/seven.session.json", "--endpoint", &url]);
    cmd.assert()
        .success()
        .stdout("Model thinks it is 7 (confidence 92.5%)\n")
        .stderr(predicate::str::contains("Predicting…"));

    let request = server.join().expect("server thread");
    assert!(request.body.contains("\"image\":\"data:image/png;base64,"));
}

#[test]
fn predict_reads_endpoint_from_env() {
    let (url, server) = common::serve_once(200, r#"{"prediction": 4}"#);

    let mut cmd = Command::cargo_bin("quickdigit").unwrap();
    cmd.env("QUICKDIGIT_ENDPOINT", &url)
        .args(["predict", "tests/fixtures/diagonal.session.json"]);
    cmd.assert()
        .success()
        .stdout("Model thinks it is 4\n");

    server.join().expect("server thread");
}

#[test]
fn predict_json_output() {
    let (url, server) = common::serve_once(200, r#"{"prediction": 2, "confidence": 71.25}"#);

    let mut cmd = Command::cargo_bin("quickdigit").unwrap();
    cmd.args([
        "predict",
        "tests/fixtures/diagonal.session.json",
        "--endpoint",
        &url,
        "--output",
        "json",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"digit\": 2"))
        .stdout(predicate::str::contains("\"confidence\": 71.25"));

    server.join().expect("server thread");
}

#[test]
fn predict_rejection_fails_with_server_message() {
    let (url, server) = common::serve_once(422, r#"{"error": "Could not find a digit"}"#);

    let mut cmd = Command::cargo_bin("quickdigit").unwrap();
    cmd.args(["predict", "tests/fixtures/diagonal.session.json", "--endpoint", &url]);
    cmd.assert()
        .failure()
        .stdout("Could not find a digit\n")
        .stderr(predicate::str::contains("Prediction failed: Could not find a digit"));

    server.join().expect("server thread");
}

#[test]
fn predict_unreachable_endpoint_fails() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let mut cmd = Command::cargo_bin("quickdigit").unwrap();
    cmd.args([
        "predict",
        "tests/fixtures/diagonal.session.json",
        "--endpoint",
        &format!("http://127.0.0.1:{port}/"),
        "--timeout-secs",
        "5",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Prediction failed"));
}

#[test]
fn predict_unsupported_output_fails() {
    let mut cmd = Command::cargo_bin("quickdigit").unwrap();
    cmd.args([
        "predict",
        "tests/fixtures/diagonal.session.json",
        "--output",
        "yaml",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported format"));
}
