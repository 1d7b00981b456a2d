//! Command line integration tests on synthetic images.

#![cfg(feature = "cli")]

use std::path::Path;

use assert_cmd::Command;
use image::{GrayImage, Luma, Rgba, RgbaImage};
use predicates::prelude::*;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_baybayin"))
}

/// Dark vertical bar on a light background.
fn write_bar_png(path: &Path) {
    let img = GrayImage::from_fn(90, 120, |x, y| {
        if (40..52).contains(&x) && (15..105).contains(&y) {
            Luma([25])
        } else {
            Luma([235])
        }
    });
    img.save(path).unwrap();
}

/// Black diagonal stroke on a fully transparent canvas.
fn write_canvas_png(path: &Path) {
    let img = RgbaImage::from_fn(100, 100, |x, y| {
        if (x as i32 - y as i32).abs() < 6 && (20..80).contains(&x) {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    img.save(path).unwrap();
}

#[test]
fn labels_lists_all_classes() {
    let out = cli().arg("labels").assert().success().get_output().stdout.clone();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 59);
    assert!(text.lines().any(|l| l.trim() == "34 nga"));
    assert_eq!(text.lines().next().map(str::trim), Some("0 a"));
}

#[test]
fn config_writes_loadable_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pipeline.json");
    cli()
        .arg("config")
        .arg("--output")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["crop_padding"], 5);
    assert_eq!(json["target_size"], serde_json::json!([64, 64]));
    assert_eq!(json["bilateral"]["diameter"], 9);
}

#[test]
fn preprocess_writes_target_size_png() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bar.png");
    let output = dir.path().join("bar_norm.png");
    write_bar_png(&input);

    cli()
        .args(["preprocess", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("64x64"));

    let img = image::open(&output).unwrap().to_luma8();
    assert_eq!(img.dimensions(), (64, 64));
    // dark ink survives on a white background
    assert_eq!(img.get_pixel(0, 0).0[0], 255);
    assert!(img.pixels().any(|p| p.0[0] == 0));
}

#[test]
fn preprocess_canvas_treats_transparency_as_background() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("drawing.png");
    let output = dir.path().join("drawing_norm.png");
    write_canvas_png(&input);

    cli()
        .args(["preprocess", "--canvas", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let img = image::open(&output).unwrap().to_luma8();
    let ink = img.pixels().filter(|p| p.0[0] == 0).count();
    let total = (img.width() * img.height()) as usize;
    assert!(ink > 0 && ink < total / 2, "ink={ink}");
    assert_eq!(img.get_pixel(0, 63).0[0], 255);
}

#[test]
fn preprocess_honours_config_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bar.png");
    let output = dir.path().join("bar_32.png");
    let config = dir.path().join("small.json");
    write_bar_png(&input);
    std::fs::write(&config, r#"{ "target_size": [32, 48] }"#).unwrap();

    cli()
        .args(["preprocess", "--input"])
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let img = image::open(&output).unwrap().to_luma8();
    assert_eq!(img.dimensions(), (32, 48));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bar.png");
    let config = dir.path().join("bad.json");
    write_bar_png(&input);
    std::fs::write(&config, r#"{ "gaussian": { "kernel_size": [4, 4], "sigma": 0.0 } }"#).unwrap();

    cli()
        .args(["preprocess", "--input"])
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(dir.path().join("never.png"))
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error:"));
    assert!(!dir.path().join("never.png").exists());
}

#[test]
fn missing_input_fails_with_single_error_line() {
    let dir = TempDir::new().unwrap();
    let out = cli()
        .args(["preprocess", "--input", "/nonexistent/ka.png", "--output"])
        .arg(dir.path().join("out.png"))
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("error:"));
}

#[cfg(not(feature = "tracing"))]
#[test]
fn verbose_logs_stage_decisions_to_stderr() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bar.png");
    write_bar_png(&input);

    cli()
        .env_remove("BAYBAYIN_LOG")
        .args(["--verbose", "preprocess", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("v.png"))
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG resize]"));

    cli()
        .env("BAYBAYIN_LOG", "off")
        .args(["--verbose", "preprocess", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("q.png"))
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[cfg(not(feature = "onnx"))]
#[test]
fn classify_requires_onnx_build() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bar.png");
    write_bar_png(&input);
    cli()
        .args(["classify", "--model", "baybayin.onnx", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("onnx"));
}

#[cfg(feature = "onnx")]
#[test]
fn classify_reports_missing_model_as_unavailable() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bar.png");
    write_bar_png(&input);
    cli()
        .args(["classify", "--model", "/nonexistent/baybayin.onnx", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("model unavailable"));
}
