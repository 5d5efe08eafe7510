#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::path::Path;

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;

/// Catalog base URL nothing listens on; every request fails fast.
const UNREACHABLE_CATALOG: &str = "http://127.0.0.1:9/3";

fn write_config(dir: &Path, content: &str) {
    std::fs::write(dir.join("config.toml"), content).unwrap();
}

fn offline_config(dir: &Path) {
    write_config(
        dir,
        &format!("[catalog]\napi_key = \"test-key\"\nbase_url = \"{UNREACHABLE_CATALOG}\"\n"),
    );
}

#[test]
fn test_help_lists_commands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinehub");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("providers"));
}

#[test]
fn test_providers_lists_builtin_in_order() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinehub");
    cmd.args(["--dir", dir.path().to_str().unwrap(), "providers"])
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?s)supertv.*vidsrc.*vocesabia.*upstream").unwrap())
        .stdout(predicate::str::contains("no-referrer"));
}

#[test]
fn test_providers_includes_configured_provider() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        r#"
[[providers]]
id = "mirror"
name = "Mirror"
movie = "https://mirror.test/movie/{id}"
series = "https://mirror.test/tv/{id}/{season}/{episode}"

[providers.guidance]
kind = "manual_audio_step"
language = "Portuguese"
"#,
    );

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinehub");
    cmd.args(["--dir", dir.path().to_str().unwrap(), "providers"])
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("mirror"))
        .stdout(predicate::str::contains("Dual Audio"));
}

#[test]
fn test_providers_rejects_duplicate_id() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        "[[providers]]\nid = \"vidsrc\"\nname = \"Copy\"\nmovie = \"https://c.test/{id}\"\nseries = \"https://c.test/{id}\"\n",
    );

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinehub");
    cmd.args(["--dir", dir.path().to_str().unwrap(), "providers"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate provider ID: vidsrc"));
}

#[test]
fn test_config_set_key_then_show_masks_key() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    // Act
    let mut set = cargo_bin_cmd!("cinehub");
    set.args(["--dir", dir_arg, "config", "set-key", "abcdef123456"])
        .assert()
        .success();

    // Assert
    let stored = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(stored.contains("abcdef123456"));
    let mut show = cargo_bin_cmd!("cinehub");
    show.args(["--dir", dir_arg, "config", "show"])
        .env_remove("TMDB_API_KEY")
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("abcd****"))
        .stdout(predicate::str::contains("abcdef123456").not());
}

#[test]
fn test_config_set_key_rejects_blank() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinehub");
    cmd.args(["--dir", dir.path().to_str().unwrap(), "config", "set-key", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key must not be empty"));
}

#[test]
fn test_browse_without_key_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinehub");
    cmd.args(["--dir", dir.path().to_str().unwrap(), "browse"])
        .env_remove("TMDB_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB_API_KEY"));
}

#[test]
fn test_browse_with_unreachable_catalog_shows_empty_shelves() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    offline_config(dir.path());

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinehub");
    cmd.args(["--dir", dir.path().to_str().unwrap(), "browse", "--kind", "series"])
        .env_remove("TMDB_API_KEY")
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("No content available."))
        .stdout(predicate::str::contains("On the Air (0)"))
        .stdout(predicate::str::contains("Mystery (0)"));
}

#[test]
fn test_play_falls_back_without_external_id() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    offline_config(dir.path());

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinehub");
    cmd.args([
        "--dir",
        dir.path().to_str().unwrap(),
        "play",
        "--id",
        "27205",
        "--kind",
        "movie",
        "--provider",
        "vocesabia",
    ])
    .env_remove("TMDB_API_KEY")
    .env("NO_COLOR", "1")
    .assert()
    .success()
    .stdout(predicate::str::contains(
        "https://vidsrc.to/embed/movie/27205 (fallback)",
    ))
    .stdout(predicate::str::contains("Requer ID externo (IMDB)."));
}

#[test]
fn test_play_all_providers_for_episode() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    offline_config(dir.path());

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinehub");
    cmd.args([
        "--dir",
        dir.path().to_str().unwrap(),
        "play",
        "--id",
        "1399",
        "--kind",
        "series",
        "--season",
        "2",
        "--episode",
        "3",
        "--all",
    ])
    .env_remove("TMDB_API_KEY")
    .env("NO_COLOR", "1")
    .assert()
    .success()
    .stdout(predicate::str::contains("Season 2 Episode 3"))
    .stdout(predicate::str::contains(
        "https://supertv.store/player/serie.php?tmdb=1399&temp=2&ep=3",
    ))
    .stdout(predicate::str::contains("https://vidsrc.to/embed/tv/1399/2/3"));
}

#[test]
fn test_play_unknown_provider_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    offline_config(dir.path());

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinehub");
    cmd.args([
        "--dir",
        dir.path().to_str().unwrap(),
        "play",
        "--id",
        "27205",
        "--kind",
        "movie",
        "--provider",
        "nope",
    ])
    .env_remove("TMDB_API_KEY")
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown provider: nope"));
}

#[test]
fn test_play_season_requires_episode() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinehub");
    cmd.args(["play", "--id", "1", "--kind", "series", "--season", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--episode"));
}

#[test]
fn test_completions_bash() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinehub");
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cinehub"));
}
