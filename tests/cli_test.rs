//! End-to-end tests for the nbia-cart binary

mod common;

use assert_cmd::Command;
use common::{manifest, UID_A, UID_B};
use mockito::{Matcher, Mock, Server, ServerGuard};
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Command isolated from the user's config, credentials and log settings
fn nbia_cart(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("nbia-cart").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("NBIA_USERNAME")
        .env_remove("NBIA_PASSWORD")
        .env_remove("NBIA_API_URL")
        .env_remove("NBIA_TOKEN_URL")
        .env_remove("NBIA_CART_SEARCH_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn against(cmd: &mut Command, server: &ServerGuard) {
    cmd.env("NBIA_API_URL", format!("{}/nbia-api/services/", server.url()))
        .env("NBIA_TOKEN_URL", format!("{}/nbia-api/oauth/token", server.url()))
        .env("NBIA_CART_SEARCH_URL", format!("{}/nbia-search/", server.url()));
}

fn guest_login(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/nbia-api/oauth/token")
        .match_body(Matcher::UrlEncoded("username".into(), "nbia_guest".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"guest-token"}"#)
        .create()
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_extract_prints_identifiers() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "series.txt", &format!("{UID_A}\n\n  {UID_B}\n"));

    nbia_cart(dir.path())
        .arg("extract")
        .arg(&file)
        .assert()
        .success()
        .stdout(format!("{UID_A}\n{UID_B}\n"))
        .stderr(predicate::str::contains("2 identifiers"));
}

#[test]
fn test_extract_warns_about_odd_values() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "series.txt", &format!("{UID_A}\nnot-a-uid\n"));

    nbia_cart(dir.path())
        .arg("extract")
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("1 of 2 values do not look like DICOM series UIDs"));
}

#[test]
fn test_extract_manifest_with_custom_preamble() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "short.tcia", &format!("a=1\nb=2\n{UID_A}\n"));

    nbia_cart(dir.path())
        .args(["extract", "--preamble-lines", "2"])
        .arg(&file)
        .assert()
        .success()
        .stdout(format!("{UID_A}\n"));
}

#[test]
fn test_ambiguous_columns_fail_without_network() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let cart = server
        .mock("POST", "/nbia-api/services/createSharedList")
        .expect(0)
        .create();
    let file = write(
        &dir,
        "cohort.csv",
        &format!("Series UID,SeriesInstanceUID\n{UID_A},{UID_A}\n"),
    );

    let mut cmd = nbia_cart(dir.path());
    against(&mut cmd, &server);
    cmd.arg("create")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ambiguous identifier columns"));

    cart.assert();
}

#[test]
fn test_empty_upload_fails_without_network() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let cart = server
        .mock("POST", "/nbia-api/services/createSharedList")
        .expect(0)
        .create();
    let file = write(&dir, "empty.txt", "\n  \n");

    let mut cmd = nbia_cart(dir.path());
    against(&mut cmd, &server);
    cmd.arg("create")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no series identifiers found"));

    cart.assert();
}

#[test]
fn test_dry_run_previews_request() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "manifest.tcia", &manifest(&[UID_A, UID_B]));

    nbia_cart(dir.path())
        .args(["create", "--dry-run", "--name", "my-cart", "--description", "lung"])
        .arg(&file)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Would create shared cart my-cart")
                .and(predicate::str::contains("Description: lung"))
                .and(predicate::str::contains("2 series"))
                .and(predicate::str::contains(UID_A)),
        );
}

#[test]
fn test_dry_run_does_not_ask_for_password() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "series.txt", &format!("{UID_A}\n"));

    nbia_cart(dir.path())
        .env("NBIA_USERNAME", "alice")
        .args(["create", "--dry-run", "--name", "my-cart"])
        .arg(&file)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Would create shared cart my-cart"));
}

#[test]
fn test_create_success_prints_cart_url() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let token = guest_login(&mut server);
    let cart = server
        .mock("POST", "/nbia-api/services/createSharedList")
        .match_header("authorization", "Bearer guest-token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("name".into(), "my-cart".into()),
            Matcher::UrlEncoded("list".into(), UID_A.into()),
        ]))
        .with_status(200)
        .expect(1)
        .create();
    let file = write(
        &dir,
        "cohort.csv",
        &format!("PatientID,SeriesInstanceUID\nLIDC-0001,{UID_A}\n"),
    );

    let mut cmd = nbia_cart(dir.path());
    against(&mut cmd, &server);
    cmd.args(["create", "--name", "my-cart"])
        .arg(&file)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Shared cart created successfully!").and(
                predicate::str::contains(format!(
                    "{}/nbia-search/?saved-cart=my-cart",
                    server.url()
                )),
            ),
        );

    token.assert();
    cart.assert();
}

#[test]
fn test_create_not_found_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    guest_login(&mut server);
    server
        .mock("POST", "/nbia-api/services/createSharedList")
        .with_status(404)
        .create();
    let file = write(&dir, "series.txt", &format!("{UID_A}\n"));

    let mut cmd = nbia_cart(dir.path());
    against(&mut cmd, &server);
    cmd.arg("create")
        .arg(&file)
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("Failed to create shared cart")
                .and(predicate::str::contains("Client error (404): one or more identifiers not found")),
        );
}

#[test]
fn test_create_rejected_login_skips_cart() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("POST", "/nbia-api/oauth/token")
        .with_status(401)
        .create();
    let cart = server
        .mock("POST", "/nbia-api/services/createSharedList")
        .expect(0)
        .create();
    let file = write(&dir, "series.txt", &format!("{UID_A}\n"));

    let mut cmd = nbia_cart(dir.path());
    against(&mut cmd, &server);
    cmd.env("NBIA_PASSWORD", "wrong")
        .args(["create", "--username", "alice"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unauthorized, bad credentials"));

    cart.assert();
}

#[test]
fn test_series_writes_uid_list() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    guest_login(&mut server);
    server
        .mock("GET", "/nbia-api/services/v1/getSeries")
        .match_query(Matcher::UrlEncoded("Collection".into(), "LIDC-IDRI".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"[{{"SeriesInstanceUID":"{UID_A}"}},{{"SeriesInstanceUID":"{UID_B}"}}]"#
        ))
        .create();
    let output = dir.path().join("lidc.txt");

    let mut cmd = nbia_cart(dir.path());
    against(&mut cmd, &server);
    cmd.args(["series", "--collection", "LIDC-IDRI", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 series UIDs"));

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        format!("{UID_A}\n{UID_B}\n")
    );
}

#[test]
fn test_config_file_sets_preamble() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "config.toml", "manifest_preamble_lines = 1\n");
    let file = write(&dir, "short.tcia", &format!("header\n{UID_A}\n"));

    nbia_cart(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("extract")
        .arg(&file)
        .assert()
        .success()
        .stdout(format!("{UID_A}\n"));
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "config.toml", "cart_search_url = \"nowhere\"\n");
    let file = write(&dir, "series.txt", &format!("{UID_A}\n"));

    nbia_cart(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("extract")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration error"));
}

#[test]
fn test_auth_test_requires_username() {
    let dir = TempDir::new().unwrap();

    nbia_cart(dir.path())
        .args(["auth", "test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No NBIA username given"));
}
