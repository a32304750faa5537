use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn chaindata() -> Command {
    Command::cargo_bin("chaindata").unwrap()
}

#[test]
fn test_help_lists_subcommands() {
    chaindata()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("nfts"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("timestamp"));
}

#[test]
fn test_nfts_rejects_invalid_owner() {
    let cache = TempDir::new().unwrap();
    chaindata()
        .arg("nfts")
        .arg("--owner")
        .arg("not-an-address")
        .arg("--cache-dir")
        .arg(cache.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid owner address"));
}

#[test]
fn test_nfts_unsupported_network_returns_empty_inventory() {
    // Polygon is not served by the indexer: the command resolves locally to
    // an empty inventory without any network call.
    let cache = TempDir::new().unwrap();
    chaindata()
        .arg("nfts")
        .arg("--owner")
        .arg("0xd8da6bf26964af9d7eed9e03e53415d37aa96045")
        .arg("--network")
        .arg("polygon")
        .arg("--cache-dir")
        .arg(cache.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("entries"));
}

#[test]
fn test_timestamp_fails_fast_without_endpoint() {
    // Rinkeby has no default RPC endpoint; client construction fails before
    // any network call.
    let cache = TempDir::new().unwrap();
    chaindata()
        .arg("timestamp")
        .arg("--block")
        .arg("100")
        .arg("--network")
        .arg("rinkeby")
        .arg("--cache-dir")
        .arg(cache.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no client available"));
}

#[test]
fn test_rejects_unknown_network() {
    let cache = TempDir::new().unwrap();
    chaindata()
        .arg("nfts")
        .arg("--owner")
        .arg("0xd8da6bf26964af9d7eed9e03e53415d37aa96045")
        .arg("--network")
        .arg("solana")
        .arg("--cache-dir")
        .arg(cache.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown network"));
}
