use assert_cmd::Command;

#[test]
fn help_lists_subcommands() {
    let output = Command::cargo_bin("shelf")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for subcommand in ["serve", "migrate", "config"] {
        assert!(stdout.contains(subcommand), "missing {subcommand} in help");
    }
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("shelf")
        .unwrap()
        .arg("shelve")
        .assert()
        .failure();
}

#[test]
fn config_prints_resolved_settings() {
    let output = Command::cargo_bin("shelf")
        .unwrap()
        .arg("config")
        .env("SHELF_CONFIG_DIR", std::env::temp_dir().join("shelf-cli-missing-config"))
        .env_remove("SHELF_ENV")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("seed_catalog: true"));
}
