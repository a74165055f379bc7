use std::process::Command;

fn shelf() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_shelf"));
    // Keep any config dir the binary might create out of the real home.
    cmd.env("HOME", std::env::temp_dir().join("shelf_cli_flags_home"));
    cmd
}

#[test]
fn prints_version() {
    let output = shelf().arg("--version").output().expect("run shelf --version");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout utf8");
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "stdout was: {}",
        stdout.trim()
    );
}

#[test]
fn help_lists_direct_entry_flags() {
    let output = shelf().arg("--help").output().expect("run shelf --help");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout utf8");
    assert!(stdout.contains("--genre"));
    assert!(stdout.contains("--browse"));
}

#[test]
fn genre_and_browse_conflict() {
    let output = shelf()
        .args(["--genre", "Drama", "--browse"])
        .output()
        .expect("run shelf --genre --browse");
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("stderr utf8");
    assert!(stderr.contains("cannot be used with"), "stderr was: {}", stderr.trim());
}

#[test]
fn unknown_genre_fails_before_starting_ui() {
    let output = shelf()
        .args(["--genre", "Poetry"])
        .output()
        .expect("run shelf --genre Poetry");
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("stderr utf8");
    assert!(stderr.contains("Unknown genre 'Poetry'"), "stderr was: {}", stderr.trim());
}
