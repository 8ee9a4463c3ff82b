use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_config,
            xdg_state,
        }
    }

    fn seed_export(&self, fixture: &str) -> PathBuf {
        let source = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../chatlore-core/tests/fixtures/telegram")
            .join(fixture);
        let target = self.home.join(fixture);
        fs::copy(source, &target).expect("failed to copy export fixture");
        target
    }
}

fn run_chatlore(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("chatlore"));

    Command::new(bin_path)
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute chatlore: {e}"))
}

fn assert_success(args: &[&str], output: &Output) {
    if output.status.success() {
        return;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    panic!(
        "chatlore {} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        args.join(" "),
        output.status,
        stdout,
        stderr
    );
}

#[test]
fn terminal_report_covers_every_section() {
    let env = CliTestEnv::new();
    let export = env.seed_export("quirks.json");
    let export_arg = export.to_str().unwrap();

    let output = run_chatlore(&env, &[export_arg]);
    assert_success(&[export_arg], &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    for section in [
        "Total Messages Sent by Each Person:",
        "Number of Words Sent by Each Person:",
        "Unique Words Used by Each Person:",
        "Days with No Messages Sent:",
        "Days Only One Person Sent Messages:",
        "Peak Activity by Hour:",
        "Top 10 Most Common Words Overall:",
        "Average Message Length (words):",
        "Most Frequently Used Emoji Overall:",
        "Top 10 Words Before Emojis:",
        "Conversations Started by Each Person:",
    ] {
        assert!(
            stdout.contains(section),
            "missing section {section:?} in:\n{stdout}"
        );
    }

    assert!(stdout.contains("Alice: 2"));
    assert!(stdout.contains("🙂 - 1 times"));
    assert!(stdout.contains("gm: 1"));
}

#[test]
fn json_export_round_trips() {
    let env = CliTestEnv::new();
    let export = env.seed_export("two-senders.json");
    let export_arg = export.to_str().unwrap();

    let output = run_chatlore(&env, &[export_arg, "--export", "json"]);
    assert_success(&[export_arg, "--export", "json"], &output);

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    assert_eq!(value["valid_messages"], 8);
    assert_eq!(value["senders"]["Alice"]["messages"], 4);
    assert_eq!(value["response_times_secs"].as_array().unwrap().len(), 7);
    assert_eq!(value["hourly_activity"][12], 8);
}

#[test]
fn markdown_export_renders_tables() {
    let env = CliTestEnv::new();
    let export = env.seed_export("two-senders.json");
    let export_arg = export.to_str().unwrap();

    let output = run_chatlore(&env, &[export_arg, "--export", "md"]);
    assert_success(&[export_arg, "--export", "md"], &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# Chat Analysis"));
    assert!(stdout.contains("| Person | Messages |"));
    assert!(stdout.contains("| Alice | 4 |"));
    assert!(stdout.contains("## Activity by Hour"));
}

#[test]
fn unknown_export_format_fails() {
    let env = CliTestEnv::new();
    let export = env.seed_export("two-senders.json");

    let output = run_chatlore(&env, &[export.to_str().unwrap(), "--export", "xml"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown export format"));
}

#[test]
fn missing_input_file_fails_cleanly() {
    let env = CliTestEnv::new();
    let absent = env.home.join("nowhere.json");

    let output = run_chatlore(&env, &[absent.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to analyze"));
}

#[test]
fn config_default_input_is_used_without_an_argument() {
    let env = CliTestEnv::new();
    let export = env.seed_export("two-senders.json");

    let config_dir = env.xdg_config.join("chatlore");
    fs::create_dir_all(&config_dir).expect("failed to create config dir");
    fs::write(
        config_dir.join("config.toml"),
        format!("[report]\ndefault_input = {:?}\n", export.to_str().unwrap()),
    )
    .expect("failed to write config");

    let output = run_chatlore(&env, &[]);
    assert_success(&[], &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total Messages Sent by Each Person:"));
}
