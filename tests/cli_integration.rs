use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn codewisdom_binary(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_codewisdom"));
    cmd.env("HOME", home).env_remove("RUST_LOG").current_dir(home);
    cmd
}

fn run(home: &Path, args: &[&str]) -> Output {
    codewisdom_binary(home).args(args).output().unwrap()
}

fn create_project(dir: &Path) {
    fs::create_dir_all(dir.join("src")).unwrap();
    fs::write(
        dir.join("src/clean.py"),
        "# Adds two numbers.\ndef add(first, second):\n    return first + second\n",
    )
    .unwrap();
    let mut tangled = String::from("def tangled(aa, bb):\n");
    for n in 0..25 {
        tangled.push_str(&format!("    if aa > {n} and bb < {n}:\n        aa = bb - {n}\n"));
    }
    tangled.push_str("    return aa\n");
    fs::write(dir.join("src/tangled.py"), tangled).unwrap();
    fs::write(dir.join("src/api.h"), "// Public API.\nint add(int first, int second);\n").unwrap();
    fs::write(dir.join("README.txt"), "not code").unwrap();
}

#[test]
fn cli_ranks_worst_file_first() {
    let tmp = TempDir::new().unwrap();
    create_project(tmp.path());
    let output = run(tmp.path(), &["src", "--no-color"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PROJECT ANALYSIS RANKING (WORST FILES FIRST)"));
    let tangled = stdout.find("tangled.py").expect("tangled.py listed");
    let clean = stdout.find("clean.py").expect("clean.py listed");
    assert!(tangled < clean, "stdout: {stdout}");
    assert!(stdout.contains("(No analyzable functions found in this file)"));
    assert!(!stdout.contains("README.txt"));
}

#[test]
fn cli_json_output() {
    let tmp = TempDir::new().unwrap();
    create_project(tmp.path());
    let output = run(tmp.path(), &["src", "--format", "json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let files = json.as_array().unwrap();
    assert_eq!(files.len(), 3);
    assert!(files[0]["path"].as_str().unwrap().ends_with("tangled.py"));
    let indexes: Vec<f64> = files.iter().map(|f| f["legacy_index"].as_f64().unwrap()).collect();
    assert!(indexes.windows(2).all(|w| w[0] >= w[1]));
    let header = files.iter().find(|f| f["language"] == "cpp").unwrap();
    assert_eq!(header["score"]["policy"], "no_functions");
}

#[test]
fn cli_top_and_lang_filters() {
    let tmp = TempDir::new().unwrap();
    create_project(tmp.path());
    let output = run(tmp.path(), &["src", "--format", "json", "--top", "1", "--lang", "python"]);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let files = json.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["functions"][0]["name"], "tangled");
}

#[test]
fn cli_ignore_prefix() {
    let tmp = TempDir::new().unwrap();
    create_project(tmp.path());
    fs::create_dir_all(tmp.path().join("src/vendor")).unwrap();
    fs::write(tmp.path().join("src/vendor/lib.js"), "function x() {}\n").unwrap();
    let output = run(tmp.path(), &["src", "--format", "json", "--ignore", "vendor"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("lib.js"), "stdout: {stdout}");
}

#[test]
fn cli_single_file() {
    let tmp = TempDir::new().unwrap();
    create_project(tmp.path());
    let output = run(tmp.path(), &["src/clean.py", "--no-color"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("- Function: add"));
}

#[test]
fn cli_skips_unparsable_files() {
    let tmp = TempDir::new().unwrap();
    create_project(tmp.path());
    fs::write(tmp.path().join("src/broken.py"), "def broken(:\n").unwrap();
    let output = run(tmp.path(), &["src", "--format", "json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 3);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken.py"), "stderr: {stderr}");
}

#[test]
fn cli_missing_path_fails() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["does/not/exist"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Path does not exist"));
}

#[test]
fn cli_invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    create_project(tmp.path());
    fs::write(tmp.path().join("bad.toml"), "[scoring]\ncomplexity_weight = 2.0\n").unwrap();
    let output = run(tmp.path(), &["src", "--config", "bad.toml"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("complexity_weight"));
}

#[test]
fn cli_reads_local_config() {
    let tmp = TempDir::new().unwrap();
    create_project(tmp.path());
    fs::write(tmp.path().join(".codewisdomconfig"), "[report]\nshow_functions = false\n").unwrap();
    let output = run(tmp.path(), &["src", "--no-color"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Avg Function Length"));
    assert!(!stdout.contains("- Function:"));
}

#[test]
fn cli_defaults_subcommand_prints_config() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["defaults"]);
    assert!(output.status.success());
    let table: toml::Table = String::from_utf8_lossy(&output.stdout).parse().unwrap();
    assert!(table.contains_key("scoring"));
    assert!(table.contains_key("report"));
}

#[test]
fn cli_rejects_unknown_language() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &[".", "--lang", "cobol"]);
    assert!(!output.status.success());
}

#[test]
fn cli_verbose_logs_unsupported_files() {
    let tmp = TempDir::new().unwrap();
    create_project(tmp.path());
    let output = run(tmp.path(), &[".", "-v", "--format", "json"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Skipping unsupported file"), "stderr: {stderr}");
    assert!(stderr.contains("README.txt"), "stderr: {stderr}");
}
