//! CLI tests against the built binary with stand-in external tools.
#![cfg(unix)]

use super::test_utils::{makeclass_header, makeclass_source, write_script};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct Workspace {
    _temp: TempDir,
    root: PathBuf,
    config: PathBuf,
}

/// Workspace with fake `dasgoclient` and `root` programs wired in through the config file.
fn workspace() -> Workspace {
    let temp = TempDir::new().unwrap();
    let root = temp.path().to_path_buf();
    let bin = root.join("bin");
    std::fs::create_dir_all(&bin).unwrap();

    let das = bin.join("dasgoclient");
    write_script(&das, "echo /store/mc/a.root\necho /store/mc/b.root\n");

    let fake_root = bin.join("root");
    write_script(
        &fake_root,
        &format!(
            "sample=$(printf '%s\\n' \"$@\" | sed -n 's/.*TFile::Open(\"\\([^\"]*\\)\".*/\\1/p')\n[ -f \"$sample\" ] || exit 2\ncase \"$*\" in\n  *NoSuchTree*) exit 3 ;;\nesac\ncase \"$*\" in\n  *MakeClass*)\n    cat > MyAna.h <<'HEADER'\n{}HEADER\n    cat > MyAna.C <<'SOURCE'\n{}SOURCE\n    ;;\nesac\necho \"ANAGEN_ENTRIES 42\"\n",
            makeclass_header("MyAna"),
            makeclass_source("MyAna")
        ),
    );

    let config = root.join("anagen.toml");
    std::fs::write(
        &config,
        format!(
            "[resolver]\nquery_program = \"{}\"\npreview = 1\n\n[scaffold]\nroot_program = \"{}\"\nclass_name = \"MyAna\"\n\n[submit]\nremote_root = \"/eos/user/t/tester/AnalyzerOutput\"\n",
            das.display(),
            fake_root.display()
        ),
    )
    .unwrap();

    Workspace {
        _temp: temp,
        root,
        config,
    }
}

/// Runs from inside the workspace with no `--workspace`, so relative paths resolve
/// against the process directory.
fn anagen_in(ws: &Workspace, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_anagen"))
        .current_dir(&ws.root)
        .arg("--config")
        .arg("anagen.toml")
        .args(args)
        .output()
        .unwrap()
}

fn anagen(ws: &Workspace, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_anagen"))
        .arg("--workspace")
        .arg(&ws.root)
        .arg("--config")
        .arg(&ws.config)
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn scaffold(ws: &Workspace) -> PathBuf {
    std::fs::write(ws.root.join("sample.root"), b"stub").unwrap();
    let output = anagen(ws, &["scaffold", "-f", "sample.root"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    ws.root.join("MyAna")
}

#[test]
fn test_resolve_writes_list_and_previews() {
    let ws = workspace();
    let output = anagen(&ws, &["resolve", "/TT/Run3/NANOAODSIM", "-o", "tt.txt"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("Found 2 files"));
    assert!(text.contains("root://cms-xrd-global.cern.ch//store/mc/a.root"));
    assert!(text.contains("... and 1 more"));

    let list = std::fs::read_to_string(ws.root.join("tt.txt")).unwrap();
    assert_eq!(list.lines().count(), 2);
}

#[test]
fn test_resolve_default_preview_lists_every_entry() {
    let ws = workspace();
    let config = std::fs::read_to_string(&ws.config).unwrap();
    std::fs::write(&ws.config, config.replace("preview = 1\n", "")).unwrap();

    let output = anagen(&ws, &["resolve", "/TT/Run3/NANOAODSIM"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("Preview:\n  root://cms-xrd-global.cern.ch//store/mc/a.root\n"));
    assert!(text.ends_with("  root://cms-xrd-global.cern.ch//store/mc/b.root\n"));
    assert!(!text.contains("more"));
    assert!(ws.root.join("file_list.txt").is_file());
}

#[test]
fn test_resolve_json_output() {
    let ws = workspace();
    let output = anagen(
        &ws,
        &["resolve", "/TT/Run3/NANOAODSIM", "--redirector", "infn", "--format", "json"],
    );
    assert!(output.status.success(), "stderr={}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["redirector"], "root://xrootd-cms.infn.it//");
    assert_eq!(value["files"]["entries"].as_array().unwrap().len(), 2);
}

#[test]
fn test_scaffold_then_dry_run_submit() {
    let ws = workspace();
    let framework = scaffold(&ws);
    assert!(framework.join("include/MyAna.h").is_file());
    assert!(framework.join("submit.toml").is_file());

    std::fs::write(framework.join("list.txt"), "/store/a.root\n/store/b.root\n/store/c.root\n").unwrap();
    std::fs::write(ws.root.join("jobs.txt"), "list.txt myjob 1.0 0 TTbar\n").unwrap();

    let framework_arg = framework.to_string_lossy().to_string();
    let output = anagen(
        &ws,
        &["submit", "jobs.txt", "--framework", &framework_arg, "--dry-run"],
    );
    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert!(stdout(&output).contains("[DONE] Prepared 1 job(s) covering 3 file(s)"));

    let arguments = std::fs::read_to_string(framework.join("condor/myjob/arguments.txt")).unwrap();
    assert_eq!(arguments.lines().count(), 3);
}

#[test]
fn test_scaffold_twice_needs_force() {
    let ws = workspace();
    scaffold(&ws);

    let output = anagen(&ws, &["scaffold", "-f", "sample.root"]);
    assert!(!output.status.success());
    assert!(stderr(&output).starts_with("[ERROR] Output directory already exists"));

    let output = anagen(&ws, &["scaffold", "-f", "sample.root", "--force"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
}

#[test]
fn test_missing_tree_exits_non_zero() {
    let ws = workspace();
    std::fs::write(ws.root.join("sample.root"), b"stub").unwrap();
    let output = anagen(&ws, &["scaffold", "-f", "sample.root", "-t", "NoSuchTree"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("[ERROR] TTree 'NoSuchTree' not found"));
    assert!(!Path::new(&ws.root.join("MyAna")).exists());
}

#[test]
fn test_scaffold_relative_sample_from_process_directory() {
    let ws = workspace();
    std::fs::write(ws.root.join("sample.root"), b"stub").unwrap();

    let output = anagen_in(&ws, &["scaffold", "-f", "sample.root"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert!(ws.root.join("MyAna/include/MyAna.h").is_file());
    assert!(ws.root.join("MyAna/src/MyAna.C").is_file());
}

#[test]
fn test_scaffold_missing_sample_reports_plain_error() {
    let ws = workspace();
    let output = anagen_in(&ws, &["scaffold", "-f", "absent.root"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("[ERROR] "), "stderr={}", stderr(&output));
    assert!(!stderr(&output).contains('\u{1b}'));
    assert!(!ws.root.join("MyAna").exists());
}

#[test]
fn test_force_never_removes_the_workspace() {
    let ws = workspace();
    std::fs::write(ws.root.join("sample.root"), b"stub").unwrap();

    let output = anagen_in(&ws, &["scaffold", "-f", "sample.root", "-o", ".", "--force"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("refusing to remove"), "stderr={}", stderr(&output));
    assert!(ws.root.join("sample.root").is_file());
    assert!(ws.config.is_file());
}
