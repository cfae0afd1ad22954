//! Scaffold generation with a MakeClass stand-in.

use super::test_utils::{FakeMakeClass, SilentGenerator};
use anagen::batch::{JobFormat, SubmitConfig, SubmitSettings, SUBMIT_SETTINGS_FILE};
use anagen::error::ToolError;
use anagen::scaffold::{ScaffoldRequest, ScaffoldService, Variant};
use std::path::Path;
use tempfile::TempDir;

fn service() -> ScaffoldService<FakeMakeClass> {
    let submit = SubmitConfig {
        remote_root: Some("/eos/user/t/tester/AnalyzerOutput".to_string()),
        ..SubmitConfig::default()
    };
    ScaffoldService::new(FakeMakeClass { entries: 1200 }, submit, "runAnalysis")
}

fn request(root: &Path, variant: Variant) -> ScaffoldRequest {
    let sample = root.join("sample.root");
    std::fs::write(&sample, b"not really root").unwrap();
    ScaffoldRequest {
        sample,
        tree: "Events".to_string(),
        class_name: "MyAna".to_string(),
        variant,
        output_dir: root.join("MyAna"),
        workspace: root.to_path_buf(),
        force: false,
    }
}

#[test]
fn test_advanced_framework_layout_and_contents() {
    let temp_dir = TempDir::new().unwrap();
    let request = request(temp_dir.path(), Variant::Advanced);
    let report = service().generate(&request).unwrap();

    let root = &report.output_dir;
    assert_eq!(report.entries, Some(1200));
    assert_eq!(report.collections, vec!["Muon".to_string()]);
    for dir in ["include", "src", "condor"] {
        assert!(root.join(dir).is_dir(), "missing {}", dir);
    }
    assert!(!root.join("MyAna.h").exists());
    assert!(!root.join("MyAna.C").exists());

    let header = std::fs::read_to_string(root.join("include/MyAna.h")).unwrap();
    let public = header.find("public :").unwrap();
    let weight = header.find("float fWeight = 1.0;").unwrap();
    let chain = header.find("*fChain").unwrap();
    assert!(public < weight && weight < chain);
    assert!(header.contains("TString fOutputFileName = \"output.root\";"));

    let source = std::fs::read_to_string(root.join("src/MyAna.C")).unwrap();
    assert!(source.contains("Muon_pt"));
    assert!(!source.contains("Jet_eta"));

    let main = std::fs::read_to_string(root.join("main.cc")).unwrap();
    assert!(main.contains("t.fWeight = weight;"));
    assert!(main.contains("TChain"));

    let makefile = std::fs::read_to_string(root.join("Makefile")).unwrap();
    assert!(makefile.contains("TARGET = runAnalysis"));
    assert!(makefile.contains("SRCS = main.cc src/MyAna.C"));

    let settings = SubmitSettings::load(&root.join(SUBMIT_SETTINGS_FILE)).unwrap();
    assert_eq!(settings.job_format, JobFormat::Full);
    assert_eq!(settings.remote_root, "/eos/user/t/tester/AnalyzerOutput");
}

#[cfg(unix)]
#[test]
fn test_submit_script_is_executable() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let report = service()
        .generate(&request(temp_dir.path(), Variant::Structured))
        .unwrap();
    let script = report.output_dir.join("submit_condor.sh");
    let mode = std::fs::metadata(&script).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[test]
fn test_basic_framework_keeps_generated_skeleton() {
    let temp_dir = TempDir::new().unwrap();
    let report = service()
        .generate(&request(temp_dir.path(), Variant::Basic))
        .unwrap();

    let root = &report.output_dir;
    assert!(!root.join("include").exists());
    let header = std::fs::read_to_string(root.join("MyAna.h")).unwrap();
    assert!(!header.contains("fWeight"));
    let source = std::fs::read_to_string(root.join("MyAna.C")).unwrap();
    assert!(source.contains("if (fChain == 0) return;"));
    assert!(report.collections.is_empty());

    let settings = SubmitSettings::load(&root.join(SUBMIT_SETTINGS_FILE)).unwrap();
    assert_eq!(settings.job_format, JobFormat::Reduced);
}

#[test]
fn test_missing_sample_aborts_before_output_dir_exists() {
    let temp_dir = TempDir::new().unwrap();
    let mut request = request(temp_dir.path(), Variant::Advanced);
    request.sample = temp_dir.path().join("absent.root");

    let err = service().generate(&request).unwrap_err();
    assert!(matches!(err, ToolError::SampleOpen(_)));
    assert!(!request.output_dir.exists());
}

#[test]
fn test_missing_tree_is_reported_by_name() {
    let temp_dir = TempDir::new().unwrap();
    let mut request = request(temp_dir.path(), Variant::Advanced);
    request.tree = "Runs".to_string();

    let err = service().generate(&request).unwrap_err();
    assert!(matches!(err, ToolError::TableNotFound(ref t) if t == "Runs"));
}

#[test]
fn test_existing_output_requires_force() {
    let temp_dir = TempDir::new().unwrap();
    let mut request = request(temp_dir.path(), Variant::Advanced);
    std::fs::create_dir_all(&request.output_dir).unwrap();
    std::fs::write(request.output_dir.join("leftover.txt"), "old").unwrap();

    let err = service().generate(&request).unwrap_err();
    assert!(matches!(err, ToolError::OutputExists(_)));
    assert!(request.output_dir.join("leftover.txt").exists());

    request.force = true;
    let report = service().generate(&request).unwrap();
    assert!(report.replaced_existing);
    assert!(!report.output_dir.join("leftover.txt").exists());
}

#[test]
fn test_force_keeps_directory_holding_the_sample() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    let mut request = request(temp_dir.path(), Variant::Advanced);
    request.sample = data.join("sample.root");
    std::fs::write(&request.sample, b"not really root").unwrap();
    request.output_dir = data.clone();
    request.force = true;

    let err = service().generate(&request).unwrap_err();
    assert!(matches!(err, ToolError::InvalidArgument(ref m) if m.contains("refusing to remove")));
    assert!(request.sample.is_file());

    request.output_dir = temp_dir.path().to_path_buf();
    request.sample = temp_dir.path().join("sample.root");
    let err = service().generate(&request).unwrap_err();
    assert!(matches!(err, ToolError::InvalidArgument(_)));
    assert!(request.sample.is_file());
}

#[test]
fn test_missing_generated_artifact_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let request = request(temp_dir.path(), Variant::Advanced);
    let service = ScaffoldService::new(
        SilentGenerator,
        SubmitConfig {
            remote_root: Some("/eos/out".to_string()),
            ..SubmitConfig::default()
        },
        "runAnalysis",
    );

    let err = service.generate(&request).unwrap_err();
    assert!(matches!(err, ToolError::MissingArtifact(_)));
}
