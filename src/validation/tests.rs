use super::*;
use async_trait::async_trait;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::sync::Mutex;
use tempfile::TempDir;

const BASE: &str = "/talks/deck";

/// Probe answering from a fixed set of paths and recording every question it is asked
#[derive(Default)]
struct RecordingProbe {
    existing: HashSet<PathBuf>,
    everything_exists: bool,
    calls: Mutex<Vec<PathBuf>>,
}

impl RecordingProbe {
    fn with_files(files: &[&str]) -> Self {
        Self {
            existing: files.iter().map(|f| Path::new(BASE).join(f)).collect(),
            ..Self::default()
        }
    }

    fn everything() -> Self {
        Self { everything_exists: true, ..Self::default() }
    }

    fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PathProbe for RecordingProbe {
    async fn exists(&self, path: &Path) -> bool {
        self.calls.lock().unwrap().push(path.to_path_buf());
        self.everything_exists || self.existing.contains(path)
    }
}

fn catalog() -> BTreeSet<String> {
    ["build".to_string(), "server".to_string()].into()
}

fn args(action: &str, src: &str) -> Args {
    let mut args = Args::default();
    args.action = action.to_string();
    args.src = src.to_string();
    args
}

fn abs(relative: &str) -> PathBuf {
    Path::new(BASE).join(relative)
}

async fn run(probe: &RecordingProbe, args: &Args) -> ValidationResult<ValidatedConfig> {
    let catalog = catalog();
    let validator = Validator::with_base_dir(&catalog, probe, BASE);
    validator.validate(args).await
}

#[test]
fn test_extension_rule() {
    assert!(has_supported_extension("slides.md"));
    assert!(has_supported_extension("slides.mdx"));
    assert!(has_supported_extension("nested/dir/talk.md"));
    assert!(!has_supported_extension("slides.MD"));
    assert!(!has_supported_extension("slides.markdown"));
    assert!(!has_supported_extension("slides.md.bak"));
    assert!(!has_supported_extension("slides.mdxx"));
    assert!(!has_supported_extension(""));
}

#[tokio::test]
async fn test_unknown_action_fails_first() {
    let probe = RecordingProbe::everything();
    // Bad extension as well; the action check must win.
    let result = run(&probe, &args("serve", "slides.txt")).await;

    assert_eq!(
        result,
        Err(ValidationError::UnknownAction {
            action: "serve".to_string(),
            available: vec!["build".to_string(), "server".to_string()],
        })
    );
    assert!(probe.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_extension_even_when_file_exists() {
    let probe = RecordingProbe::everything();
    let result = run(&probe, &args("server", "slides.txt")).await;

    assert_eq!(result, Err(ValidationError::InvalidExtension { src: "slides.txt".to_string() }));
    assert!(probe.calls().is_empty());
}

#[tokio::test]
async fn test_missing_source_reports_absolute_path() {
    let probe = RecordingProbe::with_files(&[]);
    let result = run(&probe, &args("server", "slides.md")).await;

    assert_eq!(
        result,
        Err(ValidationError::FileNotFound { role: FileRole::Source, path: abs("slides.md") })
    );
    assert_eq!(probe.calls(), vec![abs("slides.md")]);
}

#[tokio::test]
async fn test_missing_source_stops_before_theme_and_template() {
    let probe = RecordingProbe::with_files(&["theme.js", "slide.js"]);
    let mut raw = args("server", "slides.md");
    raw.theme = Some("theme.js".to_string());
    raw.template = Some("slide.js".to_string());

    let result = run(&probe, &raw).await;

    assert!(matches!(result, Err(ValidationError::FileNotFound { role: FileRole::Source, .. })));
    assert_eq!(probe.calls(), vec![abs("slides.md")]);
}

#[tokio::test]
async fn test_no_theme_flag_means_no_theme_io() {
    let probe = RecordingProbe::with_files(&["slides.md"]);
    let config = run(&probe, &args("server", "slides.md")).await.unwrap();

    assert_eq!(config.theme_file_path(), None);
    assert_eq!(config.template_file_path(), None);
    assert_eq!(probe.calls(), vec![abs("slides.md")]);
}

#[tokio::test]
async fn test_empty_theme_flag_is_skipped() {
    let probe = RecordingProbe::with_files(&["slides.md"]);
    let mut raw = args("server", "slides.md");
    raw.theme = Some(String::new());

    let config = run(&probe, &raw).await.unwrap();
    assert_eq!(config.theme_file_path(), None);
    assert_eq!(probe.calls(), vec![abs("slides.md")]);
}

#[tokio::test]
async fn test_missing_theme() {
    let probe = RecordingProbe::with_files(&["slides.md", "slide.js"]);
    let mut raw = args("server", "slides.md");
    raw.theme = Some("themes/dark.js".to_string());
    raw.template = Some("slide.js".to_string());

    let result = run(&probe, &raw).await;

    assert_eq!(
        result,
        Err(ValidationError::FileNotFound { role: FileRole::Theme, path: abs("themes/dark.js") })
    );
    assert_eq!(probe.calls(), vec![abs("slides.md"), abs("themes/dark.js")]);
}

#[tokio::test]
async fn test_missing_template_after_theme_succeeds() {
    let probe = RecordingProbe::with_files(&["slides.md", "theme.js"]);
    let mut raw = args("server", "slides.md");
    raw.theme = Some("theme.js".to_string());
    raw.template = Some("slide.js".to_string());

    let result = run(&probe, &raw).await;

    assert_eq!(
        result,
        Err(ValidationError::FileNotFound { role: FileRole::Template, path: abs("slide.js") })
    );
    assert_eq!(probe.calls(), vec![abs("slides.md"), abs("theme.js"), abs("slide.js")]);
}

#[tokio::test]
async fn test_template_without_theme() {
    let probe = RecordingProbe::with_files(&["slides.mdx", "slide.js"]);
    let mut raw = args("build", "slides.mdx");
    raw.template = Some("slide.js".to_string());

    let config = run(&probe, &raw).await.unwrap();
    assert_eq!(config.theme_file_path(), None);
    assert_eq!(config.template_file_path(), Some(abs("slide.js").as_path()));
    assert_eq!(probe.calls(), vec![abs("slides.mdx"), abs("slide.js")]);
}

#[tokio::test]
async fn test_all_paths_resolved() {
    let probe = RecordingProbe::with_files(&["decks/talk.mdx", "theme.js", "slide.js"]);
    let mut raw = args("build", "./decks/talk.mdx");
    raw.theme = Some("theme.js".to_string());
    raw.template = Some("decks/../slide.js".to_string());
    raw.title = "Rust at Scale".to_string();
    raw.port = 8080;

    let config = run(&probe, &raw).await.unwrap();

    assert_eq!(config.action(), "build");
    assert_eq!(config.port(), 8080);
    assert_eq!(config.title(), "Rust at Scale");
    assert_eq!(config.src_file_path(), abs("decks/talk.mdx"));
    assert_eq!(config.theme_file_path(), Some(abs("theme.js").as_path()));
    assert_eq!(config.template_file_path(), Some(abs("slide.js").as_path()));
}

#[tokio::test]
async fn test_defaults_end_to_end() {
    let probe = RecordingProbe::with_files(&["slides.md"]);
    let mut raw = Args::default();
    raw.src = "slides.md".to_string();

    let config = run(&probe, &raw).await.unwrap();

    assert_eq!(config.action(), "server");
    assert_eq!(config.port(), 3000);
    assert_eq!(config.title(), "Presentation");
    assert_eq!(config.src_file_path(), abs("slides.md"));
    assert_eq!(config.theme_file_path(), None);
    assert_eq!(config.template_file_path(), None);
}

// `--output` is parsed and defaulted but never forwarded. Keep that visible: if the
// configuration ever starts carrying it, this test should be revisited on purpose.
#[tokio::test]
async fn test_output_flag_is_not_forwarded() {
    let probe = RecordingProbe::with_files(&["slides.md"]);
    let mut raw = args("build", "slides.md");
    raw.output = "public".to_string();

    let config = run(&probe, &raw).await.unwrap();
    let json = serde_json::to_value(&config).unwrap();

    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 4, "unexpected keys: {keys:?}");
    for key in ["action", "port", "title", "srcFilePath"] {
        assert!(keys.contains(&key), "missing {key} in {keys:?}");
    }
    assert!(json.get("output").is_none());
    assert!(!json.to_string().contains("public"));
}

#[tokio::test]
async fn test_real_filesystem() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("slides.md"), "# Title\n\n---\n\nSecond").unwrap();
    std::fs::write(dir.path().join("theme.json"), "{}").unwrap();

    let catalog = catalog();
    let validator = Validator::with_base_dir(&catalog, &FsProbe, dir.path());
    let mut raw = args("server", "slides.md");
    raw.theme = Some("theme.json".to_string());

    let config = validator.validate(&raw).await.unwrap();
    assert_eq!(config.src_file_path(), dir.path().join("slides.md"));
    assert_eq!(config.theme_file_path(), Some(dir.path().join("theme.json").as_path()));

    raw.template = Some("missing.js".to_string());
    let err = validator.validate(&raw).await.unwrap_err();
    assert_eq!(
        err,
        ValidationError::FileNotFound { role: FileRole::Template, path: dir.path().join("missing.js") }
    );
}

#[test]
fn test_validator_defaults_to_working_directory() {
    let catalog = catalog();
    let validator = Validator::new(&catalog, &FsProbe).unwrap();
    assert_eq!(validator.base_dir(), std::env::current_dir().unwrap());
}

proptest! {
    #[test]
    fn prop_unknown_actions_do_no_io(action in "[a-z][a-z0-9-]{0,15}") {
        prop_assume!(!catalog().contains(&action));
        let probe = RecordingProbe::everything();

        let result = tokio_test::block_on(run(&probe, &args(&action, "slides.md")));

        let is_unknown_action = matches!(&result, Err(ValidationError::UnknownAction { action: a, .. }) if *a == action);
        prop_assert!(is_unknown_action, "got {:?}", result);
        prop_assert!(probe.calls().is_empty());
    }

    #[test]
    fn prop_non_markdown_sources_rejected(src in "[A-Za-z0-9_./-]{0,24}") {
        prop_assume!(!src.ends_with(".md") && !src.ends_with(".mdx"));
        let probe = RecordingProbe::everything();

        let result = tokio_test::block_on(run(&probe, &args("server", &src)));

        prop_assert_eq!(result, Err(ValidationError::InvalidExtension { src: src.clone() }));
        prop_assert!(probe.calls().is_empty());
    }
}
