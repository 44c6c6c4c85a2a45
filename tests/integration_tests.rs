//! Integration tests for the resume evaluator

use resume_evaluator::config::OutputFormat;
use resume_evaluator::input::InputManager;
use resume_evaluator::output::{save_report, ReportGenerator, ReportMetadata, ResumeReport};
use resume_evaluator::processing::keyword_extractor::KeywordExtractor;
use resume_evaluator::{Config, ResumeAnalyzer};
use std::path::Path;

const RESUME_TXT: &str = "tests/fixtures/sample_resume.txt";
const RESUME_MD: &str = "tests/fixtures/sample_resume.md";
const JOB_TXT: &str = "tests/fixtures/job_description.txt";

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new(RESUME_TXT);

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new(RESUME_MD);

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    assert!(!text.contains("https://react.dev"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new(RESUME_TXT);

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_job_description_keywords() {
    let mut manager = InputManager::new();
    let job = manager.extract_text(Path::new(JOB_TXT)).await.unwrap();

    let extractor = KeywordExtractor::from_config(&Config::default().extraction).unwrap();
    let keywords: Vec<String> = extractor.extract(&job).into_iter().collect();
    assert_eq!(keywords, vec!["docker", "python", "react", "sql"]);
}

#[tokio::test]
async fn test_end_to_end_analysis() {
    let mut manager = InputManager::new();
    let resume = manager.extract_text(Path::new(RESUME_TXT)).await.unwrap();
    let job = manager.extract_text(Path::new(JOB_TXT)).await.unwrap();

    let analyzer = ResumeAnalyzer::from_config(&Config::default()).unwrap();
    let analysis = analyzer.analyze(&resume, Some(&job));

    assert!(analysis.job_description_provided);
    assert!(analysis.skill_match.matched.contains("python"));
    assert!(analysis.skill_match.matched.contains("react"));
    assert!(analysis.skill_match.missing.contains("sql"));
    assert!(analysis.skill_match.missing.contains("docker"));
    assert_eq!(analysis.skill_match.match_score, 50.0);

    assert_eq!(analysis.structure.score, 100.0);
    assert_eq!(analysis.structure_tips, vec![Config::default().structure.complete_tip]);
    assert!(analysis.suggestions.iter().any(|s| s.contains("SQL")));
    assert!((0.0..=100.0).contains(&analysis.total_score));
}

#[tokio::test]
async fn test_markdown_and_text_resumes_agree_on_skills() {
    let mut manager = InputManager::new();
    let txt = manager.extract_text(Path::new(RESUME_TXT)).await.unwrap();
    let md = manager.extract_text(Path::new(RESUME_MD)).await.unwrap();
    let job = manager.extract_text(Path::new(JOB_TXT)).await.unwrap();

    let analyzer = ResumeAnalyzer::from_config(&Config::default()).unwrap();
    let from_txt = analyzer.analyze(&txt, Some(&job));
    let from_md = analyzer.analyze(&md, Some(&job));

    assert_eq!(from_txt.skill_match.matched, from_md.skill_match.matched);
    assert_eq!(from_txt.structure.score, from_md.structure.score);
}

#[test]
fn test_resume_without_job_description() {
    let analyzer = ResumeAnalyzer::from_config(&Config::default()).unwrap();
    let analysis = analyzer.analyze("Experience\nBuilt things.", None);

    assert!(!analysis.job_description_provided);
    assert!(analysis.skill_match.matched.is_empty());
    assert_eq!(analysis.skill_match.match_score, 0.0);
    assert_eq!(analysis.suggestions, vec![Config::default().suggestions.fallback]);
    assert_eq!(analysis.structure_tips.len(), 4);
}

#[test]
fn test_reports_saved_in_every_format() {
    let config = Config::default();
    let analysis = ResumeAnalyzer::from_config(&config)
        .unwrap()
        .analyze("Summary\nRust engineer.\nSkills: Rust, Go", Some("Skills: Rust, Kubernetes"));
    let metadata = ReportMetadata::new("resume.txt", None, 3);
    let report = ResumeReport::new(analysis, config.scoring.clone(), metadata);

    let dir = tempfile::tempdir().unwrap();
    let generator = ReportGenerator::with_options(false, true, true, true);
    let formats = [
        (OutputFormat::Console, "report.txt"),
        (OutputFormat::Json, "report.json"),
        (OutputFormat::Markdown, "report.md"),
        (OutputFormat::Html, "report.html"),
        (OutputFormat::Pdf, "report.pdf"),
    ];

    for (format, name) in formats {
        let bytes = generator.generate_report(&report, format).unwrap();
        let path = dir.path().join(name);
        save_report(&bytes, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0, "{} is empty", name);
    }

    let json = std::fs::read_to_string(dir.path().join("report.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["metadata"]["resume_file"], "resume.txt");
    assert!(value["metadata"]["job_file"].is_null());
}

#[test]
fn test_custom_config_file_drives_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.scoring.grammar_weight = 0.0;
    config.scoring.readability_weight = 0.0;
    config.scoring.skill_weight = 0.0;
    config.scoring.structure_weight = 1.0;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    let analysis = ResumeAnalyzer::from_config(&loaded)
        .unwrap()
        .analyze("Education\nExperience", None);
    assert_eq!(analysis.total_score, 40.0);
}
