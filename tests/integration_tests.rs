//! Integration tests for hcldoc.
//!
//! These tests run the parser, extractors and assembler end to end over
//! the fixture modules, and drive the `hcldoc` binary.

use hcldoc::{Config, Documenter, HclDocError, ValueKind};
use std::path::PathBuf;

/// Get the path to the test fixtures directory.
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

mod parser_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use hcldoc::parser::HclParser;

    #[tokio::test]
    async fn test_parse_directory_sorted() {
        let config = Config::default();
        let parser = HclParser::new(&config);

        let files = parser
            .parse_directory(&fixtures_path().join("basic"))
            .await
            .unwrap()
            .files;

        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["main.tf", "outputs.tf", "variables.tf"]);
    }

    #[tokio::test]
    async fn test_parse_header_comment_group() {
        let parser = HclParser::new(&Config::default());
        let parsed = parser.parse_directory(&fixtures_path().join("basic")).await.unwrap();

        let main = &parsed.files[0].file;
        assert_eq!(main.comments[0].line, 1);
        assert!(main.comments[0].comments[0].starts_with("/**"));
    }

    #[tokio::test]
    async fn test_exclude_patterns() {
        let mut config = Config::default();
        config.scan.exclude_patterns.push("outputs.tf".to_string());
        let parser = HclParser::new(&config);

        let parsed = parser.parse_directory(&fixtures_path().join("basic")).await.unwrap();
        assert_eq!(parsed.files.len(), 2);
    }

    #[tokio::test]
    async fn test_continue_on_error_skips_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.tf"), "variable \"a\" {\n").unwrap();
        std::fs::write(dir.path().join("ok.tf"), "variable \"b\" {}\n").unwrap();

        let parser = HclParser::new(&Config::default());
        let result = parser.parse_directory(dir.path()).await;
        assert!(matches!(result, Err(HclDocError::HclParse { .. })));

        let mut config = Config::default();
        config.scan.continue_on_error = true;
        let parsed = HclParser::new(&config).parse_directory(dir.path()).await.unwrap();
        assert_eq!(parsed.files.len(), 1);
        assert_eq!(parsed.skipped.len(), 1);
        assert!(matches!(parsed.skipped[0], HclDocError::HclParse { .. }));
    }
}

mod documenter_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn basic(sort_by_required: bool) -> hcldoc::Doc {
        let mut config = Config::default();
        config.doc.sort_by_required = sort_by_required;
        Documenter::new(config)
            .document_path(fixtures_path().join("basic"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_version_and_header() {
        let doc = basic(false).await;
        assert_eq!(doc.version, ">= 0.12");
        assert_eq!(
            doc.comment,
            "# Basic module\n\nCreates a log bucket and a web instance.\n"
        );
    }

    #[tokio::test]
    async fn test_providers_and_resources() {
        let doc = basic(false).await;

        assert_eq!(doc.providers.len(), 1);
        assert_eq!(doc.providers[0].name, "aws");
        assert_eq!(
            doc.providers[0].documentation,
            "https://www.terraform.io/docs/providers/aws"
        );

        let resources: Vec<_> = doc
            .resources
            .iter()
            .map(|r| (r.resource_type.as_str(), r.name.as_str()))
            .collect();
        assert_eq!(resources, vec![("aws_s3_bucket", "logs"), ("aws_instance", "web")]);
        assert_eq!(
            doc.resources[0].documentation,
            "https://www.terraform.io/docs/providers/aws/r/s3_bucket.html"
        );
    }

    #[tokio::test]
    async fn test_inputs_by_name() {
        let doc = basic(false).await;

        let names: Vec<_> = doc.inputs.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["instance_type", "name", "region", "tags", "zones"]);

        let region = &doc.inputs[2];
        assert_eq!(region.description, "The AWS region.\n");
        assert_eq!(region.input_type, "string");
        assert_eq!(region.value(), "required");

        let name = &doc.inputs[1];
        assert_eq!(name.description, "Bucket name");
        assert!(name.is_required());

        let tags = &doc.inputs[3];
        assert_eq!(tags.default.as_ref().unwrap().kind, ValueKind::Map);
        assert_eq!(tags.value(), "<map>");
        assert!(tags.input_type.contains("map"));

        let zones = &doc.inputs[4];
        assert_eq!(zones.description, "Availability zones.\n");
        assert_eq!(zones.value(), "<list>");

        assert_eq!(doc.inputs[0].value(), "t3.micro");
    }

    #[tokio::test]
    async fn test_inputs_by_required() {
        let doc = basic(true).await;

        let names: Vec<_> = doc.inputs.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["name", "region", "instance_type", "tags", "zones"]);
    }

    #[tokio::test]
    async fn test_outputs_sorted_and_trimmed() {
        let doc = basic(false).await;

        let outputs: Vec<_> = doc
            .outputs
            .iter()
            .map(|o| (o.name.as_str(), o.description.as_str()))
            .collect();
        assert_eq!(
            outputs,
            vec![
                ("address", "Public IP of the web instance."),
                ("bucket_arn", "ARN of the bucket"),
            ]
        );
    }

    #[tokio::test]
    async fn test_deterministic() {
        assert_eq!(basic(false).await, basic(false).await);
    }

    #[tokio::test]
    async fn test_malformed_resource_type() {
        let result = Documenter::new(Config::default())
            .document_path(fixtures_path().join("malformed"))
            .await;

        match result {
            Err(HclDocError::MalformedResourceType { file, resource_type, .. }) => {
                assert_eq!(resource_type, "nounderscore");
                assert!(file.ends_with("main.tf"));
            }
            other => panic!("Expected MalformedResourceType, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let doc = Documenter::new(Config::default())
            .document_path(dir.path())
            .await
            .unwrap();
        assert_eq!(doc, hcldoc::Doc::default());
    }
}

mod cli_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use predicates::prelude::*;
    use std::process::Command;

    fn cmd() -> assert_cmd::Command {
        assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_hcldoc")))
    }

    #[test]
    fn test_generate_json() {
        let assert = cmd()
            .arg("generate")
            .arg(fixtures_path().join("basic"))
            .assert()
            .success();

        let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(json["version"], ">= 0.12");
        assert_eq!(json["inputs"][0]["name"], "instance_type");
        assert_eq!(json["inputs"][0]["default"]["type"], "string");
        assert_eq!(json["inputs"][2]["default"], serde_json::Value::Null);
        assert_eq!(json["resources"][0]["type"], "aws_s3_bucket");
    }

    #[test]
    fn test_generate_yaml_sorted_by_required() {
        cmd()
            .args(["generate", "--format", "yaml", "--sort-by-required"])
            .arg(fixtures_path().join("basic"))
            .assert()
            .success()
            .stdout(predicate::str::contains("version:"))
            .stdout(predicate::str::contains("- name: name"));
    }

    #[test]
    fn test_generate_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("doc.json");

        cmd()
            .arg("generate")
            .arg(fixtures_path().join("basic"))
            .arg("--output")
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.contains("\"bucket_arn\""));
    }

    #[test]
    fn test_generate_missing_directory() {
        cmd()
            .args(["generate", "/definitely/not/here"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Directory not found"));
    }

    #[test]
    fn test_generate_malformed_resource() {
        cmd()
            .arg("generate")
            .arg(fixtures_path().join("malformed"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("nounderscore"));
    }

    #[test]
    fn test_generate_continue_on_error_reports_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.tf"), "variable \"a\" {\n").unwrap();
        std::fs::write(dir.path().join("ok.tf"), "variable \"b\" {}\n").unwrap();

        cmd()
            .args(["--quiet", "generate", "--continue-on-error"])
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("\"b\""))
            .stderr(predicate::str::contains("Warning: skipped"))
            .stderr(predicate::str::contains("broken.tf"));
    }

    #[test]
    fn test_init_and_validate() {
        let dir = tempfile::tempdir().unwrap();

        cmd()
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("hcldoc.yaml"));

        cmd()
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));

        cmd()
            .current_dir(dir.path())
            .arg("validate")
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration is valid"));
    }

    #[test]
    fn test_validate_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.yaml"), "scan: [unclosed").unwrap();

        cmd()
            .current_dir(dir.path())
            .args(["validate", "bad.yaml"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Configuration error"));
    }

    #[test]
    fn test_validate_ignores_broken_default_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hcldoc.yaml"), "scan: [unclosed").unwrap();
        std::fs::write(dir.path().join("other.yaml"), "doc:\n  sort_by_required: true\n").unwrap();

        cmd()
            .current_dir(dir.path())
            .args(["validate", "other.yaml"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration is valid: other.yaml"));
    }
}

mod config_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_loading() {
        let yaml = r#"
scan:
  max_depth: 2
doc:
  sort_by_required: true
output:
  format: yaml
  pretty: false
"#;

        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.scan.max_depth, 2);
        assert!(config.doc.sort_by_required);
        assert_eq!(config.output.format, hcldoc::OutputFormat::Yaml);
        assert!(!config.output.pretty);
    }
}
