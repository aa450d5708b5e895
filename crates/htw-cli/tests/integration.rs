//! Integration tests for the htw CLI
//!
//! HTML files on disk through `convert_command`, results checked with
//! `inspect_docx` and the listing formatters. Inputs contain no images so
//! no test touches the network.

use std::fs;

use htw_cli::{
    blocks_command, convert_command, format_blocks, format_summary, inspect_command,
    FooterOverrides, OutputFormat,
};
use htw_core::{classify, DEFAULT_SELECTOR};
use htw_ooxml::inspect_docx;
use tempfile::TempDir;

const SAMPLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
  <h1>年度报告</h1>
  <p>第一段内容。</p>
  <div>not converted</div>
  <p>第二段 <b>加粗</b> 内容。</p>
</body>
</html>"#;

fn write_sample(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("report.html");
    fs::write(&path, SAMPLE_HTML).unwrap();
    path
}

#[test]
fn test_convert_default_output_path() {
    let temp = TempDir::new().unwrap();
    let input = write_sample(&temp);

    let output = convert_command(&input, None, None, &FooterOverrides::default()).unwrap();
    assert_eq!(output, temp.path().join("report.docx"));

    let summary = inspect_docx(&fs::read(&output).unwrap()).unwrap();
    let texts: Vec<String> = summary.body.paragraphs.iter().map(|p| p.text()).collect();
    assert_eq!(texts, vec!["年度报告", "第一段内容。", "第二段 加粗 内容。"]);

    // Footer is on unless disabled
    assert_eq!(summary.footers.len(), 1);
}

#[test]
fn test_convert_footer_overrides() {
    let temp = TempDir::new().unwrap();
    let input = write_sample(&temp);
    let output = temp.path().join("out.docx");

    let overrides = FooterOverrides {
        prefix: Some("第".to_string()),
        suffix: Some("页".to_string()),
        disabled: false,
    };
    convert_command(&input, Some(&output), None, &overrides).unwrap();

    let summary = inspect_docx(&fs::read(&output).unwrap()).unwrap();
    let text = format_summary(&summary, OutputFormat::Text).unwrap();
    assert!(text.contains(r"第{PAGE  \* MERGEFORMAT}页"), "{}", text);
}

#[test]
fn test_convert_no_footer() {
    let temp = TempDir::new().unwrap();
    let input = write_sample(&temp);
    let output = temp.path().join("out.docx");

    let overrides = FooterOverrides {
        disabled: true,
        ..Default::default()
    };
    convert_command(&input, Some(&output), None, &overrides).unwrap();

    let summary = inspect_docx(&fs::read(&output).unwrap()).unwrap();
    assert!(summary.footers.is_empty());
}

#[test]
fn test_convert_with_config() {
    let temp = TempDir::new().unwrap();
    let input = write_sample(&temp);
    let output = temp.path().join("out.docx");
    let config = temp.path().join("htw.toml");
    fs::write(
        &config,
        r#"
selector = "h1"

[heading]
font_size = 22

[footer]
enabled = false

[margins]
left = 2.54
right = 2.54
top = 2.54
bottom = 2.54
"#,
    )
    .unwrap();

    convert_command(&input, Some(&output), Some(&config), &FooterOverrides::default()).unwrap();

    let summary = inspect_docx(&fs::read(&output).unwrap()).unwrap();
    assert_eq!(summary.body.paragraphs.len(), 1);
    assert_eq!(summary.body.paragraphs[0].runs[0].font_size, Some(22));
    assert!(summary.footers.is_empty());
    assert_eq!(summary.margins.unwrap().top, 1440);
}

#[test]
fn test_convert_missing_input() {
    let temp = TempDir::new().unwrap();
    let result = convert_command(
        &temp.path().join("missing.html"),
        None,
        None,
        &FooterOverrides::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_convert_bad_config() {
    let temp = TempDir::new().unwrap();
    let input = write_sample(&temp);
    let config = temp.path().join("htw.toml");
    fs::write(&config, "selector = [").unwrap();

    let err = convert_command(&input, None, Some(&config), &FooterOverrides::default())
        .unwrap_err();
    assert!(err.to_string().contains("Failed to load config"));
}

#[test]
fn test_format_blocks() {
    let blocks = classify(SAMPLE_HTML, DEFAULT_SELECTOR).unwrap();

    let text = format_blocks(&blocks, OutputFormat::Text).unwrap();
    assert!(text.contains("heading"));
    assert!(text.contains("年度报告"));
    assert!(text.ends_with("3 blocks"));

    let json = format_blocks(&blocks, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["kind"], "heading");
    assert_eq!(value[1]["text"], "第一段内容。");
}

#[test]
fn test_blocks_and_inspect_commands() {
    let temp = TempDir::new().unwrap();
    let input = write_sample(&temp);
    let output = temp.path().join("out.docx");
    convert_command(&input, Some(&output), None, &FooterOverrides::default()).unwrap();

    blocks_command(&input, DEFAULT_SELECTOR, OutputFormat::Json).unwrap();
    inspect_command(&output, OutputFormat::Text).unwrap();
    assert!(inspect_command(&input, OutputFormat::Text).is_err());
}

#[test]
fn test_blocks_invalid_selector() {
    let temp = TempDir::new().unwrap();
    let input = write_sample(&temp);
    assert!(blocks_command(&input, "p[", OutputFormat::Text).is_err());
}
