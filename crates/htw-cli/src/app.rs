//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use htw_core::{classify, Block, Converter, HtwConfig, DEFAULT_SELECTOR};
use htw_ooxml::inspect::{ParagraphSummary, PartSummary};
use htw_ooxml::{inspect_docx, Docx, DocxSummary, RunItem};

/// Output format for listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "htw")]
#[command(author, version, about = "HTML to Word conversion", long_about = None)]
struct Cli {
    /// Log conversion details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an HTML file to DOCX
    Convert {
        /// Input HTML file
        input: PathBuf,

        /// Output DOCX file (defaults to the input with a .docx extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (htw.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Text placed before the page number
        #[arg(long)]
        footer_prefix: Option<String>,

        /// Text placed after the page number
        #[arg(long)]
        footer_suffix: Option<String>,

        /// Do not install a page-number footer
        #[arg(long)]
        no_footer: bool,
    },

    /// List the blocks an HTML file converts to
    Blocks {
        /// Input HTML file
        input: PathBuf,

        /// CSS selector choosing the blocks
        #[arg(short, long, default_value = DEFAULT_SELECTOR)]
        selector: String,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the paragraphs, footers and media of a DOCX file
    Inspect {
        /// Input DOCX file
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Footer settings given on the command line, applied over the config file
#[derive(Debug, Clone, Default)]
pub struct FooterOverrides {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub disabled: bool,
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            config,
            footer_prefix,
            footer_suffix,
            no_footer,
        } => {
            let overrides = FooterOverrides {
                prefix: footer_prefix,
                suffix: footer_suffix,
                disabled: no_footer,
            };
            convert_command(&input, output.as_deref(), config.as_deref(), &overrides)?;
        }
        Commands::Blocks {
            input,
            selector,
            format,
        } => {
            blocks_command(&input, &selector, format)?;
        }
        Commands::Inspect { input, format } => {
            inspect_command(&input, format)?;
        }
    }

    Ok(())
}

/// Execute the convert command, returning the path written
pub fn convert_command(
    input: &Path,
    output: Option<&Path>,
    config: Option<&Path>,
    overrides: &FooterOverrides,
) -> Result<PathBuf> {
    println!("htw v{}", htw_core::VERSION);
    println!("Converting: {}", input.display());

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let mut config = match config {
        Some(path) => HtwConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => HtwConfig::default(),
    };
    if let Some(ref prefix) = overrides.prefix {
        config.footer.prefix = prefix.clone();
    }
    if let Some(ref suffix) = overrides.suffix {
        config.footer.suffix = suffix.clone();
    }
    if overrides.disabled {
        config.footer.enabled = false;
    }

    let html = fs::read_to_string(input)
        .with_context(|| format!("Failed to read HTML file: {}", input.display()))?;

    let converter = Converter::new().with_options(config.to_options());
    let mut doc = Docx::new();
    let report = converter
        .convert(&mut doc, &html)
        .with_context(|| format!("Failed to convert: {}", input.display()))?;
    converter.apply_page_setup(&mut doc);

    let output_path = match output {
        Some(p) => p.to_path_buf(),
        None => input.with_extension("docx"),
    };
    doc.save(&output_path)
        .with_context(|| format!("Failed to write DOCX file: {}", output_path.display()))?;

    println!("  Created: {}", output_path.display());
    println!();
    println!("Conversion complete!");
    println!("  {} headings", report.headings);
    println!("  {} paragraphs", report.paragraphs);
    println!("  {} images", report.images);
    if report.image_failures > 0 {
        println!("  {} images could not be embedded", report.image_failures);
    }

    Ok(output_path)
}

/// Execute the blocks command
pub fn blocks_command(input: &Path, selector: &str, format: OutputFormat) -> Result<()> {
    let html = fs::read_to_string(input)
        .with_context(|| format!("Failed to read HTML file: {}", input.display()))?;
    let blocks = classify(&html, selector)
        .with_context(|| format!("Failed to classify: {}", input.display()))?;
    println!("{}", format_blocks(&blocks, format)?);
    Ok(())
}

/// Execute the inspect command
pub fn inspect_command(input: &Path, format: OutputFormat) -> Result<()> {
    let bytes =
        fs::read(input).with_context(|| format!("Failed to read DOCX file: {}", input.display()))?;
    let summary = inspect_docx(&bytes)
        .with_context(|| format!("Failed to inspect DOCX file: {}", input.display()))?;
    println!("{}", format_summary(&summary, format)?);
    Ok(())
}

/// Render a block listing
pub fn format_blocks(blocks: &[Block], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(blocks)?),
        OutputFormat::Text => {
            let mut output = String::new();
            for (index, block) in blocks.iter().enumerate() {
                let value = match block {
                    Block::Paragraph { text } | Block::Heading { text } => text,
                    Block::Image { url } => url,
                };
                output.push_str(&format!("{:>3}  {:<9}  {}\n", index + 1, block.kind(), value));
            }
            output.push_str(&format!("{} blocks", blocks.len()));
            Ok(output)
        }
    }
}

/// Render a document summary
///
/// In text form, a page field shows as `{PAGE ...}` and a picture as
/// `[picture name WxH EMU]`.
pub fn format_summary(summary: &DocxSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        OutputFormat::Text => {
            let mut output = String::new();
            write_part(&mut output, "Body", &summary.body);
            for (index, footer) in summary.footers.iter().enumerate() {
                write_part(&mut output, &format!("Footer {}", index + 1), footer);
            }
            if let Some(margins) = summary.margins {
                output.push_str(&format!(
                    "Margins (twips): left {} right {} top {} bottom {}\n",
                    margins.left, margins.right, margins.top, margins.bottom
                ));
            }
            output.push_str(&format!("Media: {} file(s)\n", summary.media.len()));
            for path in &summary.media {
                output.push_str(&format!("  {}\n", path));
            }
            Ok(output.trim_end().to_string())
        }
    }
}

fn write_part(output: &mut String, title: &str, part: &PartSummary) {
    output.push_str(&format!("{} ({} paragraphs)\n", title, part.paragraphs.len()));
    for (index, para) in part.paragraphs.iter().enumerate() {
        output.push_str(&format!("{:>4}  {}\n", index + 1, paragraph_line(para)));
    }
}

fn paragraph_line(para: &ParagraphSummary) -> String {
    let mut line = String::new();
    for item in para.runs.iter().flat_map(|r| r.items.iter()) {
        match item {
            RunItem::Text { text } => line.push_str(text),
            RunItem::FieldChar { field } if field == "begin" => line.push('{'),
            RunItem::FieldChar { field } if field == "end" => line.push('}'),
            RunItem::FieldChar { .. } => {}
            RunItem::Instruction { text } => line.push_str(text.trim()),
            RunItem::Picture { name, cx, cy } => {
                line.push_str(&format!("[picture {} {}x{} EMU]", name, cx, cy))
            }
        }
    }
    line
}
