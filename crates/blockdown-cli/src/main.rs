//! Command-line interface for blockdown.
//!
//! Usage:
//!   blockdown blocks `<path>` [--json]                      - Parse a note and list its blocks
//!   blockdown export `<path>` [--format <fmt>] [--out <dir>] - Export a note as md/txt/html
//!   blockdown detect `<path>`                               - Check whether a file looks like markdown

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use blockdown_config::Config;
use blockdown_engine::io::{self, ExportFormat};
use blockdown_engine::{Note, has_markdown_syntax, markdown_to_blocks};
use clap::{Arg, ArgAction, Command};

fn main() -> Result<()> {
    let matches = Command::new("blockdown")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse, inspect and export block-based markdown notes")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("blocks")
                .about("Parse a note and list its blocks")
                .arg(
                    Arg::new("path")
                        .help("Path to the markdown file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Emit the parsed blocks as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export a note to another format")
                .arg(
                    Arg::new("path")
                        .help("Path to the markdown file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('markdown', 'text' or 'html')")
                        .default_value("markdown"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .help("Output directory (defaults to the configured export dir)"),
                )
                .arg(
                    Arg::new("title")
                        .long("title")
                        .help("Override the note title (defaults to the file stem)"),
                ),
        )
        .subcommand(
            Command::new("detect")
                .about("Check whether a file looks like markdown")
                .arg(
                    Arg::new("path")
                        .help("Path to the text file")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("blocks", sub)) => {
            let path = PathBuf::from(sub.get_one::<String>("path").expect("required arg"));
            cmd_blocks(&path, sub.get_flag("json"))
        }
        Some(("export", sub)) => {
            let path = PathBuf::from(sub.get_one::<String>("path").expect("required arg"));
            let format = parse_format(sub.get_one::<String>("format").expect("has default"))?;
            let out = sub.get_one::<String>("out").map(PathBuf::from);
            let title = sub.get_one::<String>("title").map(String::as_str);
            cmd_export(&path, format, out, title)
        }
        Some(("detect", sub)) => {
            let path = PathBuf::from(sub.get_one::<String>("path").expect("required arg"));
            cmd_detect(&path)
        }
        _ => unreachable!("subcommand required"),
    }
}

fn parse_format(raw: &str) -> Result<ExportFormat> {
    match raw {
        "markdown" | "md" => Ok(ExportFormat::Markdown),
        "text" | "txt" => Ok(ExportFormat::PlainText),
        "html" => Ok(ExportFormat::Html),
        other => anyhow::bail!("unknown format '{other}' (expected markdown, text or html)"),
    }
}

fn read_to_note(path: &Path, title: Option<&str>) -> Result<Note> {
    let markdown = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let title = title
        .map(str::to_string)
        .or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "Untitled".to_string());

    let mut note = Note::new(title);
    note.set_blocks(markdown_to_blocks(&markdown));
    Ok(note)
}

fn cmd_blocks(path: &Path, json: bool) -> Result<()> {
    let note = read_to_note(path, None)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note.blocks)?);
        return Ok(());
    }

    for block in &note.blocks {
        let summary = if block.content.is_empty() {
            block
                .meta
                .as_ref()
                .and_then(|meta| meta.url())
                .unwrap_or("")
                .to_string()
        } else {
            block.content.clone()
        };
        println!("{:?}\t{summary}", block.kind);
    }
    Ok(())
}

fn cmd_export(
    path: &Path,
    format: ExportFormat,
    out: Option<PathBuf>,
    title: Option<&str>,
) -> Result<()> {
    let note = read_to_note(path, title)?;

    let out_dir = match out {
        Some(dir) => dir,
        None => match Config::load() {
            Ok(Some(config)) => config.export_dir(),
            // No config or unreadable config: export next to the input.
            _ => path.parent().unwrap_or(Path::new(".")).to_path_buf(),
        },
    };

    let written = io::export_note(&note, format, &out_dir)
        .with_context(|| format!("failed to export {}", path.display()))?;
    println!("{}", written.display());
    Ok(())
}

fn cmd_detect(path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    if has_markdown_syntax(&text) {
        println!("markdown");
        Ok(())
    } else {
        println!("plain");
        process::exit(1);
    }
}
