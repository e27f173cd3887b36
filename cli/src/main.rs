//! richtex CLI - render mixed HTML/LaTeX content to HTML

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use richtex::render::{html, to_json, ContentRenderer, JsonFormat, MacroTable, RenderOptions};

#[derive(Parser)]
#[command(name = "richtex")]
#[command(version)]
#[command(about = "Render LaTeX-flavoured question content to HTML", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Input file ("-" for stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    render: RenderArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Flags shared by every command that renders.
#[derive(clap::Args, Clone, Default)]
struct RenderArgs {
    /// Markup inserted for each newline in running text
    #[arg(long, value_name = "HTML", env = "RICHTEX_LINE_BREAK")]
    line_break: Option<String>,

    /// Extra macro definition, e.g. --macro 'RR=\mathbb{R}'
    #[arg(long = "macro", value_name = "NAME=DEF")]
    macros: Vec<String>,

    /// Apply Unicode NFC normalization first
    #[arg(long)]
    nfc: bool,
}

impl RenderArgs {
    fn options(&self) -> richtex::Result<RenderOptions> {
        let mut options = RenderOptions::new().with_unicode_normalization(self.nfc);
        if let Some(ref marker) = self.line_break {
            options = options.with_line_break(marker.as_str());
        }
        for spec in &self.macros {
            let (name, definition) = MacroTable::parse_definition(spec)?;
            options = options.with_macro(name, definition);
        }
        Ok(options)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render one document to HTML
    Render {
        /// Input file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Wrap the output in a complete HTML page
        #[arg(long)]
        standalone: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render many documents in parallel
    Batch {
        /// Input files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Wrap each output in a complete HTML page
        #[arg(long)]
        standalone: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print the token list as JSON
    Inspect {
        /// Input file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show render statistics
    Stats {
        /// Input file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output statistics as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render {
            input,
            output,
            standalone,
            render,
        }) => cmd_render(&input, output.as_deref(), standalone, &render),
        Some(Commands::Batch {
            inputs,
            output,
            standalone,
            render,
        }) => cmd_batch(&inputs, &output, standalone, &render),
        Some(Commands::Inspect {
            input,
            compact,
            render,
        }) => cmd_inspect(&input, compact, &render),
        Some(Commands::Stats {
            input,
            json,
            render,
        }) => cmd_stats(&input, json, &render),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: render to stdout if input is provided
            if let Some(input) = cli.input {
                cmd_render(&input, None, false, &cli.render)
            } else {
                println!("{}", "Usage: richtex <FILE>".yellow());
                println!("       richtex --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_input(input: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let data = if input == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(input)?
    };
    Ok(String::from_utf8(data).map_err(richtex::Error::from)?)
}

fn page_title(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "richtex".to_string())
}

fn output_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    dir.join(format!("{}.html", stem))
}

fn cmd_render(
    input: &Path,
    output: Option<&Path>,
    standalone: bool,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    let renderer = ContentRenderer::new(args.options()?);

    let mut rendered = renderer.render(&text);
    if standalone {
        rendered = html::standalone_document(&page_title(input), &rendered);
    }

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output: &Path,
    standalone: bool,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output)?;
    let renderer = ContentRenderer::new(args.options()?);

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Rendering...");

    let failures: Vec<(PathBuf, String)> = inputs
        .par_iter()
        .filter_map(|input| {
            let result = read_input(input).and_then(|text| {
                let mut rendered = renderer.render(&text);
                if standalone {
                    rendered = html::standalone_document(&page_title(input), &rendered);
                }
                fs::write(output_path(output, input), rendered)?;
                Ok(())
            });
            pb.inc(1);
            result.err().map(|e| (input.clone(), e.to_string()))
        })
        .collect();

    pb.finish_with_message("Done!");

    let written = inputs.len() - failures.len();
    println!(
        "\n{} {} files written to {}",
        "Done!".green().bold(),
        written,
        output.display()
    );
    for (path, error) in &failures {
        eprintln!("  {} {}: {}", "Failed".red(), path.display(), error);
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("{} of {} files failed", failures.len(), inputs.len()).into())
    }
}

fn cmd_inspect(
    input: &Path,
    compact: bool,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    let spans = ContentRenderer::new(args.options()?).tokenize(&text);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    println!("{}", to_json(&spans, format)?);
    Ok(())
}

fn cmd_stats(input: &Path, json: bool, args: &RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    let result = richtex::render_with_stats(&text, &args.options()?);
    let stats = &result.stats;

    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    println!("{}", "Render Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Inline math".bold(), stats.inline_math);
    println!("{}: {}", "Display math".bold(), stats.display_math);
    println!("{}: {}", "Failed math".bold(), stats.failed_math);
    println!(
        "{}: {} ({} fallback)",
        "Tables".bold(),
        stats.tables,
        stats.fallback_tables
    );
    println!("{}: {}", "Centered blocks".bold(), stats.centers);
    println!("{}: {}", "Line breaks".bold(), stats.line_breaks);
    println!("{}: {} bytes", "Output".bold(), result.html_len());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "richtex".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("LaTeX-aware rich content renderer");
    println!();
    println!("Math typesetting: KaTeX");
    println!("License: MIT");
}
