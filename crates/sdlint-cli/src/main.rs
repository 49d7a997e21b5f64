//! sdlint CLI - lint pre-parsed GraphQL schema documents

mod json;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use sdlint_core::{
    config::LintConfig, diagnostics::DiagnosticLevel, rules::all_rules, Linter,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sdlint")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Lint GraphQL schema definitions",
    long_about = "Check pre-parsed GraphQL schema documents (*.graphql.json) against configurable rules.\n\nRules: require-description"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Document or directory to lint (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Strict mode (treat warnings as errors)
    #[arg(short, long, global = true)]
    strict: bool,

    /// Config file path (defaults to .sdlint.toml in the working directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint schema documents
    Check {
        /// Document or directory to lint
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Initialize config file
    Init {
        /// Output path for config
        #[arg(default_value = ".sdlint.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// List available rules
    Rules {
        /// Print each rule's options schema
        #[arg(long)]
        schema: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Some(Commands::Check { path }) => check_command(path, &cli),
        Some(Commands::Init { output, force }) => init_command(output, *force),
        Some(Commands::Rules { schema }) => rules_command(*schema),
        None => check_command(&cli.path, &cli),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "sdlint=debug,sdlint_core=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn check_command(path: &Path, cli: &Cli) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    let config = LintConfig::discover(cli.config.as_deref(), &cwd)?;
    let linter = Linter::new(&config)?;
    tracing::debug!(rules = linter.rule_count(), "linter ready");

    let run = linter.lint_path(path)?;
    let diagnostics = &run.diagnostics;

    let errors = diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Error)
        .count();
    let warnings = diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Warning)
        .count();
    let failed = errors > 0 || (cli.strict && warnings > 0);

    if cli.format == OutputFormat::Json {
        let base = if path.is_dir() { path } else { path.parent().unwrap_or(path) };
        let output = json::diagnostics_to_json(diagnostics, run.files_checked, base);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(if failed { 1 } else { 0 });
    }

    println!("{} {}", "Linting:".cyan().bold(), path.display());
    println!();

    if diagnostics.is_empty() {
        println!(
            "{} ({} {} checked)",
            "✓ No issues found".green().bold(),
            run.files_checked,
            if run.files_checked == 1 { "file" } else { "files" }
        );
        return Ok(0);
    }

    for diag in diagnostics {
        let level_str = match diag.level {
            DiagnosticLevel::Error => "error".red().bold(),
            DiagnosticLevel::Warning => "warning".yellow().bold(),
        };

        println!(
            "{}:{}:{} {}: {}",
            diag.file.display().to_string().dimmed(),
            diag.line(),
            diag.column(),
            level_str,
            diag.message
        );

        if cli.verbose {
            println!("  {} {}", "rule:".dimmed(), diag.rule.dimmed());
            println!(
                "  {} {}:{}-{}:{}",
                "span:".dimmed(),
                diag.location.start.line,
                diag.location.start.column,
                diag.location.end.line,
                diag.location.end.column
            );
        }
        println!();
    }

    println!("{}", "─".repeat(60).dimmed());
    println!(
        "Found {} {}, {} {}",
        errors,
        if errors == 1 { "error" } else { "errors" },
        warnings,
        if warnings == 1 { "warning" } else { "warnings" }
    );

    Ok(if failed { 1 } else { 0 })
}

fn init_command(output: &Path, force: bool) -> anyhow::Result<i32> {
    if output.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }

    let default_config = LintConfig::default();
    let toml_content = toml::to_string_pretty(&default_config)?;

    std::fs::write(output, toml_content)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} Created config file: {}",
        "✓".green().bold(),
        output.display()
    );

    Ok(0)
}

fn rules_command(schema: bool) -> anyhow::Result<i32> {
    for rule in all_rules() {
        let meta = rule.meta();
        let name = sdlint_rules::get_rule_name(meta.id).unwrap_or(meta.description);

        println!("{}  {}", meta.id.cyan().bold(), name);
        println!("  {} {}", "category:".dimmed(), meta.category);
        let kinds: Vec<&str> = meta.kinds.iter().map(|k| k.as_str()).collect();
        println!("  {} {}", "kinds:".dimmed(), kinds.join(", "));
        for (message_id, template) in meta.messages {
            println!("  {} {} -> {}", "message:".dimmed(), message_id, template);
        }

        if schema {
            println!("{}", serde_json::to_string_pretty(&meta.schema)?);
        }
        println!();
    }

    Ok(0)
}
