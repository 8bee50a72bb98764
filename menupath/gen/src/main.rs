//! Menupath Code Generator
//!
//! Generates statically navigable Rust bindings from a remote command-tree
//! schema dump.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use menupath_gen::cargo_gen::{RuntimeDependency, write_cargo_toml};
use menupath_gen::options::{DEFAULT_PACKAGE_NAME, DEFAULT_RUNTIME_CRATE};
use menupath_gen::source::FileSource;
use menupath_gen::{GeneratorError, GeneratorOptions, generate};

/// Menupath code generator - transforms command-tree schemas into typed Rust bindings
#[derive(Parser, Debug)]
#[command(name = "menupath-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Schema dump to generate from (.json, .yaml or .yml)
    #[arg(short, long)]
    schema: PathBuf,

    /// Output directory for generated sources
    #[arg(short, long, default_value = "stubs/src")]
    output: PathBuf,

    /// Root type name (defaults to the schema's `root`, then "Session")
    #[arg(long)]
    root: Option<String>,

    /// Module file name for the root type (defaults to its snake_case name)
    #[arg(long)]
    module: Option<String>,

    /// Path generated code uses to reach the runtime crate
    #[arg(long, default_value = DEFAULT_RUNTIME_CRATE)]
    runtime_crate: String,

    /// Package name for the generated Cargo.toml
    #[arg(long, default_value = DEFAULT_PACKAGE_NAME)]
    package: String,

    /// Local path to menupath-runtime for the generated Cargo.toml
    #[arg(long)]
    runtime_path: Option<PathBuf>,

    /// Additional reserved words (repeatable)
    #[arg(long = "reserve", value_name = "WORD")]
    reserved: Vec<String>,

    /// Skip writing Cargo.toml next to the output directory
    #[arg(long)]
    no_cargo: bool,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv); RUST_LOG takes precedence when set
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> GeneratorOptions {
        GeneratorOptions {
            root_type: self.root.clone(),
            module_name: self.module.clone(),
            runtime_crate: self.runtime_crate.clone(),
            package_name: self.package.clone(),
            extra_reserved: self.reserved.clone(),
        }
    }
}

fn run(cli: &Cli) -> Result<(), GeneratorError> {
    let options = cli.options();
    debug!(?options, "resolved options");

    let source = FileSource::new(&cli.schema);
    let summary = generate(&source, &options, &cli.output, cli.dry_run)?;

    if !cli.no_cargo {
        // The output directory points at src/, the manifest goes in its parent
        let crate_dir = cli.output.parent().unwrap_or(Path::new("."));
        let runtime = cli
            .runtime_path
            .clone()
            .map(RuntimeDependency::Path)
            .unwrap_or_default();
        write_cargo_toml(crate_dir, &options.package_name, &runtime, cli.dry_run)?;
    }

    if !cli.dry_run {
        eprintln!(
            "{} {} ({} types, {} commands, depth {}) -> {}",
            "Generated".green().bold(),
            summary.root_type,
            summary.type_count,
            summary.command_count,
            summary.depth,
            cli.output.display()
        );
    }

    Ok(())
}

/// Log level for `-v` repetitions; `RUST_LOG` takes precedence when set.
fn verbosity_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(verbosity_level(cli.verbose)).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(verbosity_level(0), Level::WARN);
        assert_eq!(verbosity_level(1), Level::INFO);
        assert_eq!(verbosity_level(2), Level::DEBUG);
        assert_eq!(verbosity_level(7), Level::TRACE);
    }

    #[test]
    fn repeated_verbose_flags_count() {
        let cli = Cli::try_parse_from(["menupath-gen", "-s", "dump.json", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
