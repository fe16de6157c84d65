//! CLI logic for the graphdoc documentation tool.

pub mod check;
pub mod config;
pub mod error_adapter;

mod args;
mod error;

pub use args::{Args, Command};
pub use error::CliError;

use log::info;

use graphdoc::export::{Exporter, org::OrgExporter};
use graphdoc::locate::DocsManager;
use graphdoc::{DocOptions, DocsGenerator};
use graphdoc_source::SourceGateway;

use crate::config::AppConfig;

/// Run the graphdoc CLI application
///
/// Loads the configuration, reads the source trees, and executes the
/// selected subcommand.
///
/// # Errors
///
/// Returns `CliError` for configuration and I/O failures. Per-file
/// generation problems are logged and do not abort the run.
pub fn run(args: &Args) -> Result<(), CliError> {
    let mut config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Docs {
            source_root,
            doc_root,
        } => {
            if let Some(source_root) = source_root {
                config.paths.source_root = source_root.clone();
            }
            if let Some(doc_root) = doc_root {
                config.paths.doc_root = doc_root.clone();
            }
            generate_docs(&config)
        }
        Command::Check { source_root } => {
            if let Some(source_root) = source_root {
                config.paths.source_root = source_root.clone();
            }
            run_check(&config)
        }
    }
}

fn generate_docs(config: &AppConfig) -> Result<(), CliError> {
    let gateway = SourceGateway;
    let script_src = config.paths.script_src();
    let package_src = config.paths.package_src();

    info!(
        source_root = config.paths.source_root.display().to_string(),
        doc_root = config.paths.doc_root.display().to_string();
        "Generating documentation"
    );

    let packages = gateway.read_packages(&[package_src.clone()]);
    let scripts = gateway.read_scripts(&[script_src.clone()]);

    let exporter = OrgExporter;
    let manager = DocsManager::new(
        &config.paths.doc_root,
        &script_src,
        &package_src,
        exporter.extension(),
    );
    let mut generator = DocsGenerator::new(
        manager,
        &exporter,
        config.values.clone(),
        DocOptions {
            code_blocks: config.docs.code_blocks,
        },
    );

    let summary = generator.generate(&scripts, &packages);
    println!(
        "{} documents written, {} failed, {} stale removed",
        summary.written.len(),
        summary.failed,
        summary.removed
    );
    Ok(())
}

fn run_check(config: &AppConfig) -> Result<(), CliError> {
    let gateway = SourceGateway;
    let packages = gateway.read_packages(&[config.paths.package_src()]);
    let scripts = gateway.read_scripts(&[config.paths.script_src()]);

    let report = check::check(&scripts, &packages);
    for (uuid, paths) in &report.duplicate_uuids {
        println!("{} scripts share uuid \"{uuid}\":", paths.len());
        for path in paths {
            println!("  - {}", path.display());
        }
    }
    for (path, name) in &report.name_mismatches {
        println!("name \"{name}\" differs from file name: {}", path.display());
    }
    if report.is_clean() {
        println!("no inconsistencies found");
    }
    Ok(())
}
