use clap::Parser;
use makedeps_core::{enter_project_root, update_dependencies, DepsConfig};
use miette::Result;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "makedeps")]
#[command(
    author,
    version,
    about = "Regenerates makefile header-dependency lists from #include directives"
)]
struct Cli {
    /// Configuration file to load instead of probing for makedeps.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .build(),
        )
    }))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => DepsConfig::from_file(path)?,
        None => {
            let cwd = std::env::current_dir()
                .map_err(|e| miette::miette!("Failed to determine working directory: {}", e))?;
            DepsConfig::discover(&cwd)?
        }
    };

    let root = enter_project_root(&config)?;
    tracing::debug!("project root: {}", root.display());

    let summary = update_dependencies(&root, &config)?;
    println!(
        "Updated {}: {} dependency lines for {} source files",
        summary.makefile.display(),
        summary.lines,
        summary.sources
    );

    Ok(())
}
