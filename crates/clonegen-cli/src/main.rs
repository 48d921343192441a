use clap::Parser;
use clonegen_clang::load_frontend;
use clonegen_config::RunConfig;
use clonegen_driver::Driver;
use miette::{miette, Result};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clonegen")]
#[command(author, version, about = "Auto-generate _cloneFrom source code from C++ headers")]
struct Cli {
    /// Run configuration file
    #[arg(short, long, default_value = "clonegen.toml")]
    config: PathBuf,

    /// Add directory to include search path
    #[arg(short = 'I', long = "include-directory")]
    include_directory: Vec<PathBuf>,

    /// Set the libclang shared library (libclang.so or libclang.dll)
    #[arg(short, long)]
    library: Option<PathBuf>,

    /// Override the output path from the configuration
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    let mut config = RunConfig::from_file(&cli.config)
        .map_err(|e| miette!("{}: {}", cli.config.display(), e))?;
    config.generator.include_dirs.extend(cli.include_directory);
    if let Some(library) = cli.library {
        config.generator.library = Some(library);
    }
    if let Some(output) = cli.output {
        config.generator.output = output;
    }
    config.validate().map_err(|e| miette!("{}", e))?;

    // The frontend must be usable before any class is processed.
    load_frontend(config.generator.library.as_deref())?;

    let requested = config.classes.len();
    let report = Driver::new(config).run()?;

    if !report.failures.is_empty() {
        for (class, error) in &report.failures {
            eprintln!("{}: {}", class, error);
        }
        return Err(miette!(
            "{} of {} classes failed",
            report.failures.len(),
            requested
        ));
    }

    Ok(())
}
