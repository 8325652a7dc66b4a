mod cli;
mod config;
mod errors;
mod processing;

use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::{
    Config,
    InputConfig,
    OutputConfig,
};

fn main() -> Result<(), errors::CliError> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        ) // This uses RUST_LOG environment variable
        .init();

    // Parse command line arguments
    let args = Cli::parse();

    // Load and parse configuration
    let conf = match std::fs::File::open(args.config.clone()) {
        Ok(x) => x,
        Err(e) => {
            return Err(errors::CliError::Io {
                source: e.to_string(),
                path: Some(args.config.to_string_lossy().to_string()),
            });
        }
    };
    let config: Result<Config, _> = serde_json::from_reader(conf);
    let mut config = match config {
        Ok(x) => x,
        Err(e) => {
            return Err(errors::CliError::ParseError { msg: e.to_string() });
        }
    };

    // Override config with command line arguments if provided
    if let Some(spectra_file) = args.spectra_file {
        config.input = Some(InputConfig::Spectra { path: spectra_file });
    }
    if let Some(output_dir) = args.output_dir {
        config.output = Some(OutputConfig {
            directory: output_dir,
        });
    }
    let input = match config.input {
        Some(InputConfig::Spectra { ref path }) => path.clone(),
        None => {
            return Err(errors::CliError::Config {
                source: "No input provided, please provide one in either the config file or with the --spectra-file flag".to_string(),
            });
        }
    };
    let output_config = match config.output {
        Some(ref x) => x.clone(),
        None => {
            return Err(errors::CliError::Config {
                source: "No output directory provided, please provide one in either the config file or with the --output-dir flag".to_string(),
            });
        }
    };
    info!("Parsed configuration: {:#?}", config.clone());

    // Create output directory
    if let Err(e) = std::fs::create_dir_all(&output_config.directory) {
        return Err(errors::CliError::Io {
            source: e.to_string(),
            path: Some(output_config.directory.to_string_lossy().to_string()),
        });
    }

    let (groups, skipped) = processing::load_groups(&input)?;
    info!(
        "Loaded {} groups from {} ({} skipped as malformed)",
        groups.len(),
        input.display(),
        skipped.len()
    );

    processing::main_loop(
        groups,
        skipped,
        &config.analysis.pipeline,
        config.analysis.chunk_size,
        &output_config,
    )
}
