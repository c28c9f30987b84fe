use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use log::info;
use rayon::ThreadPoolBuilder;
use vcffuse::{cli::Cli, io::{bed, json::EnsemblJsonCache}};

fn main() -> Result<()> {
    // Initialize the logger. If the log level is not set via `RUST_LOG`,
    // set it to 'info' by default
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Cli::parse();

    ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build_global()?;

    info!("Reading gene models from {}", config.annotations);
    let source = EnsemblJsonCache::new(&config.annotations);
    let fusions = vcffuse::run(&config.vcf, &source)?;

    let pictures = vcffuse::write_pictures(&fusions, &config.svg)?;
    info!("Wrote {} fusion pictures", pictures.len());

    if let Some(bed_path) = &config.bed {
        bed::write_layouts(bed_path, &fusions)?;
    }

    Ok(())
}
