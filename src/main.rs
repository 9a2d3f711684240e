use anyhow::Result;
use clap::Parser;
use employee_photo_bundler::config::{AppConfig, OutputLayout};
use employee_photo_bundler::fetcher::Fetcher;
use employee_photo_bundler::pipeline;
use employee_photo_bundler::roster;
use log::info;
use std::process::ExitCode;

/// Downloads the sample employee headshots and bundles them into employee_photos.zip.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let _cli = Cli::parse();
    let config = AppConfig::new()?;

    // Initialize env_logger based on config.log_level
    env_logger::Builder::new()
        .filter_level(config.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    info!("Starting employee-photo-bundler");

    let rule = "=".repeat(60);
    println!("{}", rule);
    println!("HR ID Card Generator - Sample Image Downloader");
    println!("{}", rule);
    println!();

    let job = async {
        let records = roster::sample_roster()?;
        let fetcher = Fetcher::new(&config)?;
        pipeline::run(&fetcher, &records, &OutputLayout::default()).await
    };

    let status = tokio::select! {
        result = job => pipeline::report(&result),
        _ = pipeline::interrupted(tokio::signal::ctrl_c()) => pipeline::report_interrupted(),
    };

    info!("employee-photo-bundler finished");

    Ok(status.into())
}
