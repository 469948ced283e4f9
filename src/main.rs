//! Pixelsmith - a self-hosted image pixelation and color palette studio
//!
//! Upload an image and get back mosaic renditions at several block sizes,
//! each with its dominant-color palette.

#![allow(dead_code)]

mod api;
mod config;
mod core;
mod error;
mod models;
mod serializers;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Pixelsmith - image pixelation studio
#[derive(Parser, Debug)]
#[command(name = "pixelsmith")]
#[command(version = "0.1.0")]
#[command(about = "A self-hosted image pixelation and color palette studio")]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 1989)]
    port: u16,

    /// Enable debug mode
    #[arg(long)]
    debug: bool,

    /// Path to config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the extended block-size list
    #[arg(long)]
    extended: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // initialize logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::new(log_level);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("Pixelsmith v0.1.0 starting...");

    // Initialize paths and settings
    let paths = config::Paths::init(args.config)?;
    info!("Config directory: {:?}", paths.config_dir());

    let settings = config::UserConfig::global();
    if args.extended {
        settings.write().block_sizes = config::EXTENDED_BLOCK_SIZES.to_vec();
    }
    {
        let settings = settings.read();
        settings.validate()?;
        info!("Block sizes: {:?}", settings.block_sizes);
    }

    // Start the server
    let addr = format!("{}:{}", args.host, args.port);
    info!("Server listening on http://{}", addr);

    use actix_cors::Cors;
    use actix_web::{middleware, App, HttpServer};

    HttpServer::new(|| {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(api::configure)
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
