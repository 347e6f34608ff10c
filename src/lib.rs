//! Quickdigit: sketch a digit, ask a remote model what it is.
//!
//! The crate has two halves. A [`surface::DrawingSurface`] turns pointer
//! events into strokes on a fixed 28×28 raster. An
//! [`inference::InferenceClient`] snapshots that raster as a PNG data URI,
//! posts it to a classification endpoint and folds the answer into a
//! [`inference::PredictionResult`].
//!
//! # Modules
//!
//! - [`surface`]: pixel buffer, coordinate mapping and stroke rendering
//! - [`inference`]: encoding, transport and response interpretation
//! - [`session`]: recorded pointer sessions, replayed by the CLI
//! - [`config`]: surface and client settings with their defaults
//! - [`error`]: error types for quickdigit operations

pub mod config;
pub mod error;
pub mod inference;
pub mod session;
pub mod surface;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use image::ImageFormat;
use log::info;

pub use error::QuickdigitError;

use config::{ClientConfig, SurfaceConfig};
use inference::{InferenceClient, ResultPanel};
use surface::DrawingSurface;

/// The quickdigit CLI application.
#[derive(Parser)]
#[command(name = "quickdigit")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Replay a pointer session and write the sketch as PNG.
    Draw(DrawArgs),
    /// Replay a pointer session and print the PNG data URI that would be sent.
    Encode(EncodeArgs),
    /// Replay a pointer session and ask the classifier which digit it is.
    Predict(PredictArgs),
}

/// Raster options shared by every subcommand.
#[derive(clap::Args)]
struct SurfaceArgs {
    /// Pointer session file (JSON).
    session: PathBuf,

    /// Side length of the square raster, in cells.
    #[arg(long, default_value_t = config::DEFAULT_SIDE)]
    size: u32,
}

/// Arguments for the draw subcommand.
#[derive(clap::Args)]
struct DrawArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Where to write the PNG.
    #[arg(short, long)]
    output: PathBuf,

    /// Magnify each cell into a scale×scale block (pixelated, no smoothing).
    #[arg(long, default_value_t = 1)]
    scale: u32,
}

/// Arguments for the encode subcommand.
#[derive(clap::Args)]
struct EncodeArgs {
    #[command(flatten)]
    surface: SurfaceArgs,
}

/// Arguments for the predict subcommand.
#[derive(clap::Args)]
struct PredictArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Classification endpoint to POST the sketch to.
    #[arg(long, env = config::ENDPOINT_ENV, default_value = config::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Give up on the exchange after this many seconds (default: wait).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Output format for the result ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the quickdigit CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), QuickdigitError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Draw(args)) => run_draw(args),
        Some(Commands::Encode(args)) => run_encode(args),
        Some(Commands::Predict(args)) => run_predict(args),
        None => {
            println!("quickdigit {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Sketch a digit and let a remote model guess it.");
            println!();
            println!("Run 'quickdigit --help' for usage information.");
            Ok(())
        }
    }
}

/// Builds a surface of the requested size and replays the session into it.
fn sketch_from_session(args: &SurfaceArgs) -> Result<DrawingSurface, QuickdigitError> {
    let session = session::read_session(&args.session)?;
    let mut surface = DrawingSurface::new(SurfaceConfig::with_side(args.size))?;
    let summary = session.replay(&mut surface);
    info!(
        "replayed {} event(s) from {}: {} stroke(s)",
        summary.events,
        args.session.display(),
        summary.strokes
    );
    Ok(surface)
}

/// Execute the draw subcommand.
fn run_draw(args: DrawArgs) -> Result<(), QuickdigitError> {
    let surface = sketch_from_session(&args.surface)?;
    let image = if args.scale == 1 {
        surface.buffer().as_image().clone()
    } else {
        surface.render_display(args.scale)?
    };
    write_png(&image, &args.output)?;
    println!(
        "Wrote {}x{} sketch to {}",
        image.width(),
        image.height(),
        args.output.display()
    );
    Ok(())
}

fn write_png(image: &image::GrayImage, path: &Path) -> Result<(), QuickdigitError> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| QuickdigitError::ImageWrite {
            path: path.to_path_buf(),
            source,
        })
}

/// Execute the encode subcommand.
fn run_encode(args: EncodeArgs) -> Result<(), QuickdigitError> {
    let surface = sketch_from_session(&args.surface)?;
    println!("{}", inference::encode::to_data_uri(surface.buffer())?);
    Ok(())
}

/// Execute the predict subcommand.
fn run_predict(args: PredictArgs) -> Result<(), QuickdigitError> {
    if !matches!(args.output.as_str(), "text" | "json") {
        return Err(QuickdigitError::UnsupportedFormat(format!(
            "'{}' (supported: text, json)",
            args.output
        )));
    }

    let surface = sketch_from_session(&args.surface)?;
    let config =
        ClientConfig::new(args.endpoint).with_timeout(args.timeout_secs.map(Duration::from_secs));
    let client = InferenceClient::new(config);

    let mut panel = ResultPanel::default();
    panel.start();
    info!("posting sketch to {}", client.endpoint());
    if args.output == "text" {
        eprintln!("{}", panel);
    }
    let result = client.predict(surface.buffer());
    panel.finish(result.clone());

    match args.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&result)
                .map_err(|source| QuickdigitError::ResultSerialize { source })?;
            println!("{}", json);
        }
        _ => println!("{}", panel),
    }

    match result.error_message() {
        Some(message) => Err(QuickdigitError::PredictionFailed {
            message: message.to_string(),
        }),
        None => Ok(()),
    }
}
