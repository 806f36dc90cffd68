use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use xform_gain_rs::image_pipeline::{ChannelSource, GainConfig, GainMapPipeline, PipelineReport};
use xform_gain_rs::logger;

use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "generate and apply flat-field gain maps for PNM sensor images")]
struct Args {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Take the channel count from the P5/P6 marker instead of the payload size
    #[arg(long, global = true)]
    strict_channels: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive a gain map from a reference image
    Generate {
        /// Gain offset in raw units (0 to 255), picked automatically if omitted.
        #[arg(short, long)]
        offset: Option<u32>,

        /// Gain scale (0.000061 to 15.999756), picked automatically if omitted.
        /// Note that it scales the offset as well.
        #[arg(short, long)]
        scale: Option<f64>,

        /// Skip the _norm / _vis inspection images
        #[arg(long)]
        no_debug_images: bool,

        reference: PathBuf,
        gain_map: PathBuf,
        /// Correct the reference with the new map and write it as <result>.ppm
        result: Option<PathBuf>,
    },
    /// Correct an image with an existing gain map
    Apply {
        #[arg(short, long)]
        offset: u8,

        #[arg(short, long)]
        scale: f64,

        gain_map: PathBuf,
        image: PathBuf,
        output: PathBuf,
    },
}

fn log_slowest_step(report: &PipelineReport) {
    if let Some(step) = report.timings.slowest() {
        debug!("Slowest step: {} ({:.3}ms)", step.name, step.duration.as_secs_f64() * 1000.0);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(if args.verbose { "debug" } else { "info" });

    let channel_source = if args.strict_channels {
        ChannelSource::Marker
    } else {
        ChannelSource::PayloadSize
    };

    match args.command {
        Command::Generate { offset, scale, no_debug_images, reference, gain_map, result } => {
            let config = GainConfig::builder()
                .offset(offset)
                .scale(scale)
                .channel_source(channel_source)
                .write_debug_images(!no_debug_images)
                .build();
            let pipeline = GainMapPipeline::new(config).context("invalid gain parameters")?;

            let report = pipeline
                .generate_file(&reference, &gain_map, result.as_deref())
                .with_context(|| format!("could not generate gain map from {}", reference.display()))?;

            log_slowest_step(&report);
            if let Some(derivation) = report.derivation {
                info!(
                    "Wrote {} (offset={} scale={:.6} raw={})",
                    gain_map.display(),
                    derivation.offset_raw,
                    derivation.reported_scale,
                    derivation.scale_raw()
                );
            }
        }
        Command::Apply { offset, scale, gain_map, image, output } => {
            let config = GainConfig::builder().channel_source(channel_source).build();
            let pipeline = GainMapPipeline::new(config)?;

            let report = pipeline
                .apply_file(&gain_map, &image, offset, scale, &output)
                .with_context(|| format!("could not apply {} to {}", gain_map.display(), image.display()))?;

            log_slowest_step(&report);
            info!("Wrote {}", output.display());
        }
    }

    Ok(())
}
