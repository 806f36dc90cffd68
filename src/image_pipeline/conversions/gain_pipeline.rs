use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::image_pipeline::{
    common::constants::{GAIN_SCALE_MAX, GAIN_SCALE_MIN},
    common::error::{GainError, Result},
    conversions::timing::PipelineTimings,
    derive::{GainConfig, GainDerivation},
    gain_map::GainMap,
    normalize::normalize,
    pnm::{self, ImageReader, ImageWriter, PnmReader, PnmWriter, RasterImage},
    stats::{ImageStatistics, compute_stats},
};

/// `<base><suffix>`, appended to the full path as given.
pub fn artifact_path(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// What a pipeline run produced.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub reference_stats: ImageStatistics,
    pub derivation: Option<GainDerivation>,
    pub result_stats: Option<ImageStatistics>,
    pub timings: PipelineTimings,
}

pub struct GainMapPipeline<R: ImageReader, W: ImageWriter> {
    reader: R,
    writer: W,
    config: GainConfig,
}

impl GainMapPipeline<PnmReader, PnmWriter> {
    pub fn new(config: GainConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reader: PnmReader::new(config.channel_source),
            writer: PnmWriter,
            config,
        })
    }
}

impl<R: ImageReader, W: ImageWriter> GainMapPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: GainConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn read_image(&self, path: &Path) -> Result<RasterImage> {
        let _span = tracing::info_span!("read_image", path = %path.display()).entered();
        pnm::read_with(&self.reader, path)
    }

    fn write_image(&self, path: &Path, image: &RasterImage) -> Result<()> {
        let _span = tracing::info_span!("write_image", path = %path.display()).entered();
        pnm::write_with(&self.writer, path, image)
    }

    fn write_normalized(&self, path: &Path, image: &RasterImage) -> Result<()> {
        let normalized = normalize(image, self.config.endianness)?;
        self.write_image(path, &normalized)
    }

    /// Derives the gain map for the reference at `reference_path` and writes it
    /// to `gain_path`.
    ///
    /// With debug images enabled this also writes `<ref>_norm.ppm`,
    /// `<gain>_vis.ppm` and `<gain>_vis_norm.ppm`. When `result_path` is given
    /// the reference is corrected with the new map and written to
    /// `<result>.ppm` (plus `<result>_norm.ppm`).
    #[instrument(skip_all, fields(reference = %reference_path.as_ref().display()))]
    pub fn generate_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        reference_path: P,
        gain_path: Q,
        result_path: Option<&Path>,
    ) -> Result<PipelineReport> {
        let reference_path = reference_path.as_ref();
        let gain_path = gain_path.as_ref();
        let mut timings = PipelineTimings::new();

        info!(
            "Generating gain map: {} -> {}",
            reference_path.display(),
            gain_path.display()
        );

        let reference = timings.time("read_reference", || self.read_image(reference_path))?;

        if self.config.write_debug_images {
            timings.time("write_reference_norm", || {
                self.write_normalized(&artifact_path(reference_path, "_norm.ppm"), &reference)
            })?;
        }

        let reference_stats = timings.time("statistics", || compute_stats(&reference));
        info!("Input img: {}", reference_stats);

        let derivation = GainDerivation::plan(&reference_stats, &self.config)?;
        let gain = timings.time("fill_gain_map", || derivation.fill(&reference))?;

        timings.time("write_gain_map", || gain.encode(gain_path))?;

        if self.config.write_debug_images {
            timings.time("write_visualization", || -> Result<()> {
                let vis = gain.visualization()?;
                self.write_image(&artifact_path(gain_path, "_vis.ppm"), &vis)?;
                self.write_normalized(&artifact_path(gain_path, "_vis_norm.ppm"), &vis)
            })?;
        }

        let result_stats = match result_path {
            Some(result_path) => {
                let result = timings.time("apply_gain_map", || {
                    gain.apply(derivation.apply_offset(), derivation.reported_scale, &reference)
                })?;
                let stats = compute_stats(&result);
                info!("Result img: {}", stats);

                timings.time("write_result", || -> Result<()> {
                    self.write_image(&artifact_path(result_path, ".ppm"), &result)?;
                    if self.config.write_debug_images {
                        self.write_normalized(&artifact_path(result_path, "_norm.ppm"), &result)?;
                    }
                    Ok(())
                })?;
                Some(stats)
            }
            None => None,
        };

        timings.log_summary();
        info!(
            "Gain map complete: {}x{} in {:.3}ms",
            gain.width(),
            gain.height(),
            timings.total_duration().as_secs_f64() * 1000.0
        );

        Ok(PipelineReport {
            reference_stats,
            derivation: Some(derivation),
            result_stats,
            timings,
        })
    }

    /// Corrects the image at `image_path` with an existing raw gain map.
    ///
    /// The map is read with the image's dimensions; `offset_raw` and `scale`
    /// are the values the map was encoded with.
    #[instrument(skip_all, fields(image = %image_path.as_ref().display()))]
    pub fn apply_file<P: AsRef<Path>, Q: AsRef<Path>, O: AsRef<Path>>(
        &self,
        gain_path: P,
        image_path: Q,
        offset_raw: u8,
        scale: f64,
        output_path: O,
    ) -> Result<PipelineReport> {
        if !(GAIN_SCALE_MIN..=GAIN_SCALE_MAX).contains(&scale) {
            return Err(GainError::ConfigRange(format!(
                "gain scale {} outside {:.6}..={:.6}",
                scale, GAIN_SCALE_MIN, GAIN_SCALE_MAX
            )));
        }
        let mut timings = PipelineTimings::new();

        let image = timings.time("read_image", || self.read_image(image_path.as_ref()))?;
        let reference_stats = compute_stats(&image);
        info!("Input img: {}", reference_stats);

        let gain = timings.time("read_gain_map", || {
            GainMap::decode(gain_path.as_ref(), image.width(), image.height())
        })?;
        let result = timings.time("apply_gain_map", || gain.apply(offset_raw, scale, &image))?;
        let result_stats = compute_stats(&result);
        info!("Result img: {}", result_stats);

        timings.time("write_result", || self.write_image(output_path.as_ref(), &result))?;
        timings.log_summary();

        Ok(PipelineReport {
            reference_stats,
            derivation: None,
            result_stats: Some(result_stats),
            timings,
        })
    }

    pub fn config(&self) -> &GainConfig {
        &self.config
    }
}
