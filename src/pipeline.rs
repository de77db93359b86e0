//! Decode → transform → encode orchestration with per-stage timing.
//!
//! Stages run strictly one after another; parallelism only exists inside a
//! stage. Every intermediate buffer is dropped as soon as its last consumer
//! has run.

use core::fmt;
use core::str::FromStr;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use enough::Stop;

use crate::decode::read_file;
use crate::encode::write_file;
use crate::error::BmpError;
use crate::filter::gaussian_blur_with_threads;
use crate::image::GrayImage;
use crate::limits::Limits;
use crate::parallel::num_threads;
use crate::transform::{rotate_clockwise_with_threads, rotate_counterclockwise_with_threads};

/// File names written by [`Mode::All`] inside the output directory.
pub const CLOCKWISE_FILE: &str = "output_clockwise.bmp";
pub const COUNTERCLOCKWISE_FILE: &str = "output_counterclockwise.bmp";
pub const FILTERED_FILE: &str = "output_filtered.bmp";

/// What to do with the decoded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Rotate 90° clockwise.
    RotateCw,
    /// Rotate 90° counterclockwise.
    RotateCcw,
    /// Gaussian blur.
    Filter,
    /// Both rotations plus a blur of the clockwise result, written into a
    /// directory.
    All,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rotate_cw" | "cw" => Ok(Mode::RotateCw),
            "rotate_ccw" | "ccw" => Ok(Mode::RotateCcw),
            "filter" | "blur" => Ok(Mode::Filter),
            "all" => Ok(Mode::All),
            _ => Err(format!(
                "Invalid mode: {s}. Valid modes are: rotate_cw, rotate_ccw, filter, all"
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::RotateCw => "rotate_cw",
            Mode::RotateCcw => "rotate_ccw",
            Mode::Filter => "filter",
            Mode::All => "all",
        })
    }
}

/// A timed unit of pipeline work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// File read plus header parse and grayscale conversion.
    Decode,
    RotateCw,
    RotateCcw,
    Filter,
    /// BMP encode plus file write.
    Encode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Decode => "Grayscale conversion",
            Stage::RotateCw => "Clockwise rotation",
            Stage::RotateCcw => "Counterclockwise rotation",
            Stage::Filter => "Gaussian filtering",
            Stage::Encode => "Encoding",
        })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct StageTiming {
    pub stage: Stage,
    pub elapsed: Duration,
}

/// Pipeline configuration.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Worker threads per parallel pass.
    pub threads: usize,
    pub limits: Limits,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threads: num_threads(),
            limits: Limits::default(),
        }
    }
}

/// Outcome of a successful [`run`].
#[derive(Clone, Debug)]
pub struct PipelineReport {
    /// Decoded input dimensions.
    pub width: u32,
    pub height: u32,
    /// Bytes held by the decoded grayscale buffer.
    pub memory_bytes: usize,
    pub stages: Vec<StageTiming>,
    pub outputs: Vec<PathBuf>,
}

impl PipelineReport {
    /// Total time across all stages.
    pub fn total(&self) -> Duration {
        self.stages.iter().map(|s| s.elapsed).sum()
    }
}

#[derive(Clone, Copy)]
enum Transform {
    RotateCw,
    RotateCcw,
    Filter,
}

impl Transform {
    fn stage(self) -> Stage {
        match self {
            Transform::RotateCw => Stage::RotateCw,
            Transform::RotateCcw => Stage::RotateCcw,
            Transform::Filter => Stage::Filter,
        }
    }

    fn apply(self, image: &GrayImage, threads: usize) -> GrayImage {
        match self {
            Transform::RotateCw => rotate_clockwise_with_threads(image, threads),
            Transform::RotateCcw => rotate_counterclockwise_with_threads(image, threads),
            Transform::Filter => gaussian_blur_with_threads(image, threads),
        }
    }
}

struct Runner<'a> {
    config: &'a PipelineConfig,
    stop: &'a dyn Stop,
    stages: Vec<StageTiming>,
    outputs: Vec<PathBuf>,
}

impl Runner<'_> {
    fn timed<T>(
        &mut self,
        stage: Stage,
        f: impl FnOnce() -> Result<T, BmpError>,
    ) -> Result<T, BmpError> {
        self.stop.check()?;
        let start = Instant::now();
        let out = f()?;
        let elapsed = start.elapsed();
        log::info!("{stage} took {} ms", elapsed.as_millis());
        self.stages.push(StageTiming { stage, elapsed });
        Ok(out)
    }

    fn transform(&mut self, op: Transform, image: &GrayImage) -> Result<GrayImage, BmpError> {
        let threads = self.config.threads;
        self.timed(op.stage(), || Ok(op.apply(image, threads)))
    }

    fn save(&mut self, path: PathBuf, image: &GrayImage) -> Result<(), BmpError> {
        let stop = self.stop;
        self.timed(Stage::Encode, || {
            let bytes = crate::bmp::encode(image, stop)?;
            write_file(&path, &bytes)
        })?;
        self.outputs.push(path);
        Ok(())
    }
}

/// Decode `input`, apply `mode`, and write the result to `output`.
///
/// For [`Mode::All`], `output` is a directory (created if missing) that
/// receives [`CLOCKWISE_FILE`], [`COUNTERCLOCKWISE_FILE`] and
/// [`FILTERED_FILE`]; the filtered image is the blur of the clockwise
/// rotation.
pub fn run(
    input: &Path,
    output: &Path,
    mode: Mode,
    config: &PipelineConfig,
    stop: impl Stop,
) -> Result<PipelineReport, BmpError> {
    log::debug!(
        "pipeline: {} -> {} ({mode}, {} threads)",
        input.display(),
        output.display(),
        config.threads
    );
    let stop: &dyn Stop = &stop;
    let mut runner = Runner {
        config,
        stop,
        stages: Vec::new(),
        outputs: Vec::new(),
    };

    let gray = runner.timed(Stage::Decode, || {
        let data = read_file(input)?;
        crate::bmp::decode(&data, Some(&config.limits), config.threads, stop)
    })?;
    let (width, height, memory_bytes) = (gray.width(), gray.height(), gray.memory_bytes());
    log::info!("Memory allocated for loading the image: {memory_bytes} bytes");

    match mode {
        Mode::RotateCw | Mode::RotateCcw | Mode::Filter => {
            let op = match mode {
                Mode::RotateCw => Transform::RotateCw,
                Mode::RotateCcw => Transform::RotateCcw,
                _ => Transform::Filter,
            };
            let result = runner.transform(op, &gray)?;
            drop(gray);
            runner.save(output.to_path_buf(), &result)?;
        }
        Mode::All => {
            std::fs::create_dir_all(output).map_err(|source| BmpError::FileOpen {
                path: output.to_path_buf(),
                source,
            })?;

            let clockwise = runner.transform(Transform::RotateCw, &gray)?;
            runner.save(output.join(CLOCKWISE_FILE), &clockwise)?;

            let counterclockwise = runner.transform(Transform::RotateCcw, &gray)?;
            drop(gray);
            runner.save(output.join(COUNTERCLOCKWISE_FILE), &counterclockwise)?;
            drop(counterclockwise);

            let filtered = runner.transform(Transform::Filter, &clockwise)?;
            drop(clockwise);
            runner.save(output.join(FILTERED_FILE), &filtered)?;
        }
    }

    Ok(PipelineReport {
        width,
        height,
        memory_bytes,
        stages: runner.stages,
        outputs: runner.outputs,
    })
}
