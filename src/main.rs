use std::path::PathBuf;
use std::process::ExitCode;

use argh::FromArgs;
use bytesize::ByteSize;
use zengray::pipeline::{self, Mode, PipelineConfig};
use zengray::{Limits, Unstoppable};

#[derive(FromArgs, Debug)]
/// Convert a 24-bit BMP to 8-bit grayscale and rotate or blur it
struct Cli {
    /// input 24-bit BMP file
    #[argh(positional)]
    input: PathBuf,

    /// output BMP file (output directory for mode `all`)
    #[argh(positional)]
    output: PathBuf,

    /// rotate_cw, rotate_ccw, filter, or all
    #[argh(positional)]
    mode: Mode,

    /// worker threads per pass [default: CPU count]
    #[argh(option)]
    threads: Option<usize>,

    /// reject inputs with more pixels than this
    #[argh(option)]
    max_pixels: Option<u64>,

    /// reject inputs whose grayscale buffer exceeds this many bytes
    #[argh(option)]
    max_memory: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli: Cli = argh::from_env();

    let mut config = PipelineConfig {
        limits: Limits {
            max_pixels: cli.max_pixels,
            max_memory_bytes: cli.max_memory,
            ..Limits::default()
        },
        ..PipelineConfig::default()
    };
    if let Some(threads) = cli.threads {
        config.threads = threads;
    }

    match pipeline::run(&cli.input, &cli.output, cli.mode, &config, Unstoppable) {
        Ok(report) => {
            for timing in &report.stages {
                println!("{} took {} ms", timing.stage, timing.elapsed.as_millis());
            }
            println!(
                "Memory allocated for loading the image: {} ({}x{})",
                ByteSize::b(report.memory_bytes as u64),
                report.width,
                report.height
            );
            for path in &report.outputs {
                println!("Wrote {}", path.display());
            }
            println!("Processing complete in {:.2?}", report.total());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
