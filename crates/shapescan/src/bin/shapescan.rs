use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, ArgGroup, Parser};
use log::LevelFilter;

use shapescan::sink::{CsvLogSink, DetectionSink, NullSink};
use shapescan::{
    init_with_level, CameraOptions, DetectorConfig, Error, FrameSource, ShapeDetector, Source,
};

#[derive(Parser, Debug)]
#[command(name = "shapescan", version)]
#[command(about = "Detect and classify geometric shapes from a camera or still image")]
#[command(group(ArgGroup::new("input").required(true).args(["image", "camera"])))]
struct Args {
    /// Still image to process once.
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,

    /// Camera device index to stream from (requires the `camera` feature).
    #[arg(long, value_name = "INDEX")]
    camera: Option<u32>,

    /// Explicit camera device node, overriding the index.
    #[arg(long, value_name = "PATH", requires = "camera")]
    device: Option<PathBuf>,

    /// JSON pipeline configuration; missing fields keep their defaults.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the annotated frame here (last frame in camera mode).
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Append per-detection CSV rows under this directory.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Stop after this many camera frames (0 = run until read failure).
    #[arg(long, value_name = "N", default_value_t = 0)]
    frames: u64,

    /// Print the final count summary as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = init_with_level(level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let config = match &args.config {
        Some(path) => DetectorConfig::from_json_file(path)?,
        None => DetectorConfig::default(),
    };
    let detector = ShapeDetector::new(config)?;

    let source = match (&args.image, args.camera) {
        (Some(path), _) => Source::Image { path: path.clone() },
        (None, Some(index)) => Source::Camera { index },
        // clap's required input group rules this out.
        (None, None) => unreachable!("input group requires --image or --camera"),
    };
    let options = CameraOptions {
        device_path: args.device.clone(),
    };
    let mut frames = FrameSource::open(&source, &options)?;

    let mut sink: Box<dyn DetectionSink> = match &args.log_dir {
        Some(dir) => Box::new(CsvLogSink::create(dir).map_err(|source| Error::LogSink {
            dir: dir.clone(),
            source,
        })?),
        None => Box::new(NullSink),
    };

    let mut cycles = 0u64;
    loop {
        let mut frame = frames.next_frame()?;
        let result = detector.process(&mut frame, sink.as_mut())?;

        if args.json {
            println!("{}", serde_json::to_string(&result.counts).unwrap_or_default());
        } else {
            println!("{}", result.summary());
        }

        cycles += 1;
        let done = !frames.is_live() || (args.frames > 0 && cycles >= args.frames);
        if done {
            if let Some(out) = &args.out {
                frame
                    .image()
                    .save(out)
                    .map_err(|source| Error::OutputImage {
                        path: out.clone(),
                        source,
                    })?;
                log::info!("wrote annotated frame to {}", out.display());
            }
            break;
        }
    }

    frames.release();
    Ok(())
}
