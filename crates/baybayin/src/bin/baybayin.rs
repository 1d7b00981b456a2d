//! `baybayin` command line tool.
//!
//! ```bash
//! # normalize an image and save the 64x64 classifier input
//! baybayin preprocess --input ka.jpg --output ka_norm.png
//!
//! # classify a canvas export with an ONNX model (feature `onnx`)
//! baybayin classify --input drawing.png --canvas --model baybayin.onnx --top 5
//!
//! # list labels, dump the default configuration
//! baybayin labels
//! baybayin config --output pipeline.json
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use baybayin::classifier::LabelTable;
use baybayin::preprocess::preprocess_detailed;
use baybayin::source::{load_raster, SourceKind};
use baybayin::PipelineConfig;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(name = "baybayin", version, about = "Baybayin character normalization and recognition")]
struct Cli {
    /// Log every pipeline decision.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize an image and write the classifier input as PNG.
    Preprocess {
        #[command(flatten)]
        source: SourceArgs,
        /// Output PNG path.
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Classify a character image (requires the `onnx` feature).
    Classify {
        #[command(flatten)]
        source: SourceArgs,
        /// ONNX model file.
        #[arg(short, long)]
        model: PathBuf,
        /// Number of predictions to print.
        #[arg(short, long, default_value_t = 5)]
        top: usize,
        /// Write a JSON report here.
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Print the class labels with their output indices.
    Labels,
    /// Write the default pipeline configuration as JSON.
    Config {
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Input image file.
    #[arg(short, long)]
    input: PathBuf,
    /// Pipeline configuration JSON; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Treat the input as a drawing-canvas export with transparent background.
    #[arg(long)]
    canvas: bool,
}

impl SourceArgs {
    fn kind(&self) -> SourceKind {
        if self.canvas {
            SourceKind::Canvas
        } else {
            SourceKind::Upload
        }
    }

    fn pipeline_config(&self) -> CliResult<PipelineConfig> {
        match &self.config {
            Some(path) => Ok(PipelineConfig::load_json(path)?),
            None => Ok(PipelineConfig::default()),
        }
    }
}

fn init_logging(verbose: bool) {
    #[cfg(feature = "tracing")]
    {
        let _ = verbose;
        let _ = tracing_log::LogTracer::init();
        baybayin::core::init_tracing(false);
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = baybayin::core::init_with_level(baybayin::core::level_from_env(verbose));
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> CliResult<()> {
    match command {
        Command::Preprocess { source, output } => run_preprocess(&source, &output),
        Command::Classify {
            source,
            model,
            top,
            report,
        } => run_classify(&source, &model, top, report.as_deref()),
        Command::Labels => {
            for (index, label) in LabelTable::baybayin().iter() {
                println!("{index:>2} {label}");
            }
            Ok(())
        }
        Command::Config { output } => {
            PipelineConfig::default().write_json(&output)?;
            println!("wrote {}", output.display());
            Ok(())
        }
    }
}

fn run_preprocess(source: &SourceArgs, output: &Path) -> CliResult<()> {
    let cfg = source.pipeline_config()?;
    let raster = load_raster(&source.input, source.kind())?;
    let processed = preprocess_detailed(&raster, &cfg)?;

    let img = baybayin::to_image_gray(&processed.tensor.to_gray_image())
        .ok_or("tensor image has inconsistent dimensions")?;
    img.save(output)?;

    let s = &processed.summary;
    println!(
        "wrote {} ({}x{}, otsu={}, inverted={}, thinned={})",
        output.display(),
        img.width(),
        img.height(),
        s.otsu_threshold,
        s.inverted,
        s.thinned
    );
    Ok(())
}

#[cfg(feature = "onnx")]
fn run_classify(source: &SourceArgs, model: &Path, top: usize, report: Option<&Path>) -> CliResult<()> {
    use std::sync::Arc;

    use baybayin::classifier::{ModelHandle, OnnxClassifier, Recognizer};
    use baybayin::io::RecognitionReport;

    let cfg = source.pipeline_config()?;
    let handle = Arc::new(ModelHandle::load(|| OnnxClassifier::load(model)));
    let recognizer = Recognizer::new(cfg, handle)?;

    let raster = load_raster(&source.input, source.kind())?;
    let result = recognizer.recognize(&raster, top)?;

    if let Some(best) = result.best() {
        println!(
            "Predicted Character: {} ({:.2}%)",
            best.label,
            best.confidence_percent()
        );
    }
    for p in &result.top {
        println!("{:>2}. {:<8} {:>6.2}%", p.rank, p.label, p.confidence_percent());
    }

    if let Some(path) = report {
        RecognitionReport::new(
            source.input.display().to_string(),
            source.canvas,
            recognizer.config(),
            &result,
        )
        .write_json(path)?;
    }
    Ok(())
}

#[cfg(not(feature = "onnx"))]
fn run_classify(_: &SourceArgs, _: &Path, _: usize, _: Option<&Path>) -> CliResult<()> {
    Err("classification needs a build with the `onnx` feature".into())
}
