use clap::Parser;
use img2eq::batch::{self, BatchItem};
use img2eq::render::RenderOptions;
use img2eq::{NumberFormat, PipelineConfig, ScaleMode, ThresholdMethod};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "img2eq", about = "Bitmap image to parametric bezier equations")]
struct Cli {
    /// Input image (PNG, JPEG, BMP) or a directory of images
    #[arg(short, long)]
    input: PathBuf,

    /// Directory for <name>.json equation lists
    #[arg(long, default_value = "segments")]
    json_dir: PathBuf,

    /// Directory for <name>.png previews
    #[arg(long, default_value = "previews")]
    preview_dir: PathBuf,

    /// JSON preset; flags given on the command line override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed brightness threshold (0-255); darker pixels are traced
    #[arg(long, conflicts_with = "otsu")]
    threshold: Option<u8>,

    /// Pick the threshold automatically (Otsu)
    #[arg(long)]
    otsu: bool,

    /// Invert the image before tracing
    #[arg(long)]
    invert: bool,

    /// Minimum chord length in normalized units (inclusive)
    #[arg(long)]
    min_length: Option<f64>,

    /// Maximum chord length in normalized units (inclusive)
    #[arg(long)]
    max_length: Option<f64>,

    /// Decimal places in equations (full precision if omitted)
    #[arg(long)]
    precision: Option<usize>,

    /// Divide coordinates by the average traced extent before centering
    #[arg(long)]
    normalize_scale: bool,

    /// Corner threshold (0.0–1.334). Lower = more corners.
    #[arg(long)]
    alphamax: Option<f64>,

    /// Suppress speckles enclosing up to this many pixels
    #[arg(long)]
    turd_size: Option<usize>,
}

impl Cli {
    fn to_config(&self) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            None => PipelineConfig::default(),
        };
        if let Some(t) = self.threshold {
            config.threshold = ThresholdMethod::Fixed(t);
        }
        if self.otsu {
            config.threshold = ThresholdMethod::Otsu;
        }
        if self.invert {
            config.invert = true;
        }
        if let Some(v) = self.min_length {
            config.filter.min_length = v;
        }
        if let Some(v) = self.max_length {
            config.filter.max_length = v;
        }
        if let Some(digits) = self.precision {
            config.number_format = NumberFormat::Fixed(digits);
        }
        if self.normalize_scale {
            config.scale = ScaleMode::AverageExtent;
        }
        if let Some(v) = self.alphamax {
            config.trace.alphamax = v;
        }
        if let Some(v) = self.turd_size {
            config.trace.turd_size = v;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = cli.to_config()?;

    let sources = if cli.input.is_dir() {
        batch::list_images(&cli.input)?
    } else {
        vec![cli.input.clone()]
    };
    log::info!("img2eq v{} \u{00b7} {} image(s)", env!("CARGO_PKG_VERSION"), sources.len());

    let items = batch::process_all(&sources, &config);
    let results = batch::export_all(&items, &cli.json_dir, &cli.preview_dir, &RenderOptions::default());
    let names = batch::output_names(&items);

    eprintln!();
    let mut failed = 0usize;
    for ((item, name), result) in items.iter().zip(&names).zip(&results) {
        match result {
            Ok(()) => eprintln!("  {} {}  {} curves", status_mark(item), name, item.curves.len()),
            Err(e) => {
                failed += 1;
                eprintln!("  \u{2717} {}  {}", name, e);
            }
        }
    }
    eprintln!();
    eprintln!("  JSON        {}", cli.json_dir.display());
    eprintln!("  Previews    {}", cli.preview_dir.display());
    eprintln!();

    if failed > 0 {
        return Err(format!("{} of {} image(s) failed to export", failed, items.len()).into());
    }
    Ok(())
}

/// Empty results are valid (blank or unreadable input) but worth flagging.
fn status_mark(item: &BatchItem) -> &'static str {
    if item.curves.is_empty() {
        "\u{00b7}"
    } else {
        "\u{2713}"
    }
}
