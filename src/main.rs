use clap::{Parser, Subcommand};
use std::path::PathBuf;
use webscale::config::{self, ConfigOverrides};
use webscale::imaging::{ImageBackend, RustBackend, count_unique_colors};
use webscale::{batch, output};

/// Flags for the convert command. Unset values fall back to the config file,
/// then to the stock defaults.
#[derive(clap::Args)]
struct ConvertArgs {
    /// Source directory (searched recursively)
    input: PathBuf,

    /// Destination directory (mirrors the source tree)
    output: PathBuf,

    /// Scale factor applied to both axes [default: 0.5]
    #[arg(long, allow_negative_numbers = true)]
    scale: Option<f64>,

    /// Width at which an image counts as high-resolution [default: 1600]
    #[arg(long)]
    min_width: Option<u32>,

    /// Height at which an image counts as high-resolution [default: 1200]
    #[arg(long)]
    min_height: Option<u32>,

    /// JPEG quality for opaque images, 1-100 [default: 90]
    #[arg(long)]
    quality: Option<u32>,

    /// Write output even when it would not be smaller than the source
    #[arg(long)]
    force: bool,

    /// Print one line per file
    #[arg(short, long)]
    verbose: bool,

    /// Write a JSON report of every outcome to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

impl ConvertArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            scale: self.scale,
            force: self.force,
            min_width: self.min_width,
            min_height: self.min_height,
            jpeg_quality: self.quality,
        }
    }
}

#[derive(Parser)]
#[command(name = "webscale")]
#[command(about = "Downscale high-resolution images for the web")]
#[command(long_about = "\
Downscale high-resolution images for the web

Walks the input directory, shrinks every high-resolution image by the scale
factor and writes it to the same relative path under the output directory.

  Opaque images      → JPEG (quality 90), extension .jpg
  Images with alpha  → PNG (maximum compression), extension .png

An image is high-resolution when its width OR its height reaches the
threshold (1600 x 1200 by default). Orientation from EXIF is applied to the
pixels; no metadata is copied to the output.

Supported inputs: jpg, jpeg, png, tif, tiff, bmp, webp

Run 'webscale gen-config' to generate a documented config file.")]
#[command(version)]
struct Cli {
    /// Config file (TOML); command-line flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert every high-resolution image under INPUT into OUTPUT
    Convert(ConvertArgs),
    /// Print a stock config file with all options documented
    GenConfig,
    /// Count unique colors on a small sample of each image
    Colors {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert(args) => {
            let config = config::load_config(cli.config.as_deref(), &args.overrides())?;
            let backend = RustBackend::new();

            let verbose = args.verbose;
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_batch_event(&event, verbose) {
                        println!("{}", line);
                    }
                }
            });
            let result = batch::run(&backend, &args.input, &args.output, &config, Some(tx));
            printer.join().map_err(|_| "output thread panicked")?;
            let report = result?;

            if let Some(path) = &args.report {
                batch::write_report(&report, path)?;
            }
            output::print_summary(&report.summary);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Colors { files } => {
            let backend = RustBackend::new();
            for path in &files {
                let result = backend
                    .decode(path)
                    .map(|image| count_unique_colors(&image))
                    .map_err(|e| e.to_string());
                println!("{}", output::format_color_count(path, result));
            }
        }
    }

    Ok(())
}
