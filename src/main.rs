use anyhow::Result;
use clap::Parser;
use image_fanout::config::{FanoutConfig, DEFAULT_VARIANTS};

/// Minimal image fan-out benchmark:
/// - resizes one source into a batch of format/scale variants
/// - runs the batch twice, sequentially and concurrently dispatched
/// - prints the wall-clock cost of each
#[derive(Parser, Debug)]
#[command(name = "fanout")]
#[command(about = "Fan one image out into resized variants, timing sequential vs concurrent dispatch")]
#[command(
    long_about = "Fan one image out into resized variants and compare two execution strategies.
The sequential pass finishes each variant before starting the next; the concurrent pass
hands every variant to the runtime at once and does not wait. Derived files are written
next to the source as <stem>_<width>x<height>.<format>."
)]
struct Args {
    /// Source image path (derived files are written next to it)
    #[arg(default_value = "puppy.jpg", help = "Image to fan out")]
    source: String,

    /// Variant to produce, as FORMAT:SCALE; repeat for a batch
    #[arg(short = 'V', long = "variant",
          default_values_t = DEFAULT_VARIANTS.map(String::from),
          help = "Variant as FORMAT:SCALE, e.g. JPEG:0.5 (repeatable; replaces the stock batch)")]
    variants: Vec<String>,

    /// Verbose diagnostic logging
    #[arg(short, long, help = "Debug-level logging (RUST_LOG overrides this)")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = FanoutConfig::new(args.source, args.variants);
    config.validate().map_err(anyhow::Error::msg)?;
    let options = config.to_options()?;

    let outcome = image_fanout::run_comparison(options).await?;
    println!("{}", outcome.report);

    // The concurrent batch is dropped still running; the runtime finishes
    // whatever blocking work already started before the process exits.
    // Only a batch larger than the blocking pool's thread cap (512 by
    // default) could still have queued tasks to lose at shutdown.
    Ok(())
}

/// Initialize logging, respecting RUST_LOG when set.
fn init_logging(verbose: bool) {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if verbose {
            "image_fanout=debug,fanout_scale=debug".to_string()
        } else {
            "image_fanout=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();
}
