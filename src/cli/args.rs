use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "threadtone")]
#[command(version)]
#[command(about = "Color harmony analysis and dominant color extraction for wardrobe images")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Extract the dominant garment colors from an image
    Extract {
        /// Path to the image file
        image: PathBuf,

        /// Background removal threshold, 10-100; higher keeps less
        #[arg(short, long)]
        sensitivity: Option<u32>,

        /// Maximum number of colors to report
        #[arg(short = 'n', long)]
        colors: Option<usize>,

        /// Print a JSON array instead of one hex color per line
        #[arg(long)]
        json: bool,

        /// Skip the k-means fallback when segmentation finds nothing
        #[arg(long)]
        no_fallback: bool,
    },
    /// Read the color under a single pixel
    Pick {
        /// Path to the image file
        image: PathBuf,

        /// Pixel column, zero-based
        x: u32,

        /// Pixel row, zero-based
        y: u32,
    },
    /// Classify the color harmony of a set of colors
    Harmony {
        /// Colors as #rrggbb hex strings
        colors: Vec<String>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Analyze a color set: primary color, harmony, contrast, saturation
    Analyze {
        /// Colors as #rrggbb hex strings
        colors: Vec<String>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// WCAG contrast ratio between two colors
    Contrast { color_a: String, color_b: String },
    /// Rate the color harmony of a look built from garment images
    Look {
        /// One image per garment
        images: Vec<PathBuf>,

        /// Background removal threshold, 10-100; higher keeps less
        #[arg(short, long)]
        sensitivity: Option<u32>,

        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,
    },
}
