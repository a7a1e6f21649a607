use crate::catalog::{load_catalog, ProductType};
use crate::config::{Method, RleConfig};
use crate::error::RleError;
use crate::pipeline;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = "Run-length encoder/decoder with two tagged formats")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Method selection on the command line; `auto` picks the smaller output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MethodChoice {
    Fixed(Method),
    Auto,
}

impl FromStr for MethodChoice {
    type Err = RleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(MethodChoice::Auto);
        }
        s.parse().map(MethodChoice::Fixed)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encodes a file
    Encode {
        /// Input file to encode
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output file name
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Record format [a, b, auto]
        #[arg(short, long, default_value = "a")]
        method: MethodChoice,

        /// Replace the output file if it exists
        #[arg(short, long)]
        force: bool,

        /// Show a progress bar
        #[arg(short, long)]
        progress: bool,
    },
    /// Decodes a file
    Decode {
        /// Input file to decode
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output file name
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Replace the output file if it exists
        #[arg(short, long)]
        force: bool,

        /// Show a progress bar
        #[arg(short, long)]
        progress: bool,
    },
    /// Shows the format and sizes of an encoded file
    Info {
        /// Encoded file
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Lists the products of a catalog file
    Catalog {
        /// Catalog CSV file
        #[arg(short, long, value_name = "FILE")]
        path: PathBuf,

        /// Only list products of this type [AL, DL, FRL]
        #[arg(short = 't', long = "type")]
        product_type: Option<ProductType>,
    },
}

fn open_input(path: &Path, progress: bool) -> Result<Box<dyn Read>, RleError> {
    let file = File::open(path)?;
    if !progress {
        return Ok(Box::new(file));
    }

    let pb = ProgressBar::new(file.metadata()?.len());
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-"),
    );
    Ok(Box::new(pb.wrap_read(file)))
}

fn resolve_method(choice: MethodChoice, input: &Path) -> Result<Method, RleError> {
    match choice {
        MethodChoice::Fixed(method) => Ok(method),
        MethodChoice::Auto => {
            let size_a = pipeline::estimate_encoded_size(&mut BufReader::new(File::open(input)?), Method::A)?;
            let size_b = pipeline::estimate_encoded_size(&mut BufReader::new(File::open(input)?), Method::B)?;
            log::debug!("auto method: A would be {} bytes, B would be {} bytes", size_a, size_b);
            Ok(if size_a <= size_b { Method::A } else { Method::B })
        }
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Encode { input, output, method, force, progress } => {
            let method = resolve_method(*method, input)?;
            println!("Encoding {} to {} (method {:?})...", input.display(), output.display(), method);
            let config = RleConfig::default().with_method(method).with_overwrite(*force);

            let start = Instant::now();
            let stats = pipeline::encode_to_path(open_input(input, *progress)?, output, &config)?;
            let duration = start.elapsed();

            println!("Encoding successful!");
            println!("  Original Size:    {} bytes", stats.original_size);
            println!("  Encoded Size:     {} bytes", stats.compressed_size);
            println!("  Runs:             {}", stats.runs);
            println!("  Ratio:            {:.2}x", stats.ratio);
            println!("  Elapsed Time:     {:.2?}", duration);
        }
        Commands::Decode { input, output, force, progress } => {
            println!("Decoding {} to {}...", input.display(), output.display());
            let config = RleConfig::default().with_overwrite(*force);

            let start = Instant::now();
            let stats = pipeline::decode_to_path(open_input(input, *progress)?, output, &config)?;
            let duration = start.elapsed();

            println!("Decoding successful!");
            println!("  Method:       {:?}", stats.method);
            println!("  Decoded Size: {} bytes", stats.decoded_size);
            println!("  Elapsed Time: {:.2?}", duration);
        }
        Commands::Info { input } => {
            let info = pipeline::info(&mut BufReader::new(File::open(input)?))?;
            println!("{}", input.display());
            println!("  Method:           {:?} (tag 0x{:02x})", info.method, info.method.tag());
            println!("  Encoded Size:     {} bytes", info.compressed_size);
            println!("  Original Size:    {} bytes", info.original_size);
            println!("  Records:          {}", info.records);
            println!("  Ratio:            {:.2}x", info.compression_ratio);
        }
        Commands::Catalog { path, product_type } => {
            let catalog = load_catalog(path)?;
            let wanted = *product_type;
            for product in catalog.search(move |p| wanted.map_or(true, |t| p.product_type == t)) {
                println!("{} [{}] quantity: {}", product, product.type_name(), product.quantity);
            }
        }
    }

    Ok(())
}
