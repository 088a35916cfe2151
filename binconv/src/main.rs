/*!
# Binary Converter

Command-line front end for the `binrepr` library: shows the fixed-length
binary representation of booleans, characters, integers and floats of any
width, and converts bit strings back into values.

## Usage

### Encode
```bash
binconv encode float 0.1 --width 32
binconv encode int -5 --width 12
binconv encode float 1.5 --width 16 --native --byte-order little-endian
```

### Decode
```bash
binconv decode float 0011110000000000
binconv decode uint 11111111 --json
```

### Inspect a float layout
```bash
binconv layout 24
```

### Generate a configuration file
```bash
binconv config --output binconv.toml
```
*/

use anyhow::{Context, Result};
use binrepr::{BitString, ByteOrder, ScalarKind};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};

mod config;
mod convert;
mod render;

use config::AppConfig;
use convert::{parse_kind, Conversion, Layout};

#[derive(Parser)]
#[command(name = "binconv")]
#[command(about = "Fixed-length binary representations of scalar values")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "binconv.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a value into bits
    Encode {
        /// Value kind: bool, char, uint, int or float
        #[arg(value_parser = parse_kind)]
        kind: ScalarKind,

        /// Value to encode
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Width in bits (defaults to the configured width)
        #[arg(short, long)]
        width: Option<usize>,

        /// Use the native 8/16/32/64-bit conversion
        #[arg(long)]
        native: bool,

        /// Byte order for native conversions
        #[arg(short, long)]
        byte_order: Option<ByteOrder>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode bits into a value
    Decode {
        /// Value kind: bool, char, uint, int or float
        #[arg(value_parser = parse_kind)]
        kind: ScalarKind,

        /// Bits to decode, most significant first
        bits: BitString,

        /// Use the native 8/16/32/64-bit conversion
        #[arg(long)]
        native: bool,

        /// Byte order for native conversions
        #[arg(short, long)]
        byte_order: Option<ByteOrder>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the derived float layout for a width
    Layout {
        /// Total width in bits
        width: usize,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate configuration file
    Config {
        /// Output path for configuration file
        #[arg(short, long, default_value = "binconv.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    // Log to stderr to keep stdout clean for bit strings
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let config = load_config(&cli.config);

    match cli.command {
        Commands::Encode { kind, value, width, native, byte_order, json } => {
            let native = native_order(&config, native, byte_order);
            let width = width.unwrap_or(config.defaults.width);
            run_encode(&config, kind, &value, width, native, json)
        }

        Commands::Decode { kind, bits, native, byte_order, json } => {
            let native = native_order(&config, native, byte_order);
            run_decode(&config, kind, bits, native, json)
        }

        Commands::Layout { width, json } => run_layout(width, json),

        Commands::Config { output } => generate_config_file(output),
    }
}

/// Load the configuration file, falling back to defaults if it is missing
fn load_config(path: &Path) -> AppConfig {
    if !path.exists() {
        warn!("No config file at {}, using defaults", path.display());
        return AppConfig::new();
    }
    AppConfig::load_from_file(path).unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {:#}", e);
        AppConfig::new()
    })
}

/// Byte order of a native conversion, or `None` for the generalized codecs
fn native_order(config: &AppConfig, native: bool, byte_order: Option<ByteOrder>) -> Option<ByteOrder> {
    (native || config.defaults.native).then(|| byte_order.unwrap_or(config.defaults.byte_order))
}

/// Encode a value and print its bits
fn run_encode(
    config: &AppConfig,
    kind: ScalarKind,
    text: &str,
    width: usize,
    native: Option<ByteOrder>,
    json: bool,
) -> Result<()> {
    let value = convert::parse_value(kind, text)?;
    info!("Encoding {} {} at {} bits (native: {:?})", kind, value, width, native);

    let bits = convert::encode(&value, width, native)
        .with_context(|| format!("Failed to encode {} as {}", text, kind))?;

    print_conversion(config, Conversion::new(value, bits, native), json)
}

/// Decode bits and print the value
fn run_decode(
    config: &AppConfig,
    kind: ScalarKind,
    bits: BitString,
    native: Option<ByteOrder>,
    json: bool,
) -> Result<()> {
    info!("Decoding {} bits as {} (native: {:?})", bits.len(), kind, native);

    let value = convert::decode(kind, &bits, native)
        .with_context(|| format!("Failed to decode {} as {}", bits, kind))?;

    print_conversion(config, Conversion::new(value, bits, native), json)
}

fn print_conversion(config: &AppConfig, conversion: Conversion, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&conversion)?);
        return Ok(());
    }

    println!("{}", conversion.value);
    println!(
        "{}",
        render::render(
            conversion.kind,
            &conversion.bits,
            conversion.byte_order,
            config.display.color
        )
    );
    if config.display.show_hex {
        println!("0x{}", conversion.hex);
    }
    Ok(())
}

/// Print the derived float layout for a width
fn run_layout(width: usize, json: bool) -> Result<()> {
    let layout = Layout::derive(width)
        .with_context(|| format!("No float layout for {} bits", width))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    let format = &layout.format;
    println!("total bits:          {}", format.total_bits);
    println!("exponent bits:       {}", format.exponent_bits);
    println!("significand bits:    {} (+1 implicit)", format.significand_bits);
    println!("bias:                {}", format.bias);
    println!(
        "exponent range:      {}..={} ({} with subnormals)",
        format.min_exponent_normal, format.max_exponent, format.min_exponent_subnormal
    );
    println!("max float:           {:e}", layout.max_float);
    println!("min float (normal):  {:e}", layout.min_float_normal);
    println!("min float (subnorm): {:e}", layout.min_float_subnormal);
    println!("significand digits:  {:.2}", layout.significand_digits);
    println!("max exponent digits: {}", layout.max_exponent_digits);
    Ok(())
}

/// Generate a default configuration file
fn generate_config_file(output_path: PathBuf) -> Result<()> {
    let config = AppConfig::new();
    config.save_to_file(&output_path)?;

    println!("Generated configuration file: {}", output_path.display());
    println!("Edit the file to customize defaults, then run:");
    println!("   binconv --config {} encode float 0.1", output_path.display());

    Ok(())
}
