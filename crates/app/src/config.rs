//! Command-line configuration for huffpack.
//!
//! Arguments are parsed with clap and resolved into a [`Config`] with every
//! default filled in, so the rest of the program never deals with optional
//! paths. `-` stands for stdin or stdout.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

/// Extension appended to compressed files.
pub const COMPRESSED_EXT: &str = "huff";

/// Default size of generated demo input.
pub const DEFAULT_DEMO_BYTES: usize = 256 * 1024;

#[derive(Debug, Parser)]
#[command(name = "huffpack", version, about = "Static Huffman compressor")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the resolved configuration before running
    #[arg(long, global = true)]
    print_config: bool,

    /// Don't print the metrics summary
    #[arg(long, global = true)]
    no_metrics: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compress a file (default output: <INPUT>.huff)
    Compress {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decompress a file (default output: <INPUT> without .huff)
    Decompress {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the frequency header and code table of a compressed file
    Inspect { input: PathBuf },
    /// Round-trip generated sample data and report the result
    Demo {
        /// Random seed for the sample data (default: time-based)
        #[arg(long)]
        seed: Option<u64>,
        /// Size of the sample data in bytes
        #[arg(long, default_value_t = DEFAULT_DEMO_BYTES)]
        size: usize,
    },
}

/// Where bytes come from or go to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Stdio,
    File(PathBuf),
}

impl Location {
    fn from_arg(path: &Path) -> Self {
        if path == Path::new("-") {
            Location::Stdio
        } else {
            Location::File(path.to_path_buf())
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Stdio => f.write_str("-"),
            Location::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Compress { input: Location, output: Location },
    Decompress { input: Location, output: Location },
    Inspect { input: Location },
    Demo { seed: u64, size: usize },
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub verbose: bool,
    pub print_config: bool,
    pub print_metrics: bool,
}

impl Config {
    /// Parse and resolve arguments; the first item is the program name.
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;

        let mode = match cli.command {
            Command::Compress { input, output } => {
                let input = Location::from_arg(&input);
                let output = match output {
                    Some(path) => Location::from_arg(&path),
                    None => compressed_name(&input),
                };
                Mode::Compress { input, output }
            }
            Command::Decompress { input, output } => {
                let input = Location::from_arg(&input);
                let output = match output {
                    Some(path) => Location::from_arg(&path),
                    None => restored_name(&input),
                };
                Mode::Decompress { input, output }
            }
            Command::Inspect { input } => Mode::Inspect {
                input: Location::from_arg(&input),
            },
            Command::Demo { seed, size } => Mode::Demo {
                seed: seed.unwrap_or_else(time_seed),
                size,
            },
        };

        Ok(Config {
            mode,
            verbose: cli.verbose,
            print_config: cli.print_config,
            print_metrics: !cli.no_metrics,
        })
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Configuration ===")?;
        match &self.mode {
            Mode::Compress { input, output } => {
                writeln!(f, "Mode:   compress")?;
                writeln!(f, "Input:  {input}")?;
                writeln!(f, "Output: {output}")?;
            }
            Mode::Decompress { input, output } => {
                writeln!(f, "Mode:   decompress")?;
                writeln!(f, "Input:  {input}")?;
                writeln!(f, "Output: {output}")?;
            }
            Mode::Inspect { input } => {
                writeln!(f, "Mode:   inspect")?;
                writeln!(f, "Input:  {input}")?;
            }
            Mode::Demo { seed, size } => {
                writeln!(f, "Mode:   demo")?;
                writeln!(f, "Seed:   {seed}")?;
                writeln!(f, "Size:   {size} bytes")?;
            }
        }
        write!(f, "Metrics: {}", if self.print_metrics { "on" } else { "off" })
    }
}

fn compressed_name(input: &Location) -> Location {
    match input {
        Location::Stdio => Location::Stdio,
        Location::File(path) => {
            let mut name = path.as_os_str().to_owned();
            name.push(".");
            name.push(COMPRESSED_EXT);
            Location::File(PathBuf::from(name))
        }
    }
}

fn restored_name(input: &Location) -> Location {
    match input {
        Location::Stdio => Location::Stdio,
        Location::File(path) => {
            if path.extension().is_some_and(|ext| ext == COMPRESSED_EXT) {
                Location::File(path.with_extension(""))
            } else {
                let mut name = path.as_os_str().to_owned();
                name.push(".out");
                Location::File(PathBuf::from(name))
            }
        }
    }
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
