//! huffpack: command-line front end for huffpack-core.

mod config;
mod input_gen;

use std::fs;
use std::io::{self, Read, Write};

use anyhow::{bail, Context, Result};
use huffpack_core::{
    code_table::CodeTable,
    framing::{parse_header, HEADER_SIZE},
    metrics::Metrics,
    tree::HuffmanTree,
    Symbol, SENTINEL,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use config::{Config, Location, Mode};

fn main() -> Result<()> {
    let config = match Config::from_args(std::env::args_os()) {
        Ok(config) => config,
        Err(err) => err.exit(),
    };

    init_tracing(config.verbose);

    if config.print_config {
        eprintln!("{config}\n");
    }

    let mut metrics = Metrics::new();
    let outcome = run(&config, &mut metrics);
    metrics.complete();

    if config.print_metrics && !matches!(config.mode, Mode::Inspect { .. }) {
        eprintln!("\n{metrics}");
    }

    outcome
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(config: &Config, metrics: &mut Metrics) -> Result<()> {
    match &config.mode {
        Mode::Compress { input, output } => {
            let data = read_input(input)?;
            let compressed = huffpack_core::compress(&data)
                .with_context(|| format!("failed to compress {input}"))?;
            write_output(output, &compressed)?;
            metrics.record_compress(data.len(), compressed.len());
            info!(
                input = %input,
                output = %output,
                raw = data.len(),
                compressed = compressed.len(),
                "compressed"
            );
        }
        Mode::Decompress { input, output } => {
            let data = read_input(input)?;
            let restored = match huffpack_core::decompress(&data) {
                Ok(restored) => restored,
                Err(err) => {
                    metrics.record_failure();
                    return Err(err).with_context(|| format!("failed to decompress {input}"));
                }
            };
            write_output(output, &restored)?;
            metrics.record_decompress(data.len(), restored.len());
            info!(
                input = %input,
                output = %output,
                compressed = data.len(),
                restored = restored.len(),
                "decompressed"
            );
        }
        Mode::Inspect { input } => {
            let data = read_input(input)?;
            inspect(&data).with_context(|| format!("failed to inspect {input}"))?;
        }
        Mode::Demo { seed, size } => demo(*seed, *size, metrics)?,
    }
    Ok(())
}

fn demo(seed: u64, size: usize, metrics: &mut Metrics) -> Result<()> {
    info!(seed, size, "generating sample data");
    let data = input_gen::generate_sample_data(seed, size);

    let report = huffpack_core::analyze(&data)?;
    debug!(?report, "predicted output");

    let compressed = huffpack_core::compress(&data)?;
    metrics.record_compress(data.len(), compressed.len());
    if compressed.len() != report.output_bytes {
        warn!(
            predicted = report.output_bytes,
            actual = compressed.len(),
            "size prediction mismatch"
        );
    }

    let restored = huffpack_core::decompress(&compressed)?;
    metrics.record_decompress(compressed.len(), restored.len());

    if restored != data {
        bail!("round trip mismatch for seed {seed}");
    }

    info!(
        distinct = report.distinct_bytes,
        max_code_len = report.max_code_len,
        bits_per_byte = %format!("{:.3}", report.bits_per_byte()),
        "round trip verified"
    );
    Ok(())
}

/// Print the header counts and derived codes of a compressed buffer.
fn inspect(data: &[u8]) -> Result<()> {
    let table = parse_header(data)?;
    let tree = HuffmanTree::build(&table)?;
    let codes = CodeTable::derive(&tree)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{:>8}  {:>12}  {:>4}  code", "symbol", "count", "len")?;
    for (symbol, code) in codes.iter() {
        let count = table.count(symbol);
        if count == 0 {
            continue;
        }
        writeln!(
            out,
            "{:>8}  {:>12}  {:>4}  {}",
            symbol_label(symbol),
            count,
            code.len(),
            code
        )?;
    }

    let body_bits = codes.encoded_bits(&table);
    writeln!(out)?;
    writeln!(out, "Symbols:     {}", table.total() - 1)?;
    writeln!(out, "Distinct:    {}", table.distinct_symbols() - 1)?;
    writeln!(out, "Tree depth:  {}", tree.depth())?;
    writeln!(out, "Body bits:   {body_bits}")?;
    writeln!(
        out,
        "Body bytes:  {} (expected {})",
        data.len() - HEADER_SIZE,
        body_bits.div_ceil(8)
    )?;
    Ok(())
}

fn symbol_label(symbol: Symbol) -> String {
    match symbol {
        SENTINEL => "EOS".to_string(),
        s if (0x21..0x7F).contains(&s) => format!("'{}'", s as u8 as char),
        s => format!("0x{s:02X}"),
    }
}

fn read_input(location: &Location) -> Result<Vec<u8>> {
    let data = match location {
        Location::Stdio => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
        Location::File(path) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        }
    };
    debug!(source = %location, bytes = data.len(), "read input");
    Ok(data)
}

fn write_output(location: &Location, data: &[u8]) -> Result<()> {
    match location {
        Location::Stdio => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data).context("failed to write stdout")?;
            stdout.flush().context("failed to flush stdout")?;
        }
        Location::File(path) => {
            fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))?
        }
    }
    debug!(dest = %location, bytes = data.len(), "wrote output");
    Ok(())
}
