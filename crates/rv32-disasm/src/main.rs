use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use std::path::{Path, PathBuf};

use rv32_disasm::{is_mapped, load_raw_bin, render_text, sweep, Image};
use rv32_rs::csr;
use rv32_rs::disasm::{disassemble_with, FormatConfig};
use rv32_rs::isa::rv32im::Rv32Decoder;

#[derive(Parser, Debug)]
#[command(author, version, about = "RV32I/M disassembler CLI", long_about=None)]
struct Cli {
    /// JSON formatting config ({ "mnemonic_width": 9, "csr_names": true, "unsigned_csr": false })
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// Override the mnemonic column width
    #[arg(long, global = true)]
    width: Option<usize>,
    /// Print CSR addresses numerically
    #[arg(long, global = true)]
    no_csr_names: bool,
    /// Look CSR names up by the unsigned 12-bit field
    #[arg(long, global = true)]
    unsigned_csr: bool,
    /// Subcommand
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct LoadArgs {
    /// Input binary path
    #[arg(value_name = "BINFILE")]
    input: PathBuf,
    /// Load address for the binary in target address space
    #[arg(long, default_value_t = 0u32)]
    base: u32,
    /// Skip N bytes at start of file before loading
    #[arg(long, default_value_t = 0usize)]
    skip: usize,
    /// Limit bytes loaded (default: to EOF after --skip)
    #[arg(long)]
    len: Option<usize>,
}

impl LoadArgs {
    fn load(&self) -> Result<Image> {
        load_raw_bin(&self.input, self.base, self.skip, self.len)
            .with_context(|| format!("loading {}", self.input.display()))
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode instruction words given on the command line (hex or dec)
    Word {
        #[arg(value_name = "WORD", required = true)]
        words: Vec<String>,
    },
    /// Resolve a CSR address (hex or dec) to its register name
    Csr {
        #[arg(value_name = "ADDR")]
        addr: String,
    },
    /// List loaded segments (simple single-segment for raw .bin)
    Sections {
        #[command(flatten)]
        load: LoadArgs,
    },
    /// Disassemble a range [start, end) in bytes
    Range {
        #[command(flatten)]
        load: LoadArgs,
        /// Start address (hex or dec), default: image start
        #[arg(long)]
        start: Option<String>,
        /// End address (hex or dec, exclusive), default: image end
        #[arg(long)]
        end: Option<String>,
        /// Show instruction bytes
        #[arg(long)]
        show_bytes: bool,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Parses hex (`0x..`) or decimal, masking values wider than 32 bits.
fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    let v = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(&hex.replace('_', ""), 16)?
    } else {
        s.parse::<u64>()?
    };
    Ok((v & 0xFFFF_FFFF) as u32)
}

fn load_config(cli: &Cli) -> Result<FormatConfig> {
    let mut cfg = match &cli.config {
        Some(path) => {
            let txt = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&txt).with_context(|| format!("parsing {}", path.display()))?
        }
        None => FormatConfig::default(),
    };
    if let Some(w) = cli.width {
        cfg.mnemonic_width = w;
    }
    if cli.no_csr_names {
        cfg.csr_names = false;
    }
    if cli.unsigned_csr {
        cfg.unsigned_csr = true;
    }
    Ok(cfg)
}

fn emit(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
        }
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = load_config(&cli)?;

    match &cli.cmd {
        Command::Word { words } => {
            let dec = Rv32Decoder::new();
            for w in words {
                let word = parse_u32(w).with_context(|| format!("bad word {w:?}"))?;
                match disassemble_with(&dec, word, &cfg) {
                    Ok(text) => println!("{word:#010x}: {text}"),
                    Err(e) => println!("{word:#010x}: <{e}>"),
                }
            }
        }
        Command::Csr { addr } => {
            let addr = parse_u32(addr)?;
            anyhow::ensure!(addr <= 0xFFF, "CSR addresses are 12 bits");
            tracing::debug!(named = csr::len(), "csr table");
            println!("{}", csr::resolve(addr as i32));
        }
        Command::Sections { load } => {
            let img = load.load()?;
            println!("{:<10} {:<10} {:<10} {:<6} {:<6}", "name", "start", "end", "perms", "kind");
            for s in &img.segments {
                println!(
                    "{:<10} {:#010x} {:#010x} {:<6} {:<6}",
                    s.name, s.base, s.end(), s.perms, s.kind
                );
            }
        }
        Command::Range { load, start, end, show_bytes, format, out } => {
            let img = load.load()?;
            let start = match start {
                Some(s) => parse_u32(s)?,
                None => img.first_base().unwrap_or(0),
            };
            let end = match end {
                Some(s) => u64::from(parse_u32(s)?),
                None => img.last_end().unwrap_or(u64::from(start)),
            };
            anyhow::ensure!(end >= u64::from(start), "end must be >= start");
            if start % 4 != 0 {
                tracing::warn!("start {start:#010x} is not word aligned");
            }
            if !is_mapped(&img, start) {
                tracing::warn!("start {start:#010x} is outside the image");
            }

            let listing = sweep(&img, start, end, &cfg);
            let text = match format {
                OutputFormat::Text => render_text(&listing, *show_bytes),
                OutputFormat::Json => serde_json::to_string_pretty(&listing)? + "\n",
            };
            emit(out.as_deref(), &text)?;
            tracing::info!(decoded = listing.decoded(), unknown = listing.unknown(), "range done");
        }
    }

    Ok(())
}
