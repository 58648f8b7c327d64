use std::fs::File;
use std::io::{self, BufRead, BufReader};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rv32_rs::{FormatConfig, LineSource, Poll, Probe};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Watch a stream of RV32 instruction words and print each change decoded"
)]
struct Opts {
    /// JSON formatting config ({ "mnemonic_width": 9, "csr_names": true })
    #[arg(long, value_name = "FILE")]
    config: Option<String>,
    /// Override the mnemonic column width
    #[arg(long)]
    width: Option<usize>,
    /// Print CSR addresses numerically
    #[arg(long)]
    no_csr_names: bool,
    /// Look CSR names up by the unsigned 12-bit field
    #[arg(long)]
    unsigned_csr: bool,
    /// One value per line (hex or dec); reads stdin when omitted
    #[arg(value_name = "INPUT")]
    input: Option<String>,
}

fn load_config(opts: &Opts) -> Result<FormatConfig> {
    let mut cfg = match &opts.config {
        Some(path) => {
            let txt = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&txt).with_context(|| format!("parsing {path}"))?
        }
        None => FormatConfig::default(),
    };
    if let Some(w) = opts.width {
        cfg.mnemonic_width = w;
    }
    if opts.no_csr_names {
        cfg.csr_names = false;
    }
    if opts.unsigned_csr {
        cfg.unsigned_csr = true;
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let cfg = load_config(&opts)?;
    tracing::debug!(?cfg, "formatting config");

    let reader: Box<dyn BufRead> = match &opts.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {path}"))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut src = LineSource::new(reader);
    let mut probe = Probe::new(cfg);

    loop {
        match probe.poll(&mut src)? {
            Poll::Exhausted => break,
            Poll::Unchanged(_) => {}
            Poll::Decoded(word) => match probe.result() {
                Some(Ok(text)) => println!("{word:#010x}: {text}"),
                Some(Err(e)) => println!("{word:#010x}: <{e}>"),
                None => {}
            },
        }
    }
    tracing::info!(decodes = probe.decodes(), "input exhausted");

    Ok(())
}
