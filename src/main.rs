use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use gbdispatch::{emit, EmitConfig, OpcodeTable};

#[derive(Parser, Debug)]
#[command(author,version,about,long_about=None)]
struct Args {
    /// Opcode table in the unprefixed/cbprefixed JSON format
    table: PathBuf,

    /// TOML file overriding the emitter defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dump the computed dispatch entries instead of Rust code
    #[arg(long)]
    entries: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EmitConfig::load(path)?,
        None => EmitConfig::default(),
    };
    let table = OpcodeTable::load(&args.table)?;
    let out = if args.entries {
        emit::listing(&gbdispatch::entries(&table))
    } else {
        gbdispatch::render(&table, &config)
    };

    match &args.output {
        Some(path) => {
            fs::write(path, out)?;
            info!("wrote {}", path.display());
        }
        None => print!("{}", out),
    }
    Ok(())
}
