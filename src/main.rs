//! Netsheet - schematic sheet generator
//!
//! Reads a netlist, resolves it against the symbol libraries named in the
//! library lists, and writes the laid-out sheet.
//!
//! # Usage
//!
//! ```bash
//! netsheet < design.net > design.bdf
//! RUST_LOG=debug netsheet design.net --libs project_libs.txt -o design.bdf
//! ```

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use netsheet_core::{
    config::{self, LayoutConfig},
    error::{NetsheetError, Result},
    SourceReader,
};

/// Schematic sheet generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Netlist file (reads stdin when omitted)
    #[arg(value_name = "NETLIST")]
    netlist: Option<PathBuf>,

    /// Project library list, one library file per line
    #[arg(long, value_name = "FILE", default_value = config::PROJECT_LIBRARY_LIST)]
    libs: PathBuf,

    /// User library list, loaded after the project libraries
    #[arg(long, value_name = "FILE", default_value = config::USER_LIBRARY_LIST)]
    user_libs: PathBuf,

    /// Output file (writes stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() {
    let _ = env_logger::builder().try_init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let files = config::library_files(&args.libs, &args.user_libs);
    log::info!("loading {} library files", files.len());
    let mut libraries = SourceReader::from_paths(files.as_slice())?;

    let mut netlist = match &args.netlist {
        Some(path) => SourceReader::from_paths(&[path])?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| NetsheetError::FileReadError {
                    path: "stdin".to_string(),
                    source: e,
                })?;
            SourceReader::from_text("stdin", text)
        }
    };

    let sheet = netsheet_core::compile(&mut libraries, &mut netlist, LayoutConfig::default())?;

    let result = match &args.output {
        Some(path) => std::fs::write(path, sheet),
        None => std::io::stdout().lock().write_all(sheet.as_bytes()),
    };
    result.map_err(|e| NetsheetError::OutputError { source: e })
}
