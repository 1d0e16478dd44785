use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use catalog_to_ts::GenerateConfig;

#[derive(Parser, Debug)]
#[command(name = "catalog-to-ts")]
#[command(about = "Collect translatable catalog strings into a Qt marker header", long_about = None)]
struct Args {
    /// Directory holding the template category subdirectories
    #[arg(long, default_value = "../templates")]
    templates_dir: PathBuf,

    /// Instrument catalog file
    #[arg(long, default_value = "instruments.xml")]
    instruments: PathBuf,

    /// Score order catalog file
    #[arg(long, default_value = "orders.xml")]
    orders: PathBuf,

    /// Path of the generated header
    #[arg(short, long, default_value = "instrumentsxml.h")]
    output: PathBuf,

    /// Suppress the progress trace on stdout
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    catalog_to_ts::run(&GenerateConfig {
        templates_dir: args.templates_dir,
        instruments_xml: args.instruments,
        orders_xml: args.orders,
        output: args.output,
        quiet: args.quiet,
    })
}
