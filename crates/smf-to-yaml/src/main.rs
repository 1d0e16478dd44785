use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "smf-to-yaml")]
#[command(about = "Convert Standard MIDI Files to human readable YAML", long_about = None)]
struct Args {
    /// MIDI files to convert (each gets a sibling `<name>.yaml`)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Suppress informational messages (only errors)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    smf_to_yaml::run(&args.files, args.quiet)
}
