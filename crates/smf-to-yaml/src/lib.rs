//! Dump Standard MIDI Files as human readable YAML.
//!
//! Each input file becomes a sibling `.yaml` file holding the SMF format,
//! the header division and every track event with its delta time and the
//! decoded message fields.

pub mod message;
pub mod midi;
pub mod value;

// Re-export main types for convenience
pub use midi::{convert_file, yaml_sibling, EventRecord, SmfDocument};
pub use value::{FieldMap, FieldValue};

use std::path::PathBuf;

use anyhow::Result;

/// Convert every file in order, stopping at the first failure. Outputs
/// already written for earlier files are left in place.
pub fn run(files: &[PathBuf], quiet: bool) -> Result<()> {
    for file in files {
        let written = convert_file(file)?;
        if !quiet {
            eprintln!("{} -> {}", file.display(), written.display());
        }
    }
    Ok(())
}
