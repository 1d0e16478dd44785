//! Template directory walk.
//!
//! The templates directory holds one subdirectory per category, each
//! holding the template files. Directory and file names carry an ordering
//! prefix separated by `-`; the part after the first `-` is the display
//! name, with underscores standing in for spaces.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{CatalogError, Result};
use crate::marker::{MarkerWriter, TEMPLATES};

/// Directory entries sorted by file name, so every platform emits the
/// same order.
fn sorted_entries(dir: &Path) -> Result<Vec<fs::DirEntry>> {
    let mut entries = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}

/// Display name of a template directory or file: the part after the first
/// `-`, with underscores turned into spaces.
fn display_name(raw: &str) -> Result<String> {
    let (_, rest) = raw
        .split_once('-')
        .ok_or_else(|| CatalogError::MissingPrefix {
            name: raw.to_string(),
        })?;
    Ok(rest.replace('_', " "))
}

/// Emit one marker per template category and one per template inside it,
/// in sorted order. Loose files at the top level and nested directories
/// inside a category are skipped.
pub fn emit_templates<W: Write>(writer: &mut MarkerWriter<W>, templates_dir: &Path) -> Result<()> {
    for entry in sorted_entries(templates_dir)? {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let category = display_name(&entry.file_name().to_string_lossy())?;
        writer.add(TEMPLATES, &category, "")?;
        writer.trace(&category);

        for file in sorted_entries(&path)? {
            if !file.path().is_file() {
                continue;
            }
            let file_name = file.file_name();
            let stem = Path::new(&file_name)
                .file_stem()
                .unwrap_or(&file_name)
                .to_string_lossy();
            let template = display_name(&stem)?;
            writer.add(TEMPLATES, &template, "")?;
            writer.trace(&format!("    {}", template));
        }
    }
    Ok(())
}
