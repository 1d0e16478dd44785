//! Whole-run orchestration: walk every catalog source and write the
//! generated header.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::instruments::emit_instruments;
use crate::marker::MarkerWriter;
use crate::orders::emit_orders;
use crate::templates::emit_templates;

/// Input and output locations for one generation run.
///
/// The defaults mirror running the tool from the instruments directory of
/// a source tree: templates live one level up, the XML catalogs and the
/// generated header sit alongside the tool.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub templates_dir: PathBuf,
    pub instruments_xml: PathBuf,
    pub orders_xml: PathBuf,
    pub output: PathBuf,
    pub quiet: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        GenerateConfig {
            templates_dir: PathBuf::from("../templates"),
            instruments_xml: PathBuf::from("instruments.xml"),
            orders_xml: PathBuf::from("orders.xml"),
            output: PathBuf::from("instrumentsxml.h"),
            quiet: false,
        }
    }
}

/// Generate the header: license preamble, then template markers, then
/// instrument markers, then order markers. The output is truncated and
/// rewritten from scratch, so a run over unchanged inputs is byte
/// identical.
pub fn run(config: &GenerateConfig) -> Result<()> {
    let file = fs::File::create(&config.output)
        .with_context(|| format!("Failed to create {}", config.output.display()))?;
    let mut writer = MarkerWriter::new(BufWriter::new(file), config.quiet);

    writer
        .preamble()
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    emit_templates(&mut writer, &config.templates_dir).with_context(|| {
        format!(
            "Failed to collect templates from {}",
            config.templates_dir.display()
        )
    })?;

    let instruments = fs::read_to_string(&config.instruments_xml)
        .with_context(|| format!("Failed to read {}", config.instruments_xml.display()))?;
    emit_instruments(&mut writer, &instruments)
        .with_context(|| format!("Failed to process {}", config.instruments_xml.display()))?;

    let orders = fs::read_to_string(&config.orders_xml)
        .with_context(|| format!("Failed to read {}", config.orders_xml.display()))?;
    emit_orders(&mut writer, &orders)
        .with_context(|| format!("Failed to process {}", config.orders_xml.display()))?;

    writer
        .into_inner()
        .flush()
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn sample_catalog(dir: &Path) -> GenerateConfig {
        let templates = dir.join("templates");
        fs::create_dir(&templates).unwrap();
        let general = templates.join("01-General");
        fs::create_dir(&general).unwrap();
        fs::write(general.join("01-Treble_Clef.mscz"), b"").unwrap();

        fs::write(
            dir.join("instruments.xml"),
            "<museScore><InstrumentGroup><name>Strings</name>\
               <Instrument>\
                 <longName>Violin</longName>\
                 <shortName>Vln.</shortName>\
               </Instrument>\
             </InstrumentGroup></museScore>",
        )
        .unwrap();
        fs::write(
            dir.join("orders.xml"),
            "<museScore><Order><name>Orchestral</name></Order></museScore>",
        )
        .unwrap();

        GenerateConfig {
            templates_dir: templates,
            instruments_xml: dir.join("instruments.xml"),
            orders_xml: dir.join("orders.xml"),
            output: dir.join("instrumentsxml.h"),
            quiet: true,
        }
    }

    #[test]
    fn writes_sections_in_catalog_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = sample_catalog(dir.path());
        run(&config).unwrap();

        let header = fs::read_to_string(&config.output).unwrap();
        assert!(header.starts_with("/*\n"));
        let (_, body) = header.split_once(" */\n").unwrap();
        assert_eq!(
            body,
            "QT_TRANSLATE_NOOP(\"Templates\", \"General\"),\n\
             QT_TRANSLATE_NOOP(\"Templates\", \"Treble Clef\"),\n\
             QT_TRANSLATE_NOOP(\"InstrumentsXML\", \"Strings\"),\n\
             QT_TRANSLATE_NOOP(\"InstrumentsXML\", \"Violin\"),\n\
             QT_TRANSLATE_NOOP3(\"InstrumentsXML\", \"Vln.\", \"Violin\"),\n\
             QT_TRANSLATE_NOOP(\"OrderXML\", \"Orchestral\"),\n"
        );
    }

    #[test]
    fn runs_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let config = sample_catalog(dir.path());

        run(&config).unwrap();
        let first = fs::read(&config.output).unwrap();
        run(&config).unwrap();
        let second = fs::read(&config.output).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn stale_output_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let config = sample_catalog(dir.path());
        fs::write(&config.output, "stale contents that are longer than the header would ever be, repeated over and over and over again to be safe").unwrap();

        run(&config).unwrap();
        let header = fs::read_to_string(&config.output).unwrap();
        assert!(header.starts_with("/*\n"));
        assert!(!header.contains("stale"));
    }

    #[test]
    fn missing_catalog_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = sample_catalog(dir.path());
        config.instruments_xml = dir.path().join("absent.xml");

        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("absent.xml"));
    }

    #[test]
    fn defaults_point_at_the_instruments_directory_layout() {
        let config = GenerateConfig::default();
        assert_eq!(config.templates_dir, PathBuf::from("../templates"));
        assert_eq!(config.instruments_xml, PathBuf::from("instruments.xml"));
        assert_eq!(config.orders_xml, PathBuf::from("orders.xml"));
        assert_eq!(config.output, PathBuf::from("instrumentsxml.h"));
        assert!(!config.quiet);
    }
}
