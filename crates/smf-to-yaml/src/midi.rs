use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use midly::{Smf, Timing, TrackEvent};
use serde::Serialize;

use crate::message::event_fields;
use crate::value::FieldMap;

/// One timed event: the delta ticks since the previous event, plus the
/// decoded message fields.
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub deltatime: u32,
    pub message: FieldMap,
}

/// In-memory model of one Standard MIDI File, shaped for dumping.
///
/// Serializes as a mapping of `type` (SMF format 0/1/2), `division` and
/// `tracks`, in that order.
#[derive(Debug, Clone, Serialize)]
pub struct SmfDocument {
    #[serde(rename = "type")]
    pub format: u16,
    pub division: u16,
    pub tracks: Vec<Vec<EventRecord>>,
}

impl SmfDocument {
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read(path)
            .with_context(|| format!("Failed to read MIDI file: {}", path.display()))?;
        Self::from_bytes(&data)
            .with_context(|| format!("Failed to parse MIDI file: {}", path.display()))
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let smf = Smf::parse(data).context("not a Standard MIDI File")?;
        Ok(Self::from_smf(&smf))
    }

    pub fn from_smf(smf: &Smf) -> Self {
        let format = match smf.header.format {
            midly::Format::SingleTrack => 0,
            midly::Format::Parallel => 1,
            midly::Format::Sequential => 2,
        };

        SmfDocument {
            format,
            division: division_of(smf.header.timing),
            tracks: smf.tracks.iter().map(|t| convert_track(t)).collect(),
        }
    }
}

/// The header division in the units the file declares: ticks per quarter
/// note for metrical timing, ticks per second for SMPTE timing. The 29 fps
/// code means 29.97 drop-frame, so that case rounds.
fn division_of(timing: Timing) -> u16 {
    match timing {
        Timing::Metrical(ticks_per_beat) => ticks_per_beat.as_int(),
        Timing::Timecode(fps, ticks_per_frame) => {
            (fps.as_f32() * ticks_per_frame as f32).round() as u16
        }
    }
}

fn convert_track(track: &[TrackEvent]) -> Vec<EventRecord> {
    track
        .iter()
        .map(|event| EventRecord {
            deltatime: event.delta.as_int(),
            message: event_fields(&event.kind),
        })
        .collect()
}

/// Convert one MIDI file, writing the YAML next to it with the extension
/// replaced. Returns the path written. Nothing is written when the input
/// cannot be read or parsed.
pub fn convert_file(path: &Path) -> Result<PathBuf> {
    let doc = SmfDocument::from_file(path)?;

    let out_path = yaml_sibling(path);
    let file = fs::File::create(&out_path)
        .with_context(|| format!("Failed to create {}", out_path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_yaml::to_writer(&mut writer, &doc)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    Ok(out_path)
}

/// Sibling path with the last extension replaced by `.yaml` (appended when
/// the input has no extension).
pub fn yaml_sibling(path: &Path) -> PathBuf {
    path.with_extension("yaml")
}
