use midly::{MetaMessage, MidiMessage, TrackEventKind};

use crate::value::{FieldMap, FieldValue};

/// Describe one track event as an ordered field mapping.
///
/// Every mapping starts with a `type` field naming the event, followed by
/// the event's own fields. Names follow the vocabulary most MIDI tooling
/// uses (`note_on`, `set_tempo`, `pitchwheel`, ...), so the dumped files
/// diff cleanly against output from other dump tools.
pub fn event_fields(kind: &TrackEventKind) -> FieldMap {
    let mut fields = FieldMap::new();
    match kind {
        TrackEventKind::Midi { channel, message } => {
            let ch = channel.as_int() as i64;
            match message {
                MidiMessage::NoteOff { key, vel } => {
                    fields.push("type", "note_off");
                    fields.push("channel", ch);
                    fields.push("note", key.as_int());
                    fields.push("velocity", vel.as_int());
                }
                MidiMessage::NoteOn { key, vel } => {
                    fields.push("type", "note_on");
                    fields.push("channel", ch);
                    fields.push("note", key.as_int());
                    fields.push("velocity", vel.as_int());
                }
                MidiMessage::Aftertouch { key, vel } => {
                    fields.push("type", "polytouch");
                    fields.push("channel", ch);
                    fields.push("note", key.as_int());
                    fields.push("value", vel.as_int());
                }
                MidiMessage::Controller { controller, value } => {
                    fields.push("type", "control_change");
                    fields.push("channel", ch);
                    fields.push("control", controller.as_int());
                    fields.push("value", value.as_int());
                }
                MidiMessage::ProgramChange { program } => {
                    fields.push("type", "program_change");
                    fields.push("channel", ch);
                    fields.push("program", program.as_int());
                }
                MidiMessage::ChannelAftertouch { vel } => {
                    fields.push("type", "aftertouch");
                    fields.push("channel", ch);
                    fields.push("value", vel.as_int());
                }
                MidiMessage::PitchBend { bend } => {
                    fields.push("type", "pitchwheel");
                    fields.push("channel", ch);
                    // raw 0x2000 means "no bend"; report the signed offset
                    fields.push("pitch", i64::from(bend.0.as_int()) - 8192);
                }
            }
        }
        TrackEventKind::SysEx(data) => {
            fields.push("type", "sysex");
            fields.push("data", *data);
        }
        TrackEventKind::Escape(data) => {
            fields.push("type", "escape");
            fields.push("data", *data);
        }
        TrackEventKind::Meta(meta) => meta_fields(meta, &mut fields),
    }
    fields
}

fn meta_fields(meta: &MetaMessage, fields: &mut FieldMap) {
    match meta {
        MetaMessage::TrackNumber(number) => {
            fields.push("type", "sequence_number");
            fields.push("number", number.unwrap_or(0));
        }
        MetaMessage::Text(raw) => {
            fields.push("type", "text");
            fields.push("text", text_value(raw));
        }
        MetaMessage::Copyright(raw) => {
            fields.push("type", "copyright");
            fields.push("text", text_value(raw));
        }
        MetaMessage::TrackName(raw) => {
            fields.push("type", "track_name");
            fields.push("name", text_value(raw));
        }
        MetaMessage::InstrumentName(raw) => {
            fields.push("type", "instrument_name");
            fields.push("name", text_value(raw));
        }
        MetaMessage::Lyric(raw) => {
            fields.push("type", "lyrics");
            fields.push("text", text_value(raw));
        }
        MetaMessage::Marker(raw) => {
            fields.push("type", "marker");
            fields.push("text", text_value(raw));
        }
        MetaMessage::CuePoint(raw) => {
            fields.push("type", "cue_marker");
            fields.push("text", text_value(raw));
        }
        MetaMessage::ProgramName(raw) => {
            fields.push("type", "program_name");
            fields.push("name", text_value(raw));
        }
        MetaMessage::DeviceName(raw) => {
            fields.push("type", "device_name");
            fields.push("name", text_value(raw));
        }
        MetaMessage::MidiChannel(channel) => {
            fields.push("type", "channel_prefix");
            fields.push("channel", channel.as_int());
        }
        MetaMessage::MidiPort(port) => {
            fields.push("type", "midi_port");
            fields.push("port", port.as_int());
        }
        MetaMessage::EndOfTrack => {
            fields.push("type", "end_of_track");
        }
        MetaMessage::Tempo(tempo) => {
            fields.push("type", "set_tempo");
            // microseconds per quarter note
            fields.push("tempo", tempo.as_int());
        }
        MetaMessage::SmpteOffset(time) => {
            fields.push("type", "smpte_offset");
            fields.push("frame_rate", time.fps().as_int());
            fields.push("hours", time.hour());
            fields.push("minutes", time.minute());
            fields.push("seconds", time.second());
            fields.push("frames", time.frame());
            fields.push("sub_frames", time.subframe());
        }
        MetaMessage::TimeSignature(numerator, denominator_pow2, clocks, notated) => {
            fields.push("type", "time_signature");
            fields.push("numerator", *numerator);
            // the file stores the denominator as a power of two; an
            // exponent too large to expand keeps the raw byte
            match 1i64
                .checked_shl(u32::from(*denominator_pow2))
                .filter(|d| d.is_positive())
            {
                Some(denominator) => fields.push("denominator", denominator),
                None => fields.push("denominator_pow2", *denominator_pow2),
            }
            fields.push("clocks_per_click", *clocks);
            fields.push("notated_32nd_notes_per_beat", *notated);
        }
        MetaMessage::KeySignature(sharps, minor) => {
            fields.push("type", "key_signature");
            match key_name(*sharps, *minor) {
                Some(key) => fields.push("key", key),
                // out-of-range accidental counts have no name; keep the
                // raw numbers so the dump stays lossless
                None => {
                    fields.push("sharps", *sharps as i64);
                    fields.push("minor", *minor as i64);
                }
            }
        }
        MetaMessage::SequencerSpecific(raw) => {
            fields.push("type", "sequencer_specific");
            fields.push("data", *raw);
        }
        MetaMessage::Unknown(type_byte, raw) => {
            fields.push("type", "unknown_meta");
            fields.push("type_byte", *type_byte);
            fields.push("data", *raw);
        }
    }
}

/// Decode a textual meta payload. Valid UTF-8 becomes a string; anything
/// else stays a byte sequence so no information is dropped.
fn text_value(raw: &[u8]) -> FieldValue {
    match std::str::from_utf8(raw) {
        Ok(text) => FieldValue::Text(text.to_string()),
        Err(_) => FieldValue::Bytes(raw.to_vec()),
    }
}

const MAJOR_KEYS: [&str; 15] = [
    "Cb", "Gb", "Db", "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#",
];
const MINOR_KEYS: [&str; 15] = [
    "Abm", "Ebm", "Bbm", "Fm", "Cm", "Gm", "Dm", "Am", "Em", "Bm", "F#m", "C#m", "G#m", "D#m",
    "A#m",
];

/// Name a key signature from its accidental count (-7 flats ..= 7 sharps).
fn key_name(sharps: i8, minor: bool) -> Option<&'static str> {
    let index = usize::try_from(i16::from(sharps) + 7).ok()?;
    let table = if minor { &MINOR_KEYS } else { &MAJOR_KEYS };
    table.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_on_fields_in_order() {
        let kind = TrackEventKind::Midi {
            channel: 0.into(),
            message: MidiMessage::NoteOn {
                key: 60.into(),
                vel: 64.into(),
            },
        };
        let fields = event_fields(&kind);
        let names: Vec<_> = fields.names().collect();
        assert_eq!(names, ["type", "channel", "note", "velocity"]);
        assert_eq!(fields.get("type").and_then(FieldValue::as_text), Some("note_on"));
        assert_eq!(fields.get("note").and_then(FieldValue::as_int), Some(60));
        assert_eq!(fields.get("velocity").and_then(FieldValue::as_int), Some(64));
    }

    #[test]
    fn tempo_is_microseconds_per_quarter() {
        let kind = TrackEventKind::Meta(MetaMessage::Tempo(500_000.into()));
        let fields = event_fields(&kind);
        assert_eq!(fields.get("type").and_then(FieldValue::as_text), Some("set_tempo"));
        assert_eq!(fields.get("tempo").and_then(FieldValue::as_int), Some(500_000));
    }

    #[test]
    fn track_name_decodes_utf8() {
        let kind = TrackEventKind::Meta(MetaMessage::TrackName(b"Piano"));
        let fields = event_fields(&kind);
        assert_eq!(fields.get("name").and_then(FieldValue::as_text), Some("Piano"));
    }

    #[test]
    fn invalid_utf8_text_falls_back_to_bytes() {
        let raw = [0xff, 0xfe, 0x41];
        let kind = TrackEventKind::Meta(MetaMessage::Text(&raw));
        let fields = event_fields(&kind);
        assert_eq!(
            fields.get("text").and_then(FieldValue::as_bytes),
            Some(&raw[..])
        );
    }

    #[test]
    fn time_signature_denominator_is_expanded() {
        let kind = TrackEventKind::Meta(MetaMessage::TimeSignature(6, 3, 24, 8));
        let fields = event_fields(&kind);
        let names: Vec<_> = fields.names().collect();
        assert_eq!(
            names,
            [
                "type",
                "numerator",
                "denominator",
                "clocks_per_click",
                "notated_32nd_notes_per_beat"
            ]
        );
        assert_eq!(fields.get("numerator").and_then(FieldValue::as_int), Some(6));
        assert_eq!(fields.get("denominator").and_then(FieldValue::as_int), Some(8));
    }

    #[test]
    fn large_time_signature_denominators_expand() {
        let fields =
            event_fields(&TrackEventKind::Meta(MetaMessage::TimeSignature(4, 32, 24, 8)));
        assert_eq!(
            fields.get("denominator").and_then(FieldValue::as_int),
            Some(1i64 << 32)
        );

        // 62 is the last exponent whose denominator fits a signed value
        let fields =
            event_fields(&TrackEventKind::Meta(MetaMessage::TimeSignature(4, 62, 24, 8)));
        assert_eq!(
            fields.get("denominator").and_then(FieldValue::as_int),
            Some(1i64 << 62)
        );
    }

    #[test]
    fn unrepresentable_time_signature_denominator_keeps_the_raw_exponent() {
        for exponent in [63, 64, 255] {
            let fields = event_fields(&TrackEventKind::Meta(MetaMessage::TimeSignature(
                4, exponent, 24, 8,
            )));
            assert!(fields.get("denominator").is_none());
            assert_eq!(
                fields.get("denominator_pow2").and_then(FieldValue::as_int),
                Some(i64::from(exponent))
            );
        }
    }

    #[test]
    fn pitchwheel_is_centered_on_zero() {
        let kind = TrackEventKind::Midi {
            channel: 3.into(),
            message: MidiMessage::PitchBend {
                bend: midly::PitchBend(0x2000.into()),
            },
        };
        let fields = event_fields(&kind);
        assert_eq!(fields.get("pitch").and_then(FieldValue::as_int), Some(0));
        assert_eq!(fields.get("channel").and_then(FieldValue::as_int), Some(3));
    }

    #[test]
    fn sysex_keeps_raw_bytes() {
        let raw = [0x7e, 0x7f, 0x09, 0x01, 0xf7];
        let kind = TrackEventKind::SysEx(&raw);
        let fields = event_fields(&kind);
        assert_eq!(fields.get("type").and_then(FieldValue::as_text), Some("sysex"));
        assert_eq!(fields.get("data").and_then(FieldValue::as_bytes), Some(&raw[..]));
    }

    #[test]
    fn key_names() {
        assert_eq!(key_name(0, false), Some("C"));
        assert_eq!(key_name(-2, false), Some("Bb"));
        assert_eq!(key_name(3, true), Some("F#m"));
        assert_eq!(key_name(-7, false), Some("Cb"));
        assert_eq!(key_name(7, true), Some("A#m"));
        assert_eq!(key_name(8, false), None);
        assert_eq!(key_name(-8, true), None);
    }

    #[test]
    fn out_of_range_key_signature_keeps_raw_fields() {
        let kind = TrackEventKind::Meta(MetaMessage::KeySignature(9, true));
        let fields = event_fields(&kind);
        assert!(fields.get("key").is_none());
        assert_eq!(fields.get("sharps").and_then(FieldValue::as_int), Some(9));
        assert_eq!(fields.get("minor").and_then(FieldValue::as_int), Some(1));
    }

    #[test]
    fn end_of_track_has_only_a_type() {
        let fields = event_fields(&TrackEventKind::Meta(MetaMessage::EndOfTrack));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("type").and_then(FieldValue::as_text), Some("end_of_track"));
    }
}
