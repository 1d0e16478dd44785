//! Instrument catalog pass.
//!
//! Walks the top level `Genre`, `Family` and `InstrumentGroup` elements of
//! `instruments.xml` and emits a marker for every translatable string:
//! group names, instrument descriptions and names, channel names and MIDI
//! action names.
//!
//! A short name is translated in the context of the long name it
//! abbreviates, so the most recent long name rides along as the marker
//! comment. The memo survives across instruments until a short name
//! consumes it or a track name resets it.

use std::io::Write;

use roxmltree::{Document, Node};

use crate::error::Result;
use crate::marker::{MarkerWriter, INSTRUMENTS};
use crate::xml::{child_text, name_text};

pub fn emit_instruments<W: Write>(writer: &mut MarkerWriter<W>, xml: &str) -> Result<()> {
    let doc = Document::parse(xml)?;
    let mut previous_long_name = String::new();

    for child in doc.root_element().children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "Genre" => {
                let name = name_text(child)?;
                writer.trace(&format!("Genre {}", name));
                writer.add(INSTRUMENTS, name, "")?;
            }
            "Family" => {
                let name = name_text(child)?;
                writer.trace(&format!("Family {}", name));
                writer.add(INSTRUMENTS, name, "")?;
            }
            "InstrumentGroup" => {
                let name = name_text(child)?;
                writer.trace(&format!("Instr Group : {}", name));
                writer.add(INSTRUMENTS, name, "")?;
                for instrument in child
                    .children()
                    .filter(|n| n.is_element() && n.tag_name().name() == "Instrument")
                {
                    emit_instrument(writer, instrument, &mut previous_long_name)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn emit_instrument<W: Write>(
    writer: &mut MarkerWriter<W>,
    instrument: Node,
    previous_long_name: &mut String,
) -> Result<()> {
    if let Some(description) = child_text(instrument, "description") {
        writer.trace(&format!("  description : {}", description));
        writer.add(INSTRUMENTS, description, "")?;
    }

    if let Some(long_name) = child_text(instrument, "longName") {
        writer.trace(&format!("  longName : {}", long_name));
        writer.add(INSTRUMENTS, long_name, "")?;
        *previous_long_name = long_name.to_string();
    }

    if let Some(short_name) = child_text(instrument, "shortName") {
        writer.trace(&format!("  shortName : {}", short_name));
        writer.add(INSTRUMENTS, short_name, previous_long_name)?;
        previous_long_name.clear();
    }

    if let Some(track_name) = child_text(instrument, "trackName") {
        writer.trace(&format!("  trackName {}", track_name));
        writer.add(INSTRUMENTS, track_name, "")?;
        previous_long_name.clear();
    }

    for channel in instrument
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "Channel")
    {
        // a channel without a name still gets its actions emitted
        if let Some(name) = channel.attribute("name") {
            writer.trace(&format!("  Channel name : {}", name));
            writer.add(INSTRUMENTS, name, "")?;
        }
        for action in channel
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "MidiAction")
        {
            if let Some(name) = action.attribute("name") {
                writer.trace(&format!("    Channel, MidiAction name :{}", name));
                writer.add(INSTRUMENTS, name, "")?;
            }
        }
    }

    for action in instrument
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "MidiAction")
    {
        if let Some(name) = action.attribute("name") {
            writer.trace(&format!("  Instrument, MidiAction name :{}", name));
            writer.add(INSTRUMENTS, name, "")?;
        }
    }

    Ok(())
}
