//! Qt translation marker output.
//!
//! The generated header holds one `QT_TRANSLATE_NOOP` line per catalog
//! string so the Qt tooling can pick them up for translation. Strings with
//! a disambiguation comment use the three argument `QT_TRANSLATE_NOOP3`
//! form instead.

use std::io::{self, Write};

/// Translation context for template names.
pub const TEMPLATES: &str = "Templates";
/// Translation context for instrument catalog strings.
pub const INSTRUMENTS: &str = "InstrumentsXML";
/// Translation context for score order names.
pub const ORDERS: &str = "OrderXML";

const LICENSE_HEADER: &str = "/*
 * SPDX-License-Identifier: GPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License version 3 as
 * published by the Free Software Foundation.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */
";

/// Writes marker lines to the generated header and mirrors progress on
/// stdout unless quieted.
pub struct MarkerWriter<W: Write> {
    out: W,
    quiet: bool,
}

impl<W: Write> MarkerWriter<W> {
    pub fn new(out: W, quiet: bool) -> Self {
        MarkerWriter { out, quiet }
    }

    /// Write the license comment block. Marker lines follow it directly,
    /// with no separating blank line.
    pub fn preamble(&mut self) -> io::Result<()> {
        self.out.write_all(LICENSE_HEADER.as_bytes())
    }

    /// Append one marker line. An empty comment selects the two argument
    /// form.
    pub fn add(&mut self, category: &str, text: &str, comment: &str) -> io::Result<()> {
        if comment.is_empty() {
            writeln!(self.out, "QT_TRANSLATE_NOOP(\"{}\", \"{}\"),", category, text)
        } else {
            writeln!(
                self.out,
                "QT_TRANSLATE_NOOP3(\"{}\", \"{}\", \"{}\"),",
                category, text, comment
            )
        }
    }

    /// Echo one progress line to stdout.
    pub fn trace(&self, line: &str) {
        if !self.quiet {
            println!("{}", line);
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
