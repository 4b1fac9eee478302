// Copyright 2023 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Writing GNU Gettext PO files.
//!
//! The [`PoWriter`] serializes [`LocalizableString`] records into the
//! PO format, one entry per record:
//!
//! ```text
//! #: Views/Home/Index.liquid:12
//! #. A comment for translators.
//! msgctxt "Views.Home.Index"
//! msgid "Computer"
//! msgid_plural "Computers"
//! msgstr[0] ""
//! ```
//!
//! Only source strings are written, all translations are left empty.

use crate::LocalizableString;
use polib::metadata::CatalogMetadata;
use std::io::{self, BufWriter, Write};

/// The line terminator used between all lines of the output.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// The line terminator used between all lines of the output.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("the PO writer is already closed")]
    Closed,
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Escape `text` for use inside a double-quoted PO string.
///
/// # Examples
///
/// ```
/// use po_extractor::po::escape;
///
/// assert_eq!(escape("Computer"), "Computer");
/// assert_eq!(escape(r#"Say "hi""#), r#"Say \"hi\""#);
/// assert_eq!(escape("a\\b\nc"), r"a\\b\nc");
/// ```
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str(r"\\"),
            '"' => escaped.push_str(r#"\""#),
            '\n' => escaped.push_str(r"\n"),
            '\r' => escaped.push_str(r"\r"),
            '\t' => escaped.push_str(r"\t"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Metadata for the header of a new PO template.
///
/// Every standard header field is set. Fields which only make sense
/// for a translation get the placeholders GNU `xgettext` uses.
///
/// # Examples
///
/// ```
/// use po_extractor::po::template_metadata;
///
/// let metadata = template_metadata();
/// assert_eq!(metadata.language_team, "LANGUAGE <LL@li.org>");
/// assert!(!metadata.pot_creation_date.is_empty());
/// ```
pub fn template_metadata() -> CatalogMetadata {
    let mut metadata = CatalogMetadata::new();
    let now = chrono::Local::now();
    metadata.pot_creation_date = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    metadata.po_revision_date = String::from("YEAR-MO-DA HO:MI+ZONE");
    metadata.last_translator = String::from("FULL NAME <EMAIL@ADDRESS>");
    metadata.language_team = String::from("LANGUAGE <LL@li.org>");
    metadata.mime_version = String::from("1.0");
    metadata.content_type = String::from("text/plain; charset=UTF-8");
    metadata.content_transfer_encoding = String::from("8bit");
    metadata.plural_rules.nplurals = 2;
    metadata.plural_rules.expr = String::from("(n != 1)");
    metadata
}

/// Replace line breaks so `text` fits on a comment line.
fn single_line(text: &str) -> String {
    text.replace('\n', r"\n").replace('\r', r"\r")
}

/// Writes PO entries to an output stream.
///
/// The writer is open until [`close`](PoWriter::close) or
/// [`finish`](PoWriter::finish) is called. Writing to a closed writer
/// fails with [`Error::Closed`]. Entries are not deduplicated or
/// sorted: use a [`LocalizableStringCollection`] to aggregate them
/// first.
///
/// Prefer [`PoWriter::scoped`], which always closes the writer.
///
/// [`LocalizableStringCollection`]: crate::LocalizableStringCollection
#[derive(Debug)]
pub struct PoWriter<W: Write> {
    // `None` once the writer is closed.
    output: Option<BufWriter<W>>,
    entries: usize,
}

impl<W: Write> PoWriter<W> {
    pub fn new(output: W) -> Self {
        Self {
            output: Some(BufWriter::new(output)),
            entries: 0,
        }
    }

    /// Run `write` with a new writer for `output` and close the writer
    /// afterwards, also when `write` fails.
    ///
    /// An error from `write` takes precedence over an error from
    /// flushing the output. If `write` closes the writer itself, it is
    /// not closed again.
    ///
    /// # Examples
    ///
    /// ```
    /// use po_extractor::po::PoWriter;
    /// use po_extractor::LocalizableString;
    ///
    /// let mut output = Vec::new();
    /// PoWriter::scoped(&mut output, |writer| {
    ///     writer.write_record(&LocalizableString::new("Computer"))
    /// })
    /// .unwrap();
    /// assert_eq!(
    ///     String::from_utf8(output).unwrap().lines().collect::<Vec<_>>(),
    ///     vec!["msgid \"Computer\"", "msgstr \"\""]
    /// );
    /// ```
    pub fn scoped<T, E, F>(output: W, write: F) -> Result<T, E>
    where
        F: FnOnce(&mut PoWriter<W>) -> Result<T, E>,
        E: From<Error>,
    {
        let mut writer = PoWriter::new(output);
        let result = write(&mut writer);
        let closed = if writer.is_closed() {
            Ok(())
        } else {
            writer.close()
        };
        let value = result?;
        closed?;
        Ok(value)
    }

    pub fn is_closed(&self) -> bool {
        self.output.is_none()
    }

    /// Number of entries written so far, including the header.
    pub fn entries(&self) -> usize {
        self.entries
    }

    fn output(&mut self) -> Result<&mut BufWriter<W>> {
        self.output.as_mut().ok_or(Error::Closed)
    }

    fn line(&mut self, line: std::fmt::Arguments<'_>) -> Result<()> {
        let output = self.output()?;
        output.write_fmt(line)?;
        output.write_all(LINE_ENDING.as_bytes())?;
        Ok(())
    }

    // Entries are separated by a single blank line.
    fn start_entry(&mut self) -> Result<()> {
        if self.entries > 0 {
            self.line(format_args!(""))?;
        }
        self.entries += 1;
        Ok(())
    }

    /// Write the header entry, the entry with an empty `msgid`.
    ///
    /// All fields of `metadata` are written, also the empty ones.
    pub fn write_header(&mut self, metadata: &CatalogMetadata) -> Result<()> {
        self.output()?;
        self.start_entry()?;
        self.line(format_args!("msgid \"\""))?;
        self.line(format_args!("msgstr \"\""))?;
        for field in metadata.export_for_po().lines() {
            self.line(format_args!("\"{}\\n\"", escape(field)))?;
        }
        Ok(())
    }

    /// Write `record` as one PO entry.
    ///
    /// The fields are written unvalidated: an empty text gives an
    /// entry with `msgid ""`. Line breaks in a source file name are
    /// written as `\n` and `\r` to keep the reference on one line.
    pub fn write_record(&mut self, record: &LocalizableString) -> Result<()> {
        self.output()?;
        self.start_entry()?;

        for location in &record.locations {
            self.line(format_args!("#: {}", single_line(&location.to_string())))?;
            if let Some(comment) = &location.comment {
                for comment_line in comment.lines() {
                    self.line(format_args!("#. {comment_line}"))?;
                }
            }
        }

        if let Some(context) = &record.context {
            self.line(format_args!("msgctxt \"{}\"", escape(context)))?;
        }
        self.line(format_args!("msgid \"{}\"", escape(&record.text)))?;
        match &record.text_plural {
            Some(text_plural) => {
                self.line(format_args!("msgid_plural \"{}\"", escape(text_plural)))?;
                self.line(format_args!("msgstr[0] \"\""))?;
            }
            None => self.line(format_args!("msgstr \"\""))?,
        }

        tracing::debug!(msgid = %record.text, locations = record.locations.len(), "Wrote PO entry");
        Ok(())
    }

    /// Flush the output and close the writer.
    ///
    /// Closing happens once: closing again fails with
    /// [`Error::Closed`]. The writer counts as closed even when the
    /// flush fails.
    pub fn close(&mut self) -> Result<()> {
        let mut output = self.output.take().ok_or(Error::Closed)?;
        output.flush()?;
        tracing::debug!(entries = self.entries, "Closed PO writer");
        Ok(())
    }

    /// Close the writer and return the underlying output.
    pub fn finish(mut self) -> Result<W> {
        let output = self.output.take().ok_or(Error::Closed)?;
        tracing::debug!(entries = self.entries, "Closed PO writer");
        output
            .into_inner()
            .map_err(|err| Error::Io(err.into_error()))
    }
}
