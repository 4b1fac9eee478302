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

//! Translatable strings and the places they were found.

use indexmap::map::Entry;
use indexmap::IndexMap;
use std::fmt;
use std::num::NonZeroUsize;

/// One occurrence of a translatable string in a source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizableStringLocation {
    /// Path of the source file, usually relative to the project root.
    pub source_file: String,
    /// Line number, counting from 1.
    pub source_file_line: Option<NonZeroUsize>,
    /// Comment for translators.
    pub comment: Option<String>,
}

impl LocalizableStringLocation {
    /// Create a location in `source_file` without line or comment.
    pub fn new(source_file: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            ..Self::default()
        }
    }

    /// Set the line number. A line of `0` leaves the line unset.
    pub fn with_line(mut self, line: usize) -> Self {
        self.source_file_line = NonZeroUsize::new(line);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Formats the location as it appears in a `#:` reference comment.
///
/// ```
/// use po_extractor::LocalizableStringLocation;
///
/// let location = LocalizableStringLocation::new("File.cs");
/// assert_eq!(location.to_string(), "File.cs");
/// assert_eq!(location.with_line(7).to_string(), "File.cs:7");
/// ```
impl fmt::Display for LocalizableStringLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source_file_line {
            Some(line) => write!(f, "{}:{}", self.source_file, line),
            None => f.write_str(&self.source_file),
        }
    }
}

/// A unit of translatable text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizableString {
    /// The singular source text, becomes the `msgid`.
    pub text: String,
    /// The plural source text, becomes the `msgid_plural`.
    pub text_plural: Option<String>,
    /// Disambiguation string, becomes the `msgctxt`.
    pub context: Option<String>,
    /// Every place the text was found, in the order it was found.
    pub locations: Vec<LocalizableStringLocation>,
}

impl LocalizableString {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_plural(mut self, text_plural: impl Into<String>) -> Self {
        self.text_plural = Some(text_plural.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_location(mut self, location: LocalizableStringLocation) -> Self {
        self.locations.push(location);
        self
    }
}

/// Translatable strings aggregated by text and context.
///
/// Every distinct (`text`, `context`) pair is stored once, in the
/// order it was first added. Adding a string which is already known
/// merges its locations into the existing entry.
///
/// # Examples
///
/// ```
/// use po_extractor::{LocalizableString, LocalizableStringCollection, LocalizableStringLocation};
///
/// let mut strings = LocalizableStringCollection::new();
/// strings.add(LocalizableString::new("Save").with_location(LocalizableStringLocation::new("a.liquid")));
/// strings.add(LocalizableString::new("Save").with_location(LocalizableStringLocation::new("b.liquid")));
/// assert_eq!(strings.len(), 1);
/// assert_eq!(strings.get("Save", None).unwrap().locations.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct LocalizableStringCollection {
    strings: IndexMap<(String, Option<String>), LocalizableString>,
}

impl LocalizableStringCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `string`, merging it with an existing entry with the same
    /// text and context.
    pub fn add(&mut self, string: LocalizableString) {
        let key = (string.text.clone(), string.context.clone());
        match self.strings.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(string);
            }
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                if existing.text_plural.is_none() {
                    existing.text_plural = string.text_plural;
                }
                for location in string.locations {
                    if !existing.locations.contains(&location) {
                        existing.locations.push(location);
                    }
                }
            }
        }
    }

    pub fn get(&self, text: &str, context: Option<&str>) -> Option<&LocalizableString> {
        self.strings
            .get(&(text.to_owned(), context.map(String::from)))
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterate over the strings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LocalizableString> {
        self.strings.values()
    }
}

impl Extend<LocalizableString> for LocalizableStringCollection {
    fn extend<T: IntoIterator<Item = LocalizableString>>(&mut self, iter: T) {
        for string in iter {
            self.add(string);
        }
    }
}

impl IntoIterator for LocalizableStringCollection {
    type Item = LocalizableString;
    type IntoIter = indexmap::map::IntoValues<(String, Option<String>), LocalizableString>;

    fn into_iter(self) -> Self::IntoIter {
        self.strings.into_values()
    }
}
