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

//! Helpers for extracting translatable strings from templates.
//!
//! Templates mark their translatable strings, an extractor finds
//! them, a [`MetadataProvider`] tells where they came from, and the
//! [`PoWriter`] saves them in a GNU Gettext PO template. Translators
//! then fill in the template with their usual Gettext tools.
//!
//! # Examples
//!
//! ```
//! use po_extractor::{LiquidExtractor, LiquidMetadataProvider, LocalizableStringCollection, PoWriter};
//!
//! let extractor = LiquidExtractor::new(LiquidMetadataProvider::new("/app/"));
//! let mut strings = LocalizableStringCollection::new();
//! strings.extend(extractor.extract("/app/Index.liquid", r#"{{ "Computer" | t }}"#));
//!
//! let mut output = Vec::new();
//! PoWriter::scoped(&mut output, |writer| {
//!     strings.iter().try_for_each(|string| writer.write_record(string))
//! })
//! .unwrap();
//! assert_eq!(
//!     String::from_utf8(output).unwrap().lines().collect::<Vec<_>>(),
//!     vec![
//!         "#: Index.liquid",
//!         "msgctxt \"Index\"",
//!         "msgid \"Computer\"",
//!         "msgstr \"\"",
//!     ]
//! );
//! ```

pub mod liquid;
mod localizable;
pub mod metadata;
pub mod po;

pub use liquid::LiquidExtractor;
pub use localizable::{LocalizableString, LocalizableStringCollection, LocalizableStringLocation};
pub use metadata::{LiquidExpressionContext, LiquidMetadataProvider, MetadataProvider};
pub use po::PoWriter;
