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

//! Map template expressions to a message context and a source location.

use crate::LocalizableStringLocation;
use std::path::MAIN_SEPARATOR;

/// Provides the context and location of an expression found by a
/// template engine specific extractor.
pub trait MetadataProvider<C> {
    /// The `msgctxt` for strings found in the expression.
    fn get_context(&self, expression: &C) -> String;

    /// The `#:` reference for strings found in the expression.
    fn get_location(&self, expression: &C) -> LocalizableStringLocation;
}

/// A localizable expression inside a Liquid template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidExpressionContext {
    /// Path of the template containing the expression.
    pub file_path: String,
    /// The source text of the expression, e.g. `{{ "Hello" | t }}`.
    pub expression: String,
}

impl LiquidExpressionContext {
    pub fn new(file_path: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            expression: expression.into(),
        }
    }
}

/// Metadata for `.liquid` files.
///
/// The context of a template is its path relative to `base_path`,
/// with path separators replaced by `.` and the extension removed.
///
/// # Examples
///
/// ```
/// use po_extractor::{LiquidExpressionContext, LiquidMetadataProvider, MetadataProvider};
/// use std::path::MAIN_SEPARATOR_STR as SEP;
///
/// let provider = LiquidMetadataProvider::new(format!("{SEP}app{SEP}"));
/// let expression = LiquidExpressionContext::new(
///     ["", "app", "Views", "Home", "Index.liquid"].join(SEP),
///     r#"{{ "Hello" | t }}"#,
/// );
/// assert_eq!(provider.get_context(&expression), "Views.Home.Index");
/// ```
#[derive(Debug, Clone)]
pub struct LiquidMetadataProvider {
    base_path: String,
}

impl LiquidMetadataProvider {
    pub const EXTENSION: &'static str = ".liquid";

    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    // This is a literal prefix match: callers must pass paths in the
    // same form as the base path.
    fn relative_path<'a>(&self, file_path: &'a str) -> &'a str {
        file_path
            .strip_prefix(self.base_path.as_str())
            .unwrap_or(file_path)
    }
}

impl MetadataProvider<LiquidExpressionContext> for LiquidMetadataProvider {
    fn get_context(&self, expression: &LiquidExpressionContext) -> String {
        let path = self.relative_path(&expression.file_path);
        let path = path.strip_suffix(Self::EXTENSION).unwrap_or(path);
        path.replace(MAIN_SEPARATOR, ".")
    }

    fn get_location(&self, expression: &LiquidExpressionContext) -> LocalizableStringLocation {
        LocalizableStringLocation::new(self.relative_path(&expression.file_path))
    }
}
