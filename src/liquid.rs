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

//! Find translatable strings in Liquid templates.
//!
//! Strings are marked for translation with the `t` filter:
//!
//! ```liquid
//! <h1>{{ "Welcome" | t }}</h1>
//! {% assign title = 'Hello {0}' | t: user.name %}
//! ```

use crate::metadata::{LiquidExpressionContext, MetadataProvider};
use crate::{LocalizableString, LocalizableStringCollection};
use anyhow::Context;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn translate_filter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = r#"(?x)
              (?:
                  \{\{-?\s*                                 # the opening of an output
                | \{%-?\s*assign\s+[\w.\-]+\s*=\s*          # or of an assignment
              )
              (?:
                  "(?<double>[^"]*)"                      # a double-quoted string
                | '(?<single>[^']*)'                      # or a single-quoted string
              )
              \s*\|\s*t\s*                                # piped into the translate filter
              (?:[:|]|-?[}%]\})                          # then arguments, a filter or the end
        "#;
        Regex::new(pattern).expect("well-formed regex")
    })
}

/// Matches the blocks whose content Liquid never renders.
fn verbatim_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = r#"(?xs)
              \{%-?\s*comment\s*-?%\} .*? \{%-?\s*endcomment\s*-?%\}
            | \{%-?\s*raw\s*-?%\} .*? \{%-?\s*endraw\s*-?%\}
        "#;
        Regex::new(pattern).expect("well-formed regex")
    })
}

/// Extracts strings passed to the `t` filter.
#[derive(Debug, Clone)]
pub struct LiquidExtractor<P> {
    metadata: P,
}

impl<P: MetadataProvider<LiquidExpressionContext>> LiquidExtractor<P> {
    pub fn new(metadata: P) -> Self {
        Self { metadata }
    }

    /// Extract the translatable strings in `content`, the text of the
    /// template at `file_path`.
    ///
    /// Only a string literal that comes first in an output, or first
    /// on the right of an `assign`, is picked up. Strings inside
    /// `comment` and `raw` blocks are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use po_extractor::{LiquidExtractor, LiquidMetadataProvider};
    ///
    /// let extractor = LiquidExtractor::new(LiquidMetadataProvider::new(""));
    /// let strings = extractor.extract("Index.liquid", r#"<p>{{ "Hello" | t }}</p>"#);
    /// assert_eq!(strings[0].text, "Hello");
    /// assert_eq!(strings[0].context.as_deref(), Some("Index"));
    /// ```
    pub fn extract(&self, file_path: &str, content: &str) -> Vec<LocalizableString> {
        let skipped = verbatim_block()
            .find_iter(content)
            .map(|block| block.range())
            .collect::<Vec<_>>();
        translate_filter()
            .captures_iter(content)
            .filter(|captures| {
                let start = captures.get(0).map_or(0, |m| m.start());
                !skipped.iter().any(|block| block.contains(&start))
            })
            .filter_map(|captures| {
                let text = captures
                    .name("double")
                    .or_else(|| captures.name("single"))?
                    .as_str();
                if text.is_empty() {
                    return None;
                }
                let expression = LiquidExpressionContext::new(file_path, &captures[0]);
                Some(LocalizableString {
                    text: String::from(text),
                    text_plural: None,
                    context: Some(self.metadata.get_context(&expression)),
                    locations: vec![self.metadata.get_location(&expression)],
                })
            })
            .collect()
    }

    /// Read the template at `path` and add its strings to `strings`.
    ///
    /// Returns the number of strings found in the file.
    pub fn extract_file(
        &self,
        path: &Path,
        strings: &mut LocalizableStringCollection,
    ) -> anyhow::Result<usize> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let extracted = self.extract(&path.to_string_lossy(), &content);
        let count = extracted.len();
        tracing::debug!(path = %path.display(), count, "Extracted strings");
        strings.extend(extracted);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LiquidMetadataProvider, LocalizableStringLocation};
    use pretty_assertions::assert_eq;

    fn extractor() -> LiquidExtractor<LiquidMetadataProvider> {
        LiquidExtractor::new(LiquidMetadataProvider::new(""))
    }

    /// Extract the texts in `content`, assert they match `expected`.
    #[track_caller]
    fn assert_extract_texts(content: &str, expected: &[&str]) {
        assert_eq!(
            extractor()
                .extract("Index.liquid", content)
                .iter()
                .map(|string| string.text.as_str())
                .collect::<Vec<_>>(),
            expected
        );
    }

    #[test]
    fn test_extract_empty() {
        assert_extract_texts("", &[]);
    }

    #[test]
    fn test_extract_output() {
        assert_extract_texts(r#"<h1>{{ "Welcome" | t }}</h1>"#, &["Welcome"]);
    }

    #[test]
    fn test_extract_single_quotes() {
        assert_extract_texts(r#"{{ 'Don"t panic' | t }}"#, &[r#"Don"t panic"#]);
    }

    #[test]
    fn test_extract_without_spaces() {
        assert_extract_texts(r#"{{"Welcome"|t}}"#, &["Welcome"]);
    }

    #[test]
    fn test_extract_filter_arguments() {
        assert_extract_texts(
            r#"{{ "Hello {0}, you have {1} messages" | t: user.name, count }}"#,
            &["Hello {0}, you have {1} messages"],
        );
    }

    #[test]
    fn test_extract_tag() {
        assert_extract_texts(
            r#"{% assign title = "Dashboard" | t %}<title>{{ title }}</title>"#,
            &["Dashboard"],
        );
    }

    #[test]
    fn test_extract_multiple() {
        assert_extract_texts(
            "<ul>\n\
             <li>{{ \"Home\" | t }}</li>\n\
             <li>{{ \"About\" | t }}</li>\n\
             </ul>",
            &["Home", "About"],
        );
    }

    #[test]
    fn test_extract_ignores_other_filters() {
        assert_extract_texts(
            r#"{{ "Welcome" | upcase }} {{ "tag" | truncate: 3 }} {{ name | t }}"#,
            &[],
        );
    }

    #[test]
    fn test_extract_ignores_text_outside_expressions() {
        assert_extract_texts(r#"<p>"Welcome" | t</p>"#, &[]);
    }

    #[test]
    fn test_extract_ignores_arguments_of_other_filters() {
        assert_extract_texts(r#"{{ "x" | append: "y" | t }}"#, &[]);
        assert_extract_texts(r#"{{ title | default: "Untitled" | t }}"#, &[]);
    }

    #[test]
    fn test_extract_translated_then_filtered() {
        assert_extract_texts(r#"{{- "Welcome" | t | upcase -}}"#, &["Welcome"]);
    }

    #[test]
    fn test_extract_brace_in_filter_argument() {
        assert_extract_texts(r#"{{ "Hi {0}" | t: "}" }}"#, &["Hi {0}"]);
    }

    #[test]
    fn test_extract_skips_comment_and_raw_blocks() {
        assert_extract_texts(r#"{% comment %}{{ "Old" | t }}{% endcomment %}"#, &[]);
        assert_extract_texts(
            "{%- raw -%}{{ \"Literal\" | t }}{%- endraw -%}\n\
             {% comment %}\n{{ \"Old\" | t }}\n{% endcomment %}\n\
             {{ \"New\" | t }}",
            &["New"],
        );
    }

    #[test]
    fn test_extract_ignores_empty_strings() {
        assert_extract_texts(r#"{{ "" | t }}"#, &[]);
    }

    #[test]
    fn test_extract_metadata() {
        let extractor = LiquidExtractor::new(LiquidMetadataProvider::new("/app/"));
        let strings = extractor.extract("/app/Index.liquid", r#"{{ "Welcome" | t }}"#);
        assert_eq!(
            strings,
            vec![LocalizableString {
                text: String::from("Welcome"),
                text_plural: None,
                context: Some(String::from("Index")),
                locations: vec![LocalizableStringLocation::new("Index.liquid")],
            }]
        );
    }

    #[test]
    fn test_extract_file() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let base_path = format!("{}{}", tmpdir.path().display(), std::path::MAIN_SEPARATOR);
        let path = tmpdir.path().join("Index.liquid");
        std::fs::write(
            &path,
            "{{ \"Welcome\" | t }}\n\
             {{ \"Logout\" | t }}\n\
             {{ \"Welcome\" | t }}\n",
        )?;

        let extractor = LiquidExtractor::new(LiquidMetadataProvider::new(base_path));
        let mut strings = LocalizableStringCollection::new();
        assert_eq!(extractor.extract_file(&path, &mut strings)?, 3);
        assert_eq!(strings.len(), 2);
        assert_eq!(
            strings.get("Welcome", Some("Index")).unwrap().locations,
            vec![LocalizableStringLocation::new("Index.liquid")]
        );
        Ok(())
    }

    #[test]
    fn test_extract_file_missing() {
        let mut strings = LocalizableStringCollection::new();
        let result = extractor().extract_file(Path::new("/no/such/file.liquid"), &mut strings);
        assert!(result.is_err());
        assert!(strings.is_empty());
    }
}
