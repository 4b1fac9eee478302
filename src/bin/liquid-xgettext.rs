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

//! `xgettext` for Liquid templates
//!
//! This program works like `xgettext`, meaning it will extract
//! translatable strings from the `.liquid` templates found under a
//! directory. The strings are saved in a GNU Gettext PO template,
//! `messages.pot` by default. Each string gets the template's dotted
//! path as its `msgctxt`.

use anyhow::{bail, Context};
use clap::Parser;
use po_extractor::po::template_metadata;
use po_extractor::{LiquidExtractor, LiquidMetadataProvider, LocalizableStringCollection, PoWriter};
use polib::metadata::CatalogMetadata;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(version, about = "Extract translatable strings from Liquid templates")]
struct Args {
    /// Directory to search for `.liquid` templates.
    #[arg(env = "LIQUID_XGETTEXT_INPUT")]
    input: PathBuf,

    /// The PO template to write.
    #[arg(short, long, env = "LIQUID_XGETTEXT_OUTPUT", default_value = "messages.pot")]
    output: PathBuf,

    /// Prefix removed from template paths. Defaults to the input
    /// directory.
    #[arg(long, env = "LIQUID_XGETTEXT_BASE_PATH")]
    base_path: Option<String>,

    /// Value of the `Project-Id-Version` header.
    #[arg(long, env = "LIQUID_XGETTEXT_PROJECT")]
    project: Option<String>,

    /// Value of the `Language` header.
    #[arg(long, env = "LIQUID_XGETTEXT_LANGUAGE", default_value = "en")]
    language: String,

    /// Do not write the header entry.
    #[arg(long)]
    no_header: bool,
}

impl Args {
    fn base_path(&self) -> String {
        match &self.base_path {
            Some(base_path) => base_path.clone(),
            None => {
                let mut base_path = self.input.display().to_string();
                if !base_path.ends_with(MAIN_SEPARATOR) {
                    base_path.push(MAIN_SEPARATOR);
                }
                base_path
            }
        }
    }

    fn header(&self) -> Option<CatalogMetadata> {
        if self.no_header {
            return None;
        }
        let mut metadata = template_metadata();
        if let Some(project) = &self.project {
            metadata.project_id_version = project.clone();
        }
        metadata.language = self.language.clone();
        Some(metadata)
    }
}

/// Find the `.liquid` files under `dir`, sorted by path.
fn find_templates(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }

    let mut templates = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Could not walk {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().is_some_and(|extension| extension == "liquid")
        {
            templates.push(path.to_path_buf());
        }
    }
    Ok(templates)
}

fn create_catalog(args: &Args) -> anyhow::Result<LocalizableStringCollection> {
    let extractor = LiquidExtractor::new(LiquidMetadataProvider::new(args.base_path()));
    let mut strings = LocalizableStringCollection::new();
    for template in find_templates(&args.input)? {
        extractor.extract_file(&template, &mut strings)?;
    }
    Ok(strings)
}

fn write_catalog(
    path: &Path,
    header: Option<&CatalogMetadata>,
    strings: &LocalizableStringCollection,
) -> anyhow::Result<()> {
    if let Some(directory_path) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(directory_path)
            .with_context(|| format!("Could not create {}", directory_path.display()))?;
    }
    let file =
        fs::File::create(path).with_context(|| format!("Could not create {}", path.display()))?;
    PoWriter::scoped(file, |writer| {
        if let Some(header) = header {
            writer.write_header(header)?;
        }
        for string in strings.iter() {
            writer.write_record(string)?;
        }
        Ok::<_, po_extractor::po::Error>(())
    })
    .with_context(|| format!("Writing messages to {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let strings = create_catalog(&args).context("Extracting messages")?;
    write_catalog(&args.output, args.header().as_ref(), &strings)?;
    tracing::info!(
        messages = strings.len(),
        output = %args.output.display(),
        "Wrote PO template"
    );

    Ok(())
}
