use arbitrary::Arbitrary;
use po_extractor::{LocalizableString, LocalizableStringLocation};

/// Wrapper struct for generating arbitrary `LocalizableString`s.
#[derive(Arbitrary, Debug)]
pub struct Record {
    pub text: String,
    pub text_plural: Option<String>,
    pub context: Option<String>,
    pub locations: Vec<Location>,
}

/// Wrapper struct for generating arbitrary `LocalizableStringLocation`s.
#[derive(Arbitrary, Debug)]
pub struct Location {
    pub source_file: String,
    pub source_file_line: usize,
    pub comment: Option<String>,
}

impl From<Location> for LocalizableStringLocation {
    fn from(other: Location) -> LocalizableStringLocation {
        let location =
            LocalizableStringLocation::new(other.source_file).with_line(other.source_file_line);
        match other.comment {
            Some(comment) => location.with_comment(comment),
            None => location,
        }
    }
}

impl From<Record> for LocalizableString {
    fn from(other: Record) -> LocalizableString {
        LocalizableString {
            text: other.text,
            text_plural: other.text_plural,
            context: other.context,
            locations: other.locations.into_iter().map(Into::into).collect(),
        }
    }
}
