#![no_main]

use libfuzzer_sys::fuzz_target;
use po_extractor::{LiquidExtractor, LiquidMetadataProvider};

fuzz_target!(|inputs: (&str, &str)| {
    let (file_path, content) = inputs;
    let extractor = LiquidExtractor::new(LiquidMetadataProvider::new(""));
    for string in extractor.extract(file_path, content) {
        assert!(!string.text.is_empty());
        assert!(content.contains(&string.text));
    }
});
