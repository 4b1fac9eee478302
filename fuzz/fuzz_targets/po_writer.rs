#![no_main]

use libfuzzer_sys::fuzz_target;
use po_extractor::po::PoWriter;
use po_extractor::LocalizableString;
use po_extractor_fuzz::Record;
use pretty_assertions::assert_eq;

fuzz_target!(|records: Vec<Record>| {
    let records = records
        .into_iter()
        .map(LocalizableString::from)
        .collect::<Vec<_>>();

    let mut output = Vec::new();
    PoWriter::scoped(&mut output, |writer| {
        records.iter().try_for_each(|record| writer.write_record(record))
    })
    .unwrap();
    let output = String::from_utf8(output).unwrap();

    // Escaping keeps every field on its own line, so each record
    // gives exactly one msgid line.
    assert_eq!(
        output
            .lines()
            .filter(|line| line.starts_with("msgid \""))
            .count(),
        records.len()
    );
});
