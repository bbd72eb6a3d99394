//!
//! FASTA input of symbol sequences
//!
use crate::error::Result;
use bio::io::fasta;
use log::warn;

///
/// uppercase the characters and warn on non-alphabetic ones
///
pub fn sanitize(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .enumerate()
        .map(|(i, &c)| {
            if !c.is_ascii_alphabetic() {
                warn!("informal character `{}` detected in seq[{}]", c as char, i);
            }
            c.to_ascii_uppercase()
        })
        .collect()
}

///
/// (id, sequence) of every record
///
pub fn parse_records<R: std::io::Read>(reader: R) -> Result<Vec<(String, Vec<u8>)>> {
    let reader = fasta::Reader::new(reader);
    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push((record.id().to_string(), sanitize(record.seq())));
    }
    Ok(records)
}

pub fn parse_records_from_file<P: AsRef<std::path::Path>>(
    path: P,
) -> Result<Vec<(String, Vec<u8>)>> {
    let file = std::fs::File::open(path)?;
    parse_records(file)
}
