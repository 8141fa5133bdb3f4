//! This module contains utility methods regarding
//! reading sequences from files.
use std::{fs, path::Path};

use log::{debug, warn};

use super::{Result, SeqScanError, Sequence, SequenceExt};

/// Splits FASTA-like text into records. A line starting with `>` begins a new
/// record and is otherwise discarded; every other non-blank line is trimmed,
/// uppercased and appended to the current record.
pub fn parse_fasta_records(text: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('>') {
            if !current.is_empty() {
                records.push(current);
                current = String::new();
            }
        } else {
            current.extend(line.split_whitespace().map(str::to_uppercase));
        }
    }
    if !current.is_empty() {
        records.push(current);
    }
    records
}

/// Every non-blank line is one complete sequence, trimmed and uppercased.
pub fn parse_line_sequences(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_uppercase)
        .collect()
}

/// Reads the raw records of a FASTA-like file.
pub fn read_fasta_records<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let records = parse_fasta_records(&fs::read_to_string(&path)?);
    debug!(
        "Read {} records from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

/// Reads a file holding one sequence per line.
pub fn read_line_sequences<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let sequences = parse_line_sequences(&fs::read_to_string(&path)?);
    debug!(
        "Read {} sequences from {}",
        sequences.len(),
        path.as_ref().display()
    );
    Ok(sequences)
}

/// Parses every raw record into a DNA sequence. The whole input is checked
/// before anything is returned; the first invalid record is the error.
pub fn parse_dna_records(records: &[String]) -> Result<Vec<Sequence>> {
    records
        .iter()
        .enumerate()
        .map(|(idx, rec)| {
            Sequence::parse(rec).map_err(|e| {
                warn!("Invalid nucleotide found in sequence {}", idx + 1);
                e
            })
        })
        .collect()
}

/// Reads and validates the DNA records stored at `path`.
pub fn read_dna_sequences<P: AsRef<Path>>(path: P) -> Result<Vec<Sequence>> {
    let records = read_fasta_records(path)?;
    if records.is_empty() {
        return Err(SeqScanError::EmptyInput);
    }
    parse_dna_records(&records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Base::*;

    #[test]
    fn fasta_records_are_concatenated() {
        let text = ">human\nATC\n  gtA \n\n>chimp\nATCG\nTA\n";
        let records = parse_fasta_records(text);
        assert_eq!(records, vec!["ATCGTA".to_string(), "ATCGTA".to_string()]);
    }

    #[test]
    fn fasta_without_header_is_one_record() {
        let records = parse_fasta_records("acgt\nAC\n");
        assert_eq!(records, vec!["ACGTAC".to_string()]);
    }

    #[test]
    fn fasta_empty_headers_are_dropped() {
        let records = parse_fasta_records(">a\n>b\nAC\n>c\n");
        assert_eq!(records, vec!["AC".to_string()]);
    }

    #[test]
    fn line_sequences_skip_blank_lines() {
        let seqs = parse_line_sequences("mkl\n\n  IVL  \n");
        assert_eq!(seqs, vec!["MKL".to_string(), "IVL".to_string()]);
    }

    #[test]
    fn dna_records_are_parsed() {
        let records = vec!["ACG".to_string(), "TTA".to_string()];
        let seqs = parse_dna_records(&records).unwrap();
        assert_eq!(seqs[1], vec![T, T, A]);
    }

    #[test]
    fn invalid_record_rejects_whole_input() {
        let records = vec!["ACG".to_string(), "AXG".to_string()];
        assert!(parse_dna_records(&records).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        match read_fasta_records("this/file/does/not/exist.txt") {
            Err(SeqScanError::Io(_)) => {}
            other => panic!("expected io error, got {:?}", other),
        }
    }
}
