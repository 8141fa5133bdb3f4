use serde_derive::{Deserialize, Serialize};

use log::{debug, info, warn};

use std::collections::BTreeMap;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use crate::{Result, SeqScanError};

/// Window width used when predicting membrane spanning segments.
pub const DEFAULT_WINDOW: usize = 19;
/// Windows with a mean hydrophobicity strictly above this value are reported.
pub const DEFAULT_THRESHOLD: f64 = 0.;

const KYTE_DOOLITTLE: [(char, f64); 20] = [
    ('I', 4.5),
    ('V', 4.2),
    ('L', 3.8),
    ('F', 2.8),
    ('C', 2.5),
    ('M', 1.9),
    ('A', 1.8),
    ('G', -0.4),
    ('T', -0.7),
    ('S', -0.8),
    ('W', -0.9),
    ('Y', -1.3),
    ('P', -1.6),
    ('H', -3.2),
    ('E', -3.5),
    ('Q', -3.5),
    ('D', -3.5),
    ('N', -3.5),
    ('K', -3.9),
    ('R', -4.5),
];

/// Per residue hydrophobicity values. The residues present in the scale form
/// the alphabet protein sequences are validated against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HydrophobicityScale {
    values: BTreeMap<char, f64>,
}

impl Default for HydrophobicityScale {
    fn default() -> Self {
        Self::kyte_doolittle()
    }
}

impl HydrophobicityScale {
    pub fn new(values: BTreeMap<char, f64>) -> Result<HydrophobicityScale> {
        if values.is_empty() {
            return Err(SeqScanError::InvalidInput(
                "hydrophobicity scale contains no residues".to_string(),
            ));
        }
        Ok(HydrophobicityScale { values })
    }

    /// The Kyte-Doolittle scale for the 20 standard amino acids.
    pub fn kyte_doolittle() -> HydrophobicityScale {
        HydrophobicityScale {
            values: KYTE_DOOLITTLE.iter().cloned().collect(),
        }
    }

    /// Value of `residue`, 0 for residues missing from the scale.
    pub fn score(&self, residue: char) -> f64 {
        self.values.get(&residue).cloned().unwrap_or(0.)
    }

    pub fn contains(&self, residue: char) -> bool {
        self.values.contains_key(&residue)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Checks that every residue of `sequence` is part of the scale.
    pub fn validate(&self, sequence: &str) -> Result<()> {
        match sequence.chars().enumerate().find(|(_, c)| !self.contains(*c)) {
            Some((position, residue)) => Err(SeqScanError::InvalidResidue {
                residue,
                position,
                sequence: sequence.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn store<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_json::to_string_pretty(self)?.as_bytes())?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let scale: HydrophobicityScale = serde_json::from_reader(file)?;
        Self::new(scale.values)
    }
}

/// A window whose mean hydrophobicity exceeded the threshold.
/// `start` and `end` are 1-based and inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmembraneRegion {
    pub start: usize,
    pub end: usize,
    pub average: f64,
}

impl TransmembraneRegion {
    /// Whether the 1-based `position` lies within the region.
    pub fn covers(&self, position: usize) -> bool {
        self.start <= position && position <= self.end
    }
}

/// Mean of the scale values of `window`; residues missing from the scale count as 0.
pub fn average_hydrophobicity(window: &[char], scale: &HydrophobicityScale) -> f64 {
    if window.is_empty() {
        return 0.;
    }
    let total: f64 = window.iter().map(|c| scale.score(*c)).sum();
    total / window.len() as f64
}

/// Slides a window of `window` residues over `sequence` one position at a time
/// and reports every window with a mean hydrophobicity strictly above `threshold`.
/// Overlapping windows are reported individually. A sequence shorter than the
/// window yields no regions.
pub fn find_transmembrane_regions(
    sequence: &str,
    scale: &HydrophobicityScale,
    window: usize,
    threshold: f64,
) -> Result<Vec<TransmembraneRegion>> {
    if window == 0 {
        return Err(SeqScanError::InvalidInput(
            "window size must be greater than 0".to_string(),
        ));
    }
    let residues: Vec<char> = sequence.chars().collect();
    let regions = residues
        .windows(window)
        .enumerate()
        .filter_map(|(i, residues)| {
            let average = average_hydrophobicity(residues, scale);
            if average > threshold {
                Some(TransmembraneRegion {
                    start: i + 1,
                    end: i + window,
                    average,
                })
            } else {
                None
            }
        })
        .collect();
    Ok(regions)
}

/// What to do with sequences containing residues outside the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPolicy {
    /// Fail the whole run on the first invalid sequence.
    Abort,
    /// Drop invalid sequences with a warning and scan the rest.
    Skip,
}

/// Result of scanning one sequence of the input file.
/// `index` is the 1-based position of the sequence in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceScan {
    pub index: usize,
    pub sequence: String,
    pub regions: Vec<TransmembraneRegion>,
}

/// Scanning parameters, fixed for a whole run.
#[derive(Debug, Clone)]
pub struct TmPredictor {
    scale: HydrophobicityScale,
    window: usize,
    threshold: f64,
}

impl Default for TmPredictor {
    fn default() -> Self {
        TmPredictor {
            scale: HydrophobicityScale::kyte_doolittle(),
            window: DEFAULT_WINDOW,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl TmPredictor {
    pub fn new(scale: HydrophobicityScale, window: usize, threshold: f64) -> Result<TmPredictor> {
        if window == 0 {
            return Err(SeqScanError::InvalidInput(
                "window size must be greater than 0".to_string(),
            ));
        }
        Ok(TmPredictor {
            scale,
            window,
            threshold,
        })
    }

    pub fn scale(&self) -> &HydrophobicityScale {
        &self.scale
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn find_regions(&self, sequence: &str) -> Result<Vec<TransmembraneRegion>> {
        find_transmembrane_regions(sequence, &self.scale, self.window, self.threshold)
    }

    /// Validates every sequence before any of them is scanned, then scans the
    /// valid ones.
    pub fn scan_sequences(
        &self,
        sequences: &[String],
        policy: InvalidPolicy,
    ) -> Result<Vec<SequenceScan>> {
        let mut valid = Vec::with_capacity(sequences.len());
        for (idx, sequence) in sequences.iter().enumerate() {
            match self.scale.validate(sequence) {
                Ok(()) => valid.push((idx + 1, sequence)),
                Err(err) => match policy {
                    InvalidPolicy::Abort => return Err(err),
                    InvalidPolicy::Skip => warn!("Skipping sequence {}: {}", idx + 1, err),
                },
            }
        }
        debug!(
            "{} of {} sequences passed validation",
            valid.len(),
            sequences.len()
        );

        let mut scans = Vec::with_capacity(valid.len());
        for (index, sequence) in valid {
            let regions = self.find_regions(sequence)?;
            info!("Sequence {}: {} candidate windows", index, regions.len());
            scans.push(SequenceScan {
                index,
                sequence: sequence.clone(),
                regions,
            });
        }
        Ok(scans)
    }
}

/// Writes scan results as a JSON array.
pub fn store_scans<P: AsRef<Path>>(scans: &[SequenceScan], path: P) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(scans)?.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn kyte_doolittle_has_twenty_residues() {
        let scale = HydrophobicityScale::kyte_doolittle();
        assert_eq!(scale.len(), 20);
        assert_eq!(scale.score('I'), 4.5);
        assert_eq!(scale.score('R'), -4.5);
        assert_eq!(scale.score('X'), 0.);
    }

    #[test]
    fn isoleucine_window_is_one_region() {
        let scale = HydrophobicityScale::kyte_doolittle();
        let seq = "I".repeat(19);
        let regions = find_transmembrane_regions(&seq, &scale, 19, 0.).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!((regions[0].start, regions[0].end), (1, 19));
        assert!((regions[0].average - 4.5).abs() < EPS);
    }

    #[test]
    fn short_sequence_has_no_regions() {
        let scale = HydrophobicityScale::kyte_doolittle();
        let regions = find_transmembrane_regions("IIIIIIIIII", &scale, 19, 0.).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn overlapping_windows_are_not_merged() {
        let scale = HydrophobicityScale::kyte_doolittle();
        let seq = "I".repeat(21);
        let regions = find_transmembrane_regions(&seq, &scale, 19, 0.).unwrap();
        let bounds: Vec<_> = regions.iter().map(|r| (r.start, r.end)).collect();
        assert_eq!(bounds, vec![(1, 19), (2, 20), (3, 21)]);
    }

    #[test]
    fn threshold_is_strict() {
        let scale = HydrophobicityScale::kyte_doolittle();
        let regions = find_transmembrane_regions("II", &scale, 2, 4.5).unwrap();
        assert!(regions.is_empty());
        let regions = find_transmembrane_regions("KKKK", &scale, 2, 0.).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn hydrophobic_core_is_reported_by_every_positive_window() {
        let scale = HydrophobicityScale::kyte_doolittle();
        let seq = format!("{}{}{}", "K".repeat(10), "L".repeat(5), "K".repeat(10));
        let regions = find_transmembrane_regions(&seq, &scale, 5, 0.).unwrap();
        let bounds: Vec<_> = regions.iter().map(|r| (r.start, r.end)).collect();
        // windows holding at least three leucines stay above zero
        assert_eq!(bounds, vec![(9, 13), (10, 14), (11, 15), (12, 16), (13, 17)]);
        assert!((regions[0].average - 0.72).abs() < EPS);
        assert!((regions[2].average - 3.8).abs() < EPS);
        assert!((regions[4].average - 0.72).abs() < EPS);
    }

    #[test]
    fn unknown_residues_score_zero() {
        let scale = HydrophobicityScale::kyte_doolittle();
        assert!((average_hydrophobicity(&['I', 'X'], &scale) - 2.25).abs() < EPS);
        assert_eq!(average_hydrophobicity(&[], &scale), 0.);
    }

    #[test]
    fn scanner_scores_unknown_residues_as_zero() {
        let scale = HydrophobicityScale::kyte_doolittle();
        let regions = find_transmembrane_regions("IXIX", &scale, 2, 0.).unwrap();
        let bounds: Vec<_> = regions.iter().map(|r| (r.start, r.end)).collect();
        assert_eq!(bounds, vec![(1, 2), (2, 3), (3, 4)]);
        assert!(regions.iter().all(|r| (r.average - 2.25).abs() < EPS));
    }

    #[test]
    fn region_covers_inclusive_bounds() {
        let region = TransmembraneRegion {
            start: 3,
            end: 5,
            average: 1.,
        };
        assert!(!region.covers(2));
        assert!(region.covers(3) && region.covers(5));
        assert!(!region.covers(6));
    }

    #[test]
    fn zero_window_is_rejected() {
        let scale = HydrophobicityScale::kyte_doolittle();
        assert!(find_transmembrane_regions("IIII", &scale, 0, 0.).is_err());
        assert!(TmPredictor::new(scale, 0, 0.).is_err());
    }

    #[test]
    fn validate_reports_offending_residue() {
        let scale = HydrophobicityScale::kyte_doolittle();
        assert!(scale.validate("MKLV").is_ok());
        match scale.validate("MKBV") {
            Err(SeqScanError::InvalidResidue {
                residue, position, ..
            }) => assert_eq!((residue, position), ('B', 2)),
            other => panic!("expected invalid residue, got {:?}", other),
        }
        assert!(scale.validate("mklv").is_err());
    }

    #[test]
    fn abort_policy_stops_before_scanning() {
        let predictor = TmPredictor::default();
        let seqs = vec!["I".repeat(19), "IIZ".to_string()];
        assert!(predictor.scan_sequences(&seqs, InvalidPolicy::Abort).is_err());
    }

    #[test]
    fn skip_policy_keeps_file_numbering() {
        let predictor = TmPredictor::default();
        let seqs = vec!["IIZ".to_string(), "I".repeat(19)];
        let scans = predictor.scan_sequences(&seqs, InvalidPolicy::Skip).unwrap();
        assert_eq!(scans.len(), 1);
        assert_eq!(scans[0].index, 2);
        assert_eq!(scans[0].regions.len(), 1);
    }

    #[test]
    fn empty_scale_is_rejected() {
        assert!(HydrophobicityScale::new(BTreeMap::new()).is_err());
    }
}
