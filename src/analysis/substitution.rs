use ndarray::Array2;

use serde_derive::{Deserialize, Serialize};

use log::{debug, warn};

use std::fs::File;
use std::io::prelude::*;
use std::ops::{Add, AddAssign};
use std::path::Path;

use crate::{Base, Result, SeqScanError, Sequence};

/// A set of equally long DNA sequences stored row-wise, one row per sequence.
#[derive(Debug, Clone)]
pub struct Alignment {
    matrix: Array2<Base>,
}

impl Alignment {
    /// Builds an alignment from already validated sequences. Fails when no
    /// sequence is given or when any sequence differs in length from the first one.
    pub fn new(sequences: &[Sequence]) -> Result<Alignment> {
        let first = sequences.first().ok_or(SeqScanError::EmptyInput)?;
        let width = first.len();
        if let Some((index, seq)) = sequences
            .iter()
            .enumerate()
            .find(|(_, seq)| seq.len() != width)
        {
            return Err(SeqScanError::Misaligned {
                index: index + 1,
                expected: width,
                found: seq.len(),
            });
        }

        let bases: Vec<Base> = sequences.iter().flat_map(|seq| seq.iter().cloned()).collect();
        let matrix = Array2::from_shape_vec((sequences.len(), width), bases)
            .map_err(|e| SeqScanError::InvalidInput(e.to_string()))?;
        Ok(Alignment { matrix })
    }

    pub fn num_sequences(&self) -> usize {
        self.matrix.shape()[0]
    }

    /// Number of columns (sites) of the alignment.
    pub fn len(&self) -> usize {
        self.matrix.shape()[1]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classification of a single alignment column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteClass {
    /// Every sequence carries the same base.
    Invariant,
    Transition,
    Transversion,
    /// Three or more distinct bases spanning both chemical classes.
    TransitionAndTransversion,
}

impl SiteClass {
    pub fn counts(self) -> SubstitutionCounts {
        let (transitions, transversions) = match self {
            SiteClass::Invariant => (0, 0),
            SiteClass::Transition => (1, 0),
            SiteClass::Transversion => (0, 1),
            SiteClass::TransitionAndTransversion => (1, 1),
        };
        SubstitutionCounts {
            transitions,
            transversions,
        }
    }
}

/// Classifies one column by the set of distinct bases observed in it.
///
/// Two distinct bases of the same class count as a transition, two of different
/// classes as a transversion. Three or more distinct bases always count as a
/// transition and additionally as a transversion when purines and pyrimidines
/// are both present.
pub fn classify_column<'a, I>(column: I) -> SiteClass
where
    I: IntoIterator<Item = &'a Base>,
{
    // one bit per base, indexed by the discriminant
    let seen = column
        .into_iter()
        .fold(0u8, |seen, base| seen | 1 << *base as u8);
    let has_purine = seen & (1 << Base::A as u8 | 1 << Base::G as u8) != 0;
    let has_pyrimidine = seen & (1 << Base::C as u8 | 1 << Base::T as u8) != 0;

    match seen.count_ones() {
        0 | 1 => SiteClass::Invariant,
        2 => {
            if has_purine && has_pyrimidine {
                SiteClass::Transversion
            } else {
                SiteClass::Transition
            }
        }
        _ => {
            if has_purine && has_pyrimidine {
                SiteClass::TransitionAndTransversion
            } else {
                SiteClass::Transition
            }
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionCounts {
    pub transitions: usize,
    pub transversions: usize,
}

impl Add for SubstitutionCounts {
    type Output = SubstitutionCounts;

    fn add(mut self, other: SubstitutionCounts) -> SubstitutionCounts {
        self += other;
        self
    }
}

impl AddAssign for SubstitutionCounts {
    fn add_assign(&mut self, other: SubstitutionCounts) {
        self.transitions += other.transitions;
        self.transversions += other.transversions;
    }
}

impl SubstitutionCounts {
    /// Transversion to transition ratio rounded to two decimals. Defined as 0
    /// when no transition was observed.
    pub fn ratio(&self) -> f64 {
        if self.transitions == 0 {
            return 0.;
        }
        let ratio = self.transversions as f64 / self.transitions as f64;
        (ratio * 100.).round() / 100.
    }

    pub fn summary(&self) -> SubstitutionSummary {
        SubstitutionSummary {
            transitions: self.transitions,
            transversions: self.transversions,
            ratio: self.ratio(),
        }
    }
}

/// Counts together with the derived ratio, the form written to result files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionSummary {
    pub transitions: usize,
    pub transversions: usize,
    pub ratio: f64,
}

impl SubstitutionSummary {
    pub fn store<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_json::to_string_pretty(self)?.as_bytes())?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// Sums the classification of every column of the alignment.
pub fn count_substitutions(alignment: &Alignment) -> SubstitutionCounts {
    let counts = alignment
        .matrix
        .gencolumns()
        .into_iter()
        .fold(SubstitutionCounts::default(), |counts, column| {
            counts + classify_column(column.iter()).counts()
        });
    debug!(
        "{} sites over {} sequences: {:?}",
        alignment.len(),
        alignment.num_sequences(),
        counts
    );
    if counts.transitions == 0 {
        warn!("No transitions found, ratio reported as 0");
    }
    counts
}
