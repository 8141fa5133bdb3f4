//! This crate contains two small sequence analyses written for the midterm
//! assignment of the bioinformatics course.
//! The crate is divided into this base module, an analysis module, a report module
//! and a util module.
//! In the base module the nucleotide type and methods on DNA sequences are implemented
//! (Base, Sequence).
//! The analysis module contains the transition/transversion counter for aligned DNA
//! sequences and the sliding window transmembrane region predictor for proteins.
//! The report module renders analysis results for the terminal, and the util module
//! contains some utility functions for reading sequence data from a file.
//!
use std::fmt;

use self::Base::*;

pub mod analysis;
pub mod error;
pub mod report;
pub mod util;

pub use error::{Result, SeqScanError};

/// Enumeration representing the individual bases of a genome sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
}

impl Base {
    /// Parses a single uppercase nucleotide. Returns `None` for anything else,
    /// lowercase letters included.
    pub fn from_char(c: char) -> Option<Base> {
        match c {
            'A' => Some(A),
            'C' => Some(C),
            'G' => Some(G),
            'T' => Some(T),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            A => 'A',
            C => 'C',
            G => 'G',
            T => 'T',
        }
    }

    /// Adenine and guanine.
    pub fn is_purine(self) -> bool {
        match self {
            A | G => true,
            C | T => false,
        }
    }

    /// Cytosine and thymine.
    pub fn is_pyrimidine(self) -> bool {
        !self.is_purine()
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A type alias for Sequence to a Vector of bases. Note that a Vector is a
/// heap allocated dynamically resizing array.
pub type Sequence = Vec<Base>;

/// Since Sequence is only a type alias, methods can not be directly implemented in it.
/// To circumvent this, a trait SequenceExt is defined which contains useful methods on
/// Sequences like parse().
pub trait SequenceExt {
    /// Parses the input string into a Sequence. Returns an error naming the first
    /// character other than A, C, G or T.
    fn parse(input: &str) -> Result<Sequence> {
        input
            .chars()
            .enumerate()
            .map(|(position, c)| {
                Base::from_char(c).ok_or_else(|| SeqScanError::InvalidResidue {
                    residue: c,
                    position,
                    sequence: input.to_string(),
                })
            })
            .collect()
    }

    /// Renders the sequence back into its one letter representation.
    fn to_letters(&self) -> String;
}

impl SequenceExt for Sequence {
    fn to_letters(&self) -> String {
        self.iter().map(|base| base.to_char()).collect()
    }
}
