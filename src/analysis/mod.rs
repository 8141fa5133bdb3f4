//! The two analyses of the crate: counting transitions and transversions over an
//! alignment of DNA sequences, and predicting transmembrane regions of proteins
//! from a sliding window over a hydrophobicity scale.
pub mod substitution;
pub mod transmembrane;

pub use self::substitution::{
    classify_column, count_substitutions, Alignment, SiteClass, SubstitutionCounts,
    SubstitutionSummary,
};
pub use self::transmembrane::{
    find_transmembrane_regions, HydrophobicityScale, InvalidPolicy, SequenceScan, TmPredictor,
    TransmembraneRegion,
};
