//! Terminal rendering of analysis results. Nothing in here computes anything,
//! it only turns the data returned by the analysis module into text.
use crate::analysis::{SubstitutionCounts, TransmembraneRegion};

const HIGHLIGHT_START: &str = "\x1b[92m";
const HIGHLIGHT_END: &str = "\x1b[0m";

/// Renders the substitution counts the way the command line tool prints them.
pub fn format_substitutions(counts: &SubstitutionCounts) -> String {
    let mut out = String::new();
    if counts.transitions == 0 {
        out.push_str("No transitions found.\n");
    }
    out.push_str(&format!("Total Transversions (V): {}\n", counts.transversions));
    out.push_str(&format!("Total Transitions (S): {}\n", counts.transitions));
    out.push_str(&format!("Transversion Ratio (V/S): {:.2}\n", counts.ratio()));
    out
}

/// Marks every 0-based position of a sequence of length `len` that lies within
/// at least one region.
pub fn covered_positions(len: usize, regions: &[TransmembraneRegion]) -> Vec<bool> {
    (1..=len)
        .map(|position| regions.iter().any(|region| region.covers(position)))
        .collect()
}

/// Wraps every residue covered by a region in a green terminal color escape.
/// With `color` disabled, covered residues are lowercased instead.
pub fn highlight_regions(sequence: &str, regions: &[TransmembraneRegion], color: bool) -> String {
    let covered = covered_positions(sequence.chars().count(), regions);
    let mut out = String::with_capacity(sequence.len());
    for (residue, is_covered) in sequence.chars().zip(covered) {
        match (is_covered, color) {
            (true, true) => {
                out.push_str(HIGHLIGHT_START);
                out.push(residue);
                out.push_str(HIGHLIGHT_END);
            }
            (true, false) => out.extend(residue.to_lowercase()),
            (false, _) => out.push(residue),
        }
    }
    out
}

/// One line per region: its bounds and mean hydrophobicity.
pub fn format_regions(regions: &[TransmembraneRegion]) -> String {
    regions.iter().fold(String::new(), |mut out, region| {
        out.push_str(&format!(
            "  {}-{} -> Average hydrophobicity: {:.2}\n",
            region.start, region.end, region.average
        ));
        out
    })
}

/// The complete report block for one protein sequence.
pub fn format_sequence_scan(
    index: usize,
    sequence: &str,
    regions: &[TransmembraneRegion],
    color: bool,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("\nSequence {}: {}\n", index, sequence));
    if regions.is_empty() {
        out.push_str("There are no transmembrane regions detected.\n");
        return out;
    }
    if color {
        out.push_str("Predicted TM regions (highlighted in green):\n");
    } else {
        out.push_str("Predicted TM regions (shown in lowercase):\n");
    }
    out.push_str(&highlight_regions(sequence, regions, color));
    out.push('\n');
    out.push_str("TM region positions and hydrophobicity scores:\n");
    out.push_str(&format_regions(regions));
    out
}
