extern crate clap;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

use log::info;

use std::fmt::Display;
use std::process;

extern crate seqscan;
use seqscan::analysis::transmembrane::{self, DEFAULT_THRESHOLD, DEFAULT_WINDOW};
use seqscan::analysis::{Alignment, HydrophobicityScale, InvalidPolicy, TmPredictor};
use seqscan::{analysis, report, util, Result, SeqScanError, SequenceExt};

const DNA_INPUT: &str = "CS Midterm Problem 2.txt";
const PROTEIN_INPUT: &str = "CS Midterm Problem 1.txt";

fn main() {
    env_logger::init();

    let window_default = DEFAULT_WINDOW.to_string();
    let threshold_default = DEFAULT_THRESHOLD.to_string();
    let matches = App::new("seqscan")
        .version("0.1.0")
        .author("Robin William Hundt")
        .about("Counts nucleotide substitutions and predicts transmembrane regions.")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("count_substitutions")
                .about("Counts transitions and transversions over aligned DNA sequences")
                .arg(
                    Arg::with_name("INPUT")
                        .help("FASTA-like file with aligned DNA sequences")
                        .default_value(DNA_INPUT),
                ).arg(
                    Arg::with_name("output")
                        .help("Where to store the counts as json")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .value_name("PATH"),
                ),
        ).subcommand(
            SubCommand::with_name("find_tm_regions")
                .about("Predicts transmembrane regions with a sliding hydrophobicity window")
                .arg(
                    Arg::with_name("INPUT")
                        .help("File with one protein sequence per line")
                        .default_value(PROTEIN_INPUT),
                ).arg(
                    Arg::with_name("window")
                        .help("Number of residues per window")
                        .short("w")
                        .long("window")
                        .takes_value(true)
                        .value_name("N")
                        .default_value(&window_default),
                ).arg(
                    Arg::with_name("threshold")
                        .help("Mean hydrophobicity a window has to exceed")
                        .short("t")
                        .long("threshold")
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .value_name("X")
                        .default_value(&threshold_default),
                ).arg(
                    Arg::with_name("scale")
                        .help("Json file mapping residues to hydrophobicity values (default: Kyte-Doolittle)")
                        .long("scale")
                        .takes_value(true)
                        .value_name("PATH"),
                ).arg(
                    Arg::with_name("skip-invalid")
                        .help("Skip sequences with unknown residues instead of aborting")
                        .long("skip-invalid"),
                ).arg(
                    Arg::with_name("no-color")
                        .help("Mark predicted regions in lowercase instead of color")
                        .long("no-color"),
                ).arg(
                    Arg::with_name("output")
                        .help("Where to store the predicted regions as json")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .value_name("PATH"),
                ),
        ).get_matches();

    let result = if let Some(matches) = matches.subcommand_matches("count_substitutions") {
        exec_count_substitutions(matches)
    } else if let Some(matches) = matches.subcommand_matches("find_tm_regions") {
        exec_find_tm_regions(matches)
    } else {
        Ok(())
    };
    if let Err(err) = result {
        print_and_exit(err);
    }
}

fn exec_count_substitutions(matches: &ArgMatches) -> Result<()> {
    let input = matches.value_of("INPUT").unwrap_or(DNA_INPUT);
    let sequences = util::read_dna_sequences(input)?;
    let letters: Vec<String> = sequences.iter().map(|seq| seq.to_letters()).collect();
    println!("Read dna sequence: {:?}", letters);

    let alignment = Alignment::new(&sequences)?;
    let counts = analysis::count_substitutions(&alignment);
    print!("{}", report::format_substitutions(&counts));

    if let Some(path) = matches.value_of("output") {
        counts.summary().store(path)?;
        println!("Stored counts at: {}", path);
    }
    Ok(())
}

fn exec_find_tm_regions(matches: &ArgMatches) -> Result<()> {
    let input = matches.value_of("INPUT").unwrap_or(PROTEIN_INPUT);
    let window = parse_value::<usize>(matches, "window", DEFAULT_WINDOW)?;
    let threshold = parse_value::<f64>(matches, "threshold", DEFAULT_THRESHOLD)?;
    let scale = match matches.value_of("scale") {
        Some(path) => HydrophobicityScale::load(path)?,
        None => HydrophobicityScale::kyte_doolittle(),
    };
    let policy = if matches.is_present("skip-invalid") {
        InvalidPolicy::Skip
    } else {
        InvalidPolicy::Abort
    };
    let color = !matches.is_present("no-color");

    let predictor = TmPredictor::new(scale, window, threshold)?;
    info!(
        "Scanning {} with window {} and threshold {} over {} scale residues",
        input,
        predictor.window(),
        predictor.threshold(),
        predictor.scale().len()
    );
    let sequences = util::read_line_sequences(input)?;
    let scans = predictor.scan_sequences(&sequences, policy)?;
    for scan in &scans {
        print!(
            "{}",
            report::format_sequence_scan(scan.index, &scan.sequence, &scan.regions, color)
        );
    }

    if let Some(path) = matches.value_of("output") {
        transmembrane::store_scans(&scans, path)?;
        println!("Stored regions at: {}", path);
    }
    Ok(())
}

fn parse_value<T: std::str::FromStr>(matches: &ArgMatches, name: &str, default: T) -> Result<T> {
    match matches.value_of(name) {
        Some(value) => value.parse().map_err(|_| {
            SeqScanError::InvalidInput(format!("invalid value for --{}: {}", name, value))
        }),
        None => Ok(default),
    }
}

fn print_and_exit<T: Display>(err: T) -> ! {
    eprintln!("Aborting!\n{}", err);
    process::exit(1);
}
