//! CLI front end: detect structure in an input mesh archive and write
//! the augmented mesh to an output archive.
//!
//! Hand-parsed `std::env::args()` rather than an argument-parsing crate —
//! matching the workspace's existing dependency stack, which pulls in no
//! CLI-parsing crate anywhere.

use std::fs::{self, OpenOptions};
use std::process::ExitCode;

use meshstruct_cli::{log, run_on_archive, DetectionConfig};
use meshstruct_core::NodeId;

struct Args {
    infile: String,
    outfile: String,
    random_seed: Option<u64>,
    start_node: Option<u32>,
}

fn usage() -> &'static str {
    "usage: meshstruct [--random-seed SEED] [--start-node NODE] INFILE OUTFILE"
}

fn parse_args(raw: &[String]) -> Result<Args, String> {
    let mut positional = Vec::new();
    let mut random_seed = None;
    let mut start_node = None;

    let mut iter = raw.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--random-seed" => {
                let value = iter.next().ok_or("--random-seed requires a value")?;
                random_seed = Some(value.parse::<u64>().map_err(|e| format!("--random-seed: {e}"))?);
            }
            "--start-node" => {
                let value = iter.next().ok_or("--start-node requires a value")?;
                start_node = Some(value.parse::<u32>().map_err(|e| format!("--start-node: {e}"))?);
            }
            other => positional.push(other.to_string()),
        }
    }

    if positional.len() != 2 {
        return Err(format!("expected INFILE and OUTFILE, got {} positional argument(s)\n{}", positional.len(), usage()));
    }

    Ok(Args {
        infile: positional[0].clone(),
        outfile: positional[1].clone(),
        random_seed,
        start_node,
    })
}

fn run_cli(args: Args) -> Result<(), String> {
    log(&format!("copying {} to {}", args.infile, args.outfile));
    fs::copy(&args.infile, &args.outfile).map_err(|e| format!("could not copy {} to {}: {e}", args.infile, args.outfile))?;

    let mut config = DetectionConfig::default();
    if let Some(seed) = args.random_seed {
        config.random_seed = seed;
    }
    config.start_node = args.start_node.map(NodeId);

    // Read the pristine input (never the partially-appended outfile); the
    // output sections are appended onto the already-copied outfile, the
    // same way the original tool re-opens its ZipFile in append mode.
    let infile = fs::File::open(&args.infile).map_err(|e| format!("could not open {}: {e}", args.infile))?;
    let outfile = OpenOptions::new()
        .append(true)
        .open(&args.outfile)
        .map_err(|e| format!("could not reopen {} for appending: {e}", args.outfile))?;

    run_on_archive(infile, outfile, &config).map_err(|e| e.to_string())?;
    Ok(())
}

fn main() -> ExitCode {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    match run_cli(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn random_seed_and_start_node_round_trip_through_argv(seed in any::<u64>(), start in any::<u32>()) {
            let raw = vec![
                "--random-seed".to_string(),
                seed.to_string(),
                "in.p".to_string(),
                "--start-node".to_string(),
                start.to_string(),
                "out.p".to_string(),
            ];
            let args = parse_args(&raw).unwrap();
            prop_assert_eq!(args.random_seed, Some(seed));
            prop_assert_eq!(args.start_node, Some(start));
            prop_assert_eq!(args.infile, "in.p");
            prop_assert_eq!(args.outfile, "out.p");
        }
    }

    #[test]
    fn parses_positional_arguments() {
        let args = parse_args(&["in.p.part".to_string(), "out.p".to_string()]).unwrap();
        assert_eq!(args.infile, "in.p.part");
        assert_eq!(args.outfile, "out.p");
        assert!(args.random_seed.is_none());
        assert!(args.start_node.is_none());
    }

    #[test]
    fn parses_options_in_either_position() {
        let args = parse_args(&[
            "--random-seed".to_string(),
            "7".to_string(),
            "in.p.part".to_string(),
            "--start-node".to_string(),
            "12".to_string(),
            "out.p".to_string(),
        ])
        .unwrap();
        assert_eq!(args.random_seed, Some(7));
        assert_eq!(args.start_node, Some(12));
        assert_eq!(args.infile, "in.p.part");
        assert_eq!(args.outfile, "out.p");
    }

    #[test]
    fn rejects_wrong_positional_count() {
        assert!(parse_args(&["only_one.p".to_string()]).is_err());
    }

    #[test]
    fn rejects_malformed_seed_value() {
        let err = parse_args(&[
            "--random-seed".to_string(),
            "not_a_number".to_string(),
            "in".to_string(),
            "out".to_string(),
        ])
        .unwrap_err();
        assert!(err.contains("--random-seed"));
    }
}
