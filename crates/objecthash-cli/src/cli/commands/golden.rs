//! `objecthash golden` - check fixture files of JSON documents and digests.

use anyhow::{Context, Result};
use objecthash::{GoldenCases, GoldenOutcome, JsonMode};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::cli::args::GoldenArgs;
use crate::exit_codes::{GOLDEN_MISMATCH, SUCCESS};

#[derive(Debug, Default)]
struct Tally {
    passed: usize,
    failed: usize,
}

pub fn run(args: GoldenArgs) -> Result<i32> {
    let mode = JsonMode::from(args.mode);
    let mut tally = Tally::default();

    for path in &args.files {
        check_file(path, mode, args.quiet, &mut tally)?;
    }

    if !args.quiet {
        println!("{} passed, {} failed", tally.passed, tally.failed);
    }
    Ok(if tally.failed == 0 {
        SUCCESS
    } else {
        GOLDEN_MISMATCH
    })
}

fn check_file(path: &Path, mode: JsonMode, quiet: bool, tally: &mut Tally) -> Result<()> {
    let file = File::open(path)
        .with_context(|| format!("failed to open fixture: {}", path.display()))?;
    tracing::info!(fixture = %path.display(), ?mode, "checking golden fixture");

    for case in GoldenCases::new(BufReader::new(file)) {
        let case = case.with_context(|| format!("malformed fixture: {}", path.display()))?;
        let failure = match case.check(mode) {
            GoldenOutcome::Pass => None,
            GoldenOutcome::Mismatch { actual } => Some(format!(
                "expected {} got {actual}",
                case.expected
            )),
            GoldenOutcome::Error(e) => Some(format!("error: {e}")),
        };
        match failure {
            None => tally.passed += 1,
            Some(reason) => {
                tally.failed += 1;
                if !quiet {
                    println!("FAIL {}:{}: {}: {reason}", path.display(), case.line, case.json);
                }
            }
        }
    }
    Ok(())
}
