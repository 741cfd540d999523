//! `objecthash hash` - digest of one JSON document.

use anyhow::{Context, Result};
use objecthash::{json_hash_with, HashOptions, JsonMode};
use std::io::Read;
use std::path::Path;

use crate::cli::args::HashArgs;
use crate::exit_codes::SUCCESS;

pub fn run(args: HashArgs) -> Result<i32> {
    let text = read_input(args.input.as_deref())?;
    let mode = JsonMode::from(args.mode);
    let options = HashOptions::default().with_redaction_markers(args.redacted);

    let digest = json_hash_with(&text, mode, options).with_context(|| {
        format!(
            "failed to hash {}",
            args.input
                .as_deref()
                .map_or_else(|| "<stdin>".into(), |p| p.display().to_string())
        )
    })?;
    println!("{digest}");
    Ok(SUCCESS)
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        None => read_stdin(),
        Some(p) if p.as_os_str() == "-" => read_stdin(),
        Some(p) => std::fs::read(p)
            .with_context(|| format!("failed to read input file: {}", p.display())),
    }
}

fn read_stdin() -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}
