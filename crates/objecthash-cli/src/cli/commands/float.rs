//! `objecthash float` - canonical string form of a float.

use anyhow::{Context, Result};

use crate::cli::args::FloatArgs;
use crate::exit_codes::SUCCESS;

pub fn run(args: FloatArgs) -> Result<i32> {
    let canonical = objecthash::float::normalize(args.value)
        .with_context(|| format!("cannot canonicalize {}", args.value))?;
    println!("{canonical}");
    Ok(SUCCESS)
}
