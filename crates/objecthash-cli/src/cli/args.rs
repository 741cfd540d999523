use clap::{Args, Parser, Subcommand, ValueEnum};
use objecthash::JsonMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "objecthash",
    version,
    about = "Order-independent digests of JSON documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the digest of a JSON document
    Hash(HashArgs),
    /// Check line-pair fixture files of JSON documents and expected digests
    Golden(GoldenArgs),
    /// Print the canonical string form of a float
    Float(FloatArgs),
    Version,
}

/// How JSON numbers are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Every number is a float: `1` and `1.0` hash the same
    #[default]
    Common,
    /// Integer literals keep the integer tag
    Python,
}

impl From<ModeArg> for JsonMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Common => JsonMode::Common,
            ModeArg::Python => JsonMode::Python,
        }
    }
}

#[derive(Args, Debug)]
pub struct HashArgs {
    /// JSON file to hash; `-` or omitted reads stdin
    pub input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ModeArg::Common, env = "OBJECTHASH_MODE")]
    pub mode: ModeArg,

    /// Treat `**REDACTED**<hex>` strings as the digests they carry
    #[arg(long)]
    pub redacted: bool,
}

#[derive(Args, Debug)]
pub struct GoldenArgs {
    /// Fixture files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[arg(long, value_enum, default_value_t = ModeArg::Common, env = "OBJECTHASH_MODE")]
    pub mode: ModeArg,

    /// Quiet mode - only exit code, no output
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Args, Debug)]
pub struct FloatArgs {
    #[arg(allow_negative_numbers = true)]
    pub value: f64,
}
