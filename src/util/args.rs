use std::path::PathBuf;
use structopt::StructOpt;

/// Runs a CODE program from a file, or reads programs interactively.
#[derive(StructOpt)]
pub struct Args {
    #[structopt(name = "FILE_NAME")]
    pub file_name: Option<PathBuf>,

    /// Read SCAN lines from this file instead of prompting.
    #[structopt(short, long, name = "INPUT")]
    pub input: Option<PathBuf>,
}

impl Default for Args {
    fn default() -> Self {
        Self::new()
    }
}

impl Args {
    pub fn new() -> Self {
        Self::from_args()
    }
}
