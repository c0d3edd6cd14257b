use std::path::PathBuf;

use clap::Parser;
use hbnb_store::DEFAULT_FILE;

#[derive(Parser, Debug)]
#[command(
    name = "hbnb",
    about = "HBNB console: manage users, places, reviews and related records in a JSON object store",
    version,
)]
pub struct Cli {
    /// JSON file holding every stored object
    #[arg(short, long, default_value = DEFAULT_FILE)]
    pub file: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Run a console command and exit (repeatable)
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    pub commands: Vec<String>,

    /// Run console commands from a file, or `-` for stdin, and exit
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,
}

impl Cli {
    /// Whether commands come from flags instead of the interactive prompt.
    pub fn is_scripted(&self) -> bool {
        self.script.is_some() || !self.commands.is_empty()
    }
}
