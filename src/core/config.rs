use std::path::PathBuf;

#[cfg(feature = "cli")]
use clap::{CommandFactory, Parser, Subcommand};
#[cfg(feature = "cli")]
use clap_complete::{generate, Generator, Shell};
use lazy_static::lazy_static;

lazy_static! {
    pub static ref CFG: Config = Config::new();
}

#[cfg_attr(feature = "cli", derive(Subcommand))]
#[derive(Clone, Debug)]
pub enum Commands {
    /// Open an interactive session
    Interactive,
    /// Print all loaded names with their runtime addresses
    List,
    /// Resolve a single name to its runtime address
    Solve { name: String },
    /// Set a breakpoint on a name in the target process
    Break { name: String },
}

impl Default for Commands {
    fn default() -> Self {
        Self::Interactive
    }
}

#[derive(Debug, Default)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(author, version, about, long_about = None))]
pub struct Config {
    #[cfg_attr(feature = "cli", command(subcommand))]
    pub command: Option<Commands>,

    // analysis database to load on startup
    #[cfg_attr(feature = "cli", clap(long, short))]
    pub db: Option<PathBuf>,

    // pid of the target process
    #[cfg_attr(feature = "cli", clap(long, short))]
    pub pid: Option<i32>,

    #[cfg_attr(feature = "cli", arg(short, long, action = clap::ArgAction::Count))]
    pub verbose: u8,

    #[cfg_attr(feature = "cli", clap(long, value_name = "SHELL"))]
    #[cfg(feature = "cli")]
    pub completions: Option<Shell>,
}

impl Config {
    #[cfg(feature = "cli")]
    pub fn new() -> Self {
        Self::parse()
    }

    #[cfg(not(feature = "cli"))]
    pub fn new() -> Self {
        Default::default()
    }
}

#[cfg(feature = "cli")]
pub fn generate_completion<G: Generator>(gen: G) {
    generate(
        gen,
        &mut Config::command(),
        Config::command().get_name(),
        &mut std::io::stdout(),
    );
}
