use thiserror::Error;

pub type IbResult<T> = Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown command")]
    UnknownCommand(String),
    #[error("Insufficient arguments")]
    InsufficientArguments,
    #[error("Too many arguments")]
    TooManyArguments,
    #[error("Name not found")]
    NameNotFound(String),
    #[error("No process attached")]
    NoProcess,
    #[error(transparent)]
    Export(#[from] ron::error::SpannedError),
    #[error(transparent)]
    JsonExport(#[from] serde_json::Error),
    #[error(transparent)]
    Image(#[from] object::read::Error),
    #[error(transparent)]
    Proc(#[from] procfs::ProcError),
    #[error(transparent)]
    Trace(#[from] nix::Error),
    #[cfg(feature = "cli")]
    #[error(transparent)]
    Tokenize(#[from] shell_words::ParseError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
