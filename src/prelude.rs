pub use crate::core::{
    config::{Commands, Config, CFG},
    db::{read_db, Database, DbFunction},
    error::{Error, IbResult},
    host::{proc::ProcHost, Host},
    names::NameTable,
    session::Session,
    Address, Offset,
};
