pub mod export;
pub mod image;

use std::path::Path;

use serde::Deserialize;

use super::{error::IbResult, Address};

/// What the bridge consumes from an analysis database: the image base the
/// analysis ran at and one (name, address) pair per recovered function.
#[derive(Deserialize, Clone, Debug)]
pub struct DbFunction {
    pub name: String,
    pub address: Address,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Database {
    pub image_base: Address,
    pub functions: Vec<DbFunction>,
}

/// Open an analysis database. Disassembler exports are recognized by
/// extension; anything else is read as a binary symbol table.
pub fn read_db(path: &Path) -> IbResult<Database> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => export::from_ron(&std::fs::read_to_string(path)?),
        Some("json") => export::from_json(&std::fs::read_to_string(path)?),
        _ => image::read_image(path),
    }
}
