use std::path::Path;

use object::{Object, ObjectSymbol, SymbolKind};

use super::{Database, DbFunction};
use crate::prelude::IbResult;

/// Read function names straight out of a binary's symbol table. The link-time
/// relative base plays the role of the analysis-time image base.
pub fn read_image(path: &Path) -> IbResult<Database> {
    let data = std::fs::read(path)?;
    let file = object::File::parse(&*data)?;

    let image_base = file.relative_address_base();
    let mut functions = collect(file.symbols());
    if functions.is_empty() {
        // stripped binary, the dynamic table is all that is left
        functions = collect(file.dynamic_symbols());
    }
    log::debug!(
        "{}: {} functions, base 0x{:x}",
        path.display(),
        functions.len(),
        image_base
    );

    Ok(Database {
        image_base,
        functions,
    })
}

fn collect<'data, 'file>(
    symbols: impl Iterator<Item = object::Symbol<'data, 'file>>,
) -> Vec<DbFunction>
where
    'data: 'file,
{
    let mut functions = Vec::new();
    for symbol in symbols {
        if symbol.kind() != SymbolKind::Text {
            continue;
        }
        match symbol.name() {
            Ok(name) if !name.is_empty() => functions.push(DbFunction {
                name: name.into(),
                address: symbol.address(),
            }),
            _ => continue,
        }
    }
    functions
}
