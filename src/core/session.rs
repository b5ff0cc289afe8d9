use std::path::Path;

use super::{
    db::read_db,
    error::{Error, IbResult},
    host::Host,
    names::{rel_offset, NameTable},
    Address, Offset,
};

/// One debugging session: the loaded name table plus the host it resolves
/// against. Command handlers get this passed in instead of sharing a global.
pub struct Session<H: Host> {
    pub names: NameTable,
    pub host: H,
}

impl<H: Host> Session<H> {
    pub fn new(host: H) -> Self {
        Self {
            names: NameTable::default(),
            host,
        }
    }

    /// Rebuild the name table from an analysis database. The previous table
    /// survives any failure; it is only swapped out once the whole database
    /// has been read.
    pub fn load(&mut self, path: &Path) -> IbResult<usize> {
        let db = read_db(path)?;
        let mut names = NameTable::default();
        for fun in db.functions {
            names.def_name(fun.name, rel_offset(fun.address, db.image_base));
        }
        log::info!("{}: {} names loaded", path.display(), names.len());
        self.names = names;
        Ok(self.names.len())
    }

    /// Runtime image base, freshly queried. A missing process means the
    /// target is not loaded anywhere yet, so offsets stand on their own.
    pub fn image_base(&self) -> IbResult<Address> {
        match self.host.image_base() {
            Err(Error::NoProcess) => Ok(0),
            base => base,
        }
    }

    /// Resolve a name to its absolute runtime address.
    pub fn solve(&self, name: &str) -> IbResult<Address> {
        let offset = self
            .names
            .offset_of(name)
            .ok_or_else(|| Error::NameNotFound(name.into()))?;
        Ok(self.image_base()?.wrapping_add_signed(offset))
    }

    /// Resolve a name and plant a breakpoint on it. The address is returned
    /// for reporting.
    pub fn breakpoint(&mut self, name: &str) -> IbResult<Address> {
        let addr = self.solve(name)?;
        self.host.set_breakpoint(addr)?;
        Ok(addr)
    }

    pub fn clean(&mut self) {
        self.names = NameTable::default();
    }

    /// Emit one formatted line per loaded name, ascending by offset. An empty
    /// table emits nothing.
    pub fn list(&self, f: &mut dyn FnMut(&str) -> IbResult<()>) -> IbResult<()> {
        if self.names.is_empty() {
            return Ok(());
        }

        let base = self.image_base()?;
        let width = self.host.addr_width() * 2;
        let name_width = self.names.max_name_len();

        for (name, offset) in self.names.by_offset() {
            f(&format!(
                "0x{addr:0width$x} (base{rel})    {name:<name_width$}",
                addr = base.wrapping_add_signed(offset),
                rel = fmt_offset(offset),
            ))?;
        }
        Ok(())
    }
}

fn fmt_offset(offset: Offset) -> String {
    if offset < 0 {
        format!("-0x{:x}", offset.unsigned_abs())
    } else {
        format!("+0x{:x}", offset)
    }
}
