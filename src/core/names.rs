use std::collections::BTreeMap;

use super::{Address, Offset};

/// Name table built from an analysis database. Maps each recovered function
/// name to its offset from the analysis-time image base.
#[derive(Default, Clone)]
pub struct NameTable {
    map: BTreeMap<String, Offset>,
}

impl NameTable {
    pub fn def_name(&mut self, name: String, offset: Offset) {
        self.map.insert(name, offset);
    }

    pub fn offset_of(&self, name: &str) -> Option<Offset> {
        self.map.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn max_name_len(&self) -> usize {
        self.map.keys().map(String::len).max().unwrap_or(0)
    }

    /// All entries ordered by stored offset. The sort is stable, so equal
    /// offsets keep their name order.
    pub fn by_offset(&self) -> Vec<(&str, Offset)> {
        let mut all: Vec<(&str, Offset)> =
            self.map.iter().map(|(n, o)| (n.as_str(), *o)).collect();
        all.sort_by_key(|(_, offset)| *offset);
        all
    }
}

pub fn rel_offset(address: Address, base: Address) -> Offset {
    address.wrapping_sub(base) as Offset
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn offsets_relative_to_base() {
        assert_eq!(0x1000, rel_offset(0x401000, 0x400000));
        assert_eq!(-0x10, rel_offset(0x3ffff0, 0x400000));
        assert_eq!(0x2000, rel_offset(0x2000, 0));
    }

    #[test]
    fn redefining_a_name_replaces_its_offset() {
        let mut table = NameTable::default();
        table.def_name("main".into(), 0x1000);
        table.def_name("main".into(), 0x3000);

        assert_eq!(Some(0x3000), table.offset_of("main"));
        assert_eq!(1, table.len());
    }

    #[test]
    fn lookup_is_exact_match() {
        let mut table = NameTable::default();
        table.def_name("main".into(), 0x1000);

        assert_eq!(None, table.offset_of("mai"));
        assert_eq!(None, table.offset_of("main2"));
    }

    #[test]
    fn by_offset_sorts_ascending() {
        let mut table = NameTable::default();
        table.def_name("helper".into(), 0x2000);
        table.def_name("main".into(), 0x1000);
        table.def_name("init".into(), -0x10);

        let names: Vec<&str> = table.by_offset().iter().map(|(n, _)| *n).collect();
        assert_eq!(vec!["init", "main", "helper"], names);
    }

    #[test]
    fn by_offset_keeps_name_order_on_ties() {
        let mut table = NameTable::default();
        table.def_name("b_alias".into(), 0x1000);
        table.def_name("a_alias".into(), 0x1000);

        let names: Vec<&str> = table.by_offset().iter().map(|(n, _)| *n).collect();
        assert_eq!(vec!["a_alias", "b_alias"], names);
    }

    #[test]
    fn padding_width_tracks_longest_name() {
        let mut table = NameTable::default();
        assert_eq!(0, table.max_name_len());

        table.def_name("main".into(), 0);
        table.def_name("helper".into(), 0);
        assert_eq!(6, table.max_name_len());
    }
}
