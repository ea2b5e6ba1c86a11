use indexmap::IndexMap;

/// Symbols collected in pass 1, mapped to their defining address. Pass 2
/// only reads. Kept in definition order for the symbol-table dump.
#[derive(Debug, Default)]
pub struct SymTab(IndexMap<String, i32>);

impl SymTab {
    pub fn new() -> Self {
        SymTab(IndexMap::new())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// First definition wins; pass 1 rejects duplicates before calling this.
    pub fn insert(&mut self, name: String, address: i32) {
        self.0.entry(name).or_insert(address);
    }

    pub fn get(&self, name: &str) -> Option<i32> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(name, addr)| (name.as_str(), *addr))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
