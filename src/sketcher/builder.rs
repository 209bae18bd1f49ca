use super::*;

/// Incremental molecule construction, mostly for tests and parsers.
#[derive(Debug, Default)]
pub struct Builder {
    mol: Molecule,
}
impl Builder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            mol: Molecule::new(name),
        }
    }
    pub fn add_atom(&mut self, symbol: &str) -> AtomIdx {
        self.mol.add_atom(Atom::new(symbol))
    }
    pub fn add_bond(
        &mut self,
        start: AtomIdx,
        end: AtomIdx,
        order: BondOrder,
    ) -> Result<BondIdx, LayoutError> {
        self.mol.add_bond(start, end, order)
    }
    /// Add a closed cycle of single bonds over `atoms`.
    pub fn add_cycle(&mut self, atoms: &[AtomIdx]) -> Result<(), LayoutError> {
        for (n, &a) in atoms.iter().enumerate() {
            self.mol
                .add_bond(a, atoms[(n + 1) % atoms.len()], BondOrder::Single)?;
        }
        Ok(())
    }
    pub fn finish(self) -> Molecule {
        self.mol
    }
}
