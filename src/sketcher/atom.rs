use super::*;

/// Transient per-run layout state. Reset at the start of every generation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LayoutFlags {
    pub placed: bool,
    pub visited: bool,
    pub in_ring: bool,
    pub aliphatic: bool,
}
impl LayoutFlags {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub symbol: String,
    pub charge: i8,
    pub isotope: u16,
    pub aromatic: bool,
    pub coordinates: PointF,
    pub flags: LayoutFlags,
    pub(crate) bonds: Vec<BondIdx>,
}
impl Default for Atom {
    fn default() -> Self {
        Self::new("C")
    }
}
impl Atom {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            charge: 0,
            isotope: 0,
            aromatic: false,
            coordinates: PointF::default(),
            flags: LayoutFlags::default(),
            bonds: Vec::new(),
        }
    }
    /// Bonds incident to this atom, in the order they were added.
    pub fn bonds(&self) -> &[BondIdx] {
        &self.bonds
    }
    pub fn degree(&self) -> usize {
        self.bonds.len()
    }
    pub fn is_hydrogen(&self) -> bool {
        self.symbol == "H"
    }
    pub fn covalence(symbol: &str) -> Option<u8> {
        match symbol {
            "H" | "F" | "Cl" | "Br" | "I" => Some(1),
            "O" | "S" => Some(2),
            "B" | "N" | "P" => Some(3),
            "C" | "Si" => Some(4),
            _ => None,
        }
    }
    /// Implicit hydrogens needed to saturate the atom's covalence.
    pub fn hydrogen_count(&self, mol: &Molecule) -> u8 {
        let Some(cov) = Self::covalence(&self.symbol) else {
            return 0;
        };
        let orders: i16 = self
            .bonds
            .iter()
            .map(|&b| mol.bond(b).order as i16)
            .sum();
        (cov as i16 - orders + self.charge as i16).clamp(0, 4) as u8
    }
}

pub type AtomIdx = usize;
