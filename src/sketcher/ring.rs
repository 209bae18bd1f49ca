use super::*;

/// An elementary cycle: `bonds[i]` joins `atoms[i]` and `atoms[(i + 1) % len]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub atoms: Vec<AtomIdx>,
    pub bonds: Vec<BondIdx>,
    pub center: PointF,
    pub placed: bool,
}
impl Ring {
    pub fn new(atoms: Vec<AtomIdx>, bonds: Vec<BondIdx>) -> Self {
        debug_assert_eq!(atoms.len(), bonds.len());
        Self {
            atoms,
            bonds,
            center: PointF::default(),
            placed: false,
        }
    }
    pub fn len(&self) -> usize {
        self.atoms.len()
    }
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
    pub fn contains_atom(&self, atom: AtomIdx) -> bool {
        self.atoms.contains(&atom)
    }
    pub fn contains_bond(&self, bond: BondIdx) -> bool {
        self.bonds.contains(&bond)
    }
    pub fn position(&self, atom: AtomIdx) -> Option<usize> {
        self.atoms.iter().position(|&a| a == atom)
    }
    /// Atoms of this ring that also belong to `other`, in this ring's order.
    pub fn shared_atoms(&self, other: &Ring) -> Vec<AtomIdx> {
        self.atoms
            .iter()
            .copied()
            .filter(|&a| other.contains_atom(a))
            .collect()
    }
    pub fn shared_bonds(&self, other: &Ring) -> Vec<BondIdx> {
        self.bonds
            .iter()
            .copied()
            .filter(|&b| other.contains_bond(b))
            .collect()
    }
    pub fn shares_atom_with(&self, other: &Ring) -> bool {
        self.atoms.iter().any(|&a| other.contains_atom(a))
    }
    /// Recompute the centroid from the current atom coordinates.
    pub fn find_center(&mut self, mol: &Molecule) -> PointF {
        self.center = math::center(self.atoms.iter().map(|&a| mol.atom(a).coordinates));
        self.center
    }
}

pub type RingIdx = usize;
