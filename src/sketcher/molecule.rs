use super::*;

/// Owns atoms and bonds in insertion order. Indices are identities.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Molecule {
    pub name: String,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    fragment_ids: Vec<usize>,
    fragment_count: usize,
    next_fragment: usize,
    sssr: Option<Vec<Ring>>,
}
impl Molecule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
    pub fn add_atom(&mut self, mut atom: Atom) -> AtomIdx {
        atom.bonds.clear();
        let idx = self.atoms.len();
        self.atoms.push(atom);
        // a new atom is always a new fragment
        self.next_fragment += 1;
        self.fragment_ids.push(self.next_fragment);
        self.fragment_count += 1;
        self.sssr = None;
        idx
    }
    pub fn add_bond(
        &mut self,
        start: AtomIdx,
        end: AtomIdx,
        order: BondOrder,
    ) -> Result<BondIdx, LayoutError> {
        self.check_atom(start)?;
        self.check_atom(end)?;
        if start == end {
            return Err(LayoutError::SelfLoop(start));
        }
        let mut bond = Bond::new(start, end);
        bond.order = order;
        let idx = self.bonds.len();
        self.bonds.push(bond);
        self.atoms[start].bonds.push(idx);
        self.atoms[end].bonds.push(idx);
        self.join_fragments(start, end);
        self.sssr = None;
        Ok(idx)
    }
    fn join_fragments(&mut self, a1: AtomIdx, a2: AtomIdx) {
        let f1 = self.fragment_ids[a1];
        let f2 = self.fragment_ids[a2];
        if f1 == f2 {
            return;
        }
        let (before, after) = if f1 < f2 { (f1, f2) } else { (f2, f1) };
        for f in &mut self.fragment_ids {
            if *f == before {
                *f = after;
            }
        }
        self.fragment_count -= 1;
    }
    fn check_atom(&self, atom: AtomIdx) -> Result<(), LayoutError> {
        if atom < self.atoms.len() {
            Ok(())
        } else {
            Err(LayoutError::InvalidAtom(atom))
        }
    }
    /// Remove a bond. Bond indices above it shift down by one; the endpoints stay.
    pub fn remove_bond(&mut self, bond: BondIdx) -> Result<Bond, LayoutError> {
        if bond >= self.bonds.len() {
            return Err(LayoutError::InvalidBond(bond));
        }
        let removed = self.bonds.remove(bond);
        self.rebuild_structure();
        Ok(removed)
    }
    /// Remove an atom with all of its bonds. Atom and bond indices shift down.
    pub fn remove_atom(&mut self, atom: AtomIdx) -> Result<Atom, LayoutError> {
        self.check_atom(atom)?;
        self.bonds.retain(|b| !b.contains(atom));
        for b in &mut self.bonds {
            if b.start > atom {
                b.start -= 1;
            }
            if b.end > atom {
                b.end -= 1;
            }
        }
        let mut removed = self.atoms.remove(atom);
        removed.bonds.clear();
        self.rebuild_structure();
        Ok(removed)
    }
    fn rebuild_structure(&mut self) {
        for a in &mut self.atoms {
            a.bonds.clear();
        }
        self.fragment_ids = (1..=self.atoms.len()).collect();
        self.next_fragment = self.atoms.len();
        self.fragment_count = self.atoms.len();
        for n in 0..self.bonds.len() {
            let (start, end) = (self.bonds[n].start, self.bonds[n].end);
            self.atoms[start].bonds.push(n);
            self.atoms[end].bonds.push(n);
            self.join_fragments(start, end);
        }
        self.sssr = None;
    }

    pub fn atom(&self, atom: AtomIdx) -> &Atom {
        &self.atoms[atom]
    }
    pub fn atom_mut(&mut self, atom: AtomIdx) -> &mut Atom {
        &mut self.atoms[atom]
    }
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }
    pub fn bond(&self, bond: BondIdx) -> &Bond {
        &self.bonds[bond]
    }
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }
    pub fn connected_bonds(&self, atom: AtomIdx) -> &[BondIdx] {
        &self.atoms[atom].bonds
    }
    pub fn degree(&self, atom: AtomIdx) -> usize {
        self.atoms[atom].bonds.len()
    }
    pub fn neighbors(&self, atom: AtomIdx) -> impl Iterator<Item = AtomIdx> + '_ {
        self.atoms[atom]
            .bonds
            .iter()
            .map(move |&b| self.bonds[b].other_atom(atom))
    }
    pub fn find_bond(&self, a1: AtomIdx, a2: AtomIdx) -> Option<BondIdx> {
        self.atoms
            .get(a1)?
            .bonds
            .iter()
            .copied()
            .find(|&b| self.bonds[b].other_atom(a1) == a2)
    }
    pub fn fragment_count(&self) -> usize {
        self.fragment_count
    }
    /// Opaque label of the connected component holding `atom`.
    pub fn fragment_of(&self, atom: AtomIdx) -> usize {
        self.fragment_ids[atom]
    }
    /// `bonds - atoms + 1`, the cycle rank of a connected molecule.
    pub fn expected_ring_count(&self) -> isize {
        self.bonds.len() as isize - self.atoms.len() as isize + 1
    }

    /// Smallest set of smallest rings, computed on first use and cached until the
    /// next structural edit.
    pub fn rings(&mut self) -> &[Ring] {
        if self.sssr.is_none() {
            self.sssr = Some(coordgen::sssr::find_sssr(self));
        }
        match &self.sssr {
            Some(rings) => rings,
            None => &[],
        }
    }
    pub(crate) fn store_rings(&mut self, rings: Vec<Ring>) {
        self.sssr = Some(rings);
    }
    pub fn is_atom_in_ring(&mut self, atom: AtomIdx) -> bool {
        self.rings().iter().any(|r| r.contains_atom(atom))
    }
    pub fn is_bond_in_ring(&mut self, bond: BondIdx) -> bool {
        self.rings().iter().any(|r| r.contains_bond(bond))
    }

    /// Split into one molecule per connected component, keeping the relative
    /// order of atoms and bonds.
    pub fn fragments(&self) -> Vec<Molecule> {
        let mut labels: Vec<usize> = Vec::new();
        let mut out: Vec<Molecule> = Vec::new();
        let mut new_index = vec![0; self.atoms.len()];
        let mut owner = vec![0; self.atoms.len()];
        for (n, atom) in self.atoms.iter().enumerate() {
            let label = self.fragment_ids[n];
            let frag = match labels.iter().position(|&l| l == label) {
                Some(f) => f,
                None => {
                    labels.push(label);
                    out.push(Molecule::new(self.name.clone()));
                    out.len() - 1
                }
            };
            owner[n] = frag;
            new_index[n] = out[frag].add_atom(atom.clone());
        }
        for bond in &self.bonds {
            let frag = &mut out[owner[bond.start]];
            let idx = frag.bonds.len();
            let (start, end) = (new_index[bond.start], new_index[bond.end]);
            frag.bonds.push(Bond {
                start,
                end,
                ..bond.clone()
            });
            frag.atoms[start].bonds.push(idx);
            frag.atoms[end].bonds.push(idx);
            frag.join_fragments(start, end);
        }
        out
    }
    /// Lower-left and upper-right corners of the atom coordinates.
    pub fn bounding_box(&self) -> Option<(PointF, PointF)> {
        let first = self.atoms.first()?.coordinates;
        Some(self.atoms.iter().fold((first, first), |(lo, hi), a| {
            let PointF(x, y) = a.coordinates;
            (PointF(lo.0.min(x), lo.1.min(y)), PointF(hi.0.max(x), hi.1.max(y)))
        }))
    }
    /// Centre of the bounding box.
    pub fn center(&self) -> PointF {
        self.bounding_box()
            .map_or_else(PointF::default, |(lo, hi)| (lo + hi) * 0.5)
    }
}
