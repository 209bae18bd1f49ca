use super::*;
use ahash::AHashSet;
use crate::coordgen::{connection, partitioner, AtomPlacer, RingPlacer};

/// Outcome of a layout that didn't fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutStatus {
    /// Every atom has coordinates.
    Complete,
    /// The placement loop gave up; the listed atoms kept whatever coordinates
    /// they had.
    Partial { unplaced: Vec<AtomIdx> },
}
impl LayoutStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Generates 2D coordinates for a connected molecule.
///
/// Rings are laid out first, one ring system at a time, then chains grow
/// outward from whatever is already placed. Ring systems hanging off a chain
/// are laid out on their own and moved into place.
#[derive(Debug, Clone)]
pub struct Sketcher {
    pub config: LayoutConfig,
    atom_placer: AtomPlacer,
    ring_placer: RingPlacer,
    rings: Vec<Ring>,
    ring_sets: Vec<Vec<RingIdx>>,
}
impl Default for Sketcher {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}
impl Sketcher {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            atom_placer: AtomPlacer::new(&config),
            ring_placer: RingPlacer::new(&config),
            config,
            rings: Vec::new(),
            ring_sets: Vec::new(),
        }
    }
    /// Rings of the last laid out molecule, with their centres.
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }
    /// Ring systems of the last laid out molecule, smallest first.
    pub fn ring_sets(&self) -> &[Vec<RingIdx>] {
        &self.ring_sets
    }

    /// Lay out `mol` in place.
    ///
    /// A disconnected molecule is rejected before anything is touched. Any
    /// other input gets a best-effort layout.
    pub fn generate(&mut self, mol: &mut Molecule) -> Result<LayoutStatus, LayoutError> {
        if mol.fragment_count() > 1 {
            return Err(LayoutError::Disconnected {
                fragments: mol.fragment_count(),
            });
        }
        self.rings.clear();
        self.ring_sets.clear();
        for n in 0..mol.atom_count() {
            mol.atom_mut(n).flags.reset();
        }
        match mol.atom_count() {
            0 => return Ok(LayoutStatus::Complete),
            1 => {
                let atom = mol.atom_mut(0);
                atom.coordinates = PointF(0.0, 0.0);
                atom.flags.placed = true;
                return Ok(LayoutStatus::Complete);
            }
            _ => {}
        }

        if mol.expected_ring_count() > 0 {
            self.rings = mol.rings().to_vec();
            for ring in &mut self.rings {
                ring.placed = false;
                for &a in &ring.atoms {
                    mol.atom_mut(a).flags.in_ring = true;
                }
            }
            self.ring_sets = partitioner::partition(&self.rings);
            self.ring_sets.sort_by_key(Vec::len);
            log::debug!(
                "{} rings in {} ring systems",
                self.rings.len(),
                self.ring_sets.len()
            );
            if let Some(largest) = self.ring_sets.last().cloned() {
                self.ring_placer.layout_ring_set(
                    mol,
                    &mut self.rings,
                    &largest,
                    self.config.first_bond_vector,
                );
                self.ring_placer
                    .place_ring_substituents(mol, &self.rings, &largest);
            }
        } else {
            let chain = connection::initial_longest_chain(mol);
            if let Some(&first) = chain.first() {
                for &a in &chain {
                    mol.atom_mut(a).flags.visited = true;
                }
                let atom = mol.atom_mut(first);
                atom.coordinates = PointF(0.0, 0.0);
                atom.flags.placed = true;
                self.atom_placer
                    .place_linear_chain(mol, &chain, self.config.first_bond_vector);
            }
        }

        for _ in 0..mol.atom_count() {
            if mol.atoms().iter().all(|a| a.flags.placed) {
                break;
            }
            let before = self.progress(mol);
            self.handle_aliphatics(mol);
            self.layout_next_ring_system(mol);
            if self.progress(mol) == before {
                break;
            }
        }

        for n in 0..mol.atom_count() {
            let atom = mol.atom_mut(n);
            atom.flags.aliphatic = atom.flags.placed && !atom.flags.in_ring;
        }
        for ring in &mut self.rings {
            ring.find_center(mol);
        }
        if !self.rings.is_empty() {
            mol.store_rings(self.rings.clone());
        }

        let unplaced: Vec<AtomIdx> = (0..mol.atom_count())
            .filter(|&a| !mol.atom(a).flags.placed)
            .collect();
        if unplaced.is_empty() {
            Ok(LayoutStatus::Complete)
        } else {
            log::warn!(
                "layout of {:?} incomplete, {} atoms unplaced",
                mol.name,
                unplaced.len()
            );
            Ok(LayoutStatus::Partial { unplaced })
        }
    }

    fn progress(&self, mol: &Molecule) -> (usize, usize) {
        (
            mol.atoms().iter().filter(|a| a.flags.placed).count(),
            self.rings.iter().filter(|r| r.placed).count(),
        )
    }

    fn in_unplaced_ring(&self, atom: AtomIdx) -> bool {
        self.rings
            .iter()
            .any(|r| !r.placed && r.contains_atom(atom))
    }

    /// A placed atom with an unplaced, non-ring neighbor that chains may grow from.
    fn next_chain_anchor(&self, mol: &Molecule) -> Option<AtomIdx> {
        mol.bonds().iter().find_map(|bond| {
            [(bond.start, bond.end), (bond.end, bond.start)]
                .into_iter()
                .find(|&(from, to)| {
                    let (f, t) = (mol.atom(from), mol.atom(to));
                    f.flags.placed
                        && !t.flags.placed
                        && !t.flags.in_ring
                        && !self.in_unplaced_ring(from)
                })
                .map(|(from, _)| from)
        })
    }

    /// Grow chains from placed atoms until no non-ring atom next to a placed
    /// one is left.
    fn handle_aliphatics(&mut self, mol: &mut Molecule) {
        for _ in 0..mol.atom_count() {
            let Some(at) = self.next_chain_anchor(mol) else {
                break;
            };
            let chain = connection::longest_unplaced_chain_from(mol, at);
            if chain.len() < 2 {
                break;
            }
            for &a in &chain {
                mol.atom_mut(a).flags.visited = true;
            }
            let (unplaced, placed) = AtomPlacer::partition_partners(mol, at);
            let direction = match placed.as_slice() {
                [] => self.config.first_bond_vector,
                [prev] => {
                    let measure = AtomPlacer::placed_center(mol, 0..mol.atom_count());
                    AtomPlacer::next_bond_vector(mol, at, *prev, measure)
                }
                _ => {
                    let center = math::center(placed.iter().map(|&a| mol.atom(a).coordinates));
                    self.atom_placer
                        .distribute_partners(mol, at, &placed, center, &unplaced);
                    mol.atom(chain[1]).coordinates - mol.atom(at).coordinates
                }
            };
            for &a in &chain[1..] {
                mol.atom_mut(a).flags.placed = false;
            }
            log::debug!("placing chain of {} atoms from atom {at}", chain.len());
            self.atom_placer.place_linear_chain(mol, &chain, direction);
        }
    }

    /// Direction to put a new neighbor of `atom` in, away from its placed neighbors.
    fn free_direction(&self, mol: &Molecule, atom: AtomIdx) -> PointF {
        let pos = mol.atom(atom).coordinates;
        let placed: Vec<AtomIdx> = mol
            .neighbors(atom)
            .filter(|&nb| mol.atom(nb).flags.placed)
            .collect();
        let dir = match placed.as_slice() {
            [] => self.config.first_bond_vector,
            [prev] => {
                let measure = AtomPlacer::placed_center(mol, 0..mol.atom_count());
                AtomPlacer::next_bond_vector(mol, atom, *prev, measure)
            }
            _ => pos - math::center(placed.iter().map(|&a| mol.atom(a).coordinates)),
        };
        if dir.sq_length() < f32::EPSILON {
            self.config.first_bond_vector.with_length(1.0)
        } else {
            dir.with_length(1.0)
        }
    }

    /// Lay out the next ring system bonded to the placed part of the molecule
    /// and move it into place. Returns whether a ring system was placed.
    fn layout_next_ring_system(&mut self, mol: &mut Molecule) -> bool {
        // ring atoms placed by chain code only hint where their ring goes
        let mut anchored = AHashSet::new();
        for ring in self.rings.iter().filter(|r| !r.placed) {
            for &a in &ring.atoms {
                let atom = mol.atom_mut(a);
                if atom.flags.placed {
                    atom.flags.placed = false;
                    anchored.insert(a);
                }
            }
        }

        let mut attachment = None;
        for bond in mol.bonds() {
            for (from, to) in [(bond.start, bond.end), (bond.end, bond.start)] {
                if mol.atom(from).flags.placed
                    && !mol.atom(to).flags.placed
                    && self.in_unplaced_ring(to)
                    && (attachment.is_none() || anchored.contains(&to))
                {
                    attachment = Some((from, to));
                }
            }
            if attachment.is_some_and(|(_, to)| anchored.contains(&to)) {
                break;
            }
        }
        let Some((anchor, ring_atom)) = attachment else {
            return false;
        };
        let Some(set) = self
            .ring_sets
            .iter()
            .find(|s| s.iter().any(|&r| self.rings[r].contains_atom(ring_atom)))
            .cloned()
        else {
            return false;
        };

        let anchor_pos = mol.atom(anchor).coordinates;
        let target = if anchored.contains(&ring_atom) {
            mol.atom(ring_atom).coordinates
        } else {
            anchor_pos + self.free_direction(mol, anchor) * self.config.bond_length
        };
        log::debug!(
            "attaching ring system of {} rings at atom {ring_atom} to atom {anchor}",
            set.len()
        );

        self.ring_placer
            .layout_ring_set(mol, &mut self.rings, &set, self.config.first_bond_vector);
        let substituents = self
            .ring_placer
            .place_ring_substituents(mol, &self.rings, &set);

        let fresh_ring = mol.atom(ring_atom).coordinates;
        let fresh_anchor = mol.atom(anchor).coordinates;
        let rotation = (anchor_pos - target).angle() - (fresh_anchor - fresh_ring).angle();
        let mut moved = AHashSet::new();
        let atoms: Vec<AtomIdx> = set
            .iter()
            .flat_map(|&r| self.rings[r].atoms.iter().copied())
            .chain(substituents)
            .filter(|&a| moved.insert(a))
            .collect();
        for a in atoms {
            let atom = mol.atom_mut(a);
            atom.coordinates = (atom.coordinates - fresh_ring).rotated(rotation) + target;
        }
        let atom = mol.atom_mut(anchor);
        atom.coordinates = anchor_pos;
        atom.flags.placed = true;
        for &r in &set {
            self.rings[r].find_center(mol);
        }
        true
    }
}
