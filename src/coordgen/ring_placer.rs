//! Placement of rings as regular polygons, one ring system at a time.

use super::*;
use crate::EPSILON;
use ahash::AHashSet;
use std::collections::VecDeque;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingPlacer {
    pub bond_length: f32,
    pub atom_placer: AtomPlacer,
}
impl Default for RingPlacer {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}
impl RingPlacer {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            bond_length: config.bond_length,
            atom_placer: AtomPlacer::new(config),
        }
    }

    /// Circumradius of a regular polygon with `size` sides of `bond_length`.
    pub fn native_ring_radius(size: usize, bond_length: f32) -> f32 {
        bond_length / (2.0 * (PI / size as f32).sin())
    }

    /// Offset from the middle of the first bond to the centre of the first ring,
    /// perpendicular to `bond_vector`.
    pub fn ring_center_of_first_ring(ring: &Ring, bond_vector: PointF, bond_length: f32) -> PointF {
        let radius = Self::native_ring_radius(ring.len(), bond_length);
        let half = bond_length / 2.0;
        let perp = (radius * radius - half * half).max(0.0).sqrt();
        PointF::from_angle(bond_vector.angle() + FRAC_PI_2) * perp
    }

    /// Put the start of `bond` at the origin and its end along `vector`.
    pub fn place_first_bond(&self, mol: &mut Molecule, bond: BondIdx, vector: PointF) {
        let (start, end) = {
            let b = mol.bond(bond);
            (b.start, b.end)
        };
        let s = mol.atom_mut(start);
        s.coordinates = PointF(0.0, 0.0);
        s.flags.placed = true;
        let e = mol.atom_mut(end);
        e.coordinates = vector.with_length(self.bond_length);
        e.flags.placed = true;
    }

    /// The two ends of the shared path between a ring and its placed neighbors.
    pub fn bridge_atoms(
        mol: &Molecule,
        shared_atoms: &[AtomIdx],
        shared_bonds: &[BondIdx],
    ) -> Option<(AtomIdx, AtomIdx)> {
        match shared_atoms {
            [] | [_] => return None,
            [a, b] => return Some((*a, *b)),
            _ => {}
        }
        let ends: Vec<AtomIdx> = shared_atoms
            .iter()
            .copied()
            .filter(|&a| {
                shared_bonds
                    .iter()
                    .filter(|&&b| mol.bond(b).contains(a))
                    .count()
                    == 1
            })
            .collect();
        if let &[a, b] = ends.as_slice() {
            return Some((a, b));
        }
        // no clean path, fall back to the two farthest shared atoms
        let mut best = None;
        let mut best_dist = -1.0;
        for (n, &a) in shared_atoms.iter().enumerate() {
            for &b in &shared_atoms[n + 1..] {
                let d = mol.atom(a).coordinates.distance(mol.atom(b).coordinates);
                if d > best_dist {
                    best_dist = d;
                    best = Some((a, b));
                }
            }
        }
        best
    }

    /// Place the atoms of `ring` not in `shared_atoms`, which are already placed.
    ///
    /// Returns the ring centre, or `None` if the ring is too small to place.
    pub fn place_ring(
        &self,
        mol: &mut Molecule,
        ring: &Ring,
        shared_atoms: &[AtomIdx],
        shared_bonds: &[BondIdx],
        shared_center: PointF,
        direction: PointF,
    ) -> Option<PointF> {
        if ring.len() < 3 {
            log::warn!("skipping degenerate ring of {} atoms", ring.len());
            return None;
        }
        match shared_atoms {
            [] => None,
            [spiro] => Some(self.place_spiro_ring(mol, ring, *spiro, shared_center, direction)),
            _ => {
                let (a1, a2) = Self::bridge_atoms(mol, shared_atoms, shared_bonds)?;
                Some(self.place_fused_ring(mol, ring, shared_atoms, (a1, a2), direction))
            }
        }
    }

    fn place_spiro_ring(
        &self,
        mol: &mut Molecule,
        ring: &Ring,
        spiro: AtomIdx,
        shared_center: PointF,
        direction: PointF,
    ) -> PointF {
        let radius = Self::native_ring_radius(ring.len(), self.bond_length);
        let center = shared_center + direction.with_length(radius);
        let start = (mol.atom(spiro).coordinates - center).angle();
        let pos = ring.position(spiro).unwrap_or(0);
        let atoms: Vec<AtomIdx> = (1..ring.len())
            .map(|i| ring.atoms[(pos + i) % ring.len()])
            .collect();
        let inc = TAU / ring.len() as f32;
        self.atom_placer
            .populate_polygon_corners(mol, &atoms, center, start, inc, radius);
        center
    }

    /// Fused and bridged rings: the arc between the two bridgeheads is
    /// occupied, the remaining atoms go evenly over the rest of the circle.
    fn place_fused_ring(
        &self,
        mol: &mut Molecule,
        ring: &Ring,
        shared_atoms: &[AtomIdx],
        (a1, a2): (AtomIdx, AtomIdx),
        direction: PointF,
    ) -> PointF {
        let n = ring.len();
        let radius = Self::native_ring_radius(n, self.bond_length);
        let (p1, p2) = (mol.atom(a1).coordinates, mol.atom(a2).coordinates);
        let half = p1.distance(p2) / 2.0;
        let offset = (radius * radius - half * half).max(0.0).sqrt();
        // the centre lies on the bisector of the bridgehead chord
        let axis = (p2 - p1).with_length(1.0);
        let mut perp = direction - axis * direction.dot(axis);
        if perp.sq_length() < EPSILON * EPSILON {
            perp = axis.rotated(FRAC_PI_2);
        }
        let center = (p1 + p2) * 0.5 + perp.with_length(offset);

        let (start, other) = if (p1.0 - p2.0).abs() < EPSILON {
            if p1.1 > p2.1 {
                (a1, a2)
            } else {
                (a2, a1)
            }
        } else if p1.0 > p2.0 {
            (a1, a2)
        } else {
            (a2, a1)
        };
        let ps = mol.atom(start).coordinates;
        let po = mol.atom(other).coordinates;
        let occupied = (ps - center).angle_to(po - center);
        let sign = if (po - ps).cross(center - ps) > 0.0 {
            -1.0
        } else {
            1.0
        };

        let pos = ring.position(start).unwrap_or(0);
        let is_shared = |a: AtomIdx| shared_atoms.contains(&a);
        let step = if !is_shared(ring.atoms[(pos + 1) % n]) {
            1
        } else {
            n - 1
        };
        let mut free = Vec::with_capacity(n);
        let mut i = (pos + step) % n;
        while !is_shared(ring.atoms[i]) && free.len() < n {
            free.push(ring.atoms[i]);
            i = (i + step) % n;
        }
        if free.is_empty() {
            return center;
        }
        let inc = sign * (TAU - occupied) / (free.len() + 1) as f32;
        let start_angle = (ps - center).angle();
        self.atom_placer
            .populate_polygon_corners(mol, &free, center, start_angle, inc, radius);
        center
    }

    /// Number of atoms `ring` shares with the other rings of its system.
    fn complexity(rings: &[Ring], ring: RingIdx, set: &[RingIdx]) -> usize {
        set.iter()
            .filter(|&&o| o != ring)
            .map(|&o| rings[ring].shared_atoms(&rings[o]).len())
            .sum()
    }

    /// Lay out every ring of a ring system, starting from the most fused one
    /// at the origin.
    pub fn layout_ring_set(
        &self,
        mol: &mut Molecule,
        rings: &mut [Ring],
        set: &[RingIdx],
        first_bond_vector: PointF,
    ) {
        let set: Vec<RingIdx> = set
            .iter()
            .copied()
            .filter(|&r| {
                let ok = rings[r].len() >= 3;
                if !ok {
                    log::warn!("skipping degenerate ring {r}");
                    rings[r].placed = true;
                }
                ok
            })
            .collect();
        let Some(&first) = set
            .iter()
            .max_by_key(|&&r| Self::complexity(rings, r, &set))
        else {
            return;
        };
        log::debug!("laying out ring system of {} rings from ring {first}", set.len());

        let bond = rings[first].bonds[0];
        self.place_first_bond(mol, bond, first_bond_vector);
        let b = mol.bond(bond);
        let shared = [b.start, b.end];
        let shared_center = math::center(shared.map(|a| mol.atom(a).coordinates));
        let dir = Self::ring_center_of_first_ring(&rings[first], first_bond_vector, self.bond_length);
        if let Some(center) = self.place_ring(mol, &rings[first], &shared, &[bond], shared_center, dir) {
            rings[first].center = center;
        }
        rings[first].placed = true;

        let mut queue = VecDeque::from([first]);
        while let Some(cur) = queue.pop_front() {
            let cur_center = rings[cur].find_center(mol);
            for next in partitioner::direct_connected_rings(rings, cur, &set) {
                if rings[next].placed {
                    continue;
                }
                let placed: Vec<&Ring> = set
                    .iter()
                    .map(|&r| &rings[r])
                    .filter(|r| r.placed)
                    .collect();
                let shared_atoms: Vec<AtomIdx> = rings[next]
                    .atoms
                    .iter()
                    .copied()
                    .filter(|&a| placed.iter().any(|r| r.contains_atom(a)))
                    .collect();
                let shared_bonds: Vec<BondIdx> = rings[next]
                    .bonds
                    .iter()
                    .copied()
                    .filter(|&b| placed.iter().any(|r| r.contains_bond(b)))
                    .collect();
                let shared_center =
                    math::center(shared_atoms.iter().map(|&a| mol.atom(a).coordinates));
                let dir = shared_center - cur_center;
                match self.place_ring(mol, &rings[next], &shared_atoms, &shared_bonds, shared_center, dir) {
                    Some(center) => rings[next].center = center,
                    None => log::warn!("could not attach ring {next} to ring {cur}"),
                }
                rings[next].placed = true;
                queue.push_back(next);
            }
        }
    }

    /// Place the neighbors of every ring atom in `set` that lie outside the
    /// ring system, pointing away from the local ring centre.
    ///
    /// Returns the substituents that were placed.
    pub fn place_ring_substituents(
        &self,
        mol: &mut Molecule,
        rings: &[Ring],
        set: &[RingIdx],
    ) -> Vec<AtomIdx> {
        let mut seen = AHashSet::new();
        let set_atoms: Vec<AtomIdx> = set
            .iter()
            .flat_map(|&r| rings[r].atoms.iter().copied())
            .filter(|&a| seen.insert(a))
            .collect();
        let mut substituents = Vec::new();
        for &atom in &set_atoms {
            let (inside, outside): (Vec<AtomIdx>, Vec<AtomIdx>) =
                mol.neighbors(atom).partition(|nb| seen.contains(nb));
            if outside.is_empty() {
                continue;
            }
            for &o in &outside {
                mol.atom_mut(o).flags.placed = false;
            }
            let shared_center = math::center(
                set.iter()
                    .map(|&r| &rings[r])
                    .filter(|r| r.contains_atom(atom))
                    .flat_map(|r| r.atoms.iter())
                    .map(|&a| mol.atom(a).coordinates),
            );
            self.atom_placer
                .distribute_partners(mol, atom, &inside, shared_center, &outside);
            substituents.extend(outside);
        }
        substituents
    }
}
