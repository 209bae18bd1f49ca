//! Placement of chain atoms and of the partners around a single atom.

use super::*;
use std::f32::consts::{PI, TAU};

/// Places non-ring atoms relative to atoms that already have coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomPlacer {
    pub bond_length: f32,
    pub hydrogen_scale: f32,
}
impl Default for AtomPlacer {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}
impl AtomPlacer {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            bond_length: config.bond_length,
            hydrogen_scale: config.hydrogen_scale,
        }
    }

    /// Split the neighbors of `atom` into `(unplaced, placed)`.
    pub fn partition_partners(mol: &Molecule, atom: AtomIdx) -> (Vec<AtomIdx>, Vec<AtomIdx>) {
        mol.neighbors(atom)
            .partition(|&nb| !mol.atom(nb).flags.placed)
    }

    /// Centroid of the placed atoms among `atoms`.
    pub fn placed_center<I: IntoIterator<Item = AtomIdx>>(mol: &Molecule, atoms: I) -> PointF {
        math::center(
            atoms
                .into_iter()
                .filter(|&a| mol.atom(a).flags.placed)
                .map(|a| mol.atom(a).coordinates),
        )
    }

    /// Put `atoms` on a circle around `center`.
    ///
    /// The angle is advanced before each atom, so the first one lands at
    /// `start_angle + angle_increment`. Hydrogens get a shortened radius.
    pub fn populate_polygon_corners(
        &self,
        mol: &mut Molecule,
        atoms: &[AtomIdx],
        center: PointF,
        start_angle: f32,
        angle_increment: f32,
        radius: f32,
    ) {
        let mut angle = start_angle;
        for &a in atoms {
            angle = math::wrap_angle(angle + angle_increment);
            let atom = mol.atom_mut(a);
            let r = if atom.is_hydrogen() {
                radius * self.hydrogen_scale
            } else {
                radius
            };
            atom.coordinates = center + PointF::from_angle(angle) * r;
            atom.flags.placed = true;
        }
    }

    /// Spread `unplaced` evenly over the angular space around `atom` that
    /// `placed` leaves free.
    pub fn distribute_partners(
        &self,
        mol: &mut Molecule,
        atom: AtomIdx,
        placed: &[AtomIdx],
        shared_center: PointF,
        unplaced: &[AtomIdx],
    ) {
        if unplaced.is_empty() {
            return;
        }
        let pos = mol.atom(atom).coordinates;
        let bl = self.bond_length;
        match placed {
            [] => {
                let inc = TAU / unplaced.len() as f32;
                self.populate_polygon_corners(mol, unplaced, pos, 0.0, inc, bl);
            }
            [only] => {
                let inc = TAU / (unplaced.len() + 1) as f32;
                let start = (mol.atom(*only).coordinates - pos).angle();
                self.populate_polygon_corners(mol, unplaced, pos, start, inc, bl);
            }
            _ => {
                let occupied_direction = shared_center - pos;
                let distance_measure = pos - occupied_direction.with_length(bl);
                let mut sorted = placed.to_vec();
                sorted.sort_by(|&a, &b| {
                    let da = mol.atom(a).coordinates.distance(distance_measure);
                    let db = mol.atom(b).coordinates.distance(distance_measure);
                    da.total_cmp(&db)
                });
                let cp1 = mol.atom(sorted[0]).coordinates - pos;
                let cp2 = mol.atom(sorted[1]).coordinates - pos;
                let occupied =
                    cp1.angle_to(occupied_direction) + cp2.angle_to(occupied_direction);
                let angle1 = cp1.angle();
                let angle3 = (distance_measure - pos).angle();
                let start_atom = if angle1 > angle3 {
                    if angle1 - angle3 < PI {
                        sorted[1]
                    } else {
                        sorted[0]
                    }
                } else if angle3 - angle1 < PI {
                    sorted[0]
                } else {
                    sorted[1]
                };
                let inc = (TAU - occupied) / (unplaced.len() + 1) as f32;
                let start = (mol.atom(start_atom).coordinates - pos).angle();
                self.populate_polygon_corners(mol, unplaced, pos, start, inc, bl);
            }
        }
    }

    /// Unit vector for the bond leaving `atom`, 120° away from the bond to
    /// `previous`, on whichever side lies farther from `distance_measure`.
    pub fn next_bond_vector(
        mol: &Molecule,
        atom: AtomIdx,
        previous: AtomIdx,
        distance_measure: PointF,
    ) -> PointF {
        let pos = mol.atom(atom).coordinates;
        let angle = (mol.atom(previous).coordinates - pos).angle();
        let add = TAU / 3.0;
        let v1 = PointF::from_angle(angle + add);
        let v2 = PointF::from_angle(angle + 2.0 * add);
        let d1 = (pos + v1).distance(distance_measure);
        let d2 = (pos + v2).distance(distance_measure);
        if d2 > d1 {
            v2
        } else {
            v1
        }
    }

    /// Lay out `chain` in a zig-zag, starting from its first atom, which must
    /// already be placed.
    pub fn place_linear_chain(&self, mol: &mut Molecule, chain: &[AtomIdx], direction: PointF) {
        let mut direction = direction;
        for f in 0..chain.len().saturating_sub(1) {
            let (atom, next) = (chain[f], chain[f + 1]);
            let pos = mol.atom(atom).coordinates + direction.with_length(self.bond_length);
            let n = mol.atom_mut(next);
            n.coordinates = pos;
            n.flags.placed = true;
            let measure = Self::placed_center(mol, chain[..=f + 1].iter().copied());
            direction = Self::next_bond_vector(mol, next, atom, measure);
        }
    }
}
