//! Smallest set of smallest rings, by Horton candidates and GF(2) elimination.

use super::*;
use std::collections::VecDeque;

pub fn find_sssr(mol: &Molecule) -> Vec<Ring> {
    let expected = (mol.bond_count() + mol.fragment_count()).saturating_sub(mol.atom_count());
    if expected == 0 {
        return Vec::new();
    }
    let trees = bfs_trees(mol);
    let candidates = horton_candidates(mol, &trees);
    let words = mol.bond_count().div_ceil(64);
    let mut basis: Vec<Vec<u64>> = Vec::with_capacity(expected);
    let mut rings = Vec::with_capacity(expected);
    for cycle in candidates {
        if rings.len() >= expected {
            break;
        }
        let Some(bonds) = cycle_bonds(mol, &cycle) else {
            continue;
        };
        let mut bv = vec![0u64; words];
        for &b in &bonds {
            bv[b / 64] |= 1u64 << (b % 64);
        }
        if try_add_to_basis(&mut basis, bv) {
            rings.push(Ring::new(cycle, bonds));
        }
    }
    rings.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.atoms.cmp(&b.atoms)));
    rings
}

struct BfsTree {
    dist: Vec<usize>,
    pred: Vec<Option<AtomIdx>>,
}
impl BfsTree {
    /// Path from the tree root to `dst`, inclusive.
    fn path_to(&self, dst: AtomIdx) -> Vec<AtomIdx> {
        let mut path = vec![dst];
        let mut cur = dst;
        while let Some(p) = self.pred[cur] {
            path.push(p);
            cur = p;
        }
        path.reverse();
        path
    }
}

fn bfs_trees(mol: &Molecule) -> Vec<BfsTree> {
    let n = mol.atom_count();
    (0..n)
        .map(|src| {
            let mut dist = vec![usize::MAX; n];
            let mut pred = vec![None; n];
            let mut queue = VecDeque::new();
            dist[src] = 0;
            queue.push_back(src);
            while let Some(cur) = queue.pop_front() {
                for nb in mol.neighbors(cur) {
                    if dist[nb] == usize::MAX {
                        dist[nb] = dist[cur] + 1;
                        pred[nb] = Some(cur);
                        queue.push_back(nb);
                    }
                }
            }
            BfsTree { dist, pred }
        })
        .collect()
}

fn horton_candidates(mol: &Molecule, trees: &[BfsTree]) -> Vec<Vec<AtomIdx>> {
    let mut candidates = Vec::new();
    for bond in mol.bonds() {
        let (u, v) = (bond.start, bond.end);
        for tree in trees {
            let (du, dv) = (tree.dist[u], tree.dist[v]);
            if du == usize::MAX || dv == usize::MAX || du + dv + 1 < 3 {
                continue;
            }
            let path_u = tree.path_to(u);
            let path_v = tree.path_to(v);
            if path_u[1..].iter().any(|a| path_v[1..].contains(a)) {
                continue;
            }
            let mut cycle = path_u;
            cycle.extend(path_v[1..].iter().rev());
            candidates.push(normalize_cycle(&cycle));
        }
    }
    candidates.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    candidates.dedup();
    candidates
}

fn cycle_bonds(mol: &Molecule, cycle: &[AtomIdx]) -> Option<Vec<BondIdx>> {
    let len = cycle.len();
    (0..len)
        .map(|i| mol.find_bond(cycle[i], cycle[(i + 1) % len]))
        .collect()
}

/// Rotate so the lowest index comes first, then pick the direction with the lower
/// second atom.
fn normalize_cycle(cycle: &[AtomIdx]) -> Vec<AtomIdx> {
    let len = cycle.len();
    let min_pos = cycle
        .iter()
        .enumerate()
        .min_by_key(|&(_, a)| a)
        .map_or(0, |(i, _)| i);
    let mut out: Vec<_> = (0..len).map(|i| cycle[(min_pos + i) % len]).collect();
    if len > 2 && out[1] > out[len - 1] {
        out[1..].reverse();
    }
    out
}

fn try_add_to_basis(basis: &mut Vec<Vec<u64>>, mut v: Vec<u64>) -> bool {
    for row in basis.iter() {
        if let Some(p) = leading_bit(row) {
            if v[p / 64] & (1u64 << (p % 64)) != 0 {
                for (a, b) in v.iter_mut().zip(row) {
                    *a ^= *b;
                }
            }
        }
    }
    if v.iter().all(|&w| w == 0) {
        return false;
    }
    basis.push(v);
    true
}

fn leading_bit(bv: &[u64]) -> Option<usize> {
    bv.iter()
        .enumerate()
        .find(|&(_, &w)| w != 0)
        .map(|(i, w)| i * 64 + w.trailing_zeros() as usize)
}
