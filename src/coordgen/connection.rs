//! Connectivity queries used to seed and extend chain layout.

use super::*;
use std::collections::VecDeque;

/// Symmetric adjacency matrix with a zero diagonal.
pub fn connection_matrix(mol: &Molecule) -> Vec<Vec<u8>> {
    let n = mol.atom_count();
    let mut matrix = vec![vec![0u8; n]; n];
    for bond in mol.bonds() {
        matrix[bond.start][bond.end] = 1;
        matrix[bond.end][bond.start] = 1;
    }
    matrix
}

/// Floyd-Warshall over an adjacency matrix. Unreachable pairs stay at `usize::MAX`.
pub fn all_pairs_shortest_paths(matrix: &[Vec<u8>]) -> Vec<Vec<usize>> {
    let n = matrix.len();
    let mut dist: Vec<Vec<usize>> = matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.iter()
                .enumerate()
                .map(|(j, &e)| match (i == j, e) {
                    (true, _) => 0,
                    (false, 0) => usize::MAX,
                    (false, _) => 1,
                })
                .collect()
        })
        .collect();
    for k in 0..n {
        for i in 0..n {
            if dist[i][k] == usize::MAX {
                continue;
            }
            for j in 0..n {
                let through = dist[i][k].saturating_add(dist[k][j]);
                if through < dist[i][j] {
                    dist[i][j] = through;
                }
            }
        }
    }
    dist
}

/// Sum of the degrees of every atom in `path`.
pub fn degree_sum(mol: &Molecule, path: &[AtomIdx]) -> usize {
    path.iter().map(|&a| mol.degree(a)).sum()
}

/// Longest path of unplaced atoms reachable from `start`, starting with `start`.
///
/// The search is breadth first. Unplaced ring atoms end a branch: they are
/// appended but never expanded, so a chain can touch a ring without walking
/// into it. `start` itself is always expanded. The longest path wins, then the
/// one with the higher degree sum, then the one found first.
pub fn longest_unplaced_chain_from(mol: &Molecule, start: AtomIdx) -> Vec<AtomIdx> {
    let mut visited = vec![false; mol.atom_count()];
    let mut paths: Vec<Vec<AtomIdx>> = vec![vec![start]];
    let mut queue = VecDeque::from([0usize]);
    visited[start] = true;
    while let Some(pn) = queue.pop_front() {
        let cur = paths[pn][paths[pn].len() - 1];
        if cur != start && mol.atom(cur).flags.in_ring {
            continue;
        }
        for nb in mol.neighbors(cur) {
            if visited[nb] || mol.atom(nb).flags.placed {
                continue;
            }
            visited[nb] = true;
            let mut path = paths[pn].clone();
            path.push(nb);
            paths.push(path);
            queue.push_back(paths.len() - 1);
        }
    }
    let mut best = 0;
    let mut best_key = (paths[0].len(), degree_sum(mol, &paths[0]));
    for (n, path) in paths.iter().enumerate().skip(1) {
        let key = (path.len(), degree_sum(mol, path));
        if key > best_key {
            best = n;
            best_key = key;
        }
    }
    paths.swap_remove(best)
}

/// Longest chain between the two most distant chain termini.
pub fn initial_longest_chain(mol: &Molecule) -> Vec<AtomIdx> {
    if mol.atom_count() == 0 {
        return Vec::new();
    }
    let dist = all_pairs_shortest_paths(&connection_matrix(mol));
    let termini: Vec<AtomIdx> = (0..mol.atom_count())
        .filter(|&a| mol.degree(a) == 1)
        .collect();
    let mut start = 0;
    let mut max_dist = 0;
    for &i in &termini {
        for &j in &termini {
            let d = dist[i][j];
            if d != usize::MAX && d > max_dist {
                max_dist = d;
                start = i;
            }
        }
    }
    log::debug!("initial chain starts at atom {start} (span {max_dist})");
    longest_unplaced_chain_from(mol, start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(n: usize) -> Molecule {
        let mut b = Builder::new();
        let atoms: Vec<_> = (0..n).map(|_| b.add_atom("C")).collect();
        for w in atoms.windows(2) {
            b.add_bond(w[0], w[1], BondOrder::Single).unwrap();
        }
        b.finish()
    }

    #[test]
    fn matrix_is_symmetric() {
        let mol = chain(3);
        let m = connection_matrix(&mol);
        assert_eq!(m, vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]]);
    }

    #[test]
    fn shortest_paths_on_chain() {
        let mol = chain(4);
        let d = all_pairs_shortest_paths(&connection_matrix(&mol));
        assert_eq!(d[0][3], 3);
        assert_eq!(d[3][0], 3);
        assert_eq!(d[1][1], 0);
        assert_eq!(d[1][3], 2);
    }

    #[test]
    fn unreachable_stays_infinite() {
        let mut mol = chain(2);
        mol.add_atom(Atom::new("C"));
        let d = all_pairs_shortest_paths(&connection_matrix(&mol));
        assert_eq!(d[0][2], usize::MAX);
    }

    #[test]
    fn initial_chain_spans_the_molecule() {
        // isobutane-like branch on a pentane
        let mut mol = chain(5);
        let br = mol.add_atom(Atom::new("C"));
        mol.add_bond(1, br, BondOrder::Single).unwrap();
        let c = initial_longest_chain(&mol);
        assert_eq!(c.len(), 5);
        assert_eq!(c[0], 0);
        assert_eq!(c[4], 4);
    }

    #[test]
    fn chain_stops_at_placed_atoms() {
        let mut mol = chain(6);
        mol.atom_mut(3).flags.placed = true;
        assert_eq!(longest_unplaced_chain_from(&mol, 0), vec![0, 1, 2]);
    }

    #[test]
    fn chain_touches_but_does_not_enter_rings() {
        let mut mol = chain(3);
        for _ in 3..6 {
            mol.add_atom(Atom::new("C"));
        }
        mol.add_bond(2, 3, BondOrder::Single).unwrap();
        mol.add_bond(3, 4, BondOrder::Single).unwrap();
        mol.add_bond(4, 5, BondOrder::Single).unwrap();
        mol.add_bond(5, 2, BondOrder::Single).unwrap();
        for a in 2..6 {
            mol.atom_mut(a).flags.in_ring = true;
        }
        let c = longest_unplaced_chain_from(&mol, 0);
        assert_eq!(c, vec![0, 1, 2]);
        // a ring atom start is still expanded
        mol.atom_mut(0).flags.placed = true;
        let c = longest_unplaced_chain_from(&mol, 2);
        assert_eq!(c[0], 2);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn ties_prefer_higher_degree() {
        // 0-1-2 and 0-3-4 with an extra leaf on 3
        let mut mol = chain(3);
        let a3 = mol.add_atom(Atom::new("C"));
        let a4 = mol.add_atom(Atom::new("C"));
        let a5 = mol.add_atom(Atom::new("C"));
        mol.add_bond(0, a3, BondOrder::Single).unwrap();
        mol.add_bond(a3, a4, BondOrder::Single).unwrap();
        mol.add_bond(a3, a5, BondOrder::Single).unwrap();
        let c = longest_unplaced_chain_from(&mol, 0);
        assert_eq!(c.len(), 3);
        assert_eq!(c[1], a3);
    }
}
