//! Grouping of rings into ring systems.

use super::*;

/// Group rings into maximal systems connected by shared atoms.
///
/// Groups come out in order of their first ring, and each group lists its
/// rings in the order they were pulled in.
pub fn partition(rings: &[Ring]) -> Vec<Vec<RingIdx>> {
    let mut assigned = vec![false; rings.len()];
    let mut groups = Vec::new();
    for seed in 0..rings.len() {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;
        let mut group = vec![seed];
        let mut grew = true;
        while grew {
            grew = false;
            for cand in 0..rings.len() {
                if assigned[cand] {
                    continue;
                }
                if group.iter().any(|&g| rings[g].shares_atom_with(&rings[cand])) {
                    assigned[cand] = true;
                    group.push(cand);
                    grew = true;
                }
            }
        }
        groups.push(group);
    }
    groups
}

/// Rings among `candidates` sharing at least one atom with `ring`, never `ring` itself.
pub fn direct_connected_rings(
    rings: &[Ring],
    ring: RingIdx,
    candidates: &[RingIdx],
) -> Vec<RingIdx> {
    candidates
        .iter()
        .copied()
        .filter(|&c| c != ring && rings[c].shares_atom_with(&rings[ring]))
        .collect()
}
