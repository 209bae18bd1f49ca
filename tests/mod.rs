use proptest::prelude::*;
use sdg_rs::coordgen::RingPlacer;
use sdg_rs::prelude::*;
use sdg_rs::BOND_LENGTH;

const TOL: f32 = 1e-3;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn layout(mol: &mut Molecule) -> LayoutStatus {
    init_logger();
    Sketcher::default().generate(mol).unwrap()
}

fn assert_bond_lengths(mol: &Molecule, bl: f32) {
    for bond in mol.bonds() {
        let d = mol
            .atom(bond.start)
            .coordinates
            .distance(mol.atom(bond.end).coordinates);
        assert!(
            (d - bl).abs() < TOL,
            "bond {}-{} has length {d}",
            bond.start,
            bond.end
        );
    }
}

fn assert_all_placed(mol: &Molecule) {
    for (n, atom) in mol.atoms().iter().enumerate() {
        assert!(atom.flags.placed, "atom {n} unplaced");
        assert!(atom.coordinates.is_finite(), "atom {n} at {:?}", atom.coordinates);
    }
}

fn carbons(b: &mut Builder, n: usize) -> Vec<AtomIdx> {
    (0..n).map(|_| b.add_atom("C")).collect()
}

fn path(b: &mut Builder, atoms: &[AtomIdx]) {
    for w in atoms.windows(2) {
        b.add_bond(w[0], w[1], BondOrder::Single).unwrap();
    }
}

fn naphthalene() -> Molecule {
    let mut b = Builder::named("naphthalene");
    let a = carbons(&mut b, 10);
    b.add_cycle(&a[0..6]).unwrap();
    path(&mut b, &[a[5], a[6], a[7], a[8], a[9], a[0]]);
    b.finish()
}

#[test]
fn single_atom_sits_at_origin() {
    let mut b = Builder::new();
    b.add_atom("N");
    let mut mol = b.finish();
    mol.atom_mut(0).coordinates = PointF(3.0, -2.0);
    assert_eq!(layout(&mut mol), LayoutStatus::Complete);
    assert_eq!(mol.atom(0).coordinates, PointF(0.0, 0.0));
}

#[test]
fn disconnected_molecule_is_rejected_untouched() {
    let mut b = Builder::new();
    let a = carbons(&mut b, 4);
    path(&mut b, &a[0..2]);
    path(&mut b, &a[2..4]);
    let mut mol = b.finish();
    mol.atom_mut(2).coordinates = PointF(1.0, 1.0);
    mol.atom_mut(3).flags.placed = true;
    let before = mol.clone();
    let err = Sketcher::default().generate(&mut mol).unwrap_err();
    assert_eq!(err, LayoutError::Disconnected { fragments: 2 });
    assert_eq!(err.to_string(), "molecule not connected: 2 fragments");
    assert_eq!(mol, before);
}

#[test]
fn fragments_can_be_laid_out_separately() {
    let mut b = Builder::new();
    let a = carbons(&mut b, 9);
    path(&mut b, &a[0..3]);
    b.add_cycle(&a[3..9]).unwrap();
    let mol = b.finish();
    for mut frag in mol.fragments() {
        assert_eq!(layout(&mut frag), LayoutStatus::Complete);
        assert_bond_lengths(&frag, BOND_LENGTH);
    }
}

#[test]
fn branched_chain() {
    let mut b = Builder::named("testChain");
    carbons(&mut b, 10);
    for (s, e) in [
        (0, 1),
        (1, 2),
        (1, 3),
        (3, 4),
        (3, 5),
        (5, 6),
        (2, 7),
        (6, 8),
        (4, 9),
    ] {
        b.add_bond(s, e, BondOrder::Single).unwrap();
    }
    let mut mol = b.finish();
    assert_eq!(mol.expected_ring_count(), 0);
    assert_eq!(layout(&mut mol), LayoutStatus::Complete);
    assert_all_placed(&mol);
    assert_bond_lengths(&mol, BOND_LENGTH);
    assert!(mol.atoms().iter().all(|a| a.flags.aliphatic));
}

#[test]
fn chain_is_zig_zag() {
    let mut b = Builder::new();
    let a = carbons(&mut b, 8);
    path(&mut b, &a);
    let mut mol = b.finish();
    layout(&mut mol);
    assert_bond_lengths(&mol, BOND_LENGTH);
    for w in a.windows(3) {
        let d = mol.atom(w[0]).coordinates.distance(mol.atom(w[2]).coordinates);
        assert!((d - BOND_LENGTH * 3f32.sqrt()).abs() < TOL);
    }
}

#[test]
fn benzene_is_a_regular_hexagon() {
    let mut b = Builder::named("benzene");
    let a = carbons(&mut b, 6);
    for i in 0..6 {
        let order = if i % 2 == 0 {
            BondOrder::Double
        } else {
            BondOrder::Single
        };
        b.add_bond(a[i], a[(i + 1) % 6], order).unwrap();
    }
    let mut mol = b.finish();
    assert_eq!(layout(&mut mol), LayoutStatus::Complete);
    assert_bond_lengths(&mol, BOND_LENGTH);
    let center = mol.rings()[0].center;
    let radius = RingPlacer::native_ring_radius(6, BOND_LENGTH);
    for atom in mol.atoms() {
        assert!((atom.coordinates.distance(center) - radius).abs() < TOL);
    }
}

#[test]
fn naphthalene_rings_are_regular() {
    let mut mol = naphthalene();
    assert_eq!(layout(&mut mol), LayoutStatus::Complete);
    assert_bond_lengths(&mol, BOND_LENGTH);
    let radius = RingPlacer::native_ring_radius(6, BOND_LENGTH);
    let rings = mol.rings().to_vec();
    assert_eq!(rings.len(), 2);
    for ring in &rings {
        assert!(ring.placed);
        for &a in &ring.atoms {
            let d = mol.atom(a).coordinates.distance(ring.center);
            assert!((d - radius).abs() < TOL);
        }
    }
    let shared = rings[0].shared_atoms(&rings[1]);
    assert_eq!(shared.len(), 2);
    let centers = rings[0].center.distance(rings[1].center);
    assert!((centers - BOND_LENGTH * 3f32.sqrt()).abs() < TOL);
}

#[test]
fn spiro_rings() {
    let mut b = Builder::named("spiro[4.5]decane");
    let a = carbons(&mut b, 10);
    b.add_cycle(&a[0..5]).unwrap();
    b.add_cycle(&[a[0], a[5], a[6], a[7], a[8], a[9]]).unwrap();
    let mut mol = b.finish();
    assert_eq!(layout(&mut mol), LayoutStatus::Complete);
    assert_bond_lengths(&mol, BOND_LENGTH);
    let rings = mol.rings().to_vec();
    let spiro = mol.atom(0).coordinates;
    let d0 = rings[0].center.distance(spiro);
    let d1 = rings[1].center.distance(spiro);
    assert!((rings[0].center.distance(rings[1].center) - (d0 + d1)).abs() < TOL);
}

#[test]
fn biphenyl_joins_two_ring_systems() {
    let mut b = Builder::named("biphenyl");
    let a = carbons(&mut b, 12);
    b.add_cycle(&a[0..6]).unwrap();
    b.add_cycle(&a[6..12]).unwrap();
    b.add_bond(a[0], a[6], BondOrder::Single).unwrap();
    let mut mol = b.finish();
    let mut sketcher = Sketcher::default();
    assert_eq!(sketcher.generate(&mut mol), Ok(LayoutStatus::Complete));
    assert_eq!(sketcher.ring_sets().len(), 2);
    assert_all_placed(&mol);
    assert_bond_lengths(&mol, BOND_LENGTH);
    let rings = mol.rings().to_vec();
    let c0 = rings[0].center;
    let c1 = rings[1].center;
    // both rings point away from the connecting bond
    assert!((c0.distance(c1) - (2.0 * BOND_LENGTH + BOND_LENGTH)).abs() < TOL);
}

#[test]
fn ring_with_chain() {
    let mut b = Builder::named("butylcyclohexane");
    let ring = carbons(&mut b, 6);
    b.add_cycle(&ring).unwrap();
    let chain = carbons(&mut b, 4);
    path(&mut b, &chain);
    b.add_bond(ring[0], chain[0], BondOrder::Single).unwrap();
    let mut mol = b.finish();
    assert_eq!(layout(&mut mol), LayoutStatus::Complete);
    assert_all_placed(&mol);
    assert_bond_lengths(&mol, BOND_LENGTH);
    for &a in &chain {
        assert!(mol.atom(a).flags.aliphatic);
    }
}

#[test]
fn rings_at_both_ends_of_a_chain() {
    let mut b = Builder::new();
    let r1 = carbons(&mut b, 6);
    let r2 = carbons(&mut b, 6);
    let link = carbons(&mut b, 3);
    b.add_cycle(&r1).unwrap();
    b.add_cycle(&r2).unwrap();
    path(&mut b, &[r1[0], link[0], link[1], link[2], r2[0]]);
    let mut mol = b.finish();
    assert_eq!(layout(&mut mol), LayoutStatus::Complete);
    assert_all_placed(&mol);
    assert_bond_lengths(&mol, BOND_LENGTH);
    assert!(mol.rings().iter().all(|r| r.placed));
}

#[test]
fn norbornane_is_placed() {
    let mut b = Builder::named("norbornane");
    let a = carbons(&mut b, 7);
    b.add_cycle(&a[0..6]).unwrap();
    b.add_bond(a[0], a[6], BondOrder::Single).unwrap();
    b.add_bond(a[6], a[3], BondOrder::Single).unwrap();
    let mut mol = b.finish();
    assert_eq!(layout(&mut mol), LayoutStatus::Complete);
    assert_all_placed(&mol);
    assert_eq!(mol.bond_count(), 8);
    assert_bond_lengths(&mol, BOND_LENGTH);
}

#[test]
fn pyrene_rings_are_regular() {
    let mut b = Builder::named("pyrene");
    let a = carbons(&mut b, 16);
    b.add_cycle(&a[0..14]).unwrap();
    for (s, e) in [(12, 14), (14, 2), (14, 15), (15, 5), (15, 9)] {
        b.add_bond(a[s], a[e], BondOrder::Single).unwrap();
    }
    let mut mol = b.finish();
    assert_eq!(mol.expected_ring_count(), 4);
    assert_eq!(layout(&mut mol), LayoutStatus::Complete);
    assert_all_placed(&mol);
    assert_bond_lengths(&mol, BOND_LENGTH);
    let radius = RingPlacer::native_ring_radius(6, BOND_LENGTH);
    let rings = mol.rings().to_vec();
    assert_eq!(rings.len(), 4);
    for ring in &rings {
        for &at in &ring.atoms {
            let d = mol.atom(at).coordinates.distance(ring.center);
            assert!((d - radius).abs() < TOL, "atom {at} is {d} from its ring centre");
        }
    }
    for i in 0..16 {
        for j in i + 1..16 {
            let d = mol.atom(i).coordinates.distance(mol.atom(j).coordinates);
            assert!(d > 1.0, "atoms {i} and {j} are {d} apart");
        }
    }
}

#[test]
fn rerun_places_everything_again() {
    let mut mol = naphthalene();
    let mut sketcher = Sketcher::default();
    assert!(sketcher.generate(&mut mol).unwrap().is_complete());
    let first: Vec<PointF> = mol.atoms().iter().map(|a| a.coordinates).collect();
    assert!(sketcher.generate(&mut mol).unwrap().is_complete());
    assert_all_placed(&mol);
    for (atom, p) in mol.atoms().iter().zip(first) {
        assert!(atom.coordinates.distance(p) < TOL);
    }
}

#[test]
fn custom_bond_length() {
    let mut mol = naphthalene();
    let mut sketcher = Sketcher::new(LayoutConfig::with_bond_length(1.25));
    assert!(sketcher.generate(&mut mol).unwrap().is_complete());
    assert_bond_lengths(&mol, 1.25);
}

fn tree(parents: &[prop::sample::Index]) -> Molecule {
    let mut b = Builder::new();
    b.add_atom("C");
    for (n, p) in parents.iter().enumerate() {
        let atom = b.add_atom("C");
        b.add_bond(p.index(n + 1), atom, BondOrder::Single).unwrap();
    }
    b.finish()
}

proptest! {
    #[test]
    fn any_tree_keeps_bond_lengths(parents in prop::collection::vec(any::<prop::sample::Index>(), 1..40)) {
        let mut mol = tree(&parents);
        let status = Sketcher::default().generate(&mut mol).unwrap();
        prop_assert_eq!(status, LayoutStatus::Complete);
        for bond in mol.bonds() {
            let d = mol.atom(bond.start).coordinates.distance(mol.atom(bond.end).coordinates);
            prop_assert!((d - BOND_LENGTH).abs() < TOL, "bond {}-{} is {}", bond.start, bond.end, d);
        }
    }
}
