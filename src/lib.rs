pub mod coordgen;
pub mod sketcher;

/// Default distance between bonded atoms.
pub const BOND_LENGTH: f32 = 1.5;
pub const EPSILON: f32 = 0.001;

pub mod prelude {
    pub use super::sketcher::{
        AtomIdx, BondIdx, BondOrder, Builder, LayoutConfig, LayoutError, LayoutStatus, Molecule,
        PointF, Sketcher,
    };
}
