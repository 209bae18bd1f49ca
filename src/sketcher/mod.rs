pub mod atom;
pub mod bond;
pub mod builder;
pub mod config;
pub mod error;
pub mod math;
pub(crate) mod molecule;
pub mod point;
pub mod ring;
pub mod sketcher;

use super::{coordgen, BOND_LENGTH};
pub use atom::{Atom, AtomIdx, LayoutFlags};
pub use bond::{Bond, BondIdx, BondOrder, Stereo};
pub use builder::Builder;
pub use config::LayoutConfig;
pub use error::LayoutError;
pub use molecule::Molecule;
pub use point::PointF;
pub use ring::{Ring, RingIdx};
pub use sketcher::{LayoutStatus, Sketcher};
