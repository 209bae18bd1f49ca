pub mod atom_placer;
pub mod connection;
pub mod partitioner;
pub mod ring_placer;
pub mod sssr;

use super::sketcher::*;

pub use atom_placer::AtomPlacer;
pub use ring_placer::RingPlacer;
