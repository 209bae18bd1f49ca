use super::*;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Layout is only defined for a single connected component.
    #[error("molecule not connected: {fragments} fragments")]
    Disconnected { fragments: usize },
    #[error("no atom with index {0}")]
    InvalidAtom(AtomIdx),
    #[error("no bond with index {0}")]
    InvalidBond(BondIdx),
    #[error("atom {0} cannot be bonded to itself")]
    SelfLoop(AtomIdx),
}
