use super::*;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Distance between bonded atoms.
    pub bond_length: f32,
    /// Radius factor for hydrogens placed around a centre atom.
    pub hydrogen_scale: f32,
    /// Direction of the very first bond laid out.
    pub first_bond_vector: PointF,
}
impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            bond_length: BOND_LENGTH,
            hydrogen_scale: 0.6,
            first_bond_vector: PointF(0.0, 1.0),
        }
    }
}
impl LayoutConfig {
    pub fn with_bond_length(bond_length: f32) -> Self {
        Self {
            bond_length,
            ..Self::default()
        }
    }
}
