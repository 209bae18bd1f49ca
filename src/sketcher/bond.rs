use super::*;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Single = 1,
    Double = 2,
    Triple = 3,
    Quadruple = 4,
}
impl TryFrom<u8> for BondOrder {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Single),
            2 => Ok(Self::Double),
            3 => Ok(Self::Triple),
            4 => Ok(Self::Quadruple),
            _ => Err(value),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stereo {
    #[default]
    NotStereo,
    Up,
    Down,
    UpOrDown,
    CisOrTrans,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    pub start: AtomIdx,
    pub end: AtomIdx,
    pub order: BondOrder,
    pub stereo: Stereo,
}
impl Bond {
    pub const fn new(start: AtomIdx, end: AtomIdx) -> Self {
        Self {
            start,
            end,
            order: BondOrder::Single,
            stereo: Stereo::NotStereo,
        }
    }
    /// The endpoint that isn't `atom`. For a bond not touching `atom` this is `start`.
    pub fn other_atom(&self, atom: AtomIdx) -> AtomIdx {
        if self.start == atom {
            self.end
        } else {
            self.start
        }
    }
    pub fn contains(&self, atom: AtomIdx) -> bool {
        self.start == atom || self.end == atom
    }
    pub fn connects(&self, a1: AtomIdx, a2: AtomIdx) -> bool {
        (self.start == a1 && self.end == a2) || (self.start == a2 && self.end == a1)
    }
}

pub type BondIdx = usize;
