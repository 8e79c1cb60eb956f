//! Pin identities and per-pin state

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::world::BodyHandle;
use crate::PIN_SLOTS;
use crate::consts::PIN_COUNT;
use crate::error::{BowlingError, Result};

/// A validated pin slot (0 = head pin)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PinIndex(u8);

impl PinIndex {
    pub fn new(index: usize) -> Result<Self> {
        if index < PIN_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(BowlingError::InvalidPin(index))
        }
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// All ten slots in order
    pub fn all() -> impl Iterator<Item = PinIndex> {
        (0..PIN_COUNT as u8).map(PinIndex)
    }
}

/// Fixed-size set of pins, one bit per slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PinSet(u16);

impl PinSet {
    pub const EMPTY: PinSet = PinSet(0);
    pub const FULL: PinSet = PinSet((1 << PIN_COUNT) - 1);

    /// Build a set from raw indices, dropping (and logging) any out of range
    pub fn from_indexes(indexes: &[usize]) -> Self {
        let mut set = Self::EMPTY;
        for &i in indexes {
            match PinIndex::new(i) {
                Ok(pin) => set.insert(pin),
                Err(e) => log::warn!("Ignoring pin slot: {}", e),
            }
        }
        set
    }

    pub fn insert(&mut self, pin: PinIndex) {
        self.0 |= 1 << pin.0;
    }

    pub fn contains(&self, pin: PinIndex) -> bool {
        self.0 & (1 << pin.0) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }

    /// Slots not in this set
    pub fn complement(&self) -> PinSet {
        PinSet(!self.0 & Self::FULL.0)
    }

    pub fn union(&self, other: PinSet) -> PinSet {
        PinSet(self.0 | other.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = PinIndex> + '_ {
        PinIndex::all().filter(|p| self.contains(*p))
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().map(PinIndex::get).collect()
    }
}

impl FromIterator<PinIndex> for PinSet {
    fn from_iter<I: IntoIterator<Item = PinIndex>>(iter: I) -> Self {
        let mut set = PinSet::EMPTY;
        for pin in iter {
            set.insert(pin);
        }
        set
    }
}

/// One pin on the deck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    pub index: PinIndex,
    /// Where the pin stood when it was last created
    pub rest: Vec3,
    /// Latched once the pin is knocked over; cleared only by a full-rack reset
    pub down: bool,
    /// Body in the world, if the pin is on the deck
    #[serde(skip)]
    pub body: Option<BodyHandle>,
}

impl Pin {
    pub fn new(index: PinIndex, rest: Vec3) -> Self {
        Self {
            index,
            rest,
            down: false,
            body: None,
        }
    }

    /// A fresh deck: every pin at its slot, nothing latched, no bodies
    pub fn deck() -> [Pin; PIN_COUNT] {
        std::array::from_fn(|i| Pin::new(PinIndex(i as u8), PIN_SLOTS[i]))
    }

    /// Standing pins have a body and have not been latched down
    pub fn is_standing(&self) -> bool {
        self.body.is_some() && !self.down
    }
}
