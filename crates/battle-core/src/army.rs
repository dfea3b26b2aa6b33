//! Army configuration: the 4-slot character assignment of one side.

use std::collections::BTreeMap;

/// Placeholder character id for an unassigned slot.
pub const CHARACTER_NULL: &str = "character_null";

/// Number of character slots per army.
pub const ARMY_SLOTS: usize = 4;

/// Sparse army update: slot index to character-type id.
pub type ArmyPatch = BTreeMap<u8, String>;

/// The 4-slot character assignment chosen by a competing side.
///
/// Every slot always holds a character-type id; unassigned slots hold
/// [`CHARACTER_NULL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Army {
    slots: [String; ARMY_SLOTS],
}

impl Default for Army {
    fn default() -> Self {
        Army::empty()
    }
}

impl Army {
    /// An army with every slot unassigned.
    pub fn empty() -> Self {
        Army {
            slots: std::array::from_fn(|_| CHARACTER_NULL.to_string()),
        }
    }

    pub fn get(&self, slot: usize) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }

    /// Assign a character id to a slot. Out-of-range slots are ignored.
    pub fn set(&mut self, slot: usize, character: impl Into<String>) {
        if slot < ARMY_SLOTS {
            self.slots[slot] = character.into();
        }
    }

    /// Apply a sparse per-slot patch. Slots absent from the patch keep
    /// their current character.
    pub fn apply(&mut self, patch: &ArmyPatch) {
        for (&slot, character) in patch {
            self.set(slot as usize, character.clone());
        }
    }

    pub fn slots(&self) -> &[String; ARMY_SLOTS] {
        &self.slots
    }
}
