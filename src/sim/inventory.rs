//! Consumable items picked up during a run

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What an item does when used
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Restores health, capped at max health
    Heal(f32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
}

impl Item {
    pub fn small_potion() -> Self {
        Self {
            name: "Small Potion".to_string(),
            kind: ItemKind::Heal(SMALL_POTION_HEAL),
        }
    }
}

/// Slot-ordered item list with a toggleable panel
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<Item>,
    /// Panel visible; digit keys use slots instead of casting
    pub open: bool,
}

impl Inventory {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Add an item; returns false when the bag is full
    pub fn push(&mut self, item: Item) -> bool {
        if self.items.len() >= INVENTORY_CAPACITY {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove and return the item in `slot` (0-based)
    pub fn take(&mut self, slot: usize) -> Option<Item> {
        if slot < self.items.len() {
            Some(self.items.remove(slot))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Map a one-shot key press to a 0-based inventory slot ("1" -> 0)
pub fn slot_for_key(key: &str) -> Option<usize> {
    let digit: usize = key.parse().ok()?;
    (1..=INVENTORY_CAPACITY).contains(&digit).then(|| digit - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_is_enforced() {
        let mut inv = Inventory::default();
        for _ in 0..INVENTORY_CAPACITY {
            assert!(inv.push(Item::small_potion()));
        }
        assert!(!inv.push(Item::small_potion()));
        assert_eq!(inv.len(), INVENTORY_CAPACITY);
    }

    #[test]
    fn test_take_shifts_later_slots() {
        let mut inv = Inventory::default();
        inv.push(Item::small_potion());
        inv.push(Item {
            name: "Big".into(),
            kind: ItemKind::Heal(100.0),
        });
        assert!(inv.take(5).is_none());
        assert_eq!(inv.take(0), Some(Item::small_potion()));
        assert_eq!(inv.items[0].name, "Big");
    }

    #[test]
    fn test_slot_for_key() {
        assert_eq!(slot_for_key("1"), Some(0));
        assert_eq!(slot_for_key("9"), Some(8));
        assert_eq!(slot_for_key("0"), None);
        assert_eq!(slot_for_key("tab"), None);
    }
}
