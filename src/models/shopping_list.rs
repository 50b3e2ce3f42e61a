use std::fmt;

use indexmap::IndexMap;

use crate::error::{ForkfulError, Result};

/// Session-unique shopping item id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingItem {
    pub id: ItemId,
    pub quantity: Option<f64>,
    pub unit: String,
    pub name: String,
}

/// Ordered shopping list. Items are copies; editing them never touches the
/// recipe they came from.
#[derive(Debug, Default)]
pub struct ShoppingList {
    items: IndexMap<ItemId, ShoppingItem>,
    next_id: u64,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(
        &mut self,
        quantity: Option<f64>,
        unit: impl Into<String>,
        name: impl Into<String>,
    ) -> ShoppingItem {
        self.next_id += 1;
        let item = ShoppingItem {
            id: ItemId(self.next_id),
            quantity,
            unit: unit.into(),
            name: name.into(),
        };
        self.items.insert(item.id, item.clone());
        item
    }

    pub fn delete_item(&mut self, id: ItemId) -> Result<ShoppingItem> {
        self.items
            .shift_remove(&id)
            .ok_or(ForkfulError::ItemNotFound(id))
    }

    pub fn update_count(&mut self, id: ItemId, quantity: Option<f64>) -> Result<()> {
        let item = self
            .items
            .get_mut(&id)
            .ok_or(ForkfulError::ItemNotFound(id))?;
        item.quantity = quantity;
        Ok(())
    }

    pub fn get(&self, id: ItemId) -> Option<&ShoppingItem> {
        self.items.get(&id)
    }

    pub fn get_index(&self, index: usize) -> Option<&ShoppingItem> {
        self.items.get_index(index).map(|(_, item)| item)
    }

    pub fn items(&self) -> impl Iterator<Item = &ShoppingItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
