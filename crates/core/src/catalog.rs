//! Item catalog - the fixed, non-empty set of collectible kinds
//!
//! Loaded once at startup and read-only afterwards. Tiles store an
//! [`ItemId`] (the item's position in the catalog), so two tiles hold the
//! same kind exactly when their ids match.

use crate::error::GameError;
use crate::rng::RandomSource;
use crate::types::{ItemDef, ItemId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCatalog {
    items: Vec<ItemDef>,
}

impl ItemCatalog {
    /// Build a catalog, rejecting empty lists, zero values and repeated symbols.
    pub fn new(items: Vec<ItemDef>) -> Result<Self, GameError> {
        if items.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        if items.len() > u16::MAX as usize {
            return Err(GameError::CatalogTooLarge { count: items.len() });
        }
        for (i, item) in items.iter().enumerate() {
            if item.value == 0 {
                return Err(GameError::ZeroItemValue {
                    name: item.name.clone(),
                });
            }
            if items[..i].iter().any(|other| other.symbol == item.symbol) {
                return Err(GameError::DuplicateSymbol {
                    symbol: item.symbol,
                });
            }
        }
        Ok(Self { items })
    }

    /// The five-kind catalog used when no custom catalog is configured.
    pub fn standard() -> Self {
        Self {
            items: Self::standard_items(),
        }
    }

    pub fn standard_items() -> Vec<ItemDef> {
        vec![
            ItemDef::new("apple", 'a', 2),
            ItemDef::new("banana", 'b', 1),
            ItemDef::new("cherry", 'c', 3),
            ItemDef::new("damson", 'd', 4),
            ItemDef::new("elderberry", 'e', 5),
        ]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a constructed catalog
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemDef> {
        self.items.get(id.index())
    }

    pub fn contains(&self, id: ItemId) -> bool {
        id.index() < self.items.len()
    }

    /// Point value of an item kind; 0 for ids outside the catalog.
    pub fn value(&self, id: ItemId) -> u32 {
        self.get(id).map_or(0, |item| item.value)
    }

    /// Display symbol of an item kind; `?` for ids outside the catalog.
    pub fn symbol(&self, id: ItemId) -> char {
        self.get(id).map_or('?', |item| item.symbol)
    }

    pub fn by_symbol(&self, symbol: char) -> Option<ItemId> {
        self.items
            .iter()
            .position(|item| item.symbol == symbol)
            .map(|i| ItemId(i as u16))
    }

    /// Uniformly random item kind
    pub fn random_item<R: RandomSource + ?Sized>(&self, rng: &mut R) -> ItemId {
        ItemId(rng.next_index(self.items.len()) as u16)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &ItemDef)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (ItemId(i as u16), item))
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
