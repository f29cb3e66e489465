//! Per-category image pools.
//!
//! Pools are populated once per category from the host's textual payload and
//! never mutated afterwards; arrival order across categories is free. A
//! category that never loads reads as absent, which downstream code treats
//! the same as present-but-empty: no image available.

use std::collections::HashMap;

use crate::category::Category;
use crate::protocol;

#[derive(Debug, Default)]
pub struct PoolRegistry {
    pools: HashMap<Category, Vec<String>>,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and store a host payload. Returns false when the category is
    /// already loaded -- a duplicate response never overwrites the snapshot.
    pub fn insert_payload(&mut self, category: Category, payload: &str) -> bool {
        self.insert(category, protocol::decode_pool_payload(payload))
    }

    /// Store an already-decoded pool, write-once.
    pub fn insert(&mut self, category: Category, images: Vec<String>) -> bool {
        if self.pools.contains_key(&category) {
            return false;
        }
        self.pools.insert(category, images);
        true
    }

    pub fn get(&self, category: Category) -> Option<&[String]> {
        self.pools.get(&category).map(Vec::as_slice)
    }

    pub fn is_loaded(&self, category: Category) -> bool {
        self.pools.contains_key(&category)
    }

    /// Loaded categories, in the fixed request order.
    pub fn loaded(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.pools.contains_key(c))
            .collect()
    }
}
