//! Favorite link between a customer and a store.
//!
//! Duplicate links are allowed; no uniqueness is enforced.

use crate::model::store::StoreId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

pub type FavoriteId = i64;

/// Persisted favorite row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: FavoriteId,
    pub customer_id: UserId,
    pub store_id: StoreId,
}

impl Favorite {
    pub fn patched(&self, patch: &FavoritePatch) -> Self {
        Self {
            id: self.id,
            customer_id: patch.customer_id.unwrap_or(self.customer_id),
            store_id: patch.store_id.unwrap_or(self.store_id),
        }
    }
}

/// Input for creating a favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NewFavorite {
    pub customer_id: UserId,
    pub store_id: StoreId,
}

impl NewFavorite {
    pub fn into_favorite(self, id: FavoriteId) -> Favorite {
        Favorite {
            id,
            customer_id: self.customer_id,
            store_id: self.store_id,
        }
    }
}

/// Partial update for a favorite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FavoritePatch {
    pub customer_id: Option<UserId>,
    pub store_id: Option<StoreId>,
}
