use serde::{Deserialize, Serialize};

/// A catalog entry. `id` and `created_at` are assigned by the store and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sweet {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
    pub created_at: String,
}

/// Input for creating a sweet. Validated by the inventory service before it
/// reaches the store.
#[derive(Debug, Clone)]
pub struct NewSweet {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
}

/// Partial update. `None` fields keep their prior values.
#[derive(Debug, Clone, Default)]
pub struct SweetPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
}

impl SweetPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
    }
}

/// Search criteria. Absent filters match everything; supplied filters are
/// ANDed together.
#[derive(Debug, Clone, Default)]
pub struct SweetFilter {
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}
