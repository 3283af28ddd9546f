use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::repositories::Entity;

/// 商品
///
/// `id` 为 0 表示尚未分配标识, 由仓储在创建时分配。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, sqlx::FromRow)]
pub struct Product {
    #[serde(default)]
    pub id: i32,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub color: String,
}

impl Product {
    pub fn new(id: i32, name: &str, price: f64, stock: i32, color: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            price,
            stock,
            color: color.to_string(),
        }
    }
}

impl Entity for Product {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}
