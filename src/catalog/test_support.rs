//! Product builders shared by unit tests.

use super::models::Product;

pub fn product(id: &str, name: &str, category: &str, metal_type: &str, price: f64) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        category: category.into(),
        metal_type: metal_type.into(),
        price,
        original_price: None,
        weight: None,
        badge: None,
        image: None,
        description: None,
    }
}

/// A ring priced per gram, with no default weight.
pub fn priced(id: &str, price: f64) -> Product {
    product(id, &format!("Item {id}"), "rings", "gold", price)
}
