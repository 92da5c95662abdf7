//! Catalog Helpers

use uuid::Uuid;

/// Generates the id given to products created through the admin endpoints.
pub fn new_product_id() -> String {
    Uuid::new_v4().simple().to_string()
}
