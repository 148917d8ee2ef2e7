//! Synthetic dataset shared read-only by every scenario.
//!
//! One [`SampleData`] is generated per process from the size given on the
//! command line. References are internally consistent: every product points at
//! a generated category, every order at a generated user, every order item at
//! a generated product.

use crate::value::Value;
use crate::HarnessError;
use rand::Rng;
use uuid::Uuid;

/// Smallest dataset that still yields at least one category and one user.
pub const MIN_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub rating: i64,
}

#[derive(Debug, Clone)]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone)]
pub struct SampleData {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub users: Vec<User>,
    pub orders: Vec<Order>,
    pub strings: Vec<String>,
}

impl SampleData {
    /// Generate a dataset of `size` products, orders and strings, with
    /// `size / 10` categories and users.
    pub fn generate(size: usize) -> Result<SampleData, HarnessError> {
        if size < MIN_SIZE {
            return Err(HarnessError::InvalidInput {
                size,
                min: MIN_SIZE,
            });
        }
        let mut rng = rand::thread_rng();

        let categories: Vec<Category> = (1..=size / 10)
            .map(|i| Category {
                id: i as i64,
                name: token("category"),
                description: format!("{}{}", token("category-desc"), token("")),
            })
            .collect();

        let products: Vec<Product> = (1..=size)
            .map(|i| Product {
                id: i as i64,
                name: token("product"),
                category_id: categories[rng.gen_range(0..categories.len())].id,
                quantity: rng.gen_range(1..=100),
            })
            .collect();

        let users: Vec<User> = (1..=size / 10)
            .map(|i| User {
                id: i as i64,
                name: token("user"),
                rating: rng.gen_range(0..=10),
            })
            .collect();

        let orders: Vec<Order> = (1..=size)
            .map(|i| {
                let items = (0..rng.gen_range(1..=10))
                    .map(|_| OrderItem {
                        product_id: products[rng.gen_range(0..products.len())].id,
                        quantity: rng.gen_range(0..=10),
                    })
                    .collect();
                Order {
                    id: i as i64,
                    customer_id: users[rng.gen_range(0..users.len())].id,
                    items,
                }
            })
            .collect();

        let strings = (0..size).map(|_| token("s")).collect();

        Ok(SampleData {
            categories,
            products,
            users,
            orders,
            strings,
        })
    }
}

/// A unique tag-prefixed token, e.g. `product-67e5504410b1426f9247bb680e5fe0c8`.
fn token(tag: &str) -> String {
    format!("{}-{}", tag, Uuid::new_v4().simple())
}

impl From<&Category> for Value {
    fn from(c: &Category) -> Value {
        Value::map([
            ("id", Value::Int(c.id)),
            ("name", Value::from(c.name.clone())),
            ("description", Value::from(c.description.clone())),
        ])
    }
}

impl From<&Product> for Value {
    fn from(p: &Product) -> Value {
        Value::map([
            ("id", Value::Int(p.id)),
            ("name", Value::from(p.name.clone())),
            ("categoryId", Value::Int(p.category_id)),
            ("quantity", Value::Int(p.quantity)),
        ])
    }
}

impl From<&User> for Value {
    fn from(u: &User) -> Value {
        Value::map([
            ("id", Value::Int(u.id)),
            ("name", Value::from(u.name.clone())),
            ("rating", Value::Int(u.rating)),
        ])
    }
}

impl From<&OrderItem> for Value {
    fn from(item: &OrderItem) -> Value {
        Value::map([
            ("productId", Value::Int(item.product_id)),
            ("quantity", Value::Int(item.quantity)),
        ])
    }
}

impl From<&Order> for Value {
    fn from(o: &Order) -> Value {
        Value::map([
            ("id", Value::Int(o.id)),
            ("customerId", Value::Int(o.customer_id)),
            ("items", o.items.iter().map(Value::from).collect()),
        ])
    }
}
