//! In-process stand-in for [`PgStore`](crate::db::PgStore), used by tests.

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::auth::{
    repo::UserRepo,
    repo_types::{NewUser, User},
};
use crate::orders::repo::{NewOrder, Order, OrderPatch, OrderRepo};
use crate::products::repo::{NewProduct, Product, ProductFilter, ProductPatch, ProductRepo};
use crate::schedules::repo::{Schedule, ScheduleInput, ScheduleRepo};

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    products: Vec<Product>,
    schedules: Vec<Schedule>,
    orders: Vec<Order>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

impl MemoryStore {
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    /// Raw rows including soft-deleted ones.
    pub async fn product_rows(&self) -> Vec<Product> {
        self.tables.read().await.products.clone()
    }

    pub async fn schedule_rows(&self) -> Vec<Schedule> {
        self.tables.read().await.schedules.clone()
    }

    /// Simulates an account vanishing after its tokens were issued.
    pub async fn remove_user(&self, username: &str) {
        self.tables
            .write()
            .await
            .users
            .retain(|u| u.username != username);
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> anyhow::Result<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users
            .iter()
            .find(|u| u.username == username || u.email == email)
            .cloned())
    }

    async fn create(&self, new: NewUser) -> anyhow::Result<Option<User>> {
        let mut t = self.tables.write().await;
        if t
            .users
            .iter()
            .any(|u| u.username == new.username || u.email == new.email)
        {
            return Ok(None);
        }
        let user = User {
            id: t.next_id(),
            first_name: new.first_name,
            last_name: new.last_name,
            username: new.username,
            password_hash: new.password_hash,
            email: new.email,
            role: new.role,
            avatar: new.avatar,
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.push(user.clone());
        Ok(Some(user))
    }
}

// Same predicate as the WHERE clause in the Postgres listing.
fn matches(filter: &ProductFilter, p: &Product) -> bool {
    filter.min_price.map_or(true, |min| p.product_price >= min)
        && filter.max_price.map_or(true, |max| p.product_price <= max)
        && filter
            .product_type
            .as_deref()
            .map_or(true, |t| p.product_type.as_deref() == Some(t))
}

#[async_trait]
impl ProductRepo for MemoryStore {
    async fn create(&self, new: NewProduct) -> anyhow::Result<Product> {
        let mut t = self.tables.write().await;
        let product = Product {
            id: t.next_id(),
            product_name: new.product_name,
            product_desc: new.product_desc,
            product_type: new.product_type,
            product_price: new.product_price,
            product_image: new.product_image,
            deleted: false,
        };
        t.products.push(product.clone());
        Ok(product)
    }

    async fn list(&self, filter: &ProductFilter) -> anyhow::Result<Vec<Product>> {
        let t = self.tables.read().await;
        Ok(t.products
            .iter()
            .filter(|p| !p.deleted && matches(filter, p))
            .cloned()
            .collect())
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Product>> {
        let t = self.tables.read().await;
        Ok(t.products.iter().find(|p| p.id == id && !p.deleted).cloned())
    }

    async fn update(&self, id: i64, patch: ProductPatch) -> anyhow::Result<Option<Product>> {
        let mut t = self.tables.write().await;
        let Some(p) = t.products.iter_mut().find(|p| p.id == id && !p.deleted) else {
            return Ok(None);
        };
        if let Some(v) = patch.product_name {
            p.product_name = v;
        }
        if let Some(v) = patch.product_desc {
            p.product_desc = Some(v);
        }
        if let Some(v) = patch.product_type {
            p.product_type = Some(v);
        }
        if let Some(v) = patch.product_price {
            p.product_price = v;
        }
        if let Some(v) = patch.product_image {
            p.product_image = Some(v);
        }
        Ok(Some(p.clone()))
    }

    async fn soft_delete(&self, id: i64) -> anyhow::Result<bool> {
        let mut t = self.tables.write().await;
        match t.products.iter_mut().find(|p| p.id == id) {
            Some(p) => {
                p.deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ScheduleRepo for MemoryStore {
    async fn create(&self, owner: i64, input: ScheduleInput) -> anyhow::Result<Schedule> {
        let mut t = self.tables.write().await;
        let schedule = Schedule {
            id: t.next_id(),
            day_of_week: input.day_of_week,
            exercise_name: input.exercise_name,
            sets: input.sets,
            reps: input.reps,
            weight: input.weight,
            user_id: owner,
            deleted: false,
        };
        t.schedules.push(schedule.clone());
        Ok(schedule)
    }

    async fn list(&self, owner: i64) -> anyhow::Result<Vec<Schedule>> {
        let t = self.tables.read().await;
        Ok(t.schedules
            .iter()
            .filter(|s| s.user_id == owner && !s.deleted)
            .cloned()
            .collect())
    }

    async fn get(&self, owner: i64, id: i64) -> anyhow::Result<Option<Schedule>> {
        let t = self.tables.read().await;
        Ok(t.schedules
            .iter()
            .find(|s| s.id == id && s.user_id == owner && !s.deleted)
            .cloned())
    }

    async fn update(
        &self,
        owner: i64,
        id: i64,
        input: ScheduleInput,
    ) -> anyhow::Result<Option<Schedule>> {
        let mut t = self.tables.write().await;
        let Some(s) = t
            .schedules
            .iter_mut()
            .find(|s| s.id == id && s.user_id == owner && !s.deleted)
        else {
            return Ok(None);
        };
        s.day_of_week = input.day_of_week;
        s.exercise_name = input.exercise_name;
        s.sets = input.sets;
        s.reps = input.reps;
        s.weight = input.weight;
        Ok(Some(s.clone()))
    }

    async fn soft_delete(&self, owner: i64, id: i64) -> anyhow::Result<bool> {
        let mut t = self.tables.write().await;
        match t
            .schedules
            .iter_mut()
            .find(|s| s.id == id && s.user_id == owner)
        {
            Some(s) => {
                s.deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl OrderRepo for MemoryStore {
    async fn create(&self, owner: i64, new: NewOrder) -> anyhow::Result<Order> {
        let mut t = self.tables.write().await;
        let order = Order {
            id: t.next_id(),
            name: new.name,
            address: new.address,
            phone_number: new.phone_number,
            email: new.email,
            user_id: owner,
            deleted: false,
        };
        t.orders.push(order.clone());
        Ok(order)
    }

    async fn list(&self, owner: i64) -> anyhow::Result<Vec<Order>> {
        let t = self.tables.read().await;
        Ok(t.orders
            .iter()
            .filter(|o| o.user_id == owner && !o.deleted)
            .cloned()
            .collect())
    }

    async fn get(&self, owner: i64, id: i64) -> anyhow::Result<Option<Order>> {
        let t = self.tables.read().await;
        Ok(t.orders
            .iter()
            .find(|o| o.id == id && o.user_id == owner && !o.deleted)
            .cloned())
    }

    async fn update(&self, owner: i64, id: i64, patch: OrderPatch) -> anyhow::Result<Option<Order>> {
        let mut t = self.tables.write().await;
        let Some(o) = t
            .orders
            .iter_mut()
            .find(|o| o.id == id && o.user_id == owner && !o.deleted)
        else {
            return Ok(None);
        };
        if let Some(v) = patch.name {
            o.name = v;
        }
        if let Some(v) = patch.address {
            o.address = v;
        }
        if let Some(v) = patch.phone_number {
            o.phone_number = v;
        }
        if let Some(v) = patch.email {
            o.email = v;
        }
        Ok(Some(o.clone()))
    }

    async fn soft_delete(&self, owner: i64, id: i64) -> anyhow::Result<bool> {
        let mut t = self.tables.write().await;
        match t.orders.iter_mut().find(|o| o.id == id && o.user_id == owner) {
            Some(o) => {
                o.deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64, kind: Option<&str>) -> Product {
        Product {
            id: 1,
            product_name: "Whey".into(),
            product_desc: None,
            product_type: kind.map(str::to_string),
            product_price: price,
            product_image: None,
            deleted: false,
        }
    }

    #[test]
    fn filter_bounds_are_inclusive() {
        let f = ProductFilter {
            min_price: Some(10.0),
            max_price: Some(20.0),
            product_type: None,
        };
        assert!(matches(&f, &product(10.0, None)));
        assert!(matches(&f, &product(20.0, None)));
        assert!(!matches(&f, &product(9.99, None)));
        assert!(!matches(&f, &product(20.01, None)));
    }

    #[test]
    fn filter_by_type_excludes_untyped() {
        let f = ProductFilter {
            product_type: Some("supplement".into()),
            ..Default::default()
        };
        assert!(matches(&f, &product(5.0, Some("supplement"))));
        assert!(!matches(&f, &product(5.0, Some("gear"))));
        assert!(!matches(&f, &product(5.0, None)));
    }
}
