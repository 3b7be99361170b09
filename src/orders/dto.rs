use serde::Serialize;

use super::repo::{NewOrder, Order, OrderPatch};
use crate::common::{form::FormData, validate};
use crate::error::AppResult;

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub user_id: i64,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            name: o.name,
            address: o.address,
            phone_number: o.phone_number,
            email: o.email,
            user_id: o.user_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderSaved {
    pub msg: String,
    pub order_id: i64,
}

fn check_fields(
    name: Option<&str>,
    address: Option<&str>,
    phone_number: Option<&str>,
    email: Option<&str>,
) -> AppResult<()> {
    if let Some(v) = name {
        validate::max_len("name", v, 100)?;
    }
    if let Some(v) = address {
        validate::max_len("address", v, 255)?;
    }
    if let Some(v) = phone_number {
        validate::max_len("phone_number", v, 20)?;
    }
    if let Some(v) = email {
        validate::email("email", v)?;
    }
    Ok(())
}

impl NewOrder {
    pub fn from_form(form: FormData) -> AppResult<Self> {
        let order = Self {
            name: form.required_text("name")?,
            address: form.required_text("address")?,
            phone_number: form.required_text("phone_number")?,
            email: form.required_text("email")?,
        };
        check_fields(
            Some(&order.name),
            Some(&order.address),
            Some(&order.phone_number),
            Some(&order.email),
        )?;
        Ok(order)
    }
}

impl OrderPatch {
    pub fn from_form(form: FormData) -> AppResult<Self> {
        let patch = Self {
            name: form.text("name"),
            address: form.text("address"),
            phone_number: form.text("phone_number"),
            email: form.text("email"),
        };
        check_fields(
            patch.name.as_deref(),
            patch.address.as_deref(),
            patch.phone_number.as_deref(),
            patch.email.as_deref(),
        )?;
        Ok(patch)
    }
}
