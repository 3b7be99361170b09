use base64ct::{Base64, Encoding};
use serde::{Deserialize, Serialize};

use super::repo::{NewProduct, Product, ProductFilter, ProductPatch};
use crate::common::{form::FormData, validate};
use crate::error::{AppError, AppResult};

pub const IMAGE_FIELD: &str = "product_image";

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub product_name: String,
    pub product_desc: Option<String>,
    pub product_type: Option<String>,
    pub product_price: f64,
    pub deleted: bool,
    pub product_image: Option<String>, // base64
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            product_name: p.product_name,
            product_desc: p.product_desc,
            product_type: p.product_type,
            product_price: p.product_price,
            deleted: p.deleted,
            product_image: p.product_image.as_deref().map(Base64::encode_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductSaved {
    pub msg: String,
    pub product_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub product_type: Option<String>,
}

impl From<ProductQuery> for ProductFilter {
    fn from(q: ProductQuery) -> Self {
        Self {
            min_price: q.min_price,
            max_price: q.max_price,
            product_type: q
                .product_type
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        }
    }
}

fn check_price(price: f64) -> AppResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::BadRequest(
            "product_price must be a non-negative number".into(),
        ));
    }
    Ok(())
}

fn check_text_fields(
    name: Option<&str>,
    desc: Option<&str>,
    kind: Option<&str>,
) -> AppResult<()> {
    if let Some(name) = name {
        validate::max_len("product_name", name, 100)?;
    }
    if let Some(desc) = desc {
        validate::max_len("product_desc", desc, 255)?;
    }
    if let Some(kind) = kind {
        validate::max_len("product_type", kind, 50)?;
    }
    Ok(())
}

impl NewProduct {
    pub fn from_form(mut form: FormData) -> AppResult<Self> {
        let product_name = form.required_text("product_name")?;
        let product_price = form
            .parsed::<f64>("product_price")?
            .ok_or_else(|| AppError::BadRequest("product_price is required".into()))?;
        let product_desc = form.text("product_desc");
        let product_type = form.text("product_type");

        check_price(product_price)?;
        check_text_fields(
            Some(&product_name),
            product_desc.as_deref(),
            product_type.as_deref(),
        )?;

        Ok(Self {
            product_name,
            product_desc,
            product_type,
            product_price,
            product_image: form.take_file(IMAGE_FIELD).map(|b| b.to_vec()),
        })
    }
}

impl ProductPatch {
    pub fn from_form(mut form: FormData) -> AppResult<Self> {
        let patch = Self {
            product_name: form.text("product_name"),
            product_desc: form.text("product_desc"),
            product_type: form.text("product_type"),
            product_price: form.parsed::<f64>("product_price")?,
            product_image: form.take_file(IMAGE_FIELD).map(|b| b.to_vec()),
        };
        if let Some(price) = patch.product_price {
            check_price(price)?;
        }
        check_text_fields(
            patch.product_name.as_deref(),
            patch.product_desc.as_deref(),
            patch.product_type.as_deref(),
        )?;
        Ok(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_name_and_price() {
        assert!(NewProduct::from_form(FormData::default().with_text("product_price", "9")).is_err());
        assert!(NewProduct::from_form(FormData::default().with_text("product_name", "Mat")).is_err());

        let p = NewProduct::from_form(
            FormData::default()
                .with_text("product_name", " Yoga mat ")
                .with_text("product_price", "19.5")
                .with_text("product_type", "")
                .with_file(IMAGE_FIELD, b"img"),
        )
        .unwrap();
        assert_eq!(p.product_name, "Yoga mat");
        assert_eq!(p.product_price, 19.5);
        assert_eq!(p.product_type, None);
        assert_eq!(p.product_image.as_deref(), Some(&b"img"[..]));
    }

    #[test]
    fn negative_or_nan_price_is_rejected() {
        for bad in ["-1", "NaN", "inf"] {
            let form = FormData::default()
                .with_text("product_name", "Mat")
                .with_text("product_price", bad);
            assert!(NewProduct::from_form(form).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let patch = ProductPatch::from_form(FormData::default().with_text("product_name", "")).unwrap();
        assert!(patch.product_name.is_none());
        assert!(patch.product_price.is_none());
        assert!(patch.product_image.is_none());
    }

    #[test]
    fn image_is_base64_in_response() {
        let res = ProductResponse::from(Product {
            id: 3,
            product_name: "Bar".into(),
            product_desc: None,
            product_type: None,
            product_price: 2.0,
            product_image: Some(b"hello".to_vec()),
            deleted: false,
        });
        assert_eq!(res.product_image.as_deref(), Some("aGVsbG8="));
    }

    #[test]
    fn blank_type_query_means_no_filter() {
        let f: ProductFilter = ProductQuery {
            min_price: None,
            max_price: None,
            product_type: Some("  ".into()),
        }
        .into();
        assert!(f.product_type.is_none());
    }
}
