use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{ProductQuery, ProductResponse, ProductSaved},
    repo::{NewProduct, ProductFilter, ProductPatch},
};
use crate::{
    auth::extractors::AuthUser,
    common::{
        extract::{PathParam, QueryParams},
        form::FormData,
        MessageResponse,
    },
    error::{AppError, AppResult},
    state::AppState,
};

const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024; // 20MB

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

fn not_found() -> AppError {
    AppError::NotFound("Product not found".into())
}

#[instrument(skip(state, user, form))]
pub async fn create_product(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    form: FormData,
) -> AppResult<(StatusCode, Json<ProductSaved>)> {
    let new = NewProduct::from_form(form)?;
    let product = state.products.create(new).await?;
    info!(product_id = product.id, user_id = user.id, "product created");
    Ok((
        StatusCode::CREATED,
        Json(ProductSaved {
            msg: "Product created".into(),
            product_id: product.id,
        }),
    ))
}

#[instrument(skip(state, _user))]
pub async fn list_products(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    QueryParams(q): QueryParams<ProductQuery>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    let filter = ProductFilter::from(q);
    let products = state.products.list(&filter).await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

#[instrument(skip(state, _user))]
pub async fn get_product(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.products.get(id).await?.ok_or_else(not_found)?;
    Ok(Json(product.into()))
}

#[instrument(skip(state, user, form))]
pub async fn update_product(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    PathParam(id): PathParam<i64>,
    form: FormData,
) -> AppResult<Json<ProductSaved>> {
    let patch = ProductPatch::from_form(form)?;
    let product = state.products.update(id, patch).await?.ok_or_else(not_found)?;
    info!(product_id = product.id, user_id = user.id, "product updated");
    Ok(Json(ProductSaved {
        msg: "Product updated".into(),
        product_id: product.id,
    }))
}

#[instrument(skip(state, user))]
pub async fn delete_product(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<MessageResponse>> {
    if !state.products.soft_delete(id).await? {
        return Err(not_found());
    }
    info!(product_id = id, user_id = user.id, "product soft deleted");
    Ok(Json(MessageResponse::new(format!("Product {} soft deleted", id))))
}
