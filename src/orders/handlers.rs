use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{OrderResponse, OrderSaved},
    repo::{NewOrder, OrderPatch},
};
use crate::{
    auth::extractors::AuthUser,
    common::{extract::PathParam, form::FormData, MessageResponse},
    error::{AppError, AppResult},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route(
            "/orders/:id",
            get(get_order).put(update_order).delete(delete_order),
        )
}

fn not_found() -> AppError {
    AppError::NotFound("Order not found".into())
}

#[instrument(skip(state, user, form))]
pub async fn create_order(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    form: FormData,
) -> AppResult<(StatusCode, Json<OrderSaved>)> {
    let new = NewOrder::from_form(form)?;
    let order = state.orders.create(user.id, new).await?;
    info!(order_id = order.id, user_id = user.id, "order created");
    Ok((
        StatusCode::CREATED,
        Json(OrderSaved {
            msg: "Order created successfully".into(),
            order_id: order.id,
        }),
    ))
}

#[instrument(skip(state, user))]
pub async fn list_orders(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Vec<OrderResponse>>> {
    let rows = state.orders.list(user.id).await?;
    Ok(Json(rows.into_iter().map(OrderResponse::from).collect()))
}

#[instrument(skip(state, user))]
pub async fn get_order(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<OrderResponse>> {
    let order = state.orders.get(user.id, id).await?.ok_or_else(not_found)?;
    Ok(Json(order.into()))
}

#[instrument(skip(state, user, form))]
pub async fn update_order(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    PathParam(id): PathParam<i64>,
    form: FormData,
) -> AppResult<Json<OrderSaved>> {
    let patch = OrderPatch::from_form(form)?;
    let order = state
        .orders
        .update(user.id, id, patch)
        .await?
        .ok_or_else(not_found)?;
    info!(order_id = order.id, user_id = user.id, "order updated");
    Ok(Json(OrderSaved {
        msg: "Order updated".into(),
        order_id: order.id,
    }))
}

#[instrument(skip(state, user))]
pub async fn delete_order(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<MessageResponse>> {
    if !state.orders.soft_delete(user.id, id).await? {
        return Err(not_found());
    }
    info!(order_id = id, user_id = user.id, "order soft deleted");
    Ok(Json(MessageResponse::new(format!("Order {} soft deleted", id))))
}
