//! Item API Handlers

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::{RepoError, item};
use shared::models::{Item, ItemCreate, ItemListResponse, ItemUpdate, OrderEntry, ReorderResponse};
use shared::validation::{validate_item_create, validate_item_update};
use shared::{AppError, AppResult};

/// Report a missing row as `ItemNotFound` with the requested id attached
fn item_error(id: i64) -> impl FnOnce(RepoError) -> AppError {
    move |err| match err {
        RepoError::NotFound(_) => AppError::item_not_found(id),
        other => other.into(),
    }
}

/// GET /items - 按 order 排序的全部 item
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ItemListResponse>> {
    let items = item::find_all(state.pool()).await?;
    Ok(Json(ItemListResponse { items }))
}

/// GET /items/{id} - 获取单个 item
pub async fn get_by_id(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Item>> {
    let Path(id) = id?;
    let found = item::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::item_not_found(id))?;
    Ok(Json(found))
}

/// POST /items - 创建 item，order 由存储分配为 N+1
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ItemCreate>, JsonRejection>,
) -> AppResult<Json<Item>> {
    let Json(payload) = payload?;
    validate_item_create(&payload)?;

    let created = item::create(state.pool(), payload).await?;
    tracing::info!(target: "audit", id = created.id, order = created.order, name = %created.name, "Item created");
    Ok(Json(created))
}

/// PUT /items/{id} - 部分更新 (不含 order)
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ItemUpdate>, JsonRejection>,
) -> AppResult<Json<Item>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    validate_item_update(&payload)?;

    let updated = item::update(state.pool(), id, payload)
        .await
        .map_err(item_error(id))?;
    tracing::info!(target: "audit", id, "Item updated");
    Ok(Json(updated))
}

/// DELETE /items/{id} - 删除并压缩剩余 order
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    item::delete(state.pool(), id)
        .await
        .map_err(item_error(id))?;
    tracing::info!(target: "audit", id, "Item deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /items/reorder - 整体重排
///
/// 请求体必须覆盖全部 item，order 为 `1..N` 的排列；否则整体拒绝，不做部分写入。
pub async fn reorder(
    State(state): State<ServerState>,
    entries: Result<Json<Vec<OrderEntry>>, JsonRejection>,
) -> AppResult<Json<ReorderResponse>> {
    let Json(entries) = entries?;
    tracing::info!(count = entries.len(), "Reorder request received");

    let updated = item::reorder(state.pool(), &entries).await?;
    tracing::info!(target: "audit", updated, "Items reordered");
    Ok(Json(ReorderResponse { updated }))
}
