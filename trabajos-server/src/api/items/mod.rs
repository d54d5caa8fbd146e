//! Item API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /items | GET | 按 order 排序的全部 item |
//! | /items | POST | 创建 (追加到末尾) |
//! | /items/reorder | POST | 整体重排 `[{id, order}]` |
//! | /items/{id} | GET / PUT / DELETE | 单个 item |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/items", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/reorder", post(handler::reorder))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
