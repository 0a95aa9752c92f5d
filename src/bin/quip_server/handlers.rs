use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::persistence::{Post, persist_posts_to_disk};
use crate::runtime::AppState;

pub(crate) async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

pub(crate) async fn get_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Post>> {
    let posts = state.posts.read().await;
    let limit = params
        .get("_limit")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(posts.len());
    Json(posts.iter().take(limit).cloned().collect())
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct CreatePostRequest {
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) body: String,
}

pub(crate) async fn post_posts(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePostRequest>,
) -> Response {
    if state.reject_writes {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "error": "writes rejected" })),
        )
            .into_response();
    }

    let mut posts = state.posts.write().await;
    let id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    let post = Post {
        id,
        title: req.title,
        body: req.body,
    };
    posts.push(post.clone());

    if let Err(err) = persist_posts_to_disk(&state.data_dir, &posts) {
        eprintln!("persist posts: {:#}", err);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "persist failed" })),
        )
            .into_response();
    }

    (StatusCode::CREATED, Json(post)).into_response()
}
