//! Request handlers for the `/api` routes.
//!
//! Handlers parse path ids and bodies, call into the store components, and
//! shape responses through the view projections. They hold no state of
//! their own.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use agora_feed::{CommentView, PostView, UserSummary, UserView};
use agora_store::{EntityStore, FollowOutcome, LikeOutcome};
use agora_types::{
    Comment, NewComment, NewPost, Post, PostId, User, UserFields, UserId, ValidationError,
};

use crate::error::ApiError;
use crate::state::AppState;

type ApiResult<T> = Result<T, ApiError>;
type Body<T> = Result<Json<T>, JsonRejection>;

/// Body of follow and like requests: the acting user.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRequest {
    #[serde(default)]
    pub user_id: Option<UserId>,
}

impl ActorRequest {
    fn actor(self) -> ApiResult<UserId> {
        self.user_id
            .ok_or_else(|| ValidationError::MissingField("userId").into())
    }
}

// Unparseable ids name no entity, so they are reported as not found.
fn user_id(raw: &str) -> ApiResult<UserId> {
    raw.parse().map_err(|_| ApiError::user_not_found())
}

fn post_id(raw: &str) -> ApiResult<PostId> {
    raw.parse().map_err(|_| ApiError::post_not_found())
}

/// Health check handler.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let (users, posts, comments) = state
        .store()
        .read(|c| (c.user_count(), c.post_count(), c.total_comments()))?;
    Ok(Json(json!({
        "name": "agora-server",
        "version": env!("CARGO_PKG_VERSION"),
        "users": users,
        "posts": posts,
        "comments": comments,
    })))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserView>>> {
    Ok(Json(state.feed().list_user_views()?))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserView>> {
    Ok(Json(state.feed().user_view(user_id(&id)?)?))
}

/// GET /api/users/:id/followers
pub async fn list_followers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<UserSummary>>> {
    Ok(Json(state.feed().followers(user_id(&id)?)?))
}

/// GET /api/users/:id/following
pub async fn list_following(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<UserSummary>>> {
    Ok(Json(state.feed().following(user_id(&id)?)?))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    body: Body<UserFields>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(fields) = body?;
    let user = state.store().create_user(fields.validate()?)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Body<UserFields>,
) -> ApiResult<Json<User>> {
    let id = user_id(&id)?;
    // An unknown user is reported before any problem with the body.
    state.store().get_user(id)?;
    let Json(fields) = body?;
    let user = state.store().update_user(id, fields.validate()?)?;
    Ok(Json(user))
}

/// POST /api/users/:id/follow
pub async fn toggle_follow(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Body<ActorRequest>,
) -> ApiResult<Json<FollowOutcome>> {
    let target = user_id(&id)?;
    let Json(request) = body?;
    let actor = request.actor()?;
    Ok(Json(state.graph().toggle_follow(actor, target)?))
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// GET /api/posts
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<PostView>>> {
    Ok(Json(state.feed().assemble_feed()?))
}

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    body: Body<NewPost>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let Json(new_post) = body?;
    let post = state.store().create_post(new_post.validate()?)?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// POST /api/posts/:id/like
pub async fn toggle_like(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Body<ActorRequest>,
) -> ApiResult<Json<LikeOutcome>> {
    let post = post_id(&id)?;
    let Json(request) = body?;
    // Post existence is checked first, as for any other post route.
    state.store().get_post(post)?;
    let actor = request.actor()?;
    Ok(Json(state.engagement().toggle_like(post, actor)?))
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// GET /api/posts/:id/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<CommentView>>> {
    Ok(Json(state.feed().assemble_comments(post_id(&id)?)?))
}

/// POST /api/posts/:id/comments
pub async fn create_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Body<NewComment>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    let Json(new_comment) = body?;
    let (author, content) = new_comment.validate()?;
    let post = post_id(&id)?;
    let comment = state.engagement().add_comment(post, author, &content)?;
    Ok((StatusCode::CREATED, Json(comment)))
}
