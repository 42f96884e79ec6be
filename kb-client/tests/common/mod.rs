//! In-process mock of the knowledge-base backend
//!
//! Bound to `127.0.0.1:0`; each test gets its own server and state.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use shared::models::{
    Category, CategoryUpsert, Permission, Role, RolePermission, RolePermissionReplace, RoleRef,
    RoleUpsert, Subcategory, SubcategoryCreate, SubcategoryUpdate, User, UserCreate, UserProfile,
};

use kb_client::{ClientConfig, KbClient, MemoryStorage};

pub const TOKEN: &str = "token-alice";
pub const ADMIN_ROLE: i64 = 1;

type ApiError = (StatusCode, Json<Value>);
type ApiResult = Result<Json<Value>, ApiError>;

#[derive(Debug, Default)]
pub struct MockState {
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
    pub grants: Vec<RolePermission>,
    pub categories: Vec<Category>,
    pub profile: Option<UserProfile>,
    pub articles: Vec<Value>,
    /// Tokens the backend stopped accepting
    pub revoked: bool,
    /// Every `PUT /role-permissions/role` body, in order
    pub replaced: Vec<RolePermissionReplace>,
    pub logouts: usize,
    /// `Authorization` header seen by login and change-password, per call
    pub anonymous_calls: Vec<(&'static str, Option<String>)>,
    pub refreshes: usize,
    /// Artificial latency per search term, in milliseconds
    pub search_delays: Vec<(String, u64)>,
    next_id: i64,
}

impl MockState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Shared = Arc<Mutex<MockState>>;

pub struct MockBackend {
    pub base_url: String,
    pub state: Shared,
}

impl MockBackend {
    /// Client with in-memory storage pointed at this backend
    pub fn client(&self) -> KbClient {
        KbClient::with_storage(
            ClientConfig::new(&self.base_url).with_timeout(5),
            Arc::new(MemoryStorage::new()),
        )
        .unwrap()
    }

    pub fn with_state<T>(&self, f: impl FnOnce(&mut MockState) -> T) -> T {
        f(&mut self.state.lock().unwrap())
    }
}

fn permission(id: i64, name: &str) -> Permission {
    Permission {
        id,
        name: name.into(),
        description: None,
    }
}

fn user(id: i64, username: &str, active: bool) -> User {
    serde_json::from_value(json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.com"),
        "role_id": ADMIN_ROLE,
        "role": {"name": "admin"},
        "is_verified": active,
        "created_at": "2024-05-01T10:00:00Z",
    }))
    .unwrap()
}

/// Seed data: alice is an admin holding `user_setting`, `role_setting`,
/// `view_home` and the category grants; bob is active, carol is not
fn seed() -> MockState {
    let permissions = vec![
        permission(1, "view_home"),
        permission(2, "view_dashboard"),
        permission(3, "view_category"),
        permission(4, "add_category"),
        permission(5, "edit_category"),
        permission(6, "delete_category"),
        permission(7, "view_profile"),
        permission(8, "edit_profile"),
        permission(9, "role_setting"),
        permission(10, "user_setting"),
    ];
    let grants = [1, 3, 4, 5, 6, 9, 10]
        .into_iter()
        .map(|pid| RolePermission {
            id: pid,
            role_id: ADMIN_ROLE,
            permission_id: pid,
            permission: permissions.iter().find(|p| p.id == pid).cloned(),
        })
        .collect();
    MockState {
        users: vec![user(1, "alice", true), user(2, "bob", true), user(3, "carol", false)],
        roles: vec![
            Role {
                id: ADMIN_ROLE,
                name: "admin".into(),
                description: Some("Everything".into()),
            },
            Role {
                id: 2,
                name: "editor".into(),
                description: Some("Writes articles".into()),
            },
        ],
        permissions,
        grants,
        articles: vec![
            json!({"id": 1, "title": "Intro", "slug": "intro",
                   "content": "{\"type\":\"doc\",\"content\":[{\"type\":\"paragraph\",\"content\":[{\"type\":\"text\",\"text\":\"Hi #welcome\"}]}]}",
                   "content_html": "<p>Hi #welcome</p>"}),
            json!({"id": 2, "title": "Legacy", "slug": "legacy", "content": "plain old text"}),
        ],
        next_id: 100,
        ..Default::default()
    }
}

fn error(status: StatusCode, detail: Value) -> ApiError {
    (status, Json(json!({ "detail": detail })))
}

fn authorize(state: &Shared, headers: &HeaderMap) -> Result<(), ApiError> {
    let bearer = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));
    match bearer {
        Some(TOKEN) if !state.lock().unwrap().revoked => Ok(()),
        _ => Err(error(StatusCode::UNAUTHORIZED, json!("Could not validate credentials"))),
    }
}

fn not_found(what: &str) -> ApiError {
    error(StatusCode::NOT_FOUND, json!(format!("{what} not found")))
}

fn to_json<T: serde::Serialize>(value: T) -> ApiResult {
    Ok(Json(serde_json::to_value(value).unwrap()))
}

#[derive(Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
}

async fn login(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<Credentials>,
) -> ApiResult {
    state
        .lock()
        .unwrap()
        .anonymous_calls
        .push(("login", authorization(&headers)));
    if req.username == "tokenless" {
        return Ok(Json(json!({
            "access_token": "",
            "user": {"id": 9, "username": "tokenless"}
        })));
    }
    if req.username != "alice" || req.password != "secret" {
        return Err(error(StatusCode::UNAUTHORIZED, json!("Invalid credentials")));
    }
    Ok(Json(json!({
        "access_token": TOKEN,
        "refresh_token": "refresh-alice",
        "token_type": "bearer",
        "expires_in": 1800,
        "user": {"id": 1, "username": "alice", "role_id": ADMIN_ROLE, "is_verified": true, "session_id": "s1"}
    })))
}

async fn refresh(State(state): State<Shared>, Json(req): Json<Value>) -> ApiResult {
    if req["refresh_token"] != "refresh-alice" {
        return Err(error(StatusCode::UNAUTHORIZED, json!("Invalid refresh token")));
    }
    state.lock().unwrap().refreshes += 1;
    Ok(Json(json!({
        "access_token": TOKEN,
        "refresh_token": "refresh-alice",
        "token_type": "bearer",
        "expires_in": 3600,
        "user": {"id": 1, "username": "alice", "role_id": ADMIN_ROLE, "is_verified": true}
    })))
}

async fn logout(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    authorize(&state, &headers)?;
    state.lock().unwrap().logouts += 1;
    Ok(Json(json!({"message": "Logged out"})))
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    authorize(&state, &headers)?;
    let state = state.lock().unwrap();
    to_json(&state.users[0])
}

async fn role_grants(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(role_id): Path<i64>,
) -> ApiResult {
    authorize(&state, &headers)?;
    let state = state.lock().unwrap();
    let grants: Vec<_> = state.grants.iter().filter(|g| g.role_id == role_id).collect();
    to_json(grants)
}

async fn replace_grants(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<RolePermissionReplace>,
) -> ApiResult {
    authorize(&state, &headers)?;
    let mut state = state.lock().unwrap();
    state.grants.retain(|g| g.role_id != req.role_id);
    for pid in &req.permission_id {
        let id = state.next_id();
        let permission = state.permissions.iter().find(|p| p.id == *pid).cloned();
        state.grants.push(RolePermission {
            id,
            role_id: req.role_id,
            permission_id: *pid,
            permission,
        });
    }
    let role_id = req.role_id;
    state.replaced.push(req);
    let grants: Vec<_> = state.grants.iter().filter(|g| g.role_id == role_id).collect();
    to_json(grants)
}

async fn permissions(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    authorize(&state, &headers)?;
    to_json(&state.lock().unwrap().permissions)
}

async fn list_roles(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    authorize(&state, &headers)?;
    to_json(&state.lock().unwrap().roles)
}

async fn create_role(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<RoleUpsert>,
) -> ApiResult {
    authorize(&state, &headers)?;
    let mut state = state.lock().unwrap();
    let role = Role {
        id: state.next_id(),
        name: req.name,
        description: Some(req.description),
    };
    state.roles.push(role.clone());
    to_json(role)
}

async fn update_role(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(req): Json<RoleUpsert>,
) -> ApiResult {
    authorize(&state, &headers)?;
    let mut state = state.lock().unwrap();
    let role = state
        .roles
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| not_found("Role"))?;
    role.name = req.name;
    role.description = Some(req.description);
    to_json(role.clone())
}

async fn delete_role(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult {
    authorize(&state, &headers)?;
    state.lock().unwrap().roles.retain(|r| r.id != id);
    Ok(Json(json!({"message": "Role deleted"})))
}

async fn list_categories(State(state): State<Shared>) -> ApiResult {
    to_json(&state.lock().unwrap().categories)
}

async fn get_category(State(state): State<Shared>, Path(id): Path<i64>) -> ApiResult {
    let state = state.lock().unwrap();
    let category = state
        .categories
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| not_found("Category"))?;
    to_json(category)
}

async fn create_category(State(state): State<Shared>, Json(req): Json<CategoryUpsert>) -> ApiResult {
    let mut state = state.lock().unwrap();
    let category = Category {
        id: state.next_id(),
        name: req.name,
        description: req.description,
        icon: Some(req.icon),
        status: req.status,
        subcategories: Vec::new(),
    };
    state.categories.push(category.clone());
    to_json(category)
}

async fn update_category(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(req): Json<CategoryUpsert>,
) -> ApiResult {
    let mut state = state.lock().unwrap();
    let category = state
        .categories
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| not_found("Category"))?;
    category.name = req.name;
    category.description = req.description;
    category.icon = Some(req.icon);
    category.status = req.status;
    to_json(category.clone())
}

async fn delete_category(State(state): State<Shared>, Path(id): Path<i64>) -> ApiResult {
    let mut state = state.lock().unwrap();
    let index = state
        .categories
        .iter()
        .position(|c| c.id == id)
        .ok_or_else(|| not_found("Category"))?;
    to_json(state.categories.remove(index))
}

async fn create_subcategory(
    State(state): State<Shared>,
    Json(req): Json<SubcategoryCreate>,
) -> ApiResult {
    let mut state = state.lock().unwrap();
    let id = state.next_id();
    let parent = state
        .categories
        .iter_mut()
        .find(|c| c.id == req.category_id)
        .ok_or_else(|| not_found("Category"))?;
    let sub = Subcategory {
        id,
        category_id: req.category_id,
        name: req.name,
        description: req.description,
        status: req.status,
    };
    parent.subcategories.push(sub.clone());
    to_json(sub)
}

async fn update_subcategory(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(req): Json<SubcategoryUpdate>,
) -> ApiResult {
    let mut state = state.lock().unwrap();
    let sub = state
        .categories
        .iter_mut()
        .flat_map(|c| c.subcategories.iter_mut())
        .find(|s| s.id == id)
        .ok_or_else(|| not_found("Subcategory"))?;
    sub.name = req.name;
    sub.description = req.description;
    sub.status = req.status;
    to_json(sub.clone())
}

async fn delete_subcategory(State(state): State<Shared>, Path(id): Path<i64>) -> ApiResult {
    let mut state = state.lock().unwrap();
    for category in &mut state.categories {
        category.subcategories.retain(|s| s.id != id);
    }
    Ok(Json(json!({"message": "Subcategory deleted"})))
}

#[derive(Deserialize)]
struct UserQuery {
    skip: usize,
    limit: usize,
    search: Option<String>,
}

async fn list_users(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(q): Query<UserQuery>,
) -> ApiResult {
    authorize(&state, &headers)?;
    let search = q.search.unwrap_or_default();
    let delay = state
        .lock()
        .unwrap()
        .search_delays
        .iter()
        .find(|(term, _)| *term == search)
        .map(|(_, ms)| *ms);
    if let Some(ms) = delay {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
    let state = state.lock().unwrap();
    let users: Vec<_> = state
        .users
        .iter()
        .filter(|u| u.username.contains(&search))
        .skip(q.skip)
        .take(q.limit)
        .collect();
    to_json(users)
}

async fn get_user(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> ApiResult {
    authorize(&state, &headers)?;
    let state = state.lock().unwrap();
    let user = state
        .users
        .iter()
        .find(|u| u.id == id)
        .ok_or_else(|| not_found("User"))?;
    to_json(user)
}

async fn create_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<UserCreate>,
) -> ApiResult {
    authorize(&state, &headers)?;
    if req.username == "conflict" {
        return Err(error(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!([
                {"loc": ["body", "email"], "msg": "bad", "type": "value_error"},
                {"loc": [], "msg": "missing", "type": "missing"}
            ]),
        ));
    }
    let mut state = state.lock().unwrap();
    let id = state.next_id();
    let mut created = user(id, &req.username, req.is_verified);
    created.email = req.email;
    created.role_id = req.role_id;
    state.users.push(created.clone());
    to_json(created)
}

async fn update_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(req): Json<Value>,
) -> ApiResult {
    authorize(&state, &headers)?;
    let mut state = state.lock().unwrap();
    let user = state
        .users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(|| not_found("User"))?;
    if let Some(email) = req.get("email").and_then(Value::as_str) {
        user.email = email.to_string();
    }
    if let Some(username) = req.get("username").and_then(Value::as_str) {
        user.username = username.to_string();
    }
    to_json(user.clone())
}

async fn delete_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult {
    authorize(&state, &headers)?;
    state.lock().unwrap().users.retain(|u| u.id != id);
    Ok(Json(json!({"message": "User deleted"})))
}

async fn verify_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(req): Json<Value>,
) -> ApiResult {
    authorize(&state, &headers)?;
    let mut state = state.lock().unwrap();
    let user = state
        .users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(|| not_found("User"))?;
    user.is_verified = req["is_verified"].as_bool().unwrap_or(false);
    Ok(Json(json!({"message": "User verification updated"})))
}

async fn change_password(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<Value>,
) -> ApiResult {
    state
        .lock()
        .unwrap()
        .anonymous_calls
        .push(("change-password", authorization(&headers)));
    if req["old_password"] != "secret123" {
        return Err(error(StatusCode::UNAUTHORIZED, json!("Old password is incorrect")));
    }
    Ok(Json(json!({"message": "Password changed"})))
}

async fn set_user_role(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(req): Json<Value>,
) -> ApiResult {
    authorize(&state, &headers)?;
    let mut state = state.lock().unwrap();
    let role_id = req["role_id"].as_i64().unwrap_or_default();
    let role_name = state
        .roles
        .iter()
        .find(|r| r.id == role_id)
        .map(|r| r.name.clone())
        .ok_or_else(|| not_found("Role"))?;
    let user = state
        .users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(|| not_found("User"))?;
    user.role_id = Some(role_id);
    user.role = Some(RoleRef::Named { name: role_name });
    Ok(Json(json!({"message": "User role updated"})))
}

async fn get_profile(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    authorize(&state, &headers)?;
    let state = state.lock().unwrap();
    let profile = state.profile.clone().ok_or_else(|| not_found("Profile"))?;
    to_json(profile)
}

async fn put_profile(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(fields): Json<Value>,
) -> ApiResult {
    authorize(&state, &headers)?;
    let first = fields["first_name"].as_str().unwrap_or_default();
    let last = fields["last_name"].as_str().unwrap_or_default();
    let mut body = fields.clone();
    body["full_name"] = json!(format!("{first} {last}").trim().to_string());
    body["display_name"] = json!(first);
    let profile: UserProfile = serde_json::from_value(body).unwrap();
    state.lock().unwrap().profile = Some(profile.clone());
    to_json(profile)
}

async fn get_article(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> ApiResult {
    authorize(&state, &headers)?;
    let state = state.lock().unwrap();
    let article = state
        .articles
        .iter()
        .find(|a| a["slug"] == slug.as_str())
        .cloned()
        .ok_or_else(|| not_found("Article"))?;
    Ok(Json(article))
}

async fn list_articles(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    authorize(&state, &headers)?;
    Ok(Json(Value::Array(state.lock().unwrap().articles.clone())))
}

async fn create_article(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(mut draft): Json<Value>,
) -> ApiResult {
    authorize(&state, &headers)?;
    let mut state = state.lock().unwrap();
    draft["id"] = json!(state.next_id());
    state.articles.push(draft.clone());
    Ok(Json(draft))
}

async fn delete_article(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> ApiResult {
    authorize(&state, &headers)?;
    let mut state = state.lock().unwrap();
    let index = state
        .articles
        .iter()
        .position(|a| a["slug"] == slug.as_str())
        .ok_or_else(|| not_found("Article"))?;
    state.articles.remove(index);
    Ok(Json(json!({"message": "Article deleted"})))
}

pub fn router(state: Shared) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/refresh", post(refresh))
        .route("/auth/me", get(me))
        .route("/permissions", get(permissions))
        .route("/role-permissions/role", put(replace_grants))
        .route("/role-permissions/role/{role_id}", get(role_grants))
        .route("/roles", get(list_roles).post(create_role))
        .route("/roles/{id}", put(update_role).delete(delete_role))
        .route("/categories/", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/categories/subcategories/", post(create_subcategory))
        .route(
            "/categories/subcategories/{id}",
            put(update_subcategory).delete(delete_subcategory),
        )
        .route("/users/", get(list_users))
        .route("/users/create", post(create_user))
        .route("/users/change-password", post(change_password))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/{id}/verify", put(verify_user))
        .route("/users/{id}/role", put(set_user_role))
        .route("/profiles/me", get(get_profile).put(put_profile))
        .route("/articles/", get(list_articles).post(create_article))
        .route("/articles/{slug}", get(get_article).delete(delete_article))
        .with_state(state)
}

/// Start a seeded backend on an ephemeral port
pub async fn spawn() -> MockBackend {
    let state: Shared = Arc::new(Mutex::new(seed()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    MockBackend {
        base_url: format!("http://{addr}"),
        state,
    }
}

/// Client already logged in as alice
pub async fn logged_in(backend: &MockBackend) -> KbClient {
    let client = backend.client();
    client.login("alice", "secret").await.unwrap();
    client
}
