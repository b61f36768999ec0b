use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// How long `/slow/` waits before answering.
pub const SLOW_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
}

#[derive(Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

pub type Db = Arc<HashMap<i64, Post>>;

/// The fixture posts served by `/posts/`.
pub fn fixtures() -> Vec<Post> {
    vec![
        Post {
            user_id: 1,
            id: 1,
            title: "sunt aut facere repellat provident occaecati excepturi optio reprehenderit".to_string(),
            body: "quia et suscipit\nsuscipit recusandae consequuntur expedita et cum\nreprehenderit molestiae ut ut quas totam\nnostrum rerum est autem sunt rem eveniet architecto".to_string(),
        },
        Post {
            user_id: 1,
            id: 2,
            title: "qui est esse".to_string(),
            body: "est rerum tempore vitae\nsequi sint nihil reprehenderit dolor beatae ea dolores neque".to_string(),
        },
        Post {
            user_id: 2,
            id: 11,
            title: "et ea vero quia laudantium autem".to_string(),
            body: "delectus reiciendis molestiae occaecati non minima eveniet qui voluptatibus".to_string(),
        },
    ]
}

pub fn app() -> Router {
    let db: Db = Arc::new(fixtures().into_iter().map(|p| (p.id, p)).collect());
    Router::new()
        .route("/posts/", get(list_posts))
        .route("/slow/", get(slow_posts))
        .route("/malformed/", get(malformed))
        .route("/strings/", get(strings))
        .route("/echo/", get(echo))
        .fallback(not_found)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Bind an ephemeral local port and serve `app()` in the background.
pub async fn spawn() -> Result<SocketAddr, std::io::Error> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(err) = run(listener).await {
            tracing::error!(error = %err, "mock server stopped");
        }
    });
    Ok(addr)
}

async fn list_posts(
    State(db): State<Db>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Vec<Post>>, StatusCode> {
    tracing::debug!(id = ?query.id, "list posts");
    let mut posts: Vec<Post> = match query.id.as_deref() {
        None => db.values().cloned().collect(),
        Some(raw) => {
            let id: i64 = raw.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
            db.get(&id).cloned().into_iter().collect()
        }
    };
    posts.sort_by_key(|p| p.id);
    Ok(Json(posts))
}

async fn slow_posts(
    state: State<Db>,
    query: Query<IdQuery>,
) -> Result<Json<Vec<Post>>, StatusCode> {
    tokio::time::sleep(SLOW_DELAY).await;
    list_posts(state, query).await
}

async fn malformed() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "userId": 1, "id": 1, "title": "not an array" }))
}

async fn strings() -> Json<Vec<&'static str>> {
    Json(vec!["one", "two"])
}

/// Echo the raw id back as the title of a single post.
async fn echo(Query(query): Query<IdQuery>) -> Json<Vec<Post>> {
    let raw = query.id.unwrap_or_default();
    Json(vec![Post {
        user_id: 0,
        id: raw.parse().unwrap_or(0),
        title: raw,
        body: String::new(),
    }])
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
