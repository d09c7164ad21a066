//! HTTP surface: add-item form, form submission, feed download, static files.
//!
//! Thin by intent.  Handlers look a channel up, take its lock, call one
//! channel operation, and render the outcome; every rule about duplicates,
//! fetching, persistence, and feed shape lives in [`crate::channel`].  The
//! channel lock is held across the whole add operation, fetch included, so
//! two submissions to the same channel serialize while other channels stay
//! untouched.

use std::sync::Arc;

use axum::extract::{Form, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::extract::TitleExtractor;
use crate::registry::Registry;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub extractor: Arc<TitleExtractor>,
    /// Route prefix, either empty or starting with `/`.  Baked into both the
    /// mounted routes and the links the pages render.
    pub prefix: String,
}

/// Form body of a submission; a missing field reads as an empty URL, which
/// then fails extraction like any other unfetchable URL.
#[derive(Deserialize)]
struct AddForm {
    #[serde(default)]
    url: String,
}

/// Build the application router.
///
/// Separated from [`run_server`] so tests can drive it without binding a
/// socket.  `assets_dir` must contain a `static/` subdirectory, mounted
/// under the prefix next to the dynamic routes.
pub(crate) fn build_app(state: AppState, assets_dir: &std::path::Path) -> Router {
    let prefix = state.prefix.clone();
    Router::new()
        .route(
            &format!("{prefix}/add/{{name}}"),
            get(add_form).post(add_submit),
        )
        .route(&format!("{prefix}/feed/{{name}}"), get(feed))
        .nest_service(
            &format!("{prefix}/static"),
            ServeDir::new(assets_dir.join("static")),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the listening socket and serve until shutdown.
pub async fn run_server(
    port: u16,
    state: AppState,
    assets_dir: &std::path::Path,
) -> Result<(), std::io::Error> {
    let app = build_app(state, assets_dir);

    let listener = TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!(port = port, "feedsmith listening");

    axum::serve(listener, app).await
}

/// The one client error the service produces: a request naming a channel
/// the startup scan never found.
fn channel_not_found(name: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        format!("Channel {name} not found"),
    )
        .into_response()
}

/// `GET {prefix}/add/{name}`: the submission form.
async fn add_form(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    if state.registry.get(&name).is_none() {
        return channel_not_found(&name);
    }
    Html(pages::add_form(&state.prefix, &name)).into_response()
}

/// `POST {prefix}/add/{name}`: submit a URL.
///
/// Failed additions still answer 200 with an error page; the form is a
/// browser surface, and the page says what went wrong.  Only an unknown
/// channel is a client error.
async fn add_submit(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Form(form): Form<AddForm>,
) -> Response {
    let Some(guard) = state.registry.get(&name) else {
        return channel_not_found(&name);
    };

    let mut channel = guard.lock().await;
    let result = channel.add_item_by_url(&state.extractor, &form.url).await;
    drop(channel);

    match result {
        Ok(item) => {
            Html(pages::add_ok(&state.prefix, &name, &form.url, &item.title)).into_response()
        }
        Err(err) => Html(pages::add_err(
            &state.prefix,
            &name,
            &form.url,
            &err.to_string(),
        ))
        .into_response(),
    }
}

/// `GET {prefix}/feed/{name}`: the channel's cached RSS document.
async fn feed(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let Some(guard) = state.registry.get(&name) else {
        return channel_not_found(&name);
    };

    let channel = guard.lock().await;
    let xml = channel.feed_xml().to_string();
    drop(channel);

    ([(header::CONTENT_TYPE, "application/rss+xml")], xml).into_response()
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// The three HTML pages the service renders.  All interpolated values pass
/// through entity escaping; channel names and URLs come straight off the
/// request.
mod pages {
    use html_escape::{encode_double_quoted_attribute, encode_text};

    pub(super) fn add_form(prefix: &str, name: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
 <title>Add to {name}</title>
 <link rel="stylesheet" href="{prefix}/static/style.css">
</head>
<body>
 <h1>Add a link to {name}</h1>
 <form action="{prefix}/add/{name_attr}" method="post">
  <input type="text" name="url" placeholder="http://..." size="64">
  <input type="submit" value="Add">
 </form>
</body>
</html>
"#,
            name = encode_text(name),
            name_attr = encode_double_quoted_attribute(name),
            prefix = prefix,
        )
    }

    pub(super) fn add_ok(prefix: &str, name: &str, url: &str, title: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
 <title>Added to {name}</title>
 <link rel="stylesheet" href="{prefix}/static/style.css">
</head>
<body>
 <h1>Added to {name}</h1>
 <p><a href="{url_attr}">{url}</a> was added as "{title}".</p>
 <p><a href="{prefix}/add/{name_attr}">Add another</a> | <a href="{prefix}/feed/{name_attr}">Feed</a></p>
</body>
</html>
"#,
            name = encode_text(name),
            name_attr = encode_double_quoted_attribute(name),
            url = encode_text(url),
            url_attr = encode_double_quoted_attribute(url),
            title = encode_text(title),
            prefix = prefix,
        )
    }

    pub(super) fn add_err(prefix: &str, name: &str, url: &str, err: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
 <title>Could not add to {name}</title>
 <link rel="stylesheet" href="{prefix}/static/style.css">
</head>
<body>
 <h1>Could not add to {name}</h1>
 <p>{url}: {err}</p>
 <p><a href="{prefix}/add/{name_attr}">Try again</a></p>
</body>
</html>
"#,
            name = encode_text(name),
            name_attr = encode_double_quoted_attribute(name),
            url = encode_text(url),
            err = encode_text(err),
            prefix = prefix,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
