//! Development server - serves the generated site for preview
//!
//! Answers the canonical `/blog?slug=<slug>` query URL directly so shared
//! links work in preview, and optionally watches the source tree to
//! regenerate on change.

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::Folio;

struct ServerState {
    public_dir: PathBuf,
}

#[derive(Deserialize)]
struct BlogQuery {
    slug: Option<String>,
}

/// Start the development server
pub async fn start(folio: &Folio, ip: &str, port: u16, watch: bool) -> Result<()> {
    let state = Arc::new(ServerState {
        public_dir: folio.public_dir.clone(),
    });

    let serve_dir = ServeDir::new(&folio.public_dir).append_index_html_on_directories(true);

    let app = Router::new()
        .route("/blog", get(blog_handler))
        .fallback_service(serve_dir)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        let folio_clone = folio.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_regenerate(folio_clone) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Resolve the canonical `/blog?slug=<slug>` URL to the generated page
async fn blog_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<BlogQuery>,
) -> Response {
    match query.slug {
        Some(slug) => {
            // Slugs are slugified at load time; anything outside that
            // character set never names a post and must not reach the
            // filesystem join.
            if !is_valid_slug(&slug) {
                return (StatusCode::NOT_FOUND, "Post not found").into_response();
            }
            let page = state.public_dir.join("blog").join(&slug).join("index.html");
            match tokio::fs::read_to_string(&page).await {
                Ok(content) => Html(content).into_response(),
                Err(_) => (StatusCode::NOT_FOUND, "Post not found").into_response(),
            }
        }
        None => Redirect::permanent("/blog/").into_response(),
    }
}

/// Check that a requested slug stays within the slugified character set
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Regenerate the site on debounced source changes
fn watch_and_regenerate(folio: Folio) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if folio.source_dir.exists() {
        debouncer
            .watcher()
            .watch(&folio.source_dir, RecursiveMode::Recursive)?;
    }

    let config_path = folio.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|e| {
                    let path = e.path.to_string_lossy();
                    !path.contains(".git") && !path.ends_with('~')
                });
                if !relevant {
                    continue;
                }

                tracing::info!("Source changed, regenerating...");
                match folio.generate() {
                    Ok(_) => tracing::info!("Regenerated"),
                    Err(e) => tracing::error!("Generation failed: {}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}
