//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::Folio;

/// Generate the static site
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let loader = ContentLoader::new(folio);
    let posts = loader.load_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    Generator::new(folio).generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(folio: &Folio) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(folio.source_dir.as_ref(), notify::RecursiveMode::Recursive)?;

    let config_path = folio.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(config_path.as_ref(), notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut debouncer = RebuildDebouncer::new(Duration::from_millis(500));

    loop {
        let rebuild = match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => debouncer.on_event(Instant::now()),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => debouncer.on_tick(Instant::now()),
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        };

        if rebuild {
            tracing::info!("File changed, regenerating...");
            if let Err(e) = run(folio) {
                tracing::error!("Generation failed: {}", e);
            }
            debouncer.rebuilt(Instant::now());
        }
    }

    Ok(())
}

/// Debounce policy for the watch loop. Events inside the cooldown window
/// are deferred, not dropped: a pending change triggers a rebuild as soon
/// as the cooldown expires.
struct RebuildDebouncer {
    cooldown: Duration,
    last_rebuild: Option<Instant>,
    pending: bool,
}

impl RebuildDebouncer {
    fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_rebuild: None,
            pending: false,
        }
    }

    fn ready(&self, now: Instant) -> bool {
        self.last_rebuild
            .map(|at| now.duration_since(at) > self.cooldown)
            .unwrap_or(true)
    }

    /// A filesystem event arrived. Returns true if a rebuild should run now.
    fn on_event(&mut self, now: Instant) -> bool {
        if self.ready(now) {
            true
        } else {
            self.pending = true;
            false
        }
    }

    /// The receive loop idled. Returns true if a deferred rebuild is due.
    fn on_tick(&mut self, now: Instant) -> bool {
        self.pending && self.ready(now)
    }

    /// A rebuild just finished.
    fn rebuilt(&mut self, now: Instant) {
        self.last_rebuild = Some(now);
        self.pending = false;
    }
}
