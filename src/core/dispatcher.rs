//! Background route requests with latest-wins delivery.
//!
//! Each [`RouteDispatcher::request`] runs on its own tokio task and aborts the
//! one before it. A task that finishes after being superseded drops its
//! result instead of sending it. Updates that were already queued when a
//! newer request started are dropped again on the receiving side by
//! [`RouteUpdates::recv`], so the consumer only ever sees the newest
//! generation.

use crate::core::route_service::RouteService;
use crate::core::{ConfigProvider, Coordinate, Fetcher, FlattenedPath, MapSurface};
use crate::utils::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

const CHANNEL_CAPACITY: usize = 8;

#[derive(Debug)]
pub struct RouteUpdate {
    pub generation: u64,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub result: Result<FlattenedPath>,
}

pub struct RouteDispatcher<F: Fetcher + 'static, C: ConfigProvider + 'static> {
    service: Arc<RouteService<F, C>>,
    generation: Arc<AtomicU64>,
    in_flight: Mutex<Option<AbortHandle>>,
    updates: mpsc::Sender<RouteUpdate>,
}

impl<F: Fetcher + 'static, C: ConfigProvider + 'static> RouteDispatcher<F, C> {
    pub fn new(service: RouteService<F, C>) -> (Self, RouteUpdates) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let generation = Arc::new(AtomicU64::new(0));
        let dispatcher = Self {
            service: Arc::new(service),
            generation: Arc::clone(&generation),
            in_flight: Mutex::new(None),
            updates: tx,
        };
        let updates = RouteUpdates {
            receiver: rx,
            latest: generation,
        };
        (dispatcher, updates)
    }

    /// Starts a request, superseding any outstanding one. Must be called
    /// from within a tokio runtime.
    pub fn request(&self, origin: Coordinate, destination: Coordinate) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let service = Arc::clone(&self.service);
        let latest = Arc::clone(&self.generation);
        let updates = self.updates.clone();

        let task = tokio::spawn(async move {
            let result = service.fetch_route(origin, destination).await;

            if latest.load(Ordering::SeqCst) != generation {
                tracing::debug!("Dropping result of superseded request #{}", generation);
                return;
            }

            let update = RouteUpdate {
                generation,
                origin,
                destination,
                result,
            };
            if updates.send(update).await.is_err() {
                tracing::debug!("Route consumer is gone, dropping request #{}", generation);
            }
        });

        let previous = self
            .lock_in_flight()
            .replace(task.abort_handle());
        if let Some(previous) = previous {
            if !previous.is_finished() {
                tracing::debug!("Request #{} supersedes an in-flight request", generation);
            }
            previous.abort();
        }

        generation
    }

    /// Aborts the outstanding request, if any, without starting a new one.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(previous) = self.lock_in_flight().take() {
            previous.abort();
        }
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn lock_in_flight(&self) -> std::sync::MutexGuard<'_, Option<AbortHandle>> {
        // The guarded value is a plain handle, so a poisoned lock is still usable.
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Receiving end of a [`RouteDispatcher`].
pub struct RouteUpdates {
    receiver: mpsc::Receiver<RouteUpdate>,
    latest: Arc<AtomicU64>,
}

impl RouteUpdates {
    /// Next update of the newest request. Updates queued before a later
    /// `request` or `cancel` are discarded. `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<RouteUpdate> {
        while let Some(update) = self.receiver.recv().await {
            if self.is_current(&update) {
                return Some(update);
            }
            tracing::debug!(
                "Discarding queued result of superseded request #{}",
                update.generation
            );
        }
        None
    }

    pub fn is_current(&self, update: &RouteUpdate) -> bool {
        update.generation >= self.latest.load(Ordering::SeqCst)
    }
}

/// Consumer loop: applies every current update to the surface until all
/// senders are gone. Returns the number of routes drawn.
pub async fn render_updates<S: MapSurface>(mut updates: RouteUpdates, surface: &mut S) -> usize {
    let mut drawn = 0;
    while let Some(update) = updates.recv().await {
        if apply_update(update, surface) {
            drawn += 1;
        }
    }
    drawn
}

/// Applies a single update and reports whether anything was drawn.
/// Failures leave the previous drawing untouched.
pub fn apply_update<S: MapSurface>(update: RouteUpdate, surface: &mut S) -> bool {
    match update.result {
        Ok(path) => {
            tracing::debug!(
                "Rendering request #{} with {} points",
                update.generation,
                path.points.len()
            );
            surface.draw_route(&path);
            surface.set_distance_label(&path.distance_label);
            true
        }
        Err(e) => {
            tracing::warn!(
                "Request #{} from {} to {} produced no route: {}",
                update.generation,
                update.origin,
                update.destination,
                e
            );
            surface.route_unavailable(&e);
            false
        }
    }
}
