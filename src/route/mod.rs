//! Navigable address.
//!
//! The `Router` holds the current location and its back/forward history.
//! Query parameters bound with [`RouteQuery`] read from and write to it, and
//! every change is published on a `watch` channel.

mod error;
mod query;

pub use error::RouteError;
pub use query::{coerce_page, QueryWatch, RouteQuery};

use log::*;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use url::Url;

struct History {
    entries: Vec<Url>,
    index: usize,
}

/// Shared handle to the current location.
///
#[derive(Clone)]
pub struct Router {
    history: Arc<Mutex<History>>,
    current: Arc<watch::Sender<Url>>,
}

impl Router {
    /// Return a router whose history holds only the given location.
    ///
    pub fn new(location: Url) -> Self {
        let (current, _) = watch::channel(location.clone());
        Router {
            history: Arc::new(Mutex::new(History {
                entries: vec![location],
                index: 0,
            })),
            current: Arc::new(current),
        }
    }

    /// Parse an absolute location and return a router starting there.
    ///
    pub fn parse(location: &str) -> Result<Self, RouteError> {
        let url = Url::parse(location).map_err(|source| RouteError::InvalidLocation {
            location: location.to_owned(),
            source,
        })?;
        Ok(Router::new(url))
    }

    /// Return the current location.
    ///
    pub fn current(&self) -> Url {
        self.current.borrow().clone()
    }

    /// Return the first value of the query parameter in the current location.
    ///
    pub fn query(&self, key: &str) -> Option<String> {
        query::query_value(&self.current.borrow(), key)
    }

    /// Observe location changes.
    ///
    pub fn subscribe(&self) -> watch::Receiver<Url> {
        self.current.subscribe()
    }

    /// Navigate to a location resolved against the current one, adding a
    /// history entry and dropping any forward entries.
    ///
    pub fn navigate(&self, location: &str) -> Result<(), RouteError> {
        let url = self
            .current()
            .join(location)
            .map_err(|source| RouteError::InvalidLocation {
                location: location.to_owned(),
                source,
            })?;
        self.push(url);
        Ok(())
    }

    /// Add a history entry for the location and make it current.
    ///
    pub fn push(&self, location: Url) {
        let mut history = self.lock();
        let next = history.index + 1;
        history.entries.truncate(next);
        history.entries.push(location.clone());
        history.index = next;
        debug!("Navigated to {}", location);
        self.publish(location);
    }

    /// Set one query parameter on the current location, in place.
    ///
    pub fn replace_query(&self, key: &str, value: &str) {
        let mut history = self.lock();
        let index = history.index;
        let location = query::with_query_value(&history.entries[index], key, value);
        if history.entries[index] == location {
            return;
        }
        history.entries[index] = location.clone();
        self.publish(location);
    }

    /// Move one entry back. Returns false if already at the first entry.
    ///
    pub fn back(&self) -> bool {
        let mut history = self.lock();
        if history.index == 0 {
            return false;
        }
        history.index -= 1;
        let location = history.entries[history.index].clone();
        debug!("Navigated back to {}", location);
        self.publish(location);
        true
    }

    /// Move one entry forward. Returns false if already at the last entry.
    ///
    pub fn forward(&self) -> bool {
        let mut history = self.lock();
        if history.index + 1 >= history.entries.len() {
            return false;
        }
        history.index += 1;
        let location = history.entries[history.index].clone();
        debug!("Navigated forward to {}", location);
        self.publish(location);
        true
    }

    fn lock(&self) -> MutexGuard<'_, History> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Callers hold the history lock so publication order matches history order.
    fn publish(&self, location: Url) {
        self.current.send_replace(location);
    }
}
