//! Remote data lifecycle
//!
//! `begin` → request → `finish`. Each load is stamped with a [`Ticket`];
//! a result carrying an outdated ticket is dropped, so a reload or a
//! discarded view never applies a stale response.

use crate::service::ClientError;

/// Identifies one load; only the latest is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// What a view should render for a remote value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState<'a, T> {
    /// Nothing requested yet
    Idle,
    Loading,
    /// An error with no usable data
    Failed(&'a str),
    Ready(&'a T),
}

/// A value fetched from the events API
#[derive(Debug, Clone)]
pub struct Loadable<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
    latest: u64,
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            latest: 0,
        }
    }
}

impl<T> Loadable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a load as started
    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        self.loading = true;
        Ticket(self.latest)
    }

    /// Apply a load result. Returns false when `ticket` is stale.
    pub fn finish(&mut self, ticket: Ticket, result: Result<T, ClientError>) -> bool {
        if ticket.0 != self.latest {
            tracing::debug!(ticket = ticket.0, latest = self.latest, "Dropping stale response");
            return false;
        }

        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.user_message());
            }
        }
        self.loading = false;
        true
    }

    /// Invalidate any outstanding load
    pub fn abandon(&mut self) {
        self.latest += 1;
        self.loading = false;
    }

    pub fn state(&self) -> LoadState<'_, T> {
        if self.loading {
            return LoadState::Loading;
        }
        match (&self.data, &self.error) {
            (None, Some(error)) => LoadState::Failed(error),
            (Some(data), _) => LoadState::Ready(data),
            (None, None) => LoadState::Idle,
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }

    /// Replace the data outside of a load (e.g. from an action response)
    pub fn replace(&mut self, data: T) {
        self.data = Some(data);
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
