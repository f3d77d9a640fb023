// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Shared context for the `DNSZone` controller.
//!
//! The controller hands an `Arc<Context>` to every reconcile pass. It holds
//! the two collaborators a pass talks to:
//! - the resource store, for reading the resource and writing finalizers and status
//! - the zone manager, for every DNS provider call

use crate::reconcilers::store::ZoneStore;
use crate::route53::ZoneManager;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Shared context passed to the controller.
#[derive(Clone)]
pub struct Context {
    /// Declared resource store
    pub store: Arc<dyn ZoneStore>,

    /// Hosted zone operations against the configured provider
    pub zones: ZoneManager,

    /// Upper bound on one reconcile pass
    pub reconcile_timeout: Duration,
}

impl Context {
    #[must_use]
    pub fn new(store: Arc<dyn ZoneStore>, zones: ZoneManager, reconcile_timeout: Duration) -> Self {
        Self {
            store,
            zones,
            reconcile_timeout,
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("zones", &self.zones)
            .field("reconcile_timeout", &self.reconcile_timeout)
            .finish_non_exhaustive()
    }
}
