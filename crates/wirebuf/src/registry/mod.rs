// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Concurrent handler registry and resolution algorithm.
//!
//! The registry ensures handler discovery happens only once per type. A
//! `DashMap` caches bound decode procedures; a second `DashMap` memoizes types
//! that have no dedicated handler and must go through structural decoding,
//! together with the verdict of the structural precondition check, so that
//! check runs once per type. Both are append-only and use atomic insert-if-absent, so concurrent first use of
//! a type from several threads binds exactly one handler and every racer
//! reuses it.
//!
//! Resolution order for a requested type:
//!
//! 1. cached handler
//! 2. structural memo
//! 3. discovery: custom handler, then built-in handler, else memo + structural

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::cursor::Cursor;
use crate::decode::{Decode, HandlerSource};
use crate::error::{Error, Result};
use crate::structural;

pub mod naming;

/// Bound decode procedure for `T`.
pub type DecodeFn<T> = for<'c, 'a> fn(&'c mut Cursor<'a>) -> Result<T>;

/// Registry hit/miss statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LookupStats {
    /// Resolutions served from the handler cache or the structural memo.
    pub hits: u64,
    /// Resolutions that had to run discovery.
    pub misses: u64,
    /// Handlers bound into the cache.
    pub binds: u64,
    /// Structural fallback entries.
    pub structural: u64,
}

/// A resolved, cached decode procedure.
pub struct Handler {
    type_name: Cow<'static, str>,
    source: HandlerSource,
    procedure: Box<dyn Any + Send + Sync>,
}

impl Handler {
    fn bind<T: Decode>() -> Self {
        let procedure: DecodeFn<T> = T::decode;
        Self {
            type_name: T::type_name(),
            source: T::SOURCE,
            procedure: Box::new(procedure),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn source(&self) -> HandlerSource {
        self.source
    }

    fn procedure<T: Decode>(&self) -> Result<DecodeFn<T>> {
        self.procedure
            .downcast_ref::<DecodeFn<T>>()
            .copied()
            .ok_or_else(|| Error::HandlerMismatch {
                type_name: T::type_name(),
            })
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler")
            .field("type_name", &self.type_name)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Outcome of resolving a type.
pub(crate) enum Resolved<T> {
    Procedure(DecodeFn<T>),
    Structural,
}

/// Type-identity keyed handler cache plus structural memo.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: DashMap<TypeId, Arc<Handler>>,
    structural: DashMap<TypeId, Result<()>>,
    hits: AtomicU64,
    misses: AtomicU64,
    binds: AtomicU64,
    structural_runs: AtomicU64,
}

static GLOBAL: OnceLock<HandlerRegistry> = OnceLock::new();

impl HandlerRegistry {
    /// Empty, isolated registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry shared by every cursor built with `Cursor::new`.
    pub fn global() -> &'static HandlerRegistry {
        GLOBAL.get_or_init(HandlerRegistry::new)
    }

    pub(crate) fn resolve<T: Decode>(&self) -> Result<Resolved<T>> {
        let id = TypeId::of::<T>();

        if let Some(handler) = self.handlers.get(&id) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return handler.procedure::<T>().map(Resolved::Procedure);
        }

        if let Some(verdict) = self.structural.get(&id) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            self.structural_runs.fetch_add(1, Ordering::Relaxed);
            return verdict.clone().map(|()| Resolved::Structural);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        self.discover::<T>(id)
    }

    fn discover<T: Decode>(&self, id: TypeId) -> Result<Resolved<T>> {
        match T::SOURCE {
            HandlerSource::Custom | HandlerSource::Builtin => {
                let handler = Arc::clone(
                    self.handlers
                        .entry(id)
                        .or_insert_with(|| {
                            self.binds.fetch_add(1, Ordering::Relaxed);
                            let handler = Handler::bind::<T>();
                            log::debug!(
                                "[registry] bound {:?} handler for {}",
                                handler.source,
                                handler.type_name
                            );
                            Arc::new(handler)
                        })
                        .value(),
                );
                handler.procedure::<T>().map(Resolved::Procedure)
            }
            HandlerSource::Structural => {
                let verdict = self
                    .structural
                    .entry(id)
                    .or_insert_with(|| {
                        let verdict = structural::check_preconditions::<T>();
                        match &verdict {
                            Ok(()) => log::debug!(
                                "[registry] no handler for {}, using structural decoding",
                                T::type_name()
                            ),
                            Err(err) => log::warn!("[registry] {}", err),
                        }
                        verdict
                    })
                    .value()
                    .clone();
                self.structural_runs.fetch_add(1, Ordering::Relaxed);
                verdict.map(|()| Resolved::Structural)
            }
        }
    }

    /// True if a handler for `T` is cached.
    pub fn is_cached<T: Decode>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<T>())
    }

    /// True if `T` is memoized as needing structural decoding.
    pub fn is_structural<T: Decode>(&self) -> bool {
        self.structural.contains_key(&TypeId::of::<T>())
    }

    /// Cached handler for `T`, if resolved.
    pub fn handler<T: Decode>(&self) -> Option<Arc<Handler>> {
        self.handlers
            .get(&TypeId::of::<T>())
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Rendered type name of the cached handler for `T`, if resolved.
    pub fn handler_name<T: Decode>(&self) -> Option<String> {
        self.handlers
            .get(&TypeId::of::<T>())
            .map(|entry| entry.type_name().to_string())
    }

    /// Number of cached handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty() && self.structural.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> LookupStats {
        LookupStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            binds: self.binds.load(Ordering::Relaxed),
            structural: self.structural_runs.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.handlers.len())
            .field("structural", &self.structural.len())
            .field("stats", &self.stats())
            .finish()
    }
}
