// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handler composition with stable identities.
//!
//! [`HandlerComposer::compose`] chains a primitive's handler with a
//! consumer's handler. The first handler to run can cancel the second by
//! calling [`Event::prevent_default`].
//!
//! Composing the same pair twice yields the same [`Handler`], so a host that
//! diffs property bags by reference does not see a new callback on every
//! render pass. The cache is a two-level association (primitive identity,
//! then consumer identity) that only holds weak references: the composed
//! handler owns both inputs, and a cache entry lives exactly as long as some
//! owner still holds the composed handler.
//!
//! ```
//! use understory_props::{Event, Handler, HandlerComposer};
//!
//! let composer = HandlerComposer::new();
//! let primitive = Handler::new(|_| {});
//! let consumer = Handler::new(|_| {});
//!
//! let a = composer.compose(Some(&primitive), Some(&consumer)).unwrap();
//! let b = composer.compose(Some(&primitive), Some(&consumer)).unwrap();
//! assert!(Handler::ptr_eq(&a, &b));
//!
//! // A single handler is returned as-is.
//! let only = composer.compose(Some(&primitive), None).unwrap();
//! assert!(Handler::ptr_eq(&only, &primitive));
//! ```

use alloc::rc::Weak;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;

use crate::event::{Event, Handler, HandlerFn};

/// Which handler of a composed pair runs first.
///
/// The first handler can cancel the second with [`Event::prevent_default`];
/// the second can never cancel the first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ComposeOrder {
    /// Primitive runs first; it may cancel the consumer. This is the default
    /// so that caller code cannot suppress the primitive's state changes.
    #[default]
    PrimitiveFirst,
    /// Consumer runs first; it may cancel the primitive.
    ConsumerFirst,
}

struct PairEntry {
    composed: Weak<HandlerFn>,
}

struct PrimitiveEntry {
    primitive: Weak<HandlerFn>,
    consumers: HashMap<usize, PairEntry>,
}

/// Composes handler pairs and caches the result per pair.
///
/// Single-threaded; one composer is shared by every merge on a UI thread.
pub struct HandlerComposer {
    order: ComposeOrder,
    cache: RefCell<HashMap<usize, PrimitiveEntry>>,
}

impl HandlerComposer {
    /// Composer with [`ComposeOrder::PrimitiveFirst`].
    pub fn new() -> Self {
        Self::with_order(ComposeOrder::default())
    }

    /// Composer with an explicit order.
    pub fn with_order(order: ComposeOrder) -> Self {
        Self {
            order,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// The order this composer applies.
    pub fn order(&self) -> ComposeOrder {
        self.order
    }

    /// Combine an optional primitive handler with an optional consumer handler.
    ///
    /// - Neither present: `None`.
    /// - Exactly one present: that handler, unchanged.
    /// - Both present: the cached composed handler for this exact pair.
    pub fn compose(
        &self,
        primitive: Option<&Handler>,
        consumer: Option<&Handler>,
    ) -> Option<Handler> {
        match (primitive, consumer) {
            (None, None) => None,
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (Some(primitive), Some(consumer)) => Some(self.compose_pair(primitive, consumer)),
        }
    }

    fn compose_pair(&self, primitive: &Handler, consumer: &Handler) -> Handler {
        let mut cache = self.cache.borrow_mut();

        // A live composed handler keeps both inputs alive, so their addresses
        // cannot have been reused by other handlers.
        let hit = cache
            .get(&primitive.addr())
            .and_then(|entry| entry.consumers.get(&consumer.addr()))
            .and_then(|pair| Handler::upgrade(&pair.composed));
        if let Some(composed) = hit {
            return composed;
        }

        sweep(&mut cache);

        let composed = match self.order {
            ComposeOrder::PrimitiveFirst => chain(primitive.clone(), consumer.clone()),
            ComposeOrder::ConsumerFirst => chain(consumer.clone(), primitive.clone()),
        };
        cache
            .entry(primitive.addr())
            .or_insert_with(|| PrimitiveEntry {
                primitive: primitive.downgrade(),
                consumers: HashMap::new(),
            })
            .consumers
            .insert(
                consumer.addr(),
                PairEntry {
                    composed: composed.downgrade(),
                },
            );
        composed
    }

    /// Number of cached pairs whose composed handler is still referenced.
    pub fn live_pairs(&self) -> usize {
        self.cache
            .borrow()
            .values()
            .flat_map(|entry| entry.consumers.values())
            .filter(|pair| pair.composed.strong_count() > 0)
            .count()
    }
}

impl Default for HandlerComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandlerComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerComposer")
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

/// Drop entries whose composed handler, or whose primitive, is gone.
fn sweep(cache: &mut HashMap<usize, PrimitiveEntry>) {
    cache.retain(|_, entry| {
        if entry.primitive.strong_count() == 0 {
            return false;
        }
        entry
            .consumers
            .retain(|_, pair| pair.composed.strong_count() > 0);
        !entry.consumers.is_empty()
    });
}

fn chain(first: Handler, second: Handler) -> Handler {
    Handler::new(move |event: &mut Event| {
        first.call(event);
        if !event.is_default_prevented() {
            second.call(event);
        }
    })
}
