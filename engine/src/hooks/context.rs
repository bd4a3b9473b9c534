//! Per-thread "inside a player marker query" flag
//!
//! Engine-internal code reached from a marker-list query cannot be handed
//! extra parameters, so the flag travels through a thread-local depth
//! counter. A [`PlayerContextGuard`] raises it on entry and lowers it when
//! dropped, which also happens while unwinding. Nested scopes stack; other
//! threads never see the flag.

use std::cell::Cell;
use std::marker::PhantomData;

thread_local! {
    static PLAYER_CONTEXT_DEPTH: Cell<u32> = const { Cell::new(0) };
}

/// Access point for the thread-local player context flag
pub struct PlayerContext;

impl PlayerContext {
    /// Enter a player context scope on the current thread
    pub fn enter() -> PlayerContextGuard {
        PLAYER_CONTEXT_DEPTH.with(|depth| depth.set(depth.get().saturating_add(1)));
        PlayerContextGuard {
            _not_send: PhantomData,
        }
    }

    /// Whether the current thread is inside a player context scope
    pub fn is_active() -> bool {
        Self::depth() > 0
    }

    /// Number of nested scopes currently open on this thread
    pub fn depth() -> u32 {
        PLAYER_CONTEXT_DEPTH.with(Cell::get)
    }
}

/// Scope guard returned by [`PlayerContext::enter`]
///
/// Not `Send`: it must be dropped on the thread that created it.
#[must_use = "the player context ends as soon as the guard is dropped"]
pub struct PlayerContextGuard {
    _not_send: PhantomData<*const ()>,
}

impl Drop for PlayerContextGuard {
    fn drop(&mut self) {
        PLAYER_CONTEXT_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}
