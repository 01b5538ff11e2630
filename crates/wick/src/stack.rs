//! Stack growth for the recursive passes
//!
//! Parsing, lowering and evaluation all recurse once per nesting level. On
//! native targets each recursive entry point runs through
//! [`ensure_sufficient_stack`], which moves onto a freshly allocated segment
//! when the current one is nearly exhausted.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 256 * 1024;

/// Size of each newly allocated segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if the red zone has been reached.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
