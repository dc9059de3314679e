//! Stack growth for the recursive passes.
//!
//! Parenthesised nesting is bounded by the parser's depth limit, but a long
//! left-deep chain such as `1 + 1 + ... + 1` builds a tree as deep as it is
//! long without any nesting. Every recursive walk goes through
//! [`ensure_sufficient_stack`] so such trees cannot overflow the native stack.

/// Grow the stack when less than this remains.
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
