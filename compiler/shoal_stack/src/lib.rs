//! Stack safety for deep recursion.
//!
//! The lowerer's rewrite pass and the evaluator's expression walk both
//! recurse over user-shaped trees, so their depth is input-controlled. Wrap
//! each recursive step in [`ensure_sufficient_stack`] and the host stack
//! grows on demand instead of overflowing.
//!
//! User-level recursion (function calls calling functions) is bounded
//! separately by the evaluator's call-depth ceiling; this module only
//! protects against deeply *nested* trees within one body.

/// Minimum stack space to keep available before recursing (64 KiB).
const RED_ZONE_BYTES: usize = 64 * 1024;

/// Stack space to allocate when growing (4 MiB).
const GROWTH_BYTES: usize = 4 * 1024 * 1024;

/// Run `f`, growing the stack first when less than the red zone remains.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE_BYTES, GROWTH_BYTES, f)
}
