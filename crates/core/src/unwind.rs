//! Support for signatures that promise never to unwind.
//!
//! Invoking a wrapper whose signature is [`NoExcept`] runs the target inside
//! [`abort_on_unwind()`], so a panic escaping the target terminates the process instead of
//! propagating to the caller.
//!
//! [`NoExcept`]: crate::NoExcept

/// Calls `f`, aborting the process if it panics.
#[inline]
pub fn abort_on_unwind<T, F: FnOnce() -> T>(f: F) -> T {
    let guard = AbortOnDrop;
    let result = f();
    core::mem::forget(guard);
    result
}

/// Only dropped when unwinding out of [`abort_on_unwind()`].
struct AbortOnDrop;

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        unwound_out_of_no_unwind_call()
    }
}

#[cold]
#[inline(never)]
fn unwound_out_of_no_unwind_call() -> ! {
    #[cfg(feature = "std")]
    std::process::abort();

    // Panicking while already unwinding aborts.
    #[cfg(not(feature = "std"))]
    panic!("target of a no-unwind call panicked");
}
