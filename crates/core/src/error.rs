/// Error type used when a callable wrapper that has no target is invoked.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[allow(clippy::exhaustive_structs)]
pub struct BadFunctionCall;

impl BadFunctionCall {
    /// Panics with this error.
    ///
    /// When the `std` feature is enabled, the panic payload is the [`BadFunctionCall`] itself, so
    /// it can be recovered by downcasting the result of [`std::panic::catch_unwind()`].
    /// Otherwise, the panic message is the [`Display`] representation of the error.
    ///
    /// [`Display`]: core::fmt::Display
    #[cold]
    #[inline(never)]
    #[track_caller]
    pub fn raise(self) -> ! {
        #[cfg(feature = "std")]
        std::panic::panic_any(self);

        #[cfg(not(feature = "std"))]
        panic!("{self}");
    }
}

impl core::fmt::Display for BadFunctionCall {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("bad function call: the wrapper has no target")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BadFunctionCall {}
