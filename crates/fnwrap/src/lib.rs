//! Provides callable wrappers parameterized by a call [`Signature`].
//!
//! - [`FunctionRef`] is a non-owning reference to a callable. It never allocates, and is only as
//!   large as two pointers.
//! - [`Function`] owns its callable, which is cloned whenever the [`Function`] is. Small
//!   callables are stored inline, while larger ones are moved into a heap allocation.
//!
//! Both wrappers erase the type of the callable they are created from, so wrappers with the same
//! signature have the same type regardless of what they call.
//!
//! # Signatures
//!
//! Signatures are written as function pointer types, such as `fn(i32, i32) -> i32`. The
//! [`Const`] and [`NoExcept`] qualifiers adjust how the callable is accessed and whether it may
//! panic. See the [`Signature`] trait for more information.
//!
//! # Related Crates
//!
//! The implementation for [`fnwrap`](crate) is split into multiple component crates, which are:
//! - [`fnwrap_core`], which contains the [`Signature`] trait, the traits used to check that a
//!   callable can be invoked using a signature, and the [`BadFunctionCall`] error. Its items are
//!   re-exported in the crate root.
//! - [`fnwrap_function_ref`], which provides [`FunctionRef`]. It is enabled by the
//!   [`function-ref`](crate#function-ref) feature flag, and is re-exported as the
//!   [`function_ref`] module.
//! - [`fnwrap_function`], which provides [`Function`]. It is enabled by the
//!   [`function`](crate#function) feature flag, and is re-exported as the [`function`] module.
//!
//! # Feature Flags
//!
//! By default, the [`std`](crate#std), [`function-ref`](crate#function-ref), and
//! [`function`](crate#function) flags are enabled.
//!
//! ## [`std`]
//!
//! Enables a dependency on the [Rust standard library](std). When enabled, calling a
//! [`Function`] without a target panics with a [`BadFunctionCall`] payload that can be recovered
//! with [`std::panic::catch_unwind()`], and a panic escaping a [`NoExcept`] call aborts the
//! process with [`std::process::abort()`].
//!
//! - Enables: [`alloc`](crate#alloc).
//! - Enabled by: [`default`](crate#feature-flags)
//!
//! ## [`alloc`]
//!
//! Enables a dependency on the [Rust core allocation library](alloc). Without it, a [`Function`]
//! can only own callables that fit inline, and attempting to store a larger one is a
//! compile-time error.
//!
//! - Enabled by: [`std`](crate#std), [`default`](crate#feature-flags)
//!
//! ## `function-ref`
//!
//! Provides [`FunctionRef`], enabling the [`function_ref`] module. Adds a dependency on the
//! [`fnwrap_function_ref`] crate.
//!
//! - Enabled by: [`default`](crate#feature-flags)
//!
//! ## `function`
//!
//! Provides [`Function`], enabling the [`function`] module. Adds a dependency on the
//! [`fnwrap_function`] crate.
//!
//! - Enabled by: [`default`](crate#feature-flags)
//!
//! [`fnwrap_function_ref`]: rt_function_ref
//! [`fnwrap_function`]: rt_function

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)] // Unsafe code present in dependencies
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(unreachable_pub)]
#![deny(clippy::alloc_instead_of_core)]
#![deny(clippy::std_instead_of_alloc)]
#![deny(clippy::cast_possible_truncation)]
#![deny(clippy::exhaustive_enums)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

pub use fnwrap_core::{
    unwind, BadFunctionCall, Const, Invoke, InvokeMut, InvokeMutOn, InvokeOn, NoExcept, Null,
    Signature,
};

#[cfg(feature = "function-ref")]
pub use rt_function_ref as function_ref;

#[cfg(feature = "function-ref")]
pub use rt_function_ref::FunctionRef;

#[cfg(feature = "function")]
pub use rt_function as function;

#[cfg(feature = "function")]
pub use rt_function::{Function, TargetKind};
