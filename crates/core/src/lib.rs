//! Provides the foundation shared by the `fnwrap` callable wrappers.
//!
//! This crate contains the canonical [`Signature`] a wrapper type is instantiated with, the
//! traits used to decide whether a callable can be invoked using a given signature, and the
//! error raised when a wrapper without a target is invoked.
//!
//! The `fnwrap-*` crates each provide one wrapper type built on top of these.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(unreachable_pub)]
#![forbid(unsafe_code)]
#![deny(clippy::cast_possible_truncation)]
#![deny(clippy::exhaustive_enums)]
#![deny(clippy::exhaustive_structs)]
#![deny(clippy::std_instead_of_core)]

#[cfg(feature = "std")]
extern crate std;

/// Invokes the given macro once for every supported number of parameters.
///
/// The macro is passed the parameter list, where each parameter is an argument name followed by
/// its type parameter, and then the number of parameters.
#[macro_export]
#[doc(hidden)]
macro_rules! with_parameters {
    ($macro:ident) => {
        $macro!((); 0);
        $macro!((a0: A0); 1);
        $macro!((a0: A0, a1: A1); 2);
        $macro!((a0: A0, a1: A1, a2: A2); 3);
        $macro!((a0: A0, a1: A1, a2: A2, a3: A3); 4);
        $macro!((a0: A0, a1: A1, a2: A2, a3: A3, a4: A4); 5);
        $macro!((a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5); 6);
        $macro!((a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6); 7);
        $macro!((a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7); 8);
    };
}

mod error;
mod invoke;
mod signature;

pub mod unwind;

pub use error::BadFunctionCall;
pub use invoke::{Invoke, InvokeMut, InvokeMutOn, InvokeOn};
pub use signature::{Const, NoExcept, Signature};

/// Marker value used to construct or compare against a wrapper without a target, much like a
/// null pointer.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[allow(clippy::exhaustive_structs)]
pub struct Null;
