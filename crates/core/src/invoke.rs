//! Traits deciding whether a callable can be invoked using a [`Signature`].
//!
//! Each trait is implemented for every callable of the matching shape, for every unqualified
//! signature `S` (a function pointer type). A wrapper constructor requiring one of these traits
//! rejects, at compile time, any callable that cannot be invoked with the parameters of `S` to
//! produce its result.

use crate::Signature;

/// A callable that can be invoked through an exclusive reference using the signature `S`.
///
/// Implemented for all [`FnMut`] closures and functions with the parameters and result of `S`.
pub trait InvokeMut<S: Signature> {
    /// Calls `self` with the given parameters.
    fn invoke_mut(&mut self, params: S::Params) -> S::Output;
}

/// A callable that can be invoked through a shared reference using the signature `S`.
///
/// Implemented for all [`Fn`] closures and functions with the parameters and result of `S`.
pub trait Invoke<S: Signature>: InvokeMut<S> {
    /// Calls `self` with the given parameters.
    fn invoke(&self, params: S::Params) -> S::Output;
}

/// A callable that is invoked with an exclusive reference to a receiver `T` prepended to the
/// parameters of `S`.
///
/// Methods taking `&mut self` implement this trait, as do free functions and closures whose
/// first parameter is `&mut T`.
pub trait InvokeMutOn<T: ?Sized, S: Signature> {
    /// Calls `self` with the `receiver` followed by the given parameters.
    fn invoke_mut_on(&self, receiver: &mut T, params: S::Params) -> S::Output;
}

/// A callable that is invoked with a shared reference to a receiver `T` prepended to the
/// parameters of `S`.
pub trait InvokeOn<T: ?Sized, S: Signature> {
    /// Calls `self` with the `receiver` followed by the given parameters.
    fn invoke_on(&self, receiver: &T, params: S::Params) -> S::Output;
}

macro_rules! define_invoke {
    (($($argument:ident: $parameter:ident),*); $number:literal) => {
        impl<F, $($parameter,)* R> InvokeMut<fn($($parameter),*) -> R> for F
        where
            F: FnMut($($parameter),*) -> R + ?Sized,
        {
            #[inline]
            fn invoke_mut(&mut self, ($($argument,)*): ($($parameter,)*)) -> R {
                self($($argument),*)
            }
        }

        impl<F, $($parameter,)* R> Invoke<fn($($parameter),*) -> R> for F
        where
            F: Fn($($parameter),*) -> R + ?Sized,
        {
            #[inline]
            fn invoke(&self, ($($argument,)*): ($($parameter,)*)) -> R {
                self($($argument),*)
            }
        }

        impl<F, T, $($parameter,)* R> InvokeMutOn<T, fn($($parameter),*) -> R> for F
        where
            F: Fn(&mut T $(, $parameter)*) -> R + ?Sized,
            T: ?Sized,
        {
            #[inline]
            fn invoke_mut_on(&self, receiver: &mut T, ($($argument,)*): ($($parameter,)*)) -> R {
                self(receiver $(, $argument)*)
            }
        }

        impl<F, T, $($parameter,)* R> InvokeOn<T, fn($($parameter),*) -> R> for F
        where
            F: Fn(&T $(, $parameter)*) -> R + ?Sized,
            T: ?Sized,
        {
            #[inline]
            fn invoke_on(&self, receiver: &T, ($($argument,)*): ($($parameter,)*)) -> R {
                self(receiver $(, $argument)*)
            }
        }
    };
}

crate::with_parameters!(define_invoke);
