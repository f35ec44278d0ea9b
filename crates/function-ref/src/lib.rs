//! Provides [`FunctionRef`], a non-owning reference to a callable with a fixed [`Signature`].
//!
//! A [`FunctionRef`] is two words wide: a pointer to a *thunk* generated for the exact type of
//! the callable it was created from, and an untyped word that the thunk knows how to interpret.
//! Creating or calling a [`FunctionRef`] never allocates.
//!
//! # Signatures
//!
//! The signature determines how the referenced callable is accessed:
//!
//! - `fn(A..) -> R` and [`NoExcept<fn(A..) -> R>`] refer to [`FnMut`] callables, and are called
//!   through an exclusive reference (`&mut self`). Like `&mut F`, these references can only be
//!   moved, not copied.
//! - [`Const<fn(A..) -> R>`] and [`Const<NoExcept<fn(A..) -> R>>`] refer to [`Fn`] callables,
//!   and are called through a shared reference (`&self`). These references are [`Copy`].
//!
//! Calls through a [`NoExcept`] signature abort the process if the callable panics.
//!
//! # Providers
//!
//! | Provider | Constructor |
//! |----------|-------------|
//! | Function pointer | [`from_fn()`], [`From<fn(A..) -> R>`] |
//! | Reference to a callable | `new()`, [`From<&mut F>`] or [`From<&F>`] |
//! | Shared reference to an [`Fn`] callable, for any signature | `from_ref()`, [`From<&F>`] |
//! | Zero-sized callable, such as a function item | `from_constant()` |
//! | Zero-sized callable taking a receiver as its first parameter | `from_bound()` |
//! | Same as above, with a raw pointer to the receiver | `from_bound_ptr()` |
//!
//! Methods are ordinary functions taking the receiver first, so `from_bound(Type::method, &mut
//! value)` refers to a method call on `value`.
//!
//! [`from_fn()`]: FunctionRef::from_fn()
//! [`From<fn(A..) -> R>`]: From
//! [`From<&mut F>`]: From
//! [`From<&F>`]: From
//! [`NoExcept<fn(A..) -> R>`]: NoExcept
//! [`Const<fn(A..) -> R>`]: Const
//! [`Const<NoExcept<fn(A..) -> R>>`]: Const

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(unreachable_pub)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::cast_possible_truncation)]
#![deny(clippy::exhaustive_enums)]
#![deny(clippy::missing_safety_doc)]
#![deny(clippy::alloc_instead_of_core)]
#![deny(clippy::std_instead_of_core)]

mod capability;
mod thunk;

use capability::Capability;
use fnwrap_core::{Const, NoExcept, Signature};
use thunk::{Thunk, ZeroSized};

/// A non-owning reference to a callable that can be invoked using the signature `S`.
///
/// The lifetime `'a` bounds the referenced callable or receiver, if any. See the [crate-level
/// documentation](crate) for the supported signatures and constructors.
///
/// # Compile-time checks
///
/// The callable must accept the parameters and produce the result of the signature:
///
/// ```compile_fail
/// use fnwrap_function_ref::FunctionRef;
///
/// let mut length = |s: &str| s.len();
/// let f = FunctionRef::<fn(u32) -> u32>::new(&mut length);
/// ```
///
/// Nothing is referenced by `from_constant()` and `from_bound()`, so the callables they accept
/// can't capture any state:
///
/// ```compile_fail
/// use fnwrap_function_ref::FunctionRef;
///
/// let offset = 1u32;
/// let f = FunctionRef::<fn(u32) -> u32>::from_constant(move |x| x + offset);
/// ```
///
/// ```compile_fail
/// use fnwrap_function_ref::FunctionRef;
///
/// let mut total = 0u32;
/// let step = 2u32;
/// let mut f = FunctionRef::<fn() -> u32>::from_bound(
///     move |total: &mut u32| {
///         *total += step;
///         *total
///     },
///     &mut total,
/// );
/// f.call();
/// ```
pub struct FunctionRef<'a, S: Signature> {
    thunk: Thunk<S>,
    capability: Capability,
    _marker: core::marker::PhantomData<(&'a (), fn() -> S)>,
}

impl<S: Signature> FunctionRef<'_, S> {
    /// # Safety
    ///
    /// Calling the `thunk` with the `capability` must be safe for the lifetime `'a`.
    #[inline]
    const unsafe fn from_raw_parts(thunk: Thunk<S>, capability: Capability) -> Self {
        Self {
            thunk,
            capability,
            _marker: core::marker::PhantomData,
        }
    }

    /// # Safety
    ///
    /// If `S` is not [`Const`], then the caller must have exclusive access to `self`.
    #[inline]
    unsafe fn invoke(&self, params: S::Params) -> S::Output {
        let thunk = self.thunk;
        let capability = self.capability;

        if S::IS_NOEXCEPT {
            fnwrap_core::unwind::abort_on_unwind(move || {
                // SAFETY: thunk and capability were created together.
                unsafe { thunk(capability, params) }
            })
        } else {
            // SAFETY: thunk and capability were created together.
            unsafe { thunk(capability, params) }
        }
    }
}

impl<S: Signature> core::fmt::Debug for FunctionRef<'_, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FunctionRef")
            .field("signature", &core::any::type_name::<S>())
            .field("thunk", &(self.thunk as *const ()))
            .finish()
    }
}

/// Constructors and call operator shared by all signatures.
macro_rules! common {
    ($signature:ty; ($($argument:ident: $parameter:ident),*)) => {
        /// Creates a reference to a function pointer.
        pub fn from_fn(function: fn($($parameter),*) -> R) -> Self {
            // SAFETY: the thunk casts back to the same function pointer type.
            unsafe {
                Self::from_raw_parts(
                    thunk::function::<fn($($parameter),*) -> R>,
                    Capability::from_fn(function),
                )
            }
        }

        /// Creates a reference to a zero-sized callable, such as a function item or a closure
        /// that captures nothing.
        ///
        /// Since the value of `F` is determined by its type alone, nothing is referenced and the
        /// returned [`FunctionRef`] can outlive `constant`.
        ///
        /// Using a callable with a non-zero size results in a compile-time error.
        pub fn from_constant<F>(constant: F) -> Self
        where
            F: Fn($($parameter),*) -> R + Copy + 'a,
        {
            let () = ZeroSized::<F>::ASSERT;
            let _ = constant;

            // SAFETY: an instance of `F` was provided.
            unsafe {
                Self::from_raw_parts(
                    thunk::constant::<F, fn($($parameter),*) -> R>,
                    Capability::UNUSED,
                )
            }
        }
    };
}

macro_rules! mutable {
    ($signature:ty; ($($argument:ident: $parameter:ident),*)) => {
        #[allow(clippy::too_many_arguments)]
        impl<'a, $($parameter,)* R> FunctionRef<'a, $signature> {
            common!($signature; ($($argument: $parameter),*));

            /// Creates a reference to a callable that is invoked through an exclusive
            /// reference.
            pub fn new<F>(object: &'a mut F) -> Self
            where
                F: FnMut($($parameter),*) -> R,
            {
                // SAFETY: `object` is borrowed exclusively for `'a`.
                unsafe {
                    Self::from_raw_parts(
                        thunk::object_mut::<F, fn($($parameter),*) -> R>,
                        Capability::from_mut::<F>(object),
                    )
                }
            }

            /// Creates a reference to a callable that only needs a shared reference to be
            /// invoked.
            pub fn from_ref<F>(object: &'a F) -> Self
            where
                F: Fn($($parameter),*) -> R,
            {
                // SAFETY: `object` is borrowed for `'a`, and only shared references are created.
                unsafe {
                    Self::from_raw_parts(
                        thunk::object::<F, fn($($parameter),*) -> R>,
                        Capability::from_ref::<F>(object),
                    )
                }
            }

            /// Creates a reference that calls the zero-sized `constant` with an exclusive
            /// reference to the `receiver` followed by the call's arguments.
            ///
            /// Using a callable with a non-zero size results in a compile-time error.
            pub fn from_bound<F, T>(constant: F, receiver: &'a mut T) -> Self
            where
                F: Fn(&mut T $(, $parameter)*) -> R + Copy + 'a,
            {
                // SAFETY: `receiver` is borrowed exclusively for `'a`.
                unsafe { Self::from_bound_ptr::<F, T>(constant, receiver) }
            }

            /// Creates a reference that calls the zero-sized `constant` with the dereferenced
            /// `receiver` pointer followed by the call's arguments.
            ///
            /// Using a callable with a non-zero size results in a compile-time error.
            ///
            /// # Safety
            ///
            /// The `receiver` must not be null, and must be valid for reads and writes for the
            /// lifetime `'a`. No other references to the receiver may be used while the
            /// returned [`FunctionRef`] is being called.
            pub unsafe fn from_bound_ptr<F, T>(constant: F, receiver: *mut T) -> Self
            where
                F: Fn(&mut T $(, $parameter)*) -> R + Copy + 'a,
            {
                let () = ZeroSized::<F>::ASSERT;
                let _ = constant;
                debug_assert!(!receiver.is_null(), "receiver must not be null");

                // SAFETY: caller ensures `receiver` is valid.
                // SAFETY: an instance of `F` was provided.
                unsafe {
                    Self::from_raw_parts(
                        thunk::bound_mut::<F, T, fn($($parameter),*) -> R>,
                        Capability::from_mut::<T>(receiver),
                    )
                }
            }

            /// Calls the referenced callable.
            #[inline]
            pub fn call(&mut self $(, $argument: $parameter)*) -> R {
                // SAFETY: `&mut self` ensures exclusive access.
                unsafe { self.invoke(($($argument,)*)) }
            }
        }

        impl<'a, F, $($parameter,)* R> From<&'a mut F> for FunctionRef<'a, $signature>
        where
            F: FnMut($($parameter),*) -> R,
        {
            fn from(object: &'a mut F) -> Self {
                Self::new(object)
            }
        }

        impl<'a, F, $($parameter,)* R> From<&'a F> for FunctionRef<'a, $signature>
        where
            F: Fn($($parameter),*) -> R,
        {
            fn from(object: &'a F) -> Self {
                Self::from_ref(object)
            }
        }

        impl<'a, $($parameter,)* R> From<fn($($parameter),*) -> R> for FunctionRef<'a, $signature> {
            fn from(function: fn($($parameter),*) -> R) -> Self {
                Self::from_fn(function)
            }
        }
    };
}

macro_rules! shared {
    ($signature:ty; ($($argument:ident: $parameter:ident),*)) => {
        #[allow(clippy::too_many_arguments)]
        impl<'a, $($parameter,)* R> FunctionRef<'a, $signature> {
            common!($signature; ($($argument: $parameter),*));

            /// Creates a reference to a callable that is invoked through a shared reference.
            pub fn new<F>(object: &'a F) -> Self
            where
                F: Fn($($parameter),*) -> R,
            {
                // SAFETY: `object` is borrowed for `'a`, and only shared references are created.
                unsafe {
                    Self::from_raw_parts(
                        thunk::object::<F, fn($($parameter),*) -> R>,
                        Capability::from_ref::<F>(object),
                    )
                }
            }

            /// Creates a reference that calls the zero-sized `constant` with a shared reference
            /// to the `receiver` followed by the call's arguments.
            ///
            /// Using a callable with a non-zero size results in a compile-time error.
            pub fn from_bound<F, T>(constant: F, receiver: &'a T) -> Self
            where
                F: Fn(&T $(, $parameter)*) -> R + Copy + 'a,
            {
                // SAFETY: `receiver` is borrowed for `'a`.
                unsafe { Self::from_bound_ptr::<F, T>(constant, receiver) }
            }

            /// Creates a reference that calls the zero-sized `constant` with the dereferenced
            /// `receiver` pointer followed by the call's arguments.
            ///
            /// Using a callable with a non-zero size results in a compile-time error.
            ///
            /// # Safety
            ///
            /// The `receiver` must not be null, and must be valid for reads for the lifetime
            /// `'a`. The receiver must not be mutated while the returned [`FunctionRef`], or any
            /// of its copies, are being called.
            pub unsafe fn from_bound_ptr<F, T>(constant: F, receiver: *const T) -> Self
            where
                F: Fn(&T $(, $parameter)*) -> R + Copy + 'a,
            {
                let () = ZeroSized::<F>::ASSERT;
                let _ = constant;
                debug_assert!(!receiver.is_null(), "receiver must not be null");

                // SAFETY: caller ensures `receiver` is valid.
                // SAFETY: an instance of `F` was provided.
                unsafe {
                    Self::from_raw_parts(
                        thunk::bound::<F, T, fn($($parameter),*) -> R>,
                        Capability::from_ref::<T>(receiver),
                    )
                }
            }

            /// Calls the referenced callable.
            #[inline]
            pub fn call(&self $(, $argument: $parameter)*) -> R {
                // SAFETY: `Const` signatures only create shared references.
                unsafe { self.invoke(($($argument,)*)) }
            }
        }

        impl<'a, F, $($parameter,)* R> From<&'a F> for FunctionRef<'a, $signature>
        where
            F: Fn($($parameter),*) -> R,
        {
            fn from(object: &'a F) -> Self {
                Self::new(object)
            }
        }

        impl<'a, $($parameter,)* R> From<fn($($parameter),*) -> R> for FunctionRef<'a, $signature> {
            fn from(function: fn($($parameter),*) -> R) -> Self {
                Self::from_fn(function)
            }
        }

        impl<$($parameter,)* R> Clone for FunctionRef<'_, $signature> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<$($parameter,)* R> Copy for FunctionRef<'_, $signature> {}
    };
}

macro_rules! define_function_ref {
    (($($argument:ident: $parameter:ident),*); $number:literal) => {
        mutable!(fn($($parameter),*) -> R; ($($argument: $parameter),*));
        mutable!(NoExcept<fn($($parameter),*) -> R>; ($($argument: $parameter),*));
        shared!(Const<fn($($parameter),*) -> R>; ($($argument: $parameter),*));
        shared!(Const<NoExcept<fn($($parameter),*) -> R>>; ($($argument: $parameter),*));

        impl<'a, $($parameter,)* R> FunctionRef<'a, fn($($parameter),*) -> R> {
            paste::paste! {
                #[doc = "Creates a reference to a function pointer taking " $number " parameter(s),"]
                #[doc = " inferring the signature from the function pointer's type."]
                pub fn [<from_fn_ $number>](function: fn($($parameter),*) -> R) -> Self {
                    Self::from_fn(function)
                }
            }
        }
    };
}

fnwrap_core::with_parameters!(define_function_ref);
