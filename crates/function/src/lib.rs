//! Provides [`Function`], an owning, copyable container for a callable with a fixed
//! [`Signature`].
//!
//! A [`Function`] is two words wide: storage for its *target*, and a pointer to a table of
//! functions that know how to call, clone, and drop it. Targets that are no larger than a
//! pointer, such as closures capturing a single reference, are stored inline without an
//! allocation. Larger targets are moved into a heap allocation, which requires the `alloc`
//! feature.
//!
//! # Signatures
//!
//! A [`Function`] can have the signature `fn(A..) -> R` or [`NoExcept<fn(A..) -> R>`]. Calling
//! a [`Function`] with a [`NoExcept`] signature aborts the process if the target panics, though
//! calling one without a target still fails with a [`BadFunctionCall`].
//!
//! The parameter and result types must be `'static`.
//!
//! # Empty containers
//!
//! A [`Function`] may have no target, in which case it compares equal to [`Null`]. Calling such
//! a [`Function`] panics with a [`BadFunctionCall`] payload, while the `try_call` methods return
//! it as an error instead.
//!
//! Only function pointers wrapped in an [`Option`] and other [`Function`]s can produce an empty
//! container through a conversion; any other target is always stored.
//!
//! [`NoExcept<fn(A..) -> R>`]: NoExcept

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

#[cfg(feature = "alloc")]
extern crate alloc;

mod holder;
mod target;

pub use holder::TargetKind;

use fnwrap_core::{BadFunctionCall, NoExcept, Null, Signature};
use holder::RawHolder;

/// An owning container for a callable that can be invoked using the signature `S`.
///
/// The lifetime `'a` bounds any references that the target contains. See the [crate-level
/// documentation](crate) for more information.
///
/// # Copying
///
/// [`Clone`]ing a [`Function`] clones its target, so state captured by value is not shared
/// between the original and the copy. Targets created with `from_ref()` are never copied, and
/// all clones refer to the same callable.
///
/// Function pointers passed to `new()` are stored like any other small target and reported as
/// [`TargetKind::Inline`]. Use `from_fn()` or the [`From`] conversion to get
/// [`TargetKind::Function`] instead.
///
/// # Lifetimes
///
/// The target is dropped along with the [`Function`], so anything it borrows must still be alive
/// at that point:
///
/// ```compile_fail
/// use fnwrap_function::Function;
///
/// #[derive(Clone)]
/// struct Loud<'a>(&'a Vec<u8>);
///
/// impl Drop for Loud<'_> {
///     fn drop(&mut self) {
///         println!("dropping {:?}", self.0);
///     }
/// }
///
/// let f;
/// let v = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
/// let loud = Loud(&v);
/// f = Function::<fn() -> usize>::new(move || {
///     let whole = &loud;
///     whole.0.len()
/// });
/// ```
///
/// # Target size
///
/// Targets larger than a pointer need the `alloc` feature, otherwise `new()` fails to compile:
///
#[cfg_attr(feature = "alloc", doc = "```")]
#[cfg_attr(not(feature = "alloc"), doc = "```compile_fail")]
/// use fnwrap_function::{Function, TargetKind};
///
/// let table = [1u64, 2, 3, 4];
/// let f = Function::<fn(usize) -> u64>::new(move |i| table[i]);
/// assert_eq!(f.target_kind(), TargetKind::Heap);
/// ```
///
/// The target must accept the parameters and produce the result of the signature:
///
/// ```compile_fail
/// use fnwrap_function::Function;
///
/// let f = Function::<fn(u32) -> u32>::new(|s: &str| s.len());
/// ```
pub struct Function<'a, S>
where
    S: Signature,
    S::Params: 'static,
    S::Output: 'static,
{
    holder: RawHolder<S::Params, S::Output>,
    _marker: core::marker::PhantomData<(&'a (), fn() -> S)>,
}

impl<S> Function<'_, S>
where
    S: Signature,
    S::Params: 'static,
    S::Output: 'static,
{
    /// A [`Function`] without a target.
    pub const NULL: Self = Self::from_holder(RawHolder::EMPTY);

    const fn from_holder(holder: RawHolder<S::Params, S::Output>) -> Self {
        Self {
            holder,
            _marker: core::marker::PhantomData,
        }
    }

    /// Returns `true` if this [`Function`] has no target.
    pub fn is_null(&self) -> bool {
        self.target_kind() == TargetKind::Empty
    }

    /// Returns `true` if this [`Function`] has a target.
    pub fn has_target(&self) -> bool {
        !self.is_null()
    }

    /// Describes how the target is stored.
    pub fn target_kind(&self) -> TargetKind {
        self.holder.kind()
    }

    /// Exchanges the targets of two [`Function`]s.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.holder, &mut other.holder)
    }

    /// Calls the target with a tuple of arguments.
    ///
    /// # Errors
    ///
    /// Returns a [`BadFunctionCall`] if this [`Function`] has no target.
    pub fn try_call_with(&mut self, params: S::Params) -> Result<S::Output, BadFunctionCall> {
        if !S::IS_NOEXCEPT {
            return self.holder.invoke(params);
        }

        if self.is_null() {
            return Err(BadFunctionCall);
        }

        let holder = &mut self.holder;
        fnwrap_core::unwind::abort_on_unwind(move || holder.invoke(params))
    }

    /// Calls the target with a tuple of arguments.
    ///
    /// # Panics
    ///
    /// Panics with a [`BadFunctionCall`] if this [`Function`] has no target. See
    /// [`BadFunctionCall::raise()`] for more information.
    #[track_caller]
    pub fn call_with(&mut self, params: S::Params) -> S::Output {
        match self.try_call_with(params) {
            Ok(result) => result,
            Err(error) => error.raise(),
        }
    }
}

impl<S> Drop for Function<'_, S>
where
    S: Signature,
    S::Params: 'static,
    S::Output: 'static,
{
    fn drop(&mut self) {
        // The target is dropped here, while everything it borrows for `'a` is still alive.
        core::mem::drop(core::mem::replace(&mut self.holder, RawHolder::EMPTY));
    }
}

impl<S> Default for Function<'_, S>
where
    S: Signature,
    S::Params: 'static,
    S::Output: 'static,
{
    fn default() -> Self {
        Self::NULL
    }
}

impl<S> From<Null> for Function<'_, S>
where
    S: Signature,
    S::Params: 'static,
    S::Output: 'static,
{
    fn from(_: Null) -> Self {
        Self::NULL
    }
}

impl<S> Clone for Function<'_, S>
where
    S: Signature,
    S::Params: 'static,
    S::Output: 'static,
{
    fn clone(&self) -> Self {
        Self::from_holder(self.holder.clone())
    }
}

impl<S> PartialEq<Null> for Function<'_, S>
where
    S: Signature,
    S::Params: 'static,
    S::Output: 'static,
{
    fn eq(&self, _: &Null) -> bool {
        self.is_null()
    }
}

impl<'a, S> PartialEq<Function<'a, S>> for Null
where
    S: Signature,
    S::Params: 'static,
    S::Output: 'static,
{
    fn eq(&self, other: &Function<'a, S>) -> bool {
        other.is_null()
    }
}

impl<S> core::fmt::Debug for Function<'_, S>
where
    S: Signature,
    S::Params: 'static,
    S::Output: 'static,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_null() {
            f.debug_tuple("Function").field(&Null).finish()
        } else {
            f.debug_struct("Function")
                .field("kind", &self.target_kind())
                .field("target", &format_args!("{}", self.holder.type_name()))
                .finish()
        }
    }
}

macro_rules! constructors {
    ($signature:ty; ($($argument:ident: $parameter:ident),*)) => {
        #[allow(clippy::too_many_arguments)]
        impl<'a, $($parameter,)* R> Function<'a, $signature>
        where
            $($parameter: 'static,)*
            R: 'static,
        {
            /// Creates a [`Function`] that owns the given `target`.
            ///
            /// If the `target` is too large to be stored inline, it is moved into a heap
            /// allocation. Without the `alloc` feature, this is a compile-time error.
            ///
            /// A function pointer `target` is reported as [`TargetKind::Inline`]; use
            /// [`from_fn()`](Self::from_fn) to store it as a [`TargetKind::Function`].
            pub fn new<F>(target: F) -> Self
            where
                F: FnMut($($parameter),*) -> R + Clone + 'a,
            {
                // SAFETY: `F: 'a`, and `Self` does not outlive `'a`.
                Self::from_holder(unsafe {
                    target::owned::<fn($($parameter),*) -> R, F>(target)
                })
            }

            /// Creates a [`Function`] that calls the given function pointer.
            pub fn from_fn(function: fn($($parameter),*) -> R) -> Self {
                // SAFETY: `function` is a function pointer.
                Self::from_holder(unsafe {
                    target::function::<fn($($parameter),*) -> R>(function)
                })
            }

            /// Creates a [`Function`] that refers to the given `target` without owning it.
            ///
            /// Clones of the returned [`Function`] refer to the same `target`.
            pub fn from_ref<F>(target: &'a F) -> Self
            where
                F: Fn($($parameter),*) -> R,
            {
                // SAFETY: `target` is borrowed for `'a`, and `Self` does not outlive `'a`.
                Self::from_holder(unsafe {
                    target::reference::<fn($($parameter),*) -> R, F>(target)
                })
            }

            /// Calls the target.
            ///
            /// # Panics
            ///
            /// Panics with a [`BadFunctionCall`] if this [`Function`] has no target. See
            /// [`BadFunctionCall::raise()`] for more information.
            #[inline]
            #[track_caller]
            pub fn call(&mut self $(, $argument: $parameter)*) -> R {
                self.call_with(($($argument,)*))
            }

            /// Calls the target.
            ///
            /// # Errors
            ///
            /// Returns a [`BadFunctionCall`] if this [`Function`] has no target.
            #[inline]
            pub fn try_call(&mut self $(, $argument: $parameter)*) -> Result<R, BadFunctionCall> {
                self.try_call_with(($($argument,)*))
            }
        }

        impl<$($parameter,)* R> From<fn($($parameter),*) -> R> for Function<'_, $signature>
        where
            $($parameter: 'static,)*
            R: 'static,
        {
            fn from(function: fn($($parameter),*) -> R) -> Self {
                Self::from_fn(function)
            }
        }

        /// A [`None`] function pointer produces a [`Function`] without a target.
        impl<$($parameter,)* R> From<Option<fn($($parameter),*) -> R>> for Function<'_, $signature>
        where
            $($parameter: 'static,)*
            R: 'static,
        {
            fn from(function: Option<fn($($parameter),*) -> R>) -> Self {
                match function {
                    Some(function) => Self::from_fn(function),
                    None => Self::NULL,
                }
            }
        }
    };
}

macro_rules! define_function {
    (($($argument:ident: $parameter:ident),*); $number:literal) => {
        constructors!(fn($($parameter),*) -> R; ($($argument: $parameter),*));
        constructors!(NoExcept<fn($($parameter),*) -> R>; ($($argument: $parameter),*));

        impl<'a, $($parameter,)* R> Function<'a, fn($($parameter),*) -> R>
        where
            $($parameter: 'static,)*
            R: 'static,
        {
            paste::paste! {
                #[doc = "Creates a [`Function`] that calls a function pointer taking " $number]
                #[doc = " parameter(s), inferring the signature from the function pointer's type."]
                pub fn [<from_fn_ $number>](function: fn($($parameter),*) -> R) -> Self {
                    Self::from_fn(function)
                }
            }
        }

        /// Moves the target out of a [`Function`] with a [`NoExcept`] signature. If the `source`
        /// has no target, neither does the result.
        impl<'a, $($parameter,)* R> From<Function<'a, NoExcept<fn($($parameter),*) -> R>>>
            for Function<'a, fn($($parameter),*) -> R>
        where
            $($parameter: 'static,)*
            R: 'static,
        {
            fn from(mut source: Function<'a, NoExcept<fn($($parameter),*) -> R>>) -> Self {
                Self::from_holder(core::mem::replace(&mut source.holder, RawHolder::EMPTY))
            }
        }
    };
}

fnwrap_core::with_parameters!(define_function);
