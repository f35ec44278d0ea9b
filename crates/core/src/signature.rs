//! Canonical call signatures.

/// Describes the call signature that a callable wrapper is instantiated with.
///
/// Signatures are written as function pointer types, optionally wrapped in the [`Const`] and
/// [`NoExcept`] qualifiers:
///
/// | Signature                          | `IS_CONST` | `IS_NOEXCEPT` |
/// |------------------------------------|------------|---------------|
/// | `fn(A0, A1) -> R`                  | `false`    | `false`       |
/// | `Const<fn(A0, A1) -> R>`           | `true`     | `false`       |
/// | `NoExcept<fn(A0, A1) -> R>`        | `false`    | `true`        |
/// | `Const<NoExcept<fn(A0, A1) -> R>>` | `true`     | `true`        |
///
/// Signatures with up to eight parameters are supported.
///
/// Function pointer types with parameters that are references with an elided lifetime, such as
/// `fn(&str)`, are [higher-ranked] and do not implement this trait. Name the lifetime instead.
///
/// [higher-ranked]: https://doc.rust-lang.org/nomicon/hrtb.html
pub trait Signature {
    /// The unqualified function pointer type, with the same parameters and result.
    type Function: Signature<Params = Self::Params, Output = Self::Output> + Copy;

    /// The parameter types, as a tuple.
    type Params;

    /// The result type.
    type Output;

    /// The number of parameters.
    const ARITY: usize;

    /// Whether the signature is qualified with [`Const`].
    const IS_CONST: bool;

    /// Whether the signature is qualified with [`NoExcept`].
    const IS_NOEXCEPT: bool;
}

/// Qualifies a [`Signature`] as `const`.
///
/// Callables referred to using a `const` signature are only ever accessed through shared
/// references, and so must implement [`Fn`] rather than only [`FnMut`].
pub struct Const<S>(core::convert::Infallible, core::marker::PhantomData<S>);

/// Qualifies a [`Signature`] as never unwinding.
///
/// If the target of a wrapper with a `NoExcept` signature panics, the process is aborted. See
/// the [`unwind`](crate::unwind) module for more information.
pub struct NoExcept<S>(core::convert::Infallible, core::marker::PhantomData<S>);

impl<S> core::fmt::Debug for Const<S> {
    fn fmt(&self, _: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {}
    }
}

impl<S> core::fmt::Debug for NoExcept<S> {
    fn fmt(&self, _: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {}
    }
}

macro_rules! define_signatures {
    (($($argument:ident: $parameter:ident),*); $number:literal) => {
        define_signatures! {
            @impl fn($($parameter),*) -> R;
            ($($parameter),*);
            $number;
            false;
            false
        }

        define_signatures! {
            @impl Const<fn($($parameter),*) -> R>;
            ($($parameter),*);
            $number;
            true;
            false
        }

        define_signatures! {
            @impl NoExcept<fn($($parameter),*) -> R>;
            ($($parameter),*);
            $number;
            false;
            true
        }

        define_signatures! {
            @impl Const<NoExcept<fn($($parameter),*) -> R>>;
            ($($parameter),*);
            $number;
            true;
            true
        }
    };
    (
        @impl $signature:ty;
        ($($parameter:ident),*);
        $number:literal;
        $is_const:literal;
        $is_noexcept:literal
    ) => {
        impl<$($parameter,)* R> Signature for $signature {
            type Function = fn($($parameter),*) -> R;
            type Params = ($($parameter,)*);
            type Output = R;

            const ARITY: usize = $number;
            const IS_CONST: bool = $is_const;
            const IS_NOEXCEPT: bool = $is_noexcept;
        }
    };
}

crate::with_parameters!(define_signatures);
