//! Thunks that recover the original type of a callable from a [`Capability`] and invoke it.
//!
//! Each thunk is instantiated for one exact provider type, so the returned function pointer
//! remembers the type that was erased when the [`FunctionRef`] was created.
//!
//! [`FunctionRef`]: crate::FunctionRef

use crate::capability::Capability;
use fnwrap_core::{Invoke, InvokeMut, InvokeMutOn, InvokeOn, Signature};

pub(crate) type Thunk<S> =
    unsafe fn(Capability, <S as Signature>::Params) -> <S as Signature>::Output;

/// Allows checking at compile time that a callable is zero-sized.
pub(crate) struct ZeroSized<F>(core::marker::PhantomData<F>);

impl<F> ZeroSized<F> {
    /// Fails to evaluate if `F` has a non-zero size.
    pub(crate) const ASSERT: () = assert!(
        core::mem::size_of::<F>() == 0,
        "constant callable must be zero-sized, capture state by reference instead"
    );
}

/// Produces an instance of the zero-sized `F`.
///
/// # Safety
///
/// A value of type `F` must have existed, which proves `F` is inhabited.
#[inline(always)]
unsafe fn conjure<F: Copy>() -> F {
    let () = ZeroSized::<F>::ASSERT;

    // SAFETY: reads of zero-sized types from dangling but aligned pointers are valid.
    // SAFETY: caller ensures `F` is inhabited.
    unsafe { core::ptr::NonNull::<F>::dangling().as_ptr().read() }
}

/// # Safety
///
/// The `object` must point to a valid `F` that is not aliased for the duration of the call.
pub(crate) unsafe fn object_mut<F, S>(capability: Capability, params: S::Params) -> S::Output
where
    S: Signature,
    F: InvokeMut<S>,
{
    // SAFETY: caller ensures `object` refers to an unaliased `F`.
    let object = unsafe { &mut *capability.object.cast::<F>() };
    object.invoke_mut(params)
}

/// # Safety
///
/// The `shared` pointer must point to a valid `F`.
pub(crate) unsafe fn object<F, S>(capability: Capability, params: S::Params) -> S::Output
where
    S: Signature,
    F: Invoke<S>,
{
    // SAFETY: caller ensures `shared` refers to an `F`.
    let object = unsafe { &*capability.shared.cast::<F>() };
    object.invoke(params)
}

/// # Safety
///
/// The capability must have been created by [`Capability::from_fn::<S>()`].
///
/// [`Capability::from_fn::<S>()`]: Capability::from_fn()
pub(crate) unsafe fn function<S>(capability: Capability, params: S::Params) -> S::Output
where
    S: Signature + Copy + Invoke<S>,
{
    // SAFETY: caller ensures a function pointer of type `S` was stored.
    let function = unsafe { capability.to_fn::<S>() };
    function.invoke(params)
}

/// # Safety
///
/// An instance of `F` must have been provided when creating the [`FunctionRef`].
///
/// [`FunctionRef`]: crate::FunctionRef
pub(crate) unsafe fn constant<F, S>(_: Capability, params: S::Params) -> S::Output
where
    S: Signature,
    F: Invoke<S> + Copy,
{
    // SAFETY: caller ensures `F` is inhabited.
    let constant = unsafe { conjure::<F>() };
    constant.invoke(params)
}

/// # Safety
///
/// The `object` must point to a valid `T` that is not aliased for the duration of the call, and
/// an instance of `F` must have been provided when creating the [`FunctionRef`].
///
/// [`FunctionRef`]: crate::FunctionRef
pub(crate) unsafe fn bound_mut<F, T, S>(capability: Capability, params: S::Params) -> S::Output
where
    S: Signature,
    F: InvokeMutOn<T, S> + Copy,
{
    // SAFETY: caller ensures `F` is inhabited.
    let constant = unsafe { conjure::<F>() };
    // SAFETY: caller ensures `object` refers to an unaliased `T`.
    let receiver = unsafe { &mut *capability.object.cast::<T>() };
    constant.invoke_mut_on(receiver, params)
}

/// # Safety
///
/// The `shared` pointer must point to a valid `T`, and an instance of `F` must have been
/// provided when creating the [`FunctionRef`].
///
/// [`FunctionRef`]: crate::FunctionRef
pub(crate) unsafe fn bound<F, T, S>(capability: Capability, params: S::Params) -> S::Output
where
    S: Signature,
    F: InvokeOn<T, S> + Copy,
{
    // SAFETY: caller ensures `F` is inhabited.
    let constant = unsafe { conjure::<F>() };
    // SAFETY: caller ensures `shared` refers to a `T`.
    let receiver = unsafe { &*capability.shared.cast::<T>() };
    constant.invoke_on(receiver, params)
}
