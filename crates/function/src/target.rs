//! Holders for each [`TargetKind`].

use crate::holder::{HolderData, RawHolder, TargetKind, VTable};
use core::marker::PhantomData;
use fnwrap_core::{BadFunctionCall, Invoke, InvokeMut, Signature};

#[cfg(feature = "alloc")]
use alloc::boxed::Box;

fn copy_data(data: &HolderData) -> HolderData {
    *data
}

fn forget_data(_: HolderData) {}

fn no_target() -> &'static str {
    "<empty>"
}

struct Empty<P, O>(PhantomData<fn(P) -> O>);

impl<P: 'static, O: 'static> Empty<P, O> {
    const VTABLE: &'static VTable<P, O> = &VTable {
        kind: TargetKind::Empty,
        invoke: Self::invoke,
        clone: copy_data,
        drop: forget_data,
        type_name: no_target,
    };

    fn invoke(_: &mut HolderData, _: P) -> Result<O, BadFunctionCall> {
        Err(BadFunctionCall)
    }
}

impl<P: 'static, O: 'static> RawHolder<P, O> {
    /// A holder without a target.
    pub(crate) const EMPTY: Self = {
        // SAFETY: the empty holder ignores its data.
        unsafe { Self::new(HolderData::NONE, Empty::<P, O>::VTABLE) }
    };
}

/// Targets owned by the holder, either stored inline or in a heap allocation.
struct Owned<S, F>(PhantomData<(fn() -> S, F)>);

impl<S, F> Owned<S, F>
where
    S: Signature,
    S::Params: 'static,
    S::Output: 'static,
    F: InvokeMut<S> + Clone,
{
    #[cfg(not(feature = "alloc"))]
    const FITS_INLINE: () = assert!(
        HolderData::can_store_inline::<F>(),
        "callable is too large to be stored inline, enable the `alloc` feature"
    );

    const INLINE: &'static VTable<S::Params, S::Output> = &VTable {
        kind: TargetKind::Inline,
        invoke: Self::invoke_inline,
        clone: Self::clone_inline,
        drop: Self::drop_inline,
        type_name: core::any::type_name::<F>,
    };

    unsafe fn invoke_inline(
        data: &mut HolderData,
        params: S::Params,
    ) -> Result<S::Output, BadFunctionCall> {
        // SAFETY: `INLINE` is only used with an `F` stored inline.
        let target = unsafe { data.as_inline_mut::<F>() };
        Ok(target.invoke_mut(params))
    }

    unsafe fn clone_inline(data: &HolderData) -> HolderData {
        // SAFETY: `INLINE` is only used with an `F` stored inline.
        let target = unsafe { data.as_inline::<F>() };
        let cloned = HolderData::try_from_inline::<F>(target.clone());

        // SAFETY: `F` is known to be stored inline.
        unsafe { cloned.unwrap_unchecked() }
    }

    unsafe fn drop_inline(data: HolderData) {
        // SAFETY: `INLINE` is only used with an `F` stored inline.
        core::mem::drop(unsafe { data.read_inline::<F>() });
    }

    #[cfg(feature = "alloc")]
    const HEAP: &'static VTable<S::Params, S::Output> = &VTable {
        kind: TargetKind::Heap,
        invoke: Self::invoke_heap,
        clone: Self::clone_heap,
        drop: Self::drop_heap,
        type_name: core::any::type_name::<F>,
    };

    #[cfg(feature = "alloc")]
    fn into_heap(target: F) -> HolderData {
        HolderData {
            pointer: Box::into_raw(Box::new(target)).cast::<()>(),
        }
    }

    #[cfg(feature = "alloc")]
    unsafe fn invoke_heap(
        data: &mut HolderData,
        params: S::Params,
    ) -> Result<S::Output, BadFunctionCall> {
        // SAFETY: `HEAP` is only used with a pointer to a boxed `F`.
        let target = unsafe { &mut *data.pointer.cast::<F>() };
        Ok(target.invoke_mut(params))
    }

    #[cfg(feature = "alloc")]
    unsafe fn clone_heap(data: &HolderData) -> HolderData {
        // SAFETY: `HEAP` is only used with a pointer to a boxed `F`.
        let target = unsafe { &*data.pointer.cast::<F>() };
        Self::into_heap(target.clone())
    }

    #[cfg(feature = "alloc")]
    unsafe fn drop_heap(data: HolderData) {
        // SAFETY: the pointer originates from a previous `Box::into_raw` call.
        core::mem::drop(unsafe { Box::from_raw(data.pointer.cast::<F>()) });
    }
}

/// Creates a holder that owns the `target`.
///
/// If the `target` is too large to be stored inline, it is moved into a heap allocation.
/// Without the `alloc` feature, this is a compile-time error.
///
/// # Safety
///
/// Any references contained in `F` must remain valid for as long as the holder, or any of its
/// clones, are used.
pub(crate) unsafe fn owned<S, F>(target: F) -> RawHolder<S::Params, S::Output>
where
    S: Signature,
    S::Params: 'static,
    S::Output: 'static,
    F: InvokeMut<S> + Clone,
{
    #[cfg(not(feature = "alloc"))]
    let () = Owned::<S, F>::FITS_INLINE;

    match HolderData::try_from_inline(target) {
        // SAFETY: `F` was stored inline, and caller ensures references in `F` are valid.
        Ok(data) => unsafe { RawHolder::new(data, Owned::<S, F>::INLINE) },
        // SAFETY: `F` was boxed, and caller ensures references in `F` are valid.
        #[cfg(feature = "alloc")]
        Err(target) => unsafe {
            RawHolder::new(Owned::<S, F>::into_heap(target), Owned::<S, F>::HEAP)
        },
        #[cfg(not(feature = "alloc"))]
        Err(_) => unreachable!(),
    }
}

struct Pointer<S>(PhantomData<S>);

impl<S> Pointer<S>
where
    S: Signature + Copy + Invoke<S>,
    S::Params: 'static,
    S::Output: 'static,
{
    const VTABLE: &'static VTable<S::Params, S::Output> = &VTable {
        kind: TargetKind::Function,
        invoke: Self::invoke,
        clone: copy_data,
        drop: forget_data,
        type_name: core::any::type_name::<S>,
    };

    unsafe fn invoke(data: &mut HolderData, params: S::Params) -> Result<S::Output, BadFunctionCall> {
        // SAFETY: `VTABLE` is only used with a function pointer of type `S`.
        let function = unsafe { data.to_fn::<S>() };
        Ok(function.invoke(params))
    }
}

/// Creates a holder containing a function pointer.
///
/// # Safety
///
/// `S` must be a function pointer type.
pub(crate) unsafe fn function<S>(function: S) -> RawHolder<S::Params, S::Output>
where
    S: Signature + Copy + Invoke<S>,
    S::Params: 'static,
    S::Output: 'static,
{
    // SAFETY: caller ensures `S` is a function pointer.
    unsafe { RawHolder::new(HolderData::from_fn(function), Pointer::<S>::VTABLE) }
}

struct Borrowed<S, F>(PhantomData<(fn() -> S, *const F)>);

impl<S, F> Borrowed<S, F>
where
    S: Signature,
    S::Params: 'static,
    S::Output: 'static,
    F: Invoke<S>,
{
    const VTABLE: &'static VTable<S::Params, S::Output> = &VTable {
        kind: TargetKind::Reference,
        invoke: Self::invoke,
        clone: copy_data,
        drop: forget_data,
        type_name: core::any::type_name::<F>,
    };

    unsafe fn invoke(data: &mut HolderData, params: S::Params) -> Result<S::Output, BadFunctionCall> {
        // SAFETY: `VTABLE` is only used with a pointer to an `F`.
        let target = unsafe { &*data.shared.cast::<F>() };
        Ok(target.invoke(params))
    }
}

/// Creates a holder that refers to the `target` without owning it.
///
/// # Safety
///
/// The `target` must outlive the holder and all of its clones.
pub(crate) unsafe fn reference<S, F>(target: &F) -> RawHolder<S::Params, S::Output>
where
    S: Signature,
    S::Params: 'static,
    S::Output: 'static,
    F: Invoke<S>,
{
    let data = HolderData {
        shared: core::ptr::from_ref(target).cast::<()>(),
    };

    // SAFETY: caller ensures `target` outlives the holder.
    unsafe { RawHolder::new(data, Borrowed::<S, F>::VTABLE) }
}
