use fnwrap_core::BadFunctionCall;

const INLINE_LEN: usize = core::mem::size_of::<*const ()>();

/// Storage for the target of a [`Function`].
///
/// Which field is valid is known only to the [`VTable`] that the data was created alongside.
///
/// [`Function`]: crate::Function
#[derive(Clone, Copy)]
pub(crate) union HolderData {
    /// Used for heap allocations.
    pub(crate) pointer: *mut (),
    /// Used for references to targets that are not owned.
    pub(crate) shared: *const (),
    /// Used for function pointers, which must be cast back to their original type before calling.
    pub(crate) function: unsafe fn(),
    /// Allows storing any value with a size and alignment no greater than that of a pointer.
    ///
    /// Reading bytes corresponding to padding is **undefined behavior**.
    pub(crate) inline: core::mem::MaybeUninit<[u8; INLINE_LEN]>,
}

impl HolderData {
    pub(crate) const NONE: Self = Self {
        shared: core::ptr::null(),
    };

    /// Returns `true` if an instance of `T` can be stored [`inline`].
    ///
    /// [`inline`]: HolderData::inline
    pub(crate) const fn can_store_inline<T>() -> bool {
        core::mem::size_of::<T>() <= INLINE_LEN
            && core::mem::align_of::<T>() <= core::mem::align_of::<Self>()
    }

    /// Attempts to store the given `value` [`inline`].
    ///
    /// # Errors
    ///
    /// Returns the `value` if [`can_store_inline::<T>()`] returns `false`.
    ///
    /// [`inline`]: HolderData::inline
    /// [`can_store_inline::<T>()`]: HolderData::can_store_inline()
    pub(crate) fn try_from_inline<T>(value: T) -> Result<Self, T> {
        if Self::can_store_inline::<T>() {
            let mut data = Self {
                inline: core::mem::MaybeUninit::uninit(),
            };

            // SAFETY: check for size and alignment occurs above.
            // SAFETY: only the `inline` field is accessed, which was just initialized.
            unsafe {
                core::ptr::write(data.inline.as_mut_ptr().cast::<T>(), value);
            }

            Ok(data)
        } else {
            Err(value)
        }
    }

    /// Interprets the [`inline`] data as containing a valid instance of `T`.
    ///
    /// # Safety
    ///
    /// The data must have been created by [`try_from_inline::<T>()`].
    ///
    /// [`inline`]: HolderData::inline
    /// [`try_from_inline::<T>()`]: HolderData::try_from_inline()
    pub(crate) unsafe fn as_inline_mut<T>(&mut self) -> &mut T {
        // SAFETY: caller ensures an initialized `T` is stored inline.
        unsafe { &mut *self.inline.as_mut_ptr().cast::<T>() }
    }

    /// # Safety
    ///
    /// See [`HolderData::as_inline_mut()`].
    pub(crate) unsafe fn as_inline<T>(&self) -> &T {
        // SAFETY: caller ensures an initialized `T` is stored inline.
        unsafe { &*self.inline.as_ptr().cast::<T>() }
    }

    /// Reads a `T` out of the [`inline`] data.
    ///
    /// # Safety
    ///
    /// See [`HolderData::as_inline_mut()`]. The data must not be used again after this call.
    ///
    /// [`inline`]: HolderData::inline
    pub(crate) unsafe fn read_inline<T>(self) -> T {
        // SAFETY: caller ensures an initialized `T` is stored inline.
        unsafe { core::ptr::read(self.inline.as_ptr().cast::<T>()) }
    }

    /// Stores a function pointer of type `P`.
    ///
    /// # Safety
    ///
    /// `P` must be a function pointer type.
    pub(crate) unsafe fn from_fn<P: Copy>(function: P) -> Self {
        debug_assert_eq!(
            core::mem::size_of::<P>(),
            core::mem::size_of::<unsafe fn()>()
        );

        Self {
            // SAFETY: caller ensures `P` is a function pointer, so sizes are the same.
            function: unsafe { core::mem::transmute_copy::<P, unsafe fn()>(&function) },
        }
    }

    /// Gets the function pointer stored by [`HolderData::from_fn()`].
    ///
    /// # Safety
    ///
    /// The data must have been created by a call to [`HolderData::from_fn::<P>()`].
    ///
    /// [`HolderData::from_fn::<P>()`]: HolderData::from_fn()
    pub(crate) unsafe fn to_fn<P: Copy>(&self) -> P {
        // SAFETY: caller ensures `function` field is valid, and that it was originally a `P`.
        unsafe { core::mem::transmute_copy::<unsafe fn(), P>(&self.function) }
    }
}

/// Describes the kind of target stored in a [`Function`].
///
/// [`Function`]: crate::Function
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum TargetKind {
    /// There is no target, and calls fail with a [`BadFunctionCall`].
    Empty,
    /// The target is small enough to be stored in place, so no allocation is needed.
    Inline,
    /// The target is stored in a heap allocation.
    ///
    /// This requires the `alloc` feature.
    Heap,
    /// The target is a function pointer.
    Function,
    /// The target is a reference to a callable that the [`Function`] does not own.
    ///
    /// [`Function`]: crate::Function
    Reference,
}

/// A table of functions that specify the behavior of a [`RawHolder`].
pub(crate) struct VTable<P: 'static, O: 'static> {
    pub(crate) kind: TargetKind,
    pub(crate) invoke: unsafe fn(data: &mut HolderData, params: P) -> Result<O, BadFunctionCall>,
    pub(crate) clone: unsafe fn(data: &HolderData) -> HolderData,
    /// Responsible for dropping the contents of the [`HolderData`].
    pub(crate) drop: unsafe fn(data: HolderData),
    pub(crate) type_name: fn() -> &'static str,
}

/// A type-erased callable taking parameters `P` and returning `O`.
pub(crate) struct RawHolder<P: 'static, O: 'static> {
    data: HolderData,
    vtable: &'static VTable<P, O>,
}

impl<P: 'static, O: 'static> RawHolder<P, O> {
    /// Creates a new holder.
    ///
    /// # Safety
    ///
    /// The functions in the `vtable` must accept the `data`. Any references contained in the
    /// `data` must remain valid for as long as the holder, or any of its clones, are used.
    pub(crate) const unsafe fn new(data: HolderData, vtable: &'static VTable<P, O>) -> Self {
        Self { data, vtable }
    }

    pub(crate) fn kind(&self) -> TargetKind {
        self.vtable.kind
    }

    pub(crate) fn type_name(&self) -> &'static str {
        (self.vtable.type_name)()
    }

    #[inline]
    pub(crate) fn invoke(&mut self, params: P) -> Result<O, BadFunctionCall> {
        // SAFETY: `data` and `vtable` were created together.
        unsafe { (self.vtable.invoke)(&mut self.data, params) }
    }
}

impl<P: 'static, O: 'static> Clone for RawHolder<P, O> {
    fn clone(&self) -> Self {
        // SAFETY: `data` and `vtable` were created together.
        let data = unsafe { (self.vtable.clone)(&self.data) };

        // SAFETY: `clone` ensures the new `data` is accepted by the same `vtable`.
        unsafe { Self::new(data, self.vtable) }
    }
}

impl<P: 'static, O: 'static> Drop for RawHolder<P, O> {
    fn drop(&mut self) {
        // SAFETY: the `data` won't be used after this point, so it is "moved" out.
        // SAFETY: `data` and `vtable` were created together.
        unsafe { (self.vtable.drop)(self.data) }
    }
}
