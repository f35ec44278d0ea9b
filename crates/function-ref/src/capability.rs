/// The untyped word a [`FunctionRef`] passes to its thunk.
///
/// Which field is valid is known only to the thunk that the capability was created alongside.
///
/// [`FunctionRef`]: crate::FunctionRef
#[derive(Clone, Copy)]
pub(crate) union Capability {
    /// Address of a callable or receiver that is accessed through an exclusive reference.
    pub(crate) object: *mut (),
    /// Address of a callable or receiver that is only accessed through shared references.
    pub(crate) shared: *const (),
    /// A function pointer, which must be cast back to its original type before calling.
    ///
    /// This is not `*const ()`, as casts from function pointers to data pointers are not
    /// available on platforms where their sizes differ.
    pub(crate) function: unsafe fn(),
}

impl Capability {
    /// Used when the thunk ignores the capability.
    pub(crate) const UNUSED: Self = Self {
        shared: core::ptr::null(),
    };

    pub(crate) fn from_mut<T>(object: *mut T) -> Self {
        Self {
            object: object.cast(),
        }
    }

    pub(crate) fn from_ref<T>(object: *const T) -> Self {
        Self {
            shared: object.cast(),
        }
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

    /// Gets the function pointer stored by [`Capability::from_fn()`].
    ///
    /// # Safety
    ///
    /// The capability must have been created by a call to [`Capability::from_fn::<P>()`].
    ///
    /// [`Capability::from_fn::<P>()`]: Capability::from_fn()
    pub(crate) unsafe fn to_fn<P: Copy>(self) -> P {
        // SAFETY: caller ensures `function` field is valid, and that it was originally a `P`.
        unsafe { core::mem::transmute_copy::<unsafe fn(), P>(&self.function) }
    }
}
