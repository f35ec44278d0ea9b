use fnwrap::{Const, FunctionRef, NoExcept};

fn add(a: i32, b: i32) -> i32 {
    a + b
}

struct Counter {
    count: u32,
}

impl Counter {
    fn increment(&mut self) -> u32 {
        self.count += 1;
        self.count
    }

    fn scaled(&self, factor: u32) -> u32 {
        self.count * factor
    }
}

#[test]
fn function_pointer_call() {
    let mut add_ref = FunctionRef::<fn(i32, i32) -> i32>::from_fn(add);
    let result = add_ref.call(2, 3);
    assert_eq!(result, 5, "invoking {add_ref:?} did not return the correct result");

    let mut inferred = FunctionRef::from_fn_2(add);
    assert_eq!(inferred.call(-4, 1), -3);

    let shared = FunctionRef::<Const<fn(i32, i32) -> i32>>::from(add as fn(i32, i32) -> i32);
    assert_eq!(shared.call(2, 3), 5);
}

#[test]
fn counter_is_incremented_through_reference() {
    let mut counter = Counter { count: 0 };

    {
        let mut increment = || counter.count += 1;
        let mut increment_ref = FunctionRef::<fn()>::new(&mut increment);
        increment_ref.call();
        increment_ref.call();
        increment_ref.call();
    }

    assert_eq!(counter.count, 3);
}

#[test]
fn callback_parameter() {
    fn for_each(values: &[i32], mut callback: FunctionRef<'_, fn(i32)>) {
        for value in values {
            callback.call(*value);
        }
    }

    let mut sum = 0;
    for_each(&[1, 2, 3, 4], (&mut |value: i32| sum += value).into());
    assert_eq!(sum, 10);
}

#[test]
fn shared_reference_is_copy() {
    let offset = 10;
    let add_offset = |x: i32| x + offset;

    let original = FunctionRef::<Const<fn(i32) -> i32>>::new(&add_offset);
    let copy = original;

    assert_eq!(original.call(1), 11);
    assert_eq!(copy.call(2), 12);
    assert_eq!(original.clone().call(3), 13);
}

#[test]
fn shared_callable_with_mutable_signature() {
    let offset = 3;
    let add_offset = |x: i32| x + offset;

    let mut by_method = FunctionRef::<fn(i32) -> i32>::from_ref(&add_offset);
    assert_eq!(by_method.call(1), 4);

    let mut converted: FunctionRef<NoExcept<fn(i32) -> i32>> = (&add_offset).into();
    assert_eq!(converted.call(2), 5);
    assert_eq!(add_offset(0), 3);
}

#[test]
fn constant_callable() {
    fn make_square() -> FunctionRef<'static, Const<fn(i32) -> i32>> {
        FunctionRef::<Const<fn(i32) -> i32>>::from_constant(|x: i32| x * x)
    }

    let square = make_square();
    assert_eq!(square.call(7), 49);

    let mut absolute = FunctionRef::<fn(i32) -> i32>::from_constant(i32::abs);
    assert_eq!(absolute.call(-5), 5);
}

#[test]
fn bound_method() {
    let mut counter = Counter { count: 0 };

    {
        let mut increment = FunctionRef::<fn() -> u32>::from_bound(Counter::increment, &mut counter);
        assert_eq!(increment.call(), 1);
        assert_eq!(increment.call(), 2);
        assert_eq!(increment.call(), 3);
    }

    assert_eq!(counter.count, 3);

    let scaled = FunctionRef::<Const<fn(u32) -> u32>>::from_bound(Counter::scaled, &counter);
    let copy = scaled;
    assert_eq!(scaled.call(2), 6);
    assert_eq!(copy.call(2), scaled.call(2));
}

#[test]
fn bound_free_function() {
    fn push_twice(values: &mut Vec<i32>, value: i32) {
        values.push(value);
        values.push(value);
    }

    let mut values = Vec::new();
    FunctionRef::<fn(i32)>::from_bound(push_twice, &mut values).call(7);
    assert_eq!(values, [7, 7]);
}

#[test]
fn bound_receiver_pointer() {
    let mut counter = Counter { count: 5 };
    let receiver = core::ptr::addr_of_mut!(counter);

    // SAFETY: `counter` outlives the reference, and is not accessed while it is called.
    let mut increment =
        unsafe { FunctionRef::<fn() -> u32>::from_bound_ptr(Counter::increment, receiver) };

    assert_eq!(increment.call(), 6);
    assert_eq!(increment.call(), 7);
    assert_eq!(counter.count, 7);

    let receiver = core::ptr::addr_of!(counter);

    // SAFETY: `counter` outlives the reference, and is not mutated while it is called.
    let scaled =
        unsafe { FunctionRef::<Const<fn(u32) -> u32>>::from_bound_ptr(Counter::scaled, receiver) };

    assert_eq!(scaled.call(3), 21);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "receiver must not be null")]
fn null_receiver_pointer() {
    // SAFETY: the reference is never called.
    let _ = unsafe {
        FunctionRef::<fn() -> u32>::from_bound_ptr(
            Counter::increment,
            core::ptr::null_mut::<Counter>(),
        )
    };
}

#[test]
fn no_unwind_signatures() {
    let mut reverse = FunctionRef::<NoExcept<fn(u8) -> u8>>::from_fn(u8::reverse_bits);
    assert_eq!(reverse.call(1), 128);

    let greeting = |name: &'static str| name.len() + 7;
    let length = FunctionRef::<Const<NoExcept<fn(&'static str) -> usize>>>::new(&greeting);
    assert_eq!(length.call("world"), 12);
}

#[test]
fn panics_propagate() {
    let result = std::panic::catch_unwind(|| {
        FunctionRef::<fn()>::from_fn(|| panic!("target panicked")).call();
    });

    assert!(result.is_err(), "panic in target should reach the caller");
}

#[test]
fn debug_format() {
    let mut increment = || ();
    let increment_ref = FunctionRef::<fn()>::new(&mut increment);
    let formatted = format!("{increment_ref:?}");

    assert!(
        formatted.starts_with("FunctionRef { signature: \"fn()\", thunk: "),
        "unexpected debug output {formatted}"
    );
}
