use fnwrap::{BadFunctionCall, Function, NoExcept, Null, TargetKind};
use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

fn add(a: i32, b: i32) -> i32 {
    a + b
}

#[test]
fn function_pointer_call() {
    let mut add_function = Function::<fn(i32, i32) -> i32>::from_fn(add);
    assert_eq!(add_function.target_kind(), TargetKind::Function);
    assert_eq!(
        add_function.call(2, 3),
        5,
        "invoking {add_function:?} did not return the correct result"
    );

    let mut converted: Function<fn(i32, i32) -> i32> = Function::from(add as fn(i32, i32) -> i32);
    assert!(converted.has_target());
    assert_eq!(converted.call(2, 3), 5);

    let formatted = format!("{add_function:?}");
    assert!(
        formatted.starts_with("Function { kind: Function, target: fn("),
        "unexpected debug output {formatted}"
    );
}

#[test]
fn function_pointer_kind_depends_on_constructor() {
    let mut inferred = Function::from_fn_2(add);
    assert_eq!(inferred.target_kind(), TargetKind::Function);
    assert_eq!(inferred.call(4, -1), 3);

    let mut stored = Function::<fn(i32, i32) -> i32>::new(add as fn(i32, i32) -> i32);
    assert_eq!(stored.target_kind(), TargetKind::Inline);
    assert_eq!(stored.call(4, -1), 3);
}

#[test]
fn null_function_pointer() {
    let null_pointer: Option<fn(i32, i32) -> i32> = None;
    let mut function = Function::<fn(i32, i32) -> i32>::from(null_pointer);

    assert!(function == Null);
    assert!(Null == function);
    assert!(!function.has_target());
    assert_eq!(function.target_kind(), TargetKind::Empty);
    assert_eq!(function.try_call(2, 3), Err(BadFunctionCall));

    let payload = catch_unwind(AssertUnwindSafe(|| function.call(2, 3)))
        .expect_err("calling a function without a target should panic");

    assert!(
        payload.downcast_ref::<BadFunctionCall>().is_some(),
        "panic payload should be a BadFunctionCall"
    );

    let mut non_null = Function::<fn(i32, i32) -> i32>::from(Some(add as fn(i32, i32) -> i32));
    assert!(non_null != Null);
    assert_eq!(non_null.call(2, 3), 5);
}

#[test]
fn empty_containers() {
    let defaulted = Function::<fn()>::default();
    let from_null = Function::<fn()>::from(Null);

    assert!(defaulted.is_null());
    assert!(from_null.is_null());
    assert!(Function::<fn(u8) -> u8>::NULL == Null);
    assert!(defaulted.clone().is_null());

    insta::assert_snapshot!(format!("{defaulted:?}"), @"Function(Null)");
}

#[test]
fn clone_copies_captured_state() {
    let mut count = 0u32;
    let mut counter = Function::<fn() -> u32>::new(move || {
        count += 1;
        count
    });

    assert_eq!(counter.target_kind(), TargetKind::Inline);
    assert_eq!(counter.call(), 1);

    let mut copy = counter.clone();
    assert_eq!(counter.call(), 2);
    assert_eq!(counter.call(), 3);
    assert_eq!(copy.call(), 2, "copy should not observe calls made through the original");
}

#[test]
fn large_target_is_boxed() {
    let table = [1u64, 2, 3, 4];
    let mut sum = Function::<fn(usize) -> u64>::new(move |n| table.iter().take(n).sum());

    assert_eq!(sum.target_kind(), TargetKind::Heap);
    assert_eq!(sum.call(3), 6);

    let mut copy = sum.clone();
    assert_eq!(copy.target_kind(), TargetKind::Heap);
    assert_eq!(copy.call(4), 10);
}

#[test]
fn targets_are_dropped() {
    let tracker = Rc::new(());

    let inline = {
        let captured = tracker.clone();
        Function::<fn() -> usize>::new(move || Rc::strong_count(&captured))
    };

    let boxed = {
        let captured = tracker.clone();
        let padding = [0u64; 4];
        Function::<fn() -> usize>::new(move || Rc::strong_count(&captured) + padding.len())
    };

    assert_eq!(inline.target_kind(), TargetKind::Inline);
    assert_eq!(boxed.target_kind(), TargetKind::Heap);

    let copies = (inline.clone(), boxed.clone());
    assert_eq!(Rc::strong_count(&tracker), 5);

    drop(copies);
    assert_eq!(Rc::strong_count(&tracker), 3);

    drop(inline);
    drop(boxed);
    assert_eq!(Rc::strong_count(&tracker), 1);
}

#[test]
fn bound_receiver_copies_agree() {
    struct Account {
        balance: Cell<i64>,
    }

    impl Account {
        fn balance_plus(&self, amount: i64) -> i64 {
            self.balance.get() + amount
        }
    }

    let account = Account {
        balance: Cell::new(100),
    };

    let mut original = Function::<fn(i64) -> i64>::new(|amount| account.balance_plus(amount));
    let mut copy = original.clone();

    assert_eq!(original.call(1), copy.call(1));

    account.balance.set(250);
    assert_eq!(original.call(1), 251);
    assert_eq!(copy.call(1), 251);
}

#[test]
fn reference_target_is_shared() {
    let calls = Cell::new(0);
    let target = |x: i32| {
        calls.set(calls.get() + 1);
        x * 10
    };

    let mut original = Function::<fn(i32) -> i32>::from_ref(&target);
    let mut copy = original.clone();

    assert_eq!(original.target_kind(), TargetKind::Reference);
    assert_eq!(copy.target_kind(), TargetKind::Reference);
    assert_eq!(original.call(1), 10);
    assert_eq!(copy.call(2), 20);
    assert_eq!(calls.get(), 2);
}

#[test]
fn swap_is_self_inverse() {
    let mut a = Function::<fn() -> &'static str>::new(|| "a");
    let mut b = Function::<fn() -> &'static str>::new(|| "b");

    a.swap(&mut b);
    assert_eq!(a.call(), "b");
    assert_eq!(b.call(), "a");

    a.swap(&mut b);
    assert_eq!(a.call(), "a");
    assert_eq!(b.call(), "b");

    let mut empty = Function::<fn() -> &'static str>::NULL;
    a.swap(&mut empty);
    assert!(a.is_null());
    assert_eq!(empty.call(), "a");
}

#[test]
fn move_and_assign() {
    let mut source = Function::<fn(i32) -> i32>::new(|x| x - 1);
    let mut taken = core::mem::take(&mut source);

    assert!(source.is_null());
    assert_eq!(taken.call(1), 0);

    let mut moved = taken;
    assert_eq!(moved.call(5), 4);

    source = moved.clone();
    assert_eq!(source.call(10), 9);

    moved = Function::NULL;
    assert!(moved.is_null());
}

#[test]
fn clone_from_keeps_destination_when_clone_panics() {
    struct PanicOnClone(&'static str);

    impl Clone for PanicOnClone {
        fn clone(&self) -> Self {
            panic!("{} cannot be cloned", self.0)
        }
    }

    let target = PanicOnClone("src");
    let src = Function::<fn() -> &'static str>::new(move || {
        let target = &target;
        target.0
    });
    let mut dst = Function::<fn() -> &'static str>::new(|| "dst");

    let result = catch_unwind(AssertUnwindSafe(|| dst.clone_from(&src)));
    assert!(result.is_err(), "cloning the target should have panicked");
    assert!(dst.has_target());
    assert_eq!(dst.call(), "dst");
}

#[test]
fn many_parameters() {
    let mut sum = Function::<fn(u8, u8, u8, u8, u8, u8, u8, u8) -> u32>::new(
        |a, b, c, d, e, f, g, h| [a, b, c, d, e, f, g, h].iter().map(|&x| u32::from(x)).sum(),
    );

    assert_eq!(sum.call(1, 2, 3, 4, 5, 6, 7, 8), 36);
    assert_eq!(sum.call_with((1, 1, 1, 1, 1, 1, 1, 1)), 8);
}

#[test]
fn no_unwind_signature() {
    let mut rotate = Function::<NoExcept<fn(u32) -> u32>>::new(|x: u32| x.rotate_left(1));
    assert_eq!(rotate.call(1), 2);

    let mut empty = Function::<NoExcept<fn(u32) -> u32>>::NULL;
    assert_eq!(empty.try_call(1), Err(BadFunctionCall));

    let result = catch_unwind(AssertUnwindSafe(|| empty.call(1)));
    assert!(result.is_err(), "calling a function without a target should panic");

    let mut plain: Function<fn(u32) -> u32> = rotate.into();
    assert_eq!(plain.call(4), 8);

    let still_empty: Function<fn(u32) -> u32> = empty.into();
    assert!(still_empty == Null);
}

#[test]
fn errors_propagate_with_question_mark() -> anyhow::Result<()> {
    let mut increment = Function::<fn(i32) -> i32>::new(|x| x + 1);
    assert_eq!(increment.try_call(1)?, 2);

    let mut empty = Function::<fn(i32) -> i32>::default();
    let error = empty
        .try_call(1)
        .map_err(anyhow::Error::from)
        .expect_err("calling a function without a target should fail");

    assert!(error.downcast_ref::<BadFunctionCall>().is_some());
    insta::assert_snapshot!(error.to_string(), @"bad function call: the wrapper has no target");
    Ok(())
}
