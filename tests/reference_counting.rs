use orx_refmem::*;
use test_case::test_case;

type Mem = RefMem<[Option<Handle>; 4]>;

#[test]
fn new_mem() {
    let mem = Mem::new();

    assert_eq!(mem.count(), 0);
    assert!(mem.is_empty());
    assert_eq!(mem.cascade_limit(), DEFAULT_CASCADE_LIMIT);
}

#[test]
fn fresh_object_is_unowned() {
    let mut mem = Mem::new();

    let a = mem.allocate(Teardown::Default, 0);
    let b = mem.allocate_array(3, Teardown::Default, 0);

    assert_eq!(mem.rc(a), Ok(0));
    assert_eq!(mem.rc(b), Ok(0));
    assert_eq!(mem.count(), 2);
    assert!(mem.contains(a));
    assert!(mem.contains(b));
}

#[test]
fn none_is_ignored() {
    let mut mem = Mem::new();
    let a = mem.allocate(Teardown::Default, 0);

    assert_eq!(mem.retain(None::<Handle>), Ok(()));
    assert_eq!(mem.release(None::<Handle>), Ok(()));
    assert_eq!(mem.rc(a), Ok(0));
    assert_eq!(mem.count(), 1);
}

#[test_case(&[true])]
#[test_case(&[true, true, true])]
#[test_case(&[true, true, false])]
#[test_case(&[true, false, true, true, false])]
#[test_case(&[true, true, false, true, false, true, false])]
fn rc_is_net_count(retains: &[bool]) {
    // passing through zero defers instead of deallocating
    let mut mem = Mem::with_config(RefMemConfig::default().with_cascade_limit(0));
    let a = mem.allocate(Teardown::Default, 0);

    let mut expected = 0;
    for &retain in retains {
        match retain {
            true => {
                mem.retain(a).unwrap();
                expected += 1;
            }
            false => {
                mem.release(a).unwrap();
                expected -= 1;
            }
        }
        assert_eq!(mem.rc(a), Ok(expected));
    }
}

#[test]
fn release_below_zero_is_underflow() {
    let mut mem = Mem::new();
    let a = mem.allocate(Teardown::Default, 0);

    assert_eq!(mem.release(a), Err(RefMemError::Underflow(a)));
    assert_eq!(mem.rc(a), Ok(0));
    assert_eq!(mem.count(), 1);
}

#[test]
fn release_to_zero_deallocates() {
    let mut mem = Mem::new();
    let a = mem.allocate(Teardown::Default, 0);
    let b = mem.allocate(Teardown::Default, 0);

    mem.retain(a).unwrap();
    mem.retain(a).unwrap();

    mem.release(a).unwrap();
    assert_eq!(mem.count(), 2);

    mem.release(a).unwrap();
    assert_eq!(mem.count(), 1);
    assert!(!mem.contains(a));
    assert!(mem.contains(b));
}

#[test]
fn stale_handle_is_rejected() {
    let mut mem = Mem::new();
    let a = mem.allocate(Teardown::Default, 0);
    mem.retain(a).unwrap();
    mem.release(a).unwrap();

    assert_eq!(mem.rc(a), Err(RefMemError::InvalidHandle(a)));
    assert_eq!(mem.retain(a), Err(RefMemError::InvalidHandle(a)));
    assert_eq!(mem.release(a), Err(RefMemError::InvalidHandle(a)));
    assert_eq!(mem.deallocate(a), Err(RefMemError::InvalidHandle(a)));

    let b = mem.allocate(Teardown::Default, 0);
    assert_eq!(b.slot(), a.slot());
    assert_ne!(b, a);
    assert!(mem.get(a).is_err());
    assert_eq!(mem.rc(b), Ok(0));
}

#[test_case(0)]
#[test_case(1)]
#[test_case(2)]
#[test_case(3)]
#[test_case(4)]
fn child_release_fan_out(pointers: usize) {
    let mut mem = Mem::new();

    let children: Vec<_> = (0..4).map(|_| mem.allocate(Teardown::Default, 0)).collect();
    for &child in &children {
        mem.retain(child).unwrap(); // by the caller
        mem.retain(child).unwrap(); // by the parent
    }

    let slots = [
        Some(children[0]),
        Some(children[1]),
        Some(children[2]),
        Some(children[3]),
    ];
    let parent = mem.allocate_with(slots, Teardown::Default, pointers);
    mem.retain(parent).unwrap();

    for &child in &children {
        assert_eq!(mem.rc(child), Ok(2));
    }

    mem.release(parent).unwrap();

    assert_eq!(mem.count(), 4);
    for (i, &child) in children.iter().enumerate() {
        let expected = match i < pointers {
            true => 1,
            false => 2,
        };
        assert_eq!(mem.rc(child), Ok(expected));
    }
}

#[test]
fn children_reaching_zero_cascade() {
    let mut mem = Mem::new();

    let a = mem.allocate(Teardown::Default, 0);
    let b = mem.allocate(Teardown::Default, 0);
    let shared = mem.allocate(Teardown::Default, 0);
    mem.retain(a).unwrap();
    mem.retain(b).unwrap();
    mem.retain(shared).unwrap();
    mem.retain(shared).unwrap();

    let parent = mem.allocate_with([Some(a), Some(b), Some(shared), None], Teardown::Default, 3);
    mem.retain(parent).unwrap();
    mem.retain(shared).unwrap();
    assert_eq!(mem.count(), 4);

    mem.release(parent).unwrap();

    assert_eq!(mem.count(), 1);
    assert!(!mem.contains(a));
    assert!(!mem.contains(b));
    assert_eq!(mem.rc(shared), Ok(2));
}

#[test]
fn explicit_deallocate_ignores_count() {
    let mut mem = Mem::new();

    let child = mem.allocate(Teardown::Default, 0);
    mem.retain(child).unwrap();
    mem.retain(child).unwrap();

    let parent = mem.allocate_with([Some(child), None, None, None], Teardown::Default, 1);
    mem.retain(parent).unwrap();
    mem.retain(parent).unwrap();

    mem.deallocate(parent).unwrap();

    assert!(!mem.contains(parent));
    assert_eq!(mem.rc(child), Ok(1));
    assert_eq!(mem.count(), 1);
}

#[test]
fn values_are_accessible_until_deallocation() {
    let mut mem = Mem::new();
    let a = mem.allocate(Teardown::Nothing, 0);
    let b = mem.allocate(Teardown::Nothing, 0);

    mem.get_mut(a).unwrap()[2] = Some(b);
    assert_eq!(mem.get(a).unwrap()[2], Some(b));
    assert_eq!(mem.entry(a).map(|x| x.kind()), Ok(BlockKind::Scalar));
    assert_eq!(mem.entry(a).map(|x| x.teardown()), Ok(TeardownKind::Nothing));

    mem.deallocate(a).unwrap();
    assert_eq!(mem.get(a), Err(RefMemError::InvalidHandle(a)));
    assert_eq!(mem.rc(b), Ok(0));
}
