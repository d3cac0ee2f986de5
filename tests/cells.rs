use orx_refmem::*;

#[derive(Debug, Default, Clone, PartialEq)]
struct Cell {
    cell: Option<Handle>,
    string: Option<Handle>,
    i: i32,
}

#[derive(Debug, Default, Clone, PartialEq)]
enum Value {
    #[default]
    Zero,
    Int(i32),
    Text(String),
    Cell(Cell),
    Ptr(Option<Handle>),
}

impl Children for Cell {
    fn child(&self, index: usize) -> Option<Handle> {
        match index {
            0 => self.cell,
            1 => self.string,
            _ => None,
        }
    }
}

impl Children for Value {
    fn child(&self, index: usize) -> Option<Handle> {
        match self {
            Value::Cell(x) => x.child(index),
            Value::Ptr(x) => x.child(index),
            _ => None,
        }
    }
}

fn cell(mem: &mut RefMem<Value>, handle: Handle) -> &mut Cell {
    let value = mem.get_mut(handle).unwrap();
    if !matches!(value, Value::Cell(_)) {
        *value = Value::Cell(Cell::default());
    }
    match value {
        Value::Cell(x) => x,
        _ => unreachable!(),
    }
}

#[test]
fn parent_release_cascades_into_child() {
    let mut mem = RefMem::<Value>::new();

    let parent = mem.allocate(Teardown::Default, 1);
    let child = mem.allocate(Teardown::Default, 0);
    cell(&mut mem, parent).cell = Some(child);
    mem.retain(parent).unwrap();
    mem.retain(child).unwrap();

    *mem.get_mut(child).unwrap() = Value::Int(42);
    assert_eq!(mem.count(), 2);
    assert_eq!(mem.rc(child), Ok(1));

    mem.release(parent).unwrap();

    assert!(!mem.contains(parent));
    assert!(!mem.contains(child));
    assert_eq!(mem.count(), 0);
}

#[test]
fn cells_and_arrays() {
    let mut mem = RefMem::<Value>::new();

    let c = mem.allocate(Teardown::Default, 2);
    mem.retain(c).unwrap();

    // the string slot is still empty
    let string = cell(&mut mem, c).string;
    mem.retain(string).unwrap();

    let first = mem.allocate(Teardown::Default, 1);
    cell(&mut mem, first).i = 42;
    cell(&mut mem, c).cell = Some(first);
    mem.retain(first).unwrap();

    // the reference is dropped without a release; the first cell leaks until shutdown
    cell(&mut mem, c).cell = None;
    let dropped = cell(&mut mem, c).cell;
    mem.release(dropped).unwrap();
    assert_eq!(mem.rc(first), Ok(1));

    let second = mem.allocate(Teardown::Default, 1);
    cell(&mut mem, second).i = 40;
    cell(&mut mem, c).cell = Some(second);
    mem.retain(second).unwrap();
    cell(&mut mem, second).cell = None;

    let text = mem.allocate_with(Value::Text("refmem".to_string()), Teardown::Default, 0);
    cell(&mut mem, c).string = Some(text);
    mem.retain(text).unwrap();

    assert_eq!(mem.count(), 4);

    const ARRAY_SIZE: usize = 10_000;
    let array = mem.allocate_array(ARRAY_SIZE, Teardown::Default, 1);
    mem.retain(array).unwrap();
    for i in 0..ARRAY_SIZE {
        let item = mem.allocate(Teardown::Default, 0);
        mem.retain(item).unwrap();
        *mem.get_mut(item).unwrap() = Value::Int(i as i32);
        *mem.element_mut(array, i).unwrap() = Value::Ptr(Some(item));
    }
    assert_eq!(mem.count(), 4 + 1 + ARRAY_SIZE);

    mem.release(array).unwrap();

    // one element is deferred as the array spends a unit of the default budget
    assert_eq!(mem.count(), 5);
    assert_eq!(mem.cleanup(), Ok(1));
    assert_eq!(mem.count(), 4);

    assert_eq!(mem.get(text), Ok(&Value::Text("refmem".to_string())));
    assert_eq!(
        mem.get(second),
        Ok(&Value::Cell(Cell {
            cell: None,
            string: None,
            i: 40,
        }))
    );

    let report = mem.shutdown(ShutdownMode::Ordered).unwrap();
    assert_eq!(report.reclaimed, 4);
}

#[test]
fn releasing_the_root_keeps_the_leak() {
    let mut mem = RefMem::<Value>::new();

    let c = mem.allocate(Teardown::Default, 2);
    mem.retain(c).unwrap();

    let leaked = mem.allocate(Teardown::Default, 1);
    mem.retain(leaked).unwrap();

    let kept = mem.allocate(Teardown::Default, 1);
    mem.retain(kept).unwrap();
    cell(&mut mem, c).cell = Some(kept);

    mem.release(c).unwrap();

    assert_eq!(mem.count(), 1);
    assert!(mem.contains(leaked));

    let report = mem.shutdown(ShutdownMode::Forced).unwrap();
    assert_eq!(report.reclaimed, 1);
}
