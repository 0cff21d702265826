//! Construction, copy and drop accounting for stored elements.

use std::cell::Cell;

use nexus_list::List;

#[derive(Default)]
struct Counters {
    created: Cell<usize>,
    cloned: Cell<usize>,
    dropped: Cell<usize>,
}

struct Resource<'a> {
    value: u16,
    counters: &'a Counters,
}

impl<'a> Resource<'a> {
    fn new(value: u16, counters: &'a Counters) -> Self {
        counters.created.set(counters.created.get() + 1);
        Self { value, counters }
    }
}

impl Clone for Resource<'_> {
    fn clone(&self) -> Self {
        self.counters.cloned.set(self.counters.cloned.get() + 1);
        Self {
            value: self.value,
            counters: self.counters,
        }
    }
}

impl Drop for Resource<'_> {
    fn drop(&mut self) {
        self.counters.dropped.set(self.counters.dropped.get() + 1);
    }
}

#[test]
fn push_moves_without_cloning() {
    let counters = Counters::default();
    let mut list = List::new();

    list.push_back(Resource::new(1, &counters));
    list.push_front(Resource::new(2, &counters));

    assert_eq!(counters.created.get(), 2);
    assert_eq!(counters.cloned.get(), 0);
    assert_eq!(counters.dropped.get(), 0);
}

#[test]
fn emplace_builds_once() {
    let counters = Counters::default();
    let mut list = List::new();

    list.emplace_back(|| Resource::new(1, &counters));
    list.emplace_front(|| Resource::new(0, &counters));
    list.begin_mut().emplace(|| Resource::new(9, &counters));

    assert_eq!(counters.created.get(), 3);
    assert_eq!(counters.cloned.get(), 0);
    assert_eq!(list.front().map(|r| r.value), Ok(9));
}

#[test]
fn deep_copy_clones_each_element_once() {
    let counters = Counters::default();
    let list: List<_> = (0..4).map(|v| Resource::new(v, &counters)).collect();

    let copy = list.try_clone().unwrap();
    assert_eq!(counters.cloned.get(), 4);

    let clone = copy.clone();
    assert_eq!(counters.cloned.get(), 8);
    assert_eq!(
        clone.iter().map(|r| r.value).collect::<Vec<_>>(),
        vec![0, 1, 2, 3]
    );
}

#[test]
fn move_does_not_touch_elements() {
    let counters = Counters::default();
    let mut list: List<_> = (0..3).map(|v| Resource::new(v, &counters)).collect();

    let moved = list.take();
    assert_eq!(counters.cloned.get(), 0);
    assert_eq!(counters.dropped.get(), 0);
    assert_eq!(moved.len(), 3);
    assert!(list.is_empty());
}

#[test]
fn every_removal_path_drops_exactly_once() {
    let counters = Counters::default();
    {
        let mut list: List<_> = (0..10).map(|v| Resource::new(v, &counters)).collect();

        drop(list.pop_front());
        drop(list.pop_back());
        assert_eq!(counters.dropped.get(), 2);

        list.begin_mut().pop().map(drop).unwrap();
        assert_eq!(counters.dropped.get(), 3);

        // 2..=8 remain
        assert_eq!(list.remove_if(|r| r.value % 2 == 0), 4);
        assert_eq!(counters.dropped.get(), 7);

        let mut drain = list.drain();
        drop(drain.next());
        drop(drain);
        assert_eq!(counters.dropped.get(), 10);
        assert!(list.is_empty());

        list.push_back(Resource::new(42, &counters));
        list.clear();
        assert_eq!(counters.dropped.get(), 11);

        list.push_back(Resource::new(43, &counters));
    }

    // The final element went with the list itself
    assert_eq!(counters.created.get(), 12);
    assert_eq!(counters.dropped.get(), 12);
}
