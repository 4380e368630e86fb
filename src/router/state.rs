use std::{cmp::Ordering, rc::Rc, sync::Arc};

use crate::shared::time::Time;

pub type SearchStateRef = Rc<SearchState>;

/// One frontier entry: standing at `stop` at `current_time`, having arrived on
/// `line_company`. Parents link back to the origin.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub stop: Arc<str>,
    pub current_time: Time,
    // None at the origin
    pub line_company: Option<Arc<str>>,
    // Departure of the leg that got us here
    pub departure_time: Option<Time>,
    // The cost so far
    pub g_cost: f64,
    // The estimated cost left, always 0 without a heuristic
    pub h_cost: f64,
    // Insertion order, the last tie-break
    pub sequence: u64,
    pub parent: Option<SearchStateRef>,
}

impl SearchState {
    pub fn genesis(stop: Arc<str>, current_time: Time, h_cost: f64) -> Self {
        Self {
            stop,
            current_time,
            line_company: None,
            departure_time: None,
            g_cost: 0.0,
            h_cost,
            sequence: 0,
            parent: None,
        }
    }

    pub fn priority(&self) -> f64 {
        self.g_cost + self.h_cost
    }

    pub fn line_company(&self) -> Option<&str> {
        self.line_company.as_deref()
    }

    /// Walks the parent chain and returns the states from the origin to `self`.
    pub fn unwind(self: &SearchStateRef) -> Vec<SearchStateRef> {
        let mut states = vec![];
        let mut next = Some(self.clone());
        while let Some(state) = next {
            next = state.parent.clone();
            states.push(state);
        }
        states.reverse();
        states
    }
}

impl Eq for SearchState {}

impl PartialEq for SearchState {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchState {
    // Reversed so the max-heap pops the cheapest state first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority()
            .total_cmp(&self.priority())
            .then_with(|| other.current_time.total_cmp(&self.current_time))
            .then_with(|| other.stop.cmp(&self.stop))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

#[cfg(test)]
fn state(stop: &str, cost: f64, time: f64, sequence: u64) -> SearchState {
    SearchState {
        g_cost: cost,
        sequence,
        ..SearchState::genesis(stop.into(), Time::from_minutes(time), 0.0)
    }
}

#[test]
fn heap_pops_cheapest_first() {
    use std::collections::BinaryHeap;
    let mut heap = BinaryHeap::new();
    heap.push(state("C", 10.0, 0.0, 0));
    heap.push(state("A", 3.0, 0.0, 1));
    heap.push(state("B", 7.0, 0.0, 2));
    let order: Vec<_> = std::iter::from_fn(|| heap.pop())
        .map(|state| state.stop.to_string())
        .collect();
    assert_eq!(order, vec!["A", "B", "C"]);
}

#[test]
fn ties_break_on_arrival_then_stop_then_sequence() {
    use std::collections::BinaryHeap;
    let mut heap = BinaryHeap::new();
    heap.push(state("B", 5.0, 20.0, 0));
    heap.push(state("Z", 5.0, 10.0, 1));
    heap.push(state("B", 5.0, 10.0, 3));
    heap.push(state("B", 5.0, 10.0, 2));
    let order: Vec<_> = std::iter::from_fn(|| heap.pop())
        .map(|state| (state.stop.to_string(), state.sequence))
        .collect();
    assert_eq!(
        order,
        vec![
            ("B".to_string(), 2),
            ("B".to_string(), 3),
            ("Z".to_string(), 1),
            ("B".to_string(), 0),
        ]
    );
}

#[test]
fn unwind_starts_at_origin() {
    let origin: SearchStateRef = state("A", 0.0, 0.0, 0).into();
    let middle: SearchStateRef = SearchState {
        parent: Some(origin.clone()),
        ..state("B", 10.0, 10.0, 1)
    }
    .into();
    let end: SearchStateRef = SearchState {
        parent: Some(middle),
        ..state("C", 20.0, 20.0, 2)
    }
    .into();
    let stops: Vec<_> = end.unwind().iter().map(|s| s.stop.to_string()).collect();
    assert_eq!(stops, vec!["A", "B", "C"]);
}
