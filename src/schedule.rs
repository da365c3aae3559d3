//! Exhaustive enumeration of order-preserving interleavings.
//!
//! Given one authored sequence of events, each tagged with the thread that
//! produces it, [`enumerate_schedules`] computes every total ordering that
//! uses exactly the same events and keeps each thread's own events in their
//! original relative order. These are precisely the interleavings a real run
//! of those threads could produce, so the result can seed an
//! [`Assertor`](crate::assertor::Assertor) with one entry per legal schedule.
//!
//! # Complexity
//!
//! The enumeration is deliberately naive: it walks all N! permutations of the
//! input and keeps the order-preserving ones. The number of *valid* schedules
//! is the multinomial `N! / (n1! * n2! * ... * nk!)` where `ni` is thread i's
//! event count, but the walk itself is factorial in N. This is acceptable for
//! the handful of events a thread-safety test instruments and is the known
//! scalability ceiling of this approach; a polynomial multi-way merge could
//! produce the same set and may replace the walk if that ceiling is ever hit.
//! Use [`schedule_count`] to estimate the output size before enumerating.

use crate::event::{Event, EventSequence};
use std::collections::HashMap;
use tracing::debug;

/// Enumerates every order-preserving interleaving of `events`.
///
/// Events sharing a thread name form one stream whose internal order is
/// fixed; events from different streams may be reordered arbitrarily. The
/// output is deterministic: schedules appear in lexicographic order of the
/// underlying index permutation.
///
/// An empty input yields exactly one empty schedule; a single-thread input
/// yields exactly one schedule, the input itself.
#[must_use]
pub fn enumerate_schedules(events: &[Event]) -> Vec<EventSequence> {
    let (thread_of, rank_of) = index_streams(events);

    let mut schedules = Vec::new();
    let mut current = Vec::with_capacity(events.len());
    let mut used = vec![false; events.len()];
    permute(events, &thread_of, &rank_of, &mut current, &mut used, &mut schedules);

    debug!(
        events = events.len(),
        schedules = schedules.len(),
        "enumerated order-preserving schedules"
    );
    schedules
}

/// Returns true if `candidate` is a valid interleaving of `input`: same
/// events, and every thread's projection of `candidate` equals its projection
/// of `input`.
#[must_use]
pub fn is_order_preserving(candidate: &[Event], input: &[Event]) -> bool {
    if candidate.len() != input.len() {
        return false;
    }
    let mut threads: Vec<&str> = input.iter().chain(candidate).map(Event::thread).collect();
    threads.sort_unstable();
    threads.dedup();
    threads.iter().all(|thread| {
        let project = |events: &[Event]| -> EventSequence {
            events
                .iter()
                .filter(|e| e.thread() == *thread)
                .cloned()
                .collect()
        };
        project(candidate) == project(input)
    })
}

/// Number of distinct order-preserving interleavings of `events`, computed
/// as the multinomial `N! / (n1! * ... * nk!)` without enumerating.
///
/// # Panics
///
/// Panics if the count overflows `u128`; at that size the enumeration itself
/// is far out of reach anyway.
#[must_use]
pub fn schedule_count(events: &[Event]) -> u128 {
    let mut per_thread: HashMap<&str, u128> = HashMap::new();
    for event in events {
        *per_thread.entry(event.thread()).or_insert(0) += 1;
    }

    // Multinomial as a product of binomials: place each stream's events into
    // the positions remaining after the previous streams.
    let mut placed = 0u128;
    let mut count = 1u128;
    for n in per_thread.into_values() {
        placed += n;
        count = count
            .checked_mul(binomial(placed, n))
            .expect("schedule count overflows u128");
    }
    count
}

/// Per-event stream coordinates: the thread's dense index and the event's
/// 0-based position within its own thread's events.
fn index_streams(events: &[Event]) -> (Vec<usize>, Vec<usize>) {
    let mut thread_index: HashMap<&str, usize> = HashMap::new();
    let mut next_rank: Vec<usize> = Vec::new();
    let mut thread_of = Vec::with_capacity(events.len());
    let mut rank_of = Vec::with_capacity(events.len());

    for event in events {
        let index = *thread_index.entry(event.thread()).or_insert_with(|| {
            next_rank.push(0);
            next_rank.len() - 1
        });
        thread_of.push(index);
        rank_of.push(next_rank[index]);
        next_rank[index] += 1;
    }
    (thread_of, rank_of)
}

/// Walks all permutations of the index set in lexicographic order, keeping
/// the candidates that pass [`preserves_ranks`].
fn permute(
    events: &[Event],
    thread_of: &[usize],
    rank_of: &[usize],
    current: &mut Vec<usize>,
    used: &mut [bool],
    out: &mut Vec<EventSequence>,
) {
    if current.len() == events.len() {
        if preserves_ranks(current, thread_of, rank_of) {
            out.push(current.iter().map(|&i| events[i].clone()).collect());
        }
        return;
    }
    for i in 0..events.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        current.push(i);
        permute(events, thread_of, rank_of, current, used, out);
        current.pop();
        used[i] = false;
    }
}

/// Validates one candidate permutation: walking left to right, an event's
/// rank must never fall below the last rank already seen for its thread.
fn preserves_ranks(candidate: &[usize], thread_of: &[usize], rank_of: &[usize]) -> bool {
    let thread_count = thread_of.iter().copied().max().map_or(0, |m| m + 1);
    let mut last_seen: Vec<Option<usize>> = vec![None; thread_count];
    for &index in candidate {
        let thread = thread_of[index];
        let rank = rank_of[index];
        if last_seen[thread].is_some_and(|seen| rank < seen) {
            return false;
        }
        last_seen[thread] = Some(rank);
    }
    true
}

fn binomial(n: u128, k: u128) -> u128 {
    let k = k.min(n - k);
    let mut result = 1u128;
    for i in 0..k {
        result = result
            .checked_mul(n - i)
            .expect("schedule count overflows u128")
            / (i + 1);
    }
    result
}
