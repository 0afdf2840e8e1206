//! Generic best-first search over grid cells.
//!
//! `astar` is the single engine: callers supply the neighbor enumeration,
//! the edge cost, and the heuristic. A zero heuristic recovers plain
//! Dijkstra / uniform-cost search; `shortest_path` wires up the classic
//! unit-cost + Manhattan configuration over a passability predicate.
//!
//! An unreachable goal is an ordinary result (`None`), never an error: the
//! open set drains and the search reports no path. `flood_fill` is the cheap
//! companion used to filter candidates by reachability before scoring them.

use crate::grid::NEIGHBORS_4;
use crate::location::Location;
use fnv::{FnvHashMap, FnvHashSet};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

struct OpenNode {
    f: u32,
    g: u32,
    tie: u64,
    loc: Location,
}

impl OpenNode {
    /// Ordering key: lowest f first, then insertion order, so equal-f nodes
    /// expand least-recently-pushed-first.
    fn key(&self) -> (u32, u64) {
        (self.f, self.tie)
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

/// Weighted best-first search from `start` to `goal`.
///
/// Returns the cell sequence from `start` to `goal` inclusive, minimal in
/// total edge cost when `heuristic` is admissible and consistent (Manhattan
/// distance is both on a 4-directional unit-cost grid), or `None` when the
/// goal cannot be reached.
pub fn astar<N, I, C, H>(
    start: Location,
    goal: Location,
    mut neighbors: N,
    mut cost: C,
    mut heuristic: H,
) -> Option<Vec<Location>>
where
    N: FnMut(Location) -> I,
    I: IntoIterator<Item = Location>,
    C: FnMut(Location, Location) -> u32,
    H: FnMut(Location) -> u32,
{
    let mut open = BinaryHeap::new();
    let mut tie: u64 = 0;
    let mut g_score: FnvHashMap<Location, u32> = FnvHashMap::default();
    let mut came_from: FnvHashMap<Location, Location> = FnvHashMap::default();

    g_score.insert(start, 0);
    open.push(OpenNode {
        f: heuristic(start),
        g: 0,
        tie,
        loc: start,
    });
    tie += 1;

    while let Some(node) = open.pop() {
        if node.loc == goal {
            return Some(reconstruct_path(&came_from, goal));
        }

        // Stale heap entry: a cheaper path to this cell was found after it
        // was pushed.
        if g_score.get(&node.loc).copied() != Some(node.g) {
            continue;
        }

        for next in neighbors(node.loc) {
            let tentative_g = node.g.saturating_add(cost(node.loc, next));
            if g_score
                .get(&next)
                .map_or(true, |&known| tentative_g < known)
            {
                came_from.insert(next, node.loc);
                g_score.insert(next, tentative_g);
                open.push(OpenNode {
                    f: tentative_g.saturating_add(heuristic(next)),
                    g: tentative_g,
                    tie,
                    loc: next,
                });
                tie += 1;
            }
        }
    }

    None
}

/// Uniform-cost search: `astar` with the zero heuristic.
pub fn dijkstra<N, I, C>(
    start: Location,
    goal: Location,
    neighbors: N,
    cost: C,
) -> Option<Vec<Location>>
where
    N: FnMut(Location) -> I,
    I: IntoIterator<Item = Location>,
    C: FnMut(Location, Location) -> u32,
{
    astar(start, goal, neighbors, cost, |_| 0)
}

/// The classic configuration: 4-directional unit-cost steps over a
/// caller-supplied passability predicate, Manhattan heuristic.
pub fn shortest_path<P>(start: Location, goal: Location, passable: P) -> Option<Vec<Location>>
where
    P: Fn(Location) -> bool,
{
    if !passable(goal) {
        return None;
    }

    astar(
        start,
        goal,
        |loc| {
            NEIGHBORS_4
                .iter()
                .filter_map(move |&(dx, dy)| loc.step(dx, dy))
                .filter(|&next| passable(next))
                .collect::<Vec<_>>()
        },
        |_, _| 1,
        |loc| loc.distance_to(goal),
    )
}

fn reconstruct_path(came_from: &FnvHashMap<Location, Location>, goal: Location) -> Vec<Location> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        current = prev;
        path.push(current);
    }
    path.reverse();
    path
}

/// BFS flood fill: every cell reachable from `start` (inclusive) through the
/// supplied neighbor enumeration.
pub fn flood_fill<N, I>(start: Location, mut neighbors: N) -> FnvHashSet<Location>
where
    N: FnMut(Location) -> I,
    I: IntoIterator<Item = Location>,
{
    let mut reached = FnvHashSet::default();
    let mut queue = VecDeque::new();

    reached.insert(start);
    queue.push_back(start);

    while let Some(loc) = queue.pop_front() {
        for next in neighbors(loc) {
            if reached.insert(next) {
                queue.push_back(next);
            }
        }
    }

    reached
}
