//! Local perturbations of an existing path.
//!
//! Each operator either leaves the path untouched or produces a path that
//! still satisfies the step-range and segment-validity invariant with the
//! same number of points.

use rand::Rng;

use super::PathGenerator;
use crate::env::Environment;
use crate::geometry::Point;

impl PathGenerator {
    /// Returns a perturbed copy of `path` after one to three mutation passes.
    pub fn mutate(&mut self, path: &[Point], env: &Environment) -> Vec<Point> {
        let mut mutated = path.to_vec();
        if mutated.is_empty() {
            return mutated;
        }

        let passes = self.rng.gen_range(1..=3);
        // a failed skip falls through to swap, a failed swap to replace
        for _ in 0..passes {
            if self.rng.gen_bool(0.5) && self.try_skip(&mut mutated, env) {
                continue;
            }
            if self.rng.gen_bool(0.5) && self.try_swap(&mut mutated, env) {
                continue;
            }
            self.replace_point(&mut mutated, env);
        }

        mutated
    }

    /// Drops an interior point whose neighbours connect directly and appends
    /// a fresh step at the tail. The first and last points are never removed.
    /// One draw in `k + 1` first tries to insert a midpoint, where `k` is the
    /// number of interior points.
    pub(crate) fn try_skip(&mut self, path: &mut Vec<Point>, env: &Environment) -> bool {
        if path.is_empty() {
            return false;
        }

        let removable = path.len().saturating_sub(2);
        let offset = self.rng.gen_range(0..=removable);
        if offset == removable && self.try_insert(path, env) {
            return true;
        }

        for i in 0..removable {
            let candidate = 1 + (i + offset) % removable;
            let previous = path[candidate - 1];
            if self.is_valid_segment(previous, path[candidate + 1], env) {
                path.remove(candidate);
                let tail = path.last().copied().unwrap_or(env.start_point());
                let step = self.free_step(tail, env);
                path.push(step);
                return true;
            }
        }
        false
    }

    /// Splits a random segment at its midpoint and drops the last point.
    fn try_insert(&mut self, path: &mut Vec<Point>, env: &Environment) -> bool {
        let index = self.rng.gen_range(0..path.len());
        let previous = predecessor(path, index, env);
        let midpoint = previous.midpoint(path[index]);

        if !self.is_valid_segment(previous, midpoint, env)
            || !self.is_valid_segment(midpoint, path[index], env)
        {
            return false;
        }

        path.insert(index, midpoint);
        path.pop();
        true
    }

    /// Exchanges the first adjacent pair, scanning from a random position,
    /// whose three affected segments all hold.
    pub(crate) fn try_swap(&mut self, path: &mut [Point], env: &Environment) -> bool {
        if path.len() < 2 {
            return false;
        }

        let pairs = path.len() - 1;
        let offset = self.rng.gen_range(0..pairs);
        for i in 0..pairs {
            let first = (i + offset) % pairs;
            let previous = predecessor(path, first, env);
            let (a, b) = (path[first], path[first + 1]);

            let linked = self.is_valid_segment(previous, b, env)
                && self.is_valid_segment(b, a, env)
                && path
                    .get(first + 2)
                    .is_none_or(|&next| self.is_valid_segment(a, next, env));
            if linked {
                path.swap(first, first + 1);
                return true;
            }
        }
        false
    }

    /// Moves one point, either resampled from its predecessor or nudged
    /// around its current position. Reverts after the configured retries.
    pub(crate) fn replace_point(&mut self, path: &mut [Point], env: &Environment) -> bool {
        if path.is_empty() {
            return false;
        }

        let range = env.step_range();
        let index = self.rng.gen_range(0..path.len());
        let previous = predecessor(path, index, env);
        let current = path[index];
        let next = path.get(index + 1).copied();

        for _ in 0..self.replace_attempts {
            let candidate = if self.rng.gen_bool(0.5) {
                self.next_position(previous, previous, range, env)
            } else {
                let allowed = (range - previous.distance(current)).max(range / 5.0);
                self.next_position(current, previous, allowed, env)
            };

            let accepted = self.is_valid_segment(previous, candidate, env)
                && next.is_none_or(|next| self.is_valid_segment(candidate, next, env));
            if accepted {
                path[index] = candidate;
                return true;
            }
        }
        false
    }
}

/// Point preceding `index`, with the start point before the first.
fn predecessor(path: &[Point], index: usize, env: &Environment) -> Point {
    index
        .checked_sub(1)
        .map_or(env.start_point(), |previous| path[previous])
}
