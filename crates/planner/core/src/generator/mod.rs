//! Candidate path construction and perturbation.
//!
//! Every path produced here is structurally valid: consecutive points (with
//! the environment's start point preceding the first) are within step range,
//! and evenly spaced samples along every segment satisfy the validity oracle.
//! Failed attempts stall instead of erroring: the previous point is kept and
//! construction carries on.

mod mutations;

use std::f64::consts::TAU;

use rand::Rng;
use rand::rngs::SmallRng;

use crate::config::PlannerSettings;
use crate::env::Environment;
use crate::geometry::Point;

/// Radius decay applied between free-step retries.
const RADIUS_DECAY: f64 = 0.99;

/// Fraction of the step range used by a biased step, keeping the endpoint
/// strictly inside the range after rounding.
const BIASED_STEP_FRACTION: f64 = 0.999;

/// Produces and mutates candidate paths using a worker-owned RNG.
pub struct PathGenerator {
    rng: SmallRng,
    /// Segment samples including the endpoint.
    segment_samples: usize,
    step_attempts: usize,
    replace_attempts: usize,
}

impl PathGenerator {
    pub fn new(settings: &PlannerSettings, rng: SmallRng) -> Self {
        Self {
            rng,
            segment_samples: settings.validated_intermediate_points + 1,
            step_attempts: settings.step_attempts.max(1),
            replace_attempts: settings.replace_attempts.max(1),
        }
    }

    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// Checks that `to` is reachable from `from` in one step.
    pub fn is_valid_segment(&self, from: Point, to: Point, env: &Environment) -> bool {
        let range = env.step_range();
        if !from.within(to, range) {
            return false;
        }

        let samples = self.segment_samples as f64;
        (1..=self.segment_samples).all(|i| env.is_valid(from.lerp(to, i as f64 / samples)))
    }

    /// Builds a fresh path of `env.path_length()` points.
    ///
    /// Half of the time the path first walks toward a random reward site; the
    /// remaining slots are filled with free exploratory steps.
    pub fn build_path(&mut self, env: &Environment) -> Vec<Point> {
        let length = env.path_length();
        let mut path = Vec::with_capacity(length);

        if !env.reward_sites().is_empty() && self.rng.gen_bool(0.5) {
            let index = self.rng.gen_range(0..env.reward_sites().len());
            let target = env.reward_sites()[index].position;
            self.walk_toward(target, &mut path, env);
        }

        let mut current = path.last().copied().unwrap_or(env.start_point());
        while path.len() < length {
            current = self.free_step(current, env);
            path.push(current);
        }

        path
    }

    /// Appends straight steps toward `target` until it can be collected,
    /// the path is full, or a step fails validation.
    fn walk_toward(&mut self, target: Point, path: &mut Vec<Point>, env: &Environment) {
        let range = env.step_range();
        let mut current = env.start_point();

        let radius = env.activation_radius();
        while path.len() < env.path_length() && !current.strictly_within(target, radius) {
            let offset = target - current;
            let distance = offset.length();
            let next = if distance < range {
                target
            } else {
                current + offset * (range * BIASED_STEP_FRACTION / distance)
            };

            if !self.is_valid_segment(current, next, env) {
                break;
            }
            path.push(next);
            current = next;
        }
    }

    /// A free step from `from` using the full step range.
    pub fn free_step(&mut self, from: Point, env: &Environment) -> Point {
        self.next_position(from, from, env.step_range(), env)
    }

    /// Samples a point around `origin` that forms a valid segment from `anchor`.
    ///
    /// The radius shrinks by [`RADIUS_DECAY`] per attempt; after the last
    /// attempt `origin` itself is returned (a stall).
    fn next_position(
        &mut self,
        origin: Point,
        anchor: Point,
        radius: f64,
        env: &Environment,
    ) -> Point {
        let mut attempt_radius = radius;
        for _ in 0..self.step_attempts {
            attempt_radius *= RADIUS_DECAY;
            let candidate = origin + self.random_offset(attempt_radius);
            if self.is_valid_segment(anchor, candidate, env) {
                return candidate;
            }
        }
        origin
    }

    /// Random direction with a length biased toward `radius`.
    fn random_offset(&mut self, radius: f64) -> Point {
        let length = if self.rng.gen_bool(0.5) {
            radius
        } else {
            let (u1, u2): (f64, f64) = (self.rng.r#gen(), self.rng.r#gen());
            u1.max(u2) * radius
        };
        let angle = self.rng.gen_range(0.0..TAU);
        Point::from_polar(angle, length)
    }
}
