//! Constant-speed collision helpers.

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;
use crate::math::solve_quadratic;

/// A moving disk: a position, a speed per time unit and a radius. All
/// operations return a new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    pub position: Vec2,
    pub speed: Vec2,
    pub radius: f64,
}

impl Disk {
    pub fn new(position: Vec2, speed: Vec2, radius: f64) -> Self {
        Self { position, speed, radius }
    }

    /// Advance the position by one time unit of speed.
    pub fn step(self) -> Disk {
        Disk { position: self.position + self.speed, ..self }
    }

    /// Add an acceleration vector to the speed.
    pub fn accelerate(self, acceleration: Vec2) -> Disk {
        Disk { speed: self.speed + acceleration, ..self }
    }

    /// Scale the speed by a factor; factors below 1 decelerate.
    pub fn accelerate_by(self, factor: f64) -> Disk {
        Disk { speed: self.speed * factor, ..self }
    }

    /// Whether the two disks, both keeping a constant speed, will touch.
    pub fn will_collide(self, other: Disk) -> bool {
        let to_other = other.position - self.position;
        let relative_speed = self.speed - other.speed;
        if relative_speed.length2() <= 0.0 {
            // No relative movement.
            return false;
        }
        if to_other.dot(relative_speed) < 0.0 {
            // Moving apart.
            return false;
        }
        relative_speed.norm().ortho().dot(to_other).abs() <= self.radius + other.radius
    }

    /// Earliest time at which the two circles touch, each disk moving at its
    /// constant speed. `Some(0.0)` when they already overlap, `None` when
    /// they never meet.
    pub fn collision_time(self, other: Disk) -> Option<f64> {
        let to_other = other.position - self.position;
        let collision_distance = self.radius + other.radius;
        if to_other.length2() <= collision_distance * collision_distance {
            return Some(0.0);
        }
        let relative_speed = self.speed - other.speed;

        // Distance between centers equals the collision distance when
        // |to_other - t * relative_speed| = collision_distance.
        let a = relative_speed.length2();
        let b = -2.0 * relative_speed.dot(to_other);
        let c = to_other.length2() - collision_distance * collision_distance;

        let roots = solve_quadratic(a, b, c);
        match roots.as_slice() {
            [] => None,
            [root] => (root.re >= 0.0).then_some(root.re),
            [first, second] => {
                if !first.is_real() {
                    return None;
                }
                if first.re >= 0.0 {
                    Some(first.re)
                } else if second.re >= 0.0 {
                    Some(second.re)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}
