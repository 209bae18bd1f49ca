//! Small geometry helpers shared by the placers.

use super::point::PointF;
use std::f32::consts::TAU;

/// Mean of a set of points, or the origin if there are none.
pub fn center<I: IntoIterator<Item = PointF>>(points: I) -> PointF {
    let mut n = 0usize;
    let sum: PointF = points.into_iter().inspect(|_| n += 1).sum();
    if n == 0 {
        PointF::default()
    } else {
        sum / n as f32
    }
}
/// Wrap an angle into `[0, 2π)`.
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}
