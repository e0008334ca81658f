//! Rotation helpers for the craft's Euler-angle orientation.
//!
//! Angles are stored in degrees.  The combined rotation is always composed as
//! `Rz(roll) · Ry(yaw) · Rx(pitch)`: applied to a vector, pitch acts first and
//! roll last.  Gimbal lock occurs at ±90° yaw.

use bevy::math::{DMat3, DVec3};

/// The craft's local forward direction.  Thrust moves along this axis.
pub const FORWARD: DVec3 = DVec3::new(0.0, 0.0, -1.0);

/// Rotation about the X axis (pitch).
///
/// ```text
/// | 1   0    0  |
/// | 0  cos -sin |
/// | 0  sin  cos |
/// ```
#[inline]
pub fn rotation_x(degrees: f64) -> DMat3 {
    DMat3::from_rotation_x(degrees.to_radians())
}

/// Rotation about the Y axis (yaw).
#[inline]
pub fn rotation_y(degrees: f64) -> DMat3 {
    DMat3::from_rotation_y(degrees.to_radians())
}

/// Rotation about the Z axis (roll).
#[inline]
pub fn rotation_z(degrees: f64) -> DMat3 {
    DMat3::from_rotation_z(degrees.to_radians())
}

/// `Rz(roll) · Ry(yaw) · Rx(pitch)`.
pub fn combined_rotation(pitch: f64, yaw: f64, roll: f64) -> DMat3 {
    rotation_z(roll) * rotation_y(yaw) * rotation_x(pitch)
}

/// World-space unit direction the craft faces for the given angles.
pub fn heading(pitch: f64, yaw: f64, roll: f64) -> DVec3 {
    combined_rotation(pitch, yaw, roll) * FORWARD
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_vec_eq(a: DVec3, b: DVec3) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-9);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-9);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-9);
    }

    #[test]
    fn zero_angles_face_negative_z() {
        assert_vec_eq(heading(0.0, 0.0, 0.0), FORWARD);
    }

    #[test]
    fn rotation_x_matches_textbook_layout() {
        let m = rotation_x(30.0);
        let (s, c) = 30f64.to_radians().sin_cos();
        // Column-major storage: y_axis is the second column.
        assert_vec_eq(m.x_axis, DVec3::new(1.0, 0.0, 0.0));
        assert_vec_eq(m.y_axis, DVec3::new(0.0, c, s));
        assert_vec_eq(m.z_axis, DVec3::new(0.0, -s, c));
    }

    #[test]
    fn yaw_ninety_turns_heading_to_negative_x() {
        // Ry(90) maps (0,0,-1) to (-1,0,0).
        assert_vec_eq(heading(0.0, 90.0, 0.0), DVec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn pitch_ninety_turns_heading_to_positive_y() {
        // Rx(90) maps (0,0,-1) to (0,1,0).
        assert_vec_eq(heading(90.0, 0.0, 0.0), DVec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn roll_alone_does_not_change_heading() {
        assert_vec_eq(heading(0.0, 0.0, 73.0), FORWARD);
    }

    #[test]
    fn composition_order_is_z_then_y_then_x() {
        let (p, y, r) = (20.0, 35.0, -50.0);
        let manual = rotation_z(r) * (rotation_y(y) * (rotation_x(p) * FORWARD));
        assert_vec_eq(heading(p, y, r), manual);

        // A different order gives a different answer for these angles.
        let reversed = rotation_x(p) * rotation_y(y) * rotation_z(r) * FORWARD;
        assert!((heading(p, y, r) - reversed).length() > 1e-3);
    }

    #[test]
    fn heading_stays_unit_length() {
        for &(p, y, r) in &[(13.0, 250.0, -77.0), (-400.0, 12.5, 3.0), (90.0, 90.0, 90.0)] {
            assert_abs_diff_eq!(heading(p, y, r).length(), 1.0, epsilon = 1e-12);
        }
    }
}
