use nalgebra::{Quaternion, Rotation3, UnitQuaternion, Vector3};

/// Intrinsic X-then-Y-then-Z Euler angles of the rotation described by a
/// `(w, x, y, z)` quaternion.
///
/// The quaternion is normalized before conversion. The decomposition is not
/// unique at gimbal lock (|pitch| = pi/2); the zero-yaw branch is returned
/// there. Any valid branch reconstructs the same rotation, so point
/// membership tests built on the result are unaffected.
pub fn euler_from_quaternion(w: f32, x: f32, y: f32, z: f32) -> [f32; 3] {
    let rot = UnitQuaternion::from_quaternion(Quaternion::new(w, x, y, z)).to_rotation_matrix();
    let m = rot.matrix();

    let sin_pitch = m[(0, 2)].clamp(-1.0, 1.0);
    let pitch = sin_pitch.asin();

    if sin_pitch.abs() < 1.0 - 1e-6 {
        let roll = (-m[(1, 2)]).atan2(m[(2, 2)]);
        let yaw = (-m[(0, 1)]).atan2(m[(0, 0)]);
        [roll, pitch, yaw]
    } else {
        // Gimbal lock: roll and yaw act about the same axis, fold into roll.
        let roll = m[(2, 1)].atan2(m[(1, 1)]);
        [roll, pitch, 0.0]
    }
}

/// Oriented crop region: an axis-aligned `[min, max]` range in a local frame
/// placed in the world by a translation and a rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct CropBox {
    min: [f32; 3],
    max: [f32; 3],
    translation: Vector3<f32>,
    rotation: Rotation3<f32>,
}

impl CropBox {
    /// An axis-aligned box at the origin with the given local-frame bounds.
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self {
            min,
            max,
            translation: Vector3::zeros(),
            rotation: Rotation3::identity(),
        }
    }

    /// Place the box's local frame at the given world position.
    pub fn with_translation(mut self, translation: [f32; 3]) -> Self {
        self.translation = Vector3::from(translation);
        self
    }

    /// Orient the box's local frame by intrinsic X-then-Y-then-Z Euler angles.
    pub fn with_rotation(mut self, euler: [f32; 3]) -> Self {
        let [rx, ry, rz] = euler;
        self.rotation = Rotation3::from_axis_angle(&Vector3::x_axis(), rx)
            * Rotation3::from_axis_angle(&Vector3::y_axis(), ry)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), rz);
        self
    }

    pub fn min(&self) -> [f32; 3] {
        self.min
    }

    pub fn max(&self) -> [f32; 3] {
        self.max
    }

    /// Whether a world-space point falls inside the box.
    ///
    /// The point is mapped into the box's local frame (inverse translation,
    /// then inverse rotation) and compared against the bounds, inclusive on
    /// both ends. Non-finite coordinates are never contained.
    pub fn contains(&self, point: [f32; 3]) -> bool {
        if !point.iter().all(|v| v.is_finite()) {
            return false;
        }

        let local = self
            .rotation
            .inverse_transform_vector(&(Vector3::from(point) - self.translation));

        (0..3).all(|axis| local[axis] >= self.min[axis] && local[axis] <= self.max[axis])
    }
}
