/// SIMD-accelerated vector and matrix types from `glam`.
///
/// This module re-exports everything from [`glam`]. Use these types for CPU-side
/// calculations: layout cursors, animation state, billboard transforms.
///
/// # Examples
///
/// ```
/// use ember_core::math::{Vec3, Mat4};
///
/// let translation = Vec3::new(0.0, 0.0, -6.0);
/// let transform = Mat4::from_translation(translation);
/// assert_eq!(transform.transform_point3(Vec3::ZERO), translation);
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::*;
}

/// Packed vector types for vertex buffers.
///
/// These are `#[repr(C)]` and [`bytemuck::Pod`], so slices of them (or of
/// structs made of them) can be handed to a native draw call as raw floats.
///
/// ```
/// use ember_core::math::{PackedVec3, Vec3};
/// use bytemuck::cast_slice;
///
/// let corners = [PackedVec3::from(Vec3::X), PackedVec3::from(Vec3::Y)];
/// let floats: &[f32] = cast_slice(&corners);
/// assert_eq!(floats, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
/// ```
pub mod packed {
    use bytemuck::{Pod, Zeroable};

    /// A 2D vector with guaranteed `#[repr(C)]` layout (8 bytes).
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec2 {
        pub x: f32,
        pub y: f32,
    }

    /// A 3D vector with guaranteed `#[repr(C)]` layout (12 bytes).
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec3 {
        pub x: f32,
        pub y: f32,
        pub z: f32,
    }

    /// A 4D vector with guaranteed `#[repr(C)]` layout (16 bytes).
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec4 {
        pub x: f32,
        pub y: f32,
        pub z: f32,
        pub w: f32,
    }

    impl Vec2 {
        pub const fn new(x: f32, y: f32) -> Self {
            Self { x, y }
        }
    }

    impl Vec3 {
        pub const fn new(x: f32, y: f32, z: f32) -> Self {
            Self { x, y, z }
        }
    }

    impl Vec4 {
        pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
            Self { x, y, z, w }
        }
    }

    impl From<glam::Vec2> for Vec2 {
        fn from(v: glam::Vec2) -> Self {
            Self::new(v.x, v.y)
        }
    }

    impl From<Vec2> for glam::Vec2 {
        fn from(v: Vec2) -> Self {
            glam::Vec2::new(v.x, v.y)
        }
    }

    impl From<glam::Vec3> for Vec3 {
        fn from(v: glam::Vec3) -> Self {
            Self::new(v.x, v.y, v.z)
        }
    }

    impl From<Vec3> for glam::Vec3 {
        fn from(v: Vec3) -> Self {
            glam::Vec3::new(v.x, v.y, v.z)
        }
    }

    impl From<glam::Vec4> for Vec4 {
        fn from(v: glam::Vec4) -> Self {
            Self::new(v.x, v.y, v.z, v.w)
        }
    }

    impl From<Vec4> for glam::Vec4 {
        fn from(v: Vec4) -> Self {
            glam::Vec4::new(v.x, v.y, v.z, v.w)
        }
    }

    static_assertions::assert_eq_size!(Vec2, [f32; 2]);
    static_assertions::assert_eq_size!(Vec3, [f32; 3]);
    static_assertions::assert_eq_size!(Vec4, [f32; 4]);
}

pub use fast::*;
pub use packed::{Vec2 as PackedVec2, Vec3 as PackedVec3, Vec4 as PackedVec4};

/// Build a transform that places an object at `pos` facing the camera.
///
/// The object's local Z axis points at `camera_pos`, and its local Y axis is
/// as close to `camera_up` as the facing allows.
pub fn billboard(pos: Vec3, camera_pos: Vec3, camera_up: Vec3) -> Mat4 {
    let look = (camera_pos - pos).normalize();
    let right = camera_up.cross(look);
    let up = look.cross(right);

    Mat4::from_cols(
        right.extend(0.0),
        up.extend(0.0),
        look.extend(0.0),
        pos.extend(1.0),
    )
}

/// Rotation about the Y axis that cancels the yaw of `view`.
///
/// Only the third row of `view` is read. Pitch and roll are left untouched,
/// so sprites stay upright.
pub fn y_billboard(view: Mat4) -> Mat4 {
    let forward = view.row(2);
    Mat4::from_rotation_y(forward.x.atan2(forward.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec3_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_billboard_faces_camera() {
        let pos = Vec3::new(1.0, 0.0, 0.0);
        let camera = Vec3::new(1.0, 0.0, 5.0);
        let m = billboard(pos, camera, Vec3::Y);

        assert_vec3_near(m.transform_point3(Vec3::ZERO), pos);
        assert_vec3_near(m.transform_vector3(Vec3::Z), Vec3::Z);
        assert_vec3_near(m.transform_vector3(Vec3::Y), Vec3::Y);
    }

    #[test]
    fn test_y_billboard_identity() {
        let m = y_billboard(Mat4::IDENTITY);
        assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_y_billboard_cancels_yaw() {
        let view = Mat4::from_rotation_y(0.75);
        let m = y_billboard(view);
        assert!((view * m).abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn test_packed_roundtrip() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let packed = PackedVec4::from(v);
        assert_eq!(Vec4::from(packed), v);
    }
}
