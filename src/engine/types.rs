/// Core engine types and the per-frame parameter record exchanged with the
/// host over a flat f64 buffer.

use super::camera::{MAX_CAMERA_DISTANCE, MIN_CAMERA_DISTANCE};
use crate::error::RenderError;
use crate::math::utils;

/// 3D vector with f64 precision.
#[repr(C, align(16))]
#[derive(Clone, Copy, Default, Debug)]
pub struct Vec3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 3×3 rotation matrix.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug)]
pub struct Matrix3 {
    pub m: [[f64; 3]; 3],
}

/// Number of f64 values in a serialized frame parameter buffer.
pub const FRAME_PARAM_COUNT: usize = 13;

/// Everything the renderer needs for one frame, supplied by the host.
///
/// Buffer layout:
/// `[width, height, time, rot_x, rot_y, rot_z, distance,
///   light_x, light_y, light_z, bg_r, bg_g, bg_b]`
#[derive(Clone, Debug)]
pub struct FrameParams {
    /// Image dimensions in pixels
    pub width: u32,
    pub height: u32,
    /// Elapsed time in seconds (monotonic host clock)
    pub time: f64,
    /// Camera rotation angles in radians, applied X → Y → Z
    pub rotation: Vec3D,
    /// Orbit distance from the origin, within [1.0, 10.0]
    pub distance: f64,
    /// Light position in world space
    pub light_pos: Vec3D,
    /// Background color, each channel in [0, 1]
    pub background: (f64, f64, f64),
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1920,
            time: 0.0,
            rotation: Vec3D::default(),
            distance: 3.0,
            light_pos: Vec3D { x: 2.0, y: 2.0, z: 2.0 },
            background: (1.0, 1.0, 1.0),
        }
    }
}

impl FrameParams {
    /// Parse a frame parameter buffer. Out-of-range distance and background
    /// values are clamped to their documented ranges.
    pub fn from_buffer(data: &[f64]) -> Result<Self, RenderError> {
        if data.len() < FRAME_PARAM_COUNT {
            return Err(RenderError::ParamBufferTooShort {
                got: data.len(),
                need: FRAME_PARAM_COUNT,
            });
        }

        let width = data[0] as u32;
        let height = data[1] as u32;
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidResolution { width, height });
        }

        Ok(FrameParams {
            width,
            height,
            time: data[2],
            rotation: Vec3D { x: data[3], y: data[4], z: data[5] },
            distance: utils::clamp(data[6], MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE),
            light_pos: Vec3D { x: data[7], y: data[8], z: data[9] },
            background: (
                utils::clamp(data[10], 0.0, 1.0),
                utils::clamp(data[11], 0.0, 1.0),
                utils::clamp(data[12], 0.0, 1.0),
            ),
        })
    }

    /// Serialize into the flat buffer layout understood by `from_buffer`.
    pub fn to_buffer(&self) -> Vec<f64> {
        vec![
            self.width as f64,
            self.height as f64,
            self.time,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
            self.distance,
            self.light_pos.x,
            self.light_pos.y,
            self.light_pos.z,
            self.background.0,
            self.background.1,
            self.background.2,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_round_trip() {
        let params = FrameParams {
            width: 640,
            height: 480,
            time: 12.5,
            rotation: Vec3D { x: 0.1, y: -0.2, z: 0.3 },
            distance: 4.5,
            light_pos: Vec3D { x: 2.0, y: 3.0, z: -1.0 },
            background: (0.25, 0.5, 0.75),
        };
        let buf = params.to_buffer();
        assert_eq!(buf.len(), FRAME_PARAM_COUNT);

        let back = FrameParams::from_buffer(&buf).unwrap();
        assert_eq!(back.width, 640);
        assert_eq!(back.height, 480);
        assert_eq!(back.time, 12.5);
        assert_eq!(back.rotation.y, -0.2);
        assert_eq!(back.distance, 4.5);
        assert_eq!(back.light_pos.z, -1.0);
        assert_eq!(back.background, (0.25, 0.5, 0.75));
    }

    #[test]
    fn test_short_buffer_rejected() {
        let err = FrameParams::from_buffer(&[100.0, 100.0, 0.0]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("too short"), "unexpected error: {msg}");
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let mut buf = FrameParams::default().to_buffer();
        buf[0] = 0.0;
        assert!(FrameParams::from_buffer(&buf).is_err());
    }

    #[test]
    fn test_distance_and_background_clamped() {
        let mut buf = FrameParams::default().to_buffer();
        buf[6] = 25.0;
        buf[10] = -0.5;
        buf[12] = 1.5;
        let params = FrameParams::from_buffer(&buf).unwrap();
        assert_eq!(params.distance, MAX_CAMERA_DISTANCE);
        assert_eq!(params.background.0, 0.0);
        assert_eq!(params.background.2, 1.0);
    }

    #[test]
    fn test_defaults_match_host_sketch() {
        let params = FrameParams::default();
        assert_eq!(params.distance, 3.0);
        assert_eq!(params.background, (1.0, 1.0, 1.0));
        assert_eq!(params.light_pos.x, 2.0);
    }
}
