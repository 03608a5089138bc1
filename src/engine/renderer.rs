/// Sphere-tracing renderer.
///
/// Per pixel: build the orbit camera basis, fire a 2×2 grid of sub-pixel
/// rays, sphere-trace each against the Julia distance estimator, shade hits
/// with the iridescent material, average, then apply the vignette. Scanlines
/// are interleaved across workers so N host workers split a frame without
/// coordination.

use crate::engine::types::{FrameParams, Vec3D};
use crate::formulas::julia::{animated_constant, julia_de, julia_normal};
use crate::formulas::OrbitTrap;
use crate::lighting::material;
use crate::math::math3d::{
    mat3_mul_vec, mat3_rotate_xyz, vec3d_add, vec3d_cross, vec3d_normalized, vec3d_scale, Quat,
};
use crate::math::utils::float_to_byte;

/// Sphere-tracing step cap per ray.
pub const MAX_STEPS: u32 = 300;
/// Surface-contact threshold on the distance estimate.
pub const MIN_DISTANCE: f64 = 0.001;
/// Maximum ray travel distance.
pub const MAX_DISTANCE: f64 = 10.0;

/// Animation clock speed relative to host seconds.
const TIME_SCALE: f64 = 0.15;
/// Per-sample display exponent applied before averaging.
const SAMPLE_GAMMA: f64 = 1.4545;

/// Result of a single ray trace.
#[derive(Clone, Copy, Debug)]
pub struct TraceResult {
    /// Did the ray reach the surface?
    pub hit: bool,
    /// Total distance traveled along the ray.
    pub t: f64,
    /// Orbit trap from the last distance estimate.
    pub trap: OrbitTrap,
}

/// Orbit camera frame for one rendered image.
#[derive(Clone, Copy, Debug)]
pub struct CameraBasis {
    pub origin: Vec3D,
    pub right: Vec3D,
    pub up: Vec3D,
    pub forward: Vec3D,
}

/// Sphere-trace a ray against the Julia set of `c`.
///
/// A ray whose accumulated distance stays below [`MAX_DISTANCE`] counts as
/// a hit, even when all [`MAX_STEPS`] steps run out before the estimate
/// falls under the contact threshold.
pub fn intersect(ro: &Vec3D, rd: &Vec3D, c: &Quat) -> TraceResult {
    let mut trap = OrbitTrap::default();
    let mut h = 1.0;
    let mut t = 0.0;

    for _ in 0..MAX_STEPS {
        if h < MIN_DISTANCE || t > MAX_DISTANCE {
            break;
        }
        let r = julia_de(&vec3d_add(ro, &vec3d_scale(rd, t)), c);
        h = r.de;
        trap = r.trap;
        t += h;
    }

    TraceResult { hit: t < MAX_DISTANCE, t, trap }
}

/// Build the camera frame from the host pose.
///
/// The eye starts at (0, 0, distance) and is rotated by the accumulated
/// orbit angles (X, then Y, then Z); the look-at target is the world origin.
/// A slow time-driven roll tilts the up reference.
pub fn camera_basis(params: &FrameParams, anim_t: f64) -> CameraBasis {
    let rot = mat3_rotate_xyz(params.rotation.x, params.rotation.y, params.rotation.z);
    let origin = mat3_mul_vec(&rot, &Vec3D { x: 0.0, y: 0.0, z: params.distance });

    let forward = vec3d_normalized(&vec3d_scale(&origin, -1.0));

    let roll = 0.1 * (0.1 * anim_t).cos();
    let up_ref = Vec3D { x: roll.sin(), y: roll.cos(), z: 0.0 };

    let right = vec3d_normalized(&vec3d_cross(&forward, &up_ref));
    let up = vec3d_normalized(&vec3d_cross(&right, &forward));

    CameraBasis { origin, right, up, forward }
}

/// Ray direction through fragment coordinates (sub-pixel offsets included).
/// Fragment space is bottom-up; the screen plane sits at focal length 2 in
/// units of half the image height.
pub fn sample_direction(basis: &CameraBasis, width: u32, height: u32, frag_x: f64, frag_y: f64) -> Vec3D {
    let w = width as f64;
    let h = height as f64;
    let px = (-w + 2.0 * frag_x) / h;
    let py = (-h + 2.0 * frag_y) / h;

    vec3d_normalized(&Vec3D {
        x: px * basis.right.x + py * basis.up.x + 2.0 * basis.forward.x,
        y: px * basis.right.y + py * basis.up.y + 2.0 * basis.forward.y,
        z: px * basis.right.z + py * basis.up.z + 2.0 * basis.forward.z,
    })
}

/// Trace and shade a single ray, returning display-space color.
pub fn shade_ray(params: &FrameParams, ro: &Vec3D, rd: &Vec3D, c: &Quat) -> (f64, f64, f64) {
    let tr = intersect(ro, rd, c);

    let col = if tr.hit {
        let pos = vec3d_add(ro, &vec3d_scale(rd, tr.t));
        let normal = julia_normal(&pos, c);
        material::iridescent(ro, rd, &pos, &normal, &params.light_pos)
    } else {
        params.background
    };

    (
        col.0.powf(SAMPLE_GAMMA),
        col.1.powf(SAMPLE_GAMMA),
        col.2.powf(SAMPLE_GAMMA),
    )
}

/// Render one output pixel at fragment coordinates (bottom-up row order):
/// 2×2 supersampling grid, averaged, then the vignette factor.
pub fn render_pixel(
    params: &FrameParams,
    c: &Quat,
    basis: &CameraBasis,
    frag_x: f64,
    frag_y: f64,
) -> (f64, f64, f64) {
    let mut col = (0.0, 0.0, 0.0);

    for j in 0..2 {
        for i in 0..2 {
            let rd = sample_direction(
                basis,
                params.width,
                params.height,
                frag_x + i as f64 / 2.0,
                frag_y + j as f64 / 2.0,
            );
            let s = shade_ray(params, &basis.origin, &rd, c);
            col.0 += s.0;
            col.1 += s.1;
            col.2 += s.2;
        }
    }

    col.0 /= 4.0;
    col.1 /= 4.0;
    col.2 /= 4.0;

    let u = frag_x / params.width as f64;
    let v = frag_y / params.height as f64;
    let vignette = 1.0 + 0.9 * (6.0 * u * v * (1.0 - u) * (1.0 - v)).powf(16.0);

    (col.0 * vignette, col.1 * vignette, col.2 * vignette)
}

/// Render this worker's share of scanlines into a pre-allocated RGBA buffer.
///
/// Rows are interleaved: worker `i` of `n` renders rows `i, i+n, i+2n, …`
/// (top-down image order). Returns the number of rows rendered.
pub fn render_scanlines(
    params: &FrameParams,
    rgba_out: &mut [u8],
    worker_id: u32,
    worker_count: u32,
) -> u32 {
    let w = params.width;
    let h = params.height;
    let worker_count = worker_count.max(1);

    let anim_t = params.time * TIME_SCALE;
    let c = animated_constant(anim_t);
    let basis = camera_basis(params, anim_t);

    let mut rows_rendered = 0u32;
    let mut y = worker_id;
    while y < h {
        // Image rows run top-down; fragment rows run bottom-up.
        let frag_y = (h - 1 - y) as f64;
        for x in 0..w {
            let (r, g, b) = render_pixel(params, &c, &basis, x as f64, frag_y);

            let idx = (y as usize * w as usize + x as usize) * 4;
            if idx + 3 < rgba_out.len() {
                rgba_out[idx] = float_to_byte(r);
                rgba_out[idx + 1] = float_to_byte(g);
                rgba_out[idx + 2] = float_to_byte(b);
                rgba_out[idx + 3] = 255;
            }
        }
        rows_rendered += 1;
        y += worker_count;
    }

    log::debug!("worker {worker_id}/{worker_count} rendered {rows_rendered} rows");
    rows_rendered
}
