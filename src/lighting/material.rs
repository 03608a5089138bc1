/// Iridescent surface material.
///
/// The base layer samples the spectrum palette on a perturbed normal·eye
/// product, so the hue shifts with viewing angle. Two specular curves are
/// layered on top of it: a narrow banded highlight and a broad sheen, both
/// driven by reflection·light. A dome term darkens downward-facing surfaces.

use super::palette::spectrum;
use crate::engine::types::Vec3D;
use crate::math::math3d::{vec3d_add, vec3d_dot, vec3d_normalized, vec3d_reflect, vec3d_scale, vec3d_sub};
use crate::math::utils::clamp;

const GAMMA: f64 = 2.2;

/// Raise each channel to the power `g`.
fn gamma(color: (f64, f64, f64), g: f64) -> (f64, f64, f64) {
    (color.0.powf(g), color.1.powf(g), color.2.powf(g))
}

/// Map linear light to display space (inverse gamma).
pub fn linear_to_screen(linear_rgb: (f64, f64, f64)) -> (f64, f64, f64) {
    gamma(linear_rgb, 1.0 / GAMMA)
}

/// Shade a hit point. `ray_dir` is the incoming ray direction; `normal` must
/// be unit length.
pub fn iridescent(
    ray_origin: &Vec3D,
    ray_dir: &Vec3D,
    pos: &Vec3D,
    normal: &Vec3D,
    light_pos: &Vec3D,
) -> (f64, f64, f64) {
    let eye_dir = vec3d_normalized(&vec3d_sub(ray_origin, pos));
    let light_dir = vec3d_normalized(&vec3d_sub(light_pos, pos));

    let reflection = vec3d_reflect(ray_dir, normal);
    let dome = Vec3D { x: 0.0, y: 1.0, z: 0.0 };

    // Base layer: spectrum sampled on a position-perturbed normal so the
    // hue shimmers across the surface.
    let perturb = Vec3D {
        x: (pos.x * 10.0).sin(),
        y: (pos.y * 10.0).sin(),
        z: (pos.z * 10.0).sin(),
    };
    let shifted = vec3d_add(normal, &vec3d_scale(&perturb, 0.01));
    let base = spectrum(vec3d_dot(&shifted, &eye_dir) * 2.0);

    // Banded highlight plus broad sheen.
    let r_dot_l = clamp(vec3d_dot(&reflection, &light_dir), 0.0, 1.0);
    let mut specular = ((r_dot_l * 20.0 - 3.0).sin() * 0.5 + 0.5 + 0.1).powf(32.0) * r_dot_l;
    specular *= 0.1;
    specular += (r_dot_l + 0.3).powf(8.0) * 0.1;

    let shadow = clamp(vec3d_dot(normal, &dome) * 0.5 + 1.2, 0.0, 1.0);

    linear_to_screen((
        base.0 * shadow + specular,
        base.1 * shadow + specular,
        base.2 * shadow + specular,
    ))
}
