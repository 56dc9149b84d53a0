//! Fixed-decimal float formatting
//!
//! Every float written into the output files goes through [`format_f32`],
//! which never produces scientific notation. The output is deterministic,
//! so re-exporting an unchanged scene yields byte-identical files.

use sceneforge_core::{ColorRgb, Vec2, Vec3};

/// Format a float as a fixed-decimal string.
///
/// Six fractional digits, trailing zeros trimmed down to at least one
/// (`1.0`, `0.25`, `-2.5`). Both zeros normalize to `0.0`.
pub fn format_f32(value: f32) -> String {
    if value == 0.0 {
        return "0.0".to_string();
    }

    let mut out = format!("{:.6}", value);
    while out.ends_with('0') && !out.ends_with(".0") {
        out.pop();
    }
    out
}

/// Format a row of floats as a space-separated string
pub fn format_row(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| format_f32(*v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a 3D vector as `x y z`
pub fn format_vec3(v: &Vec3) -> String {
    format_row(&[v.x, v.y, v.z])
}

/// Format a UV coordinate as `u v`
pub fn format_vec2(v: &Vec2) -> String {
    format_row(&[v.x, v.y])
}

/// Format a color as `r g b`
pub fn format_color(c: &ColorRgb) -> String {
    format_row(&[c.r, c.g, c.b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_trims_zeros() {
        assert_eq!(format_f32(1.0), "1.0");
        assert_eq!(format_f32(0.25), "0.25");
        assert_eq!(format_f32(-2.5), "-2.5");
        assert_eq!(format_f32(0.125), "0.125");
    }

    #[test]
    fn test_format_zero_normalized() {
        assert_eq!(format_f32(0.0), "0.0");
        assert_eq!(format_f32(-0.0), "0.0");
    }

    #[test]
    fn test_format_small_values_not_scientific() {
        let s = format_f32(0.000001);
        assert!(!s.contains('e') && !s.contains('E'));
        assert_eq!(s, "0.000001");
    }

    #[test]
    fn test_format_row() {
        assert_eq!(format_row(&[1.0, 0.0, 0.0, 0.0]), "1.0 0.0 0.0 0.0");
    }

    #[test]
    fn test_format_vec_and_color() {
        assert_eq!(format_vec3(&Vec3::new(1.0, 2.0, 3.0)), "1.0 2.0 3.0");
        assert_eq!(format_vec2(&Vec2::new(0.5, 1.0)), "0.5 1.0");
        assert_eq!(format_color(&ColorRgb::new(1.0, 0.5, 0.0)), "1.0 0.5 0.0");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn format_never_scientific(value in -1.0e6f32..1.0e6) {
                let s = format_f32(value);
                prop_assert!(!s.contains('e'));
                prop_assert!(!s.contains('E'));
            }

            #[test]
            fn format_parses_back(value in -1.0e6f32..1.0e6) {
                let s = format_f32(value);
                let parsed: f32 = s.parse().unwrap();
                prop_assert!((parsed - value).abs() <= 1e-5f32.max(value.abs() * 1e-5));
            }
        }
    }
}
