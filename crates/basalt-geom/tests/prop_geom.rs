use basalt_geom::{lerp, Rgba, Vec3};
use proptest::num::f32::NORMAL;
use proptest::prelude::*;
use proptest::strategy::Strategy;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn approx_abs_rel(a: f32, b: f32, atol: f32, rtol: f32) -> bool {
    let diff = (a - b).abs();
    let scale = a.abs().max(b.abs());
    diff <= atol + rtol * scale
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e6)
}

fn unit_f32() -> impl Strategy<Value = f32> {
    (0u32..=1000).prop_map(|v| v as f32 / 1000.0)
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn arb_color() -> impl Strategy<Value = Rgba> {
    (unit_f32(), unit_f32(), unit_f32(), unit_f32()).prop_map(|(r, g, b, a)| Rgba::new(r, g, b, a))
}

proptest! {
    // distance_squared is symmetric, zero on the diagonal, and equals |a-b|^2
    #[test]
    fn distance_squared_consistency(a in arb_vec3(), b in arb_vec3()) {
        let d = a.distance_squared(b);
        prop_assert!(d >= 0.0);
        prop_assert!(approx_abs_rel(d, b.distance_squared(a), 1e-6, 1e-5));
        let diff = a - b;
        prop_assert!(approx_abs_rel(d, diff.dot(diff), 1e-6, 1e-5));
        prop_assert!(approx(a.distance_squared(a), 0.0, 1e-6));
    }

    // lerp endpoints are exact and the result stays within the endpoints
    #[test]
    fn lerp_bounds(a in bounded_f32(), b in bounded_f32(), t in unit_f32()) {
        prop_assert!(approx_abs_rel(lerp(a, b, 0.0), a, 1e-6, 1e-6));
        prop_assert!(approx_abs_rel(lerp(a, b, 1.0), b, 1e-6, 1e-6));
        let v = lerp(a, b, t);
        let lo = a.min(b);
        let hi = a.max(b);
        let slack = 1e-3 * hi.abs().max(lo.abs()).max(1.0);
        prop_assert!(v >= lo - slack && v <= hi + slack);
    }

    // Color modulation is commutative and WHITE is the identity
    #[test]
    fn rgba_modulate_identity(c in arb_color(), d in arb_color()) {
        let cd = c * d;
        let dc = d * c;
        prop_assert!(approx(cd.r, dc.r, 1e-6));
        prop_assert!(approx(cd.g, dc.g, 1e-6));
        prop_assert!(approx(cd.b, dc.b, 1e-6));
        prop_assert!(approx(cd.a, dc.a, 1e-6));
        let id = c * Rgba::WHITE;
        prop_assert!(approx(id.r, c.r, 1e-6));
        prop_assert!(approx(id.g, c.g, 1e-6));
        prop_assert!(approx(id.b, c.b, 1e-6));
        prop_assert!(approx(id.a, c.a, 1e-6));
    }

    // shaded scales rgb only; alpha passes through
    #[test]
    fn rgba_shaded_preserves_alpha(c in arb_color(), v in unit_f32()) {
        let s = c.shaded(v);
        prop_assert!(approx(s.r, c.r * v, 1e-6));
        prop_assert!(approx(s.g, c.g * v, 1e-6));
        prop_assert!(approx(s.b, c.b * v, 1e-6));
        prop_assert!(approx(s.a, c.a, 1e-6));
    }
}
