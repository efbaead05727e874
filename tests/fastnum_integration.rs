use aksel_affine::{Affine, Bounds, Degree, Point, Rect, Transform, TransformError};
use fastnum::decimal::D128;

fn d(value: i32) -> D128 {
    D128::from(value)
}

fn assert_close(actual: D128, expected: D128) {
    assert!(
        (actual - expected).abs() < D128::from(1e-10),
        "{actual} != {expected}"
    );
}

fn assert_point_close(actual: Point<D128>, expected: Point<D128>) {
    assert_close(actual.x, expected.x);
    assert_close(actual.y, expected.y);
}

#[test]
fn test_decimal_translate_then_scale() {
    let mut m = Affine::<D128>::from_translation(d(10), d(-5));
    m.scale(d(3), d(4));

    // Scale first, then translate.
    let p = m.transform_point(Point::new(d(2), d(1)));
    assert_point_close(p, Point::new(d(16), d(-1)));

    let back = m.inverse_transform_point(p).unwrap();
    assert_point_close(back, Point::new(d(2), d(1)));
}

#[test]
fn test_decimal_quadrant_rotation() {
    // Quarter turns need no trigonometry, so decimals stay exact.
    let m = Affine::<D128>::from_quadrant_rotation(1);
    let p = m.transform_point(Point::new(d(1), d(0)));
    assert_point_close(p, Point::new(d(0), d(1)));

    let mut m = Affine::<D128>::identity();
    m.quadrant_rotate_about(2, d(1), d(1));
    let p = m.transform_point(Point::new(d(3), d(1)));
    assert_point_close(p, Point::new(d(-1), d(1)));
}

#[test]
fn test_decimal_inverse_of_thirds() {
    let m = Affine::<D128>::new(d(3), d(0), d(0), d(3), d(1), d(1));
    let inv = m.create_inverse().unwrap();

    let mut product = m;
    product.concatenate(&inv);
    let [a, b, c, dd, e, f] = product.to_array();
    assert_close(a, d(1));
    assert_close(b, d(0));
    assert_close(c, d(0));
    assert_close(dd, d(1));
    assert_close(e, d(0));
    assert_close(f, d(0));
}

#[test]
fn test_decimal_singular_matrix() {
    let m = Affine::<D128>::from_scale(d(0), d(1));
    assert!(matches!(
        m.create_inverse(),
        Err(TransformError::NonInvertible { determinant }) if determinant == 0.0
    ));
}

#[test]
fn test_decimal_viewport_mapping() {
    let plot = Rect::new(d(0), d(0), d(100), d(50));
    let screen = Rect::new(d(0), d(600), d(800), d(-600));
    let m = Affine::rect_to_rect(&plot, &screen).unwrap();

    let center = m.transform_point(Point::new(d(50), d(25)));
    assert_point_close(center, Point::new(d(400), d(300)));

    let image = m.transform_bounds(&plot.to_bounds());
    assert_close(image.min_y, d(0));
    assert_close(image.max_y, d(600));
}

#[test]
fn test_decimal_transform_variants() {
    let t = Transform::<D128>::translation(d(1), d(2));
    assert_eq!(t.degree(), Degree::Translate);

    let t = t.derive_with_scale(d(2), d(2));
    assert_eq!(t.degree(), Degree::Affine);

    let bounds = t.transform_bounds(&Bounds::new(d(0), d(0), d(1), d(1)));
    assert_close(bounds.min_x, d(1));
    assert_close(bounds.min_y, d(2));
    assert_close(bounds.max_x, d(3));
    assert_close(bounds.max_y, d(4));
}
