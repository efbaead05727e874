//! Applying an [`Affine`] to points, coordinate arrays and boxes.
//!
//! Each batch operation inspects the state once and then runs a loop
//! specialised to it, so e.g. a pure translation costs two additions per
//! point. Inverse operations validate invertibility before touching any
//! output.

use num_traits::Float;

use super::kind::State;
use super::matrix::Affine;
use crate::error::TransformError;
use crate::geometry::{Bounds, CoordPairs, Point, Rect};

impl<T: Float> Affine<T> {
    fn forward(&self, state: State, coords: CoordPairs<'_, T>) {
        let Self { a, b, c, d, e, f, .. } = *self;
        match state.flags() {
            (false, false, false) => coords.map(|x, y| (x, y)),
            (false, false, true) => coords.map(|x, y| (x + e, y + f)),
            (false, true, false) => coords.map(|x, y| (x * a, y * d)),
            (false, true, true) => coords.map(|x, y| (x * a + e, y * d + f)),
            (true, false, false) => coords.map(|x, y| (y * c, x * b)),
            (true, false, true) => coords.map(|x, y| (y * c + e, x * b + f)),
            (true, true, false) => coords.map(|x, y| (x * a + y * c, x * b + y * d)),
            (true, true, true) => coords.map(|x, y| (x * a + y * c + e, x * b + y * d + f)),
        }
    }

    fn backward(&self, state: State, coords: CoordPairs<'_, T>) -> Result<(), TransformError> {
        self.check_invertible()?;

        let Self { a, b, c, d, e, f, .. } = *self;
        let det = a * d - c * b;
        match state.flags() {
            (false, false, false) => coords.map(|x, y| (x, y)),
            (false, false, true) => coords.map(|x, y| (x - e, y - f)),
            (false, true, false) => coords.map(|x, y| (x / a, y / d)),
            (false, true, true) => coords.map(|x, y| ((x - e) / a, (y - f) / d)),
            (true, false, false) => coords.map(|x, y| (y / b, x / c)),
            (true, false, true) => coords.map(|x, y| ((y - f) / b, (x - e) / c)),
            (true, true, false) => {
                coords.map(|x, y| ((x * d - y * c) / det, (y * a - x * b) / det))
            }
            (true, true, true) => coords.map(|x, y| {
                let (x, y) = (x - e, y - f);
                ((x * d - y * c) / det, (y * a - x * b) / det)
            }),
        }
        Ok(())
    }

    fn map_point(&self, state: State, point: Point<T>) -> Point<T> {
        let src = [point.x, point.y];
        let mut dst = src;
        self.forward(state, CoordPairs::split(&src, &mut dst));
        Point::new(dst[0], dst[1])
    }

    fn unmap_point(&self, state: State, point: Point<T>) -> Result<Point<T>, TransformError> {
        let src = [point.x, point.y];
        let mut dst = src;
        self.backward(state, CoordPairs::split(&src, &mut dst))?;
        Ok(Point::new(dst[0], dst[1]))
    }

    /// Maps a point through the transform.
    pub fn transform_point(&self, point: Point<T>) -> Point<T> {
        self.map_point(self.state, point)
    }

    /// Maps a direction: the linear part only, ignoring translation.
    ///
    /// ```
    /// use aksel_affine::{Affine, Point};
    ///
    /// let mut m = Affine::from_translation(100.0, 100.0);
    /// m.scale(2.0, -1.0);
    /// assert_eq!(m.delta_transform(Point::new(3.0, 4.0)), Point::new(6.0, -4.0));
    /// ```
    pub fn delta_transform(&self, vector: Point<T>) -> Point<T> {
        self.map_point(self.state.linear(), vector)
    }

    /// Maps a point through the inverse transform.
    ///
    /// # Errors
    ///
    /// [`TransformError::NonInvertible`] if the transform is singular.
    pub fn inverse_transform_point(&self, point: Point<T>) -> Result<Point<T>, TransformError> {
        self.unmap_point(self.state, point)
    }

    /// Maps a direction through the inverse of the linear part.
    pub fn inverse_delta_transform(&self, vector: Point<T>) -> Result<Point<T>, TransformError> {
        self.unmap_point(self.state.linear(), vector)
    }

    /// Transforms interleaved `x, y` pairs from `src` into `dst`.
    ///
    /// `src.len() / 2` points are transformed; a trailing odd coordinate is
    /// ignored.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than the transformed prefix of `src`.
    pub fn transform_coords(&self, src: &[T], dst: &mut [T]) {
        self.forward(self.state, CoordPairs::split(src, dst));
    }

    /// Transforms `pairs` points stored in `buf` starting at `src` into
    /// `buf` starting at `dst`.
    ///
    /// The ranges may overlap in either direction; every source point is
    /// read before it could be overwritten.
    ///
    /// ```
    /// use aksel_affine::Affine;
    ///
    /// let m = Affine::from_scale(10.0, 10.0);
    /// let mut buf = [1.0, 2.0, 3.0, 4.0, 0.0, 0.0];
    /// m.transform_coords_within(&mut buf, 0, 2, 2);
    /// assert_eq!(buf, [1.0, 2.0, 10.0, 20.0, 30.0, 40.0]);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if either range runs past the end of `buf`.
    pub fn transform_coords_within(&self, buf: &mut [T], src: usize, dst: usize, pairs: usize) {
        self.forward(self.state, CoordPairs::shared(buf, src, dst, pairs));
    }

    /// [`transform_coords`](Self::transform_coords) without the translation.
    pub fn delta_transform_coords(&self, src: &[T], dst: &mut [T]) {
        self.forward(self.state.linear(), CoordPairs::split(src, dst));
    }

    /// Inverse of [`transform_coords`](Self::transform_coords).
    ///
    /// # Errors
    ///
    /// [`TransformError::NonInvertible`] if the transform is singular; `dst`
    /// is left untouched in that case.
    pub fn inverse_transform_coords(&self, src: &[T], dst: &mut [T]) -> Result<(), TransformError> {
        self.backward(self.state, CoordPairs::split(src, dst))
    }

    /// Inverse of [`transform_coords_within`](Self::transform_coords_within).
    pub fn inverse_transform_coords_within(
        &self,
        buf: &mut [T],
        src: usize,
        dst: usize,
        pairs: usize,
    ) -> Result<(), TransformError> {
        self.backward(self.state, CoordPairs::shared(buf, src, dst, pairs))
    }

    /// The smallest axis-aligned box enclosing the image of `bounds`.
    ///
    /// Empty input yields empty output.
    pub fn transform_bounds(&self, bounds: &Bounds<T>) -> Bounds<T> {
        if bounds.is_empty() {
            return Bounds::empty();
        }
        if self.state == State::IDENTITY {
            return *bounds;
        }
        if self.state == State::TRANSLATE {
            return Bounds::new(
                bounds.min_x + self.e,
                bounds.min_y + self.f,
                bounds.max_x + self.e,
                bounds.max_y + self.f,
            );
        }
        let corners = bounds.corner_coords();
        let mut mapped = corners;
        self.transform_coords(&corners, &mut mapped);
        Bounds::from_coords(&mapped).unwrap_or_else(Bounds::empty)
    }

    /// The smallest axis-aligned box enclosing the preimage of `bounds`.
    pub fn inverse_transform_bounds(&self, bounds: &Bounds<T>) -> Result<Bounds<T>, TransformError> {
        self.check_invertible()?;
        if bounds.is_empty() {
            return Ok(Bounds::empty());
        }
        let corners = bounds.corner_coords();
        let mut mapped = corners;
        self.inverse_transform_coords(&corners, &mut mapped)?;
        Ok(Bounds::from_coords(&mapped).unwrap_or_else(Bounds::empty))
    }

    /// Bounding rectangle of the image of `rect`.
    pub fn transform_rect(&self, rect: &Rect<T>) -> Rect<T> {
        self.transform_bounds(&rect.to_bounds()).to_rect()
    }

    /// Bounding rectangle of the preimage of `rect`.
    pub fn inverse_transform_rect(&self, rect: &Rect<T>) -> Result<Rect<T>, TransformError> {
        Ok(self.inverse_transform_bounds(&rect.to_bounds())?.to_rect())
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_4;

    use approx::assert_relative_eq;

    use super::*;

    fn catalogue() -> Vec<Affine> {
        vec![
            Affine::identity(),
            Affine::from_translation(3.0, -4.0),
            Affine::from_scale(2.0, 0.5),
            Affine::new(-1.5, 0.0, 0.0, 3.0, 1.0, 2.0),
            Affine::new(0.0, 2.0, -0.5, 0.0, 0.0, 0.0),
            Affine::new(0.0, -3.0, 1.25, 0.0, 7.0, -1.0),
            Affine::new(0.8, 0.6, -0.6, 0.8, 0.0, 0.0),
            Affine::new(1.2, 0.1, -0.4, 0.9, 4.0, -7.0),
        ]
    }

    fn general(m: &Affine, p: Point) -> Point {
        let [a, b, c, d, e, f] = m.to_array();
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    #[test]
    fn specialised_loops_agree_with_full_formula() {
        let points = [Point::new(1.5, -2.0), Point::new(0.0, 0.0), Point::new(-7.25, 3.0)];
        for m in catalogue() {
            for &p in &points {
                let q = m.transform_point(p);
                let r = general(&m, p);
                assert_eq!(q, r, "{m:?} at {p:?}");
            }
        }
    }

    #[test]
    fn inverse_undoes_forward() {
        let p = Point::new(3.25, -1.75);
        for m in catalogue() {
            let back = m.inverse_transform_point(m.transform_point(p)).unwrap();
            assert_relative_eq!(back.x, p.x, epsilon = 1e-12);
            assert_relative_eq!(back.y, p.y, epsilon = 1e-12);

            let v = m.inverse_delta_transform(m.delta_transform(p)).unwrap();
            assert_relative_eq!(v.x, p.x, epsilon = 1e-12);
            assert_relative_eq!(v.y, p.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn inverse_point_matches_inverse_matrix() {
        let p = Point::new(10.0, -4.0);
        for m in catalogue() {
            let inv = m.create_inverse().unwrap();
            let direct = m.inverse_transform_point(p).unwrap();
            let via = inv.transform_point(p);
            assert_relative_eq!(direct.x, via.x, epsilon = 1e-12);
            assert_relative_eq!(direct.y, via.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn delta_ignores_translation() {
        let m = Affine::new(0.0, 2.0, -1.0, 0.0, 50.0, 60.0);
        assert_eq!(m.delta_transform(Point::new(1.0, 1.0)), Point::new(-1.0, 2.0));
        assert_eq!(
            m.inverse_delta_transform(Point::new(-1.0, 2.0)).unwrap(),
            Point::new(1.0, 1.0)
        );
    }

    #[test]
    fn singular_inverse_reports_error_and_leaves_output() {
        let m = Affine::new(0.0, 0.0, 0.0, 0.0, 1.0, 1.0);
        assert!(m.inverse_transform_point(Point::new(1.0, 1.0)).is_err());

        let src = [1.0, 2.0];
        let mut dst = [9.0, 9.0];
        assert!(m.inverse_transform_coords(&src, &mut dst).is_err());
        assert_eq!(dst, [9.0, 9.0]);
    }

    #[test]
    fn coords_match_points() {
        let m = Affine::new(1.2, 0.1, -0.4, 0.9, 4.0, -7.0);
        let src = [1.0, 2.0, -3.0, 0.5, 8.0, 8.0];
        let mut dst = [0.0; 6];
        m.transform_coords(&src, &mut dst);

        for (s, d) in src.chunks(2).zip(dst.chunks(2)) {
            let p = m.transform_point(Point::new(s[0], s[1]));
            assert_eq!((p.x, p.y), (d[0], d[1]));
        }

        let mut back = [0.0; 6];
        m.inverse_transform_coords(&dst, &mut back).unwrap();
        for (b, s) in back.iter().zip(src.iter()) {
            assert_relative_eq!(*b, *s, epsilon = 1e-12);
        }
    }

    #[test]
    fn in_place_overlap_matches_separate_buffers() {
        let m = Affine::new(1.2, 0.1, -0.4, 0.9, 4.0, -7.0);
        let points = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut expected = [0.0; 6];
        m.transform_coords(&points, &mut expected);

        // Forward overlap: destination one pair ahead.
        let mut buf = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 0.0, 0.0];
        m.transform_coords_within(&mut buf, 0, 2, 3);
        assert_eq!(&buf[2..], &expected);

        // Backward overlap: destination one pair behind.
        let mut buf = [0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        m.transform_coords_within(&mut buf, 2, 0, 3);
        assert_eq!(&buf[..6], &expected);

        // Exactly in place.
        let mut buf = points;
        m.transform_coords_within(&mut buf, 0, 0, 3);
        assert_eq!(buf, expected);
    }

    #[test]
    fn inverse_in_place() {
        let m = Affine::new(2.0, 0.0, 0.0, 4.0, 1.0, 1.0);
        let mut buf = [0.0, 0.0, 3.0, 9.0, 5.0, 17.0];
        m.inverse_transform_coords_within(&mut buf, 2, 0, 2).unwrap();
        assert_eq!(&buf[..4], &[1.0, 2.0, 2.0, 4.0]);
    }

    #[test]
    #[should_panic(expected = "exceed a buffer")]
    fn in_place_range_checked() {
        let m = Affine::<f64>::identity();
        let mut buf = [0.0; 4];
        m.transform_coords_within(&mut buf, 2, 0, 2);
    }

    #[test]
    fn delta_coords_skip_translation() {
        let m = Affine::new(2.0, 0.0, 0.0, 2.0, 5.0, 5.0);
        let mut dst = [0.0; 2];
        m.delta_transform_coords(&[1.0, -1.0], &mut dst);
        assert_eq!(dst, [2.0, -2.0]);
    }

    #[test]
    fn rotated_bounds_enclose_every_corner() {
        let m = Affine::from_rotation(FRAC_PI_4);
        let bounds = Bounds::new(-1.0, -1.0, 1.0, 1.0);
        let image = m.transform_bounds(&bounds);

        let half_diagonal = 2.0f64.sqrt();
        assert_relative_eq!(image.min_x, -half_diagonal, epsilon = 1e-12);
        assert_relative_eq!(image.max_x, half_diagonal, epsilon = 1e-12);
        assert_relative_eq!(image.min_y, -half_diagonal, epsilon = 1e-12);
        assert_relative_eq!(image.max_y, half_diagonal, epsilon = 1e-12);

        let corners = bounds.corner_coords();
        for corner in corners.chunks(2) {
            let p = m.transform_point(Point::new(corner[0], corner[1]));
            assert!(p.x >= image.min_x && p.x <= image.max_x);
            assert!(p.y >= image.min_y && p.y <= image.max_y);
        }
    }

    #[test]
    fn bounds_fast_paths() {
        let bounds = Bounds::new(0.0, 0.0, 2.0, 1.0);
        assert_eq!(Affine::identity().transform_bounds(&bounds), bounds);
        assert_eq!(
            Affine::from_translation(1.0, -1.0).transform_bounds(&bounds),
            Bounds::new(1.0, -1.0, 3.0, 0.0)
        );
        assert_eq!(
            Affine::from_scale(-1.0, 1.0).transform_bounds(&bounds),
            Bounds::new(-2.0, 0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn empty_bounds_stay_empty() {
        let m = Affine::from_rotation(0.5);
        assert!(m.transform_bounds(&Bounds::empty()).is_empty());
        assert!(m.inverse_transform_bounds(&Bounds::empty()).unwrap().is_empty());
    }

    #[test]
    fn inverse_bounds_undo_scale() {
        let m = Affine::new(2.0, 0.0, 0.0, -4.0, 10.0, 0.0);
        let image = m.transform_bounds(&Bounds::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(image, Bounds::new(10.0, -4.0, 12.0, 0.0));
        assert_eq!(
            m.inverse_transform_bounds(&image).unwrap(),
            Bounds::new(0.0, 0.0, 1.0, 1.0)
        );
    }

    #[test]
    fn rect_round_trip() {
        let m = Affine::new(0.0, 1.0, -1.0, 0.0, 5.0, 0.0);
        let rect = Rect::new(0.0, 0.0, 4.0, 2.0);
        let image = m.transform_rect(&rect);
        assert_eq!(image, Rect::new(3.0, 0.0, 2.0, 4.0));
        assert_eq!(m.inverse_transform_rect(&image).unwrap(), rect);
    }
}
