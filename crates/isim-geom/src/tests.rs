//! Unit tests for isim-geom.

#[cfg(test)]
mod coord {
    use crate::Coord;

    #[test]
    fn translate_and_distance() {
        let mut c = Coord::new(1.0, 1.0);
        c.translate(3.0, 4.0);
        assert_eq!(c, Coord::new(4.0, 5.0));
        assert_eq!(Coord::new(0.0, 0.0).distance(Coord::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn ordering_x_then_y() {
        assert!(Coord::new(0.0, 9.0) < Coord::new(1.0, 0.0));
        assert!(Coord::new(1.0, 0.0) < Coord::new(1.0, 1.0));
    }
}

#[cfg(test)]
mod segment {
    use crate::{Coord, Segment};

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment::new(Coord::new(x0, y0), Coord::new(x1, y1))
    }

    #[test]
    fn slope_and_intercept_follow_endpoints() {
        let mut s = seg(0.0, 1.0, 2.0, 5.0);
        assert_eq!(s.slope(), 2.0);
        assert_eq!(s.intercept(), 1.0);
        s.set_end(Coord::new(2.0, 1.0));
        assert_eq!(s.slope(), 0.0);
        s.set_begin(Coord::new(0.0, 3.0));
        assert_eq!(s.slope(), -1.0);
        assert_eq!(s.intercept(), 3.0);
    }

    #[test]
    fn contains_tests_the_infinite_line() {
        let s = seg(0.0, 0.0, 10.0, 0.0);
        assert!(s.contains(Coord::new(5.0, 0.0)));
        assert!(s.contains(Coord::new(100.0, 0.04)));
        assert!(s.contains(Coord::new(-50.0, 0.0)));
        assert!(!s.contains(Coord::new(5.0, 0.1)));
    }

    #[test]
    fn contains_vertical() {
        let s = seg(3.0, 0.0, 3.0, 10.0);
        assert!(s.is_vertical());
        assert!(s.contains(Coord::new(3.0, 50.0)));
        assert!(s.contains(Coord::new(3.02, 5.0)));
        assert!(!s.contains(Coord::new(4.0, 5.0)));
    }

    #[test]
    fn contains_zero_length() {
        let s = seg(1.0, 1.0, 1.0, 1.0);
        assert!(s.contains(Coord::new(1.0, 1.01)));
        assert!(!s.contains(Coord::new(1.0, 2.0)));
    }

    #[test]
    fn project_interpolates_inside() {
        let s = seg(0.0, 0.0, 10.0, 5.0);
        assert_eq!(s.project(4.0), Coord::new(4.0, 2.0));
    }

    #[test]
    fn project_clamps_both_ends() {
        let s = seg(0.0, 0.0, 10.0, 5.0);
        assert_eq!(s.project(-3.0), Coord::new(0.0, 0.0));
        assert_eq!(s.project(30.0), Coord::new(10.0, 5.0));

        let r = seg(10.0, 5.0, 0.0, 0.0);
        assert_eq!(r.project(-3.0), Coord::new(0.0, 0.0));
        assert_eq!(r.project(30.0), Coord::new(10.0, 5.0));
    }

    #[test]
    fn project_vertical_returns_begin() {
        let s = seg(2.0, 0.0, 2.0, 8.0);
        assert_eq!(s.project(2.0), Coord::new(2.0, 0.0));
        assert_eq!(s.project(7.0), Coord::new(2.0, 0.0));
    }

    #[test]
    fn intersects_is_symmetric() {
        let cases = [
            (seg(0.0, 0.0, 10.0, 10.0), seg(0.0, 10.0, 10.0, 0.0), true),
            (seg(0.0, 0.0, 10.0, 0.0), seg(0.0, 1.0, 10.0, 1.0), false),
            (seg(0.0, 0.0, 5.0, 0.0), seg(5.0, 0.0, 5.0, 5.0), true),
            (seg(0.0, 0.0, 6.0, 0.0), seg(4.0, 0.0, 9.0, 0.0), true),
            (seg(0.0, 0.0, 3.0, 0.0), seg(4.0, 0.0, 9.0, 0.0), false),
            (seg(0.0, 0.0, 1.0, 1.0), seg(2.0, 0.0, 2.0, 5.0), false),
        ];
        for (a, b, expected) in cases {
            assert_eq!(a.intersects(&b), expected, "{a} vs {b}");
            assert_eq!(b.intersects(&a), expected, "{b} vs {a}");
        }
    }

    #[test]
    fn bounding_box() {
        let s = seg(10.0, 0.0, 0.0, 4.0);
        assert!(s.in_bounding_box(Coord::new(5.0, 2.0)));
        assert!(s.in_bounding_box(Coord::new(0.0, 0.0)));
        assert!(!s.in_bounding_box(Coord::new(11.0, 2.0)));
    }

    #[test]
    fn zero_length_segments_compare_equal() {
        assert_eq!(seg(1.0, 1.0, 1.0, 1.0), seg(1.0, 1.0, 1.0, 1.0));
        assert!(seg(0.0, 0.0, 1.0, 0.0) < seg(0.0, 0.0, 2.0, 0.0));
    }
}

#[cfg(test)]
mod rect {
    use crate::{Coord, Rect};

    #[test]
    fn inclusive_bounds() {
        let r = Rect::new(Coord::new(169.0, 119.0), Coord::new(164.0, 0.0));
        assert!(r.contains(Coord::new(164.0, 0.0)));
        assert!(r.contains(Coord::new(166.5, 60.0)));
        assert!(!r.contains(Coord::new(163.9, 60.0)));
    }
}
