//! Projection of off-map directions onto the map's border

use glam::DVec2;

/// Marker coordinate of the map's border on each axis
pub const MAP_EDGE: i8 = 127;

/// Project a world offset from the map origin onto the border of the
/// `[-127, 127]` marker square, keeping the direction from the origin
pub fn project_to_edge(offset: DVec2) -> (i8, i8) {
    project_to_edge_with_extent(offset, MAP_EDGE)
}

/// Same as [`project_to_edge`] for a square of half-size `extent`
///
/// A zero or non-finite offset maps to the origin. On an exact diagonal
/// (`|x| == |z|`) the z axis is treated as dominant.
pub fn project_to_edge_with_extent(offset: DVec2, extent: i8) -> (i8, i8) {
    if !offset.is_finite() {
        return (0, 0);
    }

    // Pre-scale so squaring huge offsets cannot overflow to infinity
    let scale = offset.abs().max_element();
    if scale == 0.0 {
        return (0, 0);
    }
    let dir = (offset / scale).normalize();

    let extent = f64::from(extent.max(0));
    let (x, z) = if dir.x.abs() > dir.y.abs() {
        let x = dir.x.signum() * extent;
        let z = dir.y / dir.x.abs() * extent;
        (x, z)
    } else {
        let z = dir.y.signum() * extent;
        let x = dir.x / dir.y.abs() * extent;
        (x, z)
    };

    (to_marker_coord(x, extent), to_marker_coord(z, extent))
}

/// Round to the nearest marker unit, keeping a nonzero value off the axis
fn to_marker_coord(value: f64, extent: f64) -> i8 {
    let rounded = value.clamp(-extent, extent).round();
    if rounded == 0.0 && value != 0.0 && extent >= 1.0 {
        value.signum() as i8
    } else {
        rounded as i8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_offset_is_origin() {
        assert_eq!(project_to_edge(DVec2::ZERO), (0, 0));
    }

    #[test]
    fn test_axis_aligned() {
        assert_eq!(project_to_edge(DVec2::new(300.0, 0.0)), (127, 0));
        assert_eq!(project_to_edge(DVec2::new(-300.0, 0.0)), (-127, 0));
        assert_eq!(project_to_edge(DVec2::new(0.0, 5.0)), (0, 127));
        assert_eq!(project_to_edge(DVec2::new(0.0, -5.0)), (0, -127));
    }

    #[test]
    fn test_diagonal_tie() {
        assert_eq!(project_to_edge(DVec2::new(5.0, 5.0)), (127, 127));
        assert_eq!(project_to_edge(DVec2::new(-5.0, 5.0)), (-127, 127));
        assert_eq!(project_to_edge(DVec2::new(5.0, -5.0)), (127, -127));
    }

    #[test]
    fn test_preserves_direction() {
        // Slope 1/4 along x
        assert_eq!(project_to_edge(DVec2::new(1000.0, 250.0)), (127, 32));
        assert_eq!(project_to_edge(DVec2::new(-250.0, -1000.0)), (-32, -127));
    }

    #[test]
    fn test_small_minor_axis_keeps_sign() {
        assert_eq!(project_to_edge(DVec2::new(1000.0, -3.0)), (127, -1));
        assert_eq!(project_to_edge(DVec2::new(2.0, 5000.0)), (1, 127));
        assert_eq!(project_to_edge(DVec2::new(1000.0, 0.0)), (127, 0));
    }

    #[test]
    fn test_lands_on_border_with_matching_signs() {
        let offsets = [
            (1.0, 0.3),
            (-7.5, 2.0),
            (0.2, -9.0),
            (-1e9, -3e8),
            (1e300, 1e299),
            (128.0, -129.0),
        ];
        for (x, z) in offsets {
            let (rx, rz) = project_to_edge(DVec2::new(x, z));
            assert_eq!(rx.unsigned_abs().max(rz.unsigned_abs()), 127, "offset ({x}, {z})");
            assert_eq!((rx as f64).signum(), x.signum(), "offset ({x}, {z})");
            assert_eq!((rz as f64).signum(), z.signum(), "offset ({x}, {z})");
        }
    }

    #[test]
    fn test_non_finite_offset_is_origin() {
        assert_eq!(project_to_edge(DVec2::new(f64::NAN, 1.0)), (0, 0));
        assert_eq!(project_to_edge(DVec2::new(f64::INFINITY, 1.0)), (0, 0));
    }

    #[test]
    fn test_custom_extent() {
        assert_eq!(project_to_edge_with_extent(DVec2::new(3.0, 0.0), 64), (64, 0));
    }
}
