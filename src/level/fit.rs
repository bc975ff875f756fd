use crate::geom::BBox;

use super::config::LevelConfig;
use super::error::{LevelError, LevelResult};
use super::path::PathSet;

/// Uniform scale that puts the most extreme coordinate of `paths` exactly at
/// `world_size - world_margin`.
pub fn world_scale(paths: &PathSet, config: &LevelConfig) -> LevelResult<f64> {
    let bounds =
        BBox::from_points(paths.points()).ok_or(LevelError::degenerate("world fit bounds"))?;
    let abs_max = bounds.max_abs_coordinate();
    if !abs_max.is_finite() || abs_max == 0.0 {
        return Err(LevelError::degenerate("world fit extent"));
    }

    let size = f64::from(config.world_size);
    let margin = f64::from(config.world_margin);
    Ok(((size - margin) / size) * (size / abs_max))
}

/// Rescales every control point into the world volume.
///
/// Returns the fitted paths together with the applied scale factor.
pub fn scale_paths_to_world(
    paths: PathSet,
    config: &LevelConfig,
) -> LevelResult<(PathSet, f64)> {
    let scale = world_scale(&paths, config)?;
    log::debug!("world fit: scale factor {scale}");
    Ok((paths.map_points(|p| p.scaled(scale)), scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Point3, Tolerance};
    use crate::level::path::Path;

    fn world(size: u32, margin: u32) -> LevelConfig {
        LevelConfig {
            world_size: size,
            world_margin: margin,
            ..LevelConfig::default()
        }
    }

    #[test]
    fn extreme_point_lands_on_fitted_extent() {
        let paths = PathSet::new(vec![Path::new(vec![
            Point3::ORIGIN,
            Point3::new(0.5, -2.0, 1.0),
            Point3::new(1.5, 0.25, 0.0),
        ])]);
        let config = world(100, 20);
        let (fitted, scale) = scale_paths_to_world(paths, &config).unwrap();

        assert!(Tolerance::DEFAULT.approx_eq_f64(scale, 40.0));
        let bounds = BBox::from_points(fitted.points()).unwrap();
        assert!(Tolerance::DEFAULT.approx_eq_f64(bounds.max_abs_coordinate(), 80.0));
        assert!(fitted.points().all(|p| BBox::centered_cube(80.0 + 1e-9).contains_point(p)));
    }

    #[test]
    fn zero_margin_fills_the_world() {
        let paths = PathSet::new(vec![Path::new(vec![Point3::new(0.0, 0.0, 4.0)])]);
        let (fitted, _) = scale_paths_to_world(paths, &world(10, 0)).unwrap();
        assert_eq!(fitted.points().next(), Some(Point3::new(0.0, 0.0, 10.0)));
    }

    #[test]
    fn all_origin_layout_is_degenerate() {
        let paths = PathSet::new(vec![Path::new(vec![Point3::ORIGIN, Point3::ORIGIN])]);
        assert_eq!(
            world_scale(&paths, &world(10, 1)),
            Err(LevelError::degenerate("world fit extent"))
        );
    }

    #[test]
    fn empty_layout_is_degenerate() {
        assert_eq!(
            world_scale(&PathSet::default(), &world(10, 1)),
            Err(LevelError::degenerate("world fit bounds"))
        );
    }
}
