//! Geometry utilities over landmarks

use crate::{BodyscaleError, BodyscaleResult, Landmark, LandmarkSet};

/// Euclidean distance in 3D. NaN inputs propagate.
pub fn distance(a: &Landmark, b: &Landmark) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dz = b.z - a.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// True iff every index exists and is visible at `threshold`.
/// Fails closed on any missing landmark.
pub fn are_visible(landmarks: &LandmarkSet, indices: &[usize], threshold: f32) -> bool {
    indices.iter().all(|&i| {
        landmarks
            .get(i)
            .map(|lm| lm.is_visible(threshold))
            .unwrap_or(false)
    })
}

/// Like [`are_visible`], but reports the first offending index
pub fn check_visible(
    landmarks: &LandmarkSet,
    indices: &[usize],
    threshold: f32,
) -> BodyscaleResult<()> {
    for &index in indices {
        let lm = landmarks
            .get(index)
            .ok_or(BodyscaleError::MissingLandmark { index })?;
        if !lm.is_visible(threshold) {
            return Err(BodyscaleError::LowVisibility {
                index,
                visibility: lm.visibility.unwrap_or(0.0),
                threshold,
            });
        }
    }
    Ok(())
}

/// Sum of distances between consecutive landmarks of a path
pub fn path_length(landmarks: &LandmarkSet, path: &[usize]) -> BodyscaleResult<f32> {
    let points = resolve(landmarks, path)?;
    Ok(points.windows(2).map(|w| distance(w[0], w[1])).sum())
}

/// Look up every index of a path, failing on the first missing one
pub fn resolve<'a>(
    landmarks: &'a LandmarkSet,
    path: &[usize],
) -> BodyscaleResult<Vec<&'a Landmark>> {
    path.iter()
        .map(|&index| {
            landmarks
                .get(index)
                .ok_or(BodyscaleError::MissingLandmark { index })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set_of(points: &[(f32, f32, f32)]) -> LandmarkSet {
        points.iter().map(|&(x, y, z)| Landmark::new(x, y, z)).collect()
    }

    #[test]
    fn test_distance() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(3.0, 4.0, 12.0);
        assert!((distance(&a, &b) - 13.0).abs() < 1e-5);
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn test_distance_nan_propagates() {
        let a = Landmark::new(f32::NAN, 0.0, 0.0);
        let b = Landmark::new(1.0, 0.0, 0.0);
        assert!(distance(&a, &b).is_nan());
    }

    #[test]
    fn test_are_visible() {
        let mut set = set_of(&[(0.0, 0.0, 0.0), (1.0, 1.0, 0.0), (2.0, 2.0, 0.0)]);
        assert!(are_visible(&set, &[0, 1, 2], 0.8));

        set.set(1, Landmark::new(1.0, 1.0, 0.0).with_visibility(0.5));
        assert!(!are_visible(&set, &[0, 1], 0.8));
        assert!(are_visible(&set, &[0, 1], 0.5));

        // Missing index fails closed
        assert!(!are_visible(&set, &[0, 3], 0.0));
        assert!(are_visible(&set, &[], 0.8));
    }

    #[test]
    fn test_check_visible_reports_index() {
        let mut set = set_of(&[(0.0, 0.0, 0.0), (1.0, 1.0, 0.0)]);
        set.set(1, Landmark::new(1.0, 1.0, 0.0).with_visibility(0.3));

        assert_eq!(
            check_visible(&set, &[0, 5], 0.8),
            Err(BodyscaleError::MissingLandmark { index: 5 })
        );
        assert!(matches!(
            check_visible(&set, &[0, 1], 0.8),
            Err(BodyscaleError::LowVisibility { index: 1, .. })
        ));
    }

    #[test]
    fn test_path_length() {
        let set = set_of(&[(0.0, 0.0, 0.0), (0.0, 1.0, 0.0), (1.0, 1.0, 0.0)]);
        assert!((path_length(&set, &[0, 1, 2]).unwrap() - 2.0).abs() < 1e-6);
        assert_eq!(path_length(&set, &[0]).unwrap(), 0.0);
        assert!(path_length(&set, &[0, 9]).is_err());
    }

    proptest! {
        #[test]
        fn prop_path_never_shorter_than_chord(
            pts in proptest::collection::vec((-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0), 2..6)
        ) {
            let set = set_of(&pts);
            let path: Vec<usize> = (0..pts.len()).collect();
            let along = path_length(&set, &path).unwrap();
            let chord = distance(set.get(0).unwrap(), set.get(pts.len() - 1).unwrap());
            prop_assert!(along + 1e-4 >= chord);
        }

        #[test]
        fn prop_distance_symmetric(
            a in (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0),
            b in (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0),
        ) {
            let a = Landmark::new(a.0, a.1, a.2);
            let b = Landmark::new(b.0, b.1, b.2);
            prop_assert!(distance(&a, &b) >= 0.0);
            prop_assert_eq!(distance(&a, &b), distance(&b, &a));
        }
    }
}
