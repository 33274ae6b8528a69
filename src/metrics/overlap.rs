//! Analytic overlap fraction between two circles.

use crate::error::Result;
use crate::types::Circle;

/// Largest value a partial overlap may take. Only containment reports exactly `1.0`.
const MAX_PARTIAL_OVERLAP: f64 = 1.0 - f64::EPSILON / 2.0;

/// Calculate the overlap fraction between two circles.
///
/// The result is the lens (intersection) area divided by the area of the
/// *smaller* circle, not by the union area. Two special cases short-circuit:
///
/// - disjoint circles (`d > r1 + r2`) give `0.0`;
/// - a circle lying entirely inside the other (`d <= |r1 - r2|`) gives `1.0`
///   regardless of the actual area ratio.
///
/// Partial overlaps are bounded to `[0, 1)`: with very unequal radii the lens
/// formula subtracts nearly equal terms, and the rounding error near either
/// boundary would otherwise leave the range.
///
/// # Errors
///
/// Returns `InvalidGeometry` if either circle has a non-positive radius or
/// non-finite coordinates.
///
/// # Example
///
/// ```
/// use circle_eval::metrics::overlap::compute_overlap;
/// use circle_eval::types::Circle;
///
/// let a = Circle::new(0.0, 0.0, 5.0);
/// let b = Circle::new(3.0, 0.0, 5.0);
/// let overlap = compute_overlap(&a, &b).unwrap();
/// assert!(overlap > 0.0 && overlap < 1.0);
/// ```
pub fn compute_overlap(a: &Circle, b: &Circle) -> Result<f64> {
    a.validate()?;
    b.validate()?;

    let (r1, r2) = (a.radius, b.radius);
    let d = a.center_distance(b);

    if d > r1 + r2 {
        return Ok(0.0);
    }
    if d <= (r1 - r2).abs() {
        return Ok(1.0);
    }

    // Clamping only matters at the tangent boundaries where rounding can
    // push the arguments a hair outside the domain.
    let cos1 = ((d * d + r1 * r1 - r2 * r2) / (2.0 * d * r1)).clamp(-1.0, 1.0);
    let cos2 = ((d * d + r2 * r2 - r1 * r1) / (2.0 * d * r2)).clamp(-1.0, 1.0);
    let segment1 = r1 * r1 * cos1.acos();
    let segment2 = r2 * r2 * cos2.acos();
    let kite = 0.5 * ((-d + r1 + r2) * (d + r1 - r2) * (d - r1 + r2) * (d + r1 + r2)).max(0.0).sqrt();

    let smaller = if r1 <= r2 { a } else { b };
    let overlap = (segment1 + segment2 - kite) / smaller.area();
    Ok(overlap.clamp(0.0, MAX_PARTIAL_OVERLAP))
}

/// Calculate the overlap matrix between two sets of circles.
///
/// `result[i][j]` is the overlap between `first[i]` and `second[j]`.
pub fn overlap_matrix(first: &[Circle], second: &[Circle]) -> Result<Vec<Vec<f64>>> {
    first
        .iter()
        .map(|a| second.iter().map(|b| compute_overlap(a, b)).collect())
        .collect()
}
