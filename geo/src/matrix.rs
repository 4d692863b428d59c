//! Dense `(D, N)` column-major matrix helpers.
//!
//! These mirror the handful of NumPy idioms the rendering pipeline's
//! original prototype leaned on (`normalize`, `cNormalize`, `cross(...,
//! axis=0)`), expressed over [`ndarray::Array2`] instead of re-deriving the
//! same shapes from a point-wise vector type.

use ndarray::Array2;

use crate::error::GeoError;

/// Divide every entry of `m` by `m`'s Frobenius norm (the norm of the whole
/// matrix, not column-wise). Used for single-column "vector" matrices such
/// as a camera's view direction.
pub fn normalize(m: &Array2<f64>) -> Array2<f64> {
    let n = frobenius_norm(m);
    m / n
}

/// Divide each column of `m` by its own Euclidean norm. Columns whose norm
/// is zero become all-zero (rather than `NaN`), matching the original
/// prototype's `where(isnan(n), 0, n)` guard.
pub fn column_normalize(m: &Array2<f64>) -> Array2<f64> {
    let mut out = m.clone();
    for mut col in out.columns_mut() {
        let n = col.mapv(|x| x * x).sum().sqrt();
        if n == 0.0 {
            col.fill(0.0);
        } else {
            col /= n;
        }
    }
    out
}

/// Column-wise cross product of two `(3, N)` matrices.
pub fn cross(a: &Array2<f64>, b: &Array2<f64>) -> Result<Array2<f64>, GeoError> {
    let (ra, ca) = a.dim();
    let (rb, cb) = b.dim();
    if ra != 3 || rb != 3 {
        return Err(GeoError::ShapeMismatch {
            expected: (3, ca),
            got: (ra, ca),
        });
    }
    if ca != cb {
        return Err(GeoError::ShapeMismatch {
            expected: (3, ca),
            got: (3, cb),
        });
    }

    let mut out = Array2::zeros((3, ca));
    for j in 0..ca {
        let (ax, ay, az) = (a[[0, j]], a[[1, j]], a[[2, j]]);
        let (bx, by, bz) = (b[[0, j]], b[[1, j]], b[[2, j]]);
        out[[0, j]] = ay * bz - az * by;
        out[[1, j]] = az * bx - ax * bz;
        out[[2, j]] = ax * by - ay * bx;
    }
    Ok(out)
}

fn frobenius_norm(m: &Array2<f64>) -> f64 {
    m.mapv(|x| x * x).sum().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn normalize_divides_by_whole_matrix_norm() {
        let v = arr2(&[[3.0], [4.0], [0.0]]);
        let n = normalize(&v);
        assert_eq!(n[[0, 0]], 0.6);
        assert_eq!(n[[1, 0]], 0.8);
        assert_eq!(n[[2, 0]], 0.0);
    }

    #[test]
    fn column_normalize_zeroes_out_zero_norm_columns() {
        let m = arr2(&[[3.0, 0.0], [4.0, 0.0], [0.0, 0.0]]);
        let n = column_normalize(&m);
        assert_eq!(n[[0, 0]], 0.6);
        assert_eq!(n[[1, 0]], 0.8);
        assert_eq!(n[[0, 1]], 0.0);
        assert_eq!(n[[1, 1]], 0.0);
        assert_eq!(n[[2, 1]], 0.0);
        assert!(n.iter().all(|x| !x.is_nan()));
    }

    #[test]
    fn cross_is_column_wise() {
        let x = arr2(&[[1.0, 0.0], [0.0, 1.0], [0.0, 0.0]]);
        let y = arr2(&[[0.0, 1.0], [1.0, 0.0], [0.0, 0.0]]);
        let z = cross(&x, &y).unwrap();
        assert_eq!(z[[0, 0]], 0.0);
        assert_eq!(z[[1, 0]], 0.0);
        assert_eq!(z[[2, 0]], 1.0);
        assert_eq!(z[[2, 1]], -1.0);
    }

    #[test]
    fn cross_rejects_shape_mismatch() {
        let a = arr2(&[[1.0], [0.0], [0.0]]);
        let b = arr2(&[[1.0, 2.0], [0.0, 0.0], [0.0, 0.0]]);
        assert!(cross(&a, &b).is_err());
    }

    #[test]
    fn normalize_is_idempotent() {
        let v = arr2(&[[3.0], [4.0], [0.0]]);
        let once = normalize(&v);
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn column_normalize_is_idempotent_column_wise() {
        let m = arr2(&[[3.0, 0.0, 1.0], [4.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
        let once = column_normalize(&m);
        let twice = column_normalize(&once);
        assert_eq!(once, twice);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use ndarray::arr2;
    use proptest::prelude::*;

    fn coord() -> impl Strategy<Value = f64> {
        -100.0f64..100.0f64
    }

    proptest! {
        #[test]
        fn cross_is_perpendicular_to_both_operands(
            (ax, ay, az) in (coord(), coord(), coord()),
            (bx, by, bz) in (coord(), coord(), coord()),
        ) {
            let a = arr2(&[[ax], [ay], [az]]);
            let b = arr2(&[[bx], [by], [bz]]);
            let c = cross(&a, &b).unwrap();

            let dot_a = c[[0, 0]] * ax + c[[1, 0]] * ay + c[[2, 0]] * az;
            let dot_b = c[[0, 0]] * bx + c[[1, 0]] * by + c[[2, 0]] * bz;
            prop_assert!(dot_a.abs() < 1e-6);
            prop_assert!(dot_b.abs() < 1e-6);
        }

        #[test]
        fn column_normalize_yields_unit_norm_or_zero((x, y, z) in (coord(), coord(), coord())) {
            let m = arr2(&[[x], [y], [z]]);
            let n = column_normalize(&m);
            let out_norm = (n[[0, 0]] * n[[0, 0]] + n[[1, 0]] * n[[1, 0]] + n[[2, 0]] * n[[2, 0]]).sqrt();
            let in_norm = (x * x + y * y + z * z).sqrt();
            if in_norm == 0.0 {
                prop_assert_eq!(out_norm, 0.0);
            } else {
                prop_assert!((out_norm - 1.0).abs() < 1e-6);
            }
        }

        #[test]
        fn normalize_is_idempotent_for_any_nonzero_vector(
            (x, y, z) in (coord(), coord(), coord()),
        ) {
            prop_assume!(x != 0.0 || y != 0.0 || z != 0.0);
            let m = arr2(&[[x], [y], [z]]);
            let once = normalize(&m);
            let twice = normalize(&once);
            prop_assert!((once[[0, 0]] - twice[[0, 0]]).abs() < 1e-9);
            prop_assert!((once[[1, 0]] - twice[[1, 0]]).abs() < 1e-9);
            prop_assert!((once[[2, 0]] - twice[[2, 0]]).abs() < 1e-9);
        }
    }
}
