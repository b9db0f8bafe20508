use crate::math::{DMatrix, Point, Real, Rotation, Vector, LINEAR_ROWS_BEGIN, SPATIAL_DIM};
use na::{Dyn, MatrixView, U1, U3};

/// Re-expresses at a body-local `point` a Jacobian computed at the body origin.
///
/// Both Jacobians have their rows ordered as `[angular; linear]` and expressed with
/// the world orientation. The linear part is shifted by `ω × r` where `r` is the
/// body-to-point lever arm rotated into the world frame:
///
/// ```text
/// J_p = [ J_ω ; J_v - [r]× J_ω ]
/// ```
pub fn transport_jacobian(
    jac_origin: &DMatrix,
    body_rotation: &Rotation,
    point: &Point,
    out: &mut DMatrix,
) {
    assert_eq!(jac_origin.nrows(), SPATIAL_DIM);
    assert_eq!(jac_origin.shape(), out.shape());

    let r = body_rotation * point.coords;

    for (col_in, mut col_out) in jac_origin.column_iter().zip(out.column_iter_mut()) {
        let angular = Vector::new(col_in[0], col_in[1], col_in[2]);
        let shift = angular.cross(&r);

        col_out[0] = col_in[0];
        col_out[1] = col_in[1];
        col_out[2] = col_in[2];
        col_out[3] = col_in[3] + shift.x;
        col_out[4] = col_in[4] + shift.y;
        col_out[5] = col_in[5] + shift.z;
    }
}

/// Expands a chain Jacobian to all the degrees of freedom of the robot.
///
/// `chain_dofs[i]` gives the column of `full` receiving the `i`-th column of `chain`.
/// The other columns of `full` are set to zero.
pub fn full_jacobian(chain_dofs: &[usize], chain: &DMatrix, full: &mut DMatrix) {
    assert_eq!(chain.ncols(), chain_dofs.len());
    assert_eq!(chain.nrows(), full.nrows());

    full.fill(0.0);

    for (col, &dof) in chain_dofs.iter().enumerate() {
        full.column_mut(dof).copy_from(&chain.column(col));
    }
}

/// The translational rows of a spatial Jacobian.
pub fn linear_rows(jac: &DMatrix) -> MatrixView<'_, Real, U3, Dyn, U1, Dyn> {
    jac.fixed_rows::<3>(LINEAR_ROWS_BEGIN)
}
