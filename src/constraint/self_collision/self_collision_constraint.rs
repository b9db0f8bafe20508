use crate::constraint::{
    check_robot_dofs, CollisionPair, CollisionParams, Constraint, ConstraintError,
    InequalityConstraint, ShapeProxy,
};
use crate::contact::Contact;
use crate::dynamics::{full_jacobian, linear_rows, BodyId, MultiBodyDynamics};
use crate::layout::VariableLayout;
use crate::math::{DMatrix, DVector, Real, Vector, SPATIAL_DIM};

/// Below this distance the witness points are considered coincident and the normal of
/// the previous update is reused.
const MIN_NORMAL_DISTANCE: Real = 1.0e-9;

/// Keeps pairs of robot bodies apart with a velocity damper on their distance.
///
/// Each pair contributes one row `A·x ≤ b`. With `d` the signed distance between
/// the proxies, `n` the unit normal from the second body toward the first and `J1`,
/// `J2` the translational Jacobians of the witness points, a pair closer than `di`
/// requires the predicted approach velocity after one control step to stay below
/// the damper:
///
/// ```text
/// -step·nᵗ(J1 - J2)·αD ≤ damper(d) + nᵗ(J1 - J2)·α
///                         + step·ṅᵗ(J1 - J2)·α + step·nᵗ(J̇1 - J̇2)·α
/// ```
///
/// where `ṅ` is estimated from the normal of the previous update, and taken as zero
/// on the first update of a pair. Pairs farther than `di` produce a zero row and a
/// zero bound.
#[derive(Clone, Debug)]
pub struct SelfCollisionConstraint {
    step: Real,
    pairs: Vec<CollisionPair>,
    dof_count: usize,
    var_count: usize,
    alpha: DVector,
    full_jac1: DMatrix,
    full_jac2: DMatrix,
    row: DVector,
    a_ineq: DMatrix,
    b_ineq: DVector,
}

impl SelfCollisionConstraint {
    /// Creates a constraint without any pair, for a control cycle of `step` seconds.
    pub fn new(step: Real) -> Result<Self, ConstraintError> {
        if step.is_nan() || step <= 0.0 {
            return Err(ConstraintError::InvalidControlStep(step));
        }

        Ok(Self {
            step,
            pairs: Vec::new(),
            dof_count: 0,
            var_count: 0,
            alpha: DVector::zeros(0),
            full_jac1: DMatrix::zeros(SPATIAL_DIM, 0),
            full_jac2: DMatrix::zeros(SPATIAL_DIM, 0),
            row: DVector::zeros(0),
            a_ineq: DMatrix::zeros(0, 0),
            b_ineq: DVector::zeros(0),
        })
    }

    /// The control step.
    pub fn step(&self) -> Real {
        self.step
    }

    /// Starts monitoring the pair made of `proxy1` on `body1` and `proxy2` on `body2`.
    ///
    /// The blocks are resized immediately; the new row is filled by the next update.
    pub fn add_collision(
        &mut self,
        robot: &dyn MultiBodyDynamics,
        body1: BodyId,
        proxy1: ShapeProxy,
        body2: BodyId,
        proxy2: ShapeProxy,
        params: CollisionParams,
    ) -> Result<(), ConstraintError> {
        let index1 = robot
            .body_index(body1)
            .ok_or(ConstraintError::UnknownBody(body1))?;
        let index2 = robot
            .body_index(body2)
            .ok_or(ConstraintError::UnknownBody(body2))?;

        // Unsupported shape pairs are reported now rather than on every update.
        if proxy1.signed_closest_points(&proxy2).is_err() {
            return Err(ConstraintError::UnsupportedShapePair { body1, body2 });
        }

        let chain_lens = [
            robot.chain_dofs(index1).len(),
            robot.chain_dofs(index2).len(),
        ];
        self.pairs.push(CollisionPair::new(
            body1, index1, proxy1, body2, index2, proxy2, params, chain_lens,
        ));
        self.resize_blocks();

        log::debug!(
            "SelfCollisionConstraint: monitoring {}/{} (di = {}, ds = {}), {} pairs.",
            body1,
            body2,
            params.di,
            params.ds,
            self.pairs.len()
        );
        Ok(())
    }

    /// Stops monitoring the pair `(body1, body2)`.
    ///
    /// Returns `false` if no such pair was monitored.
    pub fn remove_collision(&mut self, body1: BodyId, body2: BodyId) -> bool {
        let Some(i) = self
            .pairs
            .iter()
            .position(|p| p.body1_id == body1 && p.body2_id == body2)
        else {
            return false;
        };

        let _ = self.pairs.remove(i);
        self.resize_blocks();
        log::debug!(
            "SelfCollisionConstraint: {}/{} removed, {} pairs.",
            body1,
            body2,
            self.pairs.len()
        );
        true
    }

    /// Removes every pair.
    pub fn reset(&mut self) {
        self.pairs.clear();
        self.resize_blocks();
    }

    /// Number of monitored pairs.
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// The monitored pairs, in row order.
    pub fn pairs(&self) -> &[CollisionPair] {
        &self.pairs
    }

    fn resize_blocks(&mut self) {
        self.a_ineq = DMatrix::zeros(self.pairs.len(), self.var_count);
        self.b_ineq = DVector::zeros(self.pairs.len());
    }
}

impl Constraint for SelfCollisionConstraint {
    fn update_layout(
        &mut self,
        robot: &dyn MultiBodyDynamics,
        layout: &VariableLayout,
        _contacts: &[Contact],
    ) -> Result<(), ConstraintError> {
        check_robot_dofs(robot, layout)?;

        self.dof_count = layout.dof_count;
        self.var_count = layout.var_count();
        self.alpha = DVector::zeros(layout.dof_count);
        self.full_jac1 = DMatrix::zeros(SPATIAL_DIM, layout.dof_count);
        self.full_jac2 = DMatrix::zeros(SPATIAL_DIM, layout.dof_count);
        self.row = DVector::zeros(layout.dof_count);
        self.resize_blocks();
        Ok(())
    }

    fn update(&mut self, robot: &dyn MultiBodyDynamics) {
        let Self {
            step,
            pairs,
            dof_count,
            alpha,
            full_jac1,
            full_jac2,
            row,
            a_ineq,
            b_ineq,
            ..
        } = self;
        let step = *step;

        robot.generalized_velocity(alpha);

        for (i, pair) in pairs.iter_mut().enumerate() {
            a_ineq.row_mut(i).fill(0.0);
            b_ineq[i] = 0.0;

            pair.proxy1.set_body_pose(&robot.body_pose(pair.body1));
            pair.proxy2.set_body_pose(&robot.body_pose(pair.body2));

            let points = match pair.proxy1.signed_closest_points(&pair.proxy2) {
                Ok(Some(points)) => points,
                Ok(None) | Err(_) => {
                    log::warn!(
                        "SelfCollisionConstraint: no closest points between {} and {}, row disabled.",
                        pair.body1_id,
                        pair.body2_id
                    );
                    pair.distance = Real::INFINITY;
                    continue;
                }
            };

            let dist = points.distance();
            pair.distance = dist;

            let normal = if dist.abs() > MIN_NORMAL_DISTANCE {
                (points.world1 - points.world2) / dist
            } else {
                log::warn!(
                    "SelfCollisionConstraint: {} and {} are coincident, reusing the last normal.",
                    pair.body1_id,
                    pair.body2_id
                );
                pair.normal_prev
            };

            if dist < pair.params.di && normal != Vector::zeros() {
                let damper = pair.params.damper(dist);
                // Without a previous measurement the normal is taken as steady.
                let normal_dot = if pair.normal_prev == Vector::zeros() {
                    Vector::zeros()
                } else {
                    (normal - pair.normal_prev) / step
                };

                robot.jacobian(pair.body1, &points.body1, &mut pair.jac1);
                robot.jacobian(pair.body2, &points.body2, &mut pair.jac2);
                full_jacobian(robot.chain_dofs(pair.body1), &pair.jac1, full_jac1);
                full_jacobian(robot.chain_dofs(pair.body2), &pair.jac2, full_jac2);

                let jac1 = linear_rows(full_jac1);
                let jac2 = linear_rows(full_jac2);
                let rel_vel: Vector = jac1 * &*alpha - jac2 * &*alpha;

                // -step·(J1 - J2)ᵗ·n
                row.gemv_tr(-step, &jac1, &normal, 0.0);
                row.gemv_tr(step, &jac2, &normal, 1.0);

                robot.jacobian_dot(pair.body1, &points.body1, &mut pair.jac1);
                robot.jacobian_dot(pair.body2, &points.body2, &mut pair.jac2);
                full_jacobian(robot.chain_dofs(pair.body1), &pair.jac1, full_jac1);
                full_jacobian(robot.chain_dofs(pair.body2), &pair.jac2, full_jac2);

                let rel_acc: Vector =
                    linear_rows(full_jac1) * &*alpha - linear_rows(full_jac2) * &*alpha;

                let jqdn = rel_vel.dot(&normal);
                let jqdnd = rel_vel.dot(&normal_dot) * step;
                let jdqdn = rel_acc.dot(&normal) * step;

                a_ineq
                    .view_mut((i, 0), (1, *dof_count))
                    .tr_copy_from(&*row);
                b_ineq[i] = damper + jqdn + jqdnd + jdqdn;
            }

            pair.normal_prev = normal;
        }
    }
}

impl InequalityConstraint for SelfCollisionConstraint {
    fn name_ineq(&self) -> &'static str {
        "SelfCollisionConstraint"
    }

    fn describe_ineq(&self, _robot: &dyn MultiBodyDynamics, line: usize) -> String {
        match self.pairs.get(line) {
            Some(pair) => format!(
                "{}/{}: distance {} (di = {}, ds = {})",
                pair.body1_id, pair.body2_id, pair.distance, pair.params.di, pair.params.ds
            ),
            None => String::new(),
        }
    }

    fn nr_ineq_lines(&self) -> usize {
        self.pairs.len()
    }

    fn a_ineq(&self) -> &DMatrix {
        &self.a_ineq
    }

    fn b_ineq(&self) -> &DVector {
        &self.b_ineq
    }
}
