use crate::constraint::{Constraint, ConstraintError, MotionDynamics, PolyTorqueBound};
use crate::contact::Contact;
use crate::dynamics::MultiBodyDynamics;
use crate::layout::VariableLayout;
use crate::math::{DVector, Real};
use crate::utils::poly_eval;

/// Equations of motion with torque bounds depending on the joint positions.
///
/// The equality is the one of [`MotionConstraint`](crate::constraint::MotionConstraint).
/// On every update, the bounds of each single-DOF actuated joint are re-evaluated as
/// polynomials of its current position.
#[derive(Clone, Debug)]
pub struct MotionPolyConstraint {
    dynamics: MotionDynamics,
    bound: PolyTorqueBound,
    lower: DVector,
    upper: DVector,
}

impl MotionPolyConstraint {
    /// Creates the constraint for `robot` with the polynomial torque limits `bound`.
    ///
    /// Fails if an actuated joint has more than one DOF.
    pub fn new(
        robot: &dyn MultiBodyDynamics,
        bound: PolyTorqueBound,
    ) -> Result<Self, ConstraintError> {
        bound.validate(robot)?;
        Ok(Self {
            dynamics: MotionDynamics::new(),
            bound,
            lower: DVector::zeros(0),
            upper: DVector::zeros(0),
        })
    }
}

impl Constraint for MotionPolyConstraint {
    fn update_layout(
        &mut self,
        robot: &dyn MultiBodyDynamics,
        layout: &VariableLayout,
        contacts: &[Contact],
    ) -> Result<(), ConstraintError> {
        self.dynamics.update_layout(robot, layout, contacts)?;
        self.lower = DVector::from_element(layout.torque_count, -Real::INFINITY);
        self.upper = DVector::from_element(layout.torque_count, Real::INFINITY);
        Ok(())
    }

    fn update(&mut self, robot: &dyn MultiBodyDynamics) {
        self.dynamics.compute_matrix(robot);

        let actuated_begin = self.dynamics.actuated_begin();
        for joint in 1..robot.joint_count() {
            if robot.joint_dof_count(joint) != 1 {
                continue;
            }

            let i = match robot.joint_dof_offset(joint).checked_sub(actuated_begin) {
                Some(i) if i < self.lower.len() => i,
                _ => continue,
            };

            let q = robot.joint_position(joint)[0];
            self.lower[i] = poly_eval(&self.bound.lower[joint], q);
            self.upper[i] = poly_eval(&self.bound.upper[joint], q);
        }
    }
}

impl_motion_constraint!(MotionPolyConstraint, "MotionPolyConstraint");
