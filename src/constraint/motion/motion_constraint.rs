use crate::constraint::motion::torque_bound::torque_segment;
use crate::constraint::{Constraint, ConstraintError, MotionDynamics, TorqueBound};
use crate::contact::Contact;
use crate::dynamics::MultiBodyDynamics;
use crate::layout::VariableLayout;
use crate::math::{DVector, Real};

/// Equations of motion with constant actuator torque bounds.
///
/// Produces the equality `H·αD - Σ J_pᵗ·g·λ - S·τ = -C` and the box bound
/// `τ_min ≤ τ ≤ τ_max` on the torque segment.
#[derive(Clone, Debug)]
pub struct MotionConstraint {
    dynamics: MotionDynamics,
    bound: TorqueBound,
    lower: DVector,
    upper: DVector,
}

impl MotionConstraint {
    /// Creates the constraint for `robot` with the torque limits `bound`.
    pub fn new(robot: &dyn MultiBodyDynamics, bound: TorqueBound) -> Result<Self, ConstraintError> {
        bound.validate(robot)?;
        Ok(Self {
            dynamics: MotionDynamics::new(),
            bound,
            lower: DVector::zeros(0),
            upper: DVector::zeros(0),
        })
    }
}

impl Constraint for MotionConstraint {
    fn update_layout(
        &mut self,
        robot: &dyn MultiBodyDynamics,
        layout: &VariableLayout,
        contacts: &[Contact],
    ) -> Result<(), ConstraintError> {
        self.dynamics.update_layout(robot, layout, contacts)?;
        self.lower = torque_segment(robot, &self.bound.lower, layout.torque_count, -Real::INFINITY);
        self.upper = torque_segment(robot, &self.bound.upper, layout.torque_count, Real::INFINITY);
        Ok(())
    }

    fn update(&mut self, robot: &dyn MultiBodyDynamics) {
        self.dynamics.compute_matrix(robot);
    }
}

impl_motion_constraint!(MotionConstraint, "MotionConstraint");
