use crate::constraint::motion::torque_bound::torque_segment;
use crate::constraint::{Constraint, ConstraintError, MotionDynamics, SpringJoint, TorqueBound};
use crate::contact::Contact;
use crate::dynamics::MultiBodyDynamics;
use crate::layout::VariableLayout;
use crate::math::{DVector, Real};

#[derive(Copy, Clone, Debug)]
struct ResolvedSpring {
    joint: usize,
    dof: usize,
    stiffness: Real,
    damping: Real,
    offset: Real,
}

/// Equations of motion with passive joint springs.
///
/// Same blocks as [`MotionConstraint`](crate::constraint::MotionConstraint), except
/// that each spring subtracts `K·q + C·q̇ + O` from the right-hand side row of the
/// first DOF of its joint.
#[derive(Clone, Debug)]
pub struct MotionSpringConstraint {
    dynamics: MotionDynamics,
    bound: TorqueBound,
    springs: Vec<ResolvedSpring>,
    lower: DVector,
    upper: DVector,
}

impl MotionSpringConstraint {
    /// Creates the constraint for `robot` with the torque limits `bound` and `springs`.
    ///
    /// Fails if a spring references a joint unknown to `robot`, or one without DOF.
    pub fn new(
        robot: &dyn MultiBodyDynamics,
        bound: TorqueBound,
        springs: &[SpringJoint],
    ) -> Result<Self, ConstraintError> {
        bound.validate(robot)?;

        let springs = springs
            .iter()
            .map(|spring| {
                let joint = robot
                    .joint_index(spring.joint)
                    .ok_or(ConstraintError::UnknownJoint(spring.joint))?;
                if robot.joint_dof_count(joint) == 0 {
                    return Err(ConstraintError::ImmobileJoint(spring.joint));
                }

                Ok(ResolvedSpring {
                    joint,
                    dof: robot.joint_dof_offset(joint),
                    stiffness: spring.stiffness,
                    damping: spring.damping,
                    offset: spring.offset,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            dynamics: MotionDynamics::new(),
            bound,
            springs,
            lower: DVector::zeros(0),
            upper: DVector::zeros(0),
        })
    }

    /// Number of springs.
    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }
}

impl Constraint for MotionSpringConstraint {
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

        let rhs = self.dynamics.rhs_mut();
        for spring in &self.springs {
            let q = robot.joint_position(spring.joint)[0];
            let qd = robot.joint_velocity(spring.joint)[0];
            rhs[spring.dof] -= spring.stiffness * q + spring.damping * qd + spring.offset;
        }
    }
}

impl_motion_constraint!(MotionSpringConstraint, "MotionSpringConstraint");
