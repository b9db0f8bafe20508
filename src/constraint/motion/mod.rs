//! Equations-of-motion constraints.

pub use self::motion_constraint::MotionConstraint;
pub use self::motion_dynamics::{MotionDynamics, MotionSnapshot};
pub use self::motion_poly_constraint::MotionPolyConstraint;
pub use self::motion_spring_constraint::MotionSpringConstraint;
pub use self::torque_bound::{PolyTorqueBound, SpringJoint, TorqueBound};

/// Torque recovery accessors, the equality and the torque bound shared by every
/// motion constraint.
///
/// Invoked in the module defining the type, which needs the private fields
/// `dynamics: MotionDynamics` and the `lower`/`upper` torque bound vectors.
macro_rules! impl_motion_constraint(
    ($($T: ident, $name: expr);*) => {$(
        impl $T {
            /// Recovers the actuator torques from a solved `αD` and `λ`.
            ///
            /// Every term of the last update is part of the snapshot, so the torques
            /// satisfy the equality given to the solver.
            pub fn compute_torque(
                &mut self,
                alpha_d: &$crate::math::DVector,
                lambda: &$crate::math::DVector,
            ) {
                self.dynamics.compute_torque(alpha_d, lambda)
            }

            /// The torques of the last [`Self::compute_torque`].
            pub fn torque(&self) -> &$crate::math::DVector {
                self.dynamics.torque()
            }

            /// The torques of the last [`Self::compute_torque`], split per joint.
            pub fn joint_torques(
                &self,
                robot: &dyn $crate::dynamics::MultiBodyDynamics,
            ) -> Vec<Vec<$crate::math::Real>> {
                self.dynamics.joint_torques(robot)
            }

            /// The dynamics quantities of the last update.
            pub fn snapshot(&self) -> &$crate::constraint::MotionSnapshot {
                self.dynamics.snapshot()
            }

            /// The shared equations-of-motion assembly.
            pub fn dynamics(&self) -> &$crate::constraint::MotionDynamics {
                &self.dynamics
            }
        }

        impl $crate::constraint::EqualityConstraint for $T {
            fn name_eq(&self) -> &'static str {
                $name
            }

            fn describe_eq(
                &self,
                robot: &dyn $crate::dynamics::MultiBodyDynamics,
                line: usize,
            ) -> String {
                self.dynamics.describe_line(robot, line)
            }

            fn nr_eq_lines(&self) -> usize {
                self.dynamics.layout().dof_count
            }

            fn a_eq(&self) -> &$crate::math::DMatrix {
                self.dynamics.a_eq()
            }

            fn b_eq(&self) -> &$crate::math::DVector {
                self.dynamics.b_eq()
            }
        }

        impl $crate::constraint::BoundConstraint for $T {
            fn name_bound(&self) -> &'static str {
                $name
            }

            fn describe_bound(
                &self,
                robot: &dyn $crate::dynamics::MultiBodyDynamics,
                line: usize,
            ) -> String {
                self.dynamics
                    .describe_line(robot, self.dynamics.actuated_begin() + line)
            }

            fn begin_var(&self) -> usize {
                self.dynamics.layout().torque_begin()
            }

            fn lower(&self) -> &$crate::math::DVector {
                &self.lower
            }

            fn upper(&self) -> &$crate::math::DVector {
                &self.upper
            }
        }
    )*}
);

mod motion_constraint;
mod motion_dynamics;
mod motion_poly_constraint;
mod motion_spring_constraint;
pub(crate) mod torque_bound;
