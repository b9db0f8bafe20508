//! The constraints of the whole-body QP.
//!
//! Every constraint follows the same two-phase protocol:
//!
//! 1. [`Constraint::update_layout`] is called whenever the structure of the problem
//!    changes (contacts added or removed, variable counts changed). It resizes the
//!    internal caches and the output blocks.
//! 2. [`Constraint::update`] is called once per control cycle. It overwrites the
//!    output blocks in place, without reallocating.
//!
//! What a constraint produces is described by the capability traits it implements:
//! [`EqualityConstraint`] (`A·x = b`), [`InequalityConstraint`] (`A·x ≤ b`) and
//! [`BoundConstraint`] (`lower ≤ x[begin..] ≤ upper`). All matrices span the full
//! solution vector `x = [αD; λ; τ]` described by a
//! [`VariableLayout`](crate::layout::VariableLayout).

pub use self::contact_acc_constraint::ContactAccConstraint;
pub use self::error::ConstraintError;
pub use self::motion::{
    MotionConstraint, MotionDynamics, MotionPolyConstraint, MotionSnapshot,
    MotionSpringConstraint, PolyTorqueBound, SpringJoint, TorqueBound,
};
pub use self::positive_lambda::PositiveLambda;
pub use self::self_collision::{
    CollisionPair, CollisionParams, SelfCollisionConstraint, ShapeProxy, SignedClosestPoints,
};

use crate::contact::Contact;
use crate::dynamics::{floating_base_dof_count, MultiBodyDynamics};
use crate::layout::VariableLayout;
use crate::math::{DMatrix, DVector};

mod contact_acc_constraint;
mod error;
mod motion;
mod positive_lambda;
mod self_collision;

/// The layout and update protocol shared by all constraints.
pub trait Constraint {
    /// Resizes the constraint for a new variable layout and contact set.
    ///
    /// Must be called before the first [`Self::update`] and after every structural
    /// change. Inconsistencies between `layout`, `contacts` and `robot` are reported
    /// here.
    fn update_layout(
        &mut self,
        robot: &dyn MultiBodyDynamics,
        layout: &VariableLayout,
        contacts: &[Contact],
    ) -> Result<(), ConstraintError>;

    /// Recomputes the constraint blocks for the current state of `robot`.
    fn update(&mut self, robot: &dyn MultiBodyDynamics);
}

/// A constraint of the form `A·x = b`.
pub trait EqualityConstraint: Constraint {
    /// Name of the constraint, for diagnostics.
    fn name_eq(&self) -> &'static str;
    /// Human-readable description of the `line`-th row.
    fn describe_eq(&self, robot: &dyn MultiBodyDynamics, line: usize) -> String;
    /// Number of rows.
    fn nr_eq_lines(&self) -> usize;
    /// The matrix `A`.
    fn a_eq(&self) -> &DMatrix;
    /// The vector `b`.
    fn b_eq(&self) -> &DVector;
}

/// A constraint of the form `A·x ≤ b`.
pub trait InequalityConstraint: Constraint {
    /// Name of the constraint, for diagnostics.
    fn name_ineq(&self) -> &'static str;
    /// Human-readable description of the `line`-th row.
    fn describe_ineq(&self, robot: &dyn MultiBodyDynamics, line: usize) -> String;
    /// Number of rows.
    fn nr_ineq_lines(&self) -> usize;
    /// The matrix `A`.
    fn a_ineq(&self) -> &DMatrix;
    /// The vector `b`.
    fn b_ineq(&self) -> &DVector;
}

/// A box constraint `lower ≤ x[begin_var..begin_var + lower.len()] ≤ upper`.
pub trait BoundConstraint: Constraint {
    /// Name of the constraint, for diagnostics.
    fn name_bound(&self) -> &'static str;
    /// Human-readable description of the `line`-th bounded variable.
    fn describe_bound(&self, robot: &dyn MultiBodyDynamics, line: usize) -> String;
    /// Index of the first bounded variable.
    fn begin_var(&self) -> usize;
    /// The lower bounds.
    fn lower(&self) -> &DVector;
    /// The upper bounds.
    fn upper(&self) -> &DVector;
}

/// Checks that the `αD` segment of `layout` covers exactly the DOF of `robot`.
pub(crate) fn check_robot_dofs(
    robot: &dyn MultiBodyDynamics,
    layout: &VariableLayout,
) -> Result<(), ConstraintError> {
    if layout.dof_count == robot.dof_count() {
        Ok(())
    } else {
        Err(ConstraintError::LayoutMismatch {
            dof_count: layout.dof_count,
            torque_count: layout.torque_count,
            robot_dof_count: robot.dof_count(),
            actuated_begin: floating_base_dof_count(robot),
        })
    }
}
