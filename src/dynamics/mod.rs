//! Interface to the rigid-body dynamics engine.
//!
//! The constraints of this crate never compute kinematics or dynamics themselves:
//! they query an implementor of [`MultiBodyDynamics`] evaluated at the robot's
//! current configuration and velocity, and only combine the results.

pub use self::jacobian::{full_jacobian, linear_rows, transport_jacobian};

use crate::math::{DMatrix, DVector, Isometry, Point, Real};
use std::fmt;

mod jacobian;

/// Identifier of a body of the robot, as known by the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BodyId(pub i32);

/// Identifier of a joint of the robot, as known by the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct JointId(pub i32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "joint#{}", self.0)
    }
}

/// A multibody evaluated at its current configuration `q` and velocity `α`.
///
/// Joints and bodies are addressed by their index in the multibody. Joint `0` is the
/// root joint: when it is a free flyer its degrees of freedom form the floating base,
/// which is never actuated.
///
/// # Jacobians
///
/// [`Self::jacobian`] and [`Self::jacobian_dot`] return *chain* Jacobians: a `6 × n`
/// matrix whose columns only cover the `n` degrees of freedom moving the body (see
/// [`Self::chain_dofs`]). The first three rows are angular, the last three are linear,
/// and both are expressed with the orientation of the world frame. Use
/// [`full_jacobian`] to expand them to all the degrees of freedom of the robot.
pub trait MultiBodyDynamics {
    /// Number of degrees of freedom (size of `α`).
    fn dof_count(&self) -> usize;

    /// Number of joints, including the root joint.
    fn joint_count(&self) -> usize;

    /// The identifier of the `joint`-th joint.
    fn joint_id(&self, joint: usize) -> JointId;

    /// Index of the joint identified by `id`, if any.
    fn joint_index(&self, id: JointId) -> Option<usize>;

    /// Number of degrees of freedom of the `joint`-th joint.
    fn joint_dof_count(&self, joint: usize) -> usize;

    /// Position of the first degree of freedom of the `joint`-th joint in `α`.
    fn joint_dof_offset(&self, joint: usize) -> usize;

    /// Current configuration parameters of the `joint`-th joint.
    fn joint_position(&self, joint: usize) -> &[Real];

    /// Current velocity of the `joint`-th joint.
    fn joint_velocity(&self, joint: usize) -> &[Real];

    /// Writes the generalized velocity `α` into `out` (of size [`Self::dof_count`]).
    fn generalized_velocity(&self, out: &mut DVector);

    /// Number of bodies.
    fn body_count(&self) -> usize;

    /// Index of the body identified by `id`, if any.
    fn body_index(&self, id: BodyId) -> Option<usize>;

    /// World pose of the `body`-th body.
    fn body_pose(&self, body: usize) -> Isometry;

    /// For each column of the chain Jacobian of `body`, the degree of freedom of the
    /// robot it corresponds to.
    fn chain_dofs(&self, body: usize) -> &[usize];

    /// Writes into `out` (`6 × chain_dofs(body).len()`) the Jacobian of the body-local
    /// `point` of `body`.
    fn jacobian(&self, body: usize, point: &Point, out: &mut DMatrix);

    /// Writes into `out` (`6 × chain_dofs(body).len()`) the time derivative of the
    /// Jacobian of the body-local `point` of `body`.
    fn jacobian_dot(&self, body: usize, point: &Point, out: &mut DMatrix);

    /// Writes the joint-space inertia matrix `H(q)` into `out` (`dof × dof`).
    fn inertia_matrix(&self, out: &mut DMatrix);

    /// Writes the bias forces `C(q, α)` (Coriolis, centrifugal and gravity) into `out`.
    fn bias_forces(&self, out: &mut DVector);
}

/// Number of degrees of freedom of the root joint, i.e., the non-actuated floating base.
pub fn floating_base_dof_count(robot: &dyn MultiBodyDynamics) -> usize {
    if robot.joint_count() == 0 {
        0
    } else {
        robot.joint_dof_count(0)
    }
}

/// Finds the joint owning the `dof`-th degree of freedom and its local DOF index.
pub fn joint_from_dof(robot: &dyn MultiBodyDynamics, dof: usize) -> Option<(usize, usize)> {
    (0..robot.joint_count()).find_map(|joint| {
        let begin = robot.joint_dof_offset(joint);
        let count = robot.joint_dof_count(joint);
        (dof >= begin && dof < begin + count).then_some((joint, dof - begin))
    })
}
