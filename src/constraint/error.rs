use crate::contact::ContactId;
use crate::dynamics::{BodyId, JointId};
use crate::math::Real;

/// Error raised when a constraint is configured or laid out inconsistently.
///
/// These errors are reported synchronously by constructors, layout updates and
/// collision-pair management. The per-cycle `update` of a constraint never fails:
/// numerical degeneracies propagate into the assembled blocks instead.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum ConstraintError {
    /// A body id could not be found in the multibody.
    #[error("the body {0} does not exist in the multibody.")]
    UnknownBody(BodyId),
    /// A joint id could not be found in the multibody.
    #[error("the joint {0} does not exist in the multibody.")]
    UnknownJoint(JointId),
    /// The variable layout does not match the robot it is applied to.
    #[error("layout mismatch: {dof_count} DOF and {torque_count} torque variables for a robot with {robot_dof_count} DOF of which {actuated_begin} are not actuated.")]
    LayoutMismatch {
        /// Number of generalized acceleration variables of the layout.
        dof_count: usize,
        /// Number of torque variables of the layout.
        torque_count: usize,
        /// Number of degrees of freedom of the robot.
        robot_dof_count: usize,
        /// Number of non-actuated (floating base) degrees of freedom.
        actuated_begin: usize,
    },
    /// The contacts need a different number of force variables than the layout provides.
    #[error("the contacts need {found} force variables but the layout has {expected}.")]
    ForceCountMismatch {
        /// Force variables of the layout.
        expected: usize,
        /// Force variables needed by the contacts.
        found: usize,
    },
    /// A contact has neither one cone per point nor a single shared cone.
    #[error("the contact {contact} has {points} points but {cones} friction cones.")]
    MalformedContact {
        /// The faulty contact.
        contact: ContactId,
        /// Its number of points.
        points: usize,
        /// Its number of cones.
        cones: usize,
    },
    /// A torque bound does not have the shape of the joint it applies to.
    #[error("torque bound of the joint {joint}: expected {expected} values, found {found}.")]
    TorqueBoundSizeMismatch {
        /// The joint index, or the joint count when the outer vector is wrong.
        joint: usize,
        /// Expected number of values.
        expected: usize,
        /// Provided number of values.
        found: usize,
    },
    /// Polynomial torque bounds only support joints with exactly one DOF.
    #[error("polynomial torque bounds require single-DOF joints but {joint} has {dof_count} DOF.")]
    MultiDofPolynomialBound {
        /// The faulty joint.
        joint: JointId,
        /// Its number of degrees of freedom.
        dof_count: usize,
    },
    /// A spring was attached to a joint without any degree of freedom.
    #[error("the joint {0} has no degree of freedom.")]
    ImmobileJoint(JointId),
    /// Collision distances must satisfy `0 <= ds < di` and damping must be non-negative.
    #[error("invalid collision parameters: di = {di}, ds = {ds}, damping = {damping}.")]
    InvalidCollisionParams {
        /// Influence distance.
        di: Real,
        /// Stopping distance.
        ds: Real,
        /// Damping gain.
        damping: Real,
    },
    /// The proximity engine cannot compute closest points between the two shapes.
    #[error("closest points are not supported between the proxies of {body1} and {body2}.")]
    UnsupportedShapePair {
        /// First body of the pair.
        body1: BodyId,
        /// Second body of the pair.
        body2: BodyId,
    },
    /// The control step must be strictly positive.
    #[error("the control step must be positive, got {0}.")]
    InvalidControlStep(Real),
}
