use crate::constraint::ConstraintError;
use crate::dynamics::{floating_base_dof_count, JointId, MultiBodyDynamics};
use crate::math::{DVector, Real};

/// Constant actuator torque limits, one `Vec` per joint in joint order.
///
/// Each entry has one value per degree of freedom of the joint. The entry of the
/// root joint is ignored: the floating base is never actuated.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TorqueBound {
    /// Lower torque limits.
    pub lower: Vec<Vec<Real>>,
    /// Upper torque limits.
    pub upper: Vec<Vec<Real>>,
}

impl TorqueBound {
    /// Creates torque bounds from per-joint lower and upper limits.
    pub fn new(lower: Vec<Vec<Real>>, upper: Vec<Vec<Real>>) -> Self {
        Self { lower, upper }
    }

    /// Symmetric bounds `[-limit, limit]` for each DOF.
    pub fn symmetric(limits: Vec<Vec<Real>>) -> Self {
        let lower = limits
            .iter()
            .map(|joint| joint.iter().map(|l| -l).collect())
            .collect();
        Self {
            lower,
            upper: limits,
        }
    }

    /// Unbounded torques for every joint of `robot`.
    pub fn unbounded(robot: &dyn MultiBodyDynamics) -> Self {
        let fill = |value: Real| -> Vec<Vec<Real>> {
            (0..robot.joint_count())
                .map(|j| vec![value; robot.joint_dof_count(j)])
                .collect()
        };
        Self {
            lower: fill(-Real::INFINITY),
            upper: fill(Real::INFINITY),
        }
    }

    pub(crate) fn validate(&self, robot: &dyn MultiBodyDynamics) -> Result<(), ConstraintError> {
        check_joint_count(robot, self.lower.len())?;
        check_joint_count(robot, self.upper.len())?;

        for joint in 1..robot.joint_count() {
            let expected = robot.joint_dof_count(joint);
            for found in [self.lower[joint].len(), self.upper[joint].len()] {
                if found != expected {
                    return Err(ConstraintError::TorqueBoundSizeMismatch {
                        joint,
                        expected,
                        found,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Actuator torque limits given as polynomials of the joint position.
///
/// Coefficients are in increasing degree order: `[c0, c1, c2]` is `c0 + c1·q + c2·q²`.
/// Only single-DOF joints are supported; joints without DOF may keep empty entries.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PolyTorqueBound {
    /// Coefficients of the lower limit of each joint.
    pub lower: Vec<Vec<Real>>,
    /// Coefficients of the upper limit of each joint.
    pub upper: Vec<Vec<Real>>,
}

impl PolyTorqueBound {
    /// Creates polynomial torque bounds from per-joint coefficients.
    pub fn new(lower: Vec<Vec<Real>>, upper: Vec<Vec<Real>>) -> Self {
        Self { lower, upper }
    }

    pub(crate) fn validate(&self, robot: &dyn MultiBodyDynamics) -> Result<(), ConstraintError> {
        check_joint_count(robot, self.lower.len())?;
        check_joint_count(robot, self.upper.len())?;

        for joint in 1..robot.joint_count() {
            let dof_count = robot.joint_dof_count(joint);
            if dof_count > 1 {
                return Err(ConstraintError::MultiDofPolynomialBound {
                    joint: robot.joint_id(joint),
                    dof_count,
                });
            }
        }

        Ok(())
    }
}

/// A passive spring acting on a joint: `τ_spring = K·q + C·q̇ + O`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SpringJoint {
    /// The joint the spring is attached to.
    pub joint: JointId,
    /// Stiffness `K`.
    pub stiffness: Real,
    /// Damping `C`.
    pub damping: Real,
    /// Free-length offset `O`.
    pub offset: Real,
}

impl SpringJoint {
    /// Creates a new spring.
    pub fn new(joint: JointId, stiffness: Real, damping: Real, offset: Real) -> Self {
        Self {
            joint,
            stiffness,
            damping,
            offset,
        }
    }
}

fn check_joint_count(robot: &dyn MultiBodyDynamics, found: usize) -> Result<(), ConstraintError> {
    if found == robot.joint_count() {
        Ok(())
    } else {
        Err(ConstraintError::TorqueBoundSizeMismatch {
            joint: robot.joint_count(),
            expected: robot.joint_count(),
            found,
        })
    }
}

/// Lays out per-joint values on the torque segment.
///
/// The value of the `k`-th DOF of the `j`-th joint lands at index
/// `joint_dof_offset(j) + k - actuated_begin`; indices beyond `torque_count` are
/// dropped. Unset entries keep `default`.
pub(crate) fn torque_segment(
    robot: &dyn MultiBodyDynamics,
    per_joint: &[Vec<Real>],
    torque_count: usize,
    default: Real,
) -> DVector {
    let actuated_begin = floating_base_dof_count(robot);
    let mut out = DVector::from_element(torque_count, default);

    for joint in 1..robot.joint_count() {
        let begin = robot.joint_dof_offset(joint);
        for (k, value) in per_joint[joint].iter().enumerate() {
            if let Some(i) = (begin + k).checked_sub(actuated_begin) {
                if i < torque_count {
                    out[i] = *value;
                }
            }
        }
    }

    out
}
