//! A hand-configured multibody used by the constraint tests.
//!
//! Every quantity the constraints query is stored explicitly. Chain Jacobians are
//! given at the body origin and transported to the queried point.

use wbqp::dynamics::transport_jacobian;
use wbqp::math::{DMatrix, DVector, Isometry, Point, Real};
use wbqp::{BodyId, JointId, MultiBodyDynamics};

pub struct MockJoint {
    pub id: JointId,
    pub dof_count: usize,
    pub dof_offset: usize,
}

pub struct MockBody {
    pub id: BodyId,
    pub pose: Isometry,
    pub chain_dofs: Vec<usize>,
    pub jac: DMatrix,
    pub jac_dot: DMatrix,
}

pub struct MockRobot {
    pub joints: Vec<MockJoint>,
    pub bodies: Vec<MockBody>,
    pub q: DVector,
    pub alpha: DVector,
    pub inertia: DMatrix,
    pub bias: DVector,
}

impl MockRobot {
    /// A robot whose root joint (id 0) has `root_dofs` DOF.
    pub fn new(root_dofs: usize) -> Self {
        let mut robot = Self {
            joints: Vec::new(),
            bodies: Vec::new(),
            q: DVector::zeros(0),
            alpha: DVector::zeros(0),
            inertia: DMatrix::zeros(0, 0),
            bias: DVector::zeros(0),
        };
        robot.add_joint(0, root_dofs);
        robot
    }

    /// Appends a joint; returns the index of its first DOF.
    pub fn add_joint(&mut self, id: i32, dof_count: usize) -> usize {
        let dof_offset = self.dof_count();
        self.joints.push(MockJoint {
            id: JointId(id),
            dof_count,
            dof_offset,
        });

        let dofs = dof_offset + dof_count;
        self.q = DVector::zeros(dofs);
        self.alpha = DVector::zeros(dofs);
        self.inertia = DMatrix::identity(dofs, dofs);
        self.bias = DVector::zeros(dofs);
        dof_offset
    }

    /// Adds a body moved by `chain_dofs`, with the given origin Jacobian columns.
    pub fn add_body(&mut self, id: i32, pose: Isometry, chain_dofs: Vec<usize>, columns: &[[Real; 6]]) {
        assert_eq!(chain_dofs.len(), columns.len());
        let jac = DMatrix::from_fn(6, columns.len(), |r, c| columns[c][r]);
        let jac_dot = DMatrix::zeros(6, columns.len());
        self.bodies.push(MockBody {
            id: BodyId(id),
            pose,
            chain_dofs,
            jac,
            jac_dot,
        });
    }

    pub fn body_mut(&mut self, id: i32) -> &mut MockBody {
        self.bodies
            .iter_mut()
            .find(|b| b.id == BodyId(id))
            .expect("unknown body")
    }
}

impl MultiBodyDynamics for MockRobot {
    fn dof_count(&self) -> usize {
        self.joints
            .last()
            .map_or(0, |j| j.dof_offset + j.dof_count)
    }

    fn joint_count(&self) -> usize {
        self.joints.len()
    }

    fn joint_id(&self, joint: usize) -> JointId {
        self.joints[joint].id
    }

    fn joint_index(&self, id: JointId) -> Option<usize> {
        self.joints.iter().position(|j| j.id == id)
    }

    fn joint_dof_count(&self, joint: usize) -> usize {
        self.joints[joint].dof_count
    }

    fn joint_dof_offset(&self, joint: usize) -> usize {
        self.joints[joint].dof_offset
    }

    fn joint_position(&self, joint: usize) -> &[Real] {
        let j = &self.joints[joint];
        &self.q.as_slice()[j.dof_offset..j.dof_offset + j.dof_count]
    }

    fn joint_velocity(&self, joint: usize) -> &[Real] {
        let j = &self.joints[joint];
        &self.alpha.as_slice()[j.dof_offset..j.dof_offset + j.dof_count]
    }

    fn generalized_velocity(&self, out: &mut DVector) {
        out.copy_from(&self.alpha);
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn body_index(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }

    fn body_pose(&self, body: usize) -> Isometry {
        self.bodies[body].pose
    }

    fn chain_dofs(&self, body: usize) -> &[usize] {
        &self.bodies[body].chain_dofs
    }

    fn jacobian(&self, body: usize, point: &Point, out: &mut DMatrix) {
        let b = &self.bodies[body];
        transport_jacobian(&b.jac, &b.pose.rotation, point, out);
    }

    fn jacobian_dot(&self, body: usize, point: &Point, out: &mut DMatrix) {
        let b = &self.bodies[body];
        transport_jacobian(&b.jac_dot, &b.pose.rotation, point, out);
    }

    fn inertia_matrix(&self, out: &mut DMatrix) {
        out.copy_from(&self.inertia);
    }

    fn bias_forces(&self, out: &mut DVector) {
        out.copy_from(&self.bias);
    }
}

/// Origin Jacobian column of a prismatic DOF along `axis`.
pub fn prismatic(axis: [Real; 3]) -> [Real; 6] {
    [0.0, 0.0, 0.0, axis[0], axis[1], axis[2]]
}

/// Origin Jacobian column of a revolute DOF around `axis`, through the body origin.
pub fn revolute(axis: [Real; 3]) -> [Real; 6] {
    [axis[0], axis[1], axis[2], 0.0, 0.0, 0.0]
}
