use crate::constraint::{check_robot_dofs, ConstraintError};
use crate::contact::{Contact, Generators};
use crate::dynamics::{
    floating_base_dof_count, full_jacobian, joint_from_dof, linear_rows, transport_jacobian,
    MultiBodyDynamics,
};
use crate::layout::{ContactVariables, VariableLayout};
use crate::math::{DMatrix, DVector, Point, Real, SPATIAL_DIM};

#[derive(Clone, Debug)]
struct ContactData {
    body: usize,
    /// First column of the contact in the force block.
    force_begin: usize,
    jac: DMatrix,
    trans_jac: DMatrix,
    points: Vec<Point>,
    generators: Vec<Generators>,
}

/// The dynamics quantities computed by the last update of a motion constraint.
///
/// Torques recovered after the QP is solved must be computed from the very same `H`,
/// `C` and contact Jacobians that were used to build the equality. The snapshot keeps
/// them together and is only overwritten by the next
/// [`MotionDynamics::compute_matrix`].
#[derive(Clone, Debug)]
pub struct MotionSnapshot {
    inertia: DMatrix,
    bias: DVector,
    contact_block: DMatrix,
    rhs: DVector,
}

impl MotionSnapshot {
    fn new(dof_count: usize, force_count: usize) -> Self {
        Self {
            inertia: DMatrix::zeros(dof_count, dof_count),
            bias: DVector::zeros(dof_count),
            contact_block: DMatrix::zeros(dof_count, force_count),
            rhs: DVector::zeros(dof_count),
        }
    }

    /// The joint-space inertia matrix `H`.
    pub fn inertia(&self) -> &DMatrix {
        &self.inertia
    }

    /// The bias forces `C`.
    pub fn bias(&self) -> &DVector {
        &self.bias
    }

    /// The force block `-Σ J_pᵗ·g` of the equality, one column per force variable.
    pub fn contact_block(&self) -> &DMatrix {
        &self.contact_block
    }

    /// The right-hand side of the equality.
    pub fn rhs(&self) -> &DVector {
        &self.rhs
    }

    /// Computes the generalized forces `H·αD - Σ J_pᵗ·g·λ - rhs` into `out`.
    ///
    /// On the actuated rows this is the actuator torque balancing the dynamics; on the
    /// floating-base rows it is the residual of the unactuated dynamics.
    pub fn generalized_forces(&self, alpha_d: &DVector, lambda: &DVector, out: &mut DVector) {
        assert_eq!(alpha_d.len(), self.inertia.ncols());
        assert_eq!(lambda.len(), self.contact_block.ncols());

        out.copy_from(&self.rhs);
        out.gemv(1.0, &self.inertia, alpha_d, -1.0);
        out.gemv(1.0, &self.contact_block, lambda, 1.0);
    }
}

/// The equations of motion `H·αD - Σ J_pᵗ·g·λ - S·τ = -C`.
///
/// This is the part shared by every motion constraint: it assembles the equality and
/// recovers torques. Torque bounds are left to the constraints embedding it.
///
/// ```text
///          dof        force                  torque
/// dof  [    H     -Σ J_pᵗ·g     [0 ... ; -I on actuated rows] ]
/// ```
#[derive(Clone, Debug)]
pub struct MotionDynamics {
    layout: VariableLayout,
    actuated_begin: usize,
    cont: Vec<ContactData>,
    full_jac: DMatrix,
    snapshot: MotionSnapshot,
    a_eq: DMatrix,
    forces: DVector,
    torque: DVector,
}

impl Default for MotionDynamics {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionDynamics {
    /// Creates an empty helper. Call [`Self::update_layout`] before use.
    pub fn new() -> Self {
        Self {
            layout: VariableLayout::default(),
            actuated_begin: 0,
            cont: Vec::new(),
            full_jac: DMatrix::zeros(SPATIAL_DIM, 0),
            snapshot: MotionSnapshot::new(0, 0),
            a_eq: DMatrix::zeros(0, 0),
            forces: DVector::zeros(0),
            torque: DVector::zeros(0),
        }
    }

    /// Resizes every cache and block for `layout` and `contacts`.
    pub fn update_layout(
        &mut self,
        robot: &dyn MultiBodyDynamics,
        layout: &VariableLayout,
        contacts: &[Contact],
    ) -> Result<(), ConstraintError> {
        check_robot_dofs(robot, layout)?;

        let actuated_begin = floating_base_dof_count(robot);
        if actuated_begin + layout.torque_count > layout.dof_count {
            return Err(ConstraintError::LayoutMismatch {
                dof_count: layout.dof_count,
                torque_count: layout.torque_count,
                robot_dof_count: robot.dof_count(),
                actuated_begin,
            });
        }

        let vars = ContactVariables::register(layout, contacts)?;
        let mut cont = Vec::with_capacity(contacts.len());

        for (contact, range) in contacts.iter().zip(vars.ranges()) {
            let body = robot
                .body_index(contact.body)
                .ok_or(ConstraintError::UnknownBody(contact.body))?;
            let chain_len = robot.chain_dofs(body).len();
            let generators: Vec<Generators> = (0..contact.points.len())
                .map(|i| contact.cone(i).generators().iter().copied().collect())
                .collect();

            cont.push(ContactData {
                body,
                force_begin: range.vars.start - layout.lambda_begin(),
                jac: DMatrix::zeros(SPATIAL_DIM, chain_len),
                trans_jac: DMatrix::zeros(SPATIAL_DIM, chain_len),
                points: contact.points.clone(),
                generators,
            });
        }

        self.layout = *layout;
        self.actuated_begin = actuated_begin;
        self.cont = cont;
        self.full_jac = DMatrix::zeros(SPATIAL_DIM, layout.dof_count);
        self.snapshot = MotionSnapshot::new(layout.dof_count, layout.force_count);
        self.forces = DVector::zeros(layout.dof_count);
        self.torque = DVector::zeros(layout.torque_count);

        // The torque block never changes until the next layout update.
        self.a_eq = DMatrix::zeros(layout.dof_count, layout.var_count());
        let torque_begin = layout.torque_begin();
        for i in 0..layout.torque_count {
            self.a_eq[(actuated_begin + i, torque_begin + i)] = -1.0;
        }

        log::debug!(
            "MotionDynamics: {} DOF ({} actuated from {}), {} contacts, {} force variables.",
            layout.dof_count,
            layout.torque_count,
            actuated_begin,
            self.cont.len(),
            layout.force_count
        );
        Ok(())
    }

    /// Evaluates `H`, `C` and the contact Jacobians once and assembles the equality.
    pub fn compute_matrix(&mut self, robot: &dyn MultiBodyDynamics) {
        let dof_count = self.layout.dof_count;
        let snapshot = &mut self.snapshot;

        robot.inertia_matrix(&mut snapshot.inertia);
        robot.bias_forces(&mut snapshot.bias);

        for data in &mut self.cont {
            let pose = robot.body_pose(data.body);
            let chain_dofs = robot.chain_dofs(data.body);
            robot.jacobian(data.body, &Point::origin(), &mut data.jac);

            let mut col = data.force_begin;
            for (point, generators) in data.points.iter().zip(&data.generators) {
                transport_jacobian(&data.jac, &pose.rotation, point, &mut data.trans_jac);
                full_jacobian(chain_dofs, &data.trans_jac, &mut self.full_jac);
                let jac_lin = linear_rows(&self.full_jac);

                for generator in generators {
                    let generator = pose.rotation * generator;
                    snapshot
                        .contact_block
                        .column_mut(col)
                        .gemv_tr(-1.0, &jac_lin, &generator, 0.0);
                    col += 1;
                }
            }
        }

        snapshot.rhs.copy_from(&snapshot.bias);
        snapshot.rhs.neg_mut();

        self.a_eq
            .view_mut((0, 0), (dof_count, dof_count))
            .copy_from(&snapshot.inertia);
        self.a_eq
            .view_mut(
                (0, self.layout.lambda_begin()),
                (dof_count, self.layout.force_count),
            )
            .copy_from(&snapshot.contact_block);
    }

    /// Recovers the actuator torques from a solved `αD` and `λ`.
    ///
    /// Uses the snapshot of the last [`Self::compute_matrix`], so the torque is
    /// consistent with the equality the solver was given.
    pub fn compute_torque(&mut self, alpha_d: &DVector, lambda: &DVector) {
        self.snapshot
            .generalized_forces(alpha_d, lambda, &mut self.forces);
        self.torque.copy_from(
            &self
                .forces
                .rows(self.actuated_begin, self.layout.torque_count),
        );
    }

    /// The torques of the last [`Self::compute_torque`].
    pub fn torque(&self) -> &DVector {
        &self.torque
    }

    /// Splits the torques of the last [`Self::compute_torque`] per joint.
    ///
    /// Non-actuated joints, and DOF beyond the torque segment, receive zeros.
    pub fn joint_torques(&self, robot: &dyn MultiBodyDynamics) -> Vec<Vec<Real>> {
        (0..robot.joint_count())
            .map(|joint| {
                let begin = robot.joint_dof_offset(joint);
                (begin..begin + robot.joint_dof_count(joint))
                    .map(|dof| {
                        dof.checked_sub(self.actuated_begin)
                            .filter(|&i| joint != 0 && i < self.torque.len())
                            .map_or(0.0, |i| self.torque[i])
                    })
                    .collect()
            })
            .collect()
    }

    /// The snapshot of the last [`Self::compute_matrix`].
    pub fn snapshot(&self) -> &MotionSnapshot {
        &self.snapshot
    }

    /// The layout of the last [`Self::update_layout`].
    pub fn layout(&self) -> &VariableLayout {
        &self.layout
    }

    /// Index of the first actuated degree of freedom.
    pub fn actuated_begin(&self) -> usize {
        self.actuated_begin
    }

    /// The equality matrix.
    pub fn a_eq(&self) -> &DMatrix {
        &self.a_eq
    }

    /// The equality right-hand side.
    pub fn b_eq(&self) -> &DVector {
        &self.snapshot.rhs
    }

    /// Mutable access to the right-hand side, for the terms added by specialized
    /// constraints after [`Self::compute_matrix`].
    pub(crate) fn rhs_mut(&mut self) -> &mut DVector {
        &mut self.snapshot.rhs
    }

    /// Describes the `line`-th row, i.e., the DOF whose dynamics it expresses.
    pub fn describe_line(&self, robot: &dyn MultiBodyDynamics, line: usize) -> String {
        match joint_from_dof(robot, line) {
            Some((joint, dof)) => format!("{} dof {}", robot.joint_id(joint), dof),
            None => String::new(),
        }
    }
}
