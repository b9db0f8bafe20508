use crate::constraint::{check_robot_dofs, Constraint, ConstraintError, EqualityConstraint};
use crate::contact::{Contact, ContactId};
use crate::dynamics::{full_jacobian, MultiBodyDynamics};
use crate::layout::VariableLayout;
use crate::math::{DMatrix, DVector, Point, SPATIAL_DIM};

const AXES: [&str; SPATIAL_DIM] = [
    "angular x",
    "angular y",
    "angular z",
    "linear x",
    "linear y",
    "linear z",
];

#[derive(Clone, Debug)]
struct ContactData {
    contact: ContactId,
    body: usize,
    jac: DMatrix,
}

/// Rigid, non-slipping contacts: zero spatial acceleration of every contact body.
///
/// Each contact contributes six rows `J·αD = -J̇·α`, where `J` is the full Jacobian of
/// the contact body at its origin and `α` the current generalized velocity.
#[derive(Clone, Debug)]
pub struct ContactAccConstraint {
    cont: Vec<ContactData>,
    dof_count: usize,
    full_jac: DMatrix,
    alpha: DVector,
    a_eq: DMatrix,
    b_eq: DVector,
}

impl ContactAccConstraint {
    /// Creates an empty constraint. Call [`Constraint::update_layout`] before use.
    pub fn new() -> Self {
        Self {
            cont: Vec::new(),
            dof_count: 0,
            full_jac: DMatrix::zeros(SPATIAL_DIM, 0),
            alpha: DVector::zeros(0),
            a_eq: DMatrix::zeros(0, 0),
            b_eq: DVector::zeros(0),
        }
    }
}

impl Default for ContactAccConstraint {
    fn default() -> Self {
        Self::new()
    }
}

impl Constraint for ContactAccConstraint {
    fn update_layout(
        &mut self,
        robot: &dyn MultiBodyDynamics,
        layout: &VariableLayout,
        contacts: &[Contact],
    ) -> Result<(), ConstraintError> {
        check_robot_dofs(robot, layout)?;

        self.cont = contacts
            .iter()
            .map(|c| {
                let body = robot
                    .body_index(c.body)
                    .ok_or(ConstraintError::UnknownBody(c.body))?;
                Ok(ContactData {
                    contact: c.id,
                    body,
                    jac: DMatrix::zeros(SPATIAL_DIM, robot.chain_dofs(body).len()),
                })
            })
            .collect::<Result<_, ConstraintError>>()?;

        self.dof_count = layout.dof_count;
        self.full_jac = DMatrix::zeros(SPATIAL_DIM, layout.dof_count);
        self.alpha = DVector::zeros(layout.dof_count);
        self.a_eq = DMatrix::zeros(self.cont.len() * SPATIAL_DIM, layout.var_count());
        self.b_eq = DVector::zeros(self.cont.len() * SPATIAL_DIM);

        log::debug!(
            "ContactAccConstraint: {} contacts, {} rows.",
            self.cont.len(),
            self.a_eq.nrows()
        );
        Ok(())
    }

    fn update(&mut self, robot: &dyn MultiBodyDynamics) {
        robot.generalized_velocity(&mut self.alpha);

        // J_i·αD + J̇_i·α = 0
        for (i, data) in self.cont.iter_mut().enumerate() {
            let row = i * SPATIAL_DIM;
            let chain_dofs = robot.chain_dofs(data.body);

            robot.jacobian(data.body, &Point::origin(), &mut data.jac);
            full_jacobian(chain_dofs, &data.jac, &mut self.full_jac);
            self.a_eq
                .view_mut((row, 0), (SPATIAL_DIM, self.dof_count))
                .copy_from(&self.full_jac);

            robot.jacobian_dot(data.body, &Point::origin(), &mut data.jac);
            full_jacobian(chain_dofs, &data.jac, &mut self.full_jac);
            self.b_eq
                .rows_mut(row, SPATIAL_DIM)
                .gemv(-1.0, &self.full_jac, &self.alpha, 0.0);
        }
    }
}

impl EqualityConstraint for ContactAccConstraint {
    fn name_eq(&self) -> &'static str {
        "ContactAccConstraint"
    }

    fn describe_eq(&self, _robot: &dyn MultiBodyDynamics, line: usize) -> String {
        match self.cont.get(line / SPATIAL_DIM) {
            Some(data) => format!("{}: {}", data.contact, AXES[line % SPATIAL_DIM]),
            None => String::new(),
        }
    }

    fn nr_eq_lines(&self) -> usize {
        self.a_eq.nrows()
    }

    fn a_eq(&self) -> &DMatrix {
        &self.a_eq
    }

    fn b_eq(&self) -> &DVector {
        &self.b_eq
    }
}
