use crate::constraint::{BoundConstraint, Constraint, ConstraintError};
use crate::contact::Contact;
use crate::dynamics::MultiBodyDynamics;
use crate::layout::{ContactVariables, VariableLayout};
use crate::math::{DVector, Real};

/// Unilateral contacts: every contact-force intensity is non-negative.
///
/// This is a pure bound constraint over the `λ` segment with lower bound `0` and upper
/// bound `+∞`. The bounds never depend on the robot state so [`Constraint::update`]
/// does nothing.
#[derive(Clone, Debug)]
pub struct PositiveLambda {
    lambda_begin: usize,
    lower: DVector,
    upper: DVector,
    contacts: ContactVariables,
}

impl PositiveLambda {
    /// Creates an empty constraint. Call [`Constraint::update_layout`] before use.
    pub fn new() -> Self {
        Self {
            lambda_begin: 0,
            lower: DVector::zeros(0),
            upper: DVector::zeros(0),
            contacts: ContactVariables::default(),
        }
    }

    /// The force-variable ranges of the contacts of the last layout update.
    pub fn contacts(&self) -> &ContactVariables {
        &self.contacts
    }
}

impl Default for PositiveLambda {
    fn default() -> Self {
        Self::new()
    }
}

impl Constraint for PositiveLambda {
    fn update_layout(
        &mut self,
        _robot: &dyn MultiBodyDynamics,
        layout: &VariableLayout,
        contacts: &[Contact],
    ) -> Result<(), ConstraintError> {
        self.contacts = ContactVariables::register(layout, contacts)?;
        self.lambda_begin = layout.lambda_begin();
        self.lower = DVector::zeros(layout.force_count);
        self.upper = DVector::from_element(layout.force_count, Real::INFINITY);
        Ok(())
    }

    fn update(&mut self, _robot: &dyn MultiBodyDynamics) {}
}

impl BoundConstraint for PositiveLambda {
    fn name_bound(&self) -> &'static str {
        "PositiveLambda"
    }

    fn describe_bound(&self, _robot: &dyn MultiBodyDynamics, line: usize) -> String {
        match self.contacts.contact_of(self.lambda_begin + line) {
            Some(range) => format!(
                "{}: force variable {} of {}",
                range.contact,
                self.lambda_begin + line - range.vars.start,
                range.vars.len()
            ),
            None => String::new(),
        }
    }

    fn begin_var(&self) -> usize {
        self.lambda_begin
    }

    fn lower(&self) -> &DVector {
        &self.lower
    }

    fn upper(&self) -> &DVector {
        &self.upper
    }
}
