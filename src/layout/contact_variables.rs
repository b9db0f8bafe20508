use crate::constraint::ConstraintError;
use crate::contact::{Contact, ContactId};
use crate::layout::VariableLayout;
use std::ops::Range;

/// The force variables attributed to one contact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactRange {
    /// The contact owning the variables.
    pub contact: ContactId,
    /// Indices of the variables in the solution vector.
    pub vars: Range<usize>,
}

/// Registry mapping each contact to its range of force variables.
///
/// Contacts receive contiguous ranges in the order they are given, starting at the
/// beginning of the `λ` segment of the layout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactVariables {
    ranges: Vec<ContactRange>,
}

impl ContactVariables {
    /// Assigns force variables to `contacts` and checks them against `layout`.
    pub fn register(layout: &VariableLayout, contacts: &[Contact]) -> Result<Self, ConstraintError> {
        let mut ranges = Vec::with_capacity(contacts.len());
        let mut begin = layout.lambda_begin();

        for contact in contacts {
            if !contact.is_well_formed() {
                return Err(ConstraintError::MalformedContact {
                    contact: contact.id,
                    points: contact.points.len(),
                    cones: contact.cones.len(),
                });
            }

            let end = begin + contact.force_count();
            ranges.push(ContactRange {
                contact: contact.id,
                vars: begin..end,
            });
            begin = end;
        }

        let found = begin - layout.lambda_begin();
        if found != layout.force_count {
            return Err(ConstraintError::ForceCountMismatch {
                expected: layout.force_count,
                found,
            });
        }

        Ok(Self { ranges })
    }

    /// The ranges, in contact order.
    pub fn ranges(&self) -> &[ContactRange] {
        &self.ranges
    }

    /// The variables of the contact `id`, if it is registered.
    pub fn range(&self, id: ContactId) -> Option<Range<usize>> {
        self.ranges
            .iter()
            .find(|r| r.contact == id)
            .map(|r| r.vars.clone())
    }

    /// The contact owning the variable `var`, if any.
    pub fn contact_of(&self, var: usize) -> Option<&ContactRange> {
        self.ranges.iter().find(|r| r.vars.contains(&var))
    }

    /// Number of registered contacts.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Is no contact registered?
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
