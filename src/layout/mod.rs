//! Partition of the QP solution vector.

pub use self::contact_variables::{ContactRange, ContactVariables};
pub use self::variable_layout::VariableLayout;

mod contact_variables;
mod variable_layout;
