//! Contacts and friction cones.

pub use self::contact::{Contact, ContactId};
pub use self::friction_cone::{FrictionCone, Generators};

mod contact;
mod friction_cone;
