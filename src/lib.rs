/*!
wbqp
========

**wbqp** assembles the constraint blocks of a whole-body quadratic-program
controller for articulated robots: equations of motion with friction-cone contact
forces and torque bounds, unilateral contact forces, rigid no-slip contacts, and
self-collision avoidance.

Every constraint writes into a single solution vector `x = [αD; λ; τ]` laid out by
a [`VariableLayout`](layout::VariableLayout). The rigid-body dynamics are supplied
by the caller through the [`MultiBodyDynamics`](dynamics::MultiBodyDynamics) trait and
proximity queries are performed with `parry3d-f64`.
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![deny(unused_qualifications)]

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;
pub extern crate parry3d_f64 as parry;

pub mod constraint;
pub mod contact;
pub mod dynamics;
pub mod layout;
pub mod math;
pub mod utils;

pub use crate::constraint::{
    BoundConstraint, CollisionParams, Constraint, ConstraintError, ContactAccConstraint,
    EqualityConstraint, InequalityConstraint, MotionConstraint, MotionPolyConstraint,
    MotionSnapshot, MotionSpringConstraint, PolyTorqueBound, PositiveLambda,
    SelfCollisionConstraint, ShapeProxy, SpringJoint, TorqueBound,
};
pub use crate::contact::{Contact, ContactId, FrictionCone};
pub use crate::dynamics::{BodyId, JointId, MultiBodyDynamics};
pub use crate::layout::{ContactVariables, VariableLayout};
