//! Self-collision avoidance between pairs of robot bodies.

pub use self::collision_pair::{CollisionPair, CollisionParams};
pub use self::proximity::{ShapeProxy, SignedClosestPoints};
pub use self::self_collision_constraint::SelfCollisionConstraint;

mod collision_pair;
mod proximity;
mod self_collision_constraint;
