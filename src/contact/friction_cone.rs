use crate::math::{Matrix, Real, Rotation, UnitVector, Vector};
use na::Unit;
use smallvec::SmallVec;
use std::f64::consts::PI;

/// Storage of the generators of a friction cone.
pub type Generators = SmallVec<[Vector; 4]>;

/// A polyhedral approximation of a Coulomb friction cone.
///
/// The contact force is a non-negative combination of the cone generators, each
/// generator being one force-intensity variable of the QP. Generators are unit
/// vectors expressed in the frame of the body carrying the contact.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct FrictionCone {
    generators: Generators,
}

impl FrictionCone {
    /// Builds a cone of `nr_generators` edges with friction coefficient `mu`.
    ///
    /// The third row of `frame` is the contact normal and the first row the tangent
    /// around which the normal is first tilted by `atan(mu)`. The tilted vector is then
    /// rotated around the normal by steps of `2π / nr_generators`.
    pub fn new(frame: &Matrix, nr_generators: usize, mu: Real) -> Self {
        Self::with_direction(frame, nr_generators, mu, 1.0)
    }

    /// Same as [`Self::new`] but tilts the normal around `direction * tangent`.
    ///
    /// A `direction` of `-1.0` is the mirror cone, as seen from the other body.
    pub fn with_direction(frame: &Matrix, nr_generators: usize, mu: Real, direction: Real) -> Self {
        let normal = Unit::new_normalize(frame.row(2).transpose());
        let tangent = Unit::new_normalize(frame.row(0).transpose() * direction);
        let tilted = Rotation::from_axis_angle(&tangent, mu.atan()) * normal.into_inner();
        let step = (PI * 2.0) / nr_generators as Real;

        let generators = (0..nr_generators)
            .map(|i| Rotation::from_axis_angle(&normal, step * i as Real) * tilted)
            .collect();

        Self { generators }
    }

    /// A degenerate cone made of the contact normal alone (frictionless contact).
    pub fn from_normal(normal: &UnitVector) -> Self {
        let mut generators = Generators::new();
        generators.push(normal.into_inner());
        Self { generators }
    }

    /// A cone with user-provided generators.
    pub fn from_generators(generators: impl IntoIterator<Item = Vector>) -> Self {
        Self {
            generators: generators.into_iter().collect(),
        }
    }

    /// The cone generators, in the body frame.
    pub fn generators(&self) -> &[Vector] {
        &self.generators
    }

    /// Number of generators, i.e., of force variables this cone needs.
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Does this cone have no generator at all?
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}
