use crate::contact::FrictionCone;
use crate::dynamics::BodyId;
use crate::math::{Point, Vector};
use std::fmt;

/// Identifier of a contact, chosen by the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ContactId(pub u32);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "contact#{}", self.0)
    }
}

/// A contact between a body of the robot and its environment.
///
/// The contact is described by a set of candidate points, in the local frame of the
/// body, and the friction cone applied at each of them. Either one cone is given per
/// point, or a single cone is shared by every point.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Contact {
    /// The identifier of this contact.
    pub id: ContactId,
    /// The body carrying the contact points.
    pub body: BodyId,
    /// The contact points, in the local frame of `body`.
    pub points: Vec<Point>,
    /// The friction cones, one per point or a single one shared by all points.
    pub cones: Vec<FrictionCone>,
}

impl Contact {
    /// Creates a new contact.
    pub fn new(id: ContactId, body: BodyId, points: Vec<Point>, cones: Vec<FrictionCone>) -> Self {
        Contact {
            id,
            body,
            points,
            cones,
        }
    }

    /// A contact with one frictionless normal per point.
    ///
    /// Each point gets exactly one force variable, acting along its normal.
    pub fn with_normals(id: ContactId, body: BodyId, points: Vec<Point>, normals: &[Vector]) -> Self {
        let cones = normals
            .iter()
            .map(|n| FrictionCone::from_generators([n.normalize()]))
            .collect();
        Self::new(id, body, points, cones)
    }

    /// The friction cone applied at the `i`-th point.
    pub fn cone(&self, i: usize) -> &FrictionCone {
        if self.cones.len() == 1 {
            &self.cones[0]
        } else {
            &self.cones[i]
        }
    }

    /// Are the cones consistent with the number of points?
    pub fn is_well_formed(&self) -> bool {
        self.cones.len() == 1 || self.cones.len() == self.points.len()
    }

    /// Number of force variables needed by this contact.
    pub fn force_count(&self) -> usize {
        (0..self.points.len()).map(|i| self.cone(i).len()).sum()
    }
}
