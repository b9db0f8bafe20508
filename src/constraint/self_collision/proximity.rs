use crate::math::{Isometry, Point, Real, DEFAULT_EPSILON};
use parry::query::{self, ClosestPoints, Unsupported};
use parry::shape::SharedShape;

/// A collision shape rigidly attached to a body of the robot.
#[derive(Clone, Debug)]
pub struct ShapeProxy {
    /// The shape.
    pub shape: SharedShape,
    /// The pose of the shape relative to its body.
    pub local_pose: Isometry,
    world_pose: Isometry,
}

impl ShapeProxy {
    /// A proxy placed at `local_pose` in the frame of its body.
    ///
    /// The body is initially assumed to be at the world origin.
    pub fn new(shape: SharedShape, local_pose: Isometry) -> Self {
        Self {
            shape,
            local_pose,
            world_pose: local_pose,
        }
    }

    /// A proxy centered on the origin of its body.
    pub fn at_body_origin(shape: SharedShape) -> Self {
        Self::new(shape, Isometry::identity())
    }

    /// Moves the proxy with its body.
    pub fn set_body_pose(&mut self, body_pose: &Isometry) {
        self.world_pose = body_pose * self.local_pose;
    }

    /// The world pose of the shape, as of the last [`Self::set_body_pose`].
    pub fn world_pose(&self) -> &Isometry {
        &self.world_pose
    }

    /// Expresses a world-space point of this proxy in the frame of its body.
    fn body_point(&self, world: &Point) -> Point {
        self.local_pose * self.world_pose.inverse_transform_point(world)
    }

    /// Closest points between `self` and `other` at their current world poses.
    ///
    /// Returns `Ok(None)` if the proximity engine did not produce witness points.
    pub fn signed_closest_points(
        &self,
        other: &ShapeProxy,
    ) -> Result<Option<SignedClosestPoints>, Unsupported> {
        let (pos1, pos2) = (&self.world_pose, &other.world_pose);

        match query::closest_points(pos1, &*self.shape, pos2, &*other.shape, Real::MAX)? {
            ClosestPoints::WithinMargin(world1, world2) => Ok(Some(SignedClosestPoints {
                squared_distance: na::distance_squared(&world1, &world2),
                world1,
                world2,
                body1: self.body_point(&world1),
                body2: other.body_point(&world2),
            })),
            ClosestPoints::Intersecting => {
                // A small prediction keeps exactly touching shapes reported.
                let contact =
                    query::contact(pos1, &*self.shape, pos2, &*other.shape, DEFAULT_EPSILON)?;
                Ok(contact.map(|c| SignedClosestPoints {
                    squared_distance: c.dist * c.dist.abs(),
                    world1: c.point1,
                    world2: c.point2,
                    body1: self.body_point(&c.point1),
                    body2: other.body_point(&c.point2),
                }))
            }
            ClosestPoints::Disjoint => Ok(None),
        }
    }
}

/// Witness points between two proxies and their signed squared distance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SignedClosestPoints {
    /// `d·|d|` where `d` is the signed distance: negative when the shapes penetrate.
    pub squared_distance: Real,
    /// Witness point on the first proxy, in world space.
    pub world1: Point,
    /// Witness point on the second proxy, in world space.
    pub world2: Point,
    /// Witness point on the first proxy, in the frame of its body.
    pub body1: Point,
    /// Witness point on the second proxy, in the frame of its body.
    pub body2: Point,
}

impl SignedClosestPoints {
    /// The signed distance, i.e., the signed square root of [`Self::squared_distance`].
    pub fn distance(&self) -> Real {
        self.squared_distance.signum() * self.squared_distance.abs().sqrt()
    }
}
