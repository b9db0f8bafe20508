//! Linear algebra type aliases.

use na::{Isometry3, Matrix3, Point3, UnitQuaternion, UnitVector3, Vector3};

/// The scalar type used throughout this crate.
pub type Real = f64;

/// The default tolerance used for geometric operations.
pub const DEFAULT_EPSILON: Real = Real::EPSILON;

/// The dimension of the space.
pub const DIM: usize = 3;

/// The number of rows of a spatial (angular + linear) Jacobian.
pub const SPATIAL_DIM: usize = DIM * 2;

/// Row of a spatial Jacobian where its linear (translational) part begins.
pub const LINEAR_ROWS_BEGIN: usize = DIM;

/// The point type.
pub type Point = Point3<Real>;

/// The vector type.
pub type Vector = Vector3<Real>;

/// The unit vector type.
pub type UnitVector = UnitVector3<Real>;

/// The matrix type.
pub type Matrix = Matrix3<Real>;

/// The transformation matrix type.
pub type Isometry = Isometry3<Real>;

/// The rotation type.
pub type Rotation = UnitQuaternion<Real>;

/// A dynamically-sized matrix, used for every assembled constraint block.
pub type DMatrix = na::DMatrix<Real>;

/// A dynamically-sized vector, used for every assembled right-hand side and bound.
pub type DVector = na::DVector<Real>;
