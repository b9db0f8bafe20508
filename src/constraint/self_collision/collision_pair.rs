use crate::constraint::{ConstraintError, ShapeProxy};
use crate::dynamics::BodyId;
use crate::math::{DMatrix, Real, Vector, SPATIAL_DIM};

/// Activation thresholds and gain of a monitored pair.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CollisionParams {
    /// Influence distance: the pair is constrained once closer than `di`.
    pub di: Real,
    /// Stopping distance: the pair must not get closer than `ds`.
    pub ds: Real,
    /// Velocity damper gain.
    pub damping: Real,
}

impl CollisionParams {
    /// Validated parameters: `0 ≤ ds < di` and `damping ≥ 0`.
    pub fn new(di: Real, ds: Real, damping: Real) -> Result<Self, ConstraintError> {
        // Written so that NaN values are rejected as well.
        if ds >= 0.0 && ds < di && damping >= 0.0 {
            Ok(Self { di, ds, damping })
        } else {
            Err(ConstraintError::InvalidCollisionParams { di, ds, damping })
        }
    }

    /// Gain of the velocity damper at distance `d`.
    ///
    /// Zero at `d = ds`, `damping` at `d = di`.
    #[inline]
    pub fn damper(&self, d: Real) -> Real {
        self.damping * (d - self.ds) / (self.di - self.ds)
    }
}

/// A monitored pair of bodies.
///
/// The normal of the previous update is kept to estimate the rate of change of
/// the normal by finite differences. It is the only state carried from one
/// control cycle to the next.
#[derive(Clone, Debug)]
pub struct CollisionPair {
    pub(crate) body1_id: BodyId,
    pub(crate) body2_id: BodyId,
    pub(crate) body1: usize,
    pub(crate) body2: usize,
    pub(crate) proxy1: ShapeProxy,
    pub(crate) proxy2: ShapeProxy,
    pub(crate) params: CollisionParams,
    pub(crate) jac1: DMatrix,
    pub(crate) jac2: DMatrix,
    pub(crate) normal_prev: Vector,
    pub(crate) distance: Real,
}

impl CollisionPair {
    pub(crate) fn new(
        body1_id: BodyId,
        body1: usize,
        proxy1: ShapeProxy,
        body2_id: BodyId,
        body2: usize,
        proxy2: ShapeProxy,
        params: CollisionParams,
        chain_lens: [usize; 2],
    ) -> Self {
        Self {
            body1_id,
            body2_id,
            body1,
            body2,
            proxy1,
            proxy2,
            params,
            jac1: DMatrix::zeros(SPATIAL_DIM, chain_lens[0]),
            jac2: DMatrix::zeros(SPATIAL_DIM, chain_lens[1]),
            normal_prev: Vector::zeros(),
            distance: Real::INFINITY,
        }
    }

    /// The two monitored bodies.
    pub fn bodies(&self) -> (BodyId, BodyId) {
        (self.body1_id, self.body2_id)
    }

    /// The thresholds of this pair.
    pub fn params(&self) -> &CollisionParams {
        &self.params
    }

    /// The normal, from the second body toward the first, of the last update.
    ///
    /// Zero until the first update.
    pub fn normal_prev(&self) -> &Vector {
        &self.normal_prev
    }

    /// The signed distance of the last update, `+∞` before the first one.
    pub fn distance(&self) -> Real {
        self.distance
    }

    /// Is this pair constrained at its last distance?
    pub fn is_active(&self) -> bool {
        self.distance < self.params.di
    }
}
