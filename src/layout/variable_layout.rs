use std::ops::Range;

/// The sizes of the three segments of the QP solution vector `x = [αD; λ; τ]`.
///
/// - `αD`: generalized accelerations, one per degree of freedom.
/// - `λ`: contact-force intensities, one per friction-cone generator.
/// - `τ`: actuator torques.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VariableLayout {
    /// Number of generalized acceleration variables.
    pub dof_count: usize,
    /// Number of contact-force intensity variables.
    pub force_count: usize,
    /// Number of actuator torque variables.
    pub torque_count: usize,
}

impl VariableLayout {
    /// Creates a new layout.
    pub fn new(dof_count: usize, force_count: usize, torque_count: usize) -> Self {
        Self {
            dof_count,
            force_count,
            torque_count,
        }
    }

    /// Total number of variables.
    #[inline]
    pub fn var_count(&self) -> usize {
        self.dof_count + self.force_count + self.torque_count
    }

    /// Index of the first generalized acceleration.
    #[inline]
    pub fn alpha_d_begin(&self) -> usize {
        0
    }

    /// Index of the first contact-force intensity.
    #[inline]
    pub fn lambda_begin(&self) -> usize {
        self.dof_count
    }

    /// Index of the first actuator torque.
    #[inline]
    pub fn torque_begin(&self) -> usize {
        self.dof_count + self.force_count
    }

    /// The generalized acceleration segment.
    pub fn alpha_d_range(&self) -> Range<usize> {
        self.alpha_d_begin()..self.lambda_begin()
    }

    /// The contact-force segment.
    pub fn lambda_range(&self) -> Range<usize> {
        self.lambda_begin()..self.torque_begin()
    }

    /// The torque segment.
    pub fn torque_range(&self) -> Range<usize> {
        self.torque_begin()..self.var_count()
    }
}
