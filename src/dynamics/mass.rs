use crate::error::MassError;
use crate::geometry::MassData;
use crate::math::Vec2;

/// How a body responds to forces and impulses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MassType {
    /// Finite mass and inertia derived from the body's fixtures
    #[default]
    Normal,
    /// Never changes velocity: zero inverse mass and inverse inertia
    Infinite,
    /// Linear velocity is never changed by impulses or forces; the body
    /// can still rotate
    FixedLinearVelocity,
    /// Angular velocity is never changed by impulses or forces; the body
    /// can still translate
    FixedAngularVelocity,
}

/// The mass descriptor of a body: mass, rotational inertia and local
/// center of mass, together with the cached inverses the solver uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mass {
    /// The mass type
    pub mass_type: MassType,
    /// Total mass
    pub mass: f64,
    /// Inverse mass (0 when linear response is disabled)
    pub inv_mass: f64,
    /// Rotational inertia about the center of mass
    pub inertia: f64,
    /// Inverse inertia (0 when angular response is disabled)
    pub inv_inertia: f64,
    /// Center of mass in body-local coordinates
    pub center: Vec2,
}

impl Default for Mass {
    fn default() -> Self {
        Self::infinite()
    }
}

impl Mass {
    /// An infinite mass centered at the body origin
    pub fn infinite() -> Self {
        Self {
            mass_type: MassType::Infinite,
            mass: 0.0,
            inv_mass: 0.0,
            inertia: 0.0,
            inv_inertia: 0.0,
            center: Vec2::ZERO,
        }
    }

    /// Combines per-fixture mass data into a body mass of the requested
    /// type.
    ///
    /// Inertia contributions are shifted to the combined center of mass
    /// by the parallel axis theorem. A `Normal` body whose fixtures
    /// yield zero total mass (for example all-zero densities) fails with
    /// [`MassError::InvalidMassConfiguration`].
    pub fn from_fixtures(parts: &[MassData], mass_type: MassType) -> Result<Self, MassError> {
        if mass_type == MassType::Infinite {
            return Ok(Self::infinite());
        }

        let mut mass = 0.0;
        let mut center = Vec2::ZERO;
        for part in parts {
            mass += part.mass;
            center += part.center * part.mass;
        }

        if mass <= 0.0 {
            return Err(MassError::InvalidMassConfiguration);
        }
        center /= mass;

        let mut inertia = 0.0;
        for part in parts {
            inertia += part.inertia + part.mass * part.center.distance_squared(center);
        }

        let inv_mass = match mass_type {
            MassType::FixedLinearVelocity => 0.0,
            _ => 1.0 / mass,
        };
        let inv_inertia = match mass_type {
            MassType::FixedAngularVelocity => 0.0,
            _ if inertia > 0.0 => 1.0 / inertia,
            _ => 0.0,
        };

        Ok(Self {
            mass_type,
            mass,
            inv_mass,
            inertia,
            inv_inertia,
            center,
        })
    }

    /// Returns true if this mass never responds to impulses at all
    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.mass_type == MassType::Infinite
    }
}
