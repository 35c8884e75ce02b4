//! What a ray sees when it leaves the scene.

use crate::{Color, IxComps};

#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Solid(Color),
    /// Vertical blend from `horizon` (looking down) to `zenith` (looking up)
    Sky { horizon: Color, zenith: Color },
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(Color::ZERO)
    }
}

impl Background {
    /// The classic white-to-blue sky.
    pub fn sky() -> Self {
        Background::Sky {
            horizon: Color::ONE,
            zenith: Color::new(0.5, 0.7, 1.0),
        }
    }

    /// Shade an escaped ray.
    pub fn shade(&self, comps: &IxComps) -> Color {
        match self {
            Background::Solid(color) => *color,
            Background::Sky { horizon, zenith } => {
                let direction = (-comps.eye_v).normalize_or_zero();
                let a = 0.5 * (direction.y + 1.0);
                *horizon * (1.0 - a) + *zenith * a
            }
        }
    }
}
