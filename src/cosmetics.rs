//! Truck customization (garage)
//!
//! Purely visual. The engine carries a copy through to its snapshots for the
//! renderer and never reads it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TruckColor {
    #[default]
    Blue,
    Red,
    Green,
    Purple,
    Orange,
    Slate,
}

impl TruckColor {
    pub const ALL: [TruckColor; 6] = [
        TruckColor::Blue,
        TruckColor::Red,
        TruckColor::Green,
        TruckColor::Purple,
        TruckColor::Orange,
        TruckColor::Slate,
    ];

    /// Next swatch in the garage palette, wrapping around
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&c| c == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaintPattern {
    #[default]
    Solid,
    Stripe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CargoKind {
    #[default]
    Mattress,
    BoxBed,
    Sofa,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WheelKind {
    #[default]
    Classic,
    Chrome,
    Dark,
}

/// Player's truck appearance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TruckConfig {
    pub color: TruckColor,
    pub pattern: PaintPattern,
    pub spoiler: bool,
    pub rack: bool,
    pub neon: bool,
    pub exhaust: bool,
    pub cargo: CargoKind,
    pub wheels: WheelKind,
}

impl TruckConfig {
    pub fn toggle_stripe(&mut self) {
        self.pattern = match self.pattern {
            PaintPattern::Solid => PaintPattern::Stripe,
            PaintPattern::Stripe => PaintPattern::Solid,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_truck() {
        let truck = TruckConfig::default();
        assert_eq!(truck.color, TruckColor::Blue);
        assert_eq!(truck.cargo, CargoKind::Mattress);
        assert!(!truck.spoiler && !truck.neon);
    }

    #[test]
    fn test_toggle_stripe() {
        let mut truck = TruckConfig::default();
        truck.toggle_stripe();
        assert_eq!(truck.pattern, PaintPattern::Stripe);
        truck.toggle_stripe();
        assert_eq!(truck.pattern, PaintPattern::Solid);
    }

    #[test]
    fn test_color_cycle_wraps() {
        let mut color = TruckColor::Blue;
        for _ in 0..TruckColor::ALL.len() {
            color = color.next();
        }
        assert_eq!(color, TruckColor::Blue);
        assert_eq!(TruckColor::Slate.next(), TruckColor::Blue);
    }
}
