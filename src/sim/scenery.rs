//! Roadside props (houses and trees)
//!
//! Not gameplay-affecting. Shares the engine tick: spawn on a fixed cadence,
//! scroll with the road speed, drop once off-screen.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::SceneryTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneryKind {
    House,
    Tree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoadSide {
    Left,
    Right,
}

/// House wall paint (trees ignore it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HouseColor {
    Indigo,
    Orange,
    Teal,
    Rose,
}

const HOUSE_COLORS: [HouseColor; 4] = [
    HouseColor::Indigo,
    HouseColor::Orange,
    HouseColor::Teal,
    HouseColor::Rose,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneryItem {
    pub id: u32,
    pub kind: SceneryKind,
    pub side: RoadSide,
    /// Horizontal pixel offset from the road edge (negative = left of road)
    pub offset: f32,
    pub progress: f32,
    pub scale: f32,
    pub color: HouseColor,
}

/// Active props, oldest first
#[derive(Debug, Clone)]
pub struct Scenery {
    tuning: SceneryTuning,
    items: Vec<SceneryItem>,
    rng: Pcg32,
    next_id: u32,
}

impl Scenery {
    pub fn new(tuning: SceneryTuning, rng: Pcg32) -> Self {
        Self {
            tuning,
            items: Vec::new(),
            rng,
            next_id: 1,
        }
    }

    /// Advance one tick: maybe spawn, scroll everything, compact
    pub fn tick(&mut self, frame_count: u64, speed: f32) {
        if frame_count % self.tuning.interval_ticks.max(1) == 0 {
            self.spawn();
        }
        for item in &mut self.items {
            item.progress += speed;
        }
        let despawn = self.tuning.despawn_progress;
        self.items.retain(|item| item.progress < despawn);
    }

    fn spawn(&mut self) {
        let side = if self.rng.random_bool(0.5) {
            RoadSide::Left
        } else {
            RoadSide::Right
        };
        let kind = if self.rng.random_bool(0.7) {
            SceneryKind::House
        } else {
            SceneryKind::Tree
        };
        let color = HOUSE_COLORS[self.rng.random_range(0..HOUSE_COLORS.len())];
        let scale = 0.8 + self.rng.random::<f32>() * 0.4;
        let spread = self.rng.random::<f32>() * 200.0;
        let offset = match side {
            RoadSide::Left => -150.0 - spread,
            RoadSide::Right => 100.0 + spread,
        };

        let id = self.next_id;
        self.next_id += 1;
        self.items.push(SceneryItem {
            id,
            kind,
            side,
            offset,
            progress: self.tuning.spawn_progress,
            scale,
            color,
        });
    }

    pub fn items(&self) -> &[SceneryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
