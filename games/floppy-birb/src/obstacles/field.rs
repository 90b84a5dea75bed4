//! Fixed pool of obstacle pairs scrolling left and wrapping around.
//!
//! Pairs live in a ring: `head` is the slot holding the first pair in
//! sequence order. Recycling moves the head pair behind the last pair and
//! advances `head`, so no pair is ever allocated or shifted after setup.

use crate::config::FieldConfig;
use crate::error::ConfigError;

use super::pair::ObstaclePair;
use super::scale::ScaleRandomizer;

pub struct ObstacleField {
    config: FieldConfig,
    slots: Vec<ObstaclePair>,
    head: usize,
    randomizer: ScaleRandomizer,
}

impl ObstacleField {
    /// Validate the configuration and lay out the initial pairs.
    pub fn new(config: FieldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut field = Self {
            slots: Vec::with_capacity(config.count),
            head: 0,
            randomizer: ScaleRandomizer::new(config.seed),
            config,
        };
        field.initialize();
        Ok(field)
    }

    /// Lay out `count` pairs from the right boundary, `step` apart, each with a
    /// fresh scale split. The draw sequence restarts from the configured seed.
    pub fn initialize(&mut self) {
        let FieldConfig {
            count,
            step,
            scale_range,
            half_gap,
            obstacle_width,
            ..
        } = self.config;
        let right = self.config.boundaries.right;
        let budget = self.config.gap_budget();

        self.randomizer.reseed();
        self.head = 0;
        self.slots.clear();
        for i in 0..count {
            let split = self.randomizer.split(scale_range, budget);
            let x = right + i as f32 * step;
            self.slots.push(ObstaclePair::spawn(x, half_gap, obstacle_width, split));
        }
    }

    /// Move every pair left by `delta`.
    pub fn advance(&mut self, delta: f32) {
        for pair in &mut self.slots {
            pair.shift_x(-delta);
        }
    }

    /// Recycle pairs that crossed the left boundary. Returns how many were moved.
    ///
    /// Pairs keep sequence order sorted by x (every pair moves by the same
    /// amount and a recycled pair lands right of the last one), so the pairs
    /// past the boundary are always a prefix of the sequence. Each pair is
    /// checked at most once per call.
    pub fn recycle_if_out_of_bounds(&mut self) -> usize {
        let n = self.slots.len();
        let left = self.config.boundaries.left;
        let mut recycled = 0;

        while recycled < n && self.slots[self.head].x() < left {
            let anchor = self.slots[(self.head + n - 1) % n];
            let split = self
                .randomizer
                .split(self.config.scale_range, self.config.gap_budget());

            let pair = &mut self.slots[self.head];
            pair.follow(&anchor, self.config.step);
            pair.rescale(self.config.obstacle_width, split);
            log::trace!("recycled obstacle slot {} to x={}", self.head, pair.x());

            self.head = (self.head + 1) % n;
            recycled += 1;
        }
        recycled
    }

    /// One fixed step: advance by the configured speed, then recycle.
    pub fn tick(&mut self) -> usize {
        self.advance(self.config.speed);
        self.recycle_if_out_of_bounds()
    }

    /// Put every pair back where `new` would have put it.
    pub fn restart(&mut self) {
        self.initialize();
        log::info!("obstacle field restarted with {} pairs", self.slots.len());
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Storage slot holding the `index`-th pair in sequence order.
    pub fn slot_of(&self, index: usize) -> usize {
        (self.head + index) % self.slots.len()
    }

    /// The `index`-th pair in sequence order.
    pub fn get(&self, index: usize) -> Option<&ObstaclePair> {
        (index < self.slots.len()).then(|| &self.slots[self.slot_of(index)])
    }

    pub fn first(&self) -> Option<&ObstaclePair> {
        self.get(0)
    }

    pub fn last(&self) -> Option<&ObstaclePair> {
        self.slots.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Pairs in sequence order.
    pub fn iter(&self) -> impl Iterator<Item = &ObstaclePair> + '_ {
        (0..self.slots.len()).map(move |i| &self.slots[self.slot_of(i)])
    }

    /// `(slot, pair)` in sequence order. Slots are stable pair identities.
    pub fn iter_slots(&self) -> impl Iterator<Item = (usize, &ObstaclePair)> + '_ {
        (0..self.slots.len()).map(move |i| {
            let slot = self.slot_of(i);
            (slot, &self.slots[slot])
        })
    }
}
