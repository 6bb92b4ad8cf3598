//! Synthetic table generator.
//!
//! Fills the 7×24 grid row-major (Monday first, then hour 0..23), taking
//! exactly one noise draw per cell.

use tracing::debug;

use crate::model::ScoreModel;
use crate::noise::{NoiseSource, SeededNoise};
use crate::table::{EngagementTable, DAYS, DAY_COUNT, HOUR_COUNT};

/// Generate a table from a model and a noise source.
pub fn generate<N: NoiseSource>(model: &ScoreModel, noise: &mut N) -> EngagementTable {
    let mut cells = [[0u32; HOUR_COUNT]; DAY_COUNT];

    for (row, &day) in cells.iter_mut().zip(DAYS.iter()) {
        for (hour, cell) in row.iter_mut().enumerate() {
            let draw = noise.draw(model.noise);
            *cell = model.score(day, hour as u8, draw);
        }
    }

    let table = EngagementTable::from_grid(cells);
    debug!(
        min = table.min_score(),
        max = table.max_score(),
        "generated engagement table"
    );
    table
}

/// Generator bound to one score model.
#[derive(Debug, Clone, Default)]
pub struct TableGenerator {
    model: ScoreModel,
}

impl TableGenerator {
    pub fn new(model: ScoreModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &ScoreModel {
        &self.model
    }

    /// Generate with a freshly seeded PCG source.
    pub fn seeded(&self, seed: u64) -> EngagementTable {
        debug!(seed, "seeding noise source");
        let mut noise = SeededNoise::new(seed);
        generate(&self.model, &mut noise)
    }

    /// Generate with a caller-supplied noise source.
    pub fn with_noise<N: NoiseSource>(&self, noise: &mut N) -> EngagementTable {
        generate(&self.model, noise)
    }
}
