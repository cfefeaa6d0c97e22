use crate::domain::model::{Table, YearlyRecord};
use crate::domain::ports::{Bounds, FieldBounds};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator used for every synthesized table; ChaCha output is stable across
/// platforms and releases of `rand_chacha`.
pub type SynthesisRng = ChaCha8Rng;

pub fn seeded_rng(seed: u64) -> SynthesisRng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[derive(Debug, Clone)]
pub struct Synthesizer {
    start_year: i32,
    years: usize,
    bounds: FieldBounds,
}

impl Synthesizer {
    pub fn new(start_year: i32, years: usize, bounds: FieldBounds) -> Self {
        Self {
            start_year,
            years,
            bounds,
        }
    }

    /// 依欄位逐列抽樣：先抽完所有年份的 wine_shops，再換下一個欄位。
    /// 抽樣順序決定輸出，改動順序會改變相同 seed 的結果。
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Table {
        let wine_shops = self.draw_column(rng, self.bounds.wine_shops);
        let consumers = self.draw_column(rng, self.bounds.consumers);
        let deaths = self.draw_column(rng, self.bounds.deaths);
        let age_18_30 = self.draw_column(rng, self.bounds.age_18_30);
        let age_31_50 = self.draw_column(rng, self.bounds.age_31_50);

        let records = (0..self.years)
            .map(|i| YearlyRecord {
                year: self.start_year + i as i32,
                wine_shops: wine_shops[i],
                consumers: consumers[i],
                deaths: deaths[i],
                age_18_30: age_18_30[i],
                age_31_50: age_31_50[i],
                age_51_plus: consumers[i] as i64 - age_18_30[i] as i64 - age_31_50[i] as i64,
            })
            .collect();

        tracing::debug!(
            "Synthesized {} yearly records starting at {}",
            self.years,
            self.start_year
        );
        Table::new(records)
    }

    fn draw_column<R: Rng + ?Sized>(&self, rng: &mut R, bounds: Bounds) -> Vec<u32> {
        (0..self.years)
            .map(|_| rng.gen_range(bounds.low..bounds.high))
            .collect()
    }
}
