//! Lookup-time sweep
//!
//! Fills `BTreeMap`, `HashMap` and [`RedBlackTree`] with a growing prefix of
//! random keys and records the mean time of one successful lookup per
//! container at each size. The output table has the same shape as a loaded
//! measurement file.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::hint::black_box;
use std::time::Instant;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::bench::lookup::{F64Key, LookupContainer};
use crate::bench::rbtree::RedBlackTree;
use crate::config::Scenario;
use crate::models::BenchmarkTable;
use crate::{BmkError, Result};

/// Type of the random keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Int,
    Double,
}

impl KeyKind {
    /// Chart scenario whose file this sweep produces
    pub fn scenario(&self) -> Scenario {
        match self {
            KeyKind::Int => Scenario::Nodes,
            KeyKind::Double => Scenario::Double,
        }
    }
}

/// Sweep parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    pub key_kind: KeyKind,
    /// Largest batch size, also the number of generated keys
    pub max_size: usize,
    /// First batch size
    pub start: usize,
    /// Batch size increment
    pub step: usize,
    /// Seed for reproducible key sets
    pub seed: Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            key_kind: KeyKind::Int,
            max_size: 20_000,
            start: 50,
            step: 50,
            seed: None,
        }
    }
}

impl SweepConfig {
    /// Default sweep for a key kind
    pub fn for_kind(key_kind: KeyKind) -> Self {
        Self {
            key_kind,
            ..Self::default()
        }
    }

    /// Validate the sweep parameters
    pub fn validate(&self) -> Result<()> {
        if self.start == 0 {
            return Err(BmkError::ConfigError(
                "Sweep start must be greater than 0".to_string()
            ));
        }

        if self.step == 0 {
            return Err(BmkError::ConfigError(
                "Sweep step must be greater than 0".to_string()
            ));
        }

        if self.start > self.max_size {
            return Err(BmkError::ConfigError(format!(
                "Sweep start {} exceeds max size {}",
                self.start, self.max_size
            )));
        }

        Ok(())
    }

    /// Batch sizes in sweep order
    pub fn batch_sizes(&self) -> impl Iterator<Item = usize> {
        (self.start..=self.max_size).step_by(self.step.max(1))
    }

    /// Number of rows the sweep produces
    pub fn row_count(&self) -> usize {
        if self.start == 0 || self.step == 0 || self.start > self.max_size {
            return 0;
        }
        (self.max_size - self.start) / self.step + 1
    }

    /// Set the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set start, step and maximum batch size
    pub fn with_range(mut self, start: usize, step: usize, max_size: usize) -> Self {
        self.start = start;
        self.step = step;
        self.max_size = max_size;
        self
    }
}

/// Run a sweep without progress reporting
pub fn run_sweep(config: &SweepConfig) -> Result<BenchmarkTable> {
    run_sweep_with_progress(config, |_| {})
}

/// Run a sweep, calling `on_batch` with each finished batch size
pub fn run_sweep_with_progress<F>(config: &SweepConfig, on_batch: F) -> Result<BenchmarkTable>
where
    F: FnMut(usize),
{
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let started = Instant::now();
    let upper = config.max_size;
    let table = match config.key_kind {
        KeyKind::Int => {
            let keys: Vec<i64> = (0..upper)
                .map(|_| rng.gen_range(0..=upper as i64))
                .collect();
            sweep(config, &keys, on_batch)
        }
        KeyKind::Double => {
            let keys: Vec<F64Key> = (0..upper)
                .map(|_| F64Key(rng.gen_range(0.0..upper as f64)))
                .collect();
            sweep(config, &keys, on_batch)
        }
    };

    let elapsed = std::time::Duration::from_millis(started.elapsed().as_millis() as u64);
    info!(
        "Sweep of {} batches ({:?} keys) finished in {}",
        table.row_count(),
        config.key_kind,
        humantime::format_duration(elapsed)
    );
    Ok(table)
}

fn sweep<K, F>(config: &SweepConfig, keys: &[K], mut on_batch: F) -> BenchmarkTable
where
    K: Ord + Hash + Copy,
    F: FnMut(usize),
{
    let mut map: BTreeMap<K, K> = BTreeMap::new();
    let mut unordered: HashMap<K, K> = HashMap::new();
    let mut rbtree: RedBlackTree<K> = RedBlackTree::with_capacity(keys.len());

    let mut rows = Vec::with_capacity(config.row_count());
    let mut filled = 0;

    for size in config.batch_sizes() {
        // Earlier keys are already stored; re-inserting them changes nothing
        for &key in &keys[filled..size] {
            map.insert_key(key);
            unordered.insert_key(key);
            rbtree.insert_key(key);
        }
        filled = size;

        let probe = &keys[..size];
        let row = [
            size as f64,
            mean_lookup_micros(&map, probe),
            mean_lookup_micros(&unordered, probe),
            mean_lookup_micros(&rbtree, probe),
        ];
        debug!(
            "batch {} ({} distinct keys): {:?}",
            size,
            rbtree.key_count(),
            &row[1..]
        );
        rows.push(row);
        on_batch(size);
    }

    BenchmarkTable::from_rows(config.key_kind.scenario().x_column(), &rows)
}

/// Mean wall time in microseconds of looking up every key in `probe`
pub fn mean_lookup_micros<K, C: LookupContainer<K>>(container: &C, probe: &[K]) -> f64 {
    if probe.is_empty() {
        return 0.0;
    }

    let start = Instant::now();
    for key in probe {
        black_box(container.contains_key(black_box(key)));
    }
    start.elapsed().as_secs_f64() * 1e6 / probe.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_count_matches_batches() {
        let config = SweepConfig::default();
        assert_eq!(config.row_count(), 400);
        assert_eq!(config.batch_sizes().count(), 400);

        let odd = SweepConfig::default().with_range(10, 7, 40);
        assert_eq!(odd.batch_sizes().collect::<Vec<_>>(), vec![10, 17, 24, 31, 38]);
        assert_eq!(odd.row_count(), 5);
    }

    #[test]
    fn test_validate() {
        assert!(SweepConfig::default().validate().is_ok());
        assert!(SweepConfig::default().with_range(0, 50, 100).validate().is_err());
        assert!(SweepConfig::default().with_range(50, 0, 100).validate().is_err());
        assert!(SweepConfig::default().with_range(200, 50, 100).validate().is_err());
    }

    #[test]
    fn test_int_sweep_shape() {
        let config = SweepConfig::for_kind(KeyKind::Int)
            .with_range(20, 20, 100)
            .with_seed(7);
        let mut seen = Vec::new();
        let table = run_sweep_with_progress(&config, |n| seen.push(n)).unwrap();

        assert_eq!(seen, vec![20, 40, 60, 80, 100]);
        assert_eq!(table.labels(), vec!["#nodes", "map", "unordered_map", "RedBlackTree"]);
        assert_eq!(table.x().values, vec![20.0, 40.0, 60.0, 80.0, 100.0]);
        assert!(table
            .rows()
            .all(|row| row[1..].iter().all(|t| t.is_finite() && *t >= 0.0)));
    }

    #[test]
    fn test_double_sweep_uses_elements_column() {
        let config = SweepConfig::for_kind(KeyKind::Double)
            .with_range(10, 10, 30)
            .with_seed(1);
        let table = run_sweep(&config).unwrap();
        assert_eq!(table.labels()[0], "#elements");
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_invalid_sweep_is_config_error() {
        let config = SweepConfig::default().with_range(10, 0, 30);
        assert!(matches!(run_sweep(&config), Err(BmkError::ConfigError(_))));
    }

    #[test]
    fn test_mean_lookup_empty_probe() {
        let map: BTreeMap<i64, i64> = BTreeMap::new();
        let probe: [i64; 0] = [];
        assert_eq!(mean_lookup_micros(&map, &probe), 0.0);
    }
}
