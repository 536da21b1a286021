//! Problem model for the 0/1 knapsack.
//!
//! Defines the [`Item`] type, the ordering keys the heuristics sort by,
//! and [`KnapsackInstance`] with CSV parsing and random generation.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use ordered_float::OrderedFloat;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A single knapsack item: an immutable (weight, value) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Weight of the item.
    pub weight: u64,
    /// Value of the item.
    pub value: u64,
}

impl Item {
    pub fn new(weight: u64, value: u64) -> Self {
        Item { weight, value }
    }

    /// Value-to-weight ratio. Zero-weight items contribute value for free
    /// and rank above everything else.
    #[inline]
    pub fn ratio(&self) -> f64 {
        if self.weight == 0 {
            f64::INFINITY
        } else {
            self.value as f64 / self.weight as f64
        }
    }

    /// Composite desirability score `value^3 / weight^1.5`, used by the
    /// scored and transitioning greedy policies. Zero weight ranks highest.
    #[inline]
    pub fn score(&self) -> f64 {
        if self.weight == 0 {
            f64::INFINITY
        } else {
            (self.value as f64).powi(3) / (self.weight as f64).powf(1.5)
        }
    }
}

/// Sort items by descending value/weight ratio.
pub fn sort_by_ratio_desc(items: &mut [Item]) {
    items.sort_by_key(|it| std::cmp::Reverse(OrderedFloat(it.ratio())));
}

/// Sort items by descending score.
pub fn sort_by_score_desc(items: &mut [Item]) {
    items.sort_by_key(|it| std::cmp::Reverse(OrderedFloat(it.score())));
}

/// Sort items by ascending score.
pub fn sort_by_score_asc(items: &mut [Item]) {
    items.sort_by_key(|it| OrderedFloat(it.score()));
}

/// Sort items by descending value.
pub fn sort_by_value_desc(items: &mut [Item]) {
    items.sort_by_key(|it| std::cmp::Reverse(it.value));
}

/// Sort items by ascending weight.
pub fn sort_by_weight_asc(items: &mut [Item]) {
    items.sort_by_key(|it| it.weight);
}

/// Sum of item weights.
pub fn total_weight(items: &[Item]) -> u64 {
    items.iter().map(|it| it.weight).sum()
}

/// Sum of item values.
pub fn total_value(items: &[Item]) -> u64 {
    items.iter().map(|it| it.value).sum()
}

/// A complete knapsack problem instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnapsackInstance {
    /// Name of the instance.
    pub name: String,
    /// Weight capacity of the knapsack.
    pub capacity: u64,
    /// Available items.
    pub items: Vec<Item>,
}

impl KnapsackInstance {
    pub fn new(name: impl Into<String>, capacity: u64, items: Vec<Item>) -> Self {
        KnapsackInstance {
            name: name.into(),
            capacity,
            items,
        }
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Load an instance from an items CSV and a capacity CSV.
    ///
    /// The items file contains one `weight,value` pair per line; the capacity
    /// file starts with a `Capacity` header followed by one capacity per line
    /// (the first valid one is used). Malformed lines are logged and skipped.
    pub fn from_csv_files<P: AsRef<Path>>(items_path: P, capacity_path: P) -> Result<Self, String> {
        let items = parse_items_csv(&items_path)?;
        let capacity = parse_capacity_csv(&capacity_path)?;
        let name = items_path
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        Ok(KnapsackInstance::new(name, capacity, items))
    }

    /// Load an instance from an items CSV with the capacity given directly.
    pub fn from_items_csv<P: AsRef<Path>>(items_path: P, capacity: u64) -> Result<Self, String> {
        let items = parse_items_csv(&items_path)?;
        let name = items_path
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        Ok(KnapsackInstance::new(name, capacity, items))
    }

    /// Write the instance back out in the same two-file CSV format.
    pub fn write_csv_files<P: AsRef<Path>>(&self, items_path: P, capacity_path: P) -> Result<(), String> {
        let mut items_file = File::create(&items_path)
            .map_err(|e| format!("Cannot create items file: {}", e))?;
        for item in &self.items {
            writeln!(items_file, "{},{}", item.weight, item.value)
                .map_err(|e| format!("Write error: {}", e))?;
        }

        let mut capacity_file = File::create(&capacity_path)
            .map_err(|e| format!("Cannot create capacity file: {}", e))?;
        writeln!(capacity_file, "Capacity\n{}", self.capacity)
            .map_err(|e| format!("Write error: {}", e))?;

        Ok(())
    }

    /// Generate a random instance with `n` items, deterministic for a given seed.
    pub fn generate(
        name: impl Into<String>,
        n: usize,
        capacity: u64,
        weight_range: (u64, u64),
        value_range: (u64, u64),
        seed: u64,
    ) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let items = (0..n)
            .map(|_| {
                Item::new(
                    rng.gen_range(weight_range.0..=weight_range.1),
                    rng.gen_range(value_range.0..=value_range.1),
                )
            })
            .collect();

        KnapsackInstance::new(name, capacity, items)
    }

    /// Get statistics about the instance.
    pub fn statistics(&self) -> InstanceStatistics {
        let n = self.items.len();
        let weights: Vec<f64> = self.items.iter().map(|it| it.weight as f64).collect();
        let values: Vec<f64> = self.items.iter().map(|it| it.value as f64).collect();

        let avg = |xs: &[f64]| {
            if xs.is_empty() {
                0.0
            } else {
                xs.iter().sum::<f64>() / xs.len() as f64
            }
        };

        InstanceStatistics {
            name: self.name.clone(),
            num_items: n,
            capacity: self.capacity,
            total_weight: total_weight(&self.items),
            total_value: total_value(&self.items),
            min_weight: self.items.iter().map(|it| it.weight).min().unwrap_or(0),
            max_weight: self.items.iter().map(|it| it.weight).max().unwrap_or(0),
            avg_weight: avg(&weights),
            avg_value: avg(&values),
        }
    }
}

fn parse_items_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Item>, String> {
    let file = File::open(&path).map_err(|e| format!("Cannot open file: {}", e))?;
    let items = parse_items(BufReader::new(file))?;
    log::info!(
        "Parsed {} items from {}",
        items.len(),
        path.as_ref().display()
    );
    Ok(items)
}

fn parse_items<R: BufRead>(reader: R) -> Result<Vec<Item>, String> {
    let mut items = Vec::new();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Read error: {}", e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split(',');
        let parsed = match (parts.next(), parts.next()) {
            (Some(w), Some(v)) => match (w.trim().parse::<u64>(), v.trim().parse::<u64>()) {
                (Ok(weight), Ok(value)) => Some(Item::new(weight, value)),
                _ => None,
            },
            _ => None,
        };

        match parsed {
            Some(item) => items.push(item),
            // A header line such as "weight,value" lands here too.
            None => log::warn!("Malformed item line {}: '{}'", line_number + 1, line),
        }
    }

    Ok(items)
}

fn parse_capacity_csv<P: AsRef<Path>>(path: P) -> Result<u64, String> {
    let file = File::open(&path).map_err(|e| format!("Cannot open file: {}", e))?;
    parse_capacity(BufReader::new(file))
}

fn parse_capacity<R: BufRead>(reader: R) -> Result<u64, String> {
    let mut lines = reader.lines();

    let header = lines
        .next()
        .ok_or_else(|| "Empty capacity file".to_string())
        .and_then(|l| l.map_err(|e| format!("Read error: {}", e)))?;
    if header.trim() != "Capacity" {
        return Err(format!(
            "Expected header 'Capacity' but found '{}'",
            header.trim()
        ));
    }

    for (line_number, line) in lines.enumerate() {
        let line = line.map_err(|e| format!("Read error: {}", e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.parse::<u64>() {
            Ok(capacity) => return Ok(capacity),
            Err(_) => log::warn!("Malformed capacity line {}: '{}'", line_number + 2, line),
        }
    }

    Err("No valid capacities found".to_string())
}

/// Statistics about a knapsack instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceStatistics {
    pub name: String,
    pub num_items: usize,
    pub capacity: u64,
    pub total_weight: u64,
    pub total_value: u64,
    pub min_weight: u64,
    pub max_weight: u64,
    pub avg_weight: f64,
    pub avg_value: f64,
}

impl fmt::Display for InstanceStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Instance: {}", self.name)?;
        writeln!(f, "  Items: {}", self.num_items)?;
        writeln!(f, "  Capacity: {}", self.capacity)?;
        writeln!(f, "  Total weight: {}", self.total_weight)?;
        writeln!(f, "  Total value: {}", self.total_value)?;
        writeln!(f, "  Weight range: [{}, {}]", self.min_weight, self.max_weight)?;
        writeln!(f, "  Avg weight: {:.2}", self.avg_weight)?;
        writeln!(f, "  Avg value: {:.2}", self.avg_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ratio_and_score() {
        let item = Item::new(10, 60);
        assert!((item.ratio() - 6.0).abs() < 1e-10);
        assert!((item.score() - 60.0_f64.powi(3) / 10.0_f64.powf(1.5)).abs() < 1e-6);
    }

    #[test]
    fn test_zero_weight_ranks_first() {
        let free = Item::new(0, 1);
        assert!(free.ratio().is_infinite());
        assert!(free.score().is_infinite());

        let mut items = vec![Item::new(10, 60), free, Item::new(20, 100)];
        sort_by_ratio_desc(&mut items);
        assert_eq!(items[0], free);
    }

    #[test]
    fn test_sort_orders() {
        let mut items = vec![Item::new(30, 120), Item::new(10, 60), Item::new(20, 100)];

        sort_by_value_desc(&mut items);
        assert_eq!(items[0].value, 120);

        sort_by_weight_asc(&mut items);
        assert_eq!(items[0].weight, 10);

        sort_by_ratio_desc(&mut items);
        assert_eq!(items[0], Item::new(10, 60));
    }

    #[test]
    fn test_parse_items_skips_header() {
        let csv = "weight,value\n10,60\n20,100\n\n30,120\n";
        let items = parse_items(Cursor::new(csv)).unwrap();
        assert_eq!(
            items,
            vec![Item::new(10, 60), Item::new(20, 100), Item::new(30, 120)]
        );
    }

    #[test]
    fn test_parse_capacity() {
        let csv = "Capacity\n50\n100\n";
        assert_eq!(parse_capacity(Cursor::new(csv)).unwrap(), 50);

        assert!(parse_capacity(Cursor::new("Weight\n50\n")).is_err());
        assert!(parse_capacity(Cursor::new("Capacity\nabc\n")).is_err());
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = KnapsackInstance::generate("gen", 20, 100, (1, 50), (1, 100), 42);
        let b = KnapsackInstance::generate("gen", 20, 100, (1, 50), (1, 100), 42);
        assert_eq!(a.items, b.items);
        assert_eq!(a.num_items(), 20);
        assert!(a.items.iter().all(|it| it.weight >= 1 && it.weight <= 50));
    }

    #[test]
    fn test_statistics() {
        let instance = KnapsackInstance::new(
            "stats",
            50,
            vec![Item::new(10, 60), Item::new(20, 100), Item::new(30, 120)],
        );
        let stats = instance.statistics();
        assert_eq!(stats.total_weight, 60);
        assert_eq!(stats.total_value, 280);
        assert_eq!(stats.min_weight, 10);
        assert_eq!(stats.max_weight, 30);
        assert!((stats.avg_weight - 20.0).abs() < 1e-10);
    }
}
