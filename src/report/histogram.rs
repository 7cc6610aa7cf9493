use serde::{Deserialize, Serialize};

/// Equal-width bins spanning `[min, max]` of the data. Every bin is
/// half-open except the last, which also holds the maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub label: String,
    /// `bins + 1` ascending edges
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Histogram {
    pub fn from_values(label: impl Into<String>, values: &[f64], bins: usize) -> Self {
        let label = label.into();
        let bins = bins.max(1);
        if values.is_empty() {
            return Self {
                label,
                edges: vec![0.0; bins + 1],
                counts: vec![0; bins],
            };
        }

        let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            // Degenerate data: center a unit-wide range on the single value
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + width * i as f64 })
            .collect();

        let mut counts = vec![0u64; bins];
        for &v in values {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Self {
            label,
            edges,
            counts,
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}
