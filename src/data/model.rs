// ---------------------------------------------------------------------------
// LossSeries – one named sequence of loss values
// ---------------------------------------------------------------------------

/// A single loss curve: its values in epoch order.
///
/// The epoch axis is implicit; value `i` belongs to epoch `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct LossSeries {
    pub name: String,
    pub values: Vec<f64>,
}

// ---------------------------------------------------------------------------
// LossTable – the complete loaded table
// ---------------------------------------------------------------------------

/// Every series found in one input file.
///
/// Series keep the order the loader produced: alphabetical for JSON objects,
/// header order for CSV, schema order for Parquet. Lengths may differ; each
/// curve is simply drawn to its own length.
#[derive(Debug, Clone, Default)]
pub struct LossTable {
    pub series: Vec<LossSeries>,
}

impl LossTable {
    /// Build a table from `(name, values)` columns, preserving their order.
    pub fn from_columns(columns: Vec<(String, Vec<f64>)>) -> Self {
        let series = columns
            .into_iter()
            .map(|(name, values)| LossSeries { name, values })
            .collect();
        LossTable { series }
    }

    /// Number of series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the table holds no series at all.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Length of the longest series, i.e. the shared epoch extent.
    pub fn max_len(&self) -> usize {
        self.series.iter().map(|s| s.values.len()).max().unwrap_or(0)
    }

    /// Series names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.name.as_str())
    }
}
