// src/parse/table.rs
use indexmap::IndexMap;
use tracing::trace;

/// One weighted biome choice inside a composition table.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Relative weight. Integral in the sheet, kept as f64 for emission.
    pub weight: f64,
    /// Biome name, verbatim from the sheet.
    pub name: String,
}

/// Counters for everything the parser dropped along the way.
///
/// Dropping is part of the sheet contract; these only make it visible in the
/// logs so data-entry mistakes upstream don't vanish silently.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    pub blank_rows: usize,
    pub data_rows: usize,
    pub skipped_rows: usize,
    pub entries: usize,
    pub skipped_columns: usize,
}

/// Nested weight tables: climate → geographic column → entries.
///
/// Both levels keep first-seen order so the emitted code reads in the same
/// order as the sheet.
#[derive(Debug, Default, PartialEq)]
pub struct CompositionTables {
    climates: IndexMap<String, IndexMap<String, Vec<Entry>>>,
}

impl CompositionTables {
    /// Make sure a climate section exists, keeping any buckets it already has.
    pub fn ensure_climate(&mut self, climate: &str) {
        self.climates.entry(climate.to_string()).or_default();
    }

    /// Make sure an (empty) entry bucket exists under `climate`.
    pub fn ensure_geography(&mut self, climate: &str, geography: &str) {
        self.climates
            .entry(climate.to_string())
            .or_default()
            .entry(geography.to_string())
            .or_default();
    }

    /// Pull `(weight, name)` pairs out of one data row, one pair per active
    /// geographic column: the i-th column reads cells `2*i` and `2*i + 1`.
    ///
    /// Columns are dropped one by one when they run past the end of the row,
    /// carry the `total` summary cell, a non-numeric weight, or a blank name.
    /// A dropped column never aborts the row.
    pub fn push_data_row(
        &mut self,
        climate: &str,
        geographies: &[String],
        cells: &[String],
        stats: &mut ParseStats,
    ) {
        for (i, geography) in geographies.iter().enumerate() {
            let pair = match (cells.get(2 * i), cells.get(2 * i + 1)) {
                (Some(weight), Some(name)) => (weight, name),
                // short row: the trailing columns simply have no data here
                _ => {
                    stats.skipped_columns += 1;
                    continue;
                }
            };
            let (weight_cell, name_cell) = pair;

            if name_cell.eq_ignore_ascii_case("total") {
                stats.skipped_columns += 1;
                continue;
            }
            let weight = match parse_weight(weight_cell) {
                Some(w) => w,
                None => {
                    trace!(geography = %geography, cell = %weight_cell, "non-numeric weight cell");
                    stats.skipped_columns += 1;
                    continue;
                }
            };
            if name_cell.trim().is_empty() {
                stats.skipped_columns += 1;
                continue;
            }

            self.climates
                .entry(climate.to_string())
                .or_default()
                .entry(geography.clone())
                .or_default()
                .push(Entry {
                    weight,
                    name: name_cell.clone(),
                });
            stats.entries += 1;
        }
    }

    /// Entries recorded for one (climate, geography) pair, if any.
    pub fn entries(&self, climate: &str, geography: &str) -> Option<&[Entry]> {
        self.climates
            .get(climate)?
            .get(geography)
            .map(Vec::as_slice)
    }

    /// Climate sections in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &IndexMap<String, Vec<Entry>>)> {
        self.climates.iter()
    }

    pub fn climate_count(&self) -> usize {
        self.climates.len()
    }

    /// True when no entry survived anywhere, empty buckets included.
    pub fn is_empty(&self) -> bool {
        self.climates
            .values()
            .all(|columns| columns.values().all(Vec::is_empty))
    }
}

fn parse_weight(cell: &str) -> Option<f64> {
    if cell.is_empty() || !cell.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    cell.parse::<u64>().ok().map(|w| w as f64)
}
