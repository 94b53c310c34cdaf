// src/parse/mod.rs
use tracing::{debug, trace, warn};

pub mod row;
pub mod table;

pub use row::{classify_row, RowKind};
pub use table::{CompositionTables, Entry, ParseStats};

/// Parser position within the sheet: the climate section we are inside and
/// the geographic columns the last header row declared.
#[derive(Debug, Default, Clone)]
pub struct ParserState {
    pub climate: Option<String>,
    pub geographies: Vec<String>,
}

/// Single forward pass over the sheet rows.
///
/// Each row is classified once (see [`row::classify_row`]) and either updates
/// the state or, for data rows, lands its `(weight, name)` pairs in the
/// tables. Unrecognized rows and malformed columns are dropped and counted,
/// never raised; the stats come back alongside the tables so callers can log
/// what fell through.
pub fn parse_rows(rows: &[Vec<String>]) -> (CompositionTables, ParseStats) {
    let mut tables = CompositionTables::default();
    let mut stats = ParseStats::default();
    let mut state = ParserState::default();

    for (idx, cells) in rows.iter().enumerate() {
        let kind = classify_row(cells, state.climate.is_some(), !state.geographies.is_empty());
        match kind {
            RowKind::Empty => {
                stats.blank_rows += 1;
            }
            RowKind::Climate(name) => {
                debug!(row = idx, climate = %name, "climate header");
                tables.ensure_climate(&name);
                // the previous geographic columns stay active across a
                // climate header; only a geographic header replaces them
                state.climate = Some(name);
            }
            RowKind::Geography(names) => {
                debug!(row = idx, geographies = ?names, "geographic header");
                match &state.climate {
                    Some(climate) => {
                        for geography in &names {
                            tables.ensure_geography(climate, geography);
                        }
                    }
                    None => {
                        warn!(row = idx, "geographic header before any climate header");
                    }
                }
                state.geographies = names;
            }
            RowKind::Label => {
                trace!(row = idx, "label row");
            }
            RowKind::Data => {
                if let Some(climate) = state.climate.as_deref() {
                    stats.data_rows += 1;
                    tables.push_data_row(climate, &state.geographies, cells, &mut stats);
                }
            }
            RowKind::Other => {
                trace!(row = idx, first = ?cells.first(), "unrecognized row");
                stats.skipped_rows += 1;
            }
        }
    }

    (tables, stats)
}
