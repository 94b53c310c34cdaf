// src/parse/row.rs

/// Marker that introduces a climate header row, e.g. `ClimateType::Warm_temperate`.
pub const CLIMATE_MARKER: &str = "ClimateType::";
/// Marker that introduces a geographic header row, e.g. `GeographicType::Hills`.
pub const GEOGRAPHIC_MARKER: &str = "GeographicType::";

/// What a single sheet row means to the parser, decided once per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// Blank first cell; the row carries nothing, whatever the other cells say.
    Empty,
    /// Climate header; opens a new climate section.
    Climate(String),
    /// Geographic header; replaces the active column set with these names.
    Geography(Vec<String>),
    /// The `% | Name | % | Name` label row under a geographic header.
    Label,
    /// A weighted data row for the active climate and geographic columns.
    Data,
    /// Anything else; dropped without complaint.
    Other,
}

/// The identifier after a `Xxx::` marker: `ClimateType:: Arid ` → `Arid`.
fn marker_ident(cell: &str) -> &str {
    cell.split("::").nth(1).unwrap_or("").trim()
}

/// Classify `row` given what the parser has already seen.
///
/// Checks run in a fixed order and the first match wins: blank first cell,
/// climate header, geographic header, label row, data row. A digit-led row
/// only counts as data once a climate and at least one geographic column are
/// active; until then it is `Other` like every other unrecognized row.
pub fn classify_row(row: &[String], have_climate: bool, have_geographies: bool) -> RowKind {
    let first = match row.first() {
        Some(cell) if !cell.is_empty() => cell.as_str(),
        _ => return RowKind::Empty,
    };

    if first.contains(CLIMATE_MARKER) {
        return RowKind::Climate(marker_ident(first).to_string());
    }

    if first.contains(GEOGRAPHIC_MARKER) {
        let names = row
            .iter()
            .filter(|cell| cell.contains(GEOGRAPHIC_MARKER))
            .map(|cell| marker_ident(cell).to_uppercase())
            .collect();
        return RowKind::Geography(names);
    }

    if first == "%" && row.iter().any(|cell| cell == "Name") {
        return RowKind::Label;
    }

    if have_climate && have_geographies && first.chars().all(|c| c.is_ascii_digit()) {
        return RowKind::Data;
    }

    RowKind::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn blank_first_cell_always_wins() {
        assert_eq!(classify_row(&row(&["", "x", "y"]), true, true), RowKind::Empty);
        assert_eq!(classify_row(&[], true, true), RowKind::Empty);
    }

    #[test]
    fn climate_header_extracts_trimmed_ident() {
        assert_eq!(
            classify_row(&row(&["ClimateType:: Arid "]), false, false),
            RowKind::Climate("Arid".to_string())
        );
    }

    #[test]
    fn geography_header_scans_every_cell() {
        let kind = classify_row(
            &row(&["GeographicType::Hills", "", "GeographicType:: plains "]),
            true,
            true,
        );
        assert_eq!(
            kind,
            RowKind::Geography(vec!["HILLS".to_string(), "PLAINS".to_string()])
        );
    }

    #[test]
    fn label_row_needs_exact_percent_and_name_cells() {
        assert_eq!(classify_row(&row(&["%", "Name", "%", "Name"]), true, true), RowKind::Label);
        // "%" alone is not a label row, and neither is a widened percent cell
        assert_eq!(classify_row(&row(&["%", "weight"]), false, false), RowKind::Other);
        assert_eq!(classify_row(&row(&["%%", "Name"]), false, false), RowKind::Other);
    }

    #[test]
    fn data_rows_require_active_state() {
        let cells = row(&["30", "Rocky"]);
        assert_eq!(classify_row(&cells, true, true), RowKind::Data);
        assert_eq!(classify_row(&cells, false, true), RowKind::Other);
        assert_eq!(classify_row(&cells, true, false), RowKind::Other);
    }

    #[test]
    fn non_digit_lead_cell_is_dropped() {
        assert_eq!(classify_row(&row(&["30x", "Rocky"]), true, true), RowKind::Other);
        assert_eq!(classify_row(&row(&["-3", "Rocky"]), true, true), RowKind::Other);
    }

    #[test]
    fn header_markers_beat_the_data_check() {
        // a header row is never re-read as data even with state active
        assert_eq!(
            classify_row(&row(&["ClimateType::Cool"]), true, true),
            RowKind::Climate("Cool".to_string())
        );
    }
}
