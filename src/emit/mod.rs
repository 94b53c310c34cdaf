// src/emit/mod.rs
use crate::parse::{CompositionTables, Entry};

/// Render the finished tables as Rust source: one `let` binding per
/// (geographic, climate) pair, in sheet order, separated by blank lines.
///
/// Pairs that ended up with no entries are left out entirely, so a column
/// that only ever held `total` cells never shows up in the generated file.
pub fn render_tables(tables: &CompositionTables) -> String {
    let mut decls = Vec::new();
    for (climate, columns) in tables.iter() {
        for (geography, entries) in columns {
            if entries.is_empty() {
                continue;
            }
            decls.push(render_decl(climate, geography, entries));
        }
    }
    decls.join("\n")
}

fn render_decl(climate: &str, geography: &str, entries: &[Entry]) -> String {
    let body = entries
        .iter()
        .map(render_entry)
        .collect::<Vec<_>>()
        .join(",\n    ");
    format!(
        "let (GeographicType::{}, ClimateType::{}) = &[\n    {},\n];\n",
        capitalize(geography),
        climate,
        body
    )
}

/// `b!(6.0, woodland)` — weights keep a trailing `.0` so the generated
/// literals are unambiguously floats.
fn render_entry(entry: &Entry) -> String {
    format!("b!({:?}, {})", entry.weight, entry.name)
}

/// `HILLS` → `Hills`: first character upper-cased, the rest lowered, to
/// match the variant names of the generated enums.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}
