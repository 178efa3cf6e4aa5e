//! CSV export of selected applicants and fields

use indexmap::IndexMap;

/// Fields exported when the caller does not choose any
pub const DEFAULT_EXPORT_FIELDS: &[&str] = &[
    "name",
    "email",
    "age",
    "current_status",
    "batch",
    "stage",
];

/// Serialize rows as CSV restricted to `fields`, in that order.
///
/// Every cell is double-quoted and embedded quotes are doubled. Keys missing
/// from a row export as empty cells. The first line is the header.
pub fn export_csv<F: AsRef<str>>(rows: &[IndexMap<String, String>], fields: &[F]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(join_cells(fields.iter().map(|f| f.as_ref())));

    for row in rows {
        lines.push(join_cells(fields.iter().map(|f| {
            row.get(f.as_ref()).map(String::as_str).unwrap_or("")
        })));
    }

    lines.join("\n")
}

/// Quote a single CSV cell
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn join_cells<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    cells.map(quote).collect::<Vec<_>>().join(",")
}
