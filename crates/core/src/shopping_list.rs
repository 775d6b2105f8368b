//! Aggregated shopping-list rendering.
//!
//! The database aggregates cart contents into one row per ingredient
//! (summed amounts); this module turns those rows into the CSV document
//! served by the download endpoint.

/// One aggregated ingredient line of a shopping list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListEntry {
    pub name: String,
    pub measurement_unit: String,
    /// Sum of amounts across all cart recipes using this ingredient.
    pub total_amount: i64,
}

/// Render shopping-list entries as a CSV document.
///
/// The header row is `name,measurement_unit,total_amount`. Fields containing
/// commas, quotes, or newlines are quoted per RFC 4180. Entries are emitted
/// in the order given; the repository sorts them by ingredient name.
pub fn render_csv(entries: &[ShoppingListEntry]) -> String {
    let mut out = String::from("name,measurement_unit,total_amount\n");
    for entry in entries {
        out.push_str(&csv_field(&entry.name));
        out.push(',');
        out.push_str(&csv_field(&entry.measurement_unit));
        out.push(',');
        out.push_str(&entry.total_amount.to_string());
        out.push('\n');
    }
    out
}

/// Quote a CSV field if it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, unit: &str, amount: i64) -> ShoppingListEntry {
        ShoppingListEntry {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
            total_amount: amount,
        }
    }

    #[test]
    fn empty_list_renders_header_only() {
        assert_eq!(render_csv(&[]), "name,measurement_unit,total_amount\n");
    }

    #[test]
    fn renders_rows_in_given_order() {
        let csv = render_csv(&[entry("flour", "g", 500), entry("milk", "ml", 250)]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "flour,g,500");
        assert_eq!(lines[2], "milk,ml,250");
    }

    #[test]
    fn quotes_fields_with_commas() {
        let csv = render_csv(&[entry("salt, coarse", "g", 10)]);
        assert!(csv.contains("\"salt, coarse\",g,10"));
    }

    #[test]
    fn escapes_embedded_quotes() {
        let csv = render_csv(&[entry("\"fancy\" sugar", "g", 20)]);
        assert!(csv.contains("\"\"\"fancy\"\" sugar\",g,20"));
    }
}
