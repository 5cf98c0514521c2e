use std::collections::HashSet;

use super::params::ParameterTable;

/// Validate a coefficient table before scoring with it.
/// Returns all validation errors at once (not just the first).
pub fn validate_table(table: &ParameterTable) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    if table.events.is_empty() {
        errors.push("table has no events".to_string());
    }

    for (i, params) in table.events.iter().enumerate() {
        let row = i + 1;
        let name = params.event.trim();

        if name.is_empty() {
            errors.push(format!("row {}: event name is empty", row));
        } else if !seen.insert(name.to_lowercase()) {
            errors.push(format!("row {}: duplicate event '{}'", row, name));
        }

        for (column, value) in [("a", params.a), ("b", params.b), ("c", params.c)] {
            if !value.is_finite() {
                errors.push(format!("row {} ({}): {} must be a finite number", row, name, column));
            }
        }

        // Negative or zero a/c give negative, flat or inverted scoring curves
        if params.a <= 0.0 {
            errors.push(format!("row {} ({}): a must be positive, got {}", row, name, params.a));
        }
        if params.c <= 0.0 {
            errors.push(format!("row {} ({}): c must be positive, got {}", row, name, params.c));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
