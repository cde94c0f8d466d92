//! Row predicates and scalar comparison for the query façade.
//!
//! Filters operate on the dynamic row representation. Comparison follows
//! the JSON shape of the compared values: strings lexicographically (which
//! matches date and time order for the wire formats in use), numbers
//! numerically, booleans, and null. Mixed-type comparisons have no defined
//! order: range filters exclude such rows and sorting leaves them in place.
//! A missing column reads as JSON null.

use std::cmp::Ordering;

use serde_json::Value;

use crate::store::Row;

static JSON_NULL: Value = Value::Null;

/// A single conjunctive predicate recorded by the builder.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Filter {
    /// Column equals the value exactly.
    Eq { column: String, value: Value },
    /// Column equals any of the values.
    In { column: String, values: Vec<Value> },
    /// Column is greater than or equal to the value.
    Gte { column: String, value: Value },
    /// Column is less than or equal to the value.
    Lte { column: String, value: Value },
}

impl Filter {
    pub(crate) fn matches(&self, row: &Row) -> bool {
        match self {
            Self::Eq { column, value } => column_value(row, column) == value,
            Self::In { column, values } => values.contains(column_value(row, column)),
            Self::Gte { column, value } => {
                matches!(
                    compare_scalars(column_value(row, column), value),
                    Some(Ordering::Greater | Ordering::Equal)
                )
            }
            Self::Lte { column, value } => {
                matches!(
                    compare_scalars(column_value(row, column), value),
                    Some(Ordering::Less | Ordering::Equal)
                )
            }
        }
    }
}

/// Read a column off a row, treating a missing column as JSON null.
pub(crate) fn column_value<'a>(row: &'a Row, column: &str) -> &'a Value {
    row.get(column).unwrap_or(&JSON_NULL)
}

/// Compare two JSON scalars of the same shape.
///
/// Returns `None` when the values have different shapes or are not
/// scalars; callers decide whether that excludes the row (range filters)
/// or keeps it in place (sorting).
pub(crate) fn compare_scalars(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
        (Value::Number(left), Value::Number(right)) => {
            left.as_f64().partial_cmp(&right.as_f64())
        }
        (Value::Bool(left), Value::Bool(right)) => Some(left.cmp(right)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

/// Stable sort of rows by a column.
///
/// Ascending and descending both go through the comparator (descending
/// flips the operands rather than reversing afterwards), so rows comparing
/// equal keep their prior relative order in either direction.
pub(crate) fn sort_rows(rows: &mut [Row], column: &str, ascending: bool) {
    rows.sort_by(|a, b| {
        let (first, second) = if ascending { (a, b) } else { (b, a) };
        compare_scalars(column_value(first, column), column_value(second, column))
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn row(value: Value) -> Row {
        let mut map = Row::new();
        map.insert("col".to_owned(), value);
        map
    }

    #[rstest]
    #[case(json!("2024-07-29"), json!("2024-07-29"), true)]
    #[case(json!("2024-07-29"), json!("2024-07-30"), false)]
    #[case(json!(null), json!(null), true)]
    fn eq_matches_exact_values(#[case] stored: Value, #[case] wanted: Value, #[case] hit: bool) {
        let filter = Filter::Eq {
            column: "col".to_owned(),
            value: wanted,
        };
        assert_eq!(filter.matches(&row(stored)), hit);
    }

    #[test]
    fn missing_column_reads_as_null() {
        let filter = Filter::Eq {
            column: "absent".to_owned(),
            value: Value::Null,
        };
        assert!(filter.matches(&row(json!("anything"))));
    }

    #[rstest]
    #[case(json!("16:00"), true)]
    #[case(json!("08:00"), true)]
    #[case(json!("07:59"), false)]
    fn gte_uses_lexicographic_order_for_strings(#[case] stored: Value, #[case] hit: bool) {
        let filter = Filter::Gte {
            column: "col".to_owned(),
            value: json!("08:00"),
        };
        assert_eq!(filter.matches(&row(stored)), hit);
    }

    #[test]
    fn range_filters_exclude_mixed_shapes() {
        let filter = Filter::Lte {
            column: "col".to_owned(),
            value: json!(5),
        };
        assert!(!filter.matches(&row(json!("5"))));
    }

    #[test]
    fn in_matches_any_listed_value() {
        let filter = Filter::In {
            column: "col".to_owned(),
            values: vec![json!("u1"), json!("u2")],
        };
        assert!(filter.matches(&row(json!("u2"))));
        assert!(!filter.matches(&row(json!("u3"))));
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut rows: Vec<Row> = ["b", "a", "b", "a"]
            .into_iter()
            .enumerate()
            .map(|(index, key)| {
                let mut r = row(json!(key));
                r.insert("position".to_owned(), json!(index));
                r
            })
            .collect();

        sort_rows(&mut rows, "col", true);
        let positions: Vec<i64> = rows
            .iter()
            .filter_map(|r| r.get("position").and_then(Value::as_i64))
            .collect();
        assert_eq!(positions, vec![1, 3, 0, 2]);

        sort_rows(&mut rows, "col", false);
        let reversed: Vec<i64> = rows
            .iter()
            .filter_map(|r| r.get("position").and_then(Value::as_i64))
            .collect();
        assert_eq!(reversed, vec![0, 2, 1, 3]);
    }
}
