use serde_json::Value;

use crate::models::{Capacity, FieldMap};

/// Budget ceiling for a requirement, read from the field the category
/// profile names. Missing or non-numeric values resolve to 0, which fails
/// every nonzero-priced offering.
pub fn budget_limit(fields: &FieldMap, budget_field: &str) -> f64 {
    match fields.get(budget_field) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Required guest capacity, when the category has a capacity notion and the
/// requirement states one. A stated but non-numeric value resolves to 0; an
/// absent, empty, or zero value means no capacity requirement.
pub fn required_capacity(fields: &FieldMap, capacity_field: Option<&str>) -> Option<u32> {
    let field = capacity_field?;
    match fields.get(field)? {
        Value::Number(n) => match n.as_u64() {
            Some(0) | None => None,
            Some(seats) => Some(seats as u32),
        },
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.parse().unwrap_or(0))
            }
        }
        _ => None,
    }
}

/// Advertised capacity from an offering's attribute map. Categories without
/// a vendor capacity attribute have no capacity notion; absent or
/// non-numeric attribute values parse to 0 seats.
pub fn resolve_capacity(attributes: &FieldMap, capacity_attr: Option<&str>) -> Capacity {
    let Some(attr) = capacity_attr else {
        return Capacity::NotApplicable;
    };

    let seats = attributes
        .get(attr)
        .map(|value| match value {
            Value::Number(n) => n.as_u64().unwrap_or(0) as u32,
            Value::String(s) => s.trim().trim_matches('"').parse().unwrap_or(0),
            _ => 0,
        })
        .unwrap_or(0);

    Capacity::Seats(seats)
}

/// Budget rule: the offering price must not exceed the requirement's budget.
#[inline]
pub fn within_budget(price: f64, budget: f64) -> bool {
    price <= budget
}

/// Capacity rule: vacuously satisfied when no capacity is required,
/// otherwise the offering must seat at least the required count.
#[inline]
pub fn meets_capacity(capacity: Capacity, required: Option<u32>) -> bool {
    match required {
        None => true,
        Some(needed) => matches!(capacity, Capacity::Seats(seats) if seats >= needed),
    }
}

/// Joint feasibility decision for one candidate. A booking conflict on the
/// event date excludes unconditionally.
#[inline]
pub fn is_feasible(
    price: f64,
    budget: f64,
    capacity: Capacity,
    required: Option<u32>,
    has_conflict: bool,
) -> bool {
    !has_conflict && within_budget(price, budget) && meets_capacity(capacity, required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> FieldMap {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_budget_from_number_and_string() {
        assert_eq!(budget_limit(&fields(json!({ "budget": 5000 })), "budget"), 5000.0);
        assert_eq!(
            budget_limit(&fields(json!({ "budget": "4500.50" })), "budget"),
            4500.50
        );
    }

    #[test]
    fn test_missing_or_malformed_budget_is_zero() {
        assert_eq!(budget_limit(&FieldMap::new(), "budget"), 0.0);
        assert_eq!(
            budget_limit(&fields(json!({ "budget": "a lot" })), "budget"),
            0.0
        );
        assert_eq!(budget_limit(&fields(json!({ "budget": null })), "budget"), 0.0);
    }

    #[test]
    fn test_budget_boundary_inclusive() {
        assert!(within_budget(5000.0, 5000.0));
        assert!(!within_budget(5000.01, 5000.0));
    }

    #[test]
    fn test_required_capacity_parsing() {
        let record = fields(json!({ "guest_count": 100 }));
        assert_eq!(required_capacity(&record, Some("guest_count")), Some(100));

        let as_string = fields(json!({ "guest_count": "80" }));
        assert_eq!(required_capacity(&as_string, Some("guest_count")), Some(80));
    }

    #[test]
    fn test_unstated_capacity_means_no_requirement() {
        assert_eq!(required_capacity(&FieldMap::new(), Some("guest_count")), None);
        assert_eq!(
            required_capacity(&fields(json!({ "guest_count": 0 })), Some("guest_count")),
            None
        );
        assert_eq!(
            required_capacity(&fields(json!({ "guest_count": "" })), Some("guest_count")),
            None
        );
        // No capacity notion for the category at all
        assert_eq!(required_capacity(&fields(json!({ "guest_count": 50 })), None), None);
    }

    #[test]
    fn test_malformed_stated_capacity_is_zero() {
        let record = fields(json!({ "guest_count": "many" }));
        assert_eq!(required_capacity(&record, Some("guest_count")), Some(0));
    }

    #[test]
    fn test_resolve_capacity() {
        let attrs = fields(json!({ "Guest Count": "\"120\"" }));
        assert_eq!(resolve_capacity(&attrs, Some("Guest Count")), Capacity::Seats(120));

        // Absent attribute parses to zero seats
        assert_eq!(resolve_capacity(&FieldMap::new(), Some("Guest Count")), Capacity::Seats(0));

        // Category without a capacity attribute
        assert_eq!(resolve_capacity(&attrs, None), Capacity::NotApplicable);
    }

    #[test]
    fn test_non_numeric_vendor_capacity_is_zero() {
        let attrs = fields(json!({ "Guest Count": "plenty" }));
        assert_eq!(resolve_capacity(&attrs, Some("Guest Count")), Capacity::Seats(0));
    }

    #[test]
    fn test_capacity_boundary() {
        assert!(meets_capacity(Capacity::Seats(100), Some(100)));
        assert!(!meets_capacity(Capacity::Seats(99), Some(100)));
        assert!(meets_capacity(Capacity::NotApplicable, None));
        // Required capacity against a category with no advertised count
        assert!(!meets_capacity(Capacity::NotApplicable, Some(1)));
    }

    #[test]
    fn test_conflict_excludes_unconditionally() {
        assert!(!is_feasible(100.0, 5000.0, Capacity::Seats(200), Some(100), true));
        assert!(is_feasible(100.0, 5000.0, Capacity::Seats(200), Some(100), false));
    }
}
