//! Boundary validation for item payloads
//!
//! Run by the client before a request is issued and again by the store
//! before anything reaches the database.

use std::collections::{BTreeSet, HashSet};

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{FieldType, FormField, ItemCreate, ItemUpdate, OrderEntry};

// ── Text length limits ──────────────────────────────────────────────

/// Item and form field names
pub const MAX_NAME_LEN: usize = 200;

/// Form field labels and units
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Item descriptions
pub const MAX_NOTE_LEN: usize = 2000;

/// Form fields per item
pub const MAX_FORM_FIELDS: usize = 100;

// ── Generic helpers ─────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        )
        .with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

// ── Item payloads ───────────────────────────────────────────────────

fn validate_item_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::new(ErrorCode::ItemNameRequired).with_detail("field", "name"));
    }
    validate_required_text(name, "name", MAX_NAME_LEN)
}

/// Validate form field descriptors
pub fn validate_form_fields(fields: &[FormField]) -> AppResult<()> {
    if fields.len() > MAX_FORM_FIELDS {
        return Err(AppError::with_message(
            ErrorCode::FormFieldInvalid,
            format!("too many form fields ({}, max {MAX_FORM_FIELDS})", fields.len()),
        ));
    }

    let mut seen = HashSet::new();
    for (index, field) in fields.iter().enumerate() {
        let invalid = |msg: String| {
            AppError::with_message(ErrorCode::FormFieldInvalid, msg).with_detail("index", index)
        };

        validate_required_text(&field.name, "formFields.name", MAX_NAME_LEN)
            .map_err(|e| invalid(e.message))?;
        validate_required_text(&field.label, "formFields.label", MAX_SHORT_TEXT_LEN)
            .map_err(|e| invalid(e.message))?;
        validate_optional_text(&field.unit, "formFields.unit", MAX_SHORT_TEXT_LEN)
            .map_err(|e| invalid(e.message))?;

        if !seen.insert(field.name.trim()) {
            return Err(invalid(format!("duplicate form field name '{}'", field.name)));
        }
        if field.field_type != FieldType::Select && field.options.is_some() {
            return Err(invalid(format!(
                "form field '{}' has options but is not a select",
                field.name
            )));
        }
    }
    Ok(())
}

/// Validate a create payload
pub fn validate_item_create(data: &ItemCreate) -> AppResult<()> {
    validate_item_name(&data.name)?;
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    validate_form_fields(&data.form_fields)
}

/// Validate an update payload; absent fields are left untouched
pub fn validate_item_update(data: &ItemUpdate) -> AppResult<()> {
    if let Some(name) = &data.name {
        validate_item_name(name)?;
    }
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    if let Some(fields) = &data.form_fields {
        validate_form_fields(fields)?;
    }
    Ok(())
}

// ── Reorder payload ─────────────────────────────────────────────────

/// Validate a bulk reorder against the ids currently stored
///
/// The payload must name every stored id exactly once, and its orders must
/// be a permutation of `1..N`.
pub fn validate_reorder(entries: &[OrderEntry], stored_ids: &[i64]) -> AppResult<()> {
    let stored: BTreeSet<i64> = stored_ids.iter().copied().collect();

    let mut requested = BTreeSet::new();
    let mut duplicated = Vec::new();
    for entry in entries {
        if !requested.insert(entry.id) {
            duplicated.push(entry.id);
        }
    }
    if !duplicated.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::ReorderIncomplete,
            "reorder lists an item more than once",
        )
        .with_detail("duplicated", duplicated));
    }

    let unknown: Vec<i64> = requested.difference(&stored).copied().collect();
    if let Some(&first) = unknown.first() {
        return Err(AppError::item_not_found(first).with_detail("unknown", unknown));
    }

    let missing: Vec<i64> = stored.difference(&requested).copied().collect();
    if !missing.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::ReorderIncomplete,
            format!("reorder is missing {} item(s)", missing.len()),
        )
        .with_detail("missing", missing));
    }

    let n = entries.len() as i32;
    let orders: BTreeSet<i32> = entries.iter().map(|e| e.order).collect();
    let is_permutation =
        orders.len() == entries.len() && orders.iter().copied().eq(1..=n);
    if !is_permutation {
        return Err(AppError::with_message(
            ErrorCode::ReorderInvalid,
            format!("orders must be exactly 1..{n}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, field_type: FieldType) -> FormField {
        FormField {
            name: name.to_string(),
            label: name.to_uppercase(),
            field_type,
            unit: None,
            required: false,
            options: None,
        }
    }

    fn create(name: &str) -> ItemCreate {
        ItemCreate {
            name: name.to_string(),
            description: None,
            form_fields: vec![],
        }
    }

    #[test]
    fn test_blank_name_is_rejected() {
        for name in ["", "   ", "\t\n"] {
            let err = validate_item_create(&create(name)).unwrap_err();
            assert_eq!(err.code, ErrorCode::ItemNameRequired);
        }
        assert!(validate_item_create(&create("Pintura")).is_ok());
    }

    #[test]
    fn test_long_description_is_rejected() {
        let mut data = create("Pintura");
        data.description = Some("x".repeat(MAX_NOTE_LEN + 1));
        let err = validate_item_create(&data).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_form_field_rules() {
        let mut data = create("Pintura");
        data.form_fields = vec![field("area", FieldType::Number), field("area", FieldType::Text)];
        assert_eq!(
            validate_item_create(&data).unwrap_err().code,
            ErrorCode::FormFieldInvalid
        );

        let mut with_options = field("color", FieldType::Text);
        with_options.options = Some(vec!["rojo".to_string()]);
        data.form_fields = vec![with_options.clone()];
        assert!(validate_item_create(&data).is_err());

        with_options.field_type = FieldType::Select;
        data.form_fields = vec![with_options];
        assert!(validate_item_create(&data).is_ok());

        data.form_fields = vec![field(" ", FieldType::Date)];
        let err = validate_item_create(&data).unwrap_err();
        assert_eq!(err.code, ErrorCode::FormFieldInvalid);
        assert_eq!(err.details.unwrap().get("index").unwrap(), 0);
    }

    #[test]
    fn test_update_only_checks_present_fields() {
        assert!(validate_item_update(&ItemUpdate::default()).is_ok());
        let update = ItemUpdate {
            name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            validate_item_update(&update).unwrap_err().code,
            ErrorCode::ItemNameRequired
        );
    }

    #[test]
    fn test_reorder_accepts_full_permutation() {
        let entries = vec![
            OrderEntry { id: 3, order: 1 },
            OrderEntry { id: 1, order: 3 },
            OrderEntry { id: 2, order: 2 },
        ];
        assert!(validate_reorder(&entries, &[1, 2, 3]).is_ok());
        assert!(validate_reorder(&[], &[]).is_ok());
    }

    #[test]
    fn test_reorder_rejects_partial_payload() {
        let entries = vec![OrderEntry { id: 1, order: 1 }, OrderEntry { id: 2, order: 2 }];
        let err = validate_reorder(&entries, &[1, 2, 3]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReorderIncomplete);
    }

    #[test]
    fn test_reorder_rejects_unknown_and_duplicate_ids() {
        let unknown = vec![OrderEntry { id: 1, order: 1 }, OrderEntry { id: 9, order: 2 }];
        assert_eq!(
            validate_reorder(&unknown, &[1, 2]).unwrap_err().code,
            ErrorCode::ItemNotFound
        );

        let duplicated = vec![OrderEntry { id: 1, order: 1 }, OrderEntry { id: 1, order: 2 }];
        assert_eq!(
            validate_reorder(&duplicated, &[1, 2]).unwrap_err().code,
            ErrorCode::ReorderIncomplete
        );
    }

    #[test]
    fn test_reorder_rejects_gaps_and_repeats() {
        let gap = vec![OrderEntry { id: 1, order: 1 }, OrderEntry { id: 2, order: 3 }];
        assert_eq!(
            validate_reorder(&gap, &[1, 2]).unwrap_err().code,
            ErrorCode::ReorderInvalid
        );

        let repeat = vec![OrderEntry { id: 1, order: 1 }, OrderEntry { id: 2, order: 1 }];
        assert_eq!(
            validate_reorder(&repeat, &[1, 2]).unwrap_err().code,
            ErrorCode::ReorderInvalid
        );
    }
}
