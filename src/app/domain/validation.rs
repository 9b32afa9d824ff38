//! Structural checks for presentations coming from untrusted sources
//! (shared files, hand-edited storage).
//!
//! Only presence, primitive types and the `type`/`transition` enums are
//! checked, with numeric ranges matching what the model can hold. Id
//! uniqueness and cross references are left to the reducer.

use serde_json::{Map, Value};
use thiserror::Error;

use super::presentation::{ElementKind, Presentation, Transition};
use crate::app::infrastructure::error::Result;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("missing field at {0}")]
    Missing(String),

    #[error("expected {expected} at {path}")]
    WrongType { path: String, expected: &'static str },

    #[error("unknown value {value:?} at {path}")]
    UnknownVariant { path: String, value: String },
}

#[derive(Clone, Copy)]
enum Kind {
    String,
    Number,
    /// Fits an `i32`
    Integer,
    /// Whole milliseconds, fits an `i64`
    Timestamp,
    Index,
    Bool,
}

impl Kind {
    fn name(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Integer => "32-bit integer",
            Kind::Timestamp => "integer timestamp",
            Kind::Index => "non-negative integer",
            Kind::Bool => "boolean",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Kind::String => value.is_string(),
            Kind::Number => value.is_number(),
            Kind::Integer => value.as_i64().is_some_and(|v| i32::try_from(v).is_ok()),
            Kind::Timestamp => value.is_i64(),
            Kind::Index => value.is_u64(),
            Kind::Bool => value.is_boolean(),
        }
    }
}

/// Check that `value` has the shape of a stored presentation.
pub fn validate_presentation(value: &Value) -> std::result::Result<(), ValidationError> {
    let root = object(value, "$")?;
    required(root, "$", "id", Kind::String)?;
    required(root, "$", "title", Kind::String)?;
    required(root, "$", "created", Kind::Timestamp)?;
    required(root, "$", "updated", Kind::Timestamp)?;
    required(root, "$", "currentSlideIndex", Kind::Index)?;

    let slides = array(field(root, "$", "slides")?, "$.slides")?;
    for (i, slide) in slides.iter().enumerate() {
        validate_slide(slide, &format!("$.slides[{}]", i))?;
    }
    Ok(())
}

fn validate_slide(value: &Value, path: &str) -> std::result::Result<(), ValidationError> {
    let slide = object(value, path)?;
    required(slide, path, "id", Kind::String)?;
    required(slide, path, "background", Kind::String)?;
    optional(slide, path, "notes", Kind::String)?;

    let transition = required(slide, path, "transition", Kind::String)?;
    if let Some(name) = transition.as_str()
        && Transition::from_str(name).is_none()
    {
        return Err(ValidationError::UnknownVariant {
            path: format!("{}.transition", path),
            value: name.to_string(),
        });
    }

    let elements_path = format!("{}.elements", path);
    let elements = array(field(slide, path, "elements")?, &elements_path)?;
    for (i, element) in elements.iter().enumerate() {
        validate_element(element, &format!("{}[{}]", elements_path, i))?;
    }
    Ok(())
}

fn validate_element(value: &Value, path: &str) -> std::result::Result<(), ValidationError> {
    let element = object(value, path)?;
    required(element, path, "id", Kind::String)?;
    required(element, path, "content", Kind::String)?;
    optional(element, path, "isEditing", Kind::Bool)?;

    let kind = required(element, path, "type", Kind::String)?;
    if let Some(name) = kind.as_str()
        && ElementKind::from_str(name).is_none()
    {
        return Err(ValidationError::UnknownVariant {
            path: format!("{}.type", path),
            value: name.to_string(),
        });
    }

    let style_path = format!("{}.style", path);
    let style = object(field(element, path, "style")?, &style_path)?;
    pair(style, &style_path, "position", ["x", "y"])?;
    pair(style, &style_path, "size", ["width", "height"])?;
    required(style, &style_path, "zIndex", Kind::Integer)?;
    optional(style, &style_path, "rotation", Kind::Number)?;
    optional(style, &style_path, "opacity", Kind::Number)?;
    for key in [
        "color",
        "fontFamily",
        "fontSize",
        "fontWeight",
        "textAlign",
        "backgroundColor",
        "borderRadius",
    ] {
        optional(style, &style_path, key, Kind::String)?;
    }

    if let Some(animation) = element.get("animation")
        && !animation.is_null()
    {
        let animation_path = format!("{}.animation", path);
        let animation = object(animation, &animation_path)?;
        required(animation, &animation_path, "type", Kind::String)?;
        required(animation, &animation_path, "duration", Kind::Number)?;
        required(animation, &animation_path, "delay", Kind::Number)?;
    }
    Ok(())
}

fn pair(
    parent: &Map<String, Value>,
    path: &str,
    key: &str,
    members: [&str; 2],
) -> std::result::Result<(), ValidationError> {
    let inner_path = format!("{}.{}", path, key);
    let inner = object(field(parent, path, key)?, &inner_path)?;
    for member in members {
        required(inner, &inner_path, member, Kind::Number)?;
    }
    Ok(())
}

fn field<'a>(
    parent: &'a Map<String, Value>,
    path: &str,
    key: &str,
) -> std::result::Result<&'a Value, ValidationError> {
    parent
        .get(key)
        .ok_or_else(|| ValidationError::Missing(format!("{}.{}", path, key)))
}

fn required<'a>(
    parent: &'a Map<String, Value>,
    path: &str,
    key: &str,
    kind: Kind,
) -> std::result::Result<&'a Value, ValidationError> {
    let value = field(parent, path, key)?;
    check_kind(value, &format!("{}.{}", path, key), kind)?;
    Ok(value)
}

// Absent and explicit null are both accepted for optional fields.
fn optional(
    parent: &Map<String, Value>,
    path: &str,
    key: &str,
    kind: Kind,
) -> std::result::Result<(), ValidationError> {
    match parent.get(key) {
        None | Some(Value::Null) => Ok(()),
        Some(value) => check_kind(value, &format!("{}.{}", path, key), kind),
    }
}

fn check_kind(value: &Value, path: &str, kind: Kind) -> std::result::Result<(), ValidationError> {
    if kind.matches(value) {
        Ok(())
    } else {
        Err(ValidationError::WrongType {
            path: path.to_string(),
            expected: kind.name(),
        })
    }
}

fn object<'a>(
    value: &'a Value,
    path: &str,
) -> std::result::Result<&'a Map<String, Value>, ValidationError> {
    value.as_object().ok_or_else(|| ValidationError::WrongType {
        path: path.to_string(),
        expected: "object",
    })
}

fn array<'a>(value: &'a Value, path: &str) -> std::result::Result<&'a Vec<Value>, ValidationError> {
    value.as_array().ok_or_else(|| ValidationError::WrongType {
        path: path.to_string(),
        expected: "array",
    })
}

/// Parse, validate and decode a presentation from untrusted JSON.
///
/// An empty slide list or an out-of-range current index is repaired rather
/// than rejected.
pub fn import_presentation(json: &str) -> Result<Presentation> {
    let value: Value = serde_json::from_str(json)?;
    validate_presentation(&value)?;
    let mut presentation: Presentation = serde_json::from_value(value)?;
    presentation.repair();
    Ok(presentation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::error::AppError;
    use serde_json::json;

    fn valid() -> Value {
        serde_json::to_value(Presentation::new_at("Shared", 1000)).unwrap()
    }

    #[test]
    fn test_default_presentation_is_valid() {
        assert_eq!(validate_presentation(&valid()), Ok(()));
    }

    #[test]
    fn test_missing_title() {
        let mut value = valid();
        value.as_object_mut().unwrap().remove("title");
        assert_eq!(
            validate_presentation(&value),
            Err(ValidationError::Missing("$.title".to_string()))
        );
    }

    #[test]
    fn test_unknown_element_type() {
        let mut value = valid();
        value["slides"][0]["elements"][1]["type"] = json!("video");
        assert_eq!(
            validate_presentation(&value),
            Err(ValidationError::UnknownVariant {
                path: "$.slides[0].elements[1].type".to_string(),
                value: "video".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_transition() {
        let mut value = valid();
        value["slides"][0]["transition"] = json!("dissolve");
        let err = validate_presentation(&value).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownVariant { .. }));
    }

    #[test]
    fn test_wrong_primitive_type() {
        let mut value = valid();
        value["slides"][0]["elements"][0]["style"]["position"]["x"] = json!("400");
        assert_eq!(
            validate_presentation(&value),
            Err(ValidationError::WrongType {
                path: "$.slides[0].elements[0].style.position.x".to_string(),
                expected: "number",
            })
        );
    }

    #[test]
    fn test_optional_fields_checked_when_present() {
        let mut value = valid();
        value["slides"][0]["notes"] = json!(12);
        assert!(validate_presentation(&value).is_err());

        let mut value = valid();
        value["slides"][0]["elements"][0]["animation"] = json!({"type": "fadeIn", "duration": 1});
        assert_eq!(
            validate_presentation(&value),
            Err(ValidationError::Missing(
                "$.slides[0].elements[0].animation.delay".to_string()
            ))
        );
    }

    #[test]
    fn test_null_is_editing_imports_as_false() {
        let mut value = valid();
        value["slides"][0]["elements"][0]["isEditing"] = Value::Null;
        assert_eq!(validate_presentation(&value), Ok(()));
        let imported = import_presentation(&value.to_string()).unwrap();
        assert!(!imported.slides[0].elements[0].is_editing);
    }

    #[test]
    fn test_z_index_out_of_range() {
        for z in [json!(3_000_000_000_i64), json!(1.5)] {
            let mut value = valid();
            value["slides"][0]["elements"][0]["style"]["zIndex"] = z;
            assert_eq!(
                validate_presentation(&value),
                Err(ValidationError::WrongType {
                    path: "$.slides[0].elements[0].style.zIndex".to_string(),
                    expected: "32-bit integer",
                })
            );
            assert!(matches!(
                import_presentation(&value.to_string()),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_fractional_timestamp_rejected() {
        let mut value = valid();
        value["created"] = json!(1.5);
        assert_eq!(
            validate_presentation(&value),
            Err(ValidationError::WrongType {
                path: "$.created".to_string(),
                expected: "integer timestamp",
            })
        );

        let mut value = valid();
        value["updated"] = json!(u64::MAX);
        assert!(validate_presentation(&value).is_err());
    }

    #[test]
    fn test_duplicate_ids_are_not_rejected() {
        let mut value = valid();
        let first = value["slides"][0]["elements"][0]["id"].clone();
        value["slides"][0]["elements"][1]["id"] = first;
        assert_eq!(validate_presentation(&value), Ok(()));
    }

    #[test]
    fn test_import_repairs_empty_deck() {
        let mut value = valid();
        value["slides"] = json!([]);
        value["currentSlideIndex"] = json!(3);
        let imported = import_presentation(&value.to_string()).unwrap();
        assert_eq!(imported.slides.len(), 1);
        assert_eq!(imported.current_slide_index, 0);
    }

    #[test]
    fn test_import_rejects_invalid() {
        let err = import_presentation(r#"{"id": "x"}"#).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = import_presentation("not json").unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }
}
