//! Shallow type tagging and nested-array unraveling.
//!
//! Pure functions over an already-parsed `serde_json::Value`; all traversal
//! state lives in the walker. Only the first element of each array level is
//! sampled, so heterogeneous arrays are assumed to match element 0. This is a
//! deliberate, documented approximation, not detected or reported.

use serde_json::Value;

/// Shallow tag of a JSON value. `Null` counts as a primitive and is never
/// recursed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl TypeTag {
    /// Name used in field labels.
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Bool => "bool",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Array => "list",
            TypeTag::Object => "object",
        }
    }
}

pub fn tag_of(value: &Value) -> TypeTag {
    match value {
        Value::Null => TypeTag::Null,
        Value::Bool(_) => TypeTag::Bool,
        Value::Number(_) => TypeTag::Number,
        Value::String(_) => TypeTag::String,
        Value::Array(_) => TypeTag::Array,
        Value::Object(_) => TypeTag::Object,
    }
}

/// Result of descending an array chain via first elements.
#[derive(Debug, Clone, Copy)]
pub enum Unraveled<'a> {
    /// The array, or a nested first element, was empty: element type unknown.
    Empty,
    /// First non-array element, its tag, and how many extra array levels were
    /// crossed to reach it (`depth == 0` for a flat array).
    Element {
        sample: &'a Value,
        tag: TypeTag,
        depth: usize,
    },
}

/// Descend into `items[0]` while it is itself a non-empty array.
pub fn unravel(items: &[Value]) -> Unraveled<'_> {
    let mut current = items;
    let mut depth = 0usize;
    loop {
        match current.first() {
            None => return Unraveled::Empty,
            Some(Value::Array(inner)) => {
                current = inner;
                depth += 1;
            }
            Some(sample) => {
                return Unraveled::Element { sample, tag: tag_of(sample), depth };
            }
        }
    }
}

/// `list<T>`, with one `[]` pair per extra nesting level.
pub fn list_label(depth: usize, element: TypeTag) -> String {
    format!("list{}<{}>", "[]".repeat(depth), element.name())
}

/// Marker for arrays whose element type cannot be determined.
pub fn empty_list_label() -> String {
    "list<?>".to_string()
}

/// Annotation for through-array edges: which element the child block samples.
pub fn index_note(depth: usize) -> String {
    format!("el{}[0]", "[]".repeat(depth))
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tags_cover_every_shape() {
        assert_eq!(tag_of(&json!(null)), TypeTag::Null);
        assert_eq!(tag_of(&json!(true)), TypeTag::Bool);
        assert_eq!(tag_of(&json!(1.5)), TypeTag::Number);
        assert_eq!(tag_of(&json!("x")), TypeTag::String);
        assert_eq!(tag_of(&json!([1])), TypeTag::Array);
        assert_eq!(tag_of(&json!({"k": 1})), TypeTag::Object);
    }

    #[test]
    fn unravel_flat_array_is_depth_zero() {
        let v = json!([1, 2, 3]);
        match unravel(v.as_array().unwrap()) {
            Unraveled::Element { tag, depth, .. } => {
                assert_eq!(tag, TypeTag::Number);
                assert_eq!(depth, 0);
            }
            Unraveled::Empty => panic!("flat array must unravel"),
        }
    }

    #[test]
    fn unravel_counts_extra_levels() {
        let v = json!([[["x"], ["y"]], [["z"]]]);
        match unravel(v.as_array().unwrap()) {
            Unraveled::Element { tag, depth, .. } => {
                assert_eq!(tag, TypeTag::String);
                assert_eq!(depth, 2);
            }
            Unraveled::Empty => panic!("nested array must unravel"),
        }
    }

    #[test]
    fn unravel_reports_empty_at_any_level() {
        let empty = json!([]);
        assert!(matches!(unravel(empty.as_array().unwrap()), Unraveled::Empty));

        let nested_empty = json!([[]]);
        assert!(matches!(unravel(nested_empty.as_array().unwrap()), Unraveled::Empty));

        // only element 0 is sampled, so a later non-empty sibling does not help
        let first_empty = json!([[], [1]]);
        assert!(matches!(unravel(first_empty.as_array().unwrap()), Unraveled::Empty));
    }

    #[test]
    fn labels_encode_depth_brackets() {
        assert_eq!(list_label(0, TypeTag::Number), "list<number>");
        assert_eq!(list_label(1, TypeTag::Number), "list[]<number>");
        assert_eq!(list_label(2, TypeTag::String), "list[][]<string>");
        assert_eq!(list_label(0, TypeTag::Object), "list<object>");
        assert_eq!(empty_list_label(), "list<?>");
    }

    #[test]
    fn index_notes_encode_depth_brackets() {
        assert_eq!(index_note(0), "el[0]");
        assert_eq!(index_note(1), "el[][0]");
        assert_eq!(index_note(2), "el[][][0]");
    }
}
