//! Recursive schema walker: one structural record per visited JSON object,
//! one containment edge per field that led to recursion.
//!
//! The traversal is intentionally sequential: depth-first, pre-order, with a
//! single session-scoped instance counter owned by the walker. A record is
//! handed to the sink only after every one of its fields — including the
//! recursive ones — carries its final label, so child records always reach
//! the sink before their parent.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::classify::{self, TypeTag, Unraveled};
use crate::ir::{ContainmentEdge, EdgeKind, EventSink, FieldDescriptor, StructuralRecord};

// ------------------------------- Policy ---------------------------------- //

/// Recursion guard: nesting depth is input-controlled, so the walker refuses
/// to descend past this many levels. The CLI can override it.
pub const DEFAULT_DEPTH_LIMIT: usize = 128;

// ------------------------------- Errors ---------------------------------- //

/// Raised when a value the walker expected to be array- or object-shaped
/// cannot be interpreted, or when recursion exceeds the depth bound.
/// Never retried; the whole traversal aborts and the error propagates to the
/// caller unchanged.
#[derive(Debug, Error)]
pub enum StructureError {
    #[error("value at `{key}` ({path}) is not an indexable array")]
    MalformedArrayAccess { key: String, path: String },

    #[error("value at `{key}` ({path}) is not an object")]
    UnsupportedValueShape { key: String, path: String },

    #[error("nesting at `{key}` ({path}) exceeds the depth limit of {limit}")]
    DepthLimitExceeded { key: String, path: String, limit: usize },
}

// ------------------------------- Walker ---------------------------------- //

pub struct Walker<'s, S: EventSink> {
    sink: &'s mut S,
    depth_limit: usize,
    /// Pre-order instance counter; the parent allocates its number before
    /// descending into any child.
    next_instance: usize,
    /// Key path of the visit in progress, for diagnostics only.
    path: Vec<String>,
}

impl<'s, S: EventSink> Walker<'s, S> {
    pub fn new(sink: &'s mut S) -> Self {
        Self::with_depth_limit(sink, DEFAULT_DEPTH_LIMIT)
    }

    pub fn with_depth_limit(sink: &'s mut S, depth_limit: usize) -> Self {
        Walker { sink, depth_limit, next_instance: 0, path: Vec::new() }
    }

    /// Walk a whole document. The root must be an object.
    pub fn walk(&mut self, root: &Value) -> Result<StructuralRecord, StructureError> {
        let object = root.as_object().ok_or_else(|| StructureError::UnsupportedValueShape {
            key: "root".to_string(),
            path: String::new(),
        })?;
        self.visit(object, "root")
    }

    fn visit(
        &mut self,
        object: &Map<String, Value>,
        name: &str,
    ) -> Result<StructuralRecord, StructureError> {
        let instance = self.next_instance;
        self.next_instance += 1;
        self.path.push(name.to_string());
        if self.path.len() > self.depth_limit {
            return Err(StructureError::DepthLimitExceeded {
                key: name.to_string(),
                path: self.dotted_path(),
                limit: self.depth_limit,
            });
        }

        let mut fields = Vec::with_capacity(object.len());
        for (key, value) in object {
            let tag = classify::tag_of(value);
            tracing::debug!(key = %key, kind = tag.name(), level = self.path.len(), "classified field");
            let type_label = match tag {
                TypeTag::Object => {
                    self.emit_edge(name, key, EdgeKind::Direct, None);
                    let child = value.as_object().ok_or_else(|| {
                        StructureError::UnsupportedValueShape {
                            key: key.clone(),
                            path: self.dotted_path(),
                        }
                    })?;
                    self.visit(child, key)?;
                    TypeTag::Object.name().to_string()
                }
                TypeTag::Array => {
                    let items = value.as_array().ok_or_else(|| {
                        StructureError::MalformedArrayAccess {
                            key: key.clone(),
                            path: self.dotted_path(),
                        }
                    })?;
                    match classify::unravel(items) {
                        // element type unknown; keep the field primitive-ish, no edge
                        Unraveled::Empty => classify::empty_list_label(),
                        Unraveled::Element { sample, tag: TypeTag::Object, depth } => {
                            self.emit_edge(
                                name,
                                key,
                                EdgeKind::ThroughArray,
                                Some(classify::index_note(depth)),
                            );
                            let child = sample.as_object().ok_or_else(|| {
                                StructureError::MalformedArrayAccess {
                                    key: key.clone(),
                                    path: self.dotted_path(),
                                }
                            })?;
                            // only one representative element is ever visited
                            self.visit(child, key)?;
                            classify::list_label(depth, TypeTag::Object)
                        }
                        Unraveled::Element { tag, depth, .. } => classify::list_label(depth, tag),
                    }
                }
                primitive => primitive.name().to_string(),
            };
            fields.push(FieldDescriptor { name: key.clone(), type_label });
        }

        self.path.pop();
        let record = StructuralRecord { name: name.to_string(), instance, fields };
        self.sink.emit_record(&record);
        Ok(record)
    }

    fn emit_edge(&mut self, from: &str, to: &str, kind: EdgeKind, note: Option<String>) {
        self.sink.emit_edge(&ContainmentEdge {
            from: from.to_string(),
            to: to.to_string(),
            kind,
            note,
        });
    }

    fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

/// Convenience: walk with the default depth limit.
pub fn walk_into<S: EventSink>(
    root: &Value,
    sink: &mut S,
) -> Result<StructuralRecord, StructureError> {
    Walker::new(sink).walk(root)
}

// ------------------------------- Tests ------------------------------------ //
