// Strongly-typed records handed to the output sink. No serde_json::Value here.

/// One field of a visited object, with its inferred type label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub type_label: String,
}

/// One JSON object occurrence. Occurrences are not deduplicated by shape:
/// two structurally identical objects yield two records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralRecord {
    pub name: String,
    /// Session-unique visit number in pre-order; 0 is the root.
    pub instance: usize,
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// The field holds the child object directly.
    Direct,
    /// The field holds an array (chain) whose sampled first element is the child.
    ThroughArray,
}

/// Directed containment relationship between two records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainmentEdge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
    /// Array-indexing annotation for `ThroughArray` edges, e.g. `el[][0]`.
    pub note: Option<String>,
}

/// Append-only receiver for the walker's output, consumed in emission order.
/// Records and edges are write-once; there is no update or deletion.
pub trait EventSink {
    fn emit_record(&mut self, record: &StructuralRecord);
    fn emit_edge(&mut self, edge: &ContainmentEdge);
}
