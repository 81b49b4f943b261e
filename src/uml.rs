//! PlantUML rendering of the walker's event stream.
//!
//! The whole script is buffered in memory and only handed out by
//! [`PlantUml::into_string`], so callers write the output file after a
//! successful walk and a failed run never leaves a truncated script behind.
//! Framing is explicit: `new` opens the diagram, `into_string` closes it.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::{ContainmentEdge, EdgeKind, EventSink, StructuralRecord};

/// Names PlantUML accepts bare; anything else must be quoted.
static PLAIN_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

pub struct PlantUml {
    out: String,
}

impl PlantUml {
    pub fn new() -> Self {
        PlantUml { out: String::from("@startuml\n") }
    }

    /// Close the diagram and hand back the script.
    pub fn into_string(mut self) -> String {
        self.out.push_str("@enduml\n");
        self.out
    }
}

impl Default for PlantUml {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for PlantUml {
    fn emit_record(&mut self, record: &StructuralRecord) {
        self.out.push_str(&format!("class {} {{\n", display_name(&record.name)));
        for field in &record.fields {
            self.out.push_str(&format!("\t+{} : {}\n", field.name, field.type_label));
        }
        self.out.push_str("}\n");
    }

    fn emit_edge(&mut self, edge: &ContainmentEdge) {
        // dotted connector marks containment through an array
        let connector = match edge.kind {
            EdgeKind::Direct => "--",
            EdgeKind::ThroughArray => "..",
        };
        let from = display_name(&edge.from);
        let to = display_name(&edge.to);
        match &edge.note {
            None => self.out.push_str(&format!("{from} {connector} {to}\n")),
            Some(note) => self.out.push_str(&format!("{from} {connector} {to} : {note}\n")),
        }
    }
}

fn display_name(name: &str) -> String {
    if PLAIN_NAME.is_match(name) {
        name.to_string()
    } else {
        format!("\"{name}\"")
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::FieldDescriptor;
    use crate::walker::walk_into;
    use serde_json::json;

    #[test]
    fn frames_the_stream_and_renders_blocks() {
        let mut uml = PlantUml::new();
        uml.emit_edge(&ContainmentEdge {
            from: "root".into(),
            to: "b".into(),
            kind: EdgeKind::Direct,
            note: None,
        });
        uml.emit_record(&StructuralRecord {
            name: "b".into(),
            instance: 1,
            fields: vec![FieldDescriptor { name: "c".into(), type_label: "string".into() }],
        });
        assert_eq!(
            uml.into_string(),
            "@startuml\nroot -- b\nclass b {\n\t+c : string\n}\n@enduml\n"
        );
    }

    #[test]
    fn through_array_edges_are_dotted_and_carry_the_note() {
        let mut uml = PlantUml::new();
        uml.emit_edge(&ContainmentEdge {
            from: "root".into(),
            to: "d".into(),
            kind: EdgeKind::ThroughArray,
            note: Some("el[0]".into()),
        });
        assert_eq!(uml.into_string(), "@startuml\nroot .. d : el[0]\n@enduml\n");
    }

    #[test]
    fn awkward_names_are_quoted() {
        let mut uml = PlantUml::new();
        uml.emit_record(&StructuralRecord {
            name: "my key-1".into(),
            instance: 0,
            fields: vec![],
        });
        uml.emit_edge(&ContainmentEdge {
            from: "root".into(),
            to: "my key-1".into(),
            kind: EdgeKind::Direct,
            note: None,
        });
        assert_eq!(
            uml.into_string(),
            "@startuml\nclass \"my key-1\" {\n}\nroot -- \"my key-1\"\n@enduml\n"
        );
    }

    #[test]
    fn whole_session_renders_end_to_end() {
        let document = json!({
            "a": 1,
            "b": {"c": "x"},
            "d": [{"e": 2}],
            "f": [[3, 4], [5]]
        });
        let mut uml = PlantUml::new();
        walk_into(&document, &mut uml).unwrap();
        let script = uml.into_string();
        let expected = "\
@startuml
root -- b
class b {
\t+c : string
}
root .. d : el[0]
class d {
\t+e : number
}
class root {
\t+a : number
\t+b : object
\t+d : list<object>
\t+f : list[]<number>
}
@enduml
";
        assert_eq!(script, expected);
    }
}
