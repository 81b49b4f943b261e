//! Minimal CLI: read JSON → walk the structure → PlantUML script.
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use colored::Colorize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::uml::PlantUml;
use crate::walker::{self, Walker};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// render the structure of an arbitrary JSON file as a PlantUML class diagram
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// JSON file to analyse
    #[arg(long, short)]
    input: PathBuf,

    /// output file with the UML definition
    #[arg(long, short)]
    out: PathBuf,

    /// JSON Pointer to select a subnode to diagram (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// recursion depth limit
    #[arg(long, default_value_t = walker::DEFAULT_DEPTH_LIMIT)]
    max_depth: usize,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        let source = std::fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read source file {}", self.input.display()))?;
        let document: Value = from_str_with_path(&source)
            .with_context(|| format!("failed to parse JSON source file {}", self.input.display()))?;

        let target = match self.json_pointer.as_deref() {
            None => &document,
            Some(pointer) => document.pointer(pointer).ok_or_else(|| {
                anyhow!("JSON pointer `{pointer}` matches nothing in {}", self.input.display())
            })?,
        };

        // Buffer the whole script; only write the file once the walk succeeded.
        let mut uml = PlantUml::new();
        Walker::with_depth_limit(&mut uml, self.max_depth)
            .walk(target)
            .with_context(|| format!("failed to analyse {}", self.input.display()))?;
        let script = uml.into_string();

        if let Some(parent) = self.out.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        std::fs::write(&self.out, &script)
            .with_context(|| format!("failed to write {}", self.out.display()))?;

        let render_cmd = format!("java -jar plantuml.jar {}", self.out.display());
        println!("Call `{}` to get the UML plot", render_cmd.bold());
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Deserialize with JSON-path context in error messages.
fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        anyhow!("at JSON path {path}: {}", err.into_inner())
    })
}
