//! # Schema Command
//!
//! Command to print companion `<attr>_hash` schema entries.

use anyhow::Result;
use secret_memo::adapter::{memo_schema, MemoAttributeSchema};
use std::collections::BTreeMap;

/// Print schema entries for `attributes` as a JSON object
pub fn schema_command(attributes: &[String]) -> Result<()> {
    let schemas: BTreeMap<String, MemoAttributeSchema> = attributes
        .iter()
        .map(|attribute| memo_schema(attribute))
        .collect();
    println!("{}", serde_json::to_string_pretty(&schemas)?);
    Ok(())
}
