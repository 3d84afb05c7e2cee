//! Declarative spec documents.
//!
//! A [`SpecDocument`] is the serializable form of a [`SwitchSpec`], loaded
//! from YAML or JSON so that a switch set can live next to the tool that uses
//! it.
//!
//! # Example YAML
//!
//! ```yaml
//! name: greet
//! description: Say hello
//! example: greet --name world
//! help: true
//! switches:
//!   - name: name
//!     type: string
//!     description: Who to greet
//!     default: world
//!     aliases: [n]
//!   - name: loud
//!     type: boolean
//!     description: Shout
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpecFileError};
use crate::{SwitchOptions, SwitchSpec, SwitchType, Value};

/// One switch entry of a [`SpecDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchDocument {
    /// Canonical long-form name.
    pub name: String,
    /// Declared type (`boolean`, `count`, `integer`, `float`, `string`).
    #[serde(rename = "type")]
    pub switch_type: SwitchType,
    /// Help description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Value injected when the switch is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Short-form aliases.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Whether absence is an error.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

/// Serializable description of an application's switches.
///
/// # Examples
///
/// ```
/// use commando_core::{parse, SpecDocument, Value};
///
/// let doc = SpecDocument::from_yaml_str(r#"
/// name: greet
/// help: true
/// switches:
///   - name: name
///     type: string
///     default: world
///     aliases: [n]
/// "#).unwrap();
///
/// let spec = doc.into_spec().unwrap();
/// let values = parse(&spec, &["-n", "you"]).into_result().unwrap();
/// assert_eq!(values["name"], Value::from("you"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecDocument {
    /// Application name.
    pub name: String,
    /// Application description for the help header.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Usage example for the help footer.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub example: String,
    /// Append the conventional `--help`/`-h` switch.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub help: bool,
    /// Switches in help order.
    #[serde(default)]
    pub switches: Vec<SwitchDocument>,
}

impl SpecDocument {
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Loads a document, picking the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedFormat`](SpecFileError::UnsupportedFormat) for
    /// unknown extensions, [`IoError`](SpecFileError::IoError) if the file
    /// cannot be read, and a parse error if the content is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)?;
        let reader = BufReader::new(std::fs::File::open(path)?);
        let doc = match format {
            DocumentFormat::Yaml => serde_yaml::from_reader(reader)?,
            DocumentFormat::Json => serde_json::from_reader(reader)?,
        };
        Ok(doc)
    }

    /// Saves the document, picking the format from the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)?;
        let writer = BufWriter::new(std::fs::File::create(path)?);
        match format {
            DocumentFormat::Yaml => serde_yaml::to_writer(writer, self)?,
            DocumentFormat::Json => serde_json::to_writer_pretty(writer, self)?,
        }
        Ok(())
    }

    /// Builds the [`SwitchSpec`] this document describes.
    ///
    /// Defaults are re-typed to their switch type where lossless, so
    /// `default: 2` on a `count` switch becomes a count.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDefault`](SpecFileError::InvalidDefault) when a
    /// default cannot be represented as its switch's type.
    pub fn into_spec(self) -> Result<SwitchSpec> {
        let mut spec = SwitchSpec::create(&self.name, &self.description, &self.example);

        for switch in self.switches {
            let mut options = SwitchOptions::new();
            if let Some(default) = switch.default {
                let conformed = default.conform(switch.switch_type).ok_or_else(|| {
                    SpecFileError::InvalidDefault {
                        name: switch.name.clone(),
                        expected: switch.switch_type,
                    }
                })?;
                options = options.default_value(conformed);
            }
            options.aliases = switch.aliases;
            options.required = switch.required;
            spec = spec.add_switch(
                &switch.name,
                switch.switch_type,
                &switch.description,
                options,
            );
        }

        if self.help {
            spec = spec.add_help_switch();
        }
        Ok(spec)
    }
}

impl From<&SwitchSpec> for SpecDocument {
    /// Captures every registered switch; table entries for unregistered names
    /// have no document form and are dropped.
    fn from(spec: &SwitchSpec) -> Self {
        Self {
            name: spec.name().to_string(),
            description: spec.description().to_string(),
            example: spec.example().to_string(),
            help: false,
            switches: spec
                .switches()
                .map(|switch| SwitchDocument {
                    name: switch.name.to_string(),
                    switch_type: switch.switch_type,
                    description: switch.description.to_string(),
                    default: switch.default.cloned(),
                    aliases: switch.aliases.iter().map(|a| a.to_string()).collect(),
                    required: switch.required,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(SpecFileError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}
