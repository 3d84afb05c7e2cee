//! Parse-result reconciliation.
//!
//! Turns a [`RawParse`] into a final [`ParseOutcome`]. Precedence is fixed:
//! a help request beats unknown tokens, unknown tokens beat missing required
//! switches, and only a clean parse yields values.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::render::{ParseError, render_help};
use crate::spec::HELP_SWITCH;
use crate::tokenizer::{RawParse, StrictTokenizer, Tokenizer};
use crate::{SwitchSpec, Value};

/// Resolved switch values keyed by canonical name.
pub type Values = IndexMap<String, Value>;

/// Final result of parsing a command line.
///
/// Serializes internally tagged, e.g. `{"outcome":"error","message":"..."}`.
/// Serialize-only: untagged [`Value`] scalars cannot tell a count from an
/// integer when read back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ParseOutcome {
    /// Help was requested; `message` is the rendered help text.
    Help { message: String },
    /// Parsing succeeded; `values` includes injected defaults.
    Ok { values: Values },
    /// Parsing failed; `message` describes why.
    Error { message: String },
}

/// Non-success outcomes, for callers that prefer `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseExit {
    /// Help text to print before exiting successfully.
    Help(String),
    /// Error message to print before exiting with a failure status.
    Error(String),
}

impl ParseExit {
    /// Conventional process exit status: `0` for help, `2` for usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Help(_) => 0,
            Self::Error(_) => 2,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Help(message) | Self::Error(message) => message,
        }
    }
}

impl ParseOutcome {
    pub fn is_help(&self) -> bool {
        matches!(self, Self::Help { .. })
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Returns the resolved values of an `Ok` outcome.
    pub fn values(&self) -> Option<&Values> {
        match self {
            Self::Ok { values } => Some(values),
            _ => None,
        }
    }

    /// Returns the help or error text.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Help { message } | Self::Error { message } => Some(message),
            Self::Ok { .. } => None,
        }
    }

    /// Converts into a `Result`, keeping values on success.
    ///
    /// # Examples
    ///
    /// ```
    /// use commando_core::{parse, ParseExit, SwitchSpec};
    ///
    /// let spec = SwitchSpec::new("tool").add_help_switch();
    /// let exit = parse(&spec, &["-h"]).into_result().unwrap_err();
    /// assert!(matches!(exit, ParseExit::Help(_)));
    /// assert_eq!(exit.exit_code(), 0);
    /// ```
    pub fn into_result(self) -> Result<Values, ParseExit> {
        match self {
            Self::Ok { values } => Ok(values),
            Self::Help { message } => Err(ParseExit::Help(message)),
            Self::Error { message } => Err(ParseExit::Error(message)),
        }
    }
}

/// Reconciles a tokenizer result with `spec`.
///
/// Required names that were never registered as switches are still reported
/// as missing.
///
/// # Examples
///
/// ```
/// use commando_core::{reconcile, ParseOutcome, RawParse, SwitchOptions, SwitchSpec, SwitchType};
///
/// let spec = SwitchSpec::new("tool")
///     .add_switch("path", SwitchType::String, "", SwitchOptions::new().required());
///
/// let outcome = reconcile(&spec, RawParse::default());
/// assert_eq!(
///     outcome,
///     ParseOutcome::Error { message: "Missing required options: --path".into() }
/// );
/// ```
pub fn reconcile(spec: &SwitchSpec, raw: RawParse) -> ParseOutcome {
    let RawParse {
        mut values,
        invalid,
    } = raw;

    let missing: Vec<String> = spec
        .required()
        .iter()
        .filter(|name| !values.contains_key(name.as_str()))
        .cloned()
        .collect();

    if values.get(HELP_SWITCH) == Some(&Value::Bool(true)) {
        debug!(app = spec.name(), "help requested");
        return ParseOutcome::Help {
            message: render_help(spec),
        };
    }

    if !invalid.is_empty() {
        debug!(count = invalid.len(), "unknown options");
        return ParseOutcome::Error {
            message: ParseError::UnknownOptions(invalid).to_string(),
        };
    }

    if !missing.is_empty() {
        debug!(count = missing.len(), "missing required options");
        return ParseOutcome::Error {
            message: ParseError::MissingRequired(missing).to_string(),
        };
    }

    for (name, default) in spec.defaults() {
        values
            .entry(name.clone())
            .or_insert_with(|| default.clone());
    }

    ParseOutcome::Ok { values }
}

/// Parses `args` (without the program name) against `spec`.
///
/// # Examples
///
/// ```
/// use commando_core::{parse, SwitchOptions, SwitchSpec, SwitchType, Value};
///
/// let spec = SwitchSpec::new("tool")
///     .add_switch("path", SwitchType::String, "Input", SwitchOptions::new())
///     .add_switch("mode", SwitchType::String, "Mode", SwitchOptions::new().default_value("fast"));
///
/// let values = parse(&spec, &["--path", "abc"]).into_result().unwrap();
/// assert_eq!(values["path"], Value::from("abc"));
/// assert_eq!(values["mode"], Value::from("fast"));
/// ```
pub fn parse<S: AsRef<str>>(spec: &SwitchSpec, args: &[S]) -> ParseOutcome {
    parse_with(spec, args, &StrictTokenizer)
}

/// Parses `args` with a caller-supplied tokenizer.
pub fn parse_with<S: AsRef<str>, T: Tokenizer + ?Sized>(
    spec: &SwitchSpec,
    args: &[S],
    tokenizer: &T,
) -> ParseOutcome {
    let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
    let raw = tokenizer.tokenize(spec.types(), spec.aliases(), &args);
    debug!(
        recognized = raw.values.len(),
        invalid = raw.invalid.len(),
        "tokenized arguments"
    );
    reconcile(spec, raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SwitchOptions, SwitchType};

    fn raw(values: &[(&str, Value)], invalid: &[&str]) -> RawParse {
        RawParse {
            values: values
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            invalid: invalid.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn required_path_spec() -> SwitchSpec {
        SwitchSpec::new("tool")
            .add_switch("path", SwitchType::String, "Path", SwitchOptions::new().required())
            .add_help_switch()
    }

    #[test]
    fn test_help_beats_invalid_and_missing() {
        let spec = required_path_spec();
        let outcome = reconcile(&spec, raw(&[("help", Value::Bool(true))], &["--bogus"]));
        assert_eq!(
            outcome,
            ParseOutcome::Help {
                message: render_help(&spec)
            }
        );
    }

    #[test]
    fn test_help_false_does_not_short_circuit() {
        let spec = required_path_spec();
        let outcome = reconcile(&spec, raw(&[("help", Value::Bool(false))], &[]));
        assert_eq!(
            outcome.message(),
            Some("Missing required options: --path")
        );
    }

    #[test]
    fn test_invalid_beats_missing() {
        let spec = required_path_spec();
        let outcome = reconcile(&spec, raw(&[], &["--bogus", "-z"]));
        assert_eq!(
            outcome,
            ParseOutcome::Error {
                message: "Unknown options: --bogus -z".to_string()
            }
        );
    }

    #[test]
    fn test_missing_in_registration_order() {
        let spec = SwitchSpec::new("tool")
            .add_switch("b", SwitchType::String, "", SwitchOptions::new().required())
            .add_switch("a", SwitchType::String, "", SwitchOptions::new().required())
            .add_switch("c", SwitchType::String, "", SwitchOptions::new().required());
        let outcome = reconcile(&spec, raw(&[("a", Value::from("x"))], &[]));
        assert_eq!(
            outcome.message(),
            Some("Missing required options: --b, --c")
        );
    }

    #[test]
    fn test_defaults_do_not_override() {
        let spec = SwitchSpec::new("tool")
            .add_switch("mode", SwitchType::String, "", SwitchOptions::new().default_value("slow"))
            .add_switch("level", SwitchType::Integer, "", SwitchOptions::new().default_value(1_i64));
        let outcome = reconcile(&spec, raw(&[("mode", Value::from("fast"))], &[]));
        let values = outcome.values().unwrap();
        assert_eq!(values["mode"], Value::from("fast"));
        assert_eq!(values["level"], Value::Integer(1));
    }

    #[test]
    fn test_default_does_not_satisfy_required() {
        // Missing-required detection runs against the tokenized values only.
        let spec = SwitchSpec::new("tool").add_switch(
            "path",
            SwitchType::String,
            "",
            SwitchOptions::new().required().default_value("."),
        );
        assert!(reconcile(&spec, RawParse::default()).is_error());
    }

    #[test]
    fn test_unregistered_required_name_reports_missing() {
        let spec = SwitchSpec::new("tool").mark_required("ghost");
        assert_eq!(
            reconcile(&spec, RawParse::default()).message(),
            Some("Missing required options: --ghost")
        );
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let json = serde_json::to_string(&ParseOutcome::Error {
            message: "x".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"outcome":"error","message":"x"}"#);
    }

    #[test]
    fn test_ok_outcome_serializes_counts_as_numbers() {
        let mut values = Values::new();
        values.insert("n".to_string(), Value::Count(2));
        let json = serde_json::to_string(&ParseOutcome::Ok { values }).unwrap();
        assert_eq!(json, r#"{"outcome":"ok","values":{"n":2}}"#);
    }

    #[test]
    fn test_parse_with_custom_tokenizer() {
        struct Fixed;
        impl Tokenizer for Fixed {
            fn tokenize(
                &self,
                _types: &IndexMap<String, SwitchType>,
                _aliases: &IndexMap<String, String>,
                _args: &[String],
            ) -> RawParse {
                let mut raw = RawParse::default();
                raw.values.insert("path".to_string(), Value::from("fixed"));
                raw
            }
        }

        let spec = required_path_spec();
        let values = parse_with(&spec, &["ignored"], &Fixed).into_result().unwrap();
        assert_eq!(values["path"], Value::from("fixed"));
    }
}
