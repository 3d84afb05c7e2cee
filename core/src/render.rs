//! Help and error message rendering.

use thiserror::Error;

use crate::SwitchSpec;

/// Parse failures surfaced through [`ParseOutcome::Error`](crate::ParseOutcome::Error).
///
/// The `Display` impl is the exact user-facing message.
///
/// # Examples
///
/// ```
/// use commando_core::ParseError;
///
/// let err = ParseError::MissingRequired(vec!["path".into(), "mode".into()]);
/// assert_eq!(err.to_string(), "Missing required options: --path, --mode");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Tokens that matched no switch or failed coercion.
    #[error("Unknown options: {}", .0.join(" "))]
    UnknownOptions(Vec<String>),
    /// Required switches absent after default injection.
    #[error("Missing required options: {}", format_flag_list(.0))]
    MissingRequired(Vec<String>),
}

fn format_flag_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("--{name}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders the help text for `spec`.
///
/// The header is `"<name> - <description>"`, or just the name when the
/// description is empty. The example block is omitted when no example is set.
///
/// # Examples
///
/// ```
/// use commando_core::{render_help, SwitchOptions, SwitchSpec, SwitchType};
///
/// let spec = SwitchSpec::create("greet", "Say hello", "greet --name world")
///     .add_switch("name", SwitchType::String, "Who to greet",
///         SwitchOptions::new().alias("n").default_value("world"))
///     .add_help_switch();
///
/// assert_eq!(
///     render_help(&spec),
///     "greet - Say hello\n\
///      \n\
///      Arguments:\n\
///      \x20 --name, -n : Who to greet (Default: \"world\")\n\
///      \x20 --help, -h : Print help message\n\
///      \n\
///      Example: greet --name world"
/// );
/// ```
pub fn render_help(spec: &SwitchSpec) -> String {
    let mut lines = Vec::new();

    if spec.description().is_empty() {
        lines.push(spec.name().to_string());
    } else {
        lines.push(format!("{} - {}", spec.name(), spec.description()));
    }
    lines.push(String::new());
    lines.push("Arguments:".to_string());

    for switch in spec.switches() {
        let mut line = format!("  --{}", switch.name);
        for alias in &switch.aliases {
            line.push_str(", -");
            line.push_str(alias);
        }
        line.push_str(" : ");
        if switch.required {
            line.push_str("(Required) ");
        }
        line.push_str(switch.description);
        if let Some(default) = switch.default {
            line.push_str(&format!(" (Default: {})", default.literal()));
        }
        lines.push(line);
    }

    if !spec.example().is_empty() {
        lines.push(String::new());
        lines.push(format!("Example: {}", spec.example()));
    }

    lines.join("\n")
}

/// Renders the message for unrecognized or malformed tokens.
pub fn render_invalid_options(tokens: &[String]) -> String {
    ParseError::UnknownOptions(tokens.to_vec()).to_string()
}

/// Renders the message for missing required switches.
pub fn render_missing_options(names: &[String]) -> String {
    ParseError::MissingRequired(names.to_vec()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SwitchOptions, SwitchType};

    #[test]
    fn test_help_omits_empty_description_and_example() {
        let spec = SwitchSpec::new("tool").add_switch(
            "path",
            SwitchType::String,
            "Input path",
            SwitchOptions::new().required(),
        );

        assert_eq!(
            render_help(&spec),
            "tool\n\nArguments:\n  --path : (Required) Input path"
        );
    }

    #[test]
    fn test_help_lists_all_aliases_and_numeric_default() {
        let spec = SwitchSpec::new("tool")
            .add_switch("level", SwitchType::Integer, "Level", SwitchOptions::new().alias("l"))
            .add_switch(
                "level",
                SwitchType::Integer,
                "Level",
                SwitchOptions::new().alias("L").default_value(2_i64),
            );

        assert_eq!(
            render_help(&spec),
            "tool\n\nArguments:\n  --level, -l, -L : Level (Default: 2)"
        );
    }

    #[test]
    fn test_help_renders_nan_default() {
        let spec = SwitchSpec::new("tool")
            .add_switch("ratio", SwitchType::Float, "Ratio", SwitchOptions::new())
            .with_default("ratio", f64::NAN);

        assert_eq!(
            render_help(&spec),
            "tool\n\nArguments:\n  --ratio : Ratio (Default: NaN)"
        );
    }

    #[test]
    fn test_help_without_switches() {
        let spec = SwitchSpec::create("tool", "Does things", "tool");
        assert_eq!(
            render_help(&spec),
            "tool - Does things\n\nArguments:\n\nExample: tool"
        );
    }

    #[test]
    fn test_help_is_deterministic() {
        let spec = SwitchSpec::create("tool", "d", "e")
            .add_switch("b", SwitchType::Boolean, "B", SwitchOptions::new())
            .add_switch("a", SwitchType::String, "A", SwitchOptions::new().default_value("x"));
        assert_eq!(render_help(&spec), render_help(&spec.clone()));
    }

    #[test]
    fn test_invalid_options_message() {
        let tokens = vec!["--path".to_string(), "-x".to_string()];
        assert_eq!(render_invalid_options(&tokens), "Unknown options: --path -x");
    }

    #[test]
    fn test_missing_options_message() {
        assert_eq!(
            render_missing_options(&["path".to_string()]),
            "Missing required options: --path"
        );
    }
}
