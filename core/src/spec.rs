//! Switch specification builder.
//!
//! A [`SwitchSpec`] is an insertion-ordered description of the switches an
//! application accepts. Builder methods consume the spec and return the
//! updated value, so a finished spec carries no shared mutable state and can
//! be handed to any number of [`parse`](crate::parse) calls.

use indexmap::IndexMap;

use crate::{Switch, SwitchType, Value};

/// Name of the switch registered by [`SwitchSpec::add_help_switch`].
pub const HELP_SWITCH: &str = "help";

/// Optional settings for [`SwitchSpec::add_switch`].
///
/// # Examples
///
/// ```
/// use commando_core::{SwitchOptions, Value};
///
/// let opts = SwitchOptions::new().default_value("out.txt").alias("o").required();
/// assert_eq!(opts.default, Some(Value::from("out.txt")));
/// assert_eq!(opts.aliases, vec!["o".to_string()]);
/// assert!(opts.required);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwitchOptions {
    /// Value injected into the result when the switch is absent.
    pub default: Option<Value>,
    /// Short-form aliases resolving to this switch.
    pub aliases: Vec<String>,
    /// Whether the switch must be present after default injection.
    pub required: bool,
}

impl SwitchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default value.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Adds an alias.
    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Marks the switch as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Immutable description of an application's accepted switches.
///
/// Holds the application metadata plus four independently keyed tables
/// (types, defaults, descriptions, aliases) and the ordered list of required
/// switch names. Re-registering a key updates its value in place and keeps its
/// original position, so help output order is the order of first
/// registration.
///
/// # Examples
///
/// ```
/// use commando_core::{SwitchOptions, SwitchSpec, SwitchType};
///
/// let spec = SwitchSpec::new("copy")
///     .with_description("Copy things")
///     .with_example("copy --src a --dst b")
///     .add_switch("src", SwitchType::String, "Source path", SwitchOptions::new().required())
///     .add_switch("dst", SwitchType::String, "Destination", SwitchOptions::new().alias("d"))
///     .add_help_switch();
///
/// assert_eq!(spec.types().len(), 3);
/// assert_eq!(spec.required(), ["src".to_string()]);
/// assert_eq!(spec.resolve("d"), Some("dst"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwitchSpec {
    name: String,
    description: String,
    example: String,
    types: IndexMap<String, SwitchType>,
    defaults: IndexMap<String, Value>,
    descriptions: IndexMap<String, String>,
    aliases: IndexMap<String, String>,
    required: Vec<String>,
}

impl SwitchSpec {
    /// Creates an empty spec for the application `name`.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Creates an empty spec with all metadata supplied at once.
    pub fn create(name: &str, description: &str, example: &str) -> Self {
        Self::new(name)
            .with_description(description)
            .with_example(example)
    }

    /// Sets the application description shown in the help header.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Sets the usage example shown at the end of the help text.
    pub fn with_example(mut self, example: &str) -> Self {
        self.example = example.to_string();
        self
    }

    /// Registers a switch.
    ///
    /// Type and description are replaced when `name` was already registered.
    /// Options accumulate: a default replaces an older default, aliases are
    /// added next to existing ones, and `required` is only ever switched on.
    ///
    /// # Examples
    ///
    /// ```
    /// use commando_core::{SwitchOptions, SwitchSpec, SwitchType, Value};
    ///
    /// let spec = SwitchSpec::new("tool")
    ///     .add_switch("level", SwitchType::Integer, "Level", SwitchOptions::new().required())
    ///     .add_switch("level", SwitchType::Integer, "Level", SwitchOptions::new().default_value(3_i64));
    ///
    /// assert_eq!(spec.types().len(), 1);
    /// assert_eq!(spec.defaults().get("level"), Some(&Value::Integer(3)));
    /// assert_eq!(spec.required(), ["level".to_string()]);
    /// ```
    pub fn add_switch(
        mut self,
        name: &str,
        switch_type: SwitchType,
        description: &str,
        options: SwitchOptions,
    ) -> Self {
        self.types.insert(name.to_string(), switch_type);
        self.descriptions
            .insert(name.to_string(), description.to_string());

        if let Some(default) = options.default {
            self.defaults.insert(name.to_string(), default);
        }
        for alias in options.aliases {
            self.aliases.insert(alias, name.to_string());
        }
        if options.required {
            self = self.mark_required(name);
        }

        self
    }

    /// Records a default for `name` without touching its other tables.
    pub fn with_default(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.defaults.insert(name.to_string(), value.into());
        self
    }

    /// Records a help description for `name` without touching its other tables.
    pub fn with_switch_description(mut self, name: &str, description: &str) -> Self {
        self.descriptions
            .insert(name.to_string(), description.to_string());
        self
    }

    /// Points `alias` at `name`, replacing any previous target.
    pub fn with_alias(mut self, alias: &str, name: &str) -> Self {
        self.aliases.insert(alias.to_string(), name.to_string());
        self
    }

    /// Marks `name` as required without touching its other tables.
    ///
    /// The name is not checked against registered switches; see
    /// [`validate_spec`](crate::validate_spec).
    pub fn mark_required(mut self, name: &str) -> Self {
        if !self.is_required(name) {
            self.required.push(name.to_string());
        }
        self
    }

    /// Registers the conventional boolean `help` switch with alias `h`.
    pub fn add_help_switch(self) -> Self {
        self.add_switch(
            HELP_SWITCH,
            SwitchType::Boolean,
            "Print help message",
            SwitchOptions::new().alias("h"),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn example(&self) -> &str {
        &self.example
    }

    /// Switch name to declared type, in registration order.
    pub fn types(&self) -> &IndexMap<String, SwitchType> {
        &self.types
    }

    /// Switch name to default value.
    pub fn defaults(&self) -> &IndexMap<String, Value> {
        &self.defaults
    }

    /// Switch name to help description.
    pub fn descriptions(&self) -> &IndexMap<String, String> {
        &self.descriptions
    }

    /// Alias to canonical switch name.
    pub fn aliases(&self) -> &IndexMap<String, String> {
        &self.aliases
    }

    /// Required switch names in the order they were marked required.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Aliases that resolve to `name`, in alias registration order.
    pub fn aliases_for(&self, name: &str) -> Vec<&str> {
        self.aliases
            .iter()
            .filter(|(_, target)| target.as_str() == name)
            .map(|(alias, _)| alias.as_str())
            .collect()
    }

    /// Resolves a flag name (without dashes) to a canonical switch name.
    ///
    /// A registered switch name wins over an alias of the same spelling.
    pub fn resolve(&self, flag: &str) -> Option<&str> {
        resolve_name(&self.types, &self.aliases, flag)
    }

    /// Returns the view of a registered switch.
    pub fn switch(&self, name: &str) -> Option<Switch<'_>> {
        let (name, switch_type) = self.types.get_key_value(name)?;
        Some(self.view(name, *switch_type))
    }

    /// Iterates over registered switches in registration order.
    pub fn switches(&self) -> impl Iterator<Item = Switch<'_>> + '_ {
        self.types
            .iter()
            .map(|(name, switch_type)| self.view(name, *switch_type))
    }

    fn view<'a>(&'a self, name: &'a str, switch_type: SwitchType) -> Switch<'a> {
        Switch {
            name,
            switch_type,
            description: self
                .descriptions
                .get(name)
                .map(String::as_str)
                .unwrap_or_default(),
            default: self.defaults.get(name),
            aliases: self.aliases_for(name),
            required: self.is_required(name),
        }
    }
}

/// Resolves `flag` against a type table first, then an alias table.
pub(crate) fn resolve_name<'a>(
    types: &'a IndexMap<String, SwitchType>,
    aliases: &'a IndexMap<String, String>,
    flag: &str,
) -> Option<&'a str> {
    if let Some((name, _)) = types.get_key_value(flag) {
        return Some(name.as_str());
    }
    aliases.get(flag).map(String::as_str)
}
