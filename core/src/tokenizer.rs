//! Raw argument tokenization.
//!
//! The reconciler only depends on the [`Tokenizer`] contract: a type table
//! and an alias table go in together with the raw tokens, and a
//! [`RawParse`] comes out. [`StrictTokenizer`] is the implementation used by
//! [`parse`](crate::parse).

use indexmap::IndexMap;
use tracing::trace;

use crate::spec::resolve_name;
use crate::{SwitchType, Value};

/// Output of a [`Tokenizer`] run.
///
/// Knows nothing about required switches or defaults; that is the
/// reconciler's job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawParse {
    /// Recognized switch name to coerced value, in first-seen order.
    pub values: IndexMap<String, Value>,
    /// Tokens that were not recognized or failed coercion, in input order.
    pub invalid: Vec<String>,
}

/// Converts raw argument tokens into typed values.
pub trait Tokenizer {
    /// Tokenizes `args` against the given switch and alias tables.
    fn tokenize(
        &self,
        types: &IndexMap<String, SwitchType>,
        aliases: &IndexMap<String, String>,
        args: &[String],
    ) -> RawParse;
}

/// Strict `--long` / `-s` tokenizer.
///
/// Every token must belong to a declared switch. Unknown flags, missing or
/// badly typed values, stray words, and anything after a bare `--` are
/// reported in [`RawParse::invalid`] using their literal flag text.
///
/// # Examples
///
/// ```
/// use commando_core::{StrictTokenizer, SwitchOptions, SwitchSpec, SwitchType, Tokenizer, Value};
///
/// let spec = SwitchSpec::new("tool")
///     .add_switch("foo", SwitchType::Count, "", SwitchOptions::new().alias("f"));
/// let args: Vec<String> = ["--foo", "-ff", "--bar"].iter().map(|s| s.to_string()).collect();
///
/// let raw = StrictTokenizer.tokenize(spec.types(), spec.aliases(), &args);
/// assert_eq!(raw.values.get("foo"), Some(&Value::Count(3)));
/// assert_eq!(raw.invalid, vec!["--bar"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictTokenizer;

impl Tokenizer for StrictTokenizer {
    fn tokenize(
        &self,
        types: &IndexMap<String, SwitchType>,
        aliases: &IndexMap<String, String>,
        args: &[String],
    ) -> RawParse {
        let mut run = Run {
            types,
            aliases,
            args,
            pos: 0,
            out: RawParse::default(),
        };

        while let Some(token) = run.next_token() {
            trace!(token, "tokenizing");
            if token == "--" {
                run.out.invalid.extend(args[run.pos..].iter().cloned());
                break;
            }
            if let Some(long) = token.strip_prefix("--") {
                run.long_flag(long);
            } else if let Some(cluster) = token.strip_prefix('-').filter(|c| !c.is_empty()) {
                run.short_cluster(cluster);
            } else {
                run.out.invalid.push(token.to_string());
            }
        }

        run.out
    }
}

struct Run<'a> {
    types: &'a IndexMap<String, SwitchType>,
    aliases: &'a IndexMap<String, String>,
    args: &'a [String],
    pos: usize,
    out: RawParse,
}

impl<'a> Run<'a> {
    fn next_token(&mut self) -> Option<&'a str> {
        let token = self.args.get(self.pos)?;
        self.pos += 1;
        Some(token.as_str())
    }

    fn lookup(&self, flag: &str) -> Option<(&'a str, SwitchType)> {
        let name = resolve_name(self.types, self.aliases, flag)?;
        let switch_type = *self.types.get(name)?;
        Some((name, switch_type))
    }

    /// Consumes the next token as a value for `switch_type` if it fits.
    fn take_value(&mut self, switch_type: SwitchType) -> Option<&'a str> {
        let next = self.args.get(self.pos)?;
        if looks_like_flag(next) && !(is_numeric(switch_type) && next.parse::<f64>().is_ok()) {
            return None;
        }
        self.pos += 1;
        Some(next.as_str())
    }

    fn long_flag(&mut self, body: &str) {
        let (flag, inline) = match body.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (body, None),
        };
        let literal = format!("--{flag}");

        let Some((name, switch_type)) = self.lookup(flag) else {
            if let Some(negated) = flag.strip_prefix("no-")
                && inline.is_none()
                && let Some((name, SwitchType::Boolean)) = self.lookup(negated)
            {
                self.set(name, Value::Bool(false));
                return;
            }
            trace!(flag = %literal, "unknown long flag");
            // Swallow a would-be value so it is not reported a second time.
            if inline.is_none() {
                let _ = self.take_value(SwitchType::String);
            }
            self.out.invalid.push(literal);
            return;
        };

        self.apply(name, switch_type, inline, literal);
    }

    fn short_cluster(&mut self, cluster: &str) {
        for (idx, ch) in cluster.char_indices() {
            let flag = ch.to_string();
            let literal = format!("-{ch}");
            let Some((name, switch_type)) = self.lookup(&flag) else {
                trace!(flag = %literal, "unknown short flag");
                if idx + ch.len_utf8() == cluster.len() {
                    let _ = self.take_value(SwitchType::String);
                }
                self.out.invalid.push(literal);
                continue;
            };

            if switch_type.takes_value() {
                let rest = &cluster[idx + ch.len_utf8()..];
                let rest = rest.strip_prefix('=').unwrap_or(rest);
                let inline = (!rest.is_empty()).then_some(rest);
                self.apply(name, switch_type, inline, literal);
                return;
            }

            self.apply(name, switch_type, None, literal);
        }
    }

    fn apply(&mut self, name: &str, switch_type: SwitchType, inline: Option<&str>, literal: String) {
        match switch_type {
            SwitchType::Boolean => match inline {
                None => self.set(name, Value::Bool(true)),
                Some(raw) => match switch_type.coerce(raw) {
                    Some(value) => self.set(name, value),
                    None => self.out.invalid.push(literal),
                },
            },
            SwitchType::Count => match inline {
                None => {
                    let current = self
                        .out
                        .values
                        .get(name)
                        .and_then(Value::as_count)
                        .unwrap_or(0);
                    self.set(name, Value::Count(current.saturating_add(1)));
                }
                Some(raw) => match switch_type.coerce(raw) {
                    Some(value) => self.set(name, value),
                    None => self.out.invalid.push(literal),
                },
            },
            SwitchType::Integer | SwitchType::Float | SwitchType::String => {
                let raw = match inline {
                    Some(raw) => Some(raw),
                    None => self.take_value(switch_type),
                };
                match raw.and_then(|raw| switch_type.coerce(raw)) {
                    Some(value) => self.set(name, value),
                    None => {
                        trace!(flag = %literal, "missing or invalid value");
                        self.out.invalid.push(literal);
                    }
                }
            }
        }
    }

    fn set(&mut self, name: &str, value: Value) {
        self.out.values.insert(name.to_string(), value);
    }
}

fn looks_like_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

fn is_numeric(switch_type: SwitchType) -> bool {
    matches!(switch_type, SwitchType::Integer | SwitchType::Float)
}
