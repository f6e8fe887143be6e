//! Parsing of rule configuration strings.
//!
//! A rule configuration is a list of `name:value` entries separated by `;`
//! or newlines. Rules describe the names they accept with [`NamedParam`]s,
//! each holding a setter that parses and stores one value:
//!
//! ```
//! use hdlint_core::params::{parse_name_values, set_bool, set_int_range, NamedParam};
//!
//! let mut length = 100;
//! let mut strict = false;
//! parse_name_values(
//!     "length:80;strict:on",
//!     &mut [
//!         NamedParam::new("length", set_int_range(&mut length, 40, 1000)),
//!         NamedParam::new("strict", set_bool(&mut strict)),
//!     ],
//! )
//! .unwrap();
//! assert_eq!((length, strict), (80, true));
//! ```

use crate::config::ConfigError;
use regex::Regex;

/// Parses and stores one parameter value, or returns why it was rejected.
pub type ParamSetter<'a> = Box<dyn FnMut(&str) -> Result<(), String> + 'a>;

/// A parameter accepted by a rule.
pub struct NamedParam<'a> {
    name: &'static str,
    setter: Option<ParamSetter<'a>>,
}

impl<'a> NamedParam<'a> {
    /// A parameter stored by `setter`.
    pub fn new(name: &'static str, setter: impl FnMut(&str) -> Result<(), String> + 'a) -> Self {
        Self {
            name,
            setter: Some(Box::new(setter)),
        }
    }

    /// A parameter that is accepted but has no effect.
    #[must_use]
    pub fn ignored(name: &'static str) -> Self {
        Self { name, setter: None }
    }

    /// The parameter name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Applies `config` to `params`.
///
/// Entries are processed in order, so values before a bad entry are
/// already stored when an error is returned.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidParameter`] naming the first unknown key or
/// rejected value.
pub fn parse_name_values(config: &str, params: &mut [NamedParam<'_>]) -> Result<(), ConfigError> {
    for entry in config.split([';', '\n']).filter(|entry| !entry.is_empty()) {
        let (key, value) = entry.split_once(':').unwrap_or((entry, ""));
        let Some(index) = params.iter().position(|param| param.name == key) else {
            return Err(ConfigError::InvalidParameter(unknown_parameter(key, params)));
        };
        if let Some(setter) = params[index].setter.as_mut() {
            setter(value)
                .map_err(|message| ConfigError::InvalidParameter(format!("{key}: {message}")))?;
        }
    }
    Ok(())
}

fn unknown_parameter(key: &str, params: &[NamedParam<'_>]) -> String {
    let available = params
        .iter()
        .map(|param| format!("'{}'", param.name))
        .collect::<Vec<_>>()
        .join(", ");
    let supported = if params.len() > 1 {
        "parameters are"
    } else {
        "parameter is"
    };
    format!("{key}: unknown parameter; supported {supported} {available}")
}

/// Stores any `i32`.
pub fn set_int(target: &mut i32) -> impl FnMut(&str) -> Result<(), String> + '_ {
    set_int_range(target, i32::MIN, i32::MAX)
}

/// Stores an `i32` within `[minimum, maximum]`.
pub fn set_int_range(
    target: &mut i32,
    minimum: i32,
    maximum: i32,
) -> impl FnMut(&str) -> Result<(), String> + '_ {
    move |value: &str| {
        let parsed: i32 = value
            .parse()
            .map_err(|_| format!("'{value}': Cannot parse integer"))?;
        if parsed < minimum || parsed > maximum {
            return Err(format!("{parsed} out of range [{minimum}...{maximum}]"));
        }
        *target = parsed;
        Ok(())
    }
}

/// Stores a boolean. An empty value means true.
pub fn set_bool(target: &mut bool) -> impl FnMut(&str) -> Result<(), String> + '_ {
    move |value: &str| {
        if value.is_empty()
            || value == "1"
            || value.eq_ignore_ascii_case("true")
            || value.eq_ignore_ascii_case("on")
        {
            *target = true;
            Ok(())
        } else if value == "0"
            || value.eq_ignore_ascii_case("false")
            || value.eq_ignore_ascii_case("off")
        {
            *target = false;
            Ok(())
        } else {
            Err("Boolean value should be one of 'true', 'on' or 'false', 'off'".to_string())
        }
    }
}

/// Stores the value verbatim.
pub fn set_string(target: &mut String) -> impl FnMut(&str) -> Result<(), String> + '_ {
    move |value: &str| {
        value.clone_into(target);
        Ok(())
    }
}

/// Stores the value if it is one of `allowed`.
pub fn set_string_one_of<'a>(
    target: &'a mut String,
    allowed: &'a [&'a str],
) -> impl FnMut(&str) -> Result<(), String> + 'a {
    move |value: &str| {
        if !allowed.contains(&value) {
            return Err(match allowed {
                [only] => format!("Value can only be '{only}'; got '{value}'"),
                _ => format!(
                    "Value can only be one of ['{}']; got '{value}'",
                    allowed.join("', '")
                ),
            });
        }
        value.clone_into(target);
        Ok(())
    }
}

/// Stores a `|`-separated set of `choices` as a bitmap, bit `i` for
/// `choices[i]`. Names are matched case-insensitively.
///
/// # Panics
///
/// Panics if there are more than 32 choices.
pub fn set_named_bits<'a>(
    target: &'a mut u32,
    choices: &'a [&'a str],
) -> impl FnMut(&str) -> Result<(), String> + 'a {
    assert!(choices.len() <= 32, "too many choices for a 32-bit bitmap");
    move |value: &str| {
        let mut bits = 0;
        for name in value.split('|').map(str::trim).filter(|name| !name.is_empty()) {
            let Some(index) = choices
                .iter()
                .position(|choice| choice.eq_ignore_ascii_case(name))
            else {
                return Err(format!(
                    "'{name}' is not in the available choices {{{}}}",
                    choices.join(", ")
                ));
            };
            bits |= 1 << index;
        }
        *target = bits;
        Ok(())
    }
}

/// Compiles and stores a regular expression.
pub fn set_regex(target: &mut Option<Regex>) -> impl FnMut(&str) -> Result<(), String> + '_ {
    move |value: &str| {
        let regex =
            Regex::new(value).map_err(|e| format!("Failed to parse regular expression: {e}"))?;
        *target = Some(regex);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_message(result: Result<(), ConfigError>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn test_empty_config_is_ok() {
        let mut value = 7;
        parse_name_values("", &mut [NamedParam::new("x", set_int(&mut value))]).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_multiple_entries() {
        let mut a = 0;
        let mut b = String::new();
        parse_name_values(
            "a:42;;b:hello\na:43",
            &mut [
                NamedParam::new("a", set_int(&mut a)),
                NamedParam::new("b", set_string(&mut b)),
            ],
        )
        .unwrap();
        assert_eq!(a, 43);
        assert_eq!(b, "hello");
    }

    #[test]
    fn test_unknown_parameter_lists_supported() {
        let mut a = 0;
        let mut b = 0;
        let one = error_message(parse_name_values(
            "c:1",
            &mut [NamedParam::new("a", set_int(&mut a))],
        ));
        assert_eq!(one, "c: unknown parameter; supported parameter is 'a'");

        let two = error_message(parse_name_values(
            "c:1",
            &mut [
                NamedParam::new("a", set_int(&mut a)),
                NamedParam::new("b", set_int(&mut b)),
            ],
        ));
        assert_eq!(two, "c: unknown parameter; supported parameters are 'a', 'b'");
    }

    #[test]
    fn test_ignored_parameter_is_accepted() {
        let mut a = 0;
        parse_name_values(
            "legacy:whatever;a:5",
            &mut [NamedParam::ignored("legacy"), NamedParam::new("a", set_int(&mut a))],
        )
        .unwrap();
        assert_eq!(a, 5);
    }

    #[test]
    fn test_int_range_errors_are_prefixed() {
        let mut length = 100;
        let parse = error_message(parse_name_values(
            "length:abc",
            &mut [NamedParam::new("length", set_int_range(&mut length, 40, 1000))],
        ));
        assert_eq!(parse, "length: 'abc': Cannot parse integer");

        let range = error_message(parse_name_values(
            "length:20",
            &mut [NamedParam::new("length", set_int_range(&mut length, 40, 1000))],
        ));
        assert_eq!(range, "length: 20 out of range [40...1000]");
        assert_eq!(length, 100);
    }

    #[test]
    fn test_bool_values() {
        for (text, expected) in [
            ("", true),
            ("1", true),
            ("TRUE", true),
            ("On", true),
            ("0", false),
            ("false", false),
            ("OFF", false),
        ] {
            let mut value = !expected;
            set_bool(&mut value)(text).unwrap();
            assert_eq!(value, expected, "value {text:?}");
        }
        let mut value = false;
        assert!(set_bool(&mut value)("maybe").is_err());
    }

    #[test]
    fn test_string_one_of() {
        let mut style = String::from("upper");
        assert_eq!(
            set_string_one_of(&mut style, &["lower"])("x").unwrap_err(),
            "Value can only be 'lower'; got 'x'"
        );
        assert_eq!(
            set_string_one_of(&mut style, &["lower", "upper"])("x").unwrap_err(),
            "Value can only be one of ['lower', 'upper']; got 'x'"
        );
        set_string_one_of(&mut style, &["lower", "upper"])("lower").unwrap();
        assert_eq!(style, "lower");
    }

    #[test]
    fn test_named_bits() {
        let choices = ["module", "interface", "package"];
        let mut bits = 0;
        set_named_bits(&mut bits, &choices)(" Module | package ").unwrap();
        assert_eq!(bits, 0b101);

        let err = set_named_bits(&mut bits, &choices)("module|class").unwrap_err();
        assert_eq!(
            err,
            "'class' is not in the available choices {module, interface, package}"
        );
        assert_eq!(bits, 0b101);
    }

    #[test]
    fn test_regex() {
        let mut regex = None;
        set_regex(&mut regex)("^[a-z_]+$").unwrap();
        assert!(regex.as_ref().unwrap().is_match("foo_bar"));

        let err = set_regex(&mut regex)("(unclosed").unwrap_err();
        assert!(err.starts_with("Failed to parse regular expression: "));
    }

    #[test]
    fn test_value_may_contain_colons() {
        let mut pattern = String::new();
        parse_name_values(
            "pattern:a:b",
            &mut [NamedParam::new("pattern", set_string(&mut pattern))],
        )
        .unwrap();
        assert_eq!(pattern, "a:b");
    }
}
