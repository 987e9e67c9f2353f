//! `{placeholder}` resolution.
//!
//! A placeholder is `{name}` where `name` is a key of the supplied
//! [`InterpolationContext`]. Braces around anything else are copied
//! verbatim, so a string with no known placeholders comes back unchanged.

use std::collections::BTreeMap;

use stackforge_common::constants::{
    PLACEHOLDER_ADMIN_PASSWORD, PLACEHOLDER_COMPILED_TIME, PLACEHOLDER_FOLDER_NAME,
    PLACEHOLDER_PASSWORD, PLACEHOLDER_RANDOM_ALPHANUMERIC, PLACEHOLDER_RANDOM_PASSWORD,
    PLACEHOLDER_RANDOM_PORT,
};

use crate::generate::ValueSource;

/// Placeholder name to substituted value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpolationContext {
    values: BTreeMap<String, String>,
}

impl InterpolationContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a context with a fresh value for every generated placeholder.
    ///
    /// `{password}` and `{randomPassword}` are drawn separately.
    #[must_use]
    pub fn generated(source: &mut dyn ValueSource) -> Self {
        Self::new()
            .with(PLACEHOLDER_RANDOM_PASSWORD, source.password())
            .with(PLACEHOLDER_PASSWORD, source.password())
            .with(PLACEHOLDER_ADMIN_PASSWORD, source.admin_password())
            .with(PLACEHOLDER_FOLDER_NAME, source.folder_name())
            .with(PLACEHOLDER_COMPILED_TIME, source.compiled_time().to_string())
            .with(PLACEHOLDER_RANDOM_ALPHANUMERIC, source.alphanumeric())
            .with(PLACEHOLDER_RANDOM_PORT, source.random_port().to_string())
    }

    /// Adds or replaces one placeholder value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.values.insert(name.into(), value.into());
        self
    }

    /// Returns the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Number of bound placeholders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no placeholder is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Replaces every `{name}` bound in `context`; unknown tokens stay as they are.
#[must_use]
pub fn resolve(text: &str, context: &InterpolationContext) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        if let Some(value) = context.get(&after[..close]) {
            out.push_str(value);
            rest = &after[close + 1..];
        } else {
            out.push('{');
            rest = after;
        }
    }

    out.push_str(rest);
    out
}

/// Applies [`resolve`] element-wise.
#[must_use]
pub fn resolve_all(texts: &[String], context: &InterpolationContext) -> Vec<String> {
    texts.iter().map(|text| resolve(text, context)).collect()
}

/// Resolves the generated placeholders in `text` with a context built for
/// this call alone.
#[must_use]
pub fn interpolate(text: &str, source: &mut dyn ValueSource) -> String {
    resolve(text, &InterpolationContext::generated(source))
}

/// Like [`interpolate`], with a fresh context per element.
#[must_use]
pub fn interpolate_all(texts: &[String], source: &mut dyn ValueSource) -> Vec<String> {
    texts.iter().map(|text| interpolate(text, source)).collect()
}

#[cfg(test)]
pub(crate) mod testing {
    //! Deterministic [`ValueSource`] for asserting exact output.

    use crate::generate::ValueSource;

    /// Numbers every value it hands out, so repeated draws are visible.
    #[derive(Debug, Default)]
    pub struct CountingValues {
        pub calls: u32,
    }

    impl CountingValues {
        fn next(&mut self, prefix: &str) -> String {
            self.calls += 1;
            format!("{prefix}{}", self.calls)
        }
    }

    impl ValueSource for CountingValues {
        fn password(&mut self) -> String {
            self.next("pw")
        }

        fn admin_password(&mut self) -> String {
            self.next("admin")
        }

        fn folder_name(&mut self) -> String {
            self.next("dir")
        }

        fn alphanumeric(&mut self) -> String {
            self.next("tok")
        }

        fn random_port(&mut self) -> u16 {
            self.calls += 1;
            50_000
        }

        fn compiled_time(&mut self) -> i64 {
            1_700_000_000_000
        }
    }
}
