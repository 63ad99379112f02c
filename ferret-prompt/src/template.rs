use std::collections::HashMap;

use ferret_core::{FerretError, Value};
use regex::Regex;

/// A prompt with `{{name}}` placeholders.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    fn pattern() -> Result<Regex, FerretError> {
        Regex::new(r"\{\{\s*(\w+)\s*\}\}").map_err(|e| FerretError::InvalidConfig(e.to_string()))
    }

    /// Placeholder names in order of first appearance.
    pub fn input_variables(&self) -> Result<Vec<String>, FerretError> {
        let mut names: Vec<String> = Vec::new();
        for caps in Self::pattern()?.captures_iter(&self.template) {
            let name = caps[1].to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// Substitutes every placeholder. Strings are inserted as-is, other values
    /// as compact JSON. A placeholder without a value is an error.
    pub fn render(&self, vars: &HashMap<String, Value>) -> Result<String, FerretError> {
        let missing: Vec<String> = self
            .input_variables()?
            .into_iter()
            .filter(|name| !vars.contains_key(name))
            .collect();
        if !missing.is_empty() {
            return Err(FerretError::InvalidConfig(format!(
                "missing prompt variables: {}",
                missing.join(", ")
            )));
        }

        let rendered = Self::pattern()?.replace_all(&self.template, |caps: &regex::Captures| {
            match vars.get(&caps[1]) {
                Some(value) => value
                    .as_str()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| value.to_string()),
                None => String::new(),
            }
        });
        Ok(rendered.to_string())
    }

    /// Shorthand for templates whose variables are all plain strings.
    pub fn render_with(&self, vars: &[(&str, &str)]) -> Result<String, FerretError> {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
            .collect();
        self.render(&vars)
    }
}
