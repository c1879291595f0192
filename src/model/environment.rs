use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::util::error::CmdlineError;

/// Variables visible to commands. Ordered so listings are stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment {
    variables: BTreeMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, CmdlineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut environment = Self::new();
        for pair in pairs {
            environment.set_pair(pair.as_ref())?;
        }
        Ok(environment)
    }

    /// Applies a single `KEY=VALUE` pair. The value may itself contain `=`.
    pub fn set_pair(&mut self, pair: &str) -> Result<(), CmdlineError> {
        match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                self.set(key.trim(), value);
                Ok(())
            }
            _ => Err(CmdlineError::InvalidEnvPair(pair.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn extend(&mut self, other: Environment) {
        self.variables.extend(other.variables);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() {
        let env = Environment::from_pairs(["EDITOR=vim", "EXPR=a=b", " PAD =x"]).unwrap();
        assert_eq!(env.get("EDITOR"), Some("vim"));
        assert_eq!(env.get("EXPR"), Some("a=b"));
        assert_eq!(env.get("PAD"), Some("x"));
        assert_eq!(env.len(), 3);
    }

    #[test]
    fn test_rejects_malformed_pairs() {
        assert!(matches!(
            Environment::from_pairs(["NOVALUE"]),
            Err(CmdlineError::InvalidEnvPair(pair)) if pair == "NOVALUE"
        ));
        assert!(matches!(
            Environment::from_pairs(["=value"]),
            Err(CmdlineError::InvalidEnvPair(_))
        ));
    }

    #[test]
    fn test_extend_overrides() {
        let mut base = Environment::from_pairs(["A=1", "B=2"]).unwrap();
        base.extend(Environment::from_pairs(["B=3"]).unwrap());
        let listed: Vec<_> = base.iter().collect();
        assert_eq!(listed, vec![("A", "1"), ("B", "3")]);
    }
}
