//! Geographic scope selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label used for the all-provinces scope in names shown to users.
pub const ALL_PROVINCES_LABEL: &str = "Todas";

/// Which parishes a query covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Every parish in the country.
    #[default]
    All,
    /// Parishes of a single province.
    Province(String),
}

impl Scope {
    /// Build a scope from an optional request parameter.
    ///
    /// Missing, empty, `all` and `todas` (any case) select every province.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            None | Some("") => Scope::All,
            Some(value) if is_all_keyword(value) => Scope::All,
            Some(value) => Scope::Province(value.to_string()),
        }
    }

    /// Province name, if the scope is restricted to one.
    pub fn province(&self) -> Option<&str> {
        match self {
            Scope::All => None,
            Scope::Province(name) => Some(name.as_str()),
        }
    }

    /// Label used in file names and page headings.
    pub fn label(&self) -> &str {
        match self {
            Scope::All => ALL_PROVINCES_LABEL,
            Scope::Province(name) => name.as_str(),
        }
    }
}

fn is_all_keyword(value: &str) -> bool {
    value.eq_ignore_ascii_case("all") || value.eq_ignore_ascii_case(ALL_PROVINCES_LABEL)
}

impl FromStr for Scope {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Scope::from_param(Some(s)))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_keywords() {
        assert_eq!(Scope::from_param(None), Scope::All);
        assert_eq!(Scope::from_param(Some("")), Scope::All);
        assert_eq!(Scope::from_param(Some("  ")), Scope::All);
        assert_eq!(Scope::from_param(Some("all")), Scope::All);
        assert_eq!(Scope::from_param(Some("TODAS")), Scope::All);
    }

    #[test]
    fn test_province_scope() {
        let scope: Scope = "Esmeraldas".parse().unwrap();
        assert_eq!(scope, Scope::Province("Esmeraldas".to_string()));
        assert_eq!(scope.province(), Some("Esmeraldas"));
        assert_eq!(scope.to_string(), "Esmeraldas");
    }

    #[test]
    fn test_all_label() {
        assert_eq!(Scope::All.label(), "Todas");
        assert_eq!(Scope::All.province(), None);
    }
}
