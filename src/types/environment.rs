use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// PlugNotas production endpoint
pub const PRODUCTION_BASE_URL: &str = "https://api.plugnotas.com.br";
/// PlugNotas sandbox (homologação) endpoint
pub const SANDBOX_BASE_URL: &str = "https://api.sandbox.plugnotas.com.br";

/// Target environment of the PlugNotas API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    pub fn from_production_flag(production: bool) -> Self {
        if production {
            Environment::Production
        } else {
            Environment::Sandbox
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Vendor base URL for this environment
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_BASE_URL,
            Environment::Sandbox => SANDBOX_BASE_URL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Sandbox => "sandbox",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "producao" | "prod" => Ok(Environment::Production),
            "sandbox" | "homologacao" => Ok(Environment::Sandbox),
            other => Err(format!(
                "unknown environment '{}', expected production or sandbox",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_selects_exactly_two_urls() {
        assert_eq!(
            Environment::from_production_flag(true).default_base_url(),
            "https://api.plugnotas.com.br"
        );
        assert_eq!(
            Environment::from_production_flag(false).default_base_url(),
            "https://api.sandbox.plugnotas.com.br"
        );
    }

    #[test]
    fn test_default_is_production() {
        assert_eq!(Environment::default(), Environment::Production);
        assert!(Environment::default().is_production());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("sandbox".parse::<Environment>(), Ok(Environment::Sandbox));
        assert_eq!(
            " Production ".parse::<Environment>(),
            Ok(Environment::Production)
        );
        assert!("staging".parse::<Environment>().is_err());
    }
}
