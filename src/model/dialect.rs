use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Yaml,
    Hcl,
    Dotenv,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Yaml => "yaml",
            Dialect::Hcl => "hcl",
            Dialect::Dotenv => "dotenv",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Dialect::Yaml => "YAML",
            Dialect::Hcl => "HCL",
            Dialect::Dotenv => "Dotenv",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Dialect::Yaml),
            "hcl" | "terraform" | "tf" => Ok(Dialect::Hcl),
            "dotenv" | "env" => Ok(Dialect::Dotenv),
            _ => Err(format!("Unknown dialect: {}. Use: yaml, hcl, dotenv", s)),
        }
    }
}
