use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    MissingFile(String),
    Io(std::io::Error),
    UnknownFormat(String),
    Yaml(serde_yaml::Error),
    Ron(ron::Error),
    NoAlgorithms,
    NotAco,
    NotPso,
    InvalidAlgorithmConfig(String),
    InvalidSolverConfig(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFile(path) => write!(f, "Config file {} does not exist.", path),
            Self::Io(err) => write!(f, "Could not read config: {}", err),
            Self::UnknownFormat(path) => write!(
                f,
                "Config file {} has to end in .yml, .yaml or .ron.",
                path
            ),
            Self::Yaml(err) => write!(f, "Invalid YAML config: {}", err),
            Self::Ron(err) => write!(f, "Invalid RON config: {}", err),
            Self::NoAlgorithms => write!(f, "Config does not list any algorithm."),
            Self::NotAco => write!(f, "Config is not a valid ACO config."),
            Self::NotPso => write!(f, "Config is not a valid PSO config."),
            Self::InvalidAlgorithmConfig(msg) => write!(f, "{}", msg),
            Self::InvalidSolverConfig(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Yaml(err) => Some(err),
            Self::Ron(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(err: ron::Error) -> Self {
        ConfigError::Ron(err)
    }
}
