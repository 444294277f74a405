use std::path::PathBuf;

/// Failure to obtain a dataset. Fatal to whatever needed the table; never retried.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{dataset} is not valid json: {source}")]
    Decode {
        dataset: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{dataset} has no top-level object")]
    NotAnObject { dataset: &'static str },

    #[error("dataset {dataset} is not present in the source")]
    Missing { dataset: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unable to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid bind address '{0}'")]
    InvalidBind(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Failure building an API payload. The route layer maps it to a status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unknown faction '{0}'")]
    UnknownFaction(String),

    #[error("Unit Not Found")]
    UnitNotFound(String),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
