use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError
{
  #[error("config file {path} could not be read")]
  Read
  {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("config file {path} is not valid JSON")]
  Parse
  {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}
