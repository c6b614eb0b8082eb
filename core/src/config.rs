use crate::{Error, Result};
use serde::{Deserialize, Serialize};

fn default_top_k() -> usize { 10 }

/// Query-time settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// How many postings per term the bounded query looks at.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { top_k: default_top_k() }
    }
}

impl QueryConfig {
    pub fn new(top_k: usize) -> Result<Self> {
        let config = Self { top_k };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::InvalidTopK(self.top_k));
        }
        Ok(())
    }
}
