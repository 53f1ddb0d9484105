use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use crate::config::Settings;
use crate::errors::{TreeError, TreeResult};
use crate::node::Node;
use crate::parser::{from_level_order, tokenize};

/// Builds owned trees from level-order input, applying the limits in [`Settings`].
pub struct TreeBuilder {
    settings: Settings,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl TreeBuilder {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[instrument(level = "debug", skip(self))]
    pub fn build_from_str(&self, input: &str) -> TreeResult<Option<Node<String>>> {
        let tokens = tokenize(input, self.settings.absent_marker.as_deref())?;

        let values = tokens.iter().filter(|t| t.is_some()).count();
        if let Some(limit) = self.settings.max_nodes {
            if values > limit {
                return Err(TreeError::TooManyNodes { limit });
            }
        }
        debug!("{} tokens, {} values", tokens.len(), values);

        from_level_order(&tokens)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn build_from_file(&self, path: &Path) -> TreeResult<Option<Node<String>>> {
        if !path.exists() {
            return Err(TreeError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        self.build_from_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_nodes() {
        let settings = Settings {
            max_nodes: Some(2),
            ..Settings::default()
        };
        let builder = TreeBuilder::new(settings);
        assert!(builder.build_from_str("a b").unwrap().is_some());
        assert!(matches!(
            builder.build_from_str("a b c"),
            Err(TreeError::TooManyNodes { limit: 2 })
        ));
    }

    #[test]
    fn test_missing_file() {
        let builder = TreeBuilder::default();
        let result = builder.build_from_file(Path::new("does/not/exist.tree"));
        assert!(matches!(result, Err(TreeError::FileNotFound(_))));
    }
}
