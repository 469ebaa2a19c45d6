use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::dto::{ToolDescriptor, ToolSource};
use crate::tools::{gmail, CreateDraftHandler, GmailTools, IdGenerator, ToolHandler};

/// Immutable tool catalog. Built once at startup and shared behind an `Arc`.
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Concatenates the descriptors of every source in order. The first
    /// descriptor registered under a name wins; later duplicates are dropped.
    /// An empty result falls back to the built-in draft tool.
    pub fn load(sources: Vec<ToolSource>) -> Self {
        let mut tools = Vec::new();
        let mut seen = HashSet::new();

        for source in sources {
            for tool in source.document.tools {
                if tool.name.trim().is_empty() {
                    tracing::warn!("Skipping unnamed tool in {}", source.origin);
                    continue;
                }
                if !seen.insert(tool.name.clone()) {
                    tracing::warn!(
                        "Duplicate tool {} in {} ignored; first registration wins",
                        tool.name,
                        source.origin
                    );
                    continue;
                }
                tools.push(tool);
            }
        }

        if tools.is_empty() {
            tracing::info!("No connector tools declared; using built-in {}", gmail::CREATE_DRAFT);
            tools.push(gmail::descriptor());
        }

        Self {
            tools,
            handlers: HashMap::new(),
        }
    }

    pub fn with_handler(mut self, name: impl Into<String>, handler: Arc<dyn ToolHandler>) -> Self {
        self.handlers.insert(name.into(), handler);
        self
    }

    /// Binds the stub handlers shipped with the gateway.
    pub fn with_builtin_handlers(self, ids: Arc<dyn IdGenerator>) -> Self {
        let drafts = CreateDraftHandler::new(GmailTools::new(ids));
        self.with_handler(gmail::CREATE_DRAFT, Arc::new(drafts))
    }

    /// Registry snapshot in load order.
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn handler(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
