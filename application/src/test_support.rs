//! Shared stubs for application-layer tests.

use crate::ports::model_gateway::{GatewayError, GenerationOptions, ModelGateway};
use crate::ports::workspace::{WorkspaceError, WorkspaceFiles};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Gateway returning a fixed reply and recording every prompt.
pub struct StaticGateway {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl StaticGateway {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelGateway for StaticGateway {
    async fn load(&self) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn generate(
        &self,
        prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Gateway that always fails generation.
pub struct FailingGateway;

#[async_trait]
impl ModelGateway for FailingGateway {
    async fn load(&self) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn generate(
        &self,
        _prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, GatewayError> {
        Err(GatewayError::Generation("stub backend down".to_string()))
    }
}

/// Registry resolving every name to the same gateway.
pub struct SingleGatewayRegistry {
    gateway: Arc<dyn ModelGateway>,
}

impl SingleGatewayRegistry {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self { gateway }
    }
}

impl crate::ports::model_gateway::GatewayRegistry for SingleGatewayRegistry {
    fn resolve(&self, _agent: &str) -> Arc<dyn ModelGateway> {
        Arc::clone(&self.gateway)
    }
}

/// Workspace stub that authorizes everything and lists nothing.
pub struct OpenWorkspace {
    root: PathBuf,
}

impl OpenWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl WorkspaceFiles for OpenWorkspace {
    fn root(&self) -> &Path {
        &self.root
    }

    fn authorize(&self, _path: &Path) -> bool {
        true
    }

    fn read_file(&self, path: &Path) -> Result<String, WorkspaceError> {
        Err(WorkspaceError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "stub workspace"),
        })
    }

    fn write_file(&self, _path: &Path, _content: &str) -> Result<(), WorkspaceError> {
        Ok(())
    }

    fn project_tree(&self) -> Result<Vec<String>, WorkspaceError> {
        Ok(Vec::new())
    }
}
