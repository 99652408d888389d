//! Echo gateway - the no-fail fallback capability.
//!
//! Used for any agent name without a registered backend, and as the only
//! backend in environments without inference support. Generation echoes
//! the prompt deterministically and never fails.

use async_trait::async_trait;
use colony_application::{GatewayError, GenerationOptions, ModelGateway};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Deterministic echo backend.
pub struct EchoGateway {
    loaded: AtomicBool,
}

impl EchoGateway {
    pub fn new() -> Self {
        Self {
            loaded: AtomicBool::new(false),
        }
    }
}

impl Default for EchoGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelGateway for EchoGateway {
    async fn load(&self) -> Result<(), GatewayError> {
        if !self.loaded.swap(true, Ordering::SeqCst) {
            debug!("echo gateway ready");
        }
        Ok(())
    }

    async fn generate(
        &self,
        prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, GatewayError> {
        Ok(format!("[echo] {prompt}"))
    }
}
