//! Model gateway port
//!
//! Defines the interface for the generative backend. The orchestration
//! logic never inspects which backend is in use; every agent reasons
//! through this capability alone.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Backend load failed: {0}")]
    Load(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Tuning knobs for one generation call. All fields are optional; the
/// backend applies its own defaults.
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Uniform capability backing every agent's reasoning step.
///
/// Implementations (adapters) live in the infrastructure layer and are
/// swappable without touching orchestration code.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// One-time backend initialization. Safe to call before first use
    /// and safe to call again; repeated calls are no-ops.
    async fn load(&self) -> Result<(), GatewayError>;

    /// Generate text for a prompt. The caller does not proceed until a
    /// result or a failure is available.
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GatewayError>;
}

/// Maps logical agent names to bound gateway instances.
///
/// Resolution never fails: an unregistered name receives a fallback
/// capability, so agent construction never blocks on backend
/// availability.
pub trait GatewayRegistry: Send + Sync {
    fn resolve(&self, agent: &str) -> Arc<dyn ModelGateway>;
}
