//! Model registry - binds logical agent names to gateway instances.

use crate::gateway::echo::EchoGateway;
use colony_application::{GatewayError, GatewayRegistry, ModelGateway};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Name→gateway bindings with an echo fallback for everything else.
pub struct ModelRegistry {
    bindings: HashMap<String, Arc<dyn ModelGateway>>,
    fallback: Arc<EchoGateway>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            fallback: Arc::new(EchoGateway::new()),
        }
    }

    /// Binds a gateway to a logical agent name.
    pub fn register(&mut self, name: impl Into<String>, gateway: Arc<dyn ModelGateway>) {
        let name = name.into();
        info!(name = %name, "backend registered");
        self.bindings.insert(name, gateway);
    }

    /// Initializes every bound backend and the fallback. Safe to call
    /// more than once; `load` is idempotent per gateway.
    pub async fn load_all(&self) -> Result<(), GatewayError> {
        for (name, gateway) in &self.bindings {
            gateway.load().await?;
            debug!(name = %name, "backend loaded");
        }
        self.fallback.load().await
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GatewayRegistry for ModelRegistry {
    fn resolve(&self, agent: &str) -> Arc<dyn ModelGateway> {
        match self.bindings.get(agent) {
            Some(gateway) => Arc::clone(gateway),
            None => {
                debug!(agent, "no backend bound, using echo fallback");
                self.fallback.clone()
            }
        }
    }
}
