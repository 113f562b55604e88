//! Process-wide wiring: config plus the dispatcher with its capabilities.
//!
//! Nothing here changes after startup; handlers receive no mutable state.

use std::sync::Arc;

use crate::capability::{Clock, RandomSource, SystemClock, SystemRandomSource};
use crate::config::SidecarConfig;
use crate::dispatch::Dispatcher;

pub struct AppState {
    cfg: SidecarConfig,
    dispatcher: Dispatcher,
}

impl AppState {
    /// Build state backed by the OS random source and wall clock.
    pub fn new(cfg: SidecarConfig) -> Self {
        Self::with_capabilities(
            cfg,
            Arc::new(SystemRandomSource::new()),
            Arc::new(SystemClock),
        )
    }

    pub fn with_capabilities(
        cfg: SidecarConfig,
        random: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let dispatcher = Dispatcher::with_builtin(random, clock);
        tracing::debug!(types = ?dispatcher.registered_types(), "handlers registered");

        Self { cfg, dispatcher }
    }

    pub fn cfg(&self) -> &SidecarConfig {
        &self.cfg
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
