//! Shared handler state.

use std::sync::Arc;

use venda_app::context::AppContext;

/// Injected into the depot once, obtained by every handler.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
