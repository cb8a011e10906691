use std::sync::Mutex;

pub use shared::domain::NavigationTarget;
use tracing::info;

/// Navigation seam injected into every controller.
pub trait Navigator: Send + Sync {
    fn on_navigate(&self, target: NavigationTarget);
}

impl<F> Navigator for F
where
    F: Fn(NavigationTarget) + Send + Sync,
{
    fn on_navigate(&self, target: NavigationTarget) {
        self(target)
    }
}

/// In-memory router that tracks which view is displayed.
pub struct Router {
    history: Mutex<Vec<NavigationTarget>>,
}

impl Router {
    pub fn new(initial: NavigationTarget) -> Self {
        Self {
            history: Mutex::new(vec![initial]),
        }
    }

    pub fn current(&self) -> NavigationTarget {
        let history = self.history.lock().unwrap_or_else(|p| p.into_inner());
        history.last().copied().unwrap_or(NavigationTarget::Login)
    }

    pub fn history(&self) -> Vec<NavigationTarget> {
        self.history
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(NavigationTarget::Login)
    }
}

impl Navigator for Router {
    fn on_navigate(&self, target: NavigationTarget) {
        info!(path = target.path(), "navigate");
        self.history
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(target);
    }
}
