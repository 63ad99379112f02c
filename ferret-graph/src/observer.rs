/// Hooks called by the executor around every node.
pub trait Observer: Send + Sync {
    fn on_node_enter(&self, _node: &str, _step: usize) {}
    fn on_node_exit(&self, _node: &str, _step: usize) {}
    fn on_route(&self, _from: &str, _to: &str) {}
    fn on_error(&self, _node: &str, _error: &str) {}
}

/// Logs executor progress through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_node_enter(&self, node: &str, step: usize) {
        tracing::debug!(node, step, "node enter");
    }

    fn on_node_exit(&self, node: &str, step: usize) {
        tracing::debug!(node, step, "node exit");
    }

    fn on_route(&self, from: &str, to: &str) {
        tracing::debug!(from, to, "route");
    }

    fn on_error(&self, node: &str, error: &str) {
        tracing::error!(node, error, "node failed");
    }
}
