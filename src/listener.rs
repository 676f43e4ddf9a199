//! Subscribe-side message listener contract
//!
//! Delivery itself is out of scope for this crate; the orchestrator
//! only keeps a weak back-reference to an externally owned listener
//! so the subscribe side can be wired up without a lifecycle tie.

/// Receiver of messages delivered on the subscribe side.
pub trait MessageListener: Send + Sync {
    fn on_message(&self, subject: &str, payload: &[u8]);
}
