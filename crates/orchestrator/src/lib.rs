//! Conversation orchestrator for the Vexla assistant.
//!
//! [`Orchestrator`] owns the message log, artifact registry, notification
//! channel, island mode controller and view router, and turns UI gestures
//! into state changes plus scheduled assistant replies.

pub mod artifacts;
pub mod catalog;
pub mod dispatcher;
pub mod island;
pub mod message_log;
pub mod notifications;
pub mod store;
pub mod timers;
pub mod view_router;

pub use dispatcher::{classify, Intent};
pub use island::{IslandEvent, RichMode};
pub use store::{Orchestrator, StoreSnapshot};
pub use timers::Deferred;
