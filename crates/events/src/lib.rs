//! Donor notifications for the media workflow.
//!
//! - [`push`] -- the push collaborator ([`PushSender`]) and its Expo client.
//! - [`notifier`] -- [`DeliveryNotifier`], which resolves recipients and
//!   sends the fixed-template messages.
//! - [`dispatch`] -- [`NotificationQueue`] and [`NotificationWorker`], the
//!   fire-and-forget handoff between state transitions and the notifier.

pub mod dispatch;
pub mod notifier;
pub mod push;

pub use dispatch::{NotificationJob, NotificationQueue, NotificationWorker};
pub use notifier::{DeliveryNotifier, NotifyError, NotifyOutcome};
pub use push::{ExpoPushSender, PushConfig, PushError, PushSender, PushTicket};
