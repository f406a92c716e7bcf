// SPDX-License-Identifier: MPL-2.0
//! Toast notification engine.
//!
//! A [`ToastManager`] owns a single tokio task that arbitrates every toast
//! request: coalescing by dedupe key, priority preemption, rate limiting,
//! bounded queueing and background/foreground transitions. Rendering is
//! delegated to a [`PresentationRouter`]; lifecycle events go to a
//! [`TelemetrySink`](crate::telemetry::TelemetrySink).
//!
//! # Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use agora_toast::domain::toast::{ToastItem, ToastPolicy};
//! use agora_toast::notifications::{DismissalHandle, PresentationRouter, ToastManager};
//!
//! #[derive(Default)]
//! struct ConsoleRouter {
//!     shown: Mutex<Vec<String>>,
//! }
//!
//! impl PresentationRouter for ConsoleRouter {
//!     fn present(&self, item: &ToastItem, _on_dismiss: DismissalHandle) {
//!         self.shown.lock().unwrap().push(item.message().to_owned());
//!     }
//!     fn dismiss(&self, _animated: bool) {}
//!     fn update_current(&self, _item: &ToastItem) {}
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let router = Arc::new(ConsoleRouter::default());
//! let manager = ToastManager::builder(ToastPolicy::default(), router.clone()).spawn();
//!
//! manager.show(ToastItem::success("Post published")).await;
//!
//! assert_eq!(*router.shown.lock().unwrap(), vec!["Post published"]);
//! # }
//! ```

mod actor;
mod manager;
mod router;

pub use manager::{ManagerSnapshot, ToastManager, ToastManagerBuilder};
pub use router::{DismissalHandle, PresentationRouter, PresentationToken};
