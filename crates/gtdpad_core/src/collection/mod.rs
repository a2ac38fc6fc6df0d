//! Ordered collections with change notification and bounded head windows.
//!
//! # Responsibility
//! - Publish one structural event per collection mutation.
//! - Maintain capped "top N" views incrementally from those events.
//!
//! # Invariants
//! - Mutations and the window updates they trigger complete within a single
//!   `&mut self` call; no caller can observe a half-updated window.
//!
//! # See also
//! - `WindowView::apply` for the per-event update rules.

pub mod change;
pub mod observable;
pub mod window;
pub mod windowed;

pub use change::{CollectionChange, CollectionError, CollectionResult};
pub use observable::{ObservableCollection, SubscriptionId};
pub use window::{WindowSource, WindowView};
pub use windowed::WindowedCollection;
