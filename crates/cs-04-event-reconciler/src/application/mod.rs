//! # Application Layer
//!
//! Timer, subscriptions and delivery.

pub mod service;

pub use service::{EventCallback, EventReconciler, Subscription};
