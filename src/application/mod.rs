//! Use cases built on the domain and ports.
//!
//! [`poll`] runs one fetch, classify, dispatch cycle; [`alert`] decides
//! whether and how an opportunity reaches the webhook.

pub mod alert;
pub mod poll;
