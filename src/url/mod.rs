//! URL handling module for News-Harvest
//!
//! This module provides redirector-link unwrapping and the service
//! allow-list that decides which targets a worker may fetch.

mod redirect;
mod service;

pub use redirect::{unwrap_redirect, REDIRECT_PARAM};
pub use service::{ServiceMatcher, DEFAULT_SERVICE_PATTERN};
