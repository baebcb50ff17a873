//! End-to-end overlay tests against the public library API.

#[path = "overlay/http_service.rs"]
mod http_service;
#[path = "overlay/search_flow.rs"]
mod search_flow;
