//! Data models shared between the store, the coordinator, and the API.

/// Account entity and account API types
pub mod account;

/// Withdrawal request/response types
pub mod withdrawal;
