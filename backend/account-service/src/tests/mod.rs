/// Service-level tests for the account service
///
/// Everything here runs against `MemoryIdentityStore`; the PostgreSQL store is
/// covered by the ignored container tests under `tests/`.
pub mod fixtures;
