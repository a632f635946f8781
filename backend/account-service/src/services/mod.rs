/// Business logic layer
pub mod identity;

pub use identity::IdentityService;
