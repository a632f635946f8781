pub mod user;

pub use user::{
    IdentityChanges, IdentityRecord, LoginRequest, LoginResponse, MessageResponse, NewIdentity,
    RegisterRequest, RegisterResponse, UpdateUserRequest, UserProfile,
};
