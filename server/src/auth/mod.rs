pub mod issuer;
pub mod revocation;
pub mod validation;
pub mod workflow;

pub use issuer::{SignedToken, TokenIssuer};
pub use revocation::{InMemoryRevocationStore, RevocationStore};
pub use workflow::AuthContext;
