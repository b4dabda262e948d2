pub mod issuer;
pub mod verifier;

pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use verifier::TokenVerifier;
