//! Firebase ID token verification
//!
//! ID tokens are RS256 JWTs signed by Google's `securetoken` service account.
//! A token is accepted when its `kid` names a currently published key, the
//! signature checks out, `aud` is the Firebase project, `iss` is
//! `https://securetoken.google.com/<project>`, it has not expired, and `sub`
//! is a non-empty string of at most 128 characters.

mod keys;
mod types;
mod verifier;


pub use keys::KeyStore;
pub use types::FirebaseClaims;
pub use verifier::FirebaseTokenVerifier;
