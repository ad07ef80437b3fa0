//! Custom test assertions

use firegate::auth::{AuthCategory, ClassificationResult};

/// Assertions for ClassificationResult
pub trait ClassificationAssertions {
    /// Assert the result is admitted under `category`
    fn assert_admitted_as(&self, category: AuthCategory);

    /// Assert the result is the standard rejection
    fn assert_rejected(&self);
}

impl ClassificationAssertions for ClassificationResult {
    fn assert_admitted_as(&self, category: AuthCategory) {
        assert!(
            self.authenticated(),
            "Expected request to be admitted as {}, got {:?}",
            category,
            self
        );
        assert_eq!(self.category(), category);
        assert!(self.rejection().is_none());
        assert_eq!(self.identity().is_some(), category == AuthCategory::FirebaseUser);
    }

    fn assert_rejected(&self) {
        assert!(!self.authenticated(), "Expected rejection, got {:?}", self);
        assert_eq!(self.category(), AuthCategory::Unauthenticated);
        assert!(self.identity().is_none());

        let rejection = self.rejection().expect("rejection present");
        assert!(rejection.message.starts_with("Authentication required"));
        assert_eq!(rejection.allowed_auth_methods.len(), 3);
    }
}
