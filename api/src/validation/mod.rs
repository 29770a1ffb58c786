//! Input Validation Module
//!
//! Header and body validation for the application registry API.
//!
//! # Overview
//!
//! 1. **Extractors** - `RequiredHeaders`, which rejects requests missing a
//!    mandatory header, plus the `Validatable` trait and `ValidationBuilder`
//! 2. **Headers** - `HeaderRules`, length and charset rules for header values
//! 3. **Requests** - `Validatable` impls for request bodies
//! 4. **Validators** - reusable checks (blank, size, charset)
//!
//! Every validator collects all violations instead of stopping at the first,
//! and reports them in check order.
//!
//! # Validation Error Response
//!
//! ```json
//! {
//!   "errors": [
//!     {"field": "code", "errorCode": "cosomoram.application.request_error", "errorMessage": "must not be blank"},
//!     {"field": "name", "errorCode": "cosomoram.application.request_error", "errorMessage": "size must be between 3 and 50"}
//!   ]
//! }
//! ```

pub mod extractors;
pub mod headers;
pub mod requests;
pub mod validators;

// Re-export commonly used items
pub use extractors::{
    MissingHeaderPolicy, RequiredHeaders, Validatable, ValidationBuilder, HEADER_CORRELATION_ID,
    HEADER_SESSION_ID, HEADER_USER_ID,
};
pub use headers::{HeaderRules, LengthBounds};
pub use validators::{validate_alphanumeric, validate_not_blank, validate_size};
