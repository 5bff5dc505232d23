//! Macro for implementing Display and FromStr for small keyword enums
//!
//! Several roster enums (event kind, window mode, storage backend, role) are
//! persisted and configured as lowercase keywords. This macro gives them a
//! single, case-insensitive textual form.
//!
//! # Example
//!
//! ```rust
//! use roster_domain::impl_keyword_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Shift {
//!     Morning,
//!     Evening,
//! }
//!
//! impl_keyword_conversions!(Shift {
//!     Morning => "morning",
//!     Evening => "evening",
//! });
//! ```

/// Implements Display and FromStr traits for keyword enums
///
/// This macro generates:
/// - Display trait: converts enum variants to their keyword
/// - FromStr trait: parses case-insensitive keywords to enum variants
///
/// Leading and trailing whitespace is ignored when parsing, so values read
/// from environment variables need no extra trimming.
#[macro_export]
macro_rules! impl_keyword_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
