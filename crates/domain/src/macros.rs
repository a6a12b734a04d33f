//! Macro for implementing Display and FromStr for wire enums
//!
//! The API encodes its enumerations as lowercase strings. This macro keeps the
//! string table in one place and exposes it as `WIRE_VALUES` so payload
//! schemas can be built from the same list the parser accepts.
//!
//! # Example
//!
//! ```rust
//! use squarecloud_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Visibility {
//!     Public,
//!     Private,
//! }
//!
//! impl_wire_enum_conversions!(Visibility {
//!     Public => "public",
//!     Private => "private",
//! });
//!
//! assert_eq!(Visibility::WIRE_VALUES, &["public", "private"]);
//! ```

/// Implements Display, FromStr and a `WIRE_VALUES` table for wire enums
///
/// This macro generates:
/// - Display trait: writes the wire string
/// - FromStr trait: parses case-insensitive strings to enum variants
/// - `as_str()`: the wire string without allocation
/// - `WIRE_VALUES`: every accepted wire string in declaration order
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every wire value accepted for this enum.
            pub const WIRE_VALUES: &'static [&'static str] = &[$($str),+];

            /// Wire string for this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
