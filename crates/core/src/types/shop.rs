//! Shop domain type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ShopDomain`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShopDomainError {
    /// The input string is empty.
    #[error("shop domain cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("shop domain must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character that cannot appear in a hostname.
    #[error("shop domain contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A Shopify shop identifier, e.g. `example.myshopify.com`.
///
/// Redirect settings are keyed by this value. It arrives as the `shop` query
/// parameter on App Proxy requests and as the host of the `dest` claim in
/// admin session tokens.
///
/// ## Constraints
///
/// - Length: 1-255 characters
/// - ASCII letters, digits, `-` and `.` only
///
/// ## Examples
///
/// ```
/// use redirect404_core::ShopDomain;
///
/// assert!(ShopDomain::parse("example.myshopify.com").is_ok());
///
/// assert!(ShopDomain::parse("").is_err());
/// assert!(ShopDomain::parse("evil.com/path").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct ShopDomain(String);

impl ShopDomain {
    /// Maximum length of a hostname.
    pub const MAX_LENGTH: usize = 255;

    /// Parse a `ShopDomain` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 255 characters, or
    /// contains anything other than ASCII letters, digits, `-` and `.`.
    pub fn parse(s: &str) -> Result<Self, ShopDomainError> {
        if s.is_empty() {
            return Err(ShopDomainError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(ShopDomainError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '.'))
        {
            return Err(ShopDomainError::InvalidCharacter(c));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the shop domain as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ShopDomain {
    type Err = ShopDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ShopDomain {
    type Error = ShopDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShopDomain> for String {
    fn from(shop: ShopDomain) -> Self {
        shop.0
    }
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for ShopDomain {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for ShopDomain {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::parse(s)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for ShopDomain {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(ShopDomain::parse("example.myshopify.com").is_ok());
        assert!(ShopDomain::parse("my-store-2.myshopify.com").is_ok());
        assert!(ShopDomain::parse("localhost").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ShopDomain::parse(""), Err(ShopDomainError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}.myshopify.com", "a".repeat(250));
        assert!(matches!(
            ShopDomain::parse(&long),
            Err(ShopDomainError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_characters() {
        assert_eq!(
            ShopDomain::parse("shop.myshopify.com/admin"),
            Err(ShopDomainError::InvalidCharacter('/'))
        );
        assert_eq!(
            ShopDomain::parse("shop myshopify.com"),
            Err(ShopDomainError::InvalidCharacter(' '))
        );
        assert!(ShopDomain::parse("shop.myshopify.com:443").is_err());
    }

    #[test]
    fn test_display() {
        let shop = ShopDomain::parse("example.myshopify.com").unwrap();
        assert_eq!(format!("{shop}"), "example.myshopify.com");
    }

    #[test]
    fn test_serde_roundtrip() {
        let shop = ShopDomain::parse("example.myshopify.com").unwrap();
        let json = serde_json::to_string(&shop).unwrap();
        assert_eq!(json, "\"example.myshopify.com\"");

        let parsed: ShopDomain = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, shop);
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        assert!(serde_json::from_str::<ShopDomain>("\"bad shop\"").is_err());
    }
}
