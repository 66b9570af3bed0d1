//! Argument checks applied before every store call

use crate::errors::CacheError;
use std::time::Duration;

/// Reject a key or field that is empty or whitespace-only
pub(crate) fn not_blank(name: &'static str, value: &str) -> Result<(), CacheError> {
    if value.trim().is_empty() {
        return Err(CacheError::InvalidArgument {
            name,
            reason: "must not be empty or whitespace",
        });
    }
    Ok(())
}

/// Reject an empty list, then every blank entry in it
pub(crate) fn not_empty_fields(name: &'static str, fields: &[&str]) -> Result<(), CacheError> {
    if fields.is_empty() {
        return Err(CacheError::InvalidArgument {
            name,
            reason: "must contain at least one field",
        });
    }
    fields.iter().try_for_each(|field| not_blank(name, field))
}

/// Millisecond count of a TTL, rejected when PEXPIRE cannot carry it
pub(crate) fn expiration_millis(name: &'static str, ttl: Duration) -> Result<i64, CacheError> {
    i64::try_from(ttl.as_millis()).map_err(|_| CacheError::InvalidArgument {
        name,
        reason: "must fit in a signed 64-bit millisecond count",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_rejected() {
        for value in ["", " ", "\t", "\n  "] {
            let err = not_blank("cache_key", value).unwrap_err();
            assert!(
                matches!(err, CacheError::InvalidArgument { name: "cache_key", .. }),
                "Should reject {:?}",
                value
            );
        }
    }

    #[test]
    fn test_regular_values_accepted() {
        for value in ["u1", " padded ", "user:42:profile"] {
            assert!(not_blank("field", value).is_ok(), "Should accept {:?}", value);
        }
    }

    #[test]
    fn test_field_lists() {
        assert!(not_empty_fields("fields", &[]).is_err());
        assert!(not_empty_fields("fields", &["a", " "]).is_err());
        assert!(not_empty_fields("fields", &["a", "b"]).is_ok());
    }

    #[test]
    fn test_expiration_range() {
        assert_eq!(expiration_millis("expiration", Duration::from_secs(5)).unwrap(), 5000);
        assert_eq!(
            expiration_millis("expiration", Duration::from_millis(i64::MAX as u64)).unwrap(),
            i64::MAX
        );

        for ttl in [
            Duration::MAX,
            Duration::from_secs(u64::MAX / 500),
            Duration::from_millis(i64::MAX as u64 + 1),
        ] {
            assert!(
                matches!(
                    expiration_millis("expiration", ttl),
                    Err(CacheError::InvalidArgument { name: "expiration", .. })
                ),
                "Should reject {:?}",
                ttl
            );
        }
    }
}
