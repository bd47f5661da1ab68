//! Order-number generation.
//!
//! Format: `<prefix><UTC date as YYYYMMDD><8 uppercase hex chars>`, e.g. `EC20240131A1B2C3D4`. The random
//! suffix makes collisions rare, not impossible; the order store has the final say.

use crate::model::OrderNumber;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Produces candidate order numbers. Each call should yield a fresh candidate.
pub trait OrderNumberSource: Send + Sync {
    fn next(&self, now: DateTime<Utc>) -> OrderNumber;
}

/// Date-stamped numbers with a random v4 UUID suffix.
#[derive(Debug, Clone)]
pub struct RandomOrderNumbers {
    prefix: String,
}

impl RandomOrderNumbers {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl OrderNumberSource for RandomOrderNumbers {
    fn next(&self, now: DateTime<Utc>) -> OrderNumber {
        let hex = format!("{:X}", Uuid::new_v4().simple());
        OrderNumber(format!("{}{}{}", self.prefix, now.format("%Y%m%d"), &hex[..8]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn format_is_prefix_date_and_upper_hex() {
        let now = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 0).unwrap();
        let number = RandomOrderNumbers::new("EC").next(now);
        let text = number.as_str();

        assert_eq!(text.len(), 18);
        assert!(text.starts_with("EC20240131"));
        assert!(text[10..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn successive_numbers_differ() {
        let source = RandomOrderNumbers::new("EC");
        let now = Utc::now();
        assert_ne!(source.next(now), source.next(now));
    }
}
