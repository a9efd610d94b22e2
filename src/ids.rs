use chrono::{DateTime, Datelike, Timelike, Utc};
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

/// Length of the random tail appended to timestamp-based IDs. The timestamp
/// alone is only second-granular, so two checkouts in the same second would
/// otherwise collide.
const SUFFIX_LEN: usize = 4;

/// Length of generated row IDs (carts, addresses, banks, users).
const ROW_ID_LEN: usize = 10;

/// Builds a human-readable ID: `prefix + DDMMYYHHMMSS + '-' + random tail`.
///
/// The `DDMMYY HHMMSS` convention is kept for reporting and debugging; the
/// random suffix makes the ID collision-resistant within a second.
pub fn timestamped_id(prefix: &str, at: DateTime<Utc>) -> String {
    format!(
        "{}{:02}{:02}{:02}{:02}{:02}{:02}-{}",
        prefix,
        at.day(),
        at.month(),
        at.year() % 100,
        at.hour(),
        at.minute(),
        at.second(),
        random_tail(SUFFIX_LEN)
    )
}

/// Order IDs carry the `#` prefix, e.g. `#060825143000-X7QD`.
pub fn order_id(at: DateTime<Utc>) -> String {
    timestamped_id("#", at)
}

/// Payment IDs carry the `PAY` prefix.
pub fn payment_id(at: DateTime<Utc>) -> String {
    timestamped_id("PAY", at)
}

/// Short random identifier for plain rows (carts, addresses, bank accounts).
pub fn row_id() -> String {
    random_tail(ROW_ID_LEN)
}

fn random_tail(len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamped_id_keeps_ddmmyy_hhmmss_convention() {
        let at = Utc.with_ymd_and_hms(2025, 8, 6, 14, 30, 5).unwrap();
        let id = order_id(at);
        assert!(id.starts_with("#060825143005-"), "got {id}");
        assert_eq!(id.len(), "#060825143005-".len() + 4);

        let pay = payment_id(at);
        assert!(pay.starts_with("PAY060825143005-"), "got {pay}");
    }

    #[test]
    fn same_second_ids_do_not_collide() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let ids: std::collections::HashSet<_> = (0..64).map(|_| order_id(at)).collect();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn row_id_is_ten_alphanumeric_chars() {
        let id = row_id();
        assert_eq!(id.len(), 10);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
