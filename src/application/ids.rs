use uuid::Uuid;

use crate::domain::kind::{IdStyle, Kind};

/// Produces short external identifiers decoupled from storage keys. There is
/// no collision guarantee beyond the randomness of the source; callers treat
/// a uniqueness violation at the store as a rare retryable conflict.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdGenerator;

impl IdGenerator {
    pub fn generate(&self, kind: Kind) -> String {
        match kind.id_style() {
            IdStyle::Digits(len) => digits(len),
            IdStyle::ShortToken => {
                let id = Uuid::new_v4().to_string();
                id.split('-').next().unwrap_or(&id).to_string()
            }
            IdStyle::Uuid => Uuid::new_v4().to_string(),
        }
    }
}

fn digits(len: usize) -> String {
    let mut out = String::with_capacity(len);
    // A single uuid nearly always carries enough digit characters; loop for
    // the rare one that does not.
    while out.len() < len {
        let id = Uuid::new_v4().simple().to_string();
        out.extend(id.chars().filter(char::is_ascii_digit).take(len - out.len()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enquiry_ids_are_five_digits() {
        let ids = IdGenerator;
        for _ in 0..50 {
            let id = ids.generate(Kind::Enquiry);
            assert_eq!(id.len(), 5);
            assert!(id.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn event_ids_are_six_digits() {
        let id = IdGenerator.generate(Kind::Event);
        assert_eq!(id.len(), 6);
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn contact_ids_are_short_tokens() {
        let id = IdGenerator.generate(Kind::ContactMessage);
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn board_member_ids_are_full_uuids() {
        let id = IdGenerator.generate(Kind::BoardMember);
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
