use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Entity categories managed by the backend. Each kind owns its own external
/// identifier namespace and, where applicable, an upload subdirectory and a
/// fixed status workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Enquiry,
    ContactMessage,
    Event,
    CampusNews,
    UniversityNews,
    Course,
    Faculty,
    BoardMember,
    Placement,
    RankHolder,
    Achievement,
    Testimonial,
}

/// Shape of the external identifier a kind hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStyle {
    /// Short numeric-looking string, statistically unique within the kind.
    Digits(usize),
    /// Eight-character hex token.
    ShortToken,
    /// Full hyphenated uuid. Kept for board members only.
    Uuid,
}

impl Kind {
    pub fn label(self) -> &'static str {
        match self {
            Kind::Enquiry => "Enquiry",
            Kind::ContactMessage => "Contact",
            Kind::Event => "Event",
            Kind::CampusNews => "Campus news",
            Kind::UniversityNews => "University news",
            Kind::Course => "Course",
            Kind::Faculty => "Faculty",
            Kind::BoardMember => "Board member",
            Kind::Placement => "Placement",
            Kind::RankHolder => "Rank holder",
            Kind::Achievement => "Achievement",
            Kind::Testimonial => "Testimonial",
        }
    }

    /// Subdirectory under `<public>/uploads/` for kinds that accept images.
    pub fn upload_dir(self) -> Option<&'static str> {
        match self {
            Kind::Enquiry | Kind::ContactMessage => None,
            Kind::Event => Some("events"),
            Kind::CampusNews => Some("campus_news"),
            Kind::UniversityNews => Some("university_news"),
            Kind::Course => Some("courses"),
            Kind::Faculty => Some("faculty"),
            Kind::BoardMember => Some("board_members"),
            Kind::Placement => Some("placements"),
            Kind::RankHolder => Some("rank_holders"),
            Kind::Achievement => Some("achievement"),
            Kind::Testimonial => Some("testimonials"),
        }
    }

    /// The full status enum for countable kinds. Snapshot maps zero-fill
    /// every value listed here even when no record currently holds it.
    pub fn statuses(self) -> Option<&'static [&'static str]> {
        match self {
            Kind::Enquiry => Some(EnquiryStatus::ALL_LABELS),
            Kind::ContactMessage => Some(ContactStatus::ALL_LABELS),
            Kind::Event => Some(EventStatus::ALL_LABELS),
            _ => None,
        }
    }

    pub fn is_countable(self) -> bool {
        self.statuses().is_some()
    }

    pub fn id_style(self) -> IdStyle {
        match self {
            Kind::Enquiry => IdStyle::Digits(5),
            Kind::ContactMessage => IdStyle::ShortToken,
            Kind::BoardMember => IdStyle::Uuid,
            _ => IdStyle::Digits(6),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

macro_rules! status_enum {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const ALL_LABELS: &'static [&'static str] = &[$($label),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($label => Ok(Self::$variant),)+
                    other => Err(DomainError::validation(format!(
                        "invalid status '{other}'"
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

status_enum!(EnquiryStatus {
    Pending => "pending",
    Completed => "completed",
    Rejected => "rejected",
    Approved => "approved",
});

status_enum!(ContactStatus {
    Pending => "pending",
    Viewed => "viewed",
    Replied => "replied",
    Closed => "closed",
    Completed => "completed",
});

status_enum!(EventStatus {
    Upcoming => "upcoming",
    Completed => "completed",
    Canceled => "canceled",
});

impl Default for EnquiryStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl Default for ContactStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl Default for EventStatus {
    fn default() -> Self {
        Self::Upcoming
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countable_kinds_expose_their_full_enum() {
        assert_eq!(
            Kind::Event.statuses(),
            Some(&["upcoming", "completed", "canceled"][..])
        );
        assert_eq!(Kind::Enquiry.statuses().map(<[_]>::len), Some(4));
        assert_eq!(Kind::ContactMessage.statuses().map(<[_]>::len), Some(5));
        assert!(Kind::Course.statuses().is_none());
    }

    #[test]
    fn status_labels_round_trip() {
        for label in EventStatus::ALL_LABELS {
            assert_eq!(label.parse::<EventStatus>().unwrap().as_str(), *label);
        }
        assert!("unknown".parse::<EventStatus>().is_err());
    }

    #[test]
    fn form_kinds_do_not_accept_uploads() {
        assert!(Kind::Enquiry.upload_dir().is_none());
        assert!(Kind::ContactMessage.upload_dir().is_none());
        assert_eq!(Kind::Event.upload_dir(), Some("events"));
    }
}
