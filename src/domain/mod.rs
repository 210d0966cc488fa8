//! Domain values flowing through the listing pipeline.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod filter;
pub mod format;
pub mod record;
pub mod row;

/// Record families shown on the dashboard, each with its own listing tab.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Inquiry,
    Quote,
    Job,
    Payment,
    ActiveJob,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown domain: {0}")]
pub struct UnknownDomain(pub String);

impl Domain {
    pub const ALL: [Domain; 5] = [
        Domain::Inquiry,
        Domain::Quote,
        Domain::Job,
        Domain::Payment,
        Domain::ActiveJob,
    ];

    /// Storage key and CLI argument for the domain.
    pub const fn slug(self) -> &'static str {
        match self {
            Domain::Inquiry => "inquiries",
            Domain::Quote => "quotes",
            Domain::Job => "jobs",
            Domain::Payment => "payments",
            Domain::ActiveJob => "active_jobs",
        }
    }

    /// Plural noun used in user-facing messages.
    pub const fn plural_label(self) -> &'static str {
        match self {
            Domain::Inquiry => "inquiries",
            Domain::Quote => "quotes",
            Domain::Job => "jobs",
            Domain::Payment => "payments",
            Domain::ActiveJob => "active jobs",
        }
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for Domain {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Domain::ALL
            .into_iter()
            .find(|domain| domain.slug() == wanted)
            .ok_or_else(|| UnknownDomain(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slugs_and_dashed_variants() {
        assert_eq!("quotes".parse::<Domain>(), Ok(Domain::Quote));
        assert_eq!("Active-Jobs".parse::<Domain>(), Ok(Domain::ActiveJob));
        assert!("deals".parse::<Domain>().is_err());
    }

    #[test]
    fn display_matches_slug() {
        for domain in Domain::ALL {
            assert_eq!(domain.to_string(), domain.slug());
        }
    }
}
