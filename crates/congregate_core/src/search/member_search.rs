//! In-memory member directory search.
//!
//! # Responsibility
//! - Filter member snapshots for the members and groups screens.
//!
//! # Invariants
//! - Matching is case-insensitive and whitespace-normalized.
//! - Result order follows the input order.
//! - A blank query text matches every member (filters still apply).

use crate::model::member::{Member, MemberStatus};
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Member directory filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSearchQuery {
    /// Free text matched against name, phone, e-mail and location.
    pub text: String,
    pub status: Option<MemberStatus>,
    /// Exact group name (case-insensitive).
    pub group: Option<String>,
}

impl MemberSearchQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Returns members matching every populated filter.
pub fn search_members<'a>(members: &'a [Member], query: &MemberSearchQuery) -> Vec<&'a Member> {
    let needle = normalize(&query.text);
    let group = query.group.as_deref().map(normalize);

    members
        .iter()
        .filter(|member| query.status.map_or(true, |status| member.status == status))
        .filter(|member| {
            group
                .as_deref()
                .map_or(true, |group| normalize(&member.group) == group)
        })
        .filter(|member| needle.is_empty() || haystack(member).contains(needle.as_str()))
        .collect()
}

fn haystack(member: &Member) -> String {
    normalize(&format!(
        "{} {} | {} | {} | {}",
        member.first_name, member.last_name, member.phone, member.email, member.location
    ))
}

fn normalize(value: &str) -> String {
    WHITESPACE_RE
        .replace_all(value.trim(), " ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{search_members, MemberSearchQuery};
    use crate::model::member::{Member, MemberStatus};

    fn directory() -> Vec<Member> {
        let mut john = Member::new("1", "John", "Kamau");
        john.phone = "+254 712 345 678".to_string();
        john.group = "Choir".to_string();
        john.location = "Westlands".to_string();

        let mut mary = Member::new("2", "Mary", "Wanjiku");
        mary.email = "mary@example.org".to_string();
        mary.group = "Youth".to_string();
        mary.status = MemberStatus::Inactive;

        vec![john, mary]
    }

    #[test]
    fn matches_full_name_across_irregular_whitespace() {
        let members = directory();
        let hits = search_members(&members, &MemberSearchQuery::text("  JOHN   kamau "));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
    }

    #[test]
    fn blank_text_with_status_filter() {
        let members = directory();
        let query = MemberSearchQuery {
            status: Some(MemberStatus::Inactive),
            ..MemberSearchQuery::default()
        };
        let hits = search_members(&members, &query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
    }

    #[test]
    fn group_filter_is_case_insensitive() {
        let members = directory();
        let query = MemberSearchQuery {
            group: Some("choir".to_string()),
            ..MemberSearchQuery::default()
        };
        assert_eq!(search_members(&members, &query).len(), 1);
    }

    #[test]
    fn matches_email_and_location() {
        let members = directory();
        assert_eq!(
            search_members(&members, &MemberSearchQuery::text("example.org")).len(),
            1
        );
        assert_eq!(
            search_members(&members, &MemberSearchQuery::text("westlands")).len(),
            1
        );
    }
}
