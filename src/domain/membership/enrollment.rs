//! Enrollment intent: which member an enrollment request applies to.

use crate::domain::foundation::MemberId;

/// Decision made once, up front, for an enrollment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentIntent {
    /// Register a new member.
    NewMember,
    /// Add a period to an existing member.
    ExtendExistingMember(MemberId),
    /// Several members share the phone number and none was selected.
    ConflictRequiresDisambiguation(Vec<MemberId>),
}

impl EnrollmentIntent {
    /// Resolves the intent from members matching the submitted phone.
    ///
    /// `force_new` always wins. An explicit `selected` member wins over phone
    /// matching. Otherwise a single match is extended and several matches
    /// require the caller to choose.
    pub fn resolve(phone_matches: &[MemberId], selected: Option<MemberId>, force_new: bool) -> Self {
        if force_new {
            return EnrollmentIntent::NewMember;
        }
        if let Some(member_id) = selected {
            return EnrollmentIntent::ExtendExistingMember(member_id);
        }
        match phone_matches {
            [] => EnrollmentIntent::NewMember,
            [only] => EnrollmentIntent::ExtendExistingMember(*only),
            many => EnrollmentIntent::ConflictRequiresDisambiguation(many.to_vec()),
        }
    }
}
