//! HTTP DTOs for member endpoints.
//!
//! Amounts are integer minor units. Instants are RFC 3339 strings.

use serde::{Deserialize, Serialize};

use crate::application::handlers::enrollment::{
    AddPeriodCommand, AddPeriodResult, CheckInCommand, CheckInResult, EnrollMemberCommand,
    EnrollMemberResult, PurchaseDayPassCommand, PurchaseDayPassResult, RenewMembershipCommand,
    RenewMembershipResult,
};
use crate::application::handlers::members::{
    GetMemberResult, GetMemberStatusResult, GetMembershipHistoryResult,
};
use crate::domain::foundation::{MemberId, Money, PackageId, PaymentMethodId, Timestamp};
use crate::domain::membership::{
    CheckIn, Continuity, ContinuityStatus, EngagementSummary, Member, MemberProfileUpdate,
    MembershipError, MembershipPeriod, NewMemberProfile, PeriodPhase, Transaction,
};
use crate::ports::{MemberPage, MemberQuery};

fn amount(minor_units: Option<i64>) -> Result<Option<Money>, MembershipError> {
    Ok(minor_units.map(|a| Money::try_new(a, "amount")).transpose()?)
}

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMembersParams {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl From<ListMembersParams> for MemberQuery {
    fn from(params: ListMembersParams) -> Self {
        MemberQuery::new(params.search, params.page, params.per_page)
    }
}

/// Front-desk registration form.
///
/// Without `package_id` only the profile is stored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMemberRequest {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub package_id: Option<PackageId>,
    pub payment_method_id: Option<PaymentMethodId>,
    /// Overrides the package price.
    pub amount: Option<i64>,
    /// Start of the first period, for members with no history.
    pub start_date: Option<Timestamp>,
    /// Extend this member instead of matching by phone.
    pub existing_member_id: Option<MemberId>,
    #[serde(default)]
    pub force_new: bool,
    /// Notes stored on the transaction.
    pub transaction_notes: Option<String>,
}

impl CreateMemberRequest {
    pub fn profile(&self) -> NewMemberProfile {
        NewMemberProfile {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            notes: self.notes.clone(),
        }
    }

    pub fn into_enrollment(self, package_id: PackageId) -> Result<EnrollMemberCommand, MembershipError> {
        Ok(EnrollMemberCommand {
            profile: self.profile(),
            package_id,
            payment_method_id: self.payment_method_id,
            amount: amount(self.amount)?,
            start_date: self.start_date,
            existing_member_id: self.existing_member_id,
            force_new: self.force_new,
            notes: self.transaction_notes,
        })
    }
}

/// Profile edit. An empty string clears an optional field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateMemberRequest> for MemberProfileUpdate {
    fn from(request: UpdateMemberRequest) -> Self {
        MemberProfileUpdate {
            name: request.name,
            phone: request.phone,
            email: request.email,
            notes: request.notes,
            is_active: request.is_active,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenewRequest {
    pub package_id: PackageId,
    pub payment_method_id: Option<PaymentMethodId>,
    pub amount: Option<i64>,
    pub notes: Option<String>,
}

impl RenewRequest {
    pub fn into_command(self, member_id: MemberId) -> Result<RenewMembershipCommand, MembershipError> {
        Ok(RenewMembershipCommand {
            member_id,
            package_id: self.package_id,
            payment_method_id: self.payment_method_id,
            amount: amount(self.amount)?,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayPassRequest {
    pub payment_method_id: Option<PaymentMethodId>,
    pub amount: Option<i64>,
    pub notes: Option<String>,
}

impl DayPassRequest {
    pub fn into_command(self, member_id: MemberId) -> Result<PurchaseDayPassCommand, MembershipError> {
        Ok(PurchaseDayPassCommand {
            member_id,
            payment_method_id: self.payment_method_id,
            amount: amount(self.amount)?,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddPeriodRequest {
    pub package_id: PackageId,
    pub start_date: Option<Timestamp>,
}

impl AddPeriodRequest {
    pub fn into_command(self, member_id: MemberId) -> AddPeriodCommand {
        AddPeriodCommand {
            member_id,
            package_id: self.package_id,
            start_date: self.start_date,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckInRequest {
    /// Buy a Day Pass when the member has no current entitlement.
    #[serde(default)]
    pub purchase_day_pass: bool,
    pub payment_method_id: Option<PaymentMethodId>,
    pub amount: Option<i64>,
}

impl CheckInRequest {
    pub fn into_command(self, member_id: MemberId) -> Result<CheckInCommand, MembershipError> {
        Ok(CheckInCommand {
            member_id,
            purchase_day_pass: self.purchase_day_pass,
            payment_method_id: self.payment_method_id,
            amount: amount(self.amount)?,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct MemberPageResponse {
    pub items: Vec<Member>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u64,
}

impl From<MemberPage> for MemberPageResponse {
    fn from(page: MemberPage) -> Self {
        let total_pages = page.total_pages();
        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            total_pages,
        }
    }
}

/// Result of `POST /api/members`.
#[derive(Debug, Clone, Serialize)]
pub struct MemberCreatedResponse {
    pub member: Member,
    pub period: Option<MembershipPeriod>,
    pub transaction: Option<Transaction>,
    /// False when an existing member was extended.
    pub created: bool,
}

impl From<EnrollMemberResult> for MemberCreatedResponse {
    fn from(result: EnrollMemberResult) -> Self {
        Self {
            member: result.member,
            period: Some(result.period),
            transaction: Some(result.transaction),
            created: result.created,
        }
    }
}

impl From<Member> for MemberCreatedResponse {
    fn from(member: Member) -> Self {
        Self {
            member,
            period: None,
            transaction: None,
            created: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberDetailResponse {
    #[serde(flatten)]
    pub member: Member,
    pub recent_check_ins: Vec<CheckIn>,
}

impl From<GetMemberResult> for MemberDetailResponse {
    fn from(result: GetMemberResult) -> Self {
        Self {
            member: result.member,
            recent_check_ins: result.recent_check_ins,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberStatusResponse {
    pub member_id: MemberId,
    pub membership_type: Option<String>,
    pub status: ContinuityStatus,
    pub days_remaining: i64,
    pub entitled_until: Option<Timestamp>,
    pub is_entitled: bool,
}

impl From<GetMemberStatusResult> for MemberStatusResponse {
    fn from(result: GetMemberStatusResult) -> Self {
        Self {
            member_id: result.member.id,
            membership_type: result.member.membership_type,
            status: result.continuity.status,
            days_remaining: result.continuity.days_remaining,
            entitled_until: result.continuity.entitled_until,
            is_entitled: result.continuity.is_entitled(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryPeriodResponse {
    #[serde(flatten)]
    pub period: MembershipPeriod,
    pub phase: PeriodPhase,
}

#[derive(Debug, Clone, Serialize)]
pub struct MembershipHistoryResponse {
    pub member_id: MemberId,
    /// Newest first.
    pub periods: Vec<HistoryPeriodResponse>,
    pub engagement: EngagementSummary,
}

impl From<GetMembershipHistoryResult> for MembershipHistoryResponse {
    fn from(result: GetMembershipHistoryResult) -> Self {
        Self {
            member_id: result.member.id,
            periods: result
                .entries
                .into_iter()
                .map(|entry| HistoryPeriodResponse {
                    period: entry.period,
                    phase: entry.phase,
                })
                .collect(),
            engagement: result.engagement,
        }
    }
}

/// A paid period and the member it was appended to.
#[derive(Debug, Clone, Serialize)]
pub struct SaleResponse {
    pub member: Member,
    pub period: MembershipPeriod,
    pub transaction: Transaction,
}

impl From<RenewMembershipResult> for SaleResponse {
    fn from(result: RenewMembershipResult) -> Self {
        Self {
            member: result.member,
            period: result.period,
            transaction: result.transaction,
        }
    }
}

impl From<PurchaseDayPassResult> for SaleResponse {
    fn from(result: PurchaseDayPassResult) -> Self {
        Self {
            member: result.member,
            period: result.period,
            transaction: result.transaction,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodGrantedResponse {
    pub member: Member,
    pub period: MembershipPeriod,
}

impl From<AddPeriodResult> for PeriodGrantedResponse {
    fn from(result: AddPeriodResult) -> Self {
        Self {
            member: result.member,
            period: result.period,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchasedPassResponse {
    pub period: MembershipPeriod,
    pub transaction: Transaction,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckInResponse {
    pub check_in: CheckIn,
    pub continuity: Continuity,
    pub purchased: Option<PurchasedPassResponse>,
}

impl From<CheckInResult> for CheckInResponse {
    fn from(result: CheckInResult) -> Self {
        Self {
            check_in: result.check_in,
            continuity: result.continuity,
            purchased: result.purchased.map(|p| PurchasedPassResponse {
                period: p.period,
                transaction: p.transaction,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_minimal_profile() {
        let request: CreateMemberRequest = serde_json::from_str(r#"{"name":"Ana"}"#).unwrap();
        assert_eq!(request.name, "Ana");
        assert!(request.package_id.is_none());
        assert!(!request.force_new);
    }

    #[test]
    fn negative_amount_is_rejected() {
        let request = DayPassRequest {
            amount: Some(-1),
            ..Default::default()
        };
        assert!(matches!(
            request.into_command(MemberId::new()),
            Err(MembershipError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn check_in_request_defaults_to_no_purchase() {
        let request: CheckInRequest = serde_json::from_str("{}").unwrap();
        let cmd = request.into_command(MemberId::new()).unwrap();
        assert!(!cmd.purchase_day_pass);
        assert!(cmd.amount.is_none());
    }

    #[test]
    fn list_params_are_clamped() {
        let query = MemberQuery::from(ListMembersParams {
            search: Some("  ".to_string()),
            page: Some(0),
            per_page: Some(500),
        });
        assert_eq!(query.search, None);
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 100);
    }
}
