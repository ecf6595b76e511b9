//! EnrollMemberHandler - Command handler for the front-desk enrollment form.
//!
//! The request is resolved once into an [`EnrollmentIntent`]: register a new
//! member, or extend the member the phone number (or an explicit selection)
//! points at. The member, transaction, period and cache are then committed in
//! one ledger write.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, Money, PackageId, PaymentMethodId, Timestamp};
use crate::domain::membership::{
    normalize_phone, EnrollmentIntent, Member, MembershipError, MembershipPeriod, MembershipRules,
    NewMemberProfile, Transaction,
};
use crate::ports::{
    Clock, LedgerWrite, LedgerWriter, MemberRepository, PackageRepository,
    PaymentMethodRepository, PeriodLedger,
};

use super::ledger_plan::{
    ensure_payment_method, load_member, load_sellable_package, plan_sale, Sale,
};

/// Command to enroll a member in a package.
#[derive(Debug, Clone)]
pub struct EnrollMemberCommand {
    pub profile: NewMemberProfile,
    pub package_id: PackageId,
    pub payment_method_id: Option<PaymentMethodId>,
    /// Overrides the package price.
    pub amount: Option<Money>,
    /// Start of the first period. Only valid for a member with no history.
    pub start_date: Option<Timestamp>,
    /// Extend this member instead of matching by phone.
    pub existing_member_id: Option<MemberId>,
    /// Register a new member even if the phone number is taken.
    pub force_new: bool,
    pub notes: Option<String>,
}

/// Result of a successful enrollment.
#[derive(Debug, Clone)]
pub struct EnrollMemberResult {
    /// The member with its cache resynced.
    pub member: Member,
    pub period: MembershipPeriod,
    pub transaction: Transaction,
    /// True when a new member was registered.
    pub created: bool,
}

pub struct EnrollMemberHandler {
    members: Arc<dyn MemberRepository>,
    packages: Arc<dyn PackageRepository>,
    payment_methods: Arc<dyn PaymentMethodRepository>,
    ledger: Arc<dyn PeriodLedger>,
    writer: Arc<dyn LedgerWriter>,
    clock: Arc<dyn Clock>,
    rules: MembershipRules,
}

impl EnrollMemberHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        packages: Arc<dyn PackageRepository>,
        payment_methods: Arc<dyn PaymentMethodRepository>,
        ledger: Arc<dyn PeriodLedger>,
        writer: Arc<dyn LedgerWriter>,
        clock: Arc<dyn Clock>,
        rules: MembershipRules,
    ) -> Self {
        Self {
            members,
            packages,
            payment_methods,
            ledger,
            writer,
            clock,
            rules,
        }
    }

    pub async fn handle(&self, cmd: EnrollMemberCommand) -> Result<EnrollMemberResult, MembershipError> {
        let now = self.clock.now();

        // 1. Validate what is being sold
        let package = load_sellable_package(self.packages.as_ref(), cmd.package_id).await?;
        ensure_payment_method(self.payment_methods.as_ref(), cmd.payment_method_id).await?;

        // 2. Decide which member this applies to
        let phone = normalize_phone(cmd.profile.phone.clone());
        let phone_matches: Vec<MemberId> = match &phone {
            Some(phone) if !cmd.force_new && cmd.existing_member_id.is_none() => self
                .members
                .find_by_phone(phone)
                .await?
                .into_iter()
                .map(|m| m.id)
                .collect(),
            _ => Vec::new(),
        };
        let intent = EnrollmentIntent::resolve(&phone_matches, cmd.existing_member_id, cmd.force_new);

        let (mut member, history, created) = match intent {
            EnrollmentIntent::NewMember => {
                let member = Member::register(MemberId::new(), cmd.profile, now)?;
                (member, Vec::new(), true)
            }
            EnrollmentIntent::ExtendExistingMember(member_id) => {
                let member = load_member(self.members.as_ref(), member_id).await?;
                let history = self.ledger.find_periods_by_member(&member_id).await?;
                (member, history, false)
            }
            EnrollmentIntent::ConflictRequiresDisambiguation(candidates) => {
                tracing::info!(candidates = candidates.len(), "Enrollment phone matches several members");
                return Err(MembershipError::PhoneConflict {
                    phone: phone.unwrap_or_default(),
                    candidates,
                });
            }
        };

        // 3. Compute the period and its payment
        let sale = Sale {
            package,
            payment_method_id: cmd.payment_method_id,
            amount: cmd.amount,
            notes: cmd.notes,
        };
        let planned = plan_sale(&self.rules, member.id, &history, sale, cmd.start_date, now)?;
        let transaction = planned
            .transaction
            .clone()
            .ok_or_else(|| MembershipError::PersistenceFailure("sale produced no transaction".to_string()))?;

        // 4. Commit everything at once
        let mut write = LedgerWrite::period(planned.period.clone(), planned.cache.clone(), now)
            .with_transaction(transaction.clone());
        if created {
            write = write.with_new_member(member.clone());
        }
        self.writer.commit(write).await?;
        member.apply_cache(&planned.cache, now);

        tracing::info!(
            member_id = %member.id,
            package = %planned.period.package_name,
            period_start = %planned.period.start.to_rfc3339(),
            period_end = %planned.period.end.to_rfc3339(),
            created,
            "Member enrolled"
        );

        Ok(EnrollMemberResult {
            member,
            period: planned.period,
            transaction,
            created,
        })
    }
}
