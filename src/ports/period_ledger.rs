//! Period ledger ports.
//!
//! Reading history is non-transactional. Every write that creates a period
//! goes through [`LedgerWriter::commit`], which applies all of one request's
//! writes in a single storage transaction.
//!
//! # Example
//!
//! ```ignore
//! let history = ledger.find_periods_by_member(&member_id).await?;
//! let bounds = policy.compute_new_period(duration, &history, now, None)?;
//! let period = MembershipPeriod::open(PeriodId::new(), member_id, bounds, ...)?;
//! let cache = MemberCache::from_ledger(&[history, vec![period.clone()]].concat());
//! writer.commit(LedgerWrite::period(period, cache, now)).await?;
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MemberId, Timestamp};
use crate::domain::membership::{CheckIn, Member, MemberCache, MembershipPeriod, Transaction};

/// Read access to the append-only period ledger.
#[async_trait]
pub trait PeriodLedger: Send + Sync {
    /// All periods ever held by the member, in no particular order.
    ///
    /// Periods paid for by a transaction carry its id and amount.
    async fn find_periods_by_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<MembershipPeriod>, DomainError>;
}

/// Everything one request writes alongside a new period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerWrite {
    /// Inserted first when the request registered the member.
    pub new_member: Option<Member>,
    pub transaction: Option<Transaction>,
    pub period: MembershipPeriod,
    pub check_in: Option<CheckIn>,
    /// Resynced cache for `period.member_id`, derived from the ledger
    /// including `period`.
    pub cache: MemberCache,
    pub recorded_at: Timestamp,
}

impl LedgerWrite {
    pub fn period(period: MembershipPeriod, cache: MemberCache, recorded_at: Timestamp) -> Self {
        Self {
            new_member: None,
            transaction: None,
            period,
            check_in: None,
            cache,
            recorded_at,
        }
    }

    pub fn with_new_member(mut self, member: Member) -> Self {
        self.new_member = Some(member);
        self
    }

    pub fn with_transaction(mut self, transaction: Transaction) -> Self {
        self.transaction = Some(transaction);
        self
    }

    pub fn with_check_in(mut self, check_in: CheckIn) -> Self {
        self.check_in = Some(check_in);
        self
    }

    pub fn member_id(&self) -> MemberId {
        self.period.member_id
    }
}

/// Atomic write primitive for the ledger.
#[async_trait]
pub trait LedgerWriter: Send + Sync {
    /// Applies every part of `write` or none of it.
    ///
    /// Order: new member, transaction, period, check-in, member cache.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member doesn't exist and none is being created
    /// - `DatabaseError` on persistence failure (nothing is written)
    async fn commit(&self, write: LedgerWrite) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_ports_are_object_safe() {
        fn _accepts_ledger(_ledger: &dyn PeriodLedger) {}
        fn _accepts_writer(_writer: &dyn LedgerWriter) {}
    }
}
