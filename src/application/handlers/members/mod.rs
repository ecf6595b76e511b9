//! Member handlers.
//!
//! ## Commands
//! - Registering a profile without a period
//! - Editing profile fields
//! - Deleting a member with their ledger
//!
//! ## Queries
//! - Profile with recent visits
//! - Current status (continuity)
//! - Full history with engagement statistics
//! - Paged, searchable listing

mod delete_member;
mod get_member;
mod get_member_status;
mod get_membership_history;
mod list_members;
mod register_member;
mod update_member;

// Commands
pub use delete_member::{DeleteMemberCommand, DeleteMemberHandler};
pub use register_member::{RegisterMemberCommand, RegisterMemberHandler};
pub use update_member::{UpdateMemberCommand, UpdateMemberHandler};

// Queries
pub use get_member::{GetMemberHandler, GetMemberQuery, GetMemberResult};
pub use get_member_status::{GetMemberStatusHandler, GetMemberStatusQuery, GetMemberStatusResult};
pub use get_membership_history::{
    GetMembershipHistoryHandler, GetMembershipHistoryQuery, GetMembershipHistoryResult,
    HistoryEntry,
};
pub use list_members::ListMembersHandler;
