//! Plain records owned by the remote API.
//!
//! The client never holds authoritative copies of these; anything kept in
//! memory is a cache invalidated by refetching after a mutation.

pub mod class;
pub mod institution;
pub mod member;
pub mod parent;
pub mod portfolio;
pub mod student;
pub mod student_code;
pub mod tablet;
pub mod user;

pub use class::{Class, ClassInput};
pub use institution::{Institution, InstitutionInput};
pub use member::{AddMemberRequest, Member, UpdateMemberRoleRequest};
pub use parent::{InstitutionParent, InviteParentRequest, ParentStatus};
pub use portfolio::{ContentItem, ContentItemDraft, ContentKind, Portfolio, PortfolioDraft};
pub use student::{Student, StudentInput};
pub use student_code::{GenerateStudentCodesRequest, StudentCode};
pub use tablet::{AssignClassRequest, SharedTablet, SharedTabletInput};
pub use user::UserSummary;
