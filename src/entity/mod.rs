pub mod dancer;
pub mod partner;
pub mod partner_commission;
pub mod payout;
pub mod payout_destination;
pub mod referral;
pub mod revenue_event;
pub mod submission;

pub use partner_commission::CommissionStatus;
pub use submission::ReviewStatus;
