pub mod commission;
pub mod dancer;
pub mod destination;
pub mod partner;
pub mod payout;
pub mod referral;
pub mod revenue;
pub mod submission;
#[cfg(test)]
pub mod test_utils;
pub mod transfer;

pub use commission::Commission;
pub use dancer::Dancer;
pub use destination::Destination;
pub use partner::Partner;
pub use payout::Payout;
pub use referral::Referral;
pub use revenue::Revenue;
pub use submission::Submission;

use crate::prelude::*;

/// Services bound to one connection.
pub struct Sv<'a> {
  pub commission: Commission<'a>,
  pub dancer: Dancer<'a>,
  pub destination: Destination<'a>,
  pub partner: Partner<'a>,
  pub payout: Payout<'a>,
  pub referral: Referral<'a>,
  pub revenue: Revenue<'a>,
  pub submission: Submission<'a>,
}

impl<'a> Sv<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self {
      commission: Commission::new(db),
      dancer: Dancer::new(db),
      destination: Destination::new(db),
      partner: Partner::new(db),
      payout: Payout::new(db),
      referral: Referral::new(db),
      revenue: Revenue::new(db),
      submission: Submission::new(db),
    }
  }
}
