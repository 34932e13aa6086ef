//! Domain models of the Procuret API.
//!
//! Each type decodes from the integer-safe JSON the dispatcher returns; the
//! types with their own endpoints (`InstalmentLink`, `ProspectivePayment`)
//! also expose the operations that fetch or create them.

pub mod amount;
pub mod currency;
pub mod disposition;
pub mod entity_headline;
pub mod instalment_link;
pub mod order;
pub mod prospective_payment;

pub use amount::Amount;
pub use currency::Currency;
pub use disposition::Disposition;
pub use entity_headline::EntityHeadline;
pub use instalment_link::{
    InstalmentLink, InstalmentLinkOpen, InstalmentLinkOrderBy, InstalmentLinkQuery,
    NewInstalmentLink,
};
pub use order::Order;
pub use prospective_payment::ProspectivePayment;
