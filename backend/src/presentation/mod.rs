//! Presentation helpers shared by inbound adapters.
//!
//! Pure functions that turn domain values into what a client renders:
//! partner branding and welcome text. Nothing here touches storage, and the
//! domain never sees the results.

mod greeting;
mod partner_assets;

pub use greeting::{Greeting, greeting};
pub use partner_assets::{FALLBACK_PARTNER_NAME, PartnerAssets, display_partner, partner_assets};
