//! Partner branding lookup.
//!
//! Exact, case-sensitive match on the partner name. Unknown partners get
//! empty assets rather than an error.

use serde::Serialize;

use crate::domain::Partner;

/// Label shown when a partner has no name.
pub const FALLBACK_PARTNER_NAME: &str = "Partner";

const TERVEYSTALO_LOGO: &str = r##"<svg viewBox="0 0 80 80" xmlns="http://www.w3.org/2000/svg" width="72" height="72">
  <circle cx="40" cy="40" r="38" fill="#005b8e" stroke="white" stroke-width="1.5"/>
  <text x="40" y="34" text-anchor="middle" fill="white" font-size="9" font-family="Arial" font-weight="bold">TERVEYSTALO</text>
  <path d="M28 42 h24 M40 30 v24" stroke="white" stroke-width="5" stroke-linecap="round"/>
</svg>"##;

const MEHILAINEN_LOGO: &str = r##"<svg viewBox="0 0 80 80" xmlns="http://www.w3.org/2000/svg" width="72" height="72">
  <circle cx="40" cy="40" r="38" fill="#e8890c" stroke="white" stroke-width="1.5"/>
  <text x="40" y="36" text-anchor="middle" fill="white" font-size="8" font-family="Arial" font-weight="bold">MEHILÄINEN</text>
  <ellipse cx="40" cy="50" rx="10" ry="7" fill="white" opacity="0.9"/>
  <circle cx="40" cy="46" r="4" fill="#e8890c"/>
  <line x1="40" y1="28" x2="40" y2="38" stroke="white" stroke-width="2.5" stroke-linecap="round"/>
  <line x1="32" y1="32" x2="40" y2="38" stroke="white" stroke-width="2.5" stroke-linecap="round"/>
  <line x1="48" y1="32" x2="40" y2="38" stroke="white" stroke-width="2.5" stroke-linecap="round"/>
</svg>"##;

const LOVNITY_PARTNER_LOGO: &str = r##"<svg viewBox="0 0 80 80" xmlns="http://www.w3.org/2000/svg" width="72" height="72">
  <circle cx="40" cy="40" r="38" fill="#8b5cf6" stroke="white" stroke-width="1.5"/>
  <text x="40" y="44" text-anchor="middle" fill="white" font-size="12" font-family="Arial" font-weight="bold">LOVNITY</text>
</svg>"##;

const KNOWN_PARTNERS: &[(&str, &str)] = &[
    ("Terveystalo", TERVEYSTALO_LOGO),
    ("Mehiläinen", MEHILAINEN_LOGO),
    ("Lovnity Partner", LOVNITY_PARTNER_LOGO),
];

/// Locally known branding for a partner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartnerAssets {
    /// Inline SVG markup; empty when the partner is unknown.
    pub logo: String,
}

/// Resolve assets for a partner name.
///
/// # Examples
/// ```
/// use backend::presentation::partner_assets;
///
/// assert!(partner_assets("Terveystalo").logo.starts_with("<svg"));
/// assert!(partner_assets("terveystalo").logo.is_empty());
/// ```
pub fn partner_assets(name: &str) -> PartnerAssets {
    KNOWN_PARTNERS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, logo)| PartnerAssets {
            logo: (*logo).to_owned(),
        })
        .unwrap_or_default()
}

/// Partner as shown to clients: a blank name renders as
/// [`FALLBACK_PARTNER_NAME`].
pub fn display_partner(partner: &Partner) -> Partner {
    if partner.name.trim().is_empty() {
        Partner {
            name: FALLBACK_PARTNER_NAME.to_owned(),
            ..partner.clone()
        }
    } else {
        partner.clone()
    }
}
