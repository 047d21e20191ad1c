//! Plain-text rendering of claims, summaries and profile settings

use std::io::{self, Write};

use folio::{FallbackReason, LoadedClaims, Provenance};
use folio_core::{Claim, PortfolioSummary, ProfileSettings};

pub fn stars_bar(stars: Option<u8>) -> String {
    let filled = usize::from(stars.unwrap_or(0).min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn source_label(provenance: Provenance) -> &'static str {
    match provenance {
        Provenance::Backend => "claims API",
        Provenance::Local => "local storage",
    }
}

pub fn write_claim(out: &mut impl Write, claim: &Claim) -> io::Result<()> {
    writeln!(
        out,
        "{:>14}  {}  {:<14} {:<18} {}",
        claim.id,
        stars_bar(claim.stars),
        claim.aspect.as_deref().unwrap_or("-"),
        claim.claim_type,
        claim.statement
    )
}

pub fn write_loaded(out: &mut impl Write, loaded: &LoadedClaims) -> io::Result<()> {
    match &loaded.fallback {
        Some(FallbackReason::RemoteFailed(e)) => {
            writeln!(out, "claims API unavailable ({}), showing local claims", e)?
        }
        Some(FallbackReason::NotEligible) | None => {}
    }

    if loaded.claims.is_empty() {
        return writeln!(out, "no claims in {}", source_label(loaded.provenance));
    }
    for claim in &loaded.claims {
        write_claim(out, claim)?;
    }
    writeln!(
        out,
        "{} claims from {}",
        loaded.claims.len(),
        source_label(loaded.provenance)
    )
}

pub fn write_summary(out: &mut impl Write, summary: &PortfolioSummary) -> io::Result<()> {
    writeln!(out, "claims:         {}", summary.count)?;
    writeln!(out, "average rating: {}", summary.average_rating_label())?;

    if !summary.category_breakdown.is_empty() {
        writeln!(out, "categories:")?;
        for bucket in &summary.category_breakdown {
            writeln!(out, "  {:<16} {}", bucket.category, bucket.count)?;
        }
    }

    writeln!(out, "ratings:")?;
    for stars in (1..=5u8).rev() {
        writeln!(out, "  {}  {}", stars_bar(Some(stars)), summary.rated(stars))?;
    }
    Ok(())
}

pub fn write_profile(out: &mut impl Write, profile: &ProfileSettings) -> io::Result<()> {
    let or_unset = |s: &str| if s.is_empty() { "(not set)".to_string() } else { s.to_string() };
    writeln!(out, "name: {}", or_unset(&profile.display_name))?;
    writeln!(out, "bio:  {}", or_unset(&profile.bio))
}
