//! Claim type definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::rating::{resolve_score, stars_to_score};
use crate::uri::normalize_uri;

/// How the issuer knows what the claim asserts.
///
/// Folio itself only ever writes `FirstHand`; the other values exist because
/// the claims API admits them and remote records may carry them. Unknown
/// values from the server decode as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HowKnown {
    #[default]
    FirstHand,
    SecondHand,
    WebDocument,
    VerifiedLogin,
    SignedDocument,
    PhysicalDocument,
    Integration,
    Research,
    Opinion,
    #[serde(other)]
    Other,
}

impl HowKnown {
    /// Wire name, e.g. `"FIRST_HAND"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HowKnown::FirstHand => "FIRST_HAND",
            HowKnown::SecondHand => "SECOND_HAND",
            HowKnown::WebDocument => "WEB_DOCUMENT",
            HowKnown::VerifiedLogin => "VERIFIED_LOGIN",
            HowKnown::SignedDocument => "SIGNED_DOCUMENT",
            HowKnown::PhysicalDocument => "PHYSICAL_DOCUMENT",
            HowKnown::Integration => "INTEGRATION",
            HowKnown::Research => "RESEARCH",
            HowKnown::Opinion => "OPINION",
            HowKnown::Other => "OTHER",
        }
    }
}

impl fmt::Display for HowKnown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HowKnown {
    type Err = String;

    /// Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        [
            HowKnown::FirstHand,
            HowKnown::SecondHand,
            HowKnown::WebDocument,
            HowKnown::VerifiedLogin,
            HowKnown::SignedDocument,
            HowKnown::PhysicalDocument,
            HowKnown::Integration,
            HowKnown::Research,
            HowKnown::Opinion,
            HowKnown::Other,
        ]
        .into_iter()
        .find(|h| h.as_str() == wanted)
        .ok_or_else(|| format!("unknown how-known value: {}", s))
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A persisted claim.
///
/// `id` is unique within the store that owns the claim: client generated for
/// local claims, server assigned for remote ones. `created_at` is stamped
/// once at creation and never rewritten by [`Claim::apply_patch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: i64,

    /// Absolute URI of the entity the claim is about
    pub subject: String,

    /// Kind of assertion (e.g. "HAS_SKILL", "COMPLETED_PROJECT")
    pub claim_type: String,

    /// Free-text description
    #[serde(default, deserialize_with = "null_as_default")]
    pub statement: String,

    /// ISO-8601 date the achievement happened
    #[serde(default, deserialize_with = "null_as_default")]
    pub effective_date: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub how_known: HowKnown,

    /// 1-5 star rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u8>,

    /// Trust score in [-1, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Category label (e.g. "project", "skill", "certification")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect: Option<String>,

    /// RFC 3339 creation timestamp
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl Claim {
    /// Materialize an input into a claim with the given identity and creation time.
    ///
    /// The input is taken as-is; call [`ClaimInput::normalized`] first when it
    /// has not been through the normalizers yet.
    pub fn from_input(id: i64, input: ClaimInput, created_at: impl Into<String>) -> Self {
        Self {
            id,
            subject: input.subject,
            claim_type: input.claim_type,
            statement: input.statement,
            effective_date: input.effective_date,
            how_known: input.how_known,
            stars: input.stars,
            score: input.score,
            aspect: input.aspect,
            created_at: created_at.into(),
        }
    }

    /// Apply a patch to the mutable fields. `id` and `created_at` are untouched.
    ///
    /// A new star rating re-derives the score unless the patch also carries an
    /// explicit score. A score on its own overrides the stored score.
    pub fn apply_patch(&mut self, patch: &ClaimPatch) {
        if let Some(subject) = &patch.subject {
            self.subject = normalize_uri(subject);
        }
        if let Some(claim_type) = &patch.claim_type {
            self.claim_type = claim_type.clone();
        }
        if let Some(statement) = &patch.statement {
            self.statement = statement.clone();
        }
        if let Some(effective_date) = &patch.effective_date {
            self.effective_date = effective_date.clone();
        }
        if let Some(how_known) = patch.how_known {
            self.how_known = how_known;
        }
        if let Some(aspect) = &patch.aspect {
            self.aspect = Some(aspect.clone());
        }
        match (patch.stars, patch.score) {
            (Some(stars), score) => {
                self.stars = Some(stars);
                self.score = Some(score.unwrap_or_else(|| stars_to_score(stars)));
            }
            (None, Some(score)) => self.score = Some(score),
            (None, None) => {}
        }
    }

    /// The input this claim would be re-created from (used when copying
    /// claims between stores).
    pub fn to_input(&self) -> ClaimInput {
        ClaimInput {
            subject: self.subject.clone(),
            claim_type: self.claim_type.clone(),
            statement: self.statement.clone(),
            effective_date: self.effective_date.clone(),
            how_known: self.how_known,
            stars: self.stars,
            score: self.score,
            aspect: self.aspect.clone(),
        }
    }
}

/// Everything needed to create a claim; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimInput {
    pub subject: String,
    pub claim_type: String,
    pub statement: String,
    pub effective_date: String,
    #[serde(default)]
    pub how_known: HowKnown,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect: Option<String>,
}

impl ClaimInput {
    /// Run the subject and rating normalizers over the input.
    pub fn normalized(mut self) -> Self {
        self.subject = normalize_uri(&self.subject);
        self.score = resolve_score(self.stars, self.score);
        self
    }
}

/// Partial update of a claim's mutable fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how_known: Option<HowKnown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect: Option<String>,
}

impl ClaimPatch {
    /// Normalize the patch the same way [`Claim::apply_patch`] would, so a
    /// remote update carries the same subject and score a local one stores.
    pub fn normalized(mut self) -> Self {
        if let Some(subject) = self.subject.take() {
            self.subject = Some(normalize_uri(&subject));
        }
        if self.stars.is_some() {
            self.score = resolve_score(self.stars, self.score);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Builder for claim inputs
#[derive(Debug, Default)]
pub struct ClaimBuilder {
    input: ClaimInput,
}

impl ClaimBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.input.subject = subject.into();
        self
    }

    pub fn claim_type(mut self, claim_type: impl Into<String>) -> Self {
        self.input.claim_type = claim_type.into();
        self
    }

    pub fn statement(mut self, statement: impl Into<String>) -> Self {
        self.input.statement = statement.into();
        self
    }

    pub fn effective_date(mut self, effective_date: impl Into<String>) -> Self {
        self.input.effective_date = effective_date.into();
        self
    }

    pub fn how_known(mut self, how_known: HowKnown) -> Self {
        self.input.how_known = how_known;
        self
    }

    pub fn stars(mut self, stars: u8) -> Self {
        self.input.stars = Some(stars);
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.input.score = Some(score);
        self
    }

    pub fn aspect(mut self, aspect: impl Into<String>) -> Self {
        self.input.aspect = Some(aspect.into());
        self
    }

    pub fn build(self) -> ClaimInput {
        self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_input() -> ClaimInput {
        ClaimBuilder::new()
            .subject("example.com/alice")
            .claim_type("HAS_SKILL")
            .statement("Rust")
            .effective_date("2024-01-01")
            .stars(3)
            .aspect("skill")
            .build()
    }

    #[test]
    fn test_builder() {
        let input = sample_input();
        assert_eq!(input.subject, "example.com/alice");
        assert_eq!(input.claim_type, "HAS_SKILL");
        assert_eq!(input.how_known, HowKnown::FirstHand);
        assert_eq!(input.stars, Some(3));
        assert_eq!(input.score, None);
        assert_eq!(input.aspect.as_deref(), Some("skill"));
    }

    #[test]
    fn test_normalized_input() {
        let input = sample_input().normalized();
        assert_eq!(input.subject, "https://example.com/alice");
        assert_eq!(input.score, Some(stars_to_score(3)));
    }

    #[test]
    fn test_explicit_score_survives_normalization() {
        let input = ClaimBuilder::new()
            .subject("https://x")
            .stars(5)
            .score(0.1)
            .build()
            .normalized();
        assert_eq!(input.score, Some(0.1));
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let claim = Claim::from_input(7, sample_input().normalized(), "2024-01-02T00:00:00+00:00");
        let json = serde_json::to_value(&claim).unwrap();
        assert_eq!(json["claimType"], "HAS_SKILL");
        assert_eq!(json["effectiveDate"], "2024-01-01");
        assert_eq!(json["howKnown"], "FIRST_HAND");
        assert_eq!(json["createdAt"], "2024-01-02T00:00:00+00:00");
        assert!(json.get("claim_type").is_none());
    }

    #[test]
    fn test_absent_optionals_omitted() {
        let input = ClaimBuilder::new().subject("https://x").build();
        let json = serde_json::to_value(&input).unwrap();
        assert!(json.get("stars").is_none());
        assert!(json.get("score").is_none());
        assert!(json.get("aspect").is_none());
    }

    #[test]
    fn test_how_known_from_str() {
        assert_eq!("first_hand".parse::<HowKnown>().unwrap(), HowKnown::FirstHand);
        assert_eq!("web-document".parse::<HowKnown>().unwrap(), HowKnown::WebDocument);
        assert_eq!(HowKnown::SignedDocument.to_string(), "SIGNED_DOCUMENT");
        assert!("rumor".parse::<HowKnown>().is_err());
    }

    #[test]
    fn test_unknown_how_known_decodes_as_other() {
        let json = r#"{"id":1,"subject":"https://x","claimType":"HAS_SKILL","howKnown":"TELEPATHY"}"#;
        let claim: Claim = serde_json::from_str(json).unwrap();
        assert_eq!(claim.how_known, HowKnown::Other);
        assert_eq!(claim.statement, "");
        assert_eq!(claim.created_at, "");
    }

    #[test]
    fn test_null_text_fields_decode_as_empty() {
        let json = r#"{"id":3,"subject":"https://x","claimType":"HAS_SKILL",
            "statement":null,"effectiveDate":null,"howKnown":null,"createdAt":null,"stars":null}"#;
        let claim: Claim = serde_json::from_str(json).unwrap();
        assert_eq!(claim.statement, "");
        assert_eq!(claim.effective_date, "");
        assert_eq!(claim.how_known, HowKnown::FirstHand);
        assert_eq!(claim.created_at, "");
        assert_eq!(claim.stars, None);
    }

    #[test]
    fn test_apply_patch_rederives_score() {
        let mut claim = Claim::from_input(1, sample_input().normalized(), "t0");
        claim.apply_patch(&ClaimPatch {
            stars: Some(5),
            statement: Some("Rust and Go".into()),
            ..Default::default()
        });
        assert_eq!(claim.stars, Some(5));
        assert_eq!(claim.score, Some(1.0));
        assert_eq!(claim.statement, "Rust and Go");
        assert_eq!(claim.created_at, "t0");
        assert_eq!(claim.id, 1);
    }

    #[test]
    fn test_apply_patch_score_override() {
        let mut claim = Claim::from_input(1, sample_input().normalized(), "t0");
        claim.apply_patch(&ClaimPatch {
            score: Some(-0.9),
            ..Default::default()
        });
        assert_eq!(claim.stars, Some(3));
        assert_eq!(claim.score, Some(-0.9));

        claim.apply_patch(&ClaimPatch {
            stars: Some(1),
            score: Some(0.5),
            ..Default::default()
        });
        assert_eq!(claim.score, Some(0.5));
    }

    #[test]
    fn test_apply_patch_normalizes_subject() {
        let mut claim = Claim::from_input(1, sample_input().normalized(), "t0");
        claim.apply_patch(&ClaimPatch {
            subject: Some("example.org/bob".into()),
            ..Default::default()
        });
        assert_eq!(claim.subject, "https://example.org/bob");
    }

    #[test]
    fn test_patch_normalized() {
        let patch = ClaimPatch {
            subject: Some("example.org".into()),
            stars: Some(4),
            ..Default::default()
        }
        .normalized();
        assert_eq!(patch.subject.as_deref(), Some("https://example.org"));
        assert_eq!(patch.score, Some(0.6));
        assert!(!patch.is_empty());
        assert!(ClaimPatch::default().is_empty());
    }

    #[test]
    fn test_to_input_roundtrip() {
        let input = sample_input().normalized();
        let claim = Claim::from_input(3, input.clone(), "t0");
        assert_eq!(claim.to_input(), input);
    }
}
