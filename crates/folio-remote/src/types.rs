//! Response envelopes of the claims API

use folio_core::Claim;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// A list response: the API answers either with a bare array or with an
/// object wrapping the array in `claims` (optionally with paging metadata).
///
/// The envelope is decoded first with raw JSON elements; each element is
/// then decoded on its own so one malformed record cannot empty the list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RemoteListResponse<T = Claim> {
    Bare(Vec<T>),
    Wrapped {
        claims: Vec<T>,
        #[serde(default)]
        page: Option<u32>,
        #[serde(default)]
        limit: Option<u32>,
        #[serde(default)]
        total: Option<u64>,
    },
}

impl<T> RemoteListResponse<T> {
    pub fn into_claims(self) -> Vec<T> {
        match self {
            RemoteListResponse::Bare(claims) => claims,
            RemoteListResponse::Wrapped { claims, .. } => claims,
        }
    }

    pub fn total(&self) -> Option<u64> {
        match self {
            RemoteListResponse::Bare(_) => None,
            RemoteListResponse::Wrapped { total, .. } => *total,
        }
    }

    fn map_claims<U>(self, f: impl FnOnce(Vec<T>) -> Vec<U>) -> RemoteListResponse<U> {
        match self {
            RemoteListResponse::Bare(claims) => RemoteListResponse::Bare(f(claims)),
            RemoteListResponse::Wrapped {
                claims,
                page,
                limit,
                total,
            } => RemoteListResponse::Wrapped {
                claims: f(claims),
                page,
                limit,
                total,
            },
        }
    }
}

/// Parse a successful list body into a plain claims array.
///
/// Any shape other than the two envelopes yields an empty list and a
/// warning; it is never an error. Elements that are not claims are
/// skipped with a warning.
pub fn normalize_list(body: &str) -> Vec<Claim> {
    parse_list(body)
        .map(RemoteListResponse::into_claims)
        .unwrap_or_default()
}

pub(crate) fn parse_list(body: &str) -> Option<RemoteListResponse> {
    let raw = match serde_json::from_str::<RemoteListResponse<Value>>(body) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "unrecognized claims list response, treating as empty");
            return None;
        }
    };
    Some(raw.map_claims(decode_claims))
}

fn decode_claims(items: Vec<Value>) -> Vec<Claim> {
    let received = items.len();
    let claims: Vec<Claim> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Claim>(item) {
            Ok(claim) => Some(claim),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed claim in list response");
                None
            }
        })
        .collect();
    if claims.len() < received {
        warn!(
            received,
            kept = claims.len(),
            "claims list response had malformed records"
        );
    }
    claims
}

/// A create response: the created claim itself or `{ "claim": {...} }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CreateResponse {
    Claim(Claim),
    Wrapped { claim: Claim },
}

impl CreateResponse {
    pub fn into_claim(self) -> Claim {
        match self {
            CreateResponse::Claim(claim) => claim,
            CreateResponse::Wrapped { claim } => claim,
        }
    }
}

/// One page of claims issued by a user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssuerPage {
    pub claims: Vec<Claim>,
    pub page: u32,
    pub limit: u32,
    /// Total number of claims by this issuer, when the API reports it
    pub total: Option<u64>,
}

impl IssuerPage {
    /// Whether another page is likely to exist.
    pub fn has_more(&self) -> bool {
        match self.total {
            Some(total) => u64::from(self.page) * u64::from(self.limit) < total,
            None => self.limit > 0 && self.claims.len() as u32 >= self.limit,
        }
    }
}
