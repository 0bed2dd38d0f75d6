use crate::api::{call, json_body};
use crate::error::ClientResult;
use crate::gateway::{Gateway, RequestOptions};
use crate::models::{Candidate, NewCandidate};

/// Offset pagination as the candidates endpoint expects it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: 10 }
    }
}

pub struct CandidatesApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> CandidatesApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, page: Page) -> ClientResult<Vec<Candidate>> {
        let path = format!("v1/candidates/?skip={}&limit={}", page.skip, page.limit);
        call(self.gateway, &path, RequestOptions::get(), "Failed to fetch candidates").await
    }

    pub async fn create(&self, candidate: &NewCandidate) -> ClientResult<Candidate> {
        let options = RequestOptions::post(json_body(candidate)?);
        call(self.gateway, "v1/candidates/", options, "Failed to create candidate").await
    }

    pub async fn update(&self, candidate_id: i64, candidate: &NewCandidate) -> ClientResult<Candidate> {
        let options = RequestOptions::put(json_body(candidate)?);
        let path = format!("v1/candidates/{}", candidate_id);
        call(self.gateway, &path, options, "Failed to update candidate").await
    }
}
