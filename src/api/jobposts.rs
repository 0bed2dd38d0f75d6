use crate::api::{call, json_body};
use crate::error::ClientResult;
use crate::gateway::{Gateway, RequestOptions};
use crate::models::{JobPost, NewJobPost};

pub struct JobPostsApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> JobPostsApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> ClientResult<Vec<JobPost>> {
        call(self.gateway, "v1/jobposts/", RequestOptions::get(), "Failed to fetch job posts").await
    }

    pub async fn create(&self, job_post: &NewJobPost) -> ClientResult<JobPost> {
        let options = RequestOptions::post(json_body(job_post)?);
        call(self.gateway, "v1/jobposts/", options, "Failed to create job post").await
    }

    pub async fn update(&self, job_id: i64, job_post: &NewJobPost) -> ClientResult<JobPost> {
        let options = RequestOptions::put(json_body(job_post)?);
        let path = format!("v1/jobposts/{}", job_id);
        call(self.gateway, &path, options, "Failed to update job post").await
    }
}
