// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Backend API client.
//!
//! Thin blocking HTTP wrapper over the Drizz store. Callers run it on a
//! background thread and report the outcome over a channel; failures are
//! surfaced once and never retried, and they never touch local
//! annotation state. Timeouts ride on the transport defaults.

use crate::error::DrizzError;
use crate::io::export::AnnotationPayload;
use crate::models::project::ProjectSummary;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

#[derive(Debug, Serialize)]
struct SaveRequest<'a> {
    project_id: &'a str,
    annotations: &'a AnnotationPayload,
}

#[derive(Debug, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub annotation_short_id: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    success: bool,
    #[serde(default)]
    projects: Vec<ProjectSummary>,
}

#[derive(Debug, Deserialize)]
pub struct SavedAnnotations {
    pub success: bool,
    #[serde(default)]
    pub annotations: Option<AnnotationPayload>,
    #[serde(default)]
    pub message: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Base URL from `DRIZZ_API_URL`, falling back to localhost.
    pub fn from_env() -> Self {
        let base = std::env::var("DRIZZ_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Persist a curated selection keyed by project id. The backend
    /// upserts one annotation record per project.
    pub fn save_annotations(
        &self,
        project_id: &str,
        payload: &AnnotationPayload,
    ) -> Result<SaveResponse, DrizzError> {
        let request = SaveRequest {
            project_id,
            annotations: payload,
        };
        let response = self
            .http
            .post(self.endpoint("api/save-annotations"))
            .json(&request)
            .send()?;
        let response = check_status(response)?;
        let body: SaveResponse = response.json()?;
        if !body.success {
            return Err(DrizzError::Network(format!(
                "save rejected: {}",
                body.message
            )));
        }
        Ok(body)
    }

    pub fn list_projects(&self) -> Result<Vec<ProjectSummary>, DrizzError> {
        let response = self.http.get(self.endpoint("api/list-projects")).send()?;
        let response = check_status(response)?;
        let body: ListResponse = response.json()?;
        if !body.success {
            return Err(DrizzError::Network("project listing failed".to_string()));
        }
        Ok(body.projects)
    }

    pub fn get_saved_annotations(&self, project_id: &str) -> Result<SavedAnnotations, DrizzError> {
        let response = self
            .http
            .get(self.endpoint(&format!("api/get-saved-annotations/{}", project_id)))
            .send()?;
        let response = check_status(response)?;
        Ok(response.json()?)
    }
}

fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, DrizzError> {
    if !response.status().is_success() {
        return Err(DrizzError::Network(format!(
            "server returned {}",
            response.status()
        )));
    }
    Ok(response)
}
