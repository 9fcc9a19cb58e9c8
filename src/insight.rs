// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client for the external text-insight service.
//!
//! The service sees only a prompt built from [`InsightSnapshot`]. The call
//! runs on its own thread and its outcome is read exactly once through
//! [`PendingInsight::wait`]; any failure turns into [`FAILURE_TEXT`].

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::json;
use std::thread::{self, JoinHandle};
use tracing::warn;

use crate::engine::activity::InsightSnapshot;
use crate::utils::{fmt_money, http_client};

pub const FAILURE_TEXT: &str = "Failed to generate insight. Please check your connection.";

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";
pub const MODEL_ENV: &str = "FARMBOOK_INSIGHT_MODEL";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub trait InsightService: Send + 'static {
    fn generate(&self, prompt: &str) -> Result<String>;
}

pub struct GeminiClient {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            api_key,
            model,
        })
    }

    /// Reads the key from `GEMINI_API_KEY` (or `API_KEY`) and the model from
    /// `FARMBOOK_INSIGHT_MODEL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .or_else(|_| std::env::var(FALLBACK_API_KEY_ENV))
            .with_context(|| format!("Set {} to enable insights", API_KEY_ENV))?;
        let model = std::env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(api_key, model)
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl InsightService for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/{}:generateContent", ENDPOINT, self.model);
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
        let resp: GenerateResponse = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;
        let text: String = resp
            .candidates
            .into_iter()
            .flat_map(|c| c.content.parts)
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");
        if text.trim().is_empty() {
            return Err(anyhow!("Insight service returned no text"));
        }
        Ok(text)
    }
}

pub fn build_prompt(snapshot: &InsightSnapshot, currency: &str) -> String {
    let inactive = if snapshot.inactive_customers.is_empty() {
        "None".to_string()
    } else {
        snapshot.inactive_customers.join(", ")
    };
    format!(
        "Act as an expert farm consultant. Analyze this Egg Farm data for the last 30 days:\n\
         \n\
         - Total Eggs Collected: {}\n\
         - Average Daily Collection: {:.0}\n\
         - Wastage Rate: {:.2}% (Industry standard is 1-2%)\n\
         - Total Revenue: {}\n\
         - Total Active Customers: {}\n\
         - Inactive Customers (No Purchase in 30 days): {}\n\
         \n\
         Provide a concise response with 3 headings:\n\
         1. Production Insight: Comment on efficiency and wastage.\n\
         2. Sales Trend: Comment on revenue health.\n\
         3. Customer Alert: Specifically list the inactive customers and suggest a quick action to win them back.\n\
         \n\
         Keep it brief, professional, and actionable. Do not use markdown for the headers, just bold them.",
        snapshot.total_collected,
        snapshot.avg_daily_collection.round(),
        snapshot.waste_rate_pct.round_dp(2),
        fmt_money(&snapshot.total_revenue, currency),
        snapshot.active_customers,
        inactive,
    )
}

/// An insight request in flight.
pub struct PendingInsight {
    handle: JoinHandle<String>,
}

impl PendingInsight {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Blocks until the request settles. Consumes the handle, so the result
    /// is applied once.
    pub fn wait(self) -> String {
        self.handle.join().unwrap_or_else(|_| {
            warn!("insight worker panicked");
            FAILURE_TEXT.to_string()
        })
    }
}

/// Starts the request on a worker thread and returns immediately.
pub fn request_insight<S: InsightService>(service: S, prompt: String) -> PendingInsight {
    let handle = thread::spawn(move || match service.generate(&prompt) {
        Ok(text) => text,
        Err(err) => {
            warn!("insight request failed: {:#}", err);
            FAILURE_TEXT.to_string()
        }
    });
    PendingInsight { handle }
}
