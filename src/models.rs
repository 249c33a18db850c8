// src/models.rs

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// A single entry in the chat log.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp: Local::now(),
        }
    }
}

/// Logs details of each API call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub endpoint: String,
    pub response_status: Option<u16>,
    pub response_time_ms: u128,
}

// --- /offers ---

#[derive(Debug, Clone, Deserialize)]
pub struct Offer {
    pub product_id: Option<String>,
    pub description: String,
    pub discount_percent: Option<f64>,
}

// --- /pricing/compare ---

#[derive(Debug, Clone, Deserialize)]
pub struct PricingComparison {
    pub product_id: String,
    pub local_price: f64,
    pub online_price: f64,
    pub delta: Option<f64>,
}

// --- /forecast ---

#[derive(Debug, Clone, Serialize)]
pub struct ForecastRequest {
    pub stores: Vec<String>,
    pub products: Vec<String>,
    pub horizon_days: u32,
}

/// Entries are kept as raw JSON; only the count is ever shown.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub forecasts: Vec<Value>,
}

// --- /inventory/expiry_reorder ---

#[derive(Debug, Clone, Deserialize)]
pub struct ExpiryInsight {
    pub store_id: Option<String>,
    pub product_id: Option<String>,
    pub quantity: Option<f64>,
    pub days_to_expiry: Option<i64>,
    pub reorder_point: f64,
    pub expiry_risk: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpiryReorderResponse {
    pub insights: Vec<ExpiryInsight>,
}

// --- /routing/optimize ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStop {
    pub order_id: String,
    pub lat: f64,
    pub lng: f64,
    pub service_time_min: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteOptimizationRequest {
    pub vehicle_count: u32,
    pub depot_lat: f64,
    pub depot_lng: f64,
    pub stops: Vec<RouteStop>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteOptimizationResponse {
    pub routes: Vec<Value>,
    pub engine: Option<String>,
}
