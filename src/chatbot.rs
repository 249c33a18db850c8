// chatbot.rs

use crate::api::HttpClient;
use crate::command::Command;
use crate::constants::*;
use crate::conversation::MessageSink;
use crate::errors::{RetailChatError, RetailChatResult};
use crate::models::{
    ExpiryReorderResponse, ForecastRequest, ForecastResponse, Offer, PricingComparison,
    RouteOptimizationRequest, RouteOptimizationResponse, RouteStop, Sender,
};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Turns one line of user input into exactly one user message and exactly
/// one bot message.
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<dyn HttpClient>,
    sink: Arc<dyn MessageSink>,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn HttpClient>, sink: Arc<dyn MessageSink>) -> Self {
        Dispatcher { client, sink }
    }

    /// Opens a session with the list of commands.
    pub fn greet(&self) {
        self.sink.append(GREETING, Sender::Bot);
    }

    /// Echoes `raw` and then settles it. Never fails: errors become a bot
    /// message.
    pub async fn handle(&self, raw: &str) {
        self.echo(raw);
        self.dispatch(raw).await;
    }

    /// Appends the untrimmed user input.
    pub fn echo(&self, raw: &str) {
        self.sink.append(raw, Sender::User);
    }

    /// Classifies `raw`, runs the matching request if any, and appends the
    /// single bot reply.
    pub async fn dispatch(&self, raw: &str) {
        let reply = match Command::parse(raw) {
            None => {
                log::debug!("unrecognized input {:?}", raw);
                UNKNOWN_COMMAND.to_string()
            }
            Some(command) => {
                log::debug!("dispatching {}", command);
                match self.run_command(command).await {
                    Ok(summary) => summary,
                    Err(e) => {
                        log::debug!("{} failed: {}", command, e);
                        format!("Error: {}", e)
                    }
                }
            }
        };

        self.sink.append(&reply, Sender::Bot);
    }

    /// Performs the one request behind `command` and derives its summary.
    pub async fn run_command(&self, command: Command) -> RetailChatResult<String> {
        let body = request_body(command)?;
        let response = self
            .client
            .request(command.method(), command.path(), body)
            .await?;
        summarize(command, response)
    }
}

fn to_json<T: Serialize>(payload: &T) -> RetailChatResult<Value> {
    serde_json::to_value(payload)
        .map_err(|e| RetailChatError::parse_error(format!("Failed to encode request: {}", e)))
}

pub fn request_body(command: Command) -> RetailChatResult<Option<Value>> {
    match command {
        Command::Offers | Command::Pricing | Command::Expiry => Ok(None),
        Command::Forecast => to_json(&forecast_request()).map(Some),
        Command::Routes => {
            let request = route_request(&mut rand::rng());
            to_json(&request).map(Some)
        }
    }
}

pub fn forecast_request() -> ForecastRequest {
    ForecastRequest {
        stores: FORECAST_STORES.iter().map(|s| s.to_string()).collect(),
        products: FORECAST_PRODUCTS.iter().map(|p| p.to_string()).collect(),
        horizon_days: FORECAST_HORIZON_DAYS,
    }
}

pub fn route_request<R: Rng>(rng: &mut R) -> RouteOptimizationRequest {
    RouteOptimizationRequest {
        vehicle_count: ROUTE_VEHICLE_COUNT,
        depot_lat: DEPOT_LAT,
        depot_lng: DEPOT_LNG,
        stops: generate_stops(rng),
    }
}

/// Ten delivery stops scattered within a small box north-east of the depot.
pub fn generate_stops<R: Rng>(rng: &mut R) -> Vec<RouteStop> {
    (1..=STOP_COUNT)
        .map(|i| RouteStop {
            order_id: format!("o{}", i),
            lat: STOP_BASE_LAT + rng.random::<f64>() * STOP_JITTER_DEG,
            lng: STOP_BASE_LNG + rng.random::<f64>() * STOP_JITTER_DEG,
            service_time_min: STOP_SERVICE_TIME_MIN,
        })
        .collect()
}

fn decode<T: DeserializeOwned>(command: Command, response: Value) -> RetailChatResult<T> {
    serde_json::from_value(response).map_err(|e| {
        RetailChatError::shape_error(format!("unexpected {} response: {}", command, e))
    })
}

fn first<T>(command: Command, items: &[T]) -> RetailChatResult<&T> {
    items
        .first()
        .ok_or_else(|| RetailChatError::shape_error(format!("{} response is empty", command)))
}

/// Derives the one-line summary shown for a successful `command`.
pub fn summarize(command: Command, response: Value) -> RetailChatResult<String> {
    match command {
        Command::Offers => {
            let offers: Vec<Offer> = decode(command, response)?;
            let example = first(command, &offers)?;
            Ok(format!(
                "Found {} offers. Example: {}",
                offers.len(),
                example.description
            ))
        }
        Command::Pricing => {
            let comparisons: Vec<PricingComparison> = decode(command, response)?;
            let sample = first(command, &comparisons)?;
            Ok(format!(
                "Pricing sample for {}: local={}, online={}",
                sample.product_id, sample.local_price, sample.online_price
            ))
        }
        Command::Forecast => {
            let forecast: ForecastResponse = decode(command, response)?;
            Ok(format!("Forecasts generated: {}", forecast.forecasts.len()))
        }
        Command::Expiry => {
            let expiry: ExpiryReorderResponse = decode(command, response)?;
            let example = first(command, &expiry.insights)?;
            let risky = expiry.insights.iter().filter(|i| i.expiry_risk).count();
            Ok(format!(
                "Expiry risk items: {}. Example reorder point: {}",
                risky, example.reorder_point
            ))
        }
        Command::Routes => {
            let routing: RouteOptimizationResponse = decode(command, response)?;
            if let Some(engine) = &routing.engine {
                log::debug!("routes solved by {}", engine);
            }
            Ok(format!("Optimized {} routes", routing.routes.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::command::Method;
    use crate::conversation::MessageLog;
    use async_trait::async_trait;
    use rand::{rngs::StdRng, SeedableRng};
    use serde_json::json;
    use std::collections::{HashSet, VecDeque};
    use std::sync::Mutex;
    use tokio::sync::oneshot;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    type Call = (Method, String, Option<Value>);

    /// Replays canned responses in order and records every request.
    #[derive(Default)]
    struct ScriptedClient {
        responses: Mutex<VecDeque<RetailChatResult<Value>>>,
        calls: Mutex<Vec<Call>>,
    }

    impl ScriptedClient {
        fn replying(responses: Vec<RetailChatResult<Value>>) -> Arc<Self> {
            Arc::new(ScriptedClient {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpClient for ScriptedClient {
        async fn request(
            &self,
            method: Method,
            path: &str,
            body: Option<Value>,
        ) -> RetailChatResult<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((method, path.to_string(), body));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted response left")
        }
    }

    fn dispatcher_with(client: Arc<ScriptedClient>) -> (Dispatcher, Arc<MessageLog>) {
        let log = Arc::new(MessageLog::new());
        (Dispatcher::new(client, log.clone()), log)
    }

    fn bot_reply(log: &MessageLog) -> String {
        let messages = log.snapshot();
        assert_eq!(messages.len(), 2, "expected one user and one bot message");
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[1].sender, Sender::Bot);
        messages[1].text.clone()
    }

    #[test]
    fn test_greeting_is_a_single_bot_message() {
        let (dispatcher, log) = dispatcher_with(ScriptedClient::replying(vec![]));
        dispatcher.greet();

        let messages = log.snapshot();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Bot);
        assert_eq!(
            messages[0].text,
            "Hi! Try: 'offers', 'pricing', 'forecast', 'expiry', 'routes'"
        );
    }

    #[tokio::test]
    async fn test_offers_summary() {
        let client = ScriptedClient::replying(vec![Ok(json!([{"description": "10% off rice"}]))]);
        let (dispatcher, log) = dispatcher_with(client.clone());

        dispatcher.handle("offers").await;

        assert_eq!(bot_reply(&log), "Found 1 offers. Example: 10% off rice");
        assert_eq!(client.calls(), vec![(Method::Get, "/offers".to_string(), None)]);
    }

    #[tokio::test]
    async fn test_pricing_ignores_case_and_whitespace() {
        let response = json!([
            {"product_id": "rice", "local_price": 42.0, "online_price": 41.5, "delta": 0.5}
        ]);
        let client = ScriptedClient::replying(vec![Ok(response.clone()), Ok(response)]);
        let (dispatcher, log) = dispatcher_with(client.clone());

        dispatcher.handle("PRICING ").await;
        dispatcher.handle("pricing").await;

        let messages = log.snapshot();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].text, "PRICING ");
        assert_eq!(messages[1].text, "Pricing sample for rice: local=42, online=41.5");
        assert_eq!(messages[1].text, messages[3].text);
        let calls = client.calls();
        assert_eq!(calls[0], calls[1]);
    }

    #[tokio::test]
    async fn test_unknown_command_makes_no_request() {
        let client = ScriptedClient::replying(vec![]);
        let (dispatcher, log) = dispatcher_with(client.clone());

        dispatcher.handle("banana").await;

        assert_eq!(bot_reply(&log), UNKNOWN_COMMAND);
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_forecast_body_is_fixed() {
        let client = ScriptedClient::replying(vec![Ok(json!({
            "forecasts": [{"store_id": "store_1"}, {"store_id": "store_2"}]
        }))]);
        let (dispatcher, log) = dispatcher_with(client.clone());

        dispatcher.handle(" Forecast").await;

        assert_eq!(bot_reply(&log), "Forecasts generated: 2");
        let (method, path, body) = client.calls().remove(0);
        assert_eq!(method, Method::Post);
        assert_eq!(path, "/forecast");
        let body = body.unwrap();
        assert_eq!(body["horizon_days"], json!(7));
        assert_eq!(body["products"], json!(["rice", "wheat", "sugar"]));
        assert_eq!(
            body["stores"],
            json!(["store_1", "store_2", "store_3", "store_4", "store_5"])
        );
    }

    #[tokio::test]
    async fn test_routes_body_has_ten_stops() {
        let client = ScriptedClient::replying(vec![Ok(json!({
            "routes": [[0, 1, 0], [0, 2, 0], [0, 3, 0]],
            "engine": "heuristic"
        }))]);
        let (dispatcher, log) = dispatcher_with(client.clone());

        dispatcher.handle("routes").await;

        assert_eq!(bot_reply(&log), "Optimized 3 routes");
        let body = client.calls().remove(0).2.unwrap();
        assert_eq!(body["vehicle_count"], json!(3));
        assert_eq!(body["depot_lat"], json!(28.6139));
        assert_eq!(body["depot_lng"], json!(77.2090));
        let stops = body["stops"].as_array().unwrap();
        assert_eq!(stops.len(), 10);
        let ids: HashSet<&str> = stops
            .iter()
            .map(|s| s["order_id"].as_str().unwrap())
            .collect();
        let expected: HashSet<String> = (1..=10).map(|i| format!("o{}", i)).collect();
        assert_eq!(ids, expected.iter().map(String::as_str).collect());
        assert!(stops.iter().all(|s| s["service_time_min"] == json!(5)));
    }

    #[test]
    fn test_generate_stops_stay_near_depot() {
        let mut rng = StdRng::seed_from_u64(7);
        let stops = generate_stops(&mut rng);

        assert_eq!(stops.len(), STOP_COUNT);
        for (i, stop) in stops.iter().enumerate() {
            assert_eq!(stop.order_id, format!("o{}", i + 1));
            assert!(stop.lat >= 28.6 && stop.lat < 28.7);
            assert!(stop.lng >= 77.2 && stop.lng < 77.3);
        }
    }

    #[tokio::test]
    async fn test_expiry_counts_risky_items() {
        let client = ScriptedClient::replying(vec![Ok(json!({
            "insights": [
                {"store_id": "store_1", "expiry_risk": true, "reorder_point": 140},
                {"store_id": "store_2", "expiry_risk": false, "reorder_point": 90},
                {"store_id": "store_3", "expiry_risk": true, "reorder_point": 75}
            ]
        }))]);
        let (dispatcher, log) = dispatcher_with(client);

        dispatcher.handle("expiry").await;

        assert_eq!(
            bot_reply(&log),
            "Expiry risk items: 2. Example reorder point: 140"
        );
    }

    #[tokio::test]
    async fn test_empty_offers_is_rendered_as_error() {
        let client = ScriptedClient::replying(vec![Ok(json!([]))]);
        let (dispatcher, log) = dispatcher_with(client);

        dispatcher.handle("offers").await;

        assert_eq!(bot_reply(&log), "Error: Shape error: offers response is empty");
    }

    #[tokio::test]
    async fn test_empty_insights_is_rendered_as_error() {
        let client = ScriptedClient::replying(vec![Ok(json!({"insights": []}))]);
        let (dispatcher, log) = dispatcher_with(client);

        dispatcher.handle("expiry").await;

        assert!(bot_reply(&log).starts_with("Error: Shape error"));
    }

    #[tokio::test]
    async fn test_missing_field_is_shape_error() {
        let client = ScriptedClient::replying(vec![Ok(json!({"detail": "Not Found"}))]);
        let (dispatcher, log) = dispatcher_with(client);

        dispatcher.handle("forecast").await;

        let reply = bot_reply(&log);
        assert!(reply.starts_with("Error: Shape error: unexpected forecast response"));
    }

    #[tokio::test]
    async fn test_network_failure_is_rendered() {
        let client = ScriptedClient::replying(vec![Err(RetailChatError::network_error(
            "Request failed: connection refused",
        ))]);
        let (dispatcher, log) = dispatcher_with(client);

        dispatcher.handle("pricing").await;

        assert_eq!(
            bot_reply(&log),
            "Error: Network error: Request failed: connection refused"
        );
    }

    #[test]
    fn test_prices_render_without_exponent() {
        let response = json!([
            {"product_id": "saffron", "local_price": 1e21, "online_price": 1e-7}
        ]);
        let summary = summarize(Command::Pricing, response).unwrap();
        assert_eq!(
            summary,
            "Pricing sample for saffron: local=1000000000000000000000, online=0.0000001"
        );
    }

    #[test]
    fn test_summarize_routes_without_engine() {
        let summary = summarize(Command::Routes, json!({"routes": []})).unwrap();
        assert_eq!(summary, "Optimized 0 routes");
    }

    /// Holds `/offers` open until the test releases it.
    struct GatedClient {
        gate: Mutex<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl HttpClient for GatedClient {
        async fn request(
            &self,
            _method: Method,
            path: &str,
            _body: Option<Value>,
        ) -> RetailChatResult<Value> {
            if path == "/offers" {
                let gate = self.gate.lock().unwrap().take();
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                return Ok(json!([{"description": "5% off sugar"}]));
            }
            Ok(json!([{"product_id": "wheat", "local_price": 30, "online_price": 28}]))
        }
    }

    #[tokio::test]
    async fn test_concurrent_replies_follow_completion_order() {
        let (release, gate) = oneshot::channel();
        let client = Arc::new(GatedClient {
            gate: Mutex::new(Some(gate)),
        });
        let log = Arc::new(MessageLog::new());
        let dispatcher = Dispatcher::new(client.clone(), log.clone());

        dispatcher.echo("offers");
        let slow = {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move { dispatcher.dispatch("offers").await })
        };

        // Let the offers task reach the server before pricing is sent.
        for _ in 0..16 {
            if client.gate.lock().unwrap().is_none() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(
            client.gate.lock().unwrap().is_none(),
            "offers request never started"
        );

        dispatcher.handle("pricing").await;
        assert_eq!(log.len(), 3, "offers must still be waiting");
        assert!(!slow.is_finished());

        release.send(()).unwrap();
        slow.await.unwrap();

        let texts: Vec<String> = log.snapshot().into_iter().map(|m| m.text).collect();
        assert_eq!(
            texts,
            vec![
                "offers".to_string(),
                "pricing".to_string(),
                "Pricing sample for wheat: local=30, online=28".to_string(),
                "Found 1 offers. Example: 5% off sugar".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_end_to_end_against_mock_server() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/offers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"product_id": "rice", "description": "10% off on Rice", "discount_percent": 10},
                {"product_id": "sugar", "description": "5% off on Sugar", "discount_percent": 5}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let log = Arc::new(MessageLog::new());
        let client = Arc::new(ApiClient::new(format!("{}/api", mock_server.uri())));
        let dispatcher = Dispatcher::new(client, log.clone());

        dispatcher.handle("offers").await;

        assert_eq!(bot_reply(&log), "Found 2 offers. Example: 10% off on Rice");
    }
}
