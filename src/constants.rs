// UI Constants
pub const USER_INDENT: &str = "    ";
pub const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

// API Constants
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_FILE: &str = "retail_chat.log";

// Forecast request
pub const FORECAST_STORES: [&str; 5] = ["store_1", "store_2", "store_3", "store_4", "store_5"];
pub const FORECAST_PRODUCTS: [&str; 3] = ["rice", "wheat", "sugar"];
pub const FORECAST_HORIZON_DAYS: u32 = 7;

// Route optimisation request
pub const ROUTE_VEHICLE_COUNT: u32 = 3;
pub const DEPOT_LAT: f64 = 28.6139;
pub const DEPOT_LNG: f64 = 77.2090;
pub const STOP_COUNT: usize = 10;
pub const STOP_BASE_LAT: f64 = 28.6;
pub const STOP_BASE_LNG: f64 = 77.2;
pub const STOP_JITTER_DEG: f64 = 0.1;
pub const STOP_SERVICE_TIME_MIN: u32 = 5;

// Bot texts
pub const GREETING: &str = "Hi! Try: 'offers', 'pricing', 'forecast', 'expiry', 'routes'";
pub const UNKNOWN_COMMAND: &str =
    "Unknown command. Try: offers, pricing, forecast, expiry, routes";
