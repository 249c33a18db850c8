// src/command.rs

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// The closed set of things a user can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Offers,
    Pricing,
    Forecast,
    Expiry,
    Routes,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::Offers,
        Command::Pricing,
        Command::Forecast,
        Command::Expiry,
        Command::Routes,
    ];

    /// Trims and lowercases `raw`, then matches it exactly against the
    /// command keywords. Anything else is `None`.
    pub fn parse(raw: &str) -> Option<Command> {
        let normalized = raw.trim().to_lowercase();
        Command::ALL
            .into_iter()
            .find(|command| command.keyword() == normalized)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Command::Offers => "offers",
            Command::Pricing => "pricing",
            Command::Forecast => "forecast",
            Command::Expiry => "expiry",
            Command::Routes => "routes",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Command::Offers | Command::Pricing | Command::Expiry => Method::Get,
            Command::Forecast | Command::Routes => Method::Post,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Command::Offers => "/offers",
            Command::Pricing => "/pricing/compare",
            Command::Forecast => "/forecast",
            Command::Expiry => "/inventory/expiry_reorder",
            Command::Routes => "/routing/optimize",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
