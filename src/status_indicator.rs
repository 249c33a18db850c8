use crate::constants::SPINNER_FRAMES;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts requests that have been sent but not yet rendered, and draws a
/// spinner while any are outstanding.
#[derive(Debug, Clone, Default)]
pub struct StatusIndicator {
    in_flight: Arc<AtomicUsize>,
    spinner_idx: usize,
}

/// Decrements the in-flight counter when the request it was issued for
/// settles, however that happens.
#[derive(Debug)]
pub struct InFlightGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_request(&self) -> InFlightGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        InFlightGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    pub fn status_text(&self) -> String {
        match self.in_flight() {
            0 => String::new(),
            1 => "1 request in flight".to_string(),
            n => format!("{} requests in flight", n),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let busy = self.in_flight() > 0;
        let indicator = if busy {
            SPINNER_FRAMES[self.spinner_idx % SPINNER_FRAMES.len()]
        } else {
            " "
        };

        let status = Line::from(vec![
            Span::styled(indicator, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(self.status_text(), Style::default().fg(Color::DarkGray)),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }
}
