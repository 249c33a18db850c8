use crate::chatbot::Dispatcher;
use crate::conversation::MessageLog;
use crate::status_indicator::StatusIndicator;
use std::sync::Arc;

const SCROLL_STEP: u16 = 3;

pub struct App {
    pub log: Arc<MessageLog>,
    pub dispatcher: Dispatcher,
    pub api_base: String,
    pub input: String,
    /// Lines scrolled up from the newest message; 0 follows the tail.
    pub scroll_back: u16,
    pub status_indicator: StatusIndicator,
    pub should_quit: bool,
}

impl App {
    pub fn new(dispatcher: Dispatcher, log: Arc<MessageLog>) -> App {
        App {
            log,
            dispatcher,
            api_base: String::new(),
            input: String::new(),
            scroll_back: 0,
            status_indicator: StatusIndicator::new(),
            should_quit: false,
        }
    }

    /// Sends the current input. The user message is appended right away;
    /// the reply is settled on its own task so typing is never blocked.
    pub fn submit(&mut self) {
        if self.input.is_empty() {
            return;
        }

        let text = std::mem::take(&mut self.input);
        self.dispatcher.echo(&text);
        self.scroll_back = 0;

        let guard = self.status_indicator.begin_request();
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            let _guard = guard;
            dispatcher.dispatch(&text).await;
        });
    }

    pub fn scroll_up(&mut self) {
        self.scroll_back = self.scroll_back.saturating_add(SCROLL_STEP);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_back = self.scroll_back.saturating_sub(SCROLL_STEP);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
