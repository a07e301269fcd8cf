//! Live rendering of run events

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use sentinel_application::EventSubscription;
use sentinel_domain::core::string::preview;
use sentinel_domain::{EventPayload, Message, ParticipantName, RoundRobinCursor, RunEvent};
use std::time::Duration;

/// Max length of the quoted previous message in the spinner line.
const SPINNER_PREVIEW_LEN: usize = 60;

/// Prints run events as they arrive, with a spinner naming the participant
/// that is currently working.
pub struct EventPrinter {
    render_turns: bool,
    show_spinner: bool,
    participants: Vec<ParticipantName>,
    spinner: Option<ProgressBar>,
}

impl EventPrinter {
    /// `render_turns` prints each message; `show_spinner` shows who is up.
    pub fn new(render_turns: bool, show_spinner: bool) -> Self {
        Self {
            render_turns,
            show_spinner,
            participants: Vec::new(),
            spinner: None,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Consume the subscription until the run ends or the stream closes.
    pub async fn run(mut self, subscription: EventSubscription) {
        let mut events = subscription.into_stream();
        while let Some(event) = events.next().await {
            let terminal = event.is_terminal();
            self.handle(&event);
            if terminal {
                break;
            }
        }
        self.clear_spinner();
    }

    fn handle(&mut self, event: &RunEvent) {
        if let EventPayload::RunStarted { participants, .. } = &event.payload {
            self.participants = participants.clone();
        }

        if self.render_turns
            && let Some(text) = ConsoleFormatter::event(event)
        {
            self.print(&text);
        }

        match &event.payload {
            EventPayload::RunStarted { .. } => {
                self.working(next_speaker(&self.participants, 0), None)
            }
            EventPayload::TurnProduced { turn, message } => {
                self.working(next_speaker(&self.participants, *turn), Some(message))
            }
            _ => self.clear_spinner(),
        }
    }

    fn working(&mut self, speaker: Option<ParticipantName>, previous: Option<&Message>) {
        if !self.show_spinner {
            return;
        }
        let Some(speaker) = speaker else {
            return;
        };
        let spinner = self.spinner.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        spinner.set_prefix(speaker.to_string());
        spinner.set_message(spinner_message(previous).dimmed().to_string());
    }

    fn print(&self, text: &str) {
        match &self.spinner {
            Some(spinner) => spinner.suspend(|| print!("{}", text)),
            None => print!("{}", text),
        }
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

/// Who produces the turn after `completed_turns` turns.
fn next_speaker(participants: &[ParticipantName], completed_turns: u64) -> Option<ParticipantName> {
    let cursor = RoundRobinCursor::new(participants.len())?;
    let index = cursor.speaker_for_turn(completed_turns + 1)?;
    participants.get(index).cloned()
}

/// Spinner text; quotes the message the speaker is answering, if any.
fn spinner_message(previous: Option<&Message>) -> String {
    match previous {
        Some(message) => format!(
            "is thinking... (after {}: \"{}\")",
            message.source(),
            preview(&message.content().render(), SPINNER_PREVIEW_LEN)
        ),
        None => "is thinking...".to_string(),
    }
}
