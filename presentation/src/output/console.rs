//! Console output formatter for runs

use colored::Colorize;
use sentinel_domain::{
    EventPayload, Message, MessageSource, RunEvent, RunState, RunSummary, Transcript,
};

/// Formats run events and summaries for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Startup banner
    pub fn banner() -> String {
        let line = "=".repeat(60);
        format!(
            "{}\n{:^60}\n{:^60}\n{}\n",
            line.cyan(),
            "SENTINEL - Autonomous Multi-Agent AIOps Engine".bold(),
            "Observe · Diagnose · Remediate · Report".dimmed(),
            line.cyan()
        )
    }

    /// The generated telemetry block
    pub fn telemetry(telemetry: &str) -> String {
        format!(
            "{}\n{}\n",
            "Mock telemetry generated:".cyan().bold(),
            telemetry
        )
    }

    /// One transcript message: a source header followed by the content
    pub fn message(message: &Message) -> String {
        let header = format!("── {} ──", message.source());
        let header = match message.source() {
            MessageSource::System => header.dimmed().bold(),
            MessageSource::Participant(_) => header.yellow().bold(),
        };
        format!("\n{}\n{}\n", header, message.content().render())
    }

    /// Render one event for live output.
    ///
    /// Terminal events are left to [`summary`](Self::summary).
    pub fn event(event: &RunEvent) -> Option<String> {
        match &event.payload {
            EventPayload::RunStarted { participants, seed } => {
                let names: Vec<&str> = participants.iter().map(|p| p.as_str()).collect();
                Some(format!(
                    "{} {}\n{}",
                    "Participants:".cyan().bold(),
                    names.join(" -> "),
                    Self::message(seed)
                ))
            }
            EventPayload::TurnProduced { message, .. } => Some(Self::message(message)),
            EventPayload::TurnDiscarded {
                turn,
                participant,
                reason,
            } => Some(format!(
                "\n{} turn {} by {} discarded ({})\n",
                "!".yellow().bold(),
                turn,
                participant,
                reason
            )),
            EventPayload::RunCompleted { .. }
            | EventPayload::RunCancelled { .. }
            | EventPayload::RunFailed { .. } => None,
        }
    }

    /// Every message of a transcript
    pub fn transcript(transcript: &Transcript) -> String {
        transcript.iter().map(Self::message).collect()
    }

    /// Final run report
    pub fn summary(summary: &RunSummary) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header("Run Summary"));

        let state = match summary.state {
            RunState::Completed => summary.state.as_str().green().bold(),
            RunState::Cancelled => summary.state.as_str().yellow().bold(),
            _ => summary.state.as_str().red().bold(),
        };
        output.push_str(&format!("{} {}\n", "State:".cyan().bold(), state));

        if let Some(reason) = summary.reason() {
            output.push_str(&format!("{} {}\n", "Reason:".cyan().bold(), reason));
        }
        output.push_str(&format!(
            "{} {} ({} messages)\n",
            "Turns:".cyan().bold(),
            summary.turns,
            summary.transcript.len()
        ));
        output.push_str(&format!(
            "{} {:.1}s\n",
            "Duration:".cyan().bold(),
            summary.duration.as_secs_f64()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Run ID:".dimmed(),
            summary.run_id.to_string().dimmed()
        ));

        if let Some(error) = &summary.error {
            output.push_str(&format!("\n{} {}\n", "Error:".red().bold(), error));
        }

        output
    }

    /// Format as JSON
    pub fn format_json(summary: &RunSummary) -> String {
        serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}
