//! The Sentinel incident-response team

use super::template::PromptTemplate;
use crate::participant::{ParticipantName, ParticipantProfile};

/// Built-in personas, in speaking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Persona {
    Observer,
    Diagnostic,
    Remediation,
    Reporter,
}

impl Persona {
    /// The full team in round-robin order.
    pub fn team() -> [Persona; 4] {
        [
            Persona::Observer,
            Persona::Diagnostic,
            Persona::Remediation,
            Persona::Reporter,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Persona::Observer => "Observer",
            Persona::Diagnostic => "Diagnostic",
            Persona::Remediation => "Remediation",
            Persona::Reporter => "Reporter",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Persona::Observer => {
                "Monitors infrastructure telemetry and raises anomalies for investigation."
            }
            Persona::Diagnostic => {
                "Performs Chain-of-Thought root-cause analysis on observed anomalies."
            }
            Persona::Remediation => {
                "Proposes and validates remediation actions for diagnosed issues."
            }
            Persona::Reporter => "Summarises the incident for stakeholders and closes the run.",
        }
    }

    /// Build the participant profile. `stop_token` is only used by the Reporter.
    pub fn profile(&self, stop_token: Option<&str>) -> ParticipantProfile {
        let system_prompt = match self {
            Persona::Observer => PromptTemplate::observer_system().to_string(),
            Persona::Diagnostic => PromptTemplate::diagnostic_system().to_string(),
            Persona::Remediation => PromptTemplate::remediation_system().to_string(),
            Persona::Reporter => PromptTemplate::reporter_system(stop_token),
        };
        ParticipantProfile {
            name: ParticipantName::from_static(self.name()),
            description: self.description().to_string(),
            system_prompt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_order_and_names() {
        let names: Vec<&str> = Persona::team().iter().map(Persona::name).collect();
        assert_eq!(names, vec!["Observer", "Diagnostic", "Remediation", "Reporter"]);
    }

    #[test]
    fn test_profiles_are_valid_participants() {
        for persona in Persona::team() {
            let profile = persona.profile(Some("TERMINATE"));
            assert_eq!(
                ParticipantName::new(persona.name()).unwrap(),
                profile.name
            );
            assert!(!profile.system_prompt.is_empty());
        }
    }

    #[test]
    fn test_diagnostic_profile_uses_cot_prompt() {
        let profile = Persona::Diagnostic.profile(None);
        assert!(profile.system_prompt.contains("step-by-step"));
    }
}
