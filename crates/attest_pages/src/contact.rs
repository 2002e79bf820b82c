//! Contact form with a simulated submission
//!
//! Submitting a valid form enters `Submitting`, and after a fixed delay on
//! the timer queue the form reports success and clears its fields. No
//! request leaves the process and there is no failure state: wiring the
//! form to a real endpoint is left to the host.

use crate::error::{FormError, PageError};
use attest_core::fsm::{StateMachine, StateTransitions};
use attest_core::sync::lock;
use attest_core::{SchedulerHandle, TimerGuard};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// Delay before a submission reports success
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 1500;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Email,
    Company,
    Message,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Company => "Company",
            FormField::Message => "Message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FormField {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(FormField::Name),
            "email" => Ok(FormField::Email),
            "company" => Ok(FormField::Company),
            "message" => Ok(FormField::Message),
            _ => Err(PageError::UnknownField(s.to_string())),
        }
    }
}

/// Field values
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    /// Optional
    pub company: String,
    pub message: String,
}

impl FormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Company => &self.company,
            FormField::Message => &self.message,
        }
    }

    fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Company => &mut self.company,
            FormField::Message => &mut self.message,
        }
    }

    /// Check required fields and the email shape
    pub fn validate(&self) -> Result<(), FormError> {
        for field in [FormField::Name, FormField::Email, FormField::Message] {
            if self.get(field).trim().is_empty() {
                return Err(FormError::MissingField(field));
            }
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(FormError::InvalidEmail(email.to_string())),
        }
    }
}

/// Where the form is in its submit cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormPhase {
    Editing,
    Submitting,
    Submitted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
    Complete,
    Edit,
}

impl StateTransitions for FormPhase {
    type Event = FormEvent;

    fn on_event(&self, event: FormEvent) -> Option<Self> {
        match (self, event) {
            (FormPhase::Editing | FormPhase::Submitted, FormEvent::Submit) => {
                Some(FormPhase::Submitting)
            }
            (FormPhase::Submitting, FormEvent::Complete) => Some(FormPhase::Submitted),
            (FormPhase::Submitted, FormEvent::Edit) => Some(FormPhase::Editing),
            _ => None,
        }
    }
}

struct FormState {
    fields: FormFields,
    fsm: StateMachine<FormPhase>,
    submissions: u32,
}

impl FormState {
    fn complete(&mut self) {
        if self.fsm.send(FormEvent::Complete) == FormPhase::Submitted {
            self.fields = FormFields::default();
            self.submissions += 1;
            tracing::info!(submissions = self.submissions, "contact form submitted");
        }
    }
}

/// The contact page form
pub struct ContactForm {
    state: Arc<Mutex<FormState>>,
    delay_ms: u64,
    timer: Option<TimerGuard>,
}

impl ContactForm {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState {
                fields: FormFields::default(),
                fsm: StateMachine::new(FormPhase::Editing),
                submissions: 0,
            })),
            delay_ms,
            timer: None,
        }
    }

    /// Set a field; editing after a success starts a new message
    ///
    /// Input while a submission is in flight is ignored.
    pub fn set(&self, field: FormField, value: impl Into<String>) {
        let mut state = lock(&self.state);
        if state.fsm.is_in(FormPhase::Submitting) {
            tracing::warn!(%field, "ignoring input while submitting");
            return;
        }
        state.fsm.send(FormEvent::Edit);
        *state.fields.get_mut(field) = value.into();
    }

    pub fn field(&self, field: FormField) -> String {
        lock(&self.state).fields.get(field).to_string()
    }

    /// Validate and start the simulated submission
    ///
    /// Without a live scheduler the submission completes at once.
    pub fn submit(&mut self, scheduler: &SchedulerHandle) -> Result<(), FormError> {
        {
            let mut state = lock(&self.state);
            if state.fsm.is_in(FormPhase::Submitting) {
                return Err(FormError::AlreadySubmitting);
            }
            state.fields.validate()?;
            state.fsm.send(FormEvent::Submit);
            tracing::debug!(delay_ms = self.delay_ms, "contact form submitting");
        }

        let weak = Arc::downgrade(&self.state);
        self.timer = scheduler.once(self.delay_ms, move |_| {
            if let Some(state) = weak.upgrade() {
                lock(&state).complete();
            }
        });
        if self.timer.is_none() {
            lock(&self.state).complete();
        }
        Ok(())
    }

    pub fn phase(&self) -> FormPhase {
        lock(&self.state).fsm.current_state()
    }

    /// Successful submissions so far
    pub fn submissions(&self) -> u32 {
        lock(&self.state).submissions
    }

    /// Text of the submit button or the success notice
    pub fn status_text(&self) -> &'static str {
        match self.phase() {
            FormPhase::Editing => "Send Message",
            FormPhase::Submitting => "Sending...",
            FormPhase::Submitted => "Thank you! We'll be in touch soon.",
        }
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_core::Scheduler;

    fn filled(form: &ContactForm) {
        form.set(FormField::Name, "Ada");
        form.set(FormField::Email, "ada@example.com");
        form.set(FormField::Message, "Tell me about data quality audits.");
    }

    #[test]
    fn test_validation() {
        let mut fields = FormFields::default();
        assert_eq!(fields.validate(), Err(FormError::MissingField(FormField::Name)));
        fields.name = "Ada".into();
        fields.email = "ada".into();
        fields.message = "hi".into();
        assert_eq!(fields.validate(), Err(FormError::InvalidEmail("ada".into())));
        fields.email = "@example.com".into();
        assert!(fields.validate().is_err());
        fields.email = "ada@example.com".into();
        assert_eq!(fields.validate(), Ok(()));
    }

    #[test]
    fn test_submit_succeeds_after_fixed_delay() {
        let scheduler = Scheduler::new();
        let mut form = ContactForm::default();
        filled(&form);

        form.submit(&scheduler.handle()).unwrap();
        assert_eq!(form.phase(), FormPhase::Submitting);
        assert_eq!(form.submit(&scheduler.handle()), Err(FormError::AlreadySubmitting));

        form.set(FormField::Name, "Grace");
        scheduler.advance(DEFAULT_SUBMIT_DELAY_MS - 1);
        assert_eq!(form.phase(), FormPhase::Submitting);
        assert_eq!(form.field(FormField::Name), "Ada");

        scheduler.advance(1);
        assert_eq!(form.phase(), FormPhase::Submitted);
        assert_eq!(form.field(FormField::Email), "");
        assert_eq!(form.submissions(), 1);

        form.set(FormField::Name, "Grace");
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[test]
    fn test_invalid_submit_stays_editing() {
        let scheduler = Scheduler::new();
        let mut form = ContactForm::default();
        form.set(FormField::Name, "Ada");
        assert!(form.submit(&scheduler.handle()).is_err());
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_detached_scheduler_completes_immediately() {
        let mut form = ContactForm::new(500);
        filled(&form);
        form.submit(&SchedulerHandle::detached()).unwrap();
        assert_eq!(form.phase(), FormPhase::Submitted);
    }

    #[test]
    fn test_dropping_form_cancels_submission() {
        let scheduler = Scheduler::new();
        let mut form = ContactForm::default();
        filled(&form);
        form.submit(&scheduler.handle()).unwrap();
        drop(form);
        assert_eq!(scheduler.pending(), 0);
    }
}
