//! Contact form with field validation and deferred submission.
//!
//! The form composes four [`Input`] fields and a submit [`Button`]. Blur
//! validates a field and typing clears its error. Submitting validates every
//! field; a valid form goes through a [`Transport`] once the submit delay
//! has elapsed on the host clock.

use crate::components::{
    emit, Bindings, Button, ButtonOptions, Callback, Component, ComponentAction, Input,
    InputOptions,
};
use crate::dom::{Delivery, EventKind, ListenerId, NodeId};
use crate::host::{Host, NoticeVariant};
use crate::timers::TimerId;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const SUBMIT_DELAY: Duration = Duration::from_millis(2000);
pub const SENT_MESSAGE: &str = "Message sent! I'll get back to you soon.";
pub const FAILED_MESSAGE: &str = "Error sending message. Please try again.";

/// Field names in form order
pub const FIELDS: [&str; 4] = ["name", "email", "subject", "message"];

/// Values collected from a valid form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("the message could not be delivered")]
    Rejected,
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// Delivers a submitted message
pub trait Transport {
    fn send(&mut self, message: &ContactMessage) -> Result<(), SubmitError>;
}

/// Transport that fails at random with a fixed probability
pub struct SimulatedTransport {
    failure_rate: f64,
    rng: StdRng,
}

impl SimulatedTransport {
    pub const DEFAULT_FAILURE_RATE: f64 = 0.1;

    pub fn new(failure_rate: f64) -> Self {
        Self {
            failure_rate: failure_rate.clamp(0.0, 1.0),
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible outcomes for a given seed
    pub fn seeded(failure_rate: f64, seed: u64) -> Self {
        Self {
            failure_rate: failure_rate.clamp(0.0, 1.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FAILURE_RATE)
    }
}

impl Transport for SimulatedTransport {
    fn send(&mut self, message: &ContactMessage) -> Result<(), SubmitError> {
        if self.rng.gen::<f64>() < self.failure_rate {
            return Err(SubmitError::Rejected);
        }
        debug!("Simulated delivery of message from {}", message.email);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactFormOptions {
    pub submit_text: String,
    /// Milliseconds between submit and delivery
    pub submit_delay: u64,
}

impl Default for ContactFormOptions {
    fn default() -> Self {
        Self {
            submit_text: "Send Message".to_string(),
            submit_delay: SUBMIT_DELAY.as_millis() as u64,
        }
    }
}

pub struct ContactForm {
    options: ContactFormOptions,
    handle: Option<NodeId>,
    fields: Vec<Input>,
    submit: Button,
    bindings: Bindings,
    transport: Box<dyn Transport>,
    pending: Option<TimerId>,
    on_complete: Option<Callback<Result<ContactMessage, SubmitError>>>,
}

impl ContactForm {
    pub fn new(options: ContactFormOptions) -> Self {
        let mut name = InputOptions::new("text", "name");
        name.label = Some("Name".to_string());
        name.placeholder = "Your name".to_string();
        name.required = true;

        let mut email = InputOptions::new("email", "email");
        email.label = Some("Email".to_string());
        email.placeholder = "you@example.com".to_string();
        email.required = true;

        let mut subject = InputOptions::new("text", "subject");
        subject.label = Some("Subject".to_string());

        let mut message = InputOptions::new("textarea", "message");
        message.label = Some("Message".to_string());
        message.required = true;
        message.min_length = Some(10);

        let submit = Button::new(ButtonOptions {
            text: options.submit_text.clone(),
            ..Default::default()
        });
        Self {
            options,
            handle: None,
            fields: [name, email, subject, message]
                .into_iter()
                .map(Input::new)
                .collect(),
            submit,
            bindings: Bindings::new(),
            transport: Box::new(SimulatedTransport::default()),
            pending: None,
            on_complete: None,
        }
    }

    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn on_complete(
        mut self,
        f: impl FnMut(&Result<ContactMessage, SubmitError>) + 'static,
    ) -> Self {
        self.on_complete = Some(Callback::new(f));
        self
    }

    pub fn options(&self) -> &ContactFormOptions {
        &self.options
    }

    pub fn field(&self, name: &str) -> Option<&Input> {
        self.fields.iter().find(|f| f.options().name == name)
    }

    pub fn fields(&self) -> &[Input] {
        &self.fields
    }

    pub fn submit_button(&self) -> &Button {
        &self.submit
    }

    /// Whether a submission is waiting for delivery
    pub fn is_sending(&self) -> bool {
        self.pending.is_some()
    }

    /// Set a field value without validating it
    pub fn set_field(&mut self, host: &mut Host, name: &str, value: &str) -> bool {
        match self.fields.iter_mut().find(|f| f.options().name == name) {
            Some(field) => {
                field.set_value(host, value);
                true
            }
            None => {
                warn!("Contact form has no field '{}'", name);
                false
            }
        }
    }

    pub fn message(&self) -> ContactMessage {
        let value = |name: &str| {
            self.field(name)
                .map(|f| f.value().trim().to_string())
                .unwrap_or_default()
        };
        ContactMessage {
            name: value("name"),
            email: value("email"),
            subject: value("subject"),
            message: value("message"),
        }
    }

    /// Validate every field and, when all pass, start the deferred
    /// submission. Returns whether a submission started.
    pub fn submit(&mut self, host: &mut Host) -> bool {
        if self.pending.is_some() {
            debug!("Submission already in progress");
            return false;
        }
        let mut valid = true;
        for field in &mut self.fields {
            valid &= field.validate(host);
        }
        if !valid {
            debug!("Contact form has invalid fields");
            return false;
        }

        self.submit.set_loading(host, true);
        self.submit.set_disabled(host, true);
        let delay = Duration::from_millis(self.options.submit_delay);
        self.pending = Some(self.bindings.schedule(&mut host.timers, delay));
        true
    }

    /// Clear every value and error
    pub fn reset(&mut self, host: &mut Host) {
        for field in &mut self.fields {
            field.set_value(host, "");
            field.clear_error(host);
        }
    }

    fn complete(&mut self, host: &mut Host) -> ComponentAction {
        let message = self.message();
        let outcome = self.transport.send(&message);
        let action = match &outcome {
            Ok(()) => {
                info!("Contact message sent");
                host.notify(SENT_MESSAGE, NoticeVariant::Success);
                self.reset(host);
                ComponentAction::Custom("sent".to_string())
            }
            Err(e) => {
                warn!("Contact message failed: {}", e);
                host.notify(FAILED_MESSAGE, NoticeVariant::Error);
                ComponentAction::Update
            }
        };
        self.submit.set_loading(host, false);
        self.submit.set_disabled(host, false);
        emit(&mut self.on_complete, &outcome.map(|()| message));
        action
    }
}

impl Component for ContactForm {
    fn name(&self) -> &'static str {
        "contact-form"
    }

    fn render(&mut self, host: &mut Host) -> Result<NodeId> {
        if let Some(old) = self.handle.take() {
            for field in &mut self.fields {
                field.destroy(host);
            }
            self.submit.destroy(host);
            self.bindings.teardown(host, Some(old));
            self.pending = None;
        }

        let form = host.document.element("form", "contact-form", "");
        host.document.set_attr(form, "novalidate", "");
        for field in &mut self.fields {
            let node = field.render(host)?;
            host.document.append_child(form, node);
        }
        let button = self.submit.render(host)?;
        host.document.set_attr(button, "type", "submit");
        host.document.append_child(form, button);

        self.bindings.listen(&mut host.document, form, EventKind::Submit);
        self.handle = Some(form);
        Ok(form)
    }

    fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    fn handle_event(&mut self, host: &mut Host, delivery: &Delivery) -> Result<ComponentAction> {
        if self.bindings.owns_listener(delivery.listener) {
            self.submit(host);
            return Ok(ComponentAction::Update);
        }
        if self.submit.owns_listener(delivery.listener) {
            if self.submit.handle_event(host, delivery)? == ComponentAction::Activated {
                self.submit(host);
                return Ok(ComponentAction::Activated);
            }
            return Ok(ComponentAction::None);
        }
        match self
            .fields
            .iter_mut()
            .find(|f| f.owns_listener(delivery.listener))
        {
            Some(field) => field.handle_event(host, delivery),
            None => Ok(ComponentAction::None),
        }
    }

    fn on_timer(&mut self, host: &mut Host, timer: TimerId) -> Result<ComponentAction> {
        if !self.bindings.fired(timer) || self.pending != Some(timer) {
            return Ok(ComponentAction::None);
        }
        self.pending = None;
        Ok(self.complete(host))
    }

    fn owns_listener(&self, id: ListenerId) -> bool {
        self.bindings.owns_listener(id)
            || self.submit.owns_listener(id)
            || self.fields.iter().any(|f| f.owns_listener(id))
    }

    fn owns_timer(&self, id: TimerId) -> bool {
        self.bindings.owns_timer(id)
    }

    fn destroy(&mut self, host: &mut Host) {
        for field in &mut self.fields {
            field.destroy(host);
        }
        self.submit.destroy(host);
        self.bindings.teardown(host, self.handle.take());
        self.pending = None;
    }
}
