//! Lifecycle events and codec dispatch.
//!
//! Codecs declare which [`LifecycleEvent`]s they react to and with which
//! [`CodecAction`]. A [`Lifecycle`] owns one record together with the codecs
//! attached to it, and runs the registered actions whenever the record
//! raises an event.

use crate::config::FieldConfig;
use crate::error::Result;
use crate::record::Record;
use std::fmt;
use tracing::debug;

/// Points in a record's lifecycle where codecs can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Init,
    AfterFind,
    AfterInsert,
    AfterUpdate,
    BeforeInsert,
    BeforeUpdate,
    BeforeValidate,
}

impl LifecycleEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::AfterFind => "after-find",
            Self::AfterInsert => "after-insert",
            Self::AfterUpdate => "after-update",
            Self::BeforeInsert => "before-insert",
            Self::BeforeUpdate => "before-update",
            Self::BeforeValidate => "before-validate",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a codec does when one of its events fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecAction {
    /// Replace the raw column value with its decoded form
    Decode,
    /// Replace the decoded value with its storable form
    Encode,
}

/// An attribute codec that can be attached to a record.
pub trait FieldCodec {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn config(&self) -> &FieldConfig;

    /// Events this codec handles, in registration order.
    fn events(&self) -> &'static [(LifecycleEvent, CodecAction)];

    fn decode(&self, record: &mut dyn Record) -> Result<()>;

    fn encode(&self, record: &mut dyn Record) -> Result<()>;

    fn attribute_name(&self) -> Result<&str> {
        self.config().attribute_name()
    }

    fn handle(&self, action: CodecAction, record: &mut dyn Record) -> Result<()> {
        match action {
            CodecAction::Decode => self.decode(record),
            CodecAction::Encode => self.encode(record),
        }
    }
}

/// A record bound to the codecs attached to it.
pub struct Lifecycle<R> {
    record: R,
    codecs: Vec<Box<dyn FieldCodec>>,
    handlers: Vec<(LifecycleEvent, usize, CodecAction)>,
}

impl<R: Record> Lifecycle<R> {
    pub fn new(record: R) -> Self {
        Self {
            record,
            codecs: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Attach `codec` and register its handlers.
    pub fn attach<C: FieldCodec + 'static>(&mut self, codec: C) -> &mut Self {
        let index = self.codecs.len();
        for (event, action) in codec.events() {
            self.handlers.push((*event, index, *action));
        }
        debug!(
            "Attached {} codec with {} handlers",
            codec.name(),
            codec.events().len()
        );
        self.codecs.push(Box::new(codec));
        self
    }

    /// Builder-style [`Lifecycle::attach`].
    pub fn with<C: FieldCodec + 'static>(mut self, codec: C) -> Self {
        self.attach(codec);
        self
    }

    /// Run every handler registered for `event`, in attach order.
    ///
    /// Stops at the first failing handler.
    pub fn trigger(&mut self, event: LifecycleEvent) -> Result<()> {
        for (registered, index, action) in &self.handlers {
            if *registered != event {
                continue;
            }
            let codec = &self.codecs[*index];
            debug!("{event}: running {action:?} for {} codec", codec.name());
            codec.handle(*action, &mut self.record)?;
        }
        Ok(())
    }

    /// Trigger several events in sequence.
    pub fn trigger_all(&mut self, events: &[LifecycleEvent]) -> Result<()> {
        for event in events {
            self.trigger(*event)?;
        }
        Ok(())
    }

    /// Actions registered for `event`, in the order they run.
    pub fn actions_for(&self, event: LifecycleEvent) -> Vec<CodecAction> {
        self.handlers
            .iter()
            .filter(|(registered, _, _)| *registered == event)
            .map(|(_, _, action)| *action)
            .collect()
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut R {
        &mut self.record
    }

    pub fn into_record(self) -> R {
        self.record
    }
}
