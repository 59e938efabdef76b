//! Study assistant responders.
//!
//! The local [`RuleResponder`] is a pure, deterministic keyword matcher that
//! stands in for a real model; [`RemoteAssistant`] talks to a chat-completion
//! proxy over HTTP. Both answer through the same [`Responder`] shape, so call
//! sites don't change when one is swapped for the other.

mod remote;
mod rules;

pub use remote::RemoteAssistant;
pub use rules::{default_response, respond, TopicRule, RULES};

use crate::error::AssistantError;

/// Maps a free-text question to an answer.
pub trait Responder {
    fn respond(&self, question: &str) -> Result<String, AssistantError>;
}

/// Local, deterministic responder: ordered keyword rules, first match wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleResponder;

impl Responder for RuleResponder {
    fn respond(&self, question: &str) -> Result<String, AssistantError> {
        Ok(rules::respond(question))
    }
}
