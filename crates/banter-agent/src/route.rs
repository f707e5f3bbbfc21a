// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent routing and the fixed replies.

use banter_core::{ENTITY_TIME, EntityMap, Intent};
use serde::Serialize;
use strum::{Display, IntoStaticStr};

pub const GREETING_REPLY: &str = "Hello! How can I assist you today?";
pub const GOODBYE_REPLY: &str = "Goodbye! Have a great day!";
pub const WEATHER_REPLY: &str =
    "I can provide weather updates. What location are you interested in?";
pub const SMALLTALK_REPLY: &str = "I'm always happy to chat! What's on your mind?";

/// Where a message was sent after classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Greeting,
    Goodbye,
    Weather,
    Reminder,
    Smalltalk,
    /// Handed to the completion API with history.
    Fallback,
}

impl Route {
    /// Picks the route for a classified message.
    ///
    /// A reminder without a `TIME` entity cannot be confirmed and falls back.
    pub fn select(intent: Intent, entities: &EntityMap) -> Self {
        match intent {
            Intent::Greeting => Route::Greeting,
            Intent::Goodbye => Route::Goodbye,
            Intent::Weather => Route::Weather,
            Intent::Reminder if entities.contains_key(ENTITY_TIME) => Route::Reminder,
            Intent::Smalltalk => Route::Smalltalk,
            Intent::Reminder | Intent::Unknown => Route::Fallback,
        }
    }

    /// The canned reply for this route, or `None` for [`Route::Fallback`].
    pub fn fixed_reply(self, entities: &EntityMap) -> Option<String> {
        match self {
            Route::Greeting => Some(GREETING_REPLY.to_string()),
            Route::Goodbye => Some(GOODBYE_REPLY.to_string()),
            Route::Weather => Some(WEATHER_REPLY.to_string()),
            Route::Reminder => entities
                .get(ENTITY_TIME)
                .map(|time| format!("Okay, I will remind you at {time}.")),
            Route::Smalltalk => Some(SMALLTALK_REPLY.to_string()),
            Route::Fallback => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
