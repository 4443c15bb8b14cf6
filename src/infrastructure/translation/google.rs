//! Google Translate (`translate_a/single`) client.
//!
//! The endpoint answers with a loosely typed nested array:
//! `[[["Onion","कांदा",null,null,10]],null,"mr",...]`. Only the head of the
//! outer array (the segment list) and the head of each segment (the
//! translated text) are read; anything else about the shape is ignored,
//! and a shape that does not fit is an error.

use crate::domain::error::DomainError;
use crate::domain::ports::translator::Translator;
use crate::infrastructure::apmc::fetcher::BROWSER_USER_AGENT;
use async_trait::async_trait;
use serde::de::{self, Deserialize, Deserializer, IgnoredAny, SeqAccess, Visitor};
use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
    source_lang: String,
    target_lang: String,
}

impl GoogleTranslator {
    /// Marathi to English against `endpoint`.
    pub fn new(endpoint: Option<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            source_lang: "mr".to_string(),
            target_lang: "en".to_string(),
        })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "google_translate"
    }

    async fn translate(&self, text: &str) -> Result<String, DomainError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", self.source_lang.as_str()),
                ("tl", self.target_lang.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Translation(format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(DomainError::Translation(format!(
                "endpoint returned {}",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| DomainError::Translation(format!("reading response: {e}")))?;
        parse_response(&body)
    }
}

/// Extract and title-case the translated phrase from a response body.
pub fn parse_response(body: &str) -> Result<String, DomainError> {
    let parsed: TranslateResponse = serde_json::from_str(body)
        .map_err(|e| DomainError::Parse(format!("unexpected translation response: {e}")))?;

    let joined: String = parsed
        .0
        .into_iter()
        .filter_map(|segment| segment.0)
        .collect();
    let phrase = title_case(&joined);
    if phrase.is_empty() {
        return Err(DomainError::Translation("empty translation".into()));
    }
    Ok(phrase)
}

/// Uppercase the first letter of each space-separated word, lowercase the rest.
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
        .trim()
        .to_string()
}

type TranslateResponse = Head<Vec<Head<Option<String>>>>;

/// First element of a JSON array; the remaining elements are skipped.
struct Head<T>(T);

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Head<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HeadVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for HeadVisitor<T> {
            type Value = Head<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a non-empty array")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let head = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(Head(head))
            }
        }

        deserializer.deserialize_seq(HeadVisitor(PhantomData))
    }
}
