use std::{sync::Arc, time::Duration};

use futures::future::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use tracing::debug;

use super::{TOPICS_PER_ROTATION, TopicCandidate, TopicError, TopicResult, TopicSource};

/// REST endpoint of the generation model.
const GENERATE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";
/// Sampling temperature requested from the model.
const TEMPERATURE: f32 = 0.8;
/// Upper bound on the generated output length.
const MAX_OUTPUT_TOKENS: u32 = 2048;
/// Hard deadline for one generation request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Topic source asking a hosted text-generation model for six fresh topics.
#[derive(Clone)]
pub struct GenerativeTopicSource {
    client: Client,
    api_key: Arc<str>,
}

impl GenerativeTopicSource {
    /// Build the HTTP client carrying the generation credential.
    pub fn new(api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: Arc::from(api_key.into()),
        })
    }

    /// Call the model once and return the raw generated text.
    async fn generate(&self) -> TopicResult<String> {
        let request = GenerateRequest::for_prompt(build_prompt(OffsetDateTime::now_utc()));
        let response = self
            .client
            .post(GENERATE_URL)
            .query(&[("key", self.api_key.as_ref())])
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                let reason = if err.is_timeout() {
                    "request timed out".to_string()
                } else {
                    // Strip the URL so the credential in the query string never
                    // reaches the logs.
                    err.without_url().to_string()
                };
                TopicError::UpstreamUnavailable { reason }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TopicError::UpstreamUnavailable {
                reason: format!("provider returned status {status}"),
            });
        }

        let envelope = response.json::<GenerateResponse>().await.map_err(|err| {
            TopicError::UpstreamUnavailable {
                reason: format!("undecodable provider envelope: {}", err.without_url()),
            }
        })?;

        envelope
            .first_text()
            .ok_or_else(|| TopicError::UpstreamUnavailable {
                reason: "provider returned no candidates".to_string(),
            })
    }
}

impl TopicSource for GenerativeTopicSource {
    fn next_six(&self) -> BoxFuture<'static, TopicResult<[TopicCandidate; TOPICS_PER_ROTATION]>> {
        let source = self.clone();
        Box::pin(async move {
            let text = source.generate().await?;
            debug!(raw = %text, "raw provider response");
            parse_topics(&text)
        })
    }
}

/// Instruction sent to the model, dated so topics stay current.
fn build_prompt(today: OffsetDateTime) -> String {
    format!(
        "You are a debate topic generator. Generate exactly 6 diverse, engaging debate topics \
         for today ({date}). Each topic should be:\n\
         - Relevant to current times and trending issues\n\
         - Thought-provoking and balanced (allowing for multiple viewpoints)\n\
         - Accessible to a general audience\n\
         - Cover different domains (technology, society, environment, ethics, economics, \
         politics, culture)\n\n\
         Return ONLY a JSON array with exactly 6 objects, each containing:\n\
         - title: A catchy, short title (max 25 characters)\n\
         - topic: The debate question (clear, specific question)\n\
         - description: Brief explanation of the debate context (1-2 sentences)\n\n\
         Generate 6 fresh, diverse debate topics now:",
        date = today.date()
    )
}

/// Validate the generated payload into exactly six complete candidates.
fn parse_topics(raw: &str) -> TopicResult<[TopicCandidate; TOPICS_PER_ROTATION]> {
    let value: Value =
        serde_json::from_str(raw.trim()).map_err(|source| TopicError::MalformedResponse { source })?;

    let Value::Array(entries) = value else {
        return Err(TopicError::WrongShape {
            got: describe_value(&value).to_string(),
        });
    };
    if entries.len() != TOPICS_PER_ROTATION {
        return Err(TopicError::WrongShape {
            got: format!("an array of {}", entries.len()),
        });
    }

    let mut topics = Vec::with_capacity(TOPICS_PER_ROTATION);
    for (index, entry) in entries.iter().enumerate() {
        topics.push(TopicCandidate {
            title: require_field(entry, index, "title")?,
            topic: require_field(entry, index, "topic")?,
            description: require_field(entry, index, "description")?,
        });
    }

    <[TopicCandidate; TOPICS_PER_ROTATION]>::try_from(topics).map_err(
        |short: Vec<TopicCandidate>| TopicError::WrongShape {
            got: format!("an array of {}", short.len()),
        },
    )
}

/// Extract a non-empty string field from a generated entry.
fn require_field(entry: &Value, index: usize, field: &'static str) -> TopicResult<String> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
        .ok_or(TopicError::IncompleteTopic { index, field })
}

fn describe_value(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

impl GenerateRequest {
    fn for_prompt(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Text of the first candidate part, if the model produced any.
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .next()
            .map(|part| part.text)
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn six_topics() -> Value {
        Value::Array(
            (0..6)
                .map(|i| {
                    json!({
                        "title": format!("Topic {i}"),
                        "topic": format!("Question {i}?"),
                        "description": format!("Context {i}."),
                    })
                })
                .collect(),
        )
    }

    #[test]
    fn six_complete_entries_parse() {
        let raw = six_topics().to_string();
        let topics = parse_topics(&raw).unwrap();
        assert_eq!(topics.len(), TOPICS_PER_ROTATION);
        assert_eq!(topics[0].title, "Topic 0");
        assert_eq!(topics[5].description, "Context 5.");
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_topics("here are your topics!").unwrap_err();
        assert!(matches!(err, TopicError::MalformedResponse { .. }));
    }

    #[test]
    fn non_array_payload_is_wrong_shape() {
        let raw = json!({ "topics": [] }).to_string();
        let err = parse_topics(&raw).unwrap_err();
        assert!(matches!(err, TopicError::WrongShape { got } if got == "an object"));
    }

    #[test]
    fn five_entries_are_wrong_shape() {
        let Value::Array(mut entries) = six_topics() else {
            unreachable!()
        };
        entries.pop();
        let raw = Value::Array(entries).to_string();

        let err = parse_topics(&raw).unwrap_err();
        assert!(matches!(err, TopicError::WrongShape { got } if got == "an array of 5"));
    }

    #[test]
    fn single_incomplete_entry_is_wrong_shape_first() {
        // Length is checked before field presence, so a lone `{title, topic}`
        // entry reports the missing five entries, not the missing field.
        let raw = json!([{ "title": "A", "topic": "B" }]).to_string();
        let err = parse_topics(&raw).unwrap_err();
        assert!(matches!(err, TopicError::WrongShape { got } if got == "an array of 1"));
    }

    #[test]
    fn missing_description_is_incomplete() {
        let Value::Array(mut entries) = six_topics() else {
            unreachable!()
        };
        entries[3].as_object_mut().unwrap().remove("description");
        let raw = Value::Array(entries).to_string();

        let err = parse_topics(&raw).unwrap_err();
        assert!(matches!(
            err,
            TopicError::IncompleteTopic {
                index: 3,
                field: "description"
            }
        ));
    }

    #[test]
    fn blank_field_is_incomplete() {
        let Value::Array(mut entries) = six_topics() else {
            unreachable!()
        };
        entries[1].as_object_mut().unwrap()["topic"] = json!("   ");
        let raw = Value::Array(entries).to_string();

        let err = parse_topics(&raw).unwrap_err();
        assert!(matches!(
            err,
            TopicError::IncompleteTopic {
                index: 1,
                field: "topic"
            }
        ));
    }

    #[test]
    fn prompt_carries_the_run_date() {
        let day = OffsetDateTime::from_unix_timestamp(1_754_438_400).unwrap();
        let prompt = build_prompt(day);
        assert!(prompt.contains("2025-08-06"));
        assert!(prompt.contains("JSON array"));
    }
}
