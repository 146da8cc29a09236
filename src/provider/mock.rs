use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::model::IntentLabel;

use super::adapter::{Classification, ProviderAdapter};
use super::error::ProviderError;
use super::parse::parse_verdict;

/// One scripted reaction of a [`ScriptedProvider`].
#[derive(Debug, Clone)]
pub enum ScriptStep {
    /// Answer with a valid label.
    Classify(IntentLabel),
    /// Answer with raw model text, run through the real response parser.
    Raw(String),
    /// Fail with the given error.
    Fail(ProviderError),
    /// Never answer; only the caller's timeout ends the call.
    Hang,
    /// Wait, then perform the inner step.
    Delay(Duration, Box<ScriptStep>),
}

/// Fake provider replaying a script. The last step repeats once the script runs out.
pub struct ScriptedProvider {
    id: String,
    steps: Mutex<VecDeque<ScriptStep>>,
    last: Mutex<ScriptStep>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(id: impl Into<String>, steps: Vec<ScriptStep>) -> Self {
        let last = steps
            .last()
            .cloned()
            .unwrap_or(ScriptStep::Classify(IntentLabel::Low));
        Self {
            id: id.into(),
            steps: Mutex::new(steps.into()),
            last: Mutex::new(last),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn always(id: impl Into<String>, label: IntentLabel) -> Self {
        Self::new(id, vec![ScriptStep::Classify(label)])
    }

    pub fn failing(id: impl Into<String>, error: ProviderError) -> Self {
        Self::new(id, vec![ScriptStep::Fail(error)])
    }

    pub fn hanging(id: impl Into<String>) -> Self {
        Self::new(id, vec![ScriptStep::Hang])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    fn next_step(&self) -> ScriptStep {
        let mut steps = self.steps.lock();
        match steps.pop_front() {
            Some(step) => {
                *self.last.lock() = step.clone();
                step
            }
            None => self.last.lock().clone(),
        }
    }

    async fn perform(step: ScriptStep) -> Result<Classification, ProviderError> {
        let mut step = step;
        loop {
            match step {
                ScriptStep::Classify(label) => {
                    return Ok(Classification {
                        label,
                        reasoning: format!("scripted {label}"),
                        tokens_in: 100,
                        tokens_out: 20,
                    });
                }
                ScriptStep::Raw(text) => {
                    let verdict = parse_verdict(&text)?;
                    return Ok(Classification {
                        label: verdict.label,
                        reasoning: verdict.reasoning,
                        tokens_in: 100,
                        tokens_out: 20,
                    });
                }
                ScriptStep::Fail(error) => return Err(error),
                ScriptStep::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    return Err(ProviderError::transport("hung call resumed"));
                }
                ScriptStep::Delay(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    step = *inner;
                }
            }
        }
    }
}

#[async_trait]
impl ProviderAdapter for ScriptedProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn classify(
        &self,
        prompt: &str,
        _timeout: Duration,
    ) -> Result<Classification, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(prompt.to_string());
        let step = self.next_step();
        Self::perform(step).await
    }
}
