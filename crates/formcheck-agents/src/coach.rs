//! Coach agent: deviation report → coaching text.

use async_trait::async_trait;
use formcheck_core::{DeviationReport, JointName};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::agent::{Agent, AgentResult};
use crate::generator::TextGenerator;
use crate::prompts::{prompt_for, qualifying_joints, FEEDBACK_THRESHOLD_DEGREES};

/// A joint flagged for correction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointCorrection {
    pub joint: JointName,
    pub degrees: f64,
}

/// Coach output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachingFeedback {
    /// Generated text, verbatim
    pub text: String,
    /// Joints over the threshold; empty means the praise prompt was used
    pub corrections: Vec<JointCorrection>,
}

impl CoachingFeedback {
    pub fn is_praise(&self) -> bool {
        self.corrections.is_empty()
    }
}

/// Builds the coaching prompt and hands it to a text generator
pub struct FeedbackCoach {
    generator: Arc<dyn TextGenerator>,
    threshold: f64,
    name: String,
}

impl FeedbackCoach {
    pub fn new(generator: Arc<dyn TextGenerator>, threshold: f64) -> Self {
        Self {
            generator,
            threshold,
            name: "Coach".to_string(),
        }
    }

    pub fn with_default_threshold(generator: Arc<dyn TextGenerator>) -> Self {
        Self::new(generator, FEEDBACK_THRESHOLD_DEGREES)
    }

    /// Generate feedback for a deviation report
    pub async fn coach(&self, report: &DeviationReport) -> AgentResult<CoachingFeedback> {
        let corrections = qualifying_joints(&report.joints(), &report.values(), self.threshold);
        let prompt = prompt_for(&corrections);

        tracing::debug!(
            "{}: {} joint(s) over {:.1} degrees",
            self.name,
            corrections.len(),
            self.threshold
        );

        let text = self.process(&prompt).await?;

        Ok(CoachingFeedback {
            text,
            corrections: corrections
                .into_iter()
                .map(|(joint, degrees)| JointCorrection { joint, degrees })
                .collect(),
        })
    }
}

#[async_trait]
impl Agent for FeedbackCoach {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, input: &str) -> AgentResult<String> {
        self.validate_input(input)?;

        let started = Instant::now();
        let output = self.generator.generate(input).await;
        let elapsed_ms = started.elapsed().as_millis();

        match &output {
            Ok(text) => tracing::info!(
                "{} generated {} chars with {} in {}ms",
                self.name,
                text.chars().count(),
                self.generator.model(),
                elapsed_ms
            ),
            Err(e) => tracing::warn!(
                "{} generation with {} failed after {}ms: {}",
                self.name,
                self.generator.model(),
                elapsed_ms,
                e
            ),
        }

        self.post_process(output?)
    }
}
