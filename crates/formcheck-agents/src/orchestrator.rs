//! Coaching orchestrator: reference lookup, deviation and feedback.

use formcheck_core::{deviations, normalize, DeviationReport, Error, Pose, Result};
use formcheck_reference::{PoseLoader, PoseQuery, ReferencePoseRecord, ReferenceStore};
use serde::Serialize;
use std::sync::Arc;

use crate::coach::{CoachingFeedback, FeedbackCoach};

pub const MSG_COMPARE_REQUIRED: &str = "pose_type and user_pose are required.";
pub const MSG_FEEDBACK_REQUIRED: &str = "Missing pose_type, category, or user_pose";
pub const MSG_POSE_NAME_REQUIRED: &str = "pose_type and category required";
pub const MSG_REFERENCE_NOT_FOUND: &str = "ReferencePose not found.";
pub const MSG_POSE_NAME_NOT_FOUND: &str = "No matching pose found";

/// Result of the feedback operation
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackOutcome {
    pub feedback: CoachingFeedback,
    pub angle_differences: DeviationReport,
}

/// Entry point for the three coaching operations
pub struct CoachOrchestrator {
    store: Arc<dyn ReferenceStore>,
    loader: Arc<dyn PoseLoader>,
    coach: FeedbackCoach,
}

impl CoachOrchestrator {
    pub fn new(
        store: Arc<dyn ReferenceStore>,
        loader: Arc<dyn PoseLoader>,
        coach: FeedbackCoach,
    ) -> Self {
        Self {
            store,
            loader,
            coach,
        }
    }

    /// Angle differences against the first reference for `pose_type`.
    ///
    /// Category is not consulted here, unlike the other two operations.
    pub async fn compute_deviations(&self, pose_type: &str, user_pose: &Pose) -> Result<DeviationReport> {
        if pose_type.is_empty() || user_pose.is_empty() {
            return Err(Error::InvalidInput(MSG_COMPARE_REQUIRED.to_string()));
        }

        let record = self.find(&PoseQuery::by_pose_type(pose_type), MSG_REFERENCE_NOT_FOUND)?;
        self.compare(&record, user_pose).await
    }

    /// Angle differences plus generated coaching text
    pub async fn compute_feedback(
        &self,
        pose_type: &str,
        category: &str,
        user_pose: &Pose,
    ) -> Result<FeedbackOutcome> {
        if pose_type.is_empty() || category.is_empty() || user_pose.is_empty() {
            return Err(Error::InvalidInput(MSG_FEEDBACK_REQUIRED.to_string()));
        }

        let record = self.find(&PoseQuery::new(pose_type, category), MSG_REFERENCE_NOT_FOUND)?;
        let angle_differences = self.compare(&record, user_pose).await?;
        let feedback = self.coach.coach(&angle_differences).await?;

        Ok(FeedbackOutcome {
            feedback,
            angle_differences,
        })
    }

    /// Display name of the reference configured for the exercise
    pub fn current_pose_name(&self, pose_type: &str, category: &str) -> Result<String> {
        if pose_type.is_empty() || category.is_empty() {
            return Err(Error::InvalidInput(MSG_POSE_NAME_REQUIRED.to_string()));
        }

        self.find(&PoseQuery::new(pose_type, category), MSG_POSE_NAME_NOT_FOUND)
            .map(|record| record.name)
    }

    fn find(&self, query: &PoseQuery, not_found: &str) -> Result<ReferencePoseRecord> {
        match self.store.find(query) {
            Some(record) => {
                tracing::debug!("Reference for {}: {}", query, record);
                Ok(record)
            }
            None => {
                tracing::info!("No reference pose for {}", query);
                Err(Error::NotFound(not_found.to_string()))
            }
        }
    }

    async fn compare(&self, record: &ReferencePoseRecord, user_pose: &Pose) -> Result<DeviationReport> {
        let reference = self.load_reference(record).await?;
        if reference.is_empty() {
            return Err(Error::ReferenceData(format!("reference {} has no joints", record)));
        }

        let report = deviations(&normalize(&reference)?, &normalize(user_pose)?);

        tracing::debug!(
            "Compared {} user joints against {}: {} missing, max {:?}",
            user_pose.len(),
            record,
            report.missing_count(),
            report.max_deviation()
        );

        Ok(report)
    }

    async fn load_reference(&self, record: &ReferencePoseRecord) -> Result<Pose> {
        let loader = Arc::clone(&self.loader);
        let record = record.clone();

        tokio::task::spawn_blocking(move || {
            loader.load_pose_row(&record.csv_path, record.row_index, &record.pose_type)
        })
        .await
        .map_err(|e| Error::Internal(format!("reference loader task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentResult;
    use crate::generator::{StaticGenerator, TextGenerator};
    use async_trait::async_trait;
    use formcheck_core::Point2D;
    use formcheck_reference::{InMemoryReferenceStore, CATEGORY_CROSSFIT, CATEGORY_YOGA};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use formcheck_core::JointName::*;

    /// Serves a fixed pose and counts how often it was asked
    struct StaticLoader {
        pose: Pose,
        calls: AtomicUsize,
    }

    impl PoseLoader for StaticLoader {
        fn load_pose_row(&self, _path: &Path, _row_index: usize, _pose_type: &str) -> Result<Pose> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.pose.clone())
        }
    }

    struct BrokenLoader;

    impl PoseLoader for BrokenLoader {
        fn load_pose_row(&self, path: &Path, _row_index: usize, _pose_type: &str) -> Result<Pose> {
            Err(Error::ReferenceData(format!("{}: unreadable", path.display())))
        }
    }

    #[derive(Default)]
    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        fn model(&self) -> &str {
            "recording"
        }

        async fn generate(&self, prompt: &str) -> AgentResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("자세가 좋아요.".to_string())
        }
    }

    fn reference_pose() -> Pose {
        Pose::new()
            .with(Nose, (0.0, 0.0))
            .with(LeftShoulder, (1.0, 0.0))
            .with(RightShoulder, (0.0, 1.0))
            .with(LeftElbow, (1.0, 1.0))
            .with(LeftWrist, (2.0, 2.0))
            .with(RightElbow, (-0.5, 1.8))
            .with(RightWrist, (-1.0, 2.6))
            .with(LeftHip, (1.2, 3.0))
            .with(RightHip, (0.2, 3.1))
            .with(LeftKnee, (1.4, 4.5))
            .with(RightKnee, (0.1, 4.6))
            .with(LeftAnkle, (1.3, 6.0))
            .with(RightAnkle, (0.0, 6.1))
    }

    fn create_store() -> Arc<InMemoryReferenceStore> {
        Arc::new(InMemoryReferenceStore::from_records([
            ReferencePoseRecord::new(CATEGORY_CROSSFIT, "squat", "스쿼트", "squat.csv", 0),
            ReferencePoseRecord::new(CATEGORY_YOGA, "cat", "고양이 자세", "cat.csv", 5),
        ]))
    }

    fn create_orchestrator(
        generator: Arc<dyn TextGenerator>,
    ) -> (CoachOrchestrator, Arc<StaticLoader>) {
        let loader = Arc::new(StaticLoader {
            pose: reference_pose(),
            calls: AtomicUsize::new(0),
        });
        let orchestrator = CoachOrchestrator::new(
            create_store(),
            loader.clone(),
            FeedbackCoach::with_default_threshold(generator),
        );
        (orchestrator, loader)
    }

    #[tokio::test]
    async fn test_identical_pose_has_zero_deviations() {
        let (orchestrator, _) = create_orchestrator(Arc::new(StaticGenerator::new("ok")));

        // Scaled and shifted copy of the reference
        let user = reference_pose().map_points(|p| Point2D::new(p.x * 120.0 + 300.0, p.y * 120.0 + 50.0));
        let report = orchestrator.compute_deviations("squat", &user).await.unwrap();

        assert_eq!(report.len(), 9);
        for (joint, deviation) in report.iter() {
            let deviation = deviation.unwrap();
            assert!(deviation <= 0.01, "{joint}: {deviation}");
        }
    }

    #[tokio::test]
    async fn test_unknown_pose_type_is_not_found_without_loading() {
        let (orchestrator, loader) = create_orchestrator(Arc::new(StaticGenerator::new("ok")));

        let result = orchestrator.compute_deviations("plank", &reference_pose()).await;

        assert!(matches!(result, Err(Error::NotFound(msg)) if msg == MSG_REFERENCE_NOT_FOUND));
        assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_compute_deviations_ignores_category() {
        let (orchestrator, loader) = create_orchestrator(Arc::new(StaticGenerator::new("ok")));

        assert!(orchestrator.compute_deviations("cat", &reference_pose()).await.is_ok());
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let (orchestrator, _) = create_orchestrator(Arc::new(StaticGenerator::new("ok")));

        let result = orchestrator.compute_deviations("", &reference_pose()).await;
        assert!(matches!(result, Err(Error::InvalidInput(msg)) if msg == MSG_COMPARE_REQUIRED));

        let result = orchestrator.compute_deviations("squat", &Pose::new()).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let result = orchestrator.compute_feedback("squat", "", &reference_pose()).await;
        assert!(matches!(result, Err(Error::InvalidInput(msg)) if msg == MSG_FEEDBACK_REQUIRED));

        let result = orchestrator.current_pose_name("squat", "");
        assert!(matches!(result, Err(Error::InvalidInput(msg)) if msg == MSG_POSE_NAME_REQUIRED));
    }

    #[tokio::test]
    async fn test_feedback_praise_for_matching_pose() {
        let generator = Arc::new(RecordingGenerator::default());
        let (orchestrator, _) = create_orchestrator(generator.clone());

        let outcome = orchestrator
            .compute_feedback("squat", CATEGORY_CROSSFIT, &reference_pose())
            .await
            .unwrap();

        assert!(outcome.feedback.is_praise());
        assert_eq!(outcome.feedback.text, "자세가 좋아요.");
        assert_eq!(outcome.angle_differences.len(), 9);
        assert_eq!(generator.prompts.lock().unwrap()[0], crate::prompts::PRAISE_PROMPT);
    }

    #[tokio::test]
    async fn test_feedback_flags_bent_elbow() {
        let generator = Arc::new(RecordingGenerator::default());
        let (orchestrator, _) = create_orchestrator(generator.clone());

        // Fold the left wrist back towards the shoulder
        let user = reference_pose().with(LeftWrist, (1.6, 0.2));
        let outcome = orchestrator
            .compute_feedback("squat", CATEGORY_CROSSFIT, &user)
            .await
            .unwrap();

        assert!(outcome
            .feedback
            .corrections
            .iter()
            .any(|c| c.joint == LeftElbow && c.degrees > 15.0));
        assert!(generator.prompts.lock().unwrap()[0].contains("왼쪽 팔꿈치가 기준보다"));
    }

    #[tokio::test]
    async fn test_feedback_requires_matching_category() {
        let (orchestrator, _) = create_orchestrator(Arc::new(StaticGenerator::new("ok")));

        let result = orchestrator
            .compute_feedback("squat", CATEGORY_YOGA, &reference_pose())
            .await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_loader_failure_propagates() {
        let orchestrator = CoachOrchestrator::new(
            create_store(),
            Arc::new(BrokenLoader),
            FeedbackCoach::with_default_threshold(Arc::new(StaticGenerator::new("ok"))),
        );

        let result = orchestrator.compute_deviations("squat", &reference_pose()).await;
        assert!(matches!(result, Err(Error::ReferenceData(_))));
    }

    #[tokio::test]
    async fn test_empty_reference_is_a_data_error() {
        let loader = Arc::new(StaticLoader {
            pose: Pose::new(),
            calls: AtomicUsize::new(0),
        });
        let orchestrator = CoachOrchestrator::new(
            create_store(),
            loader,
            FeedbackCoach::with_default_threshold(Arc::new(StaticGenerator::new("ok"))),
        );

        let result = orchestrator.compute_deviations("squat", &reference_pose()).await;
        assert!(matches!(result, Err(Error::ReferenceData(_))));
    }

    #[test]
    fn test_current_pose_name() {
        let (orchestrator, _) = create_orchestrator(Arc::new(StaticGenerator::new("ok")));

        assert_eq!(orchestrator.current_pose_name("cat", CATEGORY_YOGA).unwrap(), "고양이 자세");
        assert!(matches!(
            orchestrator.current_pose_name("cat", CATEGORY_CROSSFIT),
            Err(Error::NotFound(msg)) if msg == MSG_POSE_NAME_NOT_FOUND
        ));
    }
}
