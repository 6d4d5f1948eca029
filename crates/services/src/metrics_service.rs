use std::sync::Arc;

use serde::Serialize;

use cyber_core::model::{
    CompletionStatus, DEFAULT_MODULE_COUNT, SessionId, TrainingSession, User, UserId,
};
use storage::repository::{TrainingSessionRepository, UserRepository};

use crate::error::MetricsError;

// ─── Dashboard Views ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub email: String,
    pub organization: String,
    pub role: String,
    pub industry: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingCompletion {
    pub completed: usize,
    pub total: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub training_completion: TrainingCompletion,
    pub average_quiz_score: f64,
    pub risk_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub date: String,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleProgress {
    pub id: SessionId,
    pub name: String,
    pub status: CompletionStatus,
    pub score: Option<f64>,
}

/// Everything the dashboard renders for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub user: UserSummary,
    pub kpis: KpiSummary,
    pub completion_timeline: Vec<TimelinePoint>,
    pub modules: Vec<ModuleProgress>,
}

/// A dashboard banner entry. The list is static; there is no per-user logic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: &'static str,
}

// ─── Service ───────────────────────────────────────────────────────────────────

/// Derives dashboard KPIs by scanning a user's sessions on demand.
pub struct MetricsService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn TrainingSessionRepository>,
}

impl MetricsService {
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn TrainingSessionRepository>,
    ) -> Self {
        Self { users, sessions }
    }

    /// Computes the dashboard payload for a user.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::UserNotFound` if the user id does not resolve.
    pub async fn dashboard_metrics(
        &self,
        user_id: UserId,
    ) -> Result<DashboardMetrics, MetricsError> {
        let user = self
            .users
            .get_user(user_id)
            .await?
            .ok_or(MetricsError::UserNotFound)?;
        let sessions = self.sessions.sessions_for_user(user_id).await?;

        Ok(build_metrics(&user, &sessions))
    }

    /// The static alert banner list.
    #[must_use]
    pub fn security_alerts() -> Vec<Alert> {
        vec![
            Alert {
                kind: "info",
                message: "\u{1f4da} Complete Phishing Awareness module this week.",
            },
            Alert {
                kind: "warning",
                message: "\u{26a0}\u{fe0f} Password Security score is below 70%.",
            },
            Alert {
                kind: "success",
                message: "\u{1f389} Great job completing 3 out of 4 modules!",
            },
        ]
    }
}

fn build_metrics(user: &User, sessions: &[TrainingSession]) -> DashboardMetrics {
    let completed = sessions
        .iter()
        .filter(|s| s.status() == CompletionStatus::Completed)
        .count();

    // "Modules available" rather than "sessions created" while the user has
    // no sessions yet; also keeps the percentage denominator nonzero.
    let total = if sessions.is_empty() {
        DEFAULT_MODULE_COUNT
    } else {
        sessions.len()
    };

    #[allow(clippy::cast_precision_loss)]
    let percentage = if total > 0 {
        completed as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    #[allow(clippy::cast_precision_loss)]
    let average_quiz_score = if completed > 0 {
        let sum: f64 = sessions
            .iter()
            .filter(|s| s.status() == CompletionStatus::Completed)
            .map(|s| s.quiz_score().unwrap_or(0.0))
            .sum();
        round_to_tenth(sum / completed as f64)
    } else {
        0.0
    };

    // Placeholder series kept for dashboard compatibility: only the last
    // point reflects live data.
    let completion_timeline = vec![
        TimelinePoint {
            date: "Day 1".to_owned(),
            completed: 0,
        },
        TimelinePoint {
            date: "Day 2".to_owned(),
            completed: 1,
        },
        TimelinePoint {
            date: "Day 3".to_owned(),
            completed: 2,
        },
        TimelinePoint {
            date: "Day 4".to_owned(),
            completed,
        },
    ];

    let modules = sessions
        .iter()
        .map(|s| ModuleProgress {
            id: s.id(),
            name: s.module_name().to_owned(),
            status: s.status(),
            score: s.quiz_score(),
        })
        .collect();

    DashboardMetrics {
        user: UserSummary {
            email: user.email().to_owned(),
            organization: user.organization().to_owned(),
            role: user.role().to_owned(),
            industry: user.industry().to_owned(),
        },
        kpis: KpiSummary {
            training_completion: TrainingCompletion {
                completed,
                total,
                percentage,
            },
            average_quiz_score,
            risk_score: user.risk_score(),
        },
        completion_timeline,
        modules,
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyber_core::model::ModuleContent;
    use cyber_core::time::fixed_now;

    fn sample_user() -> User {
        User::new(
            UserId::new(1),
            "a@x.com",
            "Demo Org",
            "General",
            "Employee",
            fixed_now(),
        )
        .unwrap()
    }

    fn session(id: u64, status: CompletionStatus, score: Option<f64>) -> TrainingSession {
        let started = (status != CompletionStatus::NotStarted).then(fixed_now);
        let completed = (status == CompletionStatus::Completed).then(fixed_now);
        TrainingSession::from_persisted(
            SessionId::new(id),
            UserId::new(1),
            "Phishing Awareness",
            ModuleContent::placeholder("Phishing Awareness"),
            status,
            score,
            started,
            completed,
        )
        .unwrap()
    }

    #[test]
    fn zero_sessions_uses_catalog_default() {
        let metrics = build_metrics(&sample_user(), &[]);
        assert_eq!(metrics.kpis.training_completion.completed, 0);
        assert_eq!(metrics.kpis.training_completion.total, 4);
        assert!((metrics.kpis.training_completion.percentage - 0.0).abs() < f64::EPSILON);
        assert!((metrics.kpis.average_quiz_score - 0.0).abs() < f64::EPSILON);
        assert!(metrics.modules.is_empty());
    }

    #[test]
    fn mixed_sessions_compute_percentage_and_average() {
        let sessions = vec![
            session(1, CompletionStatus::Completed, Some(88.0)),
            session(2, CompletionStatus::Completed, Some(85.0)),
            session(3, CompletionStatus::InProgress, None),
            session(4, CompletionStatus::NotStarted, None),
        ];
        let metrics = build_metrics(&sample_user(), &sessions);

        assert_eq!(metrics.kpis.training_completion.completed, 2);
        assert_eq!(metrics.kpis.training_completion.total, 4);
        assert!((metrics.kpis.training_completion.percentage - 50.0).abs() < f64::EPSILON);
        assert!((metrics.kpis.average_quiz_score - 86.5).abs() < f64::EPSILON);
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        let sessions = vec![
            session(1, CompletionStatus::Completed, Some(70.0)),
            session(2, CompletionStatus::Completed, Some(70.0)),
            session(3, CompletionStatus::Completed, Some(71.0)),
        ];
        let metrics = build_metrics(&sample_user(), &sessions);
        // 211 / 3 = 70.333...
        assert!((metrics.kpis.average_quiz_score - 70.3).abs() < f64::EPSILON);
    }

    #[test]
    fn completed_without_score_counts_as_zero() {
        let sessions = vec![
            session(1, CompletionStatus::Completed, Some(80.0)),
            session(2, CompletionStatus::Completed, None),
        ];
        let metrics = build_metrics(&sample_user(), &sessions);
        assert!((metrics.kpis.average_quiz_score - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn timeline_last_point_tracks_live_count() {
        let sessions = vec![
            session(1, CompletionStatus::Completed, Some(90.0)),
            session(2, CompletionStatus::Completed, Some(80.0)),
            session(3, CompletionStatus::Completed, Some(70.0)),
        ];
        let metrics = build_metrics(&sample_user(), &sessions);

        assert_eq!(metrics.completion_timeline.len(), 4);
        assert_eq!(metrics.completion_timeline[0].completed, 0);
        assert_eq!(metrics.completion_timeline[1].completed, 1);
        assert_eq!(metrics.completion_timeline[2].completed, 2);
        assert_eq!(metrics.completion_timeline[3].completed, 3);
        assert_eq!(metrics.completion_timeline[3].date, "Day 4");
    }

    #[test]
    fn alerts_are_static_three_entries() {
        let alerts = MetricsService::security_alerts();
        assert_eq!(alerts.len(), 3);
        assert_eq!(alerts[0].kind, "info");
        assert_eq!(alerts[1].kind, "warning");
        assert_eq!(alerts[2].kind, "success");
    }
}
