use chrono::{NaiveDate, NaiveDateTime};
use classboard::types::{CourseRecord, QuizRecord};

pub fn at(day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

pub fn sample_courses() -> Vec<CourseRecord> {
    vec![
        CourseRecord {
            id: "bio".into(),
            subject: "Biology".into(),
            day_code: "MWF".into(),
            time: "08:00–09:00".into(),
            created_at: "2024-01-01T00:00:00.000Z".into(),
        },
        CourseRecord {
            id: "chem".into(),
            subject: "Chemistry".into(),
            day_code: "TuTh".into(),
            time: "13:00–14:15".into(),
            created_at: "2024-01-01T00:01:00.000Z".into(),
        },
    ]
}

pub fn sample_quizzes() -> Vec<QuizRecord> {
    vec![
        QuizRecord {
            id: "q1".into(),
            subject_id: "bio".into(),
            subject: "Biology".into(),
            lesson: "Cell Structure".into(),
            day: "F".into(),
            created_at: "2024-01-02T00:00:00.000Z".into(),
        },
        QuizRecord {
            id: "q2".into(),
            subject_id: "bio".into(),
            subject: "Biology".into(),
            lesson: "Mitosis".into(),
            day: "M".into(),
            created_at: "2024-01-02T00:01:00.000Z".into(),
        },
        QuizRecord {
            id: "q3".into(),
            subject_id: "chem".into(),
            subject: "Chemistry".into(),
            lesson: "Bonds".into(),
            day: "Th".into(),
            created_at: "2024-01-02T00:02:00.000Z".into(),
        },
    ]
}

#[cfg(test)]
mod view_tests {
    use super::*;
    use classboard::dashboard::derive_view;
    use classboard::types::QuizKey;

    #[test]
    pub fn test_derive_view() {
        let view = derive_view(&sample_courses(), &sample_quizzes(), &at(5, 10, 0));

        assert_eq!(2, view.total_subjects);
        assert_eq!("Friday, January 5, 2024", view.date);
        assert_eq!(5, view.sessions.len());
        assert_eq!("None", view.status.current_display());
        assert_eq!("Biology", view.status.next_display());
        assert_eq!(
            vec![QuizKey {
                subject_id: "bio".into(),
                quiz_id: "q1".into(),
            }],
            view.expired_quizzes
        );
        assert_eq!(Some(&2), view.quizzes_by_course.get("bio"));
        assert_eq!(Some(&1), view.quizzes_by_course.get("chem"));
    }

    #[test]
    pub fn test_derive_view_empty() {
        let view = derive_view(&[], &[], &at(3, 8, 30));
        assert_eq!(0, view.total_subjects);
        assert!(view.sessions.is_empty());
        assert_eq!("None", view.status.current_display());
        assert_eq!("N/A", view.status.next_display());
        assert!(view.expired_quizzes.is_empty());
    }
}

#[cfg(test)]
mod ledger_tests {
    use super::*;
    use classboard::dashboard::Dashboard;
    use classboard::types::QuizKey;

    fn key(subject_id: &str, quiz_id: &str) -> QuizKey {
        QuizKey {
            subject_id: subject_id.into(),
            quiz_id: quiz_id.into(),
        }
    }

    #[test]
    pub fn test_deletion_requested_once() {
        let mut dashboard = Dashboard::new();
        dashboard.set_courses(sample_courses());
        dashboard.set_quizzes(sample_quizzes());

        let first = dashboard.refresh(&at(5, 9, 1));
        assert_eq!(vec![key("bio", "q1")], first.to_delete);
        assert!(dashboard.is_pending(&key("bio", "q1")));

        // Still expired, but the deletion was already requested.
        let second = dashboard.refresh(&at(5, 9, 2));
        assert_eq!(vec![key("bio", "q1")], second.view.expired_quizzes);
        assert!(second.to_delete.is_empty());
    }

    #[test]
    pub fn test_snapshot_clears_pending() {
        let mut dashboard = Dashboard::new();
        dashboard.set_courses(sample_courses());
        dashboard.set_quizzes(sample_quizzes());
        dashboard.refresh(&at(5, 9, 1));

        let remaining = sample_quizzes()
            .into_iter()
            .filter(|q| q.id != "q1")
            .collect::<Vec<_>>();
        dashboard.set_quizzes(remaining);

        assert!(!dashboard.is_pending(&key("bio", "q1")));
        assert_eq!(2, dashboard.quizzes().len());
        assert!(dashboard.refresh(&at(5, 9, 2)).to_delete.is_empty());
    }

    #[test]
    pub fn test_failed_deletion_retried() {
        let mut dashboard = Dashboard::new();
        dashboard.set_courses(sample_courses());
        dashboard.set_quizzes(sample_quizzes());
        dashboard.refresh(&at(5, 9, 1));

        dashboard.deletion_failed(&key("bio", "q1"));
        assert!(!dashboard.is_pending(&key("bio", "q1")));
        assert_eq!(
            vec![key("bio", "q1")],
            dashboard.refresh(&at(5, 9, 2)).to_delete
        );
    }

    #[test]
    pub fn test_orphaned_quiz_kept() {
        let mut dashboard = Dashboard::new();
        dashboard.set_quizzes(sample_quizzes());

        let refresh = dashboard.refresh(&at(5, 23, 0));
        assert!(refresh.to_delete.is_empty());
        assert_eq!(0, refresh.view.total_subjects);
        assert_eq!(3, dashboard.quizzes().len());
    }
}

#[cfg(test)]
mod config_tests {
    use std::time::Duration;

    use classboard::dashboard::DashboardConfig;

    #[test]
    pub fn test_default() {
        let config = DashboardConfig::default();
        assert_eq!(Duration::from_secs(1), config.clock_tick());
        assert_eq!(Duration::from_secs(60), config.logic_tick());
        assert_eq!(Duration::from_secs(5), config.feed_retry_delay());
        assert!(!config.use_24_hour_clock);
    }

    #[test]
    pub fn test_partial_json() {
        let config =
            serde_json::from_str::<DashboardConfig>(r#"{"logic_tick_secs": 30, "use_24_hour_clock": true}"#)
                .unwrap();
        assert_eq!(Duration::from_secs(1), config.clock_tick());
        assert_eq!(Duration::from_secs(30), config.logic_tick());
        assert!(config.use_24_hour_clock);
    }

    #[test]
    pub fn test_zero_tick_clamped() {
        let config = serde_json::from_str::<DashboardConfig>(r#"{"clock_tick_secs": 0}"#).unwrap();
        assert_eq!(Duration::from_secs(1), config.clock_tick());
    }

    #[test]
    pub fn test_logic_tick_at_most_a_minute() {
        let config =
            serde_json::from_str::<DashboardConfig>(r#"{"logic_tick_secs": 300}"#).unwrap();
        assert_eq!(Duration::from_secs(60), config.logic_tick());

        let config = serde_json::from_str::<DashboardConfig>(r#"{"logic_tick_secs": 0}"#).unwrap();
        assert_eq!(Duration::from_secs(1), config.logic_tick());
    }

    #[test]
    pub fn test_load_from_file() {
        let path = std::env::temp_dir().join("classboard_config_test.json");
        std::fs::write(&path, r#"{"feed_retry_secs": 12}"#).unwrap();

        let config = DashboardConfig::load_from_file(&path).unwrap();
        assert_eq!(Duration::from_secs(12), config.feed_retry_delay());
        assert_eq!(Duration::from_secs(60), config.logic_tick());

        std::fs::remove_file(&path).unwrap();
        assert!(DashboardConfig::load_from_file(&path).is_err());
    }
}

#[cfg(test)]
mod runtime_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use classboard::dashboard::{DashboardConfig, DashboardRuntime};
    use classboard::store::StoreWrapper;

    fn unreachable_store() -> Arc<StoreWrapper> {
        Arc::new(
            StoreWrapper::builder()
                .with_client(reqwest::Client::builder().no_proxy().build().unwrap())
                .with_database_url("http://127.0.0.1:9")
                .with_auth_token("token")
                .with_default_timeout(Duration::from_secs(1))
                .try_build_wrapper()
                .unwrap(),
        )
    }

    #[tokio::test]
    pub async fn test_start_publishes_clock_and_view() {
        let runtime =
            DashboardRuntime::start(unreachable_store(), "user1", DashboardConfig::default());
        assert!(runtime.is_running());

        let mut clock = runtime.clock();
        tokio::time::timeout(Duration::from_secs(5), clock.changed())
            .await
            .unwrap()
            .unwrap();
        let text = clock.borrow().clone();
        assert!(text.ends_with("AM") || text.ends_with("PM"));

        let mut view = runtime.view();
        tokio::time::timeout(Duration::from_secs(5), view.changed())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(0, runtime.current_view().total_subjects);
    }

    #[tokio::test]
    pub async fn test_stop_cancels_timers() {
        let mut runtime =
            DashboardRuntime::start(unreachable_store(), "user1", DashboardConfig::default());
        let mut clock = runtime.clock();

        runtime.stop();

        // The clock task owns the only sender, so the channel closes once it is cancelled.
        tokio::time::timeout(Duration::from_secs(5), async {
            while clock.changed().await.is_ok() {}
        })
        .await
        .unwrap();

        tokio::time::timeout(Duration::from_secs(5), async {
            while runtime.is_running() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();

        // Stopping twice is fine.
        runtime.stop();
        assert!(!runtime.is_running());
    }

    #[test]
    pub fn test_refresh_outside_runtime() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let runtime = rt.block_on(async {
            DashboardRuntime::start(unreachable_store(), "user1", DashboardConfig::default())
        });

        let mut view = runtime.view();
        view.borrow_and_update();
        runtime.refresh_now();
        assert!(view.has_changed().unwrap());
        assert_eq!("None", runtime.current_view().status.current_display());

        drop(runtime);
        drop(rt);
    }
}
