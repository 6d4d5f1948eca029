use chrono::Duration;
use cyber_core::model::{
    CompletionStatus, KeyConcept, ModuleContent, QuizQuestion, TrainingSession, UserId,
};
use cyber_core::time::fixed_now;
use storage::repository::{
    NewSessionRecord, NewUserRecord, StorageError, TrainingSessionRepository, UserRepository,
};
use storage::sqlite::SqliteRepository;

fn user_record(email: &str) -> NewUserRecord {
    NewUserRecord {
        email: email.to_owned(),
        organization: "Demo Org".to_owned(),
        industry: "General".to_owned(),
        role: "Employee".to_owned(),
        created_at: fixed_now(),
        risk_score: 0.0,
    }
}

fn rich_content() -> ModuleContent {
    ModuleContent {
        title: "Phishing Awareness".to_owned(),
        introduction: "Spot the fake email before it spots you.".to_owned(),
        key_concepts: vec![KeyConcept {
            concept: "Red flags".to_owned(),
            explanation: "Urgency, credential requests, mismatched senders.".to_owned(),
        }],
        real_world_examples: vec!["Invoice from an unknown vendor".to_owned()],
        best_practices: vec!["Hover before you click".to_owned()],
        quiz: vec![QuizQuestion {
            question: "A bank email asks you to click a link. What do you do?".to_owned(),
            options: vec![
                "Click it".to_owned(),
                "Call the bank directly".to_owned(),
            ],
            correct: "Call the bank directly".to_owned(),
        }],
    }
}

fn session_record(user_id: UserId, content: ModuleContent) -> NewSessionRecord {
    NewSessionRecord {
        user_id,
        module_name: content.title.clone(),
        content,
        status: CompletionStatus::InProgress,
        quiz_score: None,
        started_at: Some(fixed_now()),
        completed_at: None,
    }
}

#[tokio::test]
async fn sqlite_round_trips_content_blob_losslessly() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let user_id = repo.insert_user(user_record("a@x.com")).await.unwrap();
    let content = rich_content();
    let session_id = repo
        .insert_session(session_record(user_id, content.clone()))
        .await
        .unwrap();

    let fetched = repo.get_session(session_id).await.unwrap().unwrap();
    assert_eq!(fetched.content(), &content);
    assert_eq!(fetched.status(), CompletionStatus::InProgress);
    assert_eq!(fetched.started_at(), Some(fixed_now()));
}

#[tokio::test]
async fn sqlite_rejects_duplicate_email() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_dup_email?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.insert_user(user_record("a@x.com")).await.unwrap();
    let err = repo.insert_user(user_record("a@x.com")).await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict));
}

#[tokio::test]
async fn sqlite_lists_sessions_in_insertion_order_and_completes() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_order?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let user_id = repo.insert_user(user_record("a@x.com")).await.unwrap();
    let mut ids = Vec::new();
    for module in ["Phishing Awareness", "Password Security", "Ransomware Prevention"] {
        let record = session_record(user_id, ModuleContent::placeholder(module));
        ids.push(repo.insert_session(record).await.unwrap());
    }

    let sessions = repo.sessions_for_user(user_id).await.unwrap();
    let names: Vec<&str> = sessions.iter().map(TrainingSession::module_name).collect();
    assert_eq!(
        names,
        [
            "Phishing Awareness",
            "Password Security",
            "Ransomware Prevention"
        ]
    );

    let mut second = repo.get_session(ids[1]).await.unwrap().unwrap();
    second.complete(85.0, fixed_now() + Duration::minutes(5));
    repo.update_session(&second).await.unwrap();

    let fetched = repo.get_session(ids[1]).await.unwrap().unwrap();
    assert_eq!(fetched.status(), CompletionStatus::Completed);
    assert_eq!(fetched.quiz_score(), Some(85.0));
    assert_eq!(
        fetched.completed_at(),
        Some(fixed_now() + Duration::minutes(5))
    );
}

#[tokio::test]
async fn sqlite_wipe_removes_users_and_sessions() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_wipe?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let user_id = repo.insert_user(user_record("a@x.com")).await.unwrap();
    let session_id = repo
        .insert_session(session_record(
            user_id,
            ModuleContent::placeholder("Phishing Awareness"),
        ))
        .await
        .unwrap();

    repo.delete_all_sessions().await.unwrap();
    repo.delete_all_users().await.unwrap();

    assert!(repo.get_user(user_id).await.unwrap().is_none());
    assert!(repo.get_session(session_id).await.unwrap().is_none());
}
