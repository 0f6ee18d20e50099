//! Repository Integration Tests
//!
//! Tests for the SQLite repositories with an in-memory database.

#[cfg(test)]
mod tests {
    use crate::board::{dispatch_drag, PriorityBoard};
    use crate::domain::{Priority, Task, User};
    use crate::repository::{
        init_db, Repository, SearchableRepository, SessionRepository, TaskPositioningOperations,
        TaskRepository, UserRepository,
    };
    use crate::session::SessionStore;
    use dragdrop_core::{DragPayload, DropEvent};
    use std::path::PathBuf;

    async fn setup_test_db() -> TaskRepository {
        // Use in-memory database for tests
        let conn = init_db(&PathBuf::from(":memory:")).await.expect("Failed to init test DB");
        TaskRepository::new(conn)
    }

    #[tokio::test]
    async fn test_create_task() {
        let repo = setup_test_db().await;

        let task = Task::new(0, "Test task".to_string(), 1);
        let created = repo.create(&task).await.expect("Failed to create");

        assert!(created.id > 0);
        assert_eq!(created.text, "Test task");
        assert!(!created.completed);
        assert_eq!(created.priority, Priority::None);
        assert!(created.created_at.is_some());
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_positions() {
        let repo = setup_test_db().await;

        let a = repo.create(&Task::new(0, "a".to_string(), 1)).await.unwrap();
        let b = repo.create(&Task::new(0, "b".to_string(), 1)).await.unwrap();
        assert_eq!(a.position, 0);
        assert_eq!(b.position, 1);

        // Another user's column starts over at 0
        let other = repo.create(&Task::new(0, "c".to_string(), 2)).await.unwrap();
        assert_eq!(other.position, 0);

        // A different priority column also starts at 0
        let high = repo
            .create(&Task::with_priority(0, "d".to_string(), 1, Priority::High, 0))
            .await
            .unwrap();
        assert_eq!(high.position, 0);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = setup_test_db().await;

        let created = repo.create(&Task::new(0, "Find me".to_string(), 1)).await.unwrap();

        let found = repo.find_by_id(created.id).await.expect("Find failed");
        assert_eq!(found, Some(created));
        assert_eq!(repo.find_by_id(9999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_task() {
        let repo = setup_test_db().await;

        let mut created = repo.create(&Task::new(0, "Original".to_string(), 1)).await.unwrap();
        created.text = "Updated".to_string();
        created.completed = true;
        created.priority = Priority::High;

        let updated = repo.update(&created).await.expect("Update failed");
        assert_eq!(updated.text, "Updated");
        assert!(updated.completed);

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.text, "Updated");
        assert_eq!(found.priority, Priority::High);
    }

    #[tokio::test]
    async fn test_update_missing_task_is_not_found() {
        let repo = setup_test_db().await;
        let ghost = Task::new(42, "ghost".to_string(), 1);
        assert!(repo.update(&ghost).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_task() {
        let repo = setup_test_db().await;

        let created = repo.create(&Task::new(0, "To delete".to_string(), 1)).await.unwrap();
        repo.delete(created.id).await.expect("Delete failed");

        assert_eq!(repo.find_by_id(created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_by_owner_is_isolated() {
        let repo = setup_test_db().await;

        repo.create(&Task::new(0, "mine".to_string(), 1)).await.unwrap();
        repo.create(&Task::new(0, "theirs".to_string(), 2)).await.unwrap();

        let mine = repo.list_by_owner(1).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].text, "mine");
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let repo = setup_test_db().await;

        repo.create(&Task::new(0, "Buy milk".to_string(), 1)).await.unwrap();
        repo.create(&Task::new(0, "Write report".to_string(), 1)).await.unwrap();

        let results = repo.search("MILK").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "Buy milk");
        assert!(repo.search("nothing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reindex_column_closes_gaps() {
        let repo = setup_test_db().await;

        let a = repo.create(&Task::new(0, "a".to_string(), 1)).await.unwrap();
        let b = repo.create(&Task::new(0, "b".to_string(), 1)).await.unwrap();
        let c = repo.create(&Task::new(0, "c".to_string(), 1)).await.unwrap();

        repo.delete(b.id).await.unwrap();
        repo.reindex_column(1, Priority::None).await.unwrap();

        let tasks = repo.list_by_owner(1).await.unwrap();
        let positions: Vec<(u32, i32)> = tasks.iter().map(|t| (t.id, t.position)).collect();
        assert_eq!(positions, vec![(a.id, 0), (c.id, 1)]);
    }

    #[tokio::test]
    async fn test_apply_drag_changes_persists_move() {
        let repo = setup_test_db().await;

        let a = repo
            .create(&Task::with_priority(0, "a".to_string(), 1, Priority::Medium, 0))
            .await
            .unwrap();
        let b = repo
            .create(&Task::with_priority(0, "b".to_string(), 1, Priority::Medium, 0))
            .await
            .unwrap();

        let board = PriorityBoard::from_tasks(repo.list_by_owner(1).await.unwrap());
        let drop = DropEvent {
            task_id: b.id,
            source_priority: Priority::Medium,
            target: DragPayload::Column { priority: Priority::High },
        };
        let result = dispatch_drag(&board, &drop);
        repo.apply_drag_changes(1, &result.board, &result.changes).await.unwrap();

        let moved = repo.find_by_id(b.id).await.unwrap().unwrap();
        assert_eq!(moved.priority, Priority::High);
        assert_eq!(moved.position, 0);
        let stayed = repo.find_by_id(a.id).await.unwrap().unwrap();
        assert_eq!(stayed.priority, Priority::Medium);
        assert_eq!(stayed.position, 0);
    }

    #[tokio::test]
    async fn test_user_repository_round_trip() {
        let conn = init_db(&PathBuf::from(":memory:")).await.unwrap();
        let repo = UserRepository::new(conn);

        let created = repo
            .create(&User::new(0, "user@example.com".to_string(), "digest".to_string()))
            .await
            .unwrap();
        assert!(created.id > 0);

        let by_email = repo.find_by_email("user@example.com").await.unwrap();
        assert_eq!(by_email, Some(created.clone()));
        assert_eq!(repo.find_by_email("other@example.com").await.unwrap(), None);

        repo.delete(created.id).await.unwrap();
        assert_eq!(repo.find_by_id(created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_session_repository_single_record() {
        let conn = init_db(&PathBuf::from(":memory:")).await.unwrap();
        let store = SessionRepository::new(conn);

        assert_eq!(store.get().await.unwrap(), None);
        store.set("first").await.unwrap();
        store.set("second").await.unwrap();
        assert_eq!(store.get().await.unwrap(), Some("second".to_string()));

        store.clear().await.unwrap();
        assert_eq!(store.get().await.unwrap(), None);
        // Clearing an absent record is not an error
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_backed_db_persists_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("taskboard.db");

        let id = {
            let conn = init_db(&db_path).await.unwrap();
            let repo = TaskRepository::new(conn);
            repo.create(&Task::new(0, "durable".to_string(), 1)).await.unwrap().id
        };

        // Reopen: migrations are idempotent and the row is still there
        let conn = init_db(&db_path).await.unwrap();
        let repo = TaskRepository::new(conn);
        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.text, "durable");
    }
}
