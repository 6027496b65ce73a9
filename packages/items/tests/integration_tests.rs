// ABOUTME: Integration tests for todo storage operations
// ABOUTME: Tests CRUD, filtered listing, full-text search and tag aggregation against SQLite

use pretty_assertions::assert_eq;
use todo_items::{
    FilterOption, Todo, TodoCreateInput, TodoFilter, TodoPatch, TodoStorage, TodoUpdateInput,
};
use todo_storage::{Database, ErrorKind, StorageConfig, StorageError};
use todo_tags::TagStorage;

/// Helper to create a migrated in-memory database for testing
async fn create_test_db() -> Database {
    Database::connect(&StorageConfig::in_memory()).await.unwrap()
}

async fn create(storage: &TodoStorage, label: &str, priority: i32) -> Todo {
    storage
        .create_todo(TodoCreateInput {
            label: label.to_string(),
            priority,
        })
        .await
        .unwrap()
}

fn ids(todos: &[Todo]) -> Vec<i64> {
    todos.iter().map(|t| t.id).collect()
}

#[tokio::test]
async fn test_create_todo() {
    let storage = TodoStorage::new(create_test_db().await);

    let todo = create(&storage, "buy milk", 5).await;

    assert!(todo.id > 0);
    assert_eq!(todo.label, "buy milk");
    assert_eq!(todo.priority, 5);
    assert!(!todo.completed);
    assert!(todo.tags.is_empty());
    assert!(todo.modified_at >= todo.created_at);
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let storage = TodoStorage::new(create_test_db().await);

    let created = create(&storage, "water plants", 2).await;
    let fetched = storage.get_todo(created.id).await.unwrap();

    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_assigns_distinct_ids() {
    let storage = TodoStorage::new(create_test_db().await);

    let first = create(&storage, "first", 1).await;
    let second = create(&storage, "second", 1).await;

    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_create_rejects_empty_label() {
    let storage = TodoStorage::new(create_test_db().await);

    let result = storage
        .create_todo(TodoCreateInput {
            label: "  ".to_string(),
            priority: 1,
        })
        .await;

    assert_eq!(result.unwrap_err().kind(), ErrorKind::Validation);
    assert!(storage.list_todos(&TodoFilter::new()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_missing_todo() {
    let storage = TodoStorage::new(create_test_db().await);

    let result = storage.get_todo(404).await;
    assert!(matches!(result, Err(StorageError::NotFound)));
}

#[tokio::test]
async fn test_buy_milk_scenario() {
    let storage = TodoStorage::new(create_test_db().await);

    let created = create(&storage, "buy milk", 5).await;

    let affected = storage
        .patch_todo(
            created.id,
            TodoPatch {
                completed: Some(true),
            },
        )
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let todos = storage.list_todos(&TodoFilter::new()).await.unwrap();
    let todo = todos.iter().find(|t| t.id == created.id).unwrap();

    assert!(todo.completed);
    assert_eq!(todo.label, "buy milk");
    assert_eq!(todo.created_at, created.created_at);
    assert!(todo.modified_at >= todo.created_at);
}

#[tokio::test]
async fn test_empty_patch_is_noop() {
    let storage = TodoStorage::new(create_test_db().await);

    let created = create(&storage, "stay as is", 1).await;

    let affected = storage
        .patch_todo(created.id, TodoPatch::default())
        .await
        .unwrap();
    assert_eq!(affected, 0);

    let fetched = storage.get_todo(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_patch_missing_todo_reports_zero() {
    let storage = TodoStorage::new(create_test_db().await);

    let affected = storage
        .patch_todo(
            77,
            TodoPatch {
                completed: Some(true),
            },
        )
        .await
        .unwrap();
    assert_eq!(affected, 0);
}

#[tokio::test]
async fn test_update_todo() {
    let storage = TodoStorage::new(create_test_db().await);

    let created = create(&storage, "draft", 1).await;

    let updated = storage
        .update_todo(
            created.id,
            TodoUpdateInput {
                label: "final".to_string(),
                priority: 9,
                completed: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.label, "final");
    assert_eq!(updated.priority, 9);
    assert!(updated.completed);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.modified_at >= created.modified_at);
}

#[tokio::test]
async fn test_update_missing_todo_leaves_storage_unchanged() {
    let storage = TodoStorage::new(create_test_db().await);

    let existing = create(&storage, "keep me", 3).await;

    let result = storage
        .update_todo(
            existing.id + 100,
            TodoUpdateInput {
                label: "ghost".to_string(),
                priority: 1,
                completed: true,
            },
        )
        .await;

    assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);

    let todos = storage.list_todos(&TodoFilter::new()).await.unwrap();
    assert_eq!(todos, vec![existing]);
}

#[tokio::test]
async fn test_update_rejects_empty_label() {
    let storage = TodoStorage::new(create_test_db().await);

    let created = create(&storage, "labelled", 3).await;

    let result = storage
        .update_todo(
            created.id,
            TodoUpdateInput {
                label: String::new(),
                priority: 3,
                completed: false,
            },
        )
        .await;

    assert!(matches!(result, Err(StorageError::Validation(_))));
    assert_eq!(storage.get_todo(created.id).await.unwrap().label, "labelled");
}

#[tokio::test]
async fn test_update_does_not_touch_tags() {
    let db = create_test_db().await;
    let storage = TodoStorage::new(db.clone());
    let tags = TagStorage::new(db);

    let created = create(&storage, "tagged item", 1).await;
    tags.create_tag("work").await.unwrap();
    tags.add_item_tag(created.id, "work").await.unwrap();

    let updated = storage
        .update_todo(
            created.id,
            TodoUpdateInput {
                label: "renamed item".to_string(),
                priority: 2,
                completed: false,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.tags, vec!["work".to_string()]);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let storage = TodoStorage::new(create_test_db().await);

    let created = create(&storage, "temporary", 1).await;

    assert_eq!(storage.delete_todo(created.id).await.unwrap(), 1);
    assert_eq!(storage.delete_todo(created.id).await.unwrap(), 0);
    assert!(matches!(
        storage.get_todo(created.id).await,
        Err(StorageError::NotFound)
    ));
}

#[tokio::test]
async fn test_delete_removes_tag_links() {
    let db = create_test_db().await;
    let storage = TodoStorage::new(db.clone());
    let tags = TagStorage::new(db.clone());

    let created = create(&storage, "short lived", 1).await;
    tags.create_tag("work").await.unwrap();
    tags.add_item_tag(created.id, "work").await.unwrap();

    storage.delete_todo(created.id).await.unwrap();

    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tagged")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(links, 0);
    assert!(storage.list_todos_by_tag("work").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_filter_matches_unfiltered_listing() {
    let db = create_test_db().await;
    let storage = TodoStorage::new(db.clone());

    for (label, priority) in [("a", 1), ("b", 5), ("c", 10)] {
        create(&storage, label, priority).await;
    }

    let listed = storage.list_todos(&TodoFilter::new()).await.unwrap();
    let all_ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM todos ORDER BY id")
        .fetch_all(db.pool())
        .await
        .unwrap();

    assert_eq!(ids(&listed), all_ids);
    assert_eq!(listed.len(), 3);
}

#[tokio::test]
async fn test_filter_by_completed() {
    let storage = TodoStorage::new(create_test_db().await);

    let open = create(&storage, "open", 1).await;
    let done = create(&storage, "done", 1).await;
    storage
        .patch_todo(
            done.id,
            TodoPatch {
                completed: Some(true),
            },
        )
        .await
        .unwrap();

    let completed = storage
        .list_todos(&TodoFilter::new().with_completed(true))
        .await
        .unwrap();
    assert_eq!(ids(&completed), vec![done.id]);

    let pending = storage
        .list_todos(&TodoFilter::new().with_completed(false))
        .await
        .unwrap();
    assert_eq!(ids(&pending), vec![open.id]);
}

#[tokio::test]
async fn test_filter_by_priority_range() {
    let storage = TodoStorage::new(create_test_db().await);

    let low = create(&storage, "low", 1).await;
    let mid = create(&storage, "mid", 5).await;
    let high = create(&storage, "high", 9).await;

    let between = storage
        .list_todos(&TodoFilter::new().with_priority_min(1).with_priority_max(5))
        .await
        .unwrap();
    assert_eq!(ids(&between), vec![low.id, mid.id]);

    let at_least = storage
        .list_todos(&TodoFilter::new().with_priority_min(5))
        .await
        .unwrap();
    assert_eq!(ids(&at_least), vec![mid.id, high.id]);

    let at_most = storage
        .list_todos(&TodoFilter::new().with_priority_max(4))
        .await
        .unwrap();
    assert_eq!(ids(&at_most), vec![low.id]);
}

#[tokio::test]
async fn test_filter_by_fulltext() {
    let storage = TodoStorage::new(create_test_db().await);

    let milk = create(&storage, "buy milk", 1).await;
    let dog = create(&storage, "walk the dog", 1).await;
    let more_milk = create(&storage, "milk the cow", 1).await;

    let found = storage
        .list_todos(&TodoFilter::new().with_fulltext("milk"))
        .await
        .unwrap();
    assert_eq!(ids(&found), vec![milk.id, more_milk.id]);

    let found = storage
        .list_todos(&TodoFilter::new().with_fulltext("dog"))
        .await
        .unwrap();
    assert_eq!(ids(&found), vec![dog.id]);
}

#[tokio::test]
async fn test_fulltext_follows_label_updates_and_deletes() {
    let storage = TodoStorage::new(create_test_db().await);

    let todo = create(&storage, "call plumber", 1).await;
    storage
        .update_todo(
            todo.id,
            TodoUpdateInput {
                label: "call electrician".to_string(),
                priority: 1,
                completed: false,
            },
        )
        .await
        .unwrap();

    let old = storage
        .list_todos(&TodoFilter::new().with_fulltext("plumber"))
        .await
        .unwrap();
    assert!(old.is_empty());

    let new = storage
        .list_todos(&TodoFilter::new().with_fulltext("electrician"))
        .await
        .unwrap();
    assert_eq!(ids(&new), vec![todo.id]);

    storage.delete_todo(todo.id).await.unwrap();
    let gone = storage
        .list_todos(&TodoFilter::new().with_fulltext("electrician"))
        .await
        .unwrap();
    assert!(gone.is_empty());
}

#[tokio::test]
async fn test_fulltext_injection_attempt_does_not_touch_schema() {
    let db = create_test_db().await;
    let storage = TodoStorage::new(db.clone());

    create(&storage, "buy milk", 1).await;

    // Either a match-syntax error or no rows; never executed as SQL
    let _ = storage
        .list_todos(&TodoFilter::new().with_fulltext("milk'; DROP TABLE todos; --"))
        .await;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_fulltext_with_punctuation_matches_literally() {
    let storage = TodoStorage::new(create_test_db().await);

    let email = create(&storage, "send e-mail to bob's team", 1).await;
    let milk = create(&storage, "buy milk.", 1).await;
    let reminder = create(&storage, "don't forget the keys", 1).await;

    for (term, expected) in [
        ("e-mail", vec![email.id]),
        ("bob's", vec![email.id]),
        ("don't", vec![reminder.id]),
        ("milk.", vec![milk.id]),
        ("\"milk\"", vec![milk.id]),
    ] {
        let found = storage
            .list_todos(&TodoFilter::new().with_fulltext(term))
            .await
            .unwrap_or_else(|e| panic!("search for {:?} failed: {:?}", term, e));
        assert_eq!(ids(&found), expected, "term: {:?}", term);
    }
}

#[tokio::test]
async fn test_fulltext_operators_are_not_interpreted() {
    let storage = TodoStorage::new(create_test_db().await);

    create(&storage, "buy milk", 1).await;
    create(&storage, "walk the dog", 1).await;

    for term in ["milk OR dog", "label:milk", "mil*", "NEAR(milk dog)"] {
        let found = storage
            .list_todos(&TodoFilter::new().with_fulltext(term))
            .await
            .unwrap_or_else(|e| panic!("search for {:?} failed: {:?}", term, e));
        assert!(found.is_empty(), "term: {:?} matched {:?}", term, found);
    }
}

#[tokio::test]
async fn test_combined_filter() {
    let storage = TodoStorage::new(create_test_db().await);

    let target = create(&storage, "pay rent", 8).await;
    let low_priority = create(&storage, "pay fine", 2).await;
    let done = create(&storage, "pay taxes", 8).await;
    create(&storage, "read book", 8).await;

    storage
        .patch_todo(
            done.id,
            TodoPatch {
                completed: Some(true),
            },
        )
        .await
        .unwrap();

    let filter = TodoFilter::from_options([
        FilterOption::Completed(false),
        FilterOption::PriorityMin(5),
        FilterOption::Fulltext("pay".to_string()),
    ]);

    let found = storage.list_todos(&filter).await.unwrap();
    assert_eq!(ids(&found), vec![target.id]);
    assert!(!ids(&found).contains(&low_priority.id));
}

#[tokio::test]
async fn test_list_todos_includes_sorted_tags() {
    let db = create_test_db().await;
    let storage = TodoStorage::new(db.clone());
    let tags = TagStorage::new(db);

    let todo = create(&storage, "plan trip", 3).await;
    let untagged = create(&storage, "nothing here", 3).await;

    for label in ["travel", "family", "summer"] {
        tags.create_tag(label).await.unwrap();
        tags.add_item_tag(todo.id, label).await.unwrap();
    }

    let listed = storage.list_todos(&TodoFilter::new()).await.unwrap();
    let tagged = listed.iter().find(|t| t.id == todo.id).unwrap();
    let plain = listed.iter().find(|t| t.id == untagged.id).unwrap();

    assert_eq!(tagged.tags, vec!["family", "summer", "travel"]);
    assert!(plain.tags.is_empty());
}

#[tokio::test]
async fn test_list_todos_by_tag() {
    let db = create_test_db().await;
    let storage = TodoStorage::new(db.clone());
    let tags = TagStorage::new(db);

    let report = create(&storage, "write report", 5).await;
    let meeting = create(&storage, "team meeting", 3).await;
    create(&storage, "buy milk", 1).await;

    tags.create_tag("work").await.unwrap();
    tags.create_tag("home").await.unwrap();
    tags.add_item_tag(report.id, "work").await.unwrap();
    tags.add_item_tag(meeting.id, "work").await.unwrap();

    let mut found = ids(&storage.list_todos_by_tag("work").await.unwrap());
    found.sort();
    assert_eq!(found, vec![report.id, meeting.id]);

    assert!(storage.list_todos_by_tag("home").await.unwrap().is_empty());
    let mut padded = ids(&storage.list_todos_by_tag("  work ").await.unwrap());
    padded.sort();
    assert_eq!(padded, found);

    assert!(storage
        .list_todos_by_tag("does-not-exist")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_statement_timeout_is_reported() {
    let db = create_test_db()
        .await
        .with_query_timeout(std::time::Duration::from_nanos(1));
    let storage = TodoStorage::new(db);

    // A 1ns budget cannot be met by a real statement
    let result = storage.list_todos(&TodoFilter::new()).await;
    match result {
        Err(StorageError::Timeout(_)) | Ok(_) => {}
        Err(other) => panic!("Expected Timeout error, got {:?}", other),
    }
}
