//! Integration tests for the MySQL repositories.
//!
//! These run against a real MySQL database using testcontainers and need
//! Docker, so they are ignored by default:
//! `cargo test -p recall-repository -- --ignored`

mod common;

use common::TestDatabase;
use recall_core::{CategoryId, FlashcardChanges, FlashcardId, NewFlashcard, UserId};
use recall_repository::{
    CategoryRepository, FlashcardRepository, MySqlCategoryRepository, MySqlFlashcardRepository,
};

fn user(id: &str) -> UserId {
    UserId::parse(id).unwrap()
}

fn card(name: &str, content: &str) -> NewFlashcard {
    NewFlashcard {
        name: name.to_string(),
        content: content.to_string(),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_category_crud_is_scoped_to_user() {
    let db = TestDatabase::new().await;
    let repo = MySqlCategoryRepository::new(db.pool());
    let u1 = user("u1");
    let u2 = user("u2");

    let id = repo.insert(&u1, "Animals").await.unwrap();
    assert!(id.value() > 0);

    let found = repo.find_all(&u1).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Animals");
    assert_eq!(found[0].owner_id, u1);
    assert!(found[0].created_at.is_some());
    assert!(repo.find_all(&u2).await.unwrap().is_empty());

    assert!(!repo.update(&u2, id, "Stolen").await.unwrap());
    assert!(repo.update(&u1, id, "Pets").await.unwrap());
    let renamed = repo.find_all(&u1).await.unwrap();
    assert_eq!(renamed[0].name, "Pets");
    assert!(renamed[0].updated_at.is_some());

    assert!(!repo.delete(&u2, id).await.unwrap());
    assert!(repo.delete(&u1, id).await.unwrap());
    assert!(repo.find_all(&u1).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_category_reports_no_match() {
    let db = TestDatabase::new().await;
    let repo = MySqlCategoryRepository::new(db.pool());

    let matched = repo
        .update(&user("u1"), CategoryId::new(9999), "Nothing")
        .await
        .unwrap();
    assert!(!matched);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_flashcard_lifecycle() {
    let db = TestDatabase::new().await;
    let categories = MySqlCategoryRepository::new(db.pool());
    let flashcards = MySqlFlashcardRepository::new(db.pool());
    let u1 = user("u1");

    let animals = categories.insert(&u1, "Animals").await.unwrap();
    let id = flashcards
        .insert(&u1, animals, &card("Cat", "A small feline"))
        .await
        .unwrap();

    let found = flashcards
        .find_by_id(&u1, animals, id)
        .await
        .unwrap()
        .expect("flashcard should exist");
    assert_eq!(found.content, "A small feline");
    assert!(found.is_existing());

    let matched = flashcards
        .update(
            &u1,
            animals,
            id,
            &FlashcardChanges {
                name: "Cat".to_string(),
                content: "Purrs".to_string(),
                category_id: None,
            },
        )
        .await
        .unwrap();
    assert!(matched);

    let listed = flashcards.find_by_category(&u1, animals).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content, "Purrs");

    assert!(flashcards.delete(&u1, animals, id).await.unwrap());
    assert!(flashcards.find_by_id(&u1, animals, id).await.unwrap().is_none());
    assert!(!flashcards.delete(&u1, animals, id).await.unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_many_and_move() {
    let db = TestDatabase::new().await;
    let categories = MySqlCategoryRepository::new(db.pool());
    let flashcards = MySqlFlashcardRepository::new(db.pool());
    let u1 = user("u1");

    let from = categories.insert(&u1, "From").await.unwrap();
    let to = categories.insert(&u1, "To").await.unwrap();

    let inserted = flashcards
        .insert_many(&u1, from, &[card("A", "1"), card("B", "2"), card("C", "3")])
        .await
        .unwrap();
    assert_eq!(inserted, 3);
    assert_eq!(flashcards.insert_many(&u1, from, &[]).await.unwrap(), 0);

    let listed = flashcards.find_by_category(&u1, from).await.unwrap();
    let moved = listed[0].id;

    let matched = flashcards
        .update(
            &u1,
            from,
            moved,
            &FlashcardChanges {
                name: "A".to_string(),
                content: "1".to_string(),
                category_id: Some(to),
            },
        )
        .await
        .unwrap();
    assert!(matched);

    assert_eq!(flashcards.find_by_category(&u1, from).await.unwrap().len(), 2);
    let in_target = flashcards.find_by_category(&u1, to).await.unwrap();
    assert_eq!(in_target.len(), 1);
    assert_eq!(in_target[0].id, moved);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_category_delete_cascades_to_flashcards() {
    let db = TestDatabase::new().await;
    let categories = MySqlCategoryRepository::new(db.pool());
    let flashcards = MySqlFlashcardRepository::new(db.pool());
    let u1 = user("u1");

    let animals = categories.insert(&u1, "Animals").await.unwrap();
    flashcards
        .insert(&u1, animals, &card("Cat", "A small feline"))
        .await
        .unwrap();

    assert!(categories.delete(&u1, animals).await.unwrap());
    assert!(flashcards.find_by_category(&u1, animals).await.unwrap().is_empty());
    assert!(flashcards
        .find_by_id(&u1, animals, FlashcardId::new(1))
        .await
        .unwrap()
        .is_none());
}
