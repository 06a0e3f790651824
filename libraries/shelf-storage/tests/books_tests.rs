//! Integration tests for the catalog lookup slice


use test_helpers::*;

#[tokio::test]
async fn get_by_id_finds_exact_entry() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let id = create_test_book(pool, "Dune", "Frank Herbert", Some(1965)).await;

    let book = shelf_storage::books::get_by_id(pool, id)
        .await
        .unwrap()
        .expect("Book should exist");
    assert_eq!(book.title, "Dune");
    assert_eq!(book.author, "Frank Herbert");

    assert!(shelf_storage::books::get_by_id(pool, id + 100)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn title_search_is_partial_case_insensitive_and_title_ordered() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_book(pool, "Dune Messiah", "Frank Herbert", Some(1969)).await;
    create_test_book(pool, "Dune", "Frank Herbert", Some(1965)).await;
    create_test_book(pool, "Foundation", "Isaac Asimov", Some(1951)).await;

    let results = shelf_storage::books::search_by_title(pool, "dune").await.unwrap();
    let titles: Vec<_> = results.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune", "Dune Messiah"]);
}

#[tokio::test]
async fn author_search_is_partial_case_insensitive() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_book(pool, "Dune", "Frank Herbert", Some(1965)).await;
    create_test_book(pool, "Foundation", "Isaac Asimov", Some(1951)).await;

    let results = shelf_storage::books::search_by_author(pool, "herbert").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Dune");
}

#[tokio::test]
async fn author_and_year_search_requires_exact_year() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_book(pool, "Dune", "Frank Herbert", Some(1965)).await;
    create_test_book(pool, "Dune Messiah", "Frank Herbert", Some(1969)).await;

    let results = shelf_storage::books::search_by_author_and_year(pool, "Herbert", 1965)
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Dune");

    assert!(
        shelf_storage::books::search_by_author_and_year(pool, "Herbert", 1900)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn no_match_is_an_empty_set_not_an_error() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    assert!(shelf_storage::books::search_by_title(pool, "nothing")
        .await
        .unwrap()
        .is_empty());
    assert!(shelf_storage::books::search_by_author(pool, "nobody")
        .await
        .unwrap()
        .is_empty());
}
