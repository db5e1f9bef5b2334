use sea_orm::{Database, DatabaseConnection};

use engine::{Engine, EngineError, ExpenseCmd, ExpensePatch, Money, SplitEntry, Transfer};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn cmd(amount_minor: i64, paid_by: &str, split: &[&str]) -> ExpenseCmd {
    ExpenseCmd {
        amount: Money::new(amount_minor),
        description: format!("paid by {paid_by}"),
        paid_by: paid_by.to_string(),
        split: split.iter().copied().map(SplitEntry::new).collect(),
    }
}

fn transfer(from: &str, to: &str, amount_minor: i64) -> Transfer {
    Transfer {
        from: from.to_string(),
        to: to.to_string(),
        amount: Money::new(amount_minor),
    }
}

#[tokio::test]
async fn create_and_list_keeps_split_order() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_expense(cmd(9000, "Alice", &["Carol", "Alice", "Bob"]))
        .await
        .unwrap();

    let listed = engine.list_expenses().await.unwrap();
    assert_eq!(listed.len(), 1);
    let stored = &listed[0];
    assert_eq!(stored.id, created.id);
    assert_eq!(stored.amount, Money::new(9000));
    assert_eq!(stored.description, "paid by Alice");
    assert_eq!(stored.paid_by, "Alice");
    let names: Vec<_> = stored.split.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Carol", "Alice", "Bob"]);
}

#[tokio::test]
async fn create_rejects_invalid_records() {
    let (engine, _db) = engine_with_db().await;

    let zero = engine.create_expense(cmd(0, "Alice", &["Alice"])).await;
    assert_eq!(zero, Err(EngineError::Validation("Invalid amount".to_string())));

    let no_payer = engine.create_expense(cmd(100, "", &["Alice"])).await;
    assert_eq!(
        no_payer,
        Err(EngineError::Validation("Missing paid_by".to_string()))
    );

    let no_split = engine.create_expense(cmd(100, "Alice", &[])).await;
    assert_eq!(
        no_split,
        Err(EngineError::Validation("Missing split".to_string()))
    );

    assert!(engine.list_expenses().await.unwrap().is_empty());
}

#[tokio::test]
async fn balances_and_settlements_for_single_expense() {
    let (engine, _db) = engine_with_db().await;
    engine
        .create_expense(cmd(9000, "Alice", &["Alice", "Bob", "Carol"]))
        .await
        .unwrap();

    let balances = engine.balances().await.unwrap();
    assert_eq!(balances["Alice"], Money::new(6000));
    assert_eq!(balances["Bob"], Money::new(-3000));
    assert_eq!(balances["Carol"], Money::new(-3000));

    assert_eq!(
        engine.settlements().await.unwrap(),
        vec![
            transfer("Bob", "Alice", 3000),
            transfer("Carol", "Alice", 3000)
        ]
    );
}

#[tokio::test]
async fn balances_across_expenses() {
    let (engine, _db) = engine_with_db().await;
    engine
        .create_expense(cmd(10000, "A", &["A", "B"]))
        .await
        .unwrap();
    engine
        .create_expense(cmd(5000, "B", &["A", "B"]))
        .await
        .unwrap();

    let balances = engine.balances().await.unwrap();
    assert_eq!(balances["A"], Money::new(2500));
    assert_eq!(balances["B"], Money::new(-2500));
    assert_eq!(
        engine.settlements().await.unwrap(),
        vec![transfer("B", "A", 2500)]
    );
}

#[tokio::test]
async fn people_lists_payers_and_participants() {
    let (engine, _db) = engine_with_db().await;
    engine
        .create_expense(cmd(1000, "Dave", &["Alice", "Bob"]))
        .await
        .unwrap();
    engine
        .create_expense(cmd(500, "Bob", &["Carol"]))
        .await
        .unwrap();

    let people: Vec<_> = engine.people().await.unwrap().into_iter().collect();
    assert_eq!(people, vec!["Alice", "Bob", "Carol", "Dave"]);
}

#[tokio::test]
async fn update_replaces_fields_and_split() {
    let (engine, _db) = engine_with_db().await;
    let created = engine
        .create_expense(cmd(9000, "Alice", &["Alice", "Bob", "Carol"]))
        .await
        .unwrap();

    let updated = engine
        .update_expense(
            &created.id.to_string(),
            ExpensePatch {
                amount: Some(Money::new(4000)),
                split: Some(vec![SplitEntry::new("Bob"), SplitEntry::new("Dan")]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.description, created.description);
    assert!(updated.updated_at >= created.updated_at);

    let listed = engine.list_expenses().await.unwrap();
    assert_eq!(listed.len(), 1);
    let names: Vec<_> = listed[0].split.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Bob", "Dan"]);

    let balances = engine.balances().await.unwrap();
    assert_eq!(balances["Alice"], Money::new(4000));
    assert_eq!(balances["Bob"], Money::new(-2000));
    assert_eq!(balances["Dan"], Money::new(-2000));
    assert!(!balances.contains_key("Carol"));
}

#[tokio::test]
async fn update_errors() {
    let (engine, _db) = engine_with_db().await;
    let patch = || ExpensePatch {
        description: Some("Lunch".to_string()),
        ..Default::default()
    };

    let missing = engine
        .update_expense(&Uuid::new_v4().to_string(), patch())
        .await;
    assert!(matches!(missing, Err(EngineError::KeyNotFound(_))));

    let malformed = engine.update_expense("42", patch()).await;
    assert!(matches!(malformed, Err(EngineError::InvalidId(_))));

    let created = engine
        .create_expense(cmd(100, "Alice", &["Bob"]))
        .await
        .unwrap();
    let invalid = engine
        .update_expense(
            &created.id.to_string(),
            ExpensePatch {
                description: Some(String::new()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(invalid, Err(EngineError::Validation(_))));
    assert_eq!(
        engine.list_expenses().await.unwrap()[0].description,
        "paid by Alice"
    );
}

#[tokio::test]
async fn delete_removes_expense_from_balances() {
    let (engine, _db) = engine_with_db().await;
    let first = engine
        .create_expense(cmd(9000, "Alice", &["Alice", "Bob", "Carol"]))
        .await
        .unwrap();
    engine
        .create_expense(cmd(2000, "Bob", &["Alice"]))
        .await
        .unwrap();

    engine.delete_expense(&first.id.to_string()).await.unwrap();

    let listed = engine.list_expenses().await.unwrap();
    assert_eq!(listed.len(), 1);
    let balances = engine.balances().await.unwrap();
    assert_eq!(balances.len(), 2);
    assert_eq!(balances["Bob"], Money::new(2000));
    assert_eq!(balances["Alice"], Money::new(-2000));
}

#[tokio::test]
async fn delete_errors() {
    let (engine, _db) = engine_with_db().await;

    let missing = engine.delete_expense(&Uuid::new_v4().to_string()).await;
    assert_eq!(
        missing,
        Err(EngineError::KeyNotFound("Expense not found".to_string()))
    );

    let malformed = engine.delete_expense("not-a-valid-id").await;
    assert_eq!(
        malformed,
        Err(EngineError::InvalidId("Invalid Expense ID format".to_string()))
    );
}

#[tokio::test]
async fn largest_amounts_fold_without_overflow() {
    let (engine, _db) = engine_with_db().await;
    for _ in 0..3 {
        engine
            .create_expense(ExpenseCmd {
                amount: Money::MAX_EXPENSE,
                ..cmd(0, "Alice", &["Bob"])
            })
            .await
            .unwrap();
    }

    let too_large = engine
        .create_expense(ExpenseCmd {
            amount: Money::from_major(9.0e16).unwrap(),
            ..cmd(0, "Alice", &["Bob"])
        })
        .await;
    assert!(matches!(too_large, Err(EngineError::Validation(_))));

    let total = Money::new(Money::MAX_EXPENSE.minor() * 3);
    let balances = engine.balances().await.unwrap();
    assert_eq!(balances["Alice"], total);
    assert_eq!(balances["Bob"], -total);
    assert_eq!(
        engine.settlements().await.unwrap(),
        vec![transfer("Bob", "Alice", total.minor())]
    );
}

#[tokio::test]
async fn empty_store_has_nothing_to_settle() {
    let (engine, _db) = engine_with_db().await;
    assert!(engine.people().await.unwrap().is_empty());
    assert!(engine.balances().await.unwrap().is_empty());
    assert!(engine.settlements().await.unwrap().is_empty());
}
