use chrono::{TimeZone, Utc};
use vacation_budget::{
    core::{category_totals, total_amount, ExpenseTracker, Mutation},
    expense::{CategoryColor, ExpenseDraft, ExpenseId},
    storage::{keys, KeyValueStore, MemoryStore, PersistenceAdapter},
};

fn open(store: &MemoryStore) -> ExpenseTracker {
    ExpenseTracker::open(PersistenceAdapter::new(store.clone()))
}

fn draft(description: &str, amount: &str, category: &str, date: &str) -> ExpenseDraft {
    ExpenseDraft::new(
        description,
        amount,
        category,
        vacation_budget::expense::parse_timestamp(date),
    )
}

#[test]
fn hotel_expense_is_listed_and_totalled() {
    let store = MemoryStore::new();
    let mut tracker = open(&store);
    let id = tracker
        .add(draft("Hotel", "150.00", "Accommodation", "2024-06-01"))
        .expect("valid expense");

    let listed = tracker.list(None);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].description, "Hotel");
    assert_eq!(listed[0].category, "Accommodation");
    assert_eq!(listed[0].date, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
    assert_eq!(total_amount(tracker.expenses()), 150.0);
}

#[test]
fn food_expenses_collapse_into_one_category_total() {
    let store = MemoryStore::new();
    let mut tracker = open(&store);
    tracker.add(draft("Lunch", "20", "Food", "2024-06-01")).unwrap();
    tracker.add(draft("Dinner", "30", "Food", "2024-06-01")).unwrap();

    let totals = category_totals(tracker.expenses());
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].category, "Food");
    assert_eq!(totals[0].total, 50.0);
    assert_eq!(totals[0].color, CategoryColor::Yellow);
}

#[test]
fn negative_amount_is_rejected_without_mutation() {
    let store = MemoryStore::new();
    let mut tracker = open(&store);
    tracker.add(draft("Hotel", "150", "Accommodation", "2024-06-01")).unwrap();
    let before = tracker.expenses().to_vec();

    let errors = tracker
        .add(draft("Refund", "-5", "Other", "2024-06-02"))
        .expect_err("negative amounts are invalid");
    assert!(errors.amount);
    assert!(!errors.description && !errors.category && !errors.date);
    assert_eq!(tracker.expenses(), before.as_slice());
    assert_eq!(store.write_count(), 1);
}

#[test]
fn removing_unknown_id_is_silent() {
    let store = MemoryStore::new();
    let mut tracker = open(&store);
    tracker.add(draft("Hotel", "150", "Accommodation", "2024-06-01")).unwrap();
    let before = tracker.expenses().to_vec();

    assert_eq!(tracker.remove(&ExpenseId::from("does-not-exist")), Mutation::NotFound);
    assert_eq!(tracker.expenses(), before.as_slice());
}

#[test]
fn corrupted_store_opens_empty() {
    let store = MemoryStore::new().with_entry(keys::EXPENSES, "definitely not json");
    let tracker = open(&store);
    assert!(tracker.is_empty());
    assert_eq!(tracker.currency().as_str(), "USD");
}

#[test]
fn each_mutation_saves_exactly_once() {
    let store = MemoryStore::new();
    let mut tracker = open(&store);
    let id = tracker.add(draft("Ferry", "30", "Transportation", "2024-06-03")).unwrap();
    assert_eq!(store.write_count(), 1);
    tracker
        .update(&id, draft("Ferry (return)", "60", "Transportation", "2024-06-03"))
        .unwrap();
    assert_eq!(store.write_count(), 2);
    tracker.list(Some("ferry"));
    assert_eq!(store.write_count(), 2);
    tracker.remove(&id);
    assert_eq!(store.write_count(), 3);
}

#[test]
fn reopening_restores_the_same_collection() {
    let store = MemoryStore::new();
    let mut tracker = open(&store);
    tracker.add(draft("Hotel", "150", "Accommodation", "2024-06-01")).unwrap();
    tracker.add(draft("Museum", "18.5", "Activities", "2024-06-02T10:15:00Z")).unwrap();
    tracker.add(draft("Sandals", "24.99", "Shopping", "2024-06-02T16:40:00+02:00")).unwrap();

    let reopened = open(&store);
    assert_eq!(reopened.expenses(), tracker.expenses());
    assert!(store.get(keys::EXPENSES).unwrap().is_some());
}

#[test]
fn adds_grow_the_collection_by_one_with_fresh_ids() {
    let store = MemoryStore::new();
    let mut tracker = open(&store);
    let mut seen = Vec::new();
    for (n, amount) in ["1", "2.5", "1000", "0.01"].iter().enumerate() {
        let before = tracker.len();
        let id = tracker
            .add(draft(&format!("item {n}"), amount, "Other", "2024-06-01"))
            .unwrap();
        assert_eq!(tracker.len(), before + 1);
        assert!(!seen.contains(&id));
        seen.push(id);
    }
}
