// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use hbt_app::{Frequency, FrequencyKind, HabitId};
use hbt_db::{NewCategory, NewHabit, Store, validate_db_path};
use hbt_testkit::{demo_categories, demo_habits, temp_db_path};

fn bootstrapped() -> Result<Store> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    Ok(store)
}

fn new_habit(name: &str, frequency: Frequency) -> NewHabit {
    NewHabit {
        name: name.to_owned(),
        description: String::new(),
        emoji: None,
        frequency,
        category_id: None,
    }
}

#[test]
fn validate_db_path_rejects_uri_forms() {
    assert!(validate_db_path("").is_err());
    assert!(validate_db_path("file:test.db").is_err());
    assert!(validate_db_path("https://example.com/db.sqlite").is_err());
    assert!(validate_db_path("db.sqlite?mode=ro").is_err());
    assert!(validate_db_path(":memory:").is_ok());
    assert!(validate_db_path("/tmp/hbt.db").is_ok());
}

#[test]
fn bootstrap_creates_empty_schema() -> Result<()> {
    let store = bootstrapped()?;
    assert!(store.list_habits()?.is_empty());
    assert!(store.list_categories()?.is_empty());

    // A second bootstrap validates instead of recreating.
    store.bootstrap()?;
    Ok(())
}

#[test]
fn bootstrap_rejects_schema_missing_required_column() -> Result<()> {
    let store = bootstrapped()?;
    store.raw_connection().execute_batch(
        "
        DROP TABLE habits;
        CREATE TABLE habits (
          id INTEGER PRIMARY KEY,
          name TEXT NOT NULL,
          description TEXT NOT NULL DEFAULT '',
          emoji TEXT,
          category_id INTEGER,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL,
          archived_at TEXT
        );
        ",
    )?;

    let err = store
        .bootstrap()
        .expect_err("schema validation should fail");
    let message = err.to_string();
    assert!(message.contains("table `habits` is missing required columns"));
    assert!(message.contains("frequency_type"));
    assert!(message.contains("frequency_value"));
    Ok(())
}

#[test]
fn bootstrap_rejects_foreign_database() -> Result<()> {
    let store = Store::open_memory()?;
    store
        .raw_connection()
        .execute_batch("CREATE TABLE notes (id INTEGER PRIMARY KEY);")?;

    let err = store.bootstrap().expect_err("missing tables should fail");
    assert!(err.to_string().contains("missing required table `categories`"));
    Ok(())
}

#[test]
fn seed_demo_data_matches_fixtures_and_is_idempotent() -> Result<()> {
    let store = bootstrapped()?;
    store.seed_demo_data()?;
    store.seed_demo_data()?;

    assert_eq!(store.list_categories()?, demo_categories());
    assert_eq!(store.list_habits()?, demo_habits());
    Ok(())
}

#[test]
fn create_and_get_habit_with_category() -> Result<()> {
    let store = bootstrapped()?;
    let category_id = store.create_category(&NewCategory {
        name: "Music".to_owned(),
        color: "#8B5CF6".to_owned(),
        emoji: Some("🎵".to_owned()),
    })?;

    let mut habit = new_habit("Practice guitar", Frequency::times_per_week(4));
    habit.emoji = Some("🎸".to_owned());
    habit.category_id = Some(category_id);
    let id = store.create_habit(&habit)?;

    let loaded = store.get_habit(id)?;
    assert_eq!(loaded.name, "Practice guitar");
    assert_eq!(loaded.frequency.kind, FrequencyKind::TimesPerWeek);
    assert_eq!(loaded.frequency.value, 4);
    assert_eq!(loaded.emoji.as_deref(), Some("🎸"));
    let category = loaded.category.expect("category joined");
    assert_eq!(category.name, "Music");
    assert_eq!(category.emoji.as_deref(), Some("🎵"));
    Ok(())
}

#[test]
fn duplicate_category_names_are_rejected() -> Result<()> {
    let store = bootstrapped()?;
    let category = NewCategory {
        name: "Health".to_owned(),
        color: "#10B981".to_owned(),
        emoji: None,
    };
    store.create_category(&category)?;
    assert!(store.create_category(&category).is_err());
    Ok(())
}

#[test]
fn create_habit_validates_input() -> Result<()> {
    let store = bootstrapped()?;

    let err = store
        .create_habit(&new_habit("  ", Frequency::daily()))
        .expect_err("blank name should fail");
    assert!(err.to_string().contains("name is required"));

    let mut too_often = new_habit("Swim", Frequency::daily());
    too_often.frequency = Frequency {
        kind: FrequencyKind::TimesPerWeek,
        value: 9,
    };
    let err = store
        .create_habit(&too_often)
        .expect_err("frequency out of range should fail");
    assert!(err.to_string().contains("between 1 and 7"));

    let mut unknown_category = new_habit("Swim", Frequency::daily());
    unknown_category.category_id = Some(hbt_app::CategoryId::new(99));
    assert!(store.create_habit(&unknown_category).is_err());
    Ok(())
}

#[test]
fn list_habits_orders_by_id_and_skips_archived() -> Result<()> {
    let store = bootstrapped()?;
    let first = store.create_habit(&new_habit("First", Frequency::daily()))?;
    let second = store.create_habit(&new_habit("Second", Frequency::weekly()))?;
    let third = store.create_habit(&new_habit("Third", Frequency::daily()))?;

    store.archive_habit(second)?;

    let ids: Vec<HabitId> = store.list_habits()?.iter().map(|habit| habit.id).collect();
    assert_eq!(ids, vec![first, third]);
    assert!(store.is_archived(second)?);
    assert_eq!(store.get_habit(second)?.name, "Second");
    Ok(())
}

#[test]
fn update_habit_rewrites_fields() -> Result<()> {
    let store = bootstrapped()?;
    let id = store.create_habit(&new_habit("Read", Frequency::daily()))?;

    let mut update = new_habit("Read fiction", Frequency::times_per_week(2));
    update.description = "before bed".to_owned();
    store.update_habit(id, &update)?;

    let habit = store.get_habit(id)?;
    assert_eq!(habit.name, "Read fiction");
    assert_eq!(habit.description, "before bed");
    assert_eq!(habit.frequency, Frequency::times_per_week(2));
    assert_eq!(NewHabit::from(&habit), update);
    Ok(())
}

#[test]
fn update_and_archive_fail_for_archived_or_missing_habits() -> Result<()> {
    let store = bootstrapped()?;
    let id = store.create_habit(&new_habit("Stretch", Frequency::daily()))?;
    store.archive_habit(id)?;

    let err = store
        .update_habit(id, &new_habit("Stretch more", Frequency::daily()))
        .expect_err("archived habit cannot be updated");
    assert!(err.to_string().contains("not found or archived"));

    let err = store
        .archive_habit(id)
        .expect_err("double archive should fail");
    assert!(err.to_string().contains("already archived"));

    assert!(store.archive_habit(HabitId::new(404)).is_err());
    Ok(())
}

#[test]
fn unknown_frequency_type_is_a_load_error() -> Result<()> {
    let store = bootstrapped()?;
    store.raw_connection().execute_batch(
        "
        INSERT INTO habits (name, frequency_type, frequency_value, created_at, updated_at)
        VALUES ('Odd', 'monthly', 1, '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z');
        ",
    )?;

    let err = store.list_habits().expect_err("monthly is not a frequency");
    assert!(format!("{err:#}").contains("unknown frequency type monthly"));
    Ok(())
}

#[test]
fn file_database_persists_across_opens() -> Result<()> {
    let (_dir, path) = temp_db_path()?;
    {
        let store = Store::open(&path)?;
        store.bootstrap()?;
        store.seed_demo_data()?;
    }

    let store = Store::open(&path)?;
    store.bootstrap()?;
    assert_eq!(store.list_habits()?.len(), 6);
    Ok(())
}
