// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use hbt_app::{Category, Habit, HabitId, HabitService};
use hbt_db::{NewHabit, Store};
use std::sync::{Mutex, MutexGuard};

/// SQLite-backed [`HabitService`]. Worker threads take turns on the single
/// connection.
pub struct DbService {
    store: Mutex<Store>,
}

impl DbService {
    pub fn new(store: Store) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|_| anyhow!("database connection poisoned by an earlier panic; restart hbt"))
    }
}

impl HabitService for DbService {
    fn list_habits(&self) -> Result<Vec<Habit>> {
        self.store()?.list_habits()
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        self.store()?.list_categories()
    }

    fn create_habit(&self, habit: &Habit) -> Result<HabitId> {
        self.store()?.create_habit(&NewHabit::from(habit))
    }

    fn update_habit(&self, habit: &Habit) -> Result<()> {
        self.store()?.update_habit(habit.id, &NewHabit::from(habit))
    }

    fn archive_habit(&self, habit_id: HabitId) -> Result<()> {
        self.store()?.archive_habit(habit_id)
    }
}

#[cfg(test)]
mod tests {
    use super::DbService;
    use anyhow::Result;
    use hbt_app::{Frequency, HabitId, HabitService, HabitsEffect, HabitsMsg, run_effect};
    use hbt_db::Store;
    use hbt_testkit::unsaved_habit;

    fn seeded_service() -> Result<DbService> {
        let store = Store::open_memory()?;
        store.bootstrap()?;
        store.seed_demo_data()?;
        Ok(DbService::new(store))
    }

    #[test]
    fn lists_seeded_rows() -> Result<()> {
        let service = seeded_service()?;
        assert_eq!(service.list_categories()?.len(), 3);
        let habits = service.list_habits()?;
        assert_eq!(habits.len(), 6);
        assert_eq!(habits[0].name, "Morning Exercise");
        Ok(())
    }

    #[test]
    fn save_effect_creates_then_updates() -> Result<()> {
        let service = seeded_service()?;
        let draft = unsaved_habit("Stretch", Frequency::times_per_week(4));

        let HabitsMsg::Saved(Ok(created)) = run_effect(&service, HabitsEffect::Save(draft)) else {
            panic!("create should succeed");
        };
        assert!(!created.id.is_unsaved());
        assert_eq!(service.list_habits()?.len(), 7);

        let mut renamed = created.clone();
        renamed.name = "Long stretch".to_owned();
        let msg = run_effect(&service, HabitsEffect::Save(renamed));
        assert!(matches!(msg, HabitsMsg::Saved(Ok(_))));

        let habits = service.list_habits()?;
        assert!(habits.iter().any(|habit| habit.name == "Long stretch"));
        assert_eq!(habits.len(), 7);
        Ok(())
    }

    #[test]
    fn archive_effect_hides_habit_and_reports_repeat() -> Result<()> {
        let service = seeded_service()?;
        let id = service.list_habits()?[0].id;

        assert_eq!(
            run_effect(&service, HabitsEffect::Archive(id)),
            HabitsMsg::Archived(Ok(id))
        );
        assert_eq!(service.list_habits()?.len(), 5);

        let HabitsMsg::Archived(Err(message)) = run_effect(&service, HabitsEffect::Archive(id))
        else {
            panic!("second archive should fail");
        };
        assert!(message.contains("already archived"), "{message}");
        Ok(())
    }

    #[test]
    fn update_of_missing_habit_fails() -> Result<()> {
        let service = seeded_service()?;
        let mut ghost = unsaved_habit("Ghost", Frequency::daily());
        ghost.id = HabitId::new(999);
        let error = service
            .update_habit(&ghost)
            .expect_err("missing habit should fail");
        assert!(error.to_string().contains("not found"));
        Ok(())
    }
}
