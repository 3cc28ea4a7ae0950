// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;

use crate::habits::{HabitsEffect, HabitsMsg, HabitsSnapshot};
use crate::{Category, Habit, HabitId};

/// Storage operations the habits tab depends on. Implementations are shared
/// with worker threads, so they must be `Send + Sync`.
pub trait HabitService: Send + Sync {
    /// Active (non-archived) habits with their category attached.
    fn list_habits(&self) -> Result<Vec<Habit>>;
    fn list_categories(&self) -> Result<Vec<Category>>;
    fn create_habit(&self, habit: &Habit) -> Result<HabitId>;
    fn update_habit(&self, habit: &Habit) -> Result<()>;
    fn archive_habit(&self, id: HabitId) -> Result<()>;
}

/// Runs one effect to completion and packages the outcome for
/// [`crate::HabitsTab::apply`]. Errors are flattened to their display chain.
pub fn run_effect(service: &dyn HabitService, effect: HabitsEffect) -> HabitsMsg {
    match effect {
        HabitsEffect::Load => HabitsMsg::Loaded(load_snapshot(service).map_err(describe)),
        HabitsEffect::Save(mut habit) => {
            let result = if habit.id.is_unsaved() {
                service.create_habit(&habit).map(|id| {
                    habit.id = id;
                    habit
                })
            } else {
                service.update_habit(&habit).map(|()| habit)
            };
            HabitsMsg::Saved(result.map_err(describe))
        }
        HabitsEffect::Archive(id) => {
            HabitsMsg::Archived(service.archive_habit(id).map(|()| id).map_err(describe))
        }
    }
}

/// Completion for an effect whose worker died before producing one.
pub fn effect_failed(effect: &HabitsEffect, error: String) -> HabitsMsg {
    match effect {
        HabitsEffect::Load => HabitsMsg::Loaded(Err(error)),
        HabitsEffect::Save(_) => HabitsMsg::Saved(Err(error)),
        HabitsEffect::Archive(_) => HabitsMsg::Archived(Err(error)),
    }
}

fn load_snapshot(service: &dyn HabitService) -> Result<HabitsSnapshot> {
    let habits = service.list_habits()?;
    let categories = service.list_categories()?;
    Ok(HabitsSnapshot { habits, categories })
}

fn describe(error: anyhow::Error) -> String {
    format!("{error:#}")
}
