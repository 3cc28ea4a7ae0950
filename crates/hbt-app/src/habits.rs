// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! State machine behind the habits tab: list browsing, the inline form, and
//! delete confirmation. Storage work is described as [`HabitsEffect`]s and its
//! results come back as [`HabitsMsg`]s, so the tab itself never blocks.

use crate::form::{FormInput, FormOutcome, HabitForm};
use crate::{Category, Habit, HabitId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitsMode {
    List,
    Form(Box<HabitForm>),
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitsCommand {
    Up,
    Down,
    Add,
    Edit,
    Delete,
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitsEffect {
    Load,
    Save(Habit),
    Archive(HabitId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitsSnapshot {
    pub habits: Vec<Habit>,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitsMsg {
    Loaded(Result<HabitsSnapshot, String>),
    Saved(Result<Habit, String>),
    Archived(Result<HabitId, String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupHeader<'a> {
    Category(&'a Category),
    Uncategorized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitGroup<'a> {
    pub header: GroupHeader<'a>,
    pub habits: Vec<&'a Habit>,
}

/// Groups habits under their category, categories in load order, followed by
/// an "Uncategorized" group. Empty groups are omitted. Habits pointing at a
/// category that is not loaded land in "Uncategorized".
pub fn group_habits<'a>(habits: &'a [Habit], categories: &'a [Category]) -> Vec<HabitGroup<'a>> {
    let mut groups: Vec<HabitGroup<'a>> = categories
        .iter()
        .map(|category| HabitGroup {
            header: GroupHeader::Category(category),
            habits: habits
                .iter()
                .filter(|habit| habit.category_id() == Some(category.id))
                .collect(),
        })
        .filter(|group| !group.habits.is_empty())
        .collect();

    let uncategorized: Vec<&Habit> = habits
        .iter()
        .filter(|habit| match habit.category_id() {
            None => true,
            Some(id) => !categories.iter().any(|category| category.id == id),
        })
        .collect();
    if !uncategorized.is_empty() {
        groups.push(HabitGroup {
            header: GroupHeader::Uncategorized,
            habits: uncategorized,
        });
    }
    groups
}

/// Habits flattened in on-screen order; the cursor indexes this list.
pub fn display_order<'a>(habits: &'a [Habit], categories: &'a [Category]) -> Vec<&'a Habit> {
    group_habits(habits, categories)
        .into_iter()
        .flat_map(|group| group.habits)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitsTab {
    habits: Vec<Habit>,
    categories: Vec<Category>,
    cursor: usize,
    mode: HabitsMode,
    error: Option<String>,
    saving: bool,
    archiving: bool,
    width: u16,
    height: u16,
}

impl Default for HabitsTab {
    fn default() -> Self {
        Self::new()
    }
}

impl HabitsTab {
    pub fn new() -> Self {
        Self {
            habits: Vec::new(),
            categories: Vec::new(),
            cursor: 0,
            mode: HabitsMode::List,
            error: None,
            saving: false,
            archiving: false,
            width: 0,
            height: 0,
        }
    }

    /// Effect to run when the tab is first shown.
    pub fn init(&self) -> HabitsEffect {
        HabitsEffect::Load
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> &HabitsMode {
        &self.mode
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn viewport(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn form(&self) -> Option<&HabitForm> {
        match &self.mode {
            HabitsMode::Form(form) => Some(form),
            HabitsMode::List | HabitsMode::ConfirmDelete => None,
        }
    }

    pub fn groups(&self) -> Vec<HabitGroup<'_>> {
        group_habits(&self.habits, &self.categories)
    }

    pub fn selected_habit(&self) -> Option<&Habit> {
        display_order(&self.habits, &self.categories)
            .get(self.cursor)
            .copied()
    }

    /// True while text entry should swallow global shortcuts.
    pub fn is_capturing_input(&self) -> bool {
        matches!(self.mode, HabitsMode::Form(_))
    }

    pub fn has_modal(&self) -> bool {
        self.form().is_some_and(HabitForm::has_modal)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        if let HabitsMode::Form(form) = &mut self.mode {
            form.set_viewport(width, height);
        }
    }

    /// Clears a displayed error. Returns whether there was one.
    pub fn dismiss_error(&mut self) -> bool {
        self.error.take().is_some()
    }

    pub fn handle_command(&mut self, command: HabitsCommand) -> Option<HabitsEffect> {
        if self.dismiss_error() {
            return None;
        }

        match self.mode {
            HabitsMode::List => self.handle_list_command(command),
            HabitsMode::ConfirmDelete => self.handle_confirm_command(command),
            HabitsMode::Form(_) => None,
        }
    }

    pub fn handle_form_input(&mut self, input: FormInput) -> Option<HabitsEffect> {
        if self.dismiss_error() {
            return None;
        }
        if self.saving {
            if input == FormInput::Cancel && self.is_capturing_input() {
                tracing::debug!("form abandoned while save in flight");
                self.saving = false;
                self.mode = HabitsMode::List;
            }
            return None;
        }
        let HabitsMode::Form(form) = &mut self.mode else {
            return None;
        };

        match form.handle(input) {
            FormOutcome::Pending => None,
            FormOutcome::Cancelled => {
                self.mode = HabitsMode::List;
                None
            }
            FormOutcome::Submitted(habit) => {
                self.saving = true;
                Some(HabitsEffect::Save(habit))
            }
        }
    }

    pub fn apply(&mut self, msg: HabitsMsg) -> Option<HabitsEffect> {
        match msg {
            HabitsMsg::Loaded(Ok(snapshot)) => {
                tracing::debug!(
                    habits = snapshot.habits.len(),
                    categories = snapshot.categories.len(),
                    "habits loaded"
                );
                self.habits = snapshot.habits;
                self.categories = snapshot.categories;
                self.error = None;
                self.clamp_cursor();
                if self.habits.is_empty() && self.mode == HabitsMode::ConfirmDelete {
                    self.mode = HabitsMode::List;
                }
                None
            }
            HabitsMsg::Loaded(Err(error)) => {
                tracing::warn!(%error, "load habits failed");
                self.error = Some(error);
                None
            }
            HabitsMsg::Saved(Ok(habit)) => {
                tracing::info!(id = habit.id.get(), name = %habit.name, "habit saved");
                // An abandoned form has already left; a newer one stays open.
                if std::mem::take(&mut self.saving) {
                    self.mode = HabitsMode::List;
                }
                Some(HabitsEffect::Load)
            }
            HabitsMsg::Saved(Err(error)) => {
                tracing::warn!(%error, "save habit failed");
                if std::mem::take(&mut self.saving) {
                    self.mode = HabitsMode::List;
                }
                self.error = Some(error);
                None
            }
            HabitsMsg::Archived(Ok(id)) => {
                tracing::info!(id = id.get(), "habit archived");
                self.archiving = false;
                self.mode = HabitsMode::List;
                if self.cursor > 0 && self.cursor + 1 >= self.habits.len() {
                    self.cursor -= 1;
                }
                Some(HabitsEffect::Load)
            }
            HabitsMsg::Archived(Err(error)) => {
                tracing::warn!(%error, "archive habit failed");
                self.archiving = false;
                self.error = Some(error);
                self.mode = HabitsMode::List;
                None
            }
        }
    }

    fn handle_list_command(&mut self, command: HabitsCommand) -> Option<HabitsEffect> {
        match command {
            HabitsCommand::Up => self.cursor = self.cursor.saturating_sub(1),
            HabitsCommand::Down => {
                if self.cursor + 1 < self.habits.len() {
                    self.cursor += 1;
                }
            }
            HabitsCommand::Add => {
                let form = HabitForm::new(None, self.categories.clone(), self.width, self.height);
                self.mode = HabitsMode::Form(Box::new(form));
            }
            HabitsCommand::Edit => {
                if let Some(habit) = self.selected_habit() {
                    let form = HabitForm::new(
                        Some(habit),
                        self.categories.clone(),
                        self.width,
                        self.height,
                    );
                    self.mode = HabitsMode::Form(Box::new(form));
                }
            }
            HabitsCommand::Delete => {
                if !self.habits.is_empty() {
                    self.mode = HabitsMode::ConfirmDelete;
                }
            }
            HabitsCommand::Confirm | HabitsCommand::Cancel => {}
        }
        None
    }

    fn handle_confirm_command(&mut self, command: HabitsCommand) -> Option<HabitsEffect> {
        match command {
            HabitsCommand::Confirm => {
                if self.archiving {
                    return None;
                }
                let id = self.selected_habit()?.id;
                self.archiving = true;
                Some(HabitsEffect::Archive(id))
            }
            HabitsCommand::Cancel => {
                self.mode = HabitsMode::List;
                None
            }
            HabitsCommand::Up
            | HabitsCommand::Down
            | HabitsCommand::Add
            | HabitsCommand::Edit
            | HabitsCommand::Delete => None,
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.habits.len().saturating_sub(1));
    }
}
