// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::picker::{GridLayout, Picker, PickerItem, PickerNav};
use crate::{
    COMMON_EMOJIS, Category, CategoryId, Emoji, Frequency, FrequencyKind, Habit, HabitId,
};

const FREQUENCY_VALUE_MAX_DIGITS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    FrequencyKind,
    FrequencyValue,
    Category,
    Emoji,
}

impl FormField {
    pub const ORDER: [Self; 6] = [
        Self::Name,
        Self::Description,
        Self::FrequencyKind,
        Self::FrequencyValue,
        Self::Category,
        Self::Emoji,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::FrequencyKind => "Frequency",
            Self::FrequencyValue => "Times/week",
            Self::Category => "Category",
            Self::Emoji => "Emoji",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormInput {
    NextField,
    PrevField,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Char(char),
    Backspace,
    Confirm,
    Submit,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormModal {
    Category(Picker<Category>),
    Emoji(Picker<Emoji>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Pending,
    Submitted(Habit),
    Cancelled,
}

enum PickerStep {
    Continue,
    Accept,
    Dismiss,
}

fn drive_picker<T: PickerItem>(picker: &mut Picker<T>, input: FormInput) -> PickerStep {
    match input {
        FormInput::Cancel => return PickerStep::Dismiss,
        FormInput::Confirm => return PickerStep::Accept,
        FormInput::Char(ch) => picker.push_char(ch),
        FormInput::Backspace => picker.pop_char(),
        FormInput::Left => picker.navigate(PickerNav::Left),
        FormInput::Right => picker.navigate(PickerNav::Right),
        FormInput::Up => picker.navigate(PickerNav::Up),
        FormInput::Down => picker.navigate(PickerNav::Down),
        FormInput::PageUp => picker.navigate(PickerNav::PageUp),
        FormInput::PageDown => picker.navigate(PickerNav::PageDown),
        FormInput::NextField | FormInput::PrevField | FormInput::Submit => {}
    }
    PickerStep::Continue
}

/// Inline create/edit form for one habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitForm {
    editing: Option<Habit>,
    categories: Vec<Category>,
    name: String,
    description: String,
    frequency_kind: FrequencyKind,
    frequency_value: String,
    category_id: Option<CategoryId>,
    emoji: Option<String>,
    focus: FormField,
    modal: Option<FormModal>,
    validation: Option<String>,
    width: u16,
    height: u16,
}

impl HabitForm {
    /// `editing = None` starts a new habit.
    pub fn new(editing: Option<&Habit>, categories: Vec<Category>, width: u16, height: u16) -> Self {
        let (name, description, frequency, category_id, emoji) = match editing {
            Some(habit) => (
                habit.name.clone(),
                habit.description.clone(),
                habit.frequency,
                habit.category_id(),
                habit.emoji.clone(),
            ),
            None => (String::new(), String::new(), Frequency::daily(), None, None),
        };
        let frequency_value = if frequency.kind == FrequencyKind::TimesPerWeek {
            frequency.value.to_string()
        } else {
            String::new()
        };

        Self {
            editing: editing.cloned(),
            categories,
            name,
            description,
            frequency_kind: frequency.kind,
            frequency_value,
            category_id,
            emoji,
            focus: FormField::Name,
            modal: None,
            validation: None,
            width,
            height,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn frequency_kind(&self) -> FrequencyKind {
        self.frequency_kind
    }

    pub fn frequency_value(&self) -> &str {
        &self.frequency_value
    }

    pub fn emoji(&self) -> Option<&str> {
        self.emoji.as_deref()
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn modal(&self) -> Option<&FormModal> {
        self.modal.as_ref()
    }

    pub fn has_modal(&self) -> bool {
        self.modal.is_some()
    }

    pub fn validation(&self) -> Option<&str> {
        self.validation.as_deref()
    }

    pub fn viewport(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Selected category, falling back to the edited habit's own copy when the
    /// id is no longer among the loaded categories.
    pub fn category(&self) -> Option<&Category> {
        let id = self.category_id?;
        self.categories
            .iter()
            .find(|category| category.id == id)
            .or_else(|| {
                self.editing
                    .as_ref()
                    .and_then(|habit| habit.category.as_ref())
                    .filter(|category| category.id == id)
            })
    }

    /// Fields in traversal order, skipping the times-per-week value unless it
    /// applies.
    pub fn applicable_fields(&self) -> Vec<FormField> {
        FormField::ORDER
            .into_iter()
            .filter(|field| {
                *field != FormField::FrequencyValue
                    || self.frequency_kind == FrequencyKind::TimesPerWeek
            })
            .collect()
    }

    pub fn handle(&mut self, input: FormInput) -> FormOutcome {
        if self.modal.is_some() {
            self.handle_modal(input);
            return FormOutcome::Pending;
        }

        match input {
            FormInput::Cancel => return FormOutcome::Cancelled,
            FormInput::Submit => return self.submit(),
            FormInput::NextField | FormInput::Down => self.move_focus(1),
            FormInput::PrevField | FormInput::Up => self.move_focus(-1),
            FormInput::Left => self.cycle_frequency(-1),
            FormInput::Right => self.cycle_frequency(1),
            FormInput::Char(ch) => self.insert_char(ch),
            FormInput::Backspace => self.delete_char(),
            FormInput::Confirm => match self.focus {
                FormField::Category => self.open_category_picker(),
                FormField::Emoji => self.open_emoji_picker(),
                _ => self.move_focus(1),
            },
            FormInput::PageUp | FormInput::PageDown => {}
        }
        FormOutcome::Pending
    }

    fn move_focus(&mut self, delta: isize) {
        let fields = self.applicable_fields();
        let current = fields
            .iter()
            .position(|field| *field == self.focus)
            .or_else(|| {
                fields
                    .iter()
                    .position(|field| *field == FormField::FrequencyKind)
            })
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(fields.len() as isize) as usize;
        self.focus = fields[next];
    }

    fn cycle_frequency(&mut self, delta: isize) {
        if self.focus == FormField::FrequencyKind {
            self.frequency_kind = self.frequency_kind.cycle(delta);
        }
    }

    fn insert_char(&mut self, ch: char) {
        match self.focus {
            FormField::Name => {
                self.name.push(ch);
                self.validation = None;
            }
            FormField::Description => self.description.push(ch),
            FormField::FrequencyValue => {
                if ch.is_ascii_digit() && self.frequency_value.len() < FREQUENCY_VALUE_MAX_DIGITS {
                    self.frequency_value.push(ch);
                }
            }
            FormField::FrequencyKind if ch == ' ' => self.cycle_frequency(1),
            FormField::FrequencyKind | FormField::Category | FormField::Emoji => {}
        }
    }

    fn delete_char(&mut self) {
        match self.focus {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
            FormField::FrequencyValue => {
                self.frequency_value.pop();
            }
            FormField::FrequencyKind | FormField::Category | FormField::Emoji => {}
        }
    }

    fn open_category_picker(&mut self) {
        let selected = self.category_id;
        let picker = Picker::new(self.categories.clone(), GridLayout::CATEGORY_LIST)
            .with_selected(|category| Some(category.id) == selected);
        self.modal = Some(FormModal::Category(picker));
    }

    fn open_emoji_picker(&mut self) {
        let selected = self.emoji.clone();
        let picker = Picker::new(COMMON_EMOJIS.to_vec(), GridLayout::EMOJI_GRID)
            .with_selected(|emoji| selected.as_deref() == Some(emoji.glyph));
        self.modal = Some(FormModal::Emoji(picker));
    }

    fn handle_modal(&mut self, input: FormInput) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };

        match modal {
            FormModal::Category(picker) => match drive_picker(picker, input) {
                PickerStep::Continue => {}
                PickerStep::Accept => {
                    self.category_id = picker.selected().map(|category| category.id);
                    self.modal = None;
                }
                PickerStep::Dismiss => self.modal = None,
            },
            FormModal::Emoji(picker) => match drive_picker(picker, input) {
                PickerStep::Continue => {}
                PickerStep::Accept => {
                    self.emoji = picker.selected().map(|emoji| emoji.glyph.to_owned());
                    self.modal = None;
                }
                PickerStep::Dismiss => self.modal = None,
            },
        }
    }

    fn submit(&mut self) -> FormOutcome {
        if self.name.trim().is_empty() {
            self.validation = Some("name is required".to_owned());
            self.focus = FormField::Name;
            return FormOutcome::Pending;
        }
        self.validation = None;
        FormOutcome::Submitted(self.to_habit())
    }

    fn to_habit(&self) -> Habit {
        let frequency = match self.frequency_kind {
            FrequencyKind::Daily => Frequency::daily(),
            FrequencyKind::Weekly => Frequency::weekly(),
            FrequencyKind::TimesPerWeek => {
                Frequency::times_per_week(self.frequency_value.trim().parse().unwrap_or(1))
            }
        };

        Habit {
            id: self
                .editing
                .as_ref()
                .map_or(HabitId::UNSAVED, |habit| habit.id),
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            emoji: self.emoji.clone(),
            frequency,
            category: self.category().cloned(),
        }
    }
}
