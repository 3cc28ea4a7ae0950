// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use hbt_app::{Category, CategoryId, Frequency, Habit, HabitId, HabitService};
use std::path::PathBuf;
use std::sync::Mutex;

const HABIT_VERBS: [&str; 12] = [
    "Practice", "Review", "Clean", "Read", "Write", "Plan", "Stretch", "Call", "Cook", "Walk",
    "Study", "Sketch",
];

const HABIT_NOUNS: [&str; 12] = [
    "guitar", "budget", "desk", "poetry", "journal", "week", "hamstrings", "parents", "dinner",
    "dog", "Spanish", "portraits",
];

const DEMO_EMOJIS: [&str; 8] = ["💪", "📚", "🧘", "📝", "🎓", "💧", "🎸", "🌱"];

pub fn category(id: i64, name: &str, color: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_owned(),
        color: color.to_owned(),
        emoji: None,
    }
}

pub fn habit(id: i64, name: &str, frequency: Frequency, category: Option<&Category>) -> Habit {
    Habit {
        id: HabitId::new(id),
        name: name.to_owned(),
        description: String::new(),
        emoji: None,
        frequency,
        category: category.cloned(),
    }
}

/// Draft as the form would submit it for a new habit.
pub fn unsaved_habit(name: &str, frequency: Frequency) -> Habit {
    habit(HabitId::UNSAVED.get(), name, frequency, None)
}

pub fn demo_categories() -> Vec<Category> {
    vec![
        category(1, "Health", "#10B981"),
        category(2, "Work", "#3B82F6"),
        category(3, "Personal", "#F59E0B"),
    ]
}

/// The six demo habits, in id order, attached to [`demo_categories`].
pub fn demo_habits() -> Vec<Habit> {
    let categories = demo_categories();
    let [health, work, personal] = [&categories[0], &categories[1], &categories[2]];
    let mut habits = vec![
        habit(1, "Morning Exercise", Frequency::daily(), Some(health)),
        habit(2, "Read", Frequency::daily(), Some(personal)),
        habit(3, "Meditate", Frequency::daily(), Some(health)),
        habit(4, "Weekly Review", Frequency::weekly(), Some(work)),
        habit(5, "Learn Something", Frequency::times_per_week(3), Some(personal)),
        habit(6, "Drink Water", Frequency::daily(), Some(health)),
    ];
    let emojis = ["💪", "📚", "🧘", "📝", "🎓", "💧"];
    let descriptions = [
        "30 minutes of physical activity",
        "Read for at least 20 minutes",
        "10 minutes of mindfulness",
        "Review goals and plan the week",
        "Take a course or read documentation",
        "Drink 8 glasses of water",
    ];
    for ((habit, emoji), description) in habits.iter_mut().zip(emojis).zip(descriptions) {
        habit.emoji = Some(emoji.to_owned());
        habit.description = description.to_owned();
    }
    habits
}

pub fn temp_db_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let db_path = dir.path().join("hbt.db");
    Ok((dir, db_path))
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator for larger habit lists.
#[derive(Debug, Clone)]
pub struct HabitFaker {
    rng: DeterministicRng,
    next_id: i64,
}

impl HabitFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            next_id: 1,
        }
    }

    pub fn habit(&mut self, categories: &[Category]) -> Habit {
        let id = self.next_id;
        self.next_id += 1;

        let name = format!("{} {}", self.pick(&HABIT_VERBS), self.pick(&HABIT_NOUNS));
        let frequency = match self.rng.int_n(3) {
            0 => Frequency::daily(),
            1 => Frequency::weekly(),
            _ => Frequency::times_per_week(self.rng.int_n(7) as i32 + 1),
        };
        // One slot past the end leaves the habit uncategorized.
        let category = categories.get(self.rng.int_n(categories.len() + 1)).cloned();
        let emoji = (self.rng.int_n(2) == 0).then(|| self.pick(&DEMO_EMOJIS).to_owned());

        Habit {
            id: HabitId::new(id),
            name,
            description: String::new(),
            emoji,
            frequency,
            category,
        }
    }

    pub fn habits(&mut self, count: usize, categories: &[Category]) -> Vec<Habit> {
        (0..count).map(|_| self.habit(categories)).collect()
    }

    fn pick<'a>(&mut self, values: &[&'a str]) -> &'a str {
        values[self.rng.int_n(values.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    ListHabits,
    ListCategories,
    Create,
    Update,
    Archive,
}

#[derive(Debug, Default)]
struct MemoryState {
    habits: Vec<Habit>,
    categories: Vec<Category>,
    archived: Vec<HabitId>,
    fail_on: Option<FailOn>,
    next_id: i64,
}

/// In-memory [`HabitService`] with switchable failures.
#[derive(Debug, Default)]
pub struct MemoryService {
    state: Mutex<MemoryState>,
}

impl MemoryService {
    pub fn new(habits: Vec<Habit>, categories: Vec<Category>) -> Self {
        let next_id = habits.iter().map(|habit| habit.id.get()).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(MemoryState {
                habits,
                categories,
                archived: Vec::new(),
                fail_on: None,
                next_id,
            }),
        }
    }

    pub fn demo() -> Self {
        Self::new(demo_habits(), demo_categories())
    }

    pub fn fail_on(&self, operation: Option<FailOn>) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_on = operation;
        }
    }

    pub fn snapshot(&self) -> Vec<Habit> {
        self.state
            .lock()
            .map(|state| state.habits.clone())
            .unwrap_or_default()
    }

    pub fn archived(&self) -> Vec<HabitId> {
        self.state
            .lock()
            .map(|state| state.archived.clone())
            .unwrap_or_default()
    }

    fn with_state<T>(
        &self,
        operation: FailOn,
        f: impl FnOnce(&mut MemoryState) -> Result<T>,
    ) -> Result<T> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow!("memory service lock poisoned"))?;
        if state.fail_on == Some(operation) {
            bail!("injected {operation:?} failure");
        }
        f(&mut state)
    }
}

impl HabitService for MemoryService {
    fn list_habits(&self) -> Result<Vec<Habit>> {
        self.with_state(FailOn::ListHabits, |state| Ok(state.habits.clone()))
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        self.with_state(FailOn::ListCategories, |state| Ok(state.categories.clone()))
    }

    fn create_habit(&self, habit: &Habit) -> Result<HabitId> {
        self.with_state(FailOn::Create, |state| {
            let id = HabitId::new(state.next_id);
            state.next_id += 1;
            let mut stored = habit.clone();
            stored.id = id;
            state.habits.push(stored);
            Ok(id)
        })
    }

    fn update_habit(&self, habit: &Habit) -> Result<()> {
        self.with_state(FailOn::Update, |state| {
            let slot = state
                .habits
                .iter_mut()
                .find(|stored| stored.id == habit.id)
                .with_context(|| format!("habit {} not found or archived", habit.id.get()))?;
            *slot = habit.clone();
            Ok(())
        })
    }

    fn archive_habit(&self, id: HabitId) -> Result<()> {
        self.with_state(FailOn::Archive, |state| {
            let position = state
                .habits
                .iter()
                .position(|habit| habit.id == id)
                .with_context(|| format!("habit {} not found or archived", id.get()))?;
            state.habits.remove(position);
            state.archived.push(id);
            Ok(())
        })
    }
}
