// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::*;

pub const MIN_TIMES_PER_WEEK: i32 = 1;
pub const MAX_TIMES_PER_WEEK: i32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrequencyKind {
    Daily,
    Weekly,
    TimesPerWeek,
}

impl FrequencyKind {
    pub const ALL: [Self; 3] = [Self::Daily, Self::Weekly, Self::TimesPerWeek];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::TimesPerWeek => "times_per_week",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "times_per_week" => Some(Self::TimesPerWeek),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::TimesPerWeek => "times per week",
        }
    }

    /// Next kind in `ALL`, wrapping. Negative deltas walk backwards.
    pub fn cycle(self, delta: isize) -> Self {
        let current = Self::ALL
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or(0) as isize;
        let len = Self::ALL.len() as isize;
        Self::ALL[(current + delta).rem_euclid(len) as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    pub kind: FrequencyKind,
    pub value: i32,
}

impl Frequency {
    pub const fn daily() -> Self {
        Self {
            kind: FrequencyKind::Daily,
            value: 1,
        }
    }

    pub const fn weekly() -> Self {
        Self {
            kind: FrequencyKind::Weekly,
            value: 1,
        }
    }

    pub fn times_per_week(value: i32) -> Self {
        Self {
            kind: FrequencyKind::TimesPerWeek,
            value: value.clamp(MIN_TIMES_PER_WEEK, MAX_TIMES_PER_WEEK),
        }
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self::daily()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub color: String,
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub description: String,
    pub emoji: Option<String>,
    pub frequency: Frequency,
    pub category: Option<Category>,
}

impl Habit {
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.as_ref().map(|category| category.id)
    }
}
