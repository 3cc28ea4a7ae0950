// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use hbt_app::{
    Category, CategoryId, Frequency, FrequencyKind, Habit, HabitId, MAX_TIMES_PER_WEEK,
    MIN_TIMES_PER_WEEK,
};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub const APP_NAME: &str = "hbt";

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    ("categories", &["id", "name", "color", "emoji", "created_at"]),
    (
        "habits",
        &[
            "id",
            "name",
            "description",
            "emoji",
            "frequency_type",
            "frequency_value",
            "category_id",
            "created_at",
            "updated_at",
            "archived_at",
        ],
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RequiredIndex {
    name: &'static str,
    create_sql: &'static str,
}

const REQUIRED_INDEXES: &[RequiredIndex] = &[
    RequiredIndex {
        name: "idx_categories_name",
        create_sql: "CREATE UNIQUE INDEX IF NOT EXISTS idx_categories_name ON categories (name);",
    },
    RequiredIndex {
        name: "idx_habits_category_id",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_habits_category_id ON habits (category_id);",
    },
    RequiredIndex {
        name: "idx_habits_archived_at",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_habits_archived_at ON habits (archived_at);",
    },
];

const HABIT_SELECT: &str = "
    SELECT
      h.id, h.name, h.description, h.emoji, h.frequency_type, h.frequency_value,
      c.id, c.name, c.color, c.emoji
    FROM habits h
    LEFT JOIN categories c ON c.id = h.category_id
";

struct DemoHabit {
    name: &'static str,
    description: &'static str,
    emoji: &'static str,
    frequency: Frequency,
    category: &'static str,
}

const DEMO_CATEGORIES: [(&str, &str); 3] = [
    ("Health", "#10B981"),
    ("Work", "#3B82F6"),
    ("Personal", "#F59E0B"),
];

const DEMO_HABITS: [DemoHabit; 6] = [
    DemoHabit {
        name: "Morning Exercise",
        description: "30 minutes of physical activity",
        emoji: "💪",
        frequency: Frequency::daily(),
        category: "Health",
    },
    DemoHabit {
        name: "Read",
        description: "Read for at least 20 minutes",
        emoji: "📚",
        frequency: Frequency::daily(),
        category: "Personal",
    },
    DemoHabit {
        name: "Meditate",
        description: "10 minutes of mindfulness",
        emoji: "🧘",
        frequency: Frequency::daily(),
        category: "Health",
    },
    DemoHabit {
        name: "Weekly Review",
        description: "Review goals and plan the week",
        emoji: "📝",
        frequency: Frequency::weekly(),
        category: "Work",
    },
    DemoHabit {
        name: "Learn Something",
        description: "Take a course or read documentation",
        emoji: "🎓",
        frequency: Frequency {
            kind: FrequencyKind::TimesPerWeek,
            value: 3,
        },
        category: "Personal",
    },
    DemoHabit {
        name: "Drink Water",
        description: "Drink 8 glasses of water",
        emoji: "💧",
        frequency: Frequency::daily(),
        category: "Health",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabit {
    pub name: String,
    pub description: String,
    pub emoji: Option<String>,
    pub frequency: Frequency,
    pub category_id: Option<CategoryId>,
}

pub type UpdateHabit = NewHabit;

impl From<&Habit> for NewHabit {
    fn from(habit: &Habit) -> Self {
        Self {
            name: habit.name.clone(),
            description: habit.description.clone(),
            emoji: habit.emoji.clone(),
            frequency: habit.frequency,
            category_id: habit.category_id(),
        }
    }
}

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let printable = path.to_string_lossy().to_string();
        validate_db_path(&printable)?;
        let conn = Connection::open(path)
            .with_context(|| format!("open database at {}", path.display()))?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory database")?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn raw_connection(&self) -> &Connection {
        &self.conn
    }

    pub fn bootstrap(&self) -> Result<()> {
        if has_user_tables(&self.conn)? {
            validate_schema(&self.conn)?;
        } else {
            tracing::info!("creating habit schema");
            self.conn
                .execute_batch(include_str!("sql/schema.sql"))
                .context("create schema")?;
        }

        ensure_required_indexes(&self.conn)
    }

    /// Inserts the demo categories and habits. Rows that already exist by
    /// name are left alone, so repeated runs do not duplicate anything.
    pub fn seed_demo_data(&self) -> Result<()> {
        for (name, color) in DEMO_CATEGORIES {
            let now = now_rfc3339()?;
            self.conn
                .execute(
                    "INSERT OR IGNORE INTO categories (name, color, created_at) VALUES (?, ?, ?)",
                    params![name, color, now],
                )
                .with_context(|| format!("insert demo category {name}"))?;
        }

        let mut inserted = 0usize;
        for demo in &DEMO_HABITS {
            let exists: Option<i64> = self
                .conn
                .query_row(
                    "SELECT id FROM habits WHERE name = ? AND archived_at IS NULL",
                    params![demo.name],
                    |row| row.get(0),
                )
                .optional()
                .with_context(|| format!("look up demo habit {}", demo.name))?;
            if exists.is_some() {
                continue;
            }

            let category_id = self.category_id_by_name(demo.category)?;
            self.create_habit(&NewHabit {
                name: demo.name.to_owned(),
                description: demo.description.to_owned(),
                emoji: Some(demo.emoji.to_owned()),
                frequency: demo.frequency,
                category_id,
            })?;
            inserted += 1;
        }
        tracing::info!(inserted, "demo data seeded");
        Ok(())
    }

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color, emoji FROM categories ORDER BY id ASC")
            .context("prepare categories query")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: CategoryId::new(row.get(0)?),
                    name: row.get(1)?,
                    color: row.get(2)?,
                    emoji: row.get(3)?,
                })
            })
            .context("query categories")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect categories")
    }

    pub fn create_category(&self, category: &NewCategory) -> Result<CategoryId> {
        let name = category.name.trim();
        if name.is_empty() {
            bail!("category name is required -- enter a name and retry");
        }
        let now = now_rfc3339()?;
        self.conn
            .execute(
                "INSERT INTO categories (name, color, emoji, created_at) VALUES (?, ?, ?, ?)",
                params![name, category.color, category.emoji, now],
            )
            .with_context(|| format!("insert category {name}"))?;

        Ok(CategoryId::new(self.conn.last_insert_rowid()))
    }

    /// Active habits, oldest first, with their category attached.
    pub fn list_habits(&self) -> Result<Vec<Habit>> {
        let sql = format!("{HABIT_SELECT} WHERE h.archived_at IS NULL ORDER BY h.id ASC");
        let mut stmt = self
            .conn
            .prepare(&sql)
            .context("prepare habits query")?;
        let rows = stmt.query_map([], habit_from_row).context("query habits")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect habits")
    }

    /// Loads a habit by id, archived or not.
    pub fn get_habit(&self, habit_id: HabitId) -> Result<Habit> {
        let sql = format!("{HABIT_SELECT} WHERE h.id = ?");
        self.conn
            .query_row(&sql, params![habit_id.get()], habit_from_row)
            .with_context(|| format!("load habit {}", habit_id.get()))
    }

    pub fn is_archived(&self, habit_id: HabitId) -> Result<bool> {
        let archived_at: Option<String> = self
            .conn
            .query_row(
                "SELECT archived_at FROM habits WHERE id = ?",
                params![habit_id.get()],
                |row| row.get(0),
            )
            .with_context(|| format!("load archive state of habit {}", habit_id.get()))?;
        Ok(archived_at.is_some())
    }

    pub fn create_habit(&self, habit: &NewHabit) -> Result<HabitId> {
        validate_habit(habit)?;
        let now = now_rfc3339()?;
        self.conn
            .execute(
                "
                INSERT INTO habits (
                  name, description, emoji, frequency_type, frequency_value,
                  category_id, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ",
                params![
                    habit.name.trim(),
                    habit.description,
                    habit.emoji,
                    habit.frequency.kind.as_str(),
                    habit.frequency.value,
                    habit.category_id.map(CategoryId::get),
                    now,
                    now,
                ],
            )
            .context("insert habit")?;

        let id = HabitId::new(self.conn.last_insert_rowid());
        tracing::debug!(id = id.get(), "habit created");
        Ok(id)
    }

    pub fn update_habit(&self, habit_id: HabitId, update: &UpdateHabit) -> Result<()> {
        validate_habit(update)?;
        let now = now_rfc3339()?;
        let rows_affected = self
            .conn
            .execute(
                "
                UPDATE habits
                SET
                  name = ?,
                  description = ?,
                  emoji = ?,
                  frequency_type = ?,
                  frequency_value = ?,
                  category_id = ?,
                  updated_at = ?
                WHERE id = ? AND archived_at IS NULL
                ",
                params![
                    update.name.trim(),
                    update.description,
                    update.emoji,
                    update.frequency.kind.as_str(),
                    update.frequency.value,
                    update.category_id.map(CategoryId::get),
                    now,
                    habit_id.get(),
                ],
            )
            .context("update habit")?;
        if rows_affected == 0 {
            bail!(
                "habit {} not found or archived -- reload the list and retry",
                habit_id.get()
            );
        }
        Ok(())
    }

    pub fn archive_habit(&self, habit_id: HabitId) -> Result<()> {
        let now = now_rfc3339()?;
        let rows_affected = self
            .conn
            .execute(
                "UPDATE habits SET archived_at = ?, updated_at = ? WHERE id = ? AND archived_at IS NULL",
                params![now, now, habit_id.get()],
            )
            .with_context(|| format!("archive habit {}", habit_id.get()))?;
        if rows_affected == 0 {
            bail!("habit {} not found or already archived", habit_id.get());
        }
        tracing::debug!(id = habit_id.get(), "habit archived");
        Ok(())
    }

    fn category_id_by_name(&self, name: &str) -> Result<Option<CategoryId>> {
        let id: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM categories WHERE name = ?",
                params![name],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("look up category {name}"))?;
        Ok(id.map(CategoryId::new))
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    if let Some(override_path) = env::var_os("HBT_DB_PATH") {
        return Ok(PathBuf::from(override_path));
    }

    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set HBT_DB_PATH to a writable database path")
    })?;

    let app_dir = data_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir.join("hbt.db"))
}

pub fn validate_db_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("database path must not be empty");
    }
    if path == ":memory:" {
        return Ok(());
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "database path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("database path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    if path.contains('?') {
        bail!(
            "database path {path:?} contains '?'; remove query parameters and use a plain file path"
        );
    }

    Ok(())
}

fn validate_habit(habit: &NewHabit) -> Result<()> {
    if habit.name.trim().is_empty() {
        bail!("habit name is required -- enter a name and retry");
    }
    let value = habit.frequency.value;
    match habit.frequency.kind {
        FrequencyKind::TimesPerWeek
            if !(MIN_TIMES_PER_WEEK..=MAX_TIMES_PER_WEEK).contains(&value) =>
        {
            bail!(
                "times per week must be between {MIN_TIMES_PER_WEEK} and {MAX_TIMES_PER_WEEK}, got {value}"
            );
        }
        FrequencyKind::Daily | FrequencyKind::Weekly if value != 1 => {
            bail!(
                "{} habits repeat once per period, got value {value}",
                habit.frequency.kind.as_str()
            );
        }
        _ => Ok(()),
    }
}

fn habit_from_row(row: &Row<'_>) -> rusqlite::Result<Habit> {
    let kind_raw: String = row.get(4)?;
    let kind = FrequencyKind::parse(&kind_raw).ok_or_else(|| {
        to_sql_error(anyhow!("unknown frequency type {kind_raw}"))
    })?;
    let category_id: Option<i64> = row.get(6)?;
    let category = match category_id {
        Some(id) => Some(Category {
            id: CategoryId::new(id),
            name: row.get(7)?,
            color: row.get(8)?,
            emoji: row.get(9)?,
        }),
        None => None,
    };

    Ok(Habit {
        id: HabitId::new(row.get(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        emoji: row.get(3)?,
        frequency: Frequency {
            kind,
            value: row.get(5)?,
        },
        category,
    })
}

fn has_user_tables(conn: &Connection) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "
            SELECT COUNT(*)
            FROM sqlite_master
            WHERE type = 'table'
              AND name NOT LIKE 'sqlite_%'
            ",
            [],
            |row| row.get(0),
        )
        .context("count user tables")?;
    Ok(count > 0)
}

fn validate_schema(conn: &Connection) -> Result<()> {
    for (table, required_columns) in REQUIRED_SCHEMA {
        if !table_exists(conn, table)? {
            bail!(
                "database is missing required table `{table}`; point HBT_DB_PATH at an hbt database"
            );
        }

        let columns = table_columns(conn, table)?;
        let missing: Vec<&str> = required_columns
            .iter()
            .copied()
            .filter(|column| !columns.contains(*column))
            .collect();
        if !missing.is_empty() {
            bail!(
                "table `{table}` is missing required columns: {}; run migration before launching",
                missing.join(", ")
            );
        }
    }
    Ok(())
}

fn ensure_required_indexes(conn: &Connection) -> Result<()> {
    for index in REQUIRED_INDEXES {
        conn.execute_batch(index.create_sql)
            .with_context(|| format!("ensure required index `{}`", index.name))?;
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let exists = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?)",
            params![table],
            |row| row.get::<_, i64>(0),
        )
        .with_context(|| format!("check table existence for {table}"))?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .with_context(|| format!("inspect columns for {table}"))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .with_context(|| format!("query column info for {table}"))?;
    rows.collect::<rusqlite::Result<BTreeSet<_>>>()
        .with_context(|| format!("collect columns for {table}"))
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .context("configure sqlite pragmas")
}

fn now_rfc3339() -> Result<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("format current timestamp")
}

fn to_sql_error(error: anyhow::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            error.to_string(),
        )),
    )
}
