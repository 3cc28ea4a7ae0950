// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Text for the habits tab. Everything here is derived from state; nothing
//! mutates it.

use hbt_app::{
    FormField, FormModal, Frequency, FrequencyKind, GroupHeader, Habit, HabitForm, HabitsMode,
    HabitsTab, Picker, PickerItem, Selection,
};
use ratatui::text::{Line, Span, Text};

use crate::theme::{StyleName, Theme};

pub const SEPARATOR: &str = "────────────────────────────────";
const FOLDER: &str = "📁";
const NONE_LABEL: &str = "(none)";
const MORE_ABOVE: &str = "        ▲ more above ▲";
const MORE_BELOW: &str = "        ▼ more below ▼";
const LIST_HINT: &str = "a: add  e: edit  d: delete";
const CONFIRM_HINT: &str = "y: confirm  n: cancel";
const FORM_HINT: &str = "tab/↑↓: move  ←→: frequency  enter: pick  ctrl+s: save  esc: cancel";
const PICKER_HINT: &str = "↑↓←→: navigate  pgup/pgdn: scroll  enter: select  esc: cancel";
const LABEL_WIDTH: usize = 12;

pub fn format_frequency(frequency: Frequency) -> String {
    match frequency.kind {
        FrequencyKind::Daily => "(daily)".to_owned(),
        FrequencyKind::Weekly => "(weekly)".to_owned(),
        FrequencyKind::TimesPerWeek => format!("({}x/week)", frequency.value),
    }
}

/// Title followed by the body.
pub fn render_view(tab: &HabitsTab, theme: &Theme) -> Text<'static> {
    if let Some(error) = tab.error() {
        return error_text(error, theme);
    }

    let title = match tab.mode() {
        HabitsMode::List => "Manage Habits",
        HabitsMode::Form(form) => form_title(form),
        HabitsMode::ConfirmDelete => "Delete Habit",
    };
    let mut lines = vec![
        Line::styled(title, theme.style(StyleName::Title)),
        Line::default(),
    ];
    lines.extend(body_lines(tab, theme));
    Text::from(lines)
}

/// Body only, for hosts that draw their own titled frame.
pub fn render_body(tab: &HabitsTab, theme: &Theme) -> Text<'static> {
    if let Some(error) = tab.error() {
        return error_text(error, theme);
    }
    Text::from(body_lines(tab, theme))
}

pub fn has_modal(tab: &HabitsTab) -> bool {
    tab.has_modal()
}

/// Content of the open picker, if any.
pub fn render_modal(tab: &HabitsTab, theme: &Theme) -> Option<Text<'static>> {
    let lines = match tab.form()?.modal()? {
        FormModal::Emoji(picker) => {
            picker_lines("Pick an Emoji", picker, "No emojis found", theme, |emoji, selected| {
                if selected {
                    Span::styled(format!("[{}]", emoji.glyph), theme.style(StyleName::Selected))
                } else {
                    Span::raw(format!(" {} ", emoji.glyph))
                }
            })
        }
        FormModal::Category(picker) => picker_lines(
            "Pick a Category",
            picker,
            "No categories found",
            theme,
            |category, selected| {
                let emoji = category
                    .emoji
                    .as_deref()
                    .filter(|emoji| !emoji.is_empty())
                    .unwrap_or(FOLDER);
                let marker = if selected { "> " } else { "  " };
                let style = if selected {
                    theme.style(StyleName::Selected)
                } else {
                    theme.category_style(&category.color)
                };
                Span::styled(format!("{marker}{emoji} {}", category.name), style)
            },
        ),
    };
    Some(Text::from(lines))
}

fn error_text(error: &str, theme: &Theme) -> Text<'static> {
    Text::from(Line::styled(
        format!("Error: {error}"),
        theme.style(StyleName::Muted),
    ))
}

fn form_title(form: &HabitForm) -> &'static str {
    if form.is_editing() {
        "Edit Habit"
    } else {
        "New Habit"
    }
}

fn body_lines(tab: &HabitsTab, theme: &Theme) -> Vec<Line<'static>> {
    match tab.mode() {
        HabitsMode::List => list_lines(tab, theme),
        HabitsMode::Form(form) => form_lines(form, theme),
        HabitsMode::ConfirmDelete => confirm_lines(tab, theme),
    }
}

fn list_lines(tab: &HabitsTab, theme: &Theme) -> Vec<Line<'static>> {
    let muted = theme.style(StyleName::Muted);
    if tab.habits().is_empty() {
        return vec![Line::styled("No habits yet. Press 'a' to add one.", muted)];
    }

    let mut lines = Vec::new();
    let mut index = 0usize;
    for (position, group) in tab.groups().into_iter().enumerate() {
        if position > 0 {
            lines.push(Line::styled(SEPARATOR, muted));
        }
        lines.push(match group.header {
            GroupHeader::Category(category) => {
                let emoji = category
                    .emoji
                    .as_deref()
                    .filter(|emoji| !emoji.is_empty())
                    .unwrap_or(FOLDER);
                Line::styled(
                    format!("{} {emoji}", category.name),
                    theme.category_style(&category.color),
                )
            }
            GroupHeader::Uncategorized => Line::styled("Uncategorized", muted),
        });
        for habit in group.habits {
            lines.push(habit_line(habit, index == tab.cursor(), theme));
            index += 1;
        }
    }

    lines.push(Line::default());
    lines.push(Line::styled(LIST_HINT, muted));
    lines
}

fn habit_line(habit: &Habit, selected: bool, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::raw(if selected { "> " } else { "  " })];
    if let Some(emoji) = habit.emoji.as_deref().filter(|emoji| !emoji.is_empty()) {
        spans.push(Span::raw(format!("{emoji} ")));
    }
    let name_style = if selected {
        theme.style(StyleName::Selected)
    } else {
        theme.style(StyleName::Normal)
    };
    spans.push(Span::styled(habit.name.clone(), name_style));
    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        format_frequency(habit.frequency),
        theme.style(StyleName::Muted),
    ));
    Line::from(spans)
}

fn confirm_lines(tab: &HabitsTab, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(habit) = tab.selected_habit() {
        lines.push(Line::from(format!(
            "Are you sure you want to delete '{}'?",
            habit.name
        )));
        lines.push(Line::default());
    }
    lines.push(Line::styled(CONFIRM_HINT, theme.style(StyleName::Muted)));
    lines
}

fn form_lines(form: &HabitForm, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = form
        .applicable_fields()
        .into_iter()
        .map(|field| field_line(form, field, theme))
        .collect();

    if let Some(message) = form.validation() {
        lines.push(Line::default());
        lines.push(Line::styled(
            message.to_owned(),
            theme.style(StyleName::Error),
        ));
    }
    lines.push(Line::default());
    lines.push(Line::styled(FORM_HINT, theme.style(StyleName::Muted)));
    lines
}

fn field_line(form: &HabitForm, field: FormField, theme: &Theme) -> Line<'static> {
    let focused = form.focus() == field;
    let label_style = if focused {
        theme.style(StyleName::Focused)
    } else {
        theme.style(StyleName::Label)
    };
    let mut spans = vec![
        Span::raw(if focused { "> " } else { "  " }),
        Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), label_style),
        Span::raw(" "),
    ];

    match field {
        FormField::Name => text_value(&mut spans, form.name(), "", focused, theme),
        FormField::Description => text_value(&mut spans, form.description(), "", focused, theme),
        FormField::FrequencyValue => {
            text_value(&mut spans, form.frequency_value(), "1-7", focused, theme);
        }
        FormField::FrequencyKind => {
            let label = form.frequency_kind().label();
            if focused {
                spans.push(Span::styled(
                    format!("< {label} >"),
                    theme.style(StyleName::Focused),
                ));
            } else {
                spans.push(Span::styled(label, theme.style(StyleName::Normal)));
            }
        }
        FormField::Category => {
            let (display, style) = match form.category() {
                Some(category) => (
                    category.name.clone(),
                    theme.category_style(&category.color),
                ),
                None => (NONE_LABEL.to_owned(), theme.style(StyleName::Muted)),
            };
            spans.push(choice_value(display, style, focused, theme));
        }
        FormField::Emoji => {
            let (display, style) = match form.emoji() {
                Some(emoji) => (emoji.to_owned(), theme.style(StyleName::Normal)),
                None => (NONE_LABEL.to_owned(), theme.style(StyleName::Muted)),
            };
            spans.push(choice_value(display, style, focused, theme));
        }
    }
    Line::from(spans)
}

fn text_value(
    spans: &mut Vec<Span<'static>>,
    value: &str,
    placeholder: &str,
    focused: bool,
    theme: &Theme,
) {
    if value.is_empty() && !placeholder.is_empty() && !focused {
        spans.push(Span::styled(
            placeholder.to_owned(),
            theme.style(StyleName::Muted),
        ));
        return;
    }
    spans.push(Span::styled(value.to_owned(), theme.style(StyleName::Normal)));
    if focused {
        spans.push(Span::styled("_", theme.style(StyleName::Focused)));
    }
}

/// Picker-backed fields show their value in brackets while focused.
fn choice_value(
    display: String,
    style: ratatui::style::Style,
    focused: bool,
    theme: &Theme,
) -> Span<'static> {
    if focused {
        Span::styled(format!("[{display}]"), theme.style(StyleName::Selected))
    } else {
        Span::styled(display, style)
    }
}

fn picker_lines<T: PickerItem>(
    title: &'static str,
    picker: &Picker<T>,
    empty: &'static str,
    theme: &Theme,
    cell: impl Fn(&T, bool) -> Span<'static>,
) -> Vec<Line<'static>> {
    let muted = theme.style(StyleName::Muted);
    let mut lines = vec![
        Line::styled(title, theme.style(StyleName::Title)),
        Line::default(),
        Line::from(vec![
            Span::raw("Search: "),
            Span::raw(picker.search().to_owned()),
            Span::styled("_", theme.style(StyleName::Focused)),
        ]),
        Line::default(),
    ];

    if picker.selection() == Selection::None {
        lines.push(Line::styled(
            format!("[{NONE_LABEL}]"),
            theme.style(StyleName::Selected),
        ));
    } else {
        lines.push(Line::from(format!(" {NONE_LABEL} ")));
    }
    lines.push(Line::default());

    if picker.filtered_len() == 0 {
        lines.push(Line::styled(empty, muted));
    } else {
        if picker.has_more_above() {
            lines.push(Line::styled(MORE_ABOVE, muted));
        }
        for row in picker.visible_rows() {
            let spans: Vec<Span<'static>> = picker
                .row(row)
                .into_iter()
                .map(|(index, item)| cell(item, picker.selection() == Selection::Item(index)))
                .collect();
            lines.push(Line::from(spans));
        }
        if picker.has_more_below() {
            lines.push(Line::styled(MORE_BELOW, muted));
        }
    }

    lines.push(Line::default());
    lines.push(Line::styled(PICKER_HINT, muted));
    lines
}

#[cfg(test)]
mod tests {
    use super::{SEPARATOR, format_frequency, has_modal, render_body, render_modal, render_view};
    use crate::theme::{StyleName, Theme};
    use hbt_app::{
        FormInput, Frequency, HabitsCommand, HabitsMsg, HabitsSnapshot, HabitsTab,
    };
    use hbt_testkit::{demo_categories, demo_habits, habit};
    use ratatui::text::Text;

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    fn tab_with(snapshot: HabitsSnapshot) -> HabitsTab {
        let mut tab = HabitsTab::new();
        tab.resize(80, 24);
        tab.apply(HabitsMsg::Loaded(Ok(snapshot)));
        tab
    }

    fn demo_tab() -> HabitsTab {
        tab_with(HabitsSnapshot {
            habits: demo_habits(),
            categories: demo_categories(),
        })
    }

    #[test]
    fn frequency_suffixes() {
        assert_eq!(format_frequency(Frequency::daily()), "(daily)");
        assert_eq!(format_frequency(Frequency::weekly()), "(weekly)");
        assert_eq!(format_frequency(Frequency::times_per_week(3)), "(3x/week)");
    }

    #[test]
    fn single_uncategorized_habit_has_no_separator() {
        let tab = tab_with(HabitsSnapshot {
            habits: vec![habit(1, "Read", Frequency::daily(), None)],
            categories: Vec::new(),
        });

        assert_eq!(
            plain(&render_body(&tab, &Theme::dark())),
            vec![
                "Uncategorized",
                "> Read (daily)",
                "",
                "a: add  e: edit  d: delete",
            ]
        );
    }

    #[test]
    fn demo_list_groups_in_category_order() {
        let tab = demo_tab();
        let lines = plain(&render_view(&tab, &Theme::dark()));

        assert_eq!(lines[0], "Manage Habits");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Health 📁");
        assert_eq!(lines[3], "> 💪 Morning Exercise (daily)");
        assert_eq!(lines[4], "  🧘 Meditate (daily)");
        assert_eq!(lines[5], "  💧 Drink Water (daily)");
        assert_eq!(lines[6], SEPARATOR);
        assert_eq!(lines[7], "Work 📁");
        assert_eq!(lines[8], "  📝 Weekly Review (weekly)");
        assert_eq!(lines[9], SEPARATOR);
        assert_eq!(lines[10], "Personal 📁");
        assert_eq!(lines[12], "  🎓 Learn Something (3x/week)");
        assert_eq!(lines.iter().filter(|line| *line == SEPARATOR).count(), 2);
    }

    #[test]
    fn rendering_is_stable() {
        let tab = demo_tab();
        let theme = Theme::dark();
        assert_eq!(render_view(&tab, &theme), render_view(&tab, &theme));
    }

    #[test]
    fn cursor_line_uses_selected_style() {
        let mut tab = demo_tab();
        tab.handle_command(HabitsCommand::Down);
        let theme = Theme::dark();
        let text = render_body(&tab, &theme);

        let line = &text.lines[2];
        let name = line
            .spans
            .iter()
            .find(|span| span.content == "Meditate")
            .expect("name span");
        assert_eq!(name.style, theme.style(StyleName::Selected));
        assert!(plain(&text)[2].starts_with("> "));
    }

    #[test]
    fn empty_list_shows_hint_only() {
        let tab = tab_with(HabitsSnapshot {
            habits: Vec::new(),
            categories: demo_categories(),
        });
        assert_eq!(
            plain(&render_body(&tab, &Theme::dark())),
            vec!["No habits yet. Press 'a' to add one."]
        );
    }

    #[test]
    fn error_replaces_view() {
        let mut tab = demo_tab();
        tab.apply(HabitsMsg::Loaded(Err("disk on fire".to_owned())));

        let theme = Theme::dark();
        let text = render_view(&tab, &theme);
        assert_eq!(plain(&text), vec!["Error: disk on fire"]);
        assert_eq!(text.lines[0].style, theme.style(StyleName::Muted));
        assert_eq!(plain(&render_body(&tab, &theme)), vec!["Error: disk on fire"]);
    }

    #[test]
    fn confirm_delete_names_cursored_habit() {
        let mut tab = demo_tab();
        tab.handle_command(HabitsCommand::Down);
        tab.handle_command(HabitsCommand::Delete);

        assert_eq!(
            plain(&render_view(&tab, &Theme::dark())),
            vec![
                "Delete Habit",
                "",
                "Are you sure you want to delete 'Meditate'?",
                "",
                "y: confirm  n: cancel",
            ]
        );
    }

    #[test]
    fn form_shows_fields_and_validation() {
        let mut tab = demo_tab();
        tab.handle_command(HabitsCommand::Add);
        tab.handle_form_input(FormInput::Submit);

        let lines = plain(&render_view(&tab, &Theme::dark()));
        assert_eq!(lines[0], "New Habit");
        assert!(lines[2].starts_with("> Name"));
        assert!(lines[2].ends_with('_'));
        assert!(lines.iter().any(|line| line.contains("daily")));
        assert!(!lines.iter().any(|line| line.contains("Times/week")));
        assert!(lines.iter().any(|line| line.trim_end().ends_with("(none)")));
        assert!(lines.contains(&"name is required".to_owned()));
        assert!(!has_modal(&tab));
        assert_eq!(render_modal(&tab, &Theme::dark()), None);
    }

    #[test]
    fn edit_form_title_and_values() {
        let mut tab = demo_tab();
        for _ in 0..5 {
            tab.handle_command(HabitsCommand::Down);
        }
        tab.handle_command(HabitsCommand::Edit);

        let lines = plain(&render_view(&tab, &Theme::dark()));
        assert_eq!(lines[0], "Edit Habit");
        assert!(lines.iter().any(|line| line.contains("Learn Something")));
        assert!(lines.iter().any(|line| line.contains("Times/week") && line.ends_with('3')));
        assert!(lines.iter().any(|line| line.contains("Personal")));
    }

    #[test]
    fn emoji_modal_grid_and_scroll_indicators() {
        let mut tab = demo_tab();
        tab.handle_command(HabitsCommand::Add);
        for _ in 0..4 {
            tab.handle_form_input(FormInput::NextField);
        }
        tab.handle_form_input(FormInput::Confirm);
        assert!(has_modal(&tab));

        let theme = Theme::dark();
        let lines = plain(&render_modal(&tab, &theme).expect("modal"));
        assert_eq!(lines[0], "Pick an Emoji");
        assert_eq!(lines[2], "Search: _");
        assert_eq!(lines[4], "[(none)]");
        assert!(!lines.iter().any(|line| line.contains("more above")));
        assert!(lines.iter().any(|line| line.contains("▼ more below ▼")));
        assert!(lines[6].starts_with(" 💪  🏃  🚴 "));

        for _ in 0..9 {
            tab.handle_form_input(FormInput::Down);
        }
        let lines = plain(&render_modal(&tab, &theme).expect("modal"));
        assert_eq!(lines[4], " (none) ");
        assert!(lines.iter().any(|line| line.contains("▲ more above ▲")));
        assert!(!lines.iter().any(|line| line.contains("more below")));
        assert!(lines.iter().any(|line| line.contains("[⭐]")));
    }

    #[test]
    fn emoji_modal_reports_no_matches() {
        let mut tab = demo_tab();
        tab.handle_command(HabitsCommand::Add);
        for _ in 0..4 {
            tab.handle_form_input(FormInput::NextField);
        }
        tab.handle_form_input(FormInput::Confirm);
        for ch in "zzz".chars() {
            tab.handle_form_input(FormInput::Char(ch));
        }

        let lines = plain(&render_modal(&tab, &Theme::dark()).expect("modal"));
        assert_eq!(lines[2], "Search: zzz_");
        assert!(lines.contains(&"No emojis found".to_owned()));
    }

    #[test]
    fn category_modal_lists_categories() {
        let mut tab = demo_tab();
        tab.handle_command(HabitsCommand::Edit);
        for _ in 0..3 {
            tab.handle_form_input(FormInput::NextField);
        }
        tab.handle_form_input(FormInput::Confirm);

        let lines = plain(&render_modal(&tab, &Theme::dark()).expect("modal"));
        assert_eq!(lines[0], "Pick a Category");
        assert_eq!(lines[4], " (none) ");
        assert_eq!(lines[6], "> 📁 Health");
        assert_eq!(lines[7], "  📁 Work");
        assert_eq!(lines[8], "  📁 Personal");
    }

    #[test]
    fn category_modal_scrolls_past_six_rows() {
        let mut categories = demo_categories();
        for (offset, name) in ["Garden", "Music", "Finance", "Travel", "Chores", "Social"]
            .into_iter()
            .enumerate()
        {
            categories.push(hbt_testkit::category(offset as i64 + 4, name, "#64748B"));
        }
        let mut tab = tab_with(HabitsSnapshot {
            habits: demo_habits(),
            categories,
        });
        tab.handle_command(HabitsCommand::Add);
        for _ in 0..3 {
            tab.handle_form_input(FormInput::NextField);
        }
        tab.handle_form_input(FormInput::Confirm);

        let theme = Theme::dark();
        let lines = plain(&render_modal(&tab, &theme).expect("modal"));
        assert_eq!(lines[0], "Pick a Category");
        assert_eq!(lines[4], "[(none)]");
        assert_eq!(lines[6], "  📁 Health");
        assert_eq!(lines[11], "  📁 Finance");
        assert_eq!(lines[12], "        ▼ more below ▼");
        assert!(!lines.iter().any(|line| line.contains("more above")));
        assert!(!lines.iter().any(|line| line.contains("Travel")));

        for _ in 0..9 {
            tab.handle_form_input(FormInput::Down);
        }
        let lines = plain(&render_modal(&tab, &theme).expect("modal"));
        assert_eq!(lines[4], " (none) ");
        assert_eq!(lines[6], "        ▲ more above ▲");
        assert_eq!(lines[7], "  📁 Garden");
        assert_eq!(lines[12], "> 📁 Social");
        assert!(!lines.iter().any(|line| line.contains("more below")));
        assert!(!lines.iter().any(|line| line.contains("Health")));
    }
}
