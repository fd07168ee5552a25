//! Line commands typed at the console prompt.
//!
//! Each line maps to at most one [`Event`]. Commands that act on "the current
//! record" (`edit`, `delete`) fall back to the selected row when no id is
//! given; paging commands are relative to the current page.
//!
//! | command                     | event                         |
//! |-----------------------------|-------------------------------|
//! | `load`                      | `Load`                        |
//! | `select <id>` / `unselect`  | `Select`                      |
//! | `new`                       | `New`                         |
//! | `edit [id]`                 | `Edit`                        |
//! | `set <field> <value…>`      | `FieldChange`                 |
//! | `save` / `cancel`           | `Save` / `CancelEdit`         |
//! | `delete [id]`               | `DeleteRequest`               |
//! | `yes` / `no`                | `DeleteConfirm` / `DeleteCancel` |
//! | `search [text…]`            | `FilterChange` (global)       |
//! | `filter <field> [text…]`    | `FilterChange` (column)       |
//! | `match <field> <mode>`      | `FilterMatchMode`             |
//! | `clear`                     | `ClearFilters`                |
//! | `sort <field>`              | `Sort`                        |
//! | `page <n>` / `next` / `prev`| `Page`                        |
//! | `rows <5/10/25>`            | `PageSize`                    |
//! | `export <csv/pdf>`          | `Export`                      |

use crate::app::{AppState, Event};
use crate::domain::error::{PetdeskError, Result};
use crate::domain::{PetField, PetId};
use crate::export::ExportFormat;
use crate::filter::{FilterKey, MatchMode};

/// Help text listing every command.
pub const HELP: &str = "\
load                     reload pets from the service
select <id> | unselect   select a row
new                      open an empty Pet Details dialog
edit [id]                edit the selected pet
set <field> <value>      change name or description in the dialog
save | cancel            save or close the dialog
delete [id]              delete the selected pet (asks first)
yes | no                 answer the delete confirmation
search [text]            global search over id, name and description
filter <field> [text]    column filter on name or description
match <field> <mode>     starts_with, contains, not_contains, ends_with, equals, not_equals
clear                    clear every filter
sort <field>             cycle ascending, descending, unsorted
page <n> | next | prev   move between pages
rows <5|10|25>           rows per page
export <csv|pdf>         export every pet to a file
help | quit";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(Event),
    Help,
    Quit,
}

/// Splits `line` into its first word and the (trimmed) rest.
fn split_word(line: &str) -> (&str, &str) {
    let line = line.trim();
    line.split_once(char::is_whitespace)
        .map_or((line, ""), |(head, rest)| (head, rest.trim()))
}

/// Text argument; empty text clears a filter.
fn optional_text(rest: &str) -> Option<String> {
    (!rest.is_empty()).then(|| rest.to_string())
}

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str> {
    if rest.is_empty() {
        Err(PetdeskError::Command(format!("usage: {usage}")))
    } else {
        Ok(rest)
    }
}

/// Id argument, or the selected row's id.
fn target_id(rest: &str, state: &AppState, usage: &str) -> Result<PetId> {
    if !rest.is_empty() {
        return Ok(PetId::parse(rest));
    }
    state
        .selected()
        .and_then(|pet| pet.id.clone())
        .ok_or_else(|| PetdeskError::Command(format!("no pet selected; usage: {usage}")))
}

fn number(rest: &str, usage: &str) -> Result<usize> {
    required(rest, usage)?
        .parse()
        .map_err(|_| PetdeskError::Command(format!("not a number: {rest}; usage: {usage}")))
}

/// Parses one command line against the current state.
///
/// Returns `Ok(None)` for a blank line.
///
/// # Errors
///
/// Returns [`PetdeskError::Command`] for unknown commands or missing
/// arguments, [`PetdeskError::UnknownField`] for bad field names, and
/// [`PetdeskError::Config`] or [`PetdeskError::Export`] for bad match modes
/// or export formats.
///
/// # Example
///
/// ```
/// use petdesk::app::{AppState, Event};
/// use petdesk::command::{parse_command, Command};
/// use petdesk::ui::Theme;
///
/// let state = AppState::new(Theme::default());
/// let command = parse_command("sort name", &state).unwrap();
/// assert_eq!(command, Some(Command::Event(Event::Sort(petdesk::domain::PetField::Name))));
/// ```
pub fn parse_command(line: &str, state: &AppState) -> Result<Option<Command>> {
    let (word, rest) = split_word(line);
    if word.is_empty() {
        return Ok(None);
    }

    let event = match word.to_ascii_lowercase().as_str() {
        "quit" | "q" | "exit" => return Ok(Some(Command::Quit)),
        "help" | "?" => return Ok(Some(Command::Help)),
        "load" | "reload" => Event::Load,
        "select" => Event::Select(Some(PetId::parse(required(rest, "select <id>")?))),
        "unselect" => Event::Select(None),
        "new" => Event::New,
        "edit" => Event::Edit(target_id(rest, state, "edit [id]")?),
        "set" => {
            let (field, value) = split_word(required(rest, "set <field> <value>")?);
            Event::FieldChange {
                field: field.parse()?,
                value: value.to_string(),
            }
        }
        "save" => Event::Save,
        "cancel" => Event::CancelEdit,
        "delete" | "del" => Event::DeleteRequest(target_id(rest, state, "delete [id]")?),
        "yes" | "y" => Event::DeleteConfirm,
        "no" | "n" => Event::DeleteCancel,
        "search" => Event::FilterChange {
            key: FilterKey::Global,
            value: optional_text(rest),
        },
        "filter" => {
            let (field, value) = split_word(required(rest, "filter <field> [text]")?);
            Event::FilterChange {
                key: FilterKey::Field(field.parse()?),
                value: optional_text(value),
            }
        }
        "match" => {
            let (key, mode) = split_word(required(rest, "match <field> <mode>")?);
            Event::FilterMatchMode {
                key: key.parse()?,
                mode: required(mode, "match <field> <mode>")?.parse::<MatchMode>()?,
            }
        }
        "clear" => Event::ClearFilters,
        "sort" => Event::Sort(required(rest, "sort <field>")?.parse::<PetField>()?),
        "page" => {
            let page = number(rest, "page <n>")?;
            Event::Page(page.saturating_sub(1))
        }
        "next" => Event::Page(state.pagination.page() + 1),
        "prev" => Event::Page(state.pagination.page().saturating_sub(1)),
        "rows" => Event::PageSize(number(rest, "rows <5|10|25>")?),
        "export" => Event::Export(required(rest, "export <csv|pdf>")?.parse::<ExportFormat>()?),
        other => {
            return Err(PetdeskError::Command(format!(
                "unknown command: {other} (type help)"
            )))
        }
    };

    Ok(Some(Command::Event(event)))
}
