// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Execution of commands entered on the command line.

use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::{
    App,
    commander::Command,
    events::AppEvent,
    export::ExportMode,
    model::{Colour, ItemType, Role, Rundown, quick_add},
    tasks::AppTask,
};

use super::handlers::*;

pub(super) fn handle_command(app: &mut App, command: Command) -> Result<()> {
    log::debug!("Command {:?}", command);

    match command {
        Command::NewRundown { date, name } => new_rundown(app, date, name)?,
        Command::RenameRundown(name) => rename_rundown(app, name)?,
        Command::DuplicateRundown => {
            if let Some(id) = app.rundowns.active_id() {
                app.task_tx.send(AppTask::DuplicateRundown(id))?;
            }
        }
        Command::DeleteRundown => delete_rundown(app)?,

        Command::AddSegment { kind, duration, title } => {
            let mut segment = quick_add(&kind, &app.item_types, title);
            if duration > 0 {
                segment.duration = duration;
            }
            let position = app.timeline.len();
            insert_segment(app, position, segment)?;
        }
        Command::MoveSegment { from, to } => move_segment(app, from, to)?,
        Command::RemoveSegment(index) => remove_segment(app, index)?,
        Command::SetStatus(index, status) => set_status(app, index, status)?,

        Command::Export(mode) => export(app, mode)?,

        Command::Find(query) => find(app, query)?,
        Command::Pick(index) => pick(app, index),

        Command::SaveItemType { name, duration, colour } => save_item_type(app, name, duration, colour)?,
        Command::Scan => {
            if app.config.media_dirs.is_empty() {
                app.set_error("Geen mediamappen ingesteld");
            } else {
                app.scan_progress = Some(0);
                app.task_tx.send(AppTask::ScanLibrary)?;
            }
        }

        Command::Invite { role, days } => invite(app, role, days)?,
        Command::Redeem(token) => app.task_tx.send(AppTask::RedeemInvite(token))?,
        Command::Revoke(token) => app.task_tx.send(AppTask::RevokeInvite(token))?,

        Command::Feedback(message) => app.task_tx.send(AppTask::SubmitFeedback(message))?,

        Command::Quit => app.event_tx.send(AppEvent::ExitApplication)?,
    }

    Ok(())
}

fn new_rundown(app: &mut App, date: Option<NaiveDate>, name: String) -> Result<()> {
    let Some(program) = &app.program else {
        app.set_error("Nog geen programma geladen");
        return Ok(());
    };

    let rundown = Rundown {
        id: uuid::Uuid::new_v4().to_string(),
        owner_id: program.id.clone(),
        name,
        date: date.unwrap_or_else(|| Local::now().date_naive()),
    };

    app.rundowns.add(rundown.clone());
    app.task_tx.send(AppTask::CreateRundown(rundown))?;

    load_active_rundown(app)
}

fn rename_rundown(app: &mut App, name: String) -> Result<()> {
    let Some(id) = app.rundowns.active_id() else {
        return Ok(());
    };

    app.rundowns.rename(&id, &name);
    app.task_tx.send(AppTask::RenameRundown { id, name })?;

    Ok(())
}

fn delete_rundown(app: &mut App) -> Result<()> {
    let Some(id) = app.rundowns.active_id() else {
        return Ok(());
    };

    match app.rundowns.remove(&id) {
        Some(removed) => {
            app.set_info(format!("'{}' verwijderd", removed.name));
            app.task_tx.send(AppTask::DeleteRundown(id))?;
            load_active_rundown(app)
        }
        None => {
            app.set_error("Het laatste draaiboek kan niet verwijderd worden");
            Ok(())
        }
    }
}

fn export(app: &mut App, mode: Option<ExportMode>) -> Result<()> {
    let Some(rundown) = app.rundowns.active() else {
        app.set_error("Geen draaiboek geselecteerd");
        return Ok(());
    };

    let title = rundown.name.clone();
    let mode = mode.unwrap_or(app.config.default_export_mode);

    app.task_tx.send(AppTask::Export {
        title,
        timeline: app.timeline.clone(),
        mode,
    })?;

    Ok(())
}

fn find(app: &mut App, query: String) -> Result<()> {
    let Some(rundown_id) = app.rundowns.active_id() else {
        app.set_error("Geen draaiboek geselecteerd");
        return Ok(());
    };

    app.lookup.request += 1;
    app.lookup.rundown_id = Some(rundown_id.clone());
    app.lookup.results.clear();

    app.task_tx.send(AppTask::Lookup {
        request: app.lookup.request,
        rundown_id,
        query,
    })?;

    Ok(())
}

/// Opens a new music segment form pre-filled from a lookup result.
fn pick(app: &mut App, index: usize) {
    let Some(track) = app.lookup.results.get(index).cloned() else {
        app.set_error(format!("Zoekresultaat {} bestaat niet", index + 1));
        return;
    };

    app.lookup.results.clear();

    let position = app
        .segment_table
        .selected()
        .filter(|i| *i < app.timeline.len())
        .map_or(app.timeline.len(), |i| i + 1);

    open_new_form(app, position, &track.into_segment());
}

fn save_item_type(app: &mut App, name: String, duration: u64, colour: Colour) -> Result<()> {
    let Some(program) = &app.program else {
        app.set_error("Nog geen programma geladen");
        return Ok(());
    };

    let item_type = ItemType {
        name,
        colour,
        default_duration: duration,
    };

    app.task_tx.send(AppTask::SaveItemType {
        program_id: program.id.clone(),
        item_type,
    })?;

    Ok(())
}

fn invite(app: &mut App, role: Role, days: i64) -> Result<()> {
    let Some(program) = &app.program else {
        app.set_error("Nog geen programma geladen");
        return Ok(());
    };

    app.task_tx.send(AppTask::CreateInvite {
        program_id: program.id.clone(),
        role,
        days,
    })?;

    Ok(())
}
