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

//! Background application task processing.
//!
//! This module implements the command pattern used to keep potentially
//! blocking work off the main UI thread. A dedicated worker owns the database
//! connection, translates [`AppTask`] requests into database and file
//! operations, and reports results back to the application via
//! [`AppEvent`]s.
//!
//! Tasks are processed one at a time in the order they were sent, so a task
//! that depends on an earlier one (loading the segments of a rundown that
//! was just created) always sees its effect.

mod handlers;
use handlers::*;

use anyhow::Result;
use rusqlite::Connection;
use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

use crate::{
    config::AppConfig,
    db::{self, access::Caller},
    events::AppEvent,
    export::ExportMode,
    model::{ItemType, Role, Rundown, Segment, timeline::Timeline},
};

#[derive(Debug)]
pub(crate) enum AppTask {
    Bootstrap,

    LoadSegments(String),

    CreateRundown(Rundown),
    RenameRundown { id: String, name: String },
    DeleteRundown(String),
    DuplicateRundown(String),

    InsertSegment { rundown_id: String, segment: Segment, position: usize },
    UpdateSegment(Segment),
    DeleteSegment(String),
    ReorderSegments { rundown_id: String, ids: Vec<String> },

    SaveItemType { program_id: String, item_type: ItemType },

    Lookup { request: u64, rundown_id: String, query: String },
    ScanLibrary,

    Export { title: String, timeline: Timeline, mode: ExportMode },

    CreateInvite { program_id: String, role: Role, days: i64 },
    RedeemInvite(String),
    RevokeInvite(String),

    SubmitFeedback(String),
}

/// Spawns a background thread to process application tasks.
///
/// This worker thread opens its own database connection and enters a
/// blocking loop, listening for incoming [`AppTask`]s. Failures are sent
/// back as [`AppEvent::Error`], if the database cannot be opened at all a
/// [`AppEvent::FatalError`] is sent and the worker exits.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `caller` - The signed-in user all tasks run for.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(
    config: &AppConfig,
    caller: Caller,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) {
    let config = config.clone();

    thread::spawn(move || {
        let mut conn = match db::init_db(&config.database_file) {
            Ok(conn) => conn,
            Err(e) => {
                log::error!("Failed to initialise database: {:#}", e);
                let _ = event_tx.send(AppEvent::FatalError(format!("{:#}", e)));
                return;
            }
        };

        while let Ok(task) = task_rx.recv() {
            let mut ctx = TaskContext {
                config: &config,
                caller: &caller,
                event_tx: &event_tx,
                conn: &mut conn,
            };

            log::debug!("Processing {:?}", task);

            if let Err(e) = handle_task(task, &mut ctx) {
                let _ = event_tx.send(AppEvent::Error(format!("{:#}", e)));
            }
        }
    });
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
pub(crate) struct TaskContext<'a> {
    config: &'a AppConfig,
    caller: &'a Caller,
    event_tx: &'a Sender<AppEvent>,
    conn: &'a mut Connection,
}

/// Orchestrates the execution of a single task.
fn handle_task(task: AppTask, ctx: &mut TaskContext) -> Result<()> {
    match task {
        AppTask::Bootstrap => bootstrap(ctx),

        AppTask::LoadSegments(rundown_id) => load_segments(ctx, rundown_id),

        AppTask::CreateRundown(rundown) => create_rundown(ctx, rundown),
        AppTask::RenameRundown { id, name } => rename_rundown(ctx, &id, &name),
        AppTask::DeleteRundown(id) => delete_rundown(ctx, &id),
        AppTask::DuplicateRundown(id) => duplicate_rundown(ctx, &id),

        AppTask::InsertSegment { rundown_id, segment, position } => {
            insert_segment(ctx, &rundown_id, &segment, position)
        }
        AppTask::UpdateSegment(segment) => update_segment(ctx, &segment),
        AppTask::DeleteSegment(id) => delete_segment(ctx, &id),
        AppTask::ReorderSegments { rundown_id, ids } => reorder_segments(ctx, &rundown_id, &ids),

        AppTask::SaveItemType { program_id, item_type } => save_item_type(ctx, &program_id, &item_type),

        AppTask::Lookup { request, rundown_id, query } => lookup(ctx, request, rundown_id, &query),
        AppTask::ScanLibrary => scan_library(ctx),

        AppTask::Export { title, timeline, mode } => export(ctx, &title, &timeline, mode),

        AppTask::CreateInvite { program_id, role, days } => create_invite(ctx, &program_id, role, days),
        AppTask::RedeemInvite(token) => redeem_invite(ctx, &token),
        AppTask::RevokeInvite(token) => revoke_invite(ctx, &token),

        AppTask::SubmitFeedback(message) => submit_feedback(ctx, &message),
    }
}
