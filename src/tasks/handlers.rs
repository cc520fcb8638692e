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

use std::path::Path;

use anyhow::Result;
use chrono::{Local, Utc};

use crate::{
    db::{self, access, library, scan},
    events::AppEvent,
    export::{self, ExportMode},
    lookup::{LibraryLookup, TrackLookup},
    model::{ItemType, Role, Rundown, Segment, timeline::Timeline},
    tasks::TaskContext,
};

const DEFAULT_RUNDOWN_NAME: &str = "Nieuw draaiboek";

pub(super) fn bootstrap(ctx: &mut TaskContext) -> Result<()> {
    let program = access::ensure_program(ctx.conn, ctx.caller, &ctx.config.program_name)?;

    let memberships = access::list_memberships(ctx.conn, ctx.caller)?;
    log::info!(
        "{} is a member of {} program(s), working in '{}'",
        ctx.caller.user_id(),
        memberships.len(),
        program.name
    );

    let mut rundowns = db::list_rundowns(ctx.conn, &program.id)?;
    if rundowns.is_empty() {
        let rundown = Rundown {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: program.id.clone(),
            name: DEFAULT_RUNDOWN_NAME.to_string(),
            date: Local::now().date_naive(),
        };
        db::create_rundown(ctx.conn, &rundown)?;
        rundowns.push(rundown);
    }

    let item_types = library::list_item_types(ctx.conn, &program.id)?;

    ctx.event_tx.send(AppEvent::Bootstrapped {
        program,
        rundowns,
        item_types,
    })?;

    Ok(())
}

pub(super) fn load_segments(ctx: &mut TaskContext, rundown_id: String) -> Result<()> {
    let segments = db::list_segments(ctx.conn, &rundown_id)?;
    ctx.event_tx.send(AppEvent::SegmentsLoaded { rundown_id, segments })?;

    Ok(())
}

pub(super) fn create_rundown(ctx: &mut TaskContext, rundown: Rundown) -> Result<()> {
    db::create_rundown(ctx.conn, &rundown)?;
    log::info!("Created rundown '{}'", rundown.name);

    Ok(())
}

pub(super) fn rename_rundown(ctx: &mut TaskContext, id: &str, name: &str) -> Result<()> {
    if !db::rename_rundown(ctx.conn, id, name)? {
        log::warn!("Rename of unknown rundown {}", id);
    }

    Ok(())
}

pub(super) fn delete_rundown(ctx: &mut TaskContext, id: &str) -> Result<()> {
    if !db::delete_rundown(ctx.conn, id)? {
        log::warn!("Delete of unknown rundown {}", id);
    }

    Ok(())
}

pub(super) fn duplicate_rundown(ctx: &mut TaskContext, id: &str) -> Result<()> {
    match db::duplicate_rundown(ctx.conn, id)? {
        Some(copy) => ctx.event_tx.send(AppEvent::RundownDuplicated(copy))?,
        None => anyhow::bail!("Draaiboek niet gevonden"),
    }

    Ok(())
}

pub(super) fn insert_segment(
    ctx: &mut TaskContext,
    rundown_id: &str,
    segment: &Segment,
    position: usize,
) -> Result<()> {
    segment.validate()?;
    db::insert_segment(ctx.conn, rundown_id, segment, position)?;

    Ok(())
}

pub(super) fn update_segment(ctx: &mut TaskContext, segment: &Segment) -> Result<()> {
    segment.validate()?;
    if !db::update_segment(ctx.conn, segment)? {
        log::warn!("Update of unknown segment {}", segment.id);
    }

    Ok(())
}

pub(super) fn delete_segment(ctx: &mut TaskContext, id: &str) -> Result<()> {
    if !db::delete_segment(ctx.conn, id)? {
        log::warn!("Delete of unknown segment {}", id);
    }

    Ok(())
}

pub(super) fn reorder_segments(ctx: &mut TaskContext, rundown_id: &str, ids: &[String]) -> Result<()> {
    db::reorder_segments(ctx.conn, rundown_id, ids)
}

pub(super) fn save_item_type(ctx: &mut TaskContext, program_id: &str, item_type: &ItemType) -> Result<()> {
    library::save_item_type(ctx.conn, program_id, item_type)?;

    let item_types = library::list_item_types(ctx.conn, program_id)?;
    ctx.event_tx.send(AppEvent::ItemTypesLoaded(item_types))?;
    ctx.event_tx
        .send(AppEvent::Info(format!("Soort '{}' opgeslagen", item_type.name.trim())))?;

    Ok(())
}

pub(super) fn lookup(ctx: &mut TaskContext, request: u64, rundown_id: String, query: &str) -> Result<()> {
    let results = LibraryLookup::new(ctx.conn).search(query)?;
    ctx.event_tx.send(AppEvent::LookupResults {
        request,
        rundown_id,
        results,
    })?;

    Ok(())
}

pub(super) fn scan_library(ctx: &mut TaskContext) -> Result<()> {
    let event_tx = ctx.event_tx;

    let count = scan::index_library(ctx.conn, &ctx.config.media_dirs, |progress| {
        let _ = event_tx.send(AppEvent::Scan(progress));
    })?;

    event_tx.send(AppEvent::ScanFinished(count))?;

    Ok(())
}

pub(super) fn export(ctx: &mut TaskContext, title: &str, timeline: &Timeline, mode: ExportMode) -> Result<()> {
    let dir = Path::new(&ctx.config.export_dir);
    let path = export::write_export(dir, title, Local::now().date_naive(), timeline, mode)?;
    ctx.event_tx.send(AppEvent::Exported(path))?;

    Ok(())
}

pub(super) fn create_invite(ctx: &mut TaskContext, program_id: &str, role: Role, days: i64) -> Result<()> {
    let invite = access::create_invite(ctx.conn, ctx.caller, program_id, role, days, Utc::now())?;
    ctx.event_tx.send(AppEvent::InviteCreated(invite))?;

    Ok(())
}

pub(super) fn redeem_invite(ctx: &mut TaskContext, token: &str) -> Result<()> {
    let membership = access::redeem_invite(ctx.conn, ctx.caller, token, Utc::now())?;
    let program = access::get_program(ctx.conn, &membership.program_id)?;

    let name = program.map(|p| p.name).unwrap_or(membership.program_id);
    ctx.event_tx.send(AppEvent::Info(format!(
        "Toegang tot '{}' als {}",
        name,
        membership.role.key()
    )))?;

    Ok(())
}

pub(super) fn revoke_invite(ctx: &mut TaskContext, token: &str) -> Result<()> {
    access::revoke_invite(ctx.conn, ctx.caller, token)?;
    ctx.event_tx.send(AppEvent::Info("Uitnodiging ingetrokken".to_string()))?;

    Ok(())
}

pub(super) fn submit_feedback(ctx: &mut TaskContext, message: &str) -> Result<()> {
    library::submit_feedback(ctx.conn, ctx.caller.user_id(), message)?;
    ctx.event_tx.send(AppEvent::Info("Bedankt voor je feedback".to_string()))?;

    Ok(())
}
